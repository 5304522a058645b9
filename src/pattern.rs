//! The five fixed log-line grammars, one per [`LogFormat`].
//!
//! Each grammar is a whole-line-anchored regex compiled once into a
//! process-wide static and looked up by format id. A line that only
//! partially matches is rejected outright; there are no partial successes.
//!
//! The formats correspond to Squid's built-in `logformat` definitions:
//!
//! ```text
//! squid      %ts.%03tu %6tr %>a %Ss/%03>Hs %<st %rm %ru %[un %Sh/%<a %mt
//! common     %>a %[ui %[un [%tl] "%rm %ru HTTP/%rv" %>Hs %<st %Ss:%Sh
//! combined   %>a %[ui %[un [%tl] "%rm %ru HTTP/%rv" %>Hs %<st
//!            "%{Referer}>h" "%{User-Agent}>h" %Ss:%Sh
//! referrer   %ts.%03tu %>a %{Referer}>h %ru
//! useragent  %>a [%tl] "%{User-Agent}>h"
//! ```
//!
//! Lines are expected to be whitespace-normalized (see
//! [`collapse_whitespace`](crate::engine::collapse_whitespace)) before
//! matching: the grammars assume single spaces between fields.

use std::sync::LazyLock;

use regex::Regex;

use crate::record::LogFormat;

/// Squid format. Captures, in order: timestamp (with fraction), response
/// time, client IP, request-status/hierarchy ("TCP_MISS/200"), reply size,
/// method, URL, user name, hierarchy/server-IP pair, MIME type.
static SQUID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\S+) (\S+) (\S+) (\S+) (\S+) (\S+) (.*?) (\S+) (\S+) (.*)$").unwrap()
});

/// Common format. Captures: client IP, ident user, auth user, bracketed
/// local time, method, URL, protocol version, HTTP status, reply size,
/// request-status/hierarchy.
static COMMON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(\S+) (\S+) (\S+) \[(\S+ \S+)\] "(\S+) (\S+) (\S+)" (\S+) (\S+) (.*)$"#)
        .unwrap()
});

/// Combined format. Common fields plus quoted referrer and quoted
/// user-agent, request-status/hierarchy last.
static COMBINED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(\S+) (\S+) (\S+) \[(.*?)\] "(\S+) (.*?) (\S+)" (\S+) (\S+) "(.*?)" "(.*?)" (.*)$"#,
    )
    .unwrap()
});

/// Referrer format. Captures: timestamp, client IP, referrer, URL.
static REFERRER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\S+) (\S+) (\S+) (.*)$").unwrap());

/// UserAgent format. Captures: client IP, bracketed local time, quoted
/// user-agent.
static USERAGENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^(\S+) \[(\S+ \S+)\] "(.*?)"$"#).unwrap());

/// Squid-date shape: `dd/Mon/yyyy:hh:mm:ss` with an optional trailing
/// timezone, which is captured but ignored by the epoch conversion.
pub static SQUID_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{2})/([A-Z][a-z]{2})/(\d{4}):(\d{2}):(\d{2}):(\d{2})(?: .*)?$").unwrap()
});

/// Look up the grammar for a format. `Unknown` has no grammar, so every
/// line fails to parse under it.
pub fn pattern_for(format: LogFormat) -> Option<&'static Regex> {
    match format {
        LogFormat::Squid => Some(&SQUID),
        LogFormat::Common => Some(&COMMON),
        LogFormat::Combined => Some(&COMBINED),
        LogFormat::Referrer => Some(&REFERRER),
        LogFormat::UserAgent => Some(&USERAGENT),
        LogFormat::Unknown => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUID_LINE: &str = "1157689312.587 320 65.65.65.65 TCP_MISS/200 16938 GET \
                              http://example.com/ - DIRECT/10.0.0.1 text/html";

    #[test]
    fn test_squid_capture_order() {
        let caps = SQUID.captures(SQUID_LINE).expect("should match");
        assert_eq!(&caps[1], "1157689312.587");
        assert_eq!(&caps[2], "320");
        assert_eq!(&caps[3], "65.65.65.65");
        assert_eq!(&caps[4], "TCP_MISS/200");
        assert_eq!(&caps[5], "16938");
        assert_eq!(&caps[6], "GET");
        assert_eq!(&caps[7], "http://example.com/");
        assert_eq!(&caps[8], "-");
        assert_eq!(&caps[9], "DIRECT/10.0.0.1");
        assert_eq!(&caps[10], "text/html");
    }

    #[test]
    fn test_common_capture_order() {
        let line = "172.17.0.2 - frank [10/Oct/2000:13:55:36 -0700] \
                    \"GET /apache_pb.gif HTTP/1.0\" 200 2326 TCP_MISS:HIER_DIRECT";
        let caps = COMMON.captures(line).expect("should match");
        assert_eq!(&caps[1], "172.17.0.2");
        assert_eq!(&caps[2], "-");
        assert_eq!(&caps[3], "frank");
        assert_eq!(&caps[4], "10/Oct/2000:13:55:36 -0700");
        assert_eq!(&caps[5], "GET");
        assert_eq!(&caps[6], "/apache_pb.gif");
        assert_eq!(&caps[7], "HTTP/1.0");
        assert_eq!(&caps[8], "200");
        assert_eq!(&caps[9], "2326");
        assert_eq!(&caps[10], "TCP_MISS:HIER_DIRECT");
    }

    #[test]
    fn test_combined_quoted_fields() {
        let line = "10.0.0.5 - - [10/Oct/2000:13:55:36 -0700] \
                    \"GET http://example.com/x HTTP/1.1\" 200 512 \
                    \"http://ref.example.com/\" \"Mozilla/5.0 (X11; Linux)\" TCP_HIT:NONE";
        let caps = COMBINED.captures(line).expect("should match");
        assert_eq!(&caps[10], "http://ref.example.com/");
        assert_eq!(&caps[11], "Mozilla/5.0 (X11; Linux)");
        assert_eq!(&caps[12], "TCP_HIT:NONE");
    }

    #[test]
    fn test_partial_line_rejected() {
        // Missing the trailing fields; the anchored grammar must not
        // accept a prefix match.
        assert!(COMMON.captures("172.17.0.2 - frank").is_none());
        assert!(USERAGENT.captures("10.0.0.1 [x y] \"agent\" trailing").is_none());
    }

    #[test]
    fn test_squid_date_shape() {
        let caps = SQUID_DATE.captures("10/Oct/2000:13:55:36 -0700").unwrap();
        assert_eq!(&caps[1], "10");
        assert_eq!(&caps[2], "Oct");
        assert_eq!(&caps[3], "2000");
        assert_eq!(&caps[6], "36");

        assert!(SQUID_DATE.captures("10/Oct/2000:13:55:36").is_some());
        assert!(SQUID_DATE.captures("10-Oct-2000 13:55:36").is_none());
    }

    #[test]
    fn test_unknown_has_no_pattern() {
        assert!(pattern_for(LogFormat::Unknown).is_none());
        assert!(pattern_for(LogFormat::Squid).is_some());
    }
}
