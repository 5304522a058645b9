//! Data structures representing parsed log lines.
//!
//! A [`LogRecord`] is flat: it carries every field any of the five formats
//! can produce, and a successful parse populates only the subset relevant
//! to the active format. The rest keep their documented sentinels: `0` for
//! unsigned fields, `-1` surfaced by the integer accessor for inapplicable
//! fields, and [`INVALID_TEXT`] for string fields with no meaning under the
//! active format.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Marker returned by string accessors for a field that does not apply to
/// the currently active format.
pub const INVALID_TEXT: &str = "@@@";

/// The five supported log grammars, plus `Unknown` for anything else.
///
/// The format is fixed when the engine is constructed and never changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Squid,
    Common,
    Combined,
    Referrer,
    UserAgent,
    Unknown,
}

impl FromStr for LogFormat {
    type Err = std::convert::Infallible;

    /// Case-insensitive; any unrecognized name maps to `Unknown` rather
    /// than failing, which makes every subsequent `append` fail instead.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "squid" => LogFormat::Squid,
            "common" => LogFormat::Common,
            "combined" => LogFormat::Combined,
            "referrer" => LogFormat::Referrer,
            "useragent" => LogFormat::UserAgent,
            _ => LogFormat::Unknown,
        })
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogFormat::Squid => "squid",
            LogFormat::Common => "common",
            LogFormat::Combined => "combined",
            LogFormat::Referrer => "referrer",
            LogFormat::UserAgent => "useragent",
            LogFormat::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Identifier for a single record field, exposed to host collaborators
/// through stable string keys (see [`Field::from_key`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Timestamp,
    CliSrcIpAddr,
    LocalTime,
    UserName,
    UserNameIdent,
    ResponseTime,
    ReqMethod,
    ReqUrl,
    ReqProtoVersion,
    HttpStatus,
    ReqStatusHierStatus,
    TotalSizeReply,
    HierStatusIpAddress,
    MimeContentType,
    OrigRcvReqHeader,
    Referrer,
    UserAgent,
    Unknown,
}

impl Field {
    /// Map an external field key to its identifier. Keys are matched
    /// case-insensitively; anything unrecognized is `Unknown`.
    pub fn from_key(key: &str) -> Field {
        match key.to_ascii_lowercase().as_str() {
            "timestamp" => Field::Timestamp,
            "source_ip_address" => Field::CliSrcIpAddr,
            "localtime" => Field::LocalTime,
            "username" => Field::UserName,
            "usernameident" => Field::UserNameIdent,
            "response_time" => Field::ResponseTime,
            "request_method" => Field::ReqMethod,
            "url" => Field::ReqUrl,
            "request_proto_ver" => Field::ReqProtoVersion,
            "http_status" => Field::HttpStatus,
            "reqstatus_hierstatus" => Field::ReqStatusHierStatus,
            "total_size_reply" => Field::TotalSizeReply,
            "hier_status_server_ip" => Field::HierStatusIpAddress,
            "mimetype" => Field::MimeContentType,
            "originrcv_reqheader" => Field::OrigRcvReqHeader,
            "referrer" => Field::Referrer,
            "useragent" => Field::UserAgent,
            _ => Field::Unknown,
        }
    }
}

/// A field value with its type tag.
///
/// Accessors match on this exhaustively instead of inspecting runtime
/// type tags; a field is exactly one of signed, unsigned, or text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Int(i32),
    UInt(u32),
    Str(String),
}

/// Structured result of parsing one log line.
///
/// A new successful parse replaces the record wholesale; there is no
/// field-level merge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Unix timestamp in whole seconds. Squid's fractional timestamps are
    /// deliberately truncated.
    pub timestamp: u32,

    /// Client source address, packed big-endian.
    pub cli_src_ip_addr: u32,

    /// Bracketed local-time string as it appeared in the line.
    pub local_time: String,

    /// Authenticated user name, or `-`.
    pub user_name: String,

    /// User name from ident, or `-`.
    pub user_name_ident: String,

    /// Response time in milliseconds (squid format).
    pub response_time: i32,

    pub req_method: String,
    pub req_url: String,
    pub req_proto_version: String,
    pub http_status: i32,

    /// Request-status/hierarchy pair, e.g. `TCP_MISS/200`.
    pub req_status_hier_status: String,

    /// Total size of the reply sent to the client.
    pub total_size_reply: i32,

    /// Hierarchy/origin-server pair, e.g. `DIRECT/10.0.0.1` (squid format).
    pub hier_status_ip_address: String,

    /// MIME content type (squid format).
    pub mime_type_content: String,

    /// Original received request header (not populated by any of the five
    /// grammars; reserved for header-bearing formats).
    pub orig_rcv_req_header: String,

    pub referrer: String,
    pub user_agent: String,
}

impl LogRecord {
    /// The typed value for a field, with sentinels for fields that carry
    /// no data under the active format.
    pub fn value(&self, field: Field) -> FieldValue {
        match field {
            Field::Timestamp => FieldValue::UInt(self.timestamp),
            Field::CliSrcIpAddr => FieldValue::UInt(self.cli_src_ip_addr),
            Field::LocalTime => FieldValue::Str(self.local_time.clone()),
            Field::UserName => FieldValue::Str(self.user_name.clone()),
            Field::UserNameIdent => FieldValue::Str(self.user_name_ident.clone()),
            Field::ResponseTime => FieldValue::Int(self.response_time),
            Field::ReqMethod => FieldValue::Str(self.req_method.clone()),
            Field::ReqUrl => FieldValue::Str(self.req_url.clone()),
            Field::ReqProtoVersion => FieldValue::Str(self.req_proto_version.clone()),
            Field::HttpStatus => FieldValue::Int(self.http_status),
            Field::ReqStatusHierStatus => FieldValue::Str(self.req_status_hier_status.clone()),
            Field::TotalSizeReply => FieldValue::Int(self.total_size_reply),
            Field::HierStatusIpAddress => FieldValue::Str(self.hier_status_ip_address.clone()),
            Field::MimeContentType => FieldValue::Str(self.mime_type_content.clone()),
            Field::OrigRcvReqHeader => FieldValue::Str(self.orig_rcv_req_header.clone()),
            Field::Referrer => FieldValue::Str(self.referrer.clone()),
            Field::UserAgent => FieldValue::Str(self.user_agent.clone()),
            Field::Unknown => FieldValue::Str(INVALID_TEXT.to_string()),
        }
    }
}
