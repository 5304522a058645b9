//! Squid Log Parser - A Rust library and CLI for parsing Squid proxy access logs.
//!
//! This crate provides:
//! - A regex-based parser for the squid, common, combined, referrer and
//!   useragent log formats
//! - An accumulating record store ordered by timestamp
//! - URL decomposition and IPv4/date codecs
//! - Statistics tracking with HDR histograms
//!
//! # Example
//!
//! ```rust
//! use squid_log_parser::{LogParser, LogFormat, Field};
//!
//! let mut parser = LogParser::new(LogFormat::Squid);
//! parser.append(
//!     "1157689312.587 320 65.65.65.65 TCP_MISS/200 16938 GET \
//!      http://example.com/ - DIRECT/10.0.0.1 text/html",
//! );
//!
//! assert_eq!(parser.error_num(), 0);
//! assert_eq!(parser.get_part_str(Field::ReqMethod), "GET");
//! assert_eq!(parser.size(), 1);
//! ```

pub mod config;
pub mod datetime;
pub mod engine;
pub mod error;
pub mod ipv4;
pub mod pattern;
pub mod record;
pub mod stats;
pub mod store;
pub mod url;

pub use config::Config;
pub use engine::{LogParser, collapse_whitespace, str_right};
pub use error::{ParseError, ParseResult};
pub use ipv4::{Ipv4Addr, iptol, ltoip, parse_ipv4};
pub use record::{Field, FieldValue, INVALID_TEXT, LogFormat, LogRecord};
pub use stats::{ParseStats, StatsSummary};
pub use store::{DataKey, RecordStore};
pub use url::{UrlParts, url_decode};
