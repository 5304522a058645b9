//! IPv4 address codec: dotted-quad text to packed `u32` and back.
//!
//! The packed form is big-endian (`a.b.c.d` becomes
//! `a<<24 | b<<16 | c<<8 | d`), which makes numeric comparison agree with
//! the natural ordering of addresses. All relational operations on
//! [`Ipv4Addr`] go through the packed integer, never the string.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Parse a dotted-quad address into its packed form.
///
/// Returns `None` unless the input has exactly four decimal octets, each in
/// `0..=255`. Unlike [`iptol`], the failure case is distinguishable from a
/// legitimate `0.0.0.0`.
pub fn parse_ipv4(addr: &str) -> Option<u32> {
    let mut octets = addr.split('.');
    let mut packed: u32 = 0;
    for _ in 0..4 {
        let part = octets.next()?;
        // Reject empty parts and anything non-decimal; `u8::from_str`
        // also rejects values above 255.
        if part.is_empty() || part.len() > 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let octet: u8 = part.parse().ok()?;
        packed = (packed << 8) | u32::from(octet);
    }
    if octets.next().is_some() {
        return None;
    }
    Some(packed)
}

/// Whether `addr` is a well-formed dotted-quad IPv4 address.
pub fn is_valid(addr: &str) -> bool {
    parse_ipv4(addr).is_some()
}

/// Convert a dotted-quad address to its packed decimal equivalent.
///
/// Returns `0` for invalid input, matching the long-standing convenience
/// contract. Use [`parse_ipv4`] when the caller needs to tell failure apart
/// from `0.0.0.0`.
pub fn iptol(addr: &str) -> u32 {
    parse_ipv4(addr).unwrap_or(0)
}

/// Convert a packed address back to dotted-quad text, without leading zeros.
pub fn ltoip(addr: u32) -> String {
    format!(
        "{}.{}.{}.{}",
        addr >> 24,
        (addr >> 16) & 0xff,
        (addr >> 8) & 0xff,
        addr & 0xff
    )
}

/// An IPv4 address held in packed form.
///
/// Ordering and equality compare the packed integer, so sorting a list of
/// addresses yields numeric (not lexical) order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Ipv4Addr(u32);

impl Ipv4Addr {
    pub fn new(packed: u32) -> Self {
        Self(packed)
    }

    /// The packed representation.
    pub fn packed(self) -> u32 {
        self.0
    }
}

impl FromStr for Ipv4Addr {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_ipv4(s)
            .map(Ipv4Addr)
            .ok_or(ParseError::InvalidTimestampOrIp)
    }
}

impl fmt::Display for Ipv4Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&ltoip(self.0))
    }
}
