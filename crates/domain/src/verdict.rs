//! Response classification.
//!
//! Only one header field is ever inspected: the 4-bit RCODE in the low
//! nibble of byte 3 of the DNS header.

use bytes::Bytes;
use std::fmt;

const HTTP_OK: u16 = 200;
const MIN_HEADER_PREFIX: usize = 4;
const RCODE_OFFSET: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResponseCode(u8);

impl ResponseCode {
    pub const NO_ERROR: Self = Self(0);
    pub const SERV_FAIL: Self = Self(2);
    pub const NX_DOMAIN: Self = Self(3);

    pub fn from_low_nibble(byte: u8) -> Self {
        Self(byte & 0x0f)
    }

    /// RCODE of a wire-format message, `None` when the header is truncated.
    pub fn of_message(message: &[u8]) -> Option<Self> {
        if message.len() < MIN_HEADER_PREFIX {
            return None;
        }
        Some(Self::from_low_nibble(message[RCODE_OFFSET]))
    }

    pub fn is_authoritative(&self) -> bool {
        *self == Self::NO_ERROR || *self == Self::NX_DOMAIN
    }

    pub fn as_str(&self) -> &'static str {
        match self.0 {
            0 => "NOERROR",
            1 => "FORMERR",
            2 => "SERVFAIL",
            3 => "NXDOMAIN",
            4 => "NOTIMP",
            5 => "REFUSED",
            _ => "OTHER",
        }
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.as_str(), self.0)
    }
}

/// What the transport layer observed for a single attempt.
#[derive(Debug, Clone)]
pub enum TransportOutcome {
    /// Connect failure, TLS failure, timeout or body read error.
    Failed,
    Received { status: u16, body: Bytes },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// NOERROR or NXDOMAIN: final, cacheable.
    Authoritative(Bytes),
    /// Well-formed HTTP success carrying a non-final RCODE, or a body too
    /// short to hold a DNS header (reported as SERVFAIL).
    SoftFailure { rcode: ResponseCode, body: Bytes },
    /// Nothing usable came back.
    HardFailure,
}

impl Verdict {
    pub fn is_authoritative(&self) -> bool {
        matches!(self, Self::Authoritative(_))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Authoritative(_) => "authoritative",
            Self::SoftFailure { .. } => "soft_failure",
            Self::HardFailure => "hard_failure",
        }
    }
}

/// Maps a transport outcome to a [`Verdict`]. Pure; no I/O.
pub fn classify(outcome: TransportOutcome) -> Verdict {
    let body = match outcome {
        TransportOutcome::Received { status, body } if status == HTTP_OK => body,
        _ => return Verdict::HardFailure,
    };

    match ResponseCode::of_message(&body) {
        Some(rcode) if rcode.is_authoritative() => Verdict::Authoritative(body),
        Some(rcode) => Verdict::SoftFailure { rcode, body },
        None => Verdict::SoftFailure {
            rcode: ResponseCode::SERV_FAIL,
            body,
        },
    }
}
