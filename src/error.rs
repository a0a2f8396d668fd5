//! Error types for bhuman-message.

use thiserror::Error;

use crate::protocol::Segment;

/// Errors reported while decoding a payload.
///
/// Every variant marks only the affected segment as absent; the other
/// segment is still attempted. Values are kept in [`crate::Message::issues`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Fewer bytes remain than a read needs.
    #[error("unexpected end of data: needed {needed} bytes, had {available}")]
    UnexpectedEof { needed: usize, available: usize },

    /// Wrong 4-byte tag. The cursor is rewound to where the check began.
    #[error("Wrong {segment} struct header: found {found:?}")]
    HeaderMismatch { segment: Segment, found: String },

    /// Right tag, unsupported version. The cursor is left after the version byte.
    #[error("Wrong {segment} struct version: was {found}, expected {expected}")]
    VersionMismatch {
        segment: Segment,
        found: u8,
        expected: u8,
    },

    /// The predicted segment length exceeds the bytes remaining.
    #[error("Wrong size of {segment} struct: was {remaining}, expected {expected}")]
    SizeMismatch {
        segment: Segment,
        remaining: usize,
        expected: usize,
    },

    /// Role code outside `0..=8`.
    #[error("invalid role code: {0}")]
    InvalidRole(u8),

    /// Obstacle type code outside `0..=7`.
    #[error("invalid obstacle type code: {0}")]
    InvalidObstacleType(u8),

    /// Payload is larger than the limit set with
    /// [`crate::protocol::MessageDecoder::with_max_payload`].
    #[error("Payload size {size} exceeds maximum {max}")]
    PayloadTooLarge { size: usize, max: usize },

    /// Failure reported by an external queue decoder.
    #[error("queue decoder error: {0}")]
    Queue(String),
}

/// Errors raised when writing a payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The obstacle count field is 6 bits wide.
    #[error("too many obstacles: {0} (at most 63)")]
    TooManyObstacles(usize),

    /// NTP senders are teammate numbers 1 to 6.
    #[error("invalid NTP sender: {0}")]
    InvalidNtpSender(u8),

    /// Each teammate has a single reply bit.
    #[error("duplicate NTP sender: {0}")]
    DuplicateNtpSender(u8),

    /// An index does not fit its bit field (the sentinel value is reserved).
    #[error("{field} index {value} out of range")]
    IndexOutOfRange { field: &'static str, value: u8 },
}

/// Main error type for all bhuman-message operations.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Payload decoding failed.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Payload encoding failed.
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),

    /// JSON export error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// MsgPack serialization error.
    #[error("MsgPack encode error: {0}")]
    MsgPackEncode(#[from] rmp_serde::encode::Error),

    /// MsgPack deserialization error.
    #[error("MsgPack decode error: {0}")]
    MsgPackDecode(#[from] rmp_serde::decode::Error),
}

/// Result type alias using TelemetryError.
pub type Result<T> = std::result::Result<T, TelemetryError>;
