//! # bhuman-message
//!
//! Decoder for the bit-packed B-Human team-communication payload.
//!
//! Robots broadcast pose confidence, ball state, role assignment, obstacles
//! and clock-synchronization replies inside the data field of an SPL
//! standard message. This crate turns that payload back into typed records
//! for monitoring and analysis tools.
//!
//! ## Layout
//!
//! - **Standard segment** (`BHUM`, version 6): a fixed 87-byte prefix of
//!   delta-encoded timestamps, quantized coordinates and shared bit
//!   containers. Variable obstacle and NTP reply lists follow it.
//! - **Arbitrary segment** (`BHUA`, version 0): a free-form message queue.
//!   It is delimited here and handed to a [`protocol::QueueDecoder`].
//!
//! ## Example
//!
//! ```
//! use bhuman_message::protocol::encode_message;
//! use bhuman_message::Message;
//!
//! let payload = encode_message(None, Some(b"\x00\x01")).unwrap();
//! let message = Message::decode(&payload);
//!
//! assert!(message.standard.is_none());
//! assert_eq!(message.queue.as_deref(), Some(&b"\x00\x01"[..]));
//! // The missing standard segment is reported, not fatal.
//! assert_eq!(message.issues.len(), 1);
//! ```

pub mod codec;
pub mod error;
pub mod protocol;
pub mod types;

#[cfg(test)]
mod testing;

pub use error::{DecodeError, EncodeError, TelemetryError};
pub use protocol::{MessageDecoder, QueueDecoder};
pub use types::{
    Message, NtpRequest, Obstacle, ObstacleType, Role, StandardPart, Timestamp, Vector2f,
};
