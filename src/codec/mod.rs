//! Codec module - export of decoded telemetry.
//!
//! Monitoring and analysis tools consume decoded records rather than the
//! bit-packed wire format. This module serializes them:
//!
//! - [`MsgPackCodec`] - MessagePack using `rmp-serde` (struct-as-map)
//! - [`JsonCodec`] - JSON using `serde_json`
//!
//! # Design
//!
//! Codecs are marker structs with static methods rather than trait objects,
//! so the format is chosen at compile time.
//!
//! # Example
//!
//! ```
//! use bhuman_message::codec::{JsonCodec, MsgPackCodec};
//! use bhuman_message::types::Role;
//!
//! let encoded = MsgPackCodec::encode(&Role::Keeper).unwrap();
//! let decoded: Role = MsgPackCodec::decode(&encoded).unwrap();
//! assert_eq!(decoded, Role::Keeper);
//!
//! assert_eq!(JsonCodec::encode(&Role::Keeper).unwrap(), "\"keeper\"");
//! ```

mod json;
mod msgpack;

pub use json::JsonCodec;
pub use msgpack::MsgPackCodec;
