//! Protocol module - envelopes, size prediction and field codecs.
//!
//! This module implements the embedded binary payload:
//! - 5-byte segment envelopes (tag + version)
//! - Size prediction for the standard segment (peek, never consume)
//! - Field decoder for the fixed prefix with its bit-packed containers
//! - Obstacle and NTP reply list codecs
//! - Segment delimiting and hand-off to a queue decoder

mod containers;
mod encode;
mod envelope;
mod message;
mod ntp;
mod obstacle;
mod reader;
mod size;
mod standard;

pub use containers::{
    corner_coordinate, teammate_reply_bit, BallContainer, CaptainContainer, NtpTimeStruct,
    ObstacleCorners, RoleContainer, StatusContainer,
};
pub use encode::encode_message;
pub use envelope::{
    check_envelope, Segment, ARBITRARY_MESSAGE_STRUCT_HEADER, ARBITRARY_MESSAGE_STRUCT_VERSION,
    ENVELOPE_SIZE, STANDARD_MESSAGE_STRUCT_HEADER, STANDARD_MESSAGE_STRUCT_VERSION,
};
pub use message::{
    decode_standard_segment, MessageDecoder, OpaqueQueue, QueueDecoder,
    SPL_STANDARD_MESSAGE_DATA_SIZE,
};
pub use ntp::read_ntp_messages;
pub use obstacle::{read_obstacle, read_obstacles};
pub use reader::{PeekView, StreamReader};
pub use size::{streamed_size, FIXED_SIZE, NTP_MESSAGE_SIZE, OBSTACLE_SIZE, STATUS_CONTAINER_OFFSET};
