//! Payload encoding.
//!
//! The inverse of the decoders, used by simulators and tests to build valid
//! payloads. Values are quantized to the wire precision:
//!
//! - deltas are truncated to their shift and saturate at the field maximum
//! - floats stored as `i16` are truncated toward zero and saturate
//! - obstacle corner coordinates lose their low two bits
//!
//! Decoding the output returns the input exactly when every value is already
//! on the wire grid.

use bytes::{BufMut, Bytes, BytesMut};

use super::envelope::{Segment, ENVELOPE_SIZE};
use crate::error::EncodeError;
use crate::types::{StandardPart, Timestamp};

/// Quantized backward delta `(primary - timestamp) >> shift`, saturated at `max`.
///
/// Timestamps after `primary` wrap around and saturate.
#[inline]
pub(crate) fn backward_delta(primary: u32, timestamp: Timestamp, shift: u32, max: u32) -> u32 {
    (primary.wrapping_sub(timestamp.value()) >> shift).min(max)
}

/// Quantized forward delta `(timestamp - primary) >> shift`, saturated at `max`.
#[inline]
pub(crate) fn forward_delta(primary: u32, timestamp: Timestamp, shift: u32, max: u32) -> u32 {
    (timestamp.value().wrapping_sub(primary) >> shift).min(max)
}

/// Float to `i16`, truncating and saturating.
#[inline]
pub(crate) fn quantize_short(value: f32) -> i16 {
    value as i16
}

/// Encode a full embedded payload.
///
/// Each segment present is written with its envelope. The standard segment
/// comes first. `queue` is copied verbatim after the arbitrary envelope.
///
/// # Example
///
/// ```
/// use bhuman_message::protocol::encode_message;
/// use bhuman_message::Message;
///
/// let bytes = encode_message(None, Some(b"queue")).unwrap();
/// assert_eq!(&bytes[..], b"BHUA\x00queue");
///
/// let message = Message::decode(&bytes);
/// assert!(message.standard.is_none());
/// assert_eq!(message.queue.as_deref(), Some(&b"queue"[..]));
/// ```
pub fn encode_message(
    standard: Option<&StandardPart>,
    queue: Option<&[u8]>,
) -> Result<Bytes, EncodeError> {
    let capacity = standard.map_or(0, |part| ENVELOPE_SIZE + part.streamed_size())
        + queue.map_or(0, |queue| ENVELOPE_SIZE + queue.len());
    let mut buf = BytesMut::with_capacity(capacity);

    if let Some(part) = standard {
        buf.put_slice(&Segment::Standard.envelope());
        part.write(&mut buf)?;
    }
    if let Some(queue) = queue {
        buf.put_slice(&Segment::Arbitrary.envelope());
        buf.put_slice(queue);
    }

    Ok(buf.freeze())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backward_delta() {
        assert_eq!(backward_delta(1_000, Timestamp::at(872), 6, 0xFF), 2);
        // Sub-unit remainder is truncated.
        assert_eq!(backward_delta(1_000, Timestamp::at(900), 6, 0xFF), 1);
        // Saturates at the field width.
        assert_eq!(backward_delta(100_000, Timestamp::at(0), 6, 0xFF), 0xFF);
        // A timestamp in the future wraps and saturates.
        assert_eq!(backward_delta(1_000, Timestamp::at(1_001), 0, 0xFFFF), 0xFFFF);
    }

    #[test]
    fn test_forward_delta() {
        assert_eq!(forward_delta(1_000, Timestamp::at(1_080), 3, 0xFFFF), 10);
        assert_eq!(forward_delta(0, Timestamp::at(u32::MAX), 3, 0xFFFF), 0xFFFF);
    }

    #[test]
    fn test_quantize_short() {
        assert_eq!(quantize_short(12.9), 12);
        assert_eq!(quantize_short(-12.9), -12);
        assert_eq!(quantize_short(1e9), i16::MAX);
        assert_eq!(quantize_short(-1e9), i16::MIN);
        assert_eq!(quantize_short(f32::NAN), 0);
    }

    #[test]
    fn test_encode_empty_message() {
        let bytes = encode_message(None, None).unwrap();
        assert!(bytes.is_empty());
    }
}
