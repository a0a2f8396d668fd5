//! Message decoding and segment delimiting.
//!
//! The embedded payload holds up to two segments back to back:
//! ```text
//! ┌──────┬───┬──────────────┬───────────┬─────────┬──────┬───┬──────────────┐
//! │ BHUM │ 6 │ fixed prefix │ obstacles │ NTP     │ BHUA │ 0 │ queue ...    │
//! │ 4 B  │1 B│ 87 B         │ n × 25 B  │ m × 5 B │ 4 B  │1 B│ opaque       │
//! └──────┴───┴──────────────┴───────────┴─────────┴──────┴───┴──────────────┘
//! ```
//!
//! The standard segment has no length field, so its length is predicted
//! from the prefix before anything is consumed. Its body is then decoded
//! from a sub-reader of exactly that length. The arbitrary segment starts
//! right after, whether or not the body decoded.

use bytes::Bytes;

use super::envelope::{check_envelope, Segment};
use super::reader::StreamReader;
use super::size::streamed_size;
use crate::error::DecodeError;
use crate::types::{Message, StandardPart};

/// Capacity of the data field of an SPL standard message.
///
/// Pass it to [`MessageDecoder::with_max_payload`] to reject payloads that
/// could not have come from a real broadcast.
pub const SPL_STANDARD_MESSAGE_DATA_SIZE: usize = 474;

/// Decoder for the arbitrary segment's message queue.
///
/// Called with the stream positioned just after the segment's envelope.
/// The implementation consumes its own payload. `O` is the outer message
/// the payload was received in.
pub trait QueueDecoder<O: ?Sized = ()> {
    type Output;

    fn decode_queue(
        &self,
        origin: &O,
        stream: &mut StreamReader<'_>,
    ) -> Result<Self::Output, DecodeError>;
}

/// Queue decoder that keeps the remaining bytes as an opaque range.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpaqueQueue;

impl<O: ?Sized> QueueDecoder<O> for OpaqueQueue {
    type Output = Bytes;

    fn decode_queue(
        &self,
        _origin: &O,
        stream: &mut StreamReader<'_>,
    ) -> Result<Bytes, DecodeError> {
        Ok(Bytes::copy_from_slice(stream.take_rest()))
    }
}

/// Configurable decoder for embedded payloads.
///
/// # Example
///
/// ```
/// use bhuman_message::protocol::{MessageDecoder, OpaqueQueue};
///
/// let decoder = MessageDecoder::with_max_payload(1024).queue_decoder(OpaqueQueue);
/// let message = decoder.decode(&(), b"BHUA\x00hello");
///
/// assert!(message.standard.is_none());
/// assert_eq!(message.queue.as_deref(), Some(&b"hello"[..]));
/// ```
#[derive(Debug, Clone)]
pub struct MessageDecoder<D = OpaqueQueue> {
    max_payload_size: Option<usize>,
    queue_decoder: D,
}

impl MessageDecoder {
    /// Create a decoder with default settings.
    ///
    /// No payload size limit; queue kept opaque.
    pub fn new() -> Self {
        Self {
            max_payload_size: None,
            queue_decoder: OpaqueQueue,
        }
    }

    /// Create a decoder that rejects payloads above `max_payload_size` bytes.
    ///
    /// A rejected payload yields neither segment.
    pub fn with_max_payload(max_payload_size: usize) -> Self {
        Self {
            max_payload_size: Some(max_payload_size),
            queue_decoder: OpaqueQueue,
        }
    }
}

impl Default for MessageDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> MessageDecoder<D> {
    /// Replace the queue decoder.
    pub fn queue_decoder<E>(self, queue_decoder: E) -> MessageDecoder<E> {
        MessageDecoder {
            max_payload_size: self.max_payload_size,
            queue_decoder,
        }
    }

    /// Maximum accepted payload size, if limited.
    pub fn max_payload_size(&self) -> Option<usize> {
        self.max_payload_size
    }

    /// Decode both segments of `data`.
    ///
    /// Never fails as a whole. A segment that cannot be decoded is `None` and
    /// the reason is logged and appended to [`Message::issues`].
    pub fn decode<O: ?Sized>(&self, origin: &O, data: &[u8]) -> Message<D::Output>
    where
        D: QueueDecoder<O>,
    {
        let mut message = Message::default();

        if let Some(max) = self.max_payload_size.filter(|&max| data.len() > max) {
            report(
                &mut message.issues,
                DecodeError::PayloadTooLarge {
                    size: data.len(),
                    max,
                },
            );
            return message;
        }

        let mut reader = StreamReader::new(data);

        if reader.has_remaining() {
            match decode_standard_segment(&mut reader) {
                Ok(part) => message.standard = Some(part),
                Err(err) => report(&mut message.issues, err),
            }
        }

        if reader.has_remaining() {
            let queue = check_envelope(&mut reader, Segment::Arbitrary)
                .and_then(|()| self.queue_decoder.decode_queue(origin, &mut reader));
            match queue {
                Ok(queue) => {
                    tracing::debug!(
                        "Decoded {} ({} bytes left)",
                        Segment::Arbitrary,
                        reader.remaining()
                    );
                    message.queue = Some(queue);
                }
                Err(err) => report(&mut message.issues, err),
            }
        }

        message
    }
}

impl Message {
    /// Decode `data` with the default [`MessageDecoder`].
    pub fn decode(data: &[u8]) -> Self {
        MessageDecoder::new().decode(&(), data)
    }
}

/// Validate, size-check and decode the standard segment.
///
/// After the size check passes, `reader` always ends up past the predicted
/// length, even if the body fails to decode. The arbitrary segment can then
/// still be located.
pub fn decode_standard_segment(
    reader: &mut StreamReader<'_>,
) -> Result<StandardPart, DecodeError> {
    check_envelope(reader, Segment::Standard)?;

    let predicted = streamed_size(&reader.view());
    tracing::trace!("Predicted {} size: {} bytes", Segment::Standard, predicted);
    if predicted > reader.remaining() {
        return Err(DecodeError::SizeMismatch {
            segment: Segment::Standard,
            remaining: reader.remaining(),
            expected: predicted,
        });
    }

    let mut body = reader.split(predicted)?;
    let part = StandardPart::read(&mut body)?;
    // List lengths come from the same status container the prediction read.
    debug_assert!(!body.has_remaining(), "standard segment length drift");

    tracing::debug!(
        "Decoded {} at {} ({} obstacles, {} NTP replies)",
        Segment::Standard,
        part.timestamp,
        part.obstacles.len(),
        part.ntp_messages.len()
    );
    Ok(part)
}

fn report(issues: &mut Vec<DecodeError>, err: DecodeError) {
    tracing::error!("{}", err);
    issues.push(err);
}
