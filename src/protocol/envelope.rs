//! Segment envelopes.
//!
//! Each segment starts with a 5-byte envelope:
//! ```text
//! ┌──────────────┬─────────┐
//! │ Tag          │ Version │
//! │ 4 bytes ASCII│ uint8   │
//! └──────────────┴─────────┘
//! ```

use std::fmt;

use super::reader::StreamReader;
use crate::error::DecodeError;

/// Envelope size in bytes (tag + version).
pub const ENVELOPE_SIZE: usize = 5;

/// Tag of the standard segment.
pub const STANDARD_MESSAGE_STRUCT_HEADER: &str = "BHUM";
/// Only supported version of the standard segment.
pub const STANDARD_MESSAGE_STRUCT_VERSION: u8 = 6;

/// Tag of the arbitrary (message queue) segment.
pub const ARBITRARY_MESSAGE_STRUCT_HEADER: &str = "BHUA";
/// Only supported version of the arbitrary segment.
pub const ARBITRARY_MESSAGE_STRUCT_VERSION: u8 = 0;

/// The two segments of the embedded payload, in stream order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    Standard,
    Arbitrary,
}

impl Segment {
    /// Expected 4-byte tag.
    pub const fn tag(self) -> &'static str {
        match self {
            Segment::Standard => STANDARD_MESSAGE_STRUCT_HEADER,
            Segment::Arbitrary => ARBITRARY_MESSAGE_STRUCT_HEADER,
        }
    }

    /// Expected version byte.
    pub const fn version(self) -> u8 {
        match self {
            Segment::Standard => STANDARD_MESSAGE_STRUCT_VERSION,
            Segment::Arbitrary => ARBITRARY_MESSAGE_STRUCT_VERSION,
        }
    }

    /// Encode this segment's envelope.
    pub fn envelope(self) -> [u8; ENVELOPE_SIZE] {
        let mut buf = [0u8; ENVELOPE_SIZE];
        buf[..4].copy_from_slice(self.tag().as_bytes());
        buf[4] = self.version();
        buf
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Standard => f.write_str("B-Human standard message"),
            Segment::Arbitrary => f.write_str("B-Human arbitrary message"),
        }
    }
}

/// Validate the envelope of `segment` at the reader's position.
///
/// Cursor on return:
/// - `Ok`: just past the version byte.
/// - `HeaderMismatch`: rewound to where the check began.
/// - `VersionMismatch`: just past the version byte. The content format is
///   unknown, so there is no safe length to skip.
/// - `UnexpectedEof`: unchanged.
pub fn check_envelope(reader: &mut StreamReader<'_>, segment: Segment) -> Result<(), DecodeError> {
    if reader.remaining() < ENVELOPE_SIZE {
        return Err(DecodeError::UnexpectedEof {
            needed: ENVELOPE_SIZE,
            available: reader.remaining(),
        });
    }

    let header = reader.read_ascii(4)?;
    let version = reader.read_u8()?;

    if header != segment.tag() {
        reader.rewind(ENVELOPE_SIZE);
        return Err(DecodeError::HeaderMismatch {
            segment,
            found: header,
        });
    }

    if version != segment.version() {
        return Err(DecodeError::VersionMismatch {
            segment,
            found: version,
            expected: segment.version(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_envelope() {
        let mut reader = StreamReader::new(b"BHUM\x06rest");
        assert!(check_envelope(&mut reader, Segment::Standard).is_ok());
        assert_eq!(reader.position(), ENVELOPE_SIZE);
    }

    #[test]
    fn test_header_mismatch_rewinds() {
        let mut reader = StreamReader::new(b"XXXX\x06rest");
        let err = check_envelope(&mut reader, Segment::Standard).unwrap_err();

        assert_eq!(
            err,
            DecodeError::HeaderMismatch {
                segment: Segment::Standard,
                found: "XXXX".to_string()
            }
        );
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_version_mismatch_does_not_rewind() {
        let mut reader = StreamReader::new(b"BHUM\x05rest");
        let err = check_envelope(&mut reader, Segment::Standard).unwrap_err();

        assert_eq!(
            err,
            DecodeError::VersionMismatch {
                segment: Segment::Standard,
                found: 5,
                expected: 6
            }
        );
        assert_eq!(reader.position(), ENVELOPE_SIZE);
    }

    #[test]
    fn test_arbitrary_segment_constants() {
        let mut reader = StreamReader::new(b"BHUA\x00");
        assert!(check_envelope(&mut reader, Segment::Arbitrary).is_ok());

        let mut reader = StreamReader::new(b"BHUA\x00");
        assert!(matches!(
            check_envelope(&mut reader, Segment::Standard),
            Err(DecodeError::HeaderMismatch { .. })
        ));
    }

    #[test]
    fn test_short_envelope_is_eof() {
        let mut reader = StreamReader::new(b"BHU");
        let err = check_envelope(&mut reader, Segment::Standard).unwrap_err();
        assert_eq!(
            err,
            DecodeError::UnexpectedEof {
                needed: 5,
                available: 3
            }
        );
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_envelope_bytes() {
        assert_eq!(&Segment::Standard.envelope(), b"BHUM\x06");
        assert_eq!(&Segment::Arbitrary.envelope(), b"BHUA\x00");
    }

    #[test]
    fn test_segment_display() {
        let err = DecodeError::VersionMismatch {
            segment: Segment::Arbitrary,
            found: 1,
            expected: 0,
        };
        assert_eq!(
            err.to_string(),
            "Wrong B-Human arbitrary message struct version: was 1, expected 0"
        );
    }
}
