//! Primitive little-endian readers.
//!
//! Two types split reading into the two passes the payload needs:
//!
//! - [`PeekView`] is read-only and addressed by offset. The size predictor
//!   only ever sees this type, so it cannot move a cursor.
//! - [`StreamReader`] is the consuming cursor used by the field decoders.
//!
//! # Example
//!
//! ```
//! use bhuman_message::protocol::StreamReader;
//!
//! let bytes = [0x2A, 0x34, 0x12, 0x00, 0x00, 0x80, 0x3F];
//! let mut reader = StreamReader::new(&bytes);
//!
//! assert_eq!(reader.view().u16_le_at(1), Some(0x1234));
//! assert_eq!(reader.read_u8().unwrap(), 0x2A);
//! assert_eq!(reader.read_u16().unwrap(), 0x1234);
//! assert_eq!(reader.read_f32().unwrap(), 1.0);
//! assert_eq!(reader.remaining(), 0);
//! ```

use bytes::Buf;

use crate::error::DecodeError;

/// Read-only view over the unread part of a stream.
#[derive(Debug, Clone, Copy)]
pub struct PeekView<'a> {
    data: &'a [u8],
}

impl<'a> PeekView<'a> {
    /// Create a view over `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Number of bytes visible through the view.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the view is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Peek an unsigned byte at `offset`.
    #[inline]
    pub fn u8_at(&self, offset: usize) -> Option<u8> {
        self.data.get(offset).copied()
    }

    /// Peek a little-endian `u16` at `offset`.
    #[inline]
    pub fn u16_le_at(&self, offset: usize) -> Option<u16> {
        let mut bytes = self.data.get(offset..offset.checked_add(2)?)?;
        Some(bytes.get_u16_le())
    }

    /// Peek a little-endian `u32` at `offset`.
    #[inline]
    pub fn u32_le_at(&self, offset: usize) -> Option<u32> {
        let mut bytes = self.data.get(offset..offset.checked_add(4)?)?;
        Some(bytes.get_u32_le())
    }
}

/// Consuming little-endian cursor over a borrowed byte slice.
#[derive(Debug, Clone)]
pub struct StreamReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> StreamReader<'a> {
    /// Create a reader positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current offset from the start of the underlying slice.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of unread bytes.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Check if any unread bytes are left.
    #[inline]
    pub fn has_remaining(&self) -> bool {
        self.pos < self.data.len()
    }

    /// Read-only view of the unread bytes.
    #[inline]
    pub fn view(&self) -> PeekView<'a> {
        PeekView::new(&self.data[self.pos..])
    }

    /// Move the cursor back by `n` bytes (stops at the start).
    pub fn rewind(&mut self, n: usize) {
        self.pos = self.pos.saturating_sub(n);
    }

    /// Consume the next `n` bytes.
    pub fn take(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        if self.remaining() < n {
            return Err(DecodeError::UnexpectedEof {
                needed: n,
                available: self.remaining(),
            });
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// Consume everything that is left.
    pub fn take_rest(&mut self) -> &'a [u8] {
        let bytes = &self.data[self.pos..];
        self.pos = self.data.len();
        bytes
    }

    /// Split off the next `n` bytes as an independent reader.
    ///
    /// `self` advances past the split bytes whether or not the returned
    /// reader consumes them.
    pub fn split(&mut self, n: usize) -> Result<StreamReader<'a>, DecodeError> {
        self.take(n).map(StreamReader::new)
    }

    #[inline]
    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        let mut bytes = self.take(1)?;
        Ok(bytes.get_u8())
    }

    #[inline]
    pub fn read_i8(&mut self) -> Result<i8, DecodeError> {
        let mut bytes = self.take(1)?;
        Ok(bytes.get_i8())
    }

    #[inline]
    pub fn read_u16(&mut self) -> Result<u16, DecodeError> {
        let mut bytes = self.take(2)?;
        Ok(bytes.get_u16_le())
    }

    #[inline]
    pub fn read_i16(&mut self) -> Result<i16, DecodeError> {
        let mut bytes = self.take(2)?;
        Ok(bytes.get_i16_le())
    }

    #[inline]
    pub fn read_u32(&mut self) -> Result<u32, DecodeError> {
        let mut bytes = self.take(4)?;
        Ok(bytes.get_u32_le())
    }

    #[inline]
    pub fn read_i32(&mut self) -> Result<i32, DecodeError> {
        let mut bytes = self.take(4)?;
        Ok(bytes.get_i32_le())
    }

    #[inline]
    pub fn read_f32(&mut self) -> Result<f32, DecodeError> {
        let mut bytes = self.take(4)?;
        Ok(bytes.get_f32_le())
    }

    /// Read `N` consecutive `f32` values.
    pub fn read_f32_array<const N: usize>(&mut self) -> Result<[f32; N], DecodeError> {
        let mut values = [0.0f32; N];
        for value in values.iter_mut() {
            *value = self.read_f32()?;
        }
        Ok(values)
    }

    /// Read a fixed-length ASCII string. Each byte maps to one `char`.
    pub fn read_ascii(&mut self, len: usize) -> Result<String, DecodeError> {
        let bytes = self.take(len)?;
        Ok(bytes.iter().map(|&b| b as char).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_little_endian_integers() {
        let bytes = [
            0xFF, // u8
            0xFF, // i8
            0x34, 0x12, // u16
            0xFE, 0xFF, // i16
            0x78, 0x56, 0x34, 0x12, // u32
            0xFF, 0xFF, 0xFF, 0xFF, // i32
        ];
        let mut reader = StreamReader::new(&bytes);

        assert_eq!(reader.read_u8().unwrap(), 255);
        assert_eq!(reader.read_i8().unwrap(), -1);
        assert_eq!(reader.read_u16().unwrap(), 0x1234);
        assert_eq!(reader.read_i16().unwrap(), -2);
        assert_eq!(reader.read_u32().unwrap(), 0x1234_5678);
        assert_eq!(reader.read_i32().unwrap(), -1);
        assert!(!reader.has_remaining());
    }

    #[test]
    fn test_read_f32_array() {
        let mut bytes = Vec::new();
        for v in [1.5f32, -2.0, 0.25] {
            bytes.extend_from_slice(&v.to_le_bytes());
        }
        let mut reader = StreamReader::new(&bytes);
        assert_eq!(reader.read_f32_array::<3>().unwrap(), [1.5, -2.0, 0.25]);
    }

    #[test]
    fn test_read_ascii() {
        let mut reader = StreamReader::new(b"BHUM\x06");
        assert_eq!(reader.read_ascii(4).unwrap(), "BHUM");
        assert_eq!(reader.read_u8().unwrap(), 6);
    }

    #[test]
    fn test_short_read_reports_eof_without_advancing() {
        let mut reader = StreamReader::new(&[1, 2, 3]);
        reader.read_u8().unwrap();

        let err = reader.read_u32().unwrap_err();
        assert_eq!(
            err,
            DecodeError::UnexpectedEof {
                needed: 4,
                available: 2
            }
        );
        assert_eq!(reader.position(), 1);
    }

    #[test]
    fn test_rewind_saturates_at_start() {
        let mut reader = StreamReader::new(&[0; 8]);
        reader.take(3).unwrap();
        reader.rewind(2);
        assert_eq!(reader.position(), 1);
        reader.rewind(5);
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_split_advances_parent() {
        let bytes = [1, 2, 3, 4, 5];
        let mut reader = StreamReader::new(&bytes);
        reader.read_u8().unwrap();

        let mut sub = reader.split(3).unwrap();
        assert_eq!(reader.position(), 4);
        assert_eq!(sub.remaining(), 3);
        assert_eq!(sub.read_u8().unwrap(), 2);
        assert_eq!(reader.read_u8().unwrap(), 5);
    }

    #[test]
    fn test_peek_view_does_not_consume() {
        let bytes = [0xAA, 0x01, 0x02, 0x03, 0x04];
        let mut reader = StreamReader::new(&bytes);
        reader.read_u8().unwrap();

        let view = reader.view();
        assert_eq!(view.len(), 4);
        assert_eq!(view.u8_at(0), Some(0x01));
        assert_eq!(view.u16_le_at(2), Some(0x0403));
        assert_eq!(view.u32_le_at(0), Some(0x0403_0201));
        assert_eq!(view.u16_le_at(3), None);
        assert_eq!(view.u32_le_at(usize::MAX), None);
        assert_eq!(reader.position(), 1);
    }

    #[test]
    fn test_take_rest() {
        let mut reader = StreamReader::new(b"abcdef");
        reader.take(2).unwrap();
        assert_eq!(reader.take_rest(), b"cdef");
        assert_eq!(reader.remaining(), 0);
        assert!(reader.take_rest().is_empty());
    }
}
