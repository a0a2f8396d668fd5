//! NTP reply list codec.
//!
//! One 5-byte record follows the obstacles for every bit set in the reply
//! mask of the [`StatusContainer`]. Records appear in teammate order (mask
//! bit 5 = teammate 1 first). The sender number is implied by the bit and
//! is not transmitted.

use bytes::{BufMut, BytesMut};

use super::containers::{teammate_reply_bit, NtpTimeStruct, StatusContainer};
use super::reader::StreamReader;
use crate::error::{DecodeError, EncodeError};
use crate::types::{NtpRequest, Timestamp, MAX_NUM_OF_PLAYERS};

/// Read one record for every teammate flagged in `status`.
pub fn read_ntp_messages(
    reader: &mut StreamReader<'_>,
    status: StatusContainer,
    timestamp: u32,
) -> Result<Vec<NtpRequest>, DecodeError> {
    let mut messages = Vec::with_capacity(status.ntp_reply_count());
    for sender in 1..=MAX_NUM_OF_PLAYERS as u8 {
        if !status.has_ntp_reply_for(sender) {
            continue;
        }
        let time = NtpTimeStruct {
            time32: reader.read_u32()?,
            time8: reader.read_u8()?,
        };
        messages.push(NtpRequest {
            sender,
            request_origination: time.request_origination(),
            request_receipt: Timestamp::before(timestamp, time.receipt_delta()),
        });
    }
    Ok(messages)
}

/// Reply mask for a set of records. Senders must be distinct and in `1..=6`.
pub(crate) fn ntp_reply_mask(messages: &[NtpRequest]) -> Result<u8, EncodeError> {
    let mut mask = 0u8;
    for message in messages {
        let bit = teammate_reply_bit(message.sender)
            .ok_or(EncodeError::InvalidNtpSender(message.sender))?;
        if mask & bit != 0 {
            return Err(EncodeError::DuplicateNtpSender(message.sender));
        }
        mask |= bit;
    }
    Ok(mask)
}

/// Write the records in teammate order, whatever the order of `messages`.
pub(crate) fn write_ntp_messages(messages: &[NtpRequest], timestamp: u32, buf: &mut BytesMut) {
    let mut ordered: Vec<&NtpRequest> = messages.iter().collect();
    ordered.sort_by_key(|message| message.sender);

    for message in ordered {
        let delta = timestamp
            .wrapping_sub(message.request_receipt.value())
            .min(NtpTimeStruct::MAX_RECEIPT_DELTA);
        let time = NtpTimeStruct::pack(message.request_origination, delta);
        buf.put_u32_le(time.time32);
        buf.put_u8(time.time8);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(time32: u32, time8: u8) -> Vec<u8> {
        let mut bytes = time32.to_le_bytes().to_vec();
        bytes.push(time8);
        bytes
    }

    #[test]
    fn test_senders_follow_bit_order() {
        let status = StatusContainer::pack(0, false, false, false, false, 0b100101);
        let mut bytes = record(0x0000_0010, 1);
        bytes.extend(record(0x0000_0020, 2));
        bytes.extend(record(0x0000_0030, 3));

        let mut reader = StreamReader::new(&bytes);
        let messages = read_ntp_messages(&mut reader, status, 1_000).unwrap();

        let senders: Vec<u8> = messages.iter().map(|m| m.sender).collect();
        assert_eq!(senders, vec![1, 4, 6]);
        assert_eq!(messages[1].request_origination, 0x20);
        assert_eq!(messages[1].request_receipt, Timestamp::at(998));
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_empty_mask_reads_nothing() {
        let status = StatusContainer::pack(5, true, true, true, true, 0);
        let bytes = [0xAAu8; 10];
        let mut reader = StreamReader::new(&bytes);

        let messages = read_ntp_messages(&mut reader, status, 0).unwrap();
        assert!(messages.is_empty());
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_receipt_uses_high_nibble_and_byte() {
        let status = StatusContainer::pack(0, false, false, false, false, 0b000001);
        let bytes = record(0x5FFF_FFFF, 0x10);
        let mut reader = StreamReader::new(&bytes);

        let messages = read_ntp_messages(&mut reader, status, 0x10_0000).unwrap();
        assert_eq!(messages[0].sender, 6);
        assert_eq!(messages[0].request_origination, 0x0FFF_FFFF);
        assert_eq!(
            messages[0].request_receipt,
            Timestamp::at(0x10_0000 - 0x510)
        );
    }

    #[test]
    fn test_reply_mask() {
        let request = |sender| NtpRequest {
            sender,
            request_origination: 0,
            request_receipt: Timestamp::at(0),
        };
        assert_eq!(ntp_reply_mask(&[request(1), request(6)]), Ok(0b100001));
        assert_eq!(
            ntp_reply_mask(&[request(0)]),
            Err(EncodeError::InvalidNtpSender(0))
        );
        assert_eq!(
            ntp_reply_mask(&[request(2), request(2)]),
            Err(EncodeError::DuplicateNtpSender(2))
        );
    }

    #[test]
    fn test_write_sorts_by_sender() {
        let messages = [
            NtpRequest {
                sender: 5,
                request_origination: 7,
                request_receipt: Timestamp::at(9_900),
            },
            NtpRequest {
                sender: 2,
                request_origination: 3,
                request_receipt: Timestamp::at(10_000 - 0xABC),
            },
        ];
        let mut buf = BytesMut::new();
        write_ntp_messages(&messages, 10_000, &mut buf);

        let status = StatusContainer::pack(0, false, false, false, false, 0b010010);
        let mut reader = StreamReader::new(&buf);
        let decoded = read_ntp_messages(&mut reader, status, 10_000).unwrap();
        assert_eq!(decoded, vec![messages[1], messages[0]]);
    }
}
