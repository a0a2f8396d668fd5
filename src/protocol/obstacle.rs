//! Obstacle list codec.
//!
//! Record layout (25 bytes, little-endian):
//! ```text
//! ┌────────────┬──────────┬──────────────────────────────┬──────────┐
//! │ covariance │ center   │ left x/y, right x/y          │ lastSeen │
//! │ 3 × f32    │ 2 × i16  │ 4 × i16 (2 type bits + 14)   │ u8 << 6  │
//! └────────────┴──────────┴──────────────────────────────┴──────────┘
//! ```

use bytes::{BufMut, BytesMut};

use super::containers::ObstacleCorners;
use super::encode::{backward_delta, quantize_short};
use super::reader::StreamReader;
use super::standard::{read_short_vector, write_short_vector};
use crate::error::DecodeError;
use crate::types::{Obstacle, ObstacleType, Timestamp};

const LAST_SEEN_SHIFT: u32 = 6;

/// Read `count` obstacle records in stream order.
pub fn read_obstacles(
    reader: &mut StreamReader<'_>,
    count: usize,
    timestamp: u32,
) -> Result<Vec<Obstacle>, DecodeError> {
    let mut obstacles = Vec::with_capacity(count);
    for _ in 0..count {
        obstacles.push(read_obstacle(reader, timestamp)?);
    }
    Ok(obstacles)
}

/// Read one obstacle record.
pub fn read_obstacle(
    reader: &mut StreamReader<'_>,
    timestamp: u32,
) -> Result<Obstacle, DecodeError> {
    let covariance = reader.read_f32_array::<3>()?;
    let center = read_short_vector(reader)?;
    let corners = ObstacleCorners {
        left_x: reader.read_i16()?,
        left_y: reader.read_i16()?,
        right_x: reader.read_i16()?,
        right_y: reader.read_i16()?,
    };
    let last_seen = Timestamp::before(timestamp, (reader.read_u8()? as u32) << LAST_SEEN_SHIFT);

    Ok(Obstacle {
        kind: ObstacleType::from_code(corners.type_code())?,
        covariance,
        center,
        left: corners.left(),
        right: corners.right(),
        last_seen,
    })
}

/// Write one obstacle record.
pub(crate) fn write_obstacle(obstacle: &Obstacle, timestamp: u32, buf: &mut BytesMut) {
    for value in obstacle.covariance {
        buf.put_f32_le(value);
    }
    write_short_vector(obstacle.center, buf);

    let corners = ObstacleCorners::pack(
        obstacle.kind.code(),
        [quantize_short(obstacle.left.x), quantize_short(obstacle.left.y)],
        [quantize_short(obstacle.right.x), quantize_short(obstacle.right.y)],
    );
    buf.put_i16_le(corners.left_x);
    buf.put_i16_le(corners.left_y);
    buf.put_i16_le(corners.right_x);
    buf.put_i16_le(corners.right_y);

    buf.put_u8(backward_delta(timestamp, obstacle.last_seen, LAST_SEEN_SHIFT, 0xFF) as u8);
}
