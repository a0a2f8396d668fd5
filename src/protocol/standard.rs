//! Field decoder for the standard segment.
//!
//! The fixed prefix is read field by field in wire order. The obstacle and
//! NTP lists that follow are sized by the trailing [`StatusContainer`].
//! Temporal fields are deltas against the primary timestamp:
//!
//! | Field                        | Wire            | Value                   |
//! |------------------------------|-----------------|-------------------------|
//! | timeOfLastGroundContact      | u8              | `ts - (v << 6)`         |
//! | timestampLastJumped          | u8              | `ts - (v << 7)`         |
//! | ballTimeWhenLastSeen         | u32             | absolute                |
//! | ballTimeWhenDisappeared      | low 24 of u32   | `ts - v`                |
//! | lastTimeWhistleDetected      | u16             | `ts - v`                |
//! | timeWhenReachBall(Striker)   | u16             | `ts + (v << 3)`         |
//! | teammateRolesTimestamp       | low 13 of u16   | `ts - v`                |

use bytes::{BufMut, BytesMut};

use super::containers::{BallContainer, CaptainContainer, RoleContainer, StatusContainer};
use super::encode::{backward_delta, forward_delta, quantize_short};
use super::ntp::{ntp_reply_mask, read_ntp_messages, write_ntp_messages};
use super::obstacle::{read_obstacles, write_obstacle};
use super::reader::StreamReader;
use super::size::{FIXED_SIZE, NTP_MESSAGE_SIZE, OBSTACLE_SIZE};
use crate::error::{DecodeError, EncodeError};
use crate::types::{Role, StandardPart, Timestamp, Vector2f, MAX_NUM_OF_PLAYERS};

const GROUND_CONTACT_SHIFT: u32 = 6;
const LAST_JUMPED_SHIFT: u32 = 7;
const REACH_BALL_SHIFT: u32 = 3;

/// Read two `i16` components as a vector.
pub(super) fn read_short_vector(reader: &mut StreamReader<'_>) -> Result<Vector2f, DecodeError> {
    let x = reader.read_i16()?;
    let y = reader.read_i16()?;
    Ok(Vector2f::new(x as f32, y as f32))
}

pub(super) fn write_short_vector(vector: Vector2f, buf: &mut BytesMut) {
    buf.put_i16_le(quantize_short(vector.x));
    buf.put_i16_le(quantize_short(vector.y));
}

impl StandardPart {
    /// Decode the segment body (after the envelope).
    ///
    /// Consumes exactly [`crate::protocol::streamed_size`] bytes on success.
    /// An out-of-range role or obstacle type code fails the whole record.
    pub fn read(reader: &mut StreamReader<'_>) -> Result<Self, DecodeError> {
        let magic_number = reader.read_u8()?;
        let timestamp = reader.read_u32()?;

        let time_of_last_ground_contact =
            Timestamp::before(timestamp, (reader.read_u8()? as u32) << GROUND_CONTACT_SHIFT);

        let robot_pose_validity = reader.read_u8()? as f32 / 255.0;
        let robot_pose_deviation = reader.read_f32()?;
        let robot_pose_covariance = reader.read_f32_array::<6>()?;
        let timestamp_last_jumped =
            Timestamp::before(timestamp, (reader.read_u8()? as u32) << LAST_JUMPED_SHIFT);

        let ball_time_when_last_seen = Timestamp::at(reader.read_u32()?);
        let ball = BallContainer(reader.read_u32()?);
        let ball_velocity = read_short_vector(reader)?;
        let ball_last_percept = read_short_vector(reader)?;
        let ball_covariance = reader.read_f32_array::<3>()?;

        let confidence_of_last_whistle_detection = reader.read_i8()?;
        let last_time_whistle_detected = Timestamp::before(timestamp, reader.read_u16()? as u32);

        let roles = RoleContainer(reader.read_u32()?);
        let mut teammate_roles = [Role::Undefined; MAX_NUM_OF_PLAYERS];
        for (index, role) in teammate_roles.iter_mut().enumerate() {
            *role = Role::from_code(roles.teammate_role_code(index))?;
        }
        let role = Role::from_code(roles.own_role_code())?;

        let time_when_reach_ball =
            Timestamp::after(timestamp, (reader.read_u16()? as u32) << REACH_BALL_SHIFT);
        let time_when_reach_ball_striker =
            Timestamp::after(timestamp, (reader.read_u16()? as u32) << REACH_BALL_SHIFT);
        let walking_to = read_short_vector(reader)?;
        let shooting_to = read_short_vector(reader)?;

        let captain = CaptainContainer(reader.read_u16()?);

        let status = StatusContainer(reader.read_u16()?);
        let obstacles = read_obstacles(reader, status.obstacle_count(), timestamp)?;
        let ntp_messages = read_ntp_messages(reader, status, timestamp)?;

        Ok(Self {
            magic_number,
            timestamp,
            is_penalized: status.is_penalized(),
            is_upright: status.is_upright(),
            has_ground_contact: status.has_ground_contact(),
            time_of_last_ground_contact,
            robot_pose_validity,
            robot_pose_deviation,
            robot_pose_covariance,
            timestamp_last_jumped,
            ball_time_when_last_seen,
            ball_time_when_disappeared: Timestamp::before(timestamp, ball.disappeared_delta()),
            ball_seen_percentage: ball.seen_percentage(),
            ball_velocity,
            ball_last_percept,
            ball_covariance,
            confidence_of_last_whistle_detection,
            last_time_whistle_detected,
            role,
            time_when_reach_ball,
            time_when_reach_ball_striker,
            pass_target: roles.pass_target(),
            walking_to,
            shooting_to,
            teammate_roles,
            captain: captain.captain(),
            teammate_roles_timestamp: Timestamp::before(
                timestamp,
                captain.roles_timestamp_delta() as u32,
            ),
            obstacles,
            requests_ntp_message: status.requests_ntp_message(),
            ntp_messages,
        })
    }

    /// Encoded length of the segment body.
    pub fn streamed_size(&self) -> usize {
        FIXED_SIZE
            + self.obstacles.len() * OBSTACLE_SIZE
            + self.ntp_messages.len() * NTP_MESSAGE_SIZE
    }

    /// Encode the segment body (without envelope).
    ///
    /// Nothing is written if validation fails.
    pub fn write(&self, buf: &mut BytesMut) -> Result<(), EncodeError> {
        if self.obstacles.len() > StatusContainer::MAX_OBSTACLES {
            return Err(EncodeError::TooManyObstacles(self.obstacles.len()));
        }
        if let Some(target) = self.pass_target.filter(|&t| t >= RoleContainer::NO_PASS_TARGET) {
            return Err(EncodeError::IndexOutOfRange {
                field: "pass target",
                value: target,
            });
        }
        if let Some(captain) = self.captain.filter(|&c| c >= CaptainContainer::NO_CAPTAIN) {
            return Err(EncodeError::IndexOutOfRange {
                field: "captain",
                value: captain,
            });
        }
        let ntp_mask = ntp_reply_mask(&self.ntp_messages)?;

        let ts = self.timestamp;
        buf.reserve(self.streamed_size());

        buf.put_u8(self.magic_number);
        buf.put_u32_le(ts);
        buf.put_u8(backward_delta(
            ts,
            self.time_of_last_ground_contact,
            GROUND_CONTACT_SHIFT,
            0xFF,
        ) as u8);

        buf.put_u8((self.robot_pose_validity.clamp(0.0, 1.0) * 255.0).round() as u8);
        buf.put_f32_le(self.robot_pose_deviation);
        for value in self.robot_pose_covariance {
            buf.put_f32_le(value);
        }
        buf.put_u8(backward_delta(ts, self.timestamp_last_jumped, LAST_JUMPED_SHIFT, 0xFF) as u8);

        buf.put_u32_le(self.ball_time_when_last_seen.value());
        let ball = BallContainer::pack(
            backward_delta(
                ts,
                self.ball_time_when_disappeared,
                0,
                BallContainer::MAX_DISAPPEARED_DELTA,
            ),
            self.ball_seen_percentage,
        );
        buf.put_u32_le(ball.0);
        write_short_vector(self.ball_velocity, buf);
        write_short_vector(self.ball_last_percept, buf);
        for value in self.ball_covariance {
            buf.put_f32_le(value);
        }

        buf.put_i8(self.confidence_of_last_whistle_detection);
        buf.put_u16_le(backward_delta(ts, self.last_time_whistle_detected, 0, 0xFFFF) as u16);

        let roles = RoleContainer::pack(
            self.role.code(),
            self.pass_target,
            self.teammate_roles.map(Role::code),
        );
        buf.put_u32_le(roles.0);
        buf.put_u16_le(
            forward_delta(ts, self.time_when_reach_ball, REACH_BALL_SHIFT, 0xFFFF) as u16,
        );
        buf.put_u16_le(
            forward_delta(ts, self.time_when_reach_ball_striker, REACH_BALL_SHIFT, 0xFFFF) as u16,
        );
        write_short_vector(self.walking_to, buf);
        write_short_vector(self.shooting_to, buf);

        let captain = CaptainContainer::pack(
            self.captain,
            backward_delta(
                ts,
                self.teammate_roles_timestamp,
                0,
                CaptainContainer::MAX_ROLES_DELTA as u32,
            ) as u16,
        );
        buf.put_u16_le(captain.0);

        let status = StatusContainer::pack(
            self.obstacles.len(),
            self.is_penalized,
            self.is_upright,
            self.has_ground_contact,
            self.requests_ntp_message,
            ntp_mask,
        );
        buf.put_u16_le(status.0);

        for obstacle in &self.obstacles {
            write_obstacle(obstacle, ts, buf);
        }
        write_ntp_messages(&self.ntp_messages, ts, buf);

        Ok(())
    }
}
