//! Decoded telemetry records.
//!
//! Every value here is created fresh by a decode call and owned by the
//! returned [`Message`]. Nothing is mutated after construction.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

/// Maximum number of players in a team, and the length of every per-teammate array.
pub const MAX_NUM_OF_PLAYERS: usize = 6;

/// Absolute robot clock value in milliseconds.
///
/// Most temporal fields travel as small deltas against the record's primary
/// timestamp. Only the reconstructed absolute value is exposed. Arithmetic
/// wraps like the robot's unsigned 32-bit clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(u32);

impl Timestamp {
    /// A timestamp that was transmitted as an absolute value.
    #[inline]
    pub const fn at(value: u32) -> Self {
        Self(value)
    }

    /// `primary - delta`.
    #[inline]
    pub const fn before(primary: u32, delta: u32) -> Self {
        Self(primary.wrapping_sub(delta))
    }

    /// `primary + delta`.
    #[inline]
    pub const fn after(primary: u32, delta: u32) -> Self {
        Self(primary.wrapping_add(delta))
    }

    /// The absolute clock value.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }
}

/// 2D vector in field coordinates (millimeters).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2f {
    pub x: f32,
    pub y: f32,
}

impl Vector2f {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Tactical role of a robot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum Role {
    #[default]
    Undefined = 0,
    Keeper = 1,
    AttackingKeeper = 2,
    Striker = 3,
    Defender = 4,
    Supporter = 5,
    PenaltyStriker = 6,
    PenaltyKeeper = 7,
    None = 8,
}

impl Role {
    const ALL: [Role; 9] = [
        Role::Undefined,
        Role::Keeper,
        Role::AttackingKeeper,
        Role::Striker,
        Role::Defender,
        Role::Supporter,
        Role::PenaltyStriker,
        Role::PenaltyKeeper,
        Role::None,
    ];

    /// Map a 4-bit wire code to a role.
    pub fn from_code(code: u8) -> Result<Self, DecodeError> {
        Self::ALL
            .get(code as usize)
            .copied()
            .ok_or(DecodeError::InvalidRole(code))
    }

    /// Wire code of this role.
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

/// Category of a detected obstacle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum ObstacleType {
    Goalpost = 0,
    Unknown = 1,
    SomeRobot = 2,
    Opponent = 3,
    Teammate = 4,
    FallenSomeRobot = 5,
    FallenOpponent = 6,
    FallenTeammate = 7,
}

impl ObstacleType {
    const ALL: [ObstacleType; 8] = [
        ObstacleType::Goalpost,
        ObstacleType::Unknown,
        ObstacleType::SomeRobot,
        ObstacleType::Opponent,
        ObstacleType::Teammate,
        ObstacleType::FallenSomeRobot,
        ObstacleType::FallenOpponent,
        ObstacleType::FallenTeammate,
    ];

    /// Map an assembled 8-bit type code to an obstacle type.
    pub fn from_code(code: u8) -> Result<Self, DecodeError> {
        Self::ALL
            .get(code as usize)
            .copied()
            .ok_or(DecodeError::InvalidObstacleType(code))
    }

    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

/// An obstacle in robot-relative coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Obstacle {
    #[serde(rename = "type")]
    pub kind: ObstacleType,
    pub covariance: [f32; 3],
    pub center: Vector2f,
    /// Left edge; multiples of 4 after decoding.
    pub left: Vector2f,
    /// Right edge; multiples of 4 after decoding.
    pub right: Vector2f,
    pub last_seen: Timestamp,
}

/// A clock-synchronization reply addressed to the sending robot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NtpRequest {
    /// Teammate number (1-based) whose request this answers.
    pub sender: u8,
    /// Sender's clock when the request was sent (28 bits).
    pub request_origination: u32,
    /// Own clock when the request was received.
    pub request_receipt: Timestamp,
}

/// The decoded B-Human standard message segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardPart {
    pub magic_number: u8,
    /// Primary timestamp; every delta-encoded field is relative to it.
    pub timestamp: u32,

    pub is_penalized: bool,
    pub is_upright: bool,
    pub has_ground_contact: bool,
    pub time_of_last_ground_contact: Timestamp,

    /// Pose validity in `[0, 1]`, quantized to 1/255.
    pub robot_pose_validity: f32,
    pub robot_pose_deviation: f32,
    pub robot_pose_covariance: [f32; 6],
    pub timestamp_last_jumped: Timestamp,

    pub ball_time_when_last_seen: Timestamp,
    pub ball_time_when_disappeared: Timestamp,
    pub ball_seen_percentage: u8,
    pub ball_velocity: Vector2f,
    pub ball_last_percept: Vector2f,
    pub ball_covariance: [f32; 3],

    pub confidence_of_last_whistle_detection: i8,
    pub last_time_whistle_detected: Timestamp,

    pub role: Role,
    pub time_when_reach_ball: Timestamp,
    pub time_when_reach_ball_striker: Timestamp,
    /// Teammate index of the pass target, if any.
    pub pass_target: Option<u8>,
    pub walking_to: Vector2f,
    pub shooting_to: Vector2f,

    pub teammate_roles: [Role; MAX_NUM_OF_PLAYERS],
    /// Teammate index of the captain, if any.
    pub captain: Option<u8>,
    pub teammate_roles_timestamp: Timestamp,

    pub obstacles: Vec<Obstacle>,

    pub requests_ntp_message: bool,
    pub ntp_messages: Vec<NtpRequest>,
}

impl StandardPart {
    /// Milliseconds between the last ground contact and the primary timestamp.
    pub fn time_since_last_ground_contact(&self) -> u32 {
        self.timestamp
            .wrapping_sub(self.time_of_last_ground_contact.value())
    }
}

/// Result of decoding one embedded payload.
///
/// A segment is `None` when its envelope, size or field decode failed; the
/// reasons are listed in `issues` in the order they were reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message<Q = Bytes> {
    pub standard: Option<StandardPart>,
    pub queue: Option<Q>,
    #[serde(skip)]
    pub issues: Vec<DecodeError>,
}

impl<Q> Default for Message<Q> {
    fn default() -> Self {
        Self {
            standard: None,
            queue: None,
            issues: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_constructors() {
        assert_eq!(Timestamp::at(42).value(), 42);
        assert_eq!(Timestamp::before(1000, 64).value(), 936);
        assert_eq!(Timestamp::after(1000, 8).value(), 1008);
    }

    #[test]
    fn test_timestamp_wraps_like_robot_clock() {
        assert_eq!(Timestamp::before(10, 20).value(), u32::MAX - 9);
        assert_eq!(Timestamp::after(u32::MAX, 1).value(), 0);
    }

    #[test]
    fn test_role_codes() {
        for code in 0..=8u8 {
            assert_eq!(Role::from_code(code).unwrap().code(), code);
        }
        assert_eq!(Role::from_code(3).unwrap(), Role::Striker);
        assert_eq!(Role::from_code(8).unwrap(), Role::None);
        assert_eq!(Role::from_code(9), Err(DecodeError::InvalidRole(9)));
        assert_eq!(Role::from_code(15), Err(DecodeError::InvalidRole(15)));
    }

    #[test]
    fn test_obstacle_type_codes() {
        assert_eq!(ObstacleType::from_code(0).unwrap(), ObstacleType::Goalpost);
        assert_eq!(
            ObstacleType::from_code(7).unwrap(),
            ObstacleType::FallenTeammate
        );
        assert_eq!(
            ObstacleType::from_code(8),
            Err(DecodeError::InvalidObstacleType(8))
        );
        assert_eq!(
            ObstacleType::from_code(0xFF),
            Err(DecodeError::InvalidObstacleType(0xFF))
        );
    }

    #[test]
    fn test_role_serializes_camel_case() {
        let json = serde_json::to_string(&Role::AttackingKeeper).unwrap();
        assert_eq!(json, "\"attackingKeeper\"");
    }

    #[test]
    fn test_message_default_is_empty() {
        let message: Message = Message::default();
        assert!(message.standard.is_none());
        assert!(message.queue.is_none());
        assert!(message.issues.is_empty());
    }
}
