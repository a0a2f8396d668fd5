//! Shared test fixtures.

use crate::types::{
    NtpRequest, Obstacle, ObstacleType, Role, StandardPart, Timestamp, Vector2f,
};

/// A standard part whose values all sit on the wire grid.
pub(crate) fn sample_part() -> StandardPart {
    let ts = 100_000;
    StandardPart {
        magic_number: 42,
        timestamp: ts,
        is_penalized: false,
        is_upright: true,
        has_ground_contact: true,
        time_of_last_ground_contact: Timestamp::at(ts - 5 * 64),
        robot_pose_validity: 200.0 / 255.0,
        robot_pose_deviation: 12.5,
        robot_pose_covariance: [1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        timestamp_last_jumped: Timestamp::at(ts - 10 * 128),
        ball_time_when_last_seen: Timestamp::at(99_500),
        ball_time_when_disappeared: Timestamp::at(ts - 700),
        ball_seen_percentage: 87,
        ball_velocity: Vector2f::new(-120.0, 45.0),
        ball_last_percept: Vector2f::new(2000.0, -1500.0),
        ball_covariance: [10.0, 0.5, 10.0],
        confidence_of_last_whistle_detection: -3,
        last_time_whistle_detected: Timestamp::at(ts - 40_000),
        role: Role::Striker,
        time_when_reach_ball: Timestamp::at(ts + 8 * 250),
        time_when_reach_ball_striker: Timestamp::at(ts + 8 * 300),
        pass_target: Some(4),
        walking_to: Vector2f::new(1000.0, 0.0),
        shooting_to: Vector2f::new(4500.0, 0.0),
        teammate_roles: [
            Role::Keeper,
            Role::Defender,
            Role::Striker,
            Role::Supporter,
            Role::None,
            Role::Undefined,
        ],
        captain: Some(1),
        teammate_roles_timestamp: Timestamp::at(ts - 1_234),
        obstacles: vec![Obstacle {
            kind: ObstacleType::FallenOpponent,
            covariance: [100.0, 0.0, 100.0],
            center: Vector2f::new(800.0, 120.0),
            left: Vector2f::new(800.0, 280.0),
            right: Vector2f::new(800.0, -40.0),
            last_seen: Timestamp::at(ts - 64),
        }],
        requests_ntp_message: true,
        ntp_messages: vec![NtpRequest {
            sender: 3,
            request_origination: 0x0ABC_DEF0,
            request_receipt: Timestamp::at(ts - 0x321),
        }],
    }
}
