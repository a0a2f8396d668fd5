//! Size prediction for the standard segment.
//!
//! The standard segment has no length field. Its length is the fixed prefix
//! plus the two variable lists, whose counts sit in the last container of
//! the prefix. The predictor peeks that container through a [`PeekView`],
//! so it cannot advance the stream.

use super::containers::StatusContainer;
use super::reader::PeekView;

/// Bytes of one obstacle record: covariance, center, packed corners, last seen.
pub const OBSTACLE_SIZE: usize = 3 * 4 + 2 * 2 + 4 * 2 + 1;

/// Bytes of one NTP reply record: 32-bit word plus one byte.
pub const NTP_MESSAGE_SIZE: usize = 4 + 1;

/// Bytes of the fixed-size prefix of the standard segment.
pub const FIXED_SIZE: usize = 1 // magicNumber
    + 4 // timestamp
    + 1 // timeOfLastGroundContact
    + 1 // robotPoseValidity
    + 4 // robotPoseDeviation
    + 6 * 4 // robotPoseCovariance
    + 1 // timestampLastJumped
    + 4 // ballTimeWhenLastSeen
    + 4 // ballTimeWhenDisappeared, ballSeenPercentage
    + 2 * 2 // ballVelocity
    + 2 * 2 // ballLastPercept
    + 3 * 4 // ballCovariance
    + 1 // confidenceOfLastWhistleDetection
    + 2 // lastTimeWhistleDetected
    + 4 // role, passTarget, teammateRoles
    + 2 // timeWhenReachBall
    + 2 // timeWhenReachBallStriker
    + 2 * 2 // walkingTo
    + 2 * 2 // shootingTo
    + 2 // captain, teammateRolesTimestamp
    + 2; // obstacle count, status flags, NTP reply mask

/// Offset of the [`StatusContainer`] inside the fixed prefix.
pub const STATUS_CONTAINER_OFFSET: usize = FIXED_SIZE - 2;

/// Predict the full length of the standard segment starting at `view`.
///
/// If the view is shorter than [`FIXED_SIZE`], that lower bound is returned.
/// The caller then sees a size shortfall.
pub fn streamed_size(view: &PeekView<'_>) -> usize {
    match view.u16_le_at(STATUS_CONTAINER_OFFSET) {
        Some(raw) => {
            let status = StatusContainer(raw);
            FIXED_SIZE
                + status.obstacle_count() * OBSTACLE_SIZE
                + status.ntp_reply_count() * NTP_MESSAGE_SIZE
        }
        None => FIXED_SIZE,
    }
}
