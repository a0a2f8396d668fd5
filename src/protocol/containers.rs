//! Bit-packed integer containers.
//!
//! Several unrelated fields share a single wire integer. Each container is a
//! newtype over that integer. It has one extractor per sub-field and a
//! `pack` constructor that inverts them, so every bit range is defined once.
//!
//! ```text
//! RoleContainer (u32)
//! ┌──────┬──────────┬──────┬──────┬──────┬──────┬──────┬──────┐
//! │ role │ pass tgt │ tm 0 │ tm 1 │ tm 2 │ tm 3 │ tm 4 │ tm 5 │
//! │ 31-28│  27-24   │ 23-20│ 19-16│ 15-12│ 11-8 │  7-4 │  3-0 │
//! └──────┴──────────┴──────┴──────┴──────┴──────┴──────┴──────┘
//!
//! StatusContainer (u16)
//! ┌────────────┬─────┬─────┬─────┬─────┬────────────────┐
//! │ obstacles  │ pen │ upr │ gnd │ ntp │ reply mask     │
//! │   15-10    │  9  │  8  │  7  │  6  │ 5 (tm1)..0 (tm6)│
//! └────────────┴─────┴─────┴─────┴─────┴────────────────┘
//! ```

use crate::types::{Vector2f, MAX_NUM_OF_PLAYERS};

/// Flags, obstacle count and NTP reply mask (16 bits).
///
/// The size predictor peeks this container and the field decoder reads it
/// again, so both go through these accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusContainer(pub u16);

impl StatusContainer {
    const OBSTACLE_COUNT_SHIFT: u32 = 10;
    const OBSTACLE_COUNT_MASK: u16 = 0x3F;
    const IS_PENALIZED: u16 = 1 << 9;
    const IS_UPRIGHT: u16 = 1 << 8;
    const HAS_GROUND_CONTACT: u16 = 1 << 7;
    const REQUESTS_NTP_MESSAGE: u16 = 1 << 6;
    /// Mask of the per-teammate NTP reply bits.
    pub const NTP_REPLY_MASK: u16 = 0x3F;
    /// Largest obstacle count that fits the 6-bit field.
    pub const MAX_OBSTACLES: usize = 63;

    #[inline]
    pub fn obstacle_count(self) -> usize {
        ((self.0 >> Self::OBSTACLE_COUNT_SHIFT) & Self::OBSTACLE_COUNT_MASK) as usize
    }

    #[inline]
    pub fn is_penalized(self) -> bool {
        self.0 & Self::IS_PENALIZED != 0
    }

    #[inline]
    pub fn is_upright(self) -> bool {
        self.0 & Self::IS_UPRIGHT != 0
    }

    #[inline]
    pub fn has_ground_contact(self) -> bool {
        self.0 & Self::HAS_GROUND_CONTACT != 0
    }

    #[inline]
    pub fn requests_ntp_message(self) -> bool {
        self.0 & Self::REQUESTS_NTP_MESSAGE != 0
    }

    /// The 6-bit reply mask. Bit 5 is teammate 1, bit 0 is teammate 6.
    #[inline]
    pub fn ntp_reply_mask(self) -> u8 {
        (self.0 & Self::NTP_REPLY_MASK) as u8
    }

    /// Number of NTP reply records that follow the obstacles.
    #[inline]
    pub fn ntp_reply_count(self) -> usize {
        self.ntp_reply_mask().count_ones() as usize
    }

    /// Check if a reply to `teammate` (1-based) is present.
    #[inline]
    pub fn has_ntp_reply_for(self, teammate: u8) -> bool {
        teammate_reply_bit(teammate).is_some_and(|bit| self.ntp_reply_mask() & bit != 0)
    }

    /// Build the container. `obstacle_count` and `ntp_reply_mask` are masked to 6 bits.
    pub fn pack(
        obstacle_count: usize,
        is_penalized: bool,
        is_upright: bool,
        has_ground_contact: bool,
        requests_ntp_message: bool,
        ntp_reply_mask: u8,
    ) -> Self {
        let mut value = ((obstacle_count as u16) & Self::OBSTACLE_COUNT_MASK)
            << Self::OBSTACLE_COUNT_SHIFT;
        if is_penalized {
            value |= Self::IS_PENALIZED;
        }
        if is_upright {
            value |= Self::IS_UPRIGHT;
        }
        if has_ground_contact {
            value |= Self::HAS_GROUND_CONTACT;
        }
        if requests_ntp_message {
            value |= Self::REQUESTS_NTP_MESSAGE;
        }
        value |= ntp_reply_mask as u16 & Self::NTP_REPLY_MASK;
        Self(value)
    }
}

/// Reply-mask bit for a 1-based teammate number, or `None` outside `1..=6`.
#[inline]
pub fn teammate_reply_bit(teammate: u8) -> Option<u8> {
    if (1..=MAX_NUM_OF_PLAYERS as u8).contains(&teammate) {
        Some(1 << (MAX_NUM_OF_PLAYERS as u8 - teammate))
    } else {
        None
    }
}

/// Own role, pass target and teammate roles (32 bits).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleContainer(pub u32);

impl RoleContainer {
    /// Raw pass-target code meaning "no target".
    pub const NO_PASS_TARGET: u8 = 15;

    #[inline]
    pub fn own_role_code(self) -> u8 {
        ((self.0 >> 28) & 0xF) as u8
    }

    #[inline]
    pub fn pass_target(self) -> Option<u8> {
        match ((self.0 >> 24) & 0xF) as u8 {
            Self::NO_PASS_TARGET => None,
            target => Some(target),
        }
    }

    /// Role code of teammate `index` (0-based, most significant nibble first).
    #[inline]
    pub fn teammate_role_code(self, index: usize) -> u8 {
        debug_assert!(index < MAX_NUM_OF_PLAYERS);
        ((self.0 >> ((MAX_NUM_OF_PLAYERS - index - 1) * 4)) & 0xF) as u8
    }

    /// Build the container. Codes are masked to 4 bits.
    pub fn pack(
        own_role_code: u8,
        pass_target: Option<u8>,
        teammate_role_codes: [u8; MAX_NUM_OF_PLAYERS],
    ) -> Self {
        let pass_target = pass_target.unwrap_or(Self::NO_PASS_TARGET);
        let mut value =
            ((own_role_code as u32 & 0xF) << 28) | ((pass_target as u32 & 0xF) << 24);
        for (index, code) in teammate_role_codes.iter().enumerate() {
            value |= (*code as u32 & 0xF) << ((MAX_NUM_OF_PLAYERS - index - 1) * 4);
        }
        Self(value)
    }
}

/// Captain index and team-role snapshot delta (16 bits).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptainContainer(pub u16);

impl CaptainContainer {
    /// Raw captain code meaning "no captain".
    pub const NO_CAPTAIN: u8 = 7;
    /// Largest snapshot delta (13 bits).
    pub const MAX_ROLES_DELTA: u16 = 0x1FFF;

    #[inline]
    pub fn captain(self) -> Option<u8> {
        match ((self.0 >> 13) & 0x7) as u8 {
            Self::NO_CAPTAIN => None,
            captain => Some(captain),
        }
    }

    /// Backward delta of the team-role snapshot timestamp.
    #[inline]
    pub fn roles_timestamp_delta(self) -> u16 {
        self.0 & Self::MAX_ROLES_DELTA
    }

    pub fn pack(captain: Option<u8>, roles_timestamp_delta: u16) -> Self {
        let captain = captain.unwrap_or(Self::NO_CAPTAIN) as u16 & 0x7;
        Self((captain << 13) | (roles_timestamp_delta & Self::MAX_ROLES_DELTA))
    }
}

/// Ball-disappeared delta and seen percentage (32 bits).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BallContainer(pub u32);

impl BallContainer {
    /// Largest disappeared delta (24 bits).
    pub const MAX_DISAPPEARED_DELTA: u32 = 0x00FF_FFFF;

    #[inline]
    pub fn disappeared_delta(self) -> u32 {
        self.0 & Self::MAX_DISAPPEARED_DELTA
    }

    #[inline]
    pub fn seen_percentage(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub fn pack(disappeared_delta: u32, seen_percentage: u8) -> Self {
        Self((disappeared_delta & Self::MAX_DISAPPEARED_DELTA) | ((seen_percentage as u32) << 24))
    }
}

/// The four raw corner components of an obstacle.
///
/// The top two bits of each component hold a fragment of the obstacle type
/// code. The remaining 14 bits hold the coordinate divided by 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObstacleCorners {
    pub left_x: i16,
    pub left_y: i16,
    pub right_x: i16,
    pub right_y: i16,
}

impl ObstacleCorners {
    /// Assemble the 8-bit type code: left x gives bits 0-1, left y bits 2-3,
    /// right x bits 4-5 and right y bits 6-7.
    pub fn type_code(self) -> u8 {
        type_fragment(self.left_x)
            | (type_fragment(self.left_y) << 2)
            | (type_fragment(self.right_x) << 4)
            | (type_fragment(self.right_y) << 6)
    }

    pub fn left(self) -> Vector2f {
        Vector2f::new(
            corner_coordinate(self.left_x) as f32,
            corner_coordinate(self.left_y) as f32,
        )
    }

    pub fn right(self) -> Vector2f {
        Vector2f::new(
            corner_coordinate(self.right_x) as f32,
            corner_coordinate(self.right_y) as f32,
        )
    }

    /// Build the components from a type code and full-resolution coordinates.
    /// The low two bits of every coordinate are dropped.
    pub fn pack(type_code: u8, left: [i16; 2], right: [i16; 2]) -> Self {
        Self {
            left_x: pack_corner(left[0], type_code),
            left_y: pack_corner(left[1], type_code >> 2),
            right_x: pack_corner(right[0], type_code >> 4),
            right_y: pack_corner(right[1], type_code >> 6),
        }
    }
}

/// Top two bits of a raw component.
#[inline]
fn type_fragment(raw: i16) -> u8 {
    ((raw as u16) >> 14) as u8
}

/// Drop the type bits and restore the coordinate scale, keeping the sign.
#[inline]
pub fn corner_coordinate(raw: i16) -> i16 {
    raw.wrapping_shl(2)
}

#[inline]
fn pack_corner(coordinate: i16, fragment: u8) -> i16 {
    (((coordinate >> 2) as u16 & 0x3FFF) | ((fragment as u16 & 0x3) << 14)) as i16
}

/// The 4+1 byte time structure of one NTP reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NtpTimeStruct {
    pub time32: u32,
    pub time8: u8,
}

impl NtpTimeStruct {
    /// Largest receipt delta (12 bits).
    pub const MAX_RECEIPT_DELTA: u32 = 0xFFF;
    const ORIGINATION_MASK: u32 = 0x0FFF_FFFF;

    /// Low 28 bits of the 32-bit word.
    #[inline]
    pub fn request_origination(self) -> u32 {
        self.time32 & Self::ORIGINATION_MASK
    }

    /// 12-bit backward delta of the request receipt.
    ///
    /// Bits 28-31 of the word become bits 8-11 and the byte supplies bits
    /// 0-7. The ranges are disjoint, so the OR equals a sum.
    #[inline]
    pub fn receipt_delta(self) -> u32 {
        ((self.time32 >> 20) & 0xF00) | self.time8 as u32
    }

    /// Build the structure. `receipt_delta` must already be at most 12 bits.
    pub fn pack(request_origination: u32, receipt_delta: u32) -> Self {
        debug_assert!(receipt_delta <= Self::MAX_RECEIPT_DELTA);
        Self {
            time32: (request_origination & Self::ORIGINATION_MASK)
                | ((receipt_delta & 0xF00) << 20),
            time8: (receipt_delta & 0xFF) as u8,
        }
    }
}
