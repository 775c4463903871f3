//! The six block faces, facing resolution from an actor's look angles, and the
//! 3×3×3 neighbourhood used for physics notification.

use glam::IVec3;
use serde::{Deserialize, Serialize};

/// A cardinal or vertical direction.
///
/// North is −Z, east is +X, south is +Z, west is −X.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum BlockFace {
    Down = 0,
    Up = 1,
    North = 2,
    South = 3,
    West = 4,
    East = 5,
}

impl BlockFace {
    /// All six faces in canonical (sub-data) order.
    pub const ALL: [BlockFace; 6] = [
        BlockFace::Down,
        BlockFace::Up,
        BlockFace::North,
        BlockFace::South,
        BlockFace::West,
        BlockFace::East,
    ];

    /// The four horizontal faces, clockwise from north.
    pub const HORIZONTAL: [BlockFace; 4] = [
        BlockFace::North,
        BlockFace::East,
        BlockFace::South,
        BlockFace::West,
    ];

    /// The opposite face (e.g., `North` → `South`).
    #[must_use]
    pub fn opposite(self) -> BlockFace {
        match self {
            BlockFace::Down => BlockFace::Up,
            BlockFace::Up => BlockFace::Down,
            BlockFace::North => BlockFace::South,
            BlockFace::South => BlockFace::North,
            BlockFace::West => BlockFace::East,
            BlockFace::East => BlockFace::West,
        }
    }

    /// Unit step toward the adjacent block on this face.
    #[must_use]
    pub fn offset(self) -> IVec3 {
        match self {
            BlockFace::Down => IVec3::NEG_Y,
            BlockFace::Up => IVec3::Y,
            BlockFace::North => IVec3::NEG_Z,
            BlockFace::South => IVec3::Z,
            BlockFace::West => IVec3::NEG_X,
            BlockFace::East => IVec3::X,
        }
    }

    /// The face whose offset equals `delta`, or `None` for any non-unit-axis step.
    pub fn from_offset(delta: IVec3) -> Option<BlockFace> {
        Self::ALL.into_iter().find(|face| face.offset() == delta)
    }

    /// Decodes a sub-data value written by [`BlockFace::to_data`].
    pub fn from_data(data: u8) -> Option<BlockFace> {
        Self::ALL.get(data as usize).copied()
    }

    /// Sub-data encoding of this face.
    pub fn to_data(self) -> u8 {
        self as u8
    }

    pub fn is_horizontal(self) -> bool {
        !matches!(self, BlockFace::Up | BlockFace::Down)
    }
}

/// Pitch beyond which an actor counts as looking straight up or down.
pub const VERTICAL_PITCH_THRESHOLD: f64 = 67.5;

/// Derives the face an actor is looking toward from its yaw and pitch (degrees).
///
/// With `vertical_allowed`, a pitch below −67.5° resolves to [`BlockFace::Down`]
/// and above 67.5° to [`BlockFace::Up`] before yaw is considered. Otherwise the
/// yaw is normalised into `[0, 360)` and split into 90° bands centred on the
/// cardinals, each band closed at its lower edge:
///
/// | yaw                  | face  |
/// |----------------------|-------|
/// | `[315, 360) ∪ [0, 45)` | North |
/// | `[45, 135)`          | East  |
/// | `[135, 225)`         | South |
/// | `[225, 315)`         | West  |
///
/// A non-finite yaw resolves to [`BlockFace::East`].
pub fn resolve_facing(yaw: f32, pitch: f32, vertical_allowed: bool) -> BlockFace {
    if vertical_allowed {
        let pitch = f64::from(pitch);
        if pitch < -VERTICAL_PITCH_THRESHOLD {
            return BlockFace::Down;
        } else if pitch > VERTICAL_PITCH_THRESHOLD {
            return BlockFace::Up;
        }
    }

    let mut rot = f64::from(yaw).rem_euclid(360.0);
    // rem_euclid can round a tiny negative input up to exactly 360.
    if rot >= 360.0 {
        rot = 0.0;
    }

    if (45.0..135.0).contains(&rot) {
        BlockFace::East
    } else if (135.0..225.0).contains(&rot) {
        BlockFace::South
    } else if (225.0..315.0).contains(&rot) {
        BlockFace::West
    } else if (0.0..45.0).contains(&rot) || (315.0..360.0).contains(&rot) {
        BlockFace::North
    } else {
        BlockFace::East
    }
}

/// Offsets of the 26 cells surrounding a block (the 3×3×3 cube minus its centre),
/// ordered by y, then z, then x.
pub const NEIGHBORHOOD: [IVec3; 26] = neighborhood();

const fn neighborhood() -> [IVec3; 26] {
    let mut out = [IVec3::ZERO; 26];
    let mut i = 0;
    let mut y = -1;
    while y <= 1 {
        let mut z = -1;
        while z <= 1 {
            let mut x = -1;
            while x <= 1 {
                if !(x == 0 && y == 0 && z == 0) {
                    out[i] = IVec3::new(x, y, z);
                    i += 1;
                }
                x += 1;
            }
            z += 1;
        }
        y += 1;
    }
    out
}
