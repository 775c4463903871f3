//! Block, chunk and chunk-local coordinates.

use glam::IVec3;
use serde::{Deserialize, Serialize};

use crate::face::BlockFace;

/// Horizontal chunk edge length in blocks.
pub const CHUNK_SIZE: i32 = 16;

/// Integer position of a block in its world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Returns the position shifted by `delta`, wrapping at the `i32` edges.
    pub fn offset(self, delta: IVec3) -> Self {
        Self {
            x: self.x.wrapping_add(delta.x),
            y: self.y.wrapping_add(delta.y),
            z: self.z.wrapping_add(delta.z),
        }
    }

    /// The adjacent position in direction `face`.
    pub fn relative(self, face: BlockFace) -> Self {
        self.offset(face.offset())
    }

    /// Chunk column that contains this block.
    pub fn chunk(self) -> ChunkPos {
        ChunkPos::new(self.x.div_euclid(CHUNK_SIZE), self.z.div_euclid(CHUNK_SIZE))
    }

    /// Position inside the owning chunk column.
    pub fn local(self) -> LocalPos {
        // rem_euclid keeps x and z in [0, 16) so the narrowing is lossless.
        LocalPos::new(
            self.x.rem_euclid(CHUNK_SIZE) as u8,
            self.y,
            self.z.rem_euclid(CHUNK_SIZE) as u8,
        )
    }
}

impl From<IVec3> for BlockPos {
    fn from(v: IVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

/// Identifies a chunk column by its chunk-grid X/Z coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkPos {
    pub x: i32,
    pub z: i32,
}

impl ChunkPos {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }
}

/// Block position relative to its chunk column; `x` and `z` are in `[0, 16)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalPos {
    pub x: u8,
    pub y: i32,
    pub z: u8,
}

impl LocalPos {
    pub const fn new(x: u8, y: i32, z: u8) -> Self {
        Self { x, y, z }
    }
}
