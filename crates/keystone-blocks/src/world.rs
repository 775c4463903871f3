//! World/block accessor capability and a coordinate-keyed in-memory world.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::face::BlockFace;
use crate::material::{BlockState, MaterialId};
use crate::pos::BlockPos;

/// Read/write access to one world's blocks.
///
/// The caller guarantees exclusive access for the duration of a call chain;
/// implementations do not lock.
pub trait BlockAccess {
    /// Current state of the block at `pos`. Unloaded cells read as empty.
    fn state(&self, pos: BlockPos) -> BlockState;

    /// Overwrites the block at `pos` (material, data and tile entity).
    fn set_state(&mut self, pos: BlockPos, state: BlockState);

    /// Whether the block at `pos` is a liquid.
    fn is_liquid(&self, pos: BlockPos) -> bool;

    /// Exclusive upper bound on block Y coordinates.
    fn max_height(&self) -> i32;

    /// Position of the block adjacent to `pos` on `face`.
    fn neighbor(&self, pos: BlockPos, face: BlockFace) -> BlockPos {
        pos.relative(face)
    }
}

/// Sparse in-memory world keyed by block position.
///
/// Cells never written read as [`BlockState::EMPTY`]; writing an empty state
/// removes the entry.
#[derive(Debug, Clone)]
pub struct MemoryWorld {
    blocks: FxHashMap<BlockPos, BlockState>,
    liquids: FxHashSet<MaterialId>,
    max_height: i32,
    writes: u64,
}

impl MemoryWorld {
    pub fn new(max_height: i32) -> Self {
        Self {
            blocks: FxHashMap::default(),
            liquids: FxHashSet::default(),
            max_height,
            writes: 0,
        }
    }

    /// Declares `material` a liquid.
    #[must_use]
    pub fn with_liquid(mut self, material: MaterialId) -> Self {
        self.liquids.insert(material);
        self
    }

    /// Number of non-empty cells.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Total number of `set_state` calls, including no-op writes.
    pub fn write_count(&self) -> u64 {
        self.writes
    }

    /// Iterates over all non-empty cells.
    pub fn iter(&self) -> impl Iterator<Item = (&BlockPos, &BlockState)> {
        self.blocks.iter()
    }
}

impl BlockAccess for MemoryWorld {
    fn state(&self, pos: BlockPos) -> BlockState {
        self.blocks.get(&pos).cloned().unwrap_or_default()
    }

    fn set_state(&mut self, pos: BlockPos, state: BlockState) {
        self.writes += 1;
        if state.is_empty() && state.tile_entity.is_none() {
            self.blocks.remove(&pos);
        } else {
            self.blocks.insert(pos, state);
        }
    }

    fn is_liquid(&self, pos: BlockPos) -> bool {
        self.blocks
            .get(&pos)
            .is_some_and(|state| self.liquids.contains(&state.material))
    }

    fn max_height(&self) -> i32 {
        self.max_height
    }
}
