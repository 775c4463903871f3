//! Material ids, item stacks, tile entities and block-state snapshots.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::pos::{ChunkPos, LocalPos};

/// Compact material identifier stored for every block cell.
///
/// Id 0 is always the empty cell so that zeroed storage reads as air.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MaterialId(pub u16);

impl MaterialId {
    /// The empty cell.
    pub const EMPTY: MaterialId = MaterialId(0);

    /// Returns `true` for the empty cell.
    pub fn is_empty(self) -> bool {
        self == Self::EMPTY
    }
}

/// A stack of items held by an actor or yielded as a drop.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    /// Material of the items.
    pub material: MaterialId,
    /// Variant/durability value; block items carry their sub-data here.
    pub variant: u16,
    /// Number of items in the stack.
    pub amount: u32,
}

impl ItemStack {
    /// Creates a stack with variant 0.
    pub fn new(material: MaterialId, amount: u32) -> Self {
        Self {
            material,
            variant: 0,
            amount,
        }
    }

    /// Builder-style variant setter.
    #[must_use]
    pub fn with_variant(mut self, variant: u16) -> Self {
        self.variant = variant;
        self
    }

    pub fn variant(&self) -> u16 {
        self.variant
    }

    pub fn amount(&self) -> u32 {
        self.amount
    }

    pub fn set_amount(&mut self, amount: u32) {
        self.amount = amount;
    }
}

/// Auxiliary persistent state attached to a single block (e.g. a chest's slots).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileEntity {
    /// Kind tag, e.g. `"container"`.
    pub kind: &'static str,
    /// Chunk that owns the block.
    pub chunk: ChunkPos,
    /// Block position inside the chunk.
    pub local: LocalPos,
    /// Item slots; empty for kinds without an inventory.
    pub slots: Vec<Option<ItemStack>>,
}

impl TileEntity {
    /// Creates a tile entity with `slot_count` empty slots.
    pub fn new(kind: &'static str, chunk: ChunkPos, local: LocalPos, slot_count: usize) -> Self {
        Self {
            kind,
            chunk,
            local,
            slots: vec![None; slot_count],
        }
    }
}

/// Immutable capture of one block's material, sub-data and tile entity.
///
/// Cloning shares the tile entity, so reapplying a snapshot restores the very
/// same tile-entity reference.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct BlockState {
    pub material: MaterialId,
    pub data: u8,
    pub tile_entity: Option<Arc<TileEntity>>,
}

impl BlockState {
    /// The empty cell with no data and no tile entity.
    pub const EMPTY: BlockState = BlockState {
        material: MaterialId::EMPTY,
        data: 0,
        tile_entity: None,
    };

    /// A state without a tile entity.
    pub fn new(material: MaterialId, data: u8) -> Self {
        Self {
            material,
            data,
            tile_entity: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.material.is_empty()
    }

    /// Returns `true` if both states refer to the same tile entity (or both have none).
    pub fn same_tile_entity(&self, other: &BlockState) -> bool {
        match (&self.tile_entity, &other.tile_entity) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl Default for MaterialId {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Before/after material and sub-data of a single changed block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockChange {
    pub old_material: MaterialId,
    pub old_data: u8,
    pub new_material: MaterialId,
    pub new_data: u8,
}

impl BlockChange {
    /// Describes the transition from `old` to `new`.
    pub fn between(old: &BlockState, new: &BlockState) -> Self {
        Self {
            old_material: old.material,
            old_data: old.data,
            new_material: new.material,
            new_data: new.data,
        }
    }

    /// Returns `true` if material or sub-data differ.
    pub fn is_change(&self) -> bool {
        self.old_material != self.new_material || self.old_data != self.new_data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_material_is_zero() {
        assert_eq!(MaterialId::EMPTY, MaterialId(0));
        assert!(MaterialId::default().is_empty());
        assert!(BlockState::default().is_empty());
        assert_eq!(BlockState::default(), BlockState::EMPTY);
    }

    #[test]
    fn test_item_stack_accessors() {
        let mut stack = ItemStack::new(MaterialId(5), 3).with_variant(2);
        assert_eq!(stack.variant(), 2);
        assert_eq!(stack.amount(), 3);
        stack.set_amount(1);
        assert_eq!(stack.amount(), 1);
    }

    #[test]
    fn test_snapshot_shares_tile_entity() {
        let te = TileEntity::new("container", ChunkPos::new(0, 0), LocalPos::new(1, 2, 3), 27);
        let state = BlockState {
            material: MaterialId(54),
            data: 0,
            tile_entity: Some(Arc::new(te)),
        };
        let snapshot = state.clone();
        assert!(snapshot.same_tile_entity(&state));
        assert!(!snapshot.same_tile_entity(&BlockState::new(MaterialId(54), 0)));
    }

    #[test]
    fn test_block_change_detects_data_only_change() {
        let old = BlockState::new(MaterialId(3), 0);
        let new = BlockState::new(MaterialId(3), 1);
        assert!(BlockChange::between(&old, &new).is_change());
        assert!(!BlockChange::between(&old, &old).is_change());
    }
}
