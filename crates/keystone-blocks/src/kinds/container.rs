use glam::Vec3;

use crate::behavior::{Actor, BlockBehavior, BlockContext};
use crate::face::BlockFace;
use crate::material::{BlockState, ItemStack, TileEntity};
use crate::pos::{BlockPos, ChunkPos, LocalPos};
use crate::sound::SoundSpec;

/// Tile-entity kind tag of container inventories.
pub const CONTAINER_KIND: &str = "container";

/// A block carrying an item inventory in its tile entity (chests, barrels).
#[derive(Debug, Clone)]
pub struct ContainerBlock {
    slots: usize,
    place_sound: SoundSpec,
}

impl ContainerBlock {
    /// Slot count of a single chest.
    pub const DEFAULT_SLOTS: usize = 27;

    pub fn new(slots: usize) -> Self {
        Self {
            slots,
            place_sound: SoundSpec::default(),
        }
    }

    #[must_use]
    pub fn with_place_sound(mut self, place_sound: SoundSpec) -> Self {
        self.place_sound = place_sound;
        self
    }
}

impl Default for ContainerBlock {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SLOTS)
    }
}

impl BlockBehavior for ContainerBlock {
    fn create_tile_entity(&self, chunk: ChunkPos, local: LocalPos) -> Option<TileEntity> {
        Some(TileEntity::new(CONTAINER_KIND, chunk, local, self.slots))
    }

    /// Opens the inventory. A container without a tile entity has nothing to
    /// open and reports no interaction.
    fn block_interact(
        &self,
        ctx: &mut BlockContext<'_>,
        actor: &mut dyn Actor,
        pos: BlockPos,
        _face: BlockFace,
        _click: Vec3,
    ) -> bool {
        let state = ctx.state(pos);
        let Some(inventory) = state.tile_entity.as_deref() else {
            tracing::warn!(?pos, material = state.material.0, "container has no tile entity");
            return false;
        };
        let used = inventory.slots.iter().flatten().count();
        tracing::debug!(
            actor = actor.name(),
            ?pos,
            used,
            slots = inventory.slots.len(),
            "open container"
        );
        true
    }

    /// The container itself plus everything stored in it.
    fn drops(&self, state: &BlockState, _tool: Option<&ItemStack>) -> Vec<ItemStack> {
        let mut drops = vec![ItemStack::new(state.material, 1)];
        if let Some(inventory) = &state.tile_entity {
            drops.extend(inventory.slots.iter().flatten().cloned());
        }
        drops
    }

    fn place_sound(&self) -> SoundSpec {
        self.place_sound
    }
}
