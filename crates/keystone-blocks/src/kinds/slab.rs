use glam::Vec3;

use crate::behavior::{
    Actor, BehaviorError, BlockBehavior, BlockContext, variant_to_data, warn_malformed_data,
};
use crate::face::BlockFace;
use crate::material::{BlockState, ItemStack, MaterialId};
use crate::pos::BlockPos;
use crate::sound::SoundSpec;

/// Sub-data bit set on slabs occupying the upper half of their cell.
pub const TOP_HALF: u8 = 0x8;
const VARIANT_MASK: u8 = 0x7;

/// A half-height block. Placing a matching slab onto its open half merges
/// the two into the configured double material.
#[derive(Debug, Clone)]
pub struct SlabBlock {
    double: MaterialId,
    place_sound: SoundSpec,
}

impl SlabBlock {
    pub fn new(double: MaterialId) -> Self {
        Self {
            double,
            place_sound: SoundSpec::default(),
        }
    }

    #[must_use]
    pub fn with_place_sound(mut self, place_sound: SoundSpec) -> Self {
        self.place_sound = place_sound;
        self
    }

    pub fn double(&self) -> MaterialId {
        self.double
    }
}

/// Slab variant carried by `held`. Bits outside the variant mask are logged
/// and kept as they are.
fn held_variant(held: &ItemStack) -> u8 {
    let data = variant_to_data(held);
    if data & !VARIANT_MASK != 0 {
        warn_malformed_data(held.material, "slab", "variant 0..=7", data);
    }
    data
}

impl BlockBehavior for SlabBlock {
    fn can_absorb(
        &self,
        ctx: &BlockContext<'_>,
        pos: BlockPos,
        face: BlockFace,
        held: &ItemStack,
    ) -> bool {
        let state = ctx.state(pos);
        let matches =
            state.material == held.material && u16::from(state.data & VARIANT_MASK) == held.variant;
        if !matches {
            return false;
        }
        if state.data & TOP_HALF != 0 {
            face == BlockFace::Down
        } else {
            face == BlockFace::Up
        }
    }

    fn place_block(
        &self,
        _ctx: &BlockContext<'_>,
        _actor: &dyn Actor,
        state: &mut BlockState,
        face: BlockFace,
        held: &ItemStack,
        click: Vec3,
    ) -> Result<(), BehaviorError> {
        let variant = held_variant(held);
        if state.material == held.material {
            // Absorbed into an existing half.
            state.material = self.double;
            state.data = variant;
            return Ok(());
        }

        let top = face == BlockFace::Down || (face.is_horizontal() && click.y >= 0.5);
        state.material = held.material;
        state.data = if top { variant | TOP_HALF } else { variant };
        Ok(())
    }

    fn drops(&self, state: &BlockState, _tool: Option<&ItemStack>) -> Vec<ItemStack> {
        vec![ItemStack::new(state.material, 1).with_variant(u16::from(state.data & VARIANT_MASK))]
    }

    fn place_sound(&self) -> SoundSpec {
        self.place_sound
    }
}
