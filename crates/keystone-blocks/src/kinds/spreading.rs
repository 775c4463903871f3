use rand::{Rng, RngCore};

use crate::behavior::{BlockBehavior, BlockContext};
use crate::face::BlockFace;
use crate::material::{BlockChange, BlockState, ItemStack, MaterialId};
use crate::pos::BlockPos;
use crate::sound::SoundSpec;

/// A surface cover that creeps onto nearby base blocks on random ticks and
/// decays back to the base when smothered (grass, mycelium).
#[derive(Debug, Clone)]
pub struct SpreadingBlock {
    base: MaterialId,
    attempts: u32,
    place_sound: SoundSpec,
    drops: [ItemStack; 1],
}

impl SpreadingBlock {
    /// Spread tries per random tick.
    pub const DEFAULT_ATTEMPTS: u32 = 4;

    /// `base` is the material the cover grows onto, decays into and drops.
    pub fn new(base: MaterialId) -> Self {
        Self {
            base,
            attempts: Self::DEFAULT_ATTEMPTS,
            place_sound: SoundSpec::default(),
            drops: [ItemStack::new(base, 1)],
        }
    }

    #[must_use]
    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts;
        self
    }

    #[must_use]
    pub fn with_place_sound(mut self, place_sound: SoundSpec) -> Self {
        self.place_sound = place_sound;
        self
    }

    fn is_covered(ctx: &BlockContext<'_>, pos: BlockPos) -> bool {
        let above = pos.relative(BlockFace::Up);
        !ctx.state(above).is_empty() && !ctx.is_liquid(above)
    }
}

impl BlockBehavior for SpreadingBlock {
    fn drop_override(&self) -> Option<&[ItemStack]> {
        Some(&self.drops)
    }

    fn can_tick_randomly(&self) -> bool {
        true
    }

    fn update_block(&self, ctx: &mut BlockContext<'_>, pos: BlockPos, rng: &mut dyn RngCore) {
        let state = ctx.state(pos);
        if Self::is_covered(ctx, pos) {
            let decayed = BlockState::new(self.base, 0);
            ctx.set_state(pos, decayed.clone());
            ctx.schedule_physics(pos, BlockChange::between(&state, &decayed));
            return;
        }

        for _ in 0..self.attempts {
            let candidate = BlockPos::new(
                pos.x + rng.random_range(-1..=1),
                pos.y + rng.random_range(-3..=1),
                pos.z + rng.random_range(-1..=1),
            );
            let old = ctx.state(candidate);
            if old.material != self.base || old.data != 0 || Self::is_covered(ctx, candidate) {
                continue;
            }
            let grown = BlockState::new(state.material, 0);
            tracing::trace!(from = ?pos, to = ?candidate, "spread");
            ctx.set_state(candidate, grown.clone());
            ctx.schedule_physics(candidate, BlockChange::between(&old, &grown));
        }
    }

    fn place_sound(&self) -> SoundSpec {
        self.place_sound
    }
}
