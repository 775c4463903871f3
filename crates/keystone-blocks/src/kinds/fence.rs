use crate::behavior::{Actor, BlockBehavior, BlockContext};
use crate::face::BlockFace;
use crate::material::{BlockChange, BlockState, ItemStack};
use crate::physics;
use crate::pos::BlockPos;
use crate::sound::SoundSpec;

/// A post that connects to solid horizontal neighbours.
///
/// The sub-data is a 4-bit mask, one bit per face of
/// [`BlockFace::HORIZONTAL`] in order.
#[derive(Debug, Clone, Default)]
pub struct FenceBlock {
    place_sound: SoundSpec,
}

impl FenceBlock {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_place_sound(mut self, place_sound: SoundSpec) -> Self {
        self.place_sound = place_sound;
        self
    }

    /// Connection mask for a fence at `pos` given its current surroundings.
    pub fn connection_mask(ctx: &BlockContext<'_>, pos: BlockPos) -> u8 {
        BlockFace::HORIZONTAL
            .iter()
            .enumerate()
            .filter(|(_, face)| {
                let neighbor = pos.relative(**face);
                !ctx.state(neighbor).is_empty() && !ctx.is_liquid(neighbor)
            })
            .fold(0, |mask, (bit, _)| mask | (1 << bit))
    }

    /// Rewrites the mask at `pos` if the surroundings changed it.
    fn refresh_mask(ctx: &mut BlockContext<'_>, pos: BlockPos) -> Option<BlockChange> {
        let old = ctx.state(pos);
        let mask = Self::connection_mask(ctx, pos);
        if old.data == mask {
            return None;
        }
        let new = BlockState {
            data: mask,
            ..old.clone()
        };
        ctx.set_state(pos, new.clone());
        Some(BlockChange::between(&old, &new))
    }

    /// Whether a fence with sub-data `data` connects toward `face`.
    pub fn connects(data: u8, face: BlockFace) -> bool {
        BlockFace::HORIZONTAL
            .iter()
            .position(|f| *f == face)
            .is_some_and(|bit| data & (1 << bit) != 0)
    }
}

impl BlockBehavior for FenceBlock {
    fn drops(&self, state: &BlockState, _tool: Option<&ItemStack>) -> Vec<ItemStack> {
        vec![ItemStack::new(state.material, 1)]
    }

    fn after_place(
        &self,
        ctx: &mut BlockContext<'_>,
        _actor: &mut dyn Actor,
        pos: BlockPos,
        _held: &ItemStack,
        old: &BlockState,
    ) {
        self.update_physics(ctx, pos);
        let new = ctx.state(pos);
        physics::notify_neighbors(ctx, pos, BlockChange::between(old, &new));
    }

    fn on_near_block_changed(
        &self,
        ctx: &mut BlockContext<'_>,
        pos: BlockPos,
        face: Option<BlockFace>,
        _changed: BlockPos,
        _change: BlockChange,
    ) {
        if !face.is_some_and(BlockFace::is_horizontal) {
            return;
        }
        if let Some(change) = Self::refresh_mask(ctx, pos) {
            ctx.schedule_physics(pos, change);
        }
    }

    fn update_physics(&self, ctx: &mut BlockContext<'_>, pos: BlockPos) {
        Self::refresh_mask(ctx, pos);
    }

    fn place_sound(&self) -> SoundSpec {
        self.place_sound
    }
}
