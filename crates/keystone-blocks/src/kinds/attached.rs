use glam::Vec3;

use crate::behavior::{Actor, BehaviorError, BlockBehavior, BlockContext, warn_malformed_data};
use crate::face::BlockFace;
use crate::material::{BlockChange, BlockState, ItemStack};
use crate::pos::BlockPos;
use crate::sound::SoundSpec;

/// A block mounted on the side or top of another (torches, buttons).
///
/// The sub-data is the face of the supporting block it hangs on. When the
/// support disappears the block breaks and clears its cell.
#[derive(Debug, Clone, Default)]
pub struct AttachedBlock {
    place_sound: SoundSpec,
}

impl AttachedBlock {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_place_sound(mut self, place_sound: SoundSpec) -> Self {
        self.place_sound = place_sound;
        self
    }

    /// Decodes the mounting face, or returns the raw byte if it is not one.
    pub fn decode_attached_face(&self, state: &BlockState) -> Result<BlockFace, u8> {
        match BlockFace::from_data(state.data) {
            Some(face) if face != BlockFace::Down => Ok(face),
            _ => Err(state.data),
        }
    }

    /// The face of the support this block is mounted on. Unknown values are
    /// logged and read as mounted on top of the block below.
    pub fn attached_face(&self, state: &BlockState) -> BlockFace {
        self.decode_attached_face(state).unwrap_or_else(|raw| {
            warn_malformed_data(state.material, "attached", "a face other than down", raw);
            BlockFace::Up
        })
    }

    /// Position of the supporting block.
    pub fn support(&self, pos: BlockPos, state: &BlockState) -> BlockPos {
        pos.relative(self.attached_face(state).opposite())
    }
}

impl BlockBehavior for AttachedBlock {
    fn can_place_at(&self, ctx: &BlockContext<'_>, pos: BlockPos, against: BlockFace) -> bool {
        if against == BlockFace::Down {
            return false;
        }
        let support = pos.relative(against.opposite());
        !ctx.state(support).is_empty() && !ctx.is_liquid(support)
    }

    fn place_block(
        &self,
        _ctx: &BlockContext<'_>,
        _actor: &dyn Actor,
        state: &mut BlockState,
        face: BlockFace,
        held: &ItemStack,
        _click: Vec3,
    ) -> Result<(), BehaviorError> {
        state.material = held.material;
        state.data = face.to_data();
        Ok(())
    }

    fn drops(&self, state: &BlockState, _tool: Option<&ItemStack>) -> Vec<ItemStack> {
        vec![ItemStack::new(state.material, 1)]
    }

    fn on_near_block_changed(
        &self,
        ctx: &mut BlockContext<'_>,
        pos: BlockPos,
        _face: Option<BlockFace>,
        changed: BlockPos,
        change: BlockChange,
    ) {
        let state = ctx.state(pos);
        if changed != self.support(pos, &state) || !change.new_material.is_empty() {
            return;
        }
        tracing::debug!(?pos, material = state.material.0, "support removed, breaking");
        ctx.set_state(pos, BlockState::EMPTY);
        ctx.schedule_physics(pos, BlockChange::between(&state, &BlockState::EMPTY));
    }

    fn place_sound(&self) -> SoundSpec {
        self.place_sound
    }
}
