use glam::Vec3;

use crate::behavior::{Actor, BehaviorError, BlockBehavior, BlockContext, warn_malformed_data};
use crate::face::BlockFace;
use crate::material::{BlockState, ItemStack};
use crate::sound::SoundSpec;

/// A block whose front faces back toward whoever placed it (furnaces,
/// pistons, pumpkins). The front face is stored as the sub-data.
#[derive(Debug, Clone, Default)]
pub struct DirectionalBlock {
    vertical: bool,
    place_sound: SoundSpec,
}

impl DirectionalBlock {
    /// `vertical` allows the front to point up or down when the actor looks
    /// steeply enough.
    pub fn new(vertical: bool) -> Self {
        Self {
            vertical,
            place_sound: SoundSpec::default(),
        }
    }

    #[must_use]
    pub fn with_place_sound(mut self, place_sound: SoundSpec) -> Self {
        self.place_sound = place_sound;
        self
    }

    /// Decodes the front face of `state`, handing back the raw byte when it
    /// is not a face this block can point toward.
    pub fn decode_front(&self, state: &BlockState) -> Result<BlockFace, u8> {
        match BlockFace::from_data(state.data) {
            Some(face) if self.vertical || face.is_horizontal() => Ok(face),
            _ => Err(state.data),
        }
    }

    /// Front face for rendering and logic. Unknown values are logged and read
    /// as north.
    pub fn front(&self, state: &BlockState) -> BlockFace {
        self.decode_front(state).unwrap_or_else(|raw| {
            warn_malformed_data(state.material, "directional", "a face index", raw);
            BlockFace::North
        })
    }
}

impl BlockBehavior for DirectionalBlock {
    fn place_block(
        &self,
        _ctx: &BlockContext<'_>,
        actor: &dyn Actor,
        state: &mut BlockState,
        _face: BlockFace,
        held: &ItemStack,
        _click: Vec3,
    ) -> Result<(), BehaviorError> {
        state.material = held.material;
        state.data = actor.facing(self.vertical).opposite().to_data();
        Ok(())
    }

    fn drops(&self, state: &BlockState, _tool: Option<&ItemStack>) -> Vec<ItemStack> {
        vec![ItemStack::new(state.material, 1)]
    }

    fn place_sound(&self) -> SoundSpec {
        self.place_sound
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::MaterialId;
    use crate::registry::RegistryBuilder;
    use crate::sound::SilentBackend;
    use crate::test_support::TestActor;
    use crate::world::MemoryWorld;

    const FURNACE: MaterialId = MaterialId(61);

    fn place(block: &DirectionalBlock, actor: &TestActor) -> BlockState {
        let registry = RegistryBuilder::new().build();
        let mut world = MemoryWorld::new(256);
        let mut sounds = SilentBackend;
        let ctx = BlockContext::new(&mut world, &registry, &mut sounds);
        let mut state = BlockState::EMPTY;
        block
            .place_block(
                &ctx,
                actor,
                &mut state,
                BlockFace::Up,
                &ItemStack::new(FURNACE, 1),
                Vec3::ZERO,
            )
            .unwrap();
        state
    }

    #[test]
    fn test_front_faces_the_actor() {
        let block = DirectionalBlock::new(false);
        // Looking east, so the front points west.
        let state = place(&block, &TestActor::looking(90.0, 0.0));
        assert_eq!(state.material, FURNACE);
        assert_eq!(block.front(&state), BlockFace::West);

        let state = place(&block, &TestActor::looking(0.0, 0.0));
        assert_eq!(block.front(&state), BlockFace::South);
    }

    #[test]
    fn test_vertical_only_when_allowed() {
        let steep = TestActor::looking(90.0, -80.0);
        let flat = DirectionalBlock::new(false);
        assert_eq!(flat.front(&place(&flat, &steep)), BlockFace::West);

        let piston = DirectionalBlock::new(true);
        assert_eq!(piston.front(&place(&piston, &steep)), BlockFace::Up);
    }

    #[test]
    fn test_malformed_data_reads_north() {
        let block = DirectionalBlock::new(false);
        assert_eq!(block.front(&BlockState::new(FURNACE, 9)), BlockFace::North);
        assert_eq!(block.front(&BlockState::new(FURNACE, 1)), BlockFace::North);
    }

    #[test]
    fn test_decode_front_keeps_raw_byte() {
        let block = DirectionalBlock::new(false);
        assert_eq!(block.decode_front(&BlockState::new(FURNACE, 9)), Err(9));
        assert_eq!(
            block.decode_front(&BlockState::new(FURNACE, BlockFace::East.to_data())),
            Ok(BlockFace::East)
        );
    }

    #[test]
    fn test_drops_plain_item() {
        let block = DirectionalBlock::new(false);
        assert_eq!(
            block.drops(&BlockState::new(FURNACE, 5), None),
            vec![ItemStack::new(FURNACE, 1)]
        );
    }
}
