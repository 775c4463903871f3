//! Entry points for everything except placement: interaction, left click,
//! destruction, random ticks and redstone signals. Each one resolves the
//! behavior of the block currently at the position and dispatches to it.

use glam::Vec3;
use rand::RngCore;

use crate::behavior::{Actor, BlockContext};
use crate::face::BlockFace;
use crate::material::{BlockState, ItemStack};
use crate::pos::BlockPos;

/// Right-click on the block at `pos`. Returns whether the block reacted.
pub fn interact(
    ctx: &mut BlockContext<'_>,
    actor: &mut dyn Actor,
    pos: BlockPos,
    face: BlockFace,
    click: Vec3,
) -> bool {
    let behavior = ctx.behavior_at(pos);
    behavior.block_interact(ctx, actor, pos, face, click)
}

/// Left-click on the block at `pos`.
pub fn left_click(
    ctx: &mut BlockContext<'_>,
    actor: &mut dyn Actor,
    pos: BlockPos,
    held: Option<&ItemStack>,
) {
    let behavior = ctx.behavior_at(pos);
    behavior.left_click_block(ctx, actor, pos, held);
}

/// Breaks the block at `pos` and returns what it drops.
///
/// Runs `block_destroy`, clears the cell, then `after_destroy` with the old
/// state. Drops are computed from the old state; an inventory-exempt actor
/// receives none. Destroying an empty cell does nothing.
pub fn destroy(
    ctx: &mut BlockContext<'_>,
    actor: &mut dyn Actor,
    pos: BlockPos,
    face: BlockFace,
    tool: Option<&ItemStack>,
) -> Vec<ItemStack> {
    let old = ctx.state(pos);
    if old.is_empty() {
        return Vec::new();
    }
    let behavior = ctx.registry().lookup(old.material);

    behavior.block_destroy(ctx, actor, pos, face);
    ctx.set_state(pos, BlockState::EMPTY);
    behavior.after_destroy(ctx, actor, pos, face, &old);

    tracing::debug!(actor = actor.name(), ?pos, material = old.material.0, "block destroyed");
    if actor.is_inventory_exempt() {
        Vec::new()
    } else {
        behavior.drops(&old, tool)
    }
}

/// Random tick for the block at `pos`; a no-op unless its material opted in.
pub fn random_tick(ctx: &mut BlockContext<'_>, pos: BlockPos, rng: &mut dyn RngCore) {
    let behavior = ctx.behavior_at(pos);
    if behavior.can_tick_randomly() {
        behavior.update_block(ctx, pos, rng);
    }
}

/// Delivers a scheduled pulse to the block at `pos`.
pub fn pulse(ctx: &mut BlockContext<'_>, pos: BlockPos) {
    let behavior = ctx.behavior_at(pos);
    behavior.receive_pulse(ctx, pos);
}

/// Tells the block at `pos` that redstone power around it changed.
pub fn redstone_update(ctx: &mut BlockContext<'_>, pos: BlockPos) {
    let behavior = ctx.behavior_at(pos);
    behavior.on_redstone_update(ctx, pos);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::behavior::BlockBehavior;
    use crate::kinds::{AttachedBlock, ContainerBlock, SimpleBlock, SpreadingBlock};
    use crate::material::{MaterialId, TileEntity};
    use crate::registry::{BehaviorRegistry, RegistryBuilder};
    use crate::sound::SilentBackend;
    use crate::test_support::TestActor;
    use crate::world::{BlockAccess, MemoryWorld};

    const STONE: MaterialId = MaterialId(1);
    const GRASS: MaterialId = MaterialId(2);
    const DIRT: MaterialId = MaterialId(3);
    const COBBLE: MaterialId = MaterialId(4);
    const TORCH: MaterialId = MaterialId(50);
    const CHEST: MaterialId = MaterialId(54);
    const LAMP: MaterialId = MaterialId(123);

    /// Counts pulses and redstone updates.
    #[derive(Default)]
    struct Lamp {
        pulses: Arc<AtomicUsize>,
        redstone: Arc<AtomicUsize>,
    }

    impl BlockBehavior for Lamp {
        fn receive_pulse(&self, _ctx: &mut BlockContext<'_>, _pos: BlockPos) {
            self.pulses.fetch_add(1, Ordering::Relaxed);
        }

        fn on_redstone_update(&self, _ctx: &mut BlockContext<'_>, _pos: BlockPos) {
            self.redstone.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn registry() -> BehaviorRegistry {
        let mut builder = RegistryBuilder::new();
        builder
            .register(
                STONE,
                "stone",
                SimpleBlock::new().with_drops(vec![ItemStack::new(COBBLE, 1)]),
            )
            .unwrap()
            .register(GRASS, "grass", SpreadingBlock::new(DIRT))
            .unwrap()
            .register(DIRT, "dirt", SimpleBlock::new())
            .unwrap()
            .register(TORCH, "torch", AttachedBlock::new())
            .unwrap()
            .register(CHEST, "chest", ContainerBlock::default())
            .unwrap();
        builder.build()
    }

    #[test]
    fn test_destroy_clears_and_drops() {
        let registry = registry();
        let mut world = MemoryWorld::new(256);
        let pos = BlockPos::new(3, 10, 3);
        world.set_state(pos, BlockState::new(STONE, 0));

        let mut sounds = SilentBackend;
        let mut ctx = BlockContext::new(&mut world, &registry, &mut sounds);
        let mut actor = TestActor::looking(0.0, 0.0);
        let drops = destroy(&mut ctx, &mut actor, pos, BlockFace::Up, None);

        assert_eq!(drops, vec![ItemStack::new(COBBLE, 1)]);
        assert!(ctx.state(pos).is_empty());
    }

    #[test]
    fn test_destroy_by_exempt_actor_drops_nothing() {
        let registry = registry();
        let mut world = MemoryWorld::new(256);
        let pos = BlockPos::new(0, 0, 0);
        world.set_state(pos, BlockState::new(STONE, 0));

        let mut sounds = SilentBackend;
        let mut ctx = BlockContext::new(&mut world, &registry, &mut sounds);
        let mut actor = TestActor::looking(0.0, 0.0);
        actor.creative = true;
        assert!(destroy(&mut ctx, &mut actor, pos, BlockFace::Up, None).is_empty());
        assert!(ctx.state(pos).is_empty());
    }

    #[test]
    fn test_destroy_empty_cell_is_noop() {
        let registry = registry();
        let mut world = MemoryWorld::new(256);
        let mut sounds = SilentBackend;
        {
            let mut ctx = BlockContext::new(&mut world, &registry, &mut sounds);
            let mut actor = TestActor::looking(0.0, 0.0);
            let drops = destroy(&mut ctx, &mut actor, BlockPos::new(0, 0, 0), BlockFace::Up, None);
            assert!(drops.is_empty());
        }
        assert_eq!(world.write_count(), 0);
    }

    #[test]
    fn test_destroy_breaks_attached_neighbor() {
        let registry = registry();
        let mut world = MemoryWorld::new(256);
        let floor = BlockPos::new(0, 0, 0);
        let torch = BlockPos::new(0, 1, 0);
        world.set_state(floor, BlockState::new(STONE, 0));
        world.set_state(torch, BlockState::new(TORCH, BlockFace::Up.to_data()));

        let mut sounds = SilentBackend;
        let mut ctx = BlockContext::new(&mut world, &registry, &mut sounds);
        let mut actor = TestActor::looking(0.0, 0.0);
        destroy(&mut ctx, &mut actor, floor, BlockFace::Up, None);

        assert!(ctx.state(torch).is_empty());
        assert_eq!(ctx.take_scheduled().len(), 1);
    }

    #[test]
    fn test_destroyed_container_drops_contents() {
        let registry = registry();
        let mut world = MemoryWorld::new(256);
        let pos = BlockPos::new(0, 0, 0);
        let mut inventory = TileEntity::new("container", pos.chunk(), pos.local(), 27);
        inventory.slots[0] = Some(ItemStack::new(DIRT, 5));
        world.set_state(
            pos,
            BlockState {
                tile_entity: Some(Arc::new(inventory)),
                ..BlockState::new(CHEST, 0)
            },
        );

        let mut sounds = SilentBackend;
        let mut ctx = BlockContext::new(&mut world, &registry, &mut sounds);
        let mut actor = TestActor::looking(0.0, 0.0);
        let drops = destroy(&mut ctx, &mut actor, pos, BlockFace::Up, None);
        assert_eq!(drops, vec![ItemStack::new(CHEST, 1), ItemStack::new(DIRT, 5)]);
        assert_eq!(ctx.state(pos), BlockState::EMPTY);
    }

    #[test]
    fn test_interact_dispatches_by_material() {
        let registry = registry();
        let mut world = MemoryWorld::new(256);
        let stone = BlockPos::new(0, 0, 0);
        world.set_state(stone, BlockState::new(STONE, 0));

        let mut sounds = SilentBackend;
        let mut ctx = BlockContext::new(&mut world, &registry, &mut sounds);
        let mut actor = TestActor::looking(0.0, 0.0);
        assert!(!interact(&mut ctx, &mut actor, stone, BlockFace::Up, Vec3::ZERO));
        left_click(&mut ctx, &mut actor, stone, None);
        assert_eq!(ctx.state(stone), BlockState::new(STONE, 0));
    }

    #[test]
    fn test_random_tick_respects_opt_in() {
        let registry = registry();
        let mut world = MemoryWorld::new(256);
        let grass = BlockPos::new(0, 0, 0);
        let dirt = BlockPos::new(5, 0, 5);
        world.set_state(grass, BlockState::new(GRASS, 0));
        world.set_state(BlockPos::new(0, 1, 0), BlockState::new(STONE, 0));
        world.set_state(dirt, BlockState::new(DIRT, 0));
        world.set_state(BlockPos::new(5, 1, 5), BlockState::new(STONE, 0));

        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut sounds = SilentBackend;
        let mut ctx = BlockContext::new(&mut world, &registry, &mut sounds);
        random_tick(&mut ctx, grass, &mut rng);
        random_tick(&mut ctx, dirt, &mut rng);

        // Smothered grass decays; plain dirt ignores the tick.
        assert_eq!(ctx.state(grass).material, DIRT);
        assert_eq!(ctx.state(dirt).material, DIRT);
        assert_eq!(ctx.scheduled().len(), 1);
    }

    #[test]
    fn test_pulse_and_redstone_dispatch() {
        let lamp = Lamp::default();
        let pulses = lamp.pulses.clone();
        let redstone = lamp.redstone.clone();
        let mut builder = RegistryBuilder::new();
        builder.register(LAMP, "lamp", lamp).unwrap();
        let registry = builder.build();

        let mut world = MemoryWorld::new(256);
        let pos = BlockPos::new(0, 0, 0);
        world.set_state(pos, BlockState::new(LAMP, 0));
        let mut sounds = SilentBackend;
        let mut ctx = BlockContext::new(&mut world, &registry, &mut sounds);

        pulse(&mut ctx, pos);
        pulse(&mut ctx, pos);
        redstone_update(&mut ctx, pos);
        // Empty cells fall back to the no-op behavior.
        pulse(&mut ctx, BlockPos::new(9, 9, 9));

        assert_eq!(pulses.load(Ordering::Relaxed), 2);
        assert_eq!(redstone.load(Ordering::Relaxed), 1);
    }
}
