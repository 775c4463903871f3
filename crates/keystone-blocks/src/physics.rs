//! Neighbor notification after a block's material or data changed.
//!
//! One call is one pass over the 26 surrounding cells. Reactions that change
//! further blocks queue those changes with
//! [`BlockContext::schedule_physics`]; the per-tick driver feeds them back in
//! through [`run_scheduled`], so a collapsing column never grows the stack.

use crate::behavior::{BlockContext, ScheduledPhysics};
use crate::face::{BlockFace, NEIGHBORHOOD};
use crate::material::BlockChange;
use crate::pos::BlockPos;

/// Runs [`on_near_block_changed`](crate::BlockBehavior::on_near_block_changed)
/// on the behavior of every cell in the 3×3×3 cube around `pos`.
pub fn notify_neighbors(ctx: &mut BlockContext<'_>, pos: BlockPos, change: BlockChange) {
    let registry = ctx.registry();
    for delta in NEIGHBORHOOD {
        let neighbor = pos.offset(delta);
        let toward_changed = BlockFace::from_offset(-delta);
        let material = ctx.state(neighbor).material;
        registry
            .lookup(material)
            .on_near_block_changed(ctx, neighbor, toward_changed, pos, change);
    }
}

/// Processes up to `budget` queued notifications, oldest first, and returns
/// how many ran. Notifications queued while draining join the back of the
/// queue and wait for a later call once the budget is spent.
pub fn run_scheduled(
    ctx: &mut BlockContext<'_>,
    queue: &mut std::collections::VecDeque<ScheduledPhysics>,
    budget: usize,
) -> usize {
    let mut ran = 0;
    while ran < budget {
        let Some(next) = queue.pop_front() else {
            break;
        };
        notify_neighbors(ctx, next.pos, next.change);
        queue.extend(ctx.take_scheduled());
        ran += 1;
    }
    ran
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::behavior::BlockBehavior;
    use crate::material::{BlockState, MaterialId};
    use crate::registry::RegistryBuilder;
    use crate::sound::SilentBackend;
    use crate::world::{BlockAccess, MemoryWorld};

    const PROBE: MaterialId = MaterialId(100);
    const SAND: MaterialId = MaterialId(12);

    type Seen = Arc<Mutex<Vec<(BlockPos, Option<BlockFace>, BlockPos, BlockChange)>>>;

    struct Probe(Seen);

    impl BlockBehavior for Probe {
        fn on_near_block_changed(
            &self,
            _ctx: &mut BlockContext<'_>,
            pos: BlockPos,
            face: Option<BlockFace>,
            changed: BlockPos,
            change: BlockChange,
        ) {
            self.0.lock().unwrap().push((pos, face, changed, change));
        }
    }

    /// Sand that falls one cell when the block beneath it empties.
    struct Falling;

    impl BlockBehavior for Falling {
        fn on_near_block_changed(
            &self,
            ctx: &mut BlockContext<'_>,
            pos: BlockPos,
            face: Option<BlockFace>,
            _changed: BlockPos,
            change: BlockChange,
        ) {
            if face != Some(BlockFace::Down) || !change.new_material.is_empty() {
                return;
            }
            let old = ctx.state(pos);
            let below = pos.relative(BlockFace::Down);
            ctx.set_state(below, old.clone());
            ctx.set_state(pos, BlockState::EMPTY);
            ctx.schedule_physics(pos, BlockChange::between(&old, &BlockState::EMPTY));
        }
    }

    fn fill_around(world: &mut MemoryWorld, center: BlockPos, material: MaterialId) {
        for delta in NEIGHBORHOOD {
            world.set_state(center.offset(delta), BlockState::new(material, 0));
        }
    }

    #[test]
    fn test_all_26_neighbors_notified() {
        let seen: Seen = Arc::default();
        let mut builder = RegistryBuilder::new();
        builder.register(PROBE, "probe", Probe(seen.clone())).unwrap();
        let registry = builder.build();

        let center = BlockPos::new(1, 0, 0);
        let mut world = MemoryWorld::new(256);
        fill_around(&mut world, center, PROBE);
        let mut sounds = SilentBackend;
        let mut ctx = BlockContext::new(&mut world, &registry, &mut sounds);

        let placed = BlockState::new(MaterialId(5), 0);
        let change = BlockChange::between(&BlockState::EMPTY, &placed);
        notify_neighbors(&mut ctx, center, change);

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 26);
        assert!(
            seen.iter()
                .all(|(_, _, changed, c)| *changed == center && *c == change)
        );
        let face_adjacent = seen.iter().filter(|(_, face, _, _)| face.is_some()).count();
        assert_eq!(face_adjacent, 6);
    }

    #[test]
    fn test_face_points_toward_changed_block() {
        let seen: Seen = Arc::default();
        let mut builder = RegistryBuilder::new();
        builder.register(PROBE, "probe", Probe(seen.clone())).unwrap();
        let registry = builder.build();

        let center = BlockPos::new(0, 5, 0);
        let above = center.relative(BlockFace::Up);
        let mut world = MemoryWorld::new(256);
        world.set_state(above, BlockState::new(PROBE, 0));
        let mut sounds = SilentBackend;
        let mut ctx = BlockContext::new(&mut world, &registry, &mut sounds);

        let noop = BlockChange::between(&BlockState::EMPTY, &BlockState::EMPTY);
        notify_neighbors(&mut ctx, center, noop);

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, above);
        assert_eq!(seen[0].1, Some(BlockFace::Down));
    }

    #[test]
    fn test_propagation_does_not_recurse() {
        let mut builder = RegistryBuilder::new();
        builder.register(SAND, "sand", Falling).unwrap();
        let registry = builder.build();

        let mut world = MemoryWorld::new(256);
        for y in 1..=3 {
            world.set_state(BlockPos::new(0, y, 0), BlockState::new(SAND, 0));
        }
        let mut sounds = SilentBackend;
        let mut ctx = BlockContext::new(&mut world, &registry, &mut sounds);

        // The floor at y=0 vanished; only the sand directly above reacts this pass.
        let removed = BlockChange::between(&BlockState::new(MaterialId(1), 0), &BlockState::EMPTY);
        notify_neighbors(&mut ctx, BlockPos::new(0, 0, 0), removed);

        assert_eq!(ctx.state(BlockPos::new(0, 0, 0)).material, SAND);
        assert!(ctx.state(BlockPos::new(0, 1, 0)).is_empty());
        assert_eq!(ctx.state(BlockPos::new(0, 2, 0)).material, SAND);
        assert_eq!(ctx.scheduled().len(), 1);
    }

    #[test]
    fn test_run_scheduled_respects_budget() {
        let mut builder = RegistryBuilder::new();
        builder.register(SAND, "sand", Falling).unwrap();
        let registry = builder.build();

        let mut world = MemoryWorld::new(256);
        for y in 1..=3 {
            world.set_state(BlockPos::new(0, y, 0), BlockState::new(SAND, 0));
        }
        let mut sounds = SilentBackend;
        let mut ctx = BlockContext::new(&mut world, &registry, &mut sounds);

        let removed = BlockChange::between(&BlockState::new(MaterialId(1), 0), &BlockState::EMPTY);
        notify_neighbors(&mut ctx, BlockPos::new(0, 0, 0), removed);
        let mut queue: VecDeque<_> = ctx.take_scheduled().into();

        assert_eq!(run_scheduled(&mut ctx, &mut queue, 1), 1);
        assert_eq!(queue.len(), 1);
        assert_eq!(run_scheduled(&mut ctx, &mut queue, 10), 2);
        assert!(queue.is_empty());

        // The column settled one cell lower.
        for y in 0..=2 {
            assert_eq!(ctx.state(BlockPos::new(0, y, 0)).material, SAND, "y={y}");
        }
        assert!(ctx.state(BlockPos::new(0, 3, 0)).is_empty());
    }

    #[test]
    fn test_world_untouched_by_notification_alone() {
        let registry = RegistryBuilder::new().build();
        let mut world = MemoryWorld::new(256);
        world.set_state(BlockPos::new(0, 0, 1), BlockState::new(MaterialId(1), 0));
        let writes = world.write_count();
        {
            let mut sounds = SilentBackend;
            let mut ctx = BlockContext::new(&mut world, &registry, &mut sounds);
            let noop = BlockChange::between(&BlockState::EMPTY, &BlockState::EMPTY);
            notify_neighbors(&mut ctx, BlockPos::new(0, 0, 0), noop);
        }
        assert_eq!(world.write_count(), writes);
    }
}
