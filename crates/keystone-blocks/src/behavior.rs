//! The per-material behavior contract and the context every hook runs in.
//!
//! One [`BlockBehavior`] instance serves every block of its material across
//! all regions at once, so implementations hold only configuration fixed at
//! construction. Anything that varies per call (the world, the actor, a
//! random source) arrives as an argument.

use glam::Vec3;
use rand::RngCore;
use thiserror::Error;

use crate::face::{BlockFace, resolve_facing};
use crate::material::{BlockChange, BlockState, ItemStack, MaterialId, TileEntity};
use crate::physics;
use crate::pos::{BlockPos, ChunkPos, LocalPos};
use crate::registry::BehaviorRegistry;
use crate::sound::{SoundBackend, SoundSpec, play_effect};
use crate::world::BlockAccess;

/// Failure raised by [`BlockBehavior::place_block`] before anything is committed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BehaviorError {
    /// A behavior-specific fault, described for the log.
    #[error("{0}")]
    Fault(String),
}

/// The player (or other agent) driving an interaction.
pub trait Actor {
    /// Display name, used in log output.
    fn name(&self) -> &str;

    /// Sends a user-visible notice.
    fn notify(&mut self, message: &str);

    /// Whether placements leave the held stack untouched (creative mode).
    fn is_inventory_exempt(&self) -> bool;

    /// Look angles in degrees as `(yaw, pitch)`.
    fn orientation(&self) -> (f32, f32);

    /// The face the actor is looking toward.
    fn facing(&self, vertical_allowed: bool) -> BlockFace {
        let (yaw, pitch) = self.orientation();
        resolve_facing(yaw, pitch, vertical_allowed)
    }
}

/// A physics change queued for the external per-tick driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduledPhysics {
    pub pos: BlockPos,
    pub change: BlockChange,
}

/// Everything a behavior hook may touch: the world, the registry and the
/// sound backend, plus the queue of cascading changes handed back to the
/// caller.
pub struct BlockContext<'a> {
    world: &'a mut dyn BlockAccess,
    registry: &'a BehaviorRegistry,
    sounds: &'a mut dyn SoundBackend,
    scheduled: Vec<ScheduledPhysics>,
}

impl<'a> BlockContext<'a> {
    pub fn new(
        world: &'a mut dyn BlockAccess,
        registry: &'a BehaviorRegistry,
        sounds: &'a mut dyn SoundBackend,
    ) -> Self {
        Self {
            world,
            registry,
            sounds,
            scheduled: Vec::new(),
        }
    }

    pub fn registry(&self) -> &'a BehaviorRegistry {
        self.registry
    }

    pub fn world(&self) -> &dyn BlockAccess {
        &*self.world
    }

    /// Behavior of the block currently at `pos`.
    pub fn behavior_at(&self, pos: BlockPos) -> &'a dyn BlockBehavior {
        self.registry.lookup(self.world.state(pos).material)
    }

    pub fn state(&self, pos: BlockPos) -> BlockState {
        self.world.state(pos)
    }

    pub fn is_liquid(&self, pos: BlockPos) -> bool {
        self.world.is_liquid(pos)
    }

    pub fn max_height(&self) -> i32 {
        self.world.max_height()
    }

    /// Writes `state` at `pos` and, if material or data changed, runs the new
    /// material's [`BlockBehavior::on_block_changed`].
    ///
    /// Neighbors are not notified; see [`physics::notify_neighbors`].
    pub fn set_state(&mut self, pos: BlockPos, state: BlockState) {
        let old = self.world.state(pos);
        let change = BlockChange::between(&old, &state);
        self.world.set_state(pos, state);
        if change.is_change() {
            let registry = self.registry;
            registry
                .lookup(change.new_material)
                .on_block_changed(self, pos, change);
        }
    }

    /// Plays `spec` centred on `pos`.
    pub fn play_sound(&mut self, spec: SoundSpec, pos: BlockPos) {
        play_effect(&mut *self.sounds, spec, pos);
    }

    /// Queues a neighbor notification for the per-tick driver instead of
    /// propagating it now.
    pub fn schedule_physics(&mut self, pos: BlockPos, change: BlockChange) {
        self.scheduled.push(ScheduledPhysics { pos, change });
    }

    /// Drains the queued notifications in the order they were scheduled.
    pub fn take_scheduled(&mut self) -> Vec<ScheduledPhysics> {
        std::mem::take(&mut self.scheduled)
    }

    pub fn scheduled(&self) -> &[ScheduledPhysics] {
        &self.scheduled
    }
}

/// Per-material placement, interaction, destruction and physics rules.
///
/// Every hook has a conservative default, so a material only overrides the
/// hooks it cares about.
pub trait BlockBehavior: Send + Sync {
    /// Fixed drop list replacing the default "drop itself" rule.
    fn drop_override(&self) -> Option<&[ItemStack]> {
        None
    }

    /// Items yielded when `state` is dug with `tool` (`None` for bare hands).
    fn drops(&self, state: &BlockState, tool: Option<&ItemStack>) -> Vec<ItemStack> {
        let _ = tool;
        match self.drop_override() {
            Some(drops) => drops.to_vec(),
            None => vec![ItemStack::new(state.material, 1).with_variant(u16::from(state.data))],
        }
    }

    /// Drops as if the block were mined without a tool (explosions, etc).
    fn mined_drops(&self, state: &BlockState) -> Vec<ItemStack> {
        self.drops(state, None)
    }

    /// Tile entity for a freshly placed block of this material.
    fn create_tile_entity(&self, chunk: ChunkPos, local: LocalPos) -> Option<TileEntity> {
        let _ = (chunk, local);
        None
    }

    /// Whether a block of this material may go at `pos`, placed against `against`.
    fn can_place_at(&self, ctx: &BlockContext<'_>, pos: BlockPos, against: BlockFace) -> bool {
        let _ = (ctx, pos, against);
        true
    }

    /// Computes the placed block into `state`, a working copy of the target.
    ///
    /// The default takes the held item's material and uses its variant as the
    /// sub-data.
    fn place_block(
        &self,
        ctx: &BlockContext<'_>,
        actor: &dyn Actor,
        state: &mut BlockState,
        face: BlockFace,
        held: &ItemStack,
        click: Vec3,
    ) -> Result<(), BehaviorError> {
        let _ = (ctx, actor, face, click);
        state.material = held.material;
        state.data = variant_to_data(held);
        Ok(())
    }

    /// Runs after a placement commits.
    fn after_place(
        &self,
        ctx: &mut BlockContext<'_>,
        actor: &mut dyn Actor,
        pos: BlockPos,
        held: &ItemStack,
        old: &BlockState,
    ) {
        let _ = (actor, held);
        let new = ctx.state(pos);
        physics::notify_neighbors(ctx, pos, BlockChange::between(old, &new));
    }

    /// Right-click on an existing block. Returns `true` if something happened.
    fn block_interact(
        &self,
        ctx: &mut BlockContext<'_>,
        actor: &mut dyn Actor,
        pos: BlockPos,
        face: BlockFace,
        click: Vec3,
    ) -> bool {
        let _ = (ctx, actor, pos, face, click);
        false
    }

    /// Left-click on an existing block.
    fn left_click_block(
        &self,
        ctx: &mut BlockContext<'_>,
        actor: &mut dyn Actor,
        pos: BlockPos,
        held: Option<&ItemStack>,
    ) {
        let _ = (ctx, actor, pos, held);
    }

    /// Runs before a block of this material is destroyed.
    fn block_destroy(
        &self,
        ctx: &mut BlockContext<'_>,
        actor: &mut dyn Actor,
        pos: BlockPos,
        face: BlockFace,
    ) {
        let _ = (ctx, actor, pos, face);
    }

    /// Runs after a block of this material was destroyed.
    fn after_destroy(
        &self,
        ctx: &mut BlockContext<'_>,
        actor: &mut dyn Actor,
        pos: BlockPos,
        face: BlockFace,
        old: &BlockState,
    ) {
        let _ = (actor, face);
        let new = ctx.state(pos);
        physics::notify_neighbors(ctx, pos, BlockChange::between(old, &new));
    }

    /// A previously requested pulse arrived.
    fn receive_pulse(&self, ctx: &mut BlockContext<'_>, pos: BlockPos) {
        let _ = (ctx, pos);
    }

    /// Redstone power around the block changed.
    fn on_redstone_update(&self, ctx: &mut BlockContext<'_>, pos: BlockPos) {
        let _ = (ctx, pos);
    }

    /// Whether a placement against this block goes into it instead of the
    /// adjacent cell.
    fn can_absorb(
        &self,
        ctx: &BlockContext<'_>,
        pos: BlockPos,
        face: BlockFace,
        held: &ItemStack,
    ) -> bool {
        let _ = (ctx, pos, face, held);
        false
    }

    /// Whether a placement may replace this block outright. Liquids can be
    /// replaced by default.
    fn can_override(
        &self,
        ctx: &BlockContext<'_>,
        pos: BlockPos,
        face: BlockFace,
        held: &ItemStack,
    ) -> bool {
        let _ = (face, held);
        ctx.is_liquid(pos)
    }

    /// A block in the surrounding 3×3×3 cube changed.
    ///
    /// `face` points from `pos` toward `changed` for the six face-adjacent
    /// cells and is `None` for edge and corner cells.
    fn on_near_block_changed(
        &self,
        ctx: &mut BlockContext<'_>,
        pos: BlockPos,
        face: Option<BlockFace>,
        changed: BlockPos,
        change: BlockChange,
    ) {
        let _ = (ctx, pos, face, changed, change);
    }

    /// This block's own material or data changed, whatever the cause.
    fn on_block_changed(&self, ctx: &mut BlockContext<'_>, pos: BlockPos, change: BlockChange) {
        let _ = (ctx, pos, change);
    }

    /// Recomputes material/data from the current surroundings.
    fn update_physics(&self, ctx: &mut BlockContext<'_>, pos: BlockPos) {
        let _ = (ctx, pos);
    }

    /// Opt-in for random ticks.
    fn can_tick_randomly(&self) -> bool {
        false
    }

    /// Random tick; `rng` is scoped to this call.
    fn update_block(&self, ctx: &mut BlockContext<'_>, pos: BlockPos, rng: &mut dyn RngCore) {
        let _ = (ctx, pos, rng);
    }

    /// Cue played after a successful placement.
    fn place_sound(&self) -> SoundSpec {
        SoundSpec::DEFAULT_PLACE
    }
}

/// The behavior of every unregistered material: all hooks keep their defaults.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopBehavior;

impl BlockBehavior for NoopBehavior {}

/// Narrows a held item's variant to block sub-data.
///
/// Variants above 255 are a malformed input: logged and truncated, matching
/// what the raw byte would hold.
pub fn variant_to_data(held: &ItemStack) -> u8 {
    match u8::try_from(held.variant) {
        Ok(data) => data,
        Err(_) => {
            tracing::warn!(
                material = held.material.0,
                variant = held.variant,
                "item variant does not fit block data, truncating"
            );
            (held.variant & 0xFF) as u8
        }
    }
}

/// Logs sub-data that a behavior could not decode; the caller carries on with
/// the raw value.
pub fn warn_malformed_data(material: MaterialId, kind: &str, expected: &str, data: u8) {
    tracing::warn!(
        material = material.0,
        kind,
        data,
        "wrong block data for {kind}: expected {expected}"
    );
}
