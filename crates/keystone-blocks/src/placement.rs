//! A single block-placement attempt, from the clicked face to committed state.
//!
//! The attempt walks a fixed sequence of stages. Stages up to build approval
//! can only abort (nothing has been written yet). Once the working copy is
//! committed, a denied commit approval restores the snapshot verbatim. Side
//! effects (sound, `after_place`, stack decrement) run only for an approved
//! commit.

use std::sync::Arc;

use glam::Vec3;
use thiserror::Error;

use crate::behavior::{Actor, BehaviorError, BlockBehavior, BlockContext};
use crate::face::BlockFace;
use crate::material::{BlockState, ItemStack, MaterialId};
use crate::pos::BlockPos;

/// Everything the commit-approval hook gets to inspect.
pub struct CommitRequest<'a> {
    /// The block that was written.
    pub target: BlockPos,
    /// The block the actor clicked.
    pub against: BlockPos,
    pub old_state: &'a BlockState,
    pub new_state: &'a BlockState,
    pub actor: &'a dyn Actor,
    pub held: &'a ItemStack,
    /// Result of the placing material's own `can_place_at`.
    pub locally_approved: bool,
}

/// Verdict of the commit-approval hook.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommitDecision {
    pub approved: bool,
}

impl CommitDecision {
    pub const APPROVE: CommitDecision = CommitDecision { approved: true };
    pub const DENY: CommitDecision = CommitDecision { approved: false };
}

/// External veto points consulted during a placement.
pub trait PlacementHooks {
    /// May veto before anything is written. `local_result` is the placing
    /// material's own verdict, which the hook is free to overrule.
    fn approve_build(&mut self, target: BlockPos, proposed: MaterialId, local_result: bool) -> bool;

    /// May cancel after the new state was written; a denial rolls it back.
    fn approve_commit(&mut self, request: &CommitRequest<'_>) -> CommitDecision;
}

/// Hooks with no opinion: both stages echo the local verdict.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultHooks;

impl PlacementHooks for DefaultHooks {
    fn approve_build(
        &mut self,
        _target: BlockPos,
        _proposed: MaterialId,
        local_result: bool,
    ) -> bool {
        local_result
    }

    fn approve_commit(&mut self, request: &CommitRequest<'_>) -> CommitDecision {
        CommitDecision {
            approved: request.locally_approved,
        }
    }
}

/// Why a placement did not commit. `Display` is the notice shown to the actor.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlacementError {
    #[error("The height limit for this world is {max_height} blocks")]
    HeightLimit { max_height: i32 },
    #[error("the target block cannot be replaced")]
    NotOverridable,
    #[error("building here was denied")]
    BuildDenied,
    #[error("the placement was cancelled")]
    CommitDenied,
    #[error("placement failed: {0}")]
    PlaceFault(#[from] BehaviorError),
}

/// Terminal result of [`attempt_placement`].
#[derive(Debug, PartialEq, Eq)]
pub enum PlacementOutcome {
    /// Stopped before any write; the world is untouched.
    Aborted(PlacementError),
    /// The target was restored to its snapshot; no side effects ran.
    RolledBack(PlacementError),
    /// The block at `target` was placed and all side effects ran.
    Committed { target: BlockPos },
}

impl PlacementOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, PlacementOutcome::Committed { .. })
    }

    /// The rejection reason, if the attempt did not commit.
    pub fn error(&self) -> Option<&PlacementError> {
        match self {
            PlacementOutcome::Aborted(err) | PlacementOutcome::RolledBack(err) => Some(err),
            PlacementOutcome::Committed { .. } => None,
        }
    }
}

/// Places the block for `held` against the `face` of `against`.
///
/// The placing behavior is the one registered for the held item's material.
pub fn attempt_placement(
    ctx: &mut BlockContext<'_>,
    hooks: &mut dyn PlacementHooks,
    actor: &mut dyn Actor,
    against: BlockPos,
    face: BlockFace,
    held: &mut ItemStack,
    click: Vec3,
) -> PlacementOutcome {
    PlacementTransaction::new(actor, against, face, held, click).run(ctx, hooks)
}

/// State of one placement attempt. Lives exactly as long as the attempt.
pub struct PlacementTransaction<'t> {
    actor: &'t mut dyn Actor,
    against: BlockPos,
    face: BlockFace,
    held: &'t mut ItemStack,
    click: Vec3,
    target: BlockPos,
    absorbed: bool,
    locally_approved: bool,
}

impl<'t> PlacementTransaction<'t> {
    pub fn new(
        actor: &'t mut dyn Actor,
        against: BlockPos,
        face: BlockFace,
        held: &'t mut ItemStack,
        click: Vec3,
    ) -> Self {
        Self {
            actor,
            against,
            face,
            held,
            click,
            target: against.relative(face),
            absorbed: false,
            locally_approved: false,
        }
    }

    /// Drives the attempt to one of the three terminal outcomes.
    pub fn run(
        mut self,
        ctx: &mut BlockContext<'_>,
        hooks: &mut dyn PlacementHooks,
    ) -> PlacementOutcome {
        let _span = tracing::debug_span!(
            "placement",
            actor = self.actor.name(),
            material = self.held.material.0,
            against = ?self.against,
            face = ?self.face,
        )
        .entered();

        let placing = ctx.registry().lookup(self.held.material);
        self.target = ctx.world().neighbor(self.against, self.face);

        if let Err(err) = self.check_height(ctx) {
            self.actor.notify(&err.to_string());
            tracing::debug!(target_pos = ?self.target, "aborted: height limit");
            return PlacementOutcome::Aborted(err);
        }
        if let Err(err) = self.resolve_absorb_or_override(ctx) {
            tracing::debug!(target_pos = ?self.target, "aborted: target not overridable");
            return PlacementOutcome::Aborted(err);
        }
        if let Err(err) = self.approve_build(ctx, hooks, placing) {
            tracing::debug!(target_pos = ?self.target, "aborted: build denied");
            return PlacementOutcome::Aborted(err);
        }

        let old_state = ctx.state(self.target);
        let new_state = match self.compute(ctx, placing, &old_state) {
            Ok(state) => state,
            Err(err) => {
                // Nothing was written, so the world already equals the snapshot.
                tracing::warn!(
                    target_pos = ?self.target,
                    error = %err,
                    "place_block failed, rolled back"
                );
                return PlacementOutcome::RolledBack(err.into());
            }
        };
        ctx.set_state(self.target, new_state.clone());

        let decision = hooks.approve_commit(&CommitRequest {
            target: self.target,
            against: self.against,
            old_state: &old_state,
            new_state: &new_state,
            actor: &*self.actor,
            held: &*self.held,
            locally_approved: self.locally_approved,
        });
        if !decision.approved {
            ctx.set_state(self.target, old_state);
            tracing::debug!(target_pos = ?self.target, "rolled back: commit denied");
            return PlacementOutcome::RolledBack(PlacementError::CommitDenied);
        }

        ctx.play_sound(placing.place_sound(), self.target);
        placing.after_place(ctx, &mut *self.actor, self.target, &*self.held, &old_state);
        if !self.actor.is_inventory_exempt() {
            let remaining = self.held.amount().saturating_sub(1);
            self.held.set_amount(remaining);
        }

        tracing::debug!(target_pos = ?self.target, absorbed = self.absorbed, "committed");
        PlacementOutcome::Committed {
            target: self.target,
        }
    }

    fn check_height(&self, ctx: &BlockContext<'_>) -> Result<(), PlacementError> {
        let max_height = ctx.max_height();
        if self.target.y >= max_height {
            return Err(PlacementError::HeightLimit { max_height });
        }
        Ok(())
    }

    /// Redirects into the clicked block if it absorbs the placement; otherwise
    /// a non-empty target must agree to be overridden.
    fn resolve_absorb_or_override(&mut self, ctx: &BlockContext<'_>) -> Result<(), PlacementError> {
        let against_behavior = ctx.behavior_at(self.against);
        if against_behavior.can_absorb(ctx, self.against, self.face, &*self.held) {
            self.target = self.against;
            self.absorbed = true;
            return Ok(());
        }

        if !ctx.state(self.target).is_empty() {
            let target_behavior = ctx.behavior_at(self.target);
            if !target_behavior.can_override(ctx, self.target, self.face, &*self.held) {
                return Err(PlacementError::NotOverridable);
            }
        }
        Ok(())
    }

    fn approve_build(
        &mut self,
        ctx: &BlockContext<'_>,
        hooks: &mut dyn PlacementHooks,
        placing: &dyn BlockBehavior,
    ) -> Result<(), PlacementError> {
        self.locally_approved = placing.can_place_at(ctx, self.target, self.face);
        if !hooks.approve_build(self.target, self.held.material, self.locally_approved) {
            return Err(PlacementError::BuildDenied);
        }
        Ok(())
    }

    /// Runs `place_block` on a working copy of `old_state`. A material change
    /// gets the new material's tile entity (or none).
    fn compute(
        &self,
        ctx: &BlockContext<'_>,
        placing: &dyn BlockBehavior,
        old_state: &BlockState,
    ) -> Result<BlockState, BehaviorError> {
        let mut working = old_state.clone();
        placing.place_block(
            ctx,
            &*self.actor,
            &mut working,
            self.face,
            &*self.held,
            self.click,
        )?;

        if working.material != old_state.material {
            working.tile_entity = ctx
                .registry()
                .lookup(working.material)
                .create_tile_entity(self.target.chunk(), self.target.local())
                .map(Arc::new);
        }
        Ok(working)
    }
}
