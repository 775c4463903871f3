//! Block behavior engine for a voxel world server.
//!
//! Every material id maps to a [`BlockBehavior`] in a frozen
//! [`BehaviorRegistry`]. Placement runs as a transaction through
//! [`attempt_placement`]; the other player actions, random ticks and
//! redstone signals go through [`actions`]. Changes ripple to the 26
//! surrounding blocks through [`physics`].

pub mod actions;
pub mod behavior;
pub mod face;
pub mod kinds;
pub mod material;
pub mod physics;
pub mod placement;
pub mod pos;
pub mod registry;
pub mod sound;
pub mod world;

#[cfg(test)]
mod test_support;

pub use behavior::{
    Actor, BehaviorError, BlockBehavior, BlockContext, NoopBehavior, ScheduledPhysics,
};
pub use face::{BlockFace, resolve_facing};
pub use material::{BlockChange, BlockState, ItemStack, MaterialId, TileEntity};
pub use placement::{
    CommitDecision, CommitRequest, DefaultHooks, PlacementError, PlacementHooks, PlacementOutcome,
    attempt_placement,
};
pub use pos::{BlockPos, CHUNK_SIZE, ChunkPos, LocalPos};
pub use registry::{BehaviorRegistry, RegistryBuilder, RegistryError};
pub use sound::{SilentBackend, Sound, SoundBackend, SoundError, SoundSpec};
pub use world::{BlockAccess, MemoryWorld};
