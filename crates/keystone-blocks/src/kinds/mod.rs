//! Stock material families. Each one overrides a different group of
//! [`BlockBehavior`](crate::BlockBehavior) hooks.

mod attached;
mod container;
mod directional;
mod fence;
mod liquid;
mod simple;
mod slab;
mod spreading;

pub use attached::AttachedBlock;
pub use container::ContainerBlock;
pub use directional::DirectionalBlock;
pub use fence::FenceBlock;
pub use liquid::LiquidBlock;
pub use simple::SimpleBlock;
pub use slab::SlabBlock;
pub use spreading::SpreadingBlock;
