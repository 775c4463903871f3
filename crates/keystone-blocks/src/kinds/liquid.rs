use crate::behavior::BlockBehavior;
use crate::material::ItemStack;

/// Still or flowing liquid. Drops nothing and never absorbs a placement; the
/// default override rule lets any placement replace it, provided the world
/// declares the material a liquid.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiquidBlock;

impl BlockBehavior for LiquidBlock {
    fn drop_override(&self) -> Option<&[ItemStack]> {
        Some(&[])
    }
}
