use crate::behavior::BlockBehavior;
use crate::material::ItemStack;
use crate::sound::SoundSpec;

/// A plain solid block with a configurable drop list and place sound.
#[derive(Debug, Clone, Default)]
pub struct SimpleBlock {
    drops: Option<Vec<ItemStack>>,
    place_sound: SoundSpec,
}

impl SimpleBlock {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_place_sound(mut self, place_sound: SoundSpec) -> Self {
        self.place_sound = place_sound;
        self
    }

    /// Replaces the "drop itself" rule with a fixed list. An empty list drops nothing.
    #[must_use]
    pub fn with_drops(mut self, drops: Vec<ItemStack>) -> Self {
        self.drops = Some(drops);
        self
    }
}

impl BlockBehavior for SimpleBlock {
    fn drop_override(&self) -> Option<&[ItemStack]> {
        self.drops.as_deref()
    }

    fn place_sound(&self) -> SoundSpec {
        self.place_sound
    }
}
