//! Built-in materials registered before any data-driven ones from config.

use keystone_blocks::kinds::{
    AttachedBlock, ContainerBlock, DirectionalBlock, FenceBlock, LiquidBlock, SimpleBlock,
    SlabBlock, SpreadingBlock,
};
use keystone_blocks::{ItemStack, MaterialId, RegistryBuilder, RegistryError, Sound, SoundSpec};

pub const STONE: MaterialId = MaterialId(1);
pub const GRASS: MaterialId = MaterialId(2);
pub const DIRT: MaterialId = MaterialId(3);
pub const COBBLESTONE: MaterialId = MaterialId(4);
pub const PLANK: MaterialId = MaterialId(5);
pub const WATER: MaterialId = MaterialId(9);
pub const DOUBLE_SLAB: MaterialId = MaterialId(43);
pub const SLAB: MaterialId = MaterialId(44);
pub const TORCH: MaterialId = MaterialId(50);
pub const CHEST: MaterialId = MaterialId(54);
pub const FURNACE: MaterialId = MaterialId(61);
pub const FENCE: MaterialId = MaterialId(85);

/// Materials the world declares liquid.
pub const LIQUIDS: [MaterialId; 1] = [WATER];

pub fn register_stock(builder: &mut RegistryBuilder) -> Result<(), RegistryError> {
    let stone_sound = SoundSpec::new(Sound::BlockStonePlace);
    let wood_sound = SoundSpec::new(Sound::BlockWoodPlace);

    builder
        .register(
            STONE,
            "stone",
            SimpleBlock::new()
                .with_place_sound(stone_sound)
                .with_drops(vec![ItemStack::new(COBBLESTONE, 1)]),
        )?
        .register(
            GRASS,
            "grass",
            SpreadingBlock::new(DIRT).with_place_sound(SoundSpec::new(Sound::BlockGrassPlace)),
        )?
        .register(
            DIRT,
            "dirt",
            SimpleBlock::new().with_place_sound(SoundSpec::new(Sound::BlockGravelPlace)),
        )?
        .register(
            COBBLESTONE,
            "cobblestone",
            SimpleBlock::new().with_place_sound(stone_sound),
        )?
        .register(PLANK, "plank", SimpleBlock::new().with_place_sound(wood_sound))?
        .register(WATER, "water", LiquidBlock)?
        .register(
            DOUBLE_SLAB,
            "double_stone_slab",
            SimpleBlock::new()
                .with_place_sound(stone_sound)
                .with_drops(vec![ItemStack::new(SLAB, 2)]),
        )?
        .register(
            SLAB,
            "stone_slab",
            SlabBlock::new(DOUBLE_SLAB).with_place_sound(stone_sound),
        )?
        .register(TORCH, "torch", AttachedBlock::new().with_place_sound(wood_sound))?
        .register(
            CHEST,
            "chest",
            ContainerBlock::default().with_place_sound(wood_sound),
        )?
        .register(
            FURNACE,
            "furnace",
            DirectionalBlock::new(false).with_place_sound(stone_sound),
        )?
        .register(FENCE, "fence", FenceBlock::new().with_place_sound(wood_sound))?;
    Ok(())
}
