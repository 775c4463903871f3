//! Keystone server binary: loads config, builds the behavior registry and
//! replays a scripted building session against an in-memory world.
//!
//! Run with `cargo run -p keystone-server -- --max-height 128` to override the
//! configured height limit.

mod catalog;

use std::collections::VecDeque;
use std::process::ExitCode;

use clap::Parser;
use glam::Vec3;
use keystone_blocks::actions;
use keystone_blocks::physics::run_scheduled;
use keystone_blocks::{
    Actor, BlockAccess, BlockContext, BlockFace, BlockPos, BlockState, DefaultHooks, ItemStack,
    MemoryWorld, RegistryBuilder, Sound, SoundBackend, attempt_placement,
};
use keystone_config::{CliArgs, Config};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{error, info};

use catalog::{CHEST, DIRT, FENCE, FURNACE, GRASS, LIQUIDS, PLANK, SLAB, STONE, TORCH};

/// Physics notifications processed per simulated tick.
const PHYSICS_BUDGET: usize = 64;

struct Player {
    name: String,
    yaw: f32,
    pitch: f32,
    creative: bool,
}

impl Actor for Player {
    fn name(&self) -> &str {
        &self.name
    }

    fn notify(&mut self, message: &str) {
        info!(player = %self.name, "notice: {message}");
    }

    fn is_inventory_exempt(&self) -> bool {
        self.creative
    }

    fn orientation(&self) -> (f32, f32) {
        (self.yaw, self.pitch)
    }
}

/// Sound backend that logs every cue.
struct TracingSounds;

impl SoundBackend for TracingSounds {
    fn play(&mut self, sound: Sound, volume: f32, pitch: f32, location: BlockPos) {
        info!(%sound, volume, pitch, ?location, "sound");
    }
}

fn build_floor(world: &mut MemoryWorld, y: i32) {
    for x in -4..=4 {
        for z in -4..=4 {
            world.set_state(BlockPos::new(x, y, z), BlockState::new(GRASS, 0));
            world.set_state(BlockPos::new(x, y - 1, z), BlockState::new(DIRT, 0));
        }
    }
}

fn run_session(ctx: &mut BlockContext<'_>, player: &mut Player, floor_y: i32) {
    let origin = BlockPos::new(0, floor_y, 0);
    let center = Vec3::splat(0.5);
    let mut planks = ItemStack::new(PLANK, 3);

    let outcome = attempt_placement(
        ctx,
        &mut DefaultHooks,
        player,
        origin,
        BlockFace::Up,
        &mut planks,
        center,
    );
    info!(?outcome, remaining = planks.amount(), "placed plank");

    let mut torches = ItemStack::new(TORCH, 8);
    let plank_pos = origin.relative(BlockFace::Up);
    let outcome = attempt_placement(
        ctx,
        &mut DefaultHooks,
        player,
        plank_pos,
        BlockFace::East,
        &mut torches,
        center,
    );
    info!(?outcome, "placed torch");

    let mut chest = ItemStack::new(CHEST, 1);
    let outcome = attempt_placement(
        ctx,
        &mut DefaultHooks,
        player,
        BlockPos::new(2, floor_y, 2),
        BlockFace::Up,
        &mut chest,
        center,
    );
    let chest_pos = BlockPos::new(2, floor_y + 1, 2);
    let opened = actions::interact(ctx, player, chest_pos, BlockFace::Up, center);
    info!(?outcome, opened, "placed chest");

    let mut furnace = ItemStack::new(FURNACE, 1);
    let outcome = attempt_placement(
        ctx,
        &mut DefaultHooks,
        player,
        BlockPos::new(-2, floor_y, 2),
        BlockFace::Up,
        &mut furnace,
        center,
    );
    info!(?outcome, "placed furnace");

    let mut slabs = ItemStack::new(SLAB, 2);
    let slab_pos = BlockPos::new(-2, floor_y + 1, -2);
    for _ in 0..2 {
        let against = if ctx.state(slab_pos).is_empty() {
            BlockPos::new(-2, floor_y, -2)
        } else {
            slab_pos
        };
        let outcome = attempt_placement(
            ctx,
            &mut DefaultHooks,
            player,
            against,
            BlockFace::Up,
            &mut slabs,
            center,
        );
        info!(?outcome, state = ?ctx.state(slab_pos), "placed slab");
    }

    let mut fences = ItemStack::new(FENCE, 4);
    for x in 1..=3 {
        attempt_placement(
            ctx,
            &mut DefaultHooks,
            player,
            BlockPos::new(x, floor_y, -3),
            BlockFace::Up,
            &mut fences,
            center,
        );
    }
    info!(
        middle = ctx.state(BlockPos::new(2, floor_y + 1, -3)).data,
        "fence connection mask"
    );

    let ceiling = BlockPos::new(0, ctx.max_height() - 1, 0);
    let mut stone = ItemStack::new(STONE, 1);
    let outcome = attempt_placement(
        ctx,
        &mut DefaultHooks,
        player,
        ceiling,
        BlockFace::Up,
        &mut stone,
        center,
    );
    info!(?outcome, "placement above the height limit");

    // Knocking out the plank drops the torch hanging on it.
    let drops = actions::destroy(ctx, player, plank_pos, BlockFace::Up, None);
    info!(?drops, torch = ?ctx.state(plank_pos.relative(BlockFace::East)), "destroyed plank");

    let mut rng = ChaCha8Rng::seed_from_u64(42);
    for x in -4..=4 {
        actions::random_tick(ctx, BlockPos::new(x, floor_y, 0), &mut rng);
    }

    let mut queue: VecDeque<_> = ctx.take_scheduled().into();
    let mut ticks = 0;
    while !queue.is_empty() {
        let ran = run_scheduled(ctx, &mut queue, PHYSICS_BUDGET);
        ticks += 1;
        info!(tick = ticks, ran, pending = queue.len(), "physics tick");
    }
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config_dir = match args.config.clone().map_or_else(Config::default_dir, Ok) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Failed to resolve config directory: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    keystone_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    let mut builder = RegistryBuilder::new();
    if let Err(e) = catalog::register_stock(&mut builder) {
        error!("Failed to register stock materials: {e}");
        return ExitCode::FAILURE;
    }
    match builder.register_config(&config.placement) {
        Ok(count) => info!(count, "registered configured materials"),
        Err(e) => {
            error!("Invalid material configuration: {e}");
            return ExitCode::FAILURE;
        }
    }
    let registry = builder.build();

    let mut world = LIQUIDS
        .into_iter()
        .fold(MemoryWorld::new(config.world.max_height), MemoryWorld::with_liquid);
    let floor_y = 63.min(config.world.max_height - 2);
    build_floor(&mut world, floor_y);

    let mut player = Player {
        name: "builder".to_string(),
        yaw: 90.0,
        pitch: 0.0,
        creative: false,
    };
    let mut sounds = TracingSounds;
    let mut ctx = BlockContext::new(&mut world, &registry, &mut sounds);
    run_session(&mut ctx, &mut player, floor_y);

    info!(blocks = world.len(), writes = world.write_count(), "session finished");
    ExitCode::SUCCESS
}
