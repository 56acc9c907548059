//! Spritestage demo entry point.
//!
//! A small 2D sprite/animation engine built on:
//! - **raylib** for windowing and drawing
//! - **bevy_ecs** for resources, messages, and the per-frame schedule
//!
//! The demo loads any animation descriptors given on the command line,
//! places them on a background layer, and plays a stripe fadeout over the
//! scene.
//!
//! # Main Loop
//!
//! 1. Initialize logging, configuration, and the raylib window
//! 2. Build the ECS world: clock, screen size, stage, active effect
//! 3. Load descriptors and lay them out on a layer
//! 4. Each frame: advance animations, drive the effect, render layers and
//!    the effect overlay, at the configured frame rate
//! 5. Exit on window close or shortly after the fadeout completes

mod effects;
mod error;
mod events;
mod resources;
mod stage;
mod systems;

use std::path::PathBuf;

use bevy_ecs::prelude::*;
use clap::{Parser, ValueEnum};
use raylib::prelude::{RaylibHandle, RaylibThread};

use crate::effects::stripesfadeout::{FadeoutType, Orientation, StripesFadeout};
use crate::effects::{ActiveEffect, VisualEffect};
use crate::error::{StageError, StageResult};
use crate::events::effect::EffectMessage;
use crate::resources::screensize::ScreenSize;
use crate::resources::stageconfig::StageConfig;
use crate::resources::worldtime::WorldTime;
use crate::stage::Stage;
use crate::systems::animation::advance_animations;
use crate::systems::effects::{drive_effects, log_effect_messages, update_effect_messages};
use crate::systems::render::render_system;
use crate::systems::time::update_world_time;

/// Seconds the final frame stays up after the fadeout completes.
const EXIT_HOLD: f32 = 0.75;

/// Spritestage demo
#[derive(Parser)]
#[command(version, about = "Sprite store hierarchy and stripe fadeout demo")]
struct Cli {
    /// Animation descriptor files (JSON) to place on the demo layer.
    descriptors: Vec<PathBuf>,

    /// Which stripe fadeout variant to play.
    #[arg(long, value_enum, default_value_t = EffectArg::Contra)]
    effect: EffectArg,

    /// Number of stripes.
    #[arg(long, default_value_t = 8)]
    stripes: usize,

    /// Fadeout duration in milliseconds.
    #[arg(long, default_value_t = 1500.0)]
    duration: f32,

    /// Cut the screen into horizontal bands instead of vertical ones.
    #[arg(long)]
    horizontal: bool,

    /// Configuration file path.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum EffectArg {
    Contra,
    CloseCenter,
    Random,
}

impl From<EffectArg> for FadeoutType {
    fn from(arg: EffectArg) -> Self {
        match arg {
            EffectArg::Contra => FadeoutType::Contra,
            EffectArg::CloseCenter => FadeoutType::CloseCenter,
            EffectArg::Random => FadeoutType::Random,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_backend(config: &StageConfig) -> StageResult<(RaylibHandle, RaylibThread)> {
    let (mut rl, thread) = raylib::init()
        .size(config.window_width as i32, config.window_height as i32)
        .title(&config.title)
        .build();
    if !rl.is_window_ready() {
        return Err(StageError::BackendInit(
            "window could not be initialized".into(),
        ));
    }
    rl.set_target_fps(config.target_fps);
    Ok((rl, thread))
}

fn run(cli: Cli) -> StageResult<()> {
    let mut config = match &cli.config {
        Some(path) => StageConfig::with_path(path),
        None => StageConfig::new(),
    };
    config.load_from_file().ok(); // missing file keeps defaults

    let (rl, thread) = init_backend(&config)?;
    let screen = ScreenSize {
        w: rl.get_screen_width(),
        h: rl.get_screen_height(),
    };

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(screen);
    world.insert_resource(config);
    world.init_resource::<Messages<EffectMessage>>();

    let mut stage = Stage::new();
    populate_demo_layer(&mut stage, &cli.descriptors, screen)?;
    world.insert_non_send_resource(stage);

    let orientation = if cli.horizontal {
        Orientation::Horizontal
    } else {
        Orientation::Vertical
    };
    let mut fadeout = StripesFadeout::new(cli.effect.into(), orientation, cli.duration, 60.0)
        .with_stripes(cli.stripes);
    fadeout.start(screen);
    world.insert_resource(ActiveEffect(Some(Box::new(fadeout))));
    world
        .resource_mut::<Messages<EffectMessage>>()
        .write(EffectMessage::Started);

    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);

    let mut update = Schedule::default();
    update.add_systems((advance_animations, drive_effects, update_effect_messages).chain());
    update.add_systems(log_effect_messages.after(update_effect_messages));
    update.add_systems(render_system.after(log_effect_messages));

    // --------------- Main loop ---------------
    let mut hold = 0.0f32;
    loop {
        let (should_close, dt) = {
            let rl = world.non_send_resource::<RaylibHandle>();
            (rl.window_should_close(), rl.get_frame_time())
        };
        if should_close {
            break;
        }

        update_world_time(&mut world, dt);
        update.run(&mut world);

        // Track window resizes.
        let (w, h) = {
            let rl = world.non_send_resource::<RaylibHandle>();
            (rl.get_screen_width(), rl.get_screen_height())
        };
        {
            let mut screen = world.resource_mut::<ScreenSize>();
            screen.w = w;
            screen.h = h;
        }

        let effect_done = world
            .resource::<ActiveEffect>()
            .0
            .as_ref()
            .is_some_and(|e| !e.is_running());
        if effect_done {
            hold += dt;
            if hold >= EXIT_HOLD {
                break;
            }
        }
    }
    Ok(())
}

/// Load the given descriptors and lay them out on one layer in a grid.
fn populate_demo_layer(
    stage: &mut Stage,
    descriptors: &[PathBuf],
    screen: ScreenSize,
) -> StageResult<()> {
    if descriptors.is_empty() {
        return Ok(());
    }

    let layer = stage.layers_mut().add_layer("demo");
    let columns = (descriptors.len() as f32).sqrt().ceil().max(1.0) as usize;
    let rows = descriptors.len().div_ceil(columns);
    let cell_w = screen.w / columns as i32;
    let cell_h = screen.h / rows as i32;

    for (i, path) in descriptors.iter().enumerate() {
        let index = stage.load_animation(path)?;
        let (frame_w, frame_h) = stage.animations().dimension(index)?;
        let col = (i % columns) as i32;
        let row = (i / columns) as i32;
        let x = col * cell_w + (cell_w - frame_w) / 2;
        let y = row * cell_h + (cell_h - frame_h) / 2;
        stage
            .layers_mut()
            .layer_mut(layer)?
            .add_sprite(index, x, y, 0.0);
    }
    Ok(())
}
