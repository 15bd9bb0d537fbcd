use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use macroquad::prelude::*;
use ::rand::SeedableRng;
use ::rand::rngs::StdRng;
use selfdrive::simulation::brain::Brain;
use selfdrive::simulation::controls::{ControlType, Controls};
use selfdrive::simulation::evolution;
use selfdrive::simulation::params::Params;
use selfdrive::simulation::world::World;
use tracing_subscriber::EnvFilter;

mod graphics;
mod ui;

/// Cars learning to drive through traffic.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON file with simulation parameters
    #[arg(long)]
    params: Option<PathBuf>,

    /// Where the best brain is stored
    #[arg(long, default_value = "best_brain.json")]
    brain: PathBuf,

    /// Who drives the cars
    #[arg(long, value_enum, default_value_t = Mode::Ai)]
    mode: Mode,

    /// Seed for brains, mutation and traffic
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    /// A population of neural-network cars
    Ai,
    /// A single car driven with the arrow keys
    Keys,
}

impl From<Mode> for ControlType {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Ai => ControlType::Ai,
            Mode::Keys => ControlType::Keys,
        }
    }
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Self-Driving Cars".to_owned(),
        window_width: 600,
        window_height: 800,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let params = match &args.params {
        Some(path) => Params::load_from_file(path).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not load params, using defaults");
            Params::default()
        }),
        None => Params::default(),
    };

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let control_type = ControlType::from(args.mode);
    let mut world = new_generation(&params, control_type, &args.brain, &mut rng);
    let mut ui_state = ui::UIState::new();

    tracing::info!(mode = ?args.mode, cars = world.cars.len(), "starting simulation");

    loop {
        if !ui_state.paused {
            world.set_player_controls(read_keyboard());
            world.step();

            if world.tick % u64::from(params.traffic_spawn_interval.max(1)) == 0 {
                world.spawn_ahead(&params, &mut rng);
            }
            world.cull_traffic(params.traffic_spawn_distance);
        }

        clear_background(LIGHTGRAY);
        let view = graphics::View::following(&world);
        graphics::draw_world(&world, &view);
        ui::draw_ui(&mut ui_state, &world);

        if std::mem::take(&mut ui_state.save_requested) {
            ui_state.status_message = Some(save_best(&world, &args.brain));
        }
        if std::mem::take(&mut ui_state.discard_requested) {
            ui_state.status_message = Some(discard(&args.brain));
        }
        if std::mem::take(&mut ui_state.reset_requested) {
            world = new_generation(&params, control_type, &args.brain, &mut rng);
            ui_state.status_message = Some("Started a new generation".to_owned());
        }

        ui::process_egui();
        next_frame().await;
    }
}

/// Builds a fresh world, seeding AI cars from the stored best brain when there is one.
fn new_generation(
    params: &Params,
    control_type: ControlType,
    brain_path: &Path,
    rng: &mut StdRng,
) -> World {
    let mut world = World::new(params, control_type, rng);

    if control_type == ControlType::Ai && brain_path.exists() {
        let seeded = Brain::load_from_file(brain_path).and_then(|best| {
            evolution::seed_generation(&mut world.cars, &best, params.mutation_amount, rng)
        });
        if let Err(e) = seeded {
            tracing::warn!(error = %e, path = %brain_path.display(), "ignoring stored brain");
        }
    }

    world
}

fn save_best(world: &World, path: &Path) -> String {
    let Some(brain) = world.best_car().and_then(|car| car.brain()) else {
        return "No brain to save".to_owned();
    };
    match brain.save_to_file(path) {
        Ok(()) => format!("Saved best brain to {}", path.display()),
        Err(e) => {
            tracing::error!(error = %e, "failed to save brain");
            format!("Save failed: {e}")
        }
    }
}

fn discard(path: &Path) -> String {
    match std::fs::remove_file(path) {
        Ok(()) => {
            tracing::info!(path = %path.display(), "discarded stored brain");
            "Discarded stored brain".to_owned()
        }
        Err(e) => format!("Nothing to discard: {e}"),
    }
}

fn read_keyboard() -> Controls {
    Controls {
        forward: is_key_down(KeyCode::Up),
        left: is_key_down(KeyCode::Left),
        right: is_key_down(KeyCode::Right),
        reverse: is_key_down(KeyCode::Down),
    }
}
