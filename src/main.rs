//! Build & Blast DIY entry point
//!
//! Headless scripted session: spawns the level 1 tower, fires two charges,
//! collects debris, builds on the cleared lot and advances a level. Prints
//! the final state as JSON so a run can be inspected or diffed.

use blast_diy::audio::{AudioTrigger, NullAudio, sound_for};
use blast_diy::consts::{MAX_SUBSTEPS, SIM_DT};
use blast_diy::physics::DebrisWorld;
use blast_diy::sim::{BuiltItemKind, GameState, tick};
use glam::Vec3;

/// Frame cadence the headless driver simulates
const FRAME_DT: f32 = 1.0 / 30.0;

/// Forward queued notifications to the log and the audio sink
fn drain_events(state: &mut GameState, audio: &mut impl AudioTrigger) {
    for event in state.take_events() {
        log::info!("Event: {:?}", event);
        audio.play(sound_for(&event));
    }
}

/// Advance the session by wall-clock seconds at the fixed timestep
fn advance(state: &mut GameState, world: &mut DebrisWorld, seconds: f32) {
    let frames = (seconds / FRAME_DT).ceil() as u32;
    let mut accumulator = 0.0;
    for _ in 0..frames {
        accumulator += FRAME_DT;
        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(state, world, SIM_DT);
            accumulator -= SIM_DT;
            substeps += 1;
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let seed = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => 424242,
    };

    log::info!("Build & Blast DIY (headless) starting...");

    let mut world = DebrisWorld::new();
    let mut audio = NullAudio;
    let mut state = GameState::new(seed, &mut world);
    log::info!("Game initialized with seed: {}", seed);
    drain_events(&mut state, &mut audio);

    // Rig the tower with a charge low and a charge high
    state.begin_blast_prep()?;
    state.place_blast_point(Vec3::new(0.0, 1.0, 0.0))?;
    state.place_blast_point(Vec3::new(0.0, 4.0, 0.0))?;

    state.detonate(&mut world)?;
    drain_events(&mut state, &mut audio);

    // Let the debris fly and come to rest
    advance(&mut state, &mut world, 3.0);

    let debris: Vec<u32> = state
        .blocks
        .iter()
        .filter(|b| b.exploded && !b.collected)
        .map(|b| b.id)
        .take(12)
        .collect();
    for id in debris {
        state.collect_block(id, &mut world)?;
    }
    drain_events(&mut state, &mut audio);
    log::info!(
        "Cleared {}% of the tower, score: {}",
        state.clearance_percent(),
        state.score
    );

    // Spend the points, then move on
    state.finish_demolition()?;
    state.select_build_item(BuiltItemKind::House);
    state.place_built_item(Vec3::new(3.0, 0.0, 3.0))?;
    state.next_level(&mut world)?;
    drain_events(&mut state, &mut audio);

    println!("{}", serde_json::to_string_pretty(&state)?);

    Ok(())
}
