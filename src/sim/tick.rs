//! Fixed timestep simulation tick
//!
//! The per-frame driver: blast impulses during Demolition, then one physics
//! step. Everything else the game does goes through explicit commands, so
//! the tick stays small and replayable.

use super::demolition::demolition_pass;
use super::state::{GamePhase, GameState};
use crate::physics::PhysicsWorld;

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, world: &mut impl PhysicsWorld, dt: f32) {
    state.time_ticks += 1;

    if state.phase == GamePhase::Demolition {
        demolition_pass(state, world);
    }

    world.step(dt);

    // Ensure deterministic ordering
    state.normalize_order();
}
