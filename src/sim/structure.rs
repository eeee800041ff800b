//! Procedural tower generation
//!
//! Towers have a fixed 3x3 footprint and grow two layers per level. Shape is
//! fully determined by the level; only the grey shades draw from the seeded
//! RNG, so a session seed reproduces the exact same tower.

use glam::IVec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{Block, GameEvent, GameState, grid_anchor};
use crate::consts::*;
use crate::mix_seed;
use crate::physics::{BodyMode, PhysicsWorld};

/// Layer count for a level
pub fn tower_height(level: u32) -> u32 {
    BASE_TOWER_HEIGHT + HEIGHT_PER_LEVEL * level.saturating_sub(1)
}

/// Total blocks a level's tower contains
pub fn block_count(level: u32) -> u32 {
    let side = (2 * FOOTPRINT_HALF + 1) as u32;
    side * side * tower_height(level)
}

/// Replace the current structure with a freshly generated tower
///
/// Despawns the previous block set wholesale, spawns the new blocks as fixed
/// bodies and records the new totals. Iteration order is layer-major so block
/// ids are stable per seed and level.
pub(crate) fn spawn_structure(state: &mut GameState, world: &mut impl PhysicsWorld) {
    for block in state.blocks.drain(..) {
        world.despawn_body(block.body);
    }

    let level = state.level;
    let height = tower_height(level);
    let mut rng = Pcg32::seed_from_u64(mix_seed(state.seed, level as u64));

    for y in 0..height {
        for x in -FOOTPRINT_HALF..=FOOTPRINT_HALF {
            for z in -FOOTPRINT_HALF..=FOOTPRINT_HALF {
                let grid = IVec3::new(x, y as i32, z);
                let block = Block {
                    id: state.next_entity_id(),
                    grid,
                    shade: SHADE_MIN + rng.random::<f32>() * SHADE_SPAN,
                    body: world.spawn_body(grid_anchor(grid), BodyMode::Fixed),
                    exploded: false,
                    collected: false,
                };
                state.blocks.push(block);
            }
        }
    }

    state.total_blocks = state.blocks.len() as u32;
    state.cleared_blocks = 0;

    log::info!(
        "Level {} structure: {} blocks ({} layers)",
        level,
        state.total_blocks,
        height
    );

    state.events.push(GameEvent::LevelStarted {
        level,
        total_blocks: state.total_blocks,
    });
}
