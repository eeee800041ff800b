//! Blast impulse pass
//!
//! Runs once per tick while the phase is Demolition. Each block takes at most
//! one impulse per demolition cycle, sourced from the nearest charge in range
//! at the moment it first qualifies; simultaneous charges do not stack. The
//! registry cannot change mid-pass because charge placement is only legal in
//! a different phase.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::GameState;
use crate::consts::*;
use crate::mix_seed;
use crate::physics::PhysicsWorld;

pub(crate) fn demolition_pass(state: &mut GameState, world: &mut impl PhysicsWorld) {
    if state.blast_points.is_empty() {
        return;
    }

    // Jitter stream derived from seed and tick, so a replay lands every
    // block in the same place
    let mut rng = Pcg32::seed_from_u64(mix_seed(state.seed, state.time_ticks));

    for block in state.blocks.iter_mut() {
        if block.exploded || block.collected {
            continue;
        }

        let pos = world.position(block.body);

        let mut nearest: Option<(Vec3, f32)> = None;
        for point in &state.blast_points {
            let dist = pos.distance(point.pos);
            if dist < BLAST_RADIUS && nearest.is_none_or(|(_, best)| dist < best) {
                nearest = Some((point.pos, dist));
            }
        }
        let Some((blast_pos, dist)) = nearest else {
            continue;
        };

        let base = (pos - blast_pos).normalize_or_zero() * (BLAST_FORCE - dist).max(0.0);
        let impulse = Vec3::new(
            base.x + rng.random_range(-LATERAL_JITTER..LATERAL_JITTER),
            base.y.max(MIN_UPWARD_KICK) + rng.random_range(0.0..UPWARD_JITTER),
            base.z + rng.random_range(-LATERAL_JITTER..LATERAL_JITTER),
        );

        world.apply_impulse(block.body, impulse, true);
        block.exploded = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{BodyMode, DebrisWorld};
    use crate::sim::state::Block;
    use glam::IVec3;

    fn detonated_session(charges: &[Vec3]) -> (GameState, DebrisWorld) {
        let mut world = DebrisWorld::new();
        let mut state = GameState::new(31337, &mut world);
        state.begin_blast_prep().unwrap();
        for &pos in charges {
            state.place_blast_point(pos).unwrap();
        }
        state.detonate(&mut world).unwrap();
        (state, world)
    }

    fn block_id_at(state: &GameState, grid: IVec3) -> u32 {
        state
            .blocks
            .iter()
            .find(|b| b.grid == grid)
            .map(|b| b.id)
            .unwrap()
    }

    #[test]
    fn test_center_charge_reaches_whole_tower() {
        let (mut state, mut world) = detonated_session(&[Vec3::new(0.0, 0.5, 0.0)]);

        demolition_pass(&mut state, &mut world);

        assert!(state.blocks.iter().all(|b| b.exploded));
        for block in &state.blocks {
            assert!(world.velocity(block.body).length() > 0.0);
        }
    }

    #[test]
    fn test_impulse_magnitude_and_upward_kick() {
        let (mut state, mut world) = detonated_session(&[Vec3::new(0.0, 0.5, 0.0)]);
        demolition_pass(&mut state, &mut world);

        // Corner block on the ground layer: distance sqrt(2), pure lateral push
        let id = block_id_at(&state, IVec3::new(1, 0, 1));
        let block = state.block(id).unwrap();
        let vel = world.velocity(block.body);

        let expected = (BLAST_FORCE - 2.0_f32.sqrt()) / 2.0_f32.sqrt();
        assert!((vel.x - expected).abs() <= LATERAL_JITTER + 1e-4);
        assert!((vel.z - expected).abs() <= LATERAL_JITTER + 1e-4);
        assert!(vel.y >= MIN_UPWARD_KICK);
        assert!(vel.y < MIN_UPWARD_KICK + UPWARD_JITTER);
    }

    #[test]
    fn test_block_outside_radius_is_untouched() {
        let (mut state, mut world) = detonated_session(&[Vec3::new(0.0, 0.5, 0.0)]);

        // A stray block far from the tower, well outside any charge's reach
        let far_grid = IVec3::new(100, 0, 0);
        let id = state.next_entity_id();
        let body = world.spawn_body(
            crate::sim::state::grid_anchor(far_grid),
            BodyMode::Dynamic,
        );
        state.blocks.push(Block {
            id,
            grid: far_grid,
            shade: 0.5,
            body,
            exploded: false,
            collected: false,
        });

        demolition_pass(&mut state, &mut world);

        let far = state.block(id).unwrap();
        assert!(!far.exploded);
        assert_eq!(world.velocity(far.body), Vec3::ZERO);

        // Still collectible by direct interaction
        assert_eq!(state.collect_block(id, &mut world).unwrap(), 10);
    }

    #[test]
    fn test_impulse_applied_at_most_once() {
        let (mut state, mut world) = detonated_session(&[Vec3::new(0.0, 0.5, 0.0)]);

        demolition_pass(&mut state, &mut world);
        let id = block_id_at(&state, IVec3::new(-1, 2, 0));
        let body = state.block(id).unwrap().body;
        let vel_first = world.velocity(body);

        state.time_ticks += 1;
        demolition_pass(&mut state, &mut world);
        assert_eq!(world.velocity(body), vel_first);
    }

    #[test]
    fn test_nearest_charge_wins() {
        let (mut state, mut world) = detonated_session(&[
            Vec3::new(3.0, 0.5, 0.0),
            Vec3::new(-3.0, 0.5, 0.0),
        ]);
        demolition_pass(&mut state, &mut world);

        // Block at x = 1 is two units from the +x charge and four from the
        // other, so it must be pushed toward -x
        let id = block_id_at(&state, IVec3::new(1, 0, 0));
        let vel = world.velocity(state.block(id).unwrap().body);
        assert!(vel.x < -10.0, "expected push away from the near charge, got {}", vel.x);
    }

    #[test]
    fn test_collected_blocks_are_skipped() {
        let (mut state, mut world) = detonated_session(&[Vec3::new(0.0, 0.5, 0.0)]);

        let id = block_id_at(&state, IVec3::new(0, 0, 0));
        state.collect_block(id, &mut world).unwrap();
        demolition_pass(&mut state, &mut world);

        assert!(!state.block(id).unwrap().exploded);
    }

    #[test]
    fn test_jitter_replays_identically() {
        let (mut state_a, mut world_a) = detonated_session(&[Vec3::new(0.0, 2.5, 0.0)]);
        let (mut state_b, mut world_b) = detonated_session(&[Vec3::new(0.0, 2.5, 0.0)]);

        demolition_pass(&mut state_a, &mut world_a);
        demolition_pass(&mut state_b, &mut world_b);

        for (a, b) in state_a.blocks.iter().zip(state_b.blocks.iter()) {
            assert_eq!(world_a.velocity(a.body), world_b.velocity(b.body));
        }
    }

    #[test]
    fn test_handles_unknown_body_gracefully() {
        let (mut state, mut world) = detonated_session(&[Vec3::new(0.0, 0.5, 0.0)]);

        // Despawned body reads as origin; the pass must not panic on it
        let id = state.blocks[0].id;
        world.despawn_body(state.blocks[0].body);

        demolition_pass(&mut state, &mut world);
        assert!(state.block(id).is_some());
    }
}
