//! Rigid-body collaborator contract and a headless reference world
//!
//! The simulation never talks to a physics engine directly. It goes through
//! [`PhysicsWorld`], which a frontend implements over its engine of choice.
//! [`DebrisWorld`] is the in-crate implementation: semi-implicit Euler with a
//! flat ground plane, good enough for headless play and tests.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Gravity constant (m/s²)
pub const GRAVITY: f32 = 9.81;

/// Bodies slower than this while grounded are put to sleep
const SLEEP_SPEED: f32 = 0.5;
/// Restitution applied to the vertical component on ground contact
const GROUND_BOUNCE: f32 = 0.3;
/// Horizontal velocity kept after a ground contact
const GROUND_FRICTION: f32 = 0.8;

/// Opaque identifier for a body owned by a physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyHandle(pub u32);

/// Simulation mode of a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyMode {
    /// Kinematic: holds its position, ignores gravity and impulses
    Fixed,
    /// Integrated every step, reacts to impulses
    Dynamic,
}

/// Contract the simulation requires from a physics backend
pub trait PhysicsWorld {
    /// Create a unit-cube body at `pos` and return its handle
    fn spawn_body(&mut self, pos: Vec3, mode: BodyMode) -> BodyHandle;
    /// Remove a body from the world; unknown handles are ignored
    fn despawn_body(&mut self, handle: BodyHandle);
    /// Current simulated position of a body (`pos` it was spawned at if never moved)
    fn position(&self, handle: BodyHandle) -> Vec3;
    /// Switch a body between fixed and dynamic simulation
    fn set_mode(&mut self, handle: BodyHandle, mode: BodyMode);
    /// Instantaneous velocity change; `wake` clears any rest state first
    fn apply_impulse(&mut self, handle: BodyHandle, impulse: Vec3, wake: bool);
    /// Advance the world by `dt` seconds
    fn step(&mut self, dt: f32);
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DebrisBody {
    pos: Vec3,
    vel: Vec3,
    mode: BodyMode,
    half_extent: f32,
    asleep: bool,
}

impl DebrisBody {
    fn integrate(&mut self, dt: f32) {
        if self.mode == BodyMode::Fixed || self.asleep {
            return;
        }

        self.vel.y -= GRAVITY * dt;
        self.pos += self.vel * dt;

        // Ground plane at y = 0
        if self.pos.y < self.half_extent {
            self.pos.y = self.half_extent;
            if self.vel.y.abs() > SLEEP_SPEED {
                self.vel.y *= -GROUND_BOUNCE;
                self.vel.x *= GROUND_FRICTION;
                self.vel.z *= GROUND_FRICTION;
            } else if self.vel.length() < SLEEP_SPEED {
                self.vel = Vec3::ZERO;
                self.asleep = true;
            } else {
                self.vel.y = 0.0;
                self.vel.x *= GROUND_FRICTION;
                self.vel.z *= GROUND_FRICTION;
            }
        }
    }
}

/// Minimal deterministic physics world for headless sessions
///
/// Bodies fall under gravity, land on a flat ground plane and go to sleep at
/// rest. There is no body-vs-body collision; demolition reads well enough
/// without it and the simulation makes no decisions based on contacts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DebrisWorld {
    bodies: Vec<Option<DebrisBody>>,
}

impl DebrisWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live bodies
    pub fn body_count(&self) -> usize {
        self.bodies.iter().filter(|b| b.is_some()).count()
    }

    /// True when every dynamic body is asleep
    pub fn settled(&self) -> bool {
        self.bodies
            .iter()
            .flatten()
            .all(|b| b.mode == BodyMode::Fixed || b.asleep)
    }

    /// Velocity of a body, zero for unknown handles
    pub fn velocity(&self, handle: BodyHandle) -> Vec3 {
        self.body(handle).map_or(Vec3::ZERO, |b| b.vel)
    }

    fn body(&self, handle: BodyHandle) -> Option<&DebrisBody> {
        self.bodies.get(handle.0 as usize)?.as_ref()
    }

    fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut DebrisBody> {
        self.bodies.get_mut(handle.0 as usize)?.as_mut()
    }
}

impl PhysicsWorld for DebrisWorld {
    fn spawn_body(&mut self, pos: Vec3, mode: BodyMode) -> BodyHandle {
        let handle = BodyHandle(self.bodies.len() as u32);
        self.bodies.push(Some(DebrisBody {
            pos,
            vel: Vec3::ZERO,
            mode,
            half_extent: crate::consts::BLOCK_SIZE / 2.0,
            asleep: false,
        }));
        handle
    }

    fn despawn_body(&mut self, handle: BodyHandle) {
        if let Some(slot) = self.bodies.get_mut(handle.0 as usize) {
            *slot = None;
        }
    }

    fn position(&self, handle: BodyHandle) -> Vec3 {
        self.body(handle).map_or(Vec3::ZERO, |b| b.pos)
    }

    fn set_mode(&mut self, handle: BodyHandle, mode: BodyMode) {
        if let Some(body) = self.body_mut(handle) {
            body.mode = mode;
            body.asleep = false;
        }
    }

    fn apply_impulse(&mut self, handle: BodyHandle, impulse: Vec3, wake: bool) {
        if let Some(body) = self.body_mut(handle) {
            if body.mode != BodyMode::Dynamic {
                return;
            }
            if wake {
                body.asleep = false;
            }
            if !body.asleep {
                // Unit mass, so impulse is a straight velocity change
                body.vel += impulse;
            }
        }
    }

    fn step(&mut self, dt: f32) {
        for body in self.bodies.iter_mut().flatten() {
            body.integrate(dt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;

    #[test]
    fn test_fixed_body_holds_position() {
        let mut world = DebrisWorld::new();
        let spawn = Vec3::new(1.0, 4.5, -1.0);
        let handle = world.spawn_body(spawn, BodyMode::Fixed);

        for _ in 0..120 {
            world.step(SIM_DT);
        }
        assert_eq!(world.position(handle), spawn);
    }

    #[test]
    fn test_dynamic_body_falls_and_settles() {
        let mut world = DebrisWorld::new();
        let handle = world.spawn_body(Vec3::new(0.0, 5.5, 0.0), BodyMode::Dynamic);

        // 5 simulated seconds is plenty for a 5 unit drop
        for _ in 0..300 {
            world.step(SIM_DT);
        }

        let pos = world.position(handle);
        assert!((pos.y - 0.5).abs() < 1e-3, "body should rest on the ground, y = {}", pos.y);
        assert!(world.settled());
    }

    #[test]
    fn test_impulse_ignored_while_fixed() {
        let mut world = DebrisWorld::new();
        let handle = world.spawn_body(Vec3::new(0.0, 0.5, 0.0), BodyMode::Fixed);

        world.apply_impulse(handle, Vec3::new(10.0, 10.0, 0.0), true);
        world.step(SIM_DT);
        assert_eq!(world.velocity(handle), Vec3::ZERO);

        world.set_mode(handle, BodyMode::Dynamic);
        world.apply_impulse(handle, Vec3::new(10.0, 10.0, 0.0), true);
        assert!(world.velocity(handle).length() > 0.0);
    }

    #[test]
    fn test_impulse_moves_body_along_direction() {
        let mut world = DebrisWorld::new();
        let handle = world.spawn_body(Vec3::new(0.0, 0.5, 0.0), BodyMode::Dynamic);

        world.apply_impulse(handle, Vec3::new(5.0, 8.0, 0.0), true);
        for _ in 0..30 {
            world.step(SIM_DT);
        }

        let pos = world.position(handle);
        assert!(pos.x > 1.0, "body should travel on x, got {}", pos.x);
        assert!(pos.y > 0.5, "body should be airborne, got {}", pos.y);
    }

    #[test]
    fn test_despawned_handle_is_inert() {
        let mut world = DebrisWorld::new();
        let a = world.spawn_body(Vec3::new(0.0, 0.5, 0.0), BodyMode::Dynamic);
        let b = world.spawn_body(Vec3::new(2.0, 0.5, 0.0), BodyMode::Dynamic);
        assert_eq!(world.body_count(), 2);

        world.despawn_body(a);
        assert_eq!(world.body_count(), 1);
        assert_eq!(world.position(a), Vec3::ZERO);

        // Untouched body keeps its slot and position
        assert_eq!(world.position(b), Vec3::new(2.0, 0.5, 0.0));
        world.despawn_body(a);
        assert_eq!(world.body_count(), 1);
    }
}
