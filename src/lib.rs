//! Build & Blast DIY - demolition/construction game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (phases, structure, demolition, economy)
//! - `physics`: Rigid-body collaborator contract + headless reference world
//! - `audio`: Sound-trigger hook for frontends
//! - `i18n`: Semantic text keys for frontends

pub mod audio;
pub mod i18n;
pub mod physics;
pub mod sim;

pub use physics::{DebrisWorld, PhysicsWorld};
pub use sim::{CommandError, GamePhase, GameState};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, mobile frame rate)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Tower footprint half-width: columns span -1..=1 on x and z (3x3)
    pub const FOOTPRINT_HALF: i32 = 1;
    /// Tower height at level 1
    pub const BASE_TOWER_HEIGHT: u32 = 5;
    /// Extra layers added per level beyond the first
    pub const HEIGHT_PER_LEVEL: u32 = 2;
    /// Block cube edge length in world units
    pub const BLOCK_SIZE: f32 = 1.0;

    /// Grey-scale shade band for blocks (cosmetic only)
    pub const SHADE_MIN: f32 = 0.4;
    pub const SHADE_SPAN: f32 = 0.3;

    /// Charge trigger distance - blocks farther than this receive no impulse
    pub const BLAST_RADIUS: f32 = 6.0;
    /// Impulse magnitude at zero distance; falls off linearly to the radius
    pub const BLAST_FORCE: f32 = 15.0;
    /// Minimum upward component of any blast impulse
    pub const MIN_UPWARD_KICK: f32 = 1.0;
    /// Extra upward jitter range [0, this)
    pub const UPWARD_JITTER: f32 = 5.0;
    /// Lateral jitter half-range on x and z
    pub const LATERAL_JITTER: f32 = 0.5;

    /// Points for collecting a block, before the combo bonus
    pub const COLLECT_BASE_POINTS: u64 = 10;
    /// Bonus points grow by one for every this many cleared blocks
    pub const COMBO_STEP: u32 = 10;

    /// Build-phase item prices
    pub const HOUSE_COST: u64 = 50;
    pub const TREE_COST: u64 = 20;
}

/// Mix a salt into a base seed for purpose-derived RNG streams
#[inline]
pub fn mix_seed(base: u64, salt: u64) -> u64 {
    salt.wrapping_mul(2654435761).wrapping_add(base)
}
