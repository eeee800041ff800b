//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod commands;
pub mod demolition;
pub mod economy;
pub mod state;
pub mod structure;
pub mod tick;

pub use commands::CommandError;
pub use state::{
    BlastPoint, Block, BuiltItem, BuiltItemKind, GameEvent, GamePhase, GameState, RngState,
    grid_anchor,
};
pub use structure::{block_count, tower_height};
pub use tick::tick;
