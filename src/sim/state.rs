//! Game state and core simulation types
//!
//! The [`GameState`] aggregate is the single mutable store. Components never
//! keep private copies of blocks, blast points or built items; everything
//! reads and writes through the named operations in `commands`.

use glam::{IVec3, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::physics::{BodyHandle, PhysicsWorld};

/// Current phase of a level's play loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Structure is on display, physics frozen; initial and re-entrant
    Scan,
    /// Player places demolition charges
    BlastPrep,
    /// Charges fired, blocks simulate and can be collected
    Demolition,
    /// Spend collected points on placeable items
    Build,
}

/// One destructible unit of the tower
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub id: u32,
    /// Column/layer position; x,z in the footprint, y counts layers from 0
    pub grid: IVec3,
    /// Cosmetic grey value in [SHADE_MIN, SHADE_MIN + SHADE_SPAN)
    pub shade: f32,
    /// Body owned by the physics collaborator
    pub body: BodyHandle,
    /// Set when the blast impulse has been applied; never resets within a level
    #[serde(default)]
    pub exploded: bool,
    /// Terminal flag, the block has been picked up and scored
    #[serde(default)]
    pub collected: bool,
}

impl Block {
    /// World position the block is spawned at
    pub fn anchor(&self) -> Vec3 {
        grid_anchor(self.grid)
    }
}

/// World position for a grid cell; layer 0 rests on the ground plane
pub fn grid_anchor(grid: IVec3) -> Vec3 {
    Vec3::new(
        grid.x as f32 * BLOCK_SIZE,
        grid.y as f32 * BLOCK_SIZE + BLOCK_SIZE / 2.0,
        grid.z as f32 * BLOCK_SIZE,
    )
}

/// A player-placed demolition charge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlastPoint {
    pub id: u32,
    pub pos: Vec3,
}

/// Placeable build-phase items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BuiltItemKind {
    #[default]
    House,
    Tree,
}

/// A purchased structure; persists across levels, cleared only on full reset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltItem {
    pub id: u32,
    pub kind: BuiltItemKind,
    pub pos: Vec3,
}

/// Notifications for the frontend, drained once per frame
///
/// The core never calls audio or UI directly; it queues events and the
/// driver forwards them. A dropped event can never corrupt game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    LevelStarted { level: u32, total_blocks: u32 },
    Detonated { charges: u32 },
    BlockCollected { block_id: u32, points: u64 },
    ItemBuilt { kind: BuiltItemKind, cost: u64 },
    GameReset,
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    /// RNG state
    pub rng_state: RngState,
    /// Current level (1-based, monotonic until reset)
    pub level: u32,
    /// Spendable score; never goes negative
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Current phase
    pub phase: GamePhase,
    /// Block count snapshot of the current structure
    pub total_blocks: u32,
    /// Blocks collected this level
    pub cleared_blocks: u32,
    /// Tower blocks (sorted by id for determinism)
    pub blocks: Vec<Block>,
    /// Active charges (sorted by id for determinism)
    pub blast_points: Vec<BlastPoint>,
    /// Purchased items, append-only except on full reset
    pub built_items: Vec<BuiltItem>,
    /// Item the next build-phase placement will buy
    pub selected_build_item: BuiltItemKind,
    /// Pending frontend notifications (not replayed from saves)
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a session at level 1 in Scan phase with the tower spawned
    pub fn new(seed: u64, world: &mut impl PhysicsWorld) -> Self {
        let mut state = Self {
            seed,
            rng_state: RngState::new(seed),
            level: 1,
            score: 0,
            time_ticks: 0,
            phase: GamePhase::Scan,
            total_blocks: 0,
            cleared_blocks: 0,
            blocks: Vec::new(),
            blast_points: Vec::new(),
            built_items: Vec::new(),
            selected_build_item: BuiltItemKind::default(),
            events: Vec::new(),
            next_id: 1,
        };

        super::structure::spawn_structure(&mut state, world);

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Look up a block by id
    pub fn block(&self, id: u32) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    /// Fraction of the current structure collected, in [0, 1]
    pub fn clearance_rate(&self) -> f32 {
        if self.total_blocks == 0 {
            0.0
        } else {
            self.cleared_blocks as f32 / self.total_blocks as f32
        }
    }

    /// Clearance as a whole percentage for HUD display
    pub fn clearance_percent(&self) -> u32 {
        (self.clearance_rate() * 100.0).round() as u32
    }

    /// Hand pending events to the frontend, leaving the queue empty
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Ensure entities are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.blocks.sort_by_key(|b| b.id);
        self.blast_points.sort_by_key(|p| p.id);
        self.built_items.sort_by_key(|i| i.id);
    }
}
