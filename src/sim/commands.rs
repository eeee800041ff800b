//! Phase-gated operations on the game state
//!
//! Every mutation a frontend can request goes through these methods. A
//! rejected call returns an error and leaves the state exactly as it was;
//! there is no panic path in any of them.

use glam::Vec3;
use thiserror::Error;

use super::state::{BlastPoint, BuiltItem, BuiltItemKind, GameEvent, GamePhase, GameState};
use crate::physics::{BodyMode, PhysicsWorld};

/// Why an operation was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("operation requires the {expected:?} phase, current phase is {actual:?}")]
    WrongPhase {
        expected: GamePhase,
        actual: GamePhase,
    },
    #[error("cannot detonate with no charges placed")]
    NoChargesPlaced,
    #[error("insufficient funds: need {cost}, have {balance}")]
    InsufficientFunds { cost: u64, balance: u64 },
    #[error("no blast point with id {0}")]
    UnknownBlastPoint(u32),
    #[error("no block with id {0}")]
    UnknownBlock(u32),
}

impl GameState {
    fn require_phase(&self, expected: GamePhase) -> Result<(), CommandError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(CommandError::WrongPhase {
                expected,
                actual: self.phase,
            })
        }
    }

    /// Scan -> BlastPrep; opens charge placement
    pub fn begin_blast_prep(&mut self) -> Result<(), CommandError> {
        self.require_phase(GamePhase::Scan)?;
        self.phase = GamePhase::BlastPrep;
        log::debug!("Blast prep started on level {}", self.level);
        Ok(())
    }

    /// Register a charge at a world position and return its id
    pub fn place_blast_point(&mut self, pos: Vec3) -> Result<u32, CommandError> {
        self.require_phase(GamePhase::BlastPrep)?;
        let id = self.next_entity_id();
        self.blast_points.push(BlastPoint { id, pos });
        Ok(id)
    }

    /// Withdraw a charge placed earlier in the same prep phase
    pub fn remove_blast_point(&mut self, id: u32) -> Result<(), CommandError> {
        self.require_phase(GamePhase::BlastPrep)?;
        let idx = self
            .blast_points
            .iter()
            .position(|p| p.id == id)
            .ok_or(CommandError::UnknownBlastPoint(id))?;
        self.blast_points.remove(idx);
        Ok(())
    }

    /// BlastPrep -> Demolition; unfreezes every block
    ///
    /// Requires at least one charge. The phase flips before the detonation
    /// event is queued, so a failing cue can never hold up the transition.
    pub fn detonate(&mut self, world: &mut impl PhysicsWorld) -> Result<(), CommandError> {
        self.require_phase(GamePhase::BlastPrep)?;
        if self.blast_points.is_empty() {
            return Err(CommandError::NoChargesPlaced);
        }

        for block in &self.blocks {
            world.set_mode(block.body, BodyMode::Dynamic);
        }
        self.phase = GamePhase::Demolition;
        self.events.push(GameEvent::Detonated {
            charges: self.blast_points.len() as u32,
        });
        log::info!(
            "Detonated {} charges on level {}",
            self.blast_points.len(),
            self.level
        );
        Ok(())
    }

    /// Pick up a block, award points and remove its body from the scene
    ///
    /// Collecting an already-collected block is a no-op worth zero points.
    /// Works on any live block, exploded or not.
    pub fn collect_block(
        &mut self,
        id: u32,
        world: &mut impl PhysicsWorld,
    ) -> Result<u64, CommandError> {
        self.require_phase(GamePhase::Demolition)?;
        let Some(block) = self.blocks.iter_mut().find(|b| b.id == id) else {
            return Err(CommandError::UnknownBlock(id));
        };
        if block.collected {
            return Ok(0);
        }
        block.collected = true;
        world.despawn_body(block.body);

        let points = self.award_collection();
        self.events.push(GameEvent::BlockCollected {
            block_id: id,
            points,
        });
        Ok(points)
    }

    /// Demolition -> Build; manual, no computation attached
    pub fn finish_demolition(&mut self) -> Result<(), CommandError> {
        self.require_phase(GamePhase::Demolition)?;
        self.phase = GamePhase::Build;
        Ok(())
    }

    /// Choose which item the next placement buys
    pub fn select_build_item(&mut self, kind: BuiltItemKind) {
        self.selected_build_item = kind;
    }

    /// Buy the selected item at a world position
    ///
    /// The debit and the placement are atomic: on insufficient funds nothing
    /// is placed and the balance is untouched.
    pub fn place_built_item(&mut self, pos: Vec3) -> Result<u32, CommandError> {
        self.require_phase(GamePhase::Build)?;
        let kind = self.selected_build_item;
        let cost = kind.cost();
        if !self.try_debit(cost) {
            return Err(CommandError::InsufficientFunds {
                cost,
                balance: self.score,
            });
        }
        let id = self.next_entity_id();
        self.built_items.push(BuiltItem { id, kind, pos });
        self.events.push(GameEvent::ItemBuilt { kind, cost });
        log::info!("Built {:?} for {} points, {} left", kind, cost, self.score);
        Ok(id)
    }

    /// Build -> Scan with the next, taller tower
    ///
    /// Keeps score and built items; charges and the clear counter reset with
    /// the regenerated structure.
    pub fn next_level(&mut self, world: &mut impl PhysicsWorld) -> Result<(), CommandError> {
        self.require_phase(GamePhase::Build)?;
        self.level += 1;
        self.blast_points.clear();
        self.phase = GamePhase::Scan;
        super::structure::spawn_structure(self, world);
        Ok(())
    }

    /// Full reset from any phase: back to level 1 with zero score
    ///
    /// Charges, built items and the clear counter are wiped before the level
    /// 1 tower regenerates. Always permitted.
    pub fn reset_game(&mut self, world: &mut impl PhysicsWorld) {
        self.level = 1;
        self.score = 0;
        self.blast_points.clear();
        self.built_items.clear();
        self.selected_build_item = BuiltItemKind::default();
        self.phase = GamePhase::Scan;
        self.events.push(GameEvent::GameReset);
        super::structure::spawn_structure(self, world);
        log::info!("Game reset");
    }
}
