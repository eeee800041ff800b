//! Semantic text keys
//!
//! The core never holds translated text. UI-facing strings are addressed by
//! stable key ids; a frontend [`Localizer`] resolves them against its own
//! translation tables.

use crate::sim::{BuiltItemKind, GamePhase};

/// Stable key for every localizable string the game surfaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextKey {
    /// App title shown on the start screen
    GameTitle,
    /// Splash text while the frontend boots
    Loading,
    /// Banner for the scan phase
    PhaseScan,
    /// Banner for blast preparation
    PhaseBlastPrep,
    /// Banner while debris is cleaned up
    PhaseDemolition,
    /// Banner for build mode
    PhaseBuild,
    /// Detonate button
    ActionDetonate,
    /// Advance-to-next-level button
    ActionNext,
    /// Start-over button
    ActionReset,
    /// Score readout label
    HudScore,
    /// House build option
    ItemHouse,
    /// Tree build option
    ItemTree,
}

impl TextKey {
    /// Every key, for frontends building their translation tables
    pub const ALL: [TextKey; 12] = [
        TextKey::GameTitle,
        TextKey::Loading,
        TextKey::PhaseScan,
        TextKey::PhaseBlastPrep,
        TextKey::PhaseDemolition,
        TextKey::PhaseBuild,
        TextKey::ActionDetonate,
        TextKey::ActionNext,
        TextKey::ActionReset,
        TextKey::HudScore,
        TextKey::ItemHouse,
        TextKey::ItemTree,
    ];

    /// Stable id used in translation resources
    pub fn as_str(self) -> &'static str {
        match self {
            TextKey::GameTitle => "game_title",
            TextKey::Loading => "loading",
            TextKey::PhaseScan => "phase_scan",
            TextKey::PhaseBlastPrep => "phase_blast",
            TextKey::PhaseDemolition => "phase_demolition",
            TextKey::PhaseBuild => "phase_build",
            TextKey::ActionDetonate => "btn_blast",
            TextKey::ActionNext => "btn_next",
            TextKey::ActionReset => "btn_reset",
            TextKey::HudScore => "score",
            TextKey::ItemHouse => "item_house",
            TextKey::ItemTree => "item_tree",
        }
    }
}

/// Banner key for a phase
pub fn phase_label(phase: GamePhase) -> TextKey {
    match phase {
        GamePhase::Scan => TextKey::PhaseScan,
        GamePhase::BlastPrep => TextKey::PhaseBlastPrep,
        GamePhase::Demolition => TextKey::PhaseDemolition,
        GamePhase::Build => TextKey::PhaseBuild,
    }
}

/// Menu label key for a build item
pub fn item_label(kind: BuiltItemKind) -> TextKey {
    match kind {
        BuiltItemKind::House => TextKey::ItemHouse,
        BuiltItemKind::Tree => TextKey::ItemTree,
    }
}

/// Resolver from key to display string, implemented by the frontend
pub trait Localizer {
    fn text(&self, key: TextKey) -> String;
}

/// Resolver that echoes raw key ids, for headless runs and tests
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyEcho;

impl Localizer for KeyEcho {
    fn text(&self, key: TextKey) -> String {
        key.as_str().to_string()
    }
}
