//! Game state aggregate

use super::machine::AppState;
use crate::catalog::CreatureId;
use crate::menu::MenuLevel;

/// Everything the controller tracks between ticks
///
/// Owned and mutated only by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GameState {
    /// Active screen
    pub current_app_state: AppState,
    /// Contents of the menu widget
    pub menu_level: MenuLevel,
    /// Creature shown by the detail screens
    pub current_creature_id: CreatureId,
    /// This badge's starting creature, fixed at init
    pub initial_creature_id: CreatureId,
    /// Trading screen has been shown since entering `Trading`
    pub trading_active: bool,
    /// Screen must be redrawn at the end of the tick
    pub redraw_needed: bool,
    /// Creature selected when the creature list was last left
    pub last_browsed_creature_id: CreatureId,
}

impl GameState {
    /// Fresh state for a badge whose starting creature is `initial`
    pub fn new(initial: CreatureId) -> Self {
        Self {
            current_app_state: AppState::Init,
            menu_level: MenuLevel::Top,
            current_creature_id: initial,
            initial_creature_id: initial,
            trading_active: false,
            redraw_needed: false,
            last_browsed_creature_id: initial,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(CreatureId::FIRST)
    }
}
