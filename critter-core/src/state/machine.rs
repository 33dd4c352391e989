//! State machine definition

use super::events::Event;

/// Application screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AppState {
    /// Load ownership, grant the starting creature
    Init,
    /// Top level game menu
    TopMenu,
    /// List of owned creatures
    CreatureBrowse,
    /// Portrait and name of the current creature
    ShowCreature,
    /// Description of the current creature
    ShowDescription,
    /// Broadcasting beacons until a button is pressed
    Trading,
    /// Save and return to the launcher
    Exit,
    /// Grant every creature
    #[cfg(feature = "debug-unlock")]
    UnlockAll,
}

impl AppState {
    /// Check if this state shows a menu
    pub fn is_menu(&self) -> bool {
        matches!(self, AppState::TopMenu | AppState::CreatureBrowse)
    }

    /// Check if the controller processes input and IR in this state
    pub fn is_interactive(&self) -> bool {
        !matches!(self, AppState::Init | AppState::Exit)
    }

    /// Check if a top menu entry may lead to this state
    pub fn is_top_menu_target(&self) -> bool {
        match self {
            AppState::CreatureBrowse | AppState::Trading | AppState::Exit => true,
            #[cfg(feature = "debug-unlock")]
            AppState::UnlockAll => true,
            _ => false,
        }
    }

    /// Process an event and return the next state
    ///
    /// Events with no transition in the current state leave it unchanged.
    pub fn transition(self, event: Event) -> Self {
        use AppState::*;
        use Event::*;

        match (self, event) {
            // Init transitions
            (Init, InitComplete) => TopMenu,

            // TopMenu transitions
            (TopMenu, Activate(target)) if target.is_top_menu_target() => target,

            // CreatureBrowse transitions
            (CreatureBrowse, Select) => ShowCreature,
            (CreatureBrowse, Back) => TopMenu,

            // Creature detail transitions
            (ShowCreature, Select) => ShowDescription,
            (ShowCreature, Back) => CreatureBrowse,
            (ShowDescription, Back) => ShowCreature,

            // Trading transitions
            (Trading, CancelTrade) => TopMenu,

            // Exit is terminal until the app is entered again
            (Exit, ExitComplete) => Init,

            #[cfg(feature = "debug-unlock")]
            (UnlockAll, UnlockComplete) => TopMenu,

            // Invalid transitions are ignored
            (state, _) => state,
        }
    }
}
