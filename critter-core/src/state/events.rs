//! Events that trigger state transitions

use super::machine::AppState;

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // Lifecycle events
    /// Storage loaded, starting creature granted
    InitComplete,
    /// Ownership saved and control handed back to the launcher
    ExitComplete,

    // Navigation events
    /// Top menu entry confirmed; carries the entry's target
    Activate(AppState),
    /// Confirm on a creature list or detail screen
    Select,
    /// Left or B
    Back,

    // Trading events
    /// Any button pressed while trading
    CancelTrade,

    /// Every creature granted
    #[cfg(feature = "debug-unlock")]
    UnlockComplete,
}
