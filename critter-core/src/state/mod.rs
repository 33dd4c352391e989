//! Application state machine
//!
//! Screens and the transitions between them are a pure function of the
//! current state and an event. Side effects of entering or leaving a state
//! live in the controller.

pub mod events;
pub mod game;
pub mod machine;

pub use events::Event;
pub use game::GameState;
pub use machine::AppState;
