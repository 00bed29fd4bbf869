//! Runtime for two-player, turn-based games.
//!
//! A game plugs in its public state, private state and action type, and a
//! reducer that applies one decoded action. Everything that reaches the state
//! goes through [`program::TurnSession::apply`], one action at a time.

pub mod arena;
pub mod context;
pub mod error;
pub mod program;
pub mod traits;

pub use error::{ActionError, ArenaError};
