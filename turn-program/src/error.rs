use thiserror::Error;

/// Failures while turning wire bytes or JSON into a game action.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("empty action")]
    Empty,

    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("invalid action type `{0}`")]
    InvalidType(String),

    #[error("invalid data length for {action}: expected {expected}, got {actual}")]
    InvalidLength {
        action: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{0} out of bounds")]
    OutOfBounds(&'static str),

    #[error("{0} trailing byte(s) after action")]
    TrailingBytes(usize),
}

#[derive(Debug, Error)]
pub enum ArenaError {
    #[error("invalid player id {0}")]
    InvalidPlayer(u8),

    #[error("agent for player {player} chose {chosen} at turn {turn}, recorded action was {recorded}")]
    AgentMismatch {
        player: u8,
        turn: usize,
        recorded: u8,
        chosen: u8,
    },

    #[error(transparent)]
    Action(#[from] ActionError),
}
