use crate::error::ActionError;

pub trait TurnActionSerialization: Sized {
    /// Decodes one action from the front of `action` and returns the rest.
    fn deserialize(action: &[u8]) -> Result<(Self, &[u8]), ActionError>;
    fn serialize_json(json_str: &str) -> Result<Vec<u8>, ActionError>;
}

pub trait HasTerminalState {
    fn is_terminal(&self) -> bool;
}

/// Wire-encoded actions that are legal from the current state.
pub trait HasActions {
    fn actions(&self) -> Vec<u8>;
}

/// Index (0 or 1) of the player whose action the state expects next.
pub trait HasCurrentPlayer {
    fn current_player(&self) -> u8;
}
