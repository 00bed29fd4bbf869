use rand::{rngs::StdRng, Rng, SeedableRng};
use serde_json::Value;

/// Per-player state handed to reducers and agents.
///
/// The RNG is derived from the match seed and the player index, so replaying
/// a match with the same seed reproduces every random draw.
#[derive(Debug, Clone)]
pub struct TurnContext {
    player: u8,
    rng: StdRng,
    client_response: Option<Value>,
}

impl TurnContext {
    pub fn new(seed: u64, player: u8) -> Self {
        let mixed = seed ^ (u64::from(player) + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        Self {
            player,
            rng: StdRng::seed_from_u64(mixed),
            client_response: None,
        }
    }

    pub fn player(&self) -> u8 {
        self.player
    }

    pub fn rand_u32(&mut self) -> u32 {
        self.rng.gen()
    }

    /// Response slot the reducer fills for the client that sent the action.
    pub fn client_response(&mut self) -> &mut Option<Value> {
        &mut self.client_response
    }

    pub fn take_client_response(&mut self) -> Option<Value> {
        self.client_response.take()
    }
}
