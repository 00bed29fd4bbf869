use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    context::TurnContext,
    error::ActionError,
    traits::{HasCurrentPlayer, TurnActionSerialization},
};

pub type TurnReducer<PublicState, PrivateState, GameAction> =
    fn(&mut PublicState, &mut PrivateState, &GameAction, &mut TurnContext);

/// One running game: both states, both player contexts, and the raw actions
/// applied so far.
///
/// Local and remote actions take the same path through [`TurnSession::apply`],
/// which holds `&mut self` for the whole decode-and-reduce step.
pub struct TurnSession<PublicState, PrivateState, GameAction> {
    reducer: TurnReducer<PublicState, PrivateState, GameAction>,
    public_state: PublicState,
    private_state: PrivateState,
    contexts: [TurnContext; 2],
    actions: Vec<u8>,
}

impl<PublicState, PrivateState, GameAction> TurnSession<PublicState, PrivateState, GameAction>
where
    PublicState: Default + HasCurrentPlayer,
    PrivateState: Default,
    GameAction: TurnActionSerialization,
{
    pub fn new(reducer: TurnReducer<PublicState, PrivateState, GameAction>, seed: u64) -> Self {
        Self {
            reducer,
            public_state: PublicState::default(),
            private_state: PrivateState::default(),
            contexts: [TurnContext::new(seed, 0), TurnContext::new(seed, 1)],
            actions: Vec::new(),
        }
    }

    pub fn public_state(&self) -> &PublicState {
        &self.public_state
    }

    pub fn private_state(&self) -> &PrivateState {
        &self.private_state
    }

    pub fn actions(&self) -> &[u8] {
        &self.actions
    }

    /// Decodes exactly one action and reduces it on behalf of the player to move.
    /// Returns whatever the reducer left in that player's response slot.
    pub fn apply(&mut self, action: &[u8]) -> Result<Option<Value>, ActionError> {
        let (parsed, rest) = GameAction::deserialize(action).map_err(|err| {
            warn!(%err, "rejected action bytes");
            err
        })?;
        if !rest.is_empty() {
            return Err(ActionError::TrailingBytes(rest.len()));
        }
        let player = self.public_state.current_player();
        let context = &mut self.contexts[usize::from(player & 1)];

        debug!(player, action = ?action, "applying action");
        (self.reducer)(
            &mut self.public_state,
            &mut self.private_state,
            &parsed,
            context,
        );
        self.actions.extend_from_slice(action);
        Ok(context.take_client_response())
    }

    /// Lets `agent` pick an action for the player to move and applies it.
    pub fn step_with(
        &mut self,
        agent: fn(&PublicState, &mut TurnContext) -> u8,
    ) -> Result<u8, ActionError> {
        let player = self.public_state.current_player();
        let action = self.propose(agent, player);
        self.apply(&[action])?;
        Ok(action)
    }

    /// Asks `agent` what `player` would play now without applying it. The
    /// agent still draws from that player's RNG.
    pub fn propose(
        &mut self,
        agent: fn(&PublicState, &mut TurnContext) -> u8,
        player: u8,
    ) -> u8 {
        agent(
            &self.public_state,
            &mut self.contexts[usize::from(player & 1)],
        )
    }
}

/// Rebuilds a session by applying single-byte `actions` in order.
pub fn replay<PublicState, PrivateState, GameAction>(
    reducer: TurnReducer<PublicState, PrivateState, GameAction>,
    actions: &[u8],
    seed: u64,
) -> Result<TurnSession<PublicState, PrivateState, GameAction>, ActionError>
where
    PublicState: Default + HasCurrentPlayer,
    PrivateState: Default,
    GameAction: TurnActionSerialization,
{
    let mut session = TurnSession::new(reducer, seed);
    for action in actions {
        session.apply(std::slice::from_ref(action))?;
    }
    Ok(session)
}
