use tracing::{info, warn};

use crate::{
    context::TurnContext,
    error::ArenaError,
    program::{TurnReducer, TurnSession},
    traits::{HasCurrentPlayer, HasTerminalState, TurnActionSerialization},
};

pub type Agent<PublicState> = fn(&PublicState, &mut TurnContext) -> u8;

#[derive(Debug, Clone, Copy)]
pub struct MatchConfig {
    pub seed: u64,
    /// Upper bound on applied actions, rejected ones included.
    pub max_turns: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            max_turns: 256,
        }
    }
}

// Currently limited to 2 players turn based games
pub fn run_match<PublicState, PrivateState, GameAction>(
    reducer: TurnReducer<PublicState, PrivateState, GameAction>,
    agents: [Agent<PublicState>; 2],
    config: MatchConfig,
) -> Result<TurnSession<PublicState, PrivateState, GameAction>, ArenaError>
where
    PublicState: Default + HasCurrentPlayer + HasTerminalState,
    PrivateState: Default,
    GameAction: TurnActionSerialization,
{
    let mut session = TurnSession::new(reducer, config.seed);

    for _ in 0..config.max_turns {
        if session.public_state().is_terminal() {
            break;
        }
        let player = session.public_state().current_player();
        if player > 1 {
            return Err(ArenaError::InvalidPlayer(player));
        }
        session.step_with(agents[usize::from(player)])?;
    }

    if !session.public_state().is_terminal() {
        warn!(max_turns = config.max_turns, "match stopped at turn limit");
    }
    info!(actions = session.actions().len(), "match finished");
    Ok(session)
}

/// Replays `actions` and checks that `agent`, playing as `player_id`, would have
/// chosen every action recorded for that player.
pub fn verify_agent_actions<PublicState, PrivateState, GameAction>(
    reducer: TurnReducer<PublicState, PrivateState, GameAction>,
    agent: Agent<PublicState>,
    actions: &[u8],
    player_id: u8,
    seed: u64,
) -> Result<TurnSession<PublicState, PrivateState, GameAction>, ArenaError>
where
    PublicState: Default + HasCurrentPlayer,
    PrivateState: Default,
    GameAction: TurnActionSerialization,
{
    if player_id != 0 && player_id != 1 {
        return Err(ArenaError::InvalidPlayer(player_id));
    }

    let mut session = TurnSession::new(reducer, seed);

    for (turn, &action) in actions.iter().enumerate() {
        let current_player = session.public_state().current_player();
        if current_player == player_id {
            let chosen = session.propose(agent, player_id);
            if chosen != action {
                return Err(ArenaError::AgentMismatch {
                    player: player_id,
                    turn,
                    recorded: action,
                    chosen,
                });
            }
        }
        session.apply(&[action])?;
    }

    Ok(session)
}
