use clap::ValueEnum;
use eyre::WrapErr;
use game_lib::{
    action::GameAction,
    reducer::reducer,
    state::{GamePrivateState, GameState},
};
use tracing::info;
use tracing_subscriber::EnvFilter;
use turn_program::{
    arena::{run_match, verify_agent_actions, Agent, MatchConfig},
    program::TurnSession,
};

pub type CubeSession = TurnSession<GameState, GamePrivateState, GameAction>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AgentKind {
    Random,
    Minimax,
}

impl AgentKind {
    pub fn agent(self) -> Agent<GameState> {
        match self {
            AgentKind::Random => agent_random::agent,
            AgentKind::Minimax => agent_minimax::agent,
        }
    }
}

/// Installs the fmt subscriber; `RUST_LOG` overrides the `info` default.
pub fn setup_logger() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Runs one match and checks the recorded actions against both agents.
pub fn play_match(kinds: [AgentKind; 2], config: MatchConfig) -> eyre::Result<CubeSession> {
    let agents = kinds.map(AgentKind::agent);
    let session = run_match::<GameState, GamePrivateState, GameAction>(reducer, agents, config)
        .wrap_err("match failed")?;

    for (player, agent) in agents.into_iter().enumerate() {
        verify_agent_actions::<GameState, GamePrivateState, GameAction>(
            reducer,
            agent,
            session.actions(),
            player as u8,
            config.seed,
        )
        .wrap_err_with(|| format!("recorded actions do not match agent {player}"))?;
    }
    info!("recorded actions verified for both agents");

    Ok(session)
}
