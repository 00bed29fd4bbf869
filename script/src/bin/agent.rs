use clap::Parser;
use cube_script::{play_match, setup_logger, AgentKind};
use game_utils::print::print_public_state;
use serde_json::json;
use tracing::info;
use turn_program::arena::MatchConfig;

/// Plays one match between two agents and checks the recorded actions.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    #[arg(long, env = "CUBE_AGENT_A", value_enum, default_value = "random")]
    agent_a: AgentKind,

    #[arg(long, env = "CUBE_AGENT_B", value_enum, default_value = "minimax")]
    agent_b: AgentKind,

    #[arg(long, env = "CUBE_SEED", default_value_t = 0)]
    seed: u64,

    #[arg(long, env = "CUBE_MAX_TURNS", default_value_t = 256)]
    max_turns: usize,

    /// Print the final state as JSON instead of the board.
    #[arg(long)]
    json: bool,
}

fn main() -> eyre::Result<()> {
    // Setup the logger.
    dotenv::dotenv().ok();
    setup_logger();

    let args = Args::parse();
    let config = MatchConfig {
        seed: args.seed,
        max_turns: args.max_turns,
    };
    info!(agent_a = ?args.agent_a, agent_b = ?args.agent_b, seed = args.seed, "starting match");
    let session = play_match([args.agent_a, args.agent_b], config)?;

    let public_state = session.public_state();
    if args.json {
        let out = json!({
            "state": public_state,
            "actions": session.actions(),
            "moves": session.private_state().moves,
        });
        println!("{out}");
    } else {
        print_public_state(public_state);
        println!();
        println!("Moves: {:?}", public_state.moves());
    }

    Ok(())
}
