use std::io::{self, BufRead, Write};

use clap::Parser;
use cube_script::{setup_logger, AgentKind};
use game_lib::{codec, new_game, state::GameState, Outcome, PlacementResult};
use game_utils::print::{print_board, print_public_state};
use tracing::{info, warn};
use turn_program::{context::TurnContext, traits::HasTerminalState};

/// Interactive game on stdin. Enter `x y` to drop a disc.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Let an agent answer every move of the human player.
    #[arg(long, env = "CUBE_OPPONENT", value_enum)]
    opponent: Option<AgentKind>,

    #[arg(long, env = "CUBE_SEED", default_value_t = 0)]
    seed: u64,
}

enum Command {
    Drop(i64, i64),
    New,
    Save,
    Load(String),
    Show,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        ["new"] => Some(Command::New),
        ["save"] => Some(Command::Save),
        ["load", text] => Some(Command::Load(text.to_string())),
        ["show"] => Some(Command::Show),
        ["quit"] | ["exit"] => Some(Command::Quit),
        [x, y] => Some(Command::Drop(x.parse().ok()?, y.parse().ok()?)),
        _ => None,
    }
}

fn report(result: &PlacementResult) {
    match result {
        PlacementResult::Placed { at, outcome } => {
            println!("placed at ({} {} {})", at.x, at.y, at.z);
            match outcome {
                Outcome::WinDetected(_) => println!("four in a row!"),
                Outcome::Draw => println!("board full, draw"),
                Outcome::NoWin => {}
            }
        }
        PlacementResult::Rejected(reason) => println!("rejected: {reason:?}"),
    }
}

fn main() -> eyre::Result<()> {
    dotenv::dotenv().ok();
    setup_logger();

    let args = Args::parse();
    let mut context = TurnContext::new(args.seed, 1);
    let mut state: GameState = new_game();
    info!(opponent = ?args.opponent, "new game");
    print_public_state(&state);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match parse_command(&line) {
            Some(Command::Drop(x, y)) => match state.drop(x, y) {
                Ok(result) => {
                    report(&result);
                    if let (Some(kind), false, false) =
                        (args.opponent, result.is_rejected(), state.is_terminal())
                    {
                        let column = kind.agent()(&state, &mut context);
                        let (x, y) = (i64::from(column % 4), i64::from(column / 4));
                        match state.drop(x, y) {
                            Ok(reply) => report(&reply),
                            Err(err) => warn!(%err, "agent picked an invalid column"),
                        }
                    }
                    print_public_state(&state);
                }
                Err(err) => println!("{err}"),
            },
            Some(Command::New) => {
                state = new_game();
                print_public_state(&state);
            }
            Some(Command::Save) => println!("{}", hex::encode(codec::encode(&state))),
            Some(Command::Load(text)) => {
                let decoded = hex::decode(text.trim())
                    .map_err(|e| e.to_string())
                    .and_then(|bytes| codec::decode(&bytes).map_err(|e| e.to_string()));
                match decoded {
                    Ok(loaded) => {
                        state = loaded;
                        print_public_state(&state);
                    }
                    Err(err) => println!("cannot load: {err}"),
                }
            }
            Some(Command::Show) => print_board(state.grid()),
            Some(Command::Quit) => break,
            None => println!("commands: x y | new | save | load <hex> | show | quit"),
        }
    }

    Ok(())
}
