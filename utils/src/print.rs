use game_lib::{
    grid::{Grid, Owner, SIZE},
    scanner::WinLine,
    state::{GameState, GameStatus},
    Player,
};

fn symbol(owner: Owner) -> char {
    match owner {
        Owner::Empty => '-',
        Owner::PlayerA => 'X',
        Owner::PlayerB => 'O',
    }
}

fn player_symbol(player: Player) -> char {
    symbol(Owner::from(player))
}

/// The four `z` layers side by side, `y = 3` on the top row.
pub fn render_grid(grid: &Grid) -> String {
    render_marked(grid, None)
}

/// Like [`render_grid`], with the cells of `line` drawn as `*`.
pub fn render_marked(grid: &Grid, line: Option<&WinLine>) -> String {
    let mut out = String::new();
    for z in 0..SIZE {
        out.push_str(&format!("z={z}     "));
    }
    out = out.trim_end().to_string();
    out.push('\n');

    for y in (0..SIZE as u8).rev() {
        let mut row = Vec::with_capacity(SIZE);
        for z in 0..SIZE as u8 {
            let layer: Vec<String> = (0..SIZE as u8)
                .map(|x| {
                    let c = game_lib::Coord { x, y, z };
                    if line.is_some_and(|l| l.contains(c)) {
                        '*'.to_string()
                    } else {
                        symbol(grid.cell(c)).to_string()
                    }
                })
                .collect();
            row.push(layer.join(" "));
        }
        out.push_str(&row.join("   "));
        out.push('\n');
    }
    out
}

pub fn print_board(grid: &Grid) {
    print!("{}", render_grid(grid));
}

pub fn print_public_state(public_state: &GameState) {
    let mut line = None;
    match public_state.status() {
        GameStatus::InProgress => {
            println!("Current player: {}", player_symbol(public_state.turn()))
        }
        GameStatus::Won { winner, line: won } => {
            line = Some(won);
            println!("Winner: {}", player_symbol(*winner));
            let cells: Vec<String> = won
                .cells
                .iter()
                .map(|c| format!("({} {} {})", c.x, c.y, c.z))
                .collect();
            println!("Line: {}", cells.join(" "));
        }
        GameStatus::Drawn => println!("Winner: Draw"),
    }

    println!();

    print!("{}", render_marked(public_state.grid(), line));
}
