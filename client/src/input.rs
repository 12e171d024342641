use common::games::tictactoe::CELL_COUNT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    Place(usize),
    Reset,
    Quit,
    Help,
}

/// Cells are typed 1-9 in reading order and mapped to board indices 0-8.
pub fn parse_input(line: &str) -> Result<InputCommand, String> {
    let trimmed = line.trim().to_ascii_lowercase();

    match trimmed.as_str() {
        "" => Err("Type a cell number (1-9), 'r' to play again or 'q' to quit".to_string()),
        "r" | "reset" | "again" => Ok(InputCommand::Reset),
        "q" | "quit" | "exit" => Ok(InputCommand::Quit),
        "h" | "help" | "?" => Ok(InputCommand::Help),
        other => match other.parse::<usize>() {
            Ok(cell) if (1..=CELL_COUNT).contains(&cell) => Ok(InputCommand::Place(cell - 1)),
            Ok(cell) => Err(format!("Cell {} does not exist, pick 1-{}", cell, CELL_COUNT)),
            Err(_) => Err(format!("Unknown command '{}'", other)),
        },
    }
}
