use common::games::tictactoe::{
    BOARD_SIZE, Board, GameSnapshot, GameStatus, HUMAN_MARK, Mark, Outcome, Position,
};
use common::version::VERSION;

pub const HELP_TEXT: &str = "Commands: 1-9 place your mark (reading order), r play again, q quit, h help";

pub fn outcome_text(outcome: &Outcome) -> Option<&'static str> {
    match outcome {
        Outcome::Win(line) if line.mark == HUMAN_MARK => Some("You Win!"),
        Outcome::Win(_) => Some("Computer Wins!"),
        Outcome::Draw => Some("It's a Draw!"),
        Outcome::InProgress => None,
    }
}

const X_COLOR: &str = "\x1b[94m";
const O_COLOR: &str = "\x1b[95m";
const RESET_COLOR: &str = "\x1b[0m";

/// Wraps `text` in the mark's colour: blue for X, pink for O.
fn paint(text: &str, mark: Option<Mark>, colored: bool) -> String {
    let color = match mark {
        Some(Mark::X) if colored => X_COLOR,
        Some(Mark::O) if colored => O_COLOR,
        _ => return text.to_string(),
    };
    format!("{}{}{}", color, text, RESET_COLOR)
}

pub fn status_text(snapshot: &GameSnapshot) -> &'static str {
    if let Some(text) = outcome_text(&snapshot.outcome) {
        return text;
    }
    match snapshot.status {
        GameStatus::XToMove => "Your Turn (X)",
        _ => "Computer is thinking...",
    }
}

fn render_cell(board: &Board, index: usize, snapshot: &GameSnapshot, colored: bool) -> String {
    let symbol = match board[index] {
        Some(mark) => paint(&mark.to_string(), Some(mark), colored),
        None => (index + 1).to_string(),
    };

    let highlighted = snapshot
        .outcome
        .winning_line()
        .is_some_and(|line| line.contains(index));

    if highlighted {
        format!("[{}]", symbol)
    } else {
        format!(" {} ", symbol)
    }
}

pub fn render_board(snapshot: &GameSnapshot, colored: bool) -> String {
    let board = &snapshot.board;
    let mut rows = Vec::with_capacity(BOARD_SIZE);

    for y in 0..BOARD_SIZE {
        let cells: Vec<String> = (0..BOARD_SIZE)
            .map(|x| render_cell(board, Position::new(x, y).to_index(), snapshot, colored))
            .collect();
        rows.push(cells.join("|"));
    }

    rows.join("\n---+---+---\n")
}

pub fn render_screen<'a>(
    snapshot: &GameSnapshot,
    events: impl Iterator<Item = &'a String>,
    colored: bool,
) -> String {
    let mut screen = String::new();
    screen.push_str(&format!("Tic Tac Toe v{}\nPlayer (X) vs. Computer (O)\n\n", VERSION));
    screen.push_str(&paint(status_text(snapshot), snapshot.outcome.winner(), colored));
    screen.push_str("\n\n");
    screen.push_str(&render_board(snapshot, colored));
    screen.push_str("\n\n");

    for event in events {
        screen.push_str("  ");
        screen.push_str(event);
        screen.push('\n');
    }

    if snapshot.status.is_over() {
        screen.push_str("\nPlay again? (r)  Quit? (q)\n");
    } else if snapshot.status == GameStatus::XToMove {
        screen.push_str("\nYour move (1-9): ");
    }

    screen
}
