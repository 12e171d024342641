mod board;
mod bot_controller;
mod game_state;
mod session;
mod settings;
mod types;
mod win_detector;

pub use board::{Board, empty_board, get_available_moves, is_board_full, is_valid_move};
pub use bot_controller::{BotInput, calculate_move, select_move};
pub use game_state::{BOT_MARK, HUMAN_MARK, TicTacToeGameState};
pub use session::{GameSnapshot, Scoreboard, SessionCommand, SessionEvent, TicTacToeSession};
pub use settings::{DEFAULT_BOT_DELAY, MAX_BOT_DELAY_MS, TicTacToeSessionSettings};
pub use types::{
    BOARD_SIZE, CELL_COUNT, CENTER, CORNERS, Cell, GameStatus, Mark, Outcome, Position, SIDES,
    WinningLine,
};
pub use win_detector::{WINNING_LINES, check_win, check_win_with_line, evaluate};

