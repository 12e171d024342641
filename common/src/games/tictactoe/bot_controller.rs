use crate::games::SessionRng;
use super::board::{Board, get_available_moves};
use super::game_state::{BOT_MARK, TicTacToeGameState};
use super::types::{CENTER, CORNERS, Mark, SIDES};
use super::win_detector::check_win;

pub struct BotInput {
    pub board: Board,
    pub bot_mark: Mark,
}

impl BotInput {
    pub fn new(board: Board, bot_mark: Mark) -> Self {
        Self { board, bot_mark }
    }

    pub fn from_game_state(state: &TicTacToeGameState) -> Self {
        Self {
            board: *state.board(),
            bot_mark: state.bot_mark(),
        }
    }
}

/// Picks the bot's cell by fixed priority: win, block, center, random corner,
/// random side, lowest free index. One ply only, so forks go unnoticed.
/// Returns `None` on a full board.
pub fn calculate_move(input: &BotInput, rng: &mut SessionRng) -> Option<usize> {
    let available_moves = get_available_moves(&input.board);
    if available_moves.is_empty() {
        return None;
    }

    let mut board = input.board;

    if let Some(index) = find_winning_move(&mut board, input.bot_mark, &available_moves) {
        return Some(index);
    }

    if let Some(index) = find_winning_move(&mut board, input.bot_mark.opponent(), &available_moves)
    {
        return Some(index);
    }

    if available_moves.contains(&CENTER) {
        return Some(CENTER);
    }

    if let Some(index) = pick_random_free(&available_moves, &CORNERS, rng) {
        return Some(index);
    }

    if let Some(index) = pick_random_free(&available_moves, &SIDES, rng) {
        return Some(index);
    }

    available_moves.first().copied()
}

/// Move for the computer player, which always plays `BOT_MARK`.
pub fn select_move(board: &Board, rng: &mut SessionRng) -> Option<usize> {
    calculate_move(&BotInput::new(*board, BOT_MARK), rng)
}

fn find_winning_move(board: &mut Board, mark: Mark, moves: &[usize]) -> Option<usize> {
    for &index in moves {
        board[index] = Some(mark);
        let winner = check_win(board);
        board[index] = None;

        if winner == Some(mark) {
            return Some(index);
        }
    }
    None
}

fn pick_random_free(moves: &[usize], candidates: &[usize], rng: &mut SessionRng) -> Option<usize> {
    let free: Vec<usize> = candidates
        .iter()
        .copied()
        .filter(|index| moves.contains(index))
        .collect();
    rng.choose(&free)
}
