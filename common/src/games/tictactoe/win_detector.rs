use super::board::{Board, is_board_full};
use super::types::{Mark, Outcome, WinningLine};

/// Rows, then columns, then diagonals. Evaluation order matters: the first
/// completed line is the one reported.
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

pub fn evaluate(board: &Board) -> Outcome {
    if let Some(line) = check_win_with_line(board) {
        return Outcome::Win(line);
    }

    if is_board_full(board) {
        return Outcome::Draw;
    }

    Outcome::InProgress
}

pub fn check_win(board: &Board) -> Option<Mark> {
    check_win_with_line(board).map(|line| line.mark)
}

pub fn check_win_with_line(board: &Board) -> Option<WinningLine> {
    WINNING_LINES.iter().find_map(|&cells| {
        let [a, b, c] = cells;
        match board[a] {
            Some(mark) if board[b] == Some(mark) && board[c] == Some(mark) => {
                Some(WinningLine::new(mark, cells))
            }
            _ => None,
        }
    })
}
