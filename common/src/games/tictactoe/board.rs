use super::types::{CELL_COUNT, Cell};

/// Row-major 3x3 grid: 0,1,2 top; 3,4,5 middle; 6,7,8 bottom.
pub type Board = [Cell; CELL_COUNT];

pub fn empty_board() -> Board {
    [None; CELL_COUNT]
}

pub fn get_available_moves(board: &Board) -> Vec<usize> {
    board
        .iter()
        .enumerate()
        .filter(|(_, cell)| cell.is_none())
        .map(|(index, _)| index)
        .collect()
}

pub fn is_valid_move(board: &Board, index: usize) -> bool {
    if index >= CELL_COUNT {
        return false;
    }
    board[index].is_none()
}

pub fn is_board_full(board: &Board) -> bool {
    board.iter().all(|cell| cell.is_some())
}
