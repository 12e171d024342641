use super::board::{Board, empty_board};
use super::types::{CELL_COUNT, GameStatus, Mark, Outcome, WinningLine};
use super::win_detector::evaluate;

pub const HUMAN_MARK: Mark = Mark::X;
pub const BOT_MARK: Mark = Mark::O;

#[derive(Debug, Clone)]
pub struct TicTacToeGameState {
    board: Board,
    current_mark: Mark,
    status: GameStatus,
    outcome: Outcome,
    last_move: Option<usize>,
    move_count: usize,
}

impl Default for TicTacToeGameState {
    fn default() -> Self {
        Self::new()
    }
}

impl TicTacToeGameState {
    pub fn new() -> Self {
        Self {
            board: empty_board(),
            current_mark: HUMAN_MARK,
            status: GameStatus::to_move(HUMAN_MARK),
            outcome: Outcome::InProgress,
            last_move: None,
            move_count: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_mark(&self) -> Mark {
        self.current_mark
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn winning_line(&self) -> Option<&WinningLine> {
        self.outcome.winning_line()
    }

    pub fn last_move(&self) -> Option<usize> {
        self.last_move
    }

    pub fn move_count(&self) -> usize {
        self.move_count
    }

    pub fn bot_mark(&self) -> Mark {
        BOT_MARK
    }

    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    pub fn is_bot_turn(&self) -> bool {
        self.status.mark_to_move() == Some(BOT_MARK)
    }

    /// Single legality predicate for every move, human or bot.
    pub fn check_move(&self, mark: Mark, index: usize) -> Result<(), String> {
        if self.status.is_over() {
            return Err("Game is already over".to_string());
        }

        if mark != self.current_mark {
            return Err(format!("Not {}'s turn", mark));
        }

        if index >= CELL_COUNT {
            return Err("Position out of bounds".to_string());
        }

        if self.board[index].is_some() {
            return Err("Cell is already marked".to_string());
        }

        Ok(())
    }

    pub fn place_mark(&mut self, mark: Mark, index: usize) -> Result<(), String> {
        self.check_move(mark, index)?;

        self.board[index] = Some(mark);
        self.last_move = Some(index);
        self.move_count += 1;

        self.check_game_over();

        if !self.status.is_over() {
            self.switch_turn();
        }

        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn switch_turn(&mut self) {
        self.current_mark = self.current_mark.opponent();
        self.status = GameStatus::to_move(self.current_mark);
    }

    fn check_game_over(&mut self) {
        self.outcome = evaluate(&self.board);
        self.status = match self.outcome {
            Outcome::Win(line) => GameStatus::won_by(line.mark),
            Outcome::Draw => GameStatus::Draw,
            Outcome::InProgress => self.status,
        };
    }
}
