use std::time::Duration;

pub const DEFAULT_BOT_DELAY: Duration = Duration::from_millis(700);
pub const MAX_BOT_DELAY_MS: u64 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicTacToeSessionSettings {
    pub bot_delay: Duration,
    pub seed: u64,
}

impl TicTacToeSessionSettings {
    pub fn new(bot_delay_ms: u64, seed: u64) -> Self {
        Self {
            bot_delay: Duration::from_millis(bot_delay_ms.min(MAX_BOT_DELAY_MS)),
            seed,
        }
    }
}

impl Default for TicTacToeSessionSettings {
    fn default() -> Self {
        Self {
            bot_delay: DEFAULT_BOT_DELAY,
            seed: rand::random(),
        }
    }
}
