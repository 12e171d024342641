use std::io::Write;
use std::sync::{Arc, Mutex};

use chrono::Local;
use common::games::GameBroadcaster;
use common::games::tictactoe::{GameSnapshot, HUMAN_MARK, Outcome, SessionEvent};
use ringbuffer::{AllocRingBuffer, RingBuffer};

use crate::ui::{HELP_TEXT, outcome_text, render_screen};

struct TerminalState {
    snapshot: Option<GameSnapshot>,
    event_log: AllocRingBuffer<String>,
}

/// Renders every session update to stdout and keeps a short rolling log of
/// what happened.
#[derive(Clone)]
pub struct TerminalBroadcaster {
    state: Arc<Mutex<TerminalState>>,
    clear_screen: bool,
    color: bool,
}

impl TerminalBroadcaster {
    pub fn new(event_log_size: usize, clear_screen: bool, color: bool) -> Self {
        Self {
            state: Arc::new(Mutex::new(TerminalState {
                snapshot: None,
                event_log: AllocRingBuffer::new(event_log_size),
            })),
            clear_screen,
            color,
        }
    }

    pub fn add_event(&self, message: impl AsRef<str>) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        let timestamp = Local::now().format("%H:%M:%S");
        state
            .event_log
            .enqueue(format!("{} {}", timestamp, message.as_ref()));
    }

    #[cfg(test)]
    pub fn events(&self) -> Vec<String> {
        self.state
            .lock()
            .map(|state| state.event_log.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn show_help(&self) {
        self.add_event(HELP_TEXT);
        self.redraw();
    }

    pub fn redraw(&self) {
        let Ok(state) = self.state.lock() else {
            return;
        };
        let Some(snapshot) = state.snapshot.as_ref() else {
            return;
        };

        let screen = render_screen(snapshot, state.event_log.iter(), self.color);
        let mut stdout = std::io::stdout().lock();
        if self.clear_screen {
            let _ = write!(stdout, "\x1b[2J\x1b[H");
        } else {
            let _ = writeln!(stdout);
        }
        let _ = write!(stdout, "{}", screen);
        let _ = stdout.flush();
    }

    fn set_snapshot(&self, snapshot: GameSnapshot) {
        if let Ok(mut state) = self.state.lock() {
            state.snapshot = Some(snapshot);
        }
    }
}

fn describe_event(event: &SessionEvent) -> String {
    match event {
        SessionEvent::MovePlaced { mark, index } if *mark == HUMAN_MARK => {
            format!("You played {}", index + 1)
        }
        SessionEvent::MovePlaced { index, .. } => format!("Computer played {}", index + 1),
        SessionEvent::MoveRejected { index, reason } => {
            format!("Cannot play {}: {}", index + 1, reason)
        }
        SessionEvent::Reset => "New game".to_string(),
    }
}

impl GameBroadcaster for TerminalBroadcaster {
    async fn broadcast_state(&self, snapshot: GameSnapshot) {
        self.set_snapshot(snapshot);
        self.redraw();
    }

    async fn broadcast_event(&self, event: SessionEvent) {
        self.add_event(describe_event(&event));
        if matches!(event, SessionEvent::MoveRejected { .. }) {
            self.redraw();
        }
    }

    async fn broadcast_game_over(&self, outcome: Outcome) {
        if let Some(text) = outcome_text(&outcome) {
            self.add_event(text);
        }
    }
}
