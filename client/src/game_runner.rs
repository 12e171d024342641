use std::io::BufRead;

use common::games::tictactoe::{
    Scoreboard, SessionCommand, TicTacToeSession, TicTacToeSessionSettings,
};
use common::log;
use tokio::sync::mpsc;

use crate::broadcaster::TerminalBroadcaster;
use crate::config::UiConfig;
use crate::input::{InputCommand, parse_input};

/// Reads stdin on a plain thread: a blocking read cannot be cancelled, and a
/// tokio stdin read left pending would hold up runtime shutdown after quit.
fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (line_tx, line_rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if line_tx.send(line).is_err() {
                break;
            }
        }
    });
    line_rx
}

fn to_session_command(command: InputCommand) -> Option<SessionCommand> {
    match command {
        InputCommand::Place(index) => Some(SessionCommand::Place { index }),
        InputCommand::Reset => Some(SessionCommand::Reset),
        InputCommand::Quit => Some(SessionCommand::Quit),
        InputCommand::Help => None,
    }
}

pub async fn run_game(
    settings: TicTacToeSessionSettings,
    ui_config: &UiConfig,
) -> Result<Scoreboard, String> {
    let broadcaster = TerminalBroadcaster::new(
        ui_config.event_log_size,
        ui_config.clear_screen,
        ui_config.color,
    );
    let (command_tx, command_rx) = mpsc::unbounded_channel();

    let session_broadcaster = broadcaster.clone();
    let mut session_handle = tokio::spawn(async move {
        TicTacToeSession::run(settings, command_rx, session_broadcaster).await
    });

    let mut line_rx = spawn_stdin_reader();

    loop {
        tokio::select! {
            result = &mut session_handle => {
                return result.map_err(|e| format!("Game session failed: {}", e));
            }
            line = line_rx.recv() => {
                let Some(line) = line else {
                    log!("stdin closed, ending game");
                    let _ = command_tx.send(SessionCommand::Quit);
                    return session_handle
                        .await
                        .map_err(|e| format!("Game session failed: {}", e));
                };

                match parse_input(&line) {
                    Ok(command) => match to_session_command(command) {
                        Some(session_command) => {
                            if command_tx.send(session_command).is_err() {
                                log!("session no longer accepts commands");
                            }
                        }
                        None => broadcaster.show_help(),
                    },
                    Err(message) => {
                        broadcaster.add_event(message);
                        broadcaster.redraw();
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_is_handled_locally() {
        assert_eq!(to_session_command(InputCommand::Help), None);
    }

    #[test]
    fn test_commands_map_to_session() {
        assert_eq!(
            to_session_command(InputCommand::Place(4)),
            Some(SessionCommand::Place { index: 4 })
        );
        assert_eq!(to_session_command(InputCommand::Reset), Some(SessionCommand::Reset));
        assert_eq!(to_session_command(InputCommand::Quit), Some(SessionCommand::Quit));
    }
}
