use std::pin::Pin;

use tokio::sync::mpsc;
use tokio::time::Sleep;

use crate::games::{GameBroadcaster, SessionRng};
use crate::log;
use super::board::Board;
use super::bot_controller::{BotInput, calculate_move};
use super::game_state::{BOT_MARK, HUMAN_MARK, TicTacToeGameState};
use super::settings::TicTacToeSessionSettings;
use super::types::{GameStatus, Mark, Outcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    Place { index: usize },
    Reset,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSnapshot {
    pub board: Board,
    pub status: GameStatus,
    pub outcome: Outcome,
    pub last_move: Option<usize>,
}

impl GameSnapshot {
    pub fn from_game_state(state: &TicTacToeGameState) -> Self {
        Self {
            board: *state.board(),
            status: state.status(),
            outcome: state.outcome(),
            last_move: state.last_move(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    MovePlaced { mark: Mark, index: usize },
    MoveRejected { index: usize, reason: String },
    Reset,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scoreboard {
    pub human_wins: u32,
    pub bot_wins: u32,
    pub draws: u32,
}

impl Scoreboard {
    pub fn games_played(&self) -> u32 {
        self.human_wins + self.bot_wins + self.draws
    }

    fn record(&mut self, outcome: &Outcome) {
        match outcome.winner() {
            Some(mark) if mark == HUMAN_MARK => self.human_wins += 1,
            Some(_) => self.bot_wins += 1,
            None if *outcome == Outcome::Draw => self.draws += 1,
            None => {}
        }
    }
}

enum Wake {
    BotTimer,
    Command(Option<SessionCommand>),
}

pub struct TicTacToeSession;

impl TicTacToeSession {
    /// Drives one game (and its replays) until `Quit` or the command channel
    /// closes. The bot's move is applied only once its delay elapses on a board
    /// that is still waiting for it; a reset drops the pending timer.
    pub async fn run(
        settings: TicTacToeSessionSettings,
        mut command_rx: mpsc::UnboundedReceiver<SessionCommand>,
        broadcaster: impl GameBroadcaster,
    ) -> Scoreboard {
        let mut state = TicTacToeGameState::new();
        let mut rng = SessionRng::new(settings.seed);
        let mut scoreboard = Scoreboard::default();
        let mut bot_timer: Option<Pin<Box<Sleep>>> = None;
        let mut state_changed = true;

        log!("[session] started, seed {}, bot delay {:?}", rng.seed(), settings.bot_delay);

        loop {
            if state_changed {
                broadcaster
                    .broadcast_state(GameSnapshot::from_game_state(&state))
                    .await;
                state_changed = false;
            }

            if state.is_bot_turn() && bot_timer.is_none() {
                bot_timer = Some(Box::pin(tokio::time::sleep(settings.bot_delay)));
            }

            let wake = match bot_timer.as_mut() {
                Some(timer) => tokio::select! {
                    biased;
                    command = command_rx.recv() => Wake::Command(command),
                    _ = timer => Wake::BotTimer,
                },
                None => Wake::Command(command_rx.recv().await),
            };

            match wake {
                Wake::BotTimer => {
                    bot_timer = None;
                    if play_bot_turn(&mut state, &mut rng, &broadcaster).await {
                        state_changed = true;
                        announce_if_over(&state, &mut scoreboard, &broadcaster).await;
                    }
                }
                Wake::Command(None) => {
                    log!("[session] command channel closed");
                    break;
                }
                Wake::Command(Some(SessionCommand::Quit)) => {
                    log!("[session] quit requested");
                    break;
                }
                Wake::Command(Some(SessionCommand::Reset)) => {
                    if bot_timer.take().is_some() {
                        log!("[session] pending bot move discarded by reset");
                    }
                    state.reset();
                    state_changed = true;
                    broadcaster.broadcast_event(SessionEvent::Reset).await;
                }
                Wake::Command(Some(SessionCommand::Place { index })) => {
                    match state.place_mark(HUMAN_MARK, index) {
                        Ok(()) => {
                            state_changed = true;
                            broadcaster
                                .broadcast_event(SessionEvent::MovePlaced {
                                    mark: HUMAN_MARK,
                                    index,
                                })
                                .await;
                            announce_if_over(&state, &mut scoreboard, &broadcaster).await;
                        }
                        Err(reason) => {
                            log!("[session] player move at {} rejected: {}", index, reason);
                            broadcaster
                                .broadcast_event(SessionEvent::MoveRejected { index, reason })
                                .await;
                        }
                    }
                }
            }
        }

        log!(
            "[session] finished after {} games: {} won, {} lost, {} drawn",
            scoreboard.games_played(),
            scoreboard.human_wins,
            scoreboard.bot_wins,
            scoreboard.draws
        );

        scoreboard
    }
}

async fn play_bot_turn(
    state: &mut TicTacToeGameState,
    rng: &mut SessionRng,
    broadcaster: &impl GameBroadcaster,
) -> bool {
    if !state.is_bot_turn() {
        return false;
    }

    let bot_input = BotInput::from_game_state(state);
    let Some(index) = calculate_move(&bot_input, rng) else {
        log!("[session] bot found no free cell");
        return false;
    };

    match state.place_mark(BOT_MARK, index) {
        Ok(()) => {
            broadcaster
                .broadcast_event(SessionEvent::MovePlaced {
                    mark: BOT_MARK,
                    index,
                })
                .await;
            true
        }
        Err(e) => {
            log!("[session] bot failed to place mark at {}: {}", index, e);
            false
        }
    }
}

async fn announce_if_over(
    state: &TicTacToeGameState,
    scoreboard: &mut Scoreboard,
    broadcaster: &impl GameBroadcaster,
) {
    if !state.is_over() {
        return;
    }

    let outcome = state.outcome();
    scoreboard.record(&outcome);
    log!("[session] game over after {} moves: {:?}", state.move_count(), outcome);
    broadcaster.broadcast_game_over(outcome).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::board::get_available_moves;
    use crate::games::tictactoe::MAX_BOT_DELAY_MS;
    use crate::games::tictactoe::win_detector::evaluate;
    use std::time::Duration;
    use tokio::task::JoinHandle;
    use tokio::time::{Instant, sleep, timeout};

    #[derive(Debug)]
    enum Published {
        State(GameSnapshot),
        Event(SessionEvent),
        GameOver(Outcome),
    }

    #[derive(Clone)]
    struct RecordingBroadcaster {
        tx: mpsc::UnboundedSender<Published>,
    }

    impl GameBroadcaster for RecordingBroadcaster {
        async fn broadcast_state(&self, snapshot: GameSnapshot) {
            let _ = self.tx.send(Published::State(snapshot));
        }

        async fn broadcast_event(&self, event: SessionEvent) {
            let _ = self.tx.send(Published::Event(event));
        }

        async fn broadcast_game_over(&self, outcome: Outcome) {
            let _ = self.tx.send(Published::GameOver(outcome));
        }
    }

    struct Harness {
        commands: mpsc::UnboundedSender<SessionCommand>,
        published: mpsc::UnboundedReceiver<Published>,
        handle: JoinHandle<Scoreboard>,
    }

    fn start(delay_ms: u64) -> Harness {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (published_tx, published_rx) = mpsc::unbounded_channel();
        let broadcaster = RecordingBroadcaster { tx: published_tx };
        let settings = TicTacToeSessionSettings::new(delay_ms, 17);
        let handle = tokio::spawn(TicTacToeSession::run(settings, command_rx, broadcaster));

        Harness {
            commands: command_tx,
            published: published_rx,
            handle,
        }
    }

    impl Harness {
        async fn next(&mut self) -> Published {
            timeout(Duration::from_secs(5), self.published.recv())
                .await
                .expect("session went quiet")
                .expect("session ended")
        }

        async fn wait_for(&mut self, predicate: impl Fn(&Published) -> bool) -> Published {
            loop {
                let published = self.next().await;
                if predicate(&published) {
                    return published;
                }
            }
        }

        fn send(&self, command: SessionCommand) {
            self.commands.send(command).unwrap();
        }
    }

    #[tokio::test]
    async fn test_initial_state_is_broadcast() {
        let mut harness = start(0);

        let first = harness.next().await;

        assert!(matches!(
            first,
            Published::State(GameSnapshot { status: GameStatus::XToMove, outcome: Outcome::InProgress, .. })
        ));
        harness.send(SessionCommand::Quit);
        assert_eq!(harness.handle.await.unwrap(), Scoreboard::default());
    }

    #[tokio::test]
    async fn test_bot_replies_after_delay() {
        let mut harness = start(10);
        harness.send(SessionCommand::Place { index: 0 });

        let reply = harness
            .wait_for(|p| matches!(p, Published::Event(SessionEvent::MovePlaced { mark: Mark::O, .. })))
            .await;

        assert!(matches!(
            reply,
            Published::Event(SessionEvent::MovePlaced { mark: Mark::O, index: 4 })
        ));
        let state = harness
            .wait_for(|p| matches!(p, Published::State(_)))
            .await;
        if let Published::State(snapshot) = state {
            assert_eq!(snapshot.status, GameStatus::XToMove);
            assert_eq!(snapshot.board[4], Some(Mark::O));
        }
        harness.send(SessionCommand::Quit);
        harness.handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_reset_discards_pending_bot_move() {
        let mut harness = start(MAX_BOT_DELAY_MS);
        harness.send(SessionCommand::Place { index: 0 });
        harness
            .wait_for(|p| matches!(p, Published::State(s) if s.status == GameStatus::OToMove))
            .await;

        harness.send(SessionCommand::Reset);
        let fresh = harness
            .wait_for(|p| matches!(p, Published::State(s) if s.last_move.is_none()))
            .await;
        harness.send(SessionCommand::Quit);
        harness.handle.await.unwrap();

        if let Published::State(snapshot) = fresh {
            assert_eq!(snapshot.status, GameStatus::XToMove);
            assert_eq!(evaluate(&snapshot.board), Outcome::InProgress);
            assert!(snapshot.board.iter().all(|cell| cell.is_none()));
        }
        while let Ok(published) = harness.published.try_recv() {
            assert!(!matches!(
                published,
                Published::Event(SessionEvent::MovePlaced { mark: Mark::O, .. })
            ));
        }
    }

    #[tokio::test]
    async fn test_reset_mid_delay_restarts_bot_timer() {
        let delay = Duration::from_millis(300);
        let mut harness = start(300);
        harness.send(SessionCommand::Place { index: 0 });
        harness
            .wait_for(|p| matches!(p, Published::State(s) if s.status == GameStatus::OToMove))
            .await;

        sleep(Duration::from_millis(200)).await;
        harness.send(SessionCommand::Reset);
        harness
            .wait_for(|p| matches!(p, Published::State(s) if s.last_move.is_none()))
            .await;

        let replayed_at = Instant::now();
        harness.send(SessionCommand::Place { index: 0 });
        let reply = harness
            .wait_for(|p| matches!(p, Published::Event(SessionEvent::MovePlaced { mark: Mark::O, .. })))
            .await;
        let waited = replayed_at.elapsed();

        assert!(matches!(
            reply,
            Published::Event(SessionEvent::MovePlaced { mark: Mark::O, index: 4 })
        ));
        assert!(waited >= delay, "bot moved after {:?}", waited);

        sleep(Duration::from_millis(400)).await;
        harness.send(SessionCommand::Quit);
        harness.handle.await.unwrap();
        let mut extra_bot_moves = 0;
        while let Ok(published) = harness.published.try_recv() {
            if matches!(published, Published::Event(SessionEvent::MovePlaced { mark: Mark::O, .. })) {
                extra_bot_moves += 1;
            }
        }
        assert_eq!(extra_bot_moves, 0);
    }

    #[tokio::test]
    async fn test_move_during_bot_turn_is_rejected() {
        let mut harness = start(MAX_BOT_DELAY_MS);
        harness.send(SessionCommand::Place { index: 0 });
        harness.send(SessionCommand::Place { index: 1 });

        let rejected = harness
            .wait_for(|p| matches!(p, Published::Event(SessionEvent::MoveRejected { .. })))
            .await;

        assert!(matches!(
            rejected,
            Published::Event(SessionEvent::MoveRejected { index: 1, .. })
        ));
        harness.send(SessionCommand::Quit);
        harness.handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_full_game_reaches_outcome_and_replays() {
        let mut harness = start(0);
        let mut last_board = None;

        let outcome = loop {
            match harness.next().await {
                Published::State(snapshot) => {
                    last_board = Some(snapshot.board);
                    if snapshot.status == GameStatus::XToMove {
                        let index = get_available_moves(&snapshot.board)[0];
                        harness.send(SessionCommand::Place { index });
                    }
                }
                Published::GameOver(outcome) => break outcome,
                Published::Event(_) => {}
            }
        };

        assert!(outcome.is_terminal());
        let final_state = harness
            .wait_for(|p| matches!(p, Published::State(_)))
            .await;
        if let Published::State(snapshot) = final_state {
            assert!(snapshot.status.is_over());
            assert_eq!(evaluate(&snapshot.board), outcome);
        }
        assert!(last_board.is_some());

        harness.send(SessionCommand::Reset);
        harness
            .wait_for(|p| matches!(p, Published::State(s) if s.status == GameStatus::XToMove && s.last_move.is_none()))
            .await;
        harness.send(SessionCommand::Quit);

        let scoreboard = harness.handle.await.unwrap();
        assert_eq!(scoreboard.games_played(), 1);
    }

    #[tokio::test]
    async fn test_closed_channel_ends_session() {
        let harness = start(0);
        let Harness { commands, handle, .. } = harness;
        drop(commands);

        let scoreboard = timeout(Duration::from_secs(5), handle).await.unwrap().unwrap();
        assert_eq!(scoreboard.games_played(), 0);
    }
}
