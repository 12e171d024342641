use std::future::Future;

use super::tictactoe::{GameSnapshot, Outcome, SessionEvent};

/// Sink for everything a session publishes. The terminal client renders it;
/// tests record it.
pub trait GameBroadcaster: Send + Sync + Clone + 'static {
    fn broadcast_state(&self, snapshot: GameSnapshot) -> impl Future<Output = ()> + Send;

    fn broadcast_event(&self, event: SessionEvent) -> impl Future<Output = ()> + Send;

    fn broadcast_game_over(&self, outcome: Outcome) -> impl Future<Output = ()> + Send;
}
