use game_types::GamePhase;

/// Misuse of the state machine. Rule failures are not errors; they are
/// ordinary rejections recorded in the history.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("Operation requires phase {expected:?}, but the game is {actual:?}")]
    InvalidPhase {
        expected: GamePhase,
        actual: GamePhase,
    },
    #[error("A game needs at least 2 players, got {count}")]
    InvalidRoster { count: usize },
    #[error("No player at active index {index}")]
    NoActivePlayer { index: usize },
}
