use std::fmt;

use game_types::{Player, PlayerId, RejectionReason, WordEntry};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    GameStarted {
        players: Vec<Player>,
        turn_duration: u32,
    },
    WordAccepted {
        entry: WordEntry,
        score: u32,
        required_letter: Option<char>,
    },
    WordRejected {
        entry: WordEntry,
        reason: RejectionReason,
        score: u32,
    },
    TurnExpired {
        entry: WordEntry,
        score: u32,
    },
    TurnSwitched {
        active_player: PlayerId,
        turn_number: u32,
    },
    TimerTicked {
        remaining: u32,
    },
    GameFinished {
        winner: Player,
    },
    GameReset,
}

impl GameEvent {
    /// The player the event is about, where there is one
    pub fn player_id(&self) -> Option<PlayerId> {
        match self {
            GameEvent::WordAccepted { entry, .. } => Some(entry.player_id),
            GameEvent::WordRejected { entry, .. } => Some(entry.player_id),
            GameEvent::TurnExpired { entry, .. } => Some(entry.player_id),
            GameEvent::TurnSwitched { active_player, .. } => Some(*active_player),
            GameEvent::GameFinished { winner } => Some(winner.id),
            GameEvent::GameStarted { .. } | GameEvent::TimerTicked { .. } | GameEvent::GameReset => {
                None
            }
        }
    }

    /// Whether this event closes out a turn (and adds a history entry)
    pub fn ends_turn(&self) -> bool {
        matches!(
            self,
            GameEvent::WordAccepted { .. } | GameEvent::WordRejected { .. } | GameEvent::TurnExpired { .. }
        )
    }
}

/// Receives every event the game publishes, in order
pub trait GameEventHandler: Send {
    fn handle_event(&mut self, event: GameEvent);
}

/// Fans game events out to registered handlers
pub struct GameEventBus {
    handlers: Vec<Box<dyn GameEventHandler>>,
}

impl GameEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Box<dyn GameEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn publish(&mut self, event: GameEvent) {
        for handler in &mut self.handlers {
            handler.handle_event(event.clone());
        }
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}

impl Default for GameEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GameEventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameEventBus")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
