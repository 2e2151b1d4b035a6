use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::PlayerId;
use crate::user::Player;

/// History word recorded when a turn runs out without a submission
pub const TIME_UP_WORD: &str = "[TIME UP]";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GamePhase {
    Waiting,
    Playing,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WordEntry {
    pub word: String,
    pub player_id: PlayerId,
    pub timestamp: String, // ISO 8601 string
    pub is_valid: bool,
}

impl WordEntry {
    pub fn is_time_up(&self) -> bool {
        self.word == TIME_UP_WORD
    }
}

/// Read-only view of the active turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TurnSnapshot {
    pub player: Player,
    pub required_letter: Option<char>,
    pub time_remaining: u32,
    pub error: Option<String>,
}

/// Immutable copy of everything the widgets render from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GameSnapshot {
    pub phase: GamePhase,
    pub players: Vec<Player>,
    pub active_player_index: usize,
    pub required_letter: Option<char>,
    pub time_remaining: u32,
    pub turn_duration: u32,
    pub is_validating: bool,
    pub error: Option<String>,
    pub history: Vec<WordEntry>,
    pub turn_number: u32,
    pub winner: Option<PlayerId>,
}

impl GameSnapshot {
    pub fn active_player(&self) -> Option<&Player> {
        self.players.get(self.active_player_index)
    }

    pub fn player(&self, player_id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    /// Only meaningful while playing; None otherwise
    pub fn current_turn(&self) -> Option<TurnSnapshot> {
        if self.phase != GamePhase::Playing {
            return None;
        }

        self.active_player().map(|player| TurnSnapshot {
            player: player.clone(),
            required_letter: self.required_letter,
            time_remaining: self.time_remaining,
            error: self.error.clone(),
        })
    }

    pub fn valid_words(&self) -> impl Iterator<Item = &WordEntry> {
        self.history.iter().filter(|entry| entry.is_valid)
    }

    pub fn winner_player(&self) -> Option<&Player> {
        self.winner.and_then(|id| self.player(id))
    }
}
