use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// Why a submitted word was refused. Every variant costs the player a point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum RejectionReason {
    TooShort { min_length: usize },
    AlreadyUsed,
    WrongStartingLetter { required: char },
    NotAWord,
}

impl RejectionReason {
    /// Message shown to the players while the rejection is on screen
    pub fn message(&self) -> String {
        match self {
            RejectionReason::TooShort { min_length } => {
                format!("Word must be at least {} letters long", min_length)
            }
            RejectionReason::AlreadyUsed => "Word has already been used".to_string(),
            RejectionReason::WrongStartingLetter { required } => {
                format!("Word must start with \"{}\"", required.to_uppercase())
            }
            RejectionReason::NotAWord => "Not a valid English word".to_string(),
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}
