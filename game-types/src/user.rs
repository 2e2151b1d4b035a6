use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::PlayerId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Player {
    pub id: PlayerId,
    pub display_name: String,
    pub score: u32,
    pub color: String, // Display tag, e.g. "blue"
}

/// A fixed seat in the roster; players are created from seats at game start
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PlayerSeat {
    pub display_name: String,
    pub color: String,
}

impl PlayerSeat {
    pub fn new(display_name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            color: color.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Roster {
    pub seats: Vec<PlayerSeat>,
}

impl Roster {
    pub const COLORS: [&'static str; 2] = ["blue", "purple"];

    pub fn new(seats: Vec<PlayerSeat>) -> Self {
        Self { seats }
    }

    /// Build a roster from display names, assigning colors in seat order
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let seats = names
            .into_iter()
            .enumerate()
            .map(|(index, name)| PlayerSeat::new(name, Self::COLORS[index % Self::COLORS.len()]))
            .collect();

        Self { seats }
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    /// Fresh players with zeroed scores and new identities
    pub fn create_players(&self) -> Vec<Player> {
        self.seats
            .iter()
            .map(|seat| Player {
                id: Uuid::new_v4(),
                display_name: seat.display_name.clone(),
                score: 0,
                color: seat.color.clone(),
            })
            .collect()
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::from_names(["Player 1", "Player 2"])
    }
}
