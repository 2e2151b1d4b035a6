//! Text widgets. Every function here is a pure projection of a snapshot;
//! none of them can change game state.

use std::fmt::Write;

use game_core::ScoringEngine;
use game_types::{GamePhase, GameSnapshot, Player};

const TIMER_BAR_WIDTH: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerUrgency {
    Normal,
    Urgent,
    Critical,
}

impl TimerUrgency {
    pub fn for_time_left(time_left: u32) -> Self {
        match time_left {
            0..=5 => TimerUrgency::Critical,
            6..=10 => TimerUrgency::Urgent,
            _ => TimerUrgency::Normal,
        }
    }
}

pub fn render_player_card(player: &Player, is_active: bool, required_letter: Option<char>) -> String {
    let mut out = String::new();
    let status = if is_active { "Your turn!" } else { "Waiting..." };
    let _ = writeln!(
        out,
        "[{}] {} - {} | {} points",
        player.color, player.display_name, status, player.score
    );

    if let (true, Some(letter)) = (is_active, required_letter) {
        let _ = writeln!(out, "  Next word must start with: {}", letter.to_uppercase());
    }
    out
}

pub fn render_scoreboard(snapshot: &GameSnapshot) -> String {
    let mut out = String::from("Scoreboard");
    if let Some(leader) = ScoringEngine::leader(&snapshot.players) {
        let _ = write!(out, "  ({} Leading)", leader.display_name);
    }
    out.push('\n');

    for (index, player) in snapshot.players.iter().enumerate() {
        let is_current = snapshot.phase == GamePhase::Playing && index == snapshot.active_player_index;
        let marker = if is_current { '>' } else { ' ' };
        let status = if is_current { "Current turn" } else { "Waiting" };
        let _ = writeln!(
            out,
            "{} {:<16} {:>3}  {}",
            marker, player.display_name, player.score, status
        );
    }
    out
}

pub fn render_timer(time_left: u32, total_time: u32) -> String {
    let filled = if total_time == 0 {
        0
    } else {
        (time_left.min(total_time) as usize * TIMER_BAR_WIDTH) / total_time as usize
    };

    let label = match TimerUrgency::for_time_left(time_left) {
        TimerUrgency::Critical => "!! Time Remaining",
        TimerUrgency::Urgent => "!  Time Remaining",
        TimerUrgency::Normal => "   Time Remaining",
    };

    format!(
        "{} {:>3}s [{}{}]\n",
        label,
        time_left,
        "#".repeat(filled),
        "-".repeat(TIMER_BAR_WIDTH - filled)
    )
}

pub fn render_history(snapshot: &GameSnapshot) -> String {
    let valid = snapshot.valid_words().count();
    let mut out = format!(
        "Word History ({} word{})\n",
        valid,
        if valid == 1 { "" } else { "s" }
    );

    if snapshot.history.is_empty() {
        out.push_str("  No words yet\n");
        return out;
    }

    for entry in &snapshot.history {
        let player = snapshot
            .player(entry.player_id)
            .map(|p| p.display_name.as_str())
            .unwrap_or("?");
        let mark = if entry.is_valid { '✓' } else { '✗' };
        let _ = write!(out, "  {} {:<12} {}", mark, entry.word, player);
        if !entry.is_valid && !entry.is_time_up() {
            out.push_str("  (Invalid word - point deducted)");
        }
        out.push('\n');
    }
    out
}

/// Prompt shown above the input line while playing
pub fn render_prompt(snapshot: &GameSnapshot) -> String {
    if snapshot.is_validating {
        return "Checking...".to_string();
    }

    match snapshot.required_letter {
        Some(letter) => format!("Enter a word starting with \"{}\":", letter.to_uppercase()),
        None => "Enter any word to start (minimum 4 letters):".to_string(),
    }
}

/// The whole screen for one snapshot
pub fn render_screen(snapshot: &GameSnapshot) -> String {
    let mut out = String::new();
    out.push_str(&render_scoreboard(snapshot));
    out.push('\n');

    match snapshot.phase {
        GamePhase::Waiting => {
            out.push_str("Ready to Start?\n");
            out.push_str("The first player can start with any word of at least 4 letters.\n");
            out.push_str("Type /start to begin.\n");
        }
        GamePhase::Playing => {
            if let Some(turn) = snapshot.current_turn() {
                out.push_str(&render_player_card(&turn.player, true, turn.required_letter));
                out.push_str(&render_timer(turn.time_remaining, snapshot.turn_duration));
                if let Some(error) = &turn.error {
                    let _ = writeln!(out, "  {}", error);
                }
            }
            out.push_str(&render_prompt(snapshot));
            out.push('\n');
        }
        GamePhase::Finished => {
            match snapshot.winner_player() {
                Some(winner) => {
                    let _ = writeln!(out, "{} wins with {} points!", winner.display_name, winner.score);
                }
                None => out.push_str("Game over\n"),
            }
            out.push_str("Type /reset to play again.\n");
        }
    }

    out.push('\n');
    out.push_str(&render_history(snapshot));
    out
}
