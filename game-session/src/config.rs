use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use game_core::GameSettings;
use game_types::Roster;

use crate::session::SessionOptions;

pub const DEFAULT_DICTIONARY_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub turn_seconds: u32,
    pub min_word_length: usize,
    pub rejection_delay_ms: u64,
    pub dictionary_url: String,
    pub dictionary_timeout_seconds: u64,
    pub word_list_file: Option<PathBuf>,
    pub points_to_win: Option<u32>,
    pub player_names: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup; missing keys take their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let player_names = match lookup("PLAYER_NAMES") {
            Some(raw) => parse_player_names(&raw)?,
            None => defaults.player_names,
        };

        Ok(Self {
            turn_seconds: parse_or(&lookup, "TURN_SECONDS", defaults.turn_seconds)?,
            min_word_length: parse_or(&lookup, "MIN_WORD_LENGTH", defaults.min_word_length)?,
            rejection_delay_ms: parse_or(&lookup, "REJECTION_DELAY_MS", defaults.rejection_delay_ms)?,
            dictionary_url: lookup("DICTIONARY_URL").unwrap_or(defaults.dictionary_url),
            dictionary_timeout_seconds: parse_or(
                &lookup,
                "DICTIONARY_TIMEOUT_SECONDS",
                defaults.dictionary_timeout_seconds,
            )?,
            word_list_file: lookup("WORD_LIST_FILE").map(PathBuf::from),
            points_to_win: parse_optional(&lookup, "POINTS_TO_WIN")?,
            player_names,
        })
    }

    pub fn game_settings(&self) -> GameSettings {
        GameSettings {
            turn_duration: self.turn_seconds,
            min_word_length: self.min_word_length,
            points_to_win: self.points_to_win,
        }
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            roster: Roster::from_names(self.player_names.iter().cloned()),
            settings: self.game_settings(),
            rejection_delay: Duration::from_millis(self.rejection_delay_ms),
        }
    }

    pub fn dictionary_timeout(&self) -> Duration {
        Duration::from_secs(self.dictionary_timeout_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            turn_seconds: 30,
            min_word_length: 4,
            rejection_delay_ms: 2000,
            dictionary_url: DEFAULT_DICTIONARY_URL.to_string(),
            dictionary_timeout_seconds: 5,
            word_list_file: None,
            points_to_win: None,
            player_names: vec!["Player 1".to_string(), "Player 2".to_string()],
        }
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    Ok(parse_optional(lookup, key)?.unwrap_or(default))
}

fn parse_optional<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .with_context(|| format!("Invalid {}: {:?}", key, raw))
        })
        .transpose()
}

fn parse_player_names(raw: &str) -> Result<Vec<String>> {
    let names: Vec<String> = raw
        .split(',')
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect();

    if names.len() != 2 {
        bail!("PLAYER_NAMES must list exactly 2 players, got {}", names.len());
    }
    Ok(names)
}
