use std::collections::HashSet;

use game_types::{RejectionReason, WordEntry};

/// Trim surrounding whitespace and lowercase raw player input
pub fn normalize_word(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// The letter the next word must start with after `word` is accepted
pub fn last_letter(word: &str) -> Option<char> {
    word.chars().last()
}

/// Local turn rules, checked before any dictionary lookup
#[derive(Debug, Clone)]
pub struct WordRules {
    min_length: usize,
}

impl WordRules {
    pub fn new(min_length: usize) -> Self {
        Self { min_length }
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Evaluate the rules in order, stopping at the first failure.
    /// `word` must already be normalized.
    pub fn check(
        &self,
        word: &str,
        history: &[WordEntry],
        required_letter: Option<char>,
    ) -> Result<(), RejectionReason> {
        if word.chars().count() < self.min_length {
            return Err(RejectionReason::TooShort {
                min_length: self.min_length,
            });
        }

        if Self::is_already_used(word, history) {
            return Err(RejectionReason::AlreadyUsed);
        }

        if let Some(required) = required_letter {
            if word.chars().next() != Some(required) {
                return Err(RejectionReason::WrongStartingLetter { required });
            }
        }

        Ok(())
    }

    /// Only accepted words count; rejected entries may be retried later
    pub fn is_already_used(word: &str, history: &[WordEntry]) -> bool {
        history
            .iter()
            .any(|entry| entry.is_valid && entry.word.to_lowercase() == word.to_lowercase())
    }
}

impl Default for WordRules {
    fn default() -> Self {
        Self::new(4)
    }
}

/// In-memory dictionary loaded from a newline separated word list
#[derive(Debug, Clone, Default)]
pub struct WordList {
    valid_words: HashSet<String>,
}

impl WordList {
    /// Create a word list; blank lines and `#` comments are skipped
    pub fn new(word_list: &str) -> Self {
        let valid_words = word_list
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_lowercase)
            .collect();

        Self { valid_words }
    }

    /// Check if a word is in the list, ignoring case and surrounding whitespace
    pub fn contains(&self, word: &str) -> bool {
        self.valid_words.contains(&normalize_word(word))
    }

    pub fn len(&self) -> usize {
        self.valid_words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valid_words.is_empty()
    }
}
