use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use game_core::WordList;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use tracing::{debug, warn};

/// Answers whether a lowercase word is a real word. Lookup failures are
/// reported as "not a word"; implementations never surface errors.
#[async_trait]
pub trait Dictionary: Send + Sync {
    async fn validate(&self, word: &str) -> bool;

    /// First known definition of the word, if any
    async fn define(&self, _word: &str) -> Option<String> {
        None
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DictionaryEntry {
    #[serde(default)]
    pub word: String,
    #[serde(default)]
    pub meanings: Vec<Meaning>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Meaning {
    #[serde(rename = "partOfSpeech", default)]
    pub part_of_speech: Option<String>,
    #[serde(default)]
    pub definitions: Vec<Definition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Definition {
    pub definition: String,
}

#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("Invalid dictionary URL: {0}")]
    InvalidUrl(String),
    #[error("Failed to build HTTP client")]
    Client(#[source] reqwest::Error),
    #[error("Lookup request failed")]
    Request(#[from] reqwest::Error),
    #[error("Lookup returned status {0}")]
    Status(StatusCode),
}

/// Client for a dictionaryapi.dev style service: `GET {base}/{word}`
#[derive(Debug, Clone)]
pub struct DictionaryClient {
    client: Client,
    base_url: Url,
}

impl DictionaryClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, DictionaryError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| DictionaryError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(DictionaryError::InvalidUrl(base_url.to_string()));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(DictionaryError::Client)?;

        Ok(Self { client, base_url })
    }

    fn entry_url(&self, word: &str) -> Url {
        let mut url = self.base_url.clone();
        // Checked in new(): the base URL can always take path segments
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(word);
        }
        url
    }

    /// Fetch the raw entries for a word
    pub async fn lookup(&self, word: &str) -> Result<Vec<DictionaryEntry>, DictionaryError> {
        let url = self.entry_url(word);
        debug!("Looking up '{}' at {}", word, url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DictionaryError::Status(status));
        }

        Ok(response.json::<Vec<DictionaryEntry>>().await?)
    }
}

#[async_trait]
impl Dictionary for DictionaryClient {
    async fn validate(&self, word: &str) -> bool {
        match self.lookup(word).await {
            Ok(entries) => entries
                .first()
                .is_some_and(|entry| !entry.meanings.is_empty()),
            Err(DictionaryError::Status(status)) => {
                debug!("'{}' not found ({})", word, status);
                false
            }
            Err(e) => {
                warn!("Dictionary lookup for '{}' failed: {:?}", word, e);
                false
            }
        }
    }

    async fn define(&self, word: &str) -> Option<String> {
        match self.lookup(word).await {
            Ok(entries) => first_definition(&entries),
            Err(e) => {
                debug!("No definition for '{}': {}", word, e);
                None
            }
        }
    }
}

/// First definition of the first meaning of the first entry
pub fn first_definition(entries: &[DictionaryEntry]) -> Option<String> {
    entries
        .first()?
        .meanings
        .first()?
        .definitions
        .first()
        .map(|d| d.definition.clone())
}

/// Offline dictionary backed by a word list
#[derive(Debug, Clone, Default)]
pub struct WordListDictionary {
    words: WordList,
}

impl WordListDictionary {
    pub fn from_word_list(word_list: &str) -> Self {
        Self {
            words: WordList::new(word_list),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(Self::from_word_list(&contents))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[async_trait]
impl Dictionary for WordListDictionary {
    async fn validate(&self, word: &str) -> bool {
        self.words.contains(word)
    }
}
