pub mod config;
pub mod dictionary;
pub mod input;
pub mod render;
pub mod session;
pub mod timer;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Config;
use crate::dictionary::{Dictionary, DictionaryClient, WordListDictionary};

/// Pick the dictionary the config asks for: a local word list if one is
/// given, otherwise the HTTP lookup service.
pub fn build_dictionary(config: &Config) -> Result<Arc<dyn Dictionary>> {
    if let Some(path) = &config.word_list_file {
        let dictionary = WordListDictionary::from_file(path)
            .with_context(|| format!("Failed to read word list {}", path.display()))?;
        info!("Loaded {} words from {}", dictionary.len(), path.display());
        return Ok(Arc::new(dictionary));
    }

    let client = DictionaryClient::new(&config.dictionary_url, config.dictionary_timeout())
        .context("Failed to create dictionary client")?;
    info!("Validating words against {}", config.dictionary_url);
    Ok(Arc::new(client))
}
