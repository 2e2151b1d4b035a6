use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use game_core::GameSettings;
use game_session::dictionary::{Dictionary, WordListDictionary};
use game_session::session::{GameSession, SessionEvent, SessionOptions};
use game_types::{GameSnapshot, Roster};
use tokio::sync::{Mutex, broadcast, mpsc};

pub const TEST_WORDS: &str = "alpha\napple\neagle\neasel\nlemon\nnight\ntiger\nrainbow";

/// Word list dictionary that counts lookups
pub struct CountingDictionary {
    words: WordListDictionary,
    calls: Arc<AtomicUsize>,
}

impl CountingDictionary {
    pub fn new() -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let dictionary = Self {
            words: WordListDictionary::from_word_list(TEST_WORDS),
            calls: calls.clone(),
        };
        (dictionary, calls)
    }
}

#[async_trait]
impl Dictionary for CountingDictionary {
    async fn validate(&self, word: &str) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.words.validate(word).await
    }

    async fn define(&self, word: &str) -> Option<String> {
        self.words
            .validate(word)
            .await
            .then(|| format!("definition of {}", word))
    }
}

/// Dictionary whose answers are released by the test, one per lookup
pub struct GatedDictionary {
    answers: Mutex<mpsc::UnboundedReceiver<bool>>,
    calls: Arc<AtomicUsize>,
}

impl GatedDictionary {
    pub fn new() -> (Self, mpsc::UnboundedSender<bool>, Arc<AtomicUsize>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let calls = Arc::new(AtomicUsize::new(0));
        let dictionary = Self {
            answers: Mutex::new(rx),
            calls: calls.clone(),
        };
        (dictionary, tx, calls)
    }
}

#[async_trait]
impl Dictionary for GatedDictionary {
    async fn validate(&self, _word: &str) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answers.lock().await.recv().await.unwrap_or(false)
    }
}

pub fn test_options() -> SessionOptions {
    SessionOptions {
        roster: Roster::from_names(["Alice", "Bob"]),
        settings: GameSettings::default(),
        rejection_delay: Duration::from_millis(2000),
    }
}

pub fn spawn_session(dictionary: impl Dictionary + 'static) -> GameSession {
    GameSession::spawn(test_options(), Arc::new(dictionary)).expect("valid test roster")
}

/// Wait until a published snapshot satisfies `predicate`
pub async fn wait_for(
    session: &GameSession,
    predicate: impl Fn(&GameSnapshot) -> bool,
) -> GameSnapshot {
    let mut snapshots = session.subscribe();
    let snapshot = tokio::time::timeout(Duration::from_secs(300), snapshots.wait_for(|s| predicate(s)))
        .await
        .expect("timed out waiting for snapshot")
        .expect("session closed");
    (*snapshot).clone()
}

/// Let spawned tasks drain without moving the game clock meaningfully
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(10)).await;
}

/// Drain every event received so far
pub fn drain_events(events: &mut broadcast::Receiver<SessionEvent>) -> Vec<SessionEvent> {
    let mut drained = Vec::new();
    while let Ok(event) = events.try_recv() {
        drained.push(event);
    }
    drained
}
