use game_core::{
    Game, GameEvent, GameEventHandler, GameSettings, LookupOutcome, SubmitOutcome, TickOutcome,
};
use game_types::Roster;
use std::sync::{Arc, Mutex};

/// Creates a waiting two-player game with default settings
pub fn create_test_game() -> Game {
    Game::new(Roster::from_names(["Alice", "Bob"]), GameSettings::default())
        .expect("default roster is valid")
}

/// Creates a game that has already been started
pub fn create_started_game() -> Game {
    let mut game = create_test_game();
    game.start().expect("game starts from waiting");
    game
}

/// Submit a word and, if it reaches the dictionary, answer with `is_word`
pub fn submit_and_resolve(game: &mut Game, word: &str, is_word: bool) -> SubmitResult {
    match game.submit(word).expect("game is playing") {
        SubmitOutcome::NeedsLookup(ticket) => {
            SubmitResult::Looked(game.complete_lookup(&ticket, is_word).expect("lookup applies"))
        }
        other => SubmitResult::Local(other),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitResult {
    Looked(LookupOutcome),
    Local(SubmitOutcome),
}

/// Tick the current timer run until the turn expires
pub fn run_out_clock(game: &mut Game) -> TickOutcome {
    let run = game.timer_run();
    loop {
        match game.tick(run).expect("game is playing") {
            TickOutcome::Ticked { .. } => continue,
            other => return other,
        }
    }
}

/// Records everything the game publishes
#[derive(Clone)]
pub struct EventCollector {
    events: Arc<Mutex<Vec<GameEvent>>>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get_events(&self) -> Vec<GameEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self, check_fn: impl Fn(&GameEvent) -> bool) -> usize {
        self.events.lock().unwrap().iter().filter(|e| check_fn(e)).count()
    }
}

impl GameEventHandler for EventCollector {
    fn handle_event(&mut self, event: GameEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Game with a collector already attached
pub fn create_observed_game() -> (Game, EventCollector) {
    let mut game = create_test_game();
    let collector = EventCollector::new();
    game.add_event_handler(Box::new(collector.clone()));
    (game, collector)
}
