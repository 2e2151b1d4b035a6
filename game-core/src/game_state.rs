use game_types::{
    GamePhase, GameSnapshot, Player, PlayerId, RejectionReason, Roster, TIME_UP_WORD, WordEntry,
};
use tracing::{debug, info};

use crate::{
    GameError, GameEvent, GameEventBus, GameEventHandler, RunId, ScoringEngine, TimerSignal,
    TimerState, TurnTimer, WordRules, last_letter, normalize_word,
};

/// Identifies one turn. Never reused, not even across resets.
pub type TurnId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSettings {
    pub turn_duration: u32, // seconds
    pub min_word_length: usize,
    pub points_to_win: Option<u32>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            turn_duration: 30,
            min_word_length: 4,
            points_to_win: None,
        }
    }
}

/// A word that passed the local rules and is waiting on the dictionary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    pub turn: TurnId,
    pub word: String,
}

/// Set while a turn is being decided; cleared only by a turn switch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnGuard {
    Open,
    Validating,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    EmptyInput,
    TurnLocked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Passed the local rules; the caller must run the lookup and report back
    NeedsLookup(LookupTicket),
    /// Recorded and penalized; the turn switches once `finish_rejection` is called
    Rejected { reason: RejectionReason, turn: TurnId },
    Ignored(IgnoreReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Accepted { word: String },
    Rejected { reason: RejectionReason, turn: TurnId },
    /// The turn the lookup was issued for is over
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryOutcome {
    Recorded,
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Ticked { remaining: u32 },
    Expired(ExpiryOutcome),
    Stale,
}

#[derive(Debug)]
pub struct Game {
    roster: Roster,
    settings: GameSettings,
    rules: WordRules,
    players: Vec<Player>,
    phase: GamePhase,
    active_index: usize,
    required_letter: Option<char>,
    history: Vec<WordEntry>,
    timer: TurnTimer,
    turn: TurnId,
    turn_number: u32,
    guard: TurnGuard,
    error: Option<String>,
    winner: Option<PlayerId>,
    event_bus: GameEventBus,
}

impl Game {
    pub fn new(roster: Roster, settings: GameSettings) -> Result<Self, GameError> {
        if roster.len() < 2 {
            return Err(GameError::InvalidRoster { count: roster.len() });
        }

        Ok(Self {
            players: roster.create_players(),
            rules: WordRules::new(settings.min_word_length),
            roster,
            settings,
            phase: GamePhase::Waiting,
            active_index: 0,
            required_letter: None,
            history: Vec::new(),
            timer: TurnTimer::new(),
            turn: 0,
            turn_number: 0,
            guard: TurnGuard::Open,
            error: None,
            winner: None,
            event_bus: GameEventBus::new(),
        })
    }

    pub fn add_event_handler(&mut self, handler: Box<dyn GameEventHandler>) {
        self.event_bus.add_handler(handler);
    }

    pub fn start(&mut self) -> Result<(), GameError> {
        self.ensure_phase(GamePhase::Waiting)?;

        self.phase = GamePhase::Playing;
        self.active_index = 0;
        self.required_letter = None;
        self.error = None;
        self.guard = TurnGuard::Open;
        self.begin_turn();

        info!("Game started with {} players", self.players.len());
        self.event_bus.publish(GameEvent::GameStarted {
            players: self.players.clone(),
            turn_duration: self.settings.turn_duration,
        });
        Ok(())
    }

    /// Run the local rules against a raw submission from the active player
    pub fn submit(&mut self, raw: &str) -> Result<SubmitOutcome, GameError> {
        self.ensure_phase(GamePhase::Playing)?;

        if self.guard != TurnGuard::Open {
            debug!(guard = ?self.guard, "Ignoring submission while the turn is locked");
            return Ok(SubmitOutcome::Ignored(IgnoreReason::TurnLocked));
        }

        let word = normalize_word(raw);
        if word.is_empty() {
            return Ok(SubmitOutcome::Ignored(IgnoreReason::EmptyInput));
        }

        match self.rules.check(&word, &self.history, self.required_letter) {
            Ok(()) => {
                self.guard = TurnGuard::Validating;
                self.error = None;
                debug!("Word '{}' passed local rules, awaiting dictionary", word);
                Ok(SubmitOutcome::NeedsLookup(LookupTicket {
                    turn: self.turn,
                    word,
                }))
            }
            Err(reason) => {
                let turn = self.reject(word, reason.clone())?;
                Ok(SubmitOutcome::Rejected { reason, turn })
            }
        }
    }

    /// Apply a dictionary result. Results for a finished turn are discarded.
    pub fn complete_lookup(
        &mut self,
        ticket: &LookupTicket,
        is_word: bool,
    ) -> Result<LookupOutcome, GameError> {
        if self.phase != GamePhase::Playing
            || ticket.turn != self.turn
            || self.guard != TurnGuard::Validating
        {
            debug!(
                "Discarding stale lookup for '{}' (turn {}, current turn {})",
                ticket.word, ticket.turn, self.turn
            );
            return Ok(LookupOutcome::Stale);
        }

        if is_word {
            self.accept(ticket.word.clone())
        } else {
            let reason = RejectionReason::NotAWord;
            let turn = self.reject(ticket.word.clone(), reason.clone())?;
            Ok(LookupOutcome::Rejected { reason, turn })
        }
    }

    /// End a rejected turn once its message has been on screen long enough
    pub fn finish_rejection(&mut self, turn: TurnId) -> bool {
        if self.phase != GamePhase::Playing || turn != self.turn || self.guard != TurnGuard::Rejected {
            debug!("Ignoring rejection delay for turn {} (current turn {})", turn, self.turn);
            return false;
        }

        self.switch_turn();
        true
    }

    /// Apply one elapsed second of the turn timer
    pub fn tick(&mut self, run: RunId) -> Result<TickOutcome, GameError> {
        match self.timer.second_elapsed(run) {
            TimerSignal::Tick { remaining } => {
                debug!(remaining, "Timer tick");
                self.event_bus.publish(GameEvent::TimerTicked { remaining });
                Ok(TickOutcome::Ticked { remaining })
            }
            TimerSignal::Expired => {
                self.event_bus.publish(GameEvent::TimerTicked { remaining: 0 });
                Ok(TickOutcome::Expired(self.on_turn_expired()?))
            }
            TimerSignal::Stale => Ok(TickOutcome::Stale),
        }
    }

    /// The active player ran out of time. Ignored while a submission is
    /// still being decided, since that path will end the turn itself.
    pub fn on_turn_expired(&mut self) -> Result<ExpiryOutcome, GameError> {
        self.ensure_phase(GamePhase::Playing)?;

        if self.guard != TurnGuard::Open {
            debug!(guard = ?self.guard, "Ignoring turn expiry while a submission is in flight");
            return Ok(ExpiryOutcome::Ignored);
        }

        let entry = self.record_entry(TIME_UP_WORD.to_string(), false)?;
        let score = ScoringEngine::penalize(self.active_player_mut()?);

        info!("Turn {} expired without a submission", self.turn_number);
        self.event_bus.publish(GameEvent::TurnExpired { entry, score });
        self.switch_turn();
        Ok(ExpiryOutcome::Recorded)
    }

    /// Back to a fresh waiting game from any state
    pub fn reset(&mut self) {
        self.players = self.roster.create_players();
        self.phase = GamePhase::Waiting;
        self.active_index = 0;
        self.required_letter = None;
        self.history.clear();
        self.timer.stop();
        // Anything still in flight for the old game becomes stale
        self.turn += 1;
        self.turn_number = 0;
        self.guard = TurnGuard::Open;
        self.error = None;
        self.winner = None;

        info!("Game reset");
        self.event_bus.publish(GameEvent::GameReset);
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            phase: self.phase,
            players: self.players.clone(),
            active_player_index: self.active_index,
            required_letter: self.required_letter,
            time_remaining: self.time_remaining(),
            turn_duration: self.settings.turn_duration,
            is_validating: self.guard == TurnGuard::Validating,
            error: self.error.clone(),
            history: self.history.clone(),
            turn_number: self.turn_number,
            winner: self.winner,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn active_player(&self) -> Result<&Player, GameError> {
        let index = self.active_index;
        self.players.get(index).ok_or(GameError::NoActivePlayer { index })
    }

    pub fn required_letter(&self) -> Option<char> {
        self.required_letter
    }

    pub fn history(&self) -> &[WordEntry] {
        &self.history
    }

    pub fn time_remaining(&self) -> u32 {
        match self.phase {
            GamePhase::Waiting => self.settings.turn_duration,
            _ => self.timer.remaining(),
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn guard(&self) -> TurnGuard {
        self.guard
    }

    pub fn is_validating(&self) -> bool {
        self.guard == TurnGuard::Validating
    }

    pub fn turn(&self) -> TurnId {
        self.turn
    }

    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    pub fn timer_state(&self) -> TimerState {
        self.timer.state()
    }

    pub fn timer_run(&self) -> RunId {
        self.timer.run()
    }

    pub fn winner(&self) -> Option<&Player> {
        self.winner
            .and_then(|id| self.players.iter().find(|p| p.id == id))
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    fn ensure_phase(&self, expected: GamePhase) -> Result<(), GameError> {
        if self.phase != expected {
            return Err(GameError::InvalidPhase {
                expected,
                actual: self.phase,
            });
        }
        Ok(())
    }

    fn active_player_mut(&mut self) -> Result<&mut Player, GameError> {
        let index = self.active_index;
        self.players
            .get_mut(index)
            .ok_or(GameError::NoActivePlayer { index })
    }

    fn record_entry(&mut self, word: String, is_valid: bool) -> Result<WordEntry, GameError> {
        let entry = WordEntry {
            word,
            player_id: self.active_player()?.id,
            timestamp: chrono::Utc::now().to_rfc3339(),
            is_valid,
        };
        self.history.push(entry.clone());
        Ok(entry)
    }

    fn accept(&mut self, word: String) -> Result<LookupOutcome, GameError> {
        let entry = self.record_entry(word.clone(), true)?;
        let points_to_win = self.settings.points_to_win;

        let player = self.active_player_mut()?;
        let score = ScoringEngine::award(player);
        let winner = ScoringEngine::has_won(player, points_to_win).then(|| player.clone());

        self.required_letter = last_letter(&word);
        info!("Accepted '{}' (score {})", word, score);
        self.event_bus.publish(GameEvent::WordAccepted {
            entry,
            score,
            required_letter: self.required_letter,
        });

        match winner {
            Some(winner) => self.finish(winner),
            None => self.switch_turn(),
        }

        Ok(LookupOutcome::Accepted { word })
    }

    fn reject(&mut self, word: String, reason: RejectionReason) -> Result<TurnId, GameError> {
        let entry = self.record_entry(word, false)?;
        let score = ScoringEngine::penalize(self.active_player_mut()?);

        self.error = Some(reason.message());
        self.guard = TurnGuard::Rejected;

        info!("Rejected '{}': {}", entry.word, reason);
        self.event_bus.publish(GameEvent::WordRejected {
            entry,
            reason,
            score,
        });
        Ok(self.turn)
    }

    fn begin_turn(&mut self) {
        self.turn += 1;
        self.turn_number += 1;
        self.timer.reset(self.settings.turn_duration);
    }

    fn switch_turn(&mut self) {
        self.active_index = (self.active_index + 1) % self.players.len();
        self.error = None;
        self.guard = TurnGuard::Open;
        self.begin_turn();

        let active_player = self.players[self.active_index].id;
        info!("Turn {} begins for player {}", self.turn_number, active_player);
        self.event_bus.publish(GameEvent::TurnSwitched {
            active_player,
            turn_number: self.turn_number,
        });
    }

    fn finish(&mut self, winner: Player) {
        self.phase = GamePhase::Finished;
        self.timer.stop();
        self.guard = TurnGuard::Open;
        self.winner = Some(winner.id);

        info!("{} reached {} points and wins", winner.display_name, winner.score);
        self.event_bus.publish(GameEvent::GameFinished { winner });
    }
}
