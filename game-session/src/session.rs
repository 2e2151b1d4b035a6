use std::sync::Arc;
use std::time::Duration;

use game_core::{
    Game, GameError, GameEvent, GameEventHandler, GameSettings, LookupOutcome, LookupTicket,
    RunId, SubmitOutcome, TurnId,
};
use game_types::{ClientMessage, GameSnapshot, Roster};
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tracing::{debug, info, warn};

use crate::dictionary::Dictionary;
use crate::timer::TimerDriver;

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub roster: Roster,
    pub settings: GameSettings,
    pub rejection_delay: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            roster: Roster::default(),
            settings: GameSettings::default(),
            rejection_delay: Duration::from_millis(2000),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Game(GameEvent),
    WordDefined { word: String, definition: String },
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("Game session has shut down")]
    SessionClosed,
}

enum SessionCommand {
    Start {
        reply: oneshot::Sender<Result<(), GameError>>,
    },
    Submit {
        word: String,
        reply: oneshot::Sender<Result<SubmitOutcome, GameError>>,
    },
    Reset {
        reply: oneshot::Sender<()>,
    },
}

/// Results coming back from tasks the session spawned
enum TaskResult {
    LookupFinished { ticket: LookupTicket, is_word: bool },
    RejectionDelayElapsed { turn: TurnId },
}

/// Forwards state machine events onto the session's broadcast channel
struct BroadcastForwarder {
    events: broadcast::Sender<SessionEvent>,
}

impl GameEventHandler for BroadcastForwarder {
    fn handle_event(&mut self, event: GameEvent) {
        // No subscribers is fine
        let _ = self.events.send(SessionEvent::Game(event));
    }
}

/// Handle to a running game. Cloning shares the same game; the game task
/// ends when the last handle is dropped.
#[derive(Clone)]
pub struct GameSession {
    commands: mpsc::Sender<SessionCommand>,
    snapshots: watch::Receiver<GameSnapshot>,
    events: broadcast::Sender<SessionEvent>,
}

impl GameSession {
    /// Spawn the game task on the current tokio runtime
    pub fn spawn(
        options: SessionOptions,
        dictionary: Arc<dyn Dictionary>,
    ) -> Result<Self, SessionError> {
        let (events, _) = broadcast::channel(256);
        let mut game = Game::new(options.roster, options.settings)?;
        game.add_event_handler(Box::new(BroadcastForwarder {
            events: events.clone(),
        }));

        let (command_tx, command_rx) = mpsc::channel(64);
        let (snapshot_tx, snapshot_rx) = watch::channel(game.snapshot());
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();
        let (task_tx, task_rx) = mpsc::unbounded_channel();

        let actor = SessionActor {
            game,
            dictionary,
            rejection_delay: options.rejection_delay,
            timer: TimerDriver::new(tick_tx),
            snapshots: snapshot_tx,
            events: events.clone(),
            task_tx,
        };
        tokio::spawn(actor.run(command_rx, tick_rx, task_rx));

        Ok(Self {
            commands: command_tx,
            snapshots: snapshot_rx,
            events,
        })
    }

    pub async fn start(&self) -> Result<(), SessionError> {
        let (reply, response) = oneshot::channel();
        self.send(SessionCommand::Start { reply }).await?;
        Ok(response.await.map_err(|_| SessionError::SessionClosed)??)
    }

    /// Submit a word for the active player. Returns once the local rules have
    /// run; the dictionary verdict arrives later through snapshots and events.
    pub async fn submit(&self, word: impl Into<String>) -> Result<SubmitOutcome, SessionError> {
        let (reply, response) = oneshot::channel();
        self.send(SessionCommand::Submit {
            word: word.into(),
            reply,
        })
        .await?;
        Ok(response.await.map_err(|_| SessionError::SessionClosed)??)
    }

    pub async fn reset(&self) -> Result<(), SessionError> {
        let (reply, response) = oneshot::channel();
        self.send(SessionCommand::Reset { reply }).await?;
        response.await.map_err(|_| SessionError::SessionClosed)
    }

    pub async fn dispatch(&self, message: ClientMessage) -> Result<(), SessionError> {
        match message {
            ClientMessage::StartGame => self.start().await,
            ClientMessage::SubmitWord { word } => self.submit(word).await.map(|_| ()),
            ClientMessage::ResetGame => self.reset().await,
        }
    }

    /// Latest published state
    pub fn snapshot(&self) -> GameSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Receiver that is notified whenever the state changes
    pub fn subscribe(&self) -> watch::Receiver<GameSnapshot> {
        self.snapshots.clone()
    }

    pub fn events(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    async fn send(&self, command: SessionCommand) -> Result<(), SessionError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| SessionError::SessionClosed)
    }
}

struct SessionActor {
    game: Game,
    dictionary: Arc<dyn Dictionary>,
    rejection_delay: Duration,
    timer: TimerDriver,
    snapshots: watch::Sender<GameSnapshot>,
    events: broadcast::Sender<SessionEvent>,
    task_tx: mpsc::UnboundedSender<TaskResult>,
}

impl SessionActor {
    async fn run(
        mut self,
        mut commands: mpsc::Receiver<SessionCommand>,
        mut ticks: mpsc::UnboundedReceiver<RunId>,
        mut task_results: mpsc::UnboundedReceiver<TaskResult>,
    ) {
        info!("Game session started");

        loop {
            // Each branch runs to completion before the next message is read,
            // so every mutation of the game is atomic.
            tokio::select! {
                command = commands.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                Some(run) = ticks.recv() => self.handle_tick(run),
                Some(result) = task_results.recv() => self.handle_task_result(result),
            }

            self.commit();
        }

        self.timer.stop();
        info!("Game session ended");
    }

    fn handle_command(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::Start { reply } => {
                let result = self.game.start();
                self.commit();
                let _ = reply.send(result);
            }
            SessionCommand::Submit { word, reply } => {
                let result = self.game.submit(&word);
                match &result {
                    Ok(SubmitOutcome::NeedsLookup(ticket)) => self.spawn_lookup(ticket.clone()),
                    Ok(SubmitOutcome::Rejected { turn, .. }) => self.schedule_turn_switch(*turn),
                    Ok(SubmitOutcome::Ignored(reason)) => {
                        debug!(?reason, "Submission ignored");
                    }
                    Err(e) => warn!("Submission refused: {}", e),
                }
                self.commit();
                let _ = reply.send(result);
            }
            SessionCommand::Reset { reply } => {
                self.game.reset();
                self.commit();
                let _ = reply.send(());
            }
        }
    }

    fn handle_tick(&mut self, run: RunId) {
        if let Err(e) = self.game.tick(run) {
            warn!("Timer tick failed: {}", e);
        }
    }

    fn handle_task_result(&mut self, result: TaskResult) {
        match result {
            TaskResult::LookupFinished { ticket, is_word } => {
                match self.game.complete_lookup(&ticket, is_word) {
                    Ok(LookupOutcome::Accepted { word }) => self.spawn_definition(word),
                    Ok(LookupOutcome::Rejected { turn, .. }) => self.schedule_turn_switch(turn),
                    Ok(LookupOutcome::Stale) => {}
                    Err(e) => warn!("Could not apply lookup for '{}': {}", ticket.word, e),
                }
            }
            TaskResult::RejectionDelayElapsed { turn } => {
                self.game.finish_rejection(turn);
            }
        }
    }

    fn spawn_lookup(&self, ticket: LookupTicket) {
        let dictionary = Arc::clone(&self.dictionary);
        let task_tx = self.task_tx.clone();
        tokio::spawn(async move {
            let is_word = dictionary.validate(&ticket.word).await;
            let _ = task_tx.send(TaskResult::LookupFinished { ticket, is_word });
        });
    }

    /// Leave the rejection on screen, then end the turn it belongs to
    fn schedule_turn_switch(&self, turn: TurnId) {
        let delay = self.rejection_delay;
        let task_tx = self.task_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = task_tx.send(TaskResult::RejectionDelayElapsed { turn });
        });
    }

    fn spawn_definition(&self, word: String) {
        let dictionary = Arc::clone(&self.dictionary);
        let events = self.events.clone();
        tokio::spawn(async move {
            if let Some(definition) = dictionary.define(&word).await {
                let _ = events.send(SessionEvent::WordDefined { word, definition });
            }
        });
    }

    /// Bring the timer task in line with the game and publish the new state.
    /// Commands commit before replying so callers observe their own effect.
    fn commit(&mut self) {
        self.timer.sync(self.game.timer_state(), self.game.timer_run());
        self.publish_snapshot();
    }

    fn publish_snapshot(&self) {
        let next = self.game.snapshot();
        self.snapshots.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }
}
