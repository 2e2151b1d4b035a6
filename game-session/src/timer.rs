use std::time::Duration;

use game_core::{RunId, TimerState};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::debug;

/// Drives the turn timer: one task per run, reporting each elapsed second
/// tagged with its run id. The game decides what a second means.
pub struct TimerDriver {
    ticks: mpsc::UnboundedSender<RunId>,
    period: Duration,
    current: Option<(RunId, JoinHandle<()>)>,
}

impl TimerDriver {
    pub fn new(ticks: mpsc::UnboundedSender<RunId>) -> Self {
        Self::with_period(ticks, Duration::from_secs(1))
    }

    pub fn with_period(ticks: mpsc::UnboundedSender<RunId>, period: Duration) -> Self {
        Self {
            ticks,
            period,
            current: None,
        }
    }

    /// Match the driver to the game's timer: restart on a new run, stop
    /// when the timer is no longer running.
    pub fn sync(&mut self, state: TimerState, run: RunId) {
        match state {
            TimerState::Running => {
                if self.current_run() != Some(run) {
                    self.spawn_run(run);
                }
            }
            TimerState::Idle | TimerState::Expired => self.stop(),
        }
    }

    pub fn current_run(&self) -> Option<RunId> {
        self.current.as_ref().map(|(run, _)| *run)
    }

    pub fn stop(&mut self) {
        if let Some((run, handle)) = self.current.take() {
            debug!(run, "Stopping timer run");
            handle.abort();
        }
    }

    fn spawn_run(&mut self, run: RunId) {
        self.stop();

        let ticks = self.ticks.clone();
        let period = self.period;
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if ticks.send(run).is_err() {
                    break;
                }
            }
        });

        debug!(run, "Started timer run");
        self.current = Some((run, handle));
    }
}

impl Drop for TimerDriver {
    fn drop(&mut self) {
        self.stop();
    }
}
