//! Countdown for the active turn.
//!
//! The timer does not sleep; a driver reports each elapsed second together
//! with the run it was scheduled for. Every start, reset or stop begins a new
//! run, so a second scheduled for an earlier run is reported as stale and
//! never touches the current countdown.

use tracing::debug;

pub type RunId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running,
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerSignal {
    Tick { remaining: u32 },
    Expired,
    Stale,
}

#[derive(Debug, Clone)]
pub struct TurnTimer {
    state: TimerState,
    remaining: u32,
    run: RunId,
}

impl TurnTimer {
    pub fn new() -> Self {
        Self {
            state: TimerState::Idle,
            remaining: 0,
            run: 0,
        }
    }

    /// Begin counting down from `duration` seconds
    pub fn start(&mut self, duration: u32) -> RunId {
        self.run += 1;
        self.state = TimerState::Running;
        self.remaining = duration;
        self.run
    }

    /// Restart from `duration` regardless of the current state
    pub fn reset(&mut self, duration: u32) -> RunId {
        self.start(duration)
    }

    pub fn stop(&mut self) {
        self.run += 1;
        self.state = TimerState::Idle;
    }

    /// Apply one elapsed second scheduled under `run`
    pub fn second_elapsed(&mut self, run: RunId) -> TimerSignal {
        if run != self.run || self.state != TimerState::Running {
            debug!(run, current_run = self.run, "Discarding stale timer tick");
            return TimerSignal::Stale;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.state = TimerState::Expired;
            TimerSignal::Expired
        } else {
            TimerSignal::Tick {
                remaining: self.remaining,
            }
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn run(&self) -> RunId {
        self.run
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }
}

impl Default for TurnTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_down_and_expires_once() {
        let mut timer = TurnTimer::new();
        let run = timer.start(3);

        assert_eq!(timer.second_elapsed(run), TimerSignal::Tick { remaining: 2 });
        assert_eq!(timer.second_elapsed(run), TimerSignal::Tick { remaining: 1 });
        assert_eq!(timer.second_elapsed(run), TimerSignal::Expired);
        assert_eq!(timer.state(), TimerState::Expired);
        assert_eq!(timer.remaining(), 0);

        // No further signals once expired
        assert_eq!(timer.second_elapsed(run), TimerSignal::Stale);
    }

    #[test]
    fn test_stale_tick_after_reset() {
        let mut timer = TurnTimer::new();
        let old_run = timer.start(30);
        timer.second_elapsed(old_run);

        let new_run = timer.reset(30);
        assert_ne!(old_run, new_run);

        // A tick queued for the previous turn must not eat into the new one
        assert_eq!(timer.second_elapsed(old_run), TimerSignal::Stale);
        assert_eq!(timer.remaining(), 30);
        assert_eq!(timer.second_elapsed(new_run), TimerSignal::Tick { remaining: 29 });
    }

    #[test]
    fn test_stop_suspends_ticks() {
        let mut timer = TurnTimer::new();
        let run = timer.start(10);
        timer.stop();

        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.second_elapsed(run), TimerSignal::Stale);
        assert_eq!(timer.second_elapsed(timer.run()), TimerSignal::Stale);
    }

    #[test]
    fn test_restart_after_expiry() {
        let mut timer = TurnTimer::new();
        let run = timer.start(1);
        assert_eq!(timer.second_elapsed(run), TimerSignal::Expired);

        let run = timer.start(2);
        assert!(timer.is_running());
        assert_eq!(timer.second_elapsed(run), TimerSignal::Tick { remaining: 1 });
    }

    #[test]
    fn test_zero_duration_expires_on_first_second() {
        let mut timer = TurnTimer::new();
        let run = timer.start(0);
        assert_eq!(timer.second_elapsed(run), TimerSignal::Expired);
    }
}
