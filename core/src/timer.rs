use serde::{Deserialize, Serialize};

/// Identifies one run of the stopwatch, ticks carrying any other token are ignored.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerToken(u64);

/// One-second resolution game clock driven by host ticks.
///
/// Every start hands out a fresh [`TimerToken`]. Stopping or resetting retires it, so a tick scheduled for an earlier
/// run can never advance the clock again.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stopwatch {
    elapsed_secs: u32,
    active: Option<TimerToken>,
    issued: u64,
}

impl Stopwatch {
    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_token(&self) -> Option<TimerToken> {
        self.active
    }

    /// Starts the clock, `None` when it is already running.
    pub fn start(&mut self) -> Option<TimerToken> {
        if self.active.is_some() {
            return None;
        }
        self.issued += 1;
        let token = TimerToken(self.issued);
        self.active = Some(token);
        Some(token)
    }

    /// Stops the clock keeping the elapsed time, returns the retired token.
    pub fn stop(&mut self) -> Option<TimerToken> {
        self.active.take()
    }

    /// Stops the clock and rewinds it to zero.
    pub fn reset(&mut self) -> Option<TimerToken> {
        self.elapsed_secs = 0;
        self.stop()
    }

    /// Advances one second if `token` belongs to the current run.
    pub fn tick(&mut self, token: TimerToken) -> Option<u32> {
        if self.active != Some(token) {
            return None;
        }
        self.elapsed_secs = self.elapsed_secs.saturating_add(1);
        Some(self.elapsed_secs)
    }
}
