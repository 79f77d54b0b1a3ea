//! Simulation time, resumable delays and cooldowns
//!
//! All timing is accumulate-or-compare against simulation time advanced by
//! the tick loop. Nothing here sleeps.

use serde::{Deserialize, Serialize};

/// Elapsed simulation time in seconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimClock {
    elapsed: f64,
    ticks: u64,
}

impl SimClock {
    /// Create a clock at time zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one tick of `delta_time` seconds
    pub fn advance(&mut self, delta_time: f32) {
        self.elapsed += f64::from(delta_time.max(0.0));
        self.ticks += 1;
    }

    /// Seconds since the clock started
    pub fn now(&self) -> f64 {
        self.elapsed
    }

    /// Number of ticks advanced
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum DelayState {
    Pending,
    Fired,
    Cancelled,
}

/// A "wait N seconds then continue" step
///
/// Advanced each tick; reports completion exactly once. A cancelled delay
/// never fires.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Delay {
    duration: f32,
    remaining: f32,
    state: DelayState,
}

impl Delay {
    /// Start a new delay
    pub fn new(duration: f32) -> Self {
        let duration = duration.max(0.0);
        Self {
            duration,
            remaining: duration,
            state: DelayState::Pending,
        }
    }

    /// Advance the delay. Returns true on the tick it completes.
    pub fn tick(&mut self, delta_time: f32) -> bool {
        if self.state != DelayState::Pending {
            return false;
        }
        self.remaining -= delta_time.max(0.0);
        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            self.state = DelayState::Fired;
            return true;
        }
        false
    }

    /// Cancel the delay so it never fires
    pub fn cancel(&mut self) {
        if self.state == DelayState::Pending {
            self.state = DelayState::Cancelled;
        }
    }

    /// Still waiting
    pub fn is_pending(&self) -> bool {
        self.state == DelayState::Pending
    }

    /// Completed normally
    pub fn has_fired(&self) -> bool {
        self.state == DelayState::Fired
    }

    /// Cancelled before completing
    pub fn is_cancelled(&self) -> bool {
        self.state == DelayState::Cancelled
    }

    /// Seconds left before completion
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Total duration
    pub fn duration(&self) -> f32 {
        self.duration
    }
}

/// Fire-rate gate: an action is allowed once `interval` has passed since
/// the last successful use
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cooldown {
    interval: f64,
    last_used: Option<f64>,
}

impl Cooldown {
    /// Cooldown derived from a rate in uses per second
    pub fn from_rate(rate: f32) -> Self {
        Self {
            interval: rate_interval(rate),
            last_used: None,
        }
    }

    /// Change the rate, keeping the time of the last use
    pub fn set_rate(&mut self, rate: f32) {
        self.interval = rate_interval(rate);
    }

    /// Check whether the action may be used at `now`
    pub fn is_ready(&self, now: f64) -> bool {
        match self.last_used {
            None => self.interval.is_finite(),
            Some(last) => now - last >= self.interval,
        }
    }

    /// Record a successful use at `now`
    pub fn trigger(&mut self, now: f64) {
        self.last_used = Some(now);
    }

    /// Interval in seconds
    pub fn interval(&self) -> f64 {
        self.interval
    }
}

fn rate_interval(rate: f32) -> f64 {
    if rate <= 0.0 {
        return f64::INFINITY;
    }
    f64::from(1.0 / rate)
}
