// The beat clock. There is no timer thread: the main loop polls it with the
// current time, so a single owner and a single `state` field mean there can
// never be two tickers alive at once.

use std::time::{Duration, Instant};

use crate::shared::GRID_SIZE;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerState {
    Stopped,
    Running { period: Duration, next_due: Instant },
}

#[derive(Clone, Debug)]
pub struct BeatScheduler {
    state: SchedulerState,
    current_beat: u8,
}

impl Default for BeatScheduler {
    fn default() -> Self {
        Self {
            state: SchedulerState::Stopped,
            current_beat: 0,
        }
    }
}

// 60000 / bpm, integer milliseconds
pub fn period_for(bpm: u32) -> Duration {
    Duration::from_millis(60_000 / bpm.max(1) as u64)
}

impl BeatScheduler {
    pub fn current_beat(&self) -> u8 {
        self.current_beat
    }

    pub fn period(&self) -> Option<Duration> {
        match self.state {
            SchedulerState::Running { period, .. } => Some(period),
            SchedulerState::Stopped => None,
        }
    }

    // Stop whatever was running and start over at the new tempo.
    pub fn configure(&mut self, bpm: u32, now: Instant) {
        self.stop();
        let period = period_for(bpm);
        log::debug!("beat scheduler: {bpm} bpm, {}ms per beat", period.as_millis());
        self.state = SchedulerState::Running {
            period,
            next_due: now + period,
        };
    }

    pub fn stop(&mut self) {
        self.state = SchedulerState::Stopped;
    }

    pub fn reset_beat(&mut self) {
        self.current_beat = 0;
    }

    // Advance one step around the grid and return the new beat.
    pub fn tick(&mut self) -> u8 {
        self.current_beat = (self.current_beat + 1) % GRID_SIZE as u8;
        self.current_beat
    }

    // Fire at most one tick if one is due. A late poll pushes the next deadline
    // out from `now` rather than replaying the missed ones.
    pub fn poll(&mut self, now: Instant) -> Option<u8> {
        let SchedulerState::Running { period, next_due } = self.state else {
            return None;
        };
        if now < next_due {
            return None;
        }
        self.state = SchedulerState::Running {
            period,
            next_due: now + period,
        };
        Some(self.tick())
    }

    // How long the host loop may sleep before the next tick is due.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        match self.state {
            SchedulerState::Running { next_due, .. } => Some(next_due.saturating_duration_since(now)),
            SchedulerState::Stopped => None,
        }
    }
}
