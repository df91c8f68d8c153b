//! Countdown state machine for the daily six-hour challenge.

pub const TOTAL_DURATION_SECS: u32 = 6 * 60 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPhase {
    Running,
    Paused,
    Completed,
}

impl TimerPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            TimerPhase::Running => "running",
            TimerPhase::Paused => "paused",
            TimerPhase::Completed => "completed",
        }
    }
}

/// Outcome of one one-second tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// The countdown advanced; carries the new elapsed total.
    Advanced { elapsed_seconds: u32 },
    /// The countdown just hit zero. Produced exactly once per day.
    Completed { elapsed_seconds: u32 },
    /// Paused or already completed; nothing happened.
    Idle,
}

#[derive(Debug, Clone)]
pub struct ChallengeTimer {
    remaining_seconds: u32,
    phase: TimerPhase,
}

impl ChallengeTimer {
    /// Build the machine from persisted state. Elapsed values outside
    /// `[0, TOTAL_DURATION_SECS]` are clamped, not rejected.
    pub fn new(elapsed_seconds: i64, is_completed: bool, visible: bool) -> Self {
        let elapsed = elapsed_seconds.clamp(0, i64::from(TOTAL_DURATION_SECS)) as u32;
        let phase = if is_completed {
            TimerPhase::Completed
        } else if visible {
            TimerPhase::Running
        } else {
            TimerPhase::Paused
        };
        Self {
            remaining_seconds: TOTAL_DURATION_SECS - elapsed,
            phase,
        }
    }

    pub fn tick(&mut self) -> Tick {
        if self.phase != TimerPhase::Running {
            return Tick::Idle;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.phase = TimerPhase::Completed;
            Tick::Completed {
                elapsed_seconds: TOTAL_DURATION_SECS,
            }
        } else {
            Tick::Advanced {
                elapsed_seconds: self.elapsed_seconds(),
            }
        }
    }

    /// Losing visibility pauses the countdown, regaining it resumes. A
    /// completed day stays completed either way.
    pub fn set_visible(&mut self, visible: bool) {
        if self.phase == TimerPhase::Completed {
            return;
        }
        self.phase = if visible {
            TimerPhase::Running
        } else {
            TimerPhase::Paused
        };
    }

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn elapsed_seconds(&self) -> u32 {
        TOTAL_DURATION_SECS - self.remaining_seconds
    }

    pub fn is_completed(&self) -> bool {
        self.phase == TimerPhase::Completed
    }

    pub fn progress(&self) -> f64 {
        (f64::from(self.elapsed_seconds()) / f64::from(TOTAL_DURATION_SECS)).clamp(0.0, 1.0)
    }
}

/// Remaining time split into display units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeParts {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

pub fn time_parts(total_seconds: u32) -> TimeParts {
    TimeParts {
        hours: total_seconds / 3600,
        minutes: (total_seconds % 3600) / 60,
        seconds: total_seconds % 60,
    }
}
