//! Trust hub loading screen
//!
//! [`LoadingProgress`] maps elapsed time to a progress frame and holds no
//! state. [`LoadingSequence`] drives it from a tokio interval and fires the
//! completion callback once progress has reached 100%.

use crate::config::LoadingConfig;
use std::time::Duration;
use tokio::time::{interval, sleep, Instant, MissedTickBehavior};

/// Pacing phase of the loading screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingPhase {
    /// Fast start, 0-30%
    Hook,
    /// Slow middle, 30-70%
    Suspense,
    /// Quick finish, 70-100%
    Finish,
}

impl LoadingPhase {
    /// Get the phase name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadingPhase::Hook => "hook",
            LoadingPhase::Suspense => "suspense",
            LoadingPhase::Finish => "finish",
        }
    }
}

/// Status lines shown under the progress bar, indexed by status step
pub const STATUS_STEPS: [&str; 4] = [
    "Syncing Trust Engine...",
    "Deep scanning hustle data...",
    "Calibrating reputation metrics...",
    "My Oxygen Engine ready!",
];

/// Snapshot of the loading screen at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadingFrame {
    /// Progress in [0, 100]
    pub progress: f64,

    /// Current phase
    pub phase: LoadingPhase,

    /// Index into [`STATUS_STEPS`]
    pub status_step: usize,

    /// Whether the total duration has elapsed
    pub complete: bool,
}

impl LoadingFrame {
    /// Progress truncated to a whole percent
    pub fn percent(&self) -> u8 {
        self.progress.clamp(0.0, 100.0) as u8
    }

    /// Status line for this frame
    pub fn status(&self) -> &'static str {
        STATUS_STEPS[self.status_step.min(STATUS_STEPS.len() - 1)]
    }

    /// Headline for this frame
    pub fn message(&self) -> &'static str {
        match self.phase {
            LoadingPhase::Hook => "Initializing your power...",
            LoadingPhase::Suspense if self.progress < 45.0 => "Loading your hustle history...",
            LoadingPhase::Suspense if self.progress < 60.0 => "Analyzing trust patterns...",
            LoadingPhase::Suspense => "Building your reputation...",
            LoadingPhase::Finish => "Engine ready! Welcome to power mode.",
        }
    }
}

/// Elapsed time to progress mapping
#[derive(Debug, Clone, Copy)]
pub struct LoadingProgress {
    hook: Duration,
    suspense: Duration,
    finish: Duration,
}

impl LoadingProgress {
    /// Build from configured phase lengths
    pub fn new(config: &LoadingConfig) -> Self {
        Self {
            hook: Duration::from_millis(config.hook_ms),
            suspense: Duration::from_millis(config.suspense_ms),
            finish: Duration::from_millis(config.finish_ms),
        }
    }

    /// Total time from 0% to 100%
    pub fn total(&self) -> Duration {
        self.hook + self.suspense + self.finish
    }

    /// Frame at `elapsed`
    ///
    /// Piecewise linear and continuous, so progress never decreases as
    /// `elapsed` grows. A zero-length phase is skipped.
    pub fn frame_at(&self, elapsed: Duration) -> LoadingFrame {
        let suspense_end = self.hook + self.suspense;

        if elapsed < self.hook {
            LoadingFrame {
                progress: fraction(elapsed, self.hook) * 30.0,
                phase: LoadingPhase::Hook,
                status_step: 0,
                complete: false,
            }
        } else if elapsed < suspense_end {
            let progress = 30.0 + fraction(elapsed - self.hook, self.suspense) * 40.0;
            LoadingFrame {
                progress,
                phase: LoadingPhase::Suspense,
                status_step: if progress < 45.0 { 1 } else { 2 },
                complete: false,
            }
        } else if elapsed < self.total() {
            LoadingFrame {
                progress: 70.0 + fraction(elapsed - suspense_end, self.finish) * 30.0,
                phase: LoadingPhase::Finish,
                status_step: 3,
                complete: false,
            }
        } else {
            LoadingFrame {
                progress: 100.0,
                phase: LoadingPhase::Finish,
                status_step: 3,
                complete: true,
            }
        }
    }
}

fn fraction(part: Duration, whole: Duration) -> f64 {
    if whole.is_zero() {
        return 1.0;
    }
    (part.as_secs_f64() / whole.as_secs_f64()).min(1.0)
}

/// Drives a [`LoadingProgress`] on a timer
#[derive(Debug, Clone)]
pub struct LoadingSequence {
    progress: LoadingProgress,
    tick: Duration,
    completion_delay: Duration,
}

impl LoadingSequence {
    /// Build from configuration
    pub fn new(config: &LoadingConfig) -> Self {
        Self {
            progress: LoadingProgress::new(config),
            tick: config.tick().max(Duration::from_millis(1)),
            completion_delay: Duration::from_millis(config.completion_delay_ms),
        }
    }

    /// The underlying progress mapping
    pub fn progress(&self) -> &LoadingProgress {
        &self.progress
    }

    /// Run to completion
    ///
    /// `on_frame` sees every tick, with progress never decreasing between
    /// calls. `on_complete` runs exactly once, after a frame at 100% has been
    /// delivered and the completion delay has passed; its result is returned.
    pub async fn run<F, G, R>(&self, mut on_frame: F, on_complete: G) -> R
    where
        F: FnMut(&LoadingFrame),
        G: FnOnce() -> R,
    {
        let start = Instant::now();
        let mut ticker = interval(self.tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tracing::debug!(total = ?self.progress.total(), tick = ?self.tick, "loading sequence started");

        let mut high_water = 0.0_f64;
        loop {
            ticker.tick().await;

            let mut frame = self.progress.frame_at(start.elapsed());
            frame.progress = frame.progress.max(high_water);
            high_water = frame.progress;

            on_frame(&frame);
            if frame.complete {
                break;
            }
        }

        sleep(self.completion_delay).await;
        tracing::debug!("loading sequence complete");
        on_complete()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress() -> LoadingProgress {
        LoadingProgress::new(&LoadingConfig::default())
    }

    #[test]
    fn test_phase_boundaries() {
        let p = progress();

        let start = p.frame_at(Duration::ZERO);
        assert_eq!(start.progress, 0.0);
        assert_eq!(start.phase, LoadingPhase::Hook);

        let hook_end = p.frame_at(Duration::from_millis(1800));
        assert_eq!(hook_end.phase, LoadingPhase::Suspense);
        assert!((hook_end.progress - 30.0).abs() < 1e-9);
        assert_eq!(hook_end.status_step, 1);

        let finish = p.frame_at(Duration::from_millis(5000));
        assert_eq!(finish.phase, LoadingPhase::Finish);
        assert!((finish.progress - 70.0).abs() < 1e-9);

        let done = p.frame_at(Duration::from_millis(6500));
        assert!(done.complete);
        assert_eq!(done.percent(), 100);
        assert_eq!(done.status(), "My Oxygen Engine ready!");
    }

    #[test]
    fn test_status_step_in_suspense() {
        let p = progress();
        // 45% is reached 1200ms into suspense
        assert_eq!(p.frame_at(Duration::from_millis(2999)).status_step, 1);
        assert_eq!(p.frame_at(Duration::from_millis(3001)).status_step, 2);
        assert_eq!(
            p.frame_at(Duration::from_millis(4500)).message(),
            "Building your reputation..."
        );
    }

    #[test]
    fn test_progress_is_monotonic() {
        let p = progress();
        let mut last = -1.0;
        for ms in (0..7000).step_by(7) {
            let frame = p.frame_at(Duration::from_millis(ms));
            assert!(frame.progress >= last, "regressed at {}ms", ms);
            assert!(frame.progress <= 100.0);
            last = frame.progress;
        }
    }

    #[test]
    fn test_zero_length_phases() {
        let p = LoadingProgress::new(&LoadingConfig {
            hook_ms: 0,
            suspense_ms: 0,
            finish_ms: 0,
            ..LoadingConfig::default()
        });
        assert!(p.frame_at(Duration::ZERO).complete);
    }
}
