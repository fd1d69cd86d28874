//! Navigator configuration
//!
//! Loaded from TOML. Every field has a default, so an empty file is valid.
//!
//! ```toml
//! tap_window_ms = 3000
//! tap_threshold = 5
//! seed_trust_score = 45
//!
//! [loading]
//! hook_ms = 1800
//! suspense_ms = 3200
//! finish_ms = 1500
//!
//! [payment]
//! detection_delay_ms = 2000
//! ```

use crate::ConfigError;
use oxygen_domain::TrustScore;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Configuration for the navigation controller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigatorConfig {
    /// Longest gap between logo taps that still counts as one gesture
    #[serde(default = "default_tap_window")]
    pub tap_window_ms: u64,

    /// Taps needed to open the trust hub
    #[serde(default = "default_tap_threshold")]
    pub tap_threshold: u32,

    /// Trust score a session starts with before any source is consulted
    #[serde(default = "default_seed_trust_score")]
    pub seed_trust_score: u8,

    /// Loading screen pacing
    #[serde(default)]
    pub loading: LoadingConfig,

    /// Simulated payment detection
    #[serde(default)]
    pub payment: PaymentConfig,
}

/// Loading screen pacing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadingConfig {
    /// Hook phase (0-30%)
    #[serde(default = "default_hook")]
    pub hook_ms: u64,

    /// Suspense phase (30-70%)
    #[serde(default = "default_suspense")]
    pub suspense_ms: u64,

    /// Finish phase (70-100%)
    #[serde(default = "default_finish")]
    pub finish_ms: u64,

    /// Progress refresh interval
    #[serde(default = "default_tick")]
    pub tick_ms: u64,

    /// Pause at 100% before completion fires
    #[serde(default = "default_completion_delay")]
    pub completion_delay_ms: u64,
}

/// Simulated payment detection timing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentConfig {
    /// Time from confirming a commit to the payment being detected
    #[serde(default = "default_detection_delay")]
    pub detection_delay_ms: u64,

    /// Pause after detection before the success screen
    #[serde(default = "default_success_delay")]
    pub success_delay_ms: u64,
}

fn default_tap_window() -> u64 {
    3000
}

fn default_tap_threshold() -> u32 {
    5
}

fn default_seed_trust_score() -> u8 {
    TrustScore::SEED.value()
}

fn default_hook() -> u64 {
    1800
}

fn default_suspense() -> u64 {
    3200
}

fn default_finish() -> u64 {
    1500
}

fn default_tick() -> u64 {
    16
}

fn default_completion_delay() -> u64 {
    300
}

fn default_detection_delay() -> u64 {
    2000
}

fn default_success_delay() -> u64 {
    1000
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            tap_window_ms: default_tap_window(),
            tap_threshold: default_tap_threshold(),
            seed_trust_score: default_seed_trust_score(),
            loading: LoadingConfig::default(),
            payment: PaymentConfig::default(),
        }
    }
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            hook_ms: default_hook(),
            suspense_ms: default_suspense(),
            finish_ms: default_finish(),
            tick_ms: default_tick(),
            completion_delay_ms: default_completion_delay(),
        }
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            detection_delay_ms: default_detection_delay(),
            success_delay_ms: default_success_delay(),
        }
    }
}

impl NavigatorConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: NavigatorConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Timings shortened for demos and scripted runs
    pub fn fast() -> Self {
        Self {
            loading: LoadingConfig {
                hook_ms: 180,
                suspense_ms: 320,
                finish_ms: 150,
                tick_ms: 16,
                completion_delay_ms: 30,
            },
            payment: PaymentConfig {
                detection_delay_ms: 200,
                success_delay_ms: 100,
            },
            ..Self::default()
        }
    }

    /// Check ranges serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tap_threshold == 0 {
            return Err(ConfigError::Invalid("tap_threshold must be at least 1".to_string()));
        }
        if self.seed_trust_score > TrustScore::MAX.value() {
            return Err(ConfigError::Invalid(format!(
                "seed_trust_score {} is outside 0..=100",
                self.seed_trust_score
            )));
        }
        if self.loading.tick_ms == 0 {
            return Err(ConfigError::Invalid("loading.tick_ms must be positive".to_string()));
        }
        Ok(())
    }

    /// The seed score as a [`TrustScore`]
    pub fn seed_trust_score(&self) -> TrustScore {
        TrustScore::new(self.seed_trust_score)
    }
}

impl LoadingConfig {
    /// Tick interval as a [`Duration`]
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Sum of the three phases
    pub fn total(&self) -> Duration {
        Duration::from_millis(self.hook_ms + self.suspense_ms + self.finish_ms)
    }
}

impl PaymentConfig {
    /// Detection delay as a [`Duration`]
    pub fn detection_delay(&self) -> Duration {
        Duration::from_millis(self.detection_delay_ms)
    }

    /// Success delay as a [`Duration`]
    pub fn success_delay(&self) -> Duration {
        Duration::from_millis(self.success_delay_ms)
    }
}
