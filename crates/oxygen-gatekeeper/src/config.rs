//! Gatekeeper configuration

use serde::{Deserialize, Serialize};

/// Thresholds used by the marketplace filters
///
/// Trust gates themselves are fixed rules in `oxygen_domain::eligibility`
/// and are not configurable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatekeeperConfig {
    /// Coordinator score at or above which a circle counts as "high trust"
    #[serde(default = "default_high_trust_coordinator")]
    pub high_trust_coordinator_min: u8,

    /// Heat score at or below which a circle counts as "low risk"
    #[serde(default = "default_low_risk_heat")]
    pub low_risk_heat_max: u8,

    /// Cycle length at or below which a circle counts as "fast", in days
    #[serde(default = "default_fast_cycle")]
    pub fast_cycle_max_days: u32,
}

impl Default for GatekeeperConfig {
    fn default() -> Self {
        Self {
            high_trust_coordinator_min: default_high_trust_coordinator(),
            low_risk_heat_max: default_low_risk_heat(),
            fast_cycle_max_days: default_fast_cycle(),
        }
    }
}

fn default_high_trust_coordinator() -> u8 {
    70
}

fn default_low_risk_heat() -> u8 {
    30
}

fn default_fast_cycle() -> u32 {
    7
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GatekeeperConfig::default();
        assert_eq!(config.high_trust_coordinator_min, 70);
        assert_eq!(config.low_risk_heat_max, 30);
        assert_eq!(config.fast_cycle_max_days, 7);
    }
}
