//! Settings types.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::refresh::RefreshConfig;

/// Runtime settings for the engine.
///
/// Every field has a default, so the engine runs without a settings file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotaSettings {
    /// Seconds between automatic refetches while polling is active.
    pub poll_interval_secs: u64,
    /// Seconds between recomputations of the staleness text.
    pub staleness_tick_secs: u64,
    /// Days of rota data requested from the provider per fetch.
    pub window_days: u32,
}

impl Default for RotaSettings {
    fn default() -> Self {
        Self {
            poll_interval_secs: 60,
            staleness_tick_secs: 30,
            window_days: 7,
        }
    }
}

impl RotaSettings {
    /// Converts the timer settings into a coordinator configuration.
    pub fn refresh_config(&self) -> RefreshConfig {
        RefreshConfig {
            poll_interval: Duration::from_secs(self.poll_interval_secs),
            staleness_tick: Duration::from_secs(self.staleness_tick_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = RotaSettings::default();
        assert_eq!(settings.poll_interval_secs, 60);
        assert_eq!(settings.staleness_tick_secs, 30);
        assert_eq!(settings.window_days, 7);
    }

    #[test]
    fn test_partial_yaml_overrides_only_named_fields() {
        let settings: RotaSettings = serde_yaml::from_str("poll_interval_secs: 120").unwrap();
        assert_eq!(settings.poll_interval_secs, 120);
        assert_eq!(settings.staleness_tick_secs, 30);
    }

    #[test]
    fn test_refresh_config_conversion() {
        let settings = RotaSettings {
            poll_interval_secs: 90,
            staleness_tick_secs: 15,
            window_days: 7,
        };
        let config = settings.refresh_config();
        assert_eq!(config.poll_interval, Duration::from_secs(90));
        assert_eq!(config.staleness_tick, Duration::from_secs(15));
    }
}
