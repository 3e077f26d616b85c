//! Frontend configuration
//!
//! Resolution order, highest first:
//! 1. JSON object in local storage under `crm_frontend_config`
//! 2. Build-time `CRM_BACKEND_URL` / `CRM_ANALYTICS_PERIOD`
//! 3. Defaults: backend on port 8001 of the serving host, monthly analytics

use contracts::domain::a001_opportunity::analytics::AnalyticsPeriod;
use serde::{Deserialize, Serialize};

use crate::shared::api_utils::api_base;
use crate::system::auth::storage;

pub const CONFIG_STORAGE_KEY: &str = "crm_frontend_config";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrontendConfig {
    pub backend_url: String,
    pub analytics_period: AnalyticsPeriod,
}

/// Partial override read from local storage
#[derive(Debug, Default, Deserialize)]
struct ConfigOverride {
    backend_url: Option<String>,
    analytics_period: Option<AnalyticsPeriod>,
}

impl FrontendConfig {
    pub fn load() -> Self {
        let mut config = Self::from_values(option_env!("CRM_BACKEND_URL"), option_env!("CRM_ANALYTICS_PERIOD"));

        if let Some(raw) = storage::get_item(CONFIG_STORAGE_KEY) {
            if let Err(e) = config.apply_overrides(&raw) {
                log::warn!("Ignoring invalid {}: {}", CONFIG_STORAGE_KEY, e);
            }
        }

        log::debug!(
            "Frontend config: backend_url={}, analytics_period={}",
            config.backend_url,
            config.analytics_period.as_str()
        );
        config
    }

    /// Builds a config from raw values; `None` or blank values fall back to defaults
    pub fn from_values(backend_url: Option<&str>, analytics_period: Option<&str>) -> Self {
        let backend_url = backend_url
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(api_base);

        let analytics_period = match analytics_period {
            Some(raw) => AnalyticsPeriod::parse(raw).unwrap_or_else(|| {
                log::warn!("Unknown analytics period '{}', using monthly", raw);
                AnalyticsPeriod::default()
            }),
            None => AnalyticsPeriod::default(),
        };

        Self {
            backend_url,
            analytics_period,
        }
    }

    /// Applies the fields present in a JSON override; absent fields are kept
    pub fn apply_overrides(&mut self, raw_json: &str) -> Result<(), serde_json::Error> {
        let overrides: ConfigOverride = serde_json::from_str(raw_json)?;
        if let Some(url) = overrides.backend_url.filter(|u| !u.trim().is_empty()) {
            self.backend_url = url;
        }
        if let Some(period) = overrides.analytics_period {
            self.analytics_period = period;
        }
        Ok(())
    }
}
