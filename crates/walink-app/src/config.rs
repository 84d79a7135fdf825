use std::time::Duration;

use walink_core::history::DEFAULT_CAPACITY;
use walink_core::phone::SAUDI_COUNTRY_CODE;

use crate::error::AppError;

pub const DEFAULT_STORAGE_KEY: &str = "whatsapp_link_history";
pub const DEFAULT_GENERATION_DELAY: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub country_code: String,
    pub max_history: usize,
    /// How long a request stays in the generating state before the link is
    /// committed. Purely cosmetic, drives a loading indicator.
    pub generation_delay: Duration,
    pub storage_key: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            country_code: SAUDI_COUNTRY_CODE.to_string(),
            max_history: DEFAULT_CAPACITY,
            generation_delay: DEFAULT_GENERATION_DELAY,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Reads `WALINK_COUNTRY_CODE`, `WALINK_MAX_HISTORY`,
    /// `WALINK_GENERATION_DELAY_MS` and `WALINK_STORAGE_KEY`. Unset variables
    /// keep their defaults.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let country_code = lookup("WALINK_COUNTRY_CODE").unwrap_or(defaults.country_code);
        if country_code.is_empty() || !country_code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AppError::Config(format!(
                "WALINK_COUNTRY_CODE must be digits, got {country_code:?}"
            )));
        }

        let max_history = match lookup("WALINK_MAX_HISTORY") {
            Some(v) => v
                .parse::<usize>()
                .map_err(|e| AppError::Config(format!("WALINK_MAX_HISTORY: {e}")))?,
            None => defaults.max_history,
        };
        if max_history == 0 {
            return Err(AppError::Config(
                "WALINK_MAX_HISTORY must be at least 1".into(),
            ));
        }

        let generation_delay = match lookup("WALINK_GENERATION_DELAY_MS") {
            Some(v) => v
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|e| AppError::Config(format!("WALINK_GENERATION_DELAY_MS: {e}")))?,
            None => defaults.generation_delay,
        };

        let storage_key = lookup("WALINK_STORAGE_KEY").unwrap_or(defaults.storage_key);

        Ok(Self {
            country_code,
            max_history,
            generation_delay,
            storage_key,
        })
    }
}
