//! Process configuration from the environment

use crate::cover::ANILIST_ENDPOINT;
use crate::quiz::DEFAULT_TOTAL_ROUNDS;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_COVER_TIMEOUT: Duration = Duration::from_secs(8);

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub port: u16,
    /// Catalog JSON to load instead of the built-in one
    pub catalog_path: Option<PathBuf>,
    pub quiz_rounds: u32,
    pub cover_lookup: bool,
    pub anilist_endpoint: String,
    pub cover_timeout: Duration,
    /// Fixed seed for every conversation's RNG; entropy when unset
    pub rng_seed: Option<u64>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            catalog_path: None,
            quiz_rounds: DEFAULT_TOTAL_ROUNDS,
            cover_lookup: true,
            anilist_endpoint: ANILIST_ENDPOINT.to_string(),
            cover_timeout: DEFAULT_COVER_TIMEOUT,
            rng_seed: None,
        }
    }
}

impl BotConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unparsable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let parsed = |key: &str| lookup(key).and_then(|v| v.trim().parse::<u64>().ok());

        Self {
            port: lookup("ANITIME_PORT")
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(defaults.port),
            catalog_path: lookup("ANITIME_CATALOG_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            quiz_rounds: lookup("ANITIME_QUIZ_ROUNDS")
                .and_then(|r| r.trim().parse().ok())
                .filter(|r| *r > 0)
                .unwrap_or(defaults.quiz_rounds),
            cover_lookup: lookup("ANITIME_COVER_LOOKUP").map_or(defaults.cover_lookup, |v| {
                !matches!(v.trim().to_lowercase().as_str(), "0" | "false" | "off" | "no")
            }),
            anilist_endpoint: lookup("ANILIST_ENDPOINT")
                .filter(|e| !e.trim().is_empty())
                .unwrap_or(defaults.anilist_endpoint),
            cover_timeout: parsed("ANITIME_COVER_TIMEOUT_SECS")
                .filter(|s| *s > 0)
                .map_or(defaults.cover_timeout, Duration::from_secs),
            rng_seed: parsed("ANITIME_RNG_SEED"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> BotConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        BotConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.port, 8000);
        assert_eq!(config.quiz_rounds, 5);
        assert!(config.cover_lookup);
        assert_eq!(config.anilist_endpoint, "https://graphql.anilist.co");
        assert_eq!(config.cover_timeout, Duration::from_secs(8));
        assert!(config.catalog_path.is_none());
        assert!(config.rng_seed.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("ANITIME_PORT", "9100"),
            ("ANITIME_CATALOG_PATH", "/etc/anitime/catalog.json"),
            ("ANITIME_QUIZ_ROUNDS", "3"),
            ("ANITIME_COVER_LOOKUP", "off"),
            ("ANITIME_COVER_TIMEOUT_SECS", "2"),
            ("ANITIME_RNG_SEED", "42"),
        ]);
        assert_eq!(config.port, 9100);
        assert_eq!(
            config.catalog_path,
            Some(PathBuf::from("/etc/anitime/catalog.json"))
        );
        assert_eq!(config.quiz_rounds, 3);
        assert!(!config.cover_lookup);
        assert_eq!(config.cover_timeout, Duration::from_secs(2));
        assert_eq!(config.rng_seed, Some(42));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[
            ("ANITIME_PORT", "not-a-port"),
            ("ANITIME_QUIZ_ROUNDS", "0"),
            ("ANITIME_COVER_TIMEOUT_SECS", "-1"),
            ("ANITIME_RNG_SEED", "abc"),
        ]);
        assert_eq!(config.port, 8000);
        assert_eq!(config.quiz_rounds, 5);
        assert_eq!(config.cover_timeout, Duration::from_secs(8));
        assert!(config.rng_seed.is_none());
    }
}
