use std::collections::BTreeMap;

use tracing::debug;

use super::ConfigSource;
use crate::error::ConfigError;
use crate::models::YearConfig;

/// A [`ConfigSource`] held in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryConfigStore {
    years: BTreeMap<String, YearConfig>,
}

impl InMemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the configuration for `config.assessment_year`.
    pub fn insert(&mut self, config: YearConfig) -> Option<YearConfig> {
        debug!(assessment_year = %config.assessment_year, "registering year configuration");
        self.years.insert(config.assessment_year.clone(), config)
    }

    pub fn year_config_mut(&mut self, assessment_year: &str) -> Result<&mut YearConfig, ConfigError> {
        self.years
            .get_mut(assessment_year)
            .ok_or_else(|| ConfigError::YearNotFound(assessment_year.to_string()))
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

impl FromIterator<YearConfig> for InMemoryConfigStore {
    fn from_iter<I: IntoIterator<Item = YearConfig>>(iter: I) -> Self {
        let mut store = Self::new();
        for config in iter {
            store.insert(config);
        }
        store
    }
}

impl ConfigSource for InMemoryConfigStore {
    fn year_config(&self, assessment_year: &str) -> Result<&YearConfig, ConfigError> {
        self.years
            .get(assessment_year)
            .ok_or_else(|| ConfigError::YearNotFound(assessment_year.to_string()))
    }

    fn assessment_years(&self) -> Vec<String> {
        self.years.keys().rev().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::year_2024_25;

    fn year(assessment_year: &str) -> YearConfig {
        YearConfig {
            assessment_year: assessment_year.to_string(),
            ..year_2024_25()
        }
    }

    #[test]
    fn years_listed_most_recent_first() {
        let store: InMemoryConfigStore = ["2022-23", "2024-25", "2023-24"].into_iter().map(year).collect();

        assert_eq!(store.assessment_years(), vec!["2024-25", "2023-24", "2022-23"]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn missing_year_is_an_error() {
        let store: InMemoryConfigStore = [year("2024-25")].into_iter().collect();

        assert_eq!(
            store.year_config("2025-26"),
            Err(ConfigError::YearNotFound("2025-26".to_string()))
        );
    }

    #[test]
    fn insert_replaces_existing_year() {
        let mut store = InMemoryConfigStore::new();
        assert!(store.insert(year("2024-25")).is_none());

        let mut updated = year("2024-25");
        updated.cess_rate = rust_decimal::Decimal::ZERO;
        assert!(store.insert(updated).is_some());

        assert_eq!(store.year_config("2024-25").map(|c| c.cess_rate), Ok(rust_decimal::Decimal::ZERO));
    }
}
