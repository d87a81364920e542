use crate::error::ConfigError;
use crate::models::YearConfig;

/// A read-only store of year configurations keyed by assessment year
/// (`"2024-25"`).
///
/// A missing year is an error; implementations must never substitute a
/// neighbouring year.
pub trait ConfigSource {
    fn year_config(&self, assessment_year: &str) -> Result<&YearConfig, ConfigError>;

    /// Years available, most recent first.
    fn assessment_years(&self) -> Vec<String>;
}
