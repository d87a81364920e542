use thiserror::Error;

/// Failures looking up a year's configuration. These are the only fatal
/// conditions in a computation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("tax configuration for assessment year {0} not found")]
    YearNotFound(String),

    #[error("assessment year {year} has no configuration for {entity}")]
    EntityNotConfigured { year: String, entity: String },

    #[error("new tax regime is not available for assessment year {0}")]
    RegimeNotAvailable(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ComputationError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("snapshot is for assessment year {snapshot} but configuration is for {config}")]
    YearMismatch { snapshot: String, config: String },
}
