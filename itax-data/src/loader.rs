use std::collections::BTreeMap;
use std::io::Read;

use itax_core::{AgeBand, ConfigError, InMemoryConfigStore, TaxRegime, TaxSlab, TaxpayerType};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur when loading slab tables.
#[derive(Debug, Error)]
pub enum SlabLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Unknown entity '{0}'")]
    UnknownEntity(String),

    #[error("Entity '{0}' is not taxed on slabs")]
    NotSlabBased(String),

    #[error("Unknown regime '{0}'")]
    UnknownRegime(String),

    #[error("Unknown age band '{0}'")]
    UnknownAgeBand(String),

    #[error("Invalid slab table for {year} {entity} {regime} {age_band}: {reason}")]
    InvalidTable {
        year: String,
        entity: String,
        regime: String,
        age_band: String,
        reason: &'static str,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl From<csv::Error> for SlabLoaderError {
    fn from(err: csv::Error) -> Self {
        SlabLoaderError::CsvParse(err.to_string())
    }
}

/// A single row from a slab table CSV file.
///
/// - `assessment_year`: e.g. `2024-25`
/// - `entity`: a slab-based taxpayer type (`individual`, `huf`, `aop`, `boi`,
///   `artificial juridical person`)
/// - `regime`: `old` or `new`
/// - `age_band`: `below60`, `60to80` or `above80`
/// - `upper_limit`: the slab's upper bound (empty for unbounded)
/// - `rate`: the slab rate as a decimal (e.g. 0.05 for 5%)
///
/// Rows for one table are listed in ascending order.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SlabRecord {
    pub assessment_year: String,
    pub entity: String,
    pub regime: String,
    pub age_band: String,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub upper_limit: Option<Decimal>,
    pub rate: Decimal,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// One table addressed by the CSV: year, entity, regime and age band.
type TableKey = (String, String, String, String);

/// Loader for slab tables from CSV files.
///
/// Loaded tables replace the matching tables in an [`InMemoryConfigStore`].
/// The year must already be in the store; a row never creates a year.
pub struct SlabTableLoader;

impl SlabTableLoader {
    /// Parse slab records from a CSV reader.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<SlabRecord>, SlabLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: SlabRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Replace slab tables in `store` with the tables in `records`.
    ///
    /// Rows are grouped by (year, entity, regime, age band); each group
    /// becomes one table, in row order. A table must be ascending and end
    /// with exactly one unbounded slab. Returns the number of tables
    /// replaced.
    ///
    /// Every group is validated before the store is touched, so a failed
    /// load leaves the store unchanged.
    pub fn load(store: &mut InMemoryConfigStore, records: &[SlabRecord]) -> Result<usize, SlabLoaderError> {
        let mut groups: BTreeMap<TableKey, Vec<&SlabRecord>> = BTreeMap::new();
        for record in records {
            groups
                .entry((
                    record.assessment_year.clone(),
                    record.entity.clone(),
                    record.regime.clone(),
                    record.age_band.clone(),
                ))
                .or_default()
                .push(record);
        }

        let mut tables = Vec::with_capacity(groups.len());
        for (key, rows) in &groups {
            let (year, entity, regime, age_band) = key;
            let taxpayer_type = TaxpayerType::parse(entity)
                .ok_or_else(|| SlabLoaderError::UnknownEntity(entity.clone()))?;
            if !taxpayer_type.is_slab_based() {
                return Err(SlabLoaderError::NotSlabBased(entity.clone()));
            }
            let regime_value =
                TaxRegime::parse(regime).ok_or_else(|| SlabLoaderError::UnknownRegime(regime.clone()))?;
            let age = AgeBand::parse(age_band).ok_or_else(|| SlabLoaderError::UnknownAgeBand(age_band.clone()))?;

            let slabs: Vec<TaxSlab> = rows
                .iter()
                .map(|r| TaxSlab {
                    upper_limit: r.upper_limit,
                    rate: r.rate,
                })
                .collect();
            if let Err(reason) = validate(&slabs) {
                return Err(SlabLoaderError::InvalidTable {
                    year: year.clone(),
                    entity: entity.clone(),
                    regime: regime.clone(),
                    age_band: age_band.clone(),
                    reason,
                });
            }

            let config = store.year_config_mut(year)?;
            if !config.slab_entities.contains_key(&taxpayer_type) {
                return Err(ConfigError::EntityNotConfigured {
                    year: year.clone(),
                    entity: entity.clone(),
                }
                .into());
            }
            tables.push((year, taxpayer_type, regime_value, age, slabs));
        }

        let replaced = tables.len();
        for (year, taxpayer_type, regime, age, slabs) in tables {
            debug!(
                assessment_year = %year,
                entity = taxpayer_type.as_str(),
                regime = ?regime,
                age_band = ?age,
                slabs = slabs.len(),
                "replacing slab table"
            );
            let config = store.year_config_mut(year)?;
            if let Some(entity) = config.slab_entities.get_mut(&taxpayer_type) {
                entity.slabs_mut(regime).set(age, slabs);
            }
        }

        info!(tables = replaced, "slab tables loaded");
        Ok(replaced)
    }
}

fn validate(slabs: &[TaxSlab]) -> Result<(), &'static str> {
    let Some((last, bounded)) = slabs.split_last() else {
        return Err("no slabs");
    };
    if last.upper_limit.is_some() {
        return Err("last slab must be unbounded");
    }
    let mut previous = Decimal::ZERO;
    for slab in bounded {
        match slab.upper_limit {
            None => return Err("only the last slab may be unbounded"),
            Some(limit) if limit <= previous => return Err("upper limits must ascend"),
            Some(limit) => previous = limit,
        }
    }
    Ok(())
}
