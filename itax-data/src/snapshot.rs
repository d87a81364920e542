//! Reading taxpayer snapshots from TOML.
//!
//! Every section and field is optional; absent amounts are zero. A minimal
//! snapshot:
//!
//! ```toml
//! assessment_year = "2024-25"
//! taxpayer_type = "individual"
//! residential_status = "ROR"
//!
//! [salary.basic_salary]
//! additions = [{ id = "1", amount = 1000000, location = "India" }]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use itax_core::TaxpayerSnapshot;
use thiserror::Error;
use tracing::debug;

use crate::builtin::filing_due_date;

/// Errors that can occur when reading a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Parse a snapshot from TOML text.
pub fn parse_snapshot(text: &str) -> Result<TaxpayerSnapshot, SnapshotError> {
    Ok(toml::from_str(text)?)
}

/// Read a snapshot from a TOML file.
pub fn read_snapshot(path: &Path) -> Result<TaxpayerSnapshot, SnapshotError> {
    let text = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_snapshot(&text)
}

/// Fill an empty filing due date from the built-in due dates for the
/// snapshot's year and taxpayer type. Returns whether a date was filled.
pub fn fill_due_date(snapshot: &mut TaxpayerSnapshot) -> bool {
    let facts = &mut snapshot.interest_calc;
    if !facts.due_date_of_filing.trim().is_empty() {
        return false;
    }
    match filing_due_date(&snapshot.assessment_year, snapshot.taxpayer_type) {
        Some(date) => {
            debug!(assessment_year = %snapshot.assessment_year, due_date = date, "using built-in filing due date");
            facts.due_date_of_filing = date.to_string();
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use itax_core::{
        AgeBand, IncomeLocation, PresumptiveScheme, ResidentialStatus, TaxRegime, TaxpayerType,
    };
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const SNAPSHOT: &str = r#"
assessment_year = "2024-25"
taxpayer_type = "individual"
residential_status = "RNOR"
age = "from60_to80"
tax_regime = "New"
tds = 15000

[salary.basic_salary]
additions = [
    { id = "1", amount = 900000, location = "India" },
    { id = "2", amount = 100000, location = "Outside India" },
]

[pgbp]
presumptive_scheme = "44AD"

[pgbp.turnover_44ad_digital]
additions = [{ amount = 1000000 }]

[interest_calc]
actual_date_of_filing = "2024-09-15"
"#;

    #[test]
    fn test_parse_snapshot() {
        let snapshot = parse_snapshot(SNAPSHOT).expect("Failed to parse snapshot");

        assert_eq!(snapshot.assessment_year, "2024-25");
        assert_eq!(snapshot.taxpayer_type, TaxpayerType::Individual);
        assert_eq!(snapshot.residential_status, ResidentialStatus::ResidentNotOrdinarilyResident);
        assert_eq!(snapshot.age, AgeBand::From60To80);
        assert_eq!(snapshot.tax_regime, TaxRegime::New);
        assert_eq!(snapshot.tds, Some(dec!(15000)));
        assert_eq!(snapshot.salary.basic_salary.additions.len(), 2);
        assert_eq!(snapshot.salary.basic_salary.additions[1].location, IncomeLocation::OutsideIndia);
        assert_eq!(snapshot.pgbp.presumptive_scheme, PresumptiveScheme::Ad);
        assert_eq!(snapshot.pgbp.turnover_44ad_digital.additions[0].value(), dec!(1000000));
        assert_eq!(snapshot.interest_calc.due_date_of_filing, "");
    }

    #[test]
    fn test_parse_snapshot_defaults() {
        let snapshot = parse_snapshot("").expect("Failed to parse snapshot");

        assert_eq!(snapshot, TaxpayerSnapshot::default());
    }

    #[test]
    fn test_parse_snapshot_rejects_unknown_status() {
        let result = parse_snapshot(r#"residential_status = "resident""#);

        assert!(matches!(result, Err(SnapshotError::Parse(_))));
    }

    #[test]
    fn test_read_snapshot_missing_file() {
        let result = read_snapshot(Path::new("does/not/exist.toml"));

        assert!(matches!(result, Err(SnapshotError::Io { .. })));
    }

    // =========================================================================
    // fill_due_date tests
    // =========================================================================

    #[test]
    fn test_fill_due_date_by_taxpayer_type() {
        let mut individual = parse_snapshot(SNAPSHOT).expect("Failed to parse snapshot");
        let mut firm = TaxpayerSnapshot {
            taxpayer_type: TaxpayerType::Firm,
            ..TaxpayerSnapshot::default()
        };

        assert!(fill_due_date(&mut individual));
        assert!(fill_due_date(&mut firm));

        assert_eq!(individual.interest_calc.due_date_of_filing, "2024-07-31");
        assert_eq!(firm.interest_calc.due_date_of_filing, "2024-10-31");
    }

    #[test]
    fn test_fill_due_date_keeps_given_date() {
        let mut snapshot = TaxpayerSnapshot::default();
        snapshot.interest_calc.due_date_of_filing = "2024-09-15".to_string();

        assert!(!fill_due_date(&mut snapshot));
        assert_eq!(snapshot.interest_calc.due_date_of_filing, "2024-09-15");
    }
}
