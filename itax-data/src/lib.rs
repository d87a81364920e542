//! Year-configuration data and snapshot input for the income-tax engine.

pub mod builtin;
pub mod loader;
pub mod snapshot;

pub use builtin::{ASSESSMENT_YEARS, builtin_store, filing_due_date, year_config};
pub use loader::{SlabLoaderError, SlabRecord, SlabTableLoader};
pub use snapshot::{SnapshotError, fill_due_date, parse_snapshot, read_snapshot};
