use std::fs::File;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use itax_core::{
    ComputationError, ComputationResult, ConfigError, ConfigSource, TaxRegime, TaxpayerSnapshot,
    compute_with,
};
use itax_data::{SlabTableLoader, builtin_store, fill_due_date, read_snapshot};
use rust_decimal::Decimal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Compute Indian income tax for a taxpayer snapshot.
///
/// The snapshot is a TOML file. Year tables are built in for AY 2015-16
/// through AY 2024-25; slab tables can be replaced from a CSV file with the
/// columns:
/// - assessment_year: e.g. 2024-25
/// - entity: individual, huf, aop, boi or artificial juridical person
/// - regime: old or new
/// - age_band: below60, 60to80 or above80
/// - upper_limit: the slab's upper bound (empty for unbounded)
/// - rate: the slab rate as a decimal (e.g. 0.05)
#[derive(Parser, Debug)]
#[command(name = "itax-compute")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the TOML taxpayer snapshot
    #[arg(short, long, required_unless_present = "list_years")]
    snapshot: Option<PathBuf>,

    /// CSV file of slab tables replacing the built-in ones
    #[arg(long)]
    slabs: Option<PathBuf>,

    /// Compute under both the old and the new regime
    #[arg(short, long, default_value_t = false)]
    compare: bool,

    /// Print the full computation as TOML
    #[arg(long, default_value_t = false)]
    full: bool,

    /// List the assessment years with built-in tables and exit
    #[arg(long, default_value_t = false)]
    list_years: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut store = builtin_store();

    if let Some(path) = &args.slabs {
        let file = File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
        let records = SlabTableLoader::parse(file)
            .with_context(|| format!("Failed to parse CSV: {}", path.display()))?;
        SlabTableLoader::load(&mut store, &records)
            .with_context(|| format!("Failed to load slab tables from: {}", path.display()))?;
    }

    if args.list_years {
        for year in store.assessment_years() {
            println!("{year}");
        }
        return Ok(());
    }

    let Some(path) = &args.snapshot else {
        bail!("--snapshot is required");
    };
    let mut snapshot =
        read_snapshot(path).with_context(|| format!("Failed to read snapshot: {}", path.display()))?;
    if fill_due_date(&mut snapshot) {
        info!(
            due_date = %snapshot.interest_calc.due_date_of_filing,
            "filing due date not given; using the built-in date"
        );
    }

    if args.compare {
        compare(&store, &snapshot, args.full)
    } else {
        let result = compute_with(&store, &snapshot).context("Computation failed")?;
        report(&result, args.full)
    }
}

/// Computes the snapshot once per regime; the snapshots differ only in
/// `tax_regime`.
fn compare<S: ConfigSource>(store: &S, snapshot: &TaxpayerSnapshot, full: bool) -> Result<()> {
    if !snapshot.taxpayer_type.is_slab_based() {
        warn!(
            taxpayer_type = snapshot.taxpayer_type.as_str(),
            "regime choice does not apply to this taxpayer type"
        );
        let result = compute_with(store, snapshot).context("Computation failed")?;
        return report(&result, full);
    }

    let mut results = Vec::new();
    for regime in [TaxRegime::Old, TaxRegime::New] {
        let candidate = TaxpayerSnapshot {
            tax_regime: regime,
            ..snapshot.clone()
        };
        match compute_with(store, &candidate) {
            Ok(result) => {
                report(&result, full)?;
                results.push(result);
            }
            Err(ComputationError::Config(ConfigError::RegimeNotAvailable(year))) => {
                println!("New regime: not available for AY {year}");
            }
            Err(err) => return Err(err).context("Computation failed"),
        }
        println!();
    }

    if let [old, new] = results.as_slice() {
        let old_total = liability(old);
        let new_total = liability(new);
        let (better, saving) = if new_total < old_total {
            ("New", old_total - new_total)
        } else {
            ("Old", new_total - old_total)
        };
        println!("Lower liability: {better} regime (saves {})", rupees(saving));
    }
    Ok(())
}

fn liability(result: &ComputationResult) -> Decimal {
    result.total_tax_payable + result.interest.total_interest
}

fn rupees(amount: Decimal) -> String {
    format!("Rs. {}", amount.round_dp(2))
}

fn report(result: &ComputationResult, full: bool) -> Result<()> {
    if full {
        let text = toml::to_string_pretty(result).context("Failed to serialize result")?;
        println!("{text}");
        return Ok(());
    }

    println!(
        "AY {} | {} | {:?} regime",
        result.assessment_year,
        result.taxpayer_type.as_str(),
        result.tax_regime
    );
    let rows = [
        ("Gross total income", result.gross_total_income),
        ("Net taxable income", result.net_taxable_income),
        ("Tax on income", result.tax_liability),
        ("Surcharge", result.surcharge),
        ("Marginal relief", result.marginal_relief),
        ("Rebate u/s 87A", result.rebate_87a),
        ("Cess", result.cess),
        ("Foreign tax credit", result.relief),
        ("Total tax payable", result.total_tax_payable),
        ("Interest u/s 234A", result.interest.u_s_234a),
        ("Interest u/s 234B", result.interest.u_s_234b),
        ("Interest u/s 234C", result.interest.u_s_234c),
        ("TDS", result.tds),
        ("Advance tax", result.advance_tax),
        ("Net payable", result.net_payable),
    ];
    for (label, amount) in rows {
        println!("  {label:<20} {:>18}", rupees(amount));
    }

    for entry in &result.set_off_summary {
        println!("  set off: {} against {}: {}", entry.source, entry.against, rupees(entry.amount));
    }
    if let Some(trust) = &result.trust_computation {
        println!("  trust: {} at {}", trust.section_applied, trust.applicable_rate_display);
        for flag in &trust.violation_flags {
            println!("    {flag}");
        }
    }
    Ok(())
}
