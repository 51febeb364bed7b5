//! # pecvel CLI
//!
//! Peculiar-velocity uncertainty tooling for supernova cosmology.
//!
//! # Usage
//!
//! ```bash
//! # Redshift uncertainty for the default 150/125/100 km/s budget
//! pecvel sigma-z
//!
//! # Distance-modulus uncertainty, linear-theory term handled elsewhere
//! pecvel sigma-mu 0.01 0.05 0.1 --linear-theory 0
//!
//! # Tabulate σ_μ on the configured grid as JSON
//! pecvel --config config/pecvel.toml grid --format json
//!
//! # Reconcile a FITRES table against a reference catalog
//! pecvel audit --fitres FITOPT000.FITRES --catalog nearby.json -v
//! ```
//!
//! Reports go to stdout, logs to stderr.

use clap::{Parser, Subcommand, ValueEnum};
use pecvel::audit::{AuditReport, crossmatch};
use pecvel::catalog::{FitresTable, load_reference_catalog};
use pecvel::grid::evaluate_grid;
use pecvel::uncertainty::{
    VarianceContributions, estimate_redshift_uncertainty, propagate_to_magnitude_uncertainty,
};
use pecvel_common::config::{ConfigLoader, LogLevel, PecvelConfig, VarianceConfig};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process;
use tracing::{Level, debug, error, info};
use tracing_subscriber::EnvFilter;

/// pecvel — peculiar-velocity redshift and distance-modulus uncertainty
#[derive(Parser, Debug)]
#[command(name = "pecvel")]
#[command(version)]
#[command(about = "Peculiar-velocity redshift and distance-modulus uncertainty")]
struct Args {
    /// Path to a pecvel TOML configuration. Built-in defaults when omitted.
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging (DEBUG level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

/// Per-term overrides of the configured variance budget [km/s].
#[derive(clap::Args, Debug)]
struct VarianceArgs {
    /// Linear-theory breakdown term.
    #[arg(long, value_name = "KM_S")]
    linear_theory: Option<f64>,

    /// Velocity-field shot-noise term.
    #[arg(long, value_name = "KM_S")]
    shot_noise: Option<f64>,

    /// Survey incompleteness term.
    #[arg(long, value_name = "KM_S")]
    missing_data: Option<f64>,
}

impl VarianceArgs {
    fn resolve(&self, base: VarianceConfig) -> VarianceContributions {
        VarianceContributions {
            linear_theory: self.linear_theory.unwrap_or(base.linear_theory),
            shot_noise: self.shot_noise.unwrap_or(base.shot_noise),
            missing_data: self.missing_data.unwrap_or(base.missing_data),
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Redshift uncertainty σ_z for the variance budget.
    SigmaZ {
        #[command(flatten)]
        variance: VarianceArgs,
    },

    /// Distance-modulus uncertainty σ_μ for each redshift.
    SigmaMu {
        /// CMB-frame cosmological redshifts (> 0).
        #[arg(required = true, allow_negative_numbers = true)]
        redshifts: Vec<f64>,

        #[command(flatten)]
        variance: VarianceArgs,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// σ_μ tabulated on an evenly spaced redshift grid.
    Grid {
        /// First redshift (overrides config).
        #[arg(long)]
        start: Option<f64>,

        /// Last redshift, inclusive (overrides config).
        #[arg(long)]
        stop: Option<f64>,

        /// Number of grid points (overrides config).
        #[arg(long)]
        points: Option<usize>,

        #[command(flatten)]
        variance: VarianceArgs,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Cross-match a FITRES table against a reference catalog.
    Audit {
        /// SNANA FITRES fitted-results table.
        #[arg(long, value_name = "FILE")]
        fitres: PathBuf,

        /// Reference catalog (JSON array of name/zcmb/zcor/ra/dec records).
        #[arg(long, value_name = "FILE")]
        catalog: PathBuf,

        /// Only audit the first N FITRES rows (overrides config).
        #[arg(long, value_name = "N")]
        max_rows: Option<usize>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

fn main() {
    let args = Args::parse();

    let config = load_config(args.config.as_deref());
    let level = config
        .as_ref()
        .map(|c| c.shared.log_level)
        .unwrap_or_default();
    setup_tracing(&args, level);

    let result = config
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error>)
        .and_then(|config| {
            info!(
                "pecvel v{} run '{}'",
                env!("CARGO_PKG_VERSION"),
                config.shared.run_name
            );
            run(&args, &config)
        });

    if let Err(e) = result {
        error!("FATAL: {e}");
        process::exit(1);
    }
}

/// Load and validate the config file, or fall back to built-in defaults.
fn load_config(path: Option<&Path>) -> Result<PecvelConfig, pecvel_common::config::ConfigError> {
    let config = match path {
        Some(path) => PecvelConfig::load(path)?,
        None => PecvelConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn run(args: &Args, config: &PecvelConfig) -> Result<(), Box<dyn std::error::Error>> {
    match &args.command {
        Command::SigmaZ { variance } => {
            let contributions = variance.resolve(config.variance);
            debug!("variance budget: {:?}", contributions);
            let sigma_z = estimate_redshift_uncertainty(&contributions)?;
            println!("{sigma_z:.9e}");
        }

        Command::SigmaMu {
            redshifts,
            variance,
            format,
        } => {
            let contributions = variance.resolve(config.variance);
            let sigma_mu = propagate_to_magnitude_uncertainty(redshifts, &contributions)?;
            match format {
                OutputFormat::Table => {
                    println!("{:>12} {:>14}", "z", "sigma_mu");
                    for (z, s) in redshifts.iter().zip(&sigma_mu) {
                        println!("{z:>12.6} {s:>14.9}");
                    }
                }
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&sigma_mu)?),
            }
        }

        Command::Grid {
            start,
            stop,
            points,
            variance,
            format,
        } => {
            let mut grid = config.grid;
            grid.start = start.unwrap_or(grid.start);
            grid.stop = stop.unwrap_or(grid.stop);
            grid.points = points.unwrap_or(grid.points);
            grid.validate()?;

            let contributions = variance.resolve(config.variance);
            let rows = evaluate_grid(&grid, &contributions)?;
            info!(
                "evaluated {} grid points over z = [{}, {}]",
                rows.len(),
                grid.start,
                grid.stop
            );
            match format {
                OutputFormat::Table => {
                    println!("{:>12} {:>14}", "z", "sigma_mu");
                    for row in &rows {
                        println!("{:>12.6} {:>14.9}", row.redshift, row.sigma_mu);
                    }
                }
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
            }
        }

        Command::Audit {
            fitres,
            catalog,
            max_rows,
            format,
        } => {
            let mut audit_cfg = config.audit;
            if max_rows.is_some() {
                audit_cfg.max_rows = *max_rows;
            }

            let table = FitresTable::load(fitres)?;
            let candidates = table.records()?;
            let reference = load_reference_catalog(catalog)?;
            info!(
                "auditing {} FITRES rows against {} reference supernovae",
                candidates.len(),
                reference.len()
            );

            let report = crossmatch(&candidates, &reference, &audit_cfg);
            match format {
                OutputFormat::Table => print_audit_table(&report, audit_cfg.vpec_threshold),
                OutputFormat::Json => {
                    let summary = AuditSummary {
                        run_name: &config.shared.run_name,
                        matched: report.pairs.len(),
                        unmatched: report.unmatched,
                        bad_zhd: report.bad_count(),
                        zcmb_mismatches: report.zcmb_mismatch_count(),
                        problems: report.problems().count(),
                        report: &report,
                    };
                    println!("{}", serde_json::to_string_pretty(&summary)?);
                }
            }
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct AuditSummary<'a> {
    run_name: &'a str,
    matched: usize,
    unmatched: usize,
    bad_zhd: usize,
    zcmb_mismatches: usize,
    problems: usize,
    report: &'a AuditReport,
}

fn print_audit_table(report: &AuditReport, vpec_threshold: f64) {
    println!("matched pairs:      {}", report.pairs.len());
    println!("unmatched FITRES:   {}", report.unmatched);
    println!("zCMB mismatches:    {}", report.zcmb_mismatch_count());
    println!("bad zHD:            {}", report.bad_count());
    println!();
    println!("|delta vpec| > {vpec_threshold} km/s:");
    println!(
        "{:<16} {:>12} {:>12} {:>12}",
        "name", "delta_vpec", "vpec_ref", "vpec_fitres"
    );
    for pair in report.problems() {
        println!(
            "{:<16} {:>12.2} {:>12.2} {:>12.2}",
            pair.name,
            pair.delta_vpec(),
            pair.reference.vpec,
            pair.fitres.vpec
        );
    }
}

/// Setup tracing subscriber based on CLI arguments and configured level.
fn setup_tracing(args: &Args, configured: LogLevel) {
    let level = if args.verbose {
        Level::DEBUG
    } else {
        configured.into()
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}
