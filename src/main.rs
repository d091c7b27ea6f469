//! Command line entry point for the PTO burn engine.
//!
//! `pto-burn compute` processes one roster file and prints the table;
//! `pto-burn serve` runs the HTTP API.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use pto_burn::api::{AppState, create_router};
use pto_burn::calculation::{AccrualCalculator, CurrentHoursStrategy, compute_roster};
use pto_burn::config::PolicyLoader;
use pto_burn::error::EngineResult;
use pto_burn::io::{read_spreadsheet_file, write_spreadsheet_file};
use pto_burn::models::RosterView;
use pto_burn::render::render_text;

#[derive(Parser)]
#[command(name = "pto-burn")]
#[command(about = "Remaining PTO hours for a payroll roster spreadsheet")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute remaining hours for one roster file and print the table
    #[command(after_help = "\
Examples:
  pto-burn compute roster.xlsx --current-hours 580
  pto-burn compute roster.csv --as-of 2025-06-01 --export burn.xlsx")]
    Compute {
        /// Roster file (csv, xlsx, xls, ods)
        file: PathBuf,

        /// Fixed current hours; weekly decay is used when omitted
        #[arg(long, value_name = "HOURS")]
        current_hours: Option<Decimal>,

        /// Date to evaluate the weekly decay at (defaults to today)
        #[arg(long, value_name = "YYYY-MM-DD")]
        as_of: Option<NaiveDate>,

        /// Accrual policy YAML file (built-in defaults when omitted)
        #[arg(long, env = "PTO_BURN_POLICY")]
        policy: Option<PathBuf>,

        /// Also write the result to this file (xlsx or csv, by extension)
        #[arg(long, short = 'o', value_name = "OUT")]
        export: Option<PathBuf>,
    },

    /// Run the HTTP API
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: SocketAddr,

        /// Accrual policy YAML file (built-in defaults when omitted)
        #[arg(long, env = "PTO_BURN_POLICY")]
        policy: Option<PathBuf>,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn load_policy(path: Option<&Path>) -> EngineResult<PolicyLoader> {
    match path {
        Some(path) => PolicyLoader::load(path),
        None => Ok(PolicyLoader::default()),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Compute {
            file,
            current_hours,
            as_of,
            policy,
            export,
        } => cmd_compute(&file, current_hours, as_of, policy.as_deref(), export.as_deref()),
        Commands::Serve { addr, policy } => cmd_serve(addr, policy.as_deref()).await,
    }
}

fn cmd_compute(
    file: &Path,
    current_hours: Option<Decimal>,
    as_of: Option<NaiveDate>,
    policy_path: Option<&Path>,
    export: Option<&Path>,
) -> ExitCode {
    let correlation_id = Uuid::new_v4();
    let start_time = Instant::now();

    let policy = match load_policy(policy_path) {
        Ok(loader) => loader.into_policy(),
        Err(err) => {
            error!(correlation_id = %correlation_id, error = %err, "Failed to load policy");
            return ExitCode::FAILURE;
        }
    };

    let as_of = as_of.unwrap_or_else(|| Utc::now().date_naive());
    let strategy = CurrentHoursStrategy::from_inputs(current_hours, as_of);
    let calculator = match AccrualCalculator::new(policy.clone(), strategy) {
        Ok(calculator) => calculator,
        Err(err) => {
            error!(correlation_id = %correlation_id, error = %err, "Policy rejected");
            return ExitCode::FAILURE;
        }
    };

    info!(
        correlation_id = %correlation_id,
        file = %file.display(),
        strategy = %strategy.kind(),
        "Processing roster file"
    );

    let result = read_spreadsheet_file(file).and_then(|table| compute_roster(&table, &calculator));
    if let Err(err) = &result {
        warn!(correlation_id = %correlation_id, error = %err, "Roster file rejected");
    }
    let view = match RosterView::from_result(result) {
        Ok(view) => view,
        Err(err) => {
            error!(correlation_id = %correlation_id, error = %err, "Roster computation failed");
            return ExitCode::FAILURE;
        }
    };

    if let Some(table) = view.table() {
        info!(
            correlation_id = %correlation_id,
            current_hours = %table.basis.current_hours,
            output_rows = table.summary.output_rows,
            duration_us = start_time.elapsed().as_micros(),
            "Roster computed successfully"
        );
    }
    print!("{}", render_text(&view, &policy));

    if let Some(out) = export {
        match write_spreadsheet_file(out, &view, &policy) {
            Ok(format) => {
                info!(correlation_id = %correlation_id, path = %out.display(), format = format.extension(), "Export written");
            }
            Err(err) => {
                error!(correlation_id = %correlation_id, error = %err, "Export failed");
                return ExitCode::FAILURE;
            }
        }
    }

    if view.message().is_some() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

async fn cmd_serve(addr: SocketAddr, policy_path: Option<&Path>) -> ExitCode {
    let loader = match load_policy(policy_path) {
        Ok(loader) => loader,
        Err(err) => {
            error!(error = %err, "Failed to load policy");
            return ExitCode::FAILURE;
        }
    };
    let state = AppState::new(loader);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!(addr = %addr, error = %err, "Failed to bind");
            return ExitCode::FAILURE;
        }
    };
    info!(addr = %addr, "PTO burn API listening");

    if let Err(err) = axum::serve(listener, create_router(state)).await {
        error!(error = %err, "Server error");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
