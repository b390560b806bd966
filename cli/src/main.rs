//! Parcel rate CLI - Command-line interface
//!
//! Commands:
//!   quote   - Rates for one distance and weight
//!   routes  - Rate sheet for the route book
//!   route   - Manage custom routes
//!   table   - Show the active slab table

mod render;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use parcel_rate_core::table::{load_or_default, FileSource};
use parcel_rate_core::{
    LoadedTable, RateEngine, Route, RouteStore, ScaleSelection, TariffConfig,
};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "parcel-rate", version, about = "Railway parcel rate calculator")]
struct Cli {
    /// Slab table JSON; the built-in table is used when absent or unreadable
    #[arg(long, global = true, env = "PARCEL_RATE_TABLE")]
    table: Option<PathBuf>,

    /// Tariff config JSON (surcharge, tax and markup factors)
    #[arg(long, global = true, env = "PARCEL_RATE_CONFIG")]
    config: Option<PathBuf>,

    /// Custom route store
    #[arg(
        long,
        global = true,
        env = "PARCEL_RATE_ROUTES",
        default_value = "custom_routes.json"
    )]
    routes_file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rates for one distance and weight
    Quote(QuoteArgs),

    /// Rate sheet for every known route
    Routes(RoutesArgs),

    /// Manage custom routes
    #[command(subcommand)]
    Route(RouteCommand),

    /// Show the active slab table
    Table,
}

#[derive(Debug, Args)]
struct QuoteArgs {
    /// Distance in km
    #[arg(long, value_parser = positive_number)]
    distance: f64,

    /// Weight in kg
    #[arg(long, value_parser = positive_number)]
    weight: f64,

    /// `all` or one of L, P, R, S
    #[arg(long, default_value = "all")]
    scale: ScaleSelection,

    /// Print the quote as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct RoutesArgs {
    /// Weight in kg
    #[arg(long, default_value_t = 100.0, value_parser = positive_number)]
    weight: f64,

    /// Only routes whose origin contains this code
    #[arg(long)]
    from: Option<String>,

    /// Only routes whose destination contains this code
    #[arg(long)]
    to: Option<String>,

    /// Print CSV instead of a table
    #[arg(long)]
    csv: bool,
}

#[derive(Debug, Subcommand)]
enum RouteCommand {
    /// Add a custom route
    Add {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        /// Distance in km
        #[arg(long)]
        distance: u32,
        #[arg(long)]
        via: Option<String>,
    },
    /// List custom routes
    List,
    /// Remove all custom routes
    Clear,
}

/// Input validation at the CLI boundary: positive, finite
fn positive_number(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", s))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(format!("'{}' must be a positive number", s));
    }
    Ok(value)
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    init_logging();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let loaded = match &cli.table {
        Some(path) => load_or_default(&FileSource::new(path)),
        None => LoadedTable::built_in(),
    };
    let config = load_config(cli.config.as_ref())?;
    let engine = RateEngine::with_config(&loaded.table, config)?;
    let store = RouteStore::new(&cli.routes_file);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Quote(args) => {
            let quote = engine.quote(args.distance, args.weight, args.scale)?;
            if args.json {
                writeln!(out, "{}", serde_json::to_string_pretty(&quote)?)?;
            } else {
                if cli.table.is_some() {
                    render::write_origin_note(&mut out, &loaded.origin)?;
                }
                render::write_quote(&mut out, &quote)?;
            }
        }
        Command::Routes(args) => {
            let book = store.load_book();
            let routes = book.search(args.from.as_deref(), args.to.as_deref());
            let sheet = engine.route_sheet(&routes, args.weight)?;
            if args.csv {
                render::write_route_sheet_csv(&mut out, &sheet)?;
            } else {
                render::write_route_sheet(&mut out, args.weight, &sheet)?;
            }
        }
        Command::Route(RouteCommand::Add {
            from,
            to,
            distance,
            via,
        }) => {
            let route = Route::new(&from, &to, distance, via.as_deref())?;
            store
                .add_route(route.clone())
                .with_context(|| format!("Failed to update {}", cli.routes_file.display()))?;
            info!(from = %route.from, to = %route.to, distance_km = route.distance_km, "Added route");
            writeln!(out, "Added route {}", render::route_label(&route))?;
        }
        Command::Route(RouteCommand::List) => {
            let book = store.load_book();
            render::write_custom_routes(&mut out, book.custom_routes())?;
        }
        Command::Route(RouteCommand::Clear) => {
            store.clear()?;
            writeln!(out, "Custom routes cleared")?;
        }
        Command::Table => {
            render::write_table_summary(&mut out, &loaded)?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<TariffConfig> {
    let Some(path) = path else {
        return Ok(TariffConfig::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config = TariffConfig::from_json(&json)
        .with_context(|| format!("Invalid config {}", path.display()))?;
    Ok(config)
}
