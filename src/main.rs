use analytics::{
    AnalyticsEngine, DashboardReport, ForecastSeries, metrics::growth_table,
    series::forecast_series,
};
use anyhow::Context;
use api_client::HttpAnalyticsClient;
use clap::{Parser, Subcommand};
use comfy_table::{Table, presets::UTF8_FULL};
use configuration::{Config, LoggingConfig, load_config};
use engine::{Aggregator, DashboardStore, run_signal_loop};
use events::{DashboardSignal, DashboardState};
use indicatif::ProgressStyle;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::Instrument;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_indicatif::{IndicatifLayer, span_ext::IndicatifSpanExt};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use web_server::AppState;

/// Number of trailing months shown in the growth table.
const GROWTH_TABLE_MONTHS: usize = 6;

/// The main entry point for the Salescope dashboard.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the environment may already be set.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    let _log_guard = init_tracing(&config.logging)?;

    match cli.command {
        Commands::Snapshot(args) => handle_snapshot(&config, args).await,
        Commands::Forecast => handle_forecast(&config).await,
        Commands::Serve(args) => handle_serve(&config, args).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A sales analytics dashboard backed by a remote analytics service.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Without it, `config.toml` is used if present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the dashboard once and print its figures.
    Snapshot(SnapshotArgs),
    /// Fetch the dashboard once and print the forecast card and chart series.
    Forecast,
    /// Serve the dashboard over HTTP, refreshing on request.
    Serve(ServeArgs),
}

#[derive(Parser)]
struct SnapshotArgs {
    /// Print the snapshot and report as JSON instead of tables.
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct ServeArgs {
    /// Address to listen on (e.g., "0.0.0.0:3000"). Defaults to the `server` section.
    #[arg(long)]
    addr: Option<SocketAddr>,
}

// ==============================================================================
// Logging
// ==============================================================================

/// Installs the global subscriber. `RUST_LOG` wins over the configured level.
///
/// The returned guard flushes the log file and must live until the program exits.
fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .context("Invalid log level")?;

    let indicatif_layer = IndicatifLayer::new();
    let console_layer =
        tracing_subscriber::fmt::layer().with_writer(indicatif_layer.get_stderr_writer());

    let (file_layer, guard) = match &logging.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, "salescope.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .with(indicatif_layer)
        .try_init()
        .context("Failed to install the tracing subscriber")?;

    Ok(guard)
}

// ==============================================================================
// Commands
// ==============================================================================

fn build_store(config: &Config) -> anyhow::Result<Arc<DashboardStore>> {
    let client = HttpAnalyticsClient::new(&config.service)?;
    tracing::debug!(base_url = %config.service.base_url, "Analytics client ready.");
    Ok(Arc::new(DashboardStore::new(Aggregator::new(Arc::new(client)))))
}

/// Runs a single refresh cycle behind a spinner.
async fn refresh_once(store: &DashboardStore) -> anyhow::Result<Arc<DashboardState>> {
    let span = tracing::info_span!("refresh");
    span.pb_set_style(
        &ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    span.pb_set_message("Fetching dashboard data...");

    let state = store.refresh().instrument(span).await;

    if !state.has_data() {
        if let Some(error) = &state.last_error {
            anyhow::bail!("Dashboard could not be loaded: {error}");
        }
    }
    Ok(state)
}

async fn handle_snapshot(config: &Config, args: SnapshotArgs) -> anyhow::Result<()> {
    let store = build_store(config)?;
    let state = refresh_once(&store).await?;
    let report = AnalyticsEngine::new().calculate(
        &state.sales,
        state.forecast.as_ref(),
        &state.categories,
        &state.profit,
    );

    if args.json {
        let body = serde_json::json!({ "state": state.as_ref(), "report": report });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    print_status(&state);
    print_report(&state, &report);
    Ok(())
}

async fn handle_forecast(config: &Config) -> anyhow::Result<()> {
    let store = build_store(config)?;
    let state = refresh_once(&store).await?;
    print_status(&state);

    let Some(forecast) = state.forecast.as_ref() else {
        println!("No forecast is available.");
        return Ok(());
    };

    let report = AnalyticsEngine::new().calculate(&[], Some(forecast), &[], &[]);
    if let Some(summary) = &report.forecast {
        let mut table = new_table(&["Forecast", "Value"]);
        table.add_row(vec!["Amount".to_string(), format!("{:.2}", summary.forecast_amount)]);
        table.add_row(vec!["Method".to_string(), summary.method.clone()]);
        table.add_row(vec![
            "Month".to_string(),
            summary.next_period.map(|p| p.label()).unwrap_or_else(|| "-".to_string()),
        ]);
        table.add_row(vec![
            "Historical average".to_string(),
            format!("{:.2}", summary.historical_average),
        ]);
        table.add_row(vec![
            "Growth from average".to_string(),
            format!("{:+.1}%", summary.growth_from_average),
        ]);
        if let Some(trend) = &summary.trend {
            table.add_row(vec![
                "Trend".to_string(),
                format!(
                    "{} (slope {:.2}, R² {:.2}, {:?})",
                    trend.direction, trend.slope, trend.r_squared, trend.tone
                ),
            ]);
        }
        if let Some(confidence) = &summary.confidence {
            table.add_row(vec![
                "Confidence".to_string(),
                format!(
                    "{} (volatility {:.2}, {:?})",
                    confidence.level, confidence.volatility, confidence.tone
                ),
            ]);
        }
        if let Some(components) = &summary.components {
            for (label, value) in [
                ("Linear regression", components.linear_regression),
                ("3-month moving average", components.moving_avg_3),
                ("6-month moving average", components.moving_avg_6),
                ("Weighted average", components.weighted_avg),
            ] {
                table.add_row(vec![label.to_string(), format!("{value:.2}")]);
            }
        }
        println!("{table}");
    }

    print_forecast_series(&forecast_series(forecast));
    Ok(())
}

async fn handle_serve(config: &Config, args: ServeArgs) -> anyhow::Result<()> {
    let addr = match args.addr {
        Some(addr) => addr,
        None => config
            .server
            .bind_address()
            .parse()
            .context("Invalid server address in configuration")?,
    };

    let store = build_store(config)?;
    let (signal_tx, signal_rx) = mpsc::channel(16);
    tokio::spawn(run_signal_loop(store.clone(), signal_rx));

    // The first snapshot is fetched in the background while the server starts.
    signal_tx.send(DashboardSignal::Refresh).await?;

    web_server::run_server(addr, AppState::new(store, signal_tx)).await
}

// ==============================================================================
// Output
// ==============================================================================

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(header.to_vec());
    table
}

fn print_status(state: &DashboardState) {
    let updated = state
        .last_updated_at
        .map(|at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "never".to_string());

    println!("Data source: {:?} | Last updated: {updated}", state.provenance);
    if let Some(error) = &state.last_error {
        println!("Warning: {error}");
    }
}

fn print_report(state: &DashboardState, report: &DashboardReport) {
    let sales = &report.sales;
    let mut table = new_table(&["Sales", "Value"]);
    table.add_row(vec!["Months".to_string(), sales.months.to_string()]);
    table.add_row(vec!["Total".to_string(), format!("{:.2}", sales.total)]);
    table.add_row(vec!["Monthly average".to_string(), format!("{:.2}", sales.average)]);
    table.add_row(vec!["Best month".to_string(), format!("{:.2}", sales.max)]);
    table.add_row(vec!["Worst month".to_string(), format!("{:.2}", sales.min)]);
    table.add_row(vec![
        "Month over month".to_string(),
        format!("{:+.1}%", sales.month_over_month_growth),
    ]);
    println!("{table}");

    let mut growth = new_table(&["Month", "Sales", "Growth"]);
    for row in growth_table(&state.sales, GROWTH_TABLE_MONTHS) {
        growth.add_row(vec![
            row.period.label(),
            format!("{:.2}", row.amount),
            row.growth.map(|g| format!("{g:+.1}%")).unwrap_or_else(|| "-".to_string()),
        ]);
    }
    println!("{growth}");

    if let Some(forecast) = &report.forecast {
        println!(
            "Forecast: {:.2} via {} ({:+.1}% vs. recent average)",
            forecast.forecast_amount, forecast.method, forecast.growth_from_average
        );
    }

    let categories = &report.categories;
    let mut table = new_table(&["Category", "Sales", "Share"]);
    for point in &state.categories {
        let share = if categories.total == 0.0 {
            0.0
        } else {
            point.amount / categories.total * 100.0
        };
        table.add_row(vec![
            point.category.clone(),
            format!("{:.2}", point.amount),
            format!("{share:.1}%"),
        ]);
    }
    println!("{table}");
    println!(
        "Top 3 share: {:.1}% | Distribution: {:?}",
        categories.top3_share * 100.0,
        categories.shape
    );

    let profit = &report.profit;
    println!(
        "Profit: total {:.2}, trend {:+.1}% ({:?}), {} of {} periods profitable",
        profit.total,
        profit.trend_percentage,
        profit.direction,
        profit.profitable_periods,
        profit.periods
    );
}

fn print_forecast_series(series: &ForecastSeries) {
    if series.is_empty() {
        println!("No historical window to chart.");
        return;
    }

    let rows = series
        .historical
        .iter()
        .map(|point| ("historical", point))
        .chain(series.forecast.iter().map(|point| ("forecast", point)))
        .chain(series.regression.iter().flatten().map(|point| ("regression", point)));

    let mut table = new_table(&["Series", "Month", "Value"]);
    for (name, point) in rows {
        table.add_row(vec![
            name.to_string(),
            point.period.label(),
            format!("{:.2}", point.value),
        ]);
    }
    println!("{table}");
}
