use analytics::{AnalyticsEngine, HistogramBin, Metric, MetricSet};
use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use comfy_table::Table;
use configuration::AnalysisArgs;
use core_types::DerivedSeries;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod input;

/// The main entry point for the Quantlens return analytics tool.
fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Parse command-line arguments
    let cli = Cli::parse();

    // Layer file and environment settings, then command-line overrides.
    let mut config = configuration::load_config(cli.config.as_deref())
        .context("failed to load configuration")?;
    cli.analysis.apply(&mut config.analysis);
    let engine = AnalyticsEngine::new(config.analysis).context("invalid analysis settings")?;

    // Execute the appropriate command
    match cli.command {
        Commands::Metrics(args) => handle_metrics(&engine, args),
        Commands::Series(args) => handle_series(&engine, args),
        Commands::Distribution(args) => handle_distribution(&engine, args),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Risk and performance analytics for daily price histories.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file. Defaults to `config.toml` in the working directory, if present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    analysis: AnalysisArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the metric table for one or more instruments.
    Metrics(MetricsArgs),
    /// Print a per-period derived series for one instrument.
    Series(SeriesArgs),
    /// Print the return distribution histogram for one instrument.
    Distribution(DistributionArgs),
}

#[derive(Parser)]
struct MetricsArgs {
    /// JSON price files; each file is one instrument named after its file stem.
    #[arg(long = "input", short, required = true, num_args = 1..)]
    inputs: Vec<PathBuf>,

    /// Emit JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct SeriesArgs {
    /// JSON price file.
    #[arg(long, short)]
    input: PathBuf,

    /// Which series to print.
    #[arg(long, value_enum)]
    kind: SeriesKind,

    /// Emit JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct DistributionArgs {
    /// JSON price file.
    #[arg(long, short)]
    input: PathBuf,

    /// Emit JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SeriesKind {
    RollingVolatility,
    Drawdown,
    Cumulative,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn handle_metrics(engine: &AnalyticsEngine, args: MetricsArgs) -> Result<()> {
    let instruments = args
        .inputs
        .iter()
        .map(|path| input::load_instrument(path))
        .collect::<Result<Vec<_>>>()?;

    let results = engine.analyze_batch(&instruments);

    let mut computed: Vec<(String, MetricSet)> = Vec::new();
    let mut failures = 0;
    for analysis in results {
        match analysis.result {
            Ok(report) => computed.push((analysis.symbol, report.metrics)),
            Err(e) => {
                failures += 1;
                eprintln!("{}: {}", analysis.symbol, e);
            }
        }
    }

    if args.json {
        let by_symbol: BTreeMap<&str, &MetricSet> =
            computed.iter().map(|(s, m)| (s.as_str(), m)).collect();
        println!("{}", serde_json::to_string_pretty(&by_symbol)?);
    } else if let Some((_, first)) = computed.first() {
        let mut table = Table::new();
        let mut header = vec!["Metric".to_string()];
        header.extend(computed.iter().map(|(symbol, _)| symbol.clone()));
        table.set_header(header);

        for metric in Metric::ALL {
            let mut row = vec![first.label(metric)];
            row.extend(
                computed
                    .iter()
                    .map(|(_, set)| format_metric(metric, set.get(metric))),
            );
            table.add_row(row);
        }
        println!("{table}");
    }

    if failures > 0 {
        bail!("{} of {} instruments could not be analysed", failures, instruments.len());
    }
    Ok(())
}

fn handle_series(engine: &AnalyticsEngine, args: SeriesArgs) -> Result<()> {
    let instrument = input::load_instrument(&args.input)?;
    let returns = engine.derive_returns(&instrument.prices)?;

    let series: DerivedSeries = match args.kind {
        SeriesKind::RollingVolatility => engine.rolling_volatility(&returns)?,
        SeriesKind::Drawdown => engine.drawdown(&returns),
        SeriesKind::Cumulative => engine.cumulative_returns(&returns),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&series)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Date", "Value"]);
    for point in &series.points {
        table.add_row(vec![
            point.date.to_string(),
            point
                .value
                .map(|v| format!("{:.6}", v))
                .unwrap_or_else(|| "-".to_string()),
        ]);
    }
    println!("{} ({:?})\n{table}", instrument.symbol, args.kind);
    Ok(())
}

fn handle_distribution(engine: &AnalyticsEngine, args: DistributionArgs) -> Result<()> {
    let instrument = input::load_instrument(&args.input)?;
    let returns = engine.derive_returns(&instrument.prices)?;
    let bins: Vec<HistogramBin> = engine.distribution(&returns)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&bins)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["From", "To", "Count"]);
    for bin in &bins {
        table.add_row(vec![
            format!("{:.4}%", bin.lower * 100.0),
            format!("{:.4}%", bin.upper * 100.0),
            bin.count.to_string(),
        ]);
    }
    println!("{} ({:?} returns)\n{table}", instrument.symbol, engine.config().return_kind);
    Ok(())
}

/// Fractions of capital are shown as percentages, ratios as plain numbers.
fn format_metric(metric: Metric, value: Option<f64>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(v) if metric.is_percentage() => format!("{:.2}%", v * 100.0),
        Some(v) => format!("{:.4}", v),
    }
}
