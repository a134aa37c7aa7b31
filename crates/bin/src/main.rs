//! Hobart CLI binary.
//!
//! Provides the command-line interface for the Hobart screener.

mod integration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use hobart::{GicsSector, ScreenOutcome, ScreenSource, Screener, ScreenerConfig, ScreeningCriteria};
use hobart_data::cache::DEFAULT_STALE_DAYS;
use hobart_data::{
    CacheConfig, CsvUniverseProvider, FmpCashFlowClient, WikipediaSp500Provider,
    YahooFinancialsProvider,
};
use hobart_output::{ExportFormat, Exporter, ScreenReport, to_dataframe};
use indicatif::{ProgressBar, ProgressStyle};
use integration::cache_manager::print_cache_info;
use integration::universe_source::UniverseSource;
use std::path::PathBuf;
use std::process;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "hobart")]
#[command(about = "Hobart: fundamental-ratio equity screener", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Screen the universe against ratio thresholds
    Screen {
        /// Current ratio must exceed this
        #[arg(long, default_value_t = 1.5)]
        min_current_ratio: f64,

        /// Debt to equity must be below this
        #[arg(long, default_value_t = 0.5)]
        max_debt_to_equity: f64,

        /// Forward P/E must be below this
        #[arg(long, default_value_t = 20.0)]
        max_pe: f64,

        /// Dividend yield must exceed this, in percent
        #[arg(long, default_value_t = 2.0)]
        min_dividend_yield: f64,

        /// Payout ratio must be below this
        #[arg(long, default_value_t = 0.6)]
        max_payout_ratio: f64,

        /// Only show companies in this GICS sector
        #[arg(long)]
        sector: Option<String>,

        /// Read the universe from a CSV file instead of Wikipedia
        #[arg(long)]
        universe_file: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Write results to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Disable caching (always fetch fresh data)
        #[arg(long)]
        no_cache: bool,

        /// Force refresh cached data
        #[arg(long)]
        refresh: bool,

        #[command(flatten)]
        cache: CacheArgs,
    },

    /// Show cache entries and staleness
    Cache {
        #[command(flatten)]
        cache: CacheArgs,
    },

    /// List GICS sectors
    Sectors,

    /// Show quarterly cash-flow statements from Financial Modeling Prep
    Cashflow {
        /// Stock symbol
        ticker: String,

        /// Number of quarters to show
        #[arg(long, default_value_t = 4)]
        quarters: usize,
    },
}

#[derive(Args)]
struct CacheArgs {
    /// Directory holding cached datasets (default: system temp dir)
    #[arg(long, env = "HOBART_CACHE_DIR")]
    cache_dir: Option<PathBuf>,

    /// Cached datasets older than this many days are rebuilt
    #[arg(long, env = "HOBART_CACHE_STALE_DAYS", default_value_t = DEFAULT_STALE_DAYS)]
    cache_stale_days: i64,
}

impl CacheArgs {
    fn config(&self) -> CacheConfig {
        let defaults = CacheConfig::default();
        CacheConfig {
            dir: self.cache_dir.clone().unwrap_or(defaults.dir),
            stale_days: self.cache_stale_days,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Fixed-width text table
    Table,
    /// Markdown document
    Markdown,
    /// Comma-separated values
    Csv,
    /// Pretty-printed JSON
    Json,
    /// Polars DataFrame
    Frame,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenvy::dotenv().ok();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing()?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Screen {
            min_current_ratio,
            max_debt_to_equity,
            max_pe,
            min_dividend_yield,
            max_payout_ratio,
            sector,
            universe_file,
            format,
            output,
            no_cache,
            refresh,
            cache,
        } => {
            let criteria = ScreeningCriteria {
                min_current_ratio,
                max_debt_to_equity,
                max_pe_ratio: max_pe,
                max_payout_ratio,
                ..ScreeningCriteria::default()
            }
            .with_dividend_yield_percent(min_dividend_yield);
            let sector = sector.map(|s| s.parse::<GicsSector>()).transpose()?;
            let config = ScreenerConfig {
                cache: cache.config(),
                use_cache: !no_cache,
                force_refresh: refresh,
            };

            run_screen(criteria, sector, universe_file, config, format, output).await?;
        }
        Commands::Cache { cache } => {
            print_cache_info(&cache.config())?;
        }
        Commands::Sectors => {
            list_all_sectors();
        }
        Commands::Cashflow { ticker, quarters } => {
            show_cash_flow(&ticker.to_uppercase(), quarters).await?;
        }
    }

    Ok(())
}

fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

async fn run_screen(
    criteria: ScreeningCriteria,
    sector: Option<GicsSector>,
    universe_file: Option<PathBuf>,
    config: ScreenerConfig,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let universe = match universe_file {
        Some(path) => UniverseSource::Csv(CsvUniverseProvider::new(path)),
        None => UniverseSource::Wikipedia(WikipediaSp500Provider::new()?),
    };
    let screener = Screener::new(universe, YahooFinancialsProvider::new()?, config);

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("█▓░"),
    );
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = screener.run(&criteria, Some(&pb)).await;
    pb.finish_and_clear();
    let mut outcome = result?;

    if let Some(sector) = sector {
        outcome.retain_sector(sector);
        info!(sector = %sector, rows = outcome.rows.len(), "filtered by sector");
    }
    if !outcome.excluded.is_empty() {
        info!(
            excluded = outcome.excluded.len(),
            "tickers excluded for missing or unavailable data"
        );
    }

    let rendered = render(&outcome, &criteria, format)?;
    match output {
        Some(path) => {
            std::fs::write(&path, rendered)?;
            info!(path = %path.display(), rows = outcome.rows.len(), "results written");
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

fn render(
    outcome: &ScreenOutcome,
    criteria: &ScreeningCriteria,
    format: OutputFormat,
) -> Result<String, Box<dyn std::error::Error>> {
    let report = || ScreenReport::new(&outcome.rows, *criteria).with_source(describe_source(outcome));

    let rendered = match format {
        OutputFormat::Table => report().to_ascii_table(),
        OutputFormat::Markdown => report().to_markdown(),
        OutputFormat::Csv => outcome.rows.export_to_string(ExportFormat::Csv)?,
        OutputFormat::Json => outcome.rows.export_to_string(ExportFormat::PrettyJson)?,
        OutputFormat::Frame => format!("{}\n", to_dataframe(&outcome.rows)?),
    };
    Ok(rendered)
}

fn describe_source(outcome: &ScreenOutcome) -> String {
    let origin = match outcome.source {
        ScreenSource::Fresh => "fresh fetch",
        ScreenSource::Cached => "cache",
    };
    let entry = outcome
        .cache_path
        .as_ref()
        .map(|p| format!(" ({})", p.display()))
        .unwrap_or_default();
    format!("{origin}{entry}, {} tickers in dataset", outcome.dataset_size)
}

fn list_all_sectors() {
    println!("GICS Sectors:");
    println!("=============\n");

    for sector in GicsSector::ALL {
        println!("{:2} - {}", sector.code(), sector.name());
    }
}

async fn show_cash_flow(ticker: &str, quarters: usize) -> Result<(), Box<dyn std::error::Error>> {
    let client = FmpCashFlowClient::from_env()?;
    let statements = client.fetch_cash_flow(ticker).await?;

    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║{:^62}║", format!("QUARTERLY CASH FLOW: {}", ticker));
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    if statements.is_empty() {
        println!("No statements returned.");
        return Ok(());
    }

    println!(
        "{:<12} {:<6} {:>18} {:>18} {:>18}",
        "Date", "Period", "Operating CF", "CapEx", "Free CF"
    );
    println!("{}", "-".repeat(76));
    for s in statements.iter().take(quarters) {
        println!(
            "{:<12} {:<6} {:>18} {:>18} {:>18}",
            s.date,
            s.period.as_deref().unwrap_or("-"),
            amount(s.operating_cash_flow),
            amount(s.capital_expenditure),
            amount(s.free_cash_flow),
        );
    }

    Ok(())
}

fn amount(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.0}", v))
}
