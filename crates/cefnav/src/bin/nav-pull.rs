//! Closed-end fund NAV pull CLI.
//!
//! Downloads fund and NAV closes for a valuation date, computes each fund's
//! price-to-NAV ratio, attaches balance-sheet figures and writes
//! `Closed_End_Fund_Data_<date>.xlsx`.
//!
//! Usage: `cargo run --features cli --bin nav-pull -- run [--date YYYY-MM-DD]`
//! or `cargo run --features cli --bin nav-pull -- session`

use std::{error::Error, path::PathBuf, sync::Arc, time::Duration};

use cefnav::{
    export::{ExportConfig, report_frame, write_csv, write_workbook},
    pipeline::{NavPull, PullConfig, RunOutcome, Sources},
    primitives::{DATE_FORMAT, DEFAULT_LOOKBACK_DAYS, Date, ReportingPeriod, Symbol},
    traits::ProgressSink,
    yahoo::{DEFAULT_REFERENCE_URL, XlsxReferenceSource, YahooConfig, YahooSource},
};
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "nav-pull", version, about = "Closed-end fund NAV and discount pull")]
struct Cli {
    #[command(flatten)]
    options: Options,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct Options {
    /// Workbook listing fund and NAV tickers
    #[arg(long, env = "CEFNAV_REFERENCE_URL", default_value = DEFAULT_REFERENCE_URL, global = true)]
    reference_url: String,

    /// Directory for output files
    #[arg(long, env = "CEFNAV_OUTPUT_DIR", default_value = ".", global = true)]
    output_dir: PathBuf,

    /// Use annual instead of quarterly balance sheets
    #[arg(long, global = true)]
    annual: bool,

    /// Days searched on either side of the valuation date
    #[arg(
        long,
        env = "CEFNAV_LOOKBACK_DAYS",
        default_value_t = DEFAULT_LOOKBACK_DAYS,
        global = true
    )]
    lookback_days: u64,

    /// Chart requests kept in flight
    #[arg(long, env = "CEFNAV_MAX_CONCURRENT", default_value_t = 8, global = true)]
    max_concurrent: usize,

    /// Minutes the reference sheet stays cached in a session (0 = until reload)
    #[arg(long, env = "CEFNAV_REFERENCE_TTL_MINUTES", default_value_t = 60, global = true)]
    reference_ttl_minutes: u64,

    /// Also write the results table as CSV
    #[arg(long, global = true)]
    csv: bool,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Pull a single valuation date
    Run {
        /// Valuation date (YYYY-MM-DD), defaults to today
        #[arg(long, value_parser = parse_date)]
        date: Option<Date>,
    },
    /// Read valuation dates from stdin; `reload` refreshes the reference
    /// sheet, `quit` exits
    Session,
}

fn parse_date(s: &str) -> Result<Date, String> {
    Date::parse_from_str(s.trim(), DATE_FORMAT).map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

fn today() -> Date {
    Local::now().date_naive()
}

/// Log directives used when `RUST_LOG` is unset; covers the library crates
/// and this binary.
const fn default_directives(verbose: bool) -> &'static str {
    if verbose { "cefnav=debug,nav_pull=debug,warn" } else { "cefnav=info,nav_pull=info,warn" }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

/// Progress bar advancing once per report row.
struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    fn new() -> Self {
        let bar = ProgressBar::new(0);
        let style = ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>4}/{len:4} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        bar.set_style(style);
        Self { bar }
    }
}

impl ProgressSink for BarProgress {
    fn advance(&self, done: usize, total: usize, symbol: &Symbol) {
        self.bar.set_length(total as u64);
        self.bar.set_position(done as u64);
        self.bar.set_message(symbol.to_string());
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

struct App {
    pull: NavPull,
    export: ExportConfig,
    csv: bool,
}

impl App {
    fn new(options: &Options) -> Result<Self, Box<dyn Error>> {
        let yahoo = Arc::new(YahooSource::with_config(YahooConfig {
            max_concurrent_requests: options.max_concurrent,
            ..YahooConfig::default()
        })?);
        let sources = Sources {
            reference: Arc::new(XlsxReferenceSource::new(options.reference_url.as_str())?),
            prices: yahoo.clone(),
            fundamentals: yahoo.clone(),
            profiles: yahoo,
        };
        let config = PullConfig {
            reporting_period: if options.annual {
                ReportingPeriod::Annual
            } else {
                ReportingPeriod::Quarterly
            },
            lookback_days: options.lookback_days,
            reference_ttl: (options.reference_ttl_minutes > 0)
                .then(|| Duration::from_secs(options.reference_ttl_minutes * 60)),
        };

        Ok(Self {
            pull: NavPull::with_config(sources, config)?,
            export: ExportConfig::in_dir(options.output_dir.clone()),
            csv: options.csv,
        })
    }

    async fn pull(&self, date: Date) -> Result<RunOutcome, Box<dyn Error>> {
        println!("\nPulling closed-end fund data for {date}...\n");
        let progress = BarProgress::new();
        let outcome = self.pull.run(date, &progress).await?;

        for notice in &outcome.notices {
            warn!("{notice}");
        }
        println!("{}", report_frame(&outcome.rows)?);

        let path = write_workbook(&outcome.rows, outcome.price_date, &self.export)?;
        println!("\nNAV data pull complete: {}", path.display());
        if self.csv {
            let path = write_csv(&outcome.rows, outcome.price_date, &self.export)?;
            println!("CSV written: {}", path.display());
        }
        Ok(outcome)
    }

    async fn session(&self) -> Result<(), Box<dyn Error>> {
        println!("Enter a valuation date (YYYY-MM-DD, empty for today), `reload` or `quit`.");
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        while let Some(line) = lines.next_line().await? {
            match line.trim() {
                "quit" | "exit" => break,
                "reload" => {
                    self.pull.reference().invalidate();
                    info!("reference sheet will be reloaded on the next run");
                }
                input => {
                    let date = if input.is_empty() { Ok(today()) } else { parse_date(input) };
                    match date {
                        Ok(date) => {
                            if let Err(e) = self.pull(date).await {
                                eprintln!("Error: {e}");
                            }
                        }
                        Err(e) => eprintln!("Error: {e}"),
                    }
                }
            }
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_tracing(cli.options.verbose);

    let app = App::new(&cli.options)?;
    match cli.command {
        Command::Run { date } => {
            if let Err(e) = app.pull(date.unwrap_or_else(today)).await {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        Command::Session => app.session().await?,
    }

    Ok(())
}
