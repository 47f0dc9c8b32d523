//! perfr - Command-line tool for test-runner performance reports

use clap::{Parser, Subcommand, ValueEnum};
use perfreport::commands::{ArrangeCommand, Command, CompareCommand, ProduceCommand};
use perfreport::config::PerfConfig;
use perfreport::duration::decode_millis;
use perfreport::parser::CapturePolicy;
use perfreport::ui::{CliUI, UI};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "perfr")]
#[command(about = "Test-runner performance report tool", long_about = None)]
struct Cli {
    /// Output directory for generated artifacts (defaults to .perfr.conf or
    /// the current directory)
    #[arg(short = 'o', long, global = true)]
    out_dir: Option<String>,

    /// Show debug output
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum CaptureArg {
    /// Capture nothing
    None,
    /// Capture output of passing tests
    Ok,
    /// Capture output of failing tests
    Failed,
    /// Capture output of every test
    Both,
}

impl From<CaptureArg> for CapturePolicy {
    fn from(arg: CaptureArg) -> Self {
        match arg {
            CaptureArg::None => CapturePolicy::None,
            CaptureArg::Ok => CapturePolicy::OkOnly,
            CaptureArg::Failed => CapturePolicy::FailedOnly,
            CaptureArg::Both => CapturePolicy::Both,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a runner log and produce a ranked performance report
    Produce {
        /// Path to the runner log
        log: PathBuf,

        /// Which tests get their output written to per-test capture files
        #[arg(long, value_enum)]
        capture: Option<CaptureArg>,

        /// Number of tests in the ranked listing
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },

    /// Compare a runner log against a previously produced report
    Compare {
        /// Path to the runner log
        log: PathBuf,

        /// Path to the baseline perf_report.txt
        baseline: PathBuf,
    },

    /// Select the fastest tests from a report that fit a time budget
    Arrange {
        /// Path to the baseline perf_report.txt
        baseline: PathBuf,

        /// Time budget as HH:MM:SS.mmm
        #[arg(short = 'b', long)]
        budget: String,
    },
}

fn run(cli: Cli, ui: &mut dyn UI) -> perfreport::Result<i32> {
    let config = PerfConfig::load_optional(Path::new("."))?;

    let out_dir = cli
        .out_dir
        .or(config.out_dir)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&out_dir)?;

    match cli.command {
        Commands::Produce {
            log,
            capture,
            count,
        } => {
            let policy = capture
                .map(CapturePolicy::from)
                .or(config.capture)
                .unwrap_or(CapturePolicy::None);
            let count = count.or(config.count).unwrap_or(10);
            ProduceCommand::with_count(log, out_dir, policy, count).execute(ui)
        }
        Commands::Compare { log, baseline } => {
            CompareCommand::new(log, baseline, out_dir).execute(ui)
        }
        Commands::Arrange { baseline, budget } => {
            let budget_ms = decode_millis(&budget)?;
            ArrangeCommand::new(baseline, out_dir, budget_ms).execute(ui)
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let mut ui = CliUI::new(cli.verbose);

    match run(cli, &mut ui) {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            let _ = ui.fatal(&e.to_string());
            std::process::exit(1);
        }
    }
}
