//! CLI entry point for the demographic analyzer.

use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};
use demographic_analyzer::{
    AnalysisReport, AnalyzerConfig, DemographicAnalyzer, ReportGenerator, RoundingMode,
    TableSource,
};
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// CLI-compatible rounding mode enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliRoundingMode {
    /// Ties to the even neighbour (35.25 -> 35.2)
    HalfEven,
    /// Ties away from zero (35.25 -> 35.3)
    HalfAwayFromZero,
}

impl From<CliRoundingMode> for RoundingMode {
    fn from(cli: CliRoundingMode) -> Self {
        match cli {
            CliRoundingMode::HalfEven => RoundingMode::HalfEven,
            CliRoundingMode::HalfAwayFromZero => RoundingMode::HalfAwayFromZero,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Demographic statistics over the adult census dataset",
    long_about = "Computes ten descriptive statistics (race counts, average age of men, \
                  education and income shares, working hours, top earning country, \
                  top occupation in India) over a census CSV file.\n\n\
                  EXAMPLES:\n  \
                  # Print the statistics\n  \
                  demographic-analyzer -i adult.data.csv\n\n  \
                  # Machine-readable output\n  \
                  demographic-analyzer -i adult.data.csv --json\n\n  \
                  # Save a JSON report next to the text output\n  \
                  demographic-analyzer -i adult.data.csv -r -o reports/"
)]
struct Args {
    /// Path to the census CSV file
    #[arg(short, long, default_value = "adult.data.csv")]
    input: PathBuf,

    /// Output directory for reports
    #[arg(short, long, default_value = "./outputs")]
    output: PathBuf,

    /// Do not print the statistics
    #[arg(long)]
    no_print: bool,

    /// Output JSON to stdout instead of the text rendering
    ///
    /// Disables all logs; only the JSON report is written.
    #[arg(long)]
    json: bool,

    /// Write a JSON report to the output directory
    ///
    /// The report will be saved as <input_name>_report.json
    #[arg(short = 'r', long)]
    emit_report: bool,

    /// JSON configuration file (labels, rounding, decimals)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Rounding rule, overrides the configuration file
    #[arg(long, value_enum)]
    rounding: Option<CliRoundingMode>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Only show warnings and errors in the log
    #[arg(short, long)]
    quiet: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is disabled so stdout only carries
/// the JSON report.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(args: &Args) -> Result<AnalyzerConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            serde_json::from_str::<AnalyzerConfig>(&content)
                .with_context(|| format!("Invalid config file {}", path.display()))?
        }
        None => AnalyzerConfig::default(),
    };

    if let Some(rounding) = args.rounding {
        config.rounding = rounding.into();
    }
    config.emit_text = !args.no_print && !args.json;

    Ok(config)
}

/// Extract the file stem (name without extension) from a path.
fn extract_file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output")
        .to_string()
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    let config = load_config(&args)?;
    let rounding = config.rounding;
    let analyzer = DemographicAnalyzer::new(config)?;

    let table = TableSource::from(args.input.clone())
        .load()
        .map_err(|e| anyhow!("Failed to load dataset: {}", e))?;

    let stats = match analyzer.run(&table) {
        Ok(stats) => stats,
        Err(e) => {
            error!("Statistics failed: {}", e);
            return Err(anyhow!("Statistics failed: {}", e));
        }
    };

    let report = AnalysisReport::new(args.input.to_string_lossy(), &table, rounding, stats);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    if args.emit_report {
        let generator = ReportGenerator::new(args.output.clone());
        let path = generator.write_report_to_file(&report, &extract_file_stem(&args.input))?;
        info!("Report written to: {}", path.display());
    }

    Ok(())
}
