// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use indicatif::{ProgressBar, ProgressStyle};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, error, info, warn};
use std::io::Write;
use std::path::PathBuf;

use spanlint::app_config::{self, Config};
use spanlint::file_utils::FileManager;
use spanlint::reporting::{CollectingSink, LogSink, ReportSink, ScanReport, Severity};
use spanlint::validation::FragmentValidator;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// CLI Wrapper for Severity to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliSeverity {
    Severe,
    Degraded,
    Tolerable,
    Benign,
}

impl From<CliSeverity> for Severity {
    fn from(cli_severity: CliSeverity) -> Self {
        match cli_severity {
            CliSeverity::Severe => Severity::Severe,
            CliSeverity::Degraded => Severity::Degraded,
            CliSeverity::Tolerable => Severity::Tolerable,
            CliSeverity::Benign => Severity::Benign,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan item files or markup fragments
    Scan(ScanArgs),

    /// Generate shell completions for spanlint
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ScanArgs {
    /// Item file, fragment file or directory to scan
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Configuration file path
    #[arg(short, long, default_value = "spanlint.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Severity given to findings
    #[arg(short, long, value_enum)]
    severity: Option<CliSeverity>,

    /// Lowest finding severity that makes the run fail
    #[arg(long, value_enum)]
    fail_on: Option<CliSeverity>,

    /// Write the scan report as JSON to this file
    #[arg(short, long)]
    json: Option<PathBuf>,
}

/// spanlint - glossary span and accessibility scanner
///
/// Validates the markup embedded in test items: glossary span integrity,
/// term tagging consistency, image reference ids and color-altering markup.
#[derive(Parser, Debug)]
#[command(name = "spanlint")]
#[command(version)]
#[command(about = "Glossary span and accessibility scanner for item markup")]
#[command(long_about = "spanlint validates the HTML fragments embedded in test items.

EXAMPLES:
    spanlint scan item-200.xml                  # Scan every CDATA fragment of one item
    spanlint scan items/                        # Scan a directory of items
    spanlint scan -s degraded items/            # Report findings as degraded
    spanlint scan --json report.json items/     # Also write a JSON report
    spanlint completions bash > spanlint.bash   # Generate bash completions

CONFIGURATION:
    Configuration is stored in spanlint.json by default. If the config file
    doesn't exist, a default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
}

// @struct: Custom logger implementation
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger; the threshold follows log::max_level()
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger);
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and tag for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "ERROR"),
            Level::Warn => ("\x1B[1;33m", "WARN "),
            Level::Info => ("\x1B[1;32m", "INFO "),
            Level::Debug => ("\x1B[1;36m", "DEBUG"),
            Level::Trace => ("\x1B[1;35m", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, tag) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // The level is adjusted once the config is loaded
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "spanlint", &mut std::io::stdout());
            Ok(())
        }
        Commands::Scan(args) => run_scan(args),
    }
}

fn run_scan(options: ScanArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = Config::load_or_create(&options.config_path)?;

    // Override config with CLI options if provided
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }
    if let Some(severity) = options.severity {
        config.validation.severity = severity.into();
    }
    if let Some(fail_on) = options.fail_on {
        config.scan.fail_on = fail_on.into();
    }

    config.validate().context("Configuration validation failed")?;
    log::set_max_level(config.log_level.to_level_filter());

    if !FileManager::file_exists(&options.input_path) && !FileManager::dir_exists(&options.input_path) {
        return Err(anyhow!("Input path does not exist: {:?}", options.input_path));
    }

    let files = FileManager::find_files(
        &options.input_path,
        &config.scan.extensions,
        config.scan.follow_links,
    )?;
    if files.is_empty() {
        warn!("No files with extensions {:?} found under {:?}", config.scan.extensions, options.input_path);
        return Ok(());
    }
    info!("Scanning {} files", files.len());

    let collector = CollectingSink::new();
    let validator = FragmentValidator::with_config(config.validation.clone(), &collector);
    let mut report = ScanReport::new();

    let progress = ProgressBar::new(files.len() as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    progress.set_style(style.progress_chars("#>-"));

    for path in &files {
        progress.set_message(path.file_name().unwrap_or_default().to_string_lossy().to_string());

        match FileManager::load_fragments(path) {
            Ok(fragments) => {
                report.files_scanned += 1;
                for fragment in fragments {
                    let passed = validator.validate(&fragment.markup, &fragment.context);
                    report.record_fragment(passed);
                }
            }
            Err(e) => {
                progress.suspend(|| error!("Error processing file {:?}: {}", path, e));
            }
        }

        progress.inc(1);
    }
    progress.finish_and_clear();

    report.add_findings(collector.drain());

    let log_sink = LogSink;
    for finding in &report.findings {
        log_sink.report(
            &finding.context,
            finding.category,
            finding.severity,
            &finding.message,
            &finding.detail,
        );
    }
    info!("{}", report.summary());

    if let Some(json_path) = &options.json {
        let json = serde_json::to_string_pretty(&report)
            .context("Failed to serialize scan report to JSON")?;
        std::fs::write(json_path, json)
            .context(format!("Failed to write scan report: {:?}", json_path))?;
        info!("Report written to {:?}", json_path);
    }

    let blocking = report.count_at_least(config.scan.fail_on);
    if blocking > 0 {
        return Err(anyhow!(
            "{} findings at or above '{}' severity",
            blocking,
            config.scan.fail_on
        ));
    }

    Ok(())
}
