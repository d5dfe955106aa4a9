// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use slideline::app_config::{Config, LogLevel};
use slideline::file_utils::FileManager;
use slideline::subtitle_export;
use slideline::timeline::{generate_timeline, TimelineRequest};
use slideline::validation::TimelineValidator;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build caption and audio timelines from a request file
    Build(BuildArgs),

    /// Generate shell completions for slideline
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct BuildArgs {
    /// Request JSON with image_list, cap_list, audio_list and duration_list
    #[arg(value_name = "REQUEST_PATH")]
    request_path: PathBuf,

    /// Write the result JSON here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also export the caption timeline as SRT
    #[arg(long, value_name = "SRT_PATH")]
    srt: Option<PathBuf>,

    /// Leave English lines out of the SRT export
    #[arg(long, requires = "srt")]
    no_english: bool,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// slideline - sentence-level caption timelines for slideshow videos
#[derive(Parser, Debug)]
#[command(name = "slideline")]
#[command(version)]
#[command(about = "Caption and audio timeline builder for slideshow videos")]
#[command(long_about = "slideline splits captions into sentences and lays them out on caption and audio timelines.

EXAMPLES:
    slideline build request.json                      # Print the result JSON
    slideline build request.json -o result.json       # Write the result to a file
    slideline build request.json --srt captions.srt   # Also export an SRT file
    slideline completions bash > slideline.bash       # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. If the config file doesn't
    exist, a default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
}

// @struct: Custom logger implementation, filtered by the global max level
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Tag and ANSI color for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌", "1;31"),
            Level::Warn => ("🚧", "1;33"),
            Level::Info => ("", "1;32"),
            Level::Debug => ("🔍", "1;36"),
            Level::Trace => ("📋", "1;35"),
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
            let (tag, color) = Self::style_for_level(record.level());
            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {} {}\x1B[0m",
                color, now, tag, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Start at info; the config may change the level once loaded
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "slideline", &mut std::io::stdout());
            Ok(())
        }
        Commands::Build(args) => run_build(args).await,
    }
}

async fn run_build(options: BuildArgs) -> Result<()> {
    if let Some(level) = &options.log_level {
        log::set_max_level(LogLevel::from(level.clone()).to_level_filter());
    }

    let mut config = Config::load_or_create(&options.config_path)?;
    if let Some(level) = &options.log_level {
        config.log_level = level.clone().into();
    }
    config.validate().context("Configuration validation failed")?;
    log::set_max_level(config.log_level.to_level_filter());

    if !FileManager::file_exists(&options.request_path) {
        return Err(anyhow!("Request file does not exist: {:?}", options.request_path));
    }

    let content = FileManager::read_to_string(&options.request_path)?;
    let request = TimelineRequest::from_json_str(&content)
        .with_context(|| format!("Failed to load request: {:?}", options.request_path))?;

    let outcome = generate_timeline(&request).await?;
    for skipped in &outcome.skipped {
        warn!("Skipped {}", skipped);
    }

    let validator = TimelineValidator::with_tolerance(config.validation.tolerance_secs);
    for issue in validator.validate(&outcome.result.text_timelines).issues {
        warn!("Caption timeline: {}", issue);
    }
    for issue in validator.validate(&outcome.result.audio_timelines).issues {
        warn!("Audio timeline: {}", issue);
    }

    info!(
        "Built {} caption entries ({:.3}s) and {} audio entries ({:.3}s)",
        outcome.result.text_timelines.len(),
        outcome.result.caption_span(),
        outcome.result.audio_timelines.len(),
        outcome.result.audio_span()
    );

    let result_json = if config.output.pretty_json {
        serde_json::to_string_pretty(&outcome.result)
    } else {
        serde_json::to_string(&outcome.result)
    }
    .context("Failed to serialize timeline result")?;

    match &options.output {
        Some(path) if FileManager::file_exists(path) && !options.force_overwrite => {
            warn!("Output file already exists: {:?}. Use -f to force overwrite.", path);
        }
        Some(path) => {
            FileManager::write_to_file(path, &result_json)?;
            info!("Success: {:?}", path);
        }
        None => println!("{}", result_json),
    }

    if let Some(srt_path) = &options.srt {
        if FileManager::file_exists(srt_path) && !options.force_overwrite {
            warn!("SRT file already exists: {:?}. Use -f to force overwrite.", srt_path);
        } else {
            let bilingual = config.srt.bilingual && !options.no_english;
            subtitle_export::write_srt(srt_path, &outcome.result.text_timelines, bilingual)
                .with_context(|| format!("Failed to export SRT: {:?}", srt_path))?;
            info!("Success: {:?}", srt_path);
        }
    }

    Ok(())
}
