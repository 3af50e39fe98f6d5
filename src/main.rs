// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow};
use log::{LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;
use clap::{Args, Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use wordcards::app_config::{self, Config, LogLevel};
use wordcards::app_controller::Controller;

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
    /// Build a flashcard deck from a vocabulary file (default command)
    Build(BuildArgs),

    /// Generate shell completions for wordcards
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct BuildArgs {
    /// Vocabulary file: word in the first column, example in the second
    #[arg(value_name = "INPUT_FILE")]
    input_path: Option<PathBuf>,

    /// Deck file to write
    #[arg(short, long)]
    output: Option<String>,

    /// Directory for pronunciation clips
    #[arg(short, long)]
    audio_dir: Option<String>,

    /// Column delimiter of the deck file (single character or 'tab')
    #[arg(short, long)]
    delimiter: Option<String>,

    /// Column delimiter of the vocabulary file (single character or 'tab')
    #[arg(long)]
    input_delimiter: Option<String>,

    /// Treat the first vocabulary row as column titles
    #[arg(long)]
    has_header: bool,

    /// Source language code (e.g., 'en')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g., 'ru')
    #[arg(short, long)]
    target_language: Option<String>,

    /// ElevenLabs voice to use
    #[arg(long)]
    voice_id: Option<String>,

    /// Yandex.Dictionary API key
    #[arg(long, env = "YANDEX_API_KEY", hide_env_values = true)]
    dictionary_key: Option<String>,

    /// ElevenLabs API key
    #[arg(long, env = "ELEVENLABS_API_KEY", hide_env_values = true)]
    speech_key: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// wordcards - vocabulary flashcards with translations and pronunciation
///
/// Looks up each word in Yandex.Dictionary, records its pronunciation with
/// ElevenLabs and writes an Anki-ready deck.
#[derive(Parser, Debug)]
#[command(name = "wordcards")]
#[command(version)]
#[command(about = "Build vocabulary flashcards with translations and audio")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "wordcards turns a vocabulary list into an Anki deck with translations and pronunciation clips.

EXAMPLES:
    wordcards words.csv                          # Build output.csv and audio/ from words.csv
    wordcards --has-header words.xlsx            # Read the first sheet of a workbook
    wordcards -o deck.tsv -d tab words.csv       # Tab-separated deck
    wordcards --input-delimiter tab words.tsv    # Read a tab-separated vocabulary export
    wordcards -s en -t de words.csv              # English to German
    wordcards completions bash > wordcards.bash  # Generate bash completions

CONFIGURATION:
    Settings are stored in conf.json by default. If the file doesn't exist, a
    default one is created. API keys are read from YANDEX_API_KEY and
    ELEVENLABS_API_KEY when not given on the command line; a .env file in
    the working directory is loaded first.

    Clips already present in the audio directory are reused, so re-running
    on the same list only pays for new words.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    build: BuildArgs,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger { level: LevelFilter::Trace }))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Info until the config says otherwise
    CustomLogger::init(LevelFilter::Info)?;

    // API keys may come from .env; clap reads them from the environment
    app_config::load_env_file(".env");

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "wordcards", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Build(args)) => run_build(args).await,
        None => run_build(cli.build).await,
    }
}

async fn run_build(options: BuildArgs) -> Result<()> {
    if let Some(level) = &options.log_level {
        let level: LogLevel = level.clone().into();
        log::set_max_level((&level).into());
    }

    let input_path = options.input_path.clone()
        .ok_or_else(|| anyhow!("INPUT_FILE is required"))?;
    if !input_path.is_file() {
        return Err(anyhow!("Input file does not exist: {:?}", input_path));
    }

    let mut config = Config::load_or_create(&options.config_path)?;
    apply_overrides(&mut config, options);
    log::set_max_level((&config.log_level).into());

    let controller = Controller::with_config(config)?;
    controller.run(&input_path).await?;

    Ok(())
}

// Command line values take precedence over the config file
fn apply_overrides(config: &mut Config, options: BuildArgs) {
    if let Some(output) = options.output {
        config.output.output_file = output;
    }
    if let Some(audio_dir) = options.audio_dir {
        config.output.audio_dir = audio_dir;
    }
    if let Some(delimiter) = options.delimiter {
        config.output.delimiter = delimiter;
    }
    if let Some(delimiter) = options.input_delimiter {
        config.input.delimiter = delimiter;
    }
    if options.has_header {
        config.input.has_header = true;
    }
    if let Some(source) = options.source_language {
        config.source_language = source;
    }
    if let Some(target) = options.target_language {
        config.target_language = target;
    }
    if let Some(voice_id) = options.voice_id {
        config.speech.voice_id = voice_id;
    }
    if let Some(key) = options.dictionary_key.filter(|k| !k.is_empty()) {
        config.dictionary.api_key = key;
    }
    if let Some(key) = options.speech_key.filter(|k| !k.is_empty()) {
        config.speech.api_key = key;
    }
    if let Some(level) = options.log_level {
        config.log_level = level.into();
    }
}
