// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{debug, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::Path;

use showcase::app_config::{self, Config, OutputFormat};
use showcase::sections::{AGE_LABEL, BUTTON_LABEL, CHOICE_LABEL, NAME_LABEL};
use showcase::surface::SurfaceEvent;
use showcase::{
    Delay, RecordingSurface, SectionOrchestrator, TerminalSurface, ThreadDelay, WidgetValues,
};

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

/// CLI Wrapper for OutputFormat to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliOutputFormat {
    Terminal,
    Json,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(cli_format: CliOutputFormat) -> Self {
        match cli_format {
            CliOutputFormat::Terminal => OutputFormat::Terminal,
            CliOutputFormat::Json => OutputFormat::Json,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render the page (default command)
    Run(RunArgs),

    /// Generate shell completions for showcase
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone)]
struct RunArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<CliOutputFormat>,

    /// Disable ANSI colours
    #[arg(long)]
    no_color: bool,

    /// Seed for the sample data
    #[arg(long)]
    seed: Option<u64>,

    /// Render the button as pressed
    #[arg(long)]
    click: bool,

    /// Value of the name input
    #[arg(long)]
    name: Option<String>,

    /// Value of the age slider (0-100)
    #[arg(long)]
    age: Option<i64>,

    /// Selected option (e.g. "Opção B")
    #[arg(long)]
    choice: Option<String>,
}

impl RunArgs {
    // @returns: Widget store preset from the command line
    fn widget_values(&self) -> WidgetValues {
        let mut values = WidgetValues::new();
        if self.click {
            values = values.with_pressed(BUTTON_LABEL);
        }
        if let Some(name) = &self.name {
            values = values.with_text(NAME_LABEL, name);
        }
        if let Some(age) = self.age {
            values = values.with_slider(AGE_LABEL, age);
        }
        if let Some(choice) = &self.choice {
            values = values.with_choice(CHOICE_LABEL, choice);
        }
        values
    }
}

/// Showcase - an ordered page of UI sections
///
/// Renders a page made of text, input, data and status sections, including a
/// simulated long-running task with a progress bar and a spinner.
#[derive(Parser, Debug)]
#[command(name = "showcase")]
#[command(version)]
#[command(about = "Render an ordered page of UI sections")]
#[command(long_about = "Showcase renders a page as a fixed sequence of sections.

EXAMPLES:
    showcase                                # Render with the default config
    showcase --name Ana --age 31            # Preset input widget values
    showcase --choice \"Opção B\" --click     # Select an option and press the button
    showcase -f json --seed 7               # Emit every surface call as JSON lines
    showcase completions bash > showcase.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    run: RunArgs,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Marker and ANSI colour for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("ERROR", "1;31"),
            Level::Warn => ("WARN ", "1;33"),
            Level::Info => ("INFO ", "1;32"),
            Level::Debug => ("DEBUG", "1;36"),
            Level::Trace => ("TRACE", "1;35"),
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
            let (marker, color) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                color, now, marker, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // The logger accepts every level; the max level starts at info and
    // is updated after loading the config
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "showcase", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Run(args)) => run_page(args),
        None => run_page(cli.run),
    }
}

fn run_page(options: RunArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let config_path = Path::new(&options.config_path);
    let mut config = Config::load_or_create(config_path)?;

    // Override config with CLI options if provided
    if let Some(format) = &options.format {
        config.output = format.clone().into();
    }
    if options.no_color {
        config.color = false;
    }
    if let Some(seed) = options.seed {
        config.data.seed = Some(seed);
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate().context("Configuration validation failed")?;

    if options.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    let widgets = options.widget_values();
    debug!("Rendering page with {} output", config.output);

    match config.output {
        OutputFormat::Terminal => {
            let surface = TerminalSurface::stdout(widgets, config.color);
            let mut orchestrator = SectionOrchestrator::initialize(surface, ThreadDelay, &config)?;
            orchestrator.run()?;
        }
        OutputFormat::Json => {
            let stdout = std::io::stdout();
            render_json(widgets, ThreadDelay, &config, &mut stdout.lock())?;
        }
    }

    Ok(())
}

// @renders: The page on a recording surface, as JSON lines on `out`
fn render_json<D: Delay, W: Write>(
    widgets: WidgetValues,
    delay: D,
    config: &Config,
    out: &mut W,
) -> Result<()> {
    let surface = RecordingSurface::new(widgets);
    let events_log = surface.log();
    let outcome = SectionOrchestrator::initialize(surface, delay, config)
        .and_then(|mut orchestrator| orchestrator.run());

    // Whatever was rendered before a failure is still emitted
    let events = events_log.lock().clone();
    write_events(&events, out).context("Failed to write events")?;
    outcome?;
    Ok(())
}

// Helper function to print recorded events as JSON lines
fn write_events<W: Write>(events: &[SurfaceEvent], out: &mut W) -> Result<()> {
    for event in events {
        serde_json::to_writer(&mut *out, event)?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}
