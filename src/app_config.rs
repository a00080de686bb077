/*!
 * Application configuration.
 *
 * Loaded from a JSON file that is written with defaults when missing.
 * Command-line flags override individual values after loading.
 */

use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub use crate::surface::PageLayout;

/// Everything a page run can be configured with
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Page setup
    #[serde(default)]
    pub page: PageConfig,

    /// Sample data sizes
    #[serde(default)]
    pub data: DataConfig,

    /// How the page is presented
    #[serde(default)]
    pub output: OutputFormat,

    /// Use ANSI colours in terminal output
    #[serde(default = "default_color")]
    pub color: bool,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Page-level settings applied once at initialization
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PageConfig {
    /// Title shown by the hosting window or tab
    #[serde(default = "default_page_title")]
    pub title: String,

    /// Heading rendered at the top of the page
    #[serde(default = "default_heading")]
    pub heading: String,

    /// Introduction rendered below the heading
    #[serde(default = "default_intro")]
    pub intro: String,

    /// Layout mode
    #[serde(default)]
    pub layout: PageLayout,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: default_page_title(),
            heading: default_heading(),
            intro: default_intro(),
            layout: PageLayout::default(),
        }
    }
}

/// Sizes and seed of the random sample data
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DataConfig {
    /// Rows in the sample table
    #[serde(default = "default_table_rows")]
    pub table_rows: usize,

    /// Points per series in the sample chart
    #[serde(default = "default_chart_points")]
    pub chart_points: usize,

    /// Fixed RNG seed; a fresh one per run when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            table_rows: default_table_rows(),
            chart_points: default_chart_points(),
            seed: None,
        }
    }
}

/// Output presentation
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable terminal page
    #[default]
    Terminal,
    /// One JSON object per surface call
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Terminal => write!(f, "terminal"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Log level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching filter for the log facade
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_color() -> bool {
    true
}

fn default_page_title() -> String {
    "Streamlit App com OOP".to_string()
}

fn default_heading() -> String {
    "Meu Projeto Streamlit com OOP".to_string()
}

fn default_intro() -> String {
    "Este aplicativo demonstra como estruturar um projeto Streamlit usando Programação Orientada a Objetos."
        .to_string()
}

fn default_table_rows() -> usize {
    10
}

fn default_chart_points() -> usize {
    20
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.page.title.trim().is_empty() {
            return Err(anyhow!("Page title must not be empty"));
        }
        if self.page.heading.trim().is_empty() {
            return Err(anyhow!("Page heading must not be empty"));
        }
        if self.data.table_rows == 0 {
            return Err(anyhow!("data.table_rows must be at least 1"));
        }
        if self.data.chart_points == 0 {
            return Err(anyhow!("data.chart_points must be at least 1"));
        }
        Ok(())
    }

    /// Load the configuration file, writing a default one if it does not exist
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            let file = File::open(path)
                .context(format!("Failed to open config file: {}", path.display()))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .context(format!("Failed to parse config file: {}", path.display()))?;
            return Ok(config);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(path, config_json)
            .context(format!("Failed to write default config to file: {}", path.display()))?;

        Ok(config)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            page: PageConfig::default(),
            data: DataConfig::default(),
            output: OutputFormat::default(),
            color: default_color(),
            log_level: LogLevel::default(),
        }
    }
}
