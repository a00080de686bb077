/*!
 * Presentation surfaces.
 *
 * A presentation surface renders text, input widgets, tables, charts and
 * status indicators, and hands back the current value of every input
 * widget synchronously. The orchestrator and its sections only ever talk
 * to the `PresentationSurface` trait; two implementations ship with the
 * crate:
 * - `terminal`: human-readable output with `indicatif` progress bars
 * - `recording`: an append-only event log, used by tests and JSON output
 */

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::errors::SurfaceError;
use crate::sections::SectionKind;

pub mod recording;
pub mod terminal;

pub use recording::{RecordingSurface, SurfaceEvent};
pub use terminal::TerminalSurface;

/// Upper bound of a progress indicator
pub const PROGRESS_MAX: u8 = 100;

/// Page layout mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageLayout {
    /// Content in a narrow centered column
    Centered,
    /// Content uses the full width
    #[default]
    Wide,
}

/// The flavour of a text block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextKind {
    /// Page title, rendered once by initialization
    Title,
    /// Section heading
    Heading,
    /// Sub-heading inside a section
    Subheading,
    /// Unformatted text
    Plain,
    /// Markdown with emphasis
    Markdown,
    /// Small caption text
    Caption,
    /// Source code in the given language
    Code {
        /// Language used for the fence
        language: &'static str,
    },
    /// Mathematical expression (LaTeX)
    Math,
}

/// Tabular data: named columns and ordered rows of records
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataFrame {
    /// Column names in display order
    pub columns: Vec<String>,
    /// Rows, each holding one value per column
    pub rows: Vec<Vec<f64>>,
}

impl DataFrame {
    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the frame has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate rows as (column, value) records
    pub fn records(&self) -> impl Iterator<Item = Vec<(&str, f64)>> + '_ {
        self.rows.iter().map(|row| {
            self.columns
                .iter()
                .map(String::as_str)
                .zip(row.iter().copied())
                .collect()
        })
    }
}

/// Line chart input: series name to ordered points
pub type LineSeries = BTreeMap<String, Vec<f64>>;

/// Handle on a progress indicator returned by `render_progress`
pub trait ProgressHandle {
    /// Move the indicator to `current` with the given label
    fn update(&mut self, current: u8, label: &str) -> Result<(), SurfaceError>;
}

/// Scoped pending indicator.
///
/// The release action runs exactly once when the guard is dropped, whether
/// the scope ends normally, through `?` or by unwinding.
#[must_use = "the spinner is released as soon as the guard is dropped"]
pub struct SpinnerGuard {
    release: Option<Box<dyn FnOnce()>>,
}

impl SpinnerGuard {
    /// Create a guard running `release` on drop
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }
}

impl Drop for SpinnerGuard {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl std::fmt::Debug for SpinnerGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpinnerGuard")
            .field("released", &self.release.is_none())
            .finish()
    }
}

/// Everything the sections need from a rendering backend
pub trait PresentationSurface {
    /// Set layout and browser title. Must be the first call, and only once.
    fn configure_page(&mut self, layout: PageLayout, title: &str) -> Result<(), SurfaceError>;

    /// Announce the start of a section
    fn begin_section(&mut self, section: SectionKind) -> Result<(), SurfaceError>;

    fn render_text(&mut self, kind: TextKind, content: &str) -> Result<(), SurfaceError>;

    fn render_divider(&mut self) -> Result<(), SurfaceError>;

    /// Returns whether the button was pressed during this render pass
    fn render_button(&mut self, label: &str) -> Result<bool, SurfaceError>;

    fn render_text_input(&mut self, label: &str, default: &str) -> Result<String, SurfaceError>;

    fn render_slider(
        &mut self,
        label: &str,
        min: i64,
        max: i64,
        default: i64,
    ) -> Result<i64, SurfaceError>;

    /// Returns the selected option; the first one unless something else is stored
    fn render_choice(&mut self, label: &str, options: &[&str]) -> Result<String, SurfaceError>;

    fn render_table(&mut self, frame: &DataFrame) -> Result<(), SurfaceError>;

    fn render_line_chart(&mut self, series: &LineSeries) -> Result<(), SurfaceError>;

    fn render_info(&mut self, message: &str) -> Result<(), SurfaceError>;

    fn render_success(&mut self, message: &str) -> Result<(), SurfaceError>;

    fn render_progress(
        &mut self,
        current: u8,
        label: &str,
    ) -> Result<Box<dyn ProgressHandle>, SurfaceError>;

    /// Show a pending indicator until the returned guard is dropped
    fn begin_spinner(&mut self, message: &str) -> Result<SpinnerGuard, SurfaceError>;
}

/// Tracks the page-configuration ordering rules shared by all surfaces
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    configured: bool,
    rendered: bool,
}

impl PageState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a page configuration
    pub fn configure(&mut self) -> Result<(), SurfaceError> {
        if self.rendered {
            return Err(SurfaceError::ConfigureAfterRender);
        }
        if self.configured {
            return Err(SurfaceError::AlreadyConfigured);
        }
        self.configured = true;
        Ok(())
    }

    /// Record a rendering call
    pub fn begin_render(&mut self) -> Result<(), SurfaceError> {
        if !self.configured {
            return Err(SurfaceError::NotConfigured);
        }
        self.rendered = true;
        Ok(())
    }

    pub fn is_configured(&self) -> bool {
        self.configured
    }
}

/// Reject progress values above `PROGRESS_MAX`
pub fn check_progress(current: u8) -> Result<u8, SurfaceError> {
    if current > PROGRESS_MAX {
        return Err(SurfaceError::ProgressOutOfRange(current));
    }
    Ok(current)
}

/// Current values of input widgets, keyed by widget label.
///
/// This is the only state a surface keeps between rendering calls. Sections
/// read it through the widget methods and never write to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetValues {
    pressed: HashSet<String>,
    text: HashMap<String, String>,
    sliders: HashMap<String, i64>,
    choices: HashMap<String, String>,
}

impl WidgetValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the button with this label as pressed
    pub fn with_pressed(mut self, label: &str) -> Self {
        self.pressed.insert(label.to_string());
        self
    }

    pub fn with_text(mut self, label: &str, value: &str) -> Self {
        self.text.insert(label.to_string(), value.to_string());
        self
    }

    pub fn with_slider(mut self, label: &str, value: i64) -> Self {
        self.sliders.insert(label.to_string(), value);
        self
    }

    pub fn with_choice(mut self, label: &str, value: &str) -> Self {
        self.choices.insert(label.to_string(), value.to_string());
        self
    }

    /// Resolve a button
    pub fn button(&self, label: &str) -> bool {
        self.pressed.contains(label)
    }

    /// Resolve a text input, falling back to `default`
    pub fn text_input(&self, label: &str, default: &str) -> String {
        self.text
            .get(label)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    /// Resolve a slider, checking the bounds and the stored value
    pub fn slider(&self, label: &str, min: i64, max: i64, default: i64) -> Result<i64, SurfaceError> {
        if min > max {
            return Err(invalid_widget(label, format!("min {} is greater than max {}", min, max)));
        }
        if !(min..=max).contains(&default) {
            return Err(invalid_widget(
                label,
                format!("default {} outside {}..={}", default, min, max),
            ));
        }
        let value = self.sliders.get(label).copied().unwrap_or(default);
        if !(min..=max).contains(&value) {
            return Err(invalid_widget(
                label,
                format!("value {} outside {}..={}", value, min, max),
            ));
        }
        Ok(value)
    }

    /// Resolve a choice, checking the stored value is one of `options`
    pub fn choice(&self, label: &str, options: &[&str]) -> Result<String, SurfaceError> {
        let Some(first) = options.first() else {
            return Err(invalid_widget(label, "no options to choose from".to_string()));
        };
        match self.choices.get(label) {
            None => Ok(first.to_string()),
            Some(value) if options.contains(&value.as_str()) => Ok(value.clone()),
            Some(value) => Err(invalid_widget(
                label,
                format!("'{}' is not one of: {}", value, options.join(", ")),
            )),
        }
    }
}

fn invalid_widget(label: &str, reason: String) -> SurfaceError {
    SurfaceError::InvalidWidget {
        label: label.to_string(),
        reason,
    }
}
