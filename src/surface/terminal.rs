/*!
 * Terminal presentation surface.
 *
 * Text, widgets, tables and charts are written as plain lines to any
 * `Write` sink. Progress bars and spinners are drawn by `indicatif` on
 * stderr, or on a hidden target when the surface writes to a buffer.
 */

use std::io::{self, Stdout, Write};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use log::debug;

use crate::errors::SurfaceError;
use crate::sections::SectionKind;

use super::{
    check_progress, DataFrame, LineSeries, PageLayout, PageState, PresentationSurface,
    ProgressHandle, SpinnerGuard, TextKind, WidgetValues, PROGRESS_MAX,
};

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

const BOLD: &str = "1";
const DIM: &str = "2";
const BLUE: &str = "1;34";
const GREEN: &str = "1;32";

/// Surface rendering to a terminal-like sink
pub struct TerminalSurface<W: Write> {
    out: W,
    state: PageState,
    widgets: WidgetValues,
    color: bool,
    draw_progress: bool,
    width: usize,
}

impl TerminalSurface<Stdout> {
    /// Render to stdout, with progress indicators on stderr
    pub fn stdout(widgets: WidgetValues, color: bool) -> Self {
        let mut surface = Self::with_writer(io::stdout(), widgets, color);
        surface.draw_progress = true;
        surface
    }
}

impl<W: Write> TerminalSurface<W> {
    /// Render to `out`; progress indicators are not drawn
    pub fn with_writer(out: W, widgets: WidgetValues, color: bool) -> Self {
        Self {
            out,
            state: PageState::new(),
            widgets,
            color,
            draw_progress: false,
            width: layout_width(PageLayout::default()),
        }
    }

    /// Give back the underlying sink
    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw_target(&self) -> ProgressDrawTarget {
        if self.draw_progress {
            ProgressDrawTarget::stderr()
        } else {
            ProgressDrawTarget::hidden()
        }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("\x1B[{}m{}\x1B[0m", code, text)
        } else {
            text.to_string()
        }
    }

    fn line(&mut self, text: &str) -> Result<(), SurfaceError> {
        self.state.begin_render()?;
        writeln!(self.out, "{}", text)?;
        self.out.flush()?;
        Ok(())
    }

    fn rule(&self, ch: char, len: usize) -> String {
        std::iter::repeat_n(ch, len).collect()
    }
}

fn layout_width(layout: PageLayout) -> usize {
    match layout {
        PageLayout::Centered => 60,
        PageLayout::Wide => 100,
    }
}

/// Format a table as right-aligned columns with a leading row index
pub fn format_table(frame: &DataFrame) -> Vec<String> {
    let index_width = frame.len().saturating_sub(1).to_string().len();
    let cells: Vec<Vec<String>> = frame
        .rows
        .iter()
        .map(|row| row.iter().map(|v| format!("{:.4}", v)).collect())
        .collect();
    let widths: Vec<usize> = frame
        .columns
        .iter()
        .enumerate()
        .map(|(i, name)| {
            cells
                .iter()
                .filter_map(|row| row.get(i).map(String::len))
                .chain(std::iter::once(name.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = Vec::with_capacity(frame.len() + 1);
    let header: Vec<String> = frame
        .columns
        .iter()
        .zip(&widths)
        .map(|(name, w)| format!("{:>w$}", name, w = *w))
        .collect();
    lines.push(format!("{:>iw$}  {}", "", header.join("  "), iw = index_width));
    for (index, row) in cells.iter().enumerate() {
        let values: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(value, w)| format!("{:>w$}", value, w = *w))
            .collect();
        lines.push(format!("{:>iw$}  {}", index, values.join("  "), iw = index_width));
    }
    lines
}

/// Render points as a one-line unicode sparkline
pub fn sparkline(points: &[f64]) -> String {
    let min = points.iter().copied().fold(f64::INFINITY, f64::min);
    let max = points.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let top = (SPARK_LEVELS.len() - 1) as f64;
    points
        .iter()
        .map(|&v| {
            let level = if max > min {
                ((v - min) / (max - min) * top).round() as usize
            } else {
                SPARK_LEVELS.len() / 2
            };
            SPARK_LEVELS[level.min(SPARK_LEVELS.len() - 1)]
        })
        .collect()
}

struct TerminalProgress {
    bar: ProgressBar,
}

impl ProgressHandle for TerminalProgress {
    fn update(&mut self, current: u8, label: &str) -> Result<(), SurfaceError> {
        let current = check_progress(current)?;
        self.bar.set_message(label.to_string());
        self.bar.set_position(u64::from(current));
        Ok(())
    }
}

impl Drop for TerminalProgress {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish();
        }
    }
}

impl<W: Write> PresentationSurface for TerminalSurface<W> {
    fn configure_page(&mut self, layout: PageLayout, title: &str) -> Result<(), SurfaceError> {
        self.state.configure()?;
        self.width = layout_width(layout);
        debug!("Page configured: '{}' ({:?} layout)", title, layout);
        Ok(())
    }

    fn begin_section(&mut self, section: SectionKind) -> Result<(), SurfaceError> {
        self.state.begin_render()?;
        debug!("Rendering section {}", section);
        Ok(())
    }

    fn render_text(&mut self, kind: TextKind, content: &str) -> Result<(), SurfaceError> {
        let text = match kind {
            TextKind::Title => {
                let underline = self.rule('=', content.chars().count());
                format!("{}\n{}", self.paint(BOLD, content), underline)
            }
            TextKind::Heading => {
                let underline = self.rule('-', content.chars().count());
                format!("\n{}\n{}", self.paint(BOLD, content), underline)
            }
            TextKind::Subheading => self.paint(BOLD, content),
            TextKind::Plain | TextKind::Markdown => content.to_string(),
            TextKind::Caption => self.paint(DIM, content),
            TextKind::Code { language } => format!("```{}\n{}\n```", language, content),
            TextKind::Math => format!("$$ {} $$", content),
        };
        self.line(&text)
    }

    fn render_divider(&mut self) -> Result<(), SurfaceError> {
        let rule = self.paint(DIM, &self.rule('─', self.width));
        self.line(&rule)
    }

    fn render_button(&mut self, label: &str) -> Result<bool, SurfaceError> {
        let pressed = self.widgets.button(label);
        let marker = if pressed { " (pressed)" } else { "" };
        self.line(&format!("[ {} ]{}", label, marker))?;
        Ok(pressed)
    }

    fn render_text_input(&mut self, label: &str, default: &str) -> Result<String, SurfaceError> {
        let value = self.widgets.text_input(label, default);
        self.line(&format!("{} {}", label, self.paint(BOLD, &value)))?;
        Ok(value)
    }

    fn render_slider(
        &mut self,
        label: &str,
        min: i64,
        max: i64,
        default: i64,
    ) -> Result<i64, SurfaceError> {
        let value = self.widgets.slider(label, min, max, default)?;
        self.line(&format!("{} [{}..{}] {}", label, min, max, self.paint(BOLD, &value.to_string())))?;
        Ok(value)
    }

    fn render_choice(&mut self, label: &str, options: &[&str]) -> Result<String, SurfaceError> {
        let value = self.widgets.choice(label, options)?;
        self.line(&format!("{} ({}) {}", label, options.join(" | "), self.paint(BOLD, &value)))?;
        Ok(value)
    }

    fn render_table(&mut self, frame: &DataFrame) -> Result<(), SurfaceError> {
        let text = format_table(frame).join("\n");
        self.line(&text)
    }

    fn render_line_chart(&mut self, series: &LineSeries) -> Result<(), SurfaceError> {
        let name_width = series.keys().map(|k| k.chars().count()).max().unwrap_or(0);
        let lines: Vec<String> = series
            .iter()
            .map(|(name, points)| {
                let min = points.iter().copied().fold(f64::INFINITY, f64::min);
                let max = points.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                format!(
                    "{:>w$} {}  min {:.2} max {:.2}",
                    name,
                    sparkline(points),
                    min,
                    max,
                    w = name_width
                )
            })
            .collect();
        self.line(&lines.join("\n"))
    }

    fn render_info(&mut self, message: &str) -> Result<(), SurfaceError> {
        let text = self.paint(BLUE, &format!("i {}", message));
        self.line(&text)
    }

    fn render_success(&mut self, message: &str) -> Result<(), SurfaceError> {
        let text = self.paint(GREEN, &format!("✔ {}", message));
        self.line(&text)
    }

    fn render_progress(
        &mut self,
        current: u8,
        label: &str,
    ) -> Result<Box<dyn ProgressHandle>, SurfaceError> {
        let current = check_progress(current)?;
        self.state.begin_render()?;

        let bar = ProgressBar::with_draw_target(Some(u64::from(PROGRESS_MAX)), self.draw_target());
        let style = ProgressStyle::default_bar()
            .template("{msg} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%)")
            .or_else(|_| ProgressStyle::default_bar().template("{msg} [{bar:40}] {pos}/{len}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style.progress_chars("█▓▒░"));
        bar.set_message(label.to_string());
        bar.set_position(u64::from(current));

        Ok(Box::new(TerminalProgress { bar }))
    }

    fn begin_spinner(&mut self, message: &str) -> Result<SpinnerGuard, SurfaceError> {
        self.state.begin_render()?;

        let spinner = ProgressBar::new_spinner();
        spinner.set_draw_target(self.draw_target());
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        spinner.set_style(style);
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(80));

        Ok(SpinnerGuard::new(move || spinner.finish_and_clear()))
    }
}
