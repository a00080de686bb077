/*!
 * Event-recording presentation surface.
 *
 * Every call is appended to a shared log as a `SurfaceEvent`. Progress
 * handles and spinner guards hold their own clone of the log, so updates
 * and releases land in the same sequence as everything else.
 */

use std::sync::Arc;

use log::trace;
use parking_lot::Mutex;
use serde::Serialize;

use crate::errors::SurfaceError;
use crate::sections::SectionKind;

use super::{
    check_progress, DataFrame, LineSeries, PageLayout, PageState, PresentationSurface,
    ProgressHandle, SpinnerGuard, TextKind, WidgetValues,
};

/// One recorded surface call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SurfaceEvent {
    PageConfigured { layout: PageLayout, title: String },
    SectionStarted { section: SectionKind },
    Text { kind: TextKind, content: String },
    Divider,
    Button { label: String, pressed: bool },
    TextInput { label: String, value: String },
    Slider { label: String, value: i64 },
    Choice { label: String, options: Vec<String>, value: String },
    Table { frame: DataFrame },
    LineChart { series: LineSeries },
    Info { message: String },
    Success { message: String },
    ProgressStarted { current: u8, label: String },
    ProgressUpdated { current: u8, label: String },
    SpinnerStarted { message: String },
    SpinnerReleased { message: String },
}

/// Shared, append-only event log
pub type EventLog = Arc<Mutex<Vec<SurfaceEvent>>>;

/// Surface that records calls instead of drawing them
#[derive(Debug, Default)]
pub struct RecordingSurface {
    state: PageState,
    widgets: WidgetValues,
    log: EventLog,
}

impl RecordingSurface {
    /// Create a recording surface answering widget reads from `widgets`
    pub fn new(widgets: WidgetValues) -> Self {
        Self {
            state: PageState::new(),
            widgets,
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Shared handle on the log; stays valid after the surface is moved or dropped
    pub fn log(&self) -> EventLog {
        Arc::clone(&self.log)
    }

    /// Copy of everything recorded so far
    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.log.lock().clone()
    }

    fn record(&self, event: SurfaceEvent) {
        trace!("Recorded surface event: {:?}", event);
        self.log.lock().push(event);
    }

    fn record_render(&mut self, event: SurfaceEvent) -> Result<(), SurfaceError> {
        self.state.begin_render()?;
        self.record(event);
        Ok(())
    }
}

struct RecordingProgress {
    log: EventLog,
}

impl ProgressHandle for RecordingProgress {
    fn update(&mut self, current: u8, label: &str) -> Result<(), SurfaceError> {
        let current = check_progress(current)?;
        self.log.lock().push(SurfaceEvent::ProgressUpdated {
            current,
            label: label.to_string(),
        });
        Ok(())
    }
}

impl PresentationSurface for RecordingSurface {
    fn configure_page(&mut self, layout: PageLayout, title: &str) -> Result<(), SurfaceError> {
        self.state.configure()?;
        self.record(SurfaceEvent::PageConfigured {
            layout,
            title: title.to_string(),
        });
        Ok(())
    }

    fn begin_section(&mut self, section: SectionKind) -> Result<(), SurfaceError> {
        self.record_render(SurfaceEvent::SectionStarted { section })
    }

    fn render_text(&mut self, kind: TextKind, content: &str) -> Result<(), SurfaceError> {
        self.record_render(SurfaceEvent::Text {
            kind,
            content: content.to_string(),
        })
    }

    fn render_divider(&mut self) -> Result<(), SurfaceError> {
        self.record_render(SurfaceEvent::Divider)
    }

    fn render_button(&mut self, label: &str) -> Result<bool, SurfaceError> {
        let pressed = self.widgets.button(label);
        self.record_render(SurfaceEvent::Button {
            label: label.to_string(),
            pressed,
        })?;
        Ok(pressed)
    }

    fn render_text_input(&mut self, label: &str, default: &str) -> Result<String, SurfaceError> {
        let value = self.widgets.text_input(label, default);
        self.record_render(SurfaceEvent::TextInput {
            label: label.to_string(),
            value: value.clone(),
        })?;
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
        self.record_render(SurfaceEvent::Slider {
            label: label.to_string(),
            value,
        })?;
        Ok(value)
    }

    fn render_choice(&mut self, label: &str, options: &[&str]) -> Result<String, SurfaceError> {
        let value = self.widgets.choice(label, options)?;
        self.record_render(SurfaceEvent::Choice {
            label: label.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            value: value.clone(),
        })?;
        Ok(value)
    }

    fn render_table(&mut self, frame: &DataFrame) -> Result<(), SurfaceError> {
        self.record_render(SurfaceEvent::Table {
            frame: frame.clone(),
        })
    }

    fn render_line_chart(&mut self, series: &LineSeries) -> Result<(), SurfaceError> {
        self.record_render(SurfaceEvent::LineChart {
            series: series.clone(),
        })
    }

    fn render_info(&mut self, message: &str) -> Result<(), SurfaceError> {
        self.record_render(SurfaceEvent::Info {
            message: message.to_string(),
        })
    }

    fn render_success(&mut self, message: &str) -> Result<(), SurfaceError> {
        self.record_render(SurfaceEvent::Success {
            message: message.to_string(),
        })
    }

    fn render_progress(
        &mut self,
        current: u8,
        label: &str,
    ) -> Result<Box<dyn ProgressHandle>, SurfaceError> {
        let current = check_progress(current)?;
        self.record_render(SurfaceEvent::ProgressStarted {
            current,
            label: label.to_string(),
        })?;
        Ok(Box::new(RecordingProgress { log: self.log() }))
    }

    fn begin_spinner(&mut self, message: &str) -> Result<SpinnerGuard, SurfaceError> {
        self.record_render(SurfaceEvent::SpinnerStarted {
            message: message.to_string(),
        })?;
        let log = self.log();
        let message = message.to_string();
        Ok(SpinnerGuard::new(move || {
            log.lock().push(SurfaceEvent::SpinnerReleased { message });
        }))
    }
}
