use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::errors::AppError;
use crate::progress::Delay;
use crate::sections::{default_sections, Section, SectionContext, SectionKind};
use crate::surface::{PresentationSurface, TextKind};

// @module: Page orchestration over a presentation surface

/// State that lives for exactly one page render
pub struct Session<S> {
    // @field: The configured surface
    surface: S,
    // @field: Source of sample data
    rng: StdRng,
    // @field: When the page was configured
    started_at: Instant,
}

impl<S> Session<S> {
    /// Time since the page was configured
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }
}

/// Initializes a surface once and renders an ordered list of sections on it
pub struct SectionOrchestrator<S: PresentationSurface, D: Delay> {
    session: Session<S>,
    delay: D,
    sections: Vec<Box<dyn Section>>,
}

impl<S: PresentationSurface, D: Delay> SectionOrchestrator<S, D> {
    /// Configure the page and render its title block, with the default sections
    pub fn initialize(surface: S, delay: D, config: &Config) -> Result<Self, AppError> {
        let sections = default_sections(&config.data);
        Self::with_sections(surface, delay, config, sections)
    }

    // @method: Same as `initialize` with a custom section list
    pub fn with_sections(
        mut surface: S,
        delay: D,
        config: &Config,
        sections: Vec<Box<dyn Section>>,
    ) -> Result<Self, AppError> {
        let page = &config.page;
        surface.configure_page(page.layout, &page.title)?;
        let started_at = Instant::now();

        surface.render_text(TextKind::Title, &page.heading)?;
        surface.render_text(TextKind::Markdown, &page.intro)?;
        surface.render_divider()?;

        let rng = match config.data.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        debug!(
            "Page '{}' initialized with {} sections",
            page.title,
            sections.len()
        );

        Ok(Self {
            session: Session {
                surface,
                rng,
                started_at,
            },
            delay,
            sections,
        })
    }

    /// Kinds of the sections in the order `run` renders them
    pub fn section_order(&self) -> Vec<SectionKind> {
        self.sections.iter().map(|s| s.kind()).collect()
    }

    /// Render every section in order.
    ///
    /// The first error stops the run and is returned as is; what was
    /// already rendered stays on the surface.
    pub fn run(&mut self) -> Result<(), AppError> {
        let mut ctx = SectionContext {
            surface: &mut self.session.surface,
            delay: &self.delay,
            rng: &mut self.session.rng,
        };

        for section in &self.sections {
            let kind = section.kind();
            debug!("Starting section: {}", kind);
            ctx.surface.begin_section(kind)?;
            section.render(&mut ctx)?;
        }

        info!(
            "Page rendered in {}.",
            Self::format_duration(self.session.elapsed())
        );
        Ok(())
    }

    pub fn surface(&self) -> &S {
        &self.session.surface
    }

    /// Give back the surface, e.g. to inspect what it rendered
    pub fn into_surface(self) -> S {
        self.session.surface
    }

    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;

        if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
