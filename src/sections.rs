/*!
 * Page sections.
 *
 * A section is a small stateless value that renders one self-contained
 * block through the presentation surface. Sections take nothing from each
 * other: any widget value they need is read back from the surface inside
 * the same section. The orchestrator decides the order by the position of
 * each section in its list.
 */

use std::fmt;

use log::debug;
use rand::rngs::StdRng;
use serde::Serialize;

use crate::app_config::DataConfig;
use crate::data::{self, CHART_SERIES, TABLE_COLUMNS};
use crate::errors::AppError;
use crate::progress::{self, Delay, SPINNER_DELAY};
use crate::surface::{PresentationSurface, TextKind};

pub const TEXT_HEADING: &str = "1. Elementos de Texto (via método da classe)";
pub const INPUT_HEADING: &str = "2. Widgets de Entrada (via método da classe)";
pub const DATA_HEADING: &str = "3. Exibição de Dados e Gráficos (via método da classe)";
pub const STATUS_HEADING: &str = "4. Elementos de Status (via método da classe)";

pub const BUTTON_LABEL: &str = "Clique-me (OOP)!";
pub const BUTTON_CLICKED: &str = "Botão clicado dentro da classe!";
pub const NAME_LABEL: &str = "Qual é o seu nome?";
pub const NAME_DEFAULT: &str = "Visitante";
pub const AGE_LABEL: &str = "Qual é a sua idade?";
pub const AGE_MIN: i64 = 0;
pub const AGE_MAX: i64 = 100;
pub const AGE_DEFAULT: i64 = 25;
pub const CHOICE_LABEL: &str = "Escolha uma opção:";
pub const CHOICE_OPTIONS: [&str; 3] = ["Opção A", "Opção B", "Opção C"];

pub const INFO_MESSAGE: &str = "Esta é uma mensagem de informação da classe.";
pub const PROGRESS_LABEL: &str = "Carregando dados...";
pub const PROGRESS_DONE: &str = "Carregamento completo!";
pub const SPINNER_MESSAGE: &str = "Processando...";
pub const SPINNER_DONE: &str = "Processamento concluído!";

/// Identifies a section in logs and recorded events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Text,
    Input,
    Data,
    Status,
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Input => "input",
            Self::Data => "data",
            Self::Status => "status",
        };
        write!(f, "{}", name)
    }
}

/// What a section gets to work with while rendering
pub struct SectionContext<'a> {
    pub surface: &'a mut dyn PresentationSurface,
    pub delay: &'a dyn Delay,
    pub rng: &'a mut StdRng,
}

/// Common capability of every page section
pub trait Section {
    fn kind(&self) -> SectionKind;

    /// Emit this section's rendering calls
    fn render(&self, ctx: &mut SectionContext<'_>) -> Result<(), AppError>;
}

/// Headings, plain and emphasized text, caption, code and math
#[derive(Debug, Clone, Copy, Default)]
pub struct TextSection;

impl Section for TextSection {
    fn kind(&self) -> SectionKind {
        SectionKind::Text
    }

    fn render(&self, ctx: &mut SectionContext<'_>) -> Result<(), AppError> {
        let surface = &mut *ctx.surface;
        surface.render_text(TextKind::Heading, TEXT_HEADING)?;
        surface.render_text(TextKind::Plain, "Este é um texto simples usando `st.text` dentro de um método de classe.")?;
        surface.render_text(TextKind::Markdown, "**Texto em negrito** usando `st.markdown`.")?;
        surface.render_text(TextKind::Subheading, "Subtítulo")?;
        surface.render_text(TextKind::Caption, "Legenda de exemplo.")?;
        surface.render_text(TextKind::Code { language: "python" }, "print('Olá, OOP!')")?;
        surface.render_text(TextKind::Math, r"E=mc^2")?;
        surface.render_divider()?;
        Ok(())
    }
}

/// Button, text input, slider and choice, each echoed back as text
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSection;

impl Section for InputSection {
    fn kind(&self) -> SectionKind {
        SectionKind::Input
    }

    fn render(&self, ctx: &mut SectionContext<'_>) -> Result<(), AppError> {
        let surface = &mut *ctx.surface;
        surface.render_text(TextKind::Heading, INPUT_HEADING)?;

        if surface.render_button(BUTTON_LABEL)? {
            surface.render_text(TextKind::Markdown, BUTTON_CLICKED)?;
        }

        let name = surface.render_text_input(NAME_LABEL, NAME_DEFAULT)?;
        surface.render_text(TextKind::Markdown, &format!("Olá, {}!", name))?;

        let age = surface.render_slider(AGE_LABEL, AGE_MIN, AGE_MAX, AGE_DEFAULT)?;
        surface.render_text(TextKind::Markdown, &format!("Você tem {} anos.", age))?;

        let selected = surface.render_choice(CHOICE_LABEL, &CHOICE_OPTIONS)?;
        surface.render_text(TextKind::Markdown, &format!("Você escolheu: {}", selected))?;

        debug!("Input values: name={}, age={}, choice={}", name, age, selected);
        surface.render_divider()?;
        Ok(())
    }
}

/// Random sample table and line chart
#[derive(Debug, Clone, Copy)]
pub struct DataSection {
    pub table_rows: usize,
    pub chart_points: usize,
}

impl Default for DataSection {
    fn default() -> Self {
        let config = DataConfig::default();
        Self {
            table_rows: config.table_rows,
            chart_points: config.chart_points,
        }
    }
}

impl Section for DataSection {
    fn kind(&self) -> SectionKind {
        SectionKind::Data
    }

    fn render(&self, ctx: &mut SectionContext<'_>) -> Result<(), AppError> {
        ctx.surface.render_text(TextKind::Heading, DATA_HEADING)?;

        let frame = data::uniform_frame(&mut *ctx.rng, self.table_rows, &TABLE_COLUMNS);
        ctx.surface.render_table(&frame)?;

        let series = data::normal_series(&mut *ctx.rng, self.chart_points, &CHART_SERIES);
        ctx.surface.render_line_chart(&series)?;

        ctx.surface.render_divider()?;
        Ok(())
    }
}

/// Info message, simulated progress cycle and pending phase
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusSection;

impl Section for StatusSection {
    fn kind(&self) -> SectionKind {
        SectionKind::Status
    }

    fn render(&self, ctx: &mut SectionContext<'_>) -> Result<(), AppError> {
        ctx.surface.render_text(TextKind::Heading, STATUS_HEADING)?;
        ctx.surface.render_info(INFO_MESSAGE)?;

        progress::run_progress_cycle(&mut *ctx.surface, ctx.delay, PROGRESS_LABEL, PROGRESS_DONE)?;

        progress::run_pending(
            &mut *ctx.surface,
            ctx.delay,
            SPINNER_MESSAGE,
            SPINNER_DONE,
            |delay| delay.sleep(SPINNER_DELAY),
        )?;

        ctx.surface.render_divider()?;
        Ok(())
    }
}

/// The page's sections in rendering order
pub fn default_sections(data: &DataConfig) -> Vec<Box<dyn Section>> {
    vec![
        Box::new(TextSection),
        Box::new(InputSection),
        Box::new(DataSection {
            table_rows: data.table_rows,
            chart_points: data.chart_points,
        }),
        Box::new(StatusSection),
    ]
}
