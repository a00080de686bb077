/*!
 * End-to-end tests of a full page run on the recording surface
 */

use showcase::errors::{AppError, SurfaceError};
use showcase::sections::{
    default_sections, Section, SectionContext, SectionKind, StatusSection, TextSection,
    CHOICE_LABEL, NAME_LABEL, PROGRESS_DONE, SPINNER_DONE,
};
use showcase::surface::{PageLayout, PresentationSurface, RecordingSurface, SurfaceEvent, TextKind};
use showcase::{SectionOrchestrator, WidgetValues};

use crate::common::{self, InstantDelay};

/// Section that renders one line and then fails
struct BrokenSection;

impl Section for BrokenSection {
    fn kind(&self) -> SectionKind {
        SectionKind::Data
    }

    fn render(&self, ctx: &mut SectionContext<'_>) -> Result<(), AppError> {
        ctx.surface.render_text(TextKind::Plain, "partial output")?;
        Err(SurfaceError::InvalidWidget {
            label: "broken".to_string(),
            reason: "always fails".to_string(),
        }
        .into())
    }
}

fn section_starts(events: &[SurfaceEvent]) -> Vec<SectionKind> {
    events
        .iter()
        .filter_map(|e| match e {
            SurfaceEvent::SectionStarted { section } => Some(*section),
            _ => None,
        })
        .collect()
}

#[test]
fn test_run_shouldStartSectionsInFixedOrderOnce() {
    let (outcome, events) = common::recorded_run(WidgetValues::new());

    outcome.unwrap();
    assert_eq!(
        section_starts(&events),
        vec![SectionKind::Text, SectionKind::Input, SectionKind::Data, SectionKind::Status]
    );
}

#[test]
fn test_run_shouldConfigurePageBeforeAnyRender() {
    let (outcome, events) = common::recorded_run(WidgetValues::new());

    outcome.unwrap();
    assert!(matches!(events[0], SurfaceEvent::PageConfigured { .. }));
    assert_eq!(
        common::count(&events, |e| matches!(e, SurfaceEvent::PageConfigured { .. })),
        1
    );
    assert_eq!(
        events[1],
        SurfaceEvent::Text {
            kind: TextKind::Title,
            content: common::test_config().page.heading
        }
    );
}

#[test]
fn test_run_withDefaultWidgets_shouldProduceCompletePage() {
    let (outcome, events) = common::recorded_run(WidgetValues::new());
    outcome.unwrap();

    let count = |predicate: fn(&SurfaceEvent) -> bool| common::count(&events, predicate);
    assert_eq!(count(|e| matches!(e, SurfaceEvent::PageConfigured { .. })), 1);
    assert!(count(|e| matches!(e, SurfaceEvent::Text { .. })) >= 5);
    assert_eq!(count(|e| matches!(e, SurfaceEvent::Button { .. })), 1);
    assert_eq!(count(|e| matches!(e, SurfaceEvent::TextInput { .. })), 1);
    assert_eq!(count(|e| matches!(e, SurfaceEvent::Slider { .. })), 1);
    assert_eq!(count(|e| matches!(e, SurfaceEvent::Choice { .. })), 1);
    assert_eq!(count(|e| matches!(e, SurfaceEvent::Table { .. })), 1);
    assert_eq!(count(|e| matches!(e, SurfaceEvent::LineChart { .. })), 1);
    assert_eq!(count(|e| matches!(e, SurfaceEvent::Info { .. })), 1);
    assert_eq!(count(|e| matches!(e, SurfaceEvent::SpinnerStarted { .. })), 1);
    assert_eq!(count(|e| matches!(e, SurfaceEvent::SpinnerReleased { .. })), 1);
    assert_eq!(count(|e| matches!(e, SurfaceEvent::Success { .. })), 2);
    assert_eq!(common::progress_updates(&events), (1..=100).collect::<Vec<u8>>());

    // 100 updates, then success, then the spinner pair, then one more success
    let last_update = events
        .iter()
        .rposition(|e| matches!(e, SurfaceEvent::ProgressUpdated { .. }))
        .unwrap();
    assert_eq!(
        &events[last_update + 1..last_update + 5],
        &[
            SurfaceEvent::Success { message: PROGRESS_DONE.to_string() },
            SurfaceEvent::SpinnerStarted { message: "Processando...".to_string() },
            SurfaceEvent::SpinnerReleased { message: "Processando...".to_string() },
            SurfaceEvent::Success { message: SPINNER_DONE.to_string() },
        ]
    );
}

#[test]
fn test_run_progressValues_shouldStayInRangeAndNeverRepeat() {
    let (outcome, events) = common::recorded_run(WidgetValues::new());
    outcome.unwrap();

    let mut reported: Vec<u8> = events
        .iter()
        .filter_map(|e| match e {
            SurfaceEvent::ProgressStarted { current, .. }
            | SurfaceEvent::ProgressUpdated { current, .. } => Some(*current),
            _ => None,
        })
        .collect();
    assert!(reported.iter().all(|p| *p <= 100));
    let total = reported.len();
    reported.dedup();
    assert_eq!(reported.len(), total);
    assert!(reported.windows(2).all(|w| w[1] == w[0] + 1));
}

#[test]
fn test_run_withNameInput_shouldEchoNameInNextText() {
    let (outcome, events) = common::recorded_run(WidgetValues::new().with_text(NAME_LABEL, "Ana"));
    outcome.unwrap();

    let input = common::position(&events, |e| matches!(e, SurfaceEvent::TextInput { .. })).unwrap();
    assert_eq!(
        events[input],
        SurfaceEvent::TextInput { label: NAME_LABEL.to_string(), value: "Ana".to_string() }
    );
    assert!(matches!(&events[input + 1], SurfaceEvent::Text { content, .. } if content.contains("Ana")));
}

#[test]
fn test_run_withChoice_shouldEchoSelectedOptionInNextText() {
    let (outcome, events) =
        common::recorded_run(WidgetValues::new().with_choice(CHOICE_LABEL, "Opção B"));
    outcome.unwrap();

    let choice = common::position(&events, |e| matches!(e, SurfaceEvent::Choice { .. })).unwrap();
    assert!(matches!(
        &events[choice + 1],
        SurfaceEvent::Text { content, .. } if content == "Você escolheu: Opção B"
    ));
}

#[test]
fn test_run_withInvalidChoice_shouldStopBeforeLaterSections() {
    let (outcome, events) =
        common::recorded_run(WidgetValues::new().with_choice(CHOICE_LABEL, "Opção X"));

    assert!(matches!(
        outcome,
        Err(AppError::Surface(SurfaceError::InvalidWidget { .. }))
    ));
    assert_eq!(section_starts(&events), vec![SectionKind::Text, SectionKind::Input]);
    assert_eq!(common::count(&events, |e| matches!(e, SurfaceEvent::Table { .. })), 0);
}

#[test]
fn test_run_withFailingSection_shouldPropagateErrorAndKeepEarlierOutput() {
    common::init_logging();
    let surface = RecordingSurface::new(WidgetValues::new());
    let log = surface.log();
    let delay = InstantDelay::new();
    let sections: Vec<Box<dyn Section>> =
        vec![Box::new(TextSection), Box::new(BrokenSection), Box::new(StatusSection)];

    let mut orchestrator =
        SectionOrchestrator::with_sections(surface, &delay, &common::test_config(), sections).unwrap();
    let outcome = orchestrator.run();

    assert!(matches!(outcome, Err(AppError::Surface(SurfaceError::InvalidWidget { .. }))));
    let events = log.lock().clone();
    assert_eq!(section_starts(&events), vec![SectionKind::Text, SectionKind::Data]);
    assert_eq!(
        events.last(),
        Some(&SurfaceEvent::Text { kind: TextKind::Plain, content: "partial output".to_string() })
    );
    assert!(delay.requested().is_empty());
}

#[test]
fn test_initialize_onAlreadyConfiguredSurface_shouldFail() {
    let surface = common::configured_surface(WidgetValues::new());

    let result = SectionOrchestrator::initialize(surface, InstantDelay::new(), &common::test_config());

    assert!(matches!(
        result,
        Err(AppError::Surface(SurfaceError::AlreadyConfigured))
    ));
}

#[test]
fn test_initialize_onSurfaceWithPriorRender_shouldFail() {
    let mut surface = common::configured_surface(WidgetValues::new());
    surface.render_divider().unwrap();

    let result = SectionOrchestrator::initialize(surface, InstantDelay::new(), &common::test_config());

    match result {
        Err(AppError::Surface(error)) => assert!(error.is_initialization_error()),
        _ => panic!("initialization should fail on a used surface"),
    }
}

#[test]
fn test_run_withSameSeed_shouldRenderSameData() {
    let (_, first) = common::recorded_run(WidgetValues::new());
    let (_, second) = common::recorded_run(WidgetValues::new());

    let tables = |events: &[SurfaceEvent]| -> Vec<SurfaceEvent> {
        events
            .iter()
            .filter(|e| matches!(e, SurfaceEvent::Table { .. } | SurfaceEvent::LineChart { .. }))
            .cloned()
            .collect()
    };
    assert_eq!(tables(&first), tables(&second));
}

#[test]
fn test_orchestrator_shouldExposeSectionOrderAndSurface() {
    let surface = RecordingSurface::new(WidgetValues::new());
    let orchestrator =
        SectionOrchestrator::initialize(surface, InstantDelay::new(), &common::test_config()).unwrap();

    assert_eq!(
        orchestrator.section_order(),
        default_sections(&common::test_config().data)
            .iter()
            .map(|s| s.kind())
            .collect::<Vec<_>>()
    );
    // Title block: configuration, title, intro, divider
    assert_eq!(orchestrator.surface().events().len(), 4);
    assert_eq!(orchestrator.into_surface().events().len(), 4);
}

#[test]
fn test_run_withDefaultConfig_shouldRenderPageCopyVerbatim() {
    common::init_logging();
    let surface = RecordingSurface::new(WidgetValues::new());
    let log = surface.log();
    let mut orchestrator =
        SectionOrchestrator::initialize(surface, InstantDelay::new(), &showcase::Config::default())
            .unwrap();
    orchestrator.run().unwrap();
    let events = log.lock().clone();

    assert_eq!(
        events[0],
        SurfaceEvent::PageConfigured {
            layout: PageLayout::Wide,
            title: "Streamlit App com OOP".to_string()
        }
    );
    assert_eq!(
        events[1],
        SurfaceEvent::Text {
            kind: TextKind::Title,
            content: "Meu Projeto Streamlit com OOP".to_string()
        }
    );

    let headings: Vec<String> = events
        .iter()
        .filter_map(|e| match e {
            SurfaceEvent::Text { kind: TextKind::Heading, content } => Some(content.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(
        headings,
        vec![
            "1. Elementos de Texto (via método da classe)",
            "2. Widgets de Entrada (via método da classe)",
            "3. Exibição de Dados e Gráficos (via método da classe)",
            "4. Elementos de Status (via método da classe)",
        ]
    );

    assert!(events.contains(&SurfaceEvent::Button {
        label: "Clique-me (OOP)!".to_string(),
        pressed: false
    }));
    assert!(events.contains(&SurfaceEvent::Info {
        message: "Esta é uma mensagem de informação da classe.".to_string()
    }));
    assert!(common::text_contents(&events).contains(
        &"Este é um texto simples usando `st.text` dentro de um método de classe.".to_string()
    ));
}
