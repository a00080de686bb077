/*!
 * Tests for the recording and terminal presentation surfaces
 */

use showcase::errors::SurfaceError;
use showcase::sections::SectionKind;
use showcase::surface::{
    DataFrame, LineSeries, PageLayout, PresentationSurface, ProgressHandle, RecordingSurface,
    SurfaceEvent,
    TerminalSurface, TextKind,
};
use showcase::WidgetValues;

use crate::common;

fn terminal() -> TerminalSurface<Vec<u8>> {
    let mut surface = TerminalSurface::with_writer(Vec::new(), WidgetValues::new(), false);
    surface.configure_page(PageLayout::Centered, "Test").unwrap();
    surface
}

fn output(surface: TerminalSurface<Vec<u8>>) -> String {
    String::from_utf8(surface.into_inner()).expect("terminal output should be UTF-8")
}

#[test]
fn test_recordingSurface_configureTwice_shouldFail() {
    let mut surface = RecordingSurface::new(WidgetValues::new());
    surface.configure_page(PageLayout::Wide, "First").unwrap();

    let result = surface.configure_page(PageLayout::Wide, "Second");

    assert!(matches!(result, Err(SurfaceError::AlreadyConfigured)));
    assert_eq!(surface.events().len(), 1);
}

#[test]
fn test_recordingSurface_configureAfterRender_shouldFail() {
    let mut surface = common::configured_surface(WidgetValues::new());
    surface.render_text(TextKind::Plain, "hello").unwrap();

    let result = surface.configure_page(PageLayout::Wide, "Again");

    assert!(matches!(result, Err(SurfaceError::ConfigureAfterRender)));
}

#[test]
fn test_recordingSurface_renderBeforeConfigure_shouldFailAndRecordNothing() {
    let mut surface = RecordingSurface::new(WidgetValues::new());

    assert!(matches!(
        surface.render_text(TextKind::Plain, "too early"),
        Err(SurfaceError::NotConfigured)
    ));
    assert!(matches!(surface.render_button("Go"), Err(SurfaceError::NotConfigured)));
    assert!(matches!(
        surface.begin_section(SectionKind::Text),
        Err(SurfaceError::NotConfigured)
    ));
    assert!(surface.events().is_empty());
}

#[test]
fn test_recordingSurface_widgets_shouldReturnAndRecordStoredValues() {
    let widgets = WidgetValues::new()
        .with_pressed("Go")
        .with_text("Name", "Ana")
        .with_choice("Pick", "y");
    let mut surface = common::configured_surface(widgets);

    assert!(surface.render_button("Go").unwrap());
    assert_eq!(surface.render_text_input("Name", "Visitante").unwrap(), "Ana");
    assert_eq!(surface.render_slider("Age", 0, 100, 25).unwrap(), 25);
    assert_eq!(surface.render_choice("Pick", &["x", "y"]).unwrap(), "y");

    let events = surface.events();
    assert_eq!(
        events[1],
        SurfaceEvent::Button { label: "Go".to_string(), pressed: true }
    );
    assert_eq!(
        events[4],
        SurfaceEvent::Choice {
            label: "Pick".to_string(),
            options: vec!["x".to_string(), "y".to_string()],
            value: "y".to_string(),
        }
    );
}

#[test]
fn test_recordingSurface_invalidSlider_shouldFailWithoutRecording() {
    let mut surface = common::configured_surface(WidgetValues::new().with_slider("Age", 120));

    let result = surface.render_slider("Age", 0, 100, 25);

    assert!(matches!(result, Err(SurfaceError::InvalidWidget { .. })));
    assert_eq!(surface.events().len(), 1);
}

#[test]
fn test_recordingSurface_progressOutOfRange_shouldBeRejected() {
    let mut surface = common::configured_surface(WidgetValues::new());

    assert!(matches!(
        surface.render_progress(101, "Loading"),
        Err(SurfaceError::ProgressOutOfRange(101))
    ));

    let mut handle = surface.render_progress(0, "Loading").unwrap();
    handle.update(100, "Loading").unwrap();
    assert!(matches!(
        handle.update(150, "Loading"),
        Err(SurfaceError::ProgressOutOfRange(150))
    ));
    assert_eq!(common::progress_updates(&surface.events()), vec![100]);
}

#[test]
fn test_recordingSurface_spinnerGuard_shouldRecordReleaseOnDrop() {
    let mut surface = common::configured_surface(WidgetValues::new());

    let guard = surface.begin_spinner("Working").unwrap();
    assert_eq!(
        surface.events().last(),
        Some(&SurfaceEvent::SpinnerStarted { message: "Working".to_string() })
    );
    drop(guard);

    assert_eq!(
        surface.events().last(),
        Some(&SurfaceEvent::SpinnerReleased { message: "Working".to_string() })
    );
}

#[test]
fn test_surfaceEvent_serialize_shouldUseTaggedSnakeCase() {
    let text = SurfaceEvent::Text {
        kind: TextKind::Heading,
        content: "Hi".to_string(),
    };
    let code = SurfaceEvent::Text {
        kind: TextKind::Code { language: "python" },
        content: "print(1)".to_string(),
    };
    let section = SurfaceEvent::SectionStarted { section: SectionKind::Status };

    assert_eq!(
        serde_json::to_value(&text).unwrap(),
        serde_json::json!({"event": "text", "kind": "heading", "content": "Hi"})
    );
    assert_eq!(
        serde_json::to_value(&code).unwrap(),
        serde_json::json!({"event": "text", "kind": {"code": {"language": "python"}}, "content": "print(1)"})
    );
    assert_eq!(
        serde_json::to_value(&section).unwrap(),
        serde_json::json!({"event": "section_started", "section": "status"})
    );
    assert_eq!(
        serde_json::to_value(SurfaceEvent::Divider).unwrap(),
        serde_json::json!({"event": "divider"})
    );
}

#[test]
fn test_terminalSurface_renderBeforeConfigure_shouldFail() {
    let mut surface = TerminalSurface::with_writer(Vec::new(), WidgetValues::new(), false);

    assert!(matches!(
        surface.render_info("early"),
        Err(SurfaceError::NotConfigured)
    ));
    assert!(output(surface).is_empty());
}

#[test]
fn test_terminalSurface_textKinds_shouldRenderReadableText() {
    let mut surface = terminal();
    surface.render_text(TextKind::Title, "Page").unwrap();
    surface.render_text(TextKind::Heading, "Section").unwrap();
    surface.render_text(TextKind::Plain, "plain words").unwrap();
    surface.render_text(TextKind::Code { language: "python" }, "print('x')").unwrap();
    surface.render_text(TextKind::Math, "E=mc^2").unwrap();

    let text = output(surface);
    assert!(text.contains("Page\n====\n"));
    assert!(text.contains("Section\n-------\n"));
    assert!(text.contains("plain words\n"));
    assert!(text.contains("```python\nprint('x')\n```\n"));
    assert!(text.contains("$$ E=mc^2 $$"));
    assert!(!text.contains('\x1B'));
}

#[test]
fn test_terminalSurface_withColor_shouldEmitAnsiCodes() {
    let mut surface = TerminalSurface::with_writer(Vec::new(), WidgetValues::new(), true);
    surface.configure_page(PageLayout::Wide, "Test").unwrap();
    surface.render_success("ok").unwrap();

    assert_eq!(output(surface), "\x1B[1;32m✔ ok\x1B[0m\n");
}

#[test]
fn test_terminalSurface_widgets_shouldEchoValues() {
    let widgets = WidgetValues::new().with_text("Name", "Ana");
    let mut surface = TerminalSurface::with_writer(Vec::new(), widgets, false);
    surface.configure_page(PageLayout::Wide, "Test").unwrap();

    assert!(!surface.render_button("Go").unwrap());
    assert_eq!(surface.render_text_input("Name", "Visitante").unwrap(), "Ana");
    assert_eq!(surface.render_slider("Age", 0, 100, 25).unwrap(), 25);
    assert_eq!(surface.render_choice("Pick", &["x", "y"]).unwrap(), "x");

    let text = output(surface);
    assert!(text.contains("[ Go ]\n"));
    assert!(text.contains("Name Ana\n"));
    assert!(text.contains("Age [0..100] 25\n"));
    assert!(text.contains("Pick (x | y) x\n"));
}

#[test]
fn test_terminalSurface_tableAndChart_shouldRenderAllRowsAndSeries() {
    let mut surface = terminal();
    let frame = DataFrame {
        columns: vec!["col_a".to_string(), "col_b".to_string()],
        rows: vec![vec![0.5, 0.25]; 3],
    };
    let mut series = LineSeries::new();
    series.insert("a".to_string(), vec![0.0, 1.0]);
    series.insert("b".to_string(), vec![1.0, 0.0]);

    surface.render_table(&frame).unwrap();
    surface.render_line_chart(&series).unwrap();

    let text = output(surface);
    assert!(text.contains("col_a"));
    assert!(text.contains("2  0.5000  0.2500"));
    assert!(text.contains("a ▁█  min 0.00 max 1.00"));
    assert!(text.contains("b █▁  min 0.00 max 1.00"));
}

#[test]
fn test_terminalSurface_progressAndSpinner_shouldWorkOnHiddenTarget() {
    let mut surface = terminal();

    let mut handle = surface.render_progress(0, "Loading").unwrap();
    for current in 1..=100 {
        handle.update(current, "Loading").unwrap();
    }
    assert!(handle.update(101, "Loading").is_err());
    drop(handle);

    let guard = surface.begin_spinner("Working").unwrap();
    drop(guard);
    surface.render_success("done").unwrap();

    assert_eq!(output(surface), "✔ done\n");
}
