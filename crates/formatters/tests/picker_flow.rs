//! End-to-end behavior of the picker commands against scripted seams.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sqltools_formatters::picker::NullReveal;
use sqltools_formatters::{
    DocumentFormattingProvider, FormatError, FormatterPicker, FormatterRegistry, PickItem,
    PickOutcome, QuickPick, RangeFormattingProvider, RevealExtension, document_picker_enabled,
    selection_menu_visible, selection_picker_enabled,
};
use sqltools_types::{Document, Position, Range, TelemetryEvent, TextEdit};
use sqltools_util::{RecordingTelemetry, TelemetrySink};

/// Provider that rewrites whatever it is asked to format with its own tag,
/// recording the ranges it was invoked with.
struct TagProvider {
    name: &'static str,
    extension: Option<&'static str>,
    invocations: Mutex<Vec<Range>>,
}

impl TagProvider {
    fn new(name: &'static str, extension: Option<&'static str>) -> Arc<Self> {
        Arc::new(Self {
            name,
            extension,
            invocations: Mutex::new(Vec::new()),
        })
    }

    fn invocations(&self) -> Vec<Range> {
        self.invocations.lock().expect("lock").clone()
    }
}

impl DocumentFormattingProvider for TagProvider {
    fn display_name(&self) -> &str {
        self.name
    }
    fn extension_id(&self) -> Option<&str> {
        self.extension
    }
    fn format_document(&self, document: &Document) -> Result<Vec<TextEdit>, FormatError> {
        let range = document.full_range();
        self.invocations.lock().expect("lock").push(range);
        Ok(vec![TextEdit::new(range, self.name)])
    }
}

impl RangeFormattingProvider for TagProvider {
    fn display_name(&self) -> &str {
        self.name
    }
    fn extension_id(&self) -> Option<&str> {
        self.extension
    }
    fn format_range(&self, _document: &Document, range: Range) -> Result<Vec<TextEdit>, FormatError> {
        self.invocations.lock().expect("lock").push(range);
        Ok(vec![TextEdit::new(range, self.name)])
    }
}

/// Quick-pick that picks a fixed entry, optionally revealing some entries
/// first.
struct ScriptedPick {
    reveal_first: Vec<usize>,
    outcome: PickOutcome,
    seen_items: Mutex<Vec<PickItem>>,
}

impl ScriptedPick {
    fn picking(index: usize) -> Self {
        Self {
            reveal_first: Vec::new(),
            outcome: PickOutcome::Picked(index),
            seen_items: Mutex::new(Vec::new()),
        }
    }

    fn cancelling() -> Self {
        Self {
            reveal_first: Vec::new(),
            outcome: PickOutcome::Cancelled,
            seen_items: Mutex::new(Vec::new()),
        }
    }

    fn seen_items(&self) -> Vec<PickItem> {
        self.seen_items.lock().expect("lock").clone()
    }
}

#[async_trait]
impl QuickPick for ScriptedPick {
    async fn pick(&self, items: Vec<PickItem>, reveal: &dyn RevealExtension) -> PickOutcome {
        for index in &self.reveal_first {
            if let Some(item) = items.get(*index) {
                reveal.reveal(&item.extension_id);
            }
        }
        *self.seen_items.lock().expect("lock") = items;
        self.outcome
    }
}

struct RecordingReveal {
    revealed: Mutex<Vec<String>>,
}

impl RevealExtension for RecordingReveal {
    fn reveal(&self, extension_id: &str) {
        self.revealed.lock().expect("lock").push(extension_id.to_string());
    }
}

fn sql_registry() -> (FormatterRegistry, Arc<TagProvider>, Arc<TagProvider>) {
    let alpha = TagProvider::new("Alpha", Some("vendor.alpha"));
    let beta = TagProvider::new("Beta", Some("vendor.beta"));
    let mut registry = FormatterRegistry::new();
    registry.register_document("sql", alpha.clone());
    registry.register_range("sql", alpha.clone());
    registry.register_range("sql", beta.clone());
    (registry, alpha, beta)
}

fn picker_with(
    registry: FormatterRegistry,
    quick_pick: Arc<dyn QuickPick>,
) -> (FormatterPicker, Arc<RecordingTelemetry>) {
    let telemetry = Arc::new(RecordingTelemetry::new());
    let picker = FormatterPicker::new(
        Arc::new(registry),
        quick_pick,
        Arc::new(NullReveal),
        telemetry.clone() as Arc<dyn TelemetrySink>,
    );
    (picker, telemetry)
}

#[test]
fn enablement_needs_more_than_one_provider() {
    let (registry, _, _) = sql_registry();
    let document = Document::new("sql", "select 1");
    // Document list: Alpha (real) + Beta (synthesized from range-only).
    assert!(document_picker_enabled(&registry, &document));
    assert!(selection_picker_enabled(&registry, &document));

    let mut single = FormatterRegistry::new();
    single.register_document("sql", TagProvider::new("Only", Some("vendor.only")));
    assert!(!document_picker_enabled(&single, &document));
    assert!(!selection_picker_enabled(&single, &document));
}

#[test]
fn read_only_documents_disable_both_commands() {
    let (registry, _, _) = sql_registry();
    let mut document = Document::new("sql", "select 1");
    document.read_only = true;
    assert!(!document_picker_enabled(&registry, &document));
    assert!(!selection_picker_enabled(&registry, &document));
}

#[test]
fn menu_visibility_needs_a_non_empty_selection() {
    let (registry, _, _) = sql_registry();
    let document = Document::new("sql", "select 1");
    let collapsed = Range::new(Position::new(1, 3), Position::new(1, 3));
    let stretched = Range::new(Position::new(1, 1), Position::new(1, 4));
    assert!(!selection_menu_visible(&registry, &document, collapsed));
    assert!(selection_menu_visible(&registry, &document, stretched));
}

#[tokio::test]
async fn picking_entry_i_invokes_the_provider_at_position_i() {
    let (registry, _alpha, beta) = sql_registry();
    let quick_pick = Arc::new(ScriptedPick::picking(1));
    let (picker, telemetry) = picker_with(registry, quick_pick.clone());

    let mut document = Document::new("sql", "select 1\nfrom t");
    let selection = Range::new(Position::new(1, 1), Position::new(2, 3));
    let picked = picker
        .format_selection_with(&mut document, selection)
        .await
        .expect("format");
    assert_eq!(picked, Some(1));
    assert_eq!(beta.invocations(), vec![selection]);

    let items = quick_pick.seen_items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[1].index, 1);
    assert_eq!(items[1].label, "Beta");

    let events = telemetry.events();
    assert_eq!(events.len(), 1);
    match &events[0] {
        TelemetryEvent::FormatterPick { mode, extensions, pick } => {
            assert_eq!(mode.as_str(), "range");
            assert_eq!(extensions, &vec!["vendor.alpha".to_string(), "vendor.beta".to_string()]);
            assert_eq!(pick, "vendor.beta");
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn document_pick_formats_and_reports_document_mode() {
    let (registry, alpha, _beta) = sql_registry();
    let (picker, telemetry) = picker_with(registry, Arc::new(ScriptedPick::picking(0)));

    let mut document = Document::new("sql", "select 1\nfrom t");
    let full = document.full_range();
    let picked = picker.format_document_with(&mut document).await.expect("format");
    assert_eq!(picked, Some(0));
    assert_eq!(alpha.invocations(), vec![full]);
    assert_eq!(document.text(), "Alpha");

    match &telemetry.events()[0] {
        TelemetryEvent::FormatterPick { mode, pick, .. } => {
            assert_eq!(mode.as_str(), "document");
            assert_eq!(pick, "vendor.alpha");
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn cancellation_formats_nothing_and_still_reports_once() {
    let (registry, alpha, beta) = sql_registry();
    let (picker, telemetry) = picker_with(registry, Arc::new(ScriptedPick::cancelling()));

    let mut document = Document::new("sql", "select 1");
    let original = document.text();
    let picked = picker.format_document_with(&mut document).await.expect("format");
    assert_eq!(picked, None);
    assert_eq!(document.text(), original);
    assert!(alpha.invocations().is_empty());
    assert!(beta.invocations().is_empty());

    let events = telemetry.events();
    assert_eq!(events.len(), 1, "exactly one formatterpick per invocation");
    match &events[0] {
        TelemetryEvent::FormatterPick { pick, .. } => assert_eq!(pick, "none"),
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn collapsed_selection_widens_to_the_full_cursor_line() {
    let (registry, alpha, _beta) = sql_registry();
    let (picker, _telemetry) = picker_with(registry, Arc::new(ScriptedPick::picking(0)));

    let mut document = Document::new("sql", "select 1\nfrom dual\nwhere 1 = 1");
    let cursor = Range::new(Position::new(2, 5), Position::new(2, 5));
    picker
        .format_selection_with(&mut document, cursor)
        .await
        .expect("format");

    let line_len = "from dual".len() as u32;
    assert_eq!(
        alpha.invocations(),
        vec![Range::new(Position::new(2, 1), Position::new(2, line_len + 1))]
    );
}

#[tokio::test]
async fn providers_without_extension_ids_report_unknown() {
    let mut registry = FormatterRegistry::new();
    registry.register_document("sql", TagProvider::new("Anon", None));
    registry.register_document("sql", TagProvider::new("Named", Some("vendor.named")));
    let (picker, telemetry) = picker_with(registry, Arc::new(ScriptedPick::picking(0)));

    let mut document = Document::new("sql", "select 1");
    picker.format_document_with(&mut document).await.expect("format");

    match &telemetry.events()[0] {
        TelemetryEvent::FormatterPick { extensions, pick, .. } => {
            assert_eq!(extensions, &vec!["unknown".to_string(), "vendor.named".to_string()]);
            assert_eq!(pick, "unknown");
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn reveal_requests_reach_the_sink_without_ending_the_pick() {
    let (registry, _alpha, _beta) = sql_registry();
    let reveal = Arc::new(RecordingReveal {
        revealed: Mutex::new(Vec::new()),
    });
    let quick_pick = Arc::new(ScriptedPick {
        reveal_first: vec![0, 1],
        outcome: PickOutcome::Picked(0),
        seen_items: Mutex::new(Vec::new()),
    });
    let telemetry = Arc::new(RecordingTelemetry::new());
    let picker = FormatterPicker::new(
        Arc::new(registry),
        quick_pick,
        reveal.clone(),
        telemetry.clone() as Arc<dyn TelemetrySink>,
    );

    let mut document = Document::new("sql", "select 1");
    let picked = picker.format_document_with(&mut document).await.expect("format");
    assert_eq!(picked, Some(0));
    assert_eq!(
        reveal.revealed.lock().expect("lock").clone(),
        vec!["vendor.alpha".to_string(), "vendor.beta".to_string()]
    );
    // The reveal did not replace the selection outcome.
    assert_eq!(telemetry.events().len(), 1);
}
