use std::collections::HashMap;

use ratatui::backend::TestBackend;

use super::*;
use crate::error::{FETCH_ERROR_MESSAGE, FetchError};
use crate::model::{ComparisonResult, FetchKey, MetricSamples, RefEntry};
use crate::tui::TuiRunOptions;

const MAIN_HASH: &str = "aaaa1111bbbb2222cccc3333dddd4444eeee5555";
const RELEASE_HASH: &str = "f00dfeed0000111122223333444455556666beef";

struct FakeSource {
    catalog: Option<RefCatalog>,
    results: HashMap<String, ComparisonResult>,
}

impl FakeSource {
    fn status(path: &str) -> FetchError {
        FetchError::Status {
            url: format!("http://fake/{path}"),
            status: 500,
        }
    }
}

impl ComparisonSource for FakeSource {
    fn fetch_refs(&self) -> Result<RefCatalog, FetchError> {
        self.catalog
            .clone()
            .ok_or_else(|| Self::status("vitess/refs"))
    }

    fn fetch_comparison(&self, key: &FetchKey) -> Result<ComparisonResult, FetchError> {
        let endpoint = key.endpoint();
        self.results
            .get(&endpoint)
            .cloned()
            .ok_or_else(|| Self::status(&endpoint))
    }
}

fn catalog() -> RefCatalog {
    RefCatalog {
        branches: vec![RefEntry::new("main", MAIN_HASH)],
        tags: vec![RefEntry::new("v20.0.0", RELEASE_HASH)],
    }
}

fn qps_result() -> ComparisonResult {
    let mut metrics = HashMap::new();
    metrics.insert(
        "qps".to_string(),
        MetricSamples {
            old: 1000.0,
            new: 1100.0,
        },
    );
    ComparisonResult {
        old_workload: "TPCC".to_string(),
        new_workload: "TPCC_FK".to_string(),
        metrics,
    }
}

fn app_with(kind: ComparisonKind, query: &str, source: FakeSource) -> App {
    let opts = TuiRunOptions {
        kind,
        query: query.to_string(),
        ..TuiRunOptions::default()
    };
    App::new(opts, Arc::new(source)).unwrap()
}

fn wait(app: &mut App) -> FetchOutcome {
    app.recv_outcome(Duration::from_secs(5))
        .expect("fetch outcome within timeout")
}

fn settle_catalog(app: &mut App) {
    let outcome = wait(app);
    assert!(matches!(outcome, FetchOutcome::Catalog { .. }));
    app.apply_outcome(outcome);
}

fn press(app: &mut App, code: KeyCode) {
    event_loop::handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

fn screen(app: &App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(110, 32)).unwrap();
    terminal.draw(|f| render::draw(f, app)).unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|c| c.symbol())
        .collect()
}

#[test]
fn shortcut_opens_picker_and_enter_picks_highlighted_release() {
    let mut results = HashMap::new();
    results.insert(
        format!("fk/compare?sha={RELEASE_HASH}&oldWorkload=&newWorkload="),
        qps_result(),
    );
    let mut app = app_with(
        ComparisonKind::ForeignKeys,
        "",
        FakeSource {
            catalog: Some(catalog()),
            results,
        },
    );
    settle_catalog(&mut app);
    assert_eq!(app.state(), &ComparisonState::NotReady);

    press(&mut app, KeyCode::Char('o'));
    assert!(app.old_picker.is_open());
    assert_eq!(app.focus(), FocusTarget::TextEntry);

    type_text(&mut app, "v20");
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Enter);

    assert!(!app.old_picker.is_open());
    assert_eq!(app.old_picker.resolved_label(), "v20.0.0");
    assert_eq!(
        app.dashboard.location().query(),
        format!("sha={RELEASE_HASH}&new=&oldWorkload=&newWorkload=")
    );
    assert_eq!(app.state(), &ComparisonState::Loading);

    let outcome = wait(&mut app);
    assert!(app.apply_outcome(outcome));
    match app.state() {
        ComparisonState::Ready(f) => assert_eq!(f.groups[0].rows[0].new, 1100.0),
        other => panic!("expected ready, got {other:?}"),
    }
    assert!(app.updated_at.is_some());
}

#[test]
fn typed_hash_is_used_when_refs_are_unavailable() {
    let mut app = app_with(
        ComparisonKind::ForeignKeys,
        "",
        FakeSource {
            catalog: None,
            results: HashMap::new(),
        },
    );
    settle_catalog(&mut app);
    assert!(app.catalog().is_none());
    assert!(app.catalog_note.is_some());

    press(&mut app, KeyCode::Char('o'));
    type_text(&mut app, " abc123 ");
    press(&mut app, KeyCode::Enter);

    assert_eq!(
        app.dashboard.location().query(),
        "sha=abc123&new=&oldWorkload=&newWorkload="
    );

    // No payload is registered for this key, so the backend answers 500.
    let outcome = wait(&mut app);
    app.apply_outcome(outcome);
    assert_eq!(
        app.state(),
        &ComparisonState::Error(FETCH_ERROR_MESSAGE.to_string())
    );
}

#[test]
fn shortcuts_are_ignored_while_a_picker_has_focus() {
    let mut app = app_with(
        ComparisonKind::Macrobench,
        "",
        FakeSource {
            catalog: Some(catalog()),
            results: HashMap::new(),
        },
    );
    settle_catalog(&mut app);

    press(&mut app, KeyCode::Char('o'));
    press(&mut app, KeyCode::Char('j'));

    assert!(app.old_picker.is_open());
    assert!(!app.new_picker.is_open());
    assert_eq!(app.old_picker.input_text(), "j");
}

#[test]
fn escape_closes_picker_without_changing_the_selection() {
    let mut app = app_with(
        ComparisonKind::Macrobench,
        "old=main&new=",
        FakeSource {
            catalog: Some(catalog()),
            results: HashMap::new(),
        },
    );
    settle_catalog(&mut app);
    let before = app.dashboard.location().query().to_string();

    press(&mut app, KeyCode::Char('j'));
    assert!(app.new_picker.is_open());
    type_text(&mut app, "v20");
    press(&mut app, KeyCode::Esc);

    assert!(!app.new_picker.is_open());
    assert_eq!(app.dashboard.location().query(), before);
    assert_eq!(app.state(), &ComparisonState::NotReady);
    assert!(!app.quit);
}

#[test]
fn new_ref_picker_is_not_mounted_for_foreign_keys() {
    let mut app = app_with(
        ComparisonKind::ForeignKeys,
        "",
        FakeSource {
            catalog: Some(catalog()),
            results: HashMap::new(),
        },
    );
    settle_catalog(&mut app);

    assert!(!app.shortcuts.is_mounted(PickerSide::New));
    press(&mut app, KeyCode::Char('j'));
    assert!(app.open_picker().is_none());
}

#[test]
fn workload_keys_cycle_through_configured_workloads() {
    let mut app = app_with(
        ComparisonKind::ForeignKeys,
        "sha=abc",
        FakeSource {
            catalog: Some(catalog()),
            results: HashMap::new(),
        },
    );

    press(&mut app, KeyCode::Char('w'));
    assert_eq!(app.dashboard.params().old_workload, "TPCC");
    press(&mut app, KeyCode::Char('w'));
    assert_eq!(app.dashboard.params().old_workload, "TPCC_FK");
    press(&mut app, KeyCode::Char('W'));
    assert_eq!(app.dashboard.params().new_workload, "TPCC");

    assert_eq!(
        app.dashboard.location().query(),
        "sha=abc&new=&oldWorkload=TPCC_FK&newWorkload=TPCC"
    );
}

#[test]
fn external_ref_hydrates_picker_label_from_catalog() {
    let mut app = app_with(
        ComparisonKind::ForeignKeys,
        &format!("sha={MAIN_HASH}"),
        FakeSource {
            catalog: Some(catalog()),
            results: HashMap::new(),
        },
    );
    // The mount fetch and the catalog load race; apply both.
    let first = wait(&mut app);
    app.apply_outcome(first);
    let second = wait(&mut app);
    app.apply_outcome(second);

    assert_eq!(app.old_picker.canonical_value(), MAIN_HASH);
    assert_eq!(
        app.old_picker.display_label(app.catalog(), PICKER_PLACEHOLDER),
        "main"
    );
}

#[test]
fn quit_key_stops_the_loop() {
    let mut app = app_with(
        ComparisonKind::ForeignKeys,
        "",
        FakeSource {
            catalog: None,
            results: HashMap::new(),
        },
    );
    press(&mut app, KeyCode::Char('q'));
    assert!(app.quit);
}

#[test]
fn ready_result_renders_grouped_metrics() {
    let mut results = HashMap::new();
    results.insert(
        "fk/compare?sha=abc&oldWorkload=&newWorkload=".to_string(),
        qps_result(),
    );
    let mut app = app_with(
        ComparisonKind::ForeignKeys,
        "sha=abc",
        FakeSource {
            catalog: Some(catalog()),
            results,
        },
    );
    let first = wait(&mut app);
    app.apply_outcome(first);
    let second = wait(&mut app);
    app.apply_outcome(second);

    let text = screen(&app);
    assert!(text.contains("Foreign Keys"));
    assert!(text.contains("Throughput"));
    assert!(text.contains("+10.00%"));
}

#[test]
fn open_picker_renders_grouped_entries() {
    let mut app = app_with(
        ComparisonKind::ForeignKeys,
        "",
        FakeSource {
            catalog: Some(catalog()),
            results: HashMap::new(),
        },
    );
    settle_catalog(&mut app);
    press(&mut app, KeyCode::Char('o'));

    let text = screen(&app);
    assert!(text.contains("Branches"));
    assert!(text.contains("Releases"));
    assert!(text.contains("v20.0.0"));

    type_text(&mut app, "zzzz");
    assert!(screen(&app).contains("No results found."));
}

#[test]
fn superseded_catalog_load_cannot_replace_a_newer_one() {
    let mut app = app_with(
        ComparisonKind::ForeignKeys,
        "",
        FakeSource {
            catalog: Some(catalog()),
            results: HashMap::new(),
        },
    );
    settle_catalog(&mut app);

    // Two reloads in flight; the second answers first with a good catalog.
    app.reload_catalog();
    app.reload_catalog();
    let mut pending = vec![wait(&mut app), wait(&mut app)];
    pending.retain(|o| matches!(o, FetchOutcome::Catalog { generation: 3, .. }));
    assert_eq!(pending.len(), 1);
    assert!(app.apply_outcome(pending.remove(0)));

    let late_failure = FetchOutcome::Catalog {
        generation: 2,
        result: Err(FakeSource::status("vitess/refs")),
    };
    assert!(!app.apply_outcome(late_failure));
    assert_eq!(app.catalog(), Some(&catalog()));
    assert!(app.catalog_note.is_none());
}

#[test]
fn macrobench_result_links_both_commits() {
    let mut results = HashMap::new();
    results.insert(
        format!("macrobench/compare?old={RELEASE_HASH}&new={MAIN_HASH}"),
        qps_result(),
    );
    let mut app = app_with(
        ComparisonKind::Macrobench,
        &format!("old={RELEASE_HASH}&new={MAIN_HASH}"),
        FakeSource {
            catalog: Some(catalog()),
            results,
        },
    );
    let first = wait(&mut app);
    app.apply_outcome(first);
    let second = wait(&mut app);
    app.apply_outcome(second);
    assert!(matches!(app.state(), ComparisonState::Ready(_)));

    let text = screen(&app);
    assert!(text.contains(&format!("old: https://github.com/vitessio/vitess/commit/{RELEASE_HASH}")));
    assert!(text.contains(&format!("new: https://github.com/vitessio/vitess/commit/{MAIN_HASH}")));
}
