use std::io;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use time::OffsetDateTime;
use time::format_description::FormatItem;
use time::format_description::well_known::Rfc3339;

use crate::compare::{
    ComparisonSource, ComparisonState, Dashboard, FetchOutcome, ParamChange, ThreadedDispatcher,
};
use crate::model::{ComparisonKind, DashboardConfig, RefCatalog};
use crate::picker::{PickerSide, RefPicker};
use crate::query::Location;
use crate::remote::DashboardClient;
use crate::shortcuts::{FocusTarget, KeyChord, ShortcutRouter};

use super::RenderCtx;

mod event_loop;
mod render;
mod runtime;
mod time_utils;

pub(super) use self::runtime::run;
pub(super) use self::time_utils::{fmt_ts_list, now_ts};

pub(super) const PICKER_PLACEHOLDER: &str = "Search commit or releases...";

pub(super) struct App {
    pub(super) config: DashboardConfig,
    pub(super) dashboard: Dashboard<ThreadedDispatcher>,
    outcomes: Receiver<FetchOutcome>,

    pub(super) catalog: Option<Arc<RefCatalog>>,
    catalog_generation: u64,
    pub(super) catalog_note: Option<String>,

    pub(super) old_picker: RefPicker,
    pub(super) new_picker: RefPicker,
    chords: [(PickerSide, KeyChord); 2],
    pub(super) shortcuts: ShortcutRouter,

    pub(super) updated_at: Option<String>,
    pub(super) scroll: usize,
    pub(super) quit: bool,
}

impl App {
    pub(super) fn load(opts: crate::tui::TuiRunOptions) -> Result<Self> {
        let client = DashboardClient::new(&opts.config.api_url)?;
        Self::new(opts, Arc::new(client))
    }

    pub(super) fn new(
        opts: crate::tui::TuiRunOptions,
        source: Arc<dyn ComparisonSource>,
    ) -> Result<Self> {
        let chords = [
            (
                PickerSide::Old,
                KeyChord::parse(&opts.config.old_shortcut).context("old picker shortcut")?,
            ),
            (
                PickerSide::New,
                KeyChord::parse(&opts.config.new_shortcut).context("new picker shortcut")?,
            ),
        ];

        let (tx, outcomes) = mpsc::channel();
        let dispatcher = ThreadedDispatcher::new(source, tx);
        dispatcher.load_catalog(1);

        let location = Location::new(opts.config.page_url.clone(), opts.query);
        let dashboard = Dashboard::mount(opts.kind, location, dispatcher);

        let mut app = Self {
            config: opts.config,
            dashboard,
            outcomes,
            catalog: None,
            catalog_generation: 1,
            catalog_note: None,
            old_picker: RefPicker::new(PickerSide::Old),
            new_picker: RefPicker::new(PickerSide::New),
            chords,
            shortcuts: ShortcutRouter::default(),
            updated_at: None,
            scroll: 0,
            quit: false,
        };
        app.sync_pickers();
        app.mount_shortcuts();
        Ok(app)
    }

    pub(super) fn kind(&self) -> ComparisonKind {
        self.dashboard.controller().kind()
    }

    pub(super) fn state(&self) -> &ComparisonState {
        self.dashboard.state()
    }

    pub(super) fn catalog(&self) -> Option<&RefCatalog> {
        self.catalog.as_deref()
    }

    pub(super) fn focus(&self) -> FocusTarget {
        if self.open_picker().is_some() {
            FocusTarget::TextEntry
        } else {
            FocusTarget::Dashboard
        }
    }

    pub(super) fn open_picker(&self) -> Option<&RefPicker> {
        [&self.old_picker, &self.new_picker]
            .into_iter()
            .find(|p| p.is_open())
    }

    pub(super) fn picker_mut(&mut self, side: PickerSide) -> &mut RefPicker {
        match side {
            PickerSide::Old => &mut self.old_picker,
            PickerSide::New => &mut self.new_picker,
        }
    }

    pub(super) fn picker_visible(&self, side: PickerSide) -> bool {
        match side {
            PickerSide::Old => true,
            PickerSide::New => self.kind().uses_new_ref(),
        }
    }

    fn mount_shortcuts(&mut self) {
        for (side, chord) in self.chords {
            if self.picker_visible(side) {
                self.shortcuts.mount(side, chord);
            }
        }
    }

    pub(super) fn unmount_shortcuts(&mut self) {
        for (side, _) in self.chords {
            self.shortcuts.unmount(side);
        }
    }

    /// Pushes the controller's refs into the pickers.
    fn sync_pickers(&mut self) {
        let params = self.dashboard.params().clone();
        self.old_picker.external_value_changed(&params.old_ref);
        self.new_picker.external_value_changed(&params.new_ref);
    }

    pub(super) fn change(&mut self, change: ParamChange) {
        self.dashboard.change(change);
        self.sync_pickers();
        self.scroll = 0;
    }

    pub(super) fn emit_ref(&mut self, side: PickerSide, value: String) {
        let change = match side {
            PickerSide::Old => ParamChange::OldRef(value),
            PickerSide::New => ParamChange::NewRef(value),
        };
        self.change(change);
    }

    /// Moves a workload selector to the next configured workload.
    pub(super) fn cycle_workload(&mut self, side: PickerSide) {
        if !self.kind().uses_workloads() || self.config.workloads.is_empty() {
            return;
        }
        let params = self.dashboard.params();
        let current = match side {
            PickerSide::Old => &params.old_workload,
            PickerSide::New => &params.new_workload,
        };
        let workloads = &self.config.workloads;
        let next = match workloads.iter().position(|w| w == current) {
            Some(i) => workloads[(i + 1) % workloads.len()].clone(),
            None => workloads[0].clone(),
        };
        let change = match side {
            PickerSide::Old => ParamChange::OldWorkload(next),
            PickerSide::New => ParamChange::NewWorkload(next),
        };
        self.change(change);
    }

    pub(super) fn reload(&mut self) {
        self.dashboard.reload();
    }

    pub(super) fn reload_catalog(&mut self) {
        self.catalog_generation += 1;
        self.dashboard
            .dispatcher()
            .load_catalog(self.catalog_generation);
    }

    /// Applies every finished fetch. Returns true if anything changed.
    pub(super) fn drain_outcomes(&mut self) -> bool {
        let mut changed = false;
        while let Ok(outcome) = self.outcomes.try_recv() {
            changed |= self.apply_outcome(outcome);
        }
        changed
    }

    pub(super) fn apply_outcome(&mut self, outcome: FetchOutcome) -> bool {
        match outcome {
            FetchOutcome::Comparison { generation, result } => {
                let applied = self.dashboard.complete(generation, result);
                if applied {
                    self.updated_at = Some(now_ts());
                }
                applied
            }
            FetchOutcome::Catalog { generation, .. } if generation != self.catalog_generation => {
                tracing::debug!(
                    generation,
                    current = self.catalog_generation,
                    "dropping stale ref catalog"
                );
                false
            }
            FetchOutcome::Catalog {
                result: Ok(catalog),
                ..
            } => {
                tracing::info!(refs = catalog.len(), "ref catalog loaded");
                self.catalog = Some(Arc::new(catalog));
                self.catalog_note = None;
                true
            }
            FetchOutcome::Catalog {
                result: Err(err), ..
            } => {
                tracing::warn!(error = %err, "ref catalog unavailable");
                self.catalog = None;
                self.catalog_note =
                    Some("refs unavailable: type a commit hash and press Enter".to_string());
                true
            }
        }
    }

    #[cfg(test)]
    pub(super) fn recv_outcome(&mut self, timeout: Duration) -> Option<FetchOutcome> {
        self.outcomes.recv_timeout(timeout).ok()
    }
}

#[cfg(test)]
#[path = "../tests/tui_shell/app_tests.rs"]
mod tests;
