//! Selection state for one ref picker.

use crate::model::{RefCatalog, RefEntry, RefGroup};
use crate::refs::{resolve_from_catalog, resolve_from_free_text, title_for};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PickerSide {
    Old,
    New,
}

impl PickerSide {
    pub fn label(self) -> &'static str {
        match self {
            PickerSide::Old => "Old",
            PickerSide::New => "New",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickerState {
    Closed,
    Open,
}

/// One selectable row of the picker list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PickerItem {
    pub group: RefGroup,
    pub entry: RefEntry,
}

#[derive(Clone, Debug)]
pub struct RefPicker {
    side: PickerSide,
    state: PickerState,
    input_text: String,
    resolved_label: String,
    canonical_value: String,
    highlight: Option<usize>,
}

impl RefPicker {
    pub fn new(side: PickerSide) -> Self {
        Self {
            side,
            state: PickerState::Closed,
            input_text: String::new(),
            resolved_label: String::new(),
            canonical_value: String::new(),
            highlight: None,
        }
    }

    pub fn side(&self) -> PickerSide {
        self.side
    }

    pub fn state(&self) -> PickerState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == PickerState::Open
    }

    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    pub fn resolved_label(&self) -> &str {
        &self.resolved_label
    }

    pub fn canonical_value(&self) -> &str {
        &self.canonical_value
    }

    pub fn highlight(&self) -> Option<usize> {
        self.highlight
    }

    pub fn open_requested(&mut self) {
        if self.is_open() {
            return;
        }
        self.state = PickerState::Open;
        self.highlight = None;
    }

    /// Closes without touching the selection.
    pub fn dismiss(&mut self) {
        self.state = PickerState::Closed;
        self.highlight = None;
    }

    pub fn text_changed(&mut self, text: impl Into<String>) {
        if !self.is_open() {
            return;
        }
        self.input_text = text.into();
        self.highlight = None;
    }

    pub fn push_char(&mut self, c: char) {
        let mut text = self.input_text.clone();
        text.push(c);
        self.text_changed(text);
    }

    pub fn pop_char(&mut self) {
        let mut text = self.input_text.clone();
        text.pop();
        self.text_changed(text);
    }

    /// Returns the new canonical value for the owner.
    pub fn entry_selected(&mut self, entry: &RefEntry) -> Option<String> {
        if !self.is_open() {
            return None;
        }
        self.input_text = entry.name.clone();
        self.resolved_label = entry.name.clone();
        self.canonical_value = resolve_from_catalog(entry);
        self.dismiss();
        Some(self.canonical_value.clone())
    }

    /// Accepts the typed text as the ref. Returns the new canonical value.
    pub fn confirm_typed(&mut self) -> Option<String> {
        if !self.is_open() {
            return None;
        }
        self.resolved_label = self.input_text.clone();
        self.canonical_value = resolve_from_free_text(&self.input_text);
        self.dismiss();
        Some(self.canonical_value.clone())
    }

    /// Enter key: the highlighted list entry if any, else the typed text.
    pub fn confirm(&mut self, catalog: Option<&RefCatalog>) -> Option<String> {
        let highlighted = self.highlight.and_then(|i| {
            catalog.and_then(|c| self.filtered_entries(c).into_iter().nth(i))
        });
        match highlighted {
            Some(item) => self.entry_selected(&item.entry),
            None => self.confirm_typed(),
        }
    }

    /// Owner-driven update (e.g. hydration from the address bar).
    pub fn external_value_changed(&mut self, value: &str) {
        if value == self.canonical_value {
            return;
        }
        self.canonical_value = value.to_string();
        self.input_text = value.to_string();
        self.resolved_label.clear();
    }

    pub fn move_highlight(&mut self, catalog: Option<&RefCatalog>, down: bool) {
        let n = catalog.map(|c| self.filtered_entries(c).len()).unwrap_or(0);
        if n == 0 {
            self.highlight = None;
            return;
        }
        self.highlight = Some(match (self.highlight, down) {
            (None, true) => 0,
            (None, false) => n - 1,
            (Some(i), true) => (i + 1) % n,
            (Some(i), false) => (i + n - 1) % n,
        });
    }

    /// Catalog entries matching the typed text, best match first. Branches
    /// come before tags and catalog order is kept among equal scores.
    pub fn filtered_entries(&self, catalog: &RefCatalog) -> Vec<PickerItem> {
        let q = self.input_text.trim();
        let mut scored: Vec<(i32, usize, PickerItem)> = catalog
            .entries()
            .enumerate()
            .filter_map(|(pos, (group, entry))| {
                let score = if q.is_empty() {
                    1
                } else {
                    score_match(q, &entry.name).max(score_match(q, &entry.commit_hash))
                };
                (score > 0).then(|| {
                    (
                        score,
                        pos,
                        PickerItem {
                            group,
                            entry: entry.clone(),
                        },
                    )
                })
            })
            .collect();

        scored.sort_by(|(sa, pa, a), (sb, pb, b)| {
            group_rank(a.group)
                .cmp(&group_rank(b.group))
                .then_with(|| sb.cmp(sa))
                .then_with(|| pa.cmp(pb))
        });
        scored.into_iter().map(|(_, _, item)| item).collect()
    }

    /// Label for the trigger button.
    pub fn display_label(&self, catalog: Option<&RefCatalog>, placeholder: &str) -> String {
        if !self.resolved_label.is_empty() {
            return self.resolved_label.clone();
        }
        if self.canonical_value.is_empty() {
            return placeholder.to_string();
        }
        match catalog {
            Some(c) => title_for(&self.canonical_value, c),
            None => self.canonical_value.clone(),
        }
    }
}

fn group_rank(group: RefGroup) -> u8 {
    match group {
        RefGroup::Branches => 0,
        RefGroup::Tags => 1,
    }
}

pub(crate) fn score_match(q: &str, candidate: &str) -> i32 {
    let q = q.to_lowercase();
    let c = candidate.to_lowercase();
    if c == q {
        return 100;
    }
    if c.starts_with(&q) {
        return 50 - (c.len() as i32 - q.len() as i32).min(40);
    }
    if c.contains(&q) {
        return 10;
    }
    0
}

#[cfg(test)]
#[path = "tests/picker_tests.rs"]
mod tests;
