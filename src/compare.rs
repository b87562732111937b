//! Comparison parameters, the address bar and the fetch pipeline.
//!
//! [`ComparisonController`] is a reducer: every change yields a list of
//! [`Effect`]s which [`Dashboard`] runs afterwards against the address bar and
//! a [`FetchDispatcher`].

use std::sync::Arc;

use crate::error::FetchError;
use crate::format::format;
use crate::model::{
    ComparisonKind, ComparisonParameters, ComparisonResult, FetchKey, FormattedComparisonResult,
};
use crate::query::parse_params;

mod dashboard;
mod dispatch;

pub use self::dashboard::Dashboard;
pub use self::dispatch::{
    ComparisonSource, FetchDispatcher, FetchOutcome, RecordingDispatcher, ThreadedDispatcher,
};

/// What the presentation layer renders.
#[derive(Clone, Debug, PartialEq)]
pub enum ComparisonState {
    /// Required refs are missing; nothing was requested.
    NotReady,
    Loading,
    Error(String),
    Ready(Arc<FormattedComparisonResult>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParamChange {
    OldRef(String),
    NewRef(String),
    OldWorkload(String),
    NewWorkload(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchRequest {
    pub generation: u64,
    pub key: FetchKey,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    WriteLocation(ComparisonParameters),
    IssueFetch(FetchRequest),
}

#[derive(Debug)]
pub struct ComparisonController {
    kind: ComparisonKind,
    params: ComparisonParameters,
    key: Option<FetchKey>,
    generation: u64,
    state: ComparisonState,
}

impl ComparisonController {
    /// Hydrates from the page's query string. The returned effects normalize
    /// the address bar and issue the first fetch when the refs are present.
    pub fn mount(kind: ComparisonKind, query: &str) -> (Self, Vec<Effect>) {
        let mut controller = Self {
            kind,
            params: ComparisonParameters::default(),
            key: None,
            generation: 0,
            state: ComparisonState::NotReady,
        };
        let params = parse_params(kind, query);
        let mut effects = vec![Effect::WriteLocation(params.clone())];
        effects.extend(controller.commit(params));
        (controller, effects)
    }

    pub fn kind(&self) -> ComparisonKind {
        self.kind
    }

    pub fn params(&self) -> &ComparisonParameters {
        &self.params
    }

    pub fn state(&self) -> &ComparisonState {
        &self.state
    }

    pub fn fetch_key(&self) -> Option<&FetchKey> {
        self.key.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn apply(&mut self, change: ParamChange) -> Vec<Effect> {
        let mut next = self.params.clone();
        match change {
            ParamChange::OldRef(v) => next.old_ref = v,
            ParamChange::NewRef(v) => next.new_ref = v,
            ParamChange::OldWorkload(v) => next.old_workload = v,
            ParamChange::NewWorkload(v) => next.new_workload = v,
        }
        if next == self.params {
            return Vec::new();
        }
        let mut effects = vec![Effect::WriteLocation(next.clone())];
        effects.extend(self.commit(next));
        effects
    }

    /// Re-issues the current key. Used for an explicit user reload.
    pub fn reload(&mut self) -> Vec<Effect> {
        match self.key.clone() {
            Some(key) => vec![self.issue(key)],
            None => Vec::new(),
        }
    }

    /// Applies a fetch result. Returns false when the result belongs to a
    /// superseded request and was dropped.
    pub fn complete(
        &mut self,
        generation: u64,
        result: Result<ComparisonResult, FetchError>,
    ) -> bool {
        if generation != self.generation || self.state != ComparisonState::Loading {
            tracing::debug!(
                generation,
                current = self.generation,
                "dropping stale comparison result"
            );
            return false;
        }
        self.state = match result {
            Ok(raw) => {
                let formatted = format(&raw);
                tracing::info!(
                    generation,
                    rows = formatted.row_count(),
                    "comparison ready"
                );
                ComparisonState::Ready(Arc::new(formatted))
            }
            Err(err) => {
                tracing::warn!(generation, error = %err, "comparison fetch failed");
                ComparisonState::Error(err.user_message().to_string())
            }
        };
        true
    }

    fn commit(&mut self, next: ComparisonParameters) -> Option<Effect> {
        self.params = next;
        let key = FetchKey::derive(self.kind, &self.params);
        if key == self.key {
            return None;
        }
        match key {
            Some(key) => Some(self.issue(key)),
            None => {
                // Fence any in-flight request; its result must not land.
                self.key = None;
                self.generation += 1;
                self.state = ComparisonState::NotReady;
                None
            }
        }
    }

    fn issue(&mut self, key: FetchKey) -> Effect {
        self.generation += 1;
        self.key = Some(key.clone());
        self.state = ComparisonState::Loading;
        tracing::debug!(generation = self.generation, ?key, "issue comparison fetch");
        Effect::IssueFetch(FetchRequest {
            generation: self.generation,
            key,
        })
    }
}

#[cfg(test)]
#[path = "tests/compare_tests.rs"]
mod tests;
