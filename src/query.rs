//! Address-bar state: hydration of comparison parameters from a query string
//! and the shallow write-back that keeps shared links in sync.

use url::form_urlencoded;

use crate::model::{ComparisonKind, ComparisonParameters};

pub const KEY_OLD: &str = "old";
pub const KEY_SHA: &str = "sha";
pub const KEY_NEW: &str = "new";
pub const KEY_OLD_WORKLOAD: &str = "oldWorkload";
pub const KEY_NEW_WORKLOAD: &str = "newWorkload";

const HISTORY_LIMIT: usize = 64;

fn parse_pairs(query: &str) -> Vec<(String, String)> {
    let query = query.trim().trim_start_matches('?');
    form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

fn lookup<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Missing or undecodable parameters become empty strings; this never fails.
pub fn parse_params(kind: ComparisonKind, query: &str) -> ComparisonParameters {
    let pairs = parse_pairs(query);
    let alt_old_key = match kind {
        ComparisonKind::ForeignKeys => KEY_OLD,
        ComparisonKind::Macrobench => KEY_SHA,
    };
    let get = |key: &str| lookup(&pairs, key).unwrap_or_default().to_string();

    ComparisonParameters {
        old_ref: lookup(&pairs, kind.old_ref_key())
            .or_else(|| lookup(&pairs, alt_old_key))
            .unwrap_or_default()
            .to_string(),
        new_ref: get(KEY_NEW),
        old_workload: get(KEY_OLD_WORKLOAD),
        new_workload: get(KEY_NEW_WORKLOAD),
    }
}

/// Rewrites the controller's keys in `current`, keeping every other pair in
/// place. Keys not yet present are appended in a fixed order.
pub fn write_params(kind: ComparisonKind, current: &str, params: &ComparisonParameters) -> String {
    let ours: [(&str, &str); 4] = [
        (kind.old_ref_key(), params.old_ref.as_str()),
        (KEY_NEW, params.new_ref.as_str()),
        (KEY_OLD_WORKLOAD, params.old_workload.as_str()),
        (KEY_NEW_WORKLOAD, params.new_workload.as_str()),
    ];

    let mut written = [false; 4];
    let mut out = form_urlencoded::Serializer::new(String::new());
    for (k, v) in parse_pairs(current) {
        match ours.iter().position(|(key, _)| *key == k) {
            Some(i) if !written[i] => {
                out.append_pair(&k, ours[i].1);
                written[i] = true;
            }
            // Duplicate of one of our keys: drop it so hydration stays exact.
            Some(_) => {}
            None => {
                out.append_pair(&k, &v);
            }
        }
    }
    for (i, (key, value)) in ours.iter().enumerate() {
        if !written[i] {
            out.append_pair(key, value);
        }
    }
    out.finish()
}

/// In-memory address bar for one dashboard page.
#[derive(Clone, Debug)]
pub struct Location {
    page_url: String,
    query: String,
    back: Vec<String>,
}

impl Location {
    pub fn new(page_url: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            page_url: page_url.into(),
            query: query.into().trim().trim_start_matches('?').to_string(),
            back: Vec::new(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Shallow, non-reloading navigation; the last write wins.
    pub fn navigate(&mut self, query: String) {
        if query == self.query {
            return;
        }
        let prev = std::mem::replace(&mut self.query, query);
        self.back.push(prev);
        if self.back.len() > HISTORY_LIMIT {
            self.back.remove(0);
        }
        tracing::debug!(query = %self.query, "location updated");
    }

    pub fn history_len(&self) -> usize {
        self.back.len()
    }

    pub fn share_url(&self) -> String {
        if self.query.is_empty() {
            self.page_url.clone()
        } else {
            format!("{}?{}", self.page_url, self.query)
        }
    }
}

#[cfg(test)]
#[path = "tests/query_tests.rs"]
mod tests;
