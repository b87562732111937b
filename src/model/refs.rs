use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefEntry {
    pub name: String,
    pub commit_hash: String,
}

impl RefEntry {
    pub fn new(name: impl Into<String>, commit_hash: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            commit_hash: commit_hash.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RefGroup {
    Branches,
    Tags,
}

impl RefGroup {
    pub fn heading(self) -> &'static str {
        match self {
            RefGroup::Branches => "Branches",
            RefGroup::Tags => "Releases",
        }
    }
}

/// Snapshot of known branches and tags. Replaced wholesale on refresh, never
/// edited in place.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefCatalog {
    #[serde(default)]
    pub branches: Vec<RefEntry>,
    #[serde(default)]
    pub tags: Vec<RefEntry>,
}

impl RefCatalog {
    pub fn is_empty(&self) -> bool {
        self.branches.is_empty() && self.tags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.branches.len() + self.tags.len()
    }

    /// Entries in display order: every branch, then every tag.
    pub fn entries(&self) -> impl Iterator<Item = (RefGroup, &RefEntry)> {
        self.branches
            .iter()
            .map(|e| (RefGroup::Branches, e))
            .chain(self.tags.iter().map(|e| (RefGroup::Tags, e)))
    }
}
