use serde::{Deserialize, Serialize};

/// Which comparison page the dashboard drives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonKind {
    #[default]
    #[serde(rename = "fk")]
    ForeignKeys,
    Macrobench,
}

impl ComparisonKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "fk" | "foreign-keys" | "foreignkeys" => Some(ComparisonKind::ForeignKeys),
            "macrobench" | "macro" => Some(ComparisonKind::Macrobench),
            _ => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ComparisonKind::ForeignKeys => "Foreign Keys",
            ComparisonKind::Macrobench => "Compare",
        }
    }

    /// Query key carrying `old_ref` in the address bar.
    pub fn old_ref_key(self) -> &'static str {
        match self {
            ComparisonKind::ForeignKeys => "sha",
            ComparisonKind::Macrobench => "old",
        }
    }

    pub fn uses_new_ref(self) -> bool {
        matches!(self, ComparisonKind::Macrobench)
    }

    pub fn uses_workloads(self) -> bool {
        matches!(self, ComparisonKind::ForeignKeys)
    }
}

/// The four user-controlled inputs of a comparison. Empty string means unset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonParameters {
    pub old_ref: String,
    pub new_ref: String,
    pub old_workload: String,
    pub new_workload: String,
}

impl ComparisonParameters {
    /// True once every ref the kind sends to the backend is set.
    pub fn is_ready(&self, kind: ComparisonKind) -> bool {
        match kind {
            ComparisonKind::ForeignKeys => !self.old_ref.is_empty(),
            ComparisonKind::Macrobench => !self.old_ref.is_empty() && !self.new_ref.is_empty(),
        }
    }
}

/// The part of the parameters a fetch depends on. A new fetch is issued only
/// when this changes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FetchKey {
    ForeignKeys {
        sha: String,
        old_workload: String,
        new_workload: String,
    },
    Macrobench {
        old: String,
        new: String,
    },
}

impl FetchKey {
    /// `None` while required refs are missing.
    pub fn derive(kind: ComparisonKind, params: &ComparisonParameters) -> Option<Self> {
        if !params.is_ready(kind) {
            return None;
        }
        Some(match kind {
            ComparisonKind::ForeignKeys => FetchKey::ForeignKeys {
                sha: params.old_ref.clone(),
                old_workload: params.old_workload.clone(),
                new_workload: params.new_workload.clone(),
            },
            ComparisonKind::Macrobench => FetchKey::Macrobench {
                old: params.old_ref.clone(),
                new: params.new_ref.clone(),
            },
        })
    }

    /// Endpoint path relative to the API base, with its query string.
    pub fn endpoint(&self) -> String {
        let mut ser = url::form_urlencoded::Serializer::new(String::new());
        let path = match self {
            FetchKey::ForeignKeys {
                sha,
                old_workload,
                new_workload,
            } => {
                ser.append_pair("sha", sha);
                ser.append_pair("oldWorkload", old_workload);
                ser.append_pair("newWorkload", new_workload);
                "fk/compare"
            }
            FetchKey::Macrobench { old, new } => {
                ser.append_pair("old", old);
                ser.append_pair("new", new);
                "macrobench/compare"
            }
        };
        format!("{}?{}", path, ser.finish())
    }
}
