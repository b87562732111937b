use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricSamples {
    pub old: f64,
    pub new: f64,
}

/// Comparison payload as returned by the backend.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    #[serde(default)]
    pub old_workload: String,
    #[serde(default)]
    pub new_workload: String,
    #[serde(default)]
    pub metrics: HashMap<String, MetricSamples>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricCategory {
    Throughput,
    Latency,
    Reliability,
    CpuTime,
    Memory,
    Other,
}

impl MetricCategory {
    pub fn title(self) -> &'static str {
        match self {
            MetricCategory::Throughput => "Throughput",
            MetricCategory::Latency => "Latency",
            MetricCategory::Reliability => "Reliability",
            MetricCategory::CpuTime => "CPU time",
            MetricCategory::Memory => "Memory",
            MetricCategory::Other => "Other",
        }
    }
}

/// Relative change `(new - old) / old`; undefined when `old == 0`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Delta {
    Defined(f64),
    Undefined,
}

impl Delta {
    pub fn as_f64(self) -> Option<f64> {
        match self {
            Delta::Defined(v) => Some(v),
            Delta::Undefined => None,
        }
    }

    pub fn display(self) -> String {
        match self {
            Delta::Defined(v) => format!("{:+.2}%", v * 100.0),
            Delta::Undefined => "n/a".to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Better,
    Worse,
    Unchanged,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FormattedRow {
    pub metric: String,
    pub label: String,
    pub old: f64,
    pub new: f64,
    pub delta: Delta,
    pub trend: Trend,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FormattedGroup {
    pub category: MetricCategory,
    pub title: String,
    pub rows: Vec<FormattedRow>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FormattedComparisonResult {
    pub old_workload: String,
    pub new_workload: String,
    pub groups: Vec<FormattedGroup>,
}

impl FormattedComparisonResult {
    pub fn row_count(&self) -> usize {
        self.groups.iter().map(|g| g.rows.len()).sum()
    }
}
