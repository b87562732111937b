//! Turns a raw comparison payload into grouped, display-ordered rows.

use std::collections::BTreeMap;

use crate::model::{
    ComparisonResult, Delta, FormattedComparisonResult, FormattedGroup, FormattedRow,
    MetricCategory, Trend,
};

/// Prefix taxonomy in display order. Anything else lands in `Other`.
const TAXONOMY: &[(&str, MetricCategory)] = &[
    ("qps", MetricCategory::Throughput),
    ("tps", MetricCategory::Throughput),
    ("latency", MetricCategory::Latency),
    ("errors", MetricCategory::Reliability),
    ("reconnects", MetricCategory::Reliability),
    ("cpu_time", MetricCategory::CpuTime),
    ("mem_alloc", MetricCategory::Memory),
];

/// Prefixes where a smaller value is the improvement.
const LOWER_IS_BETTER: &[&str] = &["latency", "errors", "reconnects", "cpu_time", "mem_alloc"];

fn split_metric(name: &str) -> (&str, Option<&str>) {
    match name.split_once('.') {
        Some((prefix, component)) => (prefix, Some(component)),
        None => (name, None),
    }
}

pub fn category_of(metric: &str) -> MetricCategory {
    let (prefix, _) = split_metric(metric);
    TAXONOMY
        .iter()
        .find(|(p, _)| *p == prefix)
        .map(|(_, c)| *c)
        .unwrap_or(MetricCategory::Other)
}

pub fn metric_label(metric: &str) -> String {
    let (prefix, component) = split_metric(metric);
    let base = match prefix {
        "qps" => "QPS",
        "tps" => "TPS",
        "latency" => "Latency",
        "errors" => "Errors",
        "reconnects" => "Reconnects",
        "cpu_time" => "CPU time",
        "mem_alloc" => "Memory allocated",
        _ => return metric.to_string(),
    };
    match component {
        None => base.to_string(),
        Some(c) if prefix == "qps" => format!("{} QPS", capitalize(c)),
        Some(c) => format!("{} ({})", base, c),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn delta(old: f64, new: f64) -> Delta {
    if old == 0.0 || !old.is_finite() || !new.is_finite() {
        return Delta::Undefined;
    }
    Delta::Defined((new - old) / old)
}

fn trend(metric: &str, delta: Delta) -> Trend {
    let Some(d) = delta.as_f64() else {
        return Trend::Unchanged;
    };
    if d == 0.0 {
        return Trend::Unchanged;
    }
    let (prefix, _) = split_metric(metric);
    let lower_is_better = LOWER_IS_BETTER.contains(&prefix);
    if (d < 0.0) == lower_is_better {
        Trend::Better
    } else {
        Trend::Worse
    }
}

/// Pure: same input, same output; the payload is only read.
pub fn format(raw: &ComparisonResult) -> FormattedComparisonResult {
    let mut grouped: BTreeMap<MetricCategory, Vec<FormattedRow>> = BTreeMap::new();
    for (metric, samples) in &raw.metrics {
        let d = delta(samples.old, samples.new);
        grouped
            .entry(category_of(metric))
            .or_default()
            .push(FormattedRow {
                metric: metric.clone(),
                label: metric_label(metric),
                old: samples.old,
                new: samples.new,
                delta: d,
                trend: trend(metric, d),
            });
    }

    let groups = grouped
        .into_iter()
        .map(|(category, mut rows)| {
            rows.sort_by(|a, b| a.metric.cmp(&b.metric));
            FormattedGroup {
                category,
                title: category.title().to_string(),
                rows,
            }
        })
        .collect();

    FormattedComparisonResult {
        old_workload: raw.old_workload.clone(),
        new_workload: raw.new_workload.clone(),
        groups,
    }
}

pub(crate) fn fmt_value(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{:.0}", v)
    } else {
        format!("{:.2}", v)
    }
}

/// Plain-text table, one line per row, grouped under category headings.
pub fn table_lines(formatted: &FormattedComparisonResult) -> Vec<String> {
    let width = formatted
        .groups
        .iter()
        .flat_map(|g| g.rows.iter())
        .map(|r| r.label.len())
        .max()
        .unwrap_or(0)
        .max(6);

    let mut out = Vec::new();
    out.push(format!(
        "{:<width$}  {:>14}  {:>14}  {:>9}",
        "metric",
        header_or(&formatted.old_workload, "old"),
        header_or(&formatted.new_workload, "new"),
        "delta",
        width = width
    ));
    for group in &formatted.groups {
        out.push(String::new());
        out.push(format!("[{}]", group.title));
        for row in &group.rows {
            out.push(format!(
                "{:<width$}  {:>14}  {:>14}  {:>9}",
                row.label,
                fmt_value(row.old),
                fmt_value(row.new),
                row.delta.display(),
                width = width
            ));
        }
    }
    out
}

pub(crate) fn header_or<'a>(workload: &'a str, fallback: &'a str) -> &'a str {
    if workload.is_empty() { fallback } else { workload }
}

#[cfg(test)]
#[path = "tests/format_tests.rs"]
mod tests;
