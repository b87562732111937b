use anyhow::Result;

use crate::model::{ComparisonKind, DashboardConfig};

#[derive(Clone, Debug, Default)]
pub struct TuiRunOptions {
    pub config: DashboardConfig,
    pub kind: ComparisonKind,
    /// Initial query string, e.g. from a shared link.
    pub query: String,
    pub verbose: bool,
}

/// Runs the dashboard until the user quits. Returns the final shareable URL.
pub fn run_with_options(opts: TuiRunOptions) -> Result<String> {
    crate::tui_shell::run_with_options(opts)
}
