use anyhow::Result;

mod app;

mod modal;
mod view;
mod views;

use view::{RenderCtx, render_view_chrome};

pub(crate) fn run_with_options(opts: crate::tui::TuiRunOptions) -> Result<String> {
    app::run(opts)
}
