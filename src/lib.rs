pub mod compare;
pub mod error;
pub mod format;
pub mod logging;
pub mod model;
pub mod picker;
pub mod query;
pub mod refs;
pub mod remote;
pub mod shortcuts;
pub mod tui;

mod tui_shell;
