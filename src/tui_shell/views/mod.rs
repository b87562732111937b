mod comparison;

pub(in crate::tui_shell) use comparison::render_comparison;
