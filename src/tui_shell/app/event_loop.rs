use super::*;

pub(super) fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        app.drain_outcomes();

        terminal
            .draw(|f| super::render::draw(f, app))
            .context("draw")?;
        if app.quit {
            return Ok(());
        }

        if event::poll(Duration::from_millis(50)).context("poll")? {
            match event::read().context("read event")? {
                Event::Key(k) if k.kind == KeyEventKind::Press => handle_key(app, k),
                _ => {}
            }
        }
    }
}

pub(super) fn handle_key(app: &mut App, key: KeyEvent) {
    if let Some(side) = app.open_picker().map(|p| p.side()) {
        handle_picker_key(app, side, key);
        return;
    }

    if let Some(side) = app.shortcuts.route(&key, app.focus()) {
        app.picker_mut(side).open_requested();
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.quit = true;
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.quit = true;
        }
        KeyCode::Char('w') => app.cycle_workload(PickerSide::Old),
        KeyCode::Char('W') => app.cycle_workload(PickerSide::New),
        KeyCode::Char('r') => app.reload(),
        KeyCode::Char('R') => app.reload_catalog(),
        KeyCode::Up => {
            app.scroll = app.scroll.saturating_sub(1);
        }
        KeyCode::Down => {
            app.scroll += 1;
        }
        KeyCode::PageUp => {
            app.scroll = app.scroll.saturating_sub(10);
        }
        KeyCode::PageDown => {
            app.scroll += 10;
        }
        _ => {}
    }
}

fn handle_picker_key(app: &mut App, side: PickerSide, key: KeyEvent) {
    let catalog = app.catalog.clone();
    let picker = app.picker_mut(side);

    let emitted = match key.code {
        KeyCode::Esc => {
            picker.dismiss();
            None
        }
        KeyCode::Enter => picker.confirm(catalog.as_deref()),
        KeyCode::Up => {
            picker.move_highlight(catalog.as_deref(), false);
            None
        }
        KeyCode::Down | KeyCode::Tab => {
            picker.move_highlight(catalog.as_deref(), true);
            None
        }
        KeyCode::Backspace => {
            picker.pop_char();
            None
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            picker.text_changed("");
            None
        }
        KeyCode::Char(c)
            if !key.modifiers.contains(KeyModifiers::CONTROL)
                && !key.modifiers.contains(KeyModifiers::ALT) =>
        {
            picker.push_char(c);
            None
        }
        _ => None,
    };

    if let Some(value) = emitted {
        app.emit_ref(side, value);
    }
}
