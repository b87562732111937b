//! Global open-picker shortcuts.
//!
//! There is one router per app. Pickers are mounted into it while the
//! dashboard view is active and unmounted when it is left; key events are only
//! routed when nothing that accepts text has focus.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::error::ConfigError;
use crate::picker::PickerSide;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyChord {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyChord {
    /// Parses `"ctrl+k"`, `"alt+x"`, `"o"`, `"/"`.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: &str| ConfigError::Shortcut {
            chord: raw.to_string(),
            reason: reason.to_string(),
        };

        let raw_trimmed = raw.trim();
        if raw_trimmed.is_empty() {
            return Err(invalid("empty"));
        }

        let mut modifiers = KeyModifiers::NONE;
        let mut key: Option<&str> = None;
        // A lone "+" is a key, not a separator.
        let parts: Vec<&str> = if raw_trimmed == "+" {
            vec!["+"]
        } else {
            raw_trimmed.split('+').collect()
        };
        for (i, part) in parts.iter().enumerate() {
            let last = i + 1 == parts.len();
            if !last {
                match part.trim().to_lowercase().as_str() {
                    "ctrl" | "control" | "cmd" | "meta" => modifiers |= KeyModifiers::CONTROL,
                    "alt" | "option" => modifiers |= KeyModifiers::ALT,
                    "shift" => modifiers |= KeyModifiers::SHIFT,
                    _ => return Err(invalid("unknown modifier")),
                }
            } else {
                key = Some(part.trim());
            }
        }

        let key = key.unwrap_or_default();
        let mut chars = key.chars();
        let c = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => return Err(invalid("expected a single character key")),
        };
        // Shift on a letter is carried by its case, the way terminals report it.
        let code = if c.is_ascii_alphabetic() && modifiers.contains(KeyModifiers::SHIFT) {
            modifiers -= KeyModifiers::SHIFT;
            KeyCode::Char(c.to_ascii_uppercase())
        } else if c.is_ascii_alphabetic() {
            KeyCode::Char(c.to_ascii_lowercase())
        } else {
            KeyCode::Char(c)
        };
        Ok(Self { code, modifiers })
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        // The character already reflects Shift, both for letters ('O') and
        // symbols ('?'), so the modifier bit itself is not compared.
        let mods = key.modifiers - KeyModifiers::SHIFT;
        key.code == self.code && mods == (self.modifiers - KeyModifiers::SHIFT)
    }

    pub fn label(&self) -> String {
        let mut out = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            out.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            out.push_str("Alt+");
        }
        if let KeyCode::Char(c) = self.code {
            out.push(c);
        }
        out
    }
}

/// What currently owns keyboard input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusTarget {
    Dashboard,
    /// A picker search box or another text field.
    TextEntry,
}

#[derive(Debug, Default)]
pub struct ShortcutRouter {
    bindings: Vec<(PickerSide, KeyChord)>,
}

impl ShortcutRouter {
    pub fn mount(&mut self, side: PickerSide, chord: KeyChord) {
        self.unmount(side);
        tracing::debug!(?side, chord = %chord.label(), "mount picker shortcut");
        self.bindings.push((side, chord));
    }

    pub fn unmount(&mut self, side: PickerSide) {
        self.bindings.retain(|(s, _)| *s != side);
    }

    pub fn is_mounted(&self, side: PickerSide) -> bool {
        self.bindings.iter().any(|(s, _)| *s == side)
    }

    pub fn chord(&self, side: PickerSide) -> Option<KeyChord> {
        self.bindings
            .iter()
            .find(|(s, _)| *s == side)
            .map(|(_, c)| *c)
    }

    pub fn route(&self, key: &KeyEvent, focus: FocusTarget) -> Option<PickerSide> {
        if focus == FocusTarget::TextEntry {
            return None;
        }
        self.bindings
            .iter()
            .find(|(_, chord)| chord.matches(key))
            .map(|(side, _)| *side)
    }
}
