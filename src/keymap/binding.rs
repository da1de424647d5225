//! Keybinding struct representing a mapping from keystroke(s) to a command name

use serde::Serialize;

use super::types::Keystroke;

/// Command name a map uses to drop an inherited binding
pub const UNBOUND: &str = "Unbound";

/// A single keybinding mapping one or more keystrokes to a command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Keybinding {
    /// The keystroke sequence (usually 1, more for chords)
    pub keystrokes: Vec<Keystroke>,
    /// Editor-defined command name; never interpreted here
    pub command: String,
}

impl Keybinding {
    /// Create a single-keystroke binding
    pub fn new(keystroke: Keystroke, command: impl Into<String>) -> Self {
        Self::chord(vec![keystroke], command)
    }

    /// Create a chord binding (multi-keystroke sequence)
    pub fn chord(keystrokes: Vec<Keystroke>, command: impl Into<String>) -> Self {
        Self {
            keystrokes,
            command: command.into(),
        }
    }

    pub fn is_chord(&self) -> bool {
        self.keystrokes.len() > 1
    }

    /// Whether this binding removes rather than binds
    pub fn is_unbound(&self) -> bool {
        self.command == UNBOUND
    }

    /// Key sequence in definition-file syntax, e.g. `ctrl+k ctrl+c`
    pub fn key_string(&self) -> String {
        self.keystrokes
            .iter()
            .map(|k| k.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::types::{KeyCode, Modifiers};

    #[test]
    fn test_chord_key_string() {
        let ctrl_k = Keystroke::new(KeyCode::Char('k'), Modifiers::CTRL);
        let ctrl_c = Keystroke::new(KeyCode::Char('c'), Modifiers::CTRL);
        let binding = Keybinding::chord(vec![ctrl_k, ctrl_c], "comment");

        assert!(binding.is_chord());
        assert_eq!(binding.key_string(), "ctrl+k ctrl+c");
    }

    #[test]
    fn test_unbound_marker() {
        assert!(Keybinding::new(Keystroke::char('a'), UNBOUND).is_unbound());
        assert!(!Keybinding::new(Keystroke::char('a'), "cmd1").is_unbound());
    }
}
