//! Keymap contents: the mutable body of a map value

use serde::Serialize;

use super::binding::Keybinding;
use super::types::Keystroke;

/// Result of looking up a key sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Execute this command
    Execute(String),
    /// Sequence is a prefix of a chord, await more input
    AwaitMore,
    /// No binding matches this sequence
    NoMatch,
}

/// How a keymap was created
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeymapKind {
    /// Only explicitly bound keys are present
    #[default]
    Sparse,
    /// Covers the whole character range; unbound characters are explicit gaps
    Full,
}

/// Ordered keybindings plus the kind they were created with.
///
/// Later bindings for the same key sequence replace earlier ones, so the
/// list never holds two entries with equal keystrokes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Keymap {
    kind: KeymapKind,
    bindings: Vec<Keybinding>,
}

impl Keymap {
    /// Create an empty sparse keymap
    pub fn sparse() -> Self {
        Self::default()
    }

    /// Create an empty full keymap
    pub fn full() -> Self {
        Self {
            kind: KeymapKind::Full,
            bindings: Vec::new(),
        }
    }

    /// Create a sparse keymap with the given bindings
    pub fn with_bindings(bindings: Vec<Keybinding>) -> Self {
        let mut keymap = Self::sparse();
        for binding in bindings {
            keymap.add_binding(binding);
        }
        keymap
    }

    pub fn kind(&self) -> KeymapKind {
        self.kind
    }

    pub fn is_full(&self) -> bool {
        self.kind == KeymapKind::Full
    }

    /// Add a binding, replacing any binding for the same sequence.
    ///
    /// A binding whose command is `Unbound` removes the sequence instead.
    pub fn add_binding(&mut self, binding: Keybinding) {
        if binding.keystrokes.is_empty() {
            return;
        }

        if binding.is_unbound() {
            self.bindings.retain(|b| b.keystrokes != binding.keystrokes);
            return;
        }

        match self
            .bindings
            .iter_mut()
            .find(|b| b.keystrokes == binding.keystrokes)
        {
            Some(existing) => existing.command = binding.command,
            None => self.bindings.push(binding),
        }
    }

    /// Bind a key sequence to a command
    pub fn define_key(&mut self, keystrokes: Vec<Keystroke>, command: impl Into<String>) {
        self.add_binding(Keybinding::chord(keystrokes, command));
    }

    /// Remove the binding for a key sequence, returning whether one existed
    pub fn remove(&mut self, keystrokes: &[Keystroke]) -> bool {
        let before = self.bindings.len();
        self.bindings.retain(|b| b.keystrokes != keystrokes);
        self.bindings.len() != before
    }

    /// Look up a (possibly partial) key sequence
    pub fn lookup(&self, keystrokes: &[Keystroke]) -> KeyAction {
        if keystrokes.is_empty() {
            return KeyAction::NoMatch;
        }

        if let Some(binding) = self.bindings.iter().find(|b| b.keystrokes == keystrokes) {
            return KeyAction::Execute(binding.command.clone());
        }

        let is_prefix = self.bindings.iter().any(|b| {
            b.keystrokes.len() > keystrokes.len() && b.keystrokes[..keystrokes.len()] == *keystrokes
        });

        if is_prefix {
            KeyAction::AwaitMore
        } else {
            KeyAction::NoMatch
        }
    }

    /// Command bound to a single keystroke, if any
    pub fn command_for(&self, keystroke: Keystroke) -> Option<&str> {
        self.bindings
            .iter()
            .find(|b| b.keystrokes.len() == 1 && b.keystrokes[0] == keystroke)
            .map(|b| b.command.as_str())
    }

    pub fn bindings(&self) -> &[Keybinding] {
        &self.bindings
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
