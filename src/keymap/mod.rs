//! Keymap contents and keystroke primitives
//!
//! A [`Keymap`] is the mutable body of a map value: an ordered list of
//! keybindings routing keystroke sequences to editor command names.
//! Command names are opaque here; the editor decides what they do.
//!
//! ```text
//! "ctrl+k ctrl+c" → parse_key_sequence() → [Keystroke] → Keymap::lookup() → KeyAction
//! ```

mod binding;
#[allow(clippy::module_inception)]
mod keymap;
mod parse;
mod types;

pub use binding::{Keybinding, UNBOUND};
pub use keymap::{KeyAction, Keymap, KeymapKind};
pub use parse::{parse_key_sequence, parse_key_string};
pub use types::{KeyCode, Keystroke, Modifiers};
