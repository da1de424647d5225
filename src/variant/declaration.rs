//! Typed definition-time syntax for map variants
//!
//! A [`Declaration`] is a body of bind/unbind statements, an optional doc
//! string and [`DeclarationOptions`] choosing the value the body is applied to.

use crate::error::{AltmapError, Result};
use crate::keymap::{parse_key_sequence, Keymap, Keystroke, UNBOUND};

/// Options selecting the starting value of a declaration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeclarationOptions {
    /// Start from an empty full keymap instead of a sparse one
    pub full_keymap: bool,
    /// Start from a copy of the current active contents
    pub copy_keymap: bool,
}

/// One mutation applied to the starting value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Bind {
        keys: Vec<Keystroke>,
        command: String,
    },
    Unbind {
        keys: Vec<Keystroke>,
    },
}

impl Statement {
    /// Parse `keys` and pair it with `command`; `Unbound` yields an unbind
    pub fn parse(keys: &str, command: &str) -> Result<Self> {
        let keys = parse_key_sequence(keys).map_err(|e| AltmapError::invalid(None, e))?;
        if command == UNBOUND {
            Ok(Statement::Unbind { keys })
        } else {
            Ok(Statement::Bind {
                keys,
                command: command.to_string(),
            })
        }
    }

    fn apply(self, keymap: &mut Keymap) {
        match self {
            Statement::Bind { keys, command } => keymap.define_key(keys, command),
            Statement::Unbind { keys } => {
                keymap.remove(&keys);
            }
        }
    }
}

/// Body, documentation and options of a map definition
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declaration {
    pub body: Vec<Statement>,
    pub doc: Option<String>,
    pub options: DeclarationOptions,
}

impl Declaration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a binding statement (builder pattern)
    pub fn bind(mut self, keys: &str, command: &str) -> Result<Self> {
        self.body.push(Statement::parse(keys, command)?);
        Ok(self)
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn options(mut self, options: DeclarationOptions) -> Self {
        self.options = options;
        self
    }

    /// Starting value before the body runs.
    ///
    /// `copy_keymap` without an active value falls back to an empty map.
    pub fn initial_value(&self, prior: Option<Keymap>) -> Keymap {
        let empty = || {
            if self.options.full_keymap {
                Keymap::full()
            } else {
                Keymap::sparse()
            }
        };

        if self.options.copy_keymap {
            prior.unwrap_or_else(|| {
                tracing::debug!("copy_keymap requested without an active map, starting empty");
                empty()
            })
        } else {
            empty()
        }
    }

    /// Build the resulting contents from a snapshot of the active contents
    pub fn build(self, prior: Option<Keymap>) -> Keymap {
        let mut keymap = self.initial_value(prior);
        for statement in self.body {
            statement.apply(&mut keymap);
        }
        keymap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prior() -> Keymap {
        let mut keymap = Keymap::sparse();
        keymap.define_key(vec![Keystroke::char('x')], "orig-x");
        keymap.define_key(vec![Keystroke::char('b')], "orig-b");
        keymap
    }

    #[test]
    fn test_fresh_body_ignores_prior() {
        let keymap = Declaration::new()
            .bind("a", "cmd1")
            .unwrap()
            .build(Some(prior()));

        assert_eq!(keymap.len(), 1);
        assert_eq!(keymap.command_for(Keystroke::char('a')), Some("cmd1"));
    }

    #[test]
    fn test_copy_keymap_extends_prior() {
        let keymap = Declaration::new()
            .options(DeclarationOptions {
                copy_keymap: true,
                ..Default::default()
            })
            .bind("a", "cmd1")
            .unwrap()
            .bind("b", UNBOUND)
            .unwrap()
            .build(Some(prior()));

        assert_eq!(keymap.command_for(Keystroke::char('x')), Some("orig-x"));
        assert_eq!(keymap.command_for(Keystroke::char('a')), Some("cmd1"));
        assert_eq!(keymap.command_for(Keystroke::char('b')), None);
    }

    #[test]
    fn test_copy_without_prior_uses_kind() {
        let declaration = Declaration::new().options(DeclarationOptions {
            copy_keymap: true,
            full_keymap: true,
        });
        assert!(declaration.build(None).is_full());
    }

    #[test]
    fn test_full_keymap_option() {
        let declaration = Declaration::new().options(DeclarationOptions {
            full_keymap: true,
            ..Default::default()
        });
        assert!(declaration.build(Some(prior())).is_full());
    }

    #[test]
    fn test_bad_key_is_invalid_declaration() {
        let err = Declaration::new().bind("ctrl+", "cmd").unwrap_err();
        assert!(matches!(err, AltmapError::InvalidDeclaration { .. }));
    }
}
