//! Error type shared by the store, switch engine and directory loader

use std::path::PathBuf;

/// Errors raised by altmap operations.
///
/// Variant errors carry both the map name and the variable name derived
/// from the configured prefixes (`alt-foo-map`, `backup-foo-map`).
#[derive(Debug, thiserror::Error)]
pub enum AltmapError {
    #[error("{variable} is not defined (map {name})")]
    NotDefined { name: String, variable: String },

    #[error("{variable} is already defined (map {name})")]
    AlreadyDefined { name: String, variable: String },

    #[error("map {name} is borrowed and cannot be changed")]
    Borrowed { name: String },

    #[error("invalid declaration{}: {reason}", for_map(.name))]
    InvalidDeclaration {
        name: Option<String>,
        reason: String,
    },

    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AltmapError {
    pub(crate) fn invalid(name: Option<&str>, reason: impl Into<String>) -> Self {
        AltmapError::InvalidDeclaration {
            name: name.map(str::to_string),
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AltmapError::Io {
            path: path.into(),
            source,
        }
    }
}

fn for_map(name: &Option<String>) -> String {
    name.as_deref()
        .map(|n| format!(" for {}", n))
        .unwrap_or_default()
}

pub type Result<T, E = AltmapError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_map_and_variable() {
        let err = AltmapError::NotDefined {
            name: "foo-map".into(),
            variable: "alt-foo-map".into(),
        };
        assert_eq!(err.to_string(), "alt-foo-map is not defined (map foo-map)");
    }

    #[test]
    fn test_invalid_declaration_message() {
        let err = AltmapError::invalid(Some("foo-map"), "unknown field `colour`");
        assert_eq!(
            err.to_string(),
            "invalid declaration for foo-map: unknown field `colour`"
        );
        assert_eq!(
            AltmapError::invalid(None, "bad").to_string(),
            "invalid declaration: bad"
        );
    }
}
