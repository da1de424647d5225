//! YAML definition files
//!
//! ```yaml
//! maps:
//!   - name: foo-map
//!     bind:
//!       - { key: "a", command: self-insert }
//! alternates:
//!   - name: foo-map
//!     doc: Alternate foo bindings
//!     copy_keymap: true
//!     bind:
//!       - { key: "a", command: cmd1 }
//!       - { key: "b", command: Unbound }
//! backups: [foo-map]
//! ```

use std::path::Path;

use serde::Deserialize;

use super::declaration::{Declaration, DeclarationOptions, Statement};
use crate::error::{AltmapError, Result};

/// Root structure of a definition file
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefinitionFile {
    /// Active maps, defined only when missing
    pub maps: Vec<MapEntry>,
    /// Alternates, passed to `define_alternate`
    pub alternates: Vec<MapEntry>,
    /// Maps to back up
    pub backups: Vec<String>,
}

/// A single map declaration from YAML
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MapEntry {
    pub name: String,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub full_keymap: bool,
    #[serde(default)]
    pub copy_keymap: bool,
    #[serde(default)]
    pub bind: Vec<BindingEntry>,
}

/// A single binding statement from YAML
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BindingEntry {
    pub key: String,
    pub command: String,
}

impl MapEntry {
    /// Convert into a typed declaration, validating every key string
    pub fn into_declaration(self) -> Result<(String, Declaration)> {
        let body = self
            .bind
            .iter()
            .map(|b| Statement::parse(&b.key, &b.command))
            .collect::<Result<Vec<_>>>()
            .map_err(|e| match e {
                AltmapError::InvalidDeclaration { reason, .. } => {
                    AltmapError::invalid(Some(&self.name), reason)
                }
                other => other,
            })?;

        let declaration = Declaration {
            body,
            doc: self.doc,
            options: DeclarationOptions {
                full_keymap: self.full_keymap,
                copy_keymap: self.copy_keymap,
            },
        };
        Ok((self.name, declaration))
    }
}

/// Parse a definition file from a YAML string
pub fn parse_definitions(yaml: &str) -> Result<DefinitionFile> {
    if yaml.trim().is_empty() {
        return Ok(DefinitionFile::default());
    }
    serde_yaml::from_str(yaml).map_err(|e| AltmapError::invalid(None, e.to_string()))
}

/// Read and parse a definition file
pub fn load_definition_file(path: &Path) -> Result<DefinitionFile> {
    let content = std::fs::read_to_string(path).map_err(|e| AltmapError::io(path, e))?;
    parse_definitions(&content).map_err(|e| match e {
        AltmapError::InvalidDeclaration { name, reason } => AltmapError::InvalidDeclaration {
            name,
            reason: format!("{}: {}", path.display(), reason),
        },
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_file() {
        let yaml = r#"
maps:
  - name: foo-map
    doc: Foo bindings
    bind:
      - { key: "a", command: self-insert }
alternates:
  - name: foo-map
    copy_keymap: true
    bind:
      - { key: "a", command: cmd1 }
      - { key: "ctrl+k ctrl+c", command: comment }
backups: [foo-map]
"#;

        let file = parse_definitions(yaml).unwrap();
        assert_eq!(file.maps.len(), 1);
        assert_eq!(file.backups, vec!["foo-map".to_string()]);

        let entry = file.alternates.into_iter().next().unwrap();
        let (name, declaration) = entry.into_declaration().unwrap();
        assert_eq!(name, "foo-map");
        assert!(declaration.options.copy_keymap);
        assert_eq!(declaration.body.len(), 2);
    }

    #[test]
    fn test_empty_file_is_valid() {
        let file = parse_definitions("  \n").unwrap();
        assert!(file.maps.is_empty() && file.alternates.is_empty());
    }

    #[test]
    fn test_unknown_option_rejected() {
        let yaml = r#"
alternates:
  - name: foo-map
    sparse: true
"#;
        let err = parse_definitions(yaml).unwrap_err();
        assert!(matches!(err, AltmapError::InvalidDeclaration { .. }));
    }

    #[test]
    fn test_missing_option_argument_rejected() {
        let yaml = r#"
alternates:
  - name: foo-map
    copy_keymap:
"#;
        assert!(parse_definitions(yaml).is_err());
    }

    #[test]
    fn test_non_declaration_item_rejected() {
        let yaml = r#"
alternates:
  - name: foo-map
    bind:
      - "a cmd1"
"#;
        assert!(parse_definitions(yaml).is_err());
    }

    #[test]
    fn test_bad_key_names_the_map() {
        let yaml = r#"
alternates:
  - name: foo-map
    bind:
      - { key: "ctrl+nope", command: cmd1 }
"#;
        let entry = parse_definitions(yaml).unwrap().alternates.remove(0);
        let err = entry.into_declaration().unwrap_err();
        assert!(err.to_string().contains("for foo-map"));
    }
}
