//! Ordered loading of definition files from a directory tree
//!
//! Each directory is resolved on its own:
//! - names starting with `.` or `_` are ignored, except the order file
//! - an order file (`.altmap`) lists the entries to load, in order
//! - without one, entries load in lexicographic order
//!
//! Subdirectories are entered when loading recursively, or when the order
//! file of their parent names them. A directory reached a second time,
//! through `.`, `..` or a symlink, is skipped with a warning.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AltmapError, Result};

/// Name of the per-directory order file
pub const ORDER_FILE: &str = ".altmap";

/// Resolves definition sources and hands them to a load callback
#[derive(Debug, Clone)]
pub struct DirectoryLoader {
    extension: String,
}

/// Entries of one directory in load order
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ResolvedDir {
    pub entries: Vec<PathBuf>,
    /// Whether an order file decided the entries
    pub ordered: bool,
}

impl DirectoryLoader {
    /// Loader for files ending in `.{extension}`
    pub fn new(extension: impl Into<String>) -> Self {
        let extension = extension.into();
        Self {
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Call `load_file` for every source under `dir` in resolved order.
    ///
    /// Returns the loaded paths. The first callback error aborts loading.
    pub fn load_directory<F>(
        &self,
        dir: &Path,
        recursive: bool,
        load_file: &mut F,
    ) -> Result<Vec<PathBuf>>
    where
        F: FnMut(&Path) -> Result<()>,
    {
        let mut loaded = Vec::new();
        let mut visited = HashSet::new();
        self.load_into(dir, recursive, load_file, &mut loaded, &mut visited)?;
        tracing::debug!("Loaded {} files from {}", loaded.len(), dir.display());
        Ok(loaded)
    }

    fn load_into<F>(
        &self,
        dir: &Path,
        recursive: bool,
        load_file: &mut F,
        loaded: &mut Vec<PathBuf>,
        visited: &mut HashSet<PathBuf>,
    ) -> Result<()>
    where
        F: FnMut(&Path) -> Result<()>,
    {
        let canonical = fs::canonicalize(dir).map_err(|e| AltmapError::io(dir, e))?;
        if !visited.insert(canonical) {
            tracing::warn!("Skipping {}, already loaded", dir.display());
            return Ok(());
        }
        let resolved = self.resolve(dir)?;

        for path in resolved.entries {
            if path.is_dir() {
                if recursive || resolved.ordered {
                    self.load_into(&path, recursive, load_file, loaded, visited)?;
                }
            } else if path.is_file() && self.is_source(&path) {
                tracing::debug!("Loading {}", path.display());
                load_file(&path)?;
                loaded.push(path);
            } else if resolved.ordered && !path.exists() {
                tracing::warn!(
                    "{} lists {}, which does not exist",
                    dir.join(ORDER_FILE).display(),
                    path.display()
                );
            }
        }
        Ok(())
    }

    /// List the entries of `dir` in load order
    pub fn resolve(&self, dir: &Path) -> Result<ResolvedDir> {
        let mut has_order_file = false;
        let mut entries = Vec::new();

        for entry in fs::read_dir(dir).map_err(|e| AltmapError::io(dir, e))? {
            let entry = entry.map_err(|e| AltmapError::io(dir, e))?;
            let name = entry.file_name();
            let name = name.to_string_lossy();

            if name == ORDER_FILE {
                has_order_file = true;
            } else if !name.starts_with('.') && !name.starts_with('_') {
                entries.push(entry.path());
            }
        }

        if !has_order_file {
            entries.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
            return Ok(ResolvedDir {
                entries,
                ordered: false,
            });
        }

        let order_path = dir.join(ORDER_FILE);
        let content =
            fs::read_to_string(&order_path).map_err(|e| AltmapError::io(&order_path, e))?;
        let entries = parse_order_list(&content)
            .into_iter()
            .map(|name| self.resolve_listed(dir, name))
            .collect();

        Ok(ResolvedDir {
            entries,
            ordered: true,
        })
    }

    /// Listed names that are neither directories nor carry the extension
    /// get it appended
    fn resolve_listed(&self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        if path.is_dir() || self.is_source(&path) {
            path
        } else {
            dir.join(format!("{}.{}", name, self.extension))
        }
    }

    fn is_source(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.strip_suffix(self.extension.as_str()))
            .is_some_and(|stem| stem.len() > 1 && stem.ends_with('.'))
    }
}

impl Default for DirectoryLoader {
    fn default() -> Self {
        Self::new("yaml")
    }
}

/// Split an order file into entry names.
///
/// The list is flat; parentheses and double quotes around names are
/// accepted and dropped.
pub fn parse_order_list(content: &str) -> Vec<&str> {
    content
        .split(|c: char| c.is_whitespace() || c == '(' || c == ')')
        .map(|token| token.trim_matches('"'))
        .filter(|token| !token.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_list() {
        assert_eq!(parse_order_list("a.src b.src\n  c"), vec!["a.src", "b.src", "c"]);
    }

    #[test]
    fn test_parse_quoted_list() {
        assert_eq!(parse_order_list("\"a.src b.src\""), vec!["a.src", "b.src"]);
        assert_eq!(
            parse_order_list("(\"b.src\" \"a.src\")"),
            vec!["b.src", "a.src"]
        );
    }

    #[test]
    fn test_is_source() {
        let loader = DirectoryLoader::new(".src");
        assert_eq!(loader.extension(), "src");
        assert!(loader.is_source(Path::new("dir/a.src")));
        assert!(!loader.is_source(Path::new("dir/readme.txt")));
        assert!(!loader.is_source(Path::new("dir/asrc")));
        assert!(!loader.is_source(Path::new("dir/.src")));
    }
}
