//! Variant registry: active, alternate and backup values per named map
//!
//! # Architecture
//!
//! ```text
//! Declaration ─► Registry::define_alternate ─► VariantStore (Alternate)
//!                          Altmap::backup ─► VariantStore (Backup)
//!                          Altmap::switch ─► mutate Active contents in place
//! ```
//!
//! [`Altmap`] owns the store, the registry and the policy. Map values are
//! shared [`MapValue`] handles, so an editor can hold on to the active map
//! and see every switch without re-fetching it.

mod declaration;
mod definition;
mod registry;
mod store;
mod switch;

use std::path::{Path, PathBuf};

pub use declaration::{Declaration, DeclarationOptions, Statement};
pub use definition::{
    load_definition_file, parse_definitions, BindingEntry, DefinitionFile, MapEntry,
};
pub use registry::Registry;
pub use store::{MapValue, VariantRecord, VariantSlot, VariantStore};
pub use switch::{MapState, SwitchTarget};

use crate::config::AltmapConfig;
use crate::error::{AltmapError, Result};
use crate::keymap::{KeyAction, Keymap, Keystroke};
use crate::loader::DirectoryLoader;

/// Store, registry and policy for one set of swappable maps
#[derive(Debug, Default)]
pub struct Altmap {
    config: AltmapConfig,
    store: VariantStore,
    registry: Registry,
}

impl Altmap {
    pub fn new(config: AltmapConfig) -> Self {
        Self {
            config,
            store: VariantStore::new(),
            registry: Registry::new(),
        }
    }

    pub fn config(&self) -> &AltmapConfig {
        &self.config
    }

    pub fn store(&self) -> &VariantStore {
        &self.store
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Live handle of `name`'s active map
    pub fn active(&self, name: &str) -> Option<MapValue> {
        self.store.get(name, VariantSlot::Active)
    }

    /// Bind `name` to an existing handle.
    ///
    /// Only the first binding is accepted; later changes go through
    /// [`Altmap::switch`], which keeps the handle.
    pub fn set_active(&mut self, name: &str, value: MapValue, doc: Option<String>) -> Result<()> {
        if self.store.exists(name, VariantSlot::Active) {
            return Err(self.already_defined(name, VariantSlot::Active));
        }
        self.store.set(name, VariantSlot::Active, value, doc);
        Ok(())
    }

    /// Define `name`'s active map unless it already exists.
    ///
    /// An existing map is returned untouched.
    pub fn define_map(&mut self, name: &str, declaration: Declaration) -> Result<MapValue> {
        if let Some(existing) = self.active(name) {
            tracing::debug!("{} already defined, keeping it", name);
            return Ok(existing);
        }
        if declaration.options.copy_keymap {
            return Err(AltmapError::invalid(
                Some(name),
                "copy_keymap needs an existing map to copy",
            ));
        }

        let doc = declaration.doc.clone();
        let value = MapValue::new(declaration.build(None));
        self.store.set(name, VariantSlot::Active, value.clone(), doc);
        tracing::info!("Defined {} ({} bindings)", name, value.contents().len());
        Ok(value)
    }

    /// Define the alternate of `name` from a builder over the active contents
    pub fn define_alternate(
        &mut self,
        name: &str,
        builder: impl FnOnce(Option<Keymap>) -> Keymap,
        doc: Option<String>,
    ) -> Result<MapValue> {
        self.registry
            .define_alternate(&mut self.store, &self.config, name, builder, doc)
    }

    /// Define the alternate of `name` from a declaration
    pub fn declare_alternate(&mut self, name: &str, declaration: Declaration) -> Result<MapValue> {
        let doc = declaration.doc.clone();
        self.define_alternate(name, |prior| declaration.build(prior), doc)
    }

    /// Look up a key sequence in `name`'s active map
    pub fn lookup(&self, name: &str, keys: &[Keystroke]) -> KeyAction {
        self.active(name)
            .map(|value| value.contents().lookup(keys))
            .unwrap_or(KeyAction::NoMatch)
    }

    /// Documentation stored with a variant
    pub fn documentation(&self, name: &str, slot: VariantSlot) -> Option<&str> {
        self.store.documentation(name, slot)
    }

    /// Apply a parsed definition file: maps, then alternates, then backups
    pub fn apply_definitions(&mut self, file: DefinitionFile) -> Result<()> {
        for entry in file.maps {
            let (name, declaration) = entry.into_declaration()?;
            self.define_map(&name, declaration)?;
        }
        for entry in file.alternates {
            let (name, declaration) = entry.into_declaration()?;
            self.declare_alternate(&name, declaration)?;
        }
        for name in file.backups {
            self.backup(&name)?;
        }
        Ok(())
    }

    /// Read a definition file and apply it
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        tracing::info!("Loading definitions from {}", path.display());
        let file = load_definition_file(path)?;
        self.apply_definitions(file)
    }

    /// Load every definition file under `dir` in resolved order
    pub fn load_directory(&mut self, dir: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
        let loader = DirectoryLoader::new(self.config.definition_extension.clone());
        loader.load_directory(dir, recursive, &mut |path: &Path| self.load_file(path))
    }

    pub(crate) fn not_defined(&self, name: &str, slot: VariantSlot) -> AltmapError {
        AltmapError::NotDefined {
            name: name.to_string(),
            variable: self.config.variable_name(name, slot),
        }
    }

    pub(crate) fn already_defined(&self, name: &str, slot: VariantSlot) -> AltmapError {
        AltmapError::AlreadyDefined {
            name: name.to_string(),
            variable: self.config.variable_name(name, slot),
        }
    }
}
