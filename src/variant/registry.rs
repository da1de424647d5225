//! Registry of maps that have an alternate

use std::collections::BTreeSet;

use super::store::{MapValue, VariantSlot, VariantStore};
use crate::config::AltmapConfig;
use crate::error::{AltmapError, Result};
use crate::keymap::Keymap;

/// Set of map names with a defined alternate
#[derive(Debug, Default)]
pub struct Registry {
    alternates: BTreeSet<String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define (or, when allowed, redefine) the alternate of `name`.
    ///
    /// `builder` receives a copy of the active contents taken before anything
    /// is mutated, or `None` when the map has no active value.
    pub fn define_alternate(
        &mut self,
        store: &mut VariantStore,
        config: &AltmapConfig,
        name: &str,
        builder: impl FnOnce(Option<Keymap>) -> Keymap,
        doc: Option<String>,
    ) -> Result<MapValue> {
        if store.exists(name, VariantSlot::Alternate) {
            let variable = config.variable_name(name, VariantSlot::Alternate);
            if !config.allow_redefine_alternate {
                return Err(AltmapError::AlreadyDefined {
                    name: name.to_string(),
                    variable,
                });
            }
            tracing::info!("Redefining {}", variable);
        }

        let snapshot = store.get(name, VariantSlot::Active).map(|v| v.snapshot());
        let value = MapValue::new(builder(snapshot));

        store.set(name, VariantSlot::Alternate, value.clone(), doc);
        self.alternates.insert(name.to_string());

        tracing::debug!(
            "Defined {} ({} bindings)",
            config.variable_name(name, VariantSlot::Alternate),
            value.contents().len()
        );
        Ok(value)
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.alternates.contains(name)
    }

    /// Registered map names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.alternates.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.alternates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alternates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::Keystroke;

    fn bind_a(command: &'static str) -> impl FnOnce(Option<Keymap>) -> Keymap {
        move |_| {
            let mut keymap = Keymap::sparse();
            keymap.define_key(vec![Keystroke::char('a')], command);
            keymap
        }
    }

    #[test]
    fn test_define_registers_name() {
        let mut store = VariantStore::new();
        let mut registry = Registry::new();
        let config = AltmapConfig::default();

        registry
            .define_alternate(&mut store, &config, "foo-map", bind_a("cmd1"), None)
            .unwrap();

        assert!(store.exists("foo-map", VariantSlot::Alternate));
        assert!(registry.is_registered("foo-map"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_redefine_rejected_when_disallowed() {
        let mut store = VariantStore::new();
        let mut registry = Registry::new();
        let config = AltmapConfig {
            allow_redefine_alternate: false,
            ..AltmapConfig::default()
        };

        registry
            .define_alternate(&mut store, &config, "foo-map", bind_a("cmd1"), None)
            .unwrap();
        let err = registry
            .define_alternate(&mut store, &config, "foo-map", bind_a("cmd2"), None)
            .unwrap_err();

        assert!(matches!(
            err,
            AltmapError::AlreadyDefined { ref variable, .. } if variable == "alt-foo-map"
        ));
        let alt = store.get("foo-map", VariantSlot::Alternate).unwrap();
        assert_eq!(alt.contents().command_for(Keystroke::char('a')), Some("cmd1"));
    }

    #[test]
    fn test_redefine_overwrites_when_allowed() {
        let mut store = VariantStore::new();
        let mut registry = Registry::new();
        let config = AltmapConfig::default();

        registry
            .define_alternate(&mut store, &config, "foo-map", bind_a("cmd1"), None)
            .unwrap();
        registry
            .define_alternate(&mut store, &config, "foo-map", bind_a("cmd2"), None)
            .unwrap();

        let alt = store.get("foo-map", VariantSlot::Alternate).unwrap();
        assert_eq!(alt.contents().command_for(Keystroke::char('a')), Some("cmd2"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_builder_sees_active_snapshot() {
        let mut store = VariantStore::new();
        let mut registry = Registry::new();
        let config = AltmapConfig::default();

        let mut active = Keymap::sparse();
        active.define_key(vec![Keystroke::char('x')], "orig");
        store.set("foo-map", VariantSlot::Active, MapValue::new(active), None);

        registry
            .define_alternate(
                &mut store,
                &config,
                "foo-map",
                |prior| {
                    let mut keymap = prior.expect("active snapshot");
                    keymap.define_key(vec![Keystroke::char('a')], "cmd1");
                    keymap
                },
                None,
            )
            .unwrap();

        let alt = store.get("foo-map", VariantSlot::Alternate).unwrap();
        assert_eq!(alt.contents().len(), 2);
        // The active map is untouched by building the alternate
        let active = store.get("foo-map", VariantSlot::Active).unwrap();
        assert_eq!(active.contents().len(), 1);
    }
}
