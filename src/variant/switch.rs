//! Backup creation and variant switching
//!
//! Auto-repair done while switching (defining a missing active map,
//! alternate or backup) is kept even if a later step of the same switch
//! fails.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::store::{MapValue, VariantSlot};
use super::Altmap;
use crate::error::Result;
use crate::keymap::Keymap;

/// Variant a switch copies into the active map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SwitchTarget {
    Alternate,
    Backup,
}

impl SwitchTarget {
    pub fn slot(self) -> VariantSlot {
        match self {
            SwitchTarget::Alternate => VariantSlot::Alternate,
            SwitchTarget::Backup => VariantSlot::Backup,
        }
    }
}

impl fmt::Display for SwitchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slot())
    }
}

impl FromStr for SwitchTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<VariantSlot>()? {
            VariantSlot::Alternate => Ok(SwitchTarget::Alternate),
            VariantSlot::Backup => Ok(SwitchTarget::Backup),
            VariantSlot::Active => Err("cannot switch a map to its own active variant".into()),
        }
    }
}

/// Which variants of a map exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MapState {
    Undefined,
    /// Alternate defined ahead of the map itself
    AlternateOnly,
    ActiveOnly,
    ActiveAndBackup,
    ActiveAndAlternate,
    Full,
}

impl Altmap {
    /// Save a copy of `name`'s active contents as its backup.
    ///
    /// Fails if the map has no active value or already has a backup.
    pub fn backup(&mut self, name: &str) -> Result<MapValue> {
        let active = self
            .store
            .get(name, VariantSlot::Active)
            .ok_or_else(|| self.not_defined(name, VariantSlot::Active))?;
        if self.store.exists(name, VariantSlot::Backup) {
            return Err(self.already_defined(name, VariantSlot::Backup));
        }

        let backup = MapValue::new(active.snapshot());
        let doc = Some(format!("Backup of {}", name));
        self.store.set(name, VariantSlot::Backup, backup.clone(), doc);
        tracing::info!(
            "Backed up {} as {}",
            name,
            self.config.variable_name(name, VariantSlot::Backup)
        );
        Ok(backup)
    }

    /// Copy `target`'s contents into `name`'s active map in place.
    ///
    /// Missing variants are defined on the fly when the matching
    /// `define_*_when_switching` flag is set, otherwise the switch fails with
    /// `NotDefined`.
    pub fn switch(&mut self, name: &str, target: SwitchTarget) -> Result<()> {
        if !self.store.exists(name, VariantSlot::Active) {
            if !self.config.define_mapvar_when_switching {
                return Err(self.not_defined(name, VariantSlot::Active));
            }
            tracing::warn!("{} is not defined, defining it as an empty keymap", name);
            let empty = MapValue::default();
            self.store.set(name, VariantSlot::Active, empty, None);
        }

        let slot = target.slot();
        if !self.store.exists(name, slot) {
            let variable = self.config.variable_name(name, slot);
            if !self.config.defines_when_switching(slot) {
                return Err(self.not_defined(name, slot));
            }
            tracing::warn!("{} is not defined, defining it", variable);
            match target {
                SwitchTarget::Alternate => {
                    self.define_alternate(name, |_| Keymap::sparse(), None)?;
                }
                SwitchTarget::Backup => {
                    self.backup(name)?;
                }
            }
        }

        let contents = self
            .store
            .get(name, slot)
            .map(|value| value.snapshot())
            .ok_or_else(|| self.not_defined(name, slot))?;
        let bindings = contents.len();
        if !self.store.mutate_contents(name, VariantSlot::Active, contents)? {
            return Err(self.not_defined(name, VariantSlot::Active));
        }

        tracing::info!(
            "Switched {} to {} ({} bindings)",
            name,
            self.config.variable_name(name, slot),
            bindings
        );
        Ok(())
    }

    /// Switch every map with a registered alternate, in name order.
    ///
    /// Stops at the first failure; maps already switched stay switched.
    pub fn switch_all(&mut self, target: SwitchTarget) -> Result<usize> {
        let names: Vec<String> = self.registry.names().map(str::to_string).collect();
        for name in &names {
            self.switch(name, target)?;
        }
        Ok(names.len())
    }

    /// Which variants of `name` currently exist
    pub fn state(&self, name: &str) -> MapState {
        let active = self.store.exists(name, VariantSlot::Active);
        let alternate = self.store.exists(name, VariantSlot::Alternate);
        let backup = self.store.exists(name, VariantSlot::Backup);

        match (active, alternate, backup) {
            (false, false, _) => MapState::Undefined,
            (false, true, _) => MapState::AlternateOnly,
            (true, false, false) => MapState::ActiveOnly,
            (true, false, true) => MapState::ActiveAndBackup,
            (true, true, false) => MapState::ActiveAndAlternate,
            (true, true, true) => MapState::Full,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AltmapConfig;
    use crate::error::AltmapError;
    use crate::keymap::Keystroke;
    use crate::variant::Declaration;

    fn altmap_with_active(config: AltmapConfig) -> (Altmap, MapValue) {
        let mut altmap = Altmap::new(config);
        let active = altmap
            .define_map("foo-map", Declaration::new().bind("a", "orig").unwrap())
            .unwrap();
        (altmap, active)
    }

    #[test]
    fn test_backup_requires_active() {
        let mut altmap = Altmap::default();
        let err = altmap.backup("foo-map").unwrap_err();
        assert!(matches!(err, AltmapError::NotDefined { ref variable, .. } if variable == "foo-map"));
    }

    #[test]
    fn test_backup_only_once() {
        let (mut altmap, _) = altmap_with_active(AltmapConfig::default());
        altmap.backup("foo-map").unwrap();

        let err = altmap.backup("foo-map").unwrap_err();
        assert!(matches!(
            err,
            AltmapError::AlreadyDefined { ref variable, .. } if variable == "backup-foo-map"
        ));
    }

    #[test]
    fn test_backup_is_a_detached_copy() {
        let (mut altmap, active) = altmap_with_active(AltmapConfig::default());
        let backup = altmap.backup("foo-map").unwrap();

        assert!(!backup.same_map(&active));
        active.update(|k| k.define_key(vec![Keystroke::char('a')], "changed"));
        assert_eq!(backup.contents().command_for(Keystroke::char('a')), Some("orig"));
    }

    #[test]
    fn test_switch_missing_alternate_without_repair() {
        let (mut altmap, active) = altmap_with_active(AltmapConfig::default());
        let err = altmap.switch("foo-map", SwitchTarget::Alternate).unwrap_err();

        assert!(matches!(err, AltmapError::NotDefined { ref variable, .. } if variable == "alt-foo-map"));
        assert_eq!(active.contents().command_for(Keystroke::char('a')), Some("orig"));
        assert_eq!(altmap.state("foo-map"), MapState::ActiveOnly);
    }

    #[test]
    fn test_partial_repair_is_kept_on_failure() {
        let config = AltmapConfig {
            define_mapvar_when_switching: true,
            ..AltmapConfig::default()
        };
        let mut altmap = Altmap::new(config);

        assert!(altmap.switch("foo-map", SwitchTarget::Backup).is_err());
        assert_eq!(altmap.state("foo-map"), MapState::ActiveOnly);
    }

    #[test]
    fn test_state_transitions() {
        let mut altmap = Altmap::default();
        assert_eq!(altmap.state("foo-map"), MapState::Undefined);

        altmap.declare_alternate("foo-map", Declaration::new()).unwrap();
        assert_eq!(altmap.state("foo-map"), MapState::AlternateOnly);

        altmap.define_map("foo-map", Declaration::new()).unwrap();
        assert_eq!(altmap.state("foo-map"), MapState::ActiveAndAlternate);

        altmap.backup("foo-map").unwrap();
        assert_eq!(altmap.state("foo-map"), MapState::Full);
    }

    #[test]
    fn test_target_parse() {
        assert_eq!("alternate".parse::<SwitchTarget>(), Ok(SwitchTarget::Alternate));
        assert_eq!("backup".parse::<SwitchTarget>(), Ok(SwitchTarget::Backup));
        assert!("active".parse::<SwitchTarget>().is_err());
    }
}
