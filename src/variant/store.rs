//! Associative storage of map variants keyed by (map name, slot)
//!
//! The store does no validation. Policy (what may be overwritten, what
//! must exist first) lives in the registry and the switch engine.

use std::cell::{BorrowMutError, Ref, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use serde::Serialize;

use crate::error::{AltmapError, Result};
use crate::keymap::Keymap;

/// One of the three variants a map can have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantSlot {
    Active,
    Alternate,
    Backup,
}

impl VariantSlot {
    pub const ALL: [VariantSlot; 3] = [
        VariantSlot::Active,
        VariantSlot::Alternate,
        VariantSlot::Backup,
    ];
}

impl fmt::Display for VariantSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariantSlot::Active => write!(f, "active"),
            VariantSlot::Alternate => write!(f, "alternate"),
            VariantSlot::Backup => write!(f, "backup"),
        }
    }
}

impl std::str::FromStr for VariantSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(VariantSlot::Active),
            "alternate" | "alt" => Ok(VariantSlot::Alternate),
            "backup" | "bkp" => Ok(VariantSlot::Backup),
            _ => Err(format!("unknown variant: {}", s)),
        }
    }
}

/// Shared handle to keymap contents.
///
/// Cloning the handle shares the contents; the allocation is the map's
/// identity. Replacing contents through any clone is visible to all of them.
#[derive(Clone, Default)]
pub struct MapValue(Rc<RefCell<Keymap>>);

impl MapValue {
    pub fn new(contents: Keymap) -> Self {
        Self(Rc::new(RefCell::new(contents)))
    }

    /// Borrow the current contents.
    ///
    /// While the returned `Ref` is alive the contents cannot be replaced;
    /// a switch on this map fails with [`AltmapError::Borrowed`].
    pub fn contents(&self) -> Ref<'_, Keymap> {
        self.0.borrow()
    }

    /// Copy of the current contents
    pub fn snapshot(&self) -> Keymap {
        self.0.borrow().clone()
    }

    /// Replace the contents in place, keeping this handle's identity.
    ///
    /// Fails without touching the contents while they are borrowed.
    pub fn replace_contents(&self, contents: Keymap) -> Result<(), BorrowMutError> {
        *self.0.try_borrow_mut()? = contents;
        Ok(())
    }

    /// Mutate the contents in place.
    ///
    /// Panics if the contents are borrowed through [`MapValue::contents`].
    pub fn update<R>(&self, f: impl FnOnce(&mut Keymap) -> R) -> R {
        f(&mut self.0.borrow_mut())
    }

    /// Whether two handles refer to the same map
    pub fn same_map(&self, other: &MapValue) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for MapValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MapValue")
            .field(&Rc::as_ptr(&self.0))
            .field(&*self.0.borrow())
            .finish()
    }
}

/// A stored variant and its metadata
#[derive(Debug, Clone)]
pub struct VariantRecord {
    pub name: String,
    pub slot: VariantSlot,
    pub value: MapValue,
    pub doc: Option<String>,
}

/// Dumb associative store of variant records
#[derive(Debug, Default)]
pub struct VariantStore {
    records: HashMap<(String, VariantSlot), VariantRecord>,
}

impl VariantStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle stored in `slot` of `name`
    pub fn get(&self, name: &str, slot: VariantSlot) -> Option<MapValue> {
        self.record(name, slot).map(|r| r.value.clone())
    }

    pub fn record(&self, name: &str, slot: VariantSlot) -> Option<&VariantRecord> {
        self.records.get(&(name.to_string(), slot))
    }

    /// Store `value` in `slot` of `name`, overwriting unconditionally
    pub fn set(&mut self, name: &str, slot: VariantSlot, value: MapValue, doc: Option<String>) {
        tracing::debug!(map = name, %slot, bindings = value.contents().len(), "store set");
        self.records.insert(
            (name.to_string(), slot),
            VariantRecord {
                name: name.to_string(),
                slot,
                value,
                doc,
            },
        );
    }

    pub fn exists(&self, name: &str, slot: VariantSlot) -> bool {
        self.records.contains_key(&(name.to_string(), slot))
    }

    /// Replace the contents of a stored value in place.
    ///
    /// Returns `Ok(false)` when nothing is stored in that slot.
    pub fn mutate_contents(
        &self,
        name: &str,
        slot: VariantSlot,
        contents: Keymap,
    ) -> Result<bool> {
        let Some(record) = self.record(name, slot) else {
            return Ok(false);
        };
        tracing::debug!(map = name, %slot, bindings = contents.len(), "store mutate");
        record
            .value
            .replace_contents(contents)
            .map_err(|_| AltmapError::Borrowed {
                name: name.to_string(),
            })?;
        Ok(true)
    }

    pub fn documentation(&self, name: &str, slot: VariantSlot) -> Option<&str> {
        self.record(name, slot).and_then(|r| r.doc.as_deref())
    }

    /// Names with at least one stored variant, sorted
    pub fn map_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.records.keys().map(|(n, _)| n.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}
