//! altmap - swappable key-binding maps
//!
//! Each named map can carry an alternate and a backup variant next to its
//! active contents. Switching copies a variant's contents into the active
//! map in place, so every holder of the active handle sees the change.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod error;
pub mod keymap;
pub mod loader;
pub mod report;
pub mod tracing;
pub mod variant;

// Re-export commonly used types
pub use config::AltmapConfig;
pub use error::AltmapError;
pub use keymap::{Keymap, Keystroke};
pub use loader::DirectoryLoader;
pub use variant::{Altmap, Declaration, MapValue, SwitchTarget, VariantSlot};
