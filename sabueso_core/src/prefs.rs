//! Persisted finder preferences.
//!
//! Stored as TOML keyed by stable tag keys, so saved selections keep
//! resolving across releases. Only overrides are written: a tag is selected
//! unless its key appears in `disabled_tags`, which keeps newly added tags
//! selected by default for existing prefs files.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::PrefsError;
use crate::tags::{default_selected, ComponentTag};

/// Current prefs schema version. Bump only with a migration in [`FinderPrefs::load`].
pub const PREFS_VERSION: u32 = 1;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct FinderPrefs {
    pub version: u32,

    /// Stable keys of tags the user switched off. Unknown keys are kept
    /// as-is: they may belong to a newer schema and must survive a save.
    pub disabled_tags: Vec<String>,

    pub include_linked_roots: bool,

    /// Name of the last scanned root, restored on the next session.
    pub last_root: Option<String>,
}

impl Default for FinderPrefs {
    fn default() -> Self {
        Self {
            version: PREFS_VERSION,
            disabled_tags: Vec::new(),
            include_linked_roots: true,
            last_root: None,
        }
    }
}

impl FinderPrefs {
    /// Platform config location, e.g. `~/.config/sabueso/prefs.toml`.
    pub fn default_path() -> Result<PathBuf, PrefsError> {
        let base = dirs::config_dir().ok_or(PrefsError::NoConfigDir)?;
        Ok(base.join("sabueso").join("prefs.toml"))
    }

    /// Load prefs from `path`. A missing file is not an error: it means
    /// defaults, same as a fresh install.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PrefsError> {
        let contents = match std::fs::read_to_string(path.as_ref()) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => return Err(err.into()),
        };
        let prefs: FinderPrefs = toml::from_str(&contents)?;
        if prefs.version > PREFS_VERSION {
            log::warn!(
                "prefs file {} has schema version {} (newer than {}); loading anyway",
                path.as_ref().display(),
                prefs.version,
                PREFS_VERSION
            );
        }
        Ok(prefs)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PrefsError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Whether `tag` is currently selected. Registry default unless the
    /// user explicitly disabled it.
    pub fn selected(&self, tag: ComponentTag) -> bool {
        default_selected(tag) && !self.disabled_tags.iter().any(|key| key == tag.key())
    }

    pub fn set_selected(&mut self, tag: ComponentTag, selected: bool) {
        if selected {
            self.disabled_tags.retain(|key| key != tag.key());
        } else if !self.disabled_tags.iter().any(|key| key == tag.key()) {
            self.disabled_tags.push(tag.key().to_string());
        }
    }

    /// The currently selected real tags, ready for a [`ScanRequest`](crate::scan::ScanRequest).
    pub fn selected_tags(&self) -> HashSet<ComponentTag> {
        ComponentTag::ALL
            .iter()
            .copied()
            .filter(|&tag| self.selected(tag))
            .collect()
    }
}
