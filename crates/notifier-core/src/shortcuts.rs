//! User-defined shortcut storage
//!
//! The store only holds data. Expanding shortcuts and writing them to disk
//! belongs to the command engine, which checks [`ShortcutStore::was_changed`]
//! after each invocation to decide whether to persist.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Namespace for shortcuts of `audio` invocations.
pub const AUDIO_SHORTCUTS: &str = "audio-shortcuts";

/// Namespace for shortcuts of `slack` invocations.
pub const SLACK_SHORTCUTS: &str = "slack-shortcuts";

/// Shortcut name -> argument tokens it expands to
pub type ShortcutNamespace = BTreeMap<String, Vec<String>>;

/// Shortcuts grouped by namespace, plus a change flag
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortcutStore {
    #[serde(default)]
    shortcuts: Option<BTreeMap<String, ShortcutNamespace>>,
    #[serde(skip)]
    changed: bool,
}

impl ShortcutStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutable view of one namespace, created on first access
    pub fn namespace(&mut self, key: &str) -> &mut ShortcutNamespace {
        self.shortcuts
            .get_or_insert_with(BTreeMap::new)
            .entry(key.to_string())
            .or_default()
    }

    /// Tokens stored under `name` in `namespace`, without creating anything
    pub fn get(&self, namespace: &str, name: &str) -> Option<&[String]> {
        self.shortcuts
            .as_ref()?
            .get(namespace)?
            .get(name)
            .map(Vec::as_slice)
    }

    /// All namespaces that have been touched
    pub fn namespaces(&self) -> impl Iterator<Item = (&str, &ShortcutNamespace)> {
        self.shortcuts
            .iter()
            .flat_map(|m| m.iter())
            .map(|(k, v)| (k.as_str(), v))
    }

    pub fn mark_changed(&mut self) {
        self.changed = true;
    }

    pub fn was_changed(&self) -> bool {
        self.changed
    }
}
