//! Shortcut persistence and expansion for the command engine.

use anyhow::{Context, Result};
use notifier_core::ShortcutStore;
use std::path::{Path, PathBuf};
use tracing::debug;

/// `<config dir>/notifier/shortcuts.json`
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("notifier").join("shortcuts.json"))
}

/// Load the store at `path`. A missing file is an empty store.
pub fn load(path: Option<&Path>) -> Result<ShortcutStore> {
    let Some(path) = path else {
        return Ok(ShortcutStore::new());
    };
    if !path.exists() {
        debug!("No shortcut file at {:?}", path);
        return Ok(ShortcutStore::new());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read shortcut file {:?}", path))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse shortcut file {:?}", path))
}

/// Write `store` to `path`, creating parent directories.
pub fn save(path: Option<&Path>, store: &ShortcutStore) -> Result<()> {
    let path = path.context("No location for the shortcut file (set --shortcuts-file)")?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {:?}", parent))?;
    }

    let json = serde_json::to_string_pretty(store)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write shortcut file {:?}", path))?;
    debug!("Saved shortcuts to {:?}", path);
    Ok(())
}

/// Write `store` back only when a command changed it.
///
/// Returns whether the file was written.
pub fn persist_if_changed(path: Option<&Path>, store: &ShortcutStore) -> Result<bool> {
    if !store.was_changed() {
        return Ok(false);
    }
    save(path, store)?;
    Ok(true)
}

/// Replace the first argument with its stored tokens when it names a
/// shortcut in `namespace`.
pub fn expand(store: &ShortcutStore, namespace: &str, args: Vec<String>) -> Vec<String> {
    let tokens = args.first().and_then(|first| store.get(namespace, first));
    match tokens {
        Some(tokens) => {
            debug!("Expanding shortcut {:?} -> {:?}", args[0], tokens);
            let mut expanded = tokens.to_vec();
            expanded.extend(args.into_iter().skip(1));
            expanded
        }
        None => args,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notifier_core::{AUDIO_SHORTCUTS, SLACK_SHORTCUTS};
    use tempfile::tempdir;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    fn store() -> ShortcutStore {
        let mut store = ShortcutStore::new();
        store
            .namespace(AUDIO_SHORTCUTS)
            .insert("done".to_string(), strings(&["built-in", "success.wav"]));
        store
            .namespace(SLACK_SHORTCUTS)
            .insert("team".to_string(), strings(&["https://hooks.example/t"]));
        store
    }

    #[test]
    fn test_expand_replaces_first_argument() {
        let args = expand(&store(), SLACK_SHORTCUTS, strings(&["team", "build", "ok"]));
        assert_eq!(args, strings(&["https://hooks.example/t", "build", "ok"]));
    }

    #[test]
    fn test_expand_respects_namespace() {
        let args = expand(&store(), SLACK_SHORTCUTS, strings(&["done"]));
        assert_eq!(args, strings(&["done"]));

        let args = expand(&store(), AUDIO_SHORTCUTS, strings(&["done"]));
        assert_eq!(args, strings(&["built-in", "success.wav"]));
    }

    #[test]
    fn test_expand_only_first_position() {
        let args = expand(&store(), AUDIO_SHORTCUTS, strings(&["--print", "done"]));
        assert_eq!(args, strings(&["--print", "done"]));
        assert!(expand(&store(), AUDIO_SHORTCUTS, Vec::new()).is_empty());
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = load(Some(&dir.path().join("nope.json"))).unwrap();
        assert_eq!(store.namespaces().count(), 0);
        assert!(load(None).is_ok());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("shortcuts.json");

        save(Some(&path), &store()).unwrap();
        let loaded = load(Some(&path)).unwrap();

        assert_eq!(
            loaded.get(AUDIO_SHORTCUTS, "done").unwrap(),
            &["built-in".to_string(), "success.wav".to_string()]
        );
        assert!(!loaded.was_changed());
    }

    #[test]
    fn test_load_rejects_garbage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("shortcuts.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(load(Some(&path)).is_err());
    }

    #[test]
    fn test_unchanged_store_is_not_written() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("shortcuts.json");

        let written = persist_if_changed(Some(&path), &store()).unwrap();

        assert!(!written);
        assert!(!path.exists());
        assert!(persist_if_changed(None, &store()).is_ok());
    }

    #[test]
    fn test_changed_store_is_written() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("shortcuts.json");
        let mut changed = store();
        changed.mark_changed();

        assert!(persist_if_changed(Some(&path), &changed).unwrap());
        let loaded = load(Some(&path)).unwrap();
        assert_eq!(
            loaded.get(SLACK_SHORTCUTS, "team").unwrap(),
            &["https://hooks.example/t".to_string()]
        );
    }

    #[test]
    fn test_save_without_path_fails() {
        assert!(save(None, &store()).is_err());
    }
}
