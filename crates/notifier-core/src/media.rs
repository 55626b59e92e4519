//! Built-in media directory resolution and listing
//!
//! Built-in cues ship in a `media/` directory next to the installed binary.
//! The directory is recomputed on every call; nothing here caches paths or
//! directory contents.

use crate::error::NotifierError;
use crate::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the subdirectory holding built-in audio files.
pub const MEDIA_SUBDIR: &str = "media";

/// Extensions accepted for playback, without the leading dot.
pub const ALLOWED_EXTENSIONS: &[&str] = &["wav", "mp3"];

/// Directory holding the built-in audio files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaDirectory(PathBuf);

impl MediaDirectory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        MediaDirectory(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    /// Path of a built-in file inside this directory
    pub fn join(&self, name: &str) -> PathBuf {
        self.0.join(name)
    }
}

impl std::fmt::Display for MediaDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Source of the media directory location.
pub trait MediaLocator: Send + Sync {
    fn resolve(&self) -> Result<MediaDirectory>;
}

/// Locates `media/` next to the currently running executable.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecutableMediaLocator;

impl MediaLocator for ExecutableMediaLocator {
    fn resolve(&self) -> Result<MediaDirectory> {
        let exe = std::env::current_exe()
            .map_err(|e| NotifierError::LocatorFailure(e.to_string()))?;
        let dir = media_dir_for(&exe)?;
        debug!("Resolved media directory: {}", dir);
        Ok(dir)
    }
}

/// Media directory belonging to the executable at `exe`.
pub fn media_dir_for(exe: &Path) -> Result<MediaDirectory> {
    let parent = exe
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .ok_or_else(|| {
            NotifierError::LocatorFailure(format!("{} has no parent directory", exe.display()))
        })?;
    Ok(MediaDirectory(parent.join(MEDIA_SUBDIR)))
}

/// Whether `path` ends in one of the playable extensions (case-insensitive).
pub fn has_allowed_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| {
            ALLOWED_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
        .unwrap_or(false)
}

/// List the playable files in `dir`.
///
/// Subdirectories are skipped even when their names carry an audio
/// extension. Names are sorted so completion order is stable.
pub fn list_builtins(dir: &MediaDirectory) -> Result<Vec<String>> {
    let listing_error = |source: std::io::Error| NotifierError::MediaListing {
        dir: dir.path().to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir.path()).map_err(listing_error)? {
        let entry = entry.map_err(listing_error)?;
        let path = entry.path();
        if !path.is_file() || !has_allowed_extension(&path) {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            names.push(name.to_string());
        }
    }

    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_media_dir_for_executable() {
        let dir = media_dir_for(Path::new("/opt/notifier/bin/n")).unwrap();
        assert_eq!(dir.path(), Path::new("/opt/notifier/bin/media"));
    }

    #[test]
    fn test_media_dir_for_bare_name_fails() {
        let err = media_dir_for(Path::new("n")).unwrap_err();
        assert!(matches!(err, NotifierError::LocatorFailure(_)));
    }

    #[test]
    fn test_executable_locator_appends_media() {
        let dir = ExecutableMediaLocator.resolve().unwrap();
        assert!(dir.path().ends_with(MEDIA_SUBDIR));
    }

    #[test]
    fn test_has_allowed_extension() {
        assert!(has_allowed_extension(Path::new("break.wav")));
        assert!(has_allowed_extension(Path::new("/a/b/song.MP3")));
        assert!(!has_allowed_extension(Path::new("notes.txt")));
        assert!(!has_allowed_extension(Path::new("wav")));
    }

    #[test]
    fn test_list_builtins_filters_and_sorts() {
        let dir = tempdir().unwrap();
        for name in ["warning.wav", "break.wav", "song.mp3", "readme.md"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.wav")).unwrap();

        let names = list_builtins(&MediaDirectory::new(dir.path())).unwrap();
        assert_eq!(names, vec!["break.wav", "song.mp3", "warning.wav"]);
    }

    #[test]
    fn test_list_builtins_missing_dir_is_error() {
        let dir = tempdir().unwrap();
        let missing = MediaDirectory::new(dir.path().join("media"));

        let err = list_builtins(&missing).unwrap_err();
        assert!(matches!(err, NotifierError::MediaListing { .. }));
    }
}
