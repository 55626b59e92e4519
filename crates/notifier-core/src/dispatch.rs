//! Audio request resolution
//!
//! Turns an [`AudioRequest`] into the [`Action`] the engine should run.

use crate::action::{Action, ActionBuilder};
use crate::config::NotifierConfig;
use crate::error::NotifierError;
use crate::media::{
    has_allowed_extension, list_builtins, ExecutableMediaLocator, MediaDirectory, MediaLocator,
};
use crate::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// What the user asked to play
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioRequest {
    /// Any audio file on disk; extension already validated by the caller
    ExplicitFile(PathBuf),
    /// A file name inside the built-in media directory
    BuiltIn(String),
}

/// How explicit files are turned into commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackMode {
    /// Copy into a temporary directory, then play the copy
    #[default]
    Isolated,
    /// Play the file where it is
    Direct,
}

/// Check that `path` names a playable audio file type.
pub fn validate_audio_path(path: &Path) -> Result<()> {
    if has_allowed_extension(path) {
        Ok(())
    } else {
        Err(NotifierError::UnsupportedFileType(
            path.display().to_string(),
        ))
    }
}

/// Resolves audio requests against the media directory
#[derive(Clone)]
pub struct NotificationDispatcher {
    locator: Arc<dyn MediaLocator>,
    builder: ActionBuilder,
    explicit_mode: PlaybackMode,
}

impl NotificationDispatcher {
    pub fn new(locator: Arc<dyn MediaLocator>, builder: ActionBuilder) -> Self {
        NotificationDispatcher {
            locator,
            builder,
            explicit_mode: PlaybackMode::default(),
        }
    }

    /// Dispatcher for the installed binary: media next to the executable,
    /// real temporary directories.
    pub fn from_config(config: &NotifierConfig) -> Self {
        Self::new(
            Arc::new(ExecutableMediaLocator),
            ActionBuilder::from_config(config),
        )
    }

    /// Choose how explicit files are played. Built-ins always use
    /// [`PlaybackMode::Isolated`].
    pub fn with_explicit_mode(mut self, mode: PlaybackMode) -> Self {
        self.explicit_mode = mode;
        self
    }

    /// Build the action for `request`.
    pub fn resolve_audio(&self, request: &AudioRequest) -> Result<Action> {
        match request {
            AudioRequest::ExplicitFile(path) => {
                debug!("Resolving explicit file {:?} ({:?})", path, self.explicit_mode);
                match self.explicit_mode {
                    PlaybackMode::Isolated => self.builder.build(path),
                    PlaybackMode::Direct => Ok(self.builder.build_direct(path)),
                }
            }
            AudioRequest::BuiltIn(name) => {
                let dir = self.locator.resolve()?;
                let path = builtin_path(&dir, name)?;
                info!("Playing built-in {}", name);
                self.builder.build(&path)
            }
        }
    }

    /// Playable built-in names, sorted; recomputed on every call.
    pub fn builtin_names(&self) -> Result<Vec<String>> {
        let dir = self.locator.resolve()?;
        list_builtins(&dir)
    }
}

fn builtin_path(dir: &MediaDirectory, name: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    validate_audio_path(&path)?;

    // Names are plain file names; anything with a separator escapes the dir.
    let is_plain_name = Path::new(name).file_name().map(|n| n == name) == Some(true);
    if !is_plain_name || !path.is_file() {
        return Err(NotifierError::BuiltInNotFound {
            name: name.to_string(),
            dir: dir.path().to_path_buf(),
        });
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::{FailingMediaLocator, FixedMediaLocator, FixedTempDir};
    use tempfile::tempdir;

    fn dispatcher(media: &Path) -> NotificationDispatcher {
        NotificationDispatcher::new(
            Arc::new(FixedMediaLocator::new(media)),
            ActionBuilder::new(&NotifierConfig::default(), Arc::new(FixedTempDir::new("TEMP_DIR"))),
        )
    }

    #[test]
    fn test_validate_audio_path() {
        assert!(validate_audio_path(Path::new("a/b.wav")).is_ok());
        let err = validate_audio_path(Path::new("a/b.ogg")).unwrap_err();
        assert!(matches!(err, NotifierError::UnsupportedFileType(_)));
    }

    #[test]
    fn test_builtin_matches_explicit_file() {
        let media = tempdir().unwrap();
        std::fs::write(media.path().join("error.wav"), b"RIFF").unwrap();
        let d = dispatcher(media.path());

        let builtin = d
            .resolve_audio(&AudioRequest::BuiltIn("error.wav".to_string()))
            .unwrap();
        let explicit = d
            .resolve_audio(&AudioRequest::ExplicitFile(media.path().join("error.wav")))
            .unwrap();

        assert_eq!(builtin, explicit);
        assert_eq!(builtin.len(), 2);
    }

    #[test]
    fn test_builtin_missing_file() {
        let media = tempdir().unwrap();
        let err = dispatcher(media.path())
            .resolve_audio(&AudioRequest::BuiltIn("nope.wav".to_string()))
            .unwrap_err();
        assert!(matches!(err, NotifierError::BuiltInNotFound { .. }));
    }

    #[test]
    fn test_builtin_rejects_path_traversal() {
        let media = tempdir().unwrap();
        let inner = media.path().join("media");
        std::fs::create_dir(&inner).unwrap();
        std::fs::write(media.path().join("outside.wav"), b"").unwrap();

        let err = dispatcher(&inner)
            .resolve_audio(&AudioRequest::BuiltIn("../outside.wav".to_string()))
            .unwrap_err();
        assert!(matches!(err, NotifierError::BuiltInNotFound { .. }));
    }

    #[test]
    fn test_builtin_wrong_extension() {
        let media = tempdir().unwrap();
        std::fs::write(media.path().join("notes.txt"), b"").unwrap();
        let err = dispatcher(media.path())
            .resolve_audio(&AudioRequest::BuiltIn("notes.txt".to_string()))
            .unwrap_err();
        assert!(matches!(err, NotifierError::UnsupportedFileType(_)));
    }

    #[test]
    fn test_builtin_locator_failure_propagates() {
        let d = NotificationDispatcher::new(
            Arc::new(FailingMediaLocator),
            ActionBuilder::new(&NotifierConfig::default(), Arc::new(FixedTempDir::new("T"))),
        );
        let err = d
            .resolve_audio(&AudioRequest::BuiltIn("break.wav".to_string()))
            .unwrap_err();
        assert!(matches!(err, NotifierError::LocatorFailure(_)));
        assert!(matches!(
            d.builtin_names().unwrap_err(),
            NotifierError::LocatorFailure(_)
        ));
    }

    #[test]
    fn test_direct_mode_only_affects_explicit_files() {
        let media = tempdir().unwrap();
        std::fs::write(media.path().join("laser.wav"), b"").unwrap();
        let d = dispatcher(media.path()).with_explicit_mode(PlaybackMode::Direct);

        let explicit = d
            .resolve_audio(&AudioRequest::ExplicitFile(media.path().join("laser.wav")))
            .unwrap();
        let builtin = d
            .resolve_audio(&AudioRequest::BuiltIn("laser.wav".to_string()))
            .unwrap();

        assert_eq!(explicit.len(), 1);
        assert_eq!(builtin.len(), 2);
    }

    #[test]
    fn test_builtin_names_recomputed() {
        let media = tempdir().unwrap();
        let d = dispatcher(media.path());
        assert!(d.builtin_names().unwrap().is_empty());

        std::fs::write(media.path().join("success.wav"), b"").unwrap();
        assert_eq!(d.builtin_names().unwrap(), vec!["success.wav"]);
    }
}
