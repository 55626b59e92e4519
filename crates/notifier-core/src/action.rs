//! Shell actions that play an audio file
//!
//! Paths of installed built-ins may contain characters (such as `@` in
//! versioned install directories) that break the player when passed through
//! some shells. The isolated form copies the file into a fresh temporary
//! directory first and plays the copy, so only the base name reaches the
//! player.

use crate::config::NotifierConfig;
use crate::error::NotifierError;
use crate::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Inline player script passed to the interpreter with `-c`.
///
/// Takes the file to play as its only argument. A missing file prints a
/// message and exits 0.
pub const PLAYER_SCRIPT: &str = r#"
from playsound import playsound
import os
import sys

p = os.path.abspath(sys.argv[1])
if not os.path.isfile(p):
  print('not a file')
  exit(0)

if os.name == 'nt':
  p = p.replace('\\\\', '\\\\\\\\', 1)

playsound(p)
"#;

/// Ordered shell command lines, executed verbatim by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    commands: Vec<String>,
}

impl Action {
    pub fn new(commands: Vec<String>) -> Self {
        Action { commands }
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<String> {
        self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl IntoIterator for Action {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.into_iter()
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.commands.join("\n"))
    }
}

/// Creates uniquely named temporary directories.
pub trait TempDirFactory: Send + Sync {
    /// Create a new directory whose name starts with `prefix`.
    fn create(&self, prefix: &str) -> std::io::Result<PathBuf>;
}

/// Temporary directories under the OS temp location.
///
/// Directories are left on disk: the action that copies into them runs
/// after this process hands it over.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTempDirs;

impl TempDirFactory for SystemTempDirs {
    fn create(&self, prefix: &str) -> std::io::Result<PathBuf> {
        let dir = tempfile::Builder::new().prefix(prefix).tempdir()?;
        Ok(dir.keep())
    }
}

/// Double-quote `s` for a POSIX shell command line.
///
/// Escapes the four characters that stay special inside double quotes
/// (`"`, `\`, `$` and backtick). Everything else, control characters
/// included, is kept literally.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        if matches!(c, '"' | '\\' | '$' | '`') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

fn quote_path(path: &Path) -> String {
    quote(&path.to_string_lossy())
}

/// Builds playback actions for audio files.
#[derive(Clone)]
pub struct ActionBuilder {
    interpreter: String,
    temp_dir_prefix: String,
    temp_dirs: Arc<dyn TempDirFactory>,
}

impl ActionBuilder {
    pub fn new(config: &NotifierConfig, temp_dirs: Arc<dyn TempDirFactory>) -> Self {
        ActionBuilder {
            interpreter: config.interpreter.clone(),
            temp_dir_prefix: config.temp_dir_prefix.clone(),
            temp_dirs,
        }
    }

    /// Builder backed by real temporary directories
    pub fn from_config(config: &NotifierConfig) -> Self {
        Self::new(config, Arc::new(SystemTempDirs))
    }

    /// Copy `source` into a fresh temporary directory, then play the copy.
    ///
    /// Fails without producing any commands if the directory cannot be
    /// created.
    pub fn build(&self, source: &Path) -> Result<Action> {
        let dir = self
            .temp_dirs
            .create(&self.temp_dir_prefix)
            .map_err(NotifierError::TempDirFailure)?;
        debug!("Isolating {:?} in {:?}", source, dir);

        let target = match source.file_name() {
            Some(name) => dir.join(name),
            None => dir.clone(),
        };

        Ok(Action::new(vec![
            format!("cp {} {}", quote_path(source), quote_path(&dir)),
            self.play_command(&target),
        ]))
    }

    /// Play `source` in place, without the isolation copy.
    pub fn build_direct(&self, source: &Path) -> Action {
        Action::new(vec![self.play_command(source)])
    }

    fn play_command(&self, file: &Path) -> String {
        format!(
            "{} -c \"{}\" {}",
            self.interpreter,
            PLAYER_SCRIPT,
            quote_path(file)
        )
    }
}

impl std::fmt::Debug for ActionBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionBuilder")
            .field("interpreter", &self.interpreter)
            .field("temp_dir_prefix", &self.temp_dir_prefix)
            .finish_non_exhaustive()
    }
}
