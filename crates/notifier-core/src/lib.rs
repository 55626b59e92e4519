//! Notifier Core: audio cues and webhook messages
//!
//! Resolves what the `n` command should do without doing it:
//!
//! - [`media`]: locate and list the built-in `media/` directory
//! - [`action`]: build the shell commands that play an audio file
//! - [`dispatch`]: turn an [`AudioRequest`] into an [`Action`]
//! - [`webhook`]: post a text message to a Slack-compatible webhook
//! - [`shortcuts`]: user-defined shortcut storage for the command engine
//!
//! Filesystem, temp-directory and HTTP access sit behind traits so tests
//! can swap in the fakes from [`fakes`].

pub mod action;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod fakes;
pub mod media;
pub mod shortcuts;
pub mod telemetry;
pub mod webhook;

pub use action::{quote, Action, ActionBuilder, SystemTempDirs, TempDirFactory, PLAYER_SCRIPT};
pub use config::NotifierConfig;
pub use dispatch::{validate_audio_path, AudioRequest, NotificationDispatcher, PlaybackMode};
pub use error::{HttpPhase, NotifierError, Result};
pub use media::{
    has_allowed_extension, list_builtins, ExecutableMediaLocator, MediaDirectory, MediaLocator,
    ALLOWED_EXTENSIONS,
};
pub use shortcuts::{ShortcutStore, AUDIO_SHORTCUTS, SLACK_SHORTCUTS};
pub use telemetry::init_tracing;
pub use webhook::{
    shell_alias, ReqwestTransport, SlackMessage, WebhookRequest, WebhookResponse, WebhookSender,
    WebhookTransport, CONTENT_TYPE,
};

/// Notifier version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
