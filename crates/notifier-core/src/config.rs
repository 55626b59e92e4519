//! Runtime settings shared by the action builder and the webhook sender.

use std::time::Duration;

/// Interpreter used to run the inline player script.
pub const DEFAULT_INTERPRETER: &str = "python3";

/// Prefix for per-invocation isolation directories.
pub const DEFAULT_TEMP_DIR_PREFIX: &str = "notifier-audio";

/// Upper bound on a single webhook POST.
pub const DEFAULT_WEBHOOK_TIMEOUT: Duration = Duration::from_secs(30);

/// Notifier configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifierConfig {
    /// Program invoked with `-c <script> <file>` to play audio
    pub interpreter: String,
    /// Prefix of the temporary directory each playback copies into
    pub temp_dir_prefix: String,
    /// Request timeout for webhook delivery
    pub webhook_timeout: Duration,
    /// User agent sent with webhook requests
    pub user_agent: String,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        NotifierConfig {
            interpreter: DEFAULT_INTERPRETER.to_string(),
            temp_dir_prefix: DEFAULT_TEMP_DIR_PREFIX.to_string(),
            webhook_timeout: DEFAULT_WEBHOOK_TIMEOUT,
            user_agent: format!("notifier/{}", crate::VERSION),
        }
    }
}

impl NotifierConfig {
    /// Override the player interpreter
    pub fn with_interpreter(mut self, interpreter: &str) -> Self {
        self.interpreter = interpreter.to_string();
        self
    }

    /// Override the webhook timeout
    pub fn with_webhook_timeout(mut self, timeout: Duration) -> Self {
        self.webhook_timeout = timeout;
        self
    }

    /// Override the isolation directory prefix
    pub fn with_temp_dir_prefix(mut self, prefix: &str) -> Self {
        self.temp_dir_prefix = prefix.to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = NotifierConfig::default();
        assert_eq!(config.interpreter, "python3");
        assert_eq!(config.webhook_timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("notifier/"));
    }

    #[test]
    fn test_config_builders() {
        let config = NotifierConfig::default()
            .with_interpreter("python")
            .with_webhook_timeout(Duration::from_secs(5))
            .with_temp_dir_prefix("cue");
        assert_eq!(config.interpreter, "python");
        assert_eq!(config.webhook_timeout, Duration::from_secs(5));
        assert_eq!(config.temp_dir_prefix, "cue");
    }
}
