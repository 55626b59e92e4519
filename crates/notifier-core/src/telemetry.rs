//! Log output for `n`
//!
//! Everything is written to stderr so that `n audio --print`, `n audio list`
//! and `n alias` keep stdout clean for the shell that evaluates them. The
//! default level comes from `-v`; `RUST_LOG` overrides it when set.

use std::io;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the process-wide subscriber, as plain text or JSON lines.
///
/// Later calls are no-ops, so tests can call this freely.
pub fn init_tracing(json: bool, level: Level) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));
    let text_layer = (!json).then(|| fmt::layer().with_target(false).with_writer(io::stderr));
    let json_layer = json.then(|| {
        fmt::layer()
            .json()
            .with_target(false)
            .with_writer(io::stderr)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(text_layer)
        .with(json_layer)
        .try_init()
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_tracing_is_idempotent() {
        init_tracing(false, Level::WARN);
        init_tracing(true, Level::DEBUG);
    }
}
