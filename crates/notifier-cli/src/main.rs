//! Notifier CLI
//!
//! The `n` command plays audio cues and posts webhook messages.
//!
//! ## Commands
//!
//! - `audio` (`a`): play an audio file, or a built-in cue via `audio built-in`
//! - `slack` (`s`): send a message to a Slack-compatible incoming webhook
//! - `shortcut`: manage named argument shortcuts for `audio` and `slack`
//! - `alias`: print a shell alias bound to one webhook URL

mod executor;
mod shortcuts;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use notifier_core::{
    shell_alias, validate_audio_path, AudioRequest, NotificationDispatcher, NotifierConfig,
    PlaybackMode, ShortcutStore, WebhookSender, AUDIO_SHORTCUTS, SLACK_SHORTCUTS,
};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, Level};

const PROGRAM: &str = "n";

#[derive(Parser)]
#[command(name = PROGRAM)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Play audio cues and send webhook notifications", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    /// Shortcut file (default: <config dir>/notifier/shortcuts.json)
    #[arg(long, global = true, env = "NOTIFIER_SHORTCUTS_FILE")]
    shortcuts_file: Option<PathBuf>,

    /// Interpreter that runs the audio player script
    #[arg(
        long,
        global = true,
        env = "NOTIFIER_INTERPRETER",
        default_value = notifier_core::config::DEFAULT_INTERPRETER
    )]
    interpreter: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an audio file or a built-in cue (first argument may be a shortcut)
    #[command(visible_alias = "a", disable_help_flag = true)]
    Audio {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, num_args = 0..)]
        args: Vec<String>,
    },

    /// Send a slack message (first argument may be a shortcut)
    #[command(visible_alias = "s", disable_help_flag = true)]
    Slack {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, num_args = 0..)]
        args: Vec<String>,
    },

    /// Manage shortcuts
    Shortcut {
        #[command(subcommand)]
        action: ShortcutAction,
    },

    /// Print a shell alias that sends slack messages to a fixed URL
    Alias {
        /// Alias name
        alias: String,
        /// Slack URL the alias sends to
        url: String,
    },
}

/// Arguments of `n audio`, parsed after shortcut expansion
#[derive(Parser, Debug)]
#[command(name = "n audio", about = "Play the provided audio file")]
#[command(subcommand_negates_reqs = true)]
struct AudioArgs {
    #[command(subcommand)]
    command: Option<AudioCommand>,

    /// Play the file in place instead of copying it to a temporary directory
    /// (explicit files only; built-ins always play from a copy)
    #[arg(long)]
    direct: bool,

    /// Print the commands instead of running them
    #[arg(long, global = true)]
    print: bool,

    /// Audio file to play (.wav or .mp3)
    #[arg(value_parser = parse_audio_file, required = true)]
    file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum AudioCommand {
    /// Play a built-in audio file
    #[command(name = "built-in", visible_alias = "b")]
    BuiltIn {
        /// Built-in audio file to play (see `n audio list`)
        name: String,
    },

    /// List built-in audio files
    List,
}

/// Arguments of `n slack`, parsed after shortcut expansion
#[derive(Parser, Debug)]
#[command(name = "n slack", about = "Send a slack message")]
struct SlackArgs {
    /// Request timeout in seconds
    #[arg(
        long,
        env = "NOTIFIER_WEBHOOK_TIMEOUT_SECS",
        default_value_t = 30,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout: u64,

    /// Slack URL to which to send messages
    url: String,

    /// Text to send
    #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
    text: Vec<String>,
}

#[derive(Subcommand)]
enum ShortcutAction {
    /// Store a shortcut
    Add {
        /// Command the shortcut belongs to
        kind: ShortcutKind,
        /// Shortcut name
        name: String,
        /// Arguments the shortcut expands to
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        tokens: Vec<String>,
    },

    /// Remove a shortcut
    Delete {
        kind: ShortcutKind,
        name: String,
    },

    /// List shortcuts
    List {
        /// Only list one command's shortcuts
        kind: Option<ShortcutKind>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ShortcutKind {
    Audio,
    Slack,
}

impl ShortcutKind {
    fn namespace(self) -> &'static str {
        match self {
            ShortcutKind::Audio => AUDIO_SHORTCUTS,
            ShortcutKind::Slack => SLACK_SHORTCUTS,
        }
    }
}

/// Names that would shadow `n audio` subcommands.
const RESERVED_AUDIO_NAMES: &[&str] = &["built-in", "b", "list", "help"];

fn parse_audio_file(s: &str) -> std::result::Result<PathBuf, String> {
    let path = PathBuf::from(s);
    validate_audio_path(&path).map_err(|e| e.to_string())?;
    Ok(path)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    notifier_core::init_tracing(cli.json, level);

    let shortcuts_path = cli.shortcuts_file.clone().or_else(shortcuts::default_path);
    let mut store = shortcuts::load(shortcuts_path.as_deref())?;
    let config = NotifierConfig::default().with_interpreter(&cli.interpreter);

    let result = match cli.command {
        Commands::Audio { args } => {
            let args = shortcuts::expand(&store, AUDIO_SHORTCUTS, args);
            cmd_audio(&config, parse_sub::<AudioArgs>("audio", args)).await
        }
        Commands::Slack { args } => {
            let args = shortcuts::expand(&store, SLACK_SHORTCUTS, args);
            cmd_slack(config, parse_sub::<SlackArgs>("slack", args)).await
        }
        Commands::Shortcut { action } => cmd_shortcut(&mut store, action),
        Commands::Alias { alias, url } => {
            println!("{}", shell_alias(&alias, PROGRAM, &url));
            Ok(())
        }
    };

    shortcuts::persist_if_changed(shortcuts_path.as_deref(), &store)?;

    result
}

/// Parse expanded sub-command arguments; exits on `--help` or bad input.
fn parse_sub<P: Parser>(name: &str, args: Vec<String>) -> P {
    P::parse_from(std::iter::once(format!("{PROGRAM} {name}")).chain(args))
}

// ========== Audio ==========

async fn cmd_audio(config: &NotifierConfig, args: AudioArgs) -> Result<()> {
    let mode = playback_mode(&args)?;
    let dispatcher = NotificationDispatcher::from_config(config).with_explicit_mode(mode);

    let request = match args.command {
        Some(AudioCommand::List) => return cmd_audio_list(&dispatcher),
        Some(AudioCommand::BuiltIn { name }) => AudioRequest::BuiltIn(name),
        None => {
            let file = args.file.context("No audio file given")?;
            AudioRequest::ExplicitFile(absolute(&file)?)
        }
    };

    let action = dispatcher
        .resolve_audio(&request)
        .context("Failed to resolve audio request")?;

    if args.print {
        executor::print(&action);
        return Ok(());
    }
    executor::run(action).await
}

fn playback_mode(args: &AudioArgs) -> Result<PlaybackMode> {
    if !args.direct {
        return Ok(PlaybackMode::Isolated);
    }
    if args.command.is_some() {
        anyhow::bail!("--direct only applies to audio files; built-ins always play from a copy");
    }
    Ok(PlaybackMode::Direct)
}

fn cmd_audio_list(dispatcher: &NotificationDispatcher) -> Result<()> {
    let names = dispatcher
        .builtin_names()
        .context("Failed to list built-in audio files")?;
    for name in names {
        println!("{}", name);
    }
    Ok(())
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).with_context(|| format!("Failed to resolve path {:?}", path))
}

// ========== Slack ==========

async fn cmd_slack(config: NotifierConfig, args: SlackArgs) -> Result<()> {
    let config = config.with_webhook_timeout(Duration::from_secs(args.timeout));
    let sender = WebhookSender::from_config(&config)?;

    sender.send(&args.url, args.text.as_slice()).await?;
    info!("Sent {} token(s) to webhook", args.text.len());
    Ok(())
}

// ========== Shortcuts ==========

fn cmd_shortcut(store: &mut ShortcutStore, action: ShortcutAction) -> Result<()> {
    match action {
        ShortcutAction::Add { kind, name, tokens } => {
            if kind == ShortcutKind::Audio && RESERVED_AUDIO_NAMES.contains(&name.as_str()) {
                anyhow::bail!("Shortcut name {:?} is reserved by `n audio`", name);
            }
            store.namespace(kind.namespace()).insert(name.clone(), tokens);
            store.mark_changed();
            println!("Added {} shortcut {}", kind.namespace(), name);
        }
        ShortcutAction::Delete { kind, name } => {
            if store.namespace(kind.namespace()).remove(&name).is_none() {
                anyhow::bail!("No {} shortcut named {:?}", kind.namespace(), name);
            }
            store.mark_changed();
            println!("Deleted {} shortcut {}", kind.namespace(), name);
        }
        ShortcutAction::List { kind } => {
            for line in shortcut_lines(store, kind) {
                println!("{}", line);
            }
        }
    }
    Ok(())
}

fn shortcut_lines(store: &ShortcutStore, kind: Option<ShortcutKind>) -> Vec<String> {
    let wanted = kind.map(ShortcutKind::namespace);
    store
        .namespaces()
        .filter(|(namespace, _)| wanted.map_or(true, |w| w == *namespace))
        .flat_map(|(namespace, entries)| {
            entries
                .iter()
                .map(move |(name, tokens)| format!("{namespace} {name}: {}", tokens.join(" ")))
        })
        .collect()
}
