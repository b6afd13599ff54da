//! Shell settings: command-line flags, then environment, then defaults.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};

pub const ENV_SAVE: &str = "SOCIAL_GRAPH_SAVE";
pub const ENV_FORMAT: &str = "SOCIAL_GRAPH_FORMAT";
pub const ENV_LOG: &str = "SOCIAL_GRAPH_LOG";
pub const ENV_RUST_LOG: &str = "RUST_LOG";

pub const DEFAULT_LOG_FILTER: &str = "warn";

pub const USAGE: &str = "\
Usage: social-graph [options]

Reads commands from stdin, one per line:
  a <user>            add user
  a <user1> <user2>   add friendship
  r <user>            remove user
  r <user1> <user2>   remove friendship
  s <user>            set active user
Queries start with ':' (type :help for the list).

Options:
  --import <path>     replay a command file at startup (repeatable)
  --save <path>       write the command transcript here on exit   [env: SOCIAL_GRAPH_SAVE]
  --format <fmt>      output format: text | json (default: text)  [env: SOCIAL_GRAPH_FORMAT]
  --log <filter>      tracing filter, e.g. debug (default: warn)  [env: SOCIAL_GRAPH_LOG, RUST_LOG]
  --no-prompt         do not print the '> ' prompt
  -h, --help          show this help
";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => bail!("invalid format '{}', use 'text' or 'json'", other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub imports: Vec<PathBuf>,
    pub save_path: Option<PathBuf>,
    pub format: OutputFormat,
    pub log_filter: String,
    pub prompt: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            imports: Vec::new(),
            save_path: None,
            format: OutputFormat::Text,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            prompt: true,
        }
    }
}

impl Config {
    /// Build the config from arguments (without the program name) and an
    /// environment lookup. Returns `Ok(None)` when help was requested.
    pub fn from_args<I, E>(args: I, env: E) -> Result<Option<Config>>
    where
        I: IntoIterator<Item = String>,
        E: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        let mut save_flag = None;
        let mut format_flag = None;
        let mut log_flag = None;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => return Ok(None),
                "--import" => config.imports.push(PathBuf::from(value_for(&arg, args.next())?)),
                "--save" => save_flag = Some(value_for(&arg, args.next())?),
                "--format" => format_flag = Some(value_for(&arg, args.next())?),
                "--log" => log_flag = Some(value_for(&arg, args.next())?),
                "--no-prompt" => config.prompt = false,
                other => bail!("unknown option '{}'. Use --help for options.", other),
            }
        }

        config.save_path = save_flag
            .or_else(|| non_empty(env(ENV_SAVE)))
            .map(PathBuf::from);

        if let Some(fmt) = format_flag.or_else(|| non_empty(env(ENV_FORMAT))) {
            config.format = fmt
                .parse()
                .with_context(|| format!("bad output format '{}'", fmt))?;
        }

        config.log_filter = log_flag
            .or_else(|| non_empty(env(ENV_LOG)))
            .or_else(|| non_empty(env(ENV_RUST_LOG)))
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Some(config))
    }
}

fn value_for(flag: &str, value: Option<String>) -> Result<String> {
    value.ok_or_else(|| anyhow!("option '{}' needs a value", flag))
}

/// Treat an unset or empty variable the same way.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
