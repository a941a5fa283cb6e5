use std::fmt;
use std::path::PathBuf;

use quiz_core::model::{AnswerKey, AnswerKeyError};
use thiserror::Error;

pub const ENV_ANSWER_KEY: &str = "BANCA_ANSWER_KEY";
pub const ENV_ANSWER_KEY_FILE: &str = "BANCA_ANSWER_KEY_FILE";
pub const ENV_LOG: &str = "RUST_LOG";
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug)]
pub enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
        }
    }
}

impl std::error::Error for ArgsError {}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Args(#[from] ArgsError),
    #[error("use either an inline answer key or a key file, not both")]
    ConflictingKeySources,
    #[error("invalid inline answer key")]
    InlineKey(#[source] AnswerKeyError),
    #[error("failed to read answer key file {}", path.display())]
    ReadKeyFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid answer key file {}", path.display())]
    ParseKeyFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--key <inline>] [--key-file <path>] [--log <filter>]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --key <inline>      answer key such as 1=B,2=D,3=D");
    eprintln!("  --key-file <path>   JSON answer key such as {{\"1\": \"B\"}}");
    eprintln!("  --log <filter>      tracing filter (default: info)");
    eprintln!();
    eprintln!("Without a key the built-in Banca Exata key is used.");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  {ENV_ANSWER_KEY}, {ENV_ANSWER_KEY_FILE}, {ENV_LOG}");
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

/// Where the answer key comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    BuiltIn,
    Inline(String),
    File(PathBuf),
}

#[derive(Debug, Default)]
struct Args {
    key: Option<String>,
    key_file: Option<PathBuf>,
    log: Option<String>,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--key" => parsed.key = Some(require_value(args, "--key")?),
                "--key-file" => {
                    parsed.key_file = Some(PathBuf::from(require_value(args, "--key-file")?));
                }
                "--log" => parsed.log = Some(require_value(args, "--log")?),
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }
        Ok(parsed)
    }
}

/// Resolved settings for one console run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub key_source: KeySource,
    pub log_filter: String,
}

impl AppConfig {
    /// Resolve flags over environment over defaults.
    ///
    /// A flag only overrides the environment for the same concern: `--key`
    /// beats `BANCA_ANSWER_KEY`, `--key-file` beats `BANCA_ANSWER_KEY_FILE`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Args` for malformed flags and
    /// `ConfigError::ConflictingKeySources` when both key forms are set.
    pub fn resolve(
        mut args: impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let parsed = Args::parse(&mut args)?;

        let inline = parsed.key.or_else(|| non_blank(env(ENV_ANSWER_KEY)));
        let file = parsed
            .key_file
            .or_else(|| non_blank(env(ENV_ANSWER_KEY_FILE)).map(PathBuf::from));

        let key_source = match (inline, file) {
            (Some(_), Some(_)) => return Err(ConfigError::ConflictingKeySources),
            (Some(inline), None) => KeySource::Inline(inline),
            (None, Some(path)) => KeySource::File(path),
            (None, None) => KeySource::BuiltIn,
        };

        let log_filter = parsed
            .log
            .or_else(|| non_blank(env(ENV_LOG)))
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            key_source,
            log_filter,
        })
    }

    /// Build the answer key from the configured source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when the inline key or key file is invalid.
    pub fn load_answer_key(&self) -> Result<AnswerKey, ConfigError> {
        match &self.key_source {
            KeySource::BuiltIn => Ok(AnswerKey::banca_exata()),
            KeySource::Inline(raw) => raw.parse().map_err(ConfigError::InlineKey),
            KeySource::File(path) => {
                let raw =
                    std::fs::read_to_string(path).map_err(|source| ConfigError::ReadKeyFile {
                        path: path.clone(),
                        source,
                    })?;
                serde_json::from_str(&raw).map_err(|source| ConfigError::ParseKeyFile {
                    path: path.clone(),
                    source,
                })
            }
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
