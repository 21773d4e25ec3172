use super::serde_helpers::{load_env_enum, load_env_path_opt, load_env_string, load_env_var};
use super::{ConfigError, LogFormat, LogLevel};
use crate::chunker::{DEFAULT_MAX_LENGTH, DEFAULT_SEQUENCE_KEY};
use clap::parser::ValueSource;
use clap::{CommandFactory, FromArgMatches, Parser};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[command(author, version, about, long_about = None)]
#[serde(default)]
pub struct Config {
    /// Split oversized events (pass-through when false)
    #[arg(long, env = "CHUNK_ENABLED", default_value_t = true, action = clap::ArgAction::Set)]
    pub enabled: bool,

    /// Maximum message / stack trace length in characters
    #[arg(long, env = "CHUNK_MAX_LENGTH", default_value = "8192")]
    pub max_length: usize,

    /// MDC key carrying the sequence number of each part
    #[arg(long, env = "CHUNK_SEQUENCE_KEY", default_value = "seq")]
    pub sequence_key: String,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: LogLevel,

    /// Log format (text or json)
    #[arg(long, env = "LOG_FORMAT", default_value = "text")]
    pub log_format: LogFormat,

    /// NDJSON event file to read instead of stdin
    #[arg(long, env = "CHUNK_INPUT")]
    pub input: Option<PathBuf>,

    /// Configuration file path (optional)
    #[serde(skip)]
    #[arg(long, env = "CONFIG_FILE")]
    pub config_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enabled: true,
            max_length: DEFAULT_MAX_LENGTH.get(),
            sequence_key: DEFAULT_SEQUENCE_KEY.to_string(),
            log_level: LogLevel::Info,
            log_format: LogFormat::Text,
            input: None,
            config_file: None,
        }
    }
}

impl Config {
    pub fn from_args<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let config = Config::parse_from(args);
        config.validate()?;
        Ok(config)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();

        load_env_var("CHUNK_ENABLED", &mut config.enabled)?;
        load_env_var("CHUNK_MAX_LENGTH", &mut config.max_length)?;
        load_env_string("CHUNK_SEQUENCE_KEY", &mut config.sequence_key);
        load_env_enum("LOG_LEVEL", &mut config.log_level)?;
        load_env_enum("LOG_FORMAT", &mut config.log_format)?;
        load_env_path_opt("CHUNK_INPUT", &mut config.input);
        load_env_path_opt("CONFIG_FILE", &mut config.config_file);

        config.validate()?;
        Ok(config)
    }

    /// CLI arguments (with their env fallbacks) layered over `--config-file`, if given.
    ///
    /// Only values set on the command line or through the environment override the file;
    /// clap defaults never do.
    pub fn from_args_and_file<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let matches = Config::command().get_matches_from(args);
        let cli = Config::from_arg_matches(&matches)
            .map_err(|e| ConfigError::InvalidConfig(e.to_string()))?;
        let Some(path) = cli.config_file.clone() else {
            cli.validate()?;
            return Ok(cli);
        };

        let mut config = Self::read_file(&path)?;
        config.config_file = Some(path);

        let explicit = |id: &str| {
            matches!(
                matches.value_source(id),
                Some(ValueSource::CommandLine | ValueSource::EnvVariable)
            )
        };
        if explicit("enabled") {
            config.enabled = cli.enabled;
        }
        if explicit("max_length") {
            config.max_length = cli.max_length;
        }
        if explicit("sequence_key") {
            config.sequence_key = cli.sequence_key;
        }
        if explicit("log_level") {
            config.log_level = cli.log_level;
        }
        if explicit("log_format") {
            config.log_format = cli.log_format;
        }
        if explicit("input") {
            config.input = cli.input;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config = Self::read_file(path.as_ref())?;
        config.validate()?;
        Ok(config)
    }

    fn read_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}
