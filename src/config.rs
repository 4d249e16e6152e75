//! Machine configuration.
//!
//! Values are layered: command-line flags, then `BFM_*` environment
//! variables, then the `[machine]` section of `bfm.toml` in the user's
//! config directory, then built-in defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use cross_xdg::BaseDirs;
use serde::Deserialize;

pub const DEFAULT_TAPE_SIZE: usize = 30_000;
pub const CONFIG_FILE_NAME: &str = "bfm.toml";

pub const ENV_TAPE_SIZE: &str = "BFM_TAPE_SIZE";
pub const ENV_EOF: &str = "BFM_EOF";
pub const ENV_JUMP_TABLE: &str = "BFM_JUMP_TABLE";

/// What `,` does when the input stream is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EofBehavior {
    /// End of input aborts the run.
    #[default]
    Fail,
    /// Store 0 in the current cell.
    Zero,
    /// Leave the current cell untouched.
    Unchanged,
}

/// How `[` and `]` find their partner when a jump is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BracketStrategy {
    /// Depth-counting scan of the program text on every taken jump.
    #[default]
    Scan,
    /// Pairs computed once per machine; each jump is a lookup.
    JumpTable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MachineConfig {
    pub tape_size: usize,
    pub eof: EofBehavior,
    pub brackets: BracketStrategy,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            tape_size: DEFAULT_TAPE_SIZE,
            eof: EofBehavior::default(),
            brackets: BracketStrategy::default(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

/// One configuration layer. Unset fields fall through to the next layer.
///
/// This is also the shape of the `[machine]` table in `bfm.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialConfig {
    pub tape_size: Option<usize>,
    pub eof: Option<EofBehavior>,
    pub jump_table: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    machine: PartialConfig,
}

impl PartialConfig {
    /// Read the `BFM_*` variables through `lookup` (normally `std::env::var`).
    pub fn from_env<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let tape_size = match lookup(ENV_TAPE_SIZE) {
            Some(raw) => Some(raw.trim().parse::<usize>().map_err(|e| {
                ConfigError::InvalidValue {
                    key: ENV_TAPE_SIZE.to_string(),
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            })?),
            None => None,
        };

        let eof = match lookup(ENV_EOF) {
            Some(raw) => Some(EofBehavior::from_str(raw.trim(), true).map_err(|reason| {
                ConfigError::InvalidValue {
                    key: ENV_EOF.to_string(),
                    value: raw.clone(),
                    reason,
                }
            })?),
            None => None,
        };

        let jump_table = match lookup(ENV_JUMP_TABLE) {
            Some(raw) => Some(parse_flag(&raw).ok_or_else(|| ConfigError::InvalidValue {
                key: ENV_JUMP_TABLE.to_string(),
                value: raw.clone(),
                reason: "expected 1/0, true/false, yes/no or on/off".to_string(),
            })?),
            None => None,
        };

        Ok(Self {
            tape_size,
            eof,
            jump_table,
        })
    }

    /// Fill unset fields from `fallback`.
    pub fn or(self, fallback: PartialConfig) -> PartialConfig {
        PartialConfig {
            tape_size: self.tape_size.or(fallback.tape_size),
            eof: self.eof.or(fallback.eof),
            jump_table: self.jump_table.or(fallback.jump_table),
        }
    }

    /// Apply defaults to unset fields and validate.
    pub fn finish(self) -> Result<MachineConfig, ConfigError> {
        let defaults = MachineConfig::default();

        let tape_size = self.tape_size.unwrap_or(defaults.tape_size);
        if tape_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "tape_size".to_string(),
                value: "0".to_string(),
                reason: "the tape needs at least one cell".to_string(),
            });
        }

        let brackets = match self.jump_table {
            Some(true) => BracketStrategy::JumpTable,
            Some(false) => BracketStrategy::Scan,
            None => defaults.brackets,
        };

        Ok(MachineConfig {
            tape_size,
            eof: self.eof.unwrap_or(defaults.eof),
            brackets,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// `bfm.toml` under the XDG config home, if a home directory can be resolved.
///
/// On Linux this is usually `~/.config/bfm.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    let base_dirs = BaseDirs::new().ok()?;
    Some(base_dirs.config_home().join(CONFIG_FILE_NAME))
}

/// Parse the contents of a config file. `path` is only used for error messages.
pub fn parse_config(contents: &str, path: &Path) -> Result<PartialConfig, ConfigError> {
    let file: ConfigFile = toml::from_str(contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(file.machine)
}

/// Load a config file. A missing file is an empty layer, not an error.
pub fn load_config_file(path: &Path) -> Result<PartialConfig, ConfigError> {
    match fs::read_to_string(path) {
        Ok(contents) => parse_config(&contents, path),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(PartialConfig::default()),
        Err(source) => Err(ConfigError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}
