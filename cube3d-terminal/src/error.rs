/// Error type for the terminal front end
use std::io;
use std::path::PathBuf;

use cube3d_core::{InputCommand, UnknownCommand};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read config {path}: {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    SerializeConfig(#[from] toml::ser::Error),

    #[error(transparent)]
    UnknownCommand(#[from] UnknownCommand),

    #[error("Key '{key}' is bound to both {first} and {second}")]
    DuplicateKey {
        key: char,
        first: InputCommand,
        second: InputCommand,
    },

    #[error("Key '{key}' is reserved and cannot be bound to {command}")]
    ReservedKey { key: char, command: InputCommand },
}
