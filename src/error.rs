/// Error types for multivalue
///
/// `CommandError` covers everything a user can trigger from a command line;
/// the interpreter prints it and keeps going. `MultiValueError` covers startup
/// and terminal I/O failures that end the process. Uses thiserror for
/// ergonomic error handling.

use thiserror::Error;

/// Expected, user-facing failures of a single command
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Member is already in the key's set
    #[error("member already exists for key")]
    AlreadyExists,

    /// Key has no members (and so does not exist)
    #[error("key does not exist")]
    KeyNotFound,

    /// Key exists but the member is not in its set
    #[error("member does not exist")]
    MemberNotFound,

    /// Action token did not match any known command
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// Known command called with the wrong number of arguments
    #[error("{command} expects {expected} argument(s), got {got}")]
    IncorrectArgumentCount {
        command: &'static str,
        expected: usize,
        got: usize,
    },

    /// Input line was not valid UTF-8
    #[error("input is not valid UTF-8")]
    InvalidEncoding,
}

/// Result type alias for single-command operations
pub type CommandResult<T> = std::result::Result<T, CommandError>;

impl CommandError {
    /// The exact line the interpreter prints for this error
    pub fn user_message(&self) -> &'static str {
        match self {
            CommandError::AlreadyExists => ") ERROR, member already exists for key",
            CommandError::KeyNotFound => ") ERROR, key does not exist",
            CommandError::MemberNotFound => ") ERROR, member does not exist",
            CommandError::UnknownCommand(_) => ") ERROR, unknown command",
            CommandError::IncorrectArgumentCount { .. } => {
                ") ERROR, incorrect number of arguments"
            }
            CommandError::InvalidEncoding => ") ERROR, input is not valid UTF-8",
        }
    }
}

/// Process-level failures: config loading and terminal I/O
#[derive(Error, Debug)]
pub enum MultiValueError {
    /// I/O errors (stdin, stdout, config file)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for multivalue operations
pub type Result<T> = std::result::Result<T, MultiValueError>;
