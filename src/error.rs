use thiserror::Error;

/// Failure of a single pipeline stage.
///
/// The first stage that fails aborts the whole pipeline, and its error is handed to the
/// caller unchanged.
#[derive(Debug, Error)]
pub enum ExecuteError {
    /// `cat` or `wc` was asked to read a file that does not exist or cannot be opened.
    #[error("{command}: {file}: no such file")]
    FileNotFound { command: &'static str, file: String },

    /// Any other failure: bad argument count, write failure, spawn failure,
    /// non-zero exit of an external program, unknown working directory.
    #[error("{message}")]
    Execution { command: String, message: String },
}

impl ExecuteError {
    pub(crate) fn execution(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Execution {
            command: command.into(),
            message: message.into(),
        }
    }

    /// Name of the command whose stage failed.
    pub fn command(&self) -> &str {
        match self {
            Self::FileNotFound { command, .. } => *command,
            Self::Execution { command, .. } => command.as_str(),
        }
    }
}

/// Errors produced while turning a raw line into command descriptors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// A closing quote (single or double) was not found.
    #[error("unclosed quote `{0}`")]
    UnclosedQuote(char),

    /// A pipe with nothing on one of its sides, e.g. `echo a | | wc`.
    #[error("empty command in pipeline")]
    EmptyCommand,
}
