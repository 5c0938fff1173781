use thiserror::Error;

/// Unified error type for git-autoversion operations
#[derive(Error, Debug)]
pub enum AutoVersionError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error(
        "Error executing shell command:\n{command}\nTerminated with non-zero exit value {}\n{stderr}",
        describe_exit(.exit_code)
    )]
    Command {
        command: String,
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    #[error("Attempting dangerous operation with mocked data: {command}")]
    UnsafeMockOperation { command: String },

    #[error("Merge failed, manual resolution required:\n{command}\n{output}")]
    MergeConflict { command: String, output: String },

    #[error("Unexpected output from `{command}`: {output:?}")]
    UnexpectedOutput { command: String, output: String },

    #[error("Config file error: {0}")]
    ConfigFile(String),

    #[error("Git repository error: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "(killed by signal)".to_string(),
    }
}

/// Convenience type alias for Results in git-autoversion
pub type Result<T> = std::result::Result<T, AutoVersionError>;

impl AutoVersionError {
    /// Create a configuration error with context
    pub fn configuration(msg: impl Into<String>) -> Self {
        AutoVersionError::Configuration(msg.into())
    }

    /// Create a config file error with context
    pub fn config_file(msg: impl Into<String>) -> Self {
        AutoVersionError::ConfigFile(msg.into())
    }

    /// Returns true for failures of the underlying command itself, as opposed
    /// to guard or configuration failures raised before anything ran.
    pub fn is_command_failure(&self) -> bool {
        matches!(self, AutoVersionError::Command { .. })
    }
}
