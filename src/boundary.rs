use std::fmt;

/// Non-fatal conditions worth reporting to whoever reads the build log.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// A read-only listing failed off the build server and was treated as empty
    ListingUnavailable { command: String, reason: String },
    /// Mock responses are active on a build server
    MockingOnBuildServer { mocked_commands: usize },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::ListingUnavailable { command, reason } => {
                let reason = reason.trim();
                let reason = if reason.is_empty() {
                    "no diagnostic output"
                } else {
                    reason
                };
                write!(
                    f,
                    "Ignoring failure of '{}' outside the build server, treating it as empty: {}",
                    command, reason
                )
            }
            BoundaryWarning::MockingOnBuildServer { mocked_commands } => {
                write!(
                    f,
                    "{} mocked command(s) active on the build server",
                    mocked_commands
                )
            }
        }
    }
}
