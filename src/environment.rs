use crate::config::CiConfig;
use tracing::debug;

/// Where the tool is running
///
/// Build-server detection is independent of mocking: the two flags
/// are checked together wherever destructive operations are gated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Environment {
    pub is_build_server: bool,
}

impl Environment {
    pub fn build_server() -> Self {
        Environment {
            is_build_server: true,
        }
    }

    pub fn local() -> Self {
        Environment {
            is_build_server: false,
        }
    }

    /// Inspect the process environment (e.g. `SYSTEM_SERVERTYPE=hosted` on Azure Pipelines)
    pub fn detect(ci: &CiConfig) -> Self {
        let is_build_server = std::env::var(&ci.server_env)
            .map(|value| value == ci.server_value)
            .unwrap_or(false);
        debug!(
            server_env = %ci.server_env,
            is_build_server,
            "detected environment"
        );

        Environment { is_build_server }
    }
}
