use crate::error::{AutoVersionError, Result};
use crate::git::CommandRunner;
use git2::Repository as Git2Repo;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Runs commands through `bash -c` in the repository work tree
///
/// Commands go through a shell because some of them are pipelines
/// (see [crate::git::commands::prune_local_untracked_branches]).
pub struct ShellRunner {
    work_dir: PathBuf,
}

impl ShellRunner {
    /// Run commands in the given directory
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        ShellRunner {
            work_dir: work_dir.into(),
        }
    }

    /// Discover the enclosing git repository and run commands at its work tree root
    pub fn discover<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;
        let work_dir = repo.workdir().ok_or_else(|| {
            AutoVersionError::configuration(format!(
                "Repository at {} has no work tree",
                repo.path().display()
            ))
        })?;

        Ok(ShellRunner::new(work_dir))
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str) -> Result<String> {
        let output = Command::new("bash")
            .arg("-c")
            .arg(command)
            .current_dir(&self.work_dir)
            .output()?;

        if !output.status.success() {
            return Err(AutoVersionError::Command {
                command: command.to_string(),
                exit_code: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
