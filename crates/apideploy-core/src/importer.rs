//! The external import tool, seen as a blocking command.

use crate::job::ImportJob;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use tracing::debug;

/// Runs one import and reports how the process ended.
///
/// Implementations block until the import is finished.
pub trait Importer {
    fn import(&self, region: &str, job: &ImportJob) -> io::Result<ExitStatus>;
}

/// Spawns the importer program with inherited stdio
#[derive(Debug, Clone)]
pub struct CommandImporter {
    program: PathBuf,
}

impl CommandImporter {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Importer for CommandImporter {
    fn import(&self, region: &str, job: &ImportJob) -> io::Result<ExitStatus> {
        let args = job.importer_args(region);
        debug!(program = %self.program.display(), ?args, "Spawning importer");
        Command::new(&self.program).args(&args).status()
    }
}
