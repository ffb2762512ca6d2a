use crate::job::ImportJob;
use std::fmt;
use std::io;
use std::process::ExitStatus;

/// How a single importer invocation ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationStatus {
    Succeeded,
    /// Exited non-zero; `code` is `None` when killed by a signal.
    Failed {
        code: Option<i32>,
    },
    /// The process could not be started at all.
    SpawnFailed {
        message: String,
    },
}

impl InvocationStatus {
    pub fn from_result(result: io::Result<ExitStatus>) -> Self {
        match result {
            Ok(status) if status.success() => InvocationStatus::Succeeded,
            Ok(status) => InvocationStatus::Failed {
                code: status.code(),
            },
            Err(err) => InvocationStatus::SpawnFailed {
                message: err.to_string(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, InvocationStatus::Succeeded)
    }
}

impl fmt::Display for InvocationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvocationStatus::Succeeded => write!(f, "succeeded"),
            InvocationStatus::Failed { code: Some(code) } => write!(f, "exit code {}", code),
            InvocationStatus::Failed { code: None } => write!(f, "terminated by signal"),
            InvocationStatus::SpawnFailed { message } => {
                write!(f, "could not start importer: {}", message)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOutcome {
    pub job: ImportJob,
    pub status: InvocationStatus,
}

/// Everything a pass attempted, in invocation order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployReport {
    pub outcomes: Vec<ImportOutcome>,
}

impl DeployReport {
    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.status.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.attempted() - self.succeeded()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &ImportOutcome> {
        self.outcomes.iter().filter(|o| !o.status.is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn outcome(id: &str, status: InvocationStatus) -> ImportOutcome {
        ImportOutcome {
            job: ImportJob {
                gateway_id: id.to_string(),
                stage: "dev".to_string(),
                file_path: PathBuf::from(format!("/usr/src/swagger.deploy.{id}.dev.json")),
            },
            status,
        }
    }

    #[test]
    fn counts() {
        let report = DeployReport {
            outcomes: vec![
                outcome("a", InvocationStatus::Succeeded),
                outcome("b", InvocationStatus::Failed { code: Some(1) }),
                outcome(
                    "c",
                    InvocationStatus::SpawnFailed {
                        message: "No such file or directory".into(),
                    },
                ),
            ],
        };
        assert_eq!(report.attempted(), 3);
        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.failed(), 2);
        assert!(!report.is_success());
        let failed: Vec<_> = report.failures().map(|o| o.job.gateway_id.as_str()).collect();
        assert_eq!(failed, ["b", "c"]);
    }

    #[test]
    fn empty_report_is_a_success() {
        assert!(DeployReport::default().is_success());
    }

    #[test]
    fn spawn_error_maps_to_spawn_failed() {
        let status = InvocationStatus::from_result(Err(io::Error::new(
            io::ErrorKind::NotFound,
            "missing",
        )));
        assert_eq!(
            status.to_string(),
            "could not start importer: missing"
        );
    }
}
