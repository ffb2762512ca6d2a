//! Scan-and-dispatch pass.
//!
//! The source directory is listed once, then every eligible file is handed
//! to the importer in listing order, one blocking invocation at a time.
//! Under [`FailurePolicy::Continue`] a failed import is recorded and the
//! pass moves on; under [`FailurePolicy::StopOnFirstFailure`] the pass ends
//! with [`DispatchError::ImportFailed`], which still carries the report of
//! everything attempted so far.

use crate::error::{DispatchError, Result};
use crate::importer::Importer;
use crate::job::ImportJob;
use crate::report::{DeployReport, ImportOutcome, InvocationStatus};
use crate::scan::scan_dir;
use apideploy_config::{DeployConfig, FailurePolicy};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{info, warn};

/// Settings the dispatcher needs, extracted from the full config
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatcherConfig {
    pub region: String,
    pub source_dir: PathBuf,
    pub failure_policy: FailurePolicy,
}

impl From<&DeployConfig> for DispatcherConfig {
    fn from(config: &DeployConfig) -> Self {
        Self {
            region: config.region.clone(),
            source_dir: config.source_dir.clone(),
            failure_policy: config.failure_policy,
        }
    }
}

pub struct Dispatcher<I> {
    config: DispatcherConfig,
    importer: I,
    progress: Box<dyn Write>,
}

impl<I: Importer> Dispatcher<I> {
    /// Fails with [`DispatchError::MissingRegion`] before anything else
    /// happens if the region is blank.
    pub fn new(config: DispatcherConfig, importer: I) -> Result<Self> {
        if config.region.trim().is_empty() {
            return Err(DispatchError::MissingRegion);
        }
        Ok(Self {
            config,
            importer,
            progress: Box::new(io::stdout()),
        })
    }

    /// Send progress lines somewhere other than stdout
    pub fn with_progress(mut self, progress: impl Write + 'static) -> Self {
        self.progress = Box::new(progress);
        self
    }

    /// Jobs the next pass would run, without running them
    pub fn plan(&self) -> Result<Vec<ImportJob>> {
        scan_dir(&self.config.source_dir)
    }

    /// Run one pass over the source directory
    pub fn run(&mut self) -> Result<DeployReport> {
        let jobs = self.plan()?;
        info!(
            source_dir = %self.config.source_dir.display(),
            eligible = jobs.len(),
            policy = %self.config.failure_policy,
            "Starting deploy pass"
        );

        let mut report = DeployReport::default();
        for job in jobs {
            let status = self.dispatch(&job);

            if status.is_success() {
                info!(gateway_id = %job.gateway_id, stage = %job.stage, "API has been deployed");
            } else {
                warn!(
                    gateway_id = %job.gateway_id,
                    stage = %job.stage,
                    file = %job.file_path.display(),
                    status = %status,
                    "Import failed"
                );
            }

            let stop = !status.is_success()
                && self.config.failure_policy == FailurePolicy::StopOnFirstFailure;
            report.outcomes.push(ImportOutcome {
                job: job.clone(),
                status: status.clone(),
            });
            if stop {
                return Err(DispatchError::ImportFailed {
                    gateway_id: job.gateway_id,
                    stage: job.stage,
                    status,
                    report: Box::new(report),
                });
            }
        }

        info!(
            attempted = report.attempted(),
            succeeded = report.succeeded(),
            failed = report.failed(),
            "Deploy pass complete"
        );
        Ok(report)
    }

    fn dispatch(&mut self, job: &ImportJob) -> InvocationStatus {
        // A closed stdout must not stop the deploy
        let written = writeln!(self.progress, "{}", job.progress_line())
            .and_then(|()| self.progress.flush());
        if let Err(e) = written {
            warn!(error = %e, "Failed to write progress line");
        }

        InvocationStatus::from_result(self.importer.import(&self.config.region, job))
    }
}
