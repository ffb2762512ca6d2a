// apideploy - import API definitions into API Gateway
//
// Library half of the CLI: wires a validated DeployConfig to the
// dispatcher and the real importer command.

use anyhow::{Context, Result};
use apideploy_config::DeployConfig;
use apideploy_core::{
    CommandImporter, DeployReport, DispatchError, Dispatcher, DispatcherConfig, ImportJob,
};
use tracing::{info, warn};

mod init;

pub use init::init_tracing;

fn dispatcher(config: &DeployConfig) -> Result<Dispatcher<CommandImporter>> {
    let importer = CommandImporter::new(&config.importer);
    info!(
        region = %config.region,
        importer = %importer.program().display(),
        "Using importer"
    );
    Dispatcher::new(DispatcherConfig::from(config), importer).context("Failed to set up dispatcher")
}

/// Run one deploy pass. `config` must already be validated.
pub fn deploy(config: &DeployConfig) -> Result<DeployReport> {
    info!(source_dir = %config.source_dir.display(), "Deploying API definitions");
    let report = match dispatcher(config)?.run() {
        Ok(report) => report,
        Err(err) => {
            if let DispatchError::ImportFailed { report, .. } = &err {
                warn!(
                    attempted = report.attempted(),
                    succeeded = report.succeeded(),
                    "Deploy pass stopped early"
                );
            }
            return Err(err.into());
        }
    };

    for failure in report.failures() {
        info!(
            gateway_id = %failure.job.gateway_id,
            stage = %failure.job.stage,
            status = %failure.status,
            "Not deployed"
        );
    }
    Ok(report)
}

/// List the jobs a deploy pass would run
pub fn plan(config: &DeployConfig) -> Result<Vec<ImportJob>> {
    Ok(dispatcher(config)?.plan()?)
}
