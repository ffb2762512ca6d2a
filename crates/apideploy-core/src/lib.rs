// apideploy-core - Import Job parsing and the scan-and-dispatch pass
//
// Everything here is synchronous: one directory listing, then one blocking
// importer process per eligible file.

pub mod dispatcher;
pub mod error;
pub mod importer;
pub mod job;
pub mod report;
pub mod scan;

pub use dispatcher::{Dispatcher, DispatcherConfig};
pub use error::{DispatchError, ErrorCode, Result};
pub use importer::{CommandImporter, Importer};
pub use job::{parse_file_name, ImportJob, ParseOutcome};
pub use report::{DeployReport, ImportOutcome, InvocationStatus};
pub use scan::scan_dir;

// Re-exported so callers only need one crate for the policy type
pub use apideploy_config::FailurePolicy;
