//! Import Job parsing.
//!
//! API definitions are picked up by file name alone:
//! `swagger.deploy.<gateway_id>.<stage>.json`. The name must split on `.`
//! into exactly five segments with `deploy` second and `json` last.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

const SEGMENT_COUNT: usize = 5;
const DEPLOY_MARKER: &str = "deploy";
const JSON_EXTENSION: &str = "json";

/// One importer invocation derived from an eligible file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportJob {
    pub gateway_id: String,
    pub stage: String,
    pub file_path: PathBuf,
}

/// Result of matching a file name against the naming convention
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    Matched(ImportJob),
    Skipped,
}

impl ParseOutcome {
    pub fn into_job(self) -> Option<ImportJob> {
        match self {
            ParseOutcome::Matched(job) => Some(job),
            ParseOutcome::Skipped => None,
        }
    }
}

/// Match `name` (a bare file name, no directory part) found in `dir`.
///
/// Only the segment count and the two literals are checked; identifiers are
/// passed through verbatim, empty ones included.
pub fn parse_file_name(dir: &Path, name: &str) -> ParseOutcome {
    let segments: Vec<&str> = name.split('.').collect();
    if segments.len() != SEGMENT_COUNT {
        return ParseOutcome::Skipped;
    }
    if segments[1] != DEPLOY_MARKER || segments[4] != JSON_EXTENSION {
        return ParseOutcome::Skipped;
    }

    ParseOutcome::Matched(ImportJob {
        gateway_id: segments[2].to_string(),
        stage: segments[3].to_string(),
        file_path: dir.join(name),
    })
}

impl ImportJob {
    /// Importer arguments: `-r <region> -u <gateway_id> -d <stage> <file_path>`
    pub fn importer_args(&self, region: &str) -> Vec<OsString> {
        vec![
            "-r".into(),
            region.into(),
            "-u".into(),
            self.gateway_id.as_str().into(),
            "-d".into(),
            self.stage.as_str().into(),
            self.file_path.clone().into_os_string(),
        ]
    }

    pub fn file_name(&self) -> String {
        self.file_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Console line printed before the importer runs
    pub fn progress_line(&self) -> String {
        format!(
            "    Deploy API {} - stage {} - file {}",
            self.gateway_id,
            self.stage,
            self.file_name()
        )
    }
}
