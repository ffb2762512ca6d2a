//! Source directory listing.

use crate::error::{DispatchError, Result};
use crate::job::{parse_file_name, ImportJob, ParseOutcome};
use std::fs;
use std::path::Path;
use tracing::trace;

/// List `dir` once and return the eligible jobs in enumeration order.
///
/// Not recursive. Entries are kept in whatever order `read_dir` yields them.
/// Directories, non-UTF-8 names and names that do not match are skipped
/// without error.
pub fn scan_dir(dir: &Path) -> Result<Vec<ImportJob>> {
    let read_err = |source| DispatchError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let entries = fs::read_dir(dir)
        .map_err(read_err)?
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(read_err)?;

    let mut jobs = Vec::new();
    for entry in entries {
        let path = entry.path();
        // fs::metadata follows symlinks, so a link to a regular file counts
        if !fs::metadata(&path).map(|m| m.is_file()).unwrap_or(false) {
            trace!(path = %path.display(), "Skipping non-file entry");
            continue;
        }

        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            trace!(path = %path.display(), "Skipping non UTF-8 file name");
            continue;
        };

        match parse_file_name(dir, &name) {
            ParseOutcome::Matched(job) => jobs.push(job),
            ParseOutcome::Skipped => trace!(file = %name, "Skipping file"),
        }
    }

    Ok(jobs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tempfile::TempDir;

    #[test]
    fn empty_directory_yields_nothing() {
        let dir = TempDir::new().unwrap();
        assert!(scan_dir(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn only_matching_regular_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("swagger.deploy.abc123.prod.json"), "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::write(dir.path().join("swagger.deploy.xyz.dev.json"), "{}").unwrap();
        fs::create_dir(dir.path().join("swagger.deploy.dir.prod.json")).unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/swagger.deploy.deep.prod.json"), "{}").unwrap();

        let jobs = scan_dir(dir.path()).unwrap();
        let found: HashSet<_> = jobs
            .iter()
            .map(|j| (j.gateway_id.as_str(), j.stage.as_str()))
            .collect();
        assert_eq!(found, HashSet::from([("abc123", "prod"), ("xyz", "dev")]));
        assert!(jobs.iter().all(|j| j.file_path.parent() == Some(dir.path())));
    }

    #[test]
    fn order_follows_read_dir() {
        let dir = TempDir::new().unwrap();
        for id in ["c", "a", "b"] {
            fs::write(dir.path().join(format!("swagger.deploy.{id}.dev.json")), "{}").unwrap();
        }
        let listed: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        let scanned: Vec<String> = scan_dir(dir.path())
            .unwrap()
            .iter()
            .map(|j| j.file_name())
            .collect();
        assert_eq!(scanned, listed);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_file_is_eligible() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("api.json");
        fs::write(&target, "{}").unwrap();
        std::os::unix::fs::symlink(&target, dir.path().join("swagger.deploy.ln.qa.json")).unwrap();

        let jobs = scan_dir(dir.path()).unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].gateway_id, "ln");
    }

    // Linux is the only common target that stores arbitrary bytes in file names
    #[cfg(target_os = "linux")]
    #[test]
    fn non_utf8_name_is_skipped() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = TempDir::new().unwrap();
        let raw = OsStr::from_bytes(b"swagger.deploy.\xffid.prod.json");
        fs::write(dir.path().join(raw), "{}").unwrap();
        fs::write(dir.path().join("swagger.deploy.ok.prod.json"), "{}").unwrap();

        let jobs = scan_dir(dir.path()).unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].gateway_id, "ok");
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = scan_dir(&dir.path().join("absent")).unwrap_err();
        assert!(matches!(err, DispatchError::ReadDir { .. }));
    }
}
