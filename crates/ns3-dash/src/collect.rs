//! Collection of engine artifacts after a run: a flat copy of the staging
//! directory, plus the one metric the harness derives itself.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::Error;

/// The per-client download log the engine writes for every run.
const DOWNLOAD_LOG: &str = "cl0_downloadLog.txt";

/// Copy every regular file directly under `staging` into `output_dir`,
/// preserving filenames and overwriting collisions. Subdirectories are not
/// recursed into. Returns the number of files copied.
///
/// A missing staging directory is an error: it means the engine produced
/// nothing for the run.
pub fn copy_artifacts(staging: &Path, output_dir: &Path) -> Result<usize, Error> {
    let mut nr_copied = 0;
    for entry in fs::read_dir(staging)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        fs::copy(entry.path(), output_dir.join(entry.file_name()))?;
        nr_copied += 1;
    }
    debug!(
        "copied {nr_copied} artifact(s) out of {}",
        staging.display()
    );
    Ok(nr_copied)
}

/// Count of segments the client successfully downloaded, derived from the
/// engine's download log in `staging`.
///
/// Every line of the log starts with a 0-based segment index and the indices
/// grow monotonically, so the first token of the last non-empty line is the
/// highest index reached and the count is that index plus one.
pub fn segments_downloaded(staging: &Path) -> Result<u64, Error> {
    let path = staging.join(DOWNLOAD_LOG);
    let contents = fs::read_to_string(&path)?;
    let last_line = contents
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .ok_or_else(|| ParseLogError::Empty { path: path.clone() })?;
    let token = last_line
        .split_whitespace()
        .next()
        .ok_or_else(|| ParseLogError::Empty { path: path.clone() })?;
    let max_index =
        token
            .parse::<u64>()
            .map_err(|source| ParseLogError::BadSegmentIndex {
                token: token.to_owned(),
                source,
            })?;
    Ok(max_index + 1)
}

/// Error parsing the engine's download log.
#[derive(Debug, thiserror::Error)]
pub enum ParseLogError {
    /// The log contains no non-empty lines.
    #[error("download log {path} is empty")]
    Empty {
        /// Path of the offending log.
        path: PathBuf,
    },

    /// The last line does not start with an integer segment index.
    #[error("invalid segment index {token:?} in download log")]
    BadSegmentIndex {
        /// The token that failed to parse.
        token: String,
        /// The underlying parse failure.
        source: std::num::ParseIntError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copies_only_regular_files() -> anyhow::Result<()> {
        let staging = tempfile::tempdir()?;
        let output = tempfile::tempdir()?;
        fs::write(staging.path().join("a.txt"), "a")?;
        fs::write(staging.path().join("b.csv"), "b")?;
        fs::create_dir(staging.path().join("sub"))?;
        fs::write(staging.path().join("sub").join("c.txt"), "c")?;
        let nr_copied = copy_artifacts(staging.path(), output.path())?;
        assert_eq!(nr_copied, 2);
        assert!(output.path().join("a.txt").is_file());
        assert!(output.path().join("b.csv").is_file());
        assert!(!output.path().join("sub").exists());
        Ok(())
    }

    #[test]
    fn copy_overwrites_existing_files() -> anyhow::Result<()> {
        let staging = tempfile::tempdir()?;
        let output = tempfile::tempdir()?;
        fs::write(staging.path().join("a.txt"), "new")?;
        fs::write(output.path().join("a.txt"), "old")?;
        copy_artifacts(staging.path(), output.path())?;
        assert_eq!(fs::read_to_string(output.path().join("a.txt"))?, "new");
        Ok(())
    }

    #[test]
    fn missing_staging_dir_is_an_io_error() {
        let output = tempfile::tempdir().unwrap();
        let staging = output.path().join("never-created");
        let err = copy_artifacts(&staging, output.path()).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn count_is_last_segment_index_plus_one() -> anyhow::Result<()> {
        let staging = tempdir_with_log("0 921 1500\n1 1843 1500\n41 38212 1500\n")?;
        assert_eq!(segments_downloaded(staging.path())?, 42);
        Ok(())
    }

    #[test]
    fn single_segment_counts_as_one() -> anyhow::Result<()> {
        let staging = tempdir_with_log("0 x\n")?;
        assert_eq!(segments_downloaded(staging.path())?, 1);
        Ok(())
    }

    #[test]
    fn trailing_blank_lines_are_skipped() -> anyhow::Result<()> {
        let staging = tempdir_with_log("0 a\n1 b\n\n   \n")?;
        assert_eq!(segments_downloaded(staging.path())?, 2);
        Ok(())
    }

    #[test]
    fn empty_log_fails_to_parse() -> anyhow::Result<()> {
        let staging = tempdir_with_log("")?;
        let err = segments_downloaded(staging.path()).unwrap_err();
        assert!(matches!(err, Error::ParseLog(ParseLogError::Empty { .. })));
        Ok(())
    }

    #[test]
    fn non_integer_index_fails_to_parse() -> anyhow::Result<()> {
        let staging = tempdir_with_log("segment forty-one\n")?;
        let err = segments_downloaded(staging.path()).unwrap_err();
        assert!(matches!(
            err,
            Error::ParseLog(ParseLogError::BadSegmentIndex { .. })
        ));
        Ok(())
    }

    #[test]
    fn missing_log_is_an_io_error() {
        let staging = tempfile::tempdir().unwrap();
        let err = segments_downloaded(staging.path()).unwrap_err();
        match err {
            Error::Io(err) => assert_eq!(err.kind(), std::io::ErrorKind::NotFound),
            other => panic!("expected an IO error, got {other:?}"),
        }
    }

    fn tempdir_with_log(contents: &str) -> anyhow::Result<tempfile::TempDir> {
        let staging = tempfile::tempdir()?;
        fs::write(staging.path().join(DOWNLOAD_LOG), contents)?;
        Ok(staging)
    }
}
