//! Derived on-disk locations for a run. Everything here is a pure function of
//! a configuration; directory creation happens at run time in `ns3-dash`.

use std::path::PathBuf;

use crate::config::Configuration;

/// The engine-owned staging area, relative to the engine's working directory.
const ENGINE_LOG_ROOT: &str = "dash-log-files";

/// Derives where a run's collated outputs live under a base directory.
///
/// The directory tree encodes every parameter but not the identifier: two
/// configurations that differ only in `id` share one location, and re-running
/// the same parameter tuple overwrites the earlier results. Use a different
/// base directory to keep repeated sweeps apart.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    base: PathBuf,
}

impl OutputLayout {
    /// Creates a layout rooted at `base`.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// The run's output directory,
    /// `{base}/{protocol}/{algorithm}/{bitrate}/[{errorRate}/]{pacing|no-pacing}/`.
    pub fn output_dir(&self, config: &Configuration) -> PathBuf {
        let mut dir = self.base.join(config.protocol.as_str());
        dir.push(config.algorithm.as_str());
        dir.push(&config.bit_rate);
        if let Some(rate) = config.error_rate {
            dir.push(rate.to_string());
        }
        dir.push(config.pacing_label());
        dir
    }

    /// The run log's filename,
    /// `output_{protocol}_{algorithm}_{bitrate}_{pacing|no-pacing}.log`.
    pub fn log_file_name(&self, config: &Configuration) -> String {
        format!(
            "output_{}_{}_{}_{}.log",
            config.protocol,
            config.algorithm,
            config.bit_rate,
            config.pacing_label()
        )
    }

    /// Full path of the run's merged stdout/stderr log.
    pub fn log_path(&self, config: &Configuration) -> PathBuf {
        self.output_dir(config).join(self.log_file_name(config))
    }
}

/// The engine's own artifact directory for a run,
/// `dash-log-files/{algorithm}/{id}/`, relative to the engine's working
/// directory. The engine creates and populates it; this harness only reads
/// from it and never cleans it up.
pub fn engine_log_dir(config: &Configuration) -> PathBuf {
    let mut dir = PathBuf::from(ENGINE_LOG_ROOT);
    dir.push(config.algorithm.as_str());
    dir.push(config.id.to_string());
    dir
}
