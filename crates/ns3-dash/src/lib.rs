//! An interface to the external ns-3 DASH streaming simulation.
//!
//! This crate is tightly coupled to the command-line surface of the
//! `dash-streaming` scratch program and to the layout of the engine's
//! `dash-log-files` workspace.

#![warn(unreachable_pub, missing_debug_implementations, missing_docs)]

use std::fs::{self, File};
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};

use dashsweep_core::{engine_log_dir, Configuration};

mod collect;

pub use collect::{copy_artifacts, segments_downloaded, ParseLogError};

/// The build wrapper used to launch the engine, resolved inside `ns3_dir`.
const WAF: &str = "waf";
/// The scratch program implementing the streaming simulation.
const SCENARIO: &str = "dash-streaming";

/// One invocation of the external streaming simulation.
#[derive(Debug, typed_builder::TypedBuilder)]
pub struct DashSimulation {
    /// The ns-3 source tree containing `./waf` and the engine's
    /// `dash-log-files` workspace.
    #[builder(setter(into))]
    pub ns3_dir: PathBuf,
    /// Directory receiving the run log and, after collection, the copied
    /// artifacts.
    #[builder(setter(into))]
    pub output_dir: PathBuf,
    /// Full path of the run's merged stdout/stderr log.
    #[builder(setter(into))]
    pub log_path: PathBuf,
    /// The run's parameters.
    pub config: Configuration,
}

impl DashSimulation {
    /// Run the simulation to completion, returning the child's exit status.
    ///
    /// The output directory and its missing ancestors are created first
    /// (pre-existing directories are fine), the run log is opened with
    /// truncation, and the child's stdout and stderr are merged into it as
    /// they are produced. The log's handles are closed on every exit path.
    /// The call blocks until the child exits; a non-zero status is returned,
    /// not raised, leaving the ignore-vs-abort policy to the caller.
    ///
    /// This routine can fail due to IO errors, including a missing or
    /// non-executable `waf`.
    pub fn run(&self) -> Result<ExitStatus, Error> {
        fs::create_dir_all(&self.output_dir)?;
        // Canonicalize so the `waf` path stays valid regardless of the
        // caller's working directory.
        let ns3_dir = fs::canonicalize(&self.ns3_dir)?;
        let log = File::create(&self.log_path)?;
        let status = Command::new(ns3_dir.join(WAF))
            .arg(format!("--run={}", self.waf_run_arg()))
            .current_dir(&ns3_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::from(log.try_clone()?))
            .stderr(Stdio::from(log))
            .status()?;
        Ok(status)
    }

    /// The engine's artifact directory for this run.
    pub fn engine_log_dir(&self) -> PathBuf {
        self.ns3_dir.join(engine_log_dir(&self.config))
    }

    fn waf_run_arg(&self) -> String {
        format!("{SCENARIO} {}", render_flags(&self.config).join(" "))
    }
}

/// Render a configuration as the engine's long-form command-line flags.
///
/// Flag order is fixed for reproducibility; the engine does not care.
fn render_flags(config: &Configuration) -> Vec<String> {
    let mut flags = vec![
        format!("--simulationId={}", config.id),
        format!("--adaptationAlgo={}", config.algorithm),
        format!("--dataRate={}", config.bit_rate),
        format!("--pacingEnabled={}", config.pacing),
        format!("--transportProtocol={}", config.protocol),
    ];
    if let Some(rate) = config.error_rate {
        flags.push(format!("--errorRate={rate}"));
    }
    flags
}

/// The error type for [`DashSimulation::run`] and the artifact collectors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error parsing the engine's download log.
    #[error("failed to parse the engine's download log")]
    ParseLog(#[from] ParseLogError),

    /// IO error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
