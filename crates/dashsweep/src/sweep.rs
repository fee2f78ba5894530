//! The sweep driver: runs every configuration of a parameter space against
//! the external engine, in sequence, and collates the results.

use std::path::PathBuf;

use log::{debug, warn};

use dashsweep_core::{ConfigSpace, Configuration, OutputLayout, SimulationId, SpaceError};
use ns3_dash::DashSimulation;

/// A sequential sweep over a parameter space.
///
/// Runs are strictly one at a time: the engine's `dash-log-files` staging
/// area is shared across invocations and disambiguated only by simulation
/// identifier, so concurrent runs with colliding identifiers would corrupt
/// each other's artifacts.
#[derive(Debug, typed_builder::TypedBuilder)]
pub struct Sweep {
    /// The parameter domains to cover.
    pub space: ConfigSpace,
    /// The ns-3 source tree containing `./waf`.
    #[builder(setter(into))]
    pub ns3_dir: PathBuf,
    /// Base directory of the collated output tree.
    #[builder(setter(into))]
    pub base_dir: PathBuf,
    /// Identifier of the first run; pass the next unused identifier to resume
    /// an interrupted sweep.
    #[builder(default)]
    pub first_id: SimulationId,
}

impl Sweep {
    /// Run every configuration to completion, in enumeration order.
    ///
    /// Progress is reported on stdout. A run's non-zero exit status is logged
    /// and otherwise ignored: whatever artifacts the engine produced are
    /// still collected, and a run that produced nothing fails the sweep at
    /// the collection step instead. Any other error terminates the sweep at
    /// the failing configuration; completed output directories remain on
    /// disk, and the sweep can be resumed with a fresh identifier offset.
    pub fn run(&self) -> Result<(), Error> {
        self.space.validate()?;
        let layout = OutputLayout::new(&self.base_dir);
        for config in self.space.configurations(self.first_id) {
            println!("{}", describe(&config));
            println!("Running...");
            let sim = DashSimulation::builder()
                .ns3_dir(&self.ns3_dir)
                .output_dir(layout.output_dir(&config))
                .log_path(layout.log_path(&config))
                .config(config)
                .build();
            debug!("run log at {}", sim.log_path.display());
            let status = sim.run()?;
            if !status.success() {
                warn!(
                    "simulation {} exited with {status}; collecting its output anyway",
                    sim.config.id
                );
            }
            ns3_dash::copy_artifacts(&sim.engine_log_dir(), &sim.output_dir)?;
            let nr_segments = ns3_dash::segments_downloaded(&sim.engine_log_dir())?;
            println!("{nr_segments} segments downloaded");
            println!("Done simulation\n");
        }
        Ok(())
    }
}

/// One-line banner describing a run, e.g.
/// `Simulation 3: festive over TCP @ 1Mbps - pacing`.
fn describe(config: &Configuration) -> String {
    let pacing = if config.pacing { "pacing" } else { "no pacing" };
    let mut line = format!(
        "Simulation {}: {} over {} @ {} - {}",
        config.id, config.algorithm, config.protocol, config.bit_rate, pacing
    );
    if let Some(rate) = config.error_rate {
        line.push_str(&format!(" - error rate {rate}"));
    }
    line
}

/// The error type for [`Sweep::run`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The parameter domains are invalid.
    #[error(transparent)]
    InvalidSpace(#[from] SpaceError),

    /// A simulation run or its collection failed.
    #[error(transparent)]
    Sim(#[from] ns3_dash::Error),
}
