use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::Parser;
use dashsweep::core::{AdaptationAlgorithm, ConfigSpace, SimulationId, TransportProtocol};
use dashsweep::Sweep;

/// The link bit rates covered by a full sweep.
const BIT_RATES: &[&str] = &[
    "100Kbps", "500Kbps", "1Mbps", "2Mbps", "3Mbps", "4Mbps", "5Mbps", "10Mbps", "100Mbps",
    "500Mbps", "1Gbps",
];

/// Run the full DASH streaming simulation sweep, collating all results under
/// one directory tree.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Directory receiving the collated logs and artifacts
    base_dir: PathBuf,

    /// Identifier of the first simulation (used to resume an earlier sweep)
    #[arg(default_value_t)]
    first_id: SimulationId,

    /// ns-3 source tree containing ./waf and the dash-log-files workspace
    #[arg(long, default_value = ".")]
    ns3_dir: PathBuf,

    /// Packet-loss fraction in [0, 1]; repeat to sweep several, omit to skip
    /// the error-rate dimension
    #[arg(long = "error-rate", value_name = "RATE")]
    error_rates: Vec<f64>,
}

fn main() -> anyhow::Result<()> {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            err.print()?;
            // Usage errors exit with status 1, not clap's default 2.
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            std::process::exit(code);
        }
    };
    pretty_env_logger::init();

    let space = ConfigSpace::builder()
        .protocols(vec![TransportProtocol::Quic, TransportProtocol::Tcp])
        .algorithms(vec![
            AdaptationAlgorithm::Panda,
            AdaptationAlgorithm::Festive,
            AdaptationAlgorithm::Tobasco,
        ])
        .bit_rates(BIT_RATES.iter().map(|rate| rate.to_string()).collect())
        .error_rates((!args.error_rates.is_empty()).then_some(args.error_rates))
        .build();

    println!("Saving all log files under {}\n", args.base_dir.display());
    let sweep = Sweep::builder()
        .space(space)
        .ns3_dir(args.ns3_dir)
        .base_dir(args.base_dir)
        .first_id(args.first_id)
        .build();
    sweep.run()?;
    Ok(())
}
