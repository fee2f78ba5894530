//! End-to-end sweeps against a stub `waf` standing in for the real engine.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use dashsweep::core::{AdaptationAlgorithm, ConfigSpace, SimulationId, TransportProtocol};
use dashsweep::Sweep;

/// Prints like the engine and writes the artifacts the real engine would:
/// a download log and a playback log under `dash-log-files/festive/<id>/`.
const FAKE_WAF: &str = r#"#!/bin/sh
echo "fake waf invoked with: $1"
echo "no display detected" >&2
id=$(printf '%s\n' "$1" | sed 's/.*--simulationId=\([0-9]*\).*/\1/')
dir="dash-log-files/festive/$id"
mkdir -p "$dir"
printf '0 821 1500\n1 1432 1500\n2 2844 1500\n' > "$dir/cl0_downloadLog.txt"
printf 'playback\n' > "$dir/cl0_playbackLog.txt"
"#;

fn install_fake_waf(ns3_dir: &Path) -> anyhow::Result<()> {
    let waf = ns3_dir.join("waf");
    fs::write(&waf, FAKE_WAF)?;
    fs::set_permissions(&waf, fs::Permissions::from_mode(0o755))?;
    Ok(())
}

fn festive_space() -> ConfigSpace {
    ConfigSpace::builder()
        .protocols(vec![TransportProtocol::Tcp])
        .algorithms(vec![AdaptationAlgorithm::Festive])
        .bit_rates(vec!["1Mbps".to_owned()])
        .pacing(vec![true])
        .build()
}

#[test]
fn sweep_collates_engine_output() -> anyhow::Result<()> {
    let ns3_dir = tempfile::tempdir()?;
    let base_dir = tempfile::tempdir()?;
    install_fake_waf(ns3_dir.path())?;

    let sweep = Sweep::builder()
        .space(festive_space())
        .ns3_dir(ns3_dir.path())
        .base_dir(base_dir.path())
        .build();
    sweep.run()?;

    let run_dir = base_dir.path().join("TCP/festive/1Mbps/pacing");
    let log = fs::read_to_string(run_dir.join("output_TCP_festive_1Mbps_pacing.log"))?;
    assert!(log.contains("--transportProtocol=TCP"));
    assert!(
        log.contains("no display detected"),
        "stderr must be merged into the run log"
    );
    assert!(run_dir.join("cl0_downloadLog.txt").is_file());
    assert!(run_dir.join("cl0_playbackLog.txt").is_file());
    Ok(())
}

#[test]
fn resumed_sweep_passes_the_offset_to_the_engine() -> anyhow::Result<()> {
    let ns3_dir = tempfile::tempdir()?;
    let base_dir = tempfile::tempdir()?;
    install_fake_waf(ns3_dir.path())?;

    let sweep = Sweep::builder()
        .space(festive_space())
        .ns3_dir(ns3_dir.path())
        .base_dir(base_dir.path())
        .first_id(SimulationId::new(5))
        .build();
    sweep.run()?;

    // The stub staged its artifacts under the resumed identifier.
    assert!(ns3_dir
        .path()
        .join("dash-log-files/festive/5/cl0_downloadLog.txt")
        .is_file());
    Ok(())
}

#[test]
fn missing_engine_fails_the_sweep() -> anyhow::Result<()> {
    let ns3_dir = tempfile::tempdir()?;
    let base_dir = tempfile::tempdir()?;
    // No waf installed.
    let sweep = Sweep::builder()
        .space(festive_space())
        .ns3_dir(ns3_dir.path())
        .base_dir(base_dir.path())
        .build();
    assert!(sweep.run().is_err());
    Ok(())
}
