//! Run configurations and the closed parameter enums they are built from.

use std::fmt;

identifier!(SimulationId, u64);

/// The transport protocol carrying the streaming session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransportProtocol {
    /// QUIC.
    Quic,
    /// TCP.
    Tcp,
}

impl TransportProtocol {
    /// The token the engine's command-line parser expects.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportProtocol::Quic => "QUIC",
            TransportProtocol::Tcp => "TCP",
        }
    }
}

impl fmt::Display for TransportProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The bitrate-selection strategy used by the simulated streaming client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdaptationAlgorithm {
    /// PANDA.
    Panda,
    /// FESTIVE.
    Festive,
    /// TOBASCO.
    Tobasco,
}

impl AdaptationAlgorithm {
    /// The token the engine's command-line parser expects.
    pub fn as_str(&self) -> &'static str {
        match self {
            AdaptationAlgorithm::Panda => "panda",
            AdaptationAlgorithm::Festive => "festive",
            AdaptationAlgorithm::Tobasco => "tobasco",
        }
    }
}

impl fmt::Display for AdaptationAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The parameters of a single simulation run.
///
/// Configurations are produced by
/// [`ConfigSpace::configurations`](crate::ConfigSpace::configurations) and
/// consumed read-only. Nothing represents a run after it completes beyond the
/// files it caused to be written.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Configuration {
    /// Sweep-unique, strictly increasing run identifier.
    pub id: SimulationId,
    /// Transport protocol under test.
    pub protocol: TransportProtocol,
    /// Adaptation algorithm under test.
    pub algorithm: AdaptationAlgorithm,
    /// Link bit rate token with unit suffix (e.g. `1Mbps`), passed to the
    /// engine verbatim.
    pub bit_rate: String,
    /// Whether send pacing is enabled.
    pub pacing: bool,
    /// Packet-loss fraction in `[0, 1]`; `None` when the sweep has no
    /// error-rate dimension.
    pub error_rate: Option<f64>,
}

impl Configuration {
    /// Label used for the pacing state in path segments and log filenames.
    pub fn pacing_label(&self) -> &'static str {
        if self.pacing {
            "pacing"
        } else {
            "no-pacing"
        }
    }
}
