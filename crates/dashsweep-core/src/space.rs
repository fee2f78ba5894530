//! This module defines [`ConfigSpace`], the parameter domains of a sweep and
//! the enumeration of their cross product.

use itertools::iproduct;

use crate::config::{AdaptationAlgorithm, Configuration, SimulationId, TransportProtocol};

/// The parameter domains of a sweep.
///
/// Enumeration order is fixed, outer to inner: protocol, algorithm, bit rate,
/// error rate (when the dimension is present), pacing. Identifiers are
/// assigned in enumeration order starting at the caller's offset, so resuming
/// an interrupted sweep only requires passing the next unused identifier.
#[derive(Debug, Clone, typed_builder::TypedBuilder)]
pub struct ConfigSpace {
    /// Transport protocols to cover.
    pub protocols: Vec<TransportProtocol>,
    /// Adaptation algorithms to cover.
    pub algorithms: Vec<AdaptationAlgorithm>,
    /// Link bit rate tokens to cover.
    pub bit_rates: Vec<String>,
    /// Packet-loss fractions to cover; `None` omits the dimension entirely,
    /// which also drops its segment from the output layout.
    #[builder(default)]
    pub error_rates: Option<Vec<f64>>,
    /// Pacing states to cover.
    #[builder(default = vec![true, false])]
    pub pacing: Vec<bool>,
}

impl ConfigSpace {
    /// Validate the domains.
    ///
    /// Correctness properties:
    ///
    /// - Every error rate must be a fraction in `[0, 1]`.
    pub fn validate(&self) -> Result<(), SpaceError> {
        if let Some(rates) = &self.error_rates {
            for &rate in rates {
                if !(0.0..=1.0).contains(&rate) {
                    return Err(SpaceError::InvalidErrorRate { rate });
                }
            }
        }
        Ok(())
    }

    /// The number of configurations in the cross product.
    pub fn len(&self) -> usize {
        self.protocols.len()
            * self.algorithms.len()
            * self.bit_rates.len()
            * self.error_rates.as_ref().map_or(1, Vec::len)
            * self.pacing.len()
    }

    /// Whether the cross product is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Enumerate the cross product lazily, assigning identifiers from
    /// `first_id` upwards with no gaps. Re-invoking with the same offset
    /// reproduces the identical sequence.
    pub fn configurations(
        &self,
        first_id: SimulationId,
    ) -> impl Iterator<Item = Configuration> + '_ {
        // A space without the error-rate dimension enumerates a single `None`.
        let error_rates = match &self.error_rates {
            Some(rates) => rates.iter().copied().map(Some).collect::<Vec<_>>(),
            None => vec![None],
        };
        iproduct!(
            self.protocols.iter().copied(),
            self.algorithms.iter().copied(),
            self.bit_rates.iter().cloned(),
            error_rates,
            self.pacing.iter().copied()
        )
        .enumerate()
        .map(
            move |(nr, (protocol, algorithm, bit_rate, error_rate, pacing))| Configuration {
                id: first_id + SimulationId::new(nr as u64),
                protocol,
                algorithm,
                bit_rate,
                pacing,
                error_rate,
            },
        )
    }
}

/// Parameter-domain error.
#[derive(Debug, thiserror::Error)]
pub enum SpaceError {
    /// An error rate is outside `[0, 1]`.
    #[error("error rate {rate} is not a fraction in [0, 1]")]
    InvalidErrorRate {
        /// The offending value.
        rate: f64,
    },
}
