//! Chase soft-decision decoding
//!
//! The Chase family perturbs the least reliable bits of a hard decision,
//! decodes each perturbed word and keeps the one that best explains the soft
//! channel output. Three probe generators are provided:
//!
//! | algorithm        | patterns                                         |
//! |------------------|--------------------------------------------------|
//! | `Exhaustive`     | zero + every weight-`d/2` pattern, C(n, d/2) + 1 |
//! | `LeastReliable`  | all 2^(d/2) patterns on the `d/2` weakest bits   |
//! | `SinglePattern`  | one fixed pattern on the `d-1` weakest bits      |
//!
//! The result is maximum likelihood only over the generated set: if the true
//! error pattern is never probed it cannot be found.

mod decision;
mod decoder;
mod probe;

use std::fmt;
use std::str::FromStr;

use snafu::ensure;
use tracing::{instrument, trace};

pub use decision::{add_error_vector, calculate_distance, make_decision, Candidate};
pub use decoder::{ChaseConfig, ChaseDecision, ChaseDecoder};
pub use probe::{exhaustive_probes, least_reliable_probes, single_pattern_probe, MAX_PROBES};

use crate::error::{Result, SoftLengthSnafu, WrongCodewordLengthSnafu};
use crate::hamming::CodeParams;

/// Probe generation strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProbeAlgorithm {
    /// Every pattern of weight `d/2`
    Exhaustive,
    /// All combinations over the `d/2` least reliable positions
    #[default]
    LeastReliable,
    /// One deterministic pattern over the `d-1` least reliable positions
    SinglePattern,
}

impl ProbeAlgorithm {
    /// Generate the error patterns for an `n`-bit word
    ///
    /// `Exhaustive` ignores the reliability vector.
    pub fn probes(self, n: usize, d: usize, reliability: &[f64]) -> Result<Vec<Vec<u8>>> {
        match self {
            ProbeAlgorithm::Exhaustive => exhaustive_probes(n, d),
            ProbeAlgorithm::LeastReliable => least_reliable_probes(n, d, reliability),
            ProbeAlgorithm::SinglePattern => single_pattern_probe(n, d, reliability),
        }
    }
}

impl fmt::Display for ProbeAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProbeAlgorithm::Exhaustive => "exhaustive",
            ProbeAlgorithm::LeastReliable => "least-reliable",
            ProbeAlgorithm::SinglePattern => "single-pattern",
        };
        f.write_str(name)
    }
}

impl FromStr for ProbeAlgorithm {
    type Err = String;

    /// Accepts the numeric identifiers `1`, `2`, `3` or the display names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "exhaustive" => Ok(ProbeAlgorithm::Exhaustive),
            "2" | "least-reliable" => Ok(ProbeAlgorithm::LeastReliable),
            "3" | "single-pattern" => Ok(ProbeAlgorithm::SinglePattern),
            other => Err(format!("Unknown probe algorithm: {}", other)),
        }
    }
}

/// Candidate words for a hard-decision message
///
/// `r` selects the Hamming code; the message must be a plain (n) or extended
/// (n+1) word of that code and `reliability` must be aligned with it. Each
/// probe of the chosen algorithm is XORed onto the message, in generation
/// order.
#[instrument(level = "trace", skip(message, reliability), fields(len = message.len()))]
pub fn calculate_candidates(
    message: &[u8],
    r: usize,
    d: usize,
    reliability: &[f64],
    algorithm: ProbeAlgorithm,
) -> Result<Vec<Vec<u8>>> {
    let params = CodeParams::new(r)?;
    ensure!(
        message.len() == params.n() || message.len() == params.extended_len(),
        WrongCodewordLengthSnafu {
            n: params.n(),
            extended: params.extended_len(),
            actual: message.len()
        }
    );
    ensure!(
        reliability.len() == message.len(),
        SoftLengthSnafu {
            what: "reliability vector",
            expected: message.len(),
            actual: reliability.len()
        }
    );

    let probes = algorithm.probes(message.len(), d, reliability)?;
    let candidates = probes
        .iter()
        .map(|probe| add_error_vector(message, probe))
        .collect::<Result<Vec<_>>>()?;

    trace!(count = candidates.len(), "generated candidates");

    Ok(candidates)
}
