//! Candidate construction and maximum-likelihood selection

use snafu::ensure;

use crate::error::{EmptySnafu, NonFiniteSoftSnafu, Result, SoftLengthSnafu, WrongLengthSnafu};
use crate::util::bit_algebra::ensure_binary;

/// A hypothesised codeword and its distance to the soft channel output
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub bits: Vec<u8>,
    pub distance: f64,
}

/// XOR an error pattern onto a hard-decision message
pub fn add_error_vector(message: &[u8], error: &[u8]) -> Result<Vec<u8>> {
    ensure!(!message.is_empty(), EmptySnafu { what: "message" });
    ensure!(
        error.len() == message.len(),
        WrongLengthSnafu {
            what: "error pattern",
            expected: message.len(),
            actual: error.len()
        }
    );
    ensure_binary("message", message)?;
    ensure_binary("error pattern", error)?;

    Ok(message.iter().zip(error).map(|(&m, &e)| m ^ e).collect())
}

/// Sum of `|bit_i - soft_i|` over all positions
pub fn calculate_distance(candidate: &[u8], soft_decisions: &[f64]) -> Result<f64> {
    ensure!(
        soft_decisions.len() == candidate.len(),
        SoftLengthSnafu {
            what: "soft decisions",
            expected: candidate.len(),
            actual: soft_decisions.len()
        }
    );
    ensure_finite(soft_decisions)?;

    Ok(distance_unchecked(candidate, soft_decisions))
}

/// Pick the candidate closest to the soft decisions
///
/// Ties go to the candidate that comes first, i.e. the earliest generated
/// hypothesis wins among equals.
pub fn make_decision(candidates: &[Vec<u8>], soft_decisions: &[f64]) -> Result<Candidate> {
    ensure!(!candidates.is_empty(), EmptySnafu { what: "candidate set" });
    ensure_finite(soft_decisions)?;
    for candidate in candidates {
        ensure!(
            candidate.len() == soft_decisions.len(),
            SoftLengthSnafu {
                what: "soft decisions",
                expected: candidate.len(),
                actual: soft_decisions.len()
            }
        );
    }

    let mut best_index = 0;
    let mut best_distance = f64::INFINITY;
    for (i, candidate) in candidates.iter().enumerate() {
        let distance = distance_unchecked(candidate, soft_decisions);
        if distance < best_distance {
            best_index = i;
            best_distance = distance;
        }
    }

    Ok(Candidate {
        bits: candidates[best_index].clone(),
        distance: best_distance,
    })
}

fn distance_unchecked(candidate: &[u8], soft_decisions: &[f64]) -> f64 {
    candidate
        .iter()
        .zip(soft_decisions)
        .map(|(&bit, &soft)| (bit as f64 - soft).abs())
        .sum()
}

fn ensure_finite(values: &[f64]) -> Result<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => NonFiniteSoftSnafu { index }.fail(),
        None => Ok(()),
    }
}
