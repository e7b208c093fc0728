//! Soft-input decoder over BPSK channel samples

use tracing::{debug, instrument};

use super::{calculate_candidates, make_decision, ProbeAlgorithm};
use crate::error::Result;
use crate::hamming::{HammingDecoder, HAMMING_CODE_DISTANCE};

/// Chase decoder configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChaseConfig {
    /// Distance used to size the probe set; a larger value probes deeper
    /// than the code itself can correct
    pub distance: usize,
    pub algorithm: ProbeAlgorithm,
}

impl Default for ChaseConfig {
    fn default() -> Self {
        Self {
            distance: HAMMING_CODE_DISTANCE,
            algorithm: ProbeAlgorithm::LeastReliable,
        }
    }
}

/// Result of one Chase decode
#[derive(Debug, Clone, PartialEq)]
pub struct ChaseDecision {
    /// Winning corrected codeword
    pub codeword: Vec<u8>,
    /// Its k data bits
    pub data: Vec<u8>,
    /// L1 distance between the codeword and the soft bit estimates
    pub distance: f64,
    pub candidates_evaluated: usize,
}

/// Hamming decoder driven by soft BPSK samples (+1 for bit 1, -1 for bit 0)
#[derive(Debug, Clone)]
pub struct ChaseDecoder {
    decoder: HammingDecoder,
    config: ChaseConfig,
}

impl ChaseDecoder {
    pub fn new(r: usize, config: ChaseConfig) -> Result<Self> {
        Ok(Self {
            decoder: HammingDecoder::new(r)?,
            config,
        })
    }

    pub fn from_decoder(decoder: HammingDecoder, config: ChaseConfig) -> Self {
        Self { decoder, config }
    }

    pub fn config(&self) -> &ChaseConfig {
        &self.config
    }

    pub fn decoder(&self) -> &HammingDecoder {
        &self.decoder
    }

    /// Decode one block of received samples
    ///
    /// The samples may cover a plain (n) or an extended (n+1) codeword. Every
    /// candidate is passed through the hard decoder before it is scored, so
    /// the winner is always a corrected word.
    #[instrument(level = "debug", skip_all, fields(len = received.len()))]
    pub fn decode(&self, received: &[f64]) -> Result<ChaseDecision> {
        let hard: Vec<u8> = received.iter().map(|&y| (y >= 0.0) as u8).collect();
        let reliability: Vec<f64> = received.iter().map(|y| y.abs()).collect();
        let soft: Vec<f64> = received.iter().map(|y| (y + 1.0) / 2.0).collect();

        let candidates = calculate_candidates(
            &hard,
            self.decoder.params().r(),
            self.config.distance,
            &reliability,
            self.config.algorithm,
        )?;

        let corrected = candidates
            .iter()
            .map(|candidate| self.decoder.correct(candidate))
            .collect::<Result<Vec<_>>>()?;

        let best = make_decision(&corrected, &soft)?;
        let data = self.decoder.extract_data(&best.bits);

        debug!(
            candidates = corrected.len(),
            distance = best.distance,
            "chase decision"
        );

        Ok(ChaseDecision {
            codeword: best.bits,
            data,
            distance: best.distance,
            candidates_evaluated: corrected.len(),
        })
    }
}
