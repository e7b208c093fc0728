//! Syndrome decoding for plain and SECDED Hamming codewords

use std::sync::Arc;

use snafu::ensure;
use tracing::trace;

use super::params::CodeParams;
use super::DecodeStatus;
use crate::error::{Result, WrongCodewordLengthSnafu};
use crate::util::bit_algebra::{ensure_binary, overall_parity, syndrome};

#[derive(Debug, Clone)]
pub struct HammingDecoder {
    params: Arc<CodeParams>,
}

impl HammingDecoder {
    pub fn new(r: usize) -> Result<Self> {
        Ok(Self::from_params(Arc::new(CodeParams::new(r)?)))
    }

    pub fn from_params(params: Arc<CodeParams>) -> Self {
        HammingDecoder { params }
    }

    pub fn params(&self) -> &Arc<CodeParams> {
        &self.params
    }

    pub fn n(&self) -> usize {
        self.params.n()
    }

    pub fn k(&self) -> usize {
        self.params.k()
    }

    /// Syndrome of an n or n+1 bit word, computed over the first n bits
    pub fn syndrome(&self, codeword: &[u8]) -> Result<usize> {
        self.validate(codeword)?;
        Ok(syndrome(codeword, self.n()))
    }

    /// Return the corrected codeword
    ///
    /// An n-bit word gets plain single-error correction: a non-zero syndrome
    /// always flips the bit it points at. Two errors are therefore either
    /// invisible (syndrome 0) or turned into three; the (n, k, 3) code cannot
    /// tell. An n+1 bit word follows the SECDED rules of
    /// [`decode_with_status`](Self::decode_with_status).
    pub fn correct(&self, codeword: &[u8]) -> Result<Vec<u8>> {
        self.validate(codeword)?;
        Ok(self.correct_unchecked(codeword).0)
    }

    /// Correct the codeword and extract its k data bits
    pub fn decode(&self, codeword: &[u8]) -> Result<Vec<u8>> {
        let corrected = self.correct(codeword)?;
        Ok(self.extract_data(&corrected))
    }

    /// Decode and classify the received word
    ///
    /// With `s` the syndrome of the first n bits and `p` the parity of all
    /// n+1 bits of an extended word:
    ///
    /// | s   | p | action                  | status            |
    /// |-----|---|-------------------------|-------------------|
    /// | 0   | 0 | none                    | `NoError`         |
    /// | ≠0  | 1 | flip bit s              | `Corrected`       |
    /// | 0   | 1 | flip the parity bit     | `ParityCorrected` |
    /// | ≠0  | 0 | none, data unreliable   | `DetectedDouble`  |
    ///
    /// A plain n-bit word reports `Corrected` whenever a bit was flipped.
    pub fn decode_with_status(&self, codeword: &[u8]) -> Result<(Vec<u8>, DecodeStatus)> {
        self.validate(codeword)?;
        let (corrected, status) = self.correct_unchecked(codeword);
        Ok((self.extract_data(&corrected), status))
    }

    /// Data bits of an already corrected codeword, in ascending position order
    pub fn extract_data(&self, corrected: &[u8]) -> Vec<u8> {
        self.params
            .data_positions()
            .iter()
            .map(|&pos| corrected[pos - 1])
            .collect()
    }

    fn validate(&self, codeword: &[u8]) -> Result<()> {
        let n = self.n();
        ensure!(
            codeword.len() == n || codeword.len() == n + 1,
            WrongCodewordLengthSnafu {
                n,
                extended: n + 1,
                actual: codeword.len()
            }
        );
        ensure_binary("codeword", codeword)
    }

    fn correct_unchecked(&self, codeword: &[u8]) -> (Vec<u8>, DecodeStatus) {
        let n = self.n();
        let mut corrected = codeword.to_vec();
        let s = syndrome(&corrected, n);

        let status = if corrected.len() == n + 1 {
            match (s, overall_parity(&corrected)) {
                (0, 0) => DecodeStatus::NoError,
                (0, _) => {
                    corrected[n] ^= 1;
                    DecodeStatus::ParityCorrected
                }
                (s, 1) => {
                    corrected[s - 1] ^= 1;
                    DecodeStatus::Corrected
                }
                _ => DecodeStatus::DetectedDouble,
            }
        } else if s > 0 && s <= n {
            corrected[s - 1] ^= 1;
            DecodeStatus::Corrected
        } else {
            DecodeStatus::NoError
        };

        trace!(syndrome = s, ?status, "syndrome decode");

        (corrected, status)
    }
}
