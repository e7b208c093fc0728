//! Hamming encoder
//!
//! Codewords are produced as `data * G` over GF(2). G itself is built once by
//! pushing each standard basis word through the systematic construction.

use std::sync::Arc;

use bitvec::prelude::*;
use snafu::ensure;
use tracing::debug;

use super::params::CodeParams;
use crate::error::{Result, WrongLengthSnafu};
use crate::util::bit_algebra::{ensure_binary, overall_parity};
use crate::util::bitvec_utils::{bitslice_to_bits, xor_into};

#[derive(Debug, Clone)]
pub struct HammingEncoder {
    params: Arc<CodeParams>,
    generator: Vec<BitVec<u8, Msb0>>,
}

impl HammingEncoder {
    /// Build the encoder for a (2^r - 1, 2^r - 1 - r) code
    pub fn new(r: usize) -> Result<Self> {
        Ok(Self::from_params(Arc::new(CodeParams::new(r)?)))
    }

    /// Build the encoder around parameters shared with a decoder
    pub fn from_params(params: Arc<CodeParams>) -> Self {
        let k = params.k();
        let generator: Vec<BitVec<u8, Msb0>> = (0..k)
            .map(|row| {
                let mut basis = bitvec![u8, Msb0; 0; k];
                basis.set(row, true);
                systematic_codeword(&params, &basis)
            })
            .collect();

        debug!(r = params.r(), n = params.n(), k, "built generator matrix");

        HammingEncoder { params, generator }
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

    /// Generator matrix G, k rows of n bits
    pub fn generator_matrix(&self) -> &[BitVec<u8, Msb0>] {
        &self.generator
    }

    /// Encode k data bits into an n-bit codeword
    pub fn encode(&self, data: &[u8]) -> Result<Vec<u8>> {
        ensure!(
            data.len() == self.k(),
            WrongLengthSnafu {
                what: "data word",
                expected: self.k(),
                actual: data.len()
            }
        );
        ensure_binary("data", data)?;

        let mut codeword = bitvec![u8, Msb0; 0; self.n()];
        for (row, _) in self.generator.iter().zip(data).filter(|&(_, &bit)| bit == 1) {
            xor_into(&mut codeword, row);
        }

        Ok(bitslice_to_bits(&codeword))
    }

    /// Encode k data bits into an n+1 bit SECDED codeword
    ///
    /// The trailing bit makes the parity of the whole word even.
    pub fn encode_extended(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut codeword = self.encode(data)?;
        codeword.push(overall_parity(&codeword));
        Ok(codeword)
    }
}

/// Place data bits at data positions, then fill each parity position 2^i with
/// the XOR of every other position whose index has bit i set.
fn systematic_codeword(params: &CodeParams, data: &BitSlice<u8, Msb0>) -> BitVec<u8, Msb0> {
    let n = params.n();
    let mut codeword = bitvec![u8, Msb0; 0; n];

    for (&pos, bit) in params.data_positions().iter().zip(data.iter()) {
        codeword.set(pos - 1, *bit);
    }

    for &parity_pos in params.parity_positions() {
        let parity = (1..=n)
            .filter(|&pos| pos != parity_pos && pos & parity_pos != 0)
            .fold(false, |acc, pos| acc ^ codeword[pos - 1]);
        codeword.set(parity_pos - 1, parity);
    }

    codeword
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParameterError;
    use crate::util::bit_algebra::syndrome;

    /// H * c over GF(2), one entry per parity-check row
    fn parity_check(params: &CodeParams, codeword: &[u8]) -> Vec<u8> {
        params
            .parity_check_matrix()
            .iter()
            .map(|row| {
                row.iter()
                    .zip(codeword)
                    .fold(0u8, |acc, (h, &c)| acc ^ (*h as u8 & c))
            })
            .collect()
    }

    fn all_words(k: usize) -> impl Iterator<Item = Vec<u8>> {
        (0..1usize << k).map(move |value| (0..k).map(|i| ((value >> i) & 1) as u8).collect())
    }

    #[test]
    fn generator_matrix_size() {
        let encoder = HammingEncoder::new(3).unwrap();
        let g = encoder.generator_matrix();
        assert_eq!(g.len(), 4);
        for row in g {
            assert_eq!(row.len(), 7);
        }
    }

    #[test]
    fn generator_matrix_is_systematic() {
        let encoder = HammingEncoder::new(4).unwrap();
        let data_positions = encoder.params().data_positions();
        for (row_index, row) in encoder.generator_matrix().iter().enumerate() {
            for (i, &pos) in data_positions.iter().enumerate() {
                assert_eq!(row[pos - 1], i == row_index, "row {} position {}", row_index, pos);
            }
        }
    }

    #[test]
    fn encodes_known_message_74() {
        let encoder = HammingEncoder::new(3).unwrap();
        assert_eq!(encoder.encode(&[1, 0, 1, 1]).unwrap(), vec![0, 1, 1, 0, 0, 1, 1]);
    }

    #[test]
    fn encoded_codeword_has_zero_syndrome_1511() {
        let encoder = HammingEncoder::new(4).unwrap();
        let codeword = encoder.encode(&[1, 0, 1, 1, 0, 1, 0, 0, 1, 0, 1]).unwrap();
        assert_eq!(parity_check(encoder.params(), &codeword), vec![0, 0, 0, 0]);
    }

    #[test]
    fn every_codeword_passes_parity_check() {
        for r in 2..=4 {
            let encoder = HammingEncoder::new(r).unwrap();
            let zeros = vec![0u8; r];
            for data in all_words(encoder.k()) {
                let codeword = encoder.encode(&data).unwrap();
                assert_eq!(parity_check(encoder.params(), &codeword), zeros);
                assert_eq!(syndrome(&codeword, encoder.n()), 0);
            }
        }
    }

    #[test]
    fn data_bits_appear_unpermuted() {
        let encoder = HammingEncoder::new(4).unwrap();
        let data = [1, 1, 0, 1, 0, 0, 1, 0, 1, 1, 0];
        let codeword = encoder.encode(&data).unwrap();
        let carried: Vec<u8> = encoder
            .params()
            .data_positions()
            .iter()
            .map(|&pos| codeword[pos - 1])
            .collect();
        assert_eq!(carried, data.to_vec());
    }

    #[test]
    fn encodes_extended_codeword_74() {
        let encoder = HammingEncoder::new(3).unwrap();
        let codeword = encoder.encode_extended(&[1, 0, 1, 1]).unwrap();
        assert_eq!(codeword.len(), 8);
        assert_eq!(codeword, vec![0, 1, 1, 0, 0, 1, 1, 0]);
        assert_eq!(overall_parity(&codeword), 0);
    }

    #[test]
    fn rejects_invalid_r() {
        assert!(matches!(
            HammingEncoder::new(1),
            Err(ParameterError::InvalidCheckBits { r: 1, .. })
        ));
    }

    #[test]
    fn rejects_wrong_length() {
        let encoder = HammingEncoder::new(3).unwrap();
        assert_eq!(
            encoder.encode(&[1, 0]).unwrap_err(),
            ParameterError::WrongLength {
                what: "data word",
                expected: 4,
                actual: 2
            }
        );
    }

    #[test]
    fn rejects_non_binary_data() {
        let encoder = HammingEncoder::new(3).unwrap();
        assert!(matches!(
            encoder.encode(&[0, 1, 2, 0]),
            Err(ParameterError::NonBinary { index: 2, value: 2, .. })
        ));
        assert!(encoder.encode_extended(&[0, 1, 2, 0]).is_err());
    }
}
