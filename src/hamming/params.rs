//! Code parameters derived from the number of check bits

use bitvec::prelude::*;
use snafu::ensure;

use crate::error::{InvalidCheckBitsSnafu, Result};
use crate::util::bit_algebra::{data_positions, parity_positions};

/// Minimum distance of every plain Hamming code
pub const HAMMING_CODE_DISTANCE: usize = 3;

/// Smallest supported number of check bits
pub const MIN_CHECK_BITS: usize = 2;

/// Largest supported number of check bits: (4095, 4083)
pub const MAX_CHECK_BITS: usize = 12;

/// Immutable (n, k, d) description of a Hamming code
///
/// Built once from `r` and shared (usually behind an `Arc`) by the encoder and
/// decoder so that both agree on the position layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeParams {
    r: usize,
    n: usize,
    k: usize,
    parity_positions: Vec<usize>,
    data_positions: Vec<usize>,
}

impl CodeParams {
    pub fn new(r: usize) -> Result<Self> {
        ensure!(
            (MIN_CHECK_BITS..=MAX_CHECK_BITS).contains(&r),
            InvalidCheckBitsSnafu {
                r,
                max: MAX_CHECK_BITS
            }
        );

        let n = (1usize << r) - 1;
        let k = n - r;

        Ok(CodeParams {
            r,
            n,
            k,
            parity_positions: parity_positions(r),
            data_positions: data_positions(n),
        })
    }

    /// Number of check bits
    pub fn r(&self) -> usize {
        self.r
    }

    /// Codeword length 2^r - 1
    pub fn n(&self) -> usize {
        self.n
    }

    /// Information word length n - r
    pub fn k(&self) -> usize {
        self.k
    }

    pub fn d(&self) -> usize {
        HAMMING_CODE_DISTANCE
    }

    /// Length of a SECDED codeword (n + 1)
    pub fn extended_len(&self) -> usize {
        self.n + 1
    }

    /// 1-based parity positions, ascending
    pub fn parity_positions(&self) -> &[usize] {
        &self.parity_positions
    }

    /// 1-based data positions, ascending
    pub fn data_positions(&self) -> &[usize] {
        &self.data_positions
    }

    /// Parity-check matrix H (r x n)
    ///
    /// Column `j` (1-based) is the binary expansion of `j` with the least
    /// significant bit in row 0, so `H * c` read as a number is the syndrome.
    pub fn parity_check_matrix(&self) -> Vec<BitVec<u8, Msb0>> {
        (0..self.r)
            .map(|row| (1..=self.n).map(|col| col & (1 << row) != 0).collect())
            .collect()
    }
}
