use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use snafu::ensure;

use crate::error::{InvalidProbabilitySnafu, Result};
use crate::util::bit_algebra::ensure_binary;

/// Binary symmetric channel: each bit flips independently with probability `p`
#[derive(Debug, Clone)]
pub struct BinarySymmetricChannel {
    p: f64,
    rng: StdRng,
}

impl BinarySymmetricChannel {
    pub fn new(p: f64, seed: u64) -> Result<Self> {
        ensure!((0.0..=1.0).contains(&p), InvalidProbabilitySnafu { p });
        Ok(Self {
            p,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn p(&self) -> f64 {
        self.p
    }

    /// Flip bits in place, returning how many were flipped
    pub fn corrupt(&mut self, bits: &mut [u8]) -> Result<usize> {
        ensure_binary("channel input", bits)?;
        let mut flipped = 0;
        for bit in bits.iter_mut() {
            if self.rng.random::<f64>() < self.p {
                *bit ^= 1;
                flipped += 1;
            }
        }
        Ok(flipped)
    }

    pub fn transmit(&mut self, bits: &[u8]) -> Result<Vec<u8>> {
        let mut out = bits.to_vec();
        self.corrupt(&mut out)?;
        Ok(out)
    }

    /// Uniformly random data bits from the channel's generator
    pub fn random_bits(&mut self, len: usize) -> Vec<u8> {
        (0..len).map(|_| self.rng.random_range(0..=1u8)).collect()
    }
}
