use crate::error::Result;
use crate::util::bit_algebra::ensure_binary;

/// Baseband BPSK mapper: bit 0 -> -1.0, bit 1 -> +1.0
#[derive(Debug, Clone, Copy, Default)]
pub struct BpskModulator;

impl BpskModulator {
    pub fn modulate(&self, bits: &[u8]) -> Result<Vec<f64>> {
        ensure_binary("BPSK input", bits)?;
        Ok(bits.iter().map(|&b| bit_to_symbol(b)).collect())
    }
}

/// Hard-decision BPSK slicer: non-negative samples map to bit 1
#[derive(Debug, Clone, Copy, Default)]
pub struct BpskDemodulator;

impl BpskDemodulator {
    pub fn demodulate(&self, symbols: &[f64]) -> Vec<u8> {
        symbols.iter().map(|&s| symbol_to_bit(s)).collect()
    }
}

pub(crate) fn bit_to_symbol(bit: u8) -> f64 {
    if bit == 1 {
        1.0
    } else {
        -1.0
    }
}

pub(crate) fn symbol_to_bit(symbol: f64) -> u8 {
    (symbol >= 0.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_bits_to_antipodal_symbols() {
        let symbols = BpskModulator.modulate(&[0, 1, 1, 0]).unwrap();
        assert_eq!(symbols, vec![-1.0, 1.0, 1.0, -1.0]);
    }

    #[test]
    fn rejects_non_binary_input() {
        assert!(BpskModulator.modulate(&[0, 2, 1]).is_err());
    }

    #[test]
    fn zero_slices_to_one() {
        let bits = BpskDemodulator.demodulate(&[-0.3, 0.0, 2.5, -1e-9]);
        assert_eq!(bits, vec![0, 1, 1, 0]);
    }
}
