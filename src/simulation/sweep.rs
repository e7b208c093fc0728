//! Sweep grids and error accounting for the BER/BLER tools

use std::ops::AddAssign;

pub const BLOCK_CSV_HEADER: &str = "p,ber,bler,bit_errors,block_errors,total_bits,total_blocks";
pub const BIT_CSV_HEADER: &str = "snr_db,ber,bit_errors,total_bits";

/// `points` evenly spaced values from `start` to `end` inclusive
pub fn linspace(start: f64, end: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![start],
        _ => (0..points)
            .map(|i| {
                let t = i as f64 / (points - 1) as f64;
                start + t * (end - start)
            })
            .collect(),
    }
}

/// `points` values evenly spaced in log10 from `start` to `end`
///
/// Both bounds must be positive.
pub fn logspace(start: f64, end: f64, points: usize) -> Vec<f64> {
    linspace(start.log10(), end.log10(), points)
        .into_iter()
        .map(|e| 10f64.powf(e))
        .collect()
}

/// Bit and block error tallies for one sweep point
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ErrorCounter {
    pub bit_errors: usize,
    pub block_errors: usize,
    pub total_bits: usize,
    pub total_blocks: usize,
}

impl ErrorCounter {
    /// Compare one decoded block against what was sent; returns the number of
    /// bit errors
    pub fn record_block(&mut self, sent: &[u8], decoded: &[u8]) -> usize {
        let errors = sent.iter().zip(decoded).filter(|(a, b)| a != b).count()
            + sent.len().abs_diff(decoded.len());
        self.bit_errors += errors;
        self.total_bits += sent.len();
        self.total_blocks += 1;
        if errors > 0 {
            self.block_errors += 1;
        }
        errors
    }

    /// A block lost outright, e.g. a detected double error
    pub fn record_lost_block(&mut self, sent: &[u8]) {
        self.bit_errors += sent.len();
        self.total_bits += sent.len();
        self.total_blocks += 1;
        self.block_errors += 1;
    }

    pub fn ber(&self) -> f64 {
        ratio(self.bit_errors, self.total_bits)
    }

    pub fn bler(&self) -> f64 {
        ratio(self.block_errors, self.total_blocks)
    }

    /// Row matching [`BLOCK_CSV_HEADER`]
    pub fn block_csv_row(&self, x: f64) -> String {
        format!(
            "{:.8},{:.8},{:.8},{},{},{},{}",
            x,
            self.ber(),
            self.bler(),
            self.bit_errors,
            self.block_errors,
            self.total_bits,
            self.total_blocks
        )
    }

    /// Row matching [`BIT_CSV_HEADER`]
    pub fn bit_csv_row(&self, x: f64) -> String {
        format!(
            "{:.8},{:.8},{},{}",
            x,
            self.ber(),
            self.bit_errors,
            self.total_bits
        )
    }
}

impl AddAssign for ErrorCounter {
    fn add_assign(&mut self, rhs: Self) {
        self.bit_errors += rhs.bit_errors;
        self.block_errors += rhs.block_errors;
        self.total_bits += rhs.total_bits;
        self.total_blocks += rhs.total_blocks;
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}
