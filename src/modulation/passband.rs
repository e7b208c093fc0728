//! BPSK on a real cosine carrier
//!
//! Each bit becomes `samples_per_symbol` samples of
//! `amplitude * symbol * cos(2*pi*f*t + phase)`, with `t` running over the
//! whole stream so the carrier stays phase continuous across symbols. The
//! demodulator is a coherent correlator against the same carrier.

use std::f64::consts::PI;

use snafu::ensure;

use super::bpsk::{bit_to_symbol, symbol_to_bit};
use crate::error::{InvalidCarrierSnafu, PartialSymbolSnafu, Result};
use crate::util::bit_algebra::ensure_binary;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarrierConfig {
    pub carrier_hz: f64,
    pub sample_rate_hz: f64,
    pub samples_per_symbol: usize,
    pub amplitude: f64,
    /// Carrier phase at t = 0, radians
    pub phase: f64,
}

impl Default for CarrierConfig {
    fn default() -> Self {
        Self {
            carrier_hz: 2.0,
            sample_rate_hz: 32.0,
            samples_per_symbol: 16,
            amplitude: 1.0,
            phase: 0.0,
        }
    }
}

impl CarrierConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.carrier_hz.is_finite()
                && self.sample_rate_hz.is_finite()
                && self.amplitude.is_finite()
                && self.phase.is_finite(),
            InvalidCarrierSnafu {
                reason: "all values must be finite"
            }
        );
        ensure!(
            self.sample_rate_hz > 0.0,
            InvalidCarrierSnafu {
                reason: "sample rate must be positive"
            }
        );
        ensure!(
            self.samples_per_symbol > 0,
            InvalidCarrierSnafu {
                reason: "samples per symbol must be positive"
            }
        );
        ensure!(
            self.carrier_hz >= 0.0,
            InvalidCarrierSnafu {
                reason: "carrier frequency must be non-negative"
            }
        );
        Ok(())
    }

    fn carrier_at(&self, sample_index: usize) -> f64 {
        let t = sample_index as f64 / self.sample_rate_hz;
        (2.0 * PI * self.carrier_hz * t + self.phase).cos()
    }
}

#[derive(Debug, Clone)]
pub struct PassbandModulator {
    config: CarrierConfig,
}

impl PassbandModulator {
    pub fn new(config: CarrierConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CarrierConfig {
        &self.config
    }

    pub fn modulate(&self, bits: &[u8]) -> Result<Vec<f64>> {
        ensure_binary("BPSK input", bits)?;

        let sps = self.config.samples_per_symbol;
        let mut samples = Vec::with_capacity(bits.len() * sps);
        for (symbol_index, &bit) in bits.iter().enumerate() {
            let symbol = bit_to_symbol(bit);
            let start = symbol_index * sps;
            samples.extend(
                (start..start + sps)
                    .map(|i| self.config.amplitude * symbol * self.config.carrier_at(i)),
            );
        }

        Ok(samples)
    }
}

#[derive(Debug, Clone)]
pub struct PassbandDemodulator {
    config: CarrierConfig,
}

impl PassbandDemodulator {
    pub fn new(config: CarrierConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CarrierConfig {
        &self.config
    }

    /// Per-symbol correlation with the reference carrier
    pub fn correlate(&self, samples: &[f64]) -> Result<Vec<f64>> {
        let sps = self.config.samples_per_symbol;
        ensure!(
            samples.len() % sps == 0,
            PartialSymbolSnafu {
                samples: samples.len(),
                samples_per_symbol: sps
            }
        );

        let correlations = samples
            .chunks_exact(sps)
            .enumerate()
            .map(|(symbol_index, chunk)| {
                let start = symbol_index * sps;
                chunk
                    .iter()
                    .enumerate()
                    .map(|(k, &s)| s * self.config.carrier_at(start + k))
                    .sum::<f64>()
            })
            .collect();

        Ok(correlations)
    }

    pub fn demodulate(&self, samples: &[f64]) -> Result<Vec<u8>> {
        Ok(self
            .correlate(samples)?
            .into_iter()
            .map(symbol_to_bit)
            .collect())
    }
}
