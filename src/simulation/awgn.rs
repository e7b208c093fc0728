use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use snafu::ensure;
use tracing::debug;

use crate::error::{InvalidSnrSnafu, Result};

/// Default channel seed, the classic Mersenne Twister default
pub const DEFAULT_SEED: u64 = 5489;

/// Additive white Gaussian noise for unit-energy BPSK symbols
///
/// The noise variance is `sigma^2 = 10^(-snr_db / 10)`. The generator is
/// seeded once and advances across calls, so two channels built with the
/// same seed produce the same noise sequence.
#[derive(Debug, Clone)]
pub struct AwgnChannel {
    snr_db: f64,
    sigma2: f64,
    normal: Normal<f64>,
    rng: StdRng,
}

impl AwgnChannel {
    pub fn new(snr_db: f64, seed: u64) -> Result<Self> {
        let (sigma2, normal) = noise_for(snr_db)?;
        Ok(Self {
            snr_db,
            sigma2,
            normal,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Change the SNR; the random stream continues where it was
    pub fn set_snr_db(&mut self, snr_db: f64) -> Result<()> {
        let (sigma2, normal) = noise_for(snr_db)?;
        self.snr_db = snr_db;
        self.sigma2 = sigma2;
        self.normal = normal;
        Ok(())
    }

    pub fn snr_db(&self) -> f64 {
        self.snr_db
    }

    pub fn sigma2(&self) -> f64 {
        self.sigma2
    }

    pub fn add_noise(&mut self, symbols: &[f64]) -> Vec<f64> {
        symbols
            .iter()
            .map(|&s| s + self.normal.sample(&mut self.rng))
            .collect()
    }

    /// Log-likelihood ratios `2 * y / sigma^2`, positive favouring bit 1
    pub fn compute_llr(&self, received: &[f64]) -> Vec<f64> {
        let scale = if self.sigma2 > 0.0 {
            2.0 / self.sigma2
        } else {
            0.0
        };
        received.iter().map(|&y| scale * y).collect()
    }

    /// Add noise and compute the LLRs in one step
    pub fn transmit(&mut self, symbols: &[f64]) -> (Vec<f64>, Vec<f64>) {
        let received = self.add_noise(symbols);
        let llr = self.compute_llr(&received);
        (received, llr)
    }
}

fn noise_for(snr_db: f64) -> Result<(f64, Normal<f64>)> {
    ensure!(snr_db.is_finite(), InvalidSnrSnafu { snr_db });
    let snr_linear = 10f64.powf(snr_db / 10.0);
    ensure!(snr_linear > 0.0, InvalidSnrSnafu { snr_db });

    let sigma2 = 1.0 / snr_linear;
    let normal = Normal::new(0.0, sigma2.sqrt()).map_err(|_| InvalidSnrSnafu { snr_db }.build())?;
    debug!(snr_db, sigma2, "AWGN noise level");

    Ok((sigma2, normal))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParameterError;

    #[test]
    fn variance_follows_snr() {
        let channel = AwgnChannel::new(10.0, DEFAULT_SEED).unwrap();
        assert!((channel.sigma2() - 0.1).abs() < 1e-12);

        let channel = AwgnChannel::new(0.0, DEFAULT_SEED).unwrap();
        assert!((channel.sigma2() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn non_finite_snr_is_rejected() {
        assert_eq!(
            AwgnChannel::new(f64::INFINITY, 1).unwrap_err(),
            ParameterError::InvalidSnr {
                snr_db: f64::INFINITY
            }
        );
        assert!(AwgnChannel::new(f64::NAN, 1).is_err());
        assert!(AwgnChannel::new(-4000.0, 1).is_err());

        let mut channel = AwgnChannel::new(3.0, 1).unwrap();
        assert!(channel.set_snr_db(f64::NEG_INFINITY).is_err());
        assert_eq!(channel.snr_db(), 3.0);
    }

    #[test]
    fn same_seed_same_noise() {
        let symbols = vec![1.0, -1.0, 1.0, 1.0, -1.0];
        let a = AwgnChannel::new(2.0, 42).unwrap().add_noise(&symbols);
        let b = AwgnChannel::new(2.0, 42).unwrap().add_noise(&symbols);
        let c = AwgnChannel::new(2.0, 43).unwrap().add_noise(&symbols);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn noise_power_matches_sigma2() {
        let mut channel = AwgnChannel::new(3.0, 7).unwrap();
        let zeros = vec![0.0; 200_000];
        let noise = channel.add_noise(&zeros);
        let power = noise.iter().map(|x| x * x).sum::<f64>() / noise.len() as f64;
        assert!((power - channel.sigma2()).abs() / channel.sigma2() < 0.02);
    }

    #[test]
    fn llr_scale() {
        let channel = AwgnChannel::new(0.0, 1).unwrap();
        assert_eq!(channel.compute_llr(&[0.5, -1.0]), vec![1.0, -2.0]);
    }

    #[test]
    fn high_snr_transmit_keeps_signs() {
        let mut channel = AwgnChannel::new(100.0, 123).unwrap();
        let symbols = vec![1.0, -1.0, -1.0, 1.0];
        let (received, llr) = channel.transmit(&symbols);
        for ((s, y), l) in symbols.iter().zip(&received).zip(&llr) {
            assert!((s - y).abs() < 1e-3);
            assert_eq!(s.signum(), l.signum());
        }
    }
}
