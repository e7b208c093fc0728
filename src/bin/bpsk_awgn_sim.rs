//! Uncoded BPSK bit error rate over AWGN
//!
//! Usage:
//!   bpsk_awgn_sim [--bits <count>] [--seed <seed>] [--snr <dB1,dB2,...>]
//!                 [--snr-start <dB> --snr-end <dB> --snr-points <n>]
//!
//! Prints `snr_db,ber,bit_errors,total_bits` rows. Each SNR point uses its own
//! generator seeded with `seed + point index`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::info;

use harq::modulation::{BpskDemodulator, BpskModulator};
use harq::simulation::sweep::BIT_CSV_HEADER;
use harq::simulation::{linspace, AwgnChannel, ErrorCounter, DEFAULT_SEED};
use harq::tracing_init::init_tracing;

struct SimConfig {
    bits: usize,
    seed: u64,
    snr_list: Vec<f64>,
    use_range: bool,
    snr_start: f64,
    snr_end: f64,
    snr_points: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            bits: 200_000,
            seed: DEFAULT_SEED,
            snr_list: (0..=10).map(f64::from).collect(),
            use_range: false,
            snr_start: 0.0,
            snr_end: 10.0,
            snr_points: 11,
        }
    }
}

impl SimConfig {
    fn parse_args() -> Result<Self, String> {
        let args: Vec<String> = std::env::args().collect();
        let mut config = SimConfig::default();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--bits" => config.bits = next_value(&args, &mut i)?,
                "--seed" => config.seed = next_value(&args, &mut i)?,
                "--snr" => {
                    let value: String = next_value(&args, &mut i)?;
                    config.snr_list = value
                        .split(',')
                        .map(|t| {
                            t.trim()
                                .parse::<f64>()
                                .map_err(|_| format!("Invalid SNR value: {}", t))
                        })
                        .collect::<Result<_, _>>()?;
                    config.use_range = false;
                }
                "--snr-start" => {
                    config.snr_start = next_value(&args, &mut i)?;
                    config.use_range = true;
                }
                "--snr-end" => {
                    config.snr_end = next_value(&args, &mut i)?;
                    config.use_range = true;
                }
                "--snr-points" => {
                    config.snr_points = next_value(&args, &mut i)?;
                    config.use_range = true;
                }
                "-h" | "--help" => {
                    eprintln!(
                        "Usage: {} [--bits <count>] [--seed <seed>] [--snr <dB1,dB2,...>] \
                         [--snr-start <dB> --snr-end <dB> --snr-points <n>]",
                        args[0]
                    );
                    std::process::exit(0);
                }
                arg => return Err(format!("Unknown option: {}", arg)),
            }
            i += 1;
        }

        if config.bits == 0 {
            return Err("Bits must be positive".to_string());
        }
        if config.use_range {
            if config.snr_points < 2 {
                return Err("snr-points must be at least 2".to_string());
            }
            if !(config.snr_start.is_finite() && config.snr_end.is_finite())
                || config.snr_end <= config.snr_start
            {
                return Err("Invalid SNR range".to_string());
            }
        }

        Ok(config)
    }

    fn snr_values(&self) -> Vec<f64> {
        if self.use_range {
            linspace(self.snr_start, self.snr_end, self.snr_points)
        } else {
            self.snr_list.clone()
        }
    }
}

fn next_value<T: std::str::FromStr>(args: &[String], i: &mut usize) -> Result<T, String> {
    let flag = &args[*i];
    *i += 1;
    let value = args.get(*i).ok_or_else(|| format!("Missing value for {}", flag))?;
    value
        .parse()
        .map_err(|_| format!("Invalid value for {}: {}", flag, value))
}

fn simulate_point(snr_db: f64, bits: usize, seed: u64) -> Result<ErrorCounter, String> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut channel = AwgnChannel::new(snr_db, rng.random()).map_err(|e| e.to_string())?;

    let data: Vec<u8> = (0..bits).map(|_| rng.random_range(0..=1u8)).collect();
    let symbols = BpskModulator.modulate(&data).map_err(|e| e.to_string())?;
    let received = channel.add_noise(&symbols);
    let decided = BpskDemodulator.demodulate(&received);

    let mut counter = ErrorCounter::default();
    counter.record_block(&data, &decided);
    Ok(counter)
}

fn main() -> Result<(), String> {
    init_tracing();
    let config = SimConfig::parse_args()?;
    let snr_values = config.snr_values();

    info!(bits = config.bits, points = snr_values.len(), "starting BPSK AWGN sweep");

    let results = snr_values
        .par_iter()
        .enumerate()
        .map(|(idx, &snr_db)| simulate_point(snr_db, config.bits, config.seed.wrapping_add(idx as u64)))
        .collect::<Result<Vec<_>, String>>()?;

    println!("{}", BIT_CSV_HEADER);
    for (snr_db, counter) in snr_values.iter().zip(&results) {
        println!("{}", counter.bit_csv_row(*snr_db));
    }

    Ok(())
}
