//! BER/BLER of a Hamming code over a binary symmetric channel
//!
//! Random data blocks are encoded, every codeword bit is flipped with
//! probability p, and the hard decoder output is compared with the data.
//! One CSV row is printed per p.
//!
//! Usage:
//!   ber_bler_sim [OPTIONS] > results.csv
//!
//! Options:
//!   --r <n>            Check bits (default: 3)
//!   --blocks <count>   Blocks per point (default: 10000)
//!   --seed <seed>      Base RNG seed (default: 5489)
//!   --p <p1,p2,...>    Explicit list of flip probabilities
//!   --p-start <p>      Range start (default: 1e-4)
//!   --p-end <p>        Range end (default: 1e-2)
//!   --p-points <n>     Range points (default: 9)
//!   --p-linear         Space the range linearly instead of logarithmically

use rayon::prelude::*;
use tracing::info;

use harq::hamming::HammingCodec;
use harq::simulation::sweep::BLOCK_CSV_HEADER;
use harq::simulation::{linspace, logspace, BinarySymmetricChannel, ErrorCounter, DEFAULT_SEED};
use harq::tracing_init::init_tracing;

struct SimConfig {
    r: usize,
    blocks: usize,
    seed: u64,
    p_list: Vec<f64>,
    use_range: bool,
    p_start: f64,
    p_end: f64,
    p_points: usize,
    p_log: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            r: 3,
            blocks: 10_000,
            seed: DEFAULT_SEED,
            p_list: vec![1e-4, 5e-4, 1e-3, 5e-3, 1e-2],
            use_range: false,
            p_start: 1e-4,
            p_end: 1e-2,
            p_points: 9,
            p_log: true,
        }
    }
}

impl SimConfig {
    fn parse_args() -> Result<Self, String> {
        let args: Vec<String> = std::env::args().collect();
        let mut config = SimConfig::default();

        let mut i = 1;
        while i < args.len() {
            let flag = args[i].as_str();
            match flag {
                "--r" => config.r = parse_value(&args, &mut i, flag)?,
                "--blocks" => config.blocks = parse_value(&args, &mut i, flag)?,
                "--seed" => config.seed = parse_value(&args, &mut i, flag)?,
                "--p" => {
                    let value: String = parse_value(&args, &mut i, flag)?;
                    config.p_list = parse_p_list(&value)?;
                    config.use_range = false;
                }
                "--p-start" => {
                    config.p_start = parse_value(&args, &mut i, flag)?;
                    config.use_range = true;
                }
                "--p-end" => {
                    config.p_end = parse_value(&args, &mut i, flag)?;
                    config.use_range = true;
                }
                "--p-points" => {
                    config.p_points = parse_value(&args, &mut i, flag)?;
                    config.use_range = true;
                }
                "--p-linear" => {
                    config.p_log = false;
                    config.use_range = true;
                }
                "-h" | "--help" => {
                    print_help(&args[0]);
                    std::process::exit(0);
                }
                arg => return Err(format!("Unknown option: {}", arg)),
            }
            i += 1;
        }

        if config.blocks == 0 {
            return Err("Blocks must be positive".to_string());
        }
        if config.use_range {
            let valid = config.p_start > 0.0
                && config.p_start < 1.0
                && config.p_end > 0.0
                && config.p_end <= 1.0
                && config.p_end > config.p_start;
            if !valid {
                return Err("Invalid p range".to_string());
            }
            if config.p_points < 2 {
                return Err("p-points must be at least 2".to_string());
            }
        }

        Ok(config)
    }

    fn p_values(&self) -> Vec<f64> {
        if !self.use_range {
            self.p_list.clone()
        } else if self.p_log {
            logspace(self.p_start, self.p_end, self.p_points)
        } else {
            linspace(self.p_start, self.p_end, self.p_points)
        }
    }
}

fn parse_value<T: std::str::FromStr>(args: &[String], i: &mut usize, flag: &str) -> Result<T, String> {
    *i += 1;
    let value = args.get(*i).ok_or_else(|| format!("Missing value for {}", flag))?;
    value
        .parse()
        .map_err(|_| format!("Invalid value for {}: {}", flag, value))
}

fn parse_p_list(value: &str) -> Result<Vec<f64>, String> {
    let list = value
        .split(',')
        .map(|token| {
            let p: f64 = token
                .trim()
                .parse()
                .map_err(|_| format!("Invalid probability: {}", token))?;
            if (0.0..=1.0).contains(&p) {
                Ok(p)
            } else {
                Err(format!("Probability out of range: {}", token))
            }
        })
        .collect::<Result<Vec<_>, String>>()?;
    if list.is_empty() {
        return Err("Empty probability list".to_string());
    }
    Ok(list)
}

fn print_help(program: &str) {
    eprintln!("Hamming BER/BLER over a binary symmetric channel");
    eprintln!();
    eprintln!("Usage: {} [OPTIONS]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --r <n>            Check bits (default: 3)");
    eprintln!("  --blocks <count>   Blocks per point (default: 10000)");
    eprintln!("  --seed <seed>      Base RNG seed (default: 5489)");
    eprintln!("  --p <p1,p2,...>    Explicit flip probabilities");
    eprintln!("  --p-start <p>      Range start (default: 1e-4)");
    eprintln!("  --p-end <p>        Range end (default: 1e-2)");
    eprintln!("  --p-points <n>     Range points (default: 9)");
    eprintln!("  --p-linear         Linear instead of logarithmic range");
    eprintln!("  -h, --help         Show this help message");
}

fn simulate_point(codec: &HammingCodec, p: f64, blocks: usize, seed: u64) -> Result<ErrorCounter, String> {
    let mut channel = BinarySymmetricChannel::new(p, seed).map_err(|e| e.to_string())?;
    let mut counter = ErrorCounter::default();
    let k = codec.params().k();

    for _ in 0..blocks {
        let data = channel.random_bits(k);
        let codeword = codec.encoder.encode(&data).map_err(|e| e.to_string())?;
        let received = channel.transmit(&codeword).map_err(|e| e.to_string())?;
        let decoded = codec.decoder.decode(&received).map_err(|e| e.to_string())?;
        counter.record_block(&data, &decoded);
    }

    Ok(counter)
}

fn main() -> Result<(), String> {
    init_tracing();
    let config = SimConfig::parse_args()?;
    let codec = HammingCodec::new(config.r).map_err(|e| e.to_string())?;
    let p_values = config.p_values();

    info!(
        n = codec.params().n(),
        k = codec.params().k(),
        blocks = config.blocks,
        points = p_values.len(),
        "starting BSC sweep"
    );

    let results = p_values
        .par_iter()
        .enumerate()
        .map(|(idx, &p)| simulate_point(&codec, p, config.blocks, config.seed.wrapping_add(idx as u64)))
        .collect::<Result<Vec<_>, String>>()?;

    println!("{}", BLOCK_CSV_HEADER);
    for (p, counter) in p_values.iter().zip(&results) {
        println!("{}", counter.block_csv_row(*p));
    }

    Ok(())
}
