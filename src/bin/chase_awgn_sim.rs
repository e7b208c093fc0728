//! Hard-decision Hamming vs Chase soft decoding over BPSK/AWGN
//!
//! Usage:
//!   chase_awgn_sim [OPTIONS] > chase.csv
//!
//! Options:
//!   --r <n>              Check bits (default: 3)
//!   --blocks <count>     Blocks per SNR point (default: 10000)
//!   --seed <seed>        Base RNG seed (default: 5489)
//!   --snr <dB1,dB2,...>  SNR list (default: 0..=8)
//!   --distance <d>       Chase probe distance (default: 3)
//!   --algorithm <a>      1|exhaustive, 2|least-reliable, 3|single-pattern
//!   --extended           Send SECDED codewords; detected doubles count as lost
//!
//! Both decoders see exactly the same noisy blocks.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::info;

use harq::chase::{ChaseConfig, ChaseDecoder, ProbeAlgorithm};
use harq::hamming::{DecodeStatus, HammingCodec};
use harq::modulation::{BpskDemodulator, BpskModulator};
use harq::simulation::{AwgnChannel, ErrorCounter, DEFAULT_SEED};
use harq::tracing_init::init_tracing;

const CSV_HEADER: &str = "snr_db,ber_hard,bler_hard,ber_chase,bler_chase,total_blocks";

struct SimConfig {
    r: usize,
    blocks: usize,
    seed: u64,
    snr_list: Vec<f64>,
    chase: ChaseConfig,
    extended: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            r: 3,
            blocks: 10_000,
            seed: DEFAULT_SEED,
            snr_list: (0..=8).map(f64::from).collect(),
            chase: ChaseConfig::default(),
            extended: false,
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
                "--r" => config.r = next_value(&args, &mut i)?,
                "--blocks" => config.blocks = next_value(&args, &mut i)?,
                "--seed" => config.seed = next_value(&args, &mut i)?,
                "--distance" => config.chase.distance = next_value(&args, &mut i)?,
                "--algorithm" => {
                    let value: String = next_value(&args, &mut i)?;
                    config.chase.algorithm = value.parse::<ProbeAlgorithm>()?;
                }
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
                }
                "--extended" => config.extended = true,
                "-h" | "--help" => {
                    eprintln!(
                        "Usage: {} [--r <n>] [--blocks <count>] [--seed <seed>] \
                         [--snr <dB1,dB2,...>] [--distance <d>] [--algorithm <a>] [--extended]",
                        args[0]
                    );
                    std::process::exit(0);
                }
                arg => return Err(format!("Unknown option: {}", arg)),
            }
            i += 1;
        }

        if config.blocks == 0 {
            return Err("Blocks must be positive".to_string());
        }

        Ok(config)
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

struct PointResult {
    hard: ErrorCounter,
    chase: ErrorCounter,
}

fn simulate_point(
    codec: &HammingCodec,
    chase: &ChaseDecoder,
    config: &SimConfig,
    snr_db: f64,
    seed: u64,
) -> Result<PointResult, String> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut channel = AwgnChannel::new(snr_db, rng.random()).map_err(|e| e.to_string())?;
    let mut result = PointResult {
        hard: ErrorCounter::default(),
        chase: ErrorCounter::default(),
    };
    let k = codec.params().k();

    for _ in 0..config.blocks {
        let data: Vec<u8> = (0..k).map(|_| rng.random_range(0..=1u8)).collect();
        let codeword = if config.extended {
            codec.encoder.encode_extended(&data)
        } else {
            codec.encoder.encode(&data)
        }
        .map_err(|e| e.to_string())?;

        let symbols = BpskModulator.modulate(&codeword).map_err(|e| e.to_string())?;
        let received = channel.add_noise(&symbols);

        let hard = BpskDemodulator.demodulate(&received);
        let (decoded, status) = codec
            .decoder
            .decode_with_status(&hard)
            .map_err(|e| e.to_string())?;
        if status == DecodeStatus::DetectedDouble {
            result.hard.record_lost_block(&data);
        } else {
            result.hard.record_block(&data, &decoded);
        }

        let decision = chase.decode(&received).map_err(|e| e.to_string())?;
        result.chase.record_block(&data, &decision.data);
    }

    Ok(result)
}

fn main() -> Result<(), String> {
    init_tracing();
    let config = SimConfig::parse_args()?;
    let codec = HammingCodec::new(config.r).map_err(|e| e.to_string())?;
    let chase = ChaseDecoder::from_decoder(codec.decoder.clone(), config.chase);

    info!(
        n = codec.params().n(),
        k = codec.params().k(),
        distance = config.chase.distance,
        algorithm = %config.chase.algorithm,
        extended = config.extended,
        "starting Chase AWGN sweep"
    );

    let results = config
        .snr_list
        .par_iter()
        .enumerate()
        .map(|(idx, &snr_db)| {
            simulate_point(&codec, &chase, &config, snr_db, config.seed.wrapping_add(idx as u64))
        })
        .collect::<Result<Vec<_>, String>>()?;

    println!("{}", CSV_HEADER);
    for (snr_db, point) in config.snr_list.iter().zip(&results) {
        println!(
            "{:.8},{:.8},{:.8},{:.8},{:.8},{}",
            snr_db,
            point.hard.ber(),
            point.hard.bler(),
            point.chase.ber(),
            point.chase.bler(),
            point.chase.total_blocks
        );
    }

    Ok(())
}
