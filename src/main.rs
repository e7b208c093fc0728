//! Encode a data word and show what the Hamming code does with it
//!
//! Usage:
//!   harq [--r <check bits>] [--flip <index>] <data bits>
//!
//! Examples:
//!   harq 1011
//!   harq --flip 2 1011
//!   harq --r 4 10110011101

use harq::hamming::{HammingCodec, MAX_CHECK_BITS, MIN_CHECK_BITS};
use harq::tracing_init::init_tracing;
use harq::util::bit_algebra::inject_error;
use harq::util::bitvec_utils::BitsToString;

struct Config {
    r: Option<usize>,
    flip: Option<usize>,
    data: Vec<u8>,
}

impl Config {
    fn parse_args() -> Result<Self, String> {
        let args: Vec<String> = std::env::args().collect();

        let mut r = None;
        let mut flip = None;
        let mut data = None;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--r" => {
                    i += 1;
                    let value = args.get(i).ok_or("Missing value for --r")?;
                    r = Some(
                        value
                            .parse()
                            .map_err(|_| format!("Invalid check bit count: {}", value))?,
                    );
                }
                "--flip" => {
                    i += 1;
                    let value = args.get(i).ok_or("Missing value for --flip")?;
                    flip = Some(
                        value
                            .parse()
                            .map_err(|_| format!("Invalid bit index: {}", value))?,
                    );
                }
                "-h" | "--help" => {
                    print_help(&args[0]);
                    std::process::exit(0);
                }
                arg if !arg.starts_with('-') && data.is_none() => {
                    data = Some(parse_bits(arg)?);
                }
                arg => return Err(format!("Unexpected argument: {}", arg)),
            }
            i += 1;
        }

        let data = data.ok_or("Missing data bits")?;
        Ok(Config { r, flip, data })
    }
}

fn parse_bits(s: &str) -> Result<Vec<u8>, String> {
    s.chars()
        .map(|c| match c {
            '0' => Ok(0),
            '1' => Ok(1),
            other => Err(format!("Invalid bit '{}' in data word", other)),
        })
        .collect()
}

/// Smallest r whose code carries exactly `k` data bits
fn check_bits_for(k: usize) -> Option<usize> {
    (MIN_CHECK_BITS..=MAX_CHECK_BITS).find(|&r| (1usize << r) - 1 - r == k)
}

fn print_help(program: &str) {
    eprintln!("Hamming code explorer");
    eprintln!();
    eprintln!("Usage: {} [OPTIONS] <data bits>", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --r <n>        Number of check bits (default: inferred from data length)");
    eprintln!("  --flip <i>     Flip codeword bit i (0-based) before decoding");
    eprintln!("  -h, --help     Show this help message");
}

fn main() -> Result<(), String> {
    init_tracing();
    let config = Config::parse_args()?;

    let r = match config.r {
        Some(r) => r,
        None => check_bits_for(config.data.len()).ok_or_else(|| {
            format!(
                "{} data bits match no Hamming code, pass --r explicitly",
                config.data.len()
            )
        })?,
    };

    let codec = HammingCodec::new(r).map_err(|e| e.to_string())?;
    let params = codec.params();
    println!("Hamming ({}, {}) code, r = {}", params.n(), params.k(), params.r());
    println!();

    println!("Generator matrix:");
    for row in codec.encoder.generator_matrix() {
        println!("  {}", row.to_bit_string());
    }
    println!();

    let codeword = codec.encoder.encode(&config.data).map_err(|e| e.to_string())?;
    let extended = codec
        .encoder
        .encode_extended(&config.data)
        .map_err(|e| e.to_string())?;
    println!("Data:      {}", config.data.to_bit_string());
    println!("Codeword:  {}", codeword.to_bit_string());
    println!("Extended:  {}", extended.to_bit_string());

    let mut received = extended;
    if let Some(index) = config.flip {
        inject_error(&mut received, index);
        println!("Received:  {}", received.to_bit_string());
    }

    let syndrome = codec.decoder.syndrome(&received).map_err(|e| e.to_string())?;
    let (decoded, status) = codec
        .decoder
        .decode_with_status(&received)
        .map_err(|e| e.to_string())?;
    println!("Syndrome:  {}", syndrome);
    println!("Status:    {}", status);
    println!("Decoded:   {}", decoded.to_bit_string());

    Ok(())
}
