//! Hamming/SECDED block codes with Chase soft-decision decoding, plus the
//! BPSK channel models used to measure them.

pub mod chase;
pub mod error;
pub mod hamming;
pub mod modulation;
pub mod simulation;
pub mod tracing_init;
pub mod util;

pub use chase::{
    calculate_candidates, make_decision, ChaseConfig, ChaseDecision, ChaseDecoder, ProbeAlgorithm,
};
pub use error::{ParameterError, Result};
pub use hamming::{CodeParams, DecodeStatus, HammingCodec, HammingDecoder, HammingEncoder};
