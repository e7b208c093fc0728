//! BPSK mapping for the channel simulations

mod bpsk;
mod passband;

pub use bpsk::{BpskDemodulator, BpskModulator};
pub use passband::{CarrierConfig, PassbandDemodulator, PassbandModulator};
