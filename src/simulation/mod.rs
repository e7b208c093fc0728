//! Channel models and sweep helpers for the simulation tools

pub mod awgn;
pub mod bsc;
pub mod sweep;

pub use awgn::{AwgnChannel, DEFAULT_SEED};
pub use bsc::BinarySymmetricChannel;
pub use sweep::{linspace, logspace, ErrorCounter};
