//! Hamming and SECDED block codes
//!
//! A (2^r - 1, 2^r - 1 - r, 3) Hamming code with parity bits at the
//! power-of-two positions and data bits everywhere else. Appending one overall
//! parity bit gives the (2^r, 2^r - 1 - r, 4) extended code, which corrects a
//! single error and detects (but cannot fix) a double error.
//!
//! [`HammingEncoder`] and [`HammingDecoder`] can be built independently from
//! `r`, or from one shared [`CodeParams`] so they provably agree.

mod decode;
mod encode;
mod params;

use std::fmt;
use std::sync::Arc;

pub use decode::HammingDecoder;
pub use encode::HammingEncoder;
pub use params::{CodeParams, HAMMING_CODE_DISTANCE, MAX_CHECK_BITS, MIN_CHECK_BITS};

use crate::error::Result;

/// Outcome of a SECDED decode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeStatus {
    /// Syndrome and overall parity both clean
    NoError,
    /// A single error in the n-bit body was flipped back
    Corrected,
    /// Only the overall parity bit was wrong
    ParityCorrected,
    /// Two errors detected; the returned bits are the received ones
    DetectedDouble,
}

impl DecodeStatus {
    /// `false` when the caller must discard or retransmit the block
    pub fn is_reliable(self) -> bool {
        self != DecodeStatus::DetectedDouble
    }
}

impl fmt::Display for DecodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DecodeStatus::NoError => "no error",
            DecodeStatus::Corrected => "corrected",
            DecodeStatus::ParityCorrected => "parity corrected",
            DecodeStatus::DetectedDouble => "double error detected",
        };
        f.write_str(label)
    }
}

/// Encoder and decoder sharing one set of code parameters
#[derive(Debug, Clone)]
pub struct HammingCodec {
    pub encoder: HammingEncoder,
    pub decoder: HammingDecoder,
}

impl HammingCodec {
    pub fn new(r: usize) -> Result<Self> {
        let params = Arc::new(CodeParams::new(r)?);
        Ok(HammingCodec {
            encoder: HammingEncoder::from_params(params.clone()),
            decoder: HammingDecoder::from_params(params),
        })
    }

    pub fn params(&self) -> &Arc<CodeParams> {
        self.encoder.params()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codec_halves_share_parameters() {
        let codec = HammingCodec::new(4).unwrap();
        assert!(Arc::ptr_eq(codec.encoder.params(), codec.decoder.params()));
        assert_eq!(codec.params().n(), 15);
    }

    #[test]
    fn only_detected_double_is_unreliable() {
        assert!(DecodeStatus::NoError.is_reliable());
        assert!(DecodeStatus::Corrected.is_reliable());
        assert!(DecodeStatus::ParityCorrected.is_reliable());
        assert!(!DecodeStatus::DetectedDouble.is_reliable());
    }

    #[test]
    fn concrete_scenario_r3() {
        let codec = HammingCodec::new(3).unwrap();
        let data = [1, 0, 1, 1];

        let codeword = codec.encoder.encode(&data).unwrap();
        assert_eq!(codeword, vec![0, 1, 1, 0, 0, 1, 1]);

        let mut flipped = codeword.clone();
        flipped[2] ^= 1;
        assert_eq!(codec.decoder.decode(&flipped).unwrap(), data.to_vec());

        let mut extended = codec.encoder.encode_extended(&data).unwrap();
        extended[7] ^= 1;
        let (decoded, status) = codec.decoder.decode_with_status(&extended).unwrap();
        assert_eq!(status, DecodeStatus::ParityCorrected);
        assert_eq!(decoded, data.to_vec());
    }
}
