//! SECDED behaviour across code sizes


use harq::hamming::{DecodeStatus, HammingCodec};
use harq::util::bit_algebra::{inject_error, inject_errors};

use test_utils::{all_words, random_bits};

#[test]
fn single_flip_anywhere_is_repaired() {
    for r in 2..=4 {
        let codec = HammingCodec::new(r).unwrap();
        let n = codec.params().n();
        for data in all_words(codec.params().k()) {
            let extended = codec.encoder.encode_extended(&data).unwrap();
            for pos in 0..=n {
                let mut received = extended.clone();
                inject_error(&mut received, pos);
                let (decoded, status) = codec.decoder.decode_with_status(&received).unwrap();
                let expected = if pos == n {
                    DecodeStatus::ParityCorrected
                } else {
                    DecodeStatus::Corrected
                };
                assert_eq!(status, expected, "r={} pos={}", r, pos);
                assert_eq!(decoded, data);
                assert_eq!(codec.decoder.correct(&received).unwrap(), extended);
            }
        }
    }
}

#[test]
fn double_flip_is_always_detected() {
    for r in 2..=5 {
        let codec = HammingCodec::new(r).unwrap();
        let data = random_bits(codec.params().k(), 7);
        let extended = codec.encoder.encode_extended(&data).unwrap();
        let len = extended.len();

        for a in 0..len {
            for b in (a + 1)..len {
                let mut received = extended.clone();
                inject_errors(&mut received, &[a, b]);
                let (_, status) = codec.decoder.decode_with_status(&received).unwrap();
                assert_eq!(status, DecodeStatus::DetectedDouble, "r={} a={} b={}", r, a, b);
                assert!(!status.is_reliable());
                // detected words are handed back untouched
                assert_eq!(codec.decoder.correct(&received).unwrap(), received);
            }
        }
    }
}

#[test]
fn out_of_range_injection_is_ignored() {
    let codec = HammingCodec::new(3).unwrap();
    let extended = codec.encoder.encode_extended(&[1, 0, 1, 1]).unwrap();
    let mut received = extended.clone();
    inject_errors(&mut received, &[8, 100]);
    assert_eq!(received, extended);
    assert_eq!(
        codec.decoder.decode_with_status(&received).unwrap().1,
        DecodeStatus::NoError
    );
}
