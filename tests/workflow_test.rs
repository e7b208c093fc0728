//! End-to-end pipelines: encode, modulate, add noise, demodulate, decode


use harq::chase::{ChaseConfig, ChaseDecoder, ProbeAlgorithm};
use harq::hamming::{DecodeStatus, HammingCodec};
use harq::modulation::{
    BpskDemodulator, BpskModulator, CarrierConfig, PassbandDemodulator, PassbandModulator,
};
use harq::simulation::{AwgnChannel, BinarySymmetricChannel, ErrorCounter};
use harq::tracing_init::init_test_tracing;

use test_utils::random_bits;

fn passband_round_trip(bits: &[u8]) -> Vec<u8> {
    let codec = HammingCodec::new(3).unwrap();
    let codeword = codec.encoder.encode(bits).unwrap();

    let config = CarrierConfig {
        carrier_hz: 2.0,
        sample_rate_hz: 32.0,
        samples_per_symbol: 16,
        amplitude: 1.0,
        phase: 0.0,
    };
    let passband = PassbandModulator::new(config).unwrap().modulate(&codeword).unwrap();

    let mut channel = AwgnChannel::new(100.0, 123).unwrap();
    let noisy = channel.add_noise(&passband);
    let llr = channel.compute_llr(&noisy);
    assert_eq!(llr.len(), noisy.len());

    let received = PassbandDemodulator::new(config).unwrap().demodulate(&noisy).unwrap();
    codec.decoder.decode(&received).unwrap()
}

#[test]
fn bits_round_trip_passband_with_awgn() {
    init_test_tracing();
    assert_eq!(passband_round_trip(&[1, 0, 1, 1]), vec![1, 0, 1, 1]);
    assert_eq!(passband_round_trip(&[0, 0, 0, 0]), vec![0, 0, 0, 0]);
}

#[test]
fn baseband_round_trip_every_code_size() {
    init_test_tracing();
    for r in 2..=6 {
        let codec = HammingCodec::new(r).unwrap();
        let data = random_bits(codec.params().k(), r as u64);
        let codeword = codec.encoder.encode_extended(&data).unwrap();

        let symbols = BpskModulator.modulate(&codeword).unwrap();
        let mut channel = AwgnChannel::new(60.0, 99).unwrap();
        let received = BpskDemodulator.demodulate(&channel.add_noise(&symbols));

        let (decoded, status) = codec.decoder.decode_with_status(&received).unwrap();
        assert_eq!(status, DecodeStatus::NoError, "r={}", r);
        assert_eq!(decoded, data, "r={}", r);
    }
}

#[test]
fn chase_never_loses_to_hard_decoding_on_the_same_blocks() {
    init_test_tracing();
    let codec = HammingCodec::new(3).unwrap();
    let chase = ChaseDecoder::from_decoder(
        codec.decoder.clone(),
        ChaseConfig {
            distance: 4,
            algorithm: ProbeAlgorithm::LeastReliable,
        },
    );
    let mut channel = AwgnChannel::new(3.0, 2024).unwrap();

    let mut hard = ErrorCounter::default();
    let mut soft = ErrorCounter::default();
    for block in 0..2000u64 {
        let data = random_bits(4, block);
        let codeword = codec.encoder.encode(&data).unwrap();
        let received = channel.add_noise(&BpskModulator.modulate(&codeword).unwrap());

        let decoded = codec
            .decoder
            .decode(&BpskDemodulator.demodulate(&received))
            .unwrap();
        hard.record_block(&data, &decoded);
        soft.record_block(&data, &chase.decode(&received).unwrap().data);
    }

    assert_eq!(hard.total_blocks, 2000);
    assert!(hard.block_errors > 0);
    assert!(
        soft.block_errors < hard.block_errors,
        "chase {} vs hard {}",
        soft.block_errors,
        hard.block_errors
    );
}

#[test]
fn bsc_sweep_bler_grows_with_p() {
    init_test_tracing();
    let codec = HammingCodec::new(3).unwrap();

    let bler_at = |p: f64| {
        let mut channel = BinarySymmetricChannel::new(p, 5489).unwrap();
        let mut counter = ErrorCounter::default();
        for _ in 0..5000 {
            let data = channel.random_bits(4);
            let codeword = codec.encoder.encode(&data).unwrap();
            let received = channel.transmit(&codeword).unwrap();
            counter.record_block(&data, &codec.decoder.decode(&received).unwrap());
        }
        counter.bler()
    };

    assert_eq!(bler_at(0.0), 0.0);
    let low = bler_at(0.01);
    let high = bler_at(0.1);
    assert!(low < high, "{} !< {}", low, high);
    // (7,4) fails only on two or more flips: about 21 p^2 at small p
    assert!(low < 0.01);
}
