//! Bit position algebra shared by the Hamming codec and the Chase layer
//!
//! Positions are 1-based throughout: position `p` of a codeword lives at
//! slice index `p - 1`. Powers of two are parity positions, everything else
//! carries data in ascending order.

use snafu::ensure;

use crate::error::{EmptySnafu, InvalidProbeWeightSnafu, NonBinarySnafu, Result};

/// Returns `true` if the 1-based position holds a parity bit
#[inline]
pub fn is_parity_position(pos: usize) -> bool {
    pos.is_power_of_two()
}

/// Parity positions 1, 2, 4, ..., 2^(r-1)
pub fn parity_positions(r: usize) -> Vec<usize> {
    (0..r).map(|i| 1usize << i).collect()
}

/// Data positions in 1..=n, ascending
pub fn data_positions(n: usize) -> Vec<usize> {
    (1..=n).filter(|&pos| !is_parity_position(pos)).collect()
}

/// XOR of the 1-based positions of every set bit among the first `n` bits
///
/// For a Hamming codeword this is zero when all parity checks hold, and equals
/// the position of the flipped bit after a single error.
pub fn syndrome(word: &[u8], n: usize) -> usize {
    word.iter()
        .take(n)
        .enumerate()
        .filter(|&(_, &bit)| bit == 1)
        .fold(0, |acc, (i, _)| acc ^ (i + 1))
}

/// XOR parity of every bit in the word
pub fn overall_parity(word: &[u8]) -> u8 {
    word.iter().fold(0, |acc, &bit| acc ^ (bit & 1))
}

/// Fails with the index of the first value that is not 0 or 1
pub fn ensure_binary(what: &'static str, bits: &[u8]) -> Result<()> {
    match bits.iter().position(|&bit| bit > 1) {
        Some(index) => NonBinarySnafu {
            what,
            index,
            value: bits[index],
        }
        .fail(),
        None => Ok(()),
    }
}

/// Indices of the `count` values with the smallest magnitude
///
/// Ordering is by `|value|` ascending; equal magnitudes keep ascending index
/// order, so the result is fully deterministic. NaN sorts after every number.
pub fn n_smallest_indices(values: &[f64], count: usize) -> Result<Vec<usize>> {
    ensure!(!values.is_empty(), EmptySnafu { what: "reliability vector" });
    ensure!(
        count > 0 && count <= values.len(),
        InvalidProbeWeightSnafu {
            count,
            n: values.len()
        }
    );

    let mut indices: Vec<usize> = (0..values.len()).collect();
    indices.sort_by(|&a, &b| values[a].abs().total_cmp(&values[b].abs()));
    indices.truncate(count);

    Ok(indices)
}

/// Flip the bit at a 0-based index; out-of-range indices are ignored
pub fn inject_error(word: &mut [u8], index: usize) {
    if let Some(bit) = word.get_mut(index) {
        *bit ^= 1;
    }
}

/// Flip every listed 0-based index, ignoring those out of range
pub fn inject_errors(word: &mut [u8], indices: &[usize]) {
    for &index in indices {
        inject_error(word, index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParameterError;

    mod positions {
        use super::*;

        #[test]
        fn powers_of_two_are_parity() {
            let parity: Vec<usize> = (1..=16).filter(|&p| is_parity_position(p)).collect();
            assert_eq!(parity, vec![1, 2, 4, 8, 16]);
        }

        #[test]
        fn zero_is_not_a_position() {
            assert!(!is_parity_position(0));
        }

        #[test]
        fn parity_positions_for_r3() {
            assert_eq!(parity_positions(3), vec![1, 2, 4]);
        }

        #[test]
        fn data_positions_for_n7() {
            assert_eq!(data_positions(7), vec![3, 5, 6, 7]);
        }

        #[test]
        fn positions_partition_the_codeword() {
            for r in 2..=6 {
                let n = (1 << r) - 1;
                let mut all = parity_positions(r);
                all.extend(data_positions(n));
                all.sort_unstable();
                assert_eq!(all, (1..=n).collect::<Vec<_>>());
            }
        }
    }

    mod syndrome {
        use super::*;

        #[test]
        fn all_zero_word_has_zero_syndrome() {
            assert_eq!(syndrome(&[0; 7], 7), 0);
        }

        #[test]
        fn single_bit_points_at_its_position() {
            for index in 0..15 {
                let mut word = vec![0u8; 15];
                word[index] = 1;
                assert_eq!(syndrome(&word, 15), index + 1);
            }
        }

        #[test]
        fn bits_past_n_are_ignored() {
            assert_eq!(syndrome(&[0, 0, 0, 0, 0, 0, 0, 1], 7), 0);
        }

        #[test]
        fn valid_codeword_has_zero_syndrome() {
            assert_eq!(syndrome(&[0, 1, 1, 0, 0, 1, 1], 7), 0);
        }
    }

    #[test]
    fn overall_parity_counts_ones() {
        assert_eq!(overall_parity(&[1, 0, 1, 1]), 1);
        assert_eq!(overall_parity(&[1, 1, 0, 0]), 0);
        assert_eq!(overall_parity(&[]), 0);
    }

    #[test]
    fn ensure_binary_reports_first_offender() {
        let err = ensure_binary("data", &[0, 1, 2, 3]).unwrap_err();
        assert_eq!(
            err,
            ParameterError::NonBinary {
                what: "data",
                index: 2,
                value: 2
            }
        );
        assert!(ensure_binary("data", &[0, 1, 1]).is_ok());
    }

    mod n_smallest_indices {
        use super::*;

        #[test]
        fn basic() {
            let rel = [0.9, 0.2, 0.7, 0.1, 0.8];
            assert_eq!(n_smallest_indices(&rel, 3).unwrap(), vec![3, 1, 2]);
        }

        #[test]
        fn duplicates_keep_index_order() {
            let rel = [0.5, 0.3, 0.3, 0.6];
            assert_eq!(n_smallest_indices(&rel, 2).unwrap(), vec![1, 2]);
        }

        #[test]
        fn uses_magnitude() {
            let rel = [-0.1, 0.05, -0.9, 0.4];
            assert_eq!(n_smallest_indices(&rel, 2).unwrap(), vec![1, 0]);
        }

        #[test]
        fn single_element() {
            assert_eq!(n_smallest_indices(&[5.0], 1).unwrap(), vec![0]);
        }

        #[test]
        fn all_elements() {
            assert_eq!(n_smallest_indices(&[3.0, 1.0, 2.0], 3).unwrap(), vec![1, 2, 0]);
        }

        #[test]
        fn too_many_is_an_error() {
            assert!(n_smallest_indices(&[1.0, 2.0], 3).is_err());
        }

        #[test]
        fn zero_is_an_error() {
            assert!(n_smallest_indices(&[1.0], 0).is_err());
        }

        #[test]
        fn empty_input_is_an_error() {
            assert!(n_smallest_indices(&[], 1).is_err());
        }
    }

    #[test]
    fn inject_errors_flips_and_ignores_out_of_range() {
        let mut word = vec![0u8, 1, 0, 1];
        inject_errors(&mut word, &[0, 3, 9]);
        assert_eq!(word, vec![1, 1, 0, 0]);
    }
}
