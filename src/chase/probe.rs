//! Error pattern (probe) generation
//!
//! Every generator returns patterns of length `n`; `w = d / 2` is the number of
//! errors a distance-`d` code can fix on its own.

use snafu::ensure;

use crate::error::{
    InvalidCodeShapeSnafu, InvalidProbeWeightSnafu, Result, SoftLengthSnafu, TooManyProbesSnafu,
};
use crate::util::bit_algebra::n_smallest_indices;

/// Upper bound on the number of patterns a single call may enumerate
pub const MAX_PROBES: usize = 1 << 16;

/// Every weight-`d/2` pattern of length `n`, preceded by the all-zero pattern
///
/// Patterns come out in lexicographic order, starting with the ones packed at
/// the end (`0..01..1`) and ending with them at the front.
pub fn exhaustive_probes(n: usize, d: usize) -> Result<Vec<Vec<u8>>> {
    let weight = d / 2;
    ensure!(weight > 0 && weight <= n, InvalidProbeWeightSnafu { count: weight, n });

    let Some(count) = binomial(n, weight).filter(|&c| c <= MAX_PROBES) else {
        return TooManyProbesSnafu {
            n,
            weight,
            max: MAX_PROBES,
        }
        .fail();
    };

    let mut probes = Vec::with_capacity(count + 1);
    probes.push(vec![0u8; n]);

    let mut mask = vec![0u8; n];
    mask[n - weight..].fill(1);
    loop {
        probes.push(mask.clone());
        if !next_permutation(&mut mask) {
            break;
        }
    }

    Ok(probes)
}

/// All 2^(d/2) patterns over the `d/2` least reliable positions
///
/// Bit `i` of the enumeration counter drives the `i`-th least reliable
/// position; every other position stays zero. `d/2 == 0` yields only the
/// all-zero pattern.
pub fn least_reliable_probes(n: usize, d: usize, reliability: &[f64]) -> Result<Vec<Vec<u8>>> {
    validate_shape(n, d, reliability)?;

    let weight = d / 2;
    ensure!(weight <= n, InvalidProbeWeightSnafu { count: weight, n });
    if weight == 0 {
        return Ok(vec![vec![0u8; n]]);
    }
    ensure!(
        (1usize << weight.min(usize::BITS as usize - 1)) <= MAX_PROBES,
        TooManyProbesSnafu {
            n,
            weight,
            max: MAX_PROBES
        }
    );

    let positions = n_smallest_indices(reliability, weight)?;

    let probes = (0..1usize << weight)
        .map(|mask| {
            let mut probe = vec![0u8; n];
            for (i, &pos) in positions.iter().enumerate() {
                probe[pos] = ((mask >> i) & 1) as u8;
            }
            probe
        })
        .collect();

    Ok(probes)
}

/// A single pattern over the `d - 1` least reliable positions
///
/// Odd `d` sets every other selected position starting at the first. Even
/// `d` sets the first two, then every other one starting at the fourth.
pub fn single_pattern_probe(n: usize, d: usize, reliability: &[f64]) -> Result<Vec<Vec<u8>>> {
    validate_shape(n, d, reliability)?;

    let count = d - 1;
    ensure!(count <= n, InvalidProbeWeightSnafu { count, n });

    let positions = n_smallest_indices(reliability, count)?;

    let ones: Vec<usize> = if d % 2 == 1 {
        positions.iter().step_by(2).copied().collect()
    } else {
        positions
            .iter()
            .take(2)
            .chain(positions.iter().skip(3).step_by(2))
            .copied()
            .collect()
    };

    let mut probe = vec![0u8; n];
    for pos in ones {
        probe[pos] = 1;
    }

    Ok(vec![probe])
}

fn validate_shape(n: usize, d: usize, reliability: &[f64]) -> Result<()> {
    ensure!(n > 0 && d > 0, InvalidCodeShapeSnafu { n, d });
    ensure!(
        reliability.len() == n,
        SoftLengthSnafu {
            what: "reliability vector",
            expected: n,
            actual: reliability.len()
        }
    );
    Ok(())
}

/// Rearrange into the next lexicographic permutation; `false` once the
/// sequence is in descending order
fn next_permutation(v: &mut [u8]) -> bool {
    let Some(i) = (1..v.len()).rev().find(|&i| v[i - 1] < v[i]) else {
        return false;
    };
    let pivot = i - 1;
    let j = (i..v.len()).rfind(|&j| v[j] > v[pivot]).unwrap_or(i);
    v.swap(pivot, j);
    v[i..].reverse();
    true
}

/// C(n, k), or `None` if it overflows
fn binomial(n: usize, k: usize) -> Option<usize> {
    let k = k.min(n - k);
    (0..k).try_fold(1usize, |acc, i| Some(acc.checked_mul(n - i)? / (i + 1)))
}
