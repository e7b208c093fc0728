pub mod bit_algebra;
pub mod bitvec_utils;
