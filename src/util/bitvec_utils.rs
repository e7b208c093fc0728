use bitvec::prelude::*;

/// Pack a slice of 0/1 bytes into a bit vector (any non-zero byte is a one)
pub fn bits_to_bitvec(bits: &[u8]) -> BitVec<u8, Msb0> {
    bits.iter().map(|&bit| bit != 0).collect()
}

/// Unpack a bit slice into one 0/1 byte per bit
pub fn bitslice_to_bits(bs: &BitSlice<u8, Msb0>) -> Vec<u8> {
    bs.iter().map(|bit| *bit as u8).collect()
}

/// XOR `rhs` into `acc` bit by bit; both must have the same length
pub fn xor_into(acc: &mut BitSlice<u8, Msb0>, rhs: &BitSlice<u8, Msb0>) {
    assert_eq!(acc.len(), rhs.len(), "XOR operands must have equal length");
    for (mut a, b) in acc.iter_mut().zip(rhs.iter()) {
        *a ^= *b;
    }
}

pub trait BitsToString {
    /// Render as space separated digits, e.g. `"1 0 1 1"`
    fn to_bit_string(&self) -> String;
}

impl BitsToString for [u8] {
    fn to_bit_string(&self) -> String {
        self.iter()
            .map(|bit| bit.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl BitsToString for BitSlice<u8, Msb0> {
    fn to_bit_string(&self) -> String {
        self.iter()
            .map(|bit| if *bit { "1" } else { "0" })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
