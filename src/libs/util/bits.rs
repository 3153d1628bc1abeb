use bitvec::prelude::{BitVec, Lsb0, Msb0};

/// XOR-fold of all the bits in a byte: true if an odd number of them are set.
#[inline]
pub fn parity(byte: u8) -> bool {
    let mut x = byte;
    x ^= x >> 4;
    x ^= x >> 2;
    x ^= x >> 1;
    x & 1 == 1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitOrder {
    MsbFirst,
    LsbFirst,
}

// Unpacks a codeword into one bool per bit, for harnesses that want to look at the transmitted
// bitstream rather than the packed bytes. Every byte of the codeword contributes 8 entries,
// including any trailing bits the interleaver never reaches.
pub fn expand_bits(codeword: &[u8], order: BitOrder) -> Vec<bool> {
    match order {
        BitOrder::MsbFirst => {
            let bits = BitVec::<u8, Msb0>::from_vec(codeword.to_vec());
            (0..bits.len()).map(|i| bits[i]).collect()
        }
        BitOrder::LsbFirst => {
            let bits = BitVec::<u8, Lsb0>::from_vec(codeword.to_vec());
            (0..bits.len()).map(|i| bits[i]).collect()
        }
    }
}

#[cfg(test)]
#[path = "./bits_spec.rs"]
mod bits_spec;
