// Rate 1/2, constraint length 7 convolutional encoder. Each input bit yields two channel
// symbols; the second is inverted, and the ground Viterbi decoder re-inverts it before
// decoding.

use crate::libs::util::bits::parity;

pub const CPOLYA: u8 = 0x4f; // 79
pub const CPOLYB: u8 = 0x6d; // 109
/// Zero bits fed after the data to bring the encoder back to the all-zero state.
pub const TAIL_BITS: usize = 6;
/// The K-1 most recent input bits.
const MEMORY_MASK: u8 = 0x3f;

#[derive(Debug, Clone)]
pub struct ConvolutionalEncoder {
    shift_register: u8,
    polynomial_a: u8,
    polynomial_b: u8,
}

impl ConvolutionalEncoder {
    pub fn new(polynomial_a: u8, polynomial_b: u8) -> Self {
        Self {
            shift_register: 0,
            polynomial_a,
            polynomial_b,
        }
    }

    pub fn reset(&mut self) {
        self.shift_register = 0;
    }

    /// The encoder memory: the last six bits shifted in.
    /// Bits 6-7 of the register are shifted-out history and are not part of the state; after a
    /// flush they may still hold data bits while the state is 0.
    pub fn state(&self) -> u8 {
        self.shift_register & MEMORY_MASK
    }

    pub fn feed_bit(&mut self, bit: bool) -> (bool, bool) {
        self.shift_register = (self.shift_register << 1) | bit as u8;
        (
            parity(self.shift_register & self.polynomial_a),
            !parity(self.shift_register & self.polynomial_b),
        )
    }

    /// Encodes the top `count` bits of `byte`, MSB first, handing each symbol to `emit` in
    /// transmission order.
    pub fn encode_bits<F: FnMut(bool)>(&mut self, byte: u8, count: usize, mut emit: F) {
        let mut c = byte;
        for _ in 0..count {
            let (a, b) = self.feed_bit(c & 0x80 != 0);
            c <<= 1;
            emit(a);
            emit(b);
        }
    }

    pub fn encode_byte<F: FnMut(bool)>(&mut self, byte: u8, emit: F) {
        self.encode_bits(byte, 8, emit);
    }

    pub fn flush<F: FnMut(bool)>(&mut self, emit: F) {
        self.encode_bits(0, TAIL_BITS, emit);
    }
}

impl Default for ConvolutionalEncoder {
    fn default() -> Self {
        ConvolutionalEncoder::new(CPOLYA, CPOLYB)
    }
}

#[cfg(test)]
#[path = "./convolutional_encoder_spec.rs"]
mod convolutional_encoder_spec;
