// Systematic encoder for the CCSDS (255,223) Reed-Solomon code, in conventional rather than dual
// basis, shortened to the payload length of the profile. The generator polynomial has 32 roots
// α^(11 * (112 + i)), and is palindromic, so only 16 of its 33 log-form coefficients are stored:
// g[1..=15] and g[17..=31] mirror each other, g[16] is the middle term, and the outer
// coefficients are both α^0.
//
// The parity register is the classic LFSR realisation of division by the generator; after the
// last payload byte it holds the remainder, i.e. the parity bytes, highest degree first.

use crate::libs::galois_field::galois_field::{A0, GaloisField, mod255};

pub const RS_PARITY_BYTES: usize = 32;
/// Longest payload a single (255,223) block can carry.
pub const RS_MAX_DATA_BYTES: usize = 223;

/// Log-form coefficients g[1..=16] of the generator polynomial.
pub const RS_POLY: [u8; 16] = [249, 59, 66, 4, 43, 126, 251, 97, 30, 3, 213, 50, 66, 170, 5, 24];

pub type ParityBlock = [u8; RS_PARITY_BYTES];

/// Accumulates payload bytes and yields parity bytes. Implementations differ only in how many
/// independent registers they run and how those registers' bytes are ordered on the way out.
pub trait ParityGenerator {
    fn feed(&mut self, byte: u8);
    /// Total number of parity bytes that follow the payload.
    fn parity_len(&self) -> usize;
    /// The index'th parity byte in transmission order.
    fn parity_byte(&self, index: usize) -> u8;
}

pub struct ReedSolomonEncoder<'a> {
    field: &'a dyn GaloisField,
    parity: ParityBlock,
}

impl<'a> ReedSolomonEncoder<'a> {
    pub fn new(field: &'a dyn GaloisField) -> Self {
        Self {
            field,
            parity: [0; RS_PARITY_BYTES],
        }
    }

    pub fn reset(&mut self) {
        self.parity = [0; RS_PARITY_BYTES];
    }

    pub fn parity(&self) -> &ParityBlock {
        &self.parity
    }

    pub fn feed(&mut self, byte: u8) {
        let feedback = self.field.index_of(byte ^ self.parity[0]);

        if feedback != A0 {
            for i in 0..15 {
                let t = self.field.alpha_to(mod255(feedback as u16 + RS_POLY[i] as u16));
                self.parity[i + 1] ^= t;
                self.parity[31 - i] ^= t;
            }
            self.parity[16] ^= self.field.alpha_to(mod255(feedback as u16 + RS_POLY[15] as u16));
        }

        self.parity.copy_within(1.., 0);

        self.parity[RS_PARITY_BYTES - 1] = if feedback != A0 {
            self.field.alpha_to(feedback)
        } else {
            0
        };
    }
}

impl<'a> ParityGenerator for ReedSolomonEncoder<'a> {
    fn feed(&mut self, byte: u8) {
        ReedSolomonEncoder::feed(self, byte);
    }

    fn parity_len(&self) -> usize {
        RS_PARITY_BYTES
    }

    fn parity_byte(&self, index: usize) -> u8 {
        self.parity[index]
    }
}

/// Two interleaved Reed-Solomon blocks over one payload: even-indexed payload bytes go to the
/// first register, odd-indexed bytes to the second. On the way out the parity bytes alternate
/// the same way, first register first.
///
/// Only the 256-byte AO-40 layout uses this; parity byte n of the codeword is taken from
/// register n & 1 at offset n >> 1, which is where the legacy format puts it when parity starts
/// at absolute byte 256.
pub struct PingPongReedSolomonEncoder<'a> {
    blocks: [ReedSolomonEncoder<'a>; 2],
    bytes_fed: usize,
}

impl<'a> PingPongReedSolomonEncoder<'a> {
    pub fn new(field: &'a dyn GaloisField) -> Self {
        Self {
            blocks: [ReedSolomonEncoder::new(field), ReedSolomonEncoder::new(field)],
            bytes_fed: 0,
        }
    }

    pub fn block(&self, which: usize) -> &ParityBlock {
        self.blocks[which].parity()
    }

    pub fn bytes_fed(&self) -> usize {
        self.bytes_fed
    }
}

impl<'a> ParityGenerator for PingPongReedSolomonEncoder<'a> {
    fn feed(&mut self, byte: u8) {
        self.blocks[self.bytes_fed & 1].feed(byte);
        self.bytes_fed += 1;
    }

    fn parity_len(&self) -> usize {
        2 * RS_PARITY_BYTES
    }

    fn parity_byte(&self, index: usize) -> u8 {
        self.blocks[index & 1].parity()[index >> 1]
    }
}

#[cfg(test)]
#[path = "./reed_solomon_spec.rs"]
mod reed_solomon_spec;
