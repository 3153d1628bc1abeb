// Interleavers scatter consecutive channel symbols across the codeword so that a fade or burst
// on the air corrupts bits that are far apart after deinterleaving. Two legacy address
// generators exist, and each wire format depends on its own wrap-around arithmetic, so they are
// kept as separate strategies rather than folded into one.

/// An address generator over a fixed bit canvas. Positions are absolute bit offsets into the
/// codeword, MSB first within each byte.
pub trait BitInterleaver {
    /// Where the next bit will be written.
    fn position(&self) -> usize;

    fn advance(&mut self);

    fn interleave_bit(&mut self, codeword: &mut [u8], bit: bool) {
        let position = self.position();
        let mask = 0x80u8 >> (position & 7);
        if bit {
            codeword[position >> 3] |= mask;
        } else {
            codeword[position >> 3] &= !mask;
        }
        self.advance();
    }
}

/// Running index stepped by a fixed amount. On overflow the index is pulled back by one less
/// than the canvas size, so each pass starts one bit to the right of the previous pass. With a
/// step dividing the canvas this walks the columns of a step-wide matrix.
#[derive(Debug, Clone)]
pub struct LinearInterleaver {
    index: usize,
    step: usize,
    total_bits: usize,
}

impl LinearInterleaver {
    pub fn new(step: usize, total_bits: usize) -> Self {
        Self {
            index: 0,
            step,
            total_bits,
        }
    }
}

impl BitInterleaver for LinearInterleaver {
    fn position(&self) -> usize {
        self.index
    }

    fn advance(&mut self) {
        self.index += self.step;
        if self.index >= self.total_bits {
            self.index -= self.total_bits - 1;
        }
    }
}

/// Byte stride with a separate bit mask. Each pass over the bytes uses one bit plane; once all
/// eight planes of a byte column are used, the walk moves on to the next byte column.
#[derive(Debug, Clone)]
pub struct StrideInterleaver {
    byte_index: usize,
    mask: u8,
    stride: usize,
    length: usize,
}

impl StrideInterleaver {
    pub fn new(stride: usize, length: usize) -> Self {
        Self {
            byte_index: 0,
            mask: 0x80,
            stride,
            length,
        }
    }

    pub fn byte_index(&self) -> usize {
        self.byte_index
    }

    pub fn mask(&self) -> u8 {
        self.mask
    }
}

impl BitInterleaver for StrideInterleaver {
    fn position(&self) -> usize {
        (self.byte_index << 3) + self.mask.leading_zeros() as usize
    }

    fn advance(&mut self) {
        self.byte_index += self.stride;
        if self.byte_index >= self.length {
            self.byte_index -= self.length;
            self.mask >>= 1;
            if self.mask == 0 {
                self.mask = 0x80;
                self.byte_index += 1;
            }
        }
    }
}

#[cfg(test)]
#[path = "./interleaver_spec.rs"]
mod interleaver_spec;
