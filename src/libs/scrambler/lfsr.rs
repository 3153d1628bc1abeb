// Both the data scrambler and the pilot (sync) pattern come from the same 8-bit Fibonacci LFSR
// mechanic: shift left, and bring in the parity of the tapped bits as the new LSB.

use crate::libs::util::bits::parity;

pub const SCRAMBLER_SEED: u8 = 0xff;
pub const SCRAMBLER_POLY: u8 = 0x95;
pub const PILOT_SEED: u8 = 0x7f;
pub const PILOT_POLY: u8 = 0x48;
// The pilot generator is a 7-bit register; its output is the oldest bit.
const PILOT_OUTPUT_MASK: u8 = 0x40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lfsr {
    register: u8,
    polynomial: u8,
}

impl Lfsr {
    pub fn new(seed: u8, polynomial: u8) -> Self {
        Self {
            register: seed,
            polynomial,
        }
    }

    pub fn register(&self) -> u8 {
        self.register
    }

    #[inline]
    pub fn advance(&mut self) {
        self.register = (self.register << 1) | parity(self.register & self.polynomial) as u8;
    }
}

/// Additive scrambler. The keystream byte is the register contents at the time the byte
/// arrives; the register then free-runs eight steps, whatever the data.
#[derive(Debug, Clone)]
pub struct Scrambler {
    lfsr: Lfsr,
}

impl Scrambler {
    pub fn new(seed: u8, polynomial: u8) -> Self {
        Self {
            lfsr: Lfsr::new(seed, polynomial),
        }
    }

    pub fn register(&self) -> u8 {
        self.lfsr.register()
    }

    pub fn scramble(&mut self, byte: u8) -> u8 {
        let scrambled = byte ^ self.lfsr.register();
        for _ in 0..8 {
            self.lfsr.advance();
        }
        scrambled
    }
}

impl Default for Scrambler {
    fn default() -> Self {
        Scrambler::new(SCRAMBLER_SEED, SCRAMBLER_POLY)
    }
}

/// Endless source of pilot bits: 1111111000011101111001...
#[derive(Debug, Clone)]
pub struct PilotGenerator {
    lfsr: Lfsr,
}

impl PilotGenerator {
    pub fn new(seed: u8, polynomial: u8) -> Self {
        Self {
            lfsr: Lfsr::new(seed, polynomial),
        }
    }
}

impl Default for PilotGenerator {
    fn default() -> Self {
        PilotGenerator::new(PILOT_SEED, PILOT_POLY)
    }
}

impl Iterator for PilotGenerator {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        let bit = self.lfsr.register() & PILOT_OUTPUT_MASK != 0;
        self.lfsr.advance();
        Some(bit)
    }
}

#[cfg(test)]
#[path = "./lfsr_spec.rs"]
mod lfsr_spec;
