// A Profile holds every constant that distinguishes one coded telemetry format from another.
// The algorithms are shared; only these numbers vary.

extern crate lazy_static;
use lazy_static::lazy_static;

use serde_derive::{Deserialize, Serialize};

use crate::libs::convolutional::convolutional_encoder::{CPOLYA, CPOLYB, TAIL_BITS};
use crate::libs::error::fec_error::{FecError, FecResult};
use crate::libs::galois_field::galois_field::GF_POLY;
use crate::libs::interleaver::interleaver::{BitInterleaver, LinearInterleaver, StrideInterleaver};
use crate::libs::reed_solomon::reed_solomon::{RS_MAX_DATA_BYTES, RS_PARITY_BYTES};
use crate::libs::scrambler::lfsr::{PILOT_POLY, PILOT_SEED, SCRAMBLER_POLY, SCRAMBLER_SEED};

pub const AO40_DATA_SIZE: usize = 256;
pub const AO40_CODE_LENGTH: usize = 650;
pub const AO40_SHORT_DATA_SIZE: usize = 128;
pub const AO40_SHORT_CODE_LENGTH: usize = 332;

/// The ping-pong parity layout is tied to the AO-40 payload size.
pub const PING_PONG_DATA_SIZE: usize = AO40_DATA_SIZE;

/// Upper bound on a custom codeword, keeping every bit count derived from it well inside `usize`.
pub const MAX_CODE_LENGTH: usize = u16::MAX as usize;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ParityLayout {
    /// One Reed-Solomon block over the whole payload.
    Single,
    /// Two blocks over alternate payload bytes, parity bytes alternating between them.
    PingPong,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "scheme", rename_all = "kebab-case")]
pub enum InterleaverScheme {
    Linear { step: usize, total_bits: usize },
    Stride { stride: usize },
}

// Fields holding plain values come before `interleaver`, which serialises as a TOML table.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Profile {
    pub name: String,
    pub data_size: usize,
    pub code_length: usize,
    /// Per Reed-Solomon block.
    pub rs_parity_bytes: usize,
    pub parity_layout: ParityLayout,
    pub pilot_bits: usize,
    pub pilot_seed: u8,
    pub pilot_polynomial: u8,
    pub scrambler_seed: u8,
    pub scrambler_polynomial: u8,
    pub conv_polynomial_a: u8,
    pub conv_polynomial_b: u8,
    pub gf_polynomial: u16,
    pub interleaver: InterleaverScheme,
}

lazy_static! {
    static ref BUILTIN_PROFILES: Vec<(&'static str, Profile)> = vec![
        ("ao40", Profile::ao40()),
        ("long", Profile::ao40()),
        ("ao40-short", Profile::ao40_short()),
        ("short", Profile::ao40_short()),
        ("smog-ref", Profile::smog_ref()),
        ("reference", Profile::smog_ref()),
    ];
}

impl Profile {
    /// 256 byte payload, two interleaved RS blocks, 650 byte codeword.
    pub fn ao40() -> Self {
        Self::long_format("ao40")
    }

    /// 128 byte payload, one RS block, 332 byte codeword.
    pub fn ao40_short() -> Self {
        Self {
            name: "ao40-short".to_string(),
            data_size: AO40_SHORT_DATA_SIZE,
            code_length: AO40_SHORT_CODE_LENGTH,
            rs_parity_bytes: RS_PARITY_BYTES,
            parity_layout: ParityLayout::Single,
            pilot_bits: 80,
            pilot_seed: PILOT_SEED,
            pilot_polynomial: PILOT_POLY,
            scrambler_seed: SCRAMBLER_SEED,
            scrambler_polynomial: SCRAMBLER_POLY,
            conv_polynomial_a: CPOLYA,
            conv_polynomial_b: CPOLYB,
            gf_polynomial: GF_POLY,
            // 51 * 52; the last 4 bits of the final byte are never written
            interleaver: InterleaverScheme::Linear { step: 51, total_bits: 2652 },
        }
    }

    /// The reference encoder: same wire format as AO-40, usually built with the low-memory
    /// Galois field.
    pub fn smog_ref() -> Self {
        Self::long_format("smog-ref")
    }

    fn long_format(name: &str) -> Self {
        Self {
            name: name.to_string(),
            data_size: AO40_DATA_SIZE,
            code_length: AO40_CODE_LENGTH,
            rs_parity_bytes: RS_PARITY_BYTES,
            parity_layout: ParityLayout::PingPong,
            // the MSB of every tenth byte
            pilot_bits: 65,
            pilot_seed: PILOT_SEED,
            pilot_polynomial: PILOT_POLY,
            scrambler_seed: SCRAMBLER_SEED,
            scrambler_polynomial: SCRAMBLER_POLY,
            conv_polynomial_a: CPOLYA,
            conv_polynomial_b: CPOLYB,
            gf_polynomial: GF_POLY,
            interleaver: InterleaverScheme::Stride { stride: 10 },
        }
    }

    pub fn builtin(name: &str) -> Option<Profile> {
        BUILTIN_PROFILES.iter()
            .find(|(builtin_name, _)| *builtin_name == name)
            .map(|(_, profile)| profile.clone())
    }

    pub fn builtin_names() -> Vec<&'static str> {
        BUILTIN_PROFILES.iter().map(|(name, _)| *name).collect()
    }

    pub fn rs_blocks(&self) -> usize {
        match self.parity_layout {
            ParityLayout::Single => 1,
            ParityLayout::PingPong => 2,
        }
    }

    /// Parity bytes following the payload, across all blocks.
    pub fn parity_total(&self) -> usize {
        self.rs_parity_bytes * self.rs_blocks()
    }

    /// Channel symbols produced by the convolutional encoder, including the tail.
    pub fn encoded_bits(&self) -> usize {
        ((self.data_size + self.parity_total()) * 8 + TAIL_BITS) * 2
    }

    /// Size of the interleaver's canvas.
    pub fn interleaver_bits(&self) -> usize {
        match self.interleaver {
            InterleaverScheme::Linear { total_bits, .. } => total_bits,
            InterleaverScheme::Stride { .. } => self.code_length.saturating_mul(8),
        }
    }

    pub fn new_interleaver(&self) -> Box<dyn BitInterleaver> {
        match self.interleaver {
            InterleaverScheme::Linear { step, total_bits } => Box::new(LinearInterleaver::new(step, total_bits)),
            InterleaverScheme::Stride { stride } => Box::new(StrideInterleaver::new(stride, self.code_length)),
        }
    }

    fn invalid(&self, reason: String) -> FecError {
        FecError::InvalidProfile {
            name: self.name.clone(),
            reason,
        }
    }

    pub fn validate(&self) -> FecResult<()> {
        if self.data_size == 0 {
            return Err(self.invalid("data size must be nonzero".to_string()));
        }
        if self.code_length == 0 || self.code_length > MAX_CODE_LENGTH {
            return Err(self.invalid(format!("codeword length {} must be in 1..={}", self.code_length, MAX_CODE_LENGTH)));
        }
        if self.rs_parity_bytes != RS_PARITY_BYTES {
            return Err(self.invalid(format!("Reed-Solomon parity must be {} bytes, not {}", RS_PARITY_BYTES, self.rs_parity_bytes)));
        }
        if self.gf_polynomial != GF_POLY {
            return Err(self.invalid(format!("Galois field polynomial must be 0x{:03x}, not 0x{:03x}", GF_POLY, self.gf_polynomial)));
        }
        match self.parity_layout {
            ParityLayout::Single => {
                if self.data_size > RS_MAX_DATA_BYTES {
                    return Err(self.invalid(format!("a single Reed-Solomon block carries at most {} bytes, not {}", RS_MAX_DATA_BYTES, self.data_size)));
                }
            }
            ParityLayout::PingPong => {
                if self.data_size != PING_PONG_DATA_SIZE {
                    return Err(self.invalid(format!("ping-pong parity needs a {} byte payload, not {}", PING_PONG_DATA_SIZE, self.data_size)));
                }
            }
        }
        match self.interleaver {
            InterleaverScheme::Linear { step, total_bits } => {
                if step == 0 || step >= total_bits {
                    return Err(self.invalid(format!("interleaver step {} must be in 1..{}", step, total_bits)));
                }
                if total_bits > self.code_length * 8 {
                    return Err(self.invalid(format!("interleaver covers {} bits but the codeword holds {}", total_bits, self.code_length * 8)));
                }
            }
            InterleaverScheme::Stride { stride } => {
                if stride == 0 || stride > self.code_length {
                    return Err(self.invalid(format!("interleaver stride {} must be in 1..={}", stride, self.code_length)));
                }
            }
        }
        // data_size and code_length are bounded above, so only pilot_bits can still overflow
        let needed = match self.pilot_bits.checked_add(self.encoded_bits()) {
            Some(needed) => needed,
            None => return Err(self.invalid(format!("{} pilot bits cannot fit in any codeword", self.pilot_bits))),
        };
        if needed > self.interleaver_bits() {
            return Err(self.invalid(format!("{} pilot and coded bits do not fit in {} interleaver bits", needed, self.interleaver_bits())));
        }
        self.check_addressing(needed)
    }

    // Replays the interleaver to confirm no bit is written twice or outside the codeword.
    fn check_addressing(&self, needed: usize) -> FecResult<()> {
        let canvas = self.code_length * 8;
        let mut seen = vec![false; canvas];
        let mut interleaver = self.new_interleaver();
        for n in 0..needed {
            let position = interleaver.position();
            if position >= canvas {
                return Err(self.invalid(format!("bit {} would land at {}, outside the {} bit codeword", n, position, canvas)));
            }
            if seen[position] {
                return Err(self.invalid(format!("bit {} would overwrite position {}", n, position)));
            }
            seen[position] = true;
            interleaver.advance();
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "./profile_spec.rs"]
mod profile_spec;
