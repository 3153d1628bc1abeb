/*
 * The FEC encoder turns one fixed-size telemetry payload into one interleaved codeword, in the
 * AO-40 coded telemetry style:
 *
 * 1. The pilot (sync) pattern from its own LFSR is written straight through the interleaver.
 * 2. Each payload byte updates the Reed-Solomon parity register, is XORed with the scrambler
 *    keystream, then convolutionally encoded (two symbols per bit, MSB first); the symbols go
 *    through the interleaver.
 * 3. The parity bytes are scrambled, convolved and interleaved the same way. They are not fed
 *    back into the parity register.
 * 4. Six zero tail bits, unscrambled, return the convolutional encoder to the all-zero state so
 *    the ground Viterbi decoder knows where the trellis ends.
 *
 * All the mutable state lives in locals of a single encode call, so one FecEncoder can be shared
 * freely between threads.
 */

extern crate lazy_static;
use lazy_static::lazy_static;
use log::{debug, trace};
use pretty_hex::pretty_hex;

use crate::libs::convolutional::convolutional_encoder::ConvolutionalEncoder;
use crate::libs::error::fec_error::{FecError, FecResult};
use crate::libs::galois_field::galois_field::{galois_field, GaloisFieldKind};
use crate::libs::profile::profile::{AO40_CODE_LENGTH, AO40_DATA_SIZE, AO40_SHORT_CODE_LENGTH, AO40_SHORT_DATA_SIZE, ParityLayout, Profile};
use crate::libs::reed_solomon::reed_solomon::{ParityGenerator, PingPongReedSolomonEncoder, ReedSolomonEncoder};
use crate::libs::scrambler::lfsr::{PilotGenerator, Scrambler};

#[readonly::make]
#[derive(Debug, Clone)]
pub struct FecEncoder {
    pub profile: Profile,
    pub galois_field: GaloisFieldKind,
}

impl FecEncoder {
    pub fn new(profile: Profile, galois_field: GaloisFieldKind) -> FecResult<Self> {
        profile.validate()?;
        debug!("FEC encoder for profile '{}': {} payload bytes -> {} codeword bytes, {:?} Galois field",
            profile.name, profile.data_size, profile.code_length, galois_field);
        Ok(Self { profile, galois_field })
    }

    pub fn for_profile_name(name: &str, galois_field: GaloisFieldKind) -> FecResult<Self> {
        match Profile::builtin(name) {
            Some(profile) => FecEncoder::new(profile, galois_field),
            None => Err(FecError::UnknownProfile(name.to_string())),
        }
    }

    pub fn encode(&self, payload: &[u8]) -> FecResult<Vec<u8>> {
        let mut codeword = vec![0u8; self.profile.code_length];
        self.encode_into(payload, &mut codeword)?;
        Ok(codeword)
    }

    /// Encodes into a caller-owned buffer. Whatever the buffer held before is overwritten.
    pub fn encode_into(&self, payload: &[u8], codeword: &mut [u8]) -> FecResult<()> {
        if payload.len() != self.profile.data_size {
            return Err(FecError::PayloadSize { expected: self.profile.data_size, actual: payload.len() });
        }
        if codeword.len() != self.profile.code_length {
            return Err(FecError::CodewordSize { expected: self.profile.code_length, actual: codeword.len() });
        }
        self.encode_sized(payload, codeword);
        Ok(())
    }

    // Buffer sizes must already match the profile.
    fn encode_sized(&self, payload: &[u8], codeword: &mut [u8]) {
        let profile = &self.profile;
        codeword.fill(0);

        let field = galois_field(self.galois_field);
        let mut parity: Box<dyn ParityGenerator> = match profile.parity_layout {
            ParityLayout::Single => Box::new(ReedSolomonEncoder::new(field)),
            ParityLayout::PingPong => Box::new(PingPongReedSolomonEncoder::new(field)),
        };
        let mut scrambler = Scrambler::new(profile.scrambler_seed, profile.scrambler_polynomial);
        let mut convolutional = ConvolutionalEncoder::new(profile.conv_polynomial_a, profile.conv_polynomial_b);
        let mut interleaver = profile.new_interleaver();

        for bit in PilotGenerator::new(profile.pilot_seed, profile.pilot_polynomial).take(profile.pilot_bits) {
            interleaver.interleave_bit(codeword, bit);
        }
        trace!("{} pilot bits written, next position {}", profile.pilot_bits, interleaver.position());

        for byte in payload {
            parity.feed(*byte);
            let scrambled = scrambler.scramble(*byte);
            convolutional.encode_byte(scrambled, |bit| interleaver.interleave_bit(codeword, bit));
        }
        trace!("{} payload bytes encoded, next position {}", payload.len(), interleaver.position());

        for index in 0..parity.parity_len() {
            let scrambled = scrambler.scramble(parity.parity_byte(index));
            convolutional.encode_byte(scrambled, |bit| interleaver.interleave_bit(codeword, bit));
        }
        trace!("{} parity bytes encoded, next position {}", parity.parity_len(), interleaver.position());

        convolutional.flush(|bit| interleaver.interleave_bit(codeword, bit));
        trace!("Tail flushed, next position {}", interleaver.position());

        debug!("Codeword for profile '{}':\n{}", profile.name, pretty_hex(&codeword));
    }
}

// Built-in profiles; their validity is covered by the profile tests.
lazy_static! {
    static ref AO40_ENCODER: FecEncoder = FecEncoder { profile: Profile::ao40(), galois_field: GaloisFieldKind::Lookup };
    static ref AO40_SHORT_ENCODER: FecEncoder = FecEncoder { profile: Profile::ao40_short(), galois_field: GaloisFieldKind::Lookup };
}

/// Encodes a 256 byte payload into the 650 byte AO-40 codeword.
pub fn encode_ao40(data: &[u8; AO40_DATA_SIZE]) -> [u8; AO40_CODE_LENGTH] {
    let mut encoded = [0u8; AO40_CODE_LENGTH];
    AO40_ENCODER.encode_sized(data, &mut encoded);
    encoded
}

/// Encodes a 128 byte payload into the 332 byte short codeword.
pub fn encode_ao40_short(data: &[u8; AO40_SHORT_DATA_SIZE]) -> [u8; AO40_SHORT_CODE_LENGTH] {
    let mut encoded = [0u8; AO40_SHORT_CODE_LENGTH];
    AO40_SHORT_ENCODER.encode_sized(data, &mut encoded);
    encoded
}

#[cfg(test)]
#[path = "./fec_encoder_spec.rs"]
mod fec_encoder_spec;
