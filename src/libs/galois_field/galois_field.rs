// Arithmetic over GF(2^8) as used by the CCSDS-style (255,223) Reed-Solomon code. Elements are
// handled in log ("index") form where possible: multiplication becomes addition of logs modulo
// 255, the order of the multiplicative group.
//
// Two implementations of the same capability exist. The lookup implementation holds a pair of
// 256-entry tables, built once on first use. The low-memory implementation walks the field
// generator on every call, trading time for the 512 bytes the tables would occupy on a small
// flight computer. Their observable behaviour is identical.

extern crate lazy_static;
use lazy_static::lazy_static;

use log::info;
use metered::time_source::{Instant, StdInstant};
use serde_derive::{Deserialize, Serialize};

/// Primitive polynomial x^8 + x^7 + x^2 + x + 1.
pub const GF_POLY: u16 = 0x187;
/// Log of zero, and the index that maps back to zero.
pub const A0: u8 = 255;
/// Order of the multiplicative group.
pub const GF_ORDER: u16 = 255;

pub trait GaloisField {
    /// α^index for index in 0..=254. A0 yields 0.
    fn alpha_to(&self, index: u8) -> u8;
    /// The discrete log base α of a nonzero value. Zero yields A0.
    fn index_of(&self, value: u8) -> u8;
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum GaloisFieldKind {
    Lookup,
    LowMemory,
}

impl Default for GaloisFieldKind {
    fn default() -> Self {
        GaloisFieldKind::Lookup
    }
}

/// Reduces a sum of two logs (at most 254 + 254) into 0..=254.
#[inline]
pub fn mod255(x: u16) -> u8 {
    let mut x = x;
    while x >= GF_ORDER {
        x -= GF_ORDER;
    }
    x as u8
}

// One step of the field generator: multiply by α and reduce.
#[inline]
fn multiply_by_alpha(sr: u16, polynomial: u16) -> u16 {
    let mut sr = sr << 1;
    if sr & 0x100 != 0 {
        sr ^= polynomial;
    }
    sr & 0xff
}

pub struct GaloisFieldTables {
    alpha_to: [u8; 256],
    index_of: [u8; 256],
}

impl GaloisFieldTables {
    pub fn new(polynomial: u16) -> Self {
        let mut alpha_to = [0u8; 256];
        let mut index_of = [0u8; 256];
        let mut sr: u16 = 1;
        for i in 0..GF_ORDER as usize {
            alpha_to[i] = sr as u8;
            index_of[sr as usize] = i as u8;
            sr = multiply_by_alpha(sr, polynomial);
        }
        alpha_to[A0 as usize] = 0;
        index_of[0] = A0;
        Self { alpha_to, index_of }
    }
}

lazy_static! {
    pub static ref GF_TABLES: GaloisFieldTables = GaloisFieldTables::new(GF_POLY);
}

// Just to start the lazy_static, and log how long it takes to initialise.
pub fn init_galois_field() {
    let init_duration = StdInstant::now();
    info!("GF(2^8) tables for polynomial 0x{:03x}: α^1 = 0x{:02x}", GF_POLY, GF_TABLES.alpha_to[1]);
    info!("GF(2^8) tables initialised in {}ms", init_duration.elapsed_time());
}

pub struct LookupGaloisField;

impl GaloisField for LookupGaloisField {
    #[inline]
    fn alpha_to(&self, index: u8) -> u8 {
        GF_TABLES.alpha_to[index as usize]
    }

    #[inline]
    fn index_of(&self, value: u8) -> u8 {
        GF_TABLES.index_of[value as usize]
    }
}

pub struct LowMemoryGaloisField;

impl GaloisField for LowMemoryGaloisField {
    fn alpha_to(&self, index: u8) -> u8 {
        if index == A0 {
            return 0;
        }
        let mut sr: u16 = 1;
        for _ in 0..index {
            sr = multiply_by_alpha(sr, GF_POLY);
        }
        sr as u8
    }

    fn index_of(&self, value: u8) -> u8 {
        if value == 0 {
            return A0;
        }
        let mut sr: u16 = 1;
        let mut index: u8 = 0;
        while sr != value as u16 {
            sr = multiply_by_alpha(sr, GF_POLY);
            index += 1;
        }
        index
    }
}

static LOOKUP: LookupGaloisField = LookupGaloisField;
static LOW_MEMORY: LowMemoryGaloisField = LowMemoryGaloisField;

pub fn galois_field(kind: GaloisFieldKind) -> &'static (dyn GaloisField + Sync) {
    match kind {
        GaloisFieldKind::Lookup => &LOOKUP,
        GaloisFieldKind::LowMemory => &LOW_MEMORY,
    }
}

#[cfg(test)]
#[path = "./galois_field_spec.rs"]
mod galois_field_spec;
