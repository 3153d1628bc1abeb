pub mod config_file;
pub mod convolutional;
pub mod error;
pub mod fec_encoder;
pub mod galois_field;
pub mod interleaver;
pub mod profile;
pub mod reed_solomon;
pub mod scrambler;
pub mod util;
