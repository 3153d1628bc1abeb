pub mod fec_encoder;
