pub mod fec_error;
