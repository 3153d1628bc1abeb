pub mod galois_field;
