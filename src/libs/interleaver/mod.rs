pub mod interleaver;
