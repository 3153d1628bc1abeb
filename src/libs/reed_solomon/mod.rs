pub mod reed_solomon;
