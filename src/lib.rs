pub mod ciphertext;
pub mod config;
pub mod error;
pub mod key;
pub mod protocol;
pub mod scorer;
pub mod solver;
pub mod worker;
// cmd and reports belong to the binary (see main.rs).
