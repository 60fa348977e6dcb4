pub mod build_model;
pub mod encrypt;
pub mod serve;
pub mod solve;

use cipherforge::error::CfResult;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Reads the whole file, or stdin when no path is given.
pub fn read_input(path: Option<&Path>) -> CfResult<String> {
    match path {
        Some(p) => Ok(fs::read_to_string(p)?),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}
