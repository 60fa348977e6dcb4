pub mod engine;
pub mod loader;

use crate::ciphertext::CipherText;
use crate::error::{CfResult, CipherForgeError};
use crate::key::CipherKey;
use std::fmt;

/// Number of cells in the table: every 20-bit index (4 letters x 5 bits).
pub const QUAD_TABLE_SIZE: usize = 1 << 20;
pub const QUAD_MASK: u32 = 0xF_FFFF;
/// Keeps the last three letters of the window before shifting in a fourth.
pub const PREFIX_MASK: u32 = 0x7FFF;

/// Packs four letter indices (each 0..26) into a table index.
///
/// ```text
/// AAAA =  0  0  0  0 -> 00000 00000 00000 00000 = 0
/// PVBD = 15 21  1  3 -> 01111 10101 00001 00011 = 513059
/// ZZZZ = 25 25 25 25 -> 11001 11001 11001 11001 = 845625
/// ```
#[inline(always)]
pub fn quadgram_index(a: u8, b: u8, c: u8, d: u8) -> u32 {
    ((a as u32) << 15 | (b as u32) << 10 | (c as u32) << 5 | d as u32) & QUAD_MASK
}

/// Table index of a four letter string such as `"TION"`. Case is ignored.
pub fn quad_index_of(quad: &str) -> Option<u32> {
    let bytes = quad.as_bytes();
    if bytes.len() != 4 || !bytes.iter().all(|b| b.is_ascii_alphabetic()) {
        return None;
    }
    let l = |b: u8| b.to_ascii_lowercase() - b'a';
    Some(quadgram_index(
        l(bytes[0]),
        l(bytes[1]),
        l(bytes[2]),
        l(bytes[3]),
    ))
}

/// Read-only fitness table over all 20-bit quadgram indices.
///
/// Cells for indices that contain a 5-bit group above 25 are never looked
/// up with legal input and stay 0.
pub struct QuadgramModel {
    cells: Box<[u8; QUAD_TABLE_SIZE]>,
}

impl QuadgramModel {
    /// Wraps a dense table. `cells` must hold exactly `QUAD_TABLE_SIZE` bytes.
    pub fn from_cells(cells: Vec<u8>) -> CfResult<Self> {
        let len = cells.len();
        let cells: Box<[u8; QUAD_TABLE_SIZE]> =
            cells.into_boxed_slice().try_into().map_err(|_| {
                CipherForgeError::InvalidAsset(format!(
                    "expected {} cells, got {}",
                    QUAD_TABLE_SIZE, len
                ))
            })?;
        Ok(Self { cells })
    }

    /// Builds a sparse model from `(quad, cell)` pairs; every other cell is 0.
    pub fn from_entries<I, S>(entries: I) -> CfResult<Self>
    where
        I: IntoIterator<Item = (S, u8)>,
        S: AsRef<str>,
    {
        let mut cells = vec![0u8; QUAD_TABLE_SIZE];
        for (quad, value) in entries {
            let quad = quad.as_ref();
            let idx = quad_index_of(quad).ok_or_else(|| {
                CipherForgeError::InvalidAsset(format!("'{}' is not a quadgram", quad))
            })?;
            cells[idx as usize] = value;
        }
        Self::from_cells(cells)
    }

    #[inline(always)]
    pub fn score(&self, index: u32) -> u32 {
        self.cells[(index & QUAD_MASK) as usize] as u32
    }

    /// Fitness of `text` decoded with `key`.
    pub fn score_text(&self, key: &CipherKey, text: &CipherText) -> u64 {
        engine::score_cipher(self, key, text.cipher())
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells[..]
    }

    /// Count of non-zero cells.
    pub fn populated(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }
}

impl fmt::Debug for QuadgramModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuadgramModel")
            .field("populated", &self.populated())
            .finish()
    }
}
