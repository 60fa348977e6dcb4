#![allow(dead_code)]

use cipherforge::key::CipherKey;
use cipherforge::scorer::{quad_index_of, quadgram_index, QuadgramModel, QUAD_TABLE_SIZE};

/// Plaintext used across the solver tests. Only the letters t, e and s
/// appear, always in the order t-e-s-t.
pub const PLAIN: &str = "Test test, TEST test test test.";

/// Per-letter credit (t=3, e=2, s=2) summed over the quad, plus 100 for
/// each rotation of "test". From any key a single exchange can improve
/// the score until the key decodes `PLAIN`, so one hill climb always
/// lands on it.
pub fn graded_model() -> QuadgramModel {
    let weight = |l: u8| match l {
        19 => 3,
        4 | 18 => 2,
        _ => 0,
    };

    let mut cells = vec![0u8; QUAD_TABLE_SIZE];
    for a in 0..26u8 {
        for b in 0..26u8 {
            for c in 0..26u8 {
                for d in 0..26u8 {
                    cells[quadgram_index(a, b, c, d) as usize] =
                        weight(a) + weight(b) + weight(c) + weight(d);
                }
            }
        }
    }
    for quad in ["test", "estt", "stte", "ttes"] {
        cells[quad_index_of(quad).unwrap() as usize] += 100;
    }
    QuadgramModel::from_cells(cells).unwrap()
}

/// Score of `PLAIN` under `graded_model`: 24 letters, 21 windows.
pub const GRADED_BEST: u64 = 2310;

/// Only "test" scores.
pub fn sparse_model() -> QuadgramModel {
    QuadgramModel::from_entries([("TEST", 100u8)]).unwrap()
}

/// Key shifting every letter forward by `shift`.
pub fn caesar_key(shift: u8) -> CipherKey {
    let rendered: String = (0..26u8)
        .map(|i| (b'a' + (i + shift) % 26) as char)
        .collect();
    rendered.parse().unwrap()
}
