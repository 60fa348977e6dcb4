use super::{QuadgramModel, PREFIX_MASK};
use crate::key::CipherKey;

/// Sums the table cell of every decoded quadgram in `cipher`.
///
/// The window is slid one letter at a time: the first three decoded
/// letters seed a 15-bit prefix, then each further letter is shifted in.
/// Fewer than four letters score 0.
#[inline]
pub fn score_cipher(model: &QuadgramModel, key: &CipherKey, cipher: &[u8]) -> u64 {
    if cipher.len() < 4 {
        return 0;
    }

    let map = key.as_array();
    let mut idx = (map[cipher[0] as usize] as u32) << 10
        | (map[cipher[1] as usize] as u32) << 5
        | map[cipher[2] as usize] as u32;

    let mut total = 0u64;
    for &c in &cipher[3..] {
        idx = ((idx & PREFIX_MASK) << 5) | map[c as usize] as u32;
        total += model.score(idx) as u64;
    }
    total
}

/// Average cell value per quadgram, shifted down by `offset`.
pub fn normalized_score(score: u64, letters: usize, offset: f64) -> f64 {
    if letters <= 3 {
        return -offset;
    }
    score as f64 / (letters - 3) as f64 - offset
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ciphertext::CipherText;

    fn model() -> QuadgramModel {
        QuadgramModel::from_entries([("test", 100u8), ("ests", 10), ("stte", 1)]).unwrap()
    }

    #[test]
    fn short_input_scores_zero() {
        let m = model();
        let key = CipherKey::identity();
        for raw in ["", "t", "te", "tes", "t-e-s"] {
            assert_eq!(m.score_text(&key, &CipherText::parse(raw)), 0, "{raw}");
        }
    }

    #[test]
    fn sliding_window_sums_each_quad() {
        let m = model();
        let key = CipherKey::identity();
        // letters "testte" give the windows test, estt, stte
        let ct = CipherText::parse("Test te");
        assert_eq!(m.score_text(&key, &ct), 100 + 1);
    }

    #[test]
    fn score_follows_the_key() {
        let m = model();
        let mut key = CipherKey::identity();
        // cipher "uftu" under a key mapping u->t, f->e, t->s
        key.exchange(20, 19);
        key.exchange(5, 4);
        key.exchange(19, 18);
        let ct = CipherText::parse("uftu");
        assert_eq!(ct.decode(&key), "test");
        assert_eq!(m.score_text(&key, &ct), 100);
    }

    #[test]
    fn long_runs_of_top_cells_do_not_wrap() {
        let m = QuadgramModel::from_entries([("aaaa", 255u8)]).unwrap();
        let cipher = vec![0u8; 17_000_000];
        let total = score_cipher(&m, &CipherKey::identity(), &cipher);
        assert_eq!(total, 255 * (17_000_000 - 3));
        assert!(total > u32::MAX as u64);
    }

    #[test]
    fn normalized_score_handles_short_text() {
        assert_eq!(normalized_score(0, 3, 35.0), -35.0);
        assert_eq!(normalized_score(400, 13, 35.0), 5.0);
    }
}
