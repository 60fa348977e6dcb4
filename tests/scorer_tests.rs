mod common;

use cipherforge::ciphertext::{encipher, CipherText};
use cipherforge::key::CipherKey;
use cipherforge::scorer::engine::{normalized_score, score_cipher};
use common::*;

#[test]
fn test_plain_scores_best_under_graded_model() {
    let model = graded_model();
    let text = CipherText::parse(PLAIN);
    assert_eq!(text.len(), 24);
    assert_eq!(model.score_text(&CipherKey::identity(), &text), GRADED_BEST);
}

#[test]
fn test_decoding_key_scores_like_plaintext() {
    let model = graded_model();
    let key = caesar_key(9);
    let text = CipherText::parse(&encipher(PLAIN, &key));

    assert_eq!(model.score_text(&key.inverse(), &text), GRADED_BEST);
    assert!(model.score_text(&CipherKey::identity(), &text) < GRADED_BEST);
}

#[test]
fn test_punctuation_does_not_break_windows() {
    let model = sparse_model();
    let key = CipherKey::identity();
    // "te-st" still yields the quad "test"
    let split = CipherText::parse("te-st");
    assert_eq!(score_cipher(&model, &key, split.cipher()), 100);
}

#[test]
fn test_repeated_quads_add_up() {
    let model = sparse_model();
    let text = CipherText::parse("test test test");
    // windows: test, estt, stte, ttes, test, estt, stte, ttes, test
    assert_eq!(model.score_text(&CipherKey::identity(), &text), 300);
}

#[test]
fn test_normalized_best_score() {
    let n = normalized_score(GRADED_BEST, 24, 35.0);
    assert!((n - (2310.0 / 21.0 - 35.0)).abs() < 1e-9);
}
