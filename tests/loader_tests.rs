mod common;

use cipherforge::error::CipherForgeError;
use cipherforge::scorer::loader::{
    load_binary, load_counts, load_model, to_binary_bytes, write_binary, ASSET_MAGIC,
    ASSET_VERSION,
};
use cipherforge::scorer::{quad_index_of, QUAD_TABLE_SIZE};
use std::io::Write;
use tempfile::{tempdir, NamedTempFile};

// --- COUNT LISTS ---

#[test]
fn test_counts_are_log_scaled() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "TION 100").unwrap();
    writeln!(file, "NTHE 10").unwrap();
    writeln!(file, "THER 1").unwrap();

    let model = load_counts(file.path()).unwrap();

    assert_eq!(model.score(quad_index_of("tion").unwrap()), 255);
    assert_eq!(model.score(quad_index_of("nthe").unwrap()), 128);
    assert_eq!(model.score(quad_index_of("ther").unwrap()), 1);
    assert_eq!(model.score(quad_index_of("zzzz").unwrap()), 0);
    assert_eq!(model.populated(), 3);
}

#[test]
fn test_counts_skip_junk_rows() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "TION 50").unwrap();
    writeln!(file, "TH 40").unwrap(); // too short
    writeln!(file, "AB1C 40").unwrap(); // not letters
    writeln!(file, "NTHE lots").unwrap(); // bad count
    writeln!(file, "HERE").unwrap(); // no count
    writeln!(file).unwrap();

    let model = load_counts(file.path()).unwrap();
    assert_eq!(model.populated(), 1);
    assert_eq!(model.score(quad_index_of("TION").unwrap()), 255);
}

#[test]
fn test_counts_tolerate_repeated_spaces() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "TION   9").unwrap();
    writeln!(file, "ATIO 3").unwrap();

    let model = load_counts(file.path()).unwrap();
    assert_eq!(model.populated(), 2);
    assert_eq!(model.score(quad_index_of("TION").unwrap()), 255);
    assert_eq!(model.score(quad_index_of("ATIO").unwrap()), 1);
}

// --- BINARY ASSET ---

#[test]
fn test_binary_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("quads.bin");
    let model = common::graded_model();

    write_binary(&model, &path).unwrap();
    let loaded = load_binary(&path).unwrap();

    assert_eq!(loaded.cells()[..], model.cells()[..]);
    assert_eq!(
        std::fs::metadata(&path).unwrap().len() as usize,
        ASSET_MAGIC.len() + 1 + QUAD_TABLE_SIZE
    );
}

#[test]
fn test_truncated_binary_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("short.bin");
    let mut bytes = to_binary_bytes(&common::sparse_model());
    bytes.truncate(1000);
    std::fs::write(&path, bytes).unwrap();

    let err = load_binary(&path).unwrap_err();
    assert!(matches!(err, CipherForgeError::InvalidAsset(_)));
}

#[test]
fn test_header_layout() {
    let bytes = to_binary_bytes(&common::sparse_model());
    assert_eq!(&bytes[..4], ASSET_MAGIC);
    assert_eq!(bytes[4], ASSET_VERSION);
}

// --- DISPATCH ---

#[test]
fn test_load_model_picks_format_by_extension() {
    let dir = tempdir().unwrap();

    let txt = dir.path().join("quads.txt");
    std::fs::write(&txt, "TEST 5\n").unwrap();
    let from_text = load_model(&txt).unwrap();
    assert_eq!(from_text.score(quad_index_of("test").unwrap()), 255);

    let bin = dir.path().join("quads.bin");
    write_binary(&from_text, &bin).unwrap();
    let from_bin = load_model(&bin).unwrap();
    assert_eq!(from_bin.cells()[..], from_text.cells()[..]);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let err = load_model(dir.path().join("nope.bin")).unwrap_err();
    assert!(matches!(err, CipherForgeError::Io(_)));
}
