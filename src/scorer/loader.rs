use super::{quad_index_of, QuadgramModel, QUAD_TABLE_SIZE};
use crate::error::{CfResult, CipherForgeError};
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

pub const ASSET_MAGIC: &[u8; 4] = b"CFQG";
pub const ASSET_VERSION: u8 = 1;
const HEADER_LEN: usize = ASSET_MAGIC.len() + 1;

/// Loads a model, picking the format from the file extension.
///
/// `.txt`, `.tsv` and `.csv` are read as quadgram count lists, anything
/// else as the binary asset.
pub fn load_model<P: AsRef<Path>>(path: P) -> CfResult<QuadgramModel> {
    let path = path.as_ref();
    let is_text = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("txt") | Some("tsv") | Some("csv")
    );

    let model = if is_text {
        load_counts(path)?
    } else {
        load_binary(path)?
    };

    info!(
        "Loaded quadgram model from {:?} ({} populated cells)",
        path,
        model.populated()
    );
    Ok(model)
}

pub fn load_binary<P: AsRef<Path>>(path: P) -> CfResult<QuadgramModel> {
    let bytes = fs::read(path)?;
    from_binary_bytes(&bytes)
}

/// Parses `CFQG`, a version byte, then one byte per table cell.
pub fn from_binary_bytes(bytes: &[u8]) -> CfResult<QuadgramModel> {
    if bytes.len() < HEADER_LEN || &bytes[..4] != ASSET_MAGIC {
        return Err(CipherForgeError::InvalidAsset(
            "missing CFQG header".to_string(),
        ));
    }
    if bytes[4] != ASSET_VERSION {
        return Err(CipherForgeError::InvalidAsset(format!(
            "unsupported asset version {} (expected {})",
            bytes[4], ASSET_VERSION
        )));
    }

    let body = &bytes[HEADER_LEN..];
    if body.len() != QUAD_TABLE_SIZE {
        return Err(CipherForgeError::InvalidAsset(format!(
            "expected {} cells, found {}",
            QUAD_TABLE_SIZE,
            body.len()
        )));
    }
    QuadgramModel::from_cells(body.to_vec())
}

pub fn to_binary_bytes(model: &QuadgramModel) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_LEN + QUAD_TABLE_SIZE);
    out.extend_from_slice(ASSET_MAGIC);
    out.push(ASSET_VERSION);
    out.extend_from_slice(model.cells());
    out
}

pub fn write_binary<P: AsRef<Path>>(model: &QuadgramModel, path: P) -> CfResult<()> {
    fs::write(path, to_binary_bytes(model))?;
    Ok(())
}

pub fn load_counts<P: AsRef<Path>>(path: P) -> CfResult<QuadgramModel> {
    let file = File::open(path)?;
    load_counts_from_reader(file)
}

/// Reads `QUAD COUNT` lines and log-scales the counts into byte cells.
pub fn load_counts_from_reader<R: Read>(reader: R) -> CfResult<QuadgramModel> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .from_reader(reader);

    let mut counts: Vec<(u32, f64)> = Vec::new();
    let mut skipped = 0usize;

    for result in rdr.records() {
        let rec = result?;
        let mut tokens = rec.iter().flat_map(str::split_whitespace);

        let (quad, count) = match (tokens.next(), tokens.next()) {
            (Some(q), Some(c)) => (q, c),
            (None, _) => continue,
            _ => {
                skipped += 1;
                continue;
            }
        };

        let idx = match quad_index_of(quad) {
            Some(i) => i,
            None => {
                skipped += 1;
                continue;
            }
        };

        match count.parse::<f64>() {
            Ok(c) if c.is_finite() && c > 0.0 => counts.push((idx, c)),
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!("   ⚠️  Skipped {} invalid rows in quadgram counts.", skipped);
    }

    if counts.is_empty() {
        return Err(CipherForgeError::InvalidAsset(
            "no usable quadgram counts".to_string(),
        ));
    }

    QuadgramModel::from_cells(scale_counts(&counts))
}

/// `1 + round(254 * (ln c - ln min) / (ln max - ln min))`, or 255 when all
/// counts are equal. Quads that never appear stay 0.
fn scale_counts(counts: &[(u32, f64)]) -> Vec<u8> {
    let (min, max) = counts
        .iter()
        .fold((f64::MAX, f64::MIN), |(lo, hi), &(_, c)| (lo.min(c), hi.max(c)));
    let (ln_min, ln_max) = (min.ln(), max.ln());
    let span = ln_max - ln_min;

    let mut cells = vec![0u8; QUAD_TABLE_SIZE];
    for &(idx, c) in counts {
        cells[idx as usize] = if span > 0.0 {
            (1.0 + (254.0 * (c.ln() - ln_min) / span).round()) as u8
        } else {
            255
        };
    }
    cells
}
