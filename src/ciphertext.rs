use crate::key::CipherKey;
use strum_macros::Display;

/// What sat at one character position of the original text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum Shape {
    Upper,
    Lower,
    Other,
}

/// Ciphertext split into three aligned views.
///
/// `cipher` holds the 0..26 index of every ASCII letter in order of
/// appearance; `shape` has one entry per character of `text` and lets
/// `decode` put case and punctuation back exactly where they were.
#[derive(Clone, Debug, Default)]
pub struct CipherText {
    text: String,
    shape: Vec<Shape>,
    cipher: Vec<u8>,
}

impl CipherText {
    pub fn parse(raw: &str) -> Self {
        let mut shape = Vec::with_capacity(raw.len());
        let mut cipher = Vec::with_capacity(raw.len());

        for ch in raw.chars() {
            match ch {
                'A'..='Z' => {
                    shape.push(Shape::Upper);
                    cipher.push(ch as u8 - b'A');
                }
                'a'..='z' => {
                    shape.push(Shape::Lower);
                    cipher.push(ch as u8 - b'a');
                }
                _ => shape.push(Shape::Other),
            }
        }

        Self {
            text: raw.to_string(),
            shape,
            cipher,
        }
    }

    /// Applies `key` to every letter, keeping case, and copies everything
    /// else through untouched.
    pub fn decode(&self, key: &CipherKey) -> String {
        let mut out = String::with_capacity(self.text.len());
        let mut letters = self.cipher.iter();

        for (ch, shape) in self.text.chars().zip(&self.shape) {
            match shape {
                Shape::Upper => {
                    if let Some(&c) = letters.next() {
                        out.push((key.get(c) + b'A') as char);
                    }
                }
                Shape::Lower => {
                    if let Some(&c) = letters.next() {
                        out.push((key.get(c) + b'a') as char);
                    }
                }
                Shape::Other => out.push(ch),
            }
        }
        out
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn shape(&self) -> &[Shape] {
        &self.shape
    }

    pub fn cipher(&self) -> &[u8] {
        &self.cipher
    }

    /// Number of letters, i.e. the length of `cipher`.
    pub fn len(&self) -> usize {
        self.cipher.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cipher.is_empty()
    }
}

impl From<&str> for CipherText {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

/// Forward substitution: letter `p` becomes `key[p]`.
///
/// Substituting is the same walk as decoding, so `decode` with
/// `key.inverse()` takes the result back to `plain`.
pub fn encipher(plain: &str, key: &CipherKey) -> String {
    CipherText::parse(plain).decode(key)
}
