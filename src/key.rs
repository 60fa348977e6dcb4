use crate::error::{CfResult, CipherForgeError};
use fastrand::Rng;
use std::fmt;
use std::ops::Index;
use std::str::FromStr;

pub const ALPHABET_LEN: usize = 26;

/// A substitution key: a permutation of the letter indices `0..26`.
///
/// `key[c]` is the plaintext letter substituted for ciphertext letter `c`.
/// The backing array is never handed out mutably; `shuffle` and `exchange`
/// are the only mutators, and both keep the permutation intact.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CipherKey {
    map: [u8; ALPHABET_LEN],
}

impl Default for CipherKey {
    fn default() -> Self {
        Self::identity()
    }
}

impl CipherKey {
    /// The permutation `[0, 1, .., 25]`.
    pub fn identity() -> Self {
        let mut map = [0u8; ALPHABET_LEN];
        for (i, slot) in map.iter_mut().enumerate() {
            *slot = i as u8;
        }
        Self { map }
    }

    /// Fisher-Yates, walking from the last position down to 1.
    pub fn shuffle(&mut self, rng: &mut Rng) {
        let len = self.map.len();
        if len == 0 {
            return;
        }
        for i in (1..len).rev() {
            let j = rng.usize(0..=i);
            self.exchange(i, j);
        }
    }

    #[inline(always)]
    pub fn exchange(&mut self, i: usize, j: usize) {
        self.map.swap(i, j);
    }

    #[inline(always)]
    pub fn get(&self, cipher_letter: u8) -> u8 {
        self.map[cipher_letter as usize]
    }

    pub fn as_array(&self) -> &[u8; ALPHABET_LEN] {
        &self.map
    }

    /// The key that undoes this one: `inverse[key[c]] == c`.
    pub fn inverse(&self) -> Self {
        let mut map = [0u8; ALPHABET_LEN];
        for (c, &p) in self.map.iter().enumerate() {
            map[p as usize] = c as u8;
        }
        Self { map }
    }

    pub fn is_permutation(&self) -> bool {
        let mut seen = 0u32;
        for &p in &self.map {
            if p as usize >= ALPHABET_LEN {
                return false;
            }
            seen |= 1 << p;
        }
        seen == (1 << ALPHABET_LEN) - 1
    }

    /// Lowercase letters, one per position, e.g. `"bacdef..."`.
    pub fn render(&self) -> String {
        self.map.iter().map(|&p| (b'a' + p) as char).collect()
    }
}

impl Index<usize> for CipherKey {
    type Output = u8;

    #[inline(always)]
    fn index(&self, cipher_letter: usize) -> &u8 {
        &self.map[cipher_letter]
    }
}

impl fmt::Display for CipherKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl FromStr for CipherKey {
    type Err = CipherForgeError;

    /// Parses the rendered form. Case is ignored.
    fn from_str(s: &str) -> CfResult<Self> {
        let bytes = s.trim().as_bytes();
        if bytes.len() != ALPHABET_LEN {
            return Err(CipherForgeError::InvalidKey(format!(
                "expected {} letters, got {}",
                ALPHABET_LEN,
                bytes.len()
            )));
        }

        let mut map = [0u8; ALPHABET_LEN];
        for (i, &b) in bytes.iter().enumerate() {
            if !b.is_ascii_alphabetic() {
                return Err(CipherForgeError::InvalidKey(format!(
                    "'{}' at position {} is not a letter",
                    b as char, i
                )));
            }
            map[i] = b.to_ascii_lowercase() - b'a';
        }

        let key = Self { map };
        if !key.is_permutation() {
            return Err(CipherForgeError::InvalidKey(format!(
                "'{}' repeats a letter",
                s.trim()
            )));
        }
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_renders_alphabet() {
        assert_eq!(
            CipherKey::identity().render(),
            "abcdefghijklmnopqrstuvwxyz"
        );
    }

    #[test]
    fn exchange_first_pair() {
        let mut key = CipherKey::identity();
        key.exchange(0, 1);
        assert_eq!(key.render(), "bacdefghijklmnopqrstuvwxyz");
        key.exchange(0, 1);
        assert_eq!(key, CipherKey::identity());
    }

    #[test]
    fn shuffle_keeps_permutation() {
        let mut rng = Rng::with_seed(7);
        let mut key = CipherKey::identity();
        for _ in 0..100 {
            key.shuffle(&mut rng);
            assert!(key.is_permutation());
        }
    }

    #[test]
    fn shuffle_is_reproducible_with_seed() {
        let mut a = CipherKey::identity();
        let mut b = CipherKey::identity();
        a.shuffle(&mut Rng::with_seed(42));
        b.shuffle(&mut Rng::with_seed(42));
        assert_eq!(a, b);
    }

    #[test]
    fn inverse_undoes_key() {
        let mut key = CipherKey::identity();
        key.shuffle(&mut Rng::with_seed(3));
        let inv = key.inverse();
        for c in 0..ALPHABET_LEN as u8 {
            assert_eq!(inv.get(key.get(c)), c);
        }
    }

    #[test]
    fn parse_round_trips_render() {
        let mut key = CipherKey::identity();
        key.shuffle(&mut Rng::with_seed(11));
        let parsed: CipherKey = key.render().to_uppercase().parse().unwrap();
        assert_eq!(parsed, key);
    }

    #[test]
    fn parse_rejects_bad_keys() {
        assert!("abc".parse::<CipherKey>().is_err());
        assert!("aacdefghijklmnopqrstuvwxyz".parse::<CipherKey>().is_err());
        assert!("abcdefghijklmnopqrstuvwxy1".parse::<CipherKey>().is_err());
    }
}
