//! Vocabulary mapping token strings to token IDs
//!
//! ID 0 is reserved for the unknown token, so a vocabulary is never empty.
//! The binary form is a magic/version header followed by length-prefixed
//! UTF-8 entries in ID order.

use super::types::*;
use ahash::AHashMap;
use anyhow::{bail, Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Bidirectional token string / token ID map
#[derive(Debug, Clone)]
pub struct Vocabulary {
    words: Vec<String>,
    index: AHashMap<String, TokenId>,
}

impl Vocabulary {
    /// Create a vocabulary holding only the reserved symbols
    pub fn new() -> Self {
        let mut vocab = Self {
            words: Vec::new(),
            index: AHashMap::new(),
        };
        vocab.intern(UNKNOWN_WORD);
        vocab
    }

    /// Number of entries, reserved symbols included
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Get the ID for a word, adding it if absent
    pub fn intern(&mut self, word: &str) -> TokenId {
        if let Some(&id) = self.index.get(word) {
            return id;
        }
        let id = self.words.len() as TokenId;
        self.words.push(word.to_string());
        self.index.insert(word.to_string(), id);
        id
    }

    /// Look up a word without adding it
    pub fn id(&self, word: &str) -> Option<TokenId> {
        self.index.get(word).copied()
    }

    /// Surface form for an ID; out-of-range IDs indicate corrupt input
    /// upstream and panic
    pub fn word(&self, id: TokenId) -> &str {
        &self.words[id as usize]
    }

    /// Write the vocabulary to a binary file
    pub fn write_binary(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        let mut out = BufWriter::with_capacity(65536, file);

        out.write_all(&VOCAB_MAGIC.to_le_bytes())?;
        out.write_all(&FORMAT_VERSION.to_le_bytes())?;
        out.write_all(&(self.words.len() as u32).to_le_bytes())?;

        for word in &self.words {
            out.write_all(&(word.len() as u32).to_le_bytes())?;
            out.write_all(word.as_bytes())?;
        }

        out.flush()?;
        Ok(())
    }

    /// Read a vocabulary from a binary file
    pub fn open_binary(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        if data.len() < 12 {
            bail!("Invalid vocabulary file {}: too small", path.display());
        }

        let magic = u32::from_le_bytes(data[0..4].try_into().unwrap());
        if magic != VOCAB_MAGIC {
            bail!("Invalid vocabulary file {}: bad magic number", path.display());
        }

        let version = u32::from_le_bytes(data[4..8].try_into().unwrap());
        if version != FORMAT_VERSION {
            bail!("Unsupported vocabulary version: {}", version);
        }

        let count = u32::from_le_bytes(data[8..12].try_into().unwrap()) as usize;

        let mut words = Vec::with_capacity(count);
        let mut index = AHashMap::with_capacity(count);
        let mut offset = 12;

        for id in 0..count {
            if offset + 4 > data.len() {
                bail!("Invalid vocabulary file {}: truncated entry", path.display());
            }
            let len = u32::from_le_bytes(data[offset..offset + 4].try_into().unwrap()) as usize;
            offset += 4;
            if offset + len > data.len() {
                bail!("Invalid vocabulary file {}: truncated entry", path.display());
            }
            let word = std::str::from_utf8(&data[offset..offset + len])
                .with_context(|| format!("Invalid UTF-8 in vocabulary entry {}", id))?
                .to_string();
            offset += len;

            index.insert(word.clone(), id as TokenId);
            words.push(word);
        }

        Ok(Self { words, index })
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_reserved_unknown() {
        let vocab = Vocabulary::new();
        assert_eq!(vocab.id(UNKNOWN_WORD), Some(UNKNOWN_TOKEN));
        assert_eq!(vocab.word(UNKNOWN_TOKEN), UNKNOWN_WORD);
        assert_eq!(vocab.len(), 1);
    }

    #[test]
    fn test_intern_is_idempotent() {
        let mut vocab = Vocabulary::new();
        let a = vocab.intern("the");
        let b = vocab.intern("cat");
        assert_ne!(a, b);
        assert_eq!(vocab.intern("the"), a);
        assert_eq!(vocab.id("cat"), Some(b));
        assert_eq!(vocab.id("dog"), None);
        assert_eq!(vocab.word(b), "cat");
    }

    #[test]
    fn test_binary_round_trip() {
        let mut vocab = Vocabulary::new();
        for word in ["the", "cat", "sat", "on", "the", "mat"] {
            vocab.intern(word);
        }

        let dir = tempdir().unwrap();
        let path = dir.path().join("vocab.bin");
        vocab.write_binary(&path).unwrap();

        let loaded = Vocabulary::open_binary(&path).unwrap();
        assert_eq!(loaded.len(), vocab.len());
        for word in ["the", "cat", "sat", "on", "mat", UNKNOWN_WORD] {
            assert_eq!(loaded.id(word), vocab.id(word));
        }
    }

    #[test]
    fn test_open_rejects_bad_magic() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("vocab.bin");
        std::fs::write(&path, [0u8; 32]).unwrap();
        assert!(Vocabulary::open_binary(&path).is_err());
    }
}
