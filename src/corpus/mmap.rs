//! Memory-mapped corpus view
//!
//! Reads the binary form written by [`CorpusArray::write_binary`] without
//! loading the token sequence into memory. Layout after the 16-byte header
//! is the token sequence followed by the sentence-start table, both as
//! little-endian u32 entries.
//!
//! [`CorpusArray::write_binary`]: super::array::CorpusArray::write_binary

use super::types::*;
use super::Corpus;
use anyhow::{bail, Context, Result};
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;

const HEADER_SIZE: usize = 16;

/// Corpus backed by a memory-mapped binary file
pub struct MemoryMappedCorpus {
    mmap: Mmap,
    token_count: usize,
    sentence_count: usize,
}

impl MemoryMappedCorpus {
    /// Open and validate a binary corpus file
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        let mmap = unsafe { Mmap::map(&file)? };

        if mmap.len() < HEADER_SIZE {
            bail!("Invalid corpus file {}: too small", path.display());
        }

        let magic = u32::from_le_bytes(mmap[0..4].try_into().unwrap());
        if magic != CORPUS_MAGIC {
            bail!("Invalid corpus file {}: bad magic number", path.display());
        }

        let version = u32::from_le_bytes(mmap[4..8].try_into().unwrap());
        if version != FORMAT_VERSION {
            bail!("Unsupported corpus version: {}", version);
        }

        let token_count = u32::from_le_bytes(mmap[8..12].try_into().unwrap()) as usize;
        let sentence_count = u32::from_le_bytes(mmap[12..16].try_into().unwrap()) as usize;

        let expected = HEADER_SIZE + 4 * (token_count + sentence_count);
        if mmap.len() != expected {
            bail!(
                "Invalid corpus file {}: {} bytes, expected {}",
                path.display(),
                mmap.len(),
                expected
            );
        }

        let corpus = Self { mmap, token_count, sentence_count };
        corpus.verify_sentence_table(path)?;
        Ok(corpus)
    }

    fn verify_sentence_table(&self, path: &Path) -> Result<()> {
        if self.sentence_count == 0 {
            if self.token_count != 0 {
                bail!("Invalid corpus file {}: tokens without sentences", path.display());
            }
            return Ok(());
        }
        if self.raw_sentence_start(0) != 0 {
            bail!("Invalid corpus file {}: first sentence start is not 0", path.display());
        }
        for s in 1..self.sentence_count {
            let prev = self.raw_sentence_start(s - 1);
            let cur = self.raw_sentence_start(s);
            if cur <= prev || cur >= self.token_count {
                bail!("Invalid corpus file {}: sentence table not monotone", path.display());
            }
        }
        Ok(())
    }

    #[inline]
    fn read_u32(&self, byte_offset: usize) -> u32 {
        u32::from_le_bytes(self.mmap[byte_offset..byte_offset + 4].try_into().unwrap())
    }

    #[inline]
    fn raw_sentence_start(&self, sentence: usize) -> usize {
        self.read_u32(HEADER_SIZE + 4 * (self.token_count + sentence)) as usize
    }
}

impl Corpus for MemoryMappedCorpus {
    fn len(&self) -> usize {
        self.token_count
    }

    #[inline]
    fn token(&self, pos: usize) -> TokenId {
        debug_assert!(pos < self.token_count);
        self.read_u32(HEADER_SIZE + 4 * pos)
    }

    fn sentence_count(&self) -> usize {
        self.sentence_count
    }

    fn sentence_start(&self, sentence: usize) -> usize {
        if sentence == self.sentence_count {
            self.token_count
        } else {
            self.raw_sentence_start(sentence)
        }
    }

    fn sentence_of(&self, pos: usize) -> usize {
        debug_assert!(pos < self.token_count);
        // Binary search over the mapped sentence table
        let mut lo = 0usize;
        let mut hi = self.sentence_count;
        while lo + 1 < hi {
            let mid = lo + (hi - lo) / 2;
            if self.raw_sentence_start(mid) <= pos {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        lo
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::CorpusArray;
    use std::io::Cursor;
    use tempfile::tempdir;

    fn round_trip(text: &str) -> (CorpusArray, MemoryMappedCorpus, tempfile::TempDir) {
        let (corpus, _) = CorpusArray::from_reader(Cursor::new(text)).unwrap();
        let dir = tempdir().unwrap();
        let path = dir.path().join("corpus.bin");
        corpus.write_binary(&path).unwrap();
        let mapped = MemoryMappedCorpus::open(&path).unwrap();
        (corpus, mapped, dir)
    }

    #[test]
    fn test_matches_in_memory_view() {
        let (corpus, mapped, _dir) = round_trip("a b c\nd e\nf g h i\n");

        assert_eq!(mapped.len(), corpus.len());
        assert_eq!(mapped.sentence_count(), corpus.sentence_count());
        for pos in 0..corpus.len() {
            assert_eq!(mapped.token(pos), corpus.token(pos));
            assert_eq!(mapped.sentence_of(pos), corpus.sentence_of(pos));
        }
        for s in 0..=corpus.sentence_count() {
            assert_eq!(mapped.sentence_start(s), corpus.sentence_start(s));
        }
    }

    #[test]
    fn test_empty_corpus() {
        let (_, mapped, _dir) = round_trip("");
        assert_eq!(mapped.len(), 0);
        assert_eq!(mapped.sentence_count(), 0);
        assert_eq!(mapped.sentence_start(0), 0);
    }

    #[test]
    fn test_rejects_truncated_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("corpus.bin");
        std::fs::write(&path, CORPUS_MAGIC.to_le_bytes()).unwrap();
        assert!(MemoryMappedCorpus::open(&path).is_err());
    }
}
