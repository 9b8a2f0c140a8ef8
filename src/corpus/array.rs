//! In-memory corpus array
//!
//! Holds the token-ID sequence and the sentence-start table. Built either
//! from a plain-text corpus (one sentence per line, whitespace-tokenized,
//! interning words into a [`Vocabulary`] on the way) or from pre-tokenized
//! parts. The binary form written here is what [`MemoryMappedCorpus`]
//! reads back.
//!
//! [`MemoryMappedCorpus`]: super::mmap::MemoryMappedCorpus

use super::types::*;
use super::vocab::Vocabulary;
use super::Corpus;
use anyhow::{bail, Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Read-only in-memory corpus with sentence boundaries
#[derive(Debug, Clone)]
pub struct CorpusArray {
    tokens: Vec<TokenId>,
    /// Start position of each sentence, strictly increasing
    sentence_starts: Vec<Position>,
}

impl CorpusArray {
    /// Create a corpus from pre-tokenized parts
    ///
    /// The sentence table must start at 0, be strictly increasing, and stay
    /// within the token range; anything else is corrupt input.
    pub fn new(tokens: Vec<TokenId>, sentence_starts: Vec<Position>) -> Result<Self> {
        if tokens.is_empty() != sentence_starts.is_empty() {
            bail!("Inconsistent corpus: {} tokens, {} sentences",
                tokens.len(), sentence_starts.len());
        }
        if let Some(&first) = sentence_starts.first() {
            if first != 0 {
                bail!("Inconsistent sentence table: first sentence starts at {}", first);
            }
        }
        for pair in sentence_starts.windows(2) {
            if pair[1] <= pair[0] {
                bail!("Inconsistent sentence table: start {} follows {}", pair[1], pair[0]);
            }
        }
        if let Some(&last) = sentence_starts.last() {
            if last as usize >= tokens.len() {
                bail!("Inconsistent sentence table: start {} beyond corpus end {}",
                    last, tokens.len());
            }
        }
        Ok(Self { tokens, sentence_starts })
    }

    /// Build a corpus and its vocabulary from a plain-text file,
    /// one sentence per line
    pub fn from_text_file(path: &Path) -> Result<(Self, Vocabulary)> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        Self::from_reader(BufReader::new(file))
    }

    /// Build a corpus and its vocabulary from any line-oriented reader
    pub fn from_reader<R: BufRead>(reader: R) -> Result<(Self, Vocabulary)> {
        let mut vocab = Vocabulary::new();
        let mut tokens: Vec<TokenId> = Vec::new();
        let mut sentence_starts: Vec<Position> = Vec::new();

        for line in reader.lines() {
            let line = line.context("Failed to read corpus line")?;
            let mut words = line.split_whitespace().peekable();
            if words.peek().is_none() {
                continue; // blank line, not a sentence
            }
            sentence_starts.push(tokens.len() as Position);
            for word in words {
                tokens.push(vocab.intern(word));
            }
        }

        let corpus = Self::new(tokens, sentence_starts)?;
        Ok((corpus, vocab))
    }

    /// Write the corpus to a binary file readable by the memory-mapped view
    pub fn write_binary(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        let mut out = BufWriter::with_capacity(65536, file);

        out.write_all(&CORPUS_MAGIC.to_le_bytes())?;
        out.write_all(&FORMAT_VERSION.to_le_bytes())?;
        out.write_all(&(self.tokens.len() as u32).to_le_bytes())?;
        out.write_all(&(self.sentence_starts.len() as u32).to_le_bytes())?;

        for &token in &self.tokens {
            out.write_all(&token.to_le_bytes())?;
        }
        for &start in &self.sentence_starts {
            out.write_all(&start.to_le_bytes())?;
        }

        out.flush()?;
        Ok(())
    }
}

impl Corpus for CorpusArray {
    fn len(&self) -> usize {
        self.tokens.len()
    }

    fn token(&self, pos: usize) -> TokenId {
        self.tokens[pos]
    }

    fn sentence_count(&self) -> usize {
        self.sentence_starts.len()
    }

    fn sentence_start(&self, sentence: usize) -> usize {
        if sentence == self.sentence_starts.len() {
            self.tokens.len()
        } else {
            self.sentence_starts[sentence] as usize
        }
    }

    fn sentence_of(&self, pos: usize) -> usize {
        debug_assert!(pos < self.tokens.len());
        // Last sentence whose start is <= pos
        self.sentence_starts.partition_point(|&s| s as usize <= pos) - 1
    }
}
