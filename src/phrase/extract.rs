//! Frequent-phrase extraction
//!
//! Implements the `print_LDIs_stack` algorithm of Yamamoto & Church (2001),
//! section 2.5: a single left-to-right sweep over the LCP table that
//! enumerates every lcp-delimited interval of the suffix array with a pair
//! of stacks. Each interval stands for an equivalence class of substrings
//! sharing one frequency, so the sweep sees every distinct phrase exactly
//! once without materializing them all. A bounded min-heap keeps the top-N.
//!
//! For an interval `<i, j>`:
//!
//! - the longest bounding LCP is `LBL = max(lcp[i], lcp[j+1])`
//! - the shortest interior LCP is `SIL = min(lcp[i+1], ..., lcp[j])`, and
//!   the sweep tracks a witness index `k` with `lcp[k] = SIL`
//! - the interval is lcp-delimited iff `LBL < SIL`, and then every prefix
//!   of the suffix at `SA[i]` with length in `(LBL, SIL]` occurs exactly
//!   `j - i + 1` times in the corpus
//! - the trivial interval `<i, i>` contributes the prefixes longer than
//!   `LBL`, each occurring once

use super::types::Phrase;
use crate::corpus::Corpus;
use crate::suffix::{LcpTable, Suffixes, MAX_COMPARISON_LENGTH};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Largest admissible `max_phrases`; ranks must fit in 16 bits
pub const MAX_PHRASES_LIMIT: usize = 32_767;

/// Extraction parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractOptions {
    /// Minimum occurrence count for a phrase to be kept; values below 1
    /// are treated as 1
    pub min_frequency: u32,
    /// Maximum number of phrases to keep
    pub max_phrases: usize,
    /// Maximum phrase length in tokens
    pub max_phrase_length: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            min_frequency: 1,
            max_phrases: 100,
            max_phrase_length: 10,
        }
    }
}

impl ExtractOptions {
    /// Reject parameter combinations the sweep cannot honor
    pub fn validate(&self) -> Result<()> {
        if self.max_phrases == 0 || self.max_phrases > MAX_PHRASES_LIMIT {
            bail!(
                "max_phrases must be in [1, {}], got {}",
                MAX_PHRASES_LIMIT,
                self.max_phrases
            );
        }
        if self.max_phrase_length == 0 || self.max_phrase_length > MAX_COMPARISON_LENGTH {
            bail!(
                "max_phrase_length must be in [1, {}], got {}",
                MAX_COMPARISON_LENGTH,
                self.max_phrase_length
            );
        }
        Ok(())
    }
}

/// The most frequent phrases of a corpus, frequency descending
///
/// Iteration order is the rank order: non-increasing frequency, with ties
/// kept in the order the sweep first recorded them. At most `max_phrases`
/// entries, no duplicate phrases.
#[derive(Debug, Clone)]
pub struct FrequentPhrases {
    entries: Vec<(Phrase, u32)>,
}

impl FrequentPhrases {
    /// Run the sweep and collect the top-N frequent phrases
    pub fn extract<C: Corpus, S: Suffixes>(
        corpus: &C,
        suffixes: &S,
        lcp: &LcpTable,
        options: &ExtractOptions,
    ) -> Result<Self> {
        options.validate()?;
        let n = suffixes.len();
        if n != corpus.len() {
            bail!(
                "Corrupt suffix array: {} entries for a corpus of {} tokens",
                n,
                corpus.len()
            );
        }
        if lcp.len() != n + 1 {
            bail!(
                "Inconsistent LCP table: {} entries for {} suffixes",
                lcp.len(),
                n
            );
        }

        let min_frequency = options.min_frequency.max(1);
        let mut top = TopPhrases::new(options.max_phrases);

        // Parallel stacks of interval left edges and SIL witness indices.
        let mut start_stack: Vec<usize> = vec![0];
        let mut sil_stack: Vec<usize> = vec![0];

        for j in 0..n {
            // The trivial interval <j, j>.
            record_class(
                corpus, suffixes, lcp, j, j, 0,
                min_frequency, options.max_phrase_length, &mut top,
            );

            // Close every interval whose interior LCP exceeds lcp[j+1].
            while lcp.get(j + 1) < lcp.get(*sil_stack.last().unwrap()) {
                let i = start_stack.pop().unwrap();
                let k = sil_stack.pop().unwrap();
                record_class(
                    corpus, suffixes, lcp, i, j, k,
                    min_frequency, options.max_phrase_length, &mut top,
                );
            }

            start_stack.push(*sil_stack.last().unwrap());
            sil_stack.push(j + 1);
        }

        Ok(Self { entries: top.into_sorted() })
    }

    /// Number of phrases kept
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Phrases in rank order with their frequencies
    pub fn iter(&self) -> impl Iterator<Item = (&Phrase, u32)> + '_ {
        self.entries.iter().map(|(phrase, freq)| (phrase, *freq))
    }

    /// Phrase and frequency at a rank
    pub fn get(&self, rank: usize) -> Option<(&Phrase, u32)> {
        self.entries.get(rank).map(|(phrase, freq)| (phrase, *freq))
    }

    /// Recorded frequency of a phrase, if it was kept
    pub fn frequency(&self, tokens: &[crate::corpus::TokenId]) -> Option<u32> {
        self.entries
            .iter()
            .find(|(phrase, _)| phrase.tokens() == tokens)
            .map(|&(_, freq)| freq)
    }
}

/// Record the substring equivalence class of interval `<i, j>`
///
/// `k` is the SIL witness index for non-trivial intervals. Phrase lengths
/// are clamped to the enclosing sentence so no kept phrase straddles a
/// sentence boundary.
#[allow(clippy::too_many_arguments)]
fn record_class<C: Corpus, S: Suffixes>(
    corpus: &C,
    suffixes: &S,
    lcp: &LcpTable,
    i: usize,
    j: usize,
    k: usize,
    min_frequency: u32,
    max_phrase_length: usize,
    top: &mut TopPhrases,
) {
    let lbl = lcp.get(i).max(lcp.get(j + 1)) as usize;
    let start = suffixes.position(i);
    let sentence = corpus.sentence_of(start);
    let end_of_sentence = corpus.sentence_start(sentence + 1);

    if i == j {
        // Trivial class: the prefixes unique to this suffix, frequency 1.
        if min_frequency <= 1 {
            let mut m = lbl + 1;
            while m <= max_phrase_length && start + m <= end_of_sentence {
                top.insert(Phrase::from_range(corpus, start, start + m), 1);
                m += 1;
            }
        }
    } else {
        let sil = lcp.get(k) as usize;
        // class(<i,j>) is empty unless the interval is lcp-delimited.
        if lbl < sil {
            let frequency = (j - i + 1) as u32;
            if frequency >= min_frequency {
                let mut m = lbl + 1;
                while m <= max_phrase_length && m <= sil && start + m <= end_of_sentence {
                    top.insert(Phrase::from_range(corpus, start, start + m), frequency);
                    m += 1;
                }
            }
        }
    }
}

/// Bounded top-N accumulator
///
/// A min-heap on frequency, capped at `capacity`; when full, inserting
/// evicts the least frequent entry, with later insertions losing frequency
/// ties. The insertion sequence number makes the final order deterministic.
struct TopPhrases {
    heap: BinaryHeap<HeapEntry>,
    capacity: usize,
    seq: u64,
}

impl TopPhrases {
    fn new(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity + 1),
            capacity,
            seq: 0,
        }
    }

    fn insert(&mut self, phrase: Phrase, frequency: u32) {
        self.heap.push(HeapEntry { frequency, seq: self.seq, phrase });
        self.seq += 1;
        while self.heap.len() > self.capacity {
            self.heap.pop();
        }
    }

    fn into_sorted(self) -> Vec<(Phrase, u32)> {
        let mut entries = self.heap.into_vec();
        entries.sort_unstable_by(|a, b| {
            b.frequency.cmp(&a.frequency).then_with(|| a.seq.cmp(&b.seq))
        });
        entries.into_iter().map(|e| (e.phrase, e.frequency)).collect()
    }
}

struct HeapEntry {
    frequency: u32,
    seq: u64,
    phrase: Phrase,
}

// Heap order is eviction order: the maximum is the entry to evict, i.e.
// the lowest frequency, latest insertion first among equals.
impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .frequency
            .cmp(&self.frequency)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.frequency == other.frequency && self.seq == other.seq
    }
}

impl Eq for HeapEntry {}
