//! Single-pass sliding-window collocation enumerator
//!
//! Walks the corpus once, keeping a FIFO window of recent frequent-phrase
//! occurrences. At each position the enumerator first drains the window if
//! the previous sentence just ended (pairs never cross sentences), then
//! retires occurrences that fell out of the window, pairing each with
//! everything still inside, and finally looks up the phrases starting at
//! the position. Pair emission goes oldest-to-newest; that order is part
//! of the contract.
//!
//! The iterator is lazy and holds no more state than the window itself, so
//! a consumer that stops early stops the whole pass.

use super::{Collocation, CollocationOptions};
use crate::corpus::{Corpus, TokenId};
use crate::phrase::{Rank, RankMap};
use std::collections::VecDeque;

/// A frequent-phrase occurrence inside the window
#[derive(Debug, Clone, Copy)]
struct Occurrence {
    rank: Rank,
    start: u32,
}

enum State {
    /// Process the position `self.position`
    Scan,
    /// Emitting all pairs of the current window before clearing it
    Drain { a: usize, b: usize },
    /// Emitting pairs of a retired occurrence with the remaining window
    AgeOut { retired: Occurrence, b: usize },
    Done,
}

/// Lazy stream of collocation records
pub struct Collocations<'a, C: Corpus> {
    corpus: &'a C,
    ranks: &'a RankMap,
    options: CollocationOptions,
    window: VecDeque<Occurrence>,
    /// Reusable buffer for candidate phrase lookups
    candidate: Vec<TokenId>,
    position: usize,
    sentence: usize,
    end_of_sentence: usize,
    state: State,
}

impl<'a, C: Corpus> Collocations<'a, C> {
    pub fn new(corpus: &'a C, ranks: &'a RankMap, options: CollocationOptions) -> Self {
        let end_of_sentence = sentence_end(corpus, 0);
        Self {
            corpus,
            ranks,
            options,
            window: VecDeque::new(),
            candidate: Vec::new(),
            position: 0,
            sentence: 0,
            end_of_sentence,
            state: State::Scan,
        }
    }

    /// The parameters this stream was produced under
    pub fn options(&self) -> &CollocationOptions {
        &self.options
    }

    /// Append the frequent phrases starting at `position` to the window
    fn collect_at(&mut self, position: usize) {
        let longest = self
            .options
            .max_phrase_length
            .min(self.end_of_sentence - position);
        self.candidate.clear();
        for m in 1..=longest {
            self.candidate.push(self.corpus.token(position + m - 1));
            if let Some(rank) = self.ranks.rank(&self.candidate) {
                self.window.push_back(Occurrence { rank, start: position as u32 });
            }
        }
    }
}

fn sentence_end<C: Corpus>(corpus: &C, sentence: usize) -> usize {
    let next = (sentence + 1).min(corpus.sentence_count());
    corpus.sentence_start(next)
}

fn pair(first: Occurrence, second: Occurrence) -> Collocation {
    Collocation {
        rank1: first.rank,
        rank2: second.rank,
        position1: first.start,
        position2: second.start,
    }
}

impl<'a, C: Corpus> Iterator for Collocations<'a, C> {
    type Item = Collocation;

    fn next(&mut self) -> Option<Collocation> {
        loop {
            match self.state {
                State::Done => return None,

                State::Drain { a, b } => {
                    let len = self.window.len();
                    if a + 1 < len && b < len {
                        let record = pair(self.window[a], self.window[b]);
                        self.state = if b + 1 < len {
                            State::Drain { a, b: b + 1 }
                        } else {
                            State::Drain { a: a + 1, b: a + 2 }
                        };
                        return Some(record);
                    }
                    // All pairs emitted; the sentence is over.
                    self.window.clear();
                    if self.position >= self.corpus.len() {
                        self.state = State::Done;
                    } else {
                        self.sentence += 1;
                        self.end_of_sentence = sentence_end(self.corpus, self.sentence);
                        self.state = State::Scan;
                    }
                }

                State::AgeOut { retired, b } => {
                    if b < self.window.len() {
                        self.state = State::AgeOut { retired, b: b + 1 };
                        return Some(pair(retired, self.window[b]));
                    }
                    self.state = State::Scan;
                }

                State::Scan => {
                    if self.position == self.end_of_sentence {
                        // Sentence terminator reached (or the corpus is
                        // empty): flush everything still in the window.
                        self.state = State::Drain { a: 0, b: 1 };
                        continue;
                    }

                    // Retire occurrences whose window has passed. Runs
                    // before this position's phrases join, so every pair
                    // stays within window_size.
                    if let Some(&oldest) = self.window.front() {
                        if (oldest.start as usize) + self.options.window_size < self.position {
                            self.window.pop_front();
                            self.state = State::AgeOut { retired: oldest, b: 0 };
                            continue;
                        }
                    }

                    self.collect_at(self.position);
                    self.position += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::CorpusArray;
    use crate::phrase::{ExtractOptions, FrequentPhrases};
    use crate::suffix::{LcpTable, SuffixArray};

    fn ranks_for(corpus: &CorpusArray, extract: &ExtractOptions) -> RankMap {
        let suffixes = SuffixArray::build(corpus);
        let lcp = LcpTable::build(corpus, &suffixes);
        let phrases =
            FrequentPhrases::extract(corpus, &suffixes, &lcp, extract).unwrap();
        RankMap::new(&phrases)
    }

    fn collect(
        corpus: &CorpusArray,
        ranks: &RankMap,
        options: CollocationOptions,
    ) -> Vec<Collocation> {
        Collocations::new(corpus, ranks, options).collect()
    }

    #[test]
    fn test_pairs_stay_inside_window() {
        let corpus =
            CorpusArray::new(vec![0, 1, 0, 1, 0, 1, 0], vec![0]).unwrap();
        let extract = ExtractOptions {
            min_frequency: 2,
            max_phrases: 20,
            max_phrase_length: 2,
        };
        let ranks = ranks_for(&corpus, &extract);
        let options = CollocationOptions {
            max_phrase_length: 2,
            window_size: 2,
            ..Default::default()
        };

        let records = collect(&corpus, &ranks, options);
        assert!(!records.is_empty());
        for r in &records {
            assert!(r.position1 <= r.position2);
            assert!((r.position2 - r.position1) as usize <= 2);
        }
    }

    #[test]
    fn test_no_cross_sentence_pairs() {
        // Two sentences of the same bigram; "0 1" is frequent in both.
        let (corpus, _) = CorpusArray::from_reader(std::io::Cursor::new(
            "a b\na b\n",
        ))
        .unwrap();
        let extract = ExtractOptions {
            min_frequency: 2,
            max_phrases: 20,
            max_phrase_length: 2,
        };
        let ranks = ranks_for(&corpus, &extract);

        let records = collect(
            &corpus,
            &ranks,
            CollocationOptions { max_phrase_length: 2, window_size: 10, ..Default::default() },
        );
        for r in &records {
            assert_eq!(
                corpus.sentence_of(r.position1 as usize),
                corpus.sentence_of(r.position2 as usize)
            );
        }
        // Both sentences produce the same in-sentence pairs at shifted
        // positions, none spanning the boundary at 2.
        assert!(records.iter().any(|r| r.position1 == 0));
        assert!(records.iter().any(|r| r.position1 == 2));
        assert!(!records.iter().any(|r| r.position1 < 2 && r.position2 >= 2));
    }

    #[test]
    fn test_zero_window_unigrams_emit_nothing() {
        let corpus =
            CorpusArray::new(vec![0, 0, 0, 0], vec![0]).unwrap();
        let extract = ExtractOptions {
            min_frequency: 2,
            max_phrases: 5,
            max_phrase_length: 1,
        };
        let ranks = ranks_for(&corpus, &extract);
        let options = CollocationOptions {
            max_phrase_length: 1,
            window_size: 0,
            ..Default::default()
        };

        assert!(collect(&corpus, &ranks, options).is_empty());
    }

    #[test]
    fn test_empty_corpus_emits_nothing() {
        let corpus = CorpusArray::new(Vec::new(), Vec::new()).unwrap();
        let extract = ExtractOptions::default();
        let ranks = ranks_for(&corpus, &extract);

        assert!(collect(&corpus, &ranks, CollocationOptions::default()).is_empty());
    }

    #[test]
    fn test_each_pair_emitted_once() {
        let corpus =
            CorpusArray::new(vec![0, 1, 0, 1, 0], vec![0]).unwrap();
        let extract = ExtractOptions {
            min_frequency: 2,
            max_phrases: 10,
            max_phrase_length: 2,
        };
        let ranks = ranks_for(&corpus, &extract);
        let options = CollocationOptions {
            max_phrase_length: 2,
            window_size: 2,
            ..Default::default()
        };

        let records = collect(&corpus, &ranks, options);
        let mut seen = std::collections::HashSet::new();
        for r in &records {
            assert!(seen.insert(*r), "duplicate record {:?}", r);
        }
    }

    #[test]
    fn test_same_start_pairs_included() {
        // "0" and "0 1" both start at position 0 and must pair up.
        let corpus =
            CorpusArray::new(vec![0, 1, 0, 1, 0], vec![0]).unwrap();
        let extract = ExtractOptions {
            min_frequency: 2,
            max_phrases: 10,
            max_phrase_length: 2,
        };
        let ranks = ranks_for(&corpus, &extract);
        let unigram = ranks.rank(&[0]).unwrap();
        let bigram = ranks.rank(&[0, 1]).unwrap();

        let records = collect(
            &corpus,
            &ranks,
            CollocationOptions { max_phrase_length: 2, window_size: 2, ..Default::default() },
        );
        assert!(records.contains(&Collocation {
            rank1: unigram,
            rank2: bigram,
            position1: 0,
            position2: 0,
        }));
    }

    #[test]
    fn test_drop_stops_production() {
        let corpus =
            CorpusArray::new(vec![0, 1, 0, 1, 0, 1, 0, 1], vec![0]).unwrap();
        let extract = ExtractOptions {
            min_frequency: 2,
            max_phrases: 10,
            max_phrase_length: 2,
        };
        let ranks = ranks_for(&corpus, &extract);
        let mut stream = Collocations::new(
            &corpus,
            &ranks,
            CollocationOptions { max_phrase_length: 2, window_size: 3, ..Default::default() },
        );

        // Take a prefix and drop the rest; nothing forces full production.
        assert!(stream.next().is_some());
        drop(stream);
    }
}
