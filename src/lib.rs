//! # colloc - Frequent Phrase Discovery and Collocation Engine
//!
//! Given a tokenized corpus and its suffix array, colloc finds the top-N
//! most frequent contiguous phrases and then, in a single streaming pass,
//! every co-occurrence of two frequent phrases within a sliding window of
//! tokens inside one sentence. This is the precomputation step used by
//! hierarchical phrase-based translation pipelines to make on-the-fly
//! lookup of hierarchical phrase translations tractable.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`corpus`] - Vocabulary and read-only corpus views (in-memory + mmap)
//! - [`suffix`] - Suffix array construction, views, and the LCP table
//! - [`phrase`] - LCP-interval sweep producing the frequent-phrase table
//! - [`colloc`] - Sentence-bounded sliding-window collocation enumerator
//! - [`output`] - Phrase table and collocation stream formatting
//!
//! ## Quick Start
//!
//! ```ignore
//! use colloc::colloc::{CollocationOptions, Collocations};
//! use colloc::corpus::CorpusArray;
//! use colloc::phrase::{ExtractOptions, FrequentPhrases, RankMap};
//! use colloc::suffix::{LcpTable, SuffixArray};
//!
//! let (corpus, vocab) = CorpusArray::from_text_file("corpus.txt".as_ref()).unwrap();
//! let suffixes = SuffixArray::build(&corpus);
//! let lcp = LcpTable::build(&corpus, &suffixes);
//!
//! let phrases =
//!     FrequentPhrases::extract(&corpus, &suffixes, &lcp, &ExtractOptions::default()).unwrap();
//! let ranks = RankMap::new(&phrases);
//!
//! for record in Collocations::new(&corpus, &ranks, CollocationOptions::default()) {
//!     println!("{} {} {} {}", record.rank1, record.rank2, record.position1, record.position2);
//! }
//! ```
//!
//! ## Algorithm
//!
//! Phrase extraction walks every lcp-delimited interval of the suffix array
//! in one left-to-right sweep with a two-stack algorithm (Yamamoto & Church's
//! `print_LDIs_stack`), so the full family of substring equivalence classes
//! is enumerated in linear time without materializing every distinct
//! substring. A bounded min-heap keeps only the top-N phrases. The
//! collocation pass is a single scan with a FIFO window, exposed as a lazy
//! iterator so consumers can stop early.

pub mod colloc;
pub mod corpus;
pub mod output;
pub mod phrase;
pub mod suffix;
