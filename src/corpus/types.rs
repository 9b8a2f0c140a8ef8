//! Types shared by the corpus views and their on-disk forms.

use serde::{Deserialize, Serialize};

/// Identifier of a vocabulary entry
pub type TokenId = u32;

/// Position of a token in the corpus
pub type Position = u32;

/// Reserved ID for tokens missing from the vocabulary
pub const UNKNOWN_TOKEN: TokenId = 0;

/// Surface form of the reserved unknown token
pub const UNKNOWN_WORD: &str = "<unk>";

/// Magic number for vocabulary files ("CLVC")
pub const VOCAB_MAGIC: u32 = 0x434C_5643;

/// Magic number for corpus files ("CLCP")
pub const CORPUS_MAGIC: u32 = 0x434C_4350;

/// Current version of the binary corpus formats
pub const FORMAT_VERSION: u32 = 1;

/// Corpus metadata stored in meta.json next to the compiled binaries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusMeta {
    /// Binary format version
    pub version: u32,
    /// Number of tokens in the corpus
    pub token_count: u64,
    /// Number of sentences in the corpus
    pub sentence_count: u64,
    /// Number of vocabulary entries, reserved symbols included
    pub vocab_size: u64,
    /// Unix timestamp of compilation
    pub created_at: u64,
}
