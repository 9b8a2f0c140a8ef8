//! Suffix array writer
//!
//! Persists a suffix array in the format read back by the memory-mapped
//! view: a magic/version/count header followed by little-endian u32
//! positions.

use super::builder::SuffixArray;
use super::SA_MAGIC;
use crate::corpus::FORMAT_VERSION;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes suffix array files
pub struct SuffixArrayWriter;

impl SuffixArrayWriter {
    /// Write a suffix array to a binary file
    pub fn write(path: &Path, suffixes: &SuffixArray) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        let mut out = BufWriter::with_capacity(65536, file);

        out.write_all(&SA_MAGIC.to_le_bytes())?;
        out.write_all(&FORMAT_VERSION.to_le_bytes())?;
        out.write_all(&(suffixes.positions().len() as u32).to_le_bytes())?;

        for &pos in suffixes.positions() {
            out.write_all(&pos.to_le_bytes())?;
        }

        out.flush()?;
        Ok(())
    }
}
