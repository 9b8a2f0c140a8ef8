//! Memory-mapped suffix array view

use super::{Suffixes, SA_HEADER_SIZE, SA_MAGIC};
use crate::corpus::FORMAT_VERSION;
use anyhow::{bail, Context, Result};
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;

/// Suffix array backed by a memory-mapped binary file
pub struct MemoryMappedSuffixArray {
    mmap: Mmap,
    count: usize,
}

impl MemoryMappedSuffixArray {
    /// Open and validate a binary suffix array file
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        let mmap = unsafe { Mmap::map(&file)? };

        if mmap.len() < SA_HEADER_SIZE {
            bail!("Invalid suffix array file {}: too small", path.display());
        }

        let magic = u32::from_le_bytes(mmap[0..4].try_into().unwrap());
        if magic != SA_MAGIC {
            bail!("Invalid suffix array file {}: bad magic number", path.display());
        }

        let version = u32::from_le_bytes(mmap[4..8].try_into().unwrap());
        if version != FORMAT_VERSION {
            bail!("Unsupported suffix array version: {}", version);
        }

        let count = u32::from_le_bytes(mmap[8..12].try_into().unwrap()) as usize;

        let expected = SA_HEADER_SIZE + 4 * count;
        if mmap.len() != expected {
            bail!(
                "Invalid suffix array file {}: {} bytes, expected {}",
                path.display(),
                mmap.len(),
                expected
            );
        }

        Ok(Self { mmap, count })
    }
}

impl Suffixes for MemoryMappedSuffixArray {
    fn len(&self) -> usize {
        self.count
    }

    #[inline]
    fn position(&self, i: usize) -> usize {
        debug_assert!(i < self.count);
        let offset = SA_HEADER_SIZE + 4 * i;
        u32::from_le_bytes(self.mmap[offset..offset + 4].try_into().unwrap()) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suffix::{SuffixArray, SuffixArrayWriter};
    use tempfile::tempdir;

    #[test]
    fn test_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("suffixes.bin");

        let sa = SuffixArray::from_positions(vec![5, 3, 1, 0, 4, 2]);
        SuffixArrayWriter::write(&path, &sa).unwrap();

        let mapped = MemoryMappedSuffixArray::open(&path).unwrap();
        assert_eq!(mapped.len(), 6);
        for i in 0..6 {
            assert_eq!(mapped.position(i), sa.position(i));
        }
    }

    #[test]
    fn test_rejects_wrong_count() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("suffixes.bin");

        let mut data = Vec::new();
        data.extend_from_slice(&SA_MAGIC.to_le_bytes());
        data.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
        data.extend_from_slice(&9u32.to_le_bytes()); // claims 9 entries, has none
        std::fs::write(&path, data).unwrap();

        assert!(MemoryMappedSuffixArray::open(&path).is_err());
    }
}
