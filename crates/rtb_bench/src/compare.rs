//! Byte-for-byte comparison of two raw images.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

/// First byte at which two images differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mismatch {
    pub index: usize,
    pub first: u8,
    pub second: u8,
}

/// Find the first differing byte of two equal-length buffers.
pub fn first_mismatch(first: &[u8], second: &[u8]) -> Option<Mismatch> {
    first
        .iter()
        .zip(second)
        .position(|(a, b)| a != b)
        .map(|index| Mismatch {
            index,
            first: first[index],
            second: second[index],
        })
}

/// Compare two image files. Files of different length are an error.
pub fn compare_files(first: &Path, second: &Path) -> Result<Option<Mismatch>> {
    let a = fs::read(first).with_context(|| format!("Failed to read {}", first.display()))?;
    let b = fs::read(second).with_context(|| format!("Failed to read {}", second.display()))?;

    if a.len() != b.len() {
        bail!(
            "Image file sizes do not match: {} is {} bytes, {} is {} bytes",
            first.display(),
            a.len(),
            second.display(),
            b.len()
        );
    }

    Ok(first_mismatch(&a, &b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical() {
        assert_eq!(first_mismatch(&[1, 2, 3], &[1, 2, 3]), None);
        assert_eq!(first_mismatch(&[], &[]), None);
    }

    #[test]
    fn test_first_difference_reported() {
        let m = first_mismatch(&[1, 2, 3, 4], &[1, 9, 3, 8]).unwrap();
        assert_eq!(m, Mismatch { index: 1, first: 2, second: 9 });
    }

    #[test]
    fn test_compare_files() {
        let dir = std::env::temp_dir();
        let pid = std::process::id();
        let a = dir.join(format!("rtbench-{pid}-cmp-a.raw"));
        let b = dir.join(format!("rtbench-{pid}-cmp-b.raw"));
        let c = dir.join(format!("rtbench-{pid}-cmp-c.raw"));

        fs::write(&a, [0u8, 1, 2, 3]).unwrap();
        fs::write(&b, [0u8, 1, 2, 3]).unwrap();
        fs::write(&c, [0u8, 1, 2]).unwrap();

        assert_eq!(compare_files(&a, &b).unwrap(), None);
        assert!(compare_files(&a, &c).is_err());

        for path in [a, b, c] {
            fs::remove_file(path).unwrap();
        }
    }
}
