use std::fmt;

use crate::constants::INVALID_ADDRESS;
use crate::error::AccessError;
use crate::vm_manager::VMManager;

/// A logical address split into page number and offset within the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicalAddress {
    pub address: usize,
    pub page: usize,
    pub offset: usize,
}

impl LogicalAddress {
    /// Decompose a raw logical address for the given page size
    pub fn from_raw(address: usize, page_size: usize) -> Self {
        LogicalAddress {
            address,
            page: address / page_size,
            offset: address % page_size,
        }
    }
}

impl fmt::Display for LogicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LA({}) = (p={}, w={})", self.address, self.page, self.offset)
    }
}

/// Everything known about one successful access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translation {
    pub segment: usize,
    pub segment_offset: usize,
    pub logical_address: usize,
    pub page: usize,
    pub page_offset: usize,
    pub frame: usize,
    pub physical_address: usize,
    /// The page was not resident and had to be loaded
    pub faulted: bool,
}

impl fmt::Display for Translation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.faulted {
            writeln!(f, "Page fault occurred! Loaded page {} into memory.", self.page)?;
        }
        writeln!(
            f,
            "Logical Address: {} (Segment {}, Offset {})",
            self.logical_address, self.segment, self.segment_offset
        )?;
        write!(
            f,
            "Physical Address: {} (Frame {}, Offset {})",
            self.physical_address, self.frame, self.page_offset
        )
    }
}

/// Outcome of a single access attempt
pub type TranslationResult = Result<Translation, AccessError>;

/// Batch output form of an access outcome
pub trait ToOutput {
    /// Physical address, or -1 when the access was rejected
    fn to_output(&self) -> i64;
}

impl ToOutput for TranslationResult {
    fn to_output(&self) -> i64 {
        match self {
            Ok(t) => t.physical_address as i64,
            Err(_) => INVALID_ADDRESS,
        }
    }
}

/// Run a batch of (segment, offset) accesses in order
pub fn translate_batch(manager: &mut VMManager, accesses: &[(usize, usize)]) -> Vec<i64> {
    accesses
        .iter()
        .map(|&(segment, offset)| manager.access(segment, offset).to_output())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replacement::PolicyKind;

    #[test]
    fn test_la_decomposition() {
        let la = LogicalAddress::from_raw(681, 64);
        assert_eq!(la.page, 10);
        assert_eq!(la.offset, 41);
        assert_eq!(la.page * 64 + la.offset, 681);

        let la = LogicalAddress::from_raw(0, 64);
        assert_eq!((la.page, la.offset), (0, 0));

        let la = LogicalAddress::from_raw(1023, 64);
        assert_eq!((la.page, la.offset), (15, 63));
    }

    #[test]
    fn test_display() {
        let la = LogicalAddress::from_raw(681, 64);
        let display = format!("{}", la);
        assert!(display.contains("681"));
        assert!(display.contains("p=10"));
        assert!(display.contains("w=41"));
    }

    #[test]
    fn test_translation_display_mentions_fault() {
        let t = Translation {
            segment: 0,
            segment_offset: 5,
            logical_address: 5,
            page: 0,
            page_offset: 5,
            frame: 0,
            physical_address: 5,
            faulted: true,
        };
        let text = t.to_string();
        assert!(text.starts_with("Page fault occurred! Loaded page 0"));
        assert!(text.contains("Physical Address: 5 (Frame 0, Offset 5)"));

        let hit = Translation { faulted: false, ..t };
        assert!(!hit.to_string().contains("Page fault"));
    }

    #[test]
    fn test_to_output() {
        let ok: TranslationResult = Ok(Translation {
            segment: 1,
            segment_offset: 0,
            logical_address: 341,
            page: 5,
            page_offset: 21,
            frame: 0,
            physical_address: 21,
            faulted: true,
        });
        assert_eq!(ok.to_output(), 21);

        let err: TranslationResult = Err(AccessError::InvalidSegment { index: 9, count: 3 });
        assert_eq!(err.to_output(), -1);
    }

    // =========================================================================
    // Batch translation
    // =========================================================================

    #[test]
    fn test_translate_batch() {
        let mut vmm = VMManager::new(1024, 64, &["code", "data", "stack"], PolicyKind::Fifo).unwrap();

        // seg 0 off 0 -> page 0 -> frame 0
        // seg 1 off 0 -> LA 341 -> page 5, offset 21 -> frame 1
        // seg 1 off 341 -> out of bounds
        // seg 0 off 63 -> page 0 again, frame 0
        let results = translate_batch(&mut vmm, &[(0, 0), (1, 0), (1, 341), (0, 63)]);
        assert_eq!(results, vec![0, 64 + 21, -1, 63]);
        assert_eq!(vmm.stats().accesses(), 3);
        assert_eq!(vmm.stats().page_faults(), 2);
    }

    #[test]
    fn test_translate_batch_empty() {
        let mut vmm = VMManager::new(1024, 64, &["code"], PolicyKind::Lru).unwrap();
        let results = translate_batch(&mut vmm, &[]);
        assert!(results.is_empty());
    }
}
