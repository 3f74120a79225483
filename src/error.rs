//! Error types for the memory manager.
//!
//! Construction problems are reported as [`ConfigError`], rejected accesses as
//! [`AccessError`]. A page fault is never an error.

use std::fmt;

/// Reasons a manager cannot be built from the given parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Page size of zero.
    ZeroPageSize,
    /// Memory size and page size leave no frame to load pages into.
    NoFrames {
        /// Requested memory size in bytes
        memory_size: usize,
        /// Requested page size in bytes
        page_size: usize,
    },
    /// No segment names were supplied.
    NoSegments,
    /// More frames requested than there are pages to fill them.
    TooManyFrames {
        /// Requested frame count
        frames: usize,
        /// Pages in the logical address space
        pages: usize,
    },
    /// Strict mode: memory size is not a multiple of the page size.
    UnevenPageSplit {
        /// Requested memory size in bytes
        memory_size: usize,
        /// Requested page size in bytes
        page_size: usize,
    },
    /// Strict mode: memory size does not divide evenly among the segments.
    UnevenSegmentSplit {
        /// Requested memory size in bytes
        memory_size: usize,
        /// Number of segments
        segments: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroPageSize => write!(f, "page size must be greater than zero"),
            ConfigError::NoFrames {
                memory_size,
                page_size,
            } => write!(
                f,
                "memory size {} with page size {} yields no frames",
                memory_size, page_size
            ),
            ConfigError::NoSegments => write!(f, "at least one segment is required"),
            ConfigError::TooManyFrames { frames, pages } => write!(
                f,
                "{} frames requested but the address space only has {} pages",
                frames, pages
            ),
            ConfigError::UnevenPageSplit {
                memory_size,
                page_size,
            } => write!(
                f,
                "memory size {} is not a multiple of page size {}",
                memory_size, page_size
            ),
            ConfigError::UnevenSegmentSplit {
                memory_size,
                segments,
            } => write!(
                f,
                "memory size {} does not split evenly into {} segments",
                memory_size, segments
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Reasons an access is rejected. No counters or tables change when one of
/// these is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// Segment index past the end of the segment table.
    InvalidSegment { index: usize, count: usize },
    /// Offset at or beyond the segment limit, or inside the unaddressable tail.
    OffsetOutOfBounds {
        segment: usize,
        offset: usize,
        limit: usize,
    },
    /// No free frame and nothing to evict. Cannot happen for a manager that
    /// passed construction.
    FrameExhausted { page: usize },
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessError::InvalidSegment { index, count } => write!(
                f,
                "invalid segment index {} ({} segments defined)",
                index, count
            ),
            AccessError::OffsetOutOfBounds {
                segment,
                offset,
                limit,
            } => write!(
                f,
                "offset {} out of bounds for segment {} (limit {})",
                offset, segment, limit
            ),
            AccessError::FrameExhausted { page } => {
                write!(f, "no frame available to load page {}", page)
            }
        }
    }
}

impl std::error::Error for AccessError {}
