use std::fmt;

use crate::constants::SEGMENT_NAME_PREFIX;
use crate::error::AccessError;

/// A named, fixed-size slice of the logical address space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub name: String,
    pub base: usize,
    /// Size of the segment in bytes, not its end address.
    pub limit: usize,
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: Base = {}, Limit = {}", self.name, self.base, self.limit)
    }
}

/// Segment table: `memory_size / n` bytes per segment, laid out back to back.
///
/// When `memory_size` is not a multiple of `n` the trailing bytes belong to no
/// segment and can never be addressed.
#[derive(Debug, Clone)]
pub struct SegmentTable {
    segments: Vec<Segment>,
}

impl SegmentTable {
    /// Build the table. An empty name becomes `Segment<index>`.
    ///
    /// Callers must pass at least one name; the manager checks this before
    /// getting here.
    pub fn new<S: AsRef<str>>(memory_size: usize, names: &[S]) -> Self {
        let limit = memory_size / names.len().max(1);
        let segments = names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let name = name.as_ref().trim();
                let name = if name.is_empty() {
                    format!("{}{}", SEGMENT_NAME_PREFIX, i)
                } else {
                    name.to_string()
                };
                Segment {
                    name,
                    base: i * limit,
                    limit,
                }
            })
            .collect();
        SegmentTable { segments }
    }

    /// Map a segment-relative offset to a logical address.
    pub fn resolve(&self, index: usize, offset: usize) -> Result<usize, AccessError> {
        let segment = self.get(index).ok_or(AccessError::InvalidSegment {
            index,
            count: self.segments.len(),
        })?;
        if offset >= segment.limit {
            return Err(AccessError::OffsetOutOfBounds {
                segment: index,
                offset,
                limit: segment.limit,
            });
        }
        Ok(segment.base + offset)
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Bytes covered by some segment; everything past this is unreachable.
    pub fn addressable_bytes(&self) -> usize {
        self.segments.iter().map(|s| s.limit).sum()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_segments() -> SegmentTable {
        SegmentTable::new(1024, &["code", "data", "stack"])
    }

    #[test]
    fn test_equal_split_with_remainder() {
        let table = three_segments();
        assert_eq!(table.len(), 3);

        let bases: Vec<usize> = table.iter().map(|s| s.base).collect();
        assert_eq!(bases, vec![0, 341, 682]);
        assert!(table.iter().all(|s| s.limit == 341));

        // 1024 - 3 * 341 = 1 trailing byte nobody owns
        assert_eq!(table.addressable_bytes(), 1023);
    }

    #[test]
    fn test_resolve_adds_base() {
        let table = three_segments();
        assert_eq!(table.resolve(0, 0), Ok(0));
        assert_eq!(table.resolve(1, 10), Ok(351));
        assert_eq!(table.resolve(2, 340), Ok(1022));
    }

    #[test]
    fn test_resolve_limit_boundary() {
        let table = three_segments();
        assert_eq!(table.resolve(1, 340), Ok(681));
        assert_eq!(
            table.resolve(1, 341),
            Err(AccessError::OffsetOutOfBounds {
                segment: 1,
                offset: 341,
                limit: 341
            })
        );
    }

    #[test]
    fn test_resolve_invalid_segment() {
        let table = three_segments();
        assert_eq!(
            table.resolve(3, 0),
            Err(AccessError::InvalidSegment { index: 3, count: 3 })
        );
    }

    #[test]
    fn test_empty_names_get_defaults() {
        let table = SegmentTable::new(100, &["heap", "", "  "]);
        let names: Vec<&str> = table.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["heap", "Segment1", "Segment2"]);
    }

    #[test]
    fn test_display() {
        let table = three_segments();
        let line = format!("{}", table.get(1).unwrap());
        assert_eq!(line, "data: Base = 341, Limit = 341");
    }
}
