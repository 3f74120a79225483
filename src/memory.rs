/// One page table slot. `valid` is only ever set together with a frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageTableEntry {
    pub frame: Option<usize>,
    pub valid: bool,
}

impl PageTableEntry {
    /// Frame holding the page, if the page is resident.
    #[inline]
    pub fn resident_frame(&self) -> Option<usize> {
        if self.valid { self.frame } else { None }
    }
}

/// Page Table - page number -> (frame, valid), one entry per logical page
#[derive(Debug, Clone)]
pub struct PageTable {
    entries: Vec<PageTableEntry>,
}

impl PageTable {
    /// Create a page table with every page marked not present
    pub fn new(pages: usize) -> Self {
        PageTable {
            entries: vec![PageTableEntry::default(); pages],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn get(&self, page: usize) -> Option<&PageTableEntry> {
        self.entries.get(page)
    }

    #[inline]
    pub fn is_valid(&self, page: usize) -> bool {
        self.entries.get(page).is_some_and(|e| e.valid)
    }

    /// Record that `page` now lives in `frame`
    pub fn map(&mut self, page: usize, frame: usize) {
        self.entries[page] = PageTableEntry {
            frame: Some(frame),
            valid: true,
        };
    }

    /// Mark `page` not present. The stale frame number is kept, as a real
    /// PTE would; only `valid` is authoritative.
    pub fn invalidate(&mut self, page: usize) {
        self.entries[page].valid = false;
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &PageTableEntry)> {
        self.entries.iter().enumerate()
    }
}

/// Frame Table - physical frame -> occupying page
#[derive(Debug, Clone)]
pub struct FrameTable {
    frames: Vec<Option<usize>>,
}

impl FrameTable {
    /// Create a frame table with every frame empty
    pub fn new(frames: usize) -> Self {
        FrameTable {
            frames: vec![None; frames],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[inline]
    pub fn get(&self, frame: usize) -> Option<usize> {
        self.frames.get(frame).copied().flatten()
    }

    /// Lowest-numbered empty frame
    pub fn first_free(&self) -> Option<usize> {
        self.frames.iter().position(Option::is_none)
    }

    pub fn occupy(&mut self, frame: usize, page: usize) {
        self.frames[frame] = Some(page);
    }

    pub fn release(&mut self, frame: usize) {
        self.frames[frame] = None;
    }

    pub fn occupied_count(&self) -> usize {
        self.frames.iter().filter(|f| f.is_some()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, Option<usize>)> + '_ {
        self.frames.iter().copied().enumerate()
    }
}

/// Calculate the starting address of a frame
#[inline]
pub fn frame_to_address(frame: usize, page_size: usize) -> usize {
    frame * page_size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_table_initialization() {
        let pt = PageTable::new(16);
        assert_eq!(pt.len(), 16);
        // Nothing resident yet
        assert!(pt.iter().all(|(_, e)| !e.valid && e.frame.is_none()));
        assert!(!pt.is_valid(0));
        assert!(!pt.is_valid(16)); // out of range is simply not valid
    }

    #[test]
    fn test_page_table_map_and_invalidate() {
        let mut pt = PageTable::new(8);
        pt.map(5, 2);
        assert!(pt.is_valid(5));
        assert_eq!(pt.get(5).unwrap().resident_frame(), Some(2));

        pt.invalidate(5);
        assert!(!pt.is_valid(5));
        assert_eq!(pt.get(5).unwrap().resident_frame(), None);
        // Stale frame survives invalidation
        assert_eq!(pt.get(5).unwrap().frame, Some(2));
    }

    #[test]
    fn test_frame_table_first_free() {
        let mut ft = FrameTable::new(3);
        assert_eq!(ft.first_free(), Some(0));

        ft.occupy(0, 7);
        ft.occupy(2, 9);
        assert_eq!(ft.first_free(), Some(1));
        assert_eq!(ft.occupied_count(), 2);

        ft.occupy(1, 4);
        assert_eq!(ft.first_free(), None);

        ft.release(2);
        assert_eq!(ft.first_free(), Some(2));
        assert_eq!(ft.get(0), Some(7));
        assert_eq!(ft.get(2), None);
    }

    #[test]
    fn test_frame_to_address() {
        assert_eq!(frame_to_address(0, 64), 0);
        assert_eq!(frame_to_address(1, 64), 64);
        assert_eq!(frame_to_address(4, 512), 2048);
        assert_eq!(frame_to_address(10, 512), 5120);
    }
}
