use log::{debug, info, warn};

use crate::error::{AccessError, ConfigError};
use crate::memory::{FrameTable, PageTable, PageTableEntry, frame_to_address};
use crate::replacement::{PolicyKind, ReplacementPolicy};
use crate::segment::{Segment, SegmentTable};
use crate::stats::Stats;
use crate::translation::{LogicalAddress, Translation, TranslationResult};

/// Parameters for building a [`VMManager`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerConfig {
    pub memory_size: usize,
    pub page_size: usize,
    pub segment_names: Vec<String>,
    pub policy: PolicyKind,
    /// Physical frames; defaults to one per logical page
    pub frames: Option<usize>,
    /// Reject sizes that leave remainder bytes instead of dropping them
    pub strict: bool,
}

impl ManagerConfig {
    pub fn new<S: AsRef<str>>(
        memory_size: usize,
        page_size: usize,
        segment_names: &[S],
        policy: PolicyKind,
    ) -> Self {
        ManagerConfig {
            memory_size,
            page_size,
            segment_names: segment_names.iter().map(|s| s.as_ref().to_string()).collect(),
            policy,
            frames: None,
            strict: false,
        }
    }

    pub fn with_frames(mut self, frames: usize) -> Self {
        self.frames = Some(frames);
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Check the configuration, returning (pages, frames)
    pub fn validate(&self) -> Result<(usize, usize), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        if self.segment_names.is_empty() {
            return Err(ConfigError::NoSegments);
        }

        let pages = self.memory_size / self.page_size;
        if pages == 0 {
            return Err(ConfigError::NoFrames {
                memory_size: self.memory_size,
                page_size: self.page_size,
            });
        }

        if self.memory_size % self.page_size != 0 {
            if self.strict {
                return Err(ConfigError::UnevenPageSplit {
                    memory_size: self.memory_size,
                    page_size: self.page_size,
                });
            }
            warn!(
                "memory size {} is not a multiple of page size {}; {} trailing bytes are unaddressable",
                self.memory_size,
                self.page_size,
                self.memory_size % self.page_size
            );
        }

        let segments = self.segment_names.len();
        if self.memory_size % segments != 0 {
            if self.strict {
                return Err(ConfigError::UnevenSegmentSplit {
                    memory_size: self.memory_size,
                    segments,
                });
            }
            warn!(
                "memory size {} does not split evenly into {} segments; {} trailing bytes are unaddressable",
                self.memory_size,
                segments,
                self.memory_size % segments
            );
        }

        let frames = self.frames.unwrap_or(pages);
        if frames == 0 {
            return Err(ConfigError::NoFrames {
                memory_size: self.memory_size,
                page_size: self.page_size,
            });
        }
        if frames > pages {
            return Err(ConfigError::TooManyFrames { frames, pages });
        }

        Ok((pages, frames))
    }
}

/// One row of the page table listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMapping {
    pub page: usize,
    pub frame: Option<usize>,
    pub valid: bool,
}

/// One row of the frame table listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSlot {
    pub frame: usize,
    pub page: Option<usize>,
}

/// Segmented, demand-paged address space with a single replacement policy.
///
/// Owns every table; all state changes go through [`VMManager::access`].
pub struct VMManager {
    page_size: usize,
    segments: SegmentTable,
    page_table: PageTable,
    frame_table: FrameTable,
    policy: Box<dyn ReplacementPolicy>,
    stats: Stats,
}

impl VMManager {
    pub fn new<S: AsRef<str>>(
        memory_size: usize,
        page_size: usize,
        segment_names: &[S],
        policy: PolicyKind,
    ) -> Result<Self, ConfigError> {
        Self::with_config(&ManagerConfig::new(memory_size, page_size, segment_names, policy))
    }

    pub fn with_config(config: &ManagerConfig) -> Result<Self, ConfigError> {
        let (pages, frames) = config.validate()?;
        let segments = SegmentTable::new(config.memory_size, config.segment_names.as_slice());

        info!(
            "VM manager: {} bytes, page size {}, {} pages, {} frames, {} segments, {} replacement",
            config.memory_size,
            config.page_size,
            pages,
            frames,
            segments.len(),
            config.policy
        );

        Ok(VMManager {
            page_size: config.page_size,
            segments,
            page_table: PageTable::new(pages),
            frame_table: FrameTable::new(frames),
            policy: config.policy.build(),
            stats: Stats::new(),
        })
    }

    /// Translate (segment, offset) to a physical address, loading the page
    /// on a fault. Rejected accesses leave every table and counter untouched.
    pub fn access(&mut self, segment: usize, offset: usize) -> TranslationResult {
        let logical = self.segments.resolve(segment, offset)?;
        let la = LogicalAddress::from_raw(logical, self.page_size);

        // only reachable when memory_size is not a multiple of page_size
        if la.page >= self.page_table.len() {
            let base = self.segments.get(segment).map_or(0, |s| s.base);
            return Err(AccessError::OffsetOutOfBounds {
                segment,
                offset,
                limit: (self.page_table.len() * self.page_size).saturating_sub(base),
            });
        }

        let resident = self
            .page_table
            .get(la.page)
            .and_then(PageTableEntry::resident_frame);
        let faulted = resident.is_none();
        let frame = match resident {
            Some(frame) => frame,
            None => self.handle_fault(la.page)?,
        };

        self.stats.record(true, faulted);
        self.policy.on_access(la.page);

        let physical_address = frame_to_address(frame, self.page_size) + la.offset;
        debug!(
            "segment {} offset {}: {} -> frame {} -> PA {}{}",
            segment,
            offset,
            la,
            frame,
            physical_address,
            if faulted { " [page fault]" } else { "" }
        );

        Ok(Translation {
            segment,
            segment_offset: offset,
            logical_address: la.address,
            page: la.page,
            page_offset: la.offset,
            frame,
            physical_address,
            faulted,
        })
    }

    /// Load `page` into the lowest free frame, evicting the policy's victim
    /// when none is free. Returns the frame used.
    fn handle_fault(&mut self, page: usize) -> Result<usize, AccessError> {
        let frame = match self.frame_table.first_free() {
            Some(frame) => {
                debug!("page {}: using free frame {}", page, frame);
                frame
            }
            None => {
                let victim = self
                    .policy
                    .select_victim()
                    .ok_or(AccessError::FrameExhausted { page })?;
                let frame = self
                    .page_table
                    .get(victim)
                    .and_then(PageTableEntry::resident_frame)
                    .ok_or(AccessError::FrameExhausted { page })?;
                self.page_table.invalidate(victim);
                self.frame_table.release(frame);
                debug!(
                    "{} evicted page {} from frame {}",
                    self.policy.kind(),
                    victim,
                    frame
                );
                frame
            }
        };

        self.page_table.map(page, frame);
        self.frame_table.occupy(frame, page);
        self.policy.on_load(page);
        info!("page fault: loaded page {} into frame {}", page, frame);
        Ok(frame)
    }

    pub fn list_segments(&self) -> Vec<(usize, &Segment)> {
        self.segments.iter().enumerate().collect()
    }

    pub fn list_page_table(&self) -> Vec<PageMapping> {
        self.page_table
            .iter()
            .map(|(page, entry)| PageMapping {
                page,
                frame: entry.resident_frame(),
                valid: entry.valid,
            })
            .collect()
    }

    pub fn list_frames(&self) -> Vec<FrameSlot> {
        self.frame_table
            .iter()
            .map(|(frame, page)| FrameSlot { frame, page })
            .collect()
    }

    #[inline]
    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Resident pages in the policy's order, next victim last
    pub fn resident_pages(&self) -> Vec<usize> {
        self.policy.resident()
    }

    #[inline]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    #[inline]
    pub fn page_count(&self) -> usize {
        self.page_table.len()
    }

    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frame_table.len()
    }

    #[inline]
    pub fn policy_kind(&self) -> PolicyKind {
        self.policy.kind()
    }

    pub fn segments(&self) -> &SegmentTable {
        &self.segments
    }

    /// Page table and frame table agree in both directions, and the policy
    /// tracks exactly the resident pages.
    pub fn is_consistent(&self) -> bool {
        let pages_ok = self.page_table.iter().all(|(page, entry)| match entry.resident_frame() {
            Some(frame) => self.frame_table.get(frame) == Some(page),
            None => !entry.valid,
        });
        let frames_ok = self.frame_table.iter().all(|(frame, page)| match page {
            Some(page) => self
                .page_table
                .get(page)
                .and_then(PageTableEntry::resident_frame)
                == Some(frame),
            None => true,
        });

        let mut tracked = self.policy.resident();
        tracked.sort_unstable();
        let mut resident: Vec<usize> = self
            .page_table
            .iter()
            .filter(|(_, e)| e.valid)
            .map(|(page, _)| page)
            .collect();
        resident.sort_unstable();

        pages_ok
            && frames_ok
            && resident.len() <= self.frame_table.len()
            && resident.len() == self.frame_table.occupied_count()
            && tracked == resident
    }
}
