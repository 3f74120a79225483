use std::fmt;

/// Access and fault counters. Only ever grow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    accesses: u64,
    page_faults: u64,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, access: bool, fault: bool) {
        if access {
            self.accesses += 1;
        }
        if fault {
            self.page_faults += 1;
        }
    }

    #[inline]
    pub fn accesses(&self) -> u64 {
        self.accesses
    }

    #[inline]
    pub fn page_faults(&self) -> u64 {
        self.page_faults
    }

    /// Faults per hundred accesses; `None` before the first access.
    pub fn fault_rate(&self) -> Option<f64> {
        if self.accesses == 0 {
            return None;
        }
        Some(100.0 * self.page_faults as f64 / self.accesses as f64)
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total accesses: {}", self.accesses)?;
        write!(f, "Page faults: {}", self.page_faults)?;
        if let Some(rate) = self.fault_rate() {
            write!(f, "\nPage fault rate: {:.2}%", rate)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_rate_undefined_without_accesses() {
        let stats = Stats::new();
        assert_eq!(stats.fault_rate(), None);
        assert!(!stats.to_string().contains("rate"));
    }

    #[test]
    fn test_fault_rate_all_faults() {
        let mut stats = Stats::new();
        for _ in 0..4 {
            stats.record(true, true);
        }
        assert_eq!(stats.fault_rate(), Some(100.0));
    }

    #[test]
    fn test_record_and_display() {
        let mut stats = Stats::new();
        stats.record(true, true);
        stats.record(true, false);
        stats.record(true, false);
        assert_eq!(stats.accesses(), 3);
        assert_eq!(stats.page_faults(), 1);

        let text = stats.to_string();
        assert!(text.contains("Total accesses: 3"));
        assert!(text.contains("Page fault rate: 33.33%"));
    }
}
