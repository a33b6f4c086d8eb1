//! Statistics for the topic registry

use std::sync::atomic::{AtomicU64, Ordering};

/// Registry-wide operation counters
#[derive(Debug, Default)]
pub struct RegistryStats {
    /// Topics created by a first advertisement
    pub topics_created: AtomicU64,
    /// Successful advertisements (including the creating one)
    pub advertisements: AtomicU64,
    /// Successful unadvertisements
    pub unadvertisements: AtomicU64,
    /// Successful publishes across all topics
    pub publishes: AtomicU64,
    /// Copies that wrote bytes to the caller
    pub copies: AtomicU64,
    /// Conditional copies skipped because the caller was current
    pub copies_skipped: AtomicU64,
    /// Operations rejected with an error
    pub rejected: AtomicU64,
}

/// Point-in-time copy of [`RegistryStats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistryStatsSnapshot {
    pub topics_created: u64,
    pub advertisements: u64,
    pub unadvertisements: u64,
    pub publishes: u64,
    pub copies: u64,
    pub copies_skipped: u64,
    pub rejected: u64,
}

impl RegistryStats {
    /// Create new statistics
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_created(&self) {
        self.topics_created.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_advertise(&self) {
        self.advertisements.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_unadvertise(&self) {
        self.unadvertisements.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_publish(&self) {
        self.publishes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_copy(&self, copied: bool) {
        if copied {
            self.copies.fetch_add(1, Ordering::Relaxed);
        } else {
            self.copies_skipped.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn record_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of advertisements not yet matched by an unadvertisement
    pub fn outstanding_advertisements(&self) -> u64 {
        let advertised = self.advertisements.load(Ordering::Relaxed);
        let unadvertised = self.unadvertisements.load(Ordering::Relaxed);
        advertised.saturating_sub(unadvertised)
    }

    /// Fraction of conditional reads that found fresh data
    pub fn copy_hit_ratio(&self) -> f64 {
        let copies = self.copies.load(Ordering::Relaxed);
        let skipped = self.copies_skipped.load(Ordering::Relaxed);
        let total = copies + skipped;
        if total == 0 {
            return 1.0;
        }

        copies as f64 / total as f64
    }

    /// Take a snapshot of all counters
    pub fn snapshot(&self) -> RegistryStatsSnapshot {
        RegistryStatsSnapshot {
            topics_created: self.topics_created.load(Ordering::Relaxed),
            advertisements: self.advertisements.load(Ordering::Relaxed),
            unadvertisements: self.unadvertisements.load(Ordering::Relaxed),
            publishes: self.publishes.load(Ordering::Relaxed),
            copies: self.copies.load(Ordering::Relaxed),
            copies_skipped: self.copies_skipped.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
        }
    }

    /// Reset all statistics
    pub fn reset(&self) {
        self.topics_created.store(0, Ordering::Relaxed);
        self.advertisements.store(0, Ordering::Relaxed);
        self.unadvertisements.store(0, Ordering::Relaxed);
        self.publishes.store(0, Ordering::Relaxed);
        self.copies.store(0, Ordering::Relaxed);
        self.copies_skipped.store(0, Ordering::Relaxed);
        self.rejected.store(0, Ordering::Relaxed);
    }
}
