//! Core topic registry

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use log::{debug, trace, warn};

use crate::{
    error::{MonetError, Result},
    topic::{CopyOutcome, Generation, TopicDescriptor, TopicEntry},
};

use super::{config::RegistryConfig, stats::RegistryStats};

/// Entry slot shared between the map and in-flight operations
type EntrySlot = Arc<Mutex<TopicEntry>>;

/// Snapshot of one topic's bookkeeping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicInfo {
    /// Topic name
    pub name: String,
    /// Record size in bytes
    pub size: usize,
    /// Generation at the time of the snapshot
    pub generation: Generation,
    /// Active publishers at the time of the snapshot
    pub publisher_count: u32,
}

impl TopicInfo {
    /// Whether the topic had publishers when the snapshot was taken
    pub fn is_advertised(&self) -> bool {
        self.publisher_count > 0
    }
}

/// Table of topics keyed by name
///
/// The map sits behind an `RwLock` that is only held long enough to find
/// or insert an entry. Each entry has its own `Mutex`, and every per-topic
/// operation takes that mutex exactly once, so a publish (copy + generation
/// bump) is atomic for readers and topics never contend with each other.
///
/// Entries are created by the first advertisement of a name and kept for
/// the lifetime of the registry. Re-advertising a name reuses its buffer
/// and generation history. `RegistryConfig::max_topics` bounds the table
/// when names churn.
#[derive(Debug)]
pub struct TopicRegistry {
    /// Map of topic name to entry
    topics: RwLock<HashMap<String, EntrySlot>>,
    /// Registry configuration
    config: RegistryConfig,
    /// Operation counters
    stats: RegistryStats,
}

impl TopicRegistry {
    /// Create a registry with the default configuration
    pub fn new() -> Self {
        Self {
            topics: RwLock::new(HashMap::new()),
            config: RegistryConfig::default(),
            stats: RegistryStats::default(),
        }
    }

    /// Create a registry with a custom configuration
    pub fn with_config(config: RegistryConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            topics: RwLock::new(HashMap::new()),
            config,
            stats: RegistryStats::default(),
        })
    }

    /// True iff the topic exists and has at least one publisher
    pub fn is_advertised(&self, descriptor: &TopicDescriptor) -> bool {
        self.slot(descriptor.name())
            .is_some_and(|slot| lock_entry(&slot).is_advertised())
    }

    /// Register the caller as a publisher of `descriptor`
    ///
    /// Creates the topic with a zeroed buffer on first use. Returns the
    /// publisher count after the call.
    pub fn try_advertise(&self, descriptor: &TopicDescriptor) -> Result<u32> {
        let result = self.advertise_inner(descriptor);
        if result.is_ok() {
            self.stats.record_advertise();
        }
        self.settle("advertise", descriptor, result)
    }

    /// Boolean form of [`try_advertise`](Self::try_advertise)
    pub fn advertise(&self, descriptor: &TopicDescriptor) -> bool {
        self.try_advertise(descriptor).is_ok()
    }

    /// Release one publisher registration
    ///
    /// Returns the publisher count after the call. Fails without touching
    /// state when no publisher is active.
    pub fn try_unadvertise(&self, descriptor: &TopicDescriptor) -> Result<u32> {
        let result = match self.slot(descriptor.name()) {
            Some(slot) => lock_entry(&slot).remove_publisher(descriptor),
            None => Err(MonetError::unbalanced_unadvertise(descriptor.name())),
        };
        if result.is_ok() {
            self.stats.record_unadvertise();
        }
        self.settle("unadvertise", descriptor, result)
    }

    /// Boolean form of [`try_unadvertise`](Self::try_unadvertise)
    pub fn unadvertise(&self, descriptor: &TopicDescriptor) -> bool {
        self.try_unadvertise(descriptor).is_ok()
    }

    /// Overwrite the topic record with `data` and bump its generation
    ///
    /// Returns the new generation.
    pub fn try_publish(&self, descriptor: &TopicDescriptor, data: &[u8]) -> Result<Generation> {
        let result = self.with_entry(descriptor, |entry| entry.write(descriptor, data));
        if let Ok(generation) = result.as_ref() {
            trace!("published {} generation {}", descriptor.name(), generation);
            self.stats.record_publish();
        }
        self.settle("publish", descriptor, result)
    }

    /// Boolean form of [`try_publish`](Self::try_publish)
    pub fn publish(&self, descriptor: &TopicDescriptor, data: &[u8]) -> bool {
        self.try_publish(descriptor, data).is_ok()
    }

    /// Copy the topic record into `dst`
    ///
    /// With `only_if_updated`, a caller whose `generation` already matches
    /// the topic gets `CopyOutcome::UpToDate` and `dst` is left alone.
    /// Otherwise the bytes are copied and `generation` is set to the topic
    /// generation. On error `generation` is unchanged.
    pub fn try_copy(
        &self,
        descriptor: &TopicDescriptor,
        dst: &mut [u8],
        generation: &mut Generation,
        only_if_updated: bool,
    ) -> Result<CopyOutcome> {
        let result = self.with_entry(descriptor, |entry| {
            entry.read_into(descriptor, dst, generation, only_if_updated)
        });
        if let Ok(outcome) = result {
            self.stats.record_copy(outcome.copied());
        }
        self.settle("copy", descriptor, result)
    }

    /// Boolean form of [`try_copy`](Self::try_copy)
    pub fn copy(
        &self,
        descriptor: &TopicDescriptor,
        dst: &mut [u8],
        generation: &mut Generation,
        only_if_updated: bool,
    ) -> bool {
        self.try_copy(descriptor, dst, generation, only_if_updated)
            .is_ok()
    }

    /// Whether the topic has been published past `last_generation`
    pub fn try_updates_available(
        &self,
        descriptor: &TopicDescriptor,
        last_generation: Generation,
    ) -> Result<bool> {
        let result = self.with_entry(descriptor, |entry| {
            entry.has_updates(descriptor, last_generation)
        });
        self.settle("updates_available", descriptor, result)
    }

    /// Boolean form of [`try_updates_available`](Self::try_updates_available);
    /// any failure reads as "no updates"
    pub fn updates_available(
        &self,
        descriptor: &TopicDescriptor,
        last_generation: Generation,
    ) -> bool {
        self.try_updates_available(descriptor, last_generation)
            .unwrap_or(false)
    }

    /// Current generation of a topic, live or not
    pub fn generation(&self, descriptor: &TopicDescriptor) -> Option<Generation> {
        self.slot(descriptor.name())
            .map(|slot| lock_entry(&slot).generation())
    }

    /// Snapshot a topic by name
    pub fn topic_info(&self, topic_name: &str) -> Option<TopicInfo> {
        self.slot(topic_name)
            .map(|slot| snapshot(topic_name, &lock_entry(&slot)))
    }

    /// Snapshot every topic, sorted by name
    pub fn list_topics(&self) -> Vec<TopicInfo> {
        let slots: Vec<(String, EntrySlot)> = self
            .read_topics()
            .iter()
            .map(|(name, slot)| (name.clone(), Arc::clone(slot)))
            .collect();

        let mut infos: Vec<TopicInfo> = slots
            .iter()
            .map(|(name, slot)| snapshot(name, &lock_entry(slot)))
            .collect();
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        infos
    }

    /// Check if a topic has ever been advertised
    pub fn has_topic(&self, topic_name: &str) -> bool {
        self.read_topics().contains_key(topic_name)
    }

    /// Get topic count
    pub fn topic_count(&self) -> usize {
        self.read_topics().len()
    }

    /// Get registry statistics
    pub fn stats(&self) -> &RegistryStats {
        &self.stats
    }

    /// Get registry configuration
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    fn advertise_inner(&self, descriptor: &TopicDescriptor) -> Result<u32> {
        descriptor.validate()?;

        if let Some(slot) = self.slot(descriptor.name()) {
            return lock_entry(&slot).add_publisher(descriptor);
        }

        let mut topics = self.write_topics();

        // Another thread may have created it between the two lookups
        if let Some(slot) = topics.get(descriptor.name()) {
            return lock_entry(slot).add_publisher(descriptor);
        }

        if let Some(limit) = self.config.max_topics {
            if topics.len() >= limit {
                return Err(MonetError::topic_limit(limit));
            }
        }

        let entry = TopicEntry::allocate(descriptor, self.config.max_record_size)?;
        let publishers = entry.publisher_count();
        topics.insert(descriptor.name().to_string(), Arc::new(Mutex::new(entry)));
        self.stats.record_created();

        debug!("[{}] created topic {}", self.config.name, descriptor);

        Ok(publishers)
    }

    /// Run `f` on the locked entry for `descriptor`
    ///
    /// Unknown topics fail with `NotAdvertised`.
    fn with_entry<R>(
        &self,
        descriptor: &TopicDescriptor,
        f: impl FnOnce(&mut TopicEntry) -> Result<R>,
    ) -> Result<R> {
        let slot = self
            .slot(descriptor.name())
            .ok_or_else(|| MonetError::not_advertised(descriptor.name()))?;
        let mut entry = lock_entry(&slot);
        f(&mut *entry)
    }

    fn slot(&self, topic_name: &str) -> Option<EntrySlot> {
        self.read_topics().get(topic_name).cloned()
    }

    fn settle<T>(
        &self,
        operation: &str,
        descriptor: &TopicDescriptor,
        result: Result<T>,
    ) -> Result<T> {
        if let Err(ref err) = result {
            self.stats.record_rejected();
            debug!(
                "[{}] {} rejected for {}: {}",
                self.config.name,
                operation,
                descriptor.name(),
                err
            );
        }
        result
    }

    fn read_topics(&self) -> RwLockReadGuard<'_, HashMap<String, EntrySlot>> {
        self.topics.read().unwrap_or_else(|poisoned| {
            warn!("[{}] topic map lock poisoned, recovering", self.config.name);
            poisoned.into_inner()
        })
    }

    fn write_topics(&self) -> RwLockWriteGuard<'_, HashMap<String, EntrySlot>> {
        self.topics.write().unwrap_or_else(|poisoned| {
            warn!("[{}] topic map lock poisoned, recovering", self.config.name);
            poisoned.into_inner()
        })
    }
}

impl Default for TopicRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// Entry methods validate sizes before touching the buffer, so a panic
// under this lock cannot leave a half-written record behind.
fn lock_entry(slot: &Mutex<TopicEntry>) -> MutexGuard<'_, TopicEntry> {
    slot.lock().unwrap_or_else(|poisoned| {
        warn!("topic entry lock poisoned, recovering");
        poisoned.into_inner()
    })
}

fn snapshot(name: &str, entry: &TopicEntry) -> TopicInfo {
    TopicInfo {
        name: name.to_string(),
        size: entry.size(),
        generation: entry.generation(),
        publisher_count: entry.publisher_count(),
    }
}
