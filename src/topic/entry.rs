//! Per-topic storage owned by the registry
//!
//! Every method here assumes the caller holds the lock guarding the entry.
//! The registry only hands out entries through their `Mutex`, so holding a
//! `&TopicEntry` is proof enough; nothing in this module locks.

use crate::error::{MonetError, Result};

use super::descriptor::TopicDescriptor;

/// Generation counter type
pub type Generation = u64;

/// Outcome of a successful copy out of a topic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// Bytes were copied and the caller generation advanced
    Copied(Generation),
    /// Caller was already current; destination untouched
    UpToDate(Generation),
}

impl CopyOutcome {
    /// Generation the caller holds after the call
    pub fn generation(&self) -> Generation {
        match *self {
            CopyOutcome::Copied(generation) | CopyOutcome::UpToDate(generation) => generation,
        }
    }

    /// Whether bytes were written to the destination
    pub fn copied(&self) -> bool {
        matches!(self, CopyOutcome::Copied(_))
    }
}

/// Storage and bookkeeping for one topic
#[derive(Debug)]
pub struct TopicEntry {
    /// Record storage, exactly `size` bytes once allocated
    buffer: Option<Box<[u8]>>,
    /// Byte length fixed at creation
    size: usize,
    /// Bumped once per successful publish
    generation: Generation,
    /// Number of active advertisers
    publisher_count: u32,
}

impl TopicEntry {
    /// Allocate a zeroed entry for `descriptor` with one publisher
    ///
    /// Allocation goes through `try_reserve_exact`, so an allocator refusal
    /// surfaces as `AllocationFailure` instead of aborting the process.
    pub fn allocate(descriptor: &TopicDescriptor, max_record_size: usize) -> Result<Self> {
        let size = descriptor.size();
        if size > max_record_size {
            return Err(MonetError::allocation_failure(descriptor.name(), size));
        }

        let mut storage = Vec::new();
        storage
            .try_reserve_exact(size)
            .map_err(|_| MonetError::allocation_failure(descriptor.name(), size))?;
        storage.resize(size, 0u8);

        Ok(Self {
            buffer: Some(storage.into_boxed_slice()),
            size,
            generation: 0,
            publisher_count: 1,
        })
    }

    /// Live iff at least one publisher is advertising
    pub fn is_advertised(&self) -> bool {
        self.publisher_count > 0
    }

    /// Record size in bytes
    pub fn size(&self) -> usize {
        self.size
    }

    /// Current generation
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Current publisher count
    pub fn publisher_count(&self) -> u32 {
        self.publisher_count
    }

    /// Register one more publisher
    pub fn add_publisher(&mut self, descriptor: &TopicDescriptor) -> Result<u32> {
        self.check_size(descriptor)?;
        self.publisher_count = self
            .publisher_count
            .checked_add(1)
            .ok_or_else(|| MonetError::publisher_overflow(descriptor.name()))?;
        Ok(self.publisher_count)
    }

    /// Release one publisher; rejected when none are active
    pub fn remove_publisher(&mut self, descriptor: &TopicDescriptor) -> Result<u32> {
        if !self.is_advertised() {
            return Err(MonetError::unbalanced_unadvertise(descriptor.name()));
        }

        self.publisher_count -= 1;
        Ok(self.publisher_count)
    }

    /// Overwrite the record and bump the generation
    pub fn write(&mut self, descriptor: &TopicDescriptor, data: &[u8]) -> Result<Generation> {
        self.check_live(descriptor)?;

        if data.len() != self.size {
            return Err(MonetError::copy_failure(descriptor.name(), self.size, data.len()));
        }

        let buffer = self
            .buffer
            .as_deref_mut()
            .ok_or_else(|| MonetError::uninitialized_buffer(descriptor.name()))?;
        buffer.copy_from_slice(data);
        self.generation += 1;

        Ok(self.generation)
    }

    /// Copy the record into `dst`, skipping the copy when `only_if_updated`
    /// and the caller already holds the current generation
    ///
    /// `generation` is only written when bytes are actually copied.
    pub fn read_into(
        &self,
        descriptor: &TopicDescriptor,
        dst: &mut [u8],
        generation: &mut Generation,
        only_if_updated: bool,
    ) -> Result<CopyOutcome> {
        let buffer = self.readable(descriptor)?;

        if dst.len() != self.size {
            return Err(MonetError::copy_failure(descriptor.name(), self.size, dst.len()));
        }

        if only_if_updated && *generation == self.generation {
            return Ok(CopyOutcome::UpToDate(self.generation));
        }

        dst.copy_from_slice(buffer);
        *generation = self.generation;

        Ok(CopyOutcome::Copied(self.generation))
    }

    /// Whether the topic moved past `last_generation`
    pub fn has_updates(
        &self,
        descriptor: &TopicDescriptor,
        last_generation: Generation,
    ) -> Result<bool> {
        self.readable(descriptor)?;
        Ok(self.generation > last_generation)
    }

    fn readable(&self, descriptor: &TopicDescriptor) -> Result<&[u8]> {
        self.check_live(descriptor)?;
        self.buffer
            .as_deref()
            .ok_or_else(|| MonetError::uninitialized_buffer(descriptor.name()))
    }

    fn check_live(&self, descriptor: &TopicDescriptor) -> Result<()> {
        if !self.is_advertised() {
            return Err(MonetError::not_advertised(descriptor.name()));
        }
        self.check_size(descriptor)
    }

    fn check_size(&self, descriptor: &TopicDescriptor) -> Result<()> {
        if descriptor.size() != self.size {
            return Err(MonetError::size_mismatch(
                descriptor.name(),
                self.size,
                descriptor.size(),
            ));
        }
        Ok(())
    }
}
