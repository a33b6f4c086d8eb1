//! Publisher and Subscriber handles for typed topic access

use std::sync::Arc;

use crate::{
    error::Result,
    topic::{CopyOutcome, Generation, TopicDescriptor, TopicRecord},
};

use super::manager::TopicRegistry;

/// Producer handle for a record type
///
/// Advertises on construction and unadvertises on drop. Each handle holds
/// at most one advertisement, so two handles on the same topic model two
/// producers sharing it.
#[derive(Debug)]
pub struct Publisher<T: TopicRecord> {
    registry: Arc<TopicRegistry>,
    advertised: bool,
    data: T,
}

impl<T: TopicRecord> Publisher<T> {
    /// Create a publisher and advertise the topic
    ///
    /// Check [`advertised`](Self::advertised) to see whether the
    /// advertisement went through; `publish` retries it.
    pub fn new(registry: Arc<TopicRegistry>) -> Self {
        let mut publisher = Self {
            registry,
            advertised: false,
            data: T::default(),
        };
        publisher.advertise();
        publisher
    }

    /// Create a publisher on the process-wide registry
    pub fn global() -> Self {
        Self::new(TopicRegistry::global())
    }

    /// Descriptor of the topic this handle publishes
    pub fn topic(&self) -> TopicDescriptor<'static> {
        T::TOPIC
    }

    /// Whether this handle currently holds an advertisement
    pub fn advertised(&self) -> bool {
        self.advertised
    }

    /// Advertise the topic unless this handle already did
    pub fn advertise(&mut self) -> bool {
        if !self.advertised {
            self.advertised = self.registry.advertise(&T::TOPIC);
        }
        self.advertised
    }

    /// Drop this handle's advertisement
    ///
    /// Returns false if the handle holds none; it never releases an
    /// advertisement owned by another producer.
    pub fn unadvertise(&mut self) -> bool {
        if !self.advertised {
            return false;
        }

        if self.registry.unadvertise(&T::TOPIC) {
            self.advertised = false;
            true
        } else {
            false
        }
    }

    /// Publish a record, advertising first if needed
    pub fn publish(&mut self, record: &T) -> bool {
        self.try_publish(record).is_ok()
    }

    /// Publish a record and return the new generation
    pub fn try_publish(&mut self, record: &T) -> Result<Generation> {
        if !self.advertised {
            self.registry.try_advertise(&T::TOPIC)?;
            self.advertised = true;
        }

        self.registry
            .try_publish(&T::TOPIC, bytemuck::bytes_of(record))
    }

    /// Locally cached record
    pub fn get(&self) -> &T {
        &self.data
    }

    /// Replace the locally cached record
    pub fn set(&mut self, data: T) {
        self.data = data;
    }

    /// Publish the locally cached record
    pub fn update(&mut self) -> bool {
        let data = self.data;
        self.publish(&data)
    }

    /// Registry this handle publishes into
    pub fn registry(&self) -> &Arc<TopicRegistry> {
        &self.registry
    }
}

impl<T: TopicRecord> Drop for Publisher<T> {
    fn drop(&mut self) {
        let _ = self.unadvertise();
    }
}

/// Consumer handle for a record type
///
/// Keeps a cached record and the generation it was copied at. Subscribing
/// does not require the topic to be advertised yet; reads simply fail until
/// a publisher shows up, and the cache holds `T::default()` meanwhile.
#[derive(Debug)]
pub struct Subscriber<T: TopicRecord> {
    registry: Arc<TopicRegistry>,
    last_generation: Generation,
    data: T,
}

impl<T: TopicRecord> Subscriber<T> {
    /// Create a subscriber and seed its cache from the current record
    pub fn new(registry: Arc<TopicRegistry>) -> Self {
        let mut subscriber = Self {
            registry,
            last_generation: 0,
            data: T::default(),
        };

        // Topic may not be live yet; the cache then keeps its default
        let _ = subscriber.registry.copy(
            &T::TOPIC,
            bytemuck::bytes_of_mut(&mut subscriber.data),
            &mut subscriber.last_generation,
            false,
        );

        subscriber
    }

    /// Create a subscriber on the process-wide registry
    pub fn global() -> Self {
        Self::new(TopicRegistry::global())
    }

    /// Descriptor of the topic this handle reads
    pub fn topic(&self) -> TopicDescriptor<'static> {
        T::TOPIC
    }

    /// Whether any publisher is advertising the topic
    pub fn advertised(&self) -> bool {
        self.registry.is_advertised(&T::TOPIC)
    }

    /// Whether a publish happened since the last copy
    pub fn updated(&self) -> bool {
        self.registry
            .updates_available(&T::TOPIC, self.last_generation)
    }

    /// Refresh the cached record if the topic moved on
    ///
    /// True when the cache is current afterwards, copied or not.
    pub fn update(&mut self) -> bool {
        self.try_update().is_ok()
    }

    /// Refresh the cached record, reporting whether bytes were copied
    pub fn try_update(&mut self) -> Result<CopyOutcome> {
        self.registry.try_copy(
            &T::TOPIC,
            bytemuck::bytes_of_mut(&mut self.data),
            &mut self.last_generation,
            true,
        )
    }

    /// Copy the record into `dst` if the topic moved on
    ///
    /// Advances the handle's generation, so the cached record returned by
    /// [`get`](Self::get) is not refreshed by this call.
    pub fn update_into(&mut self, dst: &mut T) -> bool {
        self.registry.copy(
            &T::TOPIC,
            bytemuck::bytes_of_mut(dst),
            &mut self.last_generation,
            true,
        )
    }

    /// Copy the record into `dst` unconditionally
    pub fn copy_into(&mut self, dst: &mut T) -> bool {
        self.registry.copy(
            &T::TOPIC,
            bytemuck::bytes_of_mut(dst),
            &mut self.last_generation,
            false,
        )
    }

    /// Generation of the last copy
    pub fn last_generation(&self) -> Generation {
        self.last_generation
    }

    /// Cached record
    pub fn get(&self) -> &T {
        &self.data
    }

    /// Registry this handle reads from
    pub fn registry(&self) -> &Arc<TopicRegistry> {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use bytemuck::{Pod, Zeroable};

    use super::*;

    #[repr(C)]
    #[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
    struct Battery {
        voltage: f32,
        percent: u32,
    }

    crate::declare_topic!(Battery, "battery");

    #[test]
    fn test_publisher_drop_releases_advertisement() {
        let registry = Arc::new(TopicRegistry::new());
        {
            let publisher = Publisher::<Battery>::new(registry.clone());
            assert!(publisher.advertised());
            assert!(registry.is_advertised(&Battery::TOPIC));
        }
        assert!(!registry.is_advertised(&Battery::TOPIC));
        assert_eq!(registry.topic_info("battery").unwrap().publisher_count, 0);
    }

    #[test]
    fn test_double_unadvertise_does_not_steal() {
        let registry = Arc::new(TopicRegistry::new());
        let mut first = Publisher::<Battery>::new(registry.clone());
        let _second = Publisher::<Battery>::new(registry.clone());

        assert!(first.unadvertise());
        assert!(!first.unadvertise());
        assert!(registry.is_advertised(&Battery::TOPIC));
        assert_eq!(registry.topic_info("battery").unwrap().publisher_count, 1);
    }

    #[test]
    fn test_subscriber_seeds_cache() {
        let registry = Arc::new(TopicRegistry::new());
        let mut publisher = Publisher::<Battery>::new(registry.clone());
        publisher.set(Battery {
            voltage: 12.5,
            percent: 80,
        });
        assert!(publisher.update());

        let subscriber = Subscriber::<Battery>::new(registry);
        assert_eq!(subscriber.get().percent, 80);
        assert_eq!(subscriber.last_generation(), 1);
        assert!(!subscriber.updated());
    }
}
