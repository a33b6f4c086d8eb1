//! Binding record layouts to topics

use bytemuck::Pod;

use super::descriptor::TopicDescriptor;

/// A plain-old-data record published under a fixed topic
///
/// The `Pod` bound guarantees the record can be viewed as exactly
/// `size_of::<Self>()` bytes and rebuilt from any byte pattern, which is
/// what the registry stores. `Default` seeds the cached record of a fresh
/// handle, so fields with non-zero initial values survive until the first
/// `set` or copy. Implement it with [`declare_topic!`] rather
/// than by hand so the descriptor size always matches the type.
///
/// [`declare_topic!`]: crate::declare_topic
pub trait TopicRecord: Pod + Default {
    /// Descriptor of the topic this record is published under
    const TOPIC: TopicDescriptor<'static>;
}

/// Bind a record type to a topic name
///
/// ```
/// use bytemuck::{Pod, Zeroable};
/// use monet::{declare_topic, topic::TopicRecord};
///
/// #[repr(C)]
/// #[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
/// struct Heading {
///     timestamp: u64,
///     degrees: f32,
///     _pad: u32,
/// }
///
/// declare_topic!(Heading, "heading");
///
/// assert_eq!(Heading::TOPIC.name(), "heading");
/// assert_eq!(Heading::TOPIC.size(), 16);
/// ```
#[macro_export]
macro_rules! declare_topic {
    ($record:ty, $name:expr) => {
        impl $crate::topic::TopicRecord for $record {
            const TOPIC: $crate::topic::TopicDescriptor<'static> =
                $crate::topic::TopicDescriptor::of::<$record>($name);
        }
    };
}
