//! Process-wide registry instance

use std::sync::Arc;

use lazy_static::lazy_static;
use log::info;

use super::manager::TopicRegistry;

lazy_static! {
    static ref GLOBAL_REGISTRY: Arc<TopicRegistry> = {
        let registry = TopicRegistry::new();
        info!("[{}] process-wide topic registry initialized", registry.config().name);
        Arc::new(registry)
    };
}

impl TopicRegistry {
    /// Shared process-wide registry
    ///
    /// Built with the default configuration on first call and never torn
    /// down. Prefer passing an explicit `Arc<TopicRegistry>` where the
    /// caller controls construction; this exists for code that, like the C
    /// API, has no way to thread a registry through.
    pub fn global() -> Arc<TopicRegistry> {
        Arc::clone(&GLOBAL_REGISTRY)
    }
}
