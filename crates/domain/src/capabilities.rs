use serde::{Deserialize, Serialize};

/// What the hosting platform can do for reminder delivery.
///
/// Resolved once at startup by a capability detector. Delivery code
/// branches on these flags instead of sniffing the platform itself.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlatformCapabilities {
    /// The push service can deliver scheduled notifications even when
    /// the application process is not running
    pub supports_push_scheduling: bool,
    /// The host wakes the process periodically in the background, so
    /// evaluation can run on a relaxed interval
    pub supports_background_wake: bool,
}

impl PlatformCapabilities {
    /// Most constrained platform: no push delivery and no background
    /// wake-ups, so everything rides on frequent foreground polling
    pub fn polling_only() -> Self {
        Self {
            supports_push_scheduling: false,
            supports_background_wake: false,
        }
    }
}

impl Default for PlatformCapabilities {
    fn default() -> Self {
        Self::polling_only()
    }
}
