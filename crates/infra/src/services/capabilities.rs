use study_planner_domain::PlatformCapabilities;

/// Detection strategy for what the hosting platform supports.
/// Implementations are replaceable; delivery code only ever sees the
/// resulting `PlatformCapabilities`.
pub trait ICapabilityDetector {
    fn detect(&self) -> PlatformCapabilities;
}

/// Reads capabilities from the environment. Push scheduling
/// additionally requires a configured push gateway.
pub struct EnvCapabilityDetector {
    push_gateway_configured: bool,
}

impl EnvCapabilityDetector {
    pub fn new(push_gateway_configured: bool) -> Self {
        Self {
            push_gateway_configured,
        }
    }
}

fn env_flag(name: &str, default: bool) -> bool {
    match std::env::var(name) {
        Ok(value) => matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"),
        Err(_) => default,
    }
}

impl ICapabilityDetector for EnvCapabilityDetector {
    fn detect(&self) -> PlatformCapabilities {
        PlatformCapabilities {
            supports_push_scheduling: self.push_gateway_configured
                && env_flag("SUPPORTS_PERSISTENT_PUSH", true),
            supports_background_wake: env_flag("SUPPORTS_BACKGROUND_WAKE", false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_scheduling_requires_configured_gateway() {
        let capabilities = EnvCapabilityDetector::new(false).detect();
        assert!(!capabilities.supports_push_scheduling);
    }
}
