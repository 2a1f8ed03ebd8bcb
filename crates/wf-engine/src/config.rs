//! Configuration for the command dispatcher.

/// Default capacity of the event log.
pub const DEFAULT_LOG_CAPACITY: usize = 200;

/// Default tag appended to messages that reach an ending.
pub const DEFAULT_END_MARKER: &str = "[END]";

/// Configuration for a dispatcher.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Maximum number of event log entries kept (oldest are evicted first).
    pub log_capacity: usize,
    /// Tag appended to arrival messages at end locations and to game-ending gifts.
    pub end_marker: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_capacity: DEFAULT_LOG_CAPACITY,
            end_marker: DEFAULT_END_MARKER.to_string(),
        }
    }
}

impl EngineConfig {
    /// Set the event log capacity (at least 1).
    pub fn with_log_capacity(mut self, capacity: usize) -> Self {
        self.log_capacity = capacity.max(1);
        self
    }

    /// Set the end marker.
    pub fn with_end_marker(mut self, marker: impl Into<String>) -> Self {
        self.end_marker = marker.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.log_capacity, 200);
        assert_eq!(cfg.end_marker, "[END]");
    }

    #[test]
    fn builder_methods() {
        let cfg = EngineConfig::default()
            .with_log_capacity(10)
            .with_end_marker("(fin)");
        assert_eq!(cfg.log_capacity, 10);
        assert_eq!(cfg.end_marker, "(fin)");
    }

    #[test]
    fn capacity_never_zero() {
        let cfg = EngineConfig::default().with_log_capacity(0);
        assert_eq!(cfg.log_capacity, 1);
    }
}
