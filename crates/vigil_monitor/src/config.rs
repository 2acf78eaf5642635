//! Configuration for tracked containers.

/// Configuration for a tracked container.
#[derive(Clone, Debug)]
pub struct MonitorConfig {
    /// Name used in log events and error context.
    pub label: Option<String>,

    /// Records to reserve room for in the change log up front.
    pub log_capacity: usize,

    /// Emit a trace event for every committed record.
    pub trace_mutations: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            label: None,
            log_capacity: 16,
            trace_mutations: false,
        }
    }
}

impl MonitorConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration that traces every committed record.
    #[must_use]
    pub fn traced() -> Self {
        Self {
            trace_mutations: true,
            ..Self::default()
        }
    }

    /// Builder method to set the label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Builder method to set the initial log capacity.
    #[must_use]
    pub fn with_log_capacity(mut self, capacity: usize) -> Self {
        self.log_capacity = capacity;
        self
    }

    /// Builder method to enable or disable per-record tracing.
    #[must_use]
    pub fn with_trace_mutations(mut self, trace: bool) -> Self {
        self.trace_mutations = trace;
        self
    }
}
