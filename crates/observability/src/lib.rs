//! Process-wide tracing setup shared by the portal binaries.

/// Initialize tracing with the settings read from the environment.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    tracing::init(&tracing::LogSettings::from_env());
}

/// Subscriber configuration (filter, output format).
pub mod tracing;
