//! Process-wide tracing setup.

/// Tracing subscriber configuration (filters, formatting).
pub mod tracing;

/// Initialize tracing for the process with the default filter.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(tracing::DEFAULT_FILTER);
}
