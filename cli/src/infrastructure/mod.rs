/// Layered configuration loading.
pub mod config;
/// Log subscriber setup.
pub mod telemetry;
