/*
[INPUT]:  Public API exports for parasail-node-bot crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod config;
pub mod scheduler;
pub mod sink;

// Re-export main types for convenience
pub use config::{BotConfig, ConfigError, ConfigStore};
pub use scheduler::{ScheduleTiming, Scheduler};
pub use sink::{StatusSink, TracingSink};
