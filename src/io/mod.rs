/// Command-line parsing and command orchestration
pub mod cli;
/// Named defaults and constants
pub mod configuration;
/// Error types
pub mod error;
/// Image file primitives
pub mod image;
/// Stage progress bars
pub mod progress;
