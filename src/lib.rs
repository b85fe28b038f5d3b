pub mod clipboard;
pub mod config;
pub mod error;
pub mod format;
pub mod transcript;

pub use config::Config;
pub use error::{Result, YttextError};
pub use format::{create_formatter, formatter_for_name, OutputFormat, TranscriptFormatter};
pub use transcript::{ExtractionRequest, TimedTextSegment, TranscriptClient};
