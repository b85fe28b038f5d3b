pub mod json;
pub mod readable;
pub mod srt;
pub mod text;

use crate::error::{Result, YttextError};
use crate::transcript::TimedTextSegment;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Srt,
    Readable,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Srt => write!(f, "srt"),
            OutputFormat::Readable => write!(f, "readable"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = YttextError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "srt" => Ok(OutputFormat::Srt),
            "readable" => Ok(OutputFormat::Readable),
            _ => Err(YttextError::UnknownFormat(s.to_string())),
        }
    }
}

pub trait TranscriptFormatter {
    fn format(&self, segments: &[TimedTextSegment]) -> Result<String>;
    fn name(&self) -> &'static str;
}

pub fn create_formatter(format: OutputFormat) -> Box<dyn TranscriptFormatter> {
    match format {
        OutputFormat::Text => Box::new(text::TextFormatter),
        OutputFormat::Json => Box::new(json::JsonFormatter::default()),
        OutputFormat::Srt => Box::new(srt::SrtFormatter),
        OutputFormat::Readable => Box::new(readable::ReadableFormatter::default()),
    }
}

/// Look up a formatter by name; unknown names fail with `UnknownFormat`.
pub fn formatter_for_name(name: &str) -> Result<Box<dyn TranscriptFormatter>> {
    Ok(create_formatter(name.parse::<OutputFormat>()?))
}
