// JSON array of segments
use super::TranscriptFormatter;
use crate::error::Result;
use crate::transcript::TimedTextSegment;

pub struct JsonFormatter {
    /// Two-space indentation when set.
    pub pretty: bool,
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl TranscriptFormatter for JsonFormatter {
    fn format(&self, segments: &[TimedTextSegment]) -> Result<String> {
        let output = if self.pretty {
            serde_json::to_string_pretty(segments)?
        } else {
            serde_json::to_string(segments)?
        };
        Ok(output)
    }

    fn name(&self) -> &'static str {
        "json"
    }
}
