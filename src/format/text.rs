// Plain text with a [M:SS] or [H:MM:SS] prefix per line
use super::TranscriptFormatter;
use crate::error::Result;
use crate::transcript::TimedTextSegment;

pub struct TextFormatter;

impl TranscriptFormatter for TextFormatter {
    fn format(&self, segments: &[TimedTextSegment]) -> Result<String> {
        Ok(segments
            .iter()
            .map(|s| format!("[{}] {}\n", format_clock(s.start()), s.text()))
            .collect())
    }

    fn name(&self) -> &'static str {
        "text"
    }
}

fn format_clock(seconds: f64) -> String {
    // `as` saturates: negative and NaN become 0.
    let total_secs = seconds as u64;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let secs = total_secs % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}
