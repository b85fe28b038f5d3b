// SRT subtitle format
use super::TranscriptFormatter;
use crate::error::Result;
use crate::transcript::TimedTextSegment;

pub struct SrtFormatter;

impl TranscriptFormatter for SrtFormatter {
    fn format(&self, segments: &[TimedTextSegment]) -> Result<String> {
        Ok(segments
            .iter()
            .enumerate()
            .map(|(i, s)| {
                format!(
                    "{}\n{} --> {}\n{}\n\n",
                    i + 1,
                    format_timestamp(s.start()),
                    format_timestamp(s.end()),
                    s.text()
                )
            })
            .collect())
    }

    fn name(&self) -> &'static str {
        "srt"
    }
}

fn format_timestamp(seconds: f64) -> String {
    // Round to whole milliseconds so 3.05 renders as ,050 and not ,049.
    let total_millis = (seconds * 1000.0).round() as u64;
    let total_secs = total_millis / 1000;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let secs = total_secs % 60;
    let millis = total_millis % 1000;
    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis)
}
