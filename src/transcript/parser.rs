use super::TimedTextSegment;
use crate::error::{Result, YttextError};
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Matches one `<text start=".." dur="..">payload</text>` cue. The payload is
/// taken literally, nested markup included.
static CUE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<text start="([^"]*)" dur="([^"]*)"[^>]*>(.*?)</text>"#)
        .expect("cue regex is valid")
});

/// Entities undone in cue text, applied in this order and no others.
const ENTITIES: [(&str, &str); 5] = [
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
];

/// Parse a timedtext caption body into segments, preserving cue order.
///
/// Cues whose start or duration is not a non-negative number are dropped.
/// Fails with `NoTranscriptText` when no cue is present at all, and with
/// `ParseFailure` when every cue was dropped.
pub fn parse_caption_body(body: &str) -> Result<Vec<TimedTextSegment>> {
    let mut matched = 0usize;
    let mut segments = Vec::new();

    for caps in CUE_REGEX.captures_iter(body) {
        matched += 1;

        let (Some(start), Some(duration)) = (parse_seconds(&caps[1]), parse_seconds(&caps[2]))
        else {
            debug!("Dropping cue with start={:?} dur={:?}", &caps[1], &caps[2]);
            continue;
        };

        segments.push(TimedTextSegment::new(unescape(&caps[3]), start, duration));
    }

    if matched == 0 {
        return Err(YttextError::NoTranscriptText);
    }
    if segments.is_empty() {
        return Err(YttextError::ParseFailure);
    }
    if segments.len() < matched {
        warn!(
            "Dropped {} of {} cues with unparsable timing",
            matched - segments.len(),
            matched
        );
    }

    Ok(segments)
}

fn parse_seconds(raw: &str) -> Option<f64> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

/// Undo the fixed entity set, in order.
pub fn unescape(text: &str) -> String {
    ENTITIES
        .iter()
        .fold(text.to_string(), |acc, (entity, literal)| {
            acc.replace(entity, literal)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_body() {
        let body = r#"<?xml version="1.0" encoding="utf-8" ?><transcript><text start="0.5" dur="2.1">Hello there</text><text start="2.6" dur="1.4">General Kenobi</text></transcript>"#;
        let segments = parse_caption_body(body).unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].text(), "Hello there");
        assert_eq!(segments[0].start(), 0.5);
        assert_eq!(segments[0].offset(), 0.5);
        assert_eq!(segments[0].duration(), 2.1);
        assert_eq!(segments[1].text(), "General Kenobi");
    }

    #[test]
    fn test_order_is_preserved() {
        let body = r#"<text start="5" dur="1">b</text><text start="1" dur="1">a</text>"#;
        let segments = parse_caption_body(body).unwrap();
        let texts: Vec<_> = segments.iter().map(|s| s.text()).collect();
        assert_eq!(texts, vec!["b", "a"]);
    }

    #[test]
    fn test_extra_attributes_are_ignored() {
        let body = r#"<text start="1.0" dur="2.0" foo="bar">x</text>"#;
        let segments = parse_caption_body(body).unwrap();
        assert_eq!(segments[0].text(), "x");
    }

    #[test]
    fn test_entities_are_unescaped() {
        let body =
            r#"<text start="0" dur="1">Tom &amp; Jerry &lt;3 &gt; &quot;cheese&quot; it&#39;s &nbsp;</text>"#;
        let segments = parse_caption_body(body).unwrap();
        assert_eq!(segments[0].text(), r#"Tom & Jerry <3 > "cheese" it's &nbsp;"#);
    }

    #[test]
    fn test_unescape_order() {
        // "&amp;lt;" becomes "&lt;" first, which the next step then turns into "<".
        assert_eq!(unescape("&amp;lt;"), "<");
        assert_eq!(unescape("&amp;#39;"), "'");
    }

    #[test]
    fn test_nested_markup_kept_literally() {
        let body = r##"<text start="0" dur="1"><font color="#E5E5E5">hi</font></text>"##;
        let segments = parse_caption_body(body).unwrap();
        assert_eq!(segments[0].text(), r##"<font color="#E5E5E5">hi</font>"##);
    }

    #[test]
    fn test_empty_payload_allowed() {
        let body = r#"<text start="3" dur="1"></text>"#;
        let segments = parse_caption_body(body).unwrap();
        assert_eq!(segments[0].text(), "");
    }

    #[test]
    fn test_no_cues_is_no_transcript_text() {
        assert!(matches!(
            parse_caption_body("<transcript></transcript>"),
            Err(YttextError::NoTranscriptText)
        ));
        assert!(matches!(
            parse_caption_body(""),
            Err(YttextError::NoTranscriptText)
        ));
    }

    #[test]
    fn test_all_unparsable_is_parse_failure() {
        let body = r#"<text start="abc" dur="1">x</text><text start="1" dur="">y</text>"#;
        assert!(matches!(
            parse_caption_body(body),
            Err(YttextError::ParseFailure)
        ));
    }

    #[test]
    fn test_bad_cues_are_dropped() {
        let body = r#"<text start="1.2.3" dur="1">bad</text><text start="4" dur="2">good</text><text start="-1" dur="1">neg</text>"#;
        let segments = parse_caption_body(body).unwrap();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text(), "good");
    }
}
