//! Locates caption tracks inside the watch page HTML.
//!
//! YouTube has no public API for this; the player response is embedded in the
//! page as JSON and we cut the `"captions"` object out of it by substring
//! markers. When the page layout changes, this is the file to fix.

use super::track::CaptionTrack;
use crate::error::{Result, YttextError};
use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde_json::Value;
use tracing::{debug, info};

/// Canonical watch page; the video ID goes in the `v` query parameter.
pub const WATCH_URL: &str = "https://www.youtube.com/watch";

const CAPTIONS_MARKER: &str = r#""captions":"#;
const VIDEO_DETAILS_MARKER: &str = r#","videoDetails"#;
const CAPTCHA_MARKER: &str = r#"class="g-recaptcha""#;
const PLAYABILITY_MARKER: &str = r#""playabilityStatus":"#;

/// Caption configuration cut out of a watch page.
#[derive(Debug, Clone)]
pub struct CaptionConfig {
    /// Usable track descriptors, in page order.
    pub tracks: Vec<CaptionTrack>,
    /// The `playerCaptionsTracklistRenderer` object as found on the page.
    pub raw: Value,
}

/// Source of caption track descriptors for a video.
#[async_trait]
pub trait TrackLocator: Send + Sync {
    async fn locate(&self, video_id: &str) -> Result<CaptionConfig>;
    fn name(&self) -> &'static str;
}

/// Scrapes the caption configuration from the public watch page.
pub struct WatchPageLocator {
    client: Client,
    watch_url: String,
    accept_language: String,
}

impl WatchPageLocator {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            watch_url: WATCH_URL.to_string(),
            accept_language: "en-US".to_string(),
        }
    }

    /// Point at a different watch endpoint (used by tests).
    pub fn with_watch_url(mut self, url: impl Into<String>) -> Self {
        self.watch_url = url.into();
        self
    }

    /// Locale requested from the page; English keeps the markers stable.
    pub fn with_accept_language(mut self, accept_language: impl Into<String>) -> Self {
        self.accept_language = accept_language.into();
        self
    }

    async fn fetch_page(&self, video_id: &str) -> Result<String> {
        let url = format!("{}?v={}", self.watch_url, video_id);
        debug!("Fetching watch page: {}", url);

        let response = self
            .client
            .get(&self.watch_url)
            .query(&[("v", video_id)])
            .header(header::ACCEPT_LANGUAGE, &self.accept_language)
            .send()
            .await
            .map_err(|e| YttextError::fetch(&url, e))?;

        let status = response.status();
        debug!("Watch page response status: {}", status);
        if status != StatusCode::OK {
            return Err(YttextError::fetch(
                &url,
                format!("video not found or not accessible (HTTP {})", status.as_u16()),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| YttextError::fetch(&url, e))?;
        debug!("Watch page is {} bytes", body.len());
        Ok(body)
    }
}

#[async_trait]
impl TrackLocator for WatchPageLocator {
    async fn locate(&self, video_id: &str) -> Result<CaptionConfig> {
        let html = self.fetch_page(video_id).await?;
        let config = extract_caption_config(&html, video_id)?;
        info!(
            "Found {} caption track(s) for {}",
            config.tracks.len(),
            video_id
        );
        Ok(config)
    }

    fn name(&self) -> &'static str {
        "YouTube watch page"
    }
}

/// Cut the caption configuration out of raw watch page HTML.
pub fn extract_caption_config(html: &str, video_id: &str) -> Result<CaptionConfig> {
    let Some((_, after_marker)) = html.split_once(CAPTIONS_MARKER) else {
        if html.contains(CAPTCHA_MARKER) {
            return Err(YttextError::RateLimited);
        }
        if !html.contains(PLAYABILITY_MARKER) {
            return Err(YttextError::VideoUnavailable(video_id.to_string()));
        }
        return Err(YttextError::CaptionsDisabled(video_id.to_string()));
    };

    let end = after_marker.find(VIDEO_DETAILS_MARKER).ok_or_else(|| {
        YttextError::Extraction("end of captions object not found".to_string())
    })?;
    let fragment = after_marker[..end].replace('\n', "");

    let mut captions: Value = serde_json::from_str(&fragment)
        .map_err(|e| YttextError::Extraction(e.to_string()))?;

    let renderer = match captions.get_mut("playerCaptionsTracklistRenderer") {
        Some(renderer) if renderer.is_object() => renderer.take(),
        _ => return Err(YttextError::CaptionsDisabled(video_id.to_string())),
    };

    // Only entries that are not JSON objects are skipped.
    let tracks = match renderer.get("captionTracks") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| serde_json::from_value::<CaptionTrack>(item.clone()).ok())
            .collect(),
        _ => return Err(YttextError::NoTranscriptAvailable(video_id.to_string())),
    };

    Ok(CaptionConfig {
        tracks,
        raw: renderer,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(captions: &str) -> String {
        format!(
            "<html><script>var ytInitialPlayerResponse = {{\"playabilityStatus\":{{\"status\":\"OK\"}},\"captions\":{},\"videoDetails\":{{\"videoId\":\"abc\"}}}};</script></html>",
            captions
        )
    }

    #[test]
    fn test_extracts_tracks() {
        let html = page(
            r#"{"playerCaptionsTracklistRenderer":{"captionTracks":[{"baseUrl":"https://example.com/en","languageCode":"en"},{"baseUrl":"https://example.com/de","languageCode":"de","kind":"asr"}]}}"#,
        );
        let config = extract_caption_config(&html, "abc").unwrap();
        assert_eq!(config.tracks.len(), 2);
        assert_eq!(config.tracks[0].language_code, "en");
        assert_eq!(config.tracks[1].base_url.as_deref(), Some("https://example.com/de"));
        assert!(config.raw.get("captionTracks").is_some());
    }

    #[test]
    fn test_fragment_spanning_lines() {
        let html = page(
            "{\"playerCaptionsTracklistRenderer\":\n{\"captionTracks\":[{\"baseUrl\":\"https://example.com/en\",\n\"languageCode\":\"en\"}]}}",
        );
        let config = extract_caption_config(&html, "abc").unwrap();
        assert_eq!(config.tracks.len(), 1);
    }

    #[test]
    fn test_escaped_base_url() {
        let html = page(
            r#"{"playerCaptionsTracklistRenderer":{"captionTracks":[{"baseUrl":"https://example.com/api?v=abc&lang=en","languageCode":"en"}]}}"#,
        );
        let config = extract_caption_config(&html, "abc").unwrap();
        assert_eq!(
            config.tracks[0].base_url.as_deref(),
            Some("https://example.com/api?v=abc&lang=en")
        );
    }

    #[test]
    fn test_non_object_tracks_skipped() {
        let html = page(
            r#"{"playerCaptionsTracklistRenderer":{"captionTracks":[42,{"baseUrl":"https://example.com/en","languageCode":"en"}]}}"#,
        );
        let config = extract_caption_config(&html, "abc").unwrap();
        assert_eq!(config.tracks.len(), 1);
    }

    #[test]
    fn test_wrong_typed_base_url_keeps_track() {
        let html = page(
            r#"{"playerCaptionsTracklistRenderer":{"captionTracks":[{"baseUrl":7,"languageCode":"en"},{"baseUrl":"https://example.com/de","languageCode":"de"}]}}"#,
        );
        let config = extract_caption_config(&html, "abc").unwrap();
        assert_eq!(config.tracks.len(), 2);
        assert_eq!(config.tracks[0].language_code, "en");
        assert!(config.tracks[0].base_url.is_none());
    }

    #[test]
    fn test_captcha_is_rate_limited() {
        let html = r#"<html><form><div class="g-recaptcha"></div></form></html>"#;
        assert!(matches!(
            extract_caption_config(html, "abc"),
            Err(YttextError::RateLimited)
        ));
    }

    #[test]
    fn test_missing_playability_is_unavailable() {
        let html = "<html>nothing to see</html>";
        assert!(matches!(
            extract_caption_config(html, "abc"),
            Err(YttextError::VideoUnavailable(id)) if id == "abc"
        ));
    }

    #[test]
    fn test_no_captions_marker_is_disabled() {
        let html = r#"{"playabilityStatus":{"status":"OK"},"videoDetails":{}}"#;
        assert!(matches!(
            extract_caption_config(html, "abc"),
            Err(YttextError::CaptionsDisabled(_))
        ));
    }

    #[test]
    fn test_missing_renderer_is_disabled() {
        let html = page(r#"{"somethingElse":{}}"#);
        assert!(matches!(
            extract_caption_config(&html, "abc"),
            Err(YttextError::CaptionsDisabled(_))
        ));
    }

    #[test]
    fn test_missing_track_list_is_no_transcript() {
        let html = page(r#"{"playerCaptionsTracklistRenderer":{"audioTracks":[]}}"#);
        assert!(matches!(
            extract_caption_config(&html, "abc"),
            Err(YttextError::NoTranscriptAvailable(_))
        ));
    }

    #[test]
    fn test_malformed_json_is_extraction_error() {
        let html = page(r#"{"playerCaptionsTracklistRenderer":{"captionTracks":[}"#);
        assert!(matches!(
            extract_caption_config(&html, "abc"),
            Err(YttextError::Extraction(_))
        ));
    }

    #[test]
    fn test_missing_end_marker_is_extraction_error() {
        let html = r#""playabilityStatus":{},"captions":{"playerCaptionsTracklistRenderer":{}}"#;
        assert!(matches!(
            extract_caption_config(html, "abc"),
            Err(YttextError::Extraction(_))
        ));
    }
}
