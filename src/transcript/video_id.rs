use crate::error::{Result, YttextError};
use url::Url;

const SHORT_LINK_HOST: &str = "youtu.be";
const CANONICAL_HOSTS: &[&str] = &["youtube.com", "www.youtube.com"];

/// Extract the video ID from a `youtu.be/<id>` or `youtube.com/watch?v=<id>` URL.
///
/// No network access happens here.
pub fn extract_video_id(video_url: &str) -> Result<String> {
    let invalid = || YttextError::InvalidUrl(video_url.to_string());

    let url = match Url::parse(video_url) {
        Ok(url) => url,
        // Scheme-less short link, e.g. `youtu.be/<id>`.
        Err(_) => {
            let rest = video_url
                .strip_prefix(SHORT_LINK_HOST)
                .and_then(|r| r.strip_prefix('/'))
                .ok_or_else(invalid)?;
            let id = rest.split(['?', '#']).next().unwrap_or_default();
            let id = id.rsplit('/').find(|s| !s.is_empty()).ok_or_else(invalid)?;
            return Ok(id.to_string());
        }
    };
    let host = url.host_str().ok_or_else(invalid)?;

    if host == SHORT_LINK_HOST {
        let id = url
            .path_segments()
            .and_then(|mut segs| segs.rfind(|s| !s.is_empty()))
            .ok_or_else(invalid)?;
        return Ok(id.to_string());
    }

    if CANONICAL_HOSTS.contains(&host) {
        if let Some((_, v)) = url.query_pairs().find(|(k, _)| k == "v") {
            if !v.is_empty() {
                return Ok(v.into_owned());
            }
        }
    }

    Err(invalid())
}
