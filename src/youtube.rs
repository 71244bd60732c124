use std::sync::LazyLock;

use eyre::{Result, bail};
use log::{debug, warn};
use regex::Regex;
use serde::Deserialize;

use crate::cache::Cache;
use crate::dates::{DateStamp, VideoTimes, best_date};
use crate::metadata::{DateLookup, TITLE_PLACEHOLDER, TitleLookup};

const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

const OEMBED_URL: &str = "https://www.youtube.com/oembed";
const VIDEOS_API_URL: &str = "https://www.googleapis.com/youtube/v3/videos";

static META_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<meta\s+name="title"\s+content="([^"]*)""#).unwrap());

#[derive(Debug, Deserialize)]
struct OEmbedResponse {
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    snippet: Option<Snippet>,
    #[serde(rename = "liveStreamingDetails")]
    live_streaming_details: Option<LiveStreamingDetails>,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LiveStreamingDetails {
    #[serde(rename = "actualStartTime")]
    actual_start_time: Option<String>,
    #[serde(rename = "scheduledStartTime")]
    scheduled_start_time: Option<String>,
}

/// Title and date lookups backed by YouTube's public endpoints
pub struct YouTube {
    client: reqwest::Client,
    api_key: Option<String>,
    utc_offset_hours: i32,
    cache: Option<Cache>,
}

impl YouTube {
    pub fn new(client: reqwest::Client, api_key: Option<String>, utc_offset_hours: i32, cache: Option<Cache>) -> Self {
        Self {
            client,
            api_key,
            utc_offset_hours,
            cache,
        }
    }

    async fn oembed_title(&self, watch_url: &str) -> Result<String> {
        debug!("Fetching oEmbed title: {watch_url}");
        let resp: OEmbedResponse = self
            .client
            .get(OEMBED_URL)
            .query(&[("url", watch_url), ("format", "json")])
            .header("User-Agent", USER_AGENT)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        match resp.title.filter(|t| !t.trim().is_empty()) {
            Some(title) => Ok(title),
            None => bail!("oEmbed response has no title"),
        }
    }

    async fn watch_page_title(&self, watch_url: &str) -> Result<String> {
        debug!("Fetching watch page: {watch_url}");
        let page_html = self
            .client
            .get(watch_url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        extract_meta_title(&page_html)
    }

    async fn api_date(&self, api_key: &str, video_id: &str) -> Result<Option<DateStamp>> {
        debug!("Fetching video details for {video_id}");
        let resp: VideoListResponse = self
            .client
            .get(VIDEOS_API_URL)
            .query(&[
                ("part", "snippet,liveStreamingDetails"),
                ("id", video_id),
                ("key", api_key),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(resp
            .items
            .first()
            .and_then(|item| date_from_item(item, self.utc_offset_hours)))
    }
}

impl TitleLookup for YouTube {
    async fn fetch_title(&self, watch_url: &str) -> String {
        let key = format!("title-{watch_url}");
        if let Some(title) = self.cache.as_ref().and_then(|c| c.get::<String>(&key)) {
            return title;
        }

        let title = match self.oembed_title(watch_url).await {
            Ok(title) => title,
            Err(e) => {
                debug!("oEmbed lookup failed: {e}, trying watch page");
                match self.watch_page_title(watch_url).await {
                    Ok(title) => title,
                    Err(e) => {
                        warn!("Title lookup failed for {watch_url}: {e}");
                        return TITLE_PLACEHOLDER.to_string();
                    }
                }
            }
        };

        if let Some(cache) = &self.cache {
            if let Err(e) = cache.put(&key, &title) {
                warn!("Failed to cache title: {e}");
            }
        }
        title
    }
}

impl DateLookup for YouTube {
    async fn fetch_date(&self, video_id: &str) -> Option<DateStamp> {
        let api_key = self.api_key.as_deref()?;
        let key = format!("date-{video_id}-{}", self.utc_offset_hours);
        if let Some(date) = self.cache.as_ref().and_then(|c| c.get::<DateStamp>(&key)) {
            return Some(date);
        }

        let date = match self.api_date(api_key, video_id).await {
            Ok(date) => date?,
            Err(e) => {
                warn!("Date lookup failed for {video_id}: {e}");
                return None;
            }
        };

        if let Some(cache) = &self.cache {
            if let Err(e) = cache.put(&key, &date) {
                warn!("Failed to cache date: {e}");
            }
        }
        Some(date)
    }
}

fn date_from_item(item: &VideoItem, utc_offset_hours: i32) -> Option<DateStamp> {
    let live = item.live_streaming_details.as_ref();
    let times = VideoTimes {
        actual_start: live.and_then(|l| l.actual_start_time.as_deref()),
        scheduled_start: live.and_then(|l| l.scheduled_start_time.as_deref()),
        published: item.snippet.as_ref().and_then(|s| s.published_at.as_deref()),
    };
    best_date(&times, utc_offset_hours)
}

fn extract_meta_title(html: &str) -> Result<String> {
    if let Some(caps) = META_TITLE.captures(html) {
        let title = html_escape::decode_html_entities(&caps[1]).trim().to_string();
        if !title.is_empty() {
            return Ok(title);
        }
    }
    bail!("could not find a title on the watch page");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::DateSource;

    #[test]
    fn test_extract_meta_title() {
        let html = r#"<head><meta name="title" content="【歌枠】Singing &amp; Chatting &quot;live&quot;"></head>"#;
        assert_eq!(
            extract_meta_title(html).unwrap(),
            "【歌枠】Singing & Chatting \"live\""
        );
    }

    #[test]
    fn test_extract_meta_title_missing() {
        assert!(extract_meta_title("<html><body>no title</body></html>").is_err());
        assert!(extract_meta_title(r#"<meta name="title" content="">"#).is_err());
    }

    #[test]
    fn test_date_from_live_stream() {
        let json = serde_json::json!({
            "items": [{
                "snippet": {"publishedAt": "2024-05-01T10:00:00Z"},
                "liveStreamingDetails": {
                    "actualStartTime": "2024-05-03T15:00:00Z",
                    "scheduledStartTime": "2024-05-03T14:00:00Z"
                }
            }]
        });
        let resp: VideoListResponse = serde_json::from_value(json).unwrap();
        let date = date_from_item(&resp.items[0], 9).unwrap();
        assert_eq!(date.yyyymmdd, "20240504");
        assert_eq!(date.source, DateSource::ActualStart);
    }

    #[test]
    fn test_date_from_upload() {
        let json = serde_json::json!({
            "items": [{"snippet": {"publishedAt": "2024-05-01T10:00:00Z"}}]
        });
        let resp: VideoListResponse = serde_json::from_value(json).unwrap();
        let date = date_from_item(&resp.items[0], 9).unwrap();
        assert_eq!(date.yyyymmdd, "20240501");
        assert_eq!(date.source, DateSource::Published);
    }

    #[test]
    fn test_empty_item_list() {
        let resp: VideoListResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(resp.items.is_empty());
    }
}
