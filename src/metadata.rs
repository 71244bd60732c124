//! Video metadata lookups the generate pipeline depends on.
//!
//! Both lookups are best effort: a title lookup always yields some text and a
//! date lookup simply yields nothing when it cannot answer.

#![allow(async_fn_in_trait)]

use crate::dates::DateStamp;

/// Title used when no lookup succeeds
pub const TITLE_PLACEHOLDER: &str = "video";

pub trait TitleLookup {
    /// Title of the video at `watch_url`, or [`TITLE_PLACEHOLDER`]
    async fn fetch_title(&self, watch_url: &str) -> String;
}

pub trait DateLookup {
    /// Best available date for the video, if any
    async fn fetch_date(&self, video_id: &str) -> Option<DateStamp>;
}

/// Title lookup that never touches the network
#[derive(Debug, Clone, Default)]
pub struct FixedTitle(pub Option<String>);

impl TitleLookup for FixedTitle {
    async fn fetch_title(&self, _watch_url: &str) -> String {
        self.0.clone().unwrap_or_else(|| TITLE_PLACEHOLDER.to_string())
    }
}

/// Date lookup for when no API key is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDates;

impl DateLookup for NoDates {
    async fn fetch_date(&self, _video_id: &str) -> Option<DateStamp> {
        None
    }
}
