use log::{debug, info, warn};

use crate::assemble::{AssembledRow, assemble, display_label};
use crate::batch::parse_batch;
use crate::dates::{DateStamp, normalize_manual_date};
use crate::error::GenerateError;
use crate::metadata::{DateLookup, TitleLookup};
use crate::segment::{SegmentPolicy, segment_title};
use crate::{ParseBatchResult, ParsedRecord, canonical_watch_url, extract_video_id, is_valid_youtube_url};

/// Everything the user supplies for one generate action
#[derive(Debug, Clone, Default)]
pub struct GenerateRequest<'a> {
    pub url: &'a str,
    pub setlist: &'a str,
    pub policy: SegmentPolicy,
    pub flip: bool,
    /// Used only when the date lookup has nothing
    pub manual_date: Option<&'a str>,
}

/// Result of a successful generate action
#[derive(Debug, Clone)]
pub struct Generated {
    pub video_id: String,
    pub title: String,
    pub date: Option<DateStamp>,
    pub label: String,
    pub batch: ParseBatchResult,
    pub rows: Vec<AssembledRow>,
}

/// Validate the URL, parse the setlist, then look up metadata and build rows.
///
/// Metadata is only fetched once the setlist has produced at least one record.
pub async fn generate<T, D>(request: &GenerateRequest<'_>, titles: &T, dates: &D) -> Result<Generated, GenerateError>
where
    T: TitleLookup,
    D: DateLookup,
{
    let video_id = resolve_video_id(request.url)?;

    let batch = parse_batch(request.setlist, &request.policy, request.flip)?;
    info!(
        "Parsed {} records ({} unparsed) for {video_id}",
        batch.records.len(),
        batch.invalid_lines.len()
    );

    let watch_url = canonical_watch_url(&video_id);
    let title = titles.fetch_title(&watch_url).await;
    finish(request, dates, video_id, title, batch).await
}

/// Build a single row from the video title itself, for shorts and single-song uploads
pub async fn generate_from_title<T, D>(
    request: &GenerateRequest<'_>,
    titles: &T,
    dates: &D,
) -> Result<Generated, GenerateError>
where
    T: TitleLookup,
    D: DateLookup,
{
    let video_id = resolve_video_id(request.url)?;

    let watch_url = canonical_watch_url(&video_id);
    let title = titles.fetch_title(&watch_url).await;
    let (artist, song) = segment_title(&title, &request.policy, request.flip);
    debug!("Title split: artist={artist} song={song}");

    let batch = ParseBatchResult {
        records: vec![ParsedRecord {
            offset_seconds: 0,
            artist,
            song,
        }],
        invalid_lines: Vec::new(),
    };
    finish(request, dates, video_id, title, batch).await
}

fn resolve_video_id(url: &str) -> Result<String, GenerateError> {
    let url = url.trim();
    if !is_valid_youtube_url(url) {
        return Err(GenerateError::InvalidUrl(url.to_string()));
    }
    let video_id = extract_video_id(url).ok_or_else(|| GenerateError::VideoId(url.to_string()))?;
    debug!("Video id: {video_id}");
    Ok(video_id)
}

async fn finish<D: DateLookup>(
    request: &GenerateRequest<'_>,
    dates: &D,
    video_id: String,
    title: String,
    batch: ParseBatchResult,
) -> Result<Generated, GenerateError> {
    let date = match dates.fetch_date(&video_id).await {
        Some(date) => Some(date),
        None => request.manual_date.and_then(|raw| {
            let parsed = normalize_manual_date(raw);
            if parsed.is_none() {
                warn!("Ignoring unrecognized date: {raw}");
            }
            parsed
        }),
    };

    let label = display_label(&title, date.as_ref());
    let rows = assemble(&batch.records, &canonical_watch_url(&video_id), &label);

    Ok(Generated {
        video_id,
        title,
        date,
        label,
        batch,
        rows,
    })
}
