use log::debug;

use crate::error::GenerateError;
use crate::normalize::normalize;
use crate::segment::{SegmentPolicy, segment};
use crate::timestamp::extract_leading_timestamp;
use crate::{ParseBatchResult, ParsedRecord};

/// Parse every line of a pasted setlist.
///
/// Blank lines are skipped. Lines without a leading timestamp are kept
/// verbatim in `invalid_lines`. Fails when no line yields a record.
pub fn parse_batch(text: &str, policy: &SegmentPolicy, flip: bool) -> Result<ParseBatchResult, GenerateError> {
    let mut result = ParseBatchResult::default();

    // `raw` is kept untouched for diagnostics; `line` is what gets parsed
    for raw in split_lines(text) {
        let line = normalize(raw);
        if line.is_empty() {
            continue;
        }

        match extract_leading_timestamp(&line) {
            Some((offset_seconds, remainder)) => {
                let (artist, song) = segment(remainder, policy, flip);
                result.records.push(ParsedRecord {
                    offset_seconds,
                    artist,
                    song,
                });
            }
            None => result.invalid_lines.push(raw.to_string()),
        }
    }

    debug!(
        "Parsed {} records, {} invalid lines",
        result.records.len(),
        result.invalid_lines.len()
    );

    if result.records.is_empty() {
        return Err(GenerateError::NoValidData);
    }
    Ok(result)
}

/// Line breaks recognized in pasted text, on top of `\n`
const LINE_BREAKS: &[char] = &[
    '\n', '\r', '\u{0B}', '\u{0C}', '\u{1C}', '\u{1D}', '\u{1E}', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Split on every line break, treating `\r\n` as one
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split("\r\n").flat_map(|chunk| chunk.split(LINE_BREAKS))
}
