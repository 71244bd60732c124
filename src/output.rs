use crate::assemble::{AssembledRow, LinkCell};
use crate::error::GenerateError;
use crate::timestamp::format_offset;
use crate::{HEADER, ParseBatchResult};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const MAX_FILENAME_CHARS: usize = 100;
pub const DEFAULT_FILENAME: &str = "youtube_song_list";

/// How the link column is written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStyle {
    Plain,
    Hyperlink,
}

/// Bare URL, or a spreadsheet `HYPERLINK` formula showing the label
pub fn format_link(link: &LinkCell, style: LinkStyle) -> String {
    match style {
        LinkStyle::Plain => link.url.clone(),
        LinkStyle::Hyperlink => format!(
            "=HYPERLINK(\"{}\",\"{}\")",
            link.url.replace('"', "\"\""),
            link.label.replace('"', "\"\"")
        ),
    }
}

/// Serialize rows as a BOM-prefixed, fully quoted CSV document
pub fn to_csv(rows: &[AssembledRow], style: LinkStyle) -> Result<Vec<u8>, GenerateError> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(UTF8_BOM.to_vec());

    writer.write_record(HEADER)?;
    for row in rows {
        let link = format_link(&row.link, style);
        writer.write_record([row.artist.as_str(), row.song.as_str(), link.as_str()])?;
    }

    writer.into_inner().map_err(|e| GenerateError::Io(e.into_error()))
}

/// Render a human-readable preview: one row per record, then the unparsed lines
pub fn render_preview(batch: &ParseBatchResult, rows: &[AssembledRow]) -> String {
    let mut out = format!(
        "Parsed: {}  Unparsed: {}\n\n",
        batch.records.len(),
        batch.invalid_lines.len()
    );

    for row in rows {
        out.push_str(&format!(
            "{:>8}  {} / {}  {}\n",
            format_offset(row.offset_seconds),
            row.song,
            row.artist,
            row.link.url
        ));
    }

    if !batch.invalid_lines.is_empty() {
        out.push_str("\nUnparsed lines:\n");
        for line in &batch.invalid_lines {
            out.push_str(&format!("  {line}\n"));
        }
    }

    out.trim_end().to_string()
}

/// Render rows and diagnostics as pretty JSON
pub fn render_json(batch: &ParseBatchResult, rows: &[AssembledRow]) -> String {
    let doc = serde_json::json!({
        "rows": rows,
        "invalid_lines": batch.invalid_lines,
    });
    serde_json::to_string_pretty(&doc).unwrap_or_default()
}

/// Turn a video title into a safe file name stem
pub fn sanitize_filename(title: &str) -> String {
    let replaced: String = title
        .chars()
        .map(|c| match c {
            '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    let truncated: String = replaced
        .trim_end_matches(|c: char| c.is_whitespace() || c == '.')
        .chars()
        .take(MAX_FILENAME_CHARS)
        .collect();
    let result = truncated.trim_end_matches(|c: char| c.is_whitespace() || c == '.');

    if result.trim().is_empty() {
        DEFAULT_FILENAME.to_string()
    } else {
        result.to_string()
    }
}
