use serde::Serialize;

use crate::ParsedRecord;
use crate::dates::DateStamp;

/// Link target and the text a spreadsheet should show for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkCell {
    pub url: String,
    pub label: String,
}

/// One data row of the output sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssembledRow {
    pub offset_seconds: u32,
    pub artist: String,
    pub song: String,
    pub link: LinkCell,
}

/// Label shown for every link: the video title, prefixed with `yyyymmdd` when known
pub fn display_label(title: &str, date: Option<&DateStamp>) -> String {
    match date {
        Some(date) => format!("{} {title}", date.yyyymmdd),
        None => title.to_string(),
    }
}

/// Deep link to a playback position
pub fn timestamped_link(base_link: &str, offset_seconds: u32) -> String {
    format!("{base_link}&t={offset_seconds}s")
}

/// Join parsed records with the video link and display label
pub fn assemble(records: &[ParsedRecord], base_link: &str, display_label: &str) -> Vec<AssembledRow> {
    records
        .iter()
        .map(|r| AssembledRow {
            offset_seconds: r.offset_seconds,
            artist: r.artist.clone(),
            song: r.song.clone(),
            link: LinkCell {
                url: timestamped_link(base_link, r.offset_seconds),
                label: display_label.to_string(),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::DateSource;

    #[test]
    fn test_assemble() {
        let records = vec![
            ParsedRecord {
                offset_seconds: 35,
                artist: "アーティスト名A".to_string(),
                song: "楽曲名A".to_string(),
            },
            ParsedRecord {
                offset_seconds: 4205,
                artist: "N/A".to_string(),
                song: "楽曲名C".to_string(),
            },
        ];
        let rows = assemble(&records, "https://www.youtube.com/watch?v=abc", "歌枠");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].link.url, "https://www.youtube.com/watch?v=abc&t=35s");
        assert_eq!(rows[0].link.label, "歌枠");
        assert_eq!(rows[1].link.url, "https://www.youtube.com/watch?v=abc&t=4205s");
        assert_eq!(rows[1].artist, "N/A");
    }

    #[test]
    fn test_assemble_empty() {
        assert!(assemble(&[], "https://www.youtube.com/watch?v=abc", "x").is_empty());
    }

    #[test]
    fn test_display_label() {
        let date = DateStamp {
            yyyymmdd: "20240503".to_string(),
            source: DateSource::ActualStart,
        };
        assert_eq!(display_label("歌枠", Some(&date)), "20240503 歌枠");
        assert_eq!(display_label("歌枠", None), "歌枠");
    }
}
