//! Artist/song segmentation.
//!
//! A setlist entry or video title is split into an artist field and a song
//! field by trying, in order:
//!
//! 1. a quoted song title (`「」`, `『』`, `“”`, `""`)
//! 2. a separator token with whitespace on both sides (`-`, `/`, `by`, ...)
//! 3. a single unspaced `/` (full titles only)
//! 4. the whole text as the song, artist unknown
//!
//! Which side of a separator is the artist is decided by [`SegmentPolicy`].

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::NOT_AVAILABLE;
use crate::normalize::normalize;

/// How the two sides of a separator map onto artist and song
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SeparatorAssignment {
    /// The side with more Latin letters is the artist; ties make the right side the artist
    #[default]
    AlphabetDensity,
    /// The right side is the artist, or the left side when flipped
    FixedWithFlip,
}

/// Segmentation knobs chosen by the caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentPolicy {
    pub separator_assignment: SeparatorAssignment,
    /// Accept a free-standing `ー` as a separator, like `-`
    pub treat_long_vowel_as_separator: bool,
}

const QUOTE_PAIRS: &[(char, char)] = &[('「', '」'), ('『', '』'), ('“', '”'), ('"', '"')];

/// Characters trimmed from the artist left over around a quoted song
const SEPARATOR_CHARS: &[char] = &['-', '—', '–', '―', '－', '/', '／'];

static SPACED_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s(?:-|—|–|―|－|/|／|by|BY)\s").unwrap());

static SPACED_SEPARATOR_WITH_LONG_VOWEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s(?:-|—|–|―|－|ー|/|／|by|BY)\s").unwrap());

static TITLE_NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+|#[^\s#]+|【[^】]*】|\[[^\]]*\]").unwrap());

/// Split the remainder of a timestamped line into `(artist, song)`
pub fn segment(remainder: &str, policy: &SegmentPolicy, flip: bool) -> (String, String) {
    segment_with(&normalize(remainder), policy, flip, false)
}

/// Split a full video or short title into `(artist, song)`.
///
/// URLs, hashtags and bracketed annotations such as `【歌枠】` are dropped first.
pub fn segment_title(title: &str, policy: &SegmentPolicy, flip: bool) -> (String, String) {
    let cleaned = TITLE_NOISE.replace_all(title, " ");
    segment_with(&normalize(&cleaned), policy, flip, true)
}

fn segment_with(text: &str, policy: &SegmentPolicy, flip: bool, allow_bare_slash: bool) -> (String, String) {
    if let Some(split) = split_quoted(text) {
        return split;
    }

    let separator = if policy.treat_long_vowel_as_separator {
        &*SPACED_SEPARATOR_WITH_LONG_VOWEL
    } else {
        &*SPACED_SEPARATOR
    };
    if let Some(m) = separator.find(text) {
        return assign(&text[..m.start()], &text[m.end()..], policy, flip);
    }

    if allow_bare_slash {
        if let Some((left, right)) = split_bare_slash(text) {
            return assign(left, right, policy, flip);
        }
    }

    (NOT_AVAILABLE.to_string(), or_sentinel(text))
}

/// Rule 1: the first opening mark with a matching close holds the song
fn split_quoted(text: &str) -> Option<(String, String)> {
    for (start, open) in text.char_indices() {
        let Some(&(_, close)) = QUOTE_PAIRS.iter().find(|(o, _)| *o == open) else {
            continue;
        };
        let inner_start = start + open.len_utf8();
        let Some(inner_len) = text[inner_start..].find(close) else {
            continue;
        };
        let inner_end = inner_start + inner_len;
        let song = &text[inner_start..inner_end];
        let outside = format!("{} {}", &text[..start], &text[inner_end + close.len_utf8()..]);
        let outside = normalize(&outside);
        let artist = strip_separators(&outside);
        return Some((or_sentinel(artist), or_sentinel(song)));
    }
    None
}

/// Trim separator characters and free-standing `by` tokens from both ends
fn strip_separators(s: &str) -> &str {
    let mut s = s;
    loop {
        let before = s.len();
        s = s.trim_matches(|c: char| c.is_whitespace() || SEPARATOR_CHARS.contains(&c));
        for by in ["by", "BY"] {
            if s == by {
                s = "";
            }
            if let Some(rest) = s.strip_prefix(by).filter(|r| r.starts_with(char::is_whitespace)) {
                s = rest;
            }
            if let Some(rest) = s.strip_suffix(by).filter(|r| r.ends_with(char::is_whitespace)) {
                s = rest;
            }
        }
        if s.len() == before {
            return s;
        }
    }
}

/// Rule 3: exactly one `/` strictly inside the text with content on both sides
fn split_bare_slash(text: &str) -> Option<(&str, &str)> {
    if text.matches('/').count() != 1 {
        return None;
    }
    let (left, right) = text.split_once('/')?;
    let (left, right) = (left.trim(), right.trim());
    if left.is_empty() || right.is_empty() {
        return None;
    }
    Some((left, right))
}

fn assign(left: &str, right: &str, policy: &SegmentPolicy, flip: bool) -> (String, String) {
    let left_is_artist = match policy.separator_assignment {
        SeparatorAssignment::AlphabetDensity => latin_letters(left) > latin_letters(right),
        SeparatorAssignment::FixedWithFlip => flip,
    };
    let (artist, song) = if left_is_artist { (left, right) } else { (right, left) };
    (or_sentinel(artist), or_sentinel(song))
}

fn latin_letters(s: &str) -> usize {
    s.chars().filter(char::is_ascii_alphabetic).count()
}

fn or_sentinel(s: &str) -> String {
    let s = normalize(s);
    if s.is_empty() { NOT_AVAILABLE.to_string() } else { s }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DENSITY: SegmentPolicy = SegmentPolicy {
        separator_assignment: SeparatorAssignment::AlphabetDensity,
        treat_long_vowel_as_separator: false,
    };

    const FIXED: SegmentPolicy = SegmentPolicy {
        separator_assignment: SeparatorAssignment::FixedWithFlip,
        treat_long_vowel_as_separator: false,
    };

    fn pair(artist: &str, song: &str) -> (String, String) {
        (artist.to_string(), song.to_string())
    }

    #[test]
    fn test_quoted_song() {
        assert_eq!(
            segment("アーティスト名C「楽曲名C」", &DENSITY, false),
            pair("アーティスト名C", "楽曲名C")
        );
        assert_eq!(segment("『楽曲』 / 歌手", &DENSITY, false), pair("歌手", "楽曲"));
        assert_eq!(segment("“Lemon” by Kenshi Yonezu", &DENSITY, false), pair("Kenshi Yonezu", "Lemon"));
        assert_eq!(segment("Aimer \"Ref:rain\"", &DENSITY, false), pair("Aimer", "Ref:rain"));
    }

    #[test]
    fn test_quoted_takes_precedence_over_separator() {
        assert_eq!(segment("YOASOBI - 「夜に駆ける」", &FIXED, false), pair("YOASOBI", "夜に駆ける"));
        assert_eq!(segment("Artist A / 「曲」", &FIXED, false), pair("Artist A", "曲"));
    }

    #[test]
    fn test_quoted_keeps_trailing_y_in_artist() {
        assert_eq!(segment("Lucky 「曲」", &DENSITY, false), pair("Lucky", "曲"));
        assert_eq!(segment("「曲」 by Ruby", &DENSITY, false), pair("Ruby", "曲"));
    }

    #[test]
    fn test_quoted_empty_parts() {
        assert_eq!(segment("「曲」", &DENSITY, false), pair("N/A", "曲"));
        assert_eq!(segment("歌手「」", &DENSITY, false), pair("歌手", "N/A"));
        assert_eq!(segment("- 「曲」 by", &DENSITY, false), pair("N/A", "曲"));
    }

    #[test]
    fn test_unmatched_quote_falls_through() {
        assert_eq!(segment("「曲 - Artist", &DENSITY, false), pair("Artist", "「曲"));
    }

    // Alphabet density: the side with strictly more ASCII letters is the artist,
    // otherwise the right side is.
    #[test]
    fn test_density_table() {
        let cases = [
            ("楽曲名A - アーティスト名A", "アーティスト名A", "楽曲名A"),
            ("楽曲名AB - アーティスト名A", "楽曲名AB", "アーティスト名A"),
            ("楽曲 - 歌手", "歌手", "楽曲"),
            ("Lemon - 米津玄師", "Lemon", "米津玄師"),
            ("夜に駆ける - YOASOBI", "YOASOBI", "夜に駆ける"),
            ("abc - xyz", "xyz", "abc"),
            ("Pretender by Official髭男dism", "Official髭男dism", "Pretender"),
            ("ＡＢＣ - 歌手", "歌手", "ＡＢＣ"),
        ];
        for (input, artist, song) in cases {
            assert_eq!(segment(input, &DENSITY, false), pair(artist, song), "{input}");
        }
    }

    #[test]
    fn test_density_ignores_flip() {
        assert_eq!(segment("Lemon - 米津玄師", &DENSITY, true), pair("Lemon", "米津玄師"));
    }

    #[test]
    fn test_fixed_with_flip() {
        assert_eq!(segment("Lemon - 米津玄師", &FIXED, false), pair("米津玄師", "Lemon"));
        assert_eq!(segment("米津玄師 - Lemon", &FIXED, true), pair("米津玄師", "Lemon"));
    }

    #[test]
    fn test_separator_variants() {
        for sep in ["-", "—", "–", "―", "－", "/", "／", "by", "BY"] {
            let input = format!("曲 {sep} 歌手");
            assert_eq!(segment(&input, &DENSITY, false), pair("歌手", "曲"), "{input}");
        }
    }

    #[test]
    fn test_leftmost_separator_wins() {
        assert_eq!(segment("曲 / 歌手 - 補足", &FIXED, false), pair("歌手 - 補足", "曲"));
    }

    #[test]
    fn test_hyphenated_word_not_split() {
        assert_eq!(segment("Re-Birth day", &DENSITY, false), pair("N/A", "Re-Birth day"));
        assert_eq!(segment("Baby-blue", &DENSITY, false), pair("N/A", "Baby-blue"));
    }

    #[test]
    fn test_long_vowel_policy() {
        let with_vowel = SegmentPolicy {
            treat_long_vowel_as_separator: true,
            ..FIXED
        };
        assert_eq!(segment("曲 ー 歌手", &FIXED, false), pair("N/A", "曲 ー 歌手"));
        assert_eq!(segment("曲 ー 歌手", &with_vowel, false), pair("歌手", "曲"));
        assert_eq!(segment("ラーメン", &with_vowel, false), pair("N/A", "ラーメン"));
    }

    #[test]
    fn test_bare_slash_only_for_titles() {
        assert_eq!(segment("楽曲名B/アーティスト", &FIXED, false), pair("N/A", "楽曲名B/アーティスト"));
        assert_eq!(segment_title("楽曲名B/アーティスト", &FIXED, false), pair("アーティスト", "楽曲名B"));
        assert_eq!(segment_title("AC/DC/Back", &FIXED, false), pair("N/A", "AC/DC/Back"));
        assert_eq!(segment_title("/曲", &FIXED, false), pair("N/A", "/曲"));
    }

    #[test]
    fn test_fallback() {
        assert_eq!(segment("No Separator Here", &DENSITY, false), pair("N/A", "No Separator Here"));
        assert_eq!(segment("", &DENSITY, false), pair("N/A", "N/A"));
        assert_eq!(segment("   ", &DENSITY, false), pair("N/A", "N/A"));
    }

    #[test]
    fn test_title_noise_stripped() {
        assert_eq!(
            segment_title(
                "【歌ってみた】夜に駆ける / YOASOBI [MV] #shorts https://example.com/x",
                &DENSITY,
                false
            ),
            pair("YOASOBI", "夜に駆ける")
        );
        assert_eq!(segment_title("#歌枠 #karaoke", &DENSITY, false), pair("N/A", "N/A"));
    }

    #[test]
    fn test_never_empty() {
        for input in ["", "-", " / ", "「」", "\"\"", "by", "a - ", "【x】"] {
            let (artist, song) = segment_title(input, &DENSITY, false);
            assert!(!artist.is_empty() && !song.is_empty(), "{input}");
            let (artist, song) = segment(input, &FIXED, true);
            assert!(!artist.is_empty() && !song.is_empty(), "{input}");
        }
    }
}
