use std::sync::LazyLock;

use regex::Regex;

/// Bullet and marker glyphs people put in front of setlist entries
const BULLET_GLYPHS: &str = r"\-*•・●○◎■□◆◇▶►▷▸★☆♪♫·‣⁃>";

/// ASCII and full-width decimal digits
const DIGIT: &str = "[0-9０-９]";

static LEADING_TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^[{BULLET_GLYPHS}\s]*(?:(?P<h>{D}{{1,2}}):(?P<hm>{D}{{2}})|(?P<m>{D}{{1,2}})):(?P<s>{D}{{2}})",
        D = DIGIT
    ))
    .unwrap()
});

/// Find a leading `H:MM:SS` or `M:SS` token.
///
/// Returns the offset in seconds and the left-trimmed remainder of the line.
/// Minutes and seconds are not range checked, so `9:99` is 639 seconds.
pub fn extract_leading_timestamp(line: &str) -> Option<(u32, &str)> {
    let caps = LEADING_TIMESTAMP.captures(line)?;
    let num = |name: &str| caps.name(name).and_then(|m| parse_digits(m.as_str()));

    let seconds = num("s")?;
    let offset = match (num("h"), num("hm")) {
        (Some(h), Some(m)) => h * 3600 + m * 60 + seconds,
        _ => num("m")? * 60 + seconds,
    };

    let end = caps.get(0)?.end();
    Some((offset, line[end..].trim_start()))
}

fn parse_digits(s: &str) -> Option<u32> {
    s.chars().try_fold(0u32, |acc, c| {
        let digit = match c {
            '０'..='９' => c as u32 - '０' as u32,
            c => c.to_digit(10)?,
        };
        Some(acc * 10 + digit)
    })
}

/// Render an offset the way setlists write it: `H:MM:SS`, or `M:SS` under an hour
pub fn format_offset(seconds: u32) -> String {
    let (h, m, s) = (seconds / 3600, seconds % 3600 / 60, seconds % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m}:{s:02}")
    }
}
