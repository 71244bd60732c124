//! Whitespace and punctuation canonicalization applied before any parsing.
//!
//! The substitution list is deliberately narrow: only characters that are
//! plain typing variants of ASCII punctuation are folded. The long-vowel mark
//! `ー` and other in-name punctuation are left alone.

/// Characters folded to their ASCII counterpart
const SUBSTITUTIONS: &[(char, char)] = &[('／', '/'), ('\u{3000}', ' ')];

/// Canonicalize a string: fold full-width variants, collapse whitespace, trim
pub fn normalize(s: &str) -> String {
    let folded: String = s
        .chars()
        .map(|c| {
            SUBSTITUTIONS
                .iter()
                .find(|(from, _)| *from == c)
                .map_or(c, |(_, to)| *to)
        })
        .collect();

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}
