//! Punctuation and boundary normalization of a rendered accent string.

use super::CharFilter;
use crate::phrase::{BOUNDARY_MARKER, INTERROGATIVE_MARK, NUCLEUS_MARKER, PAUSE_MARK};

/// Half-width and full-width variants folded into the notation's marks.
const TRANSLATIONS: &[(char, char)] = &[
    (',', PAUSE_MARK),
    ('，', PAUSE_MARK),
    ('?', INTERROGATIVE_MARK),
];

fn translate(c: char) -> char {
    TRANSLATIONS
        .iter()
        .find(|(from, _)| *from == c)
        .map_or(c, |(_, to)| *to)
}

fn collapse_runs(text: &str, mark: char) -> String {
    let mut collapsed = String::with_capacity(text.len());
    for c in text.chars() {
        if c == mark && collapsed.ends_with(mark) {
            continue;
        }
        collapsed.push(c);
    }
    collapsed
}

/// Drops `marker` wherever it sits directly next to `mark` on the given side.
fn absorb(text: &str, marker: char, mark: char, before: bool) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut absorbed = String::with_capacity(text.len());

    for (i, c) in chars.iter().enumerate() {
        if *c == marker {
            let neighbour = if before {
                chars.get(i + 1)
            } else {
                i.checked_sub(1).and_then(|j| chars.get(j))
            };
            if neighbour == Some(&mark) {
                continue;
            }
        }
        absorbed.push(*c);
    }
    absorbed
}

/// Brings a rendered accent string into canonical form.
///
/// Boundary markers next to a pause mark are absorbed into it, runs of
/// boundaries and of pauses are collapsed, a boundary or nucleus marker in
/// front of `？` is dropped, and boundaries and pauses are trimmed from both
/// ends. The rewrite repeats until the text no longer changes, so applying
/// the filter twice gives the same result as applying it once.
#[derive(Clone, Debug, Default)]
pub struct PunctuationCharFilter;

impl PunctuationCharFilter {
    pub fn new() -> Self {
        PunctuationCharFilter
    }

    fn rewrite(text: &str) -> String {
        let text = collapse_runs(text, BOUNDARY_MARKER);
        let text = absorb(&text, BOUNDARY_MARKER, PAUSE_MARK, true);
        let text = absorb(&text, BOUNDARY_MARKER, PAUSE_MARK, false);
        let text = collapse_runs(&text, PAUSE_MARK);
        let text = absorb(&text, BOUNDARY_MARKER, INTERROGATIVE_MARK, true);
        let text = absorb(&text, NUCLEUS_MARKER, INTERROGATIVE_MARK, true);

        text.trim_matches(BOUNDARY_MARKER)
            .trim_matches(PAUSE_MARK)
            .to_string()
    }
}

impl CharFilter for PunctuationCharFilter {
    fn filter(&self, input: &str) -> String {
        let mut text: String = input.chars().map(translate).collect();
        loop {
            let next = Self::rewrite(&text);
            if next == text {
                return text;
            }
            text = next;
        }
    }

    fn name(&self) -> &'static str {
        "punctuation"
    }
}
