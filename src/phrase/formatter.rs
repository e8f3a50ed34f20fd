//! Accent-phrase formatter.
//!
//! Turns tagger output (one [`TaggedRecord`] per line, the last column
//! holding the absolute accent-nucleus position) into the annotated mora
//! string. Pronounced morphemes are collected into the current
//! [`AccentPhrase`]; a morpheme flagged `/` flushes the collected phrase
//! before starting the next one.
//!
//! Auxiliary symbols (pronunciation `*`) are held until the next flush:
//!
//! - flagged `-`, they attach to the phrase just rendered, replacing its
//!   boundary marker; the elongation mark keeps the boundary after it
//! - flagged `/`, they become a separator after that phrase: `？` stays as
//!   is, anything else becomes `、`
//!
//! # Examples
//!
//! ```
//! use akusento::phrase::AccentPhraseFormatter;
//!
//! fn line(orth: &str, pron: &str, flag: &str, moras: usize, accent: i32) -> String {
//!     let mut fields = vec!["*".to_string(); 36];
//!     fields[0] = orth.to_string();
//!     fields[1] = pron.to_string();
//!     fields[12] = flag.to_string();
//!     fields[13] = moras.to_string();
//!     fields[35] = accent.to_string();
//!     fields.join(" ")
//! }
//!
//! let input = [
//!     line("世界", "セカイ", "/", 3, 1),
//!     line("こんにちは", "コンニチワ", "/", 5, 0),
//! ]
//! .join("\n");
//!
//! let formatted = AccentPhraseFormatter::new().format(&input);
//! assert_eq!(formatted, "セ'カイ/コンニチワ'");
//! ```

use tracing::warn;

use crate::phrase::accent_phrase::AccentPhrase;
use crate::phrase::{BOUNDARY_MARKER, ELONGATION_MARK, INTERROGATIVE_MARK, PAUSE_MARK};
use crate::record::{BoundaryFlag, TaggedRecord};

/// Auxiliary symbols that keep the phrase boundary after being attached.
const KEEP_BOUNDARY_SYMBOLS: &[char] = &[ELONGATION_MARK];

fn is_single(text: &str, c: char) -> bool {
    let mut chars = text.chars();
    chars.next() == Some(c) && chars.next().is_none()
}

/// An unpronounced symbol waiting for the next flush.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuxiliarySymbol {
    pub orth: String,
    /// `Continue` attaches to the previous phrase, `Start` separates it from
    /// the next one
    pub placement: BoundaryFlag,
}

impl AuxiliarySymbol {
    fn keeps_boundary(&self) -> bool {
        KEEP_BOUNDARY_SYMBOLS
            .iter()
            .any(|c| is_single(&self.orth, *c))
    }

    /// The separator a `/`-flagged symbol renders as.
    fn separator(&self) -> char {
        if is_single(&self.orth, INTERROGATIVE_MARK) {
            INTERROGATIVE_MARK
        } else {
            PAUSE_MARK
        }
    }
}

/// Renders a tagged record stream into the accent notation.
#[derive(Clone, Debug, Default)]
pub struct AccentPhraseFormatter;

impl AccentPhraseFormatter {
    /// Create a new formatter.
    pub fn new() -> Self {
        AccentPhraseFormatter
    }

    /// Format a whole tagger output.
    ///
    /// Blank lines are ignored, so the input is rendered as one utterance.
    /// Lines [`TaggedRecord::parse_line`] rejects are skipped. The trailing
    /// boundary marker is removed.
    pub fn format(&self, text: &str) -> String {
        let mut accumulator = PhraseAccumulator::default();
        let mut skipped = 0;

        for line in text.lines() {
            if line.trim().is_empty() {
                continue;
            }
            match TaggedRecord::parse_line(line) {
                Some(record) => accumulator.feed(record),
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            warn!(skipped, "skipped malformed tagger lines");
        }
        accumulator.finish()
    }
}

/// Collects one phrase at a time and appends rendered phrases to the
/// output.
///
/// The accumulator is collecting while records arrive; a `/`-flagged
/// morpheme with a non-empty phrase, or the end of the stream, moves it
/// through a flush that renders the phrase, splices the pending auxiliary
/// symbols and empties both buffers.
#[derive(Debug, Default)]
struct PhraseAccumulator {
    phrase: AccentPhrase,
    auxiliaries: Vec<AuxiliarySymbol>,
    output: String,
}

impl PhraseAccumulator {
    fn feed(&mut self, record: TaggedRecord) {
        if record.is_auxiliary() {
            self.auxiliaries.push(AuxiliarySymbol {
                orth: record.orth,
                placement: record.boundary,
            });
            return;
        }

        if record.boundary == BoundaryFlag::Start && !self.phrase.is_empty() {
            self.flush();
        }
        self.phrase.push(record);
    }

    fn flush(&mut self) {
        let mut rendered = self.phrase.render();
        let mut separators = String::new();

        for symbol in self.auxiliaries.drain(..) {
            match symbol.placement {
                BoundaryFlag::Continue => {
                    if rendered.ends_with(BOUNDARY_MARKER) {
                        rendered.pop();
                    }
                    rendered.push_str(&symbol.orth);
                    if symbol.keeps_boundary() {
                        rendered.push(BOUNDARY_MARKER);
                    }
                }
                BoundaryFlag::Start => separators.push(symbol.separator()),
            }
        }

        self.output.push_str(&rendered);
        self.output.push_str(&separators);
        self.phrase.clear();
    }

    fn finish(mut self) -> String {
        if !self.phrase.is_empty() {
            self.flush();
        }

        // Only reachable when no pronounced morpheme was seen at all.
        for symbol in self.auxiliaries.drain(..) {
            match symbol.placement {
                BoundaryFlag::Start => self.output.push(symbol.separator()),
                BoundaryFlag::Continue => self.output.push_str(&symbol.orth),
            }
        }

        if self.output.ends_with(BOUNDARY_MARKER) {
            self.output.pop();
        }
        self.output
    }
}
