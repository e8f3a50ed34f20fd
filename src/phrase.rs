//! Accent phrases and their rendering into the target notation.
//!
//! The notation marks accent-phrase boundaries with `/`, the accent nucleus
//! with `'` right after its mora, pauses with `、` and a rising intonation
//! with `？`:
//!
//! ```text
//! タダシ'イ/ススミカタガ'/ムズカシ'イト、ラク'ナ
//! ```
//!
//! - [`accent_phrase::AccentPhrase`] - one phrase and its nucleus
//! - [`formatter::AccentPhraseFormatter`] - tagger output to notation

pub mod accent_phrase;
pub mod formatter;

pub use accent_phrase::AccentPhrase;
pub use formatter::AccentPhraseFormatter;

/// Marks the accent nucleus; follows the nucleus mora.
pub const NUCLEUS_MARKER: char = '\'';

/// Separates accent phrases.
pub const BOUNDARY_MARKER: char = '/';

/// Pause between phrases.
pub const PAUSE_MARK: char = '、';

/// Rising-intonation phrase ending.
pub const INTERROGATIVE_MARK: char = '？';

/// Vowel-lengthening placeholder.
pub const ELONGATION_MARK: char = 'ー';
