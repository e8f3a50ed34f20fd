//! Char filters that rewrite text before and after accent annotation.
//!
//! # Available Filters
//!
//! - [`long_vowel::LongVowelCharFilter`] - wave dashes to the elongation mark (input side)
//! - [`elongation::ElongationCharFilter`] - elongation mark to a concrete vowel, drops unsupported punctuation
//! - [`punctuation::PunctuationCharFilter`] - canonical commas, boundaries and question marks
//!
//! # Examples
//!
//! ```
//! use akusento::char_filter::CharFilter;
//! use akusento::char_filter::elongation::ElongationCharFilter;
//! use akusento::char_filter::punctuation::PunctuationCharFilter;
//!
//! let resolved = ElongationCharFilter::new().filter("ル'ー/プ/、");
//! assert_eq!(resolved, "ル'ウ/プ/、");
//! assert_eq!(PunctuationCharFilter::new().filter(&resolved), "ル'ウ/プ");
//! ```

/// Trait for filters that rewrite a whole string.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text.
    fn filter(&self, input: &str) -> String;

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

/// Apply `filters` in order.
pub fn apply_all(filters: &[std::sync::Arc<dyn CharFilter>], input: &str) -> String {
    filters
        .iter()
        .fold(input.to_string(), |text, filter| filter.filter(&text))
}

pub mod elongation;
pub mod long_vowel;
pub mod punctuation;
