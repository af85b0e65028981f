//! Text normalization
//!
//! Reduces recognized text to the letters of the target script so that
//! punctuation, digits, vowel points and OCR noise never take part in
//! similarity scoring.

use serde::{Deserialize, Serialize};

// ============================================================
// Constants
// ============================================================

/// First Hebrew letter (alef)
pub const HEBREW_FIRST: char = '\u{05D0}';

/// Last Hebrew letter (tav). Final forms sit inside the range.
pub const HEBREW_LAST: char = '\u{05EA}';

// ============================================================
// Script Range
// ============================================================

/// Inclusive range of letters kept by the normalizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptRange {
    /// First letter of the range
    pub first: char,
    /// Last letter of the range
    pub last: char,
}

impl Default for ScriptRange {
    fn default() -> Self {
        Self::hebrew()
    }
}

impl ScriptRange {
    /// Create a range; reversed bounds are swapped
    pub fn new(first: char, last: char) -> Self {
        if first <= last {
            Self { first, last }
        } else {
            Self {
                first: last,
                last: first,
            }
        }
    }

    /// Hebrew letters, alef through tav
    pub fn hebrew() -> Self {
        Self {
            first: HEBREW_FIRST,
            last: HEBREW_LAST,
        }
    }

    /// Check whether a character belongs to the range
    #[inline]
    pub fn contains(&self, c: char) -> bool {
        (self.first..=self.last).contains(&c)
    }

    /// Every letter of the range, in code point order
    pub fn letters(&self) -> String {
        (self.first..=self.last).collect()
    }
}

// ============================================================
// Normalizer
// ============================================================

/// Strips every character outside a script range
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Normalizer {
    range: ScriptRange,
}

impl Normalizer {
    /// Create a normalizer for the given range
    pub fn new(range: ScriptRange) -> Self {
        Self { range }
    }

    /// Normalizer keeping Hebrew letters only
    pub fn hebrew() -> Self {
        Self::new(ScriptRange::hebrew())
    }

    /// Range of letters this normalizer keeps
    pub fn range(&self) -> ScriptRange {
        self.range
    }

    /// Delete every character outside the range, keeping order
    pub fn normalize(&self, text: &str) -> String {
        text.chars().filter(|&c| self.range.contains(c)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_noise() {
        let normalizer = Normalizer::hebrew();
        assert_eq!(normalizer.normalize("בראשית, ברא 123 abc!"), "בראשיתברא");
    }

    #[test]
    fn test_normalize_joins_adjacent_letters() {
        let normalizer = Normalizer::hebrew();
        assert_eq!(normalizer.normalize("את\nהשמים\t ואת"), "אתהשמיםואת");
    }

    #[test]
    fn test_normalize_removes_vowel_points() {
        // Niqqud lives below U+05D0
        let normalizer = Normalizer::hebrew();
        assert_eq!(normalizer.normalize("בְּרֵאשִׁית"), "בראשית");
    }

    #[test]
    fn test_normalize_keeps_final_forms() {
        let normalizer = Normalizer::hebrew();
        assert_eq!(normalizer.normalize("ךםןףץ"), "ךםןףץ");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(Normalizer::hebrew().normalize(""), "");
        assert_eq!(Normalizer::hebrew().normalize("  12 ?!"), "");
    }

    #[test]
    fn test_custom_range() {
        let normalizer = Normalizer::new(ScriptRange::new('a', 'z'));
        assert_eq!(normalizer.normalize("Hello, world 42"), "elloworld");
    }

    #[test]
    fn test_script_range_swaps_reversed_bounds() {
        let range = ScriptRange::new('z', 'a');
        assert_eq!(range.first, 'a');
        assert_eq!(range.last, 'z');
    }

    #[test]
    fn test_hebrew_letters() {
        let letters = ScriptRange::hebrew().letters();
        assert_eq!(letters.chars().count(), 27);
        assert!(letters.starts_with('א'));
        assert!(letters.ends_with('ת'));
    }

    #[test]
    fn test_script_range_from_toml() {
        let range: ScriptRange = toml::from_str("first = \"a\"\nlast = \"f\"").unwrap();
        assert_eq!(range, ScriptRange::new('a', 'f'));
    }
}
