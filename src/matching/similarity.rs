//! Bigram similarity
//!
//! Sørensen–Dice coefficient over adjacent character pairs. Whitespace is
//! ignored, identical strings score 1.0 and strings too short to form a
//! bigram score 0.0 against anything different.

use std::collections::HashMap;

/// Multiset of adjacent character pairs of a string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BigramProfile {
    letters: String,
    bigrams: HashMap<(char, char), usize>,
    total: usize,
}

impl BigramProfile {
    /// Build the profile of a string
    pub fn new(text: &str) -> Self {
        let chars: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();

        let mut bigrams: HashMap<(char, char), usize> = HashMap::with_capacity(chars.len());
        for pair in chars.windows(2) {
            *bigrams.entry((pair[0], pair[1])).or_insert(0) += 1;
        }

        Self {
            letters: chars.iter().collect(),
            bigrams,
            total: chars.len().saturating_sub(1),
        }
    }

    /// Text the profile was built from, without whitespace
    pub fn letters(&self) -> &str {
        &self.letters
    }

    /// Check if the profiled text was empty
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Number of bigrams, counting repeats
    pub fn bigram_count(&self) -> usize {
        self.total
    }

    /// Dice coefficient against another profile (0.0-1.0)
    pub fn similarity(&self, other: &BigramProfile) -> f64 {
        if self.letters == other.letters {
            return 1.0;
        }
        if self.total == 0 || other.total == 0 {
            return 0.0;
        }

        let (small, large) = if self.bigrams.len() <= other.bigrams.len() {
            (self, other)
        } else {
            (other, self)
        };

        let shared: usize = small
            .bigrams
            .iter()
            .map(|(pair, &count)| large.bigrams.get(pair).map_or(0, |&n| count.min(n)))
            .sum();

        (2 * shared) as f64 / (self.total + other.total) as f64
    }
}

/// Dice coefficient of two strings (0.0-1.0)
pub fn dice_coefficient(a: &str, b: &str) -> f64 {
    BigramProfile::new(a).similarity(&BigramProfile::new(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_known_values() {
        assert!((dice_coefficient("night", "nacht") - 0.25).abs() < EPSILON);
        assert!((dice_coefficient("healed", "sealed") - 0.8).abs() < EPSILON);
        assert_eq!(dice_coefficient("french", "quebec"), 0.0);
    }

    #[test]
    fn test_repeated_bigrams_count_once_per_occurrence() {
        // "aaaa" has three "aa" pairs, "aa" has one
        assert!((dice_coefficient("aaaa", "aa") - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_symmetry() {
        let pairs = [
            ("בראשיתברא", "ברארשית"),
            ("ויאמראלהים", "ויראאלהים"),
            ("a", "ab"),
            ("", "אב"),
            ("abcabc", "cbacba"),
        ];
        for (a, b) in pairs {
            assert_eq!(dice_coefficient(a, b), dice_coefficient(b, a), "{a} / {b}");
        }
    }

    #[test]
    fn test_self_similarity() {
        for text in ["א", "אב", "בראשיתבראאלהים", "x"] {
            assert_eq!(dice_coefficient(text, text), 1.0);
        }
    }

    #[test]
    fn test_whitespace_ignored() {
        assert_eq!(dice_coefficient("את השמים", "אתהשמים"), 1.0);
    }

    #[test]
    fn test_short_strings() {
        assert_eq!(dice_coefficient("א", "ב"), 0.0);
        assert_eq!(dice_coefficient("א", "אב"), 0.0);
        assert_eq!(dice_coefficient("", "אבג"), 0.0);
    }

    #[test]
    fn test_score_range() {
        let score = dice_coefficient("ויהיערבויהיבקר", "ויהיבקריוםשלישי");
        assert!(score > 0.0 && score < 1.0);
    }

    #[test]
    fn test_profile_counts() {
        let profile = BigramProfile::new("אב גד");
        assert_eq!(profile.letters(), "אבגד");
        assert_eq!(profile.bigram_count(), 3);
        assert!(!profile.is_empty());
        assert!(BigramProfile::new("  ").is_empty());
    }
}
