//! Column Matcher
//!
//! Scores a normalized candidate against every reference column.

use rayon::prelude::*;
use serde::Serialize;

use super::similarity::BigramProfile;
use crate::corpus::{CorpusStore, ReferenceColumn};

/// Best-matching column and its similarity score
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColumnMatch {
    /// Column number (1-indexed)
    pub column: u32,
    /// Similarity score (0.0-1.0)
    pub score: f64,
}

impl ColumnMatch {
    /// Match reported for a candidate with no letters
    pub fn empty() -> Self {
        Self {
            column: 1,
            score: 0.0,
        }
    }
}

/// Matches recognized text against reference column texts
#[derive(Debug, Clone, Default)]
pub struct ColumnMatcher {
    profiles: Vec<BigramProfile>,
}

impl ColumnMatcher {
    /// Build bigram profiles for the given columns, in column order
    pub fn new(columns: &[ReferenceColumn]) -> Self {
        let profiles = columns
            .par_iter()
            .map(|column| BigramProfile::new(&column.text))
            .collect();
        Self { profiles }
    }

    /// Build a matcher over every column of a corpus
    pub fn from_corpus(corpus: &CorpusStore) -> Self {
        Self::new(corpus.columns())
    }

    /// Number of reference columns
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Check if there are no reference columns
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Similarity of the candidate to each column, in column order
    pub fn scores(&self, candidate: &str) -> Vec<f64> {
        let candidate = BigramProfile::new(candidate);
        self.profiles
            .par_iter()
            .map(|profile| candidate.similarity(profile))
            .collect()
    }

    /// Best-matching column; the first column wins ties.
    ///
    /// An empty candidate (or an empty matcher) reports column 1 with a
    /// score of 0.0.
    pub fn best_match(&self, candidate: &str) -> ColumnMatch {
        if candidate.chars().all(char::is_whitespace) {
            return ColumnMatch::empty();
        }

        let mut best = ColumnMatch::empty();
        let mut found = false;
        for (index, score) in self.scores(candidate).into_iter().enumerate() {
            if !found || score > best.score {
                best = ColumnMatch {
                    column: index as u32 + 1,
                    score,
                };
                found = true;
            }
        }
        best
    }

    /// Best-matching column number (1-indexed)
    pub fn match_column(&self, candidate: &str) -> u32 {
        self.best_match(candidate).column
    }

    /// Top `limit` columns by descending score, ties in column order
    pub fn rank(&self, candidate: &str, limit: usize) -> Vec<ColumnMatch> {
        if candidate.chars().all(char::is_whitespace) {
            return if self.is_empty() || limit == 0 {
                Vec::new()
            } else {
                vec![ColumnMatch::empty()]
            };
        }

        let mut ranked: Vec<ColumnMatch> = self
            .scores(candidate)
            .into_iter()
            .enumerate()
            .map(|(index, score)| ColumnMatch {
                column: index as u32 + 1,
                score,
            })
            .collect();

        // sort_by is stable, so equal scores keep column order
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked.truncate(limit);
        ranked
    }
}
