//! Corpus Store
//!
//! Loads the section list and the reference column texts.

use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::{debug, info};

use super::types::{
    CorpusError, CorpusPaths, ReferenceColumn, Result, Section, FUZZY_SECTION_THRESHOLD,
};
use crate::matching::Normalizer;

/// Read-only store of sections and reference columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusStore {
    sections: Vec<Section>,
    columns: Vec<ReferenceColumn>,
}

impl CorpusStore {
    /// Load both corpus files, normalizing column texts
    pub fn load(paths: &CorpusPaths, normalizer: &Normalizer) -> Result<Self> {
        let sections: Vec<Section> = read_json(&paths.sections)?;
        let texts: Vec<String> = read_json(&paths.columns)?;

        let store = Self::from_parts(sections, texts, normalizer)?;
        info!(
            sections = store.section_count(),
            columns = store.column_count(),
            "Corpus loaded"
        );
        Ok(store)
    }

    /// Build a store from in-memory data, normalizing column texts
    pub fn from_parts(
        sections: Vec<Section>,
        column_texts: Vec<String>,
        normalizer: &Normalizer,
    ) -> Result<Self> {
        if sections.is_empty() {
            return Err(CorpusError::Empty("sections"));
        }
        if column_texts.is_empty() {
            return Err(CorpusError::Empty("columns"));
        }

        let column_count = column_texts.len();
        for (index, section) in sections.iter().enumerate() {
            if section.start_column < 1 || section.start_column as usize > column_count {
                return Err(CorpusError::InvalidStartColumn {
                    index,
                    name: section.name_foreign.clone(),
                    start_column: section.start_column,
                    column_count,
                });
            }
        }

        let columns = column_texts
            .iter()
            .enumerate()
            .map(|(i, text)| ReferenceColumn {
                column_number: i as u32 + 1,
                text: normalizer.normalize(text),
            })
            .collect();

        Ok(Self { sections, columns })
    }

    /// All sections, in book order
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Section by 0-based index
    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    /// Number of sections
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// All reference columns, column 1 first
    pub fn columns(&self) -> &[ReferenceColumn] {
        &self.columns
    }

    /// Reference column by 1-based column number
    pub fn column(&self, column_number: u32) -> Option<&ReferenceColumn> {
        let index = (column_number as usize).checked_sub(1)?;
        self.columns.get(index)
    }

    /// Number of reference columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Resolve a user query to a 0-based section index.
    ///
    /// Accepts a 1-based list number, an exact name in either language
    /// (case-insensitive), or a close transliteration.
    pub fn find_section(&self, query: &str) -> Option<usize> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        if let Ok(number) = query.parse::<usize>() {
            return (1..=self.sections.len())
                .contains(&number)
                .then(|| number - 1);
        }

        let lowered = query.to_lowercase();
        if let Some(index) = self.sections.iter().position(|s| {
            s.name_native == query || s.name_foreign.to_lowercase() == lowered
        }) {
            return Some(index);
        }

        let mut best: Option<(usize, f64)> = None;
        for (index, section) in self.sections.iter().enumerate() {
            let score = strsim::jaro_winkler(&lowered, &section.name_foreign.to_lowercase());
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((index, score));
            }
        }

        let (index, score) = best?;
        debug!(query, index, score, "Fuzzy section lookup");
        (score >= FUZZY_SECTION_THRESHOLD).then_some(index)
    }
}

/// Read and parse a JSON corpus file
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(CorpusError::NotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|source| CorpusError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
