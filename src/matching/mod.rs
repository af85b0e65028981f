//! Column Matching module
//!
//! Turns noisy recognized text into a best-guess column number.
//!
//! # Features
//!
//! - Script-range text normalization
//! - Bigram (Sørensen–Dice) similarity
//! - Parallel scoring against every reference column
//! - Stable tie-breaking in corpus order
//!
//! # Example
//!
//! ```rust
//! use scroll_locator::{ColumnMatcher, Normalizer, ReferenceColumn};
//!
//! let columns = vec![
//!     ReferenceColumn { column_number: 1, text: "בראשיתבראאלהים".into() },
//!     ReferenceColumn { column_number: 2, text: "ויאמראלהיםיהיאור".into() },
//! ];
//! let matcher = ColumnMatcher::new(&columns);
//! let text = Normalizer::hebrew().normalize("ויאמר אלהים, יהי אור!");
//! assert_eq!(matcher.match_column(&text), 2);
//! ```

// Submodules
mod matcher;
mod normalize;
mod similarity;

// Re-export public API
pub use matcher::{ColumnMatch, ColumnMatcher};
pub use normalize::{Normalizer, ScriptRange, HEBREW_FIRST, HEBREW_LAST};
pub use similarity::{dice_coefficient, BigramProfile};
