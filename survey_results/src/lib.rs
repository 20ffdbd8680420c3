//! Parsing and comparison of aggregated survey results.
//!
//! Survey platforms export their results as short text documents, one block per
//! question (see the [manual] for the format). This crate turns such a document
//! into a [Survey], derives statistics from it, and pairs the questions of two
//! surveys that ask the same thing so that their answers can be compared.
//!
//! ```
//! use survey_results::*;
//!
//! let before = parse_survey("问题1:【评分题】How satisfied are you?\n1: 2\n5: 8\n");
//! let after = parse_survey("问题1:【评分题】How satisfied are you?\n1: 1\n4: 3\n5: 6\n");
//!
//! let pairs = find_matches(&before, &after, &MatchRules::DEFAULT_RULES);
//! assert_eq!(pairs.len(), 1);
//! let aligned = align(pairs[0].question1, pairs[0].question2);
//! assert_eq!(aligned.options, vec!["1", "5", "4"]);
//! assert_eq!(aligned.counts2, vec![1, 6, 3]);
//! ```
//!
//! All the operations are pure functions of their inputs. Nothing is cached and
//! surveys are not modified once parsed.

mod config;

pub mod align;
pub mod builder;
pub mod comparison;
pub mod manual;
pub mod matching;
pub mod parser;
pub mod segment;
pub mod stats;

pub use crate::align::{align, align_ratings};
pub use crate::comparison::{compare, ComparisonRow, StatisticKind};
pub use crate::config::*;
pub use crate::matching::{find_matches, find_matches_with};
pub use crate::parser::parse_survey;
pub use crate::segment::{jaccard, Segmenter, UnicodeWordSegmenter};
pub use crate::stats::{
    percentages, question_total, rating_stats, summary, weighted_rating_average,
};
