// ********* Input data structures ***********

use std::collections::HashMap;
use std::error::Error;
use std::fmt::Display;

/// The kind of a question, as announced by the bracketed tag of its header.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum QuestionType {
    /// One option per respondent.
    SingleChoice,
    /// Any number of options per respondent. Counts do not sum to the number of respondents.
    MultipleChoice,
    /// Options are integer ratings (1 to 5 in most exports).
    Rating,
    /// Free text answers. Only the number of answers is recorded.
    FillInBlank,
}

impl QuestionType {
    /// The label used inside the header brackets.
    pub fn label(&self) -> &'static str {
        match self {
            QuestionType::SingleChoice => "单选题",
            QuestionType::MultipleChoice => "多选题",
            QuestionType::Rating => "评分题",
            QuestionType::FillInBlank => "填空题",
        }
    }

    /// Exact lookup of a bracket label.
    pub fn from_label(label: &str) -> Option<QuestionType> {
        match label {
            "单选题" => Some(QuestionType::SingleChoice),
            "多选题" => Some(QuestionType::MultipleChoice),
            "评分题" => Some(QuestionType::Rating),
            "填空题" => Some(QuestionType::FillInBlank),
            _ => None,
        }
    }

    /// A stable identifier, used in reports.
    pub fn name(&self) -> &'static str {
        match self {
            QuestionType::SingleChoice => "single_choice",
            QuestionType::MultipleChoice => "multiple_choice",
            QuestionType::Rating => "rating",
            QuestionType::FillInBlank => "fill_in_blank",
        }
    }
}

/// One survey question and its aggregated results.
///
/// Invariant: `options` and `counts` have the same length, except for
/// `FillInBlank` questions where `options` is empty and `counts` holds at most
/// the total number of answers.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Question {
    pub text: String,
    pub question_type: QuestionType,
    pub options: Vec<String>,
    pub counts: Vec<u64>,
}

impl Question {
    pub fn new(text: &str, question_type: QuestionType) -> Question {
        Question {
            text: text.to_string(),
            question_type,
            options: Vec::new(),
            counts: Vec::new(),
        }
    }

    /// The count recorded for an option label. Duplicated labels resolve to the first one.
    pub fn count_for(&self, option: &str) -> Option<u64> {
        self.options
            .iter()
            .position(|o| o == option)
            .and_then(|idx| self.counts.get(idx).cloned())
    }
}

// ******** Output data structures *********

/// All the questions parsed out of one document, keyed by question text.
///
/// Questions are kept in the order in which their text was first seen. Adding
/// a question with a text already present replaces it in place.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Survey {
    pub(crate) questions: Vec<Question>,
    pub(crate) index: HashMap<String, usize>,
}

impl Survey {
    pub fn get(&self, text: &str) -> Option<&Question> {
        self.index.get(text).map(|idx| &self.questions[*idx])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.questions.iter()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub(crate) fn insert(&mut self, question: Question) {
        match self.index.get(&question.text) {
            Some(idx) => {
                self.questions[*idx] = question;
            }
            None => {
                self.index
                    .insert(question.text.clone(), self.questions.len());
                self.questions.push(question);
            }
        }
    }
}

impl<'a> IntoIterator for &'a Survey {
    type Item = &'a Question;
    type IntoIter = std::slice::Iter<'a, Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.questions.iter()
    }
}

/// Two questions from different surveys with the same type and similar text.
///
/// The questions are borrowed from the surveys passed to the matcher.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct MatchedPair<'a> {
    pub question1: &'a Question,
    pub question2: &'a Question,
    /// Jaccard similarity of the question texts, in [0, 1].
    pub similarity: f64,
    pub question_type: QuestionType,
}

/// Per-option counts of two questions, index-aligned over the union of their options.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct AlignedComparison {
    pub options: Vec<String>,
    pub counts1: Vec<u64>,
    pub counts2: Vec<u64>,
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct SurveySummary {
    pub total_responses: u64,
    /// Questions with choices or ratings.
    pub analyzed_count: usize,
    /// Fill in the blank questions, which carry no distribution.
    pub skipped_count: usize,
}

/// Descriptive statistics of a rating question, over the parsable ratings.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct RatingStats {
    pub count: u64,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation. Not defined for fewer than two responses.
    pub std_dev: Option<f64>,
    pub min: i64,
    pub max: i64,
}

/// Errors raised by the construction APIs. Parsing and matching never fail.
#[derive(PartialEq, Debug, Clone)]
pub enum SurveyErrors {
    EmptyQuestionText,
    MismatchedCounts { options: usize, counts: usize },
    InvalidThreshold(f64),
}

impl Error for SurveyErrors {}

impl Display for SurveyErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurveyErrors::EmptyQuestionText => write!(f, "question text is empty"),
            SurveyErrors::MismatchedCounts { options, counts } => write!(
                f,
                "{} options were given with {} counts",
                options, counts
            ),
            SurveyErrors::InvalidThreshold(t) => {
                write!(f, "similarity threshold {} is not within [0, 1]", t)
            }
        }
    }
}

// ********* Configuration **********

/// Rules that govern how questions of two surveys are paired.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct MatchRules {
    /// Pairs are kept when their similarity is strictly greater than this value.
    pub threshold: f64,
}

impl MatchRules {
    pub const DEFAULT_RULES: MatchRules = MatchRules { threshold: 0.6 };

    pub fn with_threshold(threshold: f64) -> Result<MatchRules, SurveyErrors> {
        if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
            return Err(SurveyErrors::InvalidThreshold(threshold));
        }
        Ok(MatchRules { threshold })
    }
}

impl Default for MatchRules {
    fn default() -> Self {
        MatchRules::DEFAULT_RULES
    }
}
