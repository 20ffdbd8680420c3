pub use crate::config::*;

/// A builder for assembling a survey question by question.
///
/// The parser uses it to commit every block it reads. It is also the simplest way
/// to build surveys from data that does not come from a document.
///
/// ```
/// use survey_results::builder::Builder;
/// use survey_results::{QuestionType, SurveyErrors};
///
/// let mut builder = Builder::new();
/// builder.add_choices(
///     "How did you hear about us?",
///     QuestionType::SingleChoice,
///     &["Friends".to_string(), "Ads".to_string()],
///     &[12, 30],
/// )?;
/// builder.add_fill_in_blank("Anything else?", Some(7))?;
///
/// let survey = builder.build();
/// assert_eq!(survey.len(), 2);
/// # Ok::<(), SurveyErrors>(())
/// ```
#[derive(Debug, Default)]
pub struct Builder {
    pub(crate) _survey: Survey,
}

impl Builder {
    pub fn new() -> Builder {
        Builder {
            _survey: Survey::default(),
        }
    }

    /// Adds a question to the survey.
    ///
    /// A question with the same text as an earlier one replaces it.
    pub fn add_question(&mut self, question: Question) -> Result<(), SurveyErrors> {
        if question.text.trim().is_empty() {
            return Err(SurveyErrors::EmptyQuestionText);
        }
        if question.question_type != QuestionType::FillInBlank
            && question.options.len() != question.counts.len()
        {
            return Err(SurveyErrors::MismatchedCounts {
                options: question.options.len(),
                counts: question.counts.len(),
            });
        }
        self._survey.insert(question);
        Ok(())
    }

    /// Adds a question with options.
    ///
    /// options and counts are parallel slices, in display order.
    pub fn add_choices(
        &mut self,
        text: &str,
        question_type: QuestionType,
        options: &[String],
        counts: &[u64],
    ) -> Result<(), SurveyErrors> {
        if options.len() != counts.len() {
            return Err(SurveyErrors::MismatchedCounts {
                options: options.len(),
                counts: counts.len(),
            });
        }
        let mut question = Question::new(text, question_type);
        question.options = options.to_vec();
        question.counts = counts.to_vec();
        self.add_question(question)
    }

    /// Adds a fill in the blank question, with its number of answers if known.
    pub fn add_fill_in_blank(&mut self, text: &str, total: Option<u64>) -> Result<(), SurveyErrors> {
        let mut question = Question::new(text, QuestionType::FillInBlank);
        question.counts = total.into_iter().collect();
        self.add_question(question)
    }

    pub fn build(self) -> Survey {
        self._survey
    }
}
