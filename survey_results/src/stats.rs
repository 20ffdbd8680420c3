use log::debug;

use crate::config::*;

/// The number of answers recorded for a question.
///
/// For choices and ratings, it is the sum of the counts. For multiple choice
/// questions this counts selections, not respondents.
pub fn question_total(question: &Question) -> u64 {
    match question.question_type {
        QuestionType::FillInBlank => question.counts.first().cloned().unwrap_or(0),
        QuestionType::SingleChoice | QuestionType::MultipleChoice | QuestionType::Rating => {
            saturating_sum(&question.counts)
        }
    }
}

/// Sum of counts, capped at `u64::MAX`.
pub(crate) fn saturating_sum(counts: &[u64]) -> u64 {
    counts.iter().fold(0, |acc, c| acc.saturating_add(*c))
}

// Exact sum: a u128 cannot overflow on a slice of u64.
fn wide_sum<'a>(counts: impl Iterator<Item = &'a u64>) -> u128 {
    counts.map(|c| *c as u128).sum()
}

/// The share of every count in percent. An empty total is treated as 1.
pub fn percentages(counts: &[u64]) -> Vec<f64> {
    let total = wide_sum(counts.iter()).max(1) as f64;
    counts.iter().map(|c| *c as f64 / total * 100.0).collect()
}

/// Overall numbers for a survey.
///
/// The total number of responses is estimated as the largest total of any question.
pub fn summary(survey: &Survey) -> SurveySummary {
    let mut res = SurveySummary {
        total_responses: 0,
        analyzed_count: 0,
        skipped_count: 0,
    };
    for question in survey.iter() {
        match question.question_type {
            QuestionType::FillInBlank => res.skipped_count += 1,
            QuestionType::SingleChoice | QuestionType::MultipleChoice | QuestionType::Rating => {
                res.analyzed_count += 1
            }
        }
        res.total_responses = res.total_responses.max(question_total(question));
    }
    res
}

/// The (rating, count) pairs of a rating question whose label is an integer.
///
/// Other labels are left out. Questions of other types have no ratings.
pub fn rating_values(question: &Question) -> Vec<(i64, u64)> {
    match question.question_type {
        QuestionType::Rating => question
            .options
            .iter()
            .zip(question.counts.iter())
            .filter_map(|(option, count)| match option.trim().parse::<i64>() {
                Ok(rating) => Some((rating, *count)),
                Err(_) => {
                    debug!(
                        "rating_values: {:?}: ignoring option {:?}",
                        question.text, option
                    );
                    None
                }
            })
            .collect(),
        QuestionType::SingleChoice | QuestionType::MultipleChoice | QuestionType::FillInBlank => {
            Vec::new()
        }
    }
}

/// The average rating, weighted by the counts.
///
/// None if the question is not a rating question, or if it has no response
/// with an integer rating.
pub fn weighted_rating_average(question: &Question) -> Option<f64> {
    let values = rating_values(question);
    let total = wide_sum(values.iter().map(|(_, c)| c));
    if total == 0 {
        return None;
    }
    let weighted: f64 = values.iter().map(|(r, c)| *r as f64 * *c as f64).sum();
    Some(weighted / total as f64)
}

// The k-th rating (0-based) once all the responses are sorted.
fn nth_rating(sorted: &[(i64, u64)], k: u128) -> i64 {
    let mut seen: u128 = 0;
    for (rating, count) in sorted {
        seen += *count as u128;
        if k < seen {
            return *rating;
        }
    }
    // k is always below the total
    sorted.last().map(|(r, _)| *r).unwrap_or(0)
}

/// Descriptive statistics of a rating question.
///
/// The statistics are computed over the individual responses, without expanding them.
pub fn rating_stats(question: &Question) -> Option<RatingStats> {
    let mut values: Vec<(i64, u64)> = rating_values(question)
        .into_iter()
        .filter(|(_, c)| *c > 0)
        .collect();
    values.sort_by_key(|(r, _)| *r);
    let count = wide_sum(values.iter().map(|(_, c)| c));
    if count == 0 {
        return None;
    }
    let n = count as f64;
    let mean = values.iter().map(|(r, c)| *r as f64 * *c as f64).sum::<f64>() / n;
    let median = if count % 2 == 1 {
        nth_rating(&values, count / 2) as f64
    } else {
        (nth_rating(&values, count / 2 - 1) as f64 + nth_rating(&values, count / 2) as f64) / 2.0
    };
    let std_dev = if count > 1 {
        let sq: f64 = values
            .iter()
            .map(|(r, c)| (*r as f64 - mean).powi(2) * *c as f64)
            .sum();
        Some((sq / (n - 1.0)).sqrt())
    } else {
        None
    };
    Some(RatingStats {
        count: u64::try_from(count).unwrap_or(u64::MAX),
        mean,
        median,
        std_dev,
        min: values.first().map(|(r, _)| *r)?,
        max: values.last().map(|(r, _)| *r)?,
    })
}
