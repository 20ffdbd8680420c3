use crate::align::{align, align_ratings};
use crate::config::*;
use crate::stats::rating_stats;

#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum StatisticKind {
    Mean,
    Median,
    StdDev,
    Min,
    Max,
}

impl StatisticKind {
    pub fn name(&self) -> &'static str {
        match self {
            StatisticKind::Mean => "mean",
            StatisticKind::Median => "median",
            StatisticKind::StdDev => "std_dev",
            StatisticKind::Min => "min",
            StatisticKind::Max => "max",
        }
    }
}

/// One line of the comparison between two matched questions.
#[derive(PartialEq, Debug, Clone)]
pub enum ComparisonRow {
    /// An option (or a rating value) with its counts and shares on both sides.
    Option {
        label: String,
        count1: u64,
        percentage1: f64,
        count2: u64,
        percentage2: f64,
        /// percentage2 - percentage1
        difference: f64,
    },
    /// A statistic of the ratings on both sides.
    Statistic {
        kind: StatisticKind,
        value1: f64,
        value2: f64,
        /// value2 - value1
        difference: f64,
    },
}

fn option_rows(aligned: &AlignedComparison) -> Vec<ComparisonRow> {
    let percentages1 = aligned.percentages1();
    let percentages2 = aligned.percentages2();
    aligned
        .options
        .iter()
        .enumerate()
        .map(|(idx, label)| ComparisonRow::Option {
            label: label.clone(),
            count1: aligned.counts1[idx],
            percentage1: percentages1[idx],
            count2: aligned.counts2[idx],
            percentage2: percentages2[idx],
            difference: percentages2[idx] - percentages1[idx],
        })
        .collect()
}

fn statistic_row(kind: StatisticKind, value1: f64, value2: f64) -> ComparisonRow {
    ComparisonRow::Statistic {
        kind,
        value1,
        value2,
        difference: value2 - value1,
    }
}

fn rating_rows(q1: &Question, q2: &Question) -> Vec<ComparisonRow> {
    let (stats1, stats2) = match (rating_stats(q1), rating_stats(q2)) {
        (Some(s1), Some(s2)) => (s1, s2),
        _ => return Vec::new(),
    };
    let mut rows = vec![
        statistic_row(StatisticKind::Mean, stats1.mean, stats2.mean),
        statistic_row(StatisticKind::Median, stats1.median, stats2.median),
    ];
    if let (Some(sd1), Some(sd2)) = (stats1.std_dev, stats2.std_dev) {
        rows.push(statistic_row(StatisticKind::StdDev, sd1, sd2));
    }
    rows.push(statistic_row(
        StatisticKind::Min,
        stats1.min as f64,
        stats2.min as f64,
    ));
    rows.push(statistic_row(
        StatisticKind::Max,
        stats1.max as f64,
        stats2.max as f64,
    ));
    rows.extend(option_rows(&align_ratings(q1, q2)));
    rows
}

/// The rows describing how two matched questions differ.
///
/// - choice questions: one row per option of the aligned comparison.
/// - rating questions: the mean, median, standard deviation, minimum and maximum,
///   then one row per rating value. Empty if one side has no integer rating.
/// - fill in the blank questions: nothing to compare.
pub fn compare(pair: &MatchedPair) -> Vec<ComparisonRow> {
    match pair.question_type {
        QuestionType::SingleChoice | QuestionType::MultipleChoice => {
            option_rows(&align(pair.question1, pair.question2))
        }
        QuestionType::Rating => rating_rows(pair.question1, pair.question2),
        QuestionType::FillInBlank => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(text: &str, qt: QuestionType, options: &[&str], counts: &[u64]) -> Question {
        let mut q = Question::new(text, qt);
        q.options = options.iter().map(|s| s.to_string()).collect();
        q.counts = counts.to_vec();
        q
    }

    fn pair<'a>(q1: &'a Question, q2: &'a Question) -> MatchedPair<'a> {
        MatchedPair {
            question1: q1,
            question2: q2,
            similarity: 1.0,
            question_type: q1.question_type,
        }
    }

    #[test]
    fn choice_rows() {
        let q1 = question("Q", QuestionType::SingleChoice, &["A", "B"], &[1, 3]);
        let q2 = question("Q", QuestionType::SingleChoice, &["B", "C"], &[1, 1]);
        let rows = compare(&pair(&q1, &q2));
        assert_eq!(
            rows,
            vec![
                ComparisonRow::Option {
                    label: "A".to_string(),
                    count1: 1,
                    percentage1: 25.0,
                    count2: 0,
                    percentage2: 0.0,
                    difference: -25.0,
                },
                ComparisonRow::Option {
                    label: "B".to_string(),
                    count1: 3,
                    percentage1: 75.0,
                    count2: 1,
                    percentage2: 50.0,
                    difference: -25.0,
                },
                ComparisonRow::Option {
                    label: "C".to_string(),
                    count1: 0,
                    percentage1: 0.0,
                    count2: 1,
                    percentage2: 50.0,
                    difference: 50.0,
                },
            ]
        );
    }

    #[test]
    fn rating_rows_start_with_statistics() {
        let q1 = question("R", QuestionType::Rating, &["1", "5"], &[1, 1]);
        let q2 = question("R", QuestionType::Rating, &["4", "5"], &[1, 3]);
        let rows = compare(&pair(&q1, &q2));
        assert_eq!(rows.len(), 5 + 3);
        assert_eq!(rows[0], statistic_row(StatisticKind::Mean, 3.0, 4.75));
        assert_eq!(rows[1], statistic_row(StatisticKind::Median, 3.0, 5.0));
        assert!(matches!(
            rows[2],
            ComparisonRow::Statistic {
                kind: StatisticKind::StdDev,
                ..
            }
        ));
        assert_eq!(rows[3], statistic_row(StatisticKind::Min, 1.0, 4.0));
        assert_eq!(rows[4], statistic_row(StatisticKind::Max, 5.0, 5.0));
        let labels: Vec<&str> = rows[5..]
            .iter()
            .filter_map(|r| match r {
                ComparisonRow::Option { label, .. } => Some(label.as_str()),
                ComparisonRow::Statistic { .. } => None,
            })
            .collect();
        assert_eq!(labels, vec!["1", "4", "5"]);
    }

    #[test]
    fn rating_without_values_has_no_rows() {
        let q1 = question("R", QuestionType::Rating, &["good"], &[3]);
        let q2 = question("R", QuestionType::Rating, &["5"], &[3]);
        assert!(compare(&pair(&q1, &q2)).is_empty());
    }

    #[test]
    fn single_responses_have_no_std_dev() {
        let q1 = question("R", QuestionType::Rating, &["2"], &[1]);
        let q2 = question("R", QuestionType::Rating, &["3"], &[1]);
        let rows = compare(&pair(&q1, &q2));
        assert_eq!(rows.len(), 4 + 2);
        let kinds: Vec<StatisticKind> = rows
            .iter()
            .filter_map(|r| match r {
                ComparisonRow::Statistic { kind, .. } => Some(*kind),
                ComparisonRow::Option { .. } => None,
            })
            .collect();
        assert_eq!(
            kinds,
            vec![
                StatisticKind::Mean,
                StatisticKind::Median,
                StatisticKind::Min,
                StatisticKind::Max
            ]
        );
    }
}
