use std::collections::BTreeMap;

use crate::config::*;
use crate::stats::{percentages, rating_values, saturating_sum};

impl AlignedComparison {
    pub fn total1(&self) -> u64 {
        saturating_sum(&self.counts1)
    }

    pub fn total2(&self) -> u64 {
        saturating_sum(&self.counts2)
    }

    /// Shares of the first question, in percent of its own total.
    pub fn percentages1(&self) -> Vec<f64> {
        percentages(&self.counts1)
    }

    /// Shares of the second question, in percent of its own total.
    pub fn percentages2(&self) -> Vec<f64> {
        percentages(&self.counts2)
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

/// Lines up the options of two questions.
///
/// The options are the union of both option lists, in first-seen order: the options
/// of `q1`, then the options only present in `q2`. A missing option counts as 0.
pub fn align(q1: &Question, q2: &Question) -> AlignedComparison {
    let mut options: Vec<String> = Vec::new();
    for option in q1.options.iter().chain(q2.options.iter()) {
        if !options.contains(option) {
            options.push(option.clone());
        }
    }
    let counts1 = options
        .iter()
        .map(|o| q1.count_for(o).unwrap_or(0))
        .collect();
    let counts2 = options
        .iter()
        .map(|o| q2.count_for(o).unwrap_or(0))
        .collect();
    AlignedComparison {
        options,
        counts1,
        counts2,
    }
}

/// Lines up the integer ratings of two rating questions, in increasing rating order.
///
/// Labels that are not integers are left out. Labels that denote the same
/// rating (`"5"` and `" 5"`) are merged.
pub fn align_ratings(q1: &Question, q2: &Question) -> AlignedComparison {
    let mut merged: BTreeMap<i64, (u64, u64)> = BTreeMap::new();
    for (rating, count) in rating_values(q1) {
        let entry = merged.entry(rating).or_default();
        entry.0 = entry.0.saturating_add(count);
    }
    for (rating, count) in rating_values(q2) {
        let entry = merged.entry(rating).or_default();
        entry.1 = entry.1.saturating_add(count);
    }
    let mut res = AlignedComparison {
        options: Vec::new(),
        counts1: Vec::new(),
        counts2: Vec::new(),
    };
    for (rating, (c1, c2)) in merged {
        res.options.push(rating.to_string());
        res.counts1.push(c1);
        res.counts2.push(c2);
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn question(qt: QuestionType, options: &[&str], counts: &[u64]) -> Question {
        let mut q = Question::new("Q", qt);
        q.options = options.iter().map(|s| s.to_string()).collect();
        q.counts = counts.to_vec();
        q
    }

    #[test]
    fn disjoint_options() {
        let q1 = question(QuestionType::SingleChoice, &["A"], &[10]);
        let q2 = question(QuestionType::SingleChoice, &["B"], &[20]);
        let a = align(&q1, &q2);
        assert_eq!(a.options, vec!["A", "B"]);
        assert_eq!(a.counts1, vec![10, 0]);
        assert_eq!(a.counts2, vec![0, 20]);
    }

    #[test]
    fn union_without_duplicates() {
        let q1 = question(QuestionType::MultipleChoice, &["A", "B", "C"], &[1, 2, 3]);
        let q2 = question(QuestionType::MultipleChoice, &["C", "D", "A"], &[4, 5, 6]);
        let a = align(&q1, &q2);
        let expected: HashSet<&str> = ["A", "B", "C", "D"].into_iter().collect();
        assert_eq!(a.len(), expected.len());
        assert_eq!(
            a.options.iter().map(|s| s.as_str()).collect::<HashSet<&str>>(),
            expected
        );
        for (idx, option) in a.options.iter().enumerate() {
            assert_eq!(a.counts1[idx], q1.count_for(option).unwrap_or(0));
            assert_eq!(a.counts2[idx], q2.count_for(option).unwrap_or(0));
        }
        assert_eq!(a.total1(), 6);
        assert_eq!(a.total2(), 15);
    }

    #[test]
    fn duplicated_option_uses_first_count() {
        let q1 = question(QuestionType::SingleChoice, &["A", "A"], &[1, 7]);
        let q2 = question(QuestionType::SingleChoice, &[], &[]);
        let a = align(&q1, &q2);
        assert_eq!(a.options, vec!["A"]);
        assert_eq!(a.counts1, vec![1]);
        assert_eq!(a.counts2, vec![0]);
        assert_eq!(a.percentages2(), vec![0.0]);
    }

    #[test]
    fn percentages_per_side() {
        let q1 = question(QuestionType::SingleChoice, &["A", "B"], &[1, 3]);
        let q2 = question(QuestionType::SingleChoice, &["B"], &[5]);
        let a = align(&q1, &q2);
        assert_eq!(a.percentages1(), vec![25.0, 75.0]);
        assert_eq!(a.percentages2(), vec![0.0, 100.0]);
    }

    #[test]
    fn ratings_are_sorted_numerically() {
        let q1 = question(QuestionType::Rating, &["10", "2", "n/a"], &[1, 2, 3]);
        let q2 = question(QuestionType::Rating, &["2", " 2", "3"], &[4, 1, 6]);
        let a = align_ratings(&q1, &q2);
        assert_eq!(a.options, vec!["2", "3", "10"]);
        assert_eq!(a.counts1, vec![2, 0, 1]);
        assert_eq!(a.counts2, vec![5, 6, 0]);
    }

    #[test]
    fn merged_ratings_saturate() {
        let q1 = question(QuestionType::Rating, &["5", " 5"], &[u64::MAX, 3]);
        let q2 = question(QuestionType::Rating, &["5"], &[1]);
        let a = align_ratings(&q1, &q2);
        assert_eq!(a.counts1, vec![u64::MAX]);
        assert_eq!(a.total1(), u64::MAX);
        assert_eq!(a.percentages1(), vec![100.0]);
    }
}
