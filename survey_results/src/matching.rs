use log::{debug, info};

use crate::config::*;
use crate::segment::{jaccard, Segmenter, UnicodeWordSegmenter};

/// Whether questions of this type can be paired with another survey at all.
fn is_comparable(question_type: QuestionType) -> bool {
    match question_type {
        QuestionType::SingleChoice | QuestionType::MultipleChoice | QuestionType::Rating => true,
        // Free text answers have no distribution to compare.
        QuestionType::FillInBlank => false,
    }
}

/// Finds the questions of `survey1` and `survey2` that are likely the same question,
/// using the default word segmenter.
///
/// See [find_matches_with] for the details.
pub fn find_matches<'a>(
    survey1: &'a Survey,
    survey2: &'a Survey,
    rules: &MatchRules,
) -> Vec<MatchedPair<'a>> {
    find_matches_with(survey1, survey2, rules, &UnicodeWordSegmenter)
}

/// Finds the questions of `survey1` and `survey2` that are likely the same question.
///
/// Every pair of questions with the same type (fill in the blank questions excluded)
/// is scored with the Jaccard similarity of their tokenized texts. The pairs scoring
/// strictly above the threshold are returned, best first. Pairs with the same
/// score keep the order of `survey1`, then of `survey2`.
pub fn find_matches_with<'a, S: Segmenter + ?Sized>(
    survey1: &'a Survey,
    survey2: &'a Survey,
    rules: &MatchRules,
    segmenter: &S,
) -> Vec<MatchedPair<'a>> {
    let mut pairs: Vec<MatchedPair<'a>> = Vec::new();
    for q1 in survey1.iter() {
        if !is_comparable(q1.question_type) {
            continue;
        }
        let tokens1 = segmenter.segment(&q1.text);
        for q2 in survey2.iter() {
            if q2.question_type != q1.question_type {
                continue;
            }
            let similarity = jaccard(&tokens1, &segmenter.segment(&q2.text));
            if similarity > rules.threshold {
                debug!(
                    "find_matches: {:.3} {:?} <-> {:?}",
                    similarity, q1.text, q2.text
                );
                pairs.push(MatchedPair {
                    question1: q1,
                    question2: q2,
                    similarity,
                    question_type: q1.question_type,
                });
            }
        }
    }
    // sort_by is stable: ties keep the encounter order.
    pairs.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    info!(
        "find_matches: {} pairs above {} out of {}x{} questions",
        pairs.len(),
        rules.threshold,
        survey1.len(),
        survey2.len()
    );
    pairs
}
