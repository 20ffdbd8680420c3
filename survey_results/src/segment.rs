//! Splitting question texts into token sets, and comparing the sets.

use std::collections::HashSet;

use unicode_segmentation::UnicodeSegmentation;

/// Turns a text into the set of tokens used for similarity.
///
/// Implementations must be deterministic. They may be shared between threads
/// when they are `Sync`.
pub trait Segmenter {
    fn segment(&self, text: &str) -> HashSet<String>;
}

/// Splits on Unicode word boundaries (UAX #29) and lowercases the words.
///
/// CJK text has no spaces; each ideograph becomes its own token, so Chinese
/// questions are compared character by character.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub struct UnicodeWordSegmenter;

impl Segmenter for UnicodeWordSegmenter {
    fn segment(&self, text: &str) -> HashSet<String> {
        text.unicode_words().map(|w| w.to_lowercase()).collect()
    }
}

impl<F> Segmenter for F
where
    F: Fn(&str) -> HashSet<String>,
{
    fn segment(&self, text: &str) -> HashSet<String> {
        self(text)
    }
}

/// |A ∩ B| / |A ∪ B|, and 0 when one of the sets is empty.
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let inter = a.intersection(b).count();
    let union = a.len() + b.len() - inter;
    inter as f64 / union as f64
}

/// Similarity of two texts under the given segmenter.
pub fn text_similarity<S: Segmenter + ?Sized>(segmenter: &S, text1: &str, text2: &str) -> f64 {
    jaccard(&segmenter.segment(text1), &segmenter.segment(text2))
}
