//! TF-IDF cosine similarity between a JD and one resume
//!
//! Each comparison builds its own two-document corpus, so a candidate's score
//! never depends on who else is in the batch.

use crate::processing::text_processor::{clamp_score, round1, TextProcessor};
use std::collections::HashMap;

const DEFAULT_MAX_FEATURES: usize = 5000;

pub struct SemanticScorer {
    processor: TextProcessor,
    max_features: usize,
}

impl Default for SemanticScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SemanticScorer {
    pub fn new() -> Self {
        Self::with_max_features(DEFAULT_MAX_FEATURES)
    }

    pub fn with_max_features(max_features: usize) -> Self {
        Self {
            processor: TextProcessor::new(),
            max_features,
        }
    }

    /// Similarity as a percentage rounded to one decimal. 0.0 when either side has no terms.
    pub fn similarity(&self, jd_text: &str, resume_text: &str) -> f64 {
        let jd_terms = self.term_counts(jd_text);
        let resume_terms = self.term_counts(resume_text);

        let vocabulary = self.vocabulary(&jd_terms, &resume_terms);
        if vocabulary.is_empty() {
            return 0.0;
        }

        let jd_vector = Self::tfidf_vector(&vocabulary, &jd_terms, &resume_terms);
        let resume_vector = Self::tfidf_vector(&vocabulary, &resume_terms, &jd_terms);

        clamp_score(round1(cosine_similarity(&jd_vector, &resume_vector) * 100.0))
    }

    /// Unigram and bigram counts over stop-word-free tokens.
    fn term_counts(&self, text: &str) -> HashMap<String, usize> {
        let tokens = self.processor.tokenize(text);
        let mut counts = HashMap::new();

        for token in &tokens {
            *counts.entry(token.clone()).or_insert(0) += 1;
        }
        for pair in tokens.windows(2) {
            *counts.entry(format!("{} {}", pair[0], pair[1])).or_insert(0) += 1;
        }

        counts
    }

    /// Terms kept after capping by corpus frequency, sorted for a stable layout.
    fn vocabulary(&self, a: &HashMap<String, usize>, b: &HashMap<String, usize>) -> Vec<String> {
        let mut totals: HashMap<&str, usize> = HashMap::new();
        for (term, count) in a.iter().chain(b.iter()) {
            *totals.entry(term.as_str()).or_insert(0) += count;
        }

        let mut terms: Vec<(&str, usize)> = totals.into_iter().collect();
        if terms.len() > self.max_features {
            terms.sort_by(|x, y| y.1.cmp(&x.1).then(x.0.cmp(y.0)));
            terms.truncate(self.max_features);
        }

        let mut vocabulary: Vec<String> = terms.into_iter().map(|(term, _)| term.to_string()).collect();
        vocabulary.sort();
        vocabulary
    }

    // Smooth idf over the two-document corpus, raw term frequency, L2 normalized.
    fn tfidf_vector(
        vocabulary: &[String],
        own: &HashMap<String, usize>,
        other: &HashMap<String, usize>,
    ) -> Vec<f64> {
        let n_docs: f64 = 2.0;
        let mut vector: Vec<f64> = vocabulary
            .iter()
            .map(|term| {
                let tf = own.get(term).copied().unwrap_or(0) as f64;
                if tf == 0.0 {
                    return 0.0;
                }
                let df: f64 = if other.contains_key(term) { 2.0 } else { 1.0 };
                let idf = ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0;
                tf * idf
            })
            .collect();

        let norm = vector.iter().map(|x| x * x).sum::<f64>().sqrt();
        if norm > 0.0 {
            vector.iter_mut().for_each(|x| *x /= norm);
        }
        vector
    }
}

/// Cosine of two equal-length vectors; 0 for empty or zero-norm input.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.is_empty() || a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot_product / (norm_a * norm_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_texts_score_full() {
        let scorer = SemanticScorer::new();
        let text = "Export sales manager for chemical distributors";
        assert_eq!(scorer.similarity(text, text), 100.0);
    }

    #[test]
    fn test_disjoint_texts_score_zero() {
        let scorer = SemanticScorer::new();
        assert_eq!(scorer.similarity("chemical export sales", "python backend developer"), 0.0);
        assert_eq!(scorer.similarity("", "python developer"), 0.0);
        assert_eq!(scorer.similarity("", ""), 0.0);
    }

    #[test]
    fn test_related_text_scores_higher() {
        let scorer = SemanticScorer::new();
        let jd = "Sales manager with export sales experience in chemical industry";
        let close = scorer.similarity(jd, "Export sales manager, ten years in the chemical industry");
        let far = scorer.similarity(jd, "Frontend developer building React dashboards, some sales exposure");
        assert!(close > far);
        assert!((0.0..=100.0).contains(&close));
    }

    #[test]
    fn test_feature_cap() {
        let scorer = SemanticScorer::with_max_features(1);
        let score = scorer.similarity("sales sales export", "sales chemical");
        assert_eq!(score, 100.0);
    }

    #[test]
    fn test_cosine_edge_cases() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-9);
    }
}
