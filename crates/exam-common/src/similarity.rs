use std::collections::BTreeSet;

use crate::tokenization::significant_tokens;
use crate::types::{QuestionRecord, SimilarityPair};

/// Minimum score at which a pair is reported as a candidate duplicate.
pub const DUPLICATE_THRESHOLD: u8 = 40;

/// Callers never scan more than this many questions at once.
pub const DEFAULT_SCAN_CAP: usize = 200;

/// Integer similarity percentage between two question texts.
///
/// shared = |A ∩ B| over the significant-token sets
/// score = round(shared * 100 / max(|A|, |B|))
///
/// Two texts with no significant tokens score 0.
pub fn similarity(a: &str, b: &str) -> u8 {
    token_overlap(&significant_tokens(a), &significant_tokens(b))
}

/// Similarity over already-tokenized sets.
pub fn token_overlap(a: &BTreeSet<String>, b: &BTreeSet<String>) -> u8 {
    let larger = a.len().max(b.len()) as u64;
    if larger == 0 {
        return 0;
    }
    let shared = a.intersection(b).count() as u64;
    // Round half up: (2 * shared * 100 + larger) / (2 * larger)
    ((shared * 200 + larger) / (larger * 2)) as u8
}

/// Compare every unordered pair of records and keep those scoring at least
/// `threshold`, highest first. Ties keep discovery order.
pub fn find_duplicates(records: &[QuestionRecord], threshold: u8) -> Vec<SimilarityPair> {
    let token_sets: Vec<BTreeSet<String>> = records
        .iter()
        .map(|r| significant_tokens(&r.question_text))
        .collect();

    let mut pairs = Vec::new();
    for i in 0..records.len() {
        for j in (i + 1)..records.len() {
            let score = token_overlap(&token_sets[i], &token_sets[j]);
            if score >= threshold {
                pairs.push(SimilarityPair {
                    question1: records[i].clone(),
                    question2: records[j].clone(),
                    similarity: score,
                });
            }
        }
    }

    pairs.sort_by(|a, b| b.similarity.cmp(&a.similarity));
    pairs
}

/// Threshold and input cap for a duplicate scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DuplicateScan {
    pub threshold: u8,
    pub max_questions: usize,
}

impl Default for DuplicateScan {
    fn default() -> Self {
        Self {
            threshold: DUPLICATE_THRESHOLD,
            max_questions: DEFAULT_SCAN_CAP,
        }
    }
}

impl DuplicateScan {
    /// Scan at most `max_questions` records from the front of `records`.
    pub fn run(&self, records: &[QuestionRecord]) -> Vec<SimilarityPair> {
        let scanned = &records[..records.len().min(self.max_questions)];
        let pairs = find_duplicates(scanned, self.threshold);
        tracing::debug!(
            "duplicate scan over {} questions found {} candidate pairs",
            scanned.len(),
            pairs.len()
        );
        pairs
    }
}
