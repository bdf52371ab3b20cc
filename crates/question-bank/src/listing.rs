use exam_common::pagination::{listing_order, paginate, Page, PageRequest};
use exam_common::types::{Difficulty, Question, QuestionRecord, QuestionStatus};
use uuid::Uuid;

use crate::bank::QuestionBank;

/// Listing filter. Retired questions never match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuestionFilter {
    pub status: QuestionStatus,
    pub topic_id: Option<Uuid>,
    pub difficulty: Option<Difficulty>,
}

impl Default for QuestionFilter {
    fn default() -> Self {
        Self {
            status: QuestionStatus::Approved,
            topic_id: None,
            difficulty: None,
        }
    }
}

impl QuestionFilter {
    pub fn matches(&self, question: &Question) -> bool {
        !question.is_retired()
            && question.status == self.status
            && self.topic_id.map_or(true, |t| t == question.topic_id)
            && self.difficulty.map_or(true, |d| d == question.difficulty)
    }
}

impl QuestionBank {
    /// One page of matching questions, newest first.
    ///
    /// `total` is only reported for the first page.
    pub fn list(&self, filter: &QuestionFilter, request: &PageRequest) -> Page<Question> {
        let matching = self.questions.values().filter(|q| filter.matches(q));
        let page = paginate(matching.clone(), request);
        if request.cursor.is_none() {
            page.with_total(matching.count() as u64)
        } else {
            page
        }
    }

    /// Newest approved live questions for a duplicate scan, at most `limit`.
    pub fn duplicate_candidates(&self, limit: usize) -> Vec<QuestionRecord> {
        let mut approved: Vec<&Question> = self
            .questions
            .values()
            .filter(|q| !q.is_retired() && q.status == QuestionStatus::Approved)
            .collect();
        approved.sort_by(|a, b| listing_order(*a, *b));
        approved
            .into_iter()
            .take(limit)
            .map(Question::record)
            .collect()
    }
}
