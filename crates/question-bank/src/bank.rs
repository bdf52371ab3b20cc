use chrono::{DateTime, Utc};
use exam_common::hashing::text_fingerprint;
use exam_common::normalization::normalize_text;
use exam_common::types::{AnswerLetter, Difficulty, Question, QuestionStatus};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::BankError;

pub const MAX_TEXT_CHARS: usize = 2000;
pub const MAX_OPTION_CHARS: usize = 500;
pub const MAX_COMMENT_CHARS: usize = 2000;

/// Reputation an author earns for each approved question.
pub const APPROVAL_REPUTATION: i64 = 10;

const OPTION_LETTERS: [char; 4] = ['A', 'B', 'C', 'D'];

/// A contributor's submission before moderation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewQuestion {
    /// Caller-chosen id, e.g. when importing from another system.
    #[serde(default)]
    pub id: Option<Uuid>,
    pub text: String,
    pub options: [String; 4],
    pub correct: AnswerLetter,
    pub topic_id: Uuid,
    #[serde(default)]
    pub difficulty: Difficulty,
    pub author_id: Uuid,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    fn status(self) -> QuestionStatus {
        match self {
            Decision::Approve => QuestionStatus::Approved,
            Decision::Reject => QuestionStatus::Rejected,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum VoteKind {
    Up,
    Down,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comment {
    pub id: Uuid,
    pub question_id: Uuid,
    pub author_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Reputation for a contributor, derived from their live questions:
/// 10 per approved question, +1 per upvote, -1 per downvote, floored at zero.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContributorScore {
    pub user_id: Uuid,
    pub reputation: u32,
    pub approved_questions: u32,
}

/// Full state of the question bank.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuestionBank {
    pub(crate) questions: BTreeMap<Uuid, Question>,
    /// question id -> voter id -> vote
    pub(crate) votes: BTreeMap<Uuid, BTreeMap<Uuid, VoteKind>>,
    pub(crate) comments: BTreeMap<Uuid, Comment>,
    pub(crate) contributors: BTreeMap<Uuid, ContributorScore>,
}

fn validate_text(text: &str) -> Result<String, BankError> {
    let text = normalize_text(text);
    if text.is_empty() {
        return Err(BankError::EmptyText);
    }
    if text.chars().count() > MAX_TEXT_CHARS {
        return Err(BankError::TextTooLong {
            max: MAX_TEXT_CHARS,
        });
    }
    Ok(text)
}

fn validate_options(options: &[String; 4]) -> Result<[String; 4], BankError> {
    let mut normalized: [String; 4] = Default::default();
    for (i, option) in options.iter().enumerate() {
        let option = normalize_text(option);
        if option.is_empty() || option.chars().count() > MAX_OPTION_CHARS {
            return Err(BankError::InvalidOption(OPTION_LETTERS[i]));
        }
        normalized[i] = option;
    }
    Ok(normalized)
}

impl QuestionBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Look up a question by id, retired or not.
    pub fn question(&self, id: Uuid) -> Option<&Question> {
        self.questions.get(&id)
    }

    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.questions.values()
    }

    /// Follow merges from `id` to the live question that absorbed it.
    pub fn resolve(&self, id: Uuid) -> Option<&Question> {
        let mut current = self.questions.get(&id)?;
        // merges never form cycles
        for _ in 0..self.questions.len() {
            match current.merged_into {
                Some(next) => current = self.questions.get(&next)?,
                None => return Some(current),
            }
        }
        None
    }

    pub fn comments_for(&self, question_id: Uuid) -> Vec<&Comment> {
        let mut comments: Vec<&Comment> = self
            .comments
            .values()
            .filter(|c| c.question_id == question_id)
            .collect();
        comments.sort_by_key(|c| (c.created_at, c.id));
        comments
    }

    pub fn contributor(&self, user_id: Uuid) -> Option<&ContributorScore> {
        self.contributors.get(&user_id)
    }

    pub fn vote_of(&self, question_id: Uuid, voter: Uuid) -> Option<VoteKind> {
        self.votes
            .get(&question_id)
            .and_then(|v| v.get(&voter))
            .copied()
    }

    fn live(&self, id: Uuid) -> Result<&Question, BankError> {
        let question = self.questions.get(&id).ok_or(BankError::NotFound(id))?;
        match question.merged_into {
            Some(target) => Err(BankError::Retired(id, target)),
            None => Ok(question),
        }
    }

    fn live_mut(&mut self, id: Uuid) -> Result<&mut Question, BankError> {
        let question = self.questions.get_mut(&id).ok_or(BankError::NotFound(id))?;
        match question.merged_into {
            Some(target) => Err(BankError::Retired(id, target)),
            None => Ok(question),
        }
    }

    /// A live, non-rejected question other than `except` with the same fingerprint.
    fn identical_to(&self, text: &str, except: Uuid) -> Option<Uuid> {
        let fingerprint = text_fingerprint(text);
        self.questions
            .values()
            .find(|q| {
                q.id != except
                    && !q.is_retired()
                    && q.status != QuestionStatus::Rejected
                    && text_fingerprint(&q.text) == fingerprint
            })
            .map(|q| q.id)
    }

    /// Add a contributor's question as pending.
    pub fn submit(&mut self, new: NewQuestion, now: DateTime<Utc>) -> Result<Uuid, BankError> {
        let text = validate_text(&new.text)?;
        let options = validate_options(&new.options)?;

        let id = new.id.unwrap_or_else(Uuid::new_v4);
        if self.questions.contains_key(&id) {
            return Err(BankError::IdTaken(id));
        }

        if let Some(existing) = self.identical_to(&text, id) {
            return Err(BankError::DuplicateText(existing));
        }

        self.questions.insert(
            id,
            Question {
                id,
                text,
                options,
                correct: new.correct,
                topic_id: new.topic_id,
                difficulty: new.difficulty,
                status: QuestionStatus::Pending,
                author_id: new.author_id,
                upvotes: 0,
                downvotes: 0,
                created_at: now,
                updated_at: now,
                merged_into: None,
            },
        );
        self.recompute_contributor(new.author_id);

        info!("Question {id} submitted by {}", new.author_id);
        Ok(id)
    }

    /// Approve or reject a question. Moderated questions may be moderated again.
    pub fn moderate(
        &mut self,
        id: Uuid,
        decision: Decision,
        now: DateTime<Utc>,
    ) -> Result<QuestionStatus, BankError> {
        let status = decision.status();
        let question = self.live(id)?;
        if question.status == status {
            return Ok(status);
        }
        let previous = question.status;
        if previous == QuestionStatus::Rejected {
            if let Some(existing) = self.identical_to(&question.text, id) {
                return Err(BankError::DuplicateText(existing));
            }
        }

        let question = self.live_mut(id)?;
        question.status = status;
        question.updated_at = now;
        let author = question.author_id;
        self.recompute_contributor(author);

        info!("Question {id} moved from {previous} to {status}");
        Ok(status)
    }

    /// Record or change a user's vote on an approved question.
    pub fn vote(
        &mut self,
        question_id: Uuid,
        voter: Uuid,
        kind: VoteKind,
    ) -> Result<(), BankError> {
        let question = self.live(question_id)?;
        if question.status != QuestionStatus::Approved {
            return Err(BankError::NotApproved(question_id));
        }
        if question.author_id == voter {
            return Err(BankError::SelfVote);
        }
        let author = question.author_id;

        let previous = self
            .votes
            .entry(question_id)
            .or_default()
            .insert(voter, kind);
        if previous == Some(kind) {
            return Ok(());
        }
        self.recount(question_id);
        self.recompute_contributor(author);

        debug!("Vote {kind:?} by {voter} on {question_id}");
        Ok(())
    }

    /// Withdraw a user's vote. Returns whether a vote existed.
    pub fn unvote(&mut self, question_id: Uuid, voter: Uuid) -> Result<bool, BankError> {
        let author = self.live(question_id)?.author_id;
        let removed = self
            .votes
            .get_mut(&question_id)
            .and_then(|v| v.remove(&voter))
            .is_some();
        if removed {
            self.recount(question_id);
            self.recompute_contributor(author);
        }
        Ok(removed)
    }

    pub fn comment(
        &mut self,
        question_id: Uuid,
        author_id: Uuid,
        body: &str,
        now: DateTime<Utc>,
    ) -> Result<Uuid, BankError> {
        self.live(question_id)?;
        let body = body.trim();
        if body.is_empty() {
            return Err(BankError::EmptyComment);
        }
        if body.chars().count() > MAX_COMMENT_CHARS {
            return Err(BankError::CommentTooLong {
                max: MAX_COMMENT_CHARS,
            });
        }

        let id = Uuid::new_v4();
        self.comments.insert(
            id,
            Comment {
                id,
                question_id,
                author_id,
                body: body.to_string(),
                created_at: now,
            },
        );
        Ok(id)
    }

    /// Fold `source` into `target` and retire `source`. The target must be approved.
    ///
    /// Votes move to the target unless the voter already voted there (the
    /// target's vote wins) or the voter authored the target. Comments are
    /// re-pointed to the target.
    pub fn merge(
        &mut self,
        source: Uuid,
        target: Uuid,
        now: DateTime<Utc>,
    ) -> Result<(), BankError> {
        if source == target {
            return Err(BankError::SelfMerge);
        }
        let source_author = self.live(source)?.author_id;
        let target = self.live(target)?;
        if target.status != QuestionStatus::Approved {
            return Err(BankError::NotApproved(target.id));
        }
        let (target, target_author) = (target.id, target.author_id);

        let moved_votes = self.votes.remove(&source).unwrap_or_default();
        let target_votes = self.votes.entry(target).or_default();
        let mut transferred = 0usize;
        for (voter, kind) in moved_votes {
            if voter == target_author || target_votes.contains_key(&voter) {
                continue;
            }
            target_votes.insert(voter, kind);
            transferred += 1;
        }

        let mut moved_comments = 0usize;
        for comment in self.comments.values_mut() {
            if comment.question_id == source {
                comment.question_id = target;
                moved_comments += 1;
            }
        }

        if let Some(question) = self.questions.get_mut(&source) {
            question.merged_into = Some(target);
            question.updated_at = now;
        }
        if let Some(question) = self.questions.get_mut(&target) {
            question.updated_at = now;
        }
        self.recount(source);
        self.recount(target);
        self.recompute_contributor(source_author);
        self.recompute_contributor(target_author);

        info!(
            "Merged question {source} into {target}: {transferred} votes and {moved_comments} comments moved"
        );
        Ok(())
    }

    fn recount(&mut self, question_id: Uuid) {
        let (up, down) = self
            .votes
            .get(&question_id)
            .map(|votes| {
                votes.values().fold((0u32, 0u32), |(up, down), kind| match kind {
                    VoteKind::Up => (up + 1, down),
                    VoteKind::Down => (up, down + 1),
                })
            })
            .unwrap_or((0, 0));
        if let Some(question) = self.questions.get_mut(&question_id) {
            question.upvotes = up;
            question.downvotes = down;
        }
    }

    fn recompute_contributor(&mut self, user_id: Uuid) {
        let mut approved = 0u32;
        let mut score: i64 = 0;
        for question in self
            .questions
            .values()
            .filter(|q| q.author_id == user_id && !q.is_retired())
        {
            if question.status == QuestionStatus::Approved {
                approved += 1;
                score += APPROVAL_REPUTATION;
            }
            score += question.upvotes as i64 - question.downvotes as i64;
        }
        self.contributors.insert(
            user_id,
            ContributorScore {
                user_id,
                reputation: score.clamp(0, u32::MAX as i64) as u32,
                approved_questions: approved,
            },
        );
    }
}
