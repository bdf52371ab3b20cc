//! Question bank for the exam site.
//!
//! Holds every question with its moderation status, per-user votes, comments and
//! contributor reputation in one serializable state. All collections are
//! `BTreeMap`s so iteration, snapshots and listings are deterministic. Vote
//! counters and reputation are always recomputed from the vote table rather than
//! adjusted in place.

pub mod bank;
pub mod error;
pub mod listing;
pub mod snapshot;

pub use bank::{Comment, ContributorScore, Decision, NewQuestion, QuestionBank, VoteKind};
pub use error::BankError;
pub use listing::QuestionFilter;
