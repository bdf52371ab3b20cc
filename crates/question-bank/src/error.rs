use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum BankError {
    #[error("Question {0} not found")]
    NotFound(Uuid),

    #[error("Question {0} was merged into {1}")]
    Retired(Uuid, Uuid),

    #[error("Question {0} already exists")]
    IdTaken(Uuid),

    #[error("Question text is empty")]
    EmptyText,

    #[error("Question text exceeds {max} characters")]
    TextTooLong { max: usize },

    #[error("Option {0} must be between 1 and 500 characters")]
    InvalidOption(char),

    #[error("An identical question already exists: {0}")]
    DuplicateText(Uuid),

    #[error("Question {0} is not approved")]
    NotApproved(Uuid),

    #[error("Authors cannot vote on their own question")]
    SelfVote,

    #[error("Comment body is empty")]
    EmptyComment,

    #[error("Comment exceeds {max} characters")]
    CommentTooLong { max: usize },

    #[error("Cannot merge a question into itself")]
    SelfMerge,

    #[error("Unsupported snapshot version {0}")]
    SnapshotVersion(u16),

    #[error("Snapshot encoding failed: {0}")]
    Encode(String),

    #[error("Snapshot decoding failed: {0}")]
    Decode(String),

    #[error("Snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
