use chrono::{DateTime, TimeZone, Utc};
use exam_common::pagination::Keyed;
use exam_common::types::QuestionRecord;
use uuid::Uuid;

/// Minimal pageable row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Keyed for Row {
    fn sort_key(&self) -> (DateTime<Utc>, Uuid) {
        (self.created_at, self.id)
    }
}

pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
}

/// Deterministic id whose ordering follows `n`.
pub fn id(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

/// `count` rows, one second apart.
pub fn rows(count: u128) -> Vec<Row> {
    (0..count)
        .map(|n| Row {
            id: id(n + 1),
            created_at: at(n as i64),
        })
        .collect()
}

#[allow(dead_code)]
pub fn record(n: u128, text: &str) -> QuestionRecord {
    QuestionRecord {
        id: id(n),
        question_text: text.to_string(),
    }
}
