#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use exam_common::types::{AnswerLetter, Difficulty};
use question_bank::{Decision, NewQuestion, QuestionBank};
use uuid::Uuid;

pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
}

pub fn user(n: u128) -> Uuid {
    Uuid::from_u128(0xA000 + n)
}

pub fn topic(n: u128) -> Uuid {
    Uuid::from_u128(0xB000 + n)
}

pub fn qid(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

pub fn new_question(n: u128, text: &str, author: Uuid) -> NewQuestion {
    NewQuestion {
        id: Some(qid(n)),
        text: text.to_string(),
        options: [
            "Option one".to_string(),
            "Option two".to_string(),
            "Option three".to_string(),
            "Option four".to_string(),
        ],
        correct: AnswerLetter::B,
        topic_id: topic(1),
        difficulty: Difficulty::Medium,
        author_id: author,
    }
}

/// Submit and approve question `n` at `at(n)`.
pub fn approved(bank: &mut QuestionBank, n: u128, text: &str, author: Uuid) -> Uuid {
    let id = bank
        .submit(new_question(n, text, author), at(n as i64))
        .unwrap();
    bank.moderate(id, Decision::Approve, at(n as i64)).unwrap();
    id
}
