mod fixtures;

use exam_common::cursor::decode_cursor;
use exam_common::pagination::PageRequest;
use exam_common::types::{Difficulty, QuestionStatus};
use fixtures::*;
use question_bank::{QuestionBank, QuestionFilter};

fn bank_with(count: u128) -> QuestionBank {
    let mut bank = QuestionBank::new();
    for n in 1..=count {
        approved(&mut bank, n, &format!("Question number {n}"), user(1));
    }
    bank
}

#[test]
fn lists_approved_newest_first_with_total() {
    let bank = bank_with(25);
    let page = bank.list(&QuestionFilter::default(), &PageRequest::first(20));

    assert_eq!(page.data.len(), 20);
    assert!(page.has_more);
    assert_eq!(page.total, Some(25));
    assert_eq!(page.data[0].id, qid(25));

    let cursor = decode_cursor(page.next_cursor.as_deref().unwrap()).unwrap();
    let next = bank.list(&QuestionFilter::default(), &PageRequest::after(cursor, 20));
    assert_eq!(next.data.len(), 5);
    assert!(!next.has_more);
    assert_eq!(next.total, None);
    assert_eq!(next.data[4].id, qid(1));
}

#[test]
fn status_filter() {
    let mut bank = bank_with(3);
    bank.submit(new_question(10, "Still waiting for review", user(2)), at(10))
        .unwrap();

    let pending = QuestionFilter {
        status: QuestionStatus::Pending,
        ..QuestionFilter::default()
    };
    let page = bank.list(&pending, &PageRequest::default());
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].id, qid(10));
    assert_eq!(
        bank.list(&QuestionFilter::default(), &PageRequest::default()).total,
        Some(3)
    );
}

#[test]
fn topic_and_difficulty_filters() {
    let mut bank = QuestionBank::new();
    let mut hard = new_question(1, "Hard powerplant question", user(1));
    hard.difficulty = Difficulty::Hard;
    hard.topic_id = topic(2);
    bank.submit(hard, at(1)).unwrap();
    bank.moderate(qid(1), question_bank::Decision::Approve, at(1))
        .unwrap();
    approved(&mut bank, 2, "Medium airframe question", user(1));

    let by_topic = QuestionFilter {
        topic_id: Some(topic(2)),
        ..QuestionFilter::default()
    };
    let page = bank.list(&by_topic, &PageRequest::default());
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].id, qid(1));

    let by_difficulty = QuestionFilter {
        difficulty: Some(Difficulty::Medium),
        ..QuestionFilter::default()
    };
    let page = bank.list(&by_difficulty, &PageRequest::default());
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].id, qid(2));
}

#[test]
fn retired_questions_are_not_listed() {
    let mut bank = bank_with(3);
    bank.merge(qid(3), qid(1), at(100)).unwrap();
    let page = bank.list(&QuestionFilter::default(), &PageRequest::default());
    let ids: Vec<_> = page.data.iter().map(|q| q.id).collect();
    assert_eq!(ids, vec![qid(2), qid(1)]);
    assert_eq!(page.total, Some(2));
}

#[test]
fn tied_timestamps_page_by_id_desc() {
    let mut bank = QuestionBank::new();
    for n in [4u128, 2, 5, 1, 3] {
        bank.submit(new_question(n, &format!("Tied question {n}"), user(1)), at(0))
            .unwrap();
        bank.moderate(qid(n), question_bank::Decision::Approve, at(0))
            .unwrap();
    }

    let mut request = PageRequest::first(2);
    let mut seen = Vec::new();
    loop {
        let page = bank.list(&QuestionFilter::default(), &request);
        seen.extend(page.data.iter().map(|q| q.id));
        match page.next_cursor {
            Some(token) => request = PageRequest::after(decode_cursor(&token).unwrap(), 2),
            None => break,
        }
    }
    assert_eq!(seen, vec![qid(5), qid(4), qid(3), qid(2), qid(1)]);
}

#[test]
fn duplicate_candidates_are_newest_approved_live() {
    let mut bank = bank_with(5);
    bank.submit(new_question(10, "Pending question", user(1)), at(10))
        .unwrap();
    bank.merge(qid(5), qid(4), at(20)).unwrap();

    let records = bank.duplicate_candidates(3);
    let ids: Vec<_> = records.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![qid(4), qid(3), qid(2)]);
    assert_eq!(records[0].question_text, "Question number 4");
}
