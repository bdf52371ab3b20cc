mod fixtures;

use fixtures::*;
use question_bank::{BankError, QuestionBank, VoteKind};
use std::path::PathBuf;

fn populated() -> QuestionBank {
    let mut bank = QuestionBank::new();
    approved(&mut bank, 1, "What is the purpose of safety wire?", user(1));
    approved(&mut bank, 2, "Explain the purpose of safety wiring", user(2));
    bank.vote(qid(1), user(3), VoteKind::Up).unwrap();
    bank.comment(qid(2), user(3), "Looks like a duplicate", at(9))
        .unwrap();
    bank.merge(qid(2), qid(1), at(10)).unwrap();
    bank
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("question-bank-tests-{}", std::process::id()))
        .join(name)
}

#[test]
fn bytes_round_trip() {
    let bank = populated();
    let restored = QuestionBank::from_bytes(&bank.to_bytes().unwrap()).unwrap();
    assert_eq!(restored, bank);
}

#[test]
fn garbage_is_a_decode_error() {
    assert!(matches!(
        QuestionBank::from_bytes(b"definitely not cbor"),
        Err(BankError::Decode(_))
    ));
}

#[test]
fn save_and_load() {
    let path = temp_path("bank.cbor");
    let bank = populated();
    bank.save(&path).unwrap();

    let loaded = QuestionBank::load(&path).unwrap();
    assert_eq!(loaded, bank);
    assert!(!path.with_extension("tmp").exists());

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn missing_file() {
    let path = temp_path("missing.cbor");
    assert!(matches!(QuestionBank::load(&path), Err(BankError::Io(_))));
    assert!(QuestionBank::load_or_default(&path).unwrap().is_empty());
}
