use exam_common::hashing::text_fingerprint;
use exam_common::normalization::*;

#[test]
fn normalize_trims() {
    assert_eq!(normalize_text("  hello  "), "hello");
}

#[test]
fn normalize_collapses_whitespace() {
    assert_eq!(normalize_text("hello\t\n   world"), "hello world");
}

#[test]
fn normalize_collapses_unicode_whitespace() {
    assert_eq!(
        normalize_text("torque\u{00A0}\u{2003}wrench\u{3000}"),
        "torque wrench"
    );
}

#[test]
fn normalize_removes_bom() {
    assert_eq!(normalize_text("\u{FEFF}hello"), "hello");
}

#[test]
fn normalize_nfc() {
    assert_eq!(normalize_text("e\u{0301}"), "\u{00E9}");
}

#[test]
fn normalize_idempotent() {
    let input = "  What   is\tthe  \u{FEFF} purpose  ";
    let once = normalize_text(input);
    assert_eq!(normalize_text(&once), once);
}

#[test]
fn preview_short_text_unchanged() {
    assert_eq!(preview("Safety wire", 20), "Safety wire");
}

#[test]
fn preview_truncates_at_char_boundary() {
    assert_eq!(preview("Überprüfung der Zündanlage", 11), "Überprüfung...");
    assert_eq!(preview("abc def", 4), "abc...");
}

#[test]
fn fingerprint_ignores_case_and_spacing() {
    assert_eq!(
        text_fingerprint("What is  the purpose of SAFETY wire?"),
        text_fingerprint(" what is the purpose of safety wire? ")
    );
}

#[test]
fn fingerprint_distinguishes_wording() {
    assert_ne!(
        text_fingerprint("What is the purpose of safety wire?"),
        text_fingerprint("What is the purpose of a cotter pin?")
    );
}
