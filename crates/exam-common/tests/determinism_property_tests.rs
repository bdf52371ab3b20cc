mod fixtures;

use chrono::{TimeZone, Utc};
use exam_common::cursor::{decode_cursor, encode_cursor};
use exam_common::pagination::{paginate, PageRequest};
use exam_common::similarity::similarity;
use exam_common::tokenization::{is_stop_word, significant_tokens};
use fixtures::Row;
use proptest::prelude::*;
use uuid::Uuid;

proptest! {
    #[test]
    fn similarity_is_symmetric(a in "[a-zA-Z ]{0,120}", b in "[a-zA-Z ]{0,120}") {
        prop_assert_eq!(similarity(&a, &b), similarity(&b, &a));
    }

    #[test]
    fn similarity_in_range(a in ".{0,200}", b in ".{0,200}") {
        prop_assert!(similarity(&a, &b) <= 100);
    }

    #[test]
    fn self_similarity_is_100(a in "[a-z]{4,10}( [a-z]{1,10}){0,12}") {
        prop_assume!(!significant_tokens(&a).is_empty());
        prop_assert_eq!(similarity(&a, &a), 100);
    }

    #[test]
    fn tokens_have_no_stop_words_or_short_words(s in "[a-zA-Z ]{0,200}") {
        for t in significant_tokens(&s) {
            prop_assert!(!is_stop_word(&t), "stop word '{}' in tokens", t);
            prop_assert!(t.chars().count() > 3);
        }
    }

    #[test]
    fn cursor_round_trip(
        secs in 0i64..4_102_444_800,
        nanos in 0u32..1_000_000_000,
        raw_id in any::<u128>()
    ) {
        let ts = Utc.timestamp_opt(secs, nanos).unwrap();
        let id = Uuid::from_u128(raw_id);
        let cursor = decode_cursor(&encode_cursor(ts, id)).unwrap();
        prop_assert_eq!(cursor.timestamp, ts);
        prop_assert_eq!(cursor.id, id);
    }

    #[test]
    fn decode_never_panics(s in ".{0,80}") {
        let _ = decode_cursor(&s);
    }

    #[test]
    fn paging_visits_every_row_once(
        keys in proptest::collection::vec((0i64..5, any::<u128>()), 0..60),
        limit in 1usize..10
    ) {
        let mut rows: Vec<Row> = keys
            .iter()
            .map(|(secs, raw)| Row { id: Uuid::from_u128(*raw), created_at: fixtures::at(*secs) })
            .collect();
        rows.sort_by_key(|r| r.id);
        rows.dedup_by_key(|r| r.id);

        let mut seen = Vec::new();
        let mut request = PageRequest::first(limit);
        loop {
            let page = paginate(&rows, &request);
            prop_assert!(page.data.len() <= limit);
            seen.extend(page.data.iter().cloned());
            match page.next_cursor {
                Some(token) => request = PageRequest::after(decode_cursor(&token).unwrap(), limit),
                None => break,
            }
        }

        let mut expected = rows.clone();
        expected.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        prop_assert_eq!(seen, expected);
    }
}
