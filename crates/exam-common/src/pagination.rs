//! Keyset pagination with the limit-plus-one fetch.
//!
//! A row source returns up to `limit + 1` rows already past the cursor; the
//! extra row only signals `has_more` and is never returned. No count query is
//! needed to know whether another page exists.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use uuid::Uuid;

use crate::cursor::{decode_cursor, Cursor};
use crate::types::Question;

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const MAX_PAGE_SIZE: usize = 100;

/// Rows that can be paged by `(created_at DESC, id DESC)`.
pub trait Keyed {
    fn sort_key(&self) -> (DateTime<Utc>, Uuid);
}

impl Keyed for Question {
    fn sort_key(&self) -> (DateTime<Utc>, Uuid) {
        (self.created_at, self.id)
    }
}

/// Listing order: newest first, higher id first on equal timestamps.
pub fn listing_order<T: Keyed>(a: &T, b: &T) -> Ordering {
    b.sort_key().cmp(&a.sort_key())
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageRequestError {
    InvalidCursor,
    InvalidLimit(String),
}

impl fmt::Display for PageRequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageRequestError::InvalidCursor => f.write_str("invalid cursor"),
            PageRequestError::InvalidLimit(raw) => write!(
                f,
                "invalid limit {:?}: expected 1 to {}",
                raw, MAX_PAGE_SIZE
            ),
        }
    }
}

impl std::error::Error for PageRequestError {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub cursor: Option<Cursor>,
    pub limit: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            cursor: None,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    pub fn first(limit: usize) -> Self {
        Self {
            cursor: None,
            limit,
        }
    }

    pub fn after(cursor: Cursor, limit: usize) -> Self {
        Self {
            cursor: Some(cursor),
            limit,
        }
    }

    /// Build a request from raw `cursor` and `limit` query parameters.
    pub fn from_params(cursor: Option<&str>, limit: Option<&str>) -> Result<Self, PageRequestError> {
        let cursor = match cursor.filter(|c| !c.is_empty()) {
            Some(token) => Some(decode_cursor(token).ok_or(PageRequestError::InvalidCursor)?),
            None => None,
        };
        let limit = match limit.filter(|l| !l.is_empty()) {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| (1..=MAX_PAGE_SIZE).contains(n))
                .ok_or_else(|| PageRequestError::InvalidLimit(raw.to_string()))?,
            None => DEFAULT_PAGE_SIZE,
        };
        Ok(Self { cursor, limit })
    }

    /// How many rows the source should fetch.
    pub fn fetch_size(&self) -> usize {
        self.limit + 1
    }

    pub fn admits<T: Keyed>(&self, row: &T) -> bool {
        match &self.cursor {
            Some(cursor) => {
                let (created_at, id) = row.sort_key();
                cursor.admits(created_at, id)
            }
            None => true,
        }
    }
}

/// One page of a listing, serialized as `{data, nextCursor, hasMore, total?}`.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub data: Vec<T>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

impl<T> Page<T> {
    pub fn with_total(mut self, total: u64) -> Self {
        self.total = Some(total);
        self
    }
}

/// Turn up to `limit + 1` ordered rows into a page.
///
/// A zero limit yields an empty final page: with no row to anchor a cursor
/// there is no way to continue.
pub fn finish_page<T: Keyed>(mut rows: Vec<T>, limit: usize) -> Page<T> {
    let has_more = limit > 0 && rows.len() > limit;
    rows.truncate(limit);
    let next_cursor = if has_more {
        rows.last().map(|row| {
            let (created_at, id) = row.sort_key();
            Cursor::new(created_at, id).encode()
        })
    } else {
        None
    };
    Page {
        data: rows,
        next_cursor,
        has_more,
        total: None,
    }
}

/// Page over an in-memory row source in any order.
pub fn paginate<'a, T, I>(rows: I, request: &PageRequest) -> Page<T>
where
    T: Keyed + Clone + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut candidates: Vec<&T> = rows.into_iter().filter(|r| request.admits(*r)).collect();
    candidates.sort_by(|a, b| listing_order(*a, *b));
    let fetched: Vec<T> = candidates
        .into_iter()
        .take(request.fetch_size())
        .cloned()
        .collect();
    finish_page(fetched, request.limit)
}
