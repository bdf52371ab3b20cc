//! Opaque keyset cursors over the `(created_at DESC, id DESC)` ordering.
//!
//! A token is the URL-safe, unpadded base64 of `"<rfc3339 timestamp>|<uuid>"`.
//! Decoding never panics; anything malformed decodes to `None` so the caller can
//! answer with a client error.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

const SEPARATOR: char = '|';

/// Sort key of the last row on a page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cursor {
    pub timestamp: DateTime<Utc>,
    pub id: Uuid,
}

impl Cursor {
    pub fn new(timestamp: DateTime<Utc>, id: Uuid) -> Self {
        Self { timestamp, id }
    }

    pub fn encode(&self) -> String {
        encode_cursor(self.timestamp, self.id)
    }

    /// Whether a row with this sort key belongs after the cursor:
    /// `created_at < timestamp OR (created_at = timestamp AND id < cursor id)`.
    pub fn admits(&self, created_at: DateTime<Utc>, id: Uuid) -> bool {
        created_at < self.timestamp || (created_at == self.timestamp && id < self.id)
    }
}

pub fn encode_cursor(timestamp: DateTime<Utc>, id: Uuid) -> String {
    let raw = format!(
        "{}{}{}",
        timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        SEPARATOR,
        id
    );
    URL_SAFE_NO_PAD.encode(raw.as_bytes())
}

pub fn decode_cursor(token: &str) -> Option<Cursor> {
    let bytes = URL_SAFE_NO_PAD.decode(token.trim()).ok()?;
    let raw = String::from_utf8(bytes).ok()?;
    let (timestamp, id) = raw.split_once(SEPARATOR)?;
    let timestamp = DateTime::parse_from_rfc3339(timestamp)
        .ok()?
        .with_timezone(&Utc);
    let id = Uuid::parse_str(id).ok()?;
    Some(Cursor { timestamp, id })
}
