//! Opaque cursor codec.
//!
//! A cursor names the boundary row a scan must exclude: the pair
//! `(created_at, id)` of the last row the client has already seen. It is
//! transported as URL-safe base64 over the text payload
//! `"<timestamp micros>:<id>"`, so the token is printable, JSON-safe and
//! round-trips byte-for-byte. Clients must treat it as opaque.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Cursor decode failure.
///
/// Callers never surface this to the end user: a cursor that fails to decode
/// is treated as "no cursor, serve the unfiltered first page". Pagination
/// degrades gracefully instead of failing the request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CursorError {
    #[error("empty cursor token")]
    Empty,

    #[error("cursor token is not valid base64")]
    Encoding,

    #[error("cursor payload has the wrong structure")]
    Structure,

    #[error("cursor field is not numeric: {0}")]
    NonNumeric(String),

    #[error("cursor timestamp out of range: {0}")]
    TimestampRange(i64),
}

/// Boundary position in a `(created_at, id)`-ordered collection.
///
/// Ordering is lexicographic on `(created_at, id)`, matching the collection's
/// total order: `created_at` first, `id` as the tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CursorKey {
    pub created_at: DateTime<Utc>,
    pub id: i64,
}

impl CursorKey {
    /// Build a key, truncating the timestamp to microsecond precision.
    ///
    /// Microseconds are what the token carries and what Postgres
    /// `timestamptz` stores, so truncating here keeps `encode` canonical:
    /// one key, one token.
    pub fn new(created_at: DateTime<Utc>, id: i64) -> Self {
        let truncated = DateTime::from_timestamp_micros(created_at.timestamp_micros())
            .unwrap_or(created_at);
        Self {
            created_at: truncated,
            id,
        }
    }

    /// Encode this key as an opaque transport token.
    ///
    /// Pure and deterministic; distinct keys produce distinct tokens.
    pub fn encode(&self) -> String {
        let payload = format!("{}:{}", self.created_at.timestamp_micros(), self.id);
        URL_SAFE_NO_PAD.encode(payload.as_bytes())
    }

    /// Decode a transport token back into a key.
    pub fn decode(token: &str) -> Result<Self, CursorError> {
        if token.is_empty() {
            return Err(CursorError::Empty);
        }

        let bytes = URL_SAFE_NO_PAD
            .decode(token.as_bytes())
            .map_err(|_| CursorError::Encoding)?;
        let payload = String::from_utf8(bytes).map_err(|_| CursorError::Encoding)?;

        let (ts_field, id_field) = payload.split_once(':').ok_or(CursorError::Structure)?;
        if id_field.contains(':') {
            return Err(CursorError::Structure);
        }

        let micros: i64 = ts_field
            .parse()
            .map_err(|_| CursorError::NonNumeric(ts_field.to_string()))?;
        let id: i64 = id_field
            .parse()
            .map_err(|_| CursorError::NonNumeric(id_field.to_string()))?;

        let created_at = DateTime::from_timestamp_micros(micros)
            .ok_or(CursorError::TimestampRange(micros))?;

        Ok(Self { created_at, id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn key(micros: i64, id: i64) -> CursorKey {
        CursorKey {
            created_at: DateTime::from_timestamp_micros(micros).unwrap(),
            id,
        }
    }

    #[test]
    fn encode_decode_round_trips() {
        let k = key(1_700_000_000_123_456, 42);
        let token = k.encode();
        assert_eq!(CursorKey::decode(&token).unwrap(), k);
    }

    #[test]
    fn distinct_keys_encode_distinct_tokens() {
        let a = key(1_000, 1);
        let b = key(1_000, 2);
        let c = key(1_001, 1);
        assert_ne!(a.encode(), b.encode());
        assert_ne!(a.encode(), c.encode());
        assert_ne!(b.encode(), c.encode());
    }

    #[test]
    fn token_is_url_safe() {
        let token = key(1_700_000_000_123_456, i64::MAX).encode();
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn decode_rejects_empty() {
        assert_eq!(CursorKey::decode(""), Err(CursorError::Empty));
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(matches!(
            CursorKey::decode("not-a-cursor!!"),
            Err(CursorError::Encoding)
        ));
    }

    #[test]
    fn decode_rejects_wrong_structure() {
        let no_separator = URL_SAFE_NO_PAD.encode(b"12345");
        assert_eq!(CursorKey::decode(&no_separator), Err(CursorError::Structure));

        let too_many = URL_SAFE_NO_PAD.encode(b"1:2:3");
        assert_eq!(CursorKey::decode(&too_many), Err(CursorError::Structure));
    }

    #[test]
    fn decode_rejects_non_numeric_fields() {
        let bad_ts = URL_SAFE_NO_PAD.encode(b"abc:5");
        assert!(matches!(
            CursorKey::decode(&bad_ts),
            Err(CursorError::NonNumeric(_))
        ));

        let bad_id = URL_SAFE_NO_PAD.encode(b"1700000000:xyz");
        assert!(matches!(
            CursorKey::decode(&bad_id),
            Err(CursorError::NonNumeric(_))
        ));
    }

    #[test]
    fn decode_rejects_out_of_range_timestamp() {
        let payload = format!("{}:1", i64::MAX);
        let token = URL_SAFE_NO_PAD.encode(payload.as_bytes());
        assert!(matches!(
            CursorKey::decode(&token),
            Err(CursorError::TimestampRange(_))
        ));
    }

    #[test]
    fn new_truncates_to_microseconds() {
        let ns = DateTime::from_timestamp(1_700_000_000, 123_456_789).unwrap();
        let k = CursorKey::new(ns, 7);
        let round = CursorKey::decode(&k.encode()).unwrap();
        assert_eq!(round, k);
    }

    #[test]
    fn ordering_breaks_ties_by_id() {
        assert!(key(1_000, 2) > key(1_000, 1));
        assert!(key(1_001, 1) > key(1_000, 99));
    }

    proptest! {
        #[test]
        fn round_trip_holds_for_all_valid_keys(
            micros in 0i64..=4_102_444_800_000_000, // through year 2100
            id in 0i64..=i64::MAX,
        ) {
            let k = key(micros, id);
            prop_assert_eq!(CursorKey::decode(&k.encode()).unwrap(), k);
        }
    }
}
