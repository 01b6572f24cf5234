//! Opaque cursor and pagination envelope primitives.
//!
//! Endpoints that page through collections share two contracts: an opaque
//! [`Cursor`] naming a position inside the collection, and a [`Page`]
//! envelope carrying one slice of items plus the collection total. The
//! cursor token is URL-safe base64 over a serde-encoded position so callers
//! can round-trip it through query strings without knowing its contents.
//!
//! [`PageRequest`] pairs a cursor with a page size; its structural equality
//! is what callers use to deduplicate fetches for identical parameters.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while encoding or decoding cursor tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CursorError {
    /// The position value could not be serialised into a token.
    #[error("cursor position failed to encode: {message}")]
    Encoding {
        /// Serialisation failure summary.
        message: String,
    },
    /// The token is not valid base64 or hides an unexpected payload.
    #[error("cursor token failed to decode: {message}")]
    Decoding {
        /// Deserialisation failure summary.
        message: String,
    },
}

impl CursorError {
    /// Helper for encoding failures.
    #[must_use]
    pub fn encoding(message: impl Into<String>) -> Self {
        Self::Encoding {
            message: message.into(),
        }
    }

    /// Helper for decoding failures.
    #[must_use]
    pub fn decoding(message: impl Into<String>) -> Self {
        Self::Decoding {
            message: message.into(),
        }
    }
}

/// Opaque pagination cursor.
///
/// Two cursors are equal iff their tokens are equal; callers never interpret
/// the token beyond handing it back to [`Cursor::decode`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    /// Encode a position value into an opaque token.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::Encoding`] when the position does not
    /// serialise to JSON.
    ///
    /// # Examples
    /// ```
    /// use pagination::Cursor;
    ///
    /// let cursor = Cursor::encode(&42_i64)?;
    /// assert_eq!(cursor.decode::<i64>()?, 42);
    /// # Ok::<(), pagination::CursorError>(())
    /// ```
    pub fn encode<T: Serialize>(position: &T) -> Result<Self, CursorError> {
        let json = serde_json::to_vec(position).map_err(|error| {
            CursorError::encoding(error.to_string())
        })?;
        Ok(Self(URL_SAFE_NO_PAD.encode(json)))
    }

    /// Decode the token back into its position value.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::Decoding`] when the token is not URL-safe
    /// base64 or the hidden payload does not match `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, CursorError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(&self.0)
            .map_err(|error| CursorError::decoding(error.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|error| CursorError::decoding(error.to_string()))
    }

    /// Borrow the raw token, e.g. for embedding into a query string.
    #[must_use]
    pub fn as_token(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_token())
    }
}

/// Smallest page size a request may carry.
pub const PAGE_SIZE_MIN: u32 = 1;

/// Parameters describing one page fetch.
///
/// Structural equality over both fields defines fetch deduplication: two
/// requests are the same fetch iff cursor and size both match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    /// Position to resume from; `None` requests the first page.
    pub cursor: Option<Cursor>,
    /// Maximum number of items the caller wants back.
    pub size: u32,
}

impl PageRequest {
    /// Build a first-page request, clamping the size to [`PAGE_SIZE_MIN`].
    #[must_use]
    pub const fn new(size: u32) -> Self {
        Self {
            cursor: None,
            size: if size < PAGE_SIZE_MIN {
                PAGE_SIZE_MIN
            } else {
                size
            },
        }
    }

    /// Return the same request resuming from `cursor`.
    #[must_use]
    pub fn after(self, cursor: Cursor) -> Self {
        Self {
            cursor: Some(cursor),
            ..self
        }
    }
}

/// One slice of a collection plus the collection total.
///
/// Item order is meaningful and preserved by every adapter on this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items in the order the backend returned them.
    pub items: Vec<T>,
    /// Total number of items in the full collection.
    pub total: u64,
}

impl<T> Page<T> {
    /// Build a page from already-ordered items.
    #[must_use]
    pub const fn new(items: Vec<T>, total: u64) -> Self {
        Self { items, total }
    }

    /// Build an empty page of a zero-item collection.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }

    /// Number of items in this slice.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether this slice carries no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Map every item while preserving order and total.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}
