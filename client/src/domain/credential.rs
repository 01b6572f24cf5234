//! Bearer credential consumed by authenticated operations.
//!
//! The credential's lifecycle (login, logout, expiry) is owned by the
//! embedding application's session state. Operations receive it as an
//! immutable value per call; its absence is a valid state that simply
//! suppresses credential-gated calls.

use std::fmt;

use thiserror::Error;

/// Validation errors returned when constructing a [`Credential`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialValidationError {
    /// Token is empty after trimming whitespace.
    #[error("credential token must not be empty")]
    Empty,
    /// Token carries leading or trailing whitespace.
    #[error("credential token must not contain surrounding whitespace")]
    ContainsWhitespace,
}

/// Opaque bearer token authorising requests on behalf of a member.
///
/// Sent verbatim in the `Authorization` header, with no scheme prefix.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Credential(String);

impl Credential {
    /// Validate and construct a credential from a raw token.
    ///
    /// # Errors
    ///
    /// Returns a [`CredentialValidationError`] when the token is empty or
    /// padded with whitespace.
    ///
    /// # Examples
    /// ```
    /// use client::domain::Credential;
    ///
    /// let credential = Credential::new("token-123")?;
    /// assert_eq!(credential.as_str(), "token-123");
    /// # Ok::<(), client::domain::CredentialValidationError>(())
    /// ```
    pub fn new(token: impl Into<String>) -> Result<Self, CredentialValidationError> {
        let raw = token.into();
        if raw.trim().is_empty() {
            return Err(CredentialValidationError::Empty);
        }
        if raw.trim() != raw {
            return Err(CredentialValidationError::ContainsWhitespace);
        }
        Ok(Self(raw))
    }

    /// Borrow the raw token for header construction.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

// Tokens must never leak into logs; Debug prints a redacted placeholder.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(..)")
    }
}
