//! Member identity and registration field types.
//!
//! Field rules mirror the sign-up form: username and email are pattern
//! checked, the nickname is length checked, and the password must mix
//! letters, digits, and symbols. Each newtype validates on construction so
//! the rest of the domain only ever sees well-formed values.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Validation errors for registration field values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemberValidationError {
    /// Username is empty or does not match the allowed pattern.
    #[error("username must be 2-15 letters or digits")]
    InvalidUsername,
    /// Password is shorter than the allowed minimum.
    #[error("password must be at least {min} characters")]
    PasswordTooShort {
        /// Minimum allowed length.
        min: usize,
    },
    /// Password is longer than the allowed maximum.
    #[error("password must be at most {max} characters")]
    PasswordTooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// Password lacks a letter, digit, or symbol.
    #[error("password must mix letters, digits, and symbols")]
    PasswordMissingClass,
    /// Password confirmation does not match the password.
    #[error("password confirmation must match the password")]
    PasswordCheckMismatch,
    /// Nickname is shorter than the allowed minimum.
    #[error("nickname must be at least {min} characters")]
    NicknameTooShort {
        /// Minimum allowed length.
        min: usize,
    },
    /// Nickname is longer than the allowed maximum.
    #[error("nickname must be at most {max} characters")]
    NicknameTooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// Email does not match the allowed pattern.
    #[error("email must be a well-formed address")]
    InvalidEmail,
    /// Profile image URL failed to parse.
    #[error("profile image must be a well-formed URL")]
    InvalidImageUrl,
}

static USERNAME_RE: OnceLock<Regex> = OnceLock::new();

fn username_regex() -> &'static Regex {
    USERNAME_RE.get_or_init(|| {
        let pattern = "^[a-zA-Z0-9]{2,15}$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("username regex failed to compile: {error}"))
    })
}

/// Login identifier, unique per member.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a username.
    ///
    /// # Errors
    ///
    /// Returns [`MemberValidationError::InvalidUsername`] unless the value
    /// is 2-15 ASCII letters or digits.
    pub fn new(value: impl Into<String>) -> Result<Self, MemberValidationError> {
        let raw = value.into();
        if !username_regex().is_match(&raw) {
            return Err(MemberValidationError::InvalidUsername);
        }
        Ok(Self(raw))
    }
}

/// Minimum allowed password length.
pub const PASSWORD_MIN: usize = 6;
/// Maximum allowed password length.
pub const PASSWORD_MAX: usize = 15;

const PASSWORD_SYMBOLS: &str = "#?!@%^&+-";

/// Member password.
///
/// The original rule is a lookahead pattern; `regex` has no lookahead, so
/// the same policy is enforced with explicit character-class scans.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Validate and construct a password.
    ///
    /// # Errors
    ///
    /// Returns a length error, or [`MemberValidationError::PasswordMissingClass`]
    /// when any of letter, digit, or symbol is absent.
    pub fn new(value: impl Into<String>) -> Result<Self, MemberValidationError> {
        let raw = value.into();
        let length = raw.chars().count();
        if length < PASSWORD_MIN {
            return Err(MemberValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        if length > PASSWORD_MAX {
            return Err(MemberValidationError::PasswordTooLong { max: PASSWORD_MAX });
        }
        let has_letter = raw.chars().any(|c| c.is_ascii_alphabetic());
        let has_digit = raw.chars().any(|c| c.is_ascii_digit());
        let has_symbol = raw.chars().any(|c| PASSWORD_SYMBOLS.contains(c));
        if !(has_letter && has_digit && has_symbol) {
            return Err(MemberValidationError::PasswordMissingClass);
        }
        Ok(Self(raw))
    }

    /// Borrow the raw password for request serialisation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

// Passwords must never leak into logs.
impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(..)")
    }
}

/// Minimum allowed nickname length.
pub const NICKNAME_MIN: usize = 2;
/// Maximum allowed nickname length.
pub const NICKNAME_MAX: usize = 10;

/// Display name, unique per member.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Nickname(String);

impl Nickname {
    /// Validate and construct a nickname.
    ///
    /// # Errors
    ///
    /// Returns a length error when outside [`NICKNAME_MIN`]..=[`NICKNAME_MAX`]
    /// characters.
    pub fn new(value: impl Into<String>) -> Result<Self, MemberValidationError> {
        let raw = value.into();
        let length = raw.chars().count();
        if length < NICKNAME_MIN {
            return Err(MemberValidationError::NicknameTooShort { min: NICKNAME_MIN });
        }
        if length > NICKNAME_MAX {
            return Err(MemberValidationError::NicknameTooLong { max: NICKNAME_MAX });
        }
        Ok(Self(raw))
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern =
            r"^[a-zA-Z0-9]([-_.]?[a-zA-Z0-9])*@[a-zA-Z0-9]([-_.]?[a-zA-Z0-9])*\.[a-zA-Z]{2,3}$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Contact email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and construct an email address.
    ///
    /// # Errors
    ///
    /// Returns [`MemberValidationError::InvalidEmail`] when the value does
    /// not match the address pattern.
    pub fn new(value: impl Into<String>) -> Result<Self, MemberValidationError> {
        let raw = value.into();
        if !email_regex().is_match(&raw) {
            return Err(MemberValidationError::InvalidEmail);
        }
        Ok(Self(raw))
    }
}

/// URL of a stored profile image.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImageUrl(String);

impl ImageUrl {
    /// Validate and construct an image URL.
    ///
    /// # Errors
    ///
    /// Returns [`MemberValidationError::InvalidImageUrl`] when the value is
    /// not an absolute URL.
    pub fn new(value: impl Into<String>) -> Result<Self, MemberValidationError> {
        let raw = value.into();
        Url::parse(&raw).map_err(|_| MemberValidationError::InvalidImageUrl)?;
        Ok(Self(raw))
    }

    /// Borrow the raw URL.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

macro_rules! string_newtype_serde {
    ($name:ident) => {
        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = MemberValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

string_newtype_serde!(Username);
string_newtype_serde!(Nickname);
string_newtype_serde!(Email);
string_newtype_serde!(ImageUrl);

/// In-progress registration form values.
///
/// Fields hold raw user input; [`RegistrationDraft::validate`] re-derives
/// every field rule on demand rather than caching verdicts, so edits can
/// never leave a stale pass behind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationDraft {
    /// Raw username input.
    pub username: String,
    /// Raw password input.
    pub password: String,
    /// Raw password confirmation input.
    pub password_check: String,
    /// Raw nickname input.
    pub nickname: String,
    /// Raw email input.
    pub email: String,
    /// Free-form introduction; never validated.
    pub introduction: String,
    /// Stored profile image, set after a successful upload.
    pub image: Option<ImageUrl>,
}

impl RegistrationDraft {
    /// Parse the username field.
    ///
    /// # Errors
    ///
    /// Propagates the username field rule.
    pub fn parsed_username(&self) -> Result<Username, MemberValidationError> {
        Username::new(self.username.clone())
    }

    /// Parse the nickname field.
    ///
    /// # Errors
    ///
    /// Propagates the nickname field rule.
    pub fn parsed_nickname(&self) -> Result<Nickname, MemberValidationError> {
        Nickname::new(self.nickname.clone())
    }

    /// Re-derive every field validation.
    ///
    /// # Errors
    ///
    /// Returns the first failing rule, in form order: username, password,
    /// confirmation, nickname, email.
    pub fn validate(&self) -> Result<(), MemberValidationError> {
        Username::new(self.username.clone())?;
        Password::new(self.password.clone())?;
        if self.password_check != self.password {
            return Err(MemberValidationError::PasswordCheckMismatch);
        }
        Nickname::new(self.nickname.clone())?;
        Email::new(self.email.clone())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests;
