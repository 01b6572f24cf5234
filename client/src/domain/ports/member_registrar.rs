//! Port for submitting a completed registration.

use async_trait::async_trait;

use crate::domain::member::RegistrationDraft;
use crate::domain::post::MemberId;

use super::operation_error;

operation_error!(
    /// The registration request was rejected or never reached the backend.
    RegistrationError => "registration failed"
);

/// Creates a member account from a validated draft.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MemberRegistrar: Send + Sync {
    /// Register a new member and return its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError`] when the backend rejects the draft or
    /// the request fails in transit.
    async fn register(&self, draft: &RegistrationDraft) -> Result<MemberId, RegistrationError>;
}
