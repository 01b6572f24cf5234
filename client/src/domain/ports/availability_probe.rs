//! Port for username and nickname availability checks.

use async_trait::async_trait;

use crate::domain::member::{Nickname, Username};

use super::operation_error;

operation_error!(
    /// An availability check could not be completed.
    AvailabilityCheckError => "availability check failed"
);

/// Asks the backend whether identity values are still unclaimed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AvailabilityProbe: Send + Sync {
    /// Whether `username` is free to register.
    ///
    /// # Errors
    ///
    /// Returns [`AvailabilityCheckError`] when the backend could not answer.
    async fn username_available(
        &self,
        username: &Username,
    ) -> Result<bool, AvailabilityCheckError>;

    /// Whether `nickname` is free to register.
    ///
    /// # Errors
    ///
    /// Returns [`AvailabilityCheckError`] when the backend could not answer.
    async fn nickname_available(
        &self,
        nickname: &Nickname,
    ) -> Result<bool, AvailabilityCheckError>;
}

/// Probe that reports every value as available.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureAvailabilityProbe;

#[async_trait]
impl AvailabilityProbe for FixtureAvailabilityProbe {
    async fn username_available(
        &self,
        _username: &Username,
    ) -> Result<bool, AvailabilityCheckError> {
        Ok(true)
    }

    async fn nickname_available(
        &self,
        _nickname: &Nickname,
    ) -> Result<bool, AvailabilityCheckError> {
        Ok(true)
    }
}
