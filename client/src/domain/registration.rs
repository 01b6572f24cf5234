//! Sign-up form workflow.
//!
//! [`RegistrationForm`] pairs the raw draft with the duplicate-check gate
//! and enforces the submission rule: every field valid, and both unique
//! fields verified against the backend. Availability checks parse the field
//! first; an invalid value never reaches the probe.

use crate::domain::check_gate::{
    CheckOutcome, DuplicateCheckGate, FieldCheckState, IdentityField,
};
use crate::domain::member::{ImageUrl, MemberValidationError, RegistrationDraft};
use crate::domain::ports::{
    AvailabilityProbe, ImageStore, ImageUploadError, MemberRegistrar, ProfileImage,
    RegistrationError,
};
use crate::domain::post::MemberId;

/// Registration form state: draft values plus uniqueness verdicts.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    draft: RegistrationDraft,
    gate: DuplicateCheckGate,
}

impl RegistrationForm {
    /// Build an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current draft values.
    #[must_use]
    pub const fn draft(&self) -> &RegistrationDraft {
        &self.draft
    }

    /// Current duplicate-check verdicts.
    #[must_use]
    pub const fn gate(&self) -> &DuplicateCheckGate {
        &self.gate
    }

    /// Replace the username input, resetting its uniqueness verdict.
    ///
    /// Resets even when `value` reproduces the previously checked text.
    pub fn edit_username(&mut self, value: impl Into<String>) {
        self.draft.username = value.into();
        self.gate.note_edit(IdentityField::Username);
    }

    /// Replace the nickname input, resetting its uniqueness verdict.
    pub fn edit_nickname(&mut self, value: impl Into<String>) {
        self.draft.nickname = value.into();
        self.gate.note_edit(IdentityField::Nickname);
    }

    /// Replace the password input.
    pub fn edit_password(&mut self, value: impl Into<String>) {
        self.draft.password = value.into();
    }

    /// Replace the password confirmation input.
    pub fn edit_password_check(&mut self, value: impl Into<String>) {
        self.draft.password_check = value.into();
    }

    /// Replace the email input.
    pub fn edit_email(&mut self, value: impl Into<String>) {
        self.draft.email = value.into();
    }

    /// Replace the introduction input.
    pub fn edit_introduction(&mut self, value: impl Into<String>) {
        self.draft.introduction = value.into();
    }

    /// Check the username against the backend and record the verdict.
    ///
    /// # Errors
    ///
    /// Returns the field rule error when the current username input is
    /// invalid; the gate is left untouched and no request is made. Probe
    /// failures are absorbed into [`FieldCheckState::Failed`].
    pub async fn check_username(
        &mut self,
        probe: &impl AvailabilityProbe,
    ) -> Result<FieldCheckState, MemberValidationError> {
        let username = self.draft.parsed_username()?;
        let ticket = self.gate.begin_check(IdentityField::Username);
        let outcome = match probe.username_available(&username).await {
            Ok(true) => CheckOutcome::Available,
            Ok(false) => CheckOutcome::Taken,
            Err(_) => CheckOutcome::Errored,
        };
        self.gate.resolve(ticket, outcome);
        Ok(self.gate.state(IdentityField::Username))
    }

    /// Check the nickname against the backend and record the verdict.
    ///
    /// # Errors
    ///
    /// Returns the field rule error when the current nickname input is
    /// invalid; the gate is left untouched and no request is made. Probe
    /// failures are absorbed into [`FieldCheckState::Failed`].
    pub async fn check_nickname(
        &mut self,
        probe: &impl AvailabilityProbe,
    ) -> Result<FieldCheckState, MemberValidationError> {
        let nickname = self.draft.parsed_nickname()?;
        let ticket = self.gate.begin_check(IdentityField::Nickname);
        let outcome = match probe.nickname_available(&nickname).await {
            Ok(true) => CheckOutcome::Available,
            Ok(false) => CheckOutcome::Taken,
            Err(_) => CheckOutcome::Errored,
        };
        self.gate.resolve(ticket, outcome);
        Ok(self.gate.state(IdentityField::Nickname))
    }

    /// Whether the form may be submitted.
    ///
    /// Re-derived on every call from the current draft and gate; a passing
    /// verdict is never cached across edits.
    #[must_use]
    pub fn submission_allowed(&self) -> bool {
        self.draft.validate().is_ok() && self.gate.both_checked()
    }

    /// Submit the form when submission is allowed.
    ///
    /// Returns `Ok(None)` without any request when the form is incomplete
    /// or either uniqueness verdict is missing.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError`] when the backend rejects the draft.
    pub async fn submit(
        &mut self,
        registrar: &impl MemberRegistrar,
    ) -> Result<Option<MemberId>, RegistrationError> {
        if !self.submission_allowed() {
            return Ok(None);
        }
        let member = registrar.register(&self.draft).await?;
        Ok(Some(member))
    }

    /// Upload a profile image and attach its URL to the draft.
    ///
    /// # Errors
    ///
    /// Returns [`ImageUploadError`] when the upload fails; the draft keeps
    /// its previous image in that case.
    pub async fn attach_profile_image(
        &mut self,
        store: &impl ImageStore,
        image: ProfileImage,
    ) -> Result<ImageUrl, ImageUploadError> {
        let url = store.store_profile_image(image).await?;
        self.draft.image = Some(url.clone());
        Ok(url)
    }
}

#[cfg(test)]
mod tests;
