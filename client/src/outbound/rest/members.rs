//! Member operations against the reading-log API.
//!
//! Availability checks lean on the backend's status contract: a 2xx answer
//! means the value is free, 409 means it is taken, and anything else is a
//! check failure.

use async_trait::async_trait;
use pagination::{Page, PageRequest};
use reqwest::Method;
use reqwest::multipart::{Form, Part};

use crate::domain::credential::Credential;
use crate::domain::member::{ImageUrl, Nickname, RegistrationDraft, Username};
use crate::domain::ports::{
    AvailabilityCheckError, AvailabilityProbe, ImageStore, ImageUploadError, MemberRegistrar,
    PostDirectory, PostListError, ProfileImage, RegistrationError,
};
use crate::domain::post::{MemberId, Post};

use super::dto::{
    CursorPosition, ImageUrlDto, MemberIdDto, NicknameDto, PostsPageDto, RegistrationDto,
    UsernameDto,
};
use super::gateway::GatewayError;
use super::{RestClient, log_failure};

const STATUS_CONFLICT: u16 = 409;

impl RestClient {
    /// Whether `username` is free to register.
    ///
    /// # Errors
    ///
    /// Returns [`AvailabilityCheckError`] when the backend could not answer.
    pub async fn username_available(
        &self,
        username: &Username,
    ) -> Result<bool, AvailabilityCheckError> {
        let outcome = self
            .gateway
            .call("username_available", Method::POST, "members/username")
            .json(&UsernameDto {
                user_name: username.as_ref(),
            })
            .map_err(|error| AvailabilityCheckError::backend(log_failure(&error)))?
            .dispatch_empty()
            .await;
        availability_from(outcome)
    }

    /// Whether `nickname` is free to register.
    ///
    /// # Errors
    ///
    /// Returns [`AvailabilityCheckError`] when the backend could not answer.
    pub async fn nickname_available(
        &self,
        nickname: &Nickname,
    ) -> Result<bool, AvailabilityCheckError> {
        let outcome = self
            .gateway
            .call("nickname_available", Method::POST, "members/nickname")
            .json(&NicknameDto {
                nickname: nickname.as_ref(),
            })
            .map_err(|error| AvailabilityCheckError::backend(log_failure(&error)))?
            .dispatch_empty()
            .await;
        availability_from(outcome)
    }

    /// Register a new member.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError`] when the backend rejects the draft or
    /// the request fails in transit.
    pub async fn register(
        &self,
        draft: &RegistrationDraft,
    ) -> Result<MemberId, RegistrationError> {
        let created: MemberIdDto = self
            .gateway
            .call("register", Method::POST, "members")
            .json(&RegistrationDto::from(draft))
            .map_err(|error| RegistrationError::backend(log_failure(&error)))?
            .dispatch()
            .await
            .map_err(|error| RegistrationError::backend(log_failure(&error)))?;
        Ok(created.member_id)
    }

    /// Posts written by the authenticated member.
    ///
    /// # Errors
    ///
    /// Returns [`PostListError`] when the listing request fails.
    pub async fn my_posts(
        &self,
        page: &PageRequest,
        credential: &Credential,
    ) -> Result<Page<Post>, PostListError> {
        self.member_listing("my_posts", "members/me/posts", page, credential)
            .await
    }

    /// Posts written by `member`.
    ///
    /// # Errors
    ///
    /// Returns [`PostListError`] when the listing request fails.
    pub async fn member_posts(
        &self,
        member: MemberId,
        page: &PageRequest,
        credential: &Credential,
    ) -> Result<Page<Post>, PostListError> {
        self.member_listing(
            "member_posts",
            &format!("members/{member}/posts"),
            page,
            credential,
        )
        .await
    }

    /// Store a profile image and return the URL it is served from.
    ///
    /// # Errors
    ///
    /// Returns [`ImageUploadError`] when the upload fails or the backend
    /// hands back a malformed URL.
    pub async fn store_profile_image(
        &self,
        image: ProfileImage,
    ) -> Result<ImageUrl, ImageUploadError> {
        let part = Part::bytes(image.bytes)
            .file_name(image.file_name)
            .mime_str(&image.content_type)
            .map_err(|error| {
                tracing::error!(operation = "store_profile_image", %error, "image part rejected");
                ImageUploadError::backend(error.to_string())
            })?;
        let form = Form::new().part("image", part);
        let stored: ImageUrlDto = self
            .gateway
            .send_multipart("store_profile_image", "images", form)
            .await
            .map_err(|error| ImageUploadError::backend(log_failure(&error)))?;
        ImageUrl::new(stored.url).map_err(|error| {
            tracing::error!(operation = "store_profile_image", %error, "stored URL is malformed");
            ImageUploadError::backend(error.to_string())
        })
    }

    async fn member_listing(
        &self,
        operation: &'static str,
        path: &str,
        page: &PageRequest,
        credential: &Credential,
    ) -> Result<Page<Post>, PostListError> {
        let mut call = self
            .gateway
            .call(operation, Method::GET, path)
            .authenticated(credential)
            .query("size", page.size);
        if let Some(cursor) = &page.cursor {
            let after = CursorPosition::decode_from(cursor).map_err(|error| {
                tracing::error!(operation, %error, "listing cursor failed to decode");
                PostListError::backend(error.to_string())
            })?;
            call = call.query("after", after);
        }
        let listed: PostsPageDto = call
            .dispatch()
            .await
            .map_err(|error| PostListError::backend(log_failure(&error)))?;
        Ok(listed.into_page())
    }
}

/// Map a check response onto the availability contract.
fn availability_from(outcome: Result<(), GatewayError>) -> Result<bool, AvailabilityCheckError> {
    match outcome {
        Ok(()) => Ok(true),
        Err(error) if error.status_code() == Some(STATUS_CONFLICT) => Ok(false),
        Err(error) => Err(AvailabilityCheckError::backend(log_failure(&error))),
    }
}

#[async_trait]
impl AvailabilityProbe for RestClient {
    async fn username_available(
        &self,
        username: &Username,
    ) -> Result<bool, AvailabilityCheckError> {
        Self::username_available(self, username).await
    }

    async fn nickname_available(
        &self,
        nickname: &Nickname,
    ) -> Result<bool, AvailabilityCheckError> {
        Self::nickname_available(self, nickname).await
    }
}

#[async_trait]
impl MemberRegistrar for RestClient {
    async fn register(&self, draft: &RegistrationDraft) -> Result<MemberId, RegistrationError> {
        Self::register(self, draft).await
    }
}

#[async_trait]
impl PostDirectory for RestClient {
    async fn my_posts(
        &self,
        page: &PageRequest,
        credential: &Credential,
    ) -> Result<Page<Post>, PostListError> {
        Self::my_posts(self, page, credential).await
    }

    async fn member_posts(
        &self,
        member: MemberId,
        page: &PageRequest,
        credential: &Credential,
    ) -> Result<Page<Post>, PostListError> {
        Self::member_posts(self, member, page, credential).await
    }
}

#[async_trait]
impl ImageStore for RestClient {
    async fn store_profile_image(&self, image: ProfileImage) -> Result<ImageUrl, ImageUploadError> {
        Self::store_profile_image(self, image).await
    }
}
