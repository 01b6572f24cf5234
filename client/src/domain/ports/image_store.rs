//! Port for storing profile images ahead of registration.

use async_trait::async_trait;

use crate::domain::member::ImageUrl;

use super::operation_error;

operation_error!(
    /// The image could not be stored.
    ImageUploadError => "image upload failed"
);

/// A profile image selected by the user, ready to upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileImage {
    /// Original file name, forwarded for storage bookkeeping.
    pub file_name: String,
    /// MIME type of `bytes`.
    pub content_type: String,
    /// Raw image bytes.
    pub bytes: Vec<u8>,
}

/// Stores images and hands back their public URLs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Store `image` and return the URL it is served from.
    ///
    /// # Errors
    ///
    /// Returns [`ImageUploadError`] when the upload fails.
    async fn store_profile_image(&self, image: ProfileImage) -> Result<ImageUrl, ImageUploadError>;
}

/// Store that accepts every image and returns a fixed URL.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureImageStore;

#[async_trait]
impl ImageStore for FixtureImageStore {
    async fn store_profile_image(
        &self,
        _image: ProfileImage,
    ) -> Result<ImageUrl, ImageUploadError> {
        ImageUrl::new("https://images.invalid/profile.png")
            .map_err(|error| ImageUploadError::backend(error.to_string()))
    }
}
