//! Port for member-scoped post listings.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::credential::Credential;
use crate::domain::post::{MemberId, Post};

use super::operation_error;

operation_error!(
    /// A post listing could not be loaded.
    PostListError => "failed to load posts"
);

/// Serves the post history of a member, newest page first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostDirectory: Send + Sync {
    /// Posts written by the authenticated member.
    ///
    /// # Errors
    ///
    /// Returns [`PostListError`] when the listing request fails.
    async fn my_posts(
        &self,
        page: &PageRequest,
        credential: &Credential,
    ) -> Result<Page<Post>, PostListError>;

    /// Posts written by `member`.
    ///
    /// # Errors
    ///
    /// Returns [`PostListError`] when the listing request fails.
    async fn member_posts(
        &self,
        member: MemberId,
        page: &PageRequest,
        credential: &Credential,
    ) -> Result<Page<Post>, PostListError>;
}

/// Directory that serves an empty history for every member.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixturePostDirectory;

#[async_trait]
impl PostDirectory for FixturePostDirectory {
    async fn my_posts(
        &self,
        _page: &PageRequest,
        _credential: &Credential,
    ) -> Result<Page<Post>, PostListError> {
        Ok(Page::empty())
    }

    async fn member_posts(
        &self,
        _member: MemberId,
        _page: &PageRequest,
        _credential: &Credential,
    ) -> Result<Page<Post>, PostListError> {
        Ok(Page::empty())
    }
}
