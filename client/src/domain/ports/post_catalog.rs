//! Port for reading-log post operations.
//!
//! Write operations require a credential. Callers pass `Option<&Credential>`
//! and receive `Ok(None)` when it is absent; implementations must not touch
//! the network in that case. This keeps "not signed in" an ordinary outcome
//! rather than an error.

use async_trait::async_trait;
use pagination::Page;

use crate::domain::credential::Credential;
use crate::domain::post::{PlanId, Post, PostDraft, PostId, PostQuery};

use super::{PostListError, operation_error};

operation_error!(
    /// A new post could not be created.
    PostWriteError => "failed to write post"
);

operation_error!(
    /// An existing post could not be updated.
    PostModifyError => "failed to modify post"
);

operation_error!(
    /// A post could not be deleted.
    PostDeleteError => "failed to delete post"
);

operation_error!(
    /// A single post could not be loaded.
    PostFetchError => "failed to load post"
);

operation_error!(
    /// A like could not be toggled.
    PostLikeError => "failed to toggle like"
);

/// Full create/read/update/delete surface for reading-log posts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostCatalog: Send + Sync {
    /// Create a post under `plan`, returning the new identifier.
    ///
    /// Returns `Ok(None)` without any request when `credential` is absent.
    ///
    /// # Errors
    ///
    /// Returns [`PostWriteError`] when the create request fails.
    async fn create_post<'a>(
        &self,
        plan: PlanId,
        draft: &PostDraft,
        credential: Option<&'a Credential>,
    ) -> Result<Option<PostId>, PostWriteError>;

    /// Replace the title and body of an existing post.
    ///
    /// # Errors
    ///
    /// Returns [`PostModifyError`] when the update request fails.
    async fn update_post(&self, post: PostId, draft: &PostDraft)
    -> Result<PostId, PostModifyError>;

    /// Delete a post.
    ///
    /// Returns `Ok(None)` without any request when `credential` is absent.
    ///
    /// # Errors
    ///
    /// Returns [`PostDeleteError`] when the delete request fails.
    async fn delete_post<'a>(
        &self,
        post: PostId,
        credential: Option<&'a Credential>,
    ) -> Result<Option<()>, PostDeleteError>;

    /// Load a single post.
    ///
    /// Returns `Ok(None)` without any request when `credential` is absent.
    ///
    /// # Errors
    ///
    /// Returns [`PostFetchError`] when the fetch request fails.
    async fn get_post<'a>(
        &self,
        post: PostId,
        credential: Option<&'a Credential>,
    ) -> Result<Option<Post>, PostFetchError>;

    /// List posts matching `query`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`PostListError`] when the listing request fails.
    async fn list_posts(&self, query: &PostQuery) -> Result<Page<Post>, PostListError>;

    /// Toggle the authenticated member's like on a post.
    ///
    /// Returns `Ok(Some(liked))` with the new like status, or `Ok(None)`
    /// without any request when `credential` is absent.
    ///
    /// # Errors
    ///
    /// Returns [`PostLikeError`] when the toggle request fails.
    async fn toggle_like<'a>(
        &self,
        post: PostId,
        credential: Option<&'a Credential>,
    ) -> Result<Option<bool>, PostLikeError>;
}
