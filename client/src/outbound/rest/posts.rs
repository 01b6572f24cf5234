//! Post operations against the reading-log API.
//!
//! Credential-gated operations return `Ok(None)` before any request is
//! built when no credential is supplied; the checks here never reach
//! [`RestGateway`] in that case.
//!
//! [`RestGateway`]: super::RestGateway

use async_trait::async_trait;
use pagination::Page;
use reqwest::Method;

use crate::domain::credential::Credential;
use crate::domain::ports::{
    PostCatalog, PostDeleteError, PostFetchError, PostLikeError, PostListError, PostModifyError,
    PostWriteError,
};
use crate::domain::post::{PlanId, Post, PostDraft, PostId, PostQuery};

use super::dto::{CursorPosition, LikeDto, PostDataDto, PostIdDto, PostsPageDto};
use super::{RestClient, log_failure};

impl RestClient {
    /// Create a post under `plan`.
    ///
    /// Returns `Ok(None)` without a request when `credential` is absent.
    ///
    /// # Errors
    ///
    /// Returns [`PostWriteError`] when the create request fails.
    pub async fn create_post(
        &self,
        plan: PlanId,
        draft: &PostDraft,
        credential: Option<&Credential>,
    ) -> Result<Option<PostId>, PostWriteError> {
        let Some(credential) = credential else {
            return Ok(None);
        };
        let created: PostIdDto = self
            .gateway
            .call("create_post", Method::POST, &format!("posts/{plan}"))
            .authenticated(credential)
            .json(&PostDataDto::from(draft))
            .map_err(|error| PostWriteError::backend(log_failure(&error)))?
            .dispatch()
            .await
            .map_err(|error| PostWriteError::backend(log_failure(&error)))?;
        Ok(Some(created.post_id))
    }

    /// Replace the title and body of an existing post.
    ///
    /// # Errors
    ///
    /// Returns [`PostModifyError`] when the update request fails.
    pub async fn update_post(
        &self,
        post: PostId,
        draft: &PostDraft,
    ) -> Result<PostId, PostModifyError> {
        let updated: PostIdDto = self
            .gateway
            .call("update_post", Method::PATCH, &format!("posts/{post}"))
            .json(&PostDataDto::from(draft))
            .map_err(|error| PostModifyError::backend(log_failure(&error)))?
            .dispatch()
            .await
            .map_err(|error| PostModifyError::backend(log_failure(&error)))?;
        Ok(updated.post_id)
    }

    /// Delete a post.
    ///
    /// Returns `Ok(None)` without a request when `credential` is absent.
    ///
    /// # Errors
    ///
    /// Returns [`PostDeleteError`] when the delete request fails.
    pub async fn delete_post(
        &self,
        post: PostId,
        credential: Option<&Credential>,
    ) -> Result<Option<()>, PostDeleteError> {
        let Some(credential) = credential else {
            return Ok(None);
        };
        self.gateway
            .call("delete_post", Method::DELETE, &format!("posts/{post}"))
            .authenticated(credential)
            .dispatch_empty()
            .await
            .map_err(|error| PostDeleteError::backend(log_failure(&error)))?;
        Ok(Some(()))
    }

    /// Load a single post.
    ///
    /// Returns `Ok(None)` without a request when `credential` is absent.
    ///
    /// # Errors
    ///
    /// Returns [`PostFetchError`] when the fetch request fails.
    pub async fn get_post(
        &self,
        post: PostId,
        credential: Option<&Credential>,
    ) -> Result<Option<Post>, PostFetchError> {
        let Some(credential) = credential else {
            return Ok(None);
        };
        let fetched: Post = self
            .gateway
            .call("get_post", Method::GET, &format!("posts/{post}"))
            .authenticated(credential)
            .dispatch()
            .await
            .map_err(|error| PostFetchError::backend(log_failure(&error)))?;
        Ok(Some(fetched))
    }

    /// List posts matching `query`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`PostListError`] when the listing request fails.
    pub async fn list_posts(&self, query: &PostQuery) -> Result<Page<Post>, PostListError> {
        let mut call = self
            .gateway
            .call("list_posts", Method::GET, "posts")
            .query("size", query.page.size);
        if let Some(member) = query.owner {
            call = call.query("memberId", member);
        }
        if let Some(cursor) = &query.page.cursor {
            let after = CursorPosition::decode_from(cursor).map_err(|error| {
                tracing::error!(operation = "list_posts", %error, "listing cursor failed to decode");
                PostListError::backend(error.to_string())
            })?;
            call = call.query("after", after);
        }
        let page: PostsPageDto = call
            .dispatch()
            .await
            .map_err(|error| PostListError::backend(log_failure(&error)))?;
        Ok(page.into_page())
    }

    /// Toggle the authenticated member's like on a post.
    ///
    /// Returns `Ok(None)` without a request when `credential` is absent.
    ///
    /// # Errors
    ///
    /// Returns [`PostLikeError`] when the toggle request fails.
    pub async fn toggle_like(
        &self,
        post: PostId,
        credential: Option<&Credential>,
    ) -> Result<Option<bool>, PostLikeError> {
        let Some(credential) = credential else {
            return Ok(None);
        };
        let like: LikeDto = self
            .gateway
            .call("toggle_like", Method::POST, &format!("posts/{post}/like"))
            .authenticated(credential)
            .dispatch()
            .await
            .map_err(|error| PostLikeError::backend(log_failure(&error)))?;
        Ok(Some(like.success))
    }
}

#[async_trait]
impl PostCatalog for RestClient {
    async fn create_post<'a>(
        &self,
        plan: PlanId,
        draft: &PostDraft,
        credential: Option<&'a Credential>,
    ) -> Result<Option<PostId>, PostWriteError> {
        Self::create_post(self, plan, draft, credential).await
    }

    async fn update_post(
        &self,
        post: PostId,
        draft: &PostDraft,
    ) -> Result<PostId, PostModifyError> {
        Self::update_post(self, post, draft).await
    }

    async fn delete_post<'a>(
        &self,
        post: PostId,
        credential: Option<&'a Credential>,
    ) -> Result<Option<()>, PostDeleteError> {
        Self::delete_post(self, post, credential).await
    }

    async fn get_post<'a>(
        &self,
        post: PostId,
        credential: Option<&'a Credential>,
    ) -> Result<Option<Post>, PostFetchError> {
        Self::get_post(self, post, credential).await
    }

    async fn list_posts(&self, query: &PostQuery) -> Result<Page<Post>, PostListError> {
        Self::list_posts(self, query).await
    }

    async fn toggle_like<'a>(
        &self,
        post: PostId,
        credential: Option<&'a Credential>,
    ) -> Result<Option<bool>, PostLikeError> {
        Self::toggle_like(self, post, credential).await
    }
}
