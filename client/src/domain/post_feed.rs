//! Paginated post feed synchroniser.
//!
//! [`PostFeed`] decides when a listing fetch is warranted and folds each
//! response into an append-ordered collection. A fetch runs only when all
//! three conditions hold: a credential is present, the owner scope is
//! resolved, and the page parameters differ structurally from the last
//! issued fetch. Exactly one listing query is active at a time, selected by
//! the scope: the authenticated member's own history or another member's.

use pagination::{Cursor, Page, PageRequest};

use crate::domain::credential::Credential;
use crate::domain::ports::{PostDirectory, PostListError};
use crate::domain::post::{MemberId, Post};

/// Number of posts a preview surface shows.
pub const PREVIEW_LIMIT: usize = 3;

/// Whose post history the feed is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OwnerScope {
    /// Ownership is not yet known; no fetch may run.
    #[default]
    Unresolved,
    /// The authenticated member's own history.
    Own,
    /// Another member's history.
    Member(MemberId),
}

impl OwnerScope {
    /// Whether a listing query can be selected for this scope.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        !matches!(self, Self::Unresolved)
    }
}

/// Parameters a fetch was (or would be) issued with.
///
/// Structural equality over scope and page defines deduplication: a fetch
/// with parameters equal to the last issued ones is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeedParams {
    /// Scope the fetch targets.
    pub scope: OwnerScope,
    /// Page the fetch requests.
    pub page: PageRequest,
}

/// The single listing query a resolved scope selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedQuery {
    /// List the authenticated member's own posts.
    MyPosts,
    /// List the given member's posts.
    MemberPosts(MemberId),
}

/// What a call to [`PostFeed::sync`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// No fetch was warranted; the feed is unchanged.
    Idle,
    /// A page was fetched and merged.
    Fetched {
        /// Number of items the page carried.
        received: usize,
    },
}

/// Accumulated post history with fetch gating.
#[derive(Debug, Clone)]
pub struct PostFeed {
    scope: OwnerScope,
    page: PageRequest,
    last_issued: Option<FeedParams>,
    posts: Vec<Post>,
    total: Option<u64>,
    preview: bool,
}

impl PostFeed {
    /// Build a feed requesting `page_size` items per fetch.
    #[must_use]
    pub fn new(page_size: u32) -> Self {
        Self {
            scope: OwnerScope::Unresolved,
            page: PageRequest::new(page_size),
            last_issued: None,
            posts: Vec::new(),
            total: None,
            preview: false,
        }
    }

    /// Restrict [`PostFeed::visible`] to the first [`PREVIEW_LIMIT`] posts.
    #[must_use]
    pub fn preview(mut self) -> Self {
        self.preview = true;
        self
    }

    /// Record whose history the feed shows.
    ///
    /// Resolving to a different scope does not clear accumulated posts;
    /// callers start a fresh feed per scope.
    pub fn resolve_scope(&mut self, scope: OwnerScope) {
        self.scope = scope;
    }

    /// Request the page after `cursor` on the next sync.
    pub fn advance(&mut self, cursor: Cursor) {
        self.page = self.page.clone().after(cursor);
    }

    /// Parameters the next fetch would carry.
    #[must_use]
    pub fn params(&self) -> FeedParams {
        FeedParams {
            scope: self.scope,
            page: self.page.clone(),
        }
    }

    /// The listing query the current scope selects, if any.
    #[must_use]
    pub const fn selected_query(&self) -> Option<FeedQuery> {
        match self.scope {
            OwnerScope::Unresolved => None,
            OwnerScope::Own => Some(FeedQuery::MyPosts),
            OwnerScope::Member(member) => Some(FeedQuery::MemberPosts(member)),
        }
    }

    /// Parameters of the fetch that should run now, if one is warranted.
    ///
    /// Returns `None` when the credential is absent, the scope is
    /// unresolved, or the parameters equal the last issued fetch.
    #[must_use]
    pub fn pending_fetch(&self, credential: Option<&Credential>) -> Option<FeedParams> {
        credential?;
        if !self.scope.is_resolved() {
            return None;
        }
        let params = self.params();
        if self.last_issued.as_ref() == Some(&params) {
            return None;
        }
        Some(params)
    }

    /// Fetch and merge the next page when a fetch is warranted.
    ///
    /// The parameters are recorded as issued before the request is awaited,
    /// so overlapping syncs with equal parameters collapse to one fetch. A
    /// failed fetch keeps the parameters recorded; callers retry by changing
    /// them, not by re-issuing the same ones.
    ///
    /// # Errors
    ///
    /// Returns [`PostListError`] when the listing request fails.
    pub async fn sync(
        &mut self,
        credential: Option<&Credential>,
        directory: &impl PostDirectory,
    ) -> Result<SyncOutcome, PostListError> {
        let Some(credential) = credential else {
            return Ok(SyncOutcome::Idle);
        };
        let Some(params) = self.pending_fetch(Some(credential)) else {
            return Ok(SyncOutcome::Idle);
        };
        let Some(query) = self.selected_query() else {
            return Ok(SyncOutcome::Idle);
        };
        self.last_issued = Some(params.clone());
        let page = match query {
            FeedQuery::MyPosts => directory.my_posts(&params.page, credential).await?,
            FeedQuery::MemberPosts(member) => {
                directory.member_posts(member, &params.page, credential).await?
            }
        };
        let received = self.merge(page);
        Ok(SyncOutcome::Fetched { received })
    }

    /// Posts to show, honouring preview mode.
    #[must_use]
    pub fn visible(&self) -> &[Post] {
        if self.preview {
            self.posts
                .get(..PREVIEW_LIMIT.min(self.posts.len()))
                .unwrap_or(&self.posts)
        } else {
            &self.posts
        }
    }

    /// Every post fetched so far, in append order.
    #[must_use]
    pub fn fetched(&self) -> &[Post] {
        &self.posts
    }

    /// Collection total reported by the most recent fetch.
    #[must_use]
    pub const fn total(&self) -> Option<u64> {
        self.total
    }

    /// Fold a page into the feed.
    ///
    /// New posts append in page order; a post whose id is already present
    /// replaces the existing entry in place, preserving its position.
    fn merge(&mut self, page: Page<Post>) -> usize {
        let received = page.len();
        for post in page.items {
            if let Some(existing) = self.posts.iter_mut().find(|p| p.id() == post.id()) {
                *existing = post;
            } else {
                self.posts.push(post);
            }
        }
        self.total = Some(page.total);
        received
    }
}

#[cfg(test)]
mod tests;
