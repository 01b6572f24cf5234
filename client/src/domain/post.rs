//! Post data model.
//!
//! A post is one reading record published under a reading plan. The wire
//! format is camelCase (`postId`, `countLike`, ...); conversions go through
//! a DTO pair so invalid payloads are rejected at the serde boundary.

use std::fmt;

use serde::{Deserialize, Serialize};

use pagination::PageRequest;

/// Validation errors returned by [`Post::try_new`] and the DTO conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PostValidationError {
    /// Title is empty after trimming whitespace.
    #[error("post title must not be empty")]
    EmptyTitle,
    /// A counter field arrived negative on the wire.
    #[error("post counter must not be negative: {field}")]
    NegativeCounter {
        /// Wire name of the offending counter.
        field: &'static str,
    },
}

macro_rules! integer_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw identifier.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Raw identifier value.
            #[must_use]
            pub const fn value(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

integer_id!(
    /// Stable post identifier.
    PostId
);
integer_id!(
    /// Reading plan a post is published under.
    PlanId
);
integer_id!(
    /// Stable member identifier.
    MemberId
);

/// One published reading record.
///
/// ## Invariants
/// - `title` is non-empty once trimmed.
/// - Counters are derived by the backend and never negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PostDto", into = "PostDto")]
pub struct Post {
    id: PostId,
    plan_id: PlanId,
    title: String,
    body: String,
    count_comment: u64,
    count_like: u64,
}

impl Post {
    /// Fallible constructor enforcing the title invariant.
    pub fn try_new(
        id: PostId,
        plan_id: PlanId,
        title: impl Into<String>,
        body: impl Into<String>,
        count_comment: u64,
        count_like: u64,
    ) -> Result<Self, PostValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(PostValidationError::EmptyTitle);
        }
        Ok(Self {
            id,
            plan_id,
            title,
            body: body.into(),
            count_comment,
            count_like,
        })
    }

    /// Stable post identifier.
    #[must_use]
    pub const fn id(&self) -> PostId {
        self.id
    }

    /// Reading plan this post belongs to.
    #[must_use]
    pub const fn plan_id(&self) -> PlanId {
        self.plan_id
    }

    /// Post title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Post body text.
    #[must_use]
    pub fn body(&self) -> &str {
        self.body.as_str()
    }

    /// Number of comments, derived by the backend.
    #[must_use]
    pub const fn count_comment(&self) -> u64 {
        self.count_comment
    }

    /// Number of likes, derived by the backend.
    #[must_use]
    pub const fn count_like(&self) -> u64 {
        self.count_like
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostDto {
    post_id: PostId,
    plan_id: PlanId,
    title: String,
    content: String,
    count_comment: i64,
    count_like: i64,
}

impl From<Post> for PostDto {
    fn from(value: Post) -> Self {
        let Post {
            id,
            plan_id,
            title,
            body,
            count_comment,
            count_like,
        } = value;
        Self {
            post_id: id,
            plan_id,
            title,
            content: body,
            // Counters fit i64 in practice; the wire type is signed.
            count_comment: i64::try_from(count_comment).unwrap_or(i64::MAX),
            count_like: i64::try_from(count_like).unwrap_or(i64::MAX),
        }
    }
}

impl TryFrom<PostDto> for Post {
    type Error = PostValidationError;

    fn try_from(value: PostDto) -> Result<Self, Self::Error> {
        let count_comment = u64::try_from(value.count_comment)
            .map_err(|_| PostValidationError::NegativeCounter {
                field: "countComment",
            })?;
        let count_like = u64::try_from(value.count_like).map_err(|_| {
            PostValidationError::NegativeCounter {
                field: "countLike",
            }
        })?;
        Post::try_new(
            value.post_id,
            value.plan_id,
            value.title,
            value.content,
            count_comment,
            count_like,
        )
    }
}

/// Title and body payload for creating or updating a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    title: String,
    body: String,
}

impl PostDraft {
    /// Validate and construct a write payload.
    ///
    /// # Errors
    ///
    /// Returns [`PostValidationError::EmptyTitle`] when the title is blank.
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<Self, PostValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(PostValidationError::EmptyTitle);
        }
        Ok(Self {
            title,
            body: body.into(),
        })
    }

    /// Draft title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Draft body text.
    #[must_use]
    pub fn body(&self) -> &str {
        self.body.as_str()
    }
}

/// Filter for the public post listing.
///
/// Structural equality over all fields defines fetch deduplication, the same
/// contract as [`PageRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostQuery {
    /// Restrict the listing to one member's posts.
    pub owner: Option<MemberId>,
    /// Pagination parameters for the requested slice.
    pub page: PageRequest,
}

impl PostQuery {
    /// Build an unfiltered first-page query.
    #[must_use]
    pub fn new(page_size: u32) -> Self {
        Self {
            owner: None,
            page: PageRequest::new(page_size),
        }
    }

    /// Restrict the query to posts owned by `member`.
    #[must_use]
    pub const fn owned_by(mut self, member: MemberId) -> Self {
        self.owner = Some(member);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post_json(count_like: i64) -> serde_json::Value {
        serde_json::json!({
            "postId": 7,
            "planId": 3,
            "title": "Middlemarch, week two",
            "content": "Finished book four.",
            "countComment": 2,
            "countLike": count_like,
        })
    }

    #[test]
    fn deserialises_camel_case_payloads() {
        let post: Post = serde_json::from_value(post_json(5)).expect("valid payload");
        assert_eq!(post.id(), PostId::new(7));
        assert_eq!(post.plan_id(), PlanId::new(3));
        assert_eq!(post.title(), "Middlemarch, week two");
        assert_eq!(post.count_like(), 5);
    }

    #[test]
    fn rejects_negative_counters() {
        let error = serde_json::from_value::<Post>(post_json(-1)).expect_err("must fail");
        assert!(error.to_string().contains("countLike"));
    }

    #[test]
    fn rejects_blank_titles() {
        assert_eq!(
            PostDraft::new("   ", "body"),
            Err(PostValidationError::EmptyTitle)
        );
        assert_eq!(
            Post::try_new(PostId::new(1), PlanId::new(1), " ", "", 0, 0),
            Err(PostValidationError::EmptyTitle)
        );
    }

    #[test]
    fn queries_compare_structurally() {
        let base = PostQuery::new(10);
        assert_eq!(base, PostQuery::new(10));
        assert_ne!(base.clone(), base.clone().owned_by(MemberId::new(4)));
    }
}
