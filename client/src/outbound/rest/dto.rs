//! DTOs for the reading-log API wire format.
//!
//! The adapter decodes into these transport DTOs first, then maps into
//! domain values in one pass. Request DTOs borrow from the domain types so
//! serialisation never clones field text.

use pagination::Page;
use serde::{Deserialize, Serialize};

use crate::domain::member::RegistrationDraft;
use crate::domain::post::{MemberId, Post, PostDraft, PostId};

#[derive(Debug, Deserialize)]
pub(super) struct PostsPageDto {
    #[serde(default)]
    pub(super) data: Vec<Post>,
    pub(super) total: u64,
}

impl PostsPageDto {
    pub(super) fn into_page(self) -> Page<Post> {
        Page::new(self.data, self.total)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PostIdDto {
    pub(super) post_id: PostId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct MemberIdDto {
    pub(super) member_id: MemberId,
}

#[derive(Debug, Deserialize)]
pub(super) struct LikeDto {
    pub(super) success: bool,
}

#[derive(Debug, Deserialize)]
pub(super) struct ImageUrlDto {
    pub(super) url: String,
}

/// Position hidden inside a listing cursor token.
#[derive(Debug, Serialize, Deserialize)]
pub(super) struct CursorPosition {
    pub(super) after: i64,
}

impl CursorPosition {
    /// Decode a cursor token into the `after` query value it names.
    pub(super) fn decode_from(cursor: &pagination::Cursor) -> Result<i64, pagination::CursorError> {
        cursor.decode::<Self>().map(|position| position.after)
    }
}

#[derive(Debug, Serialize)]
pub(super) struct PostDataDto<'a> {
    pub(super) title: &'a str,
    pub(super) content: &'a str,
}

impl<'a> From<&'a PostDraft> for PostDataDto<'a> {
    fn from(draft: &'a PostDraft) -> Self {
        Self {
            title: draft.title(),
            content: draft.body(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct UsernameDto<'a> {
    pub(super) user_name: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct NicknameDto<'a> {
    pub(super) nickname: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RegistrationDto<'a> {
    pub(super) user_name: &'a str,
    pub(super) password: &'a str,
    pub(super) nick_name: &'a str,
    pub(super) email: &'a str,
    pub(super) introduction: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) image_url: Option<&'a str>,
}

impl<'a> From<&'a RegistrationDraft> for RegistrationDto<'a> {
    fn from(draft: &'a RegistrationDraft) -> Self {
        Self {
            user_name: &draft.username,
            password: &draft.password,
            nick_name: &draft.nickname,
            email: &draft.email,
            introduction: &draft.introduction,
            image_url: draft.image.as_ref().map(|url| url.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn posts_page_payloads_tolerate_a_missing_data_field() {
        let page: PostsPageDto =
            serde_json::from_value(serde_json::json!({ "total": 0 })).expect("valid payload");
        assert!(page.into_page().is_empty());
    }

    #[test]
    fn registration_requests_serialise_camel_case_and_drop_absent_images() {
        let draft = RegistrationDraft {
            username: "reader1".into(),
            password: "abc12!".into(),
            password_check: "abc12!".into(),
            nickname: "bookworm".into(),
            email: "reader@example.com".into(),
            introduction: "hello".into(),
            image: None,
        };
        let value = serde_json::to_value(RegistrationDto::from(&draft)).expect("serialises");
        assert_eq!(
            value,
            serde_json::json!({
                "userName": "reader1",
                "password": "abc12!",
                "nickName": "bookworm",
                "email": "reader@example.com",
                "introduction": "hello",
            })
        );
    }
}
