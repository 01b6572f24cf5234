//! Fetch-gating and merge coverage for the post feed.

use pagination::{Cursor, Page};
use rstest::rstest;

use crate::domain::credential::Credential;
use crate::domain::ports::MockPostDirectory;
use crate::domain::post::{PlanId, PostId};

use super::*;

fn post(id: i64) -> Post {
    Post::try_new(
        PostId::new(id),
        PlanId::new(1),
        format!("entry {id}"),
        "notes",
        0,
        0,
    )
    .expect("valid post")
}

fn retitled(id: i64, title: &str) -> Post {
    Post::try_new(PostId::new(id), PlanId::new(1), title, "notes", 0, 0).expect("valid post")
}

fn credential() -> Credential {
    Credential::new("token-123").expect("valid credential")
}

#[tokio::test]
async fn an_unresolved_scope_never_fetches() {
    let mut feed = PostFeed::new(10);
    let mut directory = MockPostDirectory::new();
    directory.expect_my_posts().times(0);
    directory.expect_member_posts().times(0);

    let outcome = feed
        .sync(Some(&credential()), &directory)
        .await
        .expect("no request made");
    assert_eq!(outcome, SyncOutcome::Idle);
}

#[tokio::test]
async fn a_missing_credential_never_fetches() {
    let mut feed = PostFeed::new(10);
    feed.resolve_scope(OwnerScope::Own);
    let mut directory = MockPostDirectory::new();
    directory.expect_my_posts().times(0);
    directory.expect_member_posts().times(0);

    let outcome = feed.sync(None, &directory).await.expect("no request made");
    assert_eq!(outcome, SyncOutcome::Idle);
}

#[tokio::test]
async fn equal_parameters_collapse_to_one_fetch() {
    let mut feed = PostFeed::new(10);
    feed.resolve_scope(OwnerScope::Own);
    let mut directory = MockPostDirectory::new();
    directory
        .expect_my_posts()
        .times(1)
        .returning(|_, _| Ok(Page::new(vec![post(1), post(2)], 2)));

    let first = feed
        .sync(Some(&credential()), &directory)
        .await
        .expect("fetch succeeds");
    assert_eq!(first, SyncOutcome::Fetched { received: 2 });

    let second = feed
        .sync(Some(&credential()), &directory)
        .await
        .expect("no request made");
    assert_eq!(second, SyncOutcome::Idle);
}

#[tokio::test]
async fn own_scope_selects_the_my_posts_query() {
    let mut feed = PostFeed::new(10);
    feed.resolve_scope(OwnerScope::Own);
    assert_eq!(feed.selected_query(), Some(FeedQuery::MyPosts));

    let mut directory = MockPostDirectory::new();
    directory.expect_member_posts().times(0);
    directory
        .expect_my_posts()
        .once()
        .returning(|_, _| Ok(Page::new(vec![post(1)], 1)));

    feed.sync(Some(&credential()), &directory)
        .await
        .expect("fetch succeeds");
}

#[tokio::test]
async fn member_scope_selects_the_member_posts_query() {
    let mut feed = PostFeed::new(10);
    feed.resolve_scope(OwnerScope::Member(MemberId::new(42)));
    assert_eq!(
        feed.selected_query(),
        Some(FeedQuery::MemberPosts(MemberId::new(42)))
    );

    let mut directory = MockPostDirectory::new();
    directory.expect_my_posts().times(0);
    directory
        .expect_member_posts()
        .once()
        .withf(|member, _, _| *member == MemberId::new(42))
        .returning(|_, _, _| Ok(Page::new(vec![post(1)], 1)));

    feed.sync(Some(&credential()), &directory)
        .await
        .expect("fetch succeeds");
}

#[tokio::test]
async fn preview_mode_caps_visible_posts_without_dropping_fetched_ones() {
    let mut feed = PostFeed::new(10).preview();
    feed.resolve_scope(OwnerScope::Own);
    let mut directory = MockPostDirectory::new();
    directory.expect_my_posts().once().returning(|_, _| {
        Ok(Page::new(
            vec![post(1), post(2), post(3), post(4), post(5)],
            5,
        ))
    });

    let outcome = feed
        .sync(Some(&credential()), &directory)
        .await
        .expect("fetch succeeds");
    assert_eq!(outcome, SyncOutcome::Fetched { received: 5 });
    assert_eq!(feed.visible().len(), PREVIEW_LIMIT);
    assert_eq!(feed.fetched().len(), 5);
    assert_eq!(feed.total(), Some(5));
}

#[rstest]
#[case::short_of_limit(2)]
#[case::exactly_limit(3)]
#[tokio::test]
async fn preview_mode_shows_everything_up_to_the_limit(#[case] count: usize) {
    let mut feed = PostFeed::new(10).preview();
    feed.resolve_scope(OwnerScope::Own);
    let posts: Vec<Post> = (1..=count).map(|id| post(id as i64)).collect();
    let total = count as u64;
    let mut directory = MockPostDirectory::new();
    directory
        .expect_my_posts()
        .once()
        .returning(move |_, _| Ok(Page::new(posts.clone(), total)));

    feed.sync(Some(&credential()), &directory)
        .await
        .expect("fetch succeeds");
    assert_eq!(feed.visible().len(), count);
}

#[tokio::test]
async fn advancing_the_cursor_warrants_a_second_fetch() {
    let mut feed = PostFeed::new(2);
    feed.resolve_scope(OwnerScope::Own);
    let mut directory = MockPostDirectory::new();
    directory
        .expect_my_posts()
        .withf(|page, _| page.cursor.is_none())
        .once()
        .returning(|_, _| Ok(Page::new(vec![post(1), post(2)], 4)));
    directory
        .expect_my_posts()
        .withf(|page, _| page.cursor.is_some())
        .once()
        .returning(|_, _| Ok(Page::new(vec![post(3), post(4)], 4)));

    feed.sync(Some(&credential()), &directory)
        .await
        .expect("first page");
    feed.advance(Cursor::encode(&2_i64).expect("encode"));
    feed.sync(Some(&credential()), &directory)
        .await
        .expect("second page");

    let ids: Vec<PostId> = feed.fetched().iter().map(Post::id).collect();
    assert_eq!(
        ids,
        vec![PostId::new(1), PostId::new(2), PostId::new(3), PostId::new(4)]
    );
}

#[tokio::test]
async fn an_already_known_post_is_replaced_in_place() {
    let mut feed = PostFeed::new(2);
    feed.resolve_scope(OwnerScope::Own);
    let mut directory = MockPostDirectory::new();
    directory
        .expect_my_posts()
        .withf(|page, _| page.cursor.is_none())
        .once()
        .returning(|_, _| Ok(Page::new(vec![post(1), post(2)], 3)));
    directory
        .expect_my_posts()
        .withf(|page, _| page.cursor.is_some())
        .once()
        .returning(|_, _| Ok(Page::new(vec![retitled(2, "entry 2, revised"), post(3)], 3)));

    feed.sync(Some(&credential()), &directory)
        .await
        .expect("first page");
    feed.advance(Cursor::encode(&2_i64).expect("encode"));
    feed.sync(Some(&credential()), &directory)
        .await
        .expect("second page");

    let fetched = feed.fetched();
    assert_eq!(fetched.len(), 3);
    assert_eq!(fetched[1].id(), PostId::new(2));
    assert_eq!(fetched[1].title(), "entry 2, revised");
}
