//! Workflow coverage for the registration form.

use mockall::predicate::eq;
use rstest::rstest;

use crate::domain::member::Username;
use crate::domain::ports::{
    AvailabilityCheckError, ImageUploadError, MockAvailabilityProbe, MockImageStore,
    MockMemberRegistrar, RegistrationError,
};

use super::*;

fn filled_form() -> RegistrationForm {
    let mut form = RegistrationForm::new();
    form.edit_username("reader1");
    form.edit_password("abc12!");
    form.edit_password_check("abc12!");
    form.edit_nickname("bookworm");
    form.edit_email("reader@example.com");
    form
}

async fn verify_both_fields(form: &mut RegistrationForm) {
    let mut probe = MockAvailabilityProbe::new();
    probe.expect_username_available().returning(|_| Ok(true));
    probe.expect_nickname_available().returning(|_| Ok(true));
    form.check_username(&probe).await.expect("valid username");
    form.check_nickname(&probe).await.expect("valid nickname");
}

#[tokio::test]
async fn available_username_moves_the_field_to_checked() {
    let mut form = filled_form();
    let mut probe = MockAvailabilityProbe::new();
    let expected = Username::new("reader1").expect("valid username");
    probe
        .expect_username_available()
        .with(eq(expected))
        .once()
        .returning(|_| Ok(true));

    let state = form.check_username(&probe).await.expect("valid username");
    assert_eq!(state, FieldCheckState::Checked);
}

#[tokio::test]
async fn taken_nickname_moves_the_field_to_failed() {
    let mut form = filled_form();
    let mut probe = MockAvailabilityProbe::new();
    probe
        .expect_nickname_available()
        .once()
        .returning(|_| Ok(false));

    let state = form.check_nickname(&probe).await.expect("valid nickname");
    assert_eq!(state, FieldCheckState::Failed);
}

#[tokio::test]
async fn a_probe_failure_is_absorbed_as_failed() {
    let mut form = filled_form();
    let mut probe = MockAvailabilityProbe::new();
    probe
        .expect_username_available()
        .once()
        .returning(|_| Err(AvailabilityCheckError::backend("gateway down")));

    let state = form.check_username(&probe).await.expect("valid username");
    assert_eq!(state, FieldCheckState::Failed);
}

#[tokio::test]
async fn an_invalid_username_never_reaches_the_probe() {
    let mut form = filled_form();
    form.edit_username("a");
    let mut probe = MockAvailabilityProbe::new();
    probe.expect_username_available().times(0);

    let result = form.check_username(&probe).await;
    assert!(result.is_err());
    assert_eq!(
        form.gate().state(IdentityField::Username),
        FieldCheckState::Unchecked
    );
}

#[tokio::test]
async fn submission_requires_both_verified_fields() {
    let mut form = filled_form();
    assert!(!form.submission_allowed());

    verify_both_fields(&mut form).await;
    assert!(form.submission_allowed());
}

#[tokio::test]
async fn editing_a_checked_field_revokes_submission() {
    let mut form = filled_form();
    verify_both_fields(&mut form).await;

    form.edit_username("reader1");
    assert!(!form.submission_allowed());
    assert_eq!(
        form.gate().state(IdentityField::Username),
        FieldCheckState::Unchecked
    );
}

#[rstest]
#[case::broken_password(|f: &mut RegistrationForm| f.edit_password("short"))]
#[case::broken_confirmation(|f: &mut RegistrationForm| f.edit_password_check("other1!"))]
#[case::broken_email(|f: &mut RegistrationForm| f.edit_email("nope"))]
#[tokio::test]
async fn an_invalid_draft_blocks_submission_despite_verdicts(
    #[case] corrupt: fn(&mut RegistrationForm),
) {
    let mut form = filled_form();
    verify_both_fields(&mut form).await;

    corrupt(&mut form);
    assert!(!form.submission_allowed());
}

#[tokio::test]
async fn submit_is_a_no_op_while_submission_is_blocked() {
    let mut form = filled_form();
    let mut registrar = MockMemberRegistrar::new();
    registrar.expect_register().times(0);

    let outcome = form.submit(&registrar).await.expect("no request made");
    assert_eq!(outcome, None);
}

#[tokio::test]
async fn submit_forwards_an_allowed_draft() {
    let mut form = filled_form();
    verify_both_fields(&mut form).await;

    let mut registrar = MockMemberRegistrar::new();
    registrar
        .expect_register()
        .once()
        .returning(|_| Ok(MemberId::new(7)));

    let outcome = form.submit(&registrar).await.expect("registration accepted");
    assert_eq!(outcome, Some(MemberId::new(7)));
}

#[tokio::test]
async fn submit_surfaces_a_backend_rejection() {
    let mut form = filled_form();
    verify_both_fields(&mut form).await;

    let mut registrar = MockMemberRegistrar::new();
    registrar
        .expect_register()
        .once()
        .returning(|_| Err(RegistrationError::backend("duplicate username")));

    assert!(form.submit(&registrar).await.is_err());
}

#[tokio::test]
async fn a_stored_image_is_attached_to_the_draft() {
    let mut form = filled_form();
    let mut store = MockImageStore::new();
    store.expect_store_profile_image().once().returning(|_| {
        ImageUrl::new("https://images.invalid/avatar.png")
            .map_err(|error| ImageUploadError::backend(error.to_string()))
    });

    let image = ProfileImage {
        file_name: "avatar.png".into(),
        content_type: "image/png".into(),
        bytes: vec![0x89, 0x50, 0x4e, 0x47],
    };
    let url = form
        .attach_profile_image(&store, image)
        .await
        .expect("upload accepted");
    assert_eq!(url.as_str(), "https://images.invalid/avatar.png");
    assert_eq!(form.draft().image.as_ref(), Some(&url));
}

#[tokio::test]
async fn a_failed_upload_leaves_the_draft_image_unset() {
    let mut form = filled_form();
    let mut store = MockImageStore::new();
    store
        .expect_store_profile_image()
        .once()
        .returning(|_| Err(ImageUploadError::backend("storage unavailable")));

    let image = ProfileImage {
        file_name: "avatar.png".into(),
        content_type: "image/png".into(),
        bytes: vec![0x00],
    };
    assert!(form.attach_profile_image(&store, image).await.is_err());
    assert_eq!(form.draft().image, None);
}
