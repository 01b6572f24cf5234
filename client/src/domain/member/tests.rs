//! Field-rule coverage for registration values.

use rstest::rstest;

use super::*;

#[rstest]
#[case::minimum("ab")]
#[case::maximum("abcdefghij12345")]
#[case::mixed("Reader99")]
fn accepts_valid_usernames(#[case] value: &str) {
    assert!(Username::new(value).is_ok());
}

#[rstest]
#[case::empty("")]
#[case::too_short("a")]
#[case::too_long("abcdefghij123456")]
#[case::symbol("read_er")]
#[case::hangul("독서가")]
fn rejects_invalid_usernames(#[case] value: &str) {
    assert_eq!(
        Username::new(value),
        Err(MemberValidationError::InvalidUsername)
    );
}

#[rstest]
#[case::all_classes("abc12!")]
#[case::longer("reading#2024")]
fn accepts_valid_passwords(#[case] value: &str) {
    assert!(Password::new(value).is_ok());
}

#[rstest]
#[case::too_short("a1!", MemberValidationError::PasswordTooShort { min: PASSWORD_MIN })]
#[case::too_long("abcdefg123456!!!", MemberValidationError::PasswordTooLong { max: PASSWORD_MAX })]
#[case::no_digit("abcdef!", MemberValidationError::PasswordMissingClass)]
#[case::no_symbol("abc123", MemberValidationError::PasswordMissingClass)]
#[case::no_letter("123456!", MemberValidationError::PasswordMissingClass)]
fn rejects_invalid_passwords(#[case] value: &str, #[case] expected: MemberValidationError) {
    assert_eq!(Password::new(value), Err(expected));
}

#[test]
fn password_debug_output_is_redacted() {
    let password = Password::new("abc12!").expect("valid password");
    assert_eq!(format!("{password:?}"), "Password(..)");
}

#[rstest]
#[case::minimum("ab")]
#[case::maximum("1234567890")]
#[case::hangul("독서가")]
fn accepts_valid_nicknames(#[case] value: &str) {
    assert!(Nickname::new(value).is_ok());
}

#[rstest]
#[case::too_short("a", MemberValidationError::NicknameTooShort { min: NICKNAME_MIN })]
#[case::too_long("12345678901", MemberValidationError::NicknameTooLong { max: NICKNAME_MAX })]
fn rejects_invalid_nicknames(#[case] value: &str, #[case] expected: MemberValidationError) {
    assert_eq!(Nickname::new(value), Err(expected));
}

#[rstest]
#[case::plain("reader@example.com")]
#[case::dotted("book.worm@mail.example.org")]
fn accepts_valid_emails(#[case] value: &str) {
    assert!(Email::new(value).is_ok());
}

#[rstest]
#[case::missing_at("reader.example.com")]
#[case::long_tld("reader@example.museum")]
#[case::trailing_dot("reader.@example.com")]
fn rejects_invalid_emails(#[case] value: &str) {
    assert_eq!(Email::new(value), Err(MemberValidationError::InvalidEmail));
}

#[test]
fn image_url_requires_an_absolute_url() {
    assert!(ImageUrl::new("https://images.invalid/profile.png").is_ok());
    assert_eq!(
        ImageUrl::new("profile.png"),
        Err(MemberValidationError::InvalidImageUrl)
    );
}

fn valid_draft() -> RegistrationDraft {
    RegistrationDraft {
        username: "reader1".into(),
        password: "abc12!".into(),
        password_check: "abc12!".into(),
        nickname: "bookworm".into(),
        email: "reader@example.com".into(),
        introduction: String::new(),
        image: None,
    }
}

#[test]
fn validate_accepts_a_complete_draft() {
    assert_eq!(valid_draft().validate(), Ok(()));
}

#[test]
fn validate_requires_matching_password_confirmation() {
    let mut draft = valid_draft();
    draft.password_check = "abc13!".into();
    assert_eq!(
        draft.validate(),
        Err(MemberValidationError::PasswordCheckMismatch)
    );
}

#[rstest]
#[case::username(|d: &mut RegistrationDraft| d.username = "a".into())]
#[case::password(|d: &mut RegistrationDraft| d.password = "short".into())]
#[case::nickname(|d: &mut RegistrationDraft| d.nickname = "a".into())]
#[case::email(|d: &mut RegistrationDraft| d.email = "nope".into())]
fn validate_rejects_any_failing_field(#[case] corrupt: fn(&mut RegistrationDraft)) {
    let mut draft = valid_draft();
    corrupt(&mut draft);
    assert!(draft.validate().is_err());
}
