//! Tests for the domain user model.

use super::*;
use rstest::{fixture, rstest};

const VALID_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

#[fixture]
fn hash() -> PasswordHash {
    PasswordHash::new("$argon2id$v=19$m=8,t=1,p=1$c2FsdA$aGFzaA").expect("hash fixture")
}

#[rstest]
#[case("", UserValidationError::EmptyId)]
#[case("not-a-uuid", UserValidationError::InvalidId)]
#[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", UserValidationError::InvalidId)]
fn user_id_rejects_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(UserId::new(raw).expect_err("invalid id"), expected);
}

#[rstest]
fn user_id_round_trips_through_serde() {
    let id = UserId::new(VALID_ID).expect("valid id");
    let json = serde_json::to_string(&id).expect("serialise");
    assert_eq!(json, format!("\"{VALID_ID}\""));
    let back: UserId = serde_json::from_str(&json).expect("deserialise");
    assert_eq!(back, id);
}

#[rstest]
#[case("   ", UserValidationError::EmptyUsername)]
#[case(&"u".repeat(USERNAME_MAX + 1), UserValidationError::UsernameTooLong { max: USERNAME_MAX })]
fn username_rejects_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(Username::new(raw).expect_err("invalid username"), expected);
}

#[rstest]
fn username_is_trimmed_but_keeps_case() {
    let username = Username::new("  Ada_Lovelace ").expect("valid username");
    assert_eq!(username.as_str(), "Ada_Lovelace");
}

#[rstest]
fn password_hash_debug_is_redacted(hash: PasswordHash) {
    let rendered = format!("{hash:?}");
    assert!(!rendered.contains("argon2"));
    assert!(PasswordHash::new("  ").is_err());
}

#[rstest]
#[case(Some("  Ada "), Some("Ada"))]
#[case(Some("   "), None)]
#[case(None, None)]
fn names_are_normalised(
    #[case] raw: Option<&str>,
    #[case] expected: Option<&str>,
    hash: PasswordHash,
) {
    let user = User::new(
        UserId::random(),
        Username::new("ada").expect("username"),
        hash,
    )
    .with_names(raw, raw);
    assert_eq!(user.firstname(), expected);
    assert_eq!(user.lastname(), expected);
}
