//! Conversion of validation failures into client-facing [`Error`] values.
//!
//! Each rejection carries `details.code`, a stable machine-readable reason,
//! and `details.field` where a single field is at fault.

use pagination::PageRequestError;
use serde_json::json;

use super::{CredentialsValidationError, Error, FieldValidationError, Keyword};

/// Machine-readable rejection reasons exposed under `details.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionCode {
    MissingCredentials,
    WeakPassword,
    InvalidUsername,
    DuplicateUsername,
    MissingField,
    TooLong,
    DuplicateTitle,
    InvalidPagination,
}

impl RejectionCode {
    /// Wire representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingCredentials => "missing_credentials",
            Self::WeakPassword => "weak_password",
            Self::InvalidUsername => "invalid_username",
            Self::DuplicateUsername => "duplicate_username",
            Self::MissingField => "missing_field",
            Self::TooLong => "too_long",
            Self::DuplicateTitle => "duplicate_title",
            Self::InvalidPagination => "invalid_pagination",
        }
    }
}

fn field_details(field: &str, code: RejectionCode) -> serde_json::Value {
    json!({ "field": field, "code": code.as_str() })
}

impl From<CredentialsValidationError> for Error {
    fn from(err: CredentialsValidationError) -> Self {
        let message = err.to_string();
        match err {
            CredentialsValidationError::MissingCredentials => Error::invalid_request(message)
                .with_details(json!({ "code": RejectionCode::MissingCredentials.as_str() })),
            CredentialsValidationError::WeakPassword { .. } => Error::conflict(message)
                .with_details(field_details("password", RejectionCode::WeakPassword)),
            CredentialsValidationError::InvalidUsername(_) => Error::invalid_request(message)
                .with_details(field_details("username", RejectionCode::InvalidUsername)),
        }
    }
}

impl From<FieldValidationError> for Error {
    fn from(err: FieldValidationError) -> Self {
        let code = match err {
            FieldValidationError::MissingField { .. } => RejectionCode::MissingField,
            FieldValidationError::TooLong { .. } => RejectionCode::TooLong,
        };
        Error::invalid_request(err.to_string()).with_details(field_details(err.field(), code))
    }
}

impl From<PageRequestError> for Error {
    fn from(err: PageRequestError) -> Self {
        Error::invalid_request(err.to_string())
            .with_details(field_details(err.field(), RejectionCode::InvalidPagination))
    }
}

/// Registration attempted with a taken username.
pub fn duplicate_username(username: &str) -> Error {
    Error::conflict(format!("username `{username}` is already registered"))
        .with_details(field_details("username", RejectionCode::DuplicateUsername))
}

/// List title already used by another of the owner's lists.
pub fn duplicate_title(title: &str) -> Error {
    Error::conflict(format!("shoppinglist `{title}` already exists"))
        .with_details(field_details("title", RejectionCode::DuplicateTitle))
}

/// The list does not exist or belongs to someone else.
pub fn list_not_found() -> Error {
    Error::not_found("Requested shoppinglist was not found")
}

/// The item does not exist in the resolved list.
pub fn item_not_found() -> Error {
    Error::not_found("Requested shoppinglist item was not found")
}

/// A list search matched nothing.
pub fn no_list_matches(keyword: &Keyword) -> Error {
    Error::not_found(format!(
        "no shoppinglist that matches the keyword `{}`",
        keyword.as_str()
    ))
}

/// An item search matched nothing.
pub fn no_item_matches(keyword: &Keyword) -> Error {
    Error::not_found(format!("No item matches the keyword `{}`", keyword.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode, ShoppingListTitle};
    use rstest::rstest;

    #[rstest]
    #[case(CredentialsValidationError::MissingCredentials, ErrorCode::InvalidRequest, "missing_credentials")]
    #[case(CredentialsValidationError::WeakPassword { min: 6 }, ErrorCode::Conflict, "weak_password")]
    fn credential_errors_map_to_codes(
        #[case] err: CredentialsValidationError,
        #[case] code: ErrorCode,
        #[case] detail: &str,
    ) {
        let mapped = Error::from(err);
        assert_eq!(mapped.code(), code);
        let details = mapped.details().expect("details");
        assert_eq!(details["code"], detail);
    }

    #[rstest]
    fn missing_title_names_the_field() {
        let err = ShoppingListTitle::parse(None).expect_err("missing title");
        let mapped = Error::from(err);
        assert_eq!(mapped.message(), "title must be provided");
        assert_eq!(mapped.details().expect("details")["field"], "title");
        assert_eq!(mapped.details().expect("details")["code"], "missing_field");
    }

    #[rstest]
    fn pagination_errors_are_bad_requests() {
        let mapped = Error::from(PageRequestError::InvalidLimit);
        assert_eq!(mapped.code(), ErrorCode::InvalidRequest);
        assert_eq!(mapped.message(), "limit must be a positive integer");
        assert_eq!(mapped.details().expect("details")["field"], "limit");
    }

    #[rstest]
    fn search_misses_quote_the_keyword() {
        let keyword = Keyword::parse(Some("mombasa")).expect("keyword");
        assert_eq!(
            no_list_matches(&keyword).message(),
            "no shoppinglist that matches the keyword `mombasa`"
        );
        assert_eq!(
            no_item_matches(&keyword).message(),
            "No item matches the keyword `mombasa`"
        );
    }
}
