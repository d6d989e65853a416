//! Domain primitives, services and ports.
//!
//! Purpose: define the strongly typed entities shared by the HTTP and
//! persistence adapters, the validation rules applied to client input, and
//! the services implementing the account and shopping list use-cases.
//!
//! Public surface:
//! - [`Error`] / [`ErrorCode`]: transport-agnostic error payload.
//! - [`User`], [`ShoppingList`], [`ShoppingListItem`]: stored entities.
//! - [`LoginCredentials`], [`Registration`]: validated account requests.
//! - [`Keyword`], [`CollectionQuery`]: search and paging over collections.
//! - [`AccountService`], [`ShoppingListService`]: driving port
//!   implementations.

pub mod account_service;
pub mod auth;
pub mod error;
pub mod ports;
pub mod search;
pub mod shopping_list;
pub mod shopping_list_service;
pub mod trace_id;
pub mod user;
pub mod validation;

pub use self::account_service::AccountService;
pub use self::auth::{
    CredentialsValidationError, LoginCredentials, PASSWORD_MIN_LENGTH, Registration,
};
pub use self::error::{Error, ErrorCode};
pub use self::search::{CollectionQuery, Keyword};
pub use self::shopping_list::{
    FieldValidationError, ITEM_NAME_MAX, InvalidIdError, ItemName, ShoppingList, ShoppingListId,
    ShoppingListItem, ShoppingListItemId, ShoppingListTitle, TITLE_MAX,
};
pub use self::shopping_list_service::ShoppingListService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{PasswordHash, USERNAME_MAX, User, UserId, UserValidationError, Username};

/// Convenient result alias for fallible domain and handler code.
///
/// # Examples
/// ```
/// use shoplist::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<()> {
///     Err(Error::not_found("Requested shoppinglist was not found"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
