//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`PasswordHasher`], [`TokenService`]) are
//! implemented by outbound adapters. Driving ports ([`AccountCommand`],
//! [`Authenticator`], [`ShoppingListCommand`], [`ShoppingListItemCommand`])
//! are implemented by domain services and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod password_hasher;
mod shopping_list_command;
mod shopping_list_item_repository;
mod shopping_list_repository;
mod token_service;
mod user_repository;

pub use account_command::{AccountCommand, Authenticator};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
pub use shopping_list_command::{ShoppingListCommand, ShoppingListItemCommand};
#[cfg(test)]
pub use shopping_list_item_repository::MockShoppingListItemRepository;
pub use shopping_list_item_repository::{
    ShoppingListItemRepository, ShoppingListItemRepositoryError,
};
#[cfg(test)]
pub use shopping_list_repository::MockShoppingListRepository;
pub use shopping_list_repository::{ShoppingListRepository, ShoppingListRepositoryError};
#[cfg(test)]
pub use token_service::MockTokenService;
pub use token_service::{IssuedToken, TokenService, TokenServiceError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
