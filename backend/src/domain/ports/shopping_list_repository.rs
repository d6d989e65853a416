//! Driven port for shopping list persistence.
//!
//! Every operation is scoped to an owner: a list that exists but belongs to
//! someone else is indistinguishable from a list that does not exist.

use async_trait::async_trait;

use crate::domain::{CollectionQuery, ShoppingList, ShoppingListId, ShoppingListTitle, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by shopping list repository adapters.
    pub enum ShoppingListRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "shoppinglist repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "shoppinglist repository query failed: {message}",
        /// The owner already has a list with this title, ignoring case.
        Duplicate { title: String } => "shoppinglist `{title}` already exists",
    }
}

/// Owner-scoped storage for shopping lists.
///
/// Title uniqueness is enforced per owner on the lower-cased title, both on
/// insert and on rename. Lists are returned in creation order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShoppingListRepository: Send + Sync {
    /// Create a list for `owner`, assigning the next identifier.
    async fn insert(
        &self,
        owner: &UserId,
        title: &ShoppingListTitle,
    ) -> Result<ShoppingList, ShoppingListRepositoryError>;

    /// Lists owned by `owner` matching `query`.
    async fn list(
        &self,
        owner: &UserId,
        query: &CollectionQuery,
    ) -> Result<Vec<ShoppingList>, ShoppingListRepositoryError>;

    /// Fetch one of `owner`'s lists.
    async fn find(
        &self,
        owner: &UserId,
        id: ShoppingListId,
    ) -> Result<Option<ShoppingList>, ShoppingListRepositoryError>;

    /// Retitle one of `owner`'s lists; `None` when it does not exist.
    ///
    /// Recasing a list's own title is not a conflict.
    async fn rename(
        &self,
        owner: &UserId,
        id: ShoppingListId,
        title: &ShoppingListTitle,
    ) -> Result<Option<ShoppingList>, ShoppingListRepositoryError>;

    /// Remove one of `owner`'s lists together with its items.
    ///
    /// Returns `false` when nothing was deleted.
    async fn delete(
        &self,
        owner: &UserId,
        id: ShoppingListId,
    ) -> Result<bool, ShoppingListRepositoryError>;
}
