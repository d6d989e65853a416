//! Driven port for shopping list item persistence.
//!
//! Callers resolve list ownership first; this port only scopes items by
//! their parent list.

use async_trait::async_trait;

use crate::domain::{CollectionQuery, ItemName, ShoppingListId, ShoppingListItem, ShoppingListItemId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by item repository adapters.
    pub enum ShoppingListItemRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "item repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "item repository query failed: {message}",
    }
}

/// List-scoped storage for items. Names may repeat within a list.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShoppingListItemRepository: Send + Sync {
    /// Add an item to `list`, assigning the next identifier.
    async fn insert(
        &self,
        list: ShoppingListId,
        name: &ItemName,
    ) -> Result<ShoppingListItem, ShoppingListItemRepositoryError>;

    /// Items of `list` matching `query`, in creation order.
    async fn list(
        &self,
        list: ShoppingListId,
        query: &CollectionQuery,
    ) -> Result<Vec<ShoppingListItem>, ShoppingListItemRepositoryError>;

    /// Fetch a single item of `list`.
    async fn find(
        &self,
        list: ShoppingListId,
        id: ShoppingListItemId,
    ) -> Result<Option<ShoppingListItem>, ShoppingListItemRepositoryError>;

    /// Rename an item; `None` when it does not exist in `list`.
    async fn rename(
        &self,
        list: ShoppingListId,
        id: ShoppingListItemId,
        name: &ItemName,
    ) -> Result<Option<ShoppingListItem>, ShoppingListItemRepositoryError>;

    /// Remove an item; `false` when it does not exist in `list`.
    async fn delete(
        &self,
        list: ShoppingListId,
        id: ShoppingListItemId,
    ) -> Result<bool, ShoppingListItemRepositoryError>;
}
