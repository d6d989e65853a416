//! Driving ports for shopping list and item use-cases.
//!
//! Every call is made on behalf of an authenticated owner. Raw field values
//! are passed through unvalidated so existence checks run before field
//! validation: updating a missing list reports "not found" even when the new
//! title is blank.

use async_trait::async_trait;

use crate::domain::{
    CollectionQuery, Error, ShoppingList, ShoppingListId, ShoppingListItem, ShoppingListItemId,
    UserId,
};

/// Use-cases over the caller's shopping lists.
#[async_trait]
pub trait ShoppingListCommand: Send + Sync {
    /// Create a list titled `title`.
    async fn create_list(&self, owner: &UserId, title: Option<&str>)
    -> Result<ShoppingList, Error>;

    /// The caller's lists matching `query`.
    ///
    /// A keyword that matches nothing is reported as not found.
    async fn list_lists(
        &self,
        owner: &UserId,
        query: &CollectionQuery,
    ) -> Result<Vec<ShoppingList>, Error>;

    /// Fetch one of the caller's lists.
    async fn get_list(&self, owner: &UserId, id: ShoppingListId) -> Result<ShoppingList, Error>;

    /// Retitle one of the caller's lists.
    async fn rename_list(
        &self,
        owner: &UserId,
        id: ShoppingListId,
        title: Option<&str>,
    ) -> Result<ShoppingList, Error>;

    /// Delete one of the caller's lists and its items.
    async fn delete_list(&self, owner: &UserId, id: ShoppingListId) -> Result<(), Error>;
}

/// Use-cases over the items of one of the caller's lists.
#[async_trait]
pub trait ShoppingListItemCommand: Send + Sync {
    /// Add an item named `name`.
    async fn add_item(
        &self,
        owner: &UserId,
        list: ShoppingListId,
        name: Option<&str>,
    ) -> Result<ShoppingListItem, Error>;

    /// Items matching `query`.
    async fn list_items(
        &self,
        owner: &UserId,
        list: ShoppingListId,
        query: &CollectionQuery,
    ) -> Result<Vec<ShoppingListItem>, Error>;

    /// Fetch one item.
    async fn get_item(
        &self,
        owner: &UserId,
        list: ShoppingListId,
        item: ShoppingListItemId,
    ) -> Result<ShoppingListItem, Error>;

    /// Rename one item.
    async fn rename_item(
        &self,
        owner: &UserId,
        list: ShoppingListId,
        item: ShoppingListItemId,
        name: Option<&str>,
    ) -> Result<ShoppingListItem, Error>;

    /// Delete one item.
    async fn delete_item(
        &self,
        owner: &UserId,
        list: ShoppingListId,
        item: ShoppingListItemId,
    ) -> Result<(), Error>;
}
