//! Shopping list domain service.
//!
//! Implements [`ShoppingListCommand`] and [`ShoppingListItemCommand`]. Every
//! operation is scoped to the calling owner, and item operations resolve the
//! parent list before touching items, so a foreign list id always yields the
//! list "not found" error.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::domain::ports::{
    ShoppingListCommand, ShoppingListItemCommand, ShoppingListItemRepository,
    ShoppingListItemRepositoryError, ShoppingListRepository, ShoppingListRepositoryError,
};
use crate::domain::validation::{
    duplicate_title, item_not_found, list_not_found, no_item_matches, no_list_matches,
};
use crate::domain::{
    CollectionQuery, Error, ItemName, ShoppingList, ShoppingListId, ShoppingListItem,
    ShoppingListItemId, ShoppingListTitle, UserId,
};

/// Shopping list service implementing the list and item driving ports.
#[derive(Clone)]
pub struct ShoppingListService<L, I> {
    lists: Arc<L>,
    items: Arc<I>,
}

impl<L, I> ShoppingListService<L, I> {
    /// Create a service over the given repositories.
    pub fn new(lists: Arc<L>, items: Arc<I>) -> Self {
        Self { lists, items }
    }
}

fn map_list_error(error: ShoppingListRepositoryError) -> Error {
    match error {
        ShoppingListRepositoryError::Connection { message } => {
            warn!(%message, "shoppinglist repository unavailable");
            Error::service_unavailable("shoppinglist store is unavailable")
        }
        ShoppingListRepositoryError::Query { message } => {
            error!(%message, "shoppinglist repository query failed");
            Error::internal(format!("shoppinglist repository error: {message}"))
        }
        ShoppingListRepositoryError::Duplicate { title } => duplicate_title(&title),
    }
}

fn map_item_error(error: ShoppingListItemRepositoryError) -> Error {
    match error {
        ShoppingListItemRepositoryError::Connection { message } => {
            warn!(%message, "item repository unavailable");
            Error::service_unavailable("item store is unavailable")
        }
        ShoppingListItemRepositoryError::Query { message } => {
            error!(%message, "item repository query failed");
            Error::internal(format!("item repository error: {message}"))
        }
    }
}

impl<L, I> ShoppingListService<L, I>
where
    L: ShoppingListRepository,
    I: ShoppingListItemRepository,
{
    async fn require_list(&self, owner: &UserId, id: ShoppingListId) -> Result<ShoppingList, Error> {
        self.lists
            .find(owner, id)
            .await
            .map_err(map_list_error)?
            .ok_or_else(list_not_found)
    }

    /// Whether an empty keyword page lies past the end of a non-empty match.
    async fn lists_match_elsewhere(
        &self,
        owner: &UserId,
        query: &CollectionQuery,
    ) -> Result<bool, Error> {
        if query.page().offset() == 0 {
            return Ok(false);
        }
        let first = self
            .lists
            .list(owner, &query.first_match())
            .await
            .map_err(map_list_error)?;
        Ok(!first.is_empty())
    }

    async fn items_match_elsewhere(
        &self,
        list: ShoppingListId,
        query: &CollectionQuery,
    ) -> Result<bool, Error> {
        if query.page().offset() == 0 {
            return Ok(false);
        }
        let first = self
            .items
            .list(list, &query.first_match())
            .await
            .map_err(map_item_error)?;
        Ok(!first.is_empty())
    }
}

#[async_trait]
impl<L, I> ShoppingListCommand for ShoppingListService<L, I>
where
    L: ShoppingListRepository,
    I: ShoppingListItemRepository,
{
    async fn create_list(
        &self,
        owner: &UserId,
        title: Option<&str>,
    ) -> Result<ShoppingList, Error> {
        let title = ShoppingListTitle::parse(title)?;
        let list = self
            .lists
            .insert(owner, &title)
            .await
            .map_err(map_list_error)?;
        info!(owner = %owner, list_id = %list.id(), "shoppinglist created");
        Ok(list)
    }

    async fn list_lists(
        &self,
        owner: &UserId,
        query: &CollectionQuery,
    ) -> Result<Vec<ShoppingList>, Error> {
        let lists = self
            .lists
            .list(owner, query)
            .await
            .map_err(map_list_error)?;
        match query.keyword() {
            Some(keyword) if lists.is_empty() => {
                if self.lists_match_elsewhere(owner, query).await? {
                    Ok(lists)
                } else {
                    Err(no_list_matches(keyword))
                }
            }
            _ => Ok(lists),
        }
    }

    async fn get_list(&self, owner: &UserId, id: ShoppingListId) -> Result<ShoppingList, Error> {
        self.require_list(owner, id).await
    }

    async fn rename_list(
        &self,
        owner: &UserId,
        id: ShoppingListId,
        title: Option<&str>,
    ) -> Result<ShoppingList, Error> {
        self.require_list(owner, id).await?;
        let title = ShoppingListTitle::parse(title)?;
        self.lists
            .rename(owner, id, &title)
            .await
            .map_err(map_list_error)?
            .ok_or_else(list_not_found)
    }

    async fn delete_list(&self, owner: &UserId, id: ShoppingListId) -> Result<(), Error> {
        let deleted = self
            .lists
            .delete(owner, id)
            .await
            .map_err(map_list_error)?;
        if !deleted {
            return Err(list_not_found());
        }
        info!(owner = %owner, list_id = %id, "shoppinglist deleted");
        Ok(())
    }
}

#[async_trait]
impl<L, I> ShoppingListItemCommand for ShoppingListService<L, I>
where
    L: ShoppingListRepository,
    I: ShoppingListItemRepository,
{
    async fn add_item(
        &self,
        owner: &UserId,
        list: ShoppingListId,
        name: Option<&str>,
    ) -> Result<ShoppingListItem, Error> {
        self.require_list(owner, list).await?;
        let name = ItemName::parse(name)?;
        self.items
            .insert(list, &name)
            .await
            .map_err(map_item_error)
    }

    async fn list_items(
        &self,
        owner: &UserId,
        list: ShoppingListId,
        query: &CollectionQuery,
    ) -> Result<Vec<ShoppingListItem>, Error> {
        self.require_list(owner, list).await?;
        let items = self
            .items
            .list(list, query)
            .await
            .map_err(map_item_error)?;
        match query.keyword() {
            Some(keyword) if items.is_empty() => {
                if self.items_match_elsewhere(list, query).await? {
                    Ok(items)
                } else {
                    Err(no_item_matches(keyword))
                }
            }
            _ => Ok(items),
        }
    }

    async fn get_item(
        &self,
        owner: &UserId,
        list: ShoppingListId,
        item: ShoppingListItemId,
    ) -> Result<ShoppingListItem, Error> {
        self.require_list(owner, list).await?;
        self.items
            .find(list, item)
            .await
            .map_err(map_item_error)?
            .ok_or_else(item_not_found)
    }

    async fn rename_item(
        &self,
        owner: &UserId,
        list: ShoppingListId,
        item: ShoppingListItemId,
        name: Option<&str>,
    ) -> Result<ShoppingListItem, Error> {
        self.require_list(owner, list).await?;
        // Existence is reported before the new name is validated.
        self.items
            .find(list, item)
            .await
            .map_err(map_item_error)?
            .ok_or_else(item_not_found)?;
        let name = ItemName::parse(name)?;
        self.items
            .rename(list, item, &name)
            .await
            .map_err(map_item_error)?
            .ok_or_else(item_not_found)
    }

    async fn delete_item(
        &self,
        owner: &UserId,
        list: ShoppingListId,
        item: ShoppingListItemId,
    ) -> Result<(), Error> {
        self.require_list(owner, list).await?;
        let deleted = self
            .items
            .delete(list, item)
            .await
            .map_err(map_item_error)?;
        if deleted {
            Ok(())
        } else {
            Err(item_not_found())
        }
    }
}

#[cfg(test)]
#[path = "shopping_list_service_tests.rs"]
mod tests;
