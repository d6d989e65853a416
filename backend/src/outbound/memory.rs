//! In-process storage implementing every repository port.
//!
//! [`InMemoryStore`] backs the service when no database URL is configured and
//! gives tests an isolated storage engine per instance. One mutex guards all
//! tables, so each port call is atomic with respect to the others, matching
//! the uniqueness and cascade guarantees of the PostgreSQL schema.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    ShoppingListItemRepository, ShoppingListItemRepositoryError, ShoppingListRepository,
    ShoppingListRepositoryError, UserPersistenceError, UserRepository,
};
use crate::domain::{
    CollectionQuery, ItemName, ShoppingList, ShoppingListId, ShoppingListItem, ShoppingListItemId,
    ShoppingListTitle, User, UserId, Username,
};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    lists: Vec<ShoppingList>,
    items: Vec<ShoppingListItem>,
    last_list_id: i64,
    last_item_id: i64,
}

impl Tables {
    fn title_taken(
        &self,
        owner: &UserId,
        title: &ShoppingListTitle,
        except: Option<ShoppingListId>,
    ) -> bool {
        let normalized = title.normalized();
        self.lists.iter().any(|list| {
            list.owner() == owner
                && Some(list.id()) != except
                && list.title().normalized() == normalized
        })
    }

    fn owned_list_index(&self, owner: &UserId, id: ShoppingListId) -> Option<usize> {
        self.lists
            .iter()
            .position(|list| list.owner() == owner && list.id() == id)
    }

    fn item_index(&self, list: ShoppingListId, id: ShoppingListItemId) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.shoppinglist_id() == list && item.id() == id)
    }
}

/// Shared in-memory tables for users, lists and items.
///
/// Identifiers are assigned sequentially from 1, like a `BIGSERIAL` column.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

const POISONED: &str = "in-memory store lock poisoned";

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, &'static str> {
        self.tables.lock().map_err(|_| POISONED)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut tables = self.lock().map_err(UserPersistenceError::query)?;
        if tables
            .users
            .iter()
            .any(|existing| existing.username() == user.username())
        {
            return Err(UserPersistenceError::duplicate(user.username().as_str()));
        }
        tables.users.push(user.clone());
        Ok(())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        let tables = self.lock().map_err(UserPersistenceError::query)?;
        Ok(tables
            .users
            .iter()
            .find(|user| user.username() == username)
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let tables = self.lock().map_err(UserPersistenceError::query)?;
        Ok(tables.users.iter().find(|user| user.id() == id).cloned())
    }
}

#[async_trait]
impl ShoppingListRepository for InMemoryStore {
    async fn insert(
        &self,
        owner: &UserId,
        title: &ShoppingListTitle,
    ) -> Result<ShoppingList, ShoppingListRepositoryError> {
        let mut tables = self.lock().map_err(ShoppingListRepositoryError::query)?;
        if tables.title_taken(owner, title, None) {
            return Err(ShoppingListRepositoryError::duplicate(title.as_str()));
        }
        let id = ShoppingListId::new(tables.last_list_id + 1)
            .map_err(|err| ShoppingListRepositoryError::query(err.to_string()))?;
        tables.last_list_id = id.get();
        let list = ShoppingList::new(id, title.clone(), *owner);
        tables.lists.push(list.clone());
        Ok(list)
    }

    async fn list(
        &self,
        owner: &UserId,
        query: &CollectionQuery,
    ) -> Result<Vec<ShoppingList>, ShoppingListRepositoryError> {
        let tables = self.lock().map_err(ShoppingListRepositoryError::query)?;
        let owned = tables.lists.iter().filter(|list| list.owner() == owner);
        Ok(query
            .apply(owned, |list| list.title().as_str())
            .into_iter()
            .cloned()
            .collect())
    }

    async fn find(
        &self,
        owner: &UserId,
        id: ShoppingListId,
    ) -> Result<Option<ShoppingList>, ShoppingListRepositoryError> {
        let tables = self.lock().map_err(ShoppingListRepositoryError::query)?;
        Ok(tables
            .owned_list_index(owner, id)
            .map(|index| tables.lists[index].clone()))
    }

    async fn rename(
        &self,
        owner: &UserId,
        id: ShoppingListId,
        title: &ShoppingListTitle,
    ) -> Result<Option<ShoppingList>, ShoppingListRepositoryError> {
        let mut tables = self.lock().map_err(ShoppingListRepositoryError::query)?;
        let Some(index) = tables.owned_list_index(owner, id) else {
            return Ok(None);
        };
        if tables.title_taken(owner, title, Some(id)) {
            return Err(ShoppingListRepositoryError::duplicate(title.as_str()));
        }
        let renamed = ShoppingList::new(id, title.clone(), *owner);
        tables.lists[index] = renamed.clone();
        Ok(Some(renamed))
    }

    async fn delete(
        &self,
        owner: &UserId,
        id: ShoppingListId,
    ) -> Result<bool, ShoppingListRepositoryError> {
        let mut tables = self.lock().map_err(ShoppingListRepositoryError::query)?;
        let Some(index) = tables.owned_list_index(owner, id) else {
            return Ok(false);
        };
        tables.lists.remove(index);
        tables.items.retain(|item| item.shoppinglist_id() != id);
        Ok(true)
    }
}

#[async_trait]
impl ShoppingListItemRepository for InMemoryStore {
    async fn insert(
        &self,
        list: ShoppingListId,
        name: &ItemName,
    ) -> Result<ShoppingListItem, ShoppingListItemRepositoryError> {
        let mut tables = self
            .lock()
            .map_err(ShoppingListItemRepositoryError::query)?;
        let id = ShoppingListItemId::new(tables.last_item_id + 1)
            .map_err(|err| ShoppingListItemRepositoryError::query(err.to_string()))?;
        tables.last_item_id = id.get();
        let item = ShoppingListItem::new(id, name.clone(), list);
        tables.items.push(item.clone());
        Ok(item)
    }

    async fn list(
        &self,
        list: ShoppingListId,
        query: &CollectionQuery,
    ) -> Result<Vec<ShoppingListItem>, ShoppingListItemRepositoryError> {
        let tables = self
            .lock()
            .map_err(ShoppingListItemRepositoryError::query)?;
        let on_list = tables
            .items
            .iter()
            .filter(|item| item.shoppinglist_id() == list);
        Ok(query
            .apply(on_list, |item| item.name().as_str())
            .into_iter()
            .cloned()
            .collect())
    }

    async fn find(
        &self,
        list: ShoppingListId,
        id: ShoppingListItemId,
    ) -> Result<Option<ShoppingListItem>, ShoppingListItemRepositoryError> {
        let tables = self
            .lock()
            .map_err(ShoppingListItemRepositoryError::query)?;
        Ok(tables
            .item_index(list, id)
            .map(|index| tables.items[index].clone()))
    }

    async fn rename(
        &self,
        list: ShoppingListId,
        id: ShoppingListItemId,
        name: &ItemName,
    ) -> Result<Option<ShoppingListItem>, ShoppingListItemRepositoryError> {
        let mut tables = self
            .lock()
            .map_err(ShoppingListItemRepositoryError::query)?;
        let Some(index) = tables.item_index(list, id) else {
            return Ok(None);
        };
        let renamed = ShoppingListItem::new(id, name.clone(), list);
        tables.items[index] = renamed.clone();
        Ok(Some(renamed))
    }

    async fn delete(
        &self,
        list: ShoppingListId,
        id: ShoppingListItemId,
    ) -> Result<bool, ShoppingListItemRepositoryError> {
        let mut tables = self
            .lock()
            .map_err(ShoppingListItemRepositoryError::query)?;
        let Some(index) = tables.item_index(list, id) else {
            return Ok(false);
        };
        tables.items.remove(index);
        Ok(true)
    }
}
