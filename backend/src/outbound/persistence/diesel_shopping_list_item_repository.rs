//! PostgreSQL-backed [`ShoppingListItemRepository`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{ShoppingListItemRepository, ShoppingListItemRepositoryError};
use crate::domain::{
    CollectionQuery, ItemName, ShoppingListId, ShoppingListItem, ShoppingListItemId,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::diesel_paging::{page_limit, page_offset};
use super::models::{NewShoppingListItemRow, ShoppingListItemRow};
use super::pool::{DbPool, PoolError};
use super::schema::shopping_list_items;

/// Diesel implementation of the shopping list item repository port.
#[derive(Clone)]
pub struct DieselShoppingListItemRepository {
    pool: DbPool,
}

impl DieselShoppingListItemRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ShoppingListItemRepositoryError {
    map_basic_pool_error(error, ShoppingListItemRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ShoppingListItemRepositoryError {
    map_basic_diesel_error(
        error,
        ShoppingListItemRepositoryError::query,
        ShoppingListItemRepositoryError::connection,
    )
}

fn row_to_item(
    row: ShoppingListItemRow,
) -> Result<ShoppingListItem, ShoppingListItemRepositoryError> {
    let invalid = |err: &dyn std::fmt::Display| {
        warn!(item_id = row.id, %err, "stored item failed validation");
        ShoppingListItemRepositoryError::query("stored item is invalid")
    };
    let id = ShoppingListItemId::new(row.id).map_err(|err| invalid(&err))?;
    let list = ShoppingListId::new(row.shoppinglist_id).map_err(|err| invalid(&err))?;
    let name = ItemName::parse(Some(&row.name)).map_err(|err| invalid(&err))?;
    Ok(ShoppingListItem::new(id, name, list))
}

#[async_trait]
impl ShoppingListItemRepository for DieselShoppingListItemRepository {
    async fn insert(
        &self,
        list: ShoppingListId,
        name: &ItemName,
    ) -> Result<ShoppingListItem, ShoppingListItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewShoppingListItemRow {
            shoppinglist_id: list.get(),
            name: name.as_str(),
        };
        let stored = diesel::insert_into(shopping_list_items::table)
            .values(&row)
            .returning(ShoppingListItemRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_item(stored)
    }

    async fn list(
        &self,
        list: ShoppingListId,
        query: &CollectionQuery,
    ) -> Result<Vec<ShoppingListItem>, ShoppingListItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut select = shopping_list_items::table
            .filter(shopping_list_items::shoppinglist_id.eq(list.get()))
            .select(ShoppingListItemRow::as_select())
            .order(shopping_list_items::id.asc())
            .into_boxed();
        if let Some(keyword) = query.keyword() {
            select = select.filter(shopping_list_items::name.ilike(keyword.like_pattern()));
        }
        if let Some(limit) = page_limit(query.page()) {
            select = select.limit(limit).offset(page_offset(query.page()));
        }
        let rows: Vec<ShoppingListItemRow> =
            select.load(&mut conn).await.map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_item).collect()
    }

    async fn find(
        &self,
        list: ShoppingListId,
        id: ShoppingListItemId,
    ) -> Result<Option<ShoppingListItem>, ShoppingListItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = shopping_list_items::table
            .filter(shopping_list_items::id.eq(id.get()))
            .filter(shopping_list_items::shoppinglist_id.eq(list.get()))
            .select(ShoppingListItemRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_item).transpose()
    }

    async fn rename(
        &self,
        list: ShoppingListId,
        id: ShoppingListItemId,
        name: &ItemName,
    ) -> Result<Option<ShoppingListItem>, ShoppingListItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::update(
            shopping_list_items::table
                .filter(shopping_list_items::id.eq(id.get()))
                .filter(shopping_list_items::shoppinglist_id.eq(list.get())),
        )
        .set(shopping_list_items::name.eq(name.as_str()))
        .returning(ShoppingListItemRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;
        row.map(row_to_item).transpose()
    }

    async fn delete(
        &self,
        list: ShoppingListId,
        id: ShoppingListItemId,
    ) -> Result<bool, ShoppingListItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let affected = diesel::delete(
            shopping_list_items::table
                .filter(shopping_list_items::id.eq(id.get()))
                .filter(shopping_list_items::shoppinglist_id.eq(list.get())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(affected > 0)
    }
}
