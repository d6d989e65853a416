//! PostgreSQL-backed [`ShoppingListRepository`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{ShoppingListRepository, ShoppingListRepositoryError};
use crate::domain::{CollectionQuery, ShoppingList, ShoppingListId, ShoppingListTitle, UserId};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::diesel_paging::{page_limit, page_offset};
use super::models::{NewShoppingListRow, ShoppingListRow};
use super::pool::{DbPool, PoolError};
use super::schema::shopping_lists;

/// Diesel implementation of the shopping list repository port.
#[derive(Clone)]
pub struct DieselShoppingListRepository {
    pool: DbPool,
}

impl DieselShoppingListRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ShoppingListRepositoryError {
    map_basic_pool_error(error, ShoppingListRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ShoppingListRepositoryError {
    map_basic_diesel_error(
        error,
        ShoppingListRepositoryError::query,
        ShoppingListRepositoryError::connection,
    )
}

fn map_write_error(
    error: diesel::result::Error,
    title: &ShoppingListTitle,
) -> ShoppingListRepositoryError {
    if is_unique_violation(&error) {
        ShoppingListRepositoryError::duplicate(title.as_str())
    } else {
        map_diesel_error(error)
    }
}

fn row_to_list(row: ShoppingListRow) -> Result<ShoppingList, ShoppingListRepositoryError> {
    let id = ShoppingListId::new(row.id).map_err(|err| {
        warn!(list_id = row.id, %err, "stored shoppinglist id is invalid");
        ShoppingListRepositoryError::query("stored shoppinglist is invalid")
    })?;
    let title = ShoppingListTitle::parse(Some(&row.title)).map_err(|err| {
        warn!(list_id = row.id, %err, "stored shoppinglist title failed validation");
        ShoppingListRepositoryError::query("stored shoppinglist is invalid")
    })?;
    Ok(ShoppingList::new(id, title, UserId::from_uuid(row.user_id)))
}

#[async_trait]
impl ShoppingListRepository for DieselShoppingListRepository {
    async fn insert(
        &self,
        owner: &UserId,
        title: &ShoppingListTitle,
    ) -> Result<ShoppingList, ShoppingListRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewShoppingListRow {
            user_id: *owner.as_uuid(),
            title: title.as_str(),
        };
        let stored = diesel::insert_into(shopping_lists::table)
            .values(&row)
            .returning(ShoppingListRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_write_error(err, title))?;
        row_to_list(stored)
    }

    async fn list(
        &self,
        owner: &UserId,
        query: &CollectionQuery,
    ) -> Result<Vec<ShoppingList>, ShoppingListRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut select = shopping_lists::table
            .filter(shopping_lists::user_id.eq(*owner.as_uuid()))
            .select(ShoppingListRow::as_select())
            .order(shopping_lists::id.asc())
            .into_boxed();
        if let Some(keyword) = query.keyword() {
            select = select.filter(shopping_lists::title.ilike(keyword.like_pattern()));
        }
        if let Some(limit) = page_limit(query.page()) {
            select = select.limit(limit).offset(page_offset(query.page()));
        }
        let rows: Vec<ShoppingListRow> =
            select.load(&mut conn).await.map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_list).collect()
    }

    async fn find(
        &self,
        owner: &UserId,
        id: ShoppingListId,
    ) -> Result<Option<ShoppingList>, ShoppingListRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = shopping_lists::table
            .filter(shopping_lists::id.eq(id.get()))
            .filter(shopping_lists::user_id.eq(*owner.as_uuid()))
            .select(ShoppingListRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_list).transpose()
    }

    async fn rename(
        &self,
        owner: &UserId,
        id: ShoppingListId,
        title: &ShoppingListTitle,
    ) -> Result<Option<ShoppingList>, ShoppingListRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::update(
            shopping_lists::table
                .filter(shopping_lists::id.eq(id.get()))
                .filter(shopping_lists::user_id.eq(*owner.as_uuid())),
        )
        .set(shopping_lists::title.eq(title.as_str()))
        .returning(ShoppingListRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(|err| map_write_error(err, title))?;
        row.map(row_to_list).transpose()
    }

    async fn delete(
        &self,
        owner: &UserId,
        id: ShoppingListId,
    ) -> Result<bool, ShoppingListRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        // Items go with their list through the foreign key cascade.
        let affected = diesel::delete(
            shopping_lists::table
                .filter(shopping_lists::id.eq(id.get()))
                .filter(shopping_lists::user_id.eq(*owner.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outbound::persistence::diesel_basic_error_mapping::tests::unique_violation;
    use rstest::rstest;

    fn title(raw: &str) -> ShoppingListTitle {
        ShoppingListTitle::parse(Some(raw)).expect("title")
    }

    #[rstest]
    fn unique_index_violation_is_a_duplicate_title() {
        assert_eq!(
            map_write_error(unique_violation(), &title("Trip to Canada")),
            ShoppingListRepositoryError::duplicate("Trip to Canada")
        );
    }

    #[rstest]
    fn other_write_failures_stay_query_errors() {
        assert_eq!(
            map_write_error(diesel::result::Error::NotFound, &title("Groceries")),
            ShoppingListRepositoryError::query("record not found")
        );
    }
}
