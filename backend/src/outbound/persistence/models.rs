//! Internal Diesel row structs. Never exposed outside the persistence layer.

use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{shopping_list_items, shopping_lists, users};

/// Row read from `users`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
}

/// Insertable `users` row.
#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub password_hash: &'a str,
    pub firstname: Option<&'a str>,
    pub lastname: Option<&'a str>,
}

/// Row read from `shopping_lists`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = shopping_lists)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ShoppingListRow {
    pub id: i64,
    pub user_id: Uuid,
    pub title: String,
}

/// Insertable `shopping_lists` row.
#[derive(Debug, Insertable)]
#[diesel(table_name = shopping_lists)]
pub(crate) struct NewShoppingListRow<'a> {
    pub user_id: Uuid,
    pub title: &'a str,
}

/// Row read from `shopping_list_items`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = shopping_list_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ShoppingListItemRow {
    pub id: i64,
    pub shoppinglist_id: i64,
    pub name: String,
}

/// Insertable `shopping_list_items` row.
#[derive(Debug, Insertable)]
#[diesel(table_name = shopping_list_items)]
pub(crate) struct NewShoppingListItemRow<'a> {
    pub shoppinglist_id: i64,
    pub name: &'a str,
}
