//! Shopping list item API handlers.
//!
//! ```text
//! POST   /shoppinglist/{id}/items/            name=Soap
//! GET    /shoppinglist/{id}/items/?q=soap
//! GET    /shoppinglist/{id}/items/{item_id}
//! PUT    /shoppinglist/{id}/items/{item_id}   name=Swimming floaters
//! DELETE /shoppinglist/{id}/items/{item_id}
//! ```
//!
//! The parent list is resolved under the caller's ownership before any item
//! is touched, so a foreign list id reports the list as missing.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::validation::item_not_found;
use crate::domain::{ApiResult, Error, ShoppingListId, ShoppingListItemId};
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::payload::FormOrJson;
use crate::inbound::http::schemas::{MessageResponse, ShoppingListItemResponse};
use crate::inbound::http::shopping_lists::{CollectionParams, parse_list_id};
use crate::inbound::http::state::HttpState;

/// Body for adding or renaming an item.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct ItemRequest {
    #[schema(example = "Swimming floaters")]
    pub name: Option<String>,
}

/// Parse both path ids. An unparsable item id is an unknown item, but only
/// once the parent list has been confirmed to belong to the caller.
async fn resolve_ids(
    state: &HttpState,
    caller: &AuthenticatedUser,
    path: &(String, String),
) -> ApiResult<(ShoppingListId, ShoppingListItemId)> {
    let list = parse_list_id(&path.0)?;
    match path.1.parse() {
        Ok(item) => Ok((list, item)),
        Err(_) => {
            state.lists.get_list(caller.user().id(), list).await?;
            Err(item_not_found())
        }
    }
}

/// Add an item to one of the caller's lists.
#[utoipa::path(
    post,
    path = "/shoppinglist/{id}/items/",
    params(("id" = i64, Path, description = "Shopping list id")),
    request_body = ItemRequest,
    responses(
        (status = 201, description = "Item added", body = ShoppingListItemResponse),
        (status = 400, description = "Missing or invalid name", body = Error),
        (status = 401, description = "Authentication required", body = Error),
        (status = 404, description = "List not found", body = Error)
    ),
    tags = ["items"],
    operation_id = "addItem"
)]
#[post("/shoppinglist/{id}/items")]
pub async fn add_item(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<String>,
    payload: FormOrJson<ItemRequest>,
) -> ApiResult<HttpResponse> {
    let list = parse_list_id(&path)?;
    let body = payload.into_inner();
    let item = state
        .items
        .add_item(caller.user().id(), list, body.name.as_deref())
        .await?;
    Ok(HttpResponse::Created().json(ShoppingListItemResponse::from(&item)))
}

/// List the items on one of the caller's lists.
#[utoipa::path(
    get,
    path = "/shoppinglist/{id}/items/",
    params(("id" = i64, Path, description = "Shopping list id"), CollectionParams),
    responses(
        (status = 200, description = "Items", body = [ShoppingListItemResponse]),
        (status = 400, description = "Invalid pagination", body = Error),
        (status = 401, description = "Authentication required", body = Error),
        (status = 404, description = "List not found or no item matches", body = Error)
    ),
    tags = ["items"],
    operation_id = "listItems"
)]
#[get("/shoppinglist/{id}/items")]
pub async fn list_items(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<String>,
    params: web::Query<CollectionParams>,
) -> ApiResult<web::Json<Vec<ShoppingListItemResponse>>> {
    let list = parse_list_id(&path)?;
    let query = params.into_inner().into_query()?;
    let items = state
        .items
        .list_items(caller.user().id(), list, &query)
        .await?;
    Ok(web::Json(
        items.iter().map(ShoppingListItemResponse::from).collect(),
    ))
}

/// Fetch a single item.
#[utoipa::path(
    get,
    path = "/shoppinglist/{id}/items/{item_id}",
    params(
        ("id" = i64, Path, description = "Shopping list id"),
        ("item_id" = i64, Path, description = "Item id")
    ),
    responses(
        (status = 200, description = "Item", body = ShoppingListItemResponse),
        (status = 401, description = "Authentication required", body = Error),
        (status = 404, description = "List or item not found", body = Error)
    ),
    tags = ["items"],
    operation_id = "getItem"
)]
#[get("/shoppinglist/{id}/items/{item_id}")]
pub async fn get_item(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<ShoppingListItemResponse>> {
    let (list, item) = resolve_ids(&state, &caller, &path).await?;
    let item = state.items.get_item(caller.user().id(), list, item).await?;
    Ok(web::Json(ShoppingListItemResponse::from(&item)))
}

/// Rename an item.
#[utoipa::path(
    put,
    path = "/shoppinglist/{id}/items/{item_id}",
    params(
        ("id" = i64, Path, description = "Shopping list id"),
        ("item_id" = i64, Path, description = "Item id")
    ),
    request_body = ItemRequest,
    responses(
        (status = 200, description = "Item updated", body = ShoppingListItemResponse),
        (status = 400, description = "Missing or invalid name", body = Error),
        (status = 401, description = "Authentication required", body = Error),
        (status = 404, description = "List or item not found", body = Error)
    ),
    tags = ["items"],
    operation_id = "updateItem"
)]
#[put("/shoppinglist/{id}/items/{item_id}")]
pub async fn update_item(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<(String, String)>,
    payload: FormOrJson<ItemRequest>,
) -> ApiResult<web::Json<ShoppingListItemResponse>> {
    let (list, item) = resolve_ids(&state, &caller, &path).await?;
    let body = payload.into_inner();
    let item = state
        .items
        .rename_item(caller.user().id(), list, item, body.name.as_deref())
        .await?;
    Ok(web::Json(ShoppingListItemResponse::from(&item)))
}

/// Remove an item.
#[utoipa::path(
    delete,
    path = "/shoppinglist/{id}/items/{item_id}",
    params(
        ("id" = i64, Path, description = "Shopping list id"),
        ("item_id" = i64, Path, description = "Item id")
    ),
    responses(
        (status = 200, description = "Item deleted", body = MessageResponse),
        (status = 401, description = "Authentication required", body = Error),
        (status = 404, description = "List or item not found", body = Error)
    ),
    tags = ["items"],
    operation_id = "deleteItem"
)]
#[delete("/shoppinglist/{id}/items/{item_id}")]
pub async fn delete_item(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<MessageResponse>> {
    let (list, item) = resolve_ids(&state, &caller, &path).await?;
    state
        .items
        .delete_item(caller.user().id(), list, item)
        .await?;
    Ok(web::Json(MessageResponse::new(format!(
        "item `{item}` deleted"
    ))))
}
