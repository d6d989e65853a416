//! Shopping list API handlers.
//!
//! ```text
//! POST   /shoppinglist/            title=Groceries
//! GET    /shoppinglist/?q=groc&limit=20&page=1
//! GET    /shoppinglist/{id}
//! PUT    /shoppinglist/{id}        title=Weekly groceries
//! DELETE /shoppinglist/{id}
//! ```
//!
//! Every handler requires an [`AuthenticatedUser`] and only ever sees the
//! caller's own lists.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::validation::list_not_found;
use crate::domain::{ApiResult, CollectionQuery, Error, Keyword, ShoppingListId};
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::payload::FormOrJson;
use crate::inbound::http::schemas::{MessageResponse, ShoppingListResponse};
use crate::inbound::http::state::HttpState;
use pagination::{PageQuery, PageRequest};

/// Body for creating or renaming a list.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct ShoppingListRequest {
    #[schema(example = "Trip to Canada")]
    pub title: Option<String>,
}

/// Search and paging parameters shared by the collection endpoints.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CollectionParams {
    /// Case-insensitive substring to match.
    pub q: Option<String>,
    /// Maximum number of entries to return.
    pub limit: Option<String>,
    /// One-based page index; requires `limit` to have an effect.
    pub page: Option<String>,
}

impl CollectionParams {
    /// Validate the raw parameters.
    pub fn into_query(self) -> ApiResult<CollectionQuery> {
        let keyword = Keyword::parse(self.q.as_deref());
        let page = PageRequest::try_from(PageQuery {
            limit: self.limit,
            page: self.page,
        })?;
        Ok(CollectionQuery::new(keyword, page))
    }
}

/// Parse a path segment as a list id; anything else is an unknown list.
pub(crate) fn parse_list_id(raw: &str) -> ApiResult<ShoppingListId> {
    raw.parse().map_err(|_| list_not_found())
}

/// Create a list owned by the caller.
#[utoipa::path(
    post,
    path = "/shoppinglist/",
    request_body = ShoppingListRequest,
    responses(
        (status = 201, description = "List created", body = ShoppingListResponse),
        (status = 400, description = "Missing or invalid title", body = Error),
        (status = 401, description = "Authentication required", body = Error),
        (status = 409, description = "Duplicate title", body = Error)
    ),
    tags = ["shoppinglists"],
    operation_id = "createShoppingList"
)]
#[post("/shoppinglist")]
pub async fn create_list(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    payload: FormOrJson<ShoppingListRequest>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let list = state
        .lists
        .create_list(caller.user().id(), body.title.as_deref())
        .await?;
    Ok(HttpResponse::Created().json(ShoppingListResponse::from(&list)))
}

/// List the caller's shopping lists in creation order.
#[utoipa::path(
    get,
    path = "/shoppinglist/",
    params(CollectionParams),
    responses(
        (status = 200, description = "Lists", body = [ShoppingListResponse]),
        (status = 400, description = "Invalid pagination", body = Error),
        (status = 401, description = "Authentication required", body = Error),
        (status = 404, description = "No list matches the keyword", body = Error)
    ),
    tags = ["shoppinglists"],
    operation_id = "listShoppingLists"
)]
#[get("/shoppinglist")]
pub async fn list_lists(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    params: web::Query<CollectionParams>,
) -> ApiResult<web::Json<Vec<ShoppingListResponse>>> {
    let query = params.into_inner().into_query()?;
    let lists = state.lists.list_lists(caller.user().id(), &query).await?;
    Ok(web::Json(
        lists.iter().map(ShoppingListResponse::from).collect(),
    ))
}

/// Fetch one of the caller's lists.
#[utoipa::path(
    get,
    path = "/shoppinglist/{id}",
    params(("id" = i64, Path, description = "Shopping list id")),
    responses(
        (status = 200, description = "List", body = ShoppingListResponse),
        (status = 401, description = "Authentication required", body = Error),
        (status = 404, description = "List not found", body = Error)
    ),
    tags = ["shoppinglists"],
    operation_id = "getShoppingList"
)]
#[get("/shoppinglist/{id}")]
pub async fn get_list(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<ShoppingListResponse>> {
    let id = parse_list_id(&path)?;
    let list = state.lists.get_list(caller.user().id(), id).await?;
    Ok(web::Json(ShoppingListResponse::from(&list)))
}

/// Rename one of the caller's lists.
#[utoipa::path(
    put,
    path = "/shoppinglist/{id}",
    params(("id" = i64, Path, description = "Shopping list id")),
    request_body = ShoppingListRequest,
    responses(
        (status = 200, description = "List updated", body = ShoppingListResponse),
        (status = 400, description = "Missing or invalid title", body = Error),
        (status = 401, description = "Authentication required", body = Error),
        (status = 404, description = "List not found", body = Error),
        (status = 409, description = "Duplicate title", body = Error)
    ),
    tags = ["shoppinglists"],
    operation_id = "updateShoppingList"
)]
#[put("/shoppinglist/{id}")]
pub async fn update_list(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<String>,
    payload: FormOrJson<ShoppingListRequest>,
) -> ApiResult<web::Json<ShoppingListResponse>> {
    let id = parse_list_id(&path)?;
    let body = payload.into_inner();
    let list = state
        .lists
        .rename_list(caller.user().id(), id, body.title.as_deref())
        .await?;
    Ok(web::Json(ShoppingListResponse::from(&list)))
}

/// Delete one of the caller's lists together with its items.
#[utoipa::path(
    delete,
    path = "/shoppinglist/{id}",
    params(("id" = i64, Path, description = "Shopping list id")),
    responses(
        (status = 200, description = "List deleted", body = MessageResponse),
        (status = 401, description = "Authentication required", body = Error),
        (status = 404, description = "List not found", body = Error)
    ),
    tags = ["shoppinglists"],
    operation_id = "deleteShoppingList"
)]
#[delete("/shoppinglist/{id}")]
pub async fn delete_list(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = parse_list_id(&path)?;
    state.lists.delete_list(caller.user().id(), id).await?;
    Ok(web::Json(MessageResponse::new(format!(
        "shoppinglist `{id}` deleted"
    ))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("0")]
    #[case("-4")]
    #[case("abc")]
    #[case("1.5")]
    fn non_positive_or_non_numeric_ids_are_unknown_lists(#[case] raw: &str) {
        let err = parse_list_id(raw).expect_err("rejected");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), "Requested shoppinglist was not found");
    }

    #[rstest]
    fn blank_keyword_means_no_filter() {
        let params = CollectionParams {
            q: Some("  ".to_owned()),
            limit: Some("100".to_owned()),
            page: None,
        };
        let query = params.into_query().expect("valid params");
        assert!(query.keyword().is_none());
        assert_eq!(query.page().limit().map(|limit| limit.get()), Some(100));
    }

    #[rstest]
    fn invalid_limit_is_a_bad_request() {
        let params = CollectionParams {
            q: None,
            limit: Some("ten".to_owned()),
            page: None,
        };
        let err = params.into_query().expect_err("invalid limit");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), "limit must be a positive integer");
    }
}
