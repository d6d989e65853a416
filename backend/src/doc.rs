//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer together
//! with the request and response schemas and the two accepted authentication
//! schemes. The document backs Swagger UI (debug builds) and is exported via
//! `cargo run --bin openapi-dump` for external tooling.

use crate::domain::ports::IssuedToken;
use crate::domain::{Error, ErrorCode};
use crate::inbound::http::items::ItemRequest;
use crate::inbound::http::schemas::{
    MessageResponse, ShoppingListItemResponse, ShoppingListResponse, UserResponse,
};
use crate::inbound::http::shopping_lists::ShoppingListRequest;
use crate::inbound::http::users::{LoginRequest, RegisterRequest};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the Basic and Bearer security schemes.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        let basic = HttpBuilder::new().scheme(HttpAuthScheme::Basic).build();
        components.add_security_scheme("BasicAuth", SecurityScheme::Http(basic));
        let bearer = HttpBuilder::new()
            .scheme(HttpAuthScheme::Bearer)
            .bearer_format("JWT")
            .description(Some("Token issued by POST /user/login/."))
            .build();
        components.add_security_scheme("BearerAuth", SecurityScheme::Http(bearer));
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Shopping list API",
        description = "Per-user shopping lists and their items, with registration and token login."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BasicAuth" = []), ("BearerAuth" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::shopping_lists::create_list,
        crate::inbound::http::shopping_lists::list_lists,
        crate::inbound::http::shopping_lists::get_list,
        crate::inbound::http::shopping_lists::update_list,
        crate::inbound::http::shopping_lists::delete_list,
        crate::inbound::http::items::add_item,
        crate::inbound::http::items::list_items,
        crate::inbound::http::items::get_item,
        crate::inbound::http::items::update_item,
        crate::inbound::http::items::delete_item,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        IssuedToken,
        RegisterRequest,
        LoginRequest,
        UserResponse,
        ShoppingListRequest,
        ShoppingListResponse,
        ItemRequest,
        ShoppingListItemResponse,
        MessageResponse
    )),
    tags(
        (name = "users", description = "Registration and login"),
        (name = "shoppinglists", description = "Shopping lists owned by the caller"),
        (name = "items", description = "Items on a shopping list"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
