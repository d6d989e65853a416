//! Server construction and middleware wiring.

mod config;

pub use config::{ServerConfig, ServerSettings, SettingsError};

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::{NormalizePath, TrailingSlash};
use actix_web::{App, HttpServer, web};
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::Trace;
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::ports::{
    PasswordHasher, ShoppingListItemRepository, ShoppingListRepository, TokenService,
    UserRepository,
};
use crate::domain::{AccountService, ShoppingListService};
use crate::inbound::http::health::HealthState;
use crate::inbound::http::routes::configure;
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::InMemoryStore;
use crate::outbound::persistence::{
    DbPool, DieselShoppingListItemRepository, DieselShoppingListRepository, DieselUserRepository,
};
use crate::outbound::security::{Argon2PasswordHasher, JwtTokenService};

/// Wire the domain services over one set of repositories.
fn http_state_over<U, L, I, H, T>(
    users: Arc<U>,
    lists: Arc<L>,
    items: Arc<I>,
    hasher: Arc<H>,
    tokens: Arc<T>,
) -> HttpState
where
    U: UserRepository + 'static,
    L: ShoppingListRepository + 'static,
    I: ShoppingListItemRepository + 'static,
    H: PasswordHasher + 'static,
    T: TokenService + 'static,
{
    let accounts = Arc::new(AccountService::new(users, hasher, tokens));
    let shopping = Arc::new(ShoppingListService::new(lists, items));
    HttpState::new(HttpStatePorts {
        accounts: accounts.clone(),
        authenticator: accounts,
        lists: shopping.clone(),
        items: shopping,
    })
}

/// Build the HTTP state.
///
/// Uses the Diesel repositories when a pool is available, otherwise a fresh
/// [`InMemoryStore`] that lives as long as the process.
pub fn build_http_state<H, T>(db_pool: Option<&DbPool>, hasher: H, tokens: T) -> HttpState
where
    H: PasswordHasher + 'static,
    T: TokenService + 'static,
{
    let hasher = Arc::new(hasher);
    let tokens = Arc::new(tokens);
    match db_pool {
        Some(pool) => http_state_over(
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselShoppingListRepository::new(pool.clone())),
            Arc::new(DieselShoppingListItemRepository::new(pool.clone())),
            hasher,
            tokens,
        ),
        None => {
            let store = Arc::new(InMemoryStore::new());
            http_state_over(store.clone(), store.clone(), store, hasher, tokens)
        }
    }
}

/// Shared data handed to every app instance.
#[derive(Clone)]
pub struct AppDependencies {
    pub health_state: web::Data<HealthState>,
    pub http_state: web::Data<HttpState>,
}

/// Assemble the Actix application.
///
/// Requests get a trace id and have trailing slashes trimmed before routing.
/// Debug builds also serve Swagger UI at `/docs/index.html`.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .wrap(NormalizePath::new(TrailingSlash::Trim))
        .configure(configure);

    #[cfg(debug_assertions)]
    let app = app.service(
        SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    app
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let tokens = JwtTokenService::new(config.token_secret.as_slice(), config.token_ttl);
    let http_state = web::Data::new(build_http_state(
        config.db_pool.as_ref(),
        Argon2PasswordHasher::new(),
        tokens,
    ));
    let storage = if config.db_pool.is_some() {
        "postgres"
    } else {
        "memory"
    };
    let (host, port) = config.bind_addr();

    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .bind((host, port))?
    .run();

    info!(%host, port, storage, "server listening");
    health_state.mark_ready();
    Ok(server)
}
