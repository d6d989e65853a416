//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccountCommand, Authenticator, ShoppingListCommand, ShoppingListItemCommand,
};

/// Parameter object bundling the port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub accounts: Arc<dyn AccountCommand>,
    pub authenticator: Arc<dyn Authenticator>,
    pub lists: Arc<dyn ShoppingListCommand>,
    pub items: Arc<dyn ShoppingListItemCommand>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountCommand>,
    pub authenticator: Arc<dyn Authenticator>,
    pub lists: Arc<dyn ShoppingListCommand>,
    pub items: Arc<dyn ShoppingListItemCommand>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use shoplist::domain::{AccountService, ShoppingListService};
    /// use shoplist::inbound::http::state::{HttpState, HttpStatePorts};
    /// use shoplist::outbound::memory::InMemoryStore;
    /// use shoplist::outbound::security::{Argon2PasswordHasher, JwtTokenService};
    ///
    /// let store = Arc::new(InMemoryStore::new());
    /// let accounts = Arc::new(AccountService::new(
    ///     store.clone(),
    ///     Arc::new(Argon2PasswordHasher::low_cost().expect("argon2 params")),
    ///     Arc::new(JwtTokenService::new(b"doc-secret", chrono::Duration::minutes(5))),
    /// ));
    /// let lists = Arc::new(ShoppingListService::new(store.clone(), store));
    /// let state = HttpState::new(HttpStatePorts {
    ///     accounts: accounts.clone(),
    ///     authenticator: accounts,
    ///     lists: lists.clone(),
    ///     items: lists,
    /// });
    /// let _lists = state.lists.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            accounts,
            authenticator,
            lists,
            items,
        } = ports;
        Self {
            accounts,
            authenticator,
            lists,
            items,
        }
    }
}
