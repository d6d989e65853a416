//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod error;
pub mod health;
pub mod items;
pub mod payload;
pub mod routes;
pub mod schemas;
pub mod shopping_lists;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use crate::domain::ApiResult;
