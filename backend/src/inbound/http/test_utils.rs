//! Test helpers for inbound HTTP components.

use actix_web::web;
use chrono::Duration;

use crate::inbound::http::health::HealthState;
use crate::outbound::security::{Argon2PasswordHasher, JwtTokenService};
use crate::server::{AppDependencies, build_http_state};

/// Dependencies backed by a fresh in-memory store.
///
/// - Argon2 runs with minimal cost so tests stay fast.
/// - Tokens are signed with a fixed secret and live for five minutes.
pub fn test_dependencies() -> AppDependencies {
    let hasher = Argon2PasswordHasher::low_cost().expect("low-cost argon2 parameters");
    let tokens = JwtTokenService::new(b"http-test-secret", Duration::minutes(5));
    AppDependencies {
        health_state: web::Data::new(HealthState::new()),
        http_state: web::Data::new(build_http_state(None, hasher, tokens)),
    }
}
