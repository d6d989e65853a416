//! Route registration for the HTTP adapter.
//!
//! Paths are registered without trailing slashes; the server wraps the app
//! in `NormalizePath::trim()` so `/shoppinglist/` and `/shoppinglist` reach
//! the same handler.

use actix_web::web;

use super::{health, items, shopping_lists, users};

/// Register every API endpoint on `cfg`.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use shoplist::inbound::http::routes::configure;
///
/// let app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(users::register)
        .service(users::login)
        .service(shopping_lists::create_list)
        .service(shopping_lists::list_lists)
        .service(shopping_lists::get_list)
        .service(shopping_lists::update_list)
        .service(shopping_lists::delete_list)
        .service(items::add_item)
        .service(items::list_items)
        .service(items::get_item)
        .service(items::update_item)
        .service(items::delete_item)
        .service(health::ready)
        .service(health::live);
}
