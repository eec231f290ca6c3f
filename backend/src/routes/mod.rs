pub mod catalog;
pub mod character;
mod docs;
mod health;

use aide::axum::{routing::get, ApiRouter};

use crate::types::Environment;

/// Creates the router with all handler routes
pub fn handler(environment: &Environment) -> ApiRouter {
    ApiRouter::new()
        .merge(docs::handler(environment))
        .api_route("/health", get(health::handler))
        .merge(character::handler())
        .merge(catalog::handler())
}
