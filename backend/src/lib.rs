//! Character sheet backend service

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

/// Inventory, spell and equipment resolution
pub mod character_sheet;

/// HTTP routes
pub mod routes;

/// Server setup
pub mod server;

/// Configuration, errors and extractors
pub mod types;
