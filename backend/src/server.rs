use std::sync::Arc;

use aide::openapi::OpenApi;
use axum::{Extension, Router};
use character_storage::{character::CharacterStorage, item::ItemStorage, spell::SpellStorage};
use datadog_tracing::axum::{shutdown_signal, OtelAxumLayer, OtelInResponseLayer};
use tokio::net::TcpListener;

use crate::{character_sheet::CharacterSheets, routes, types::Environment};

/// Builds the application router with its storage dependencies
#[must_use]
pub fn router(
    environment: Environment,
    characters: Arc<CharacterStorage>,
    items: Arc<ItemStorage>,
    spells: Arc<SpellStorage>,
) -> Router {
    let mut openapi = OpenApi::default();
    let sheets = Arc::new(CharacterSheets::new(
        characters.clone(),
        items.clone(),
        spells.clone(),
    ));

    routes::handler(&environment)
        .finish_api(&mut openapi)
        .layer(Extension(openapi))
        .layer(Extension(environment))
        .layer(Extension(characters))
        .layer(Extension(items))
        .layer(Extension(spells))
        .layer(Extension(sheets))
}

/// Starts the server with the given environment and dependencies
///
/// # Errors
///
/// Returns an error if the server fails to start or bind to the port
pub async fn start(
    environment: Environment,
    characters: Arc<CharacterStorage>,
    items: Arc<ItemStorage>,
    spells: Arc<SpellStorage>,
) -> anyhow::Result<()> {
    let router = router(environment, characters, items, spells)
        // Include trace context as header into the response
        .layer(OtelInResponseLayer)
        // Start OpenTelemetry trace on incoming request
        .layer(OtelAxumLayer::default())
        .layer(tower_http::timeout::TimeoutLayer::new(
            std::time::Duration::from_secs(5),
        ));

    let addr = std::net::SocketAddr::from((
        [0, 0, 0, 0],
        std::env::var("PORT").map_or(Ok(8001), |p| p.parse())?,
    ));

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Character sheet backend started on http://{addr}");

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(anyhow::Error::from)
}
