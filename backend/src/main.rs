use std::sync::Arc;

use aws_sdk_dynamodb::Client as DynamoDbClient;
use character_backend::{server, types::Environment};
use character_storage::{character::CharacterStorage, item::ItemStorage, spell::SpellStorage};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env();

    // Fall back to the environment's default level when RUST_LOG is not set
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(environment.tracing_level().as_str()));

    // Use JSON format for staging/production (Datadog), regular format for development
    match environment {
        Environment::Production | Environment::Staging => {
            fmt().json().with_env_filter(env_filter).init();
        }
        Environment::Development { .. } => {
            fmt().with_env_filter(env_filter).init();
        }
    }

    let dynamodb_client = Arc::new(DynamoDbClient::new(&environment.aws_config().await));

    let characters = Arc::new(CharacterStorage::new(
        dynamodb_client.clone(),
        environment.characters_table(),
    ));
    let items = Arc::new(ItemStorage::new(
        dynamodb_client.clone(),
        environment.items_table(),
    ));
    let spells = Arc::new(SpellStorage::new(
        dynamodb_client,
        environment.spells_table(),
    ));

    server::start(environment, characters, items, spells).await
}
