use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    response::Response,
    Router,
};
use character_backend::{server, types::Environment};
use character_storage::{character::CharacterStorage, item::ItemStorage, spell::SpellStorage};
use character_types::{AbilityScores, Character, Item, Spell};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use super::dynamodb_setup::{localstack_client, DynamoDbTestSetup};

/// Initialize tracing for tests
pub fn setup_test_env() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
        .ok();
}

/// Router backed by freshly created LocalStack tables
pub struct TestSetup {
    pub router: Router,
    pub characters: Arc<CharacterStorage>,
    pub items: Arc<ItemStorage>,
    pub spells: Arc<SpellStorage>,
    // Keep DynamoDbTestSetup alive for the duration of the test
    _dynamodb_setup: DynamoDbTestSetup,
}

impl TestSetup {
    pub async fn new() -> Self {
        setup_test_env();

        let environment = Environment::Development {
            dynamodb_endpoint_override: None,
        };

        let dynamodb_client = localstack_client().await;
        let dynamodb_setup = DynamoDbTestSetup::new(dynamodb_client.clone()).await;

        let characters = Arc::new(CharacterStorage::new(
            dynamodb_client.clone(),
            dynamodb_setup.characters_table_name.clone(),
        ));
        let items = Arc::new(ItemStorage::new(
            dynamodb_client.clone(),
            dynamodb_setup.items_table_name.clone(),
        ));
        let spells = Arc::new(SpellStorage::new(
            dynamodb_client,
            dynamodb_setup.spells_table_name.clone(),
        ));

        let router = server::router(environment, characters.clone(), items.clone(), spells.clone());

        Self {
            router,
            characters,
            items,
            spells,
            _dynamodb_setup: dynamodb_setup,
        }
    }

    pub async fn send_request(&self, method: Method, route: &str, payload: Option<Value>) -> Response {
        let builder = Request::builder().uri(route).method(method);
        let request = match payload {
            Some(payload) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(payload.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn send_get_request(&self, route: &str) -> Response {
        self.send_request(Method::GET, route, None).await
    }

    pub async fn send_post_request(&self, route: &str, payload: Value) -> Response {
        self.send_request(Method::POST, route, Some(payload)).await
    }

    pub async fn send_put_request(&self, route: &str, payload: Value) -> Response {
        self.send_request(Method::PUT, route, Some(payload)).await
    }

    pub async fn send_patch_request(&self, route: &str, payload: Value) -> Response {
        self.send_request(Method::PATCH, route, Some(payload)).await
    }

    pub async fn send_delete_request(&self, route: &str) -> Response {
        self.send_request(Method::DELETE, route, None).await
    }

    /// Stores a character directly, bypassing the HTTP layer
    pub async fn create_character(&self, name: &str) -> Character {
        self.characters
            .create(test_character(name))
            .await
            .expect("Failed to create character")
    }

    /// Creates a character just below the `DynamoDB` item size limit, so that
    /// any sizeable addition makes the next write fail
    pub async fn create_full_character(&self, name: &str) -> Character {
        self.characters
            .create(Character {
                background: "a".repeat(390_000),
                ..test_character(name)
            })
            .await
            .expect("Failed to create character")
    }

    pub async fn get_character(&self, character_id: &str) -> Character {
        self.characters
            .get_one(character_id)
            .await
            .expect("Failed to get character")
            .expect("Character should exist")
    }

    pub async fn create_catalog_item(&self, item: Item) -> Item {
        self.items.create(item).await.expect("Failed to create item")
    }

    pub async fn create_catalog_spell(&self, spell: Spell) -> Spell {
        self.spells.create(spell).await.expect("Failed to create spell")
    }
}

/// Parse response body to JSON
pub async fn parse_response_body(response: Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Asserts the status and the error code of an error response
pub async fn assert_error(response: Response, status: StatusCode, code: &str) {
    assert_eq!(response.status(), status);
    let body = parse_response_body(response).await;
    assert_eq!(body["error"]["code"], code, "unexpected error body: {body}");
}

pub fn test_character(name: &str) -> Character {
    Character {
        name: name.to_string(),
        race: "Halfling".to_string(),
        class_name: "Rogue".to_string(),
        level: 3,
        hit_points: 18,
        max_hit_points: 18,
        armor_class: 14,
        speed: 25,
        gold: 40,
        abilities: AbilityScores {
            dexterity: 17,
            ..AbilityScores::default()
        },
        ..Character::default()
    }
}
