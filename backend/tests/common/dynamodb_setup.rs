use std::sync::Arc;
use std::time::Duration;

use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, BillingMode, KeySchemaElement, KeyType, ScalarAttributeType,
};
use aws_sdk_dynamodb::Client as DynamoDbClient;
use character_storage::{
    character::CharacterAttribute, item::ItemAttribute, spell::SpellAttribute,
};
use uuid::Uuid;

const LOCALSTACK_ENDPOINT: &str = "http://localhost:4566";
const TEST_REGION: &str = "us-east-1";

/// Builds a `DynamoDB` client pointing at LocalStack
pub async fn localstack_client() -> Arc<DynamoDbClient> {
    let credentials = Credentials::from_keys("test", "test", None);
    let config = aws_config::defaults(BehaviorVersion::latest())
        .endpoint_url(LOCALSTACK_ENDPOINT)
        .region(Region::new(TEST_REGION))
        .credentials_provider(credentials)
        .load()
        .await;

    Arc::new(DynamoDbClient::new(&config))
}

/// Helper for creating and managing DynamoDB tables in tests
///
/// Creates every table used in backend server.
pub struct DynamoDbTestSetup {
    pub client: Arc<DynamoDbClient>,
    pub characters_table_name: String,
    pub items_table_name: String,
    pub spells_table_name: String,
}

impl DynamoDbTestSetup {
    pub async fn new(client: Arc<DynamoDbClient>) -> Self {
        let characters_table_name = Self::create_table(
            &client,
            "test-characters",
            &CharacterAttribute::CharacterId.to_string(),
        )
        .await;
        let items_table_name =
            Self::create_table(&client, "test-items", &ItemAttribute::ItemId.to_string()).await;
        let spells_table_name =
            Self::create_table(&client, "test-spells", &SpellAttribute::SpellId.to_string())
                .await;

        Self {
            client,
            characters_table_name,
            items_table_name,
            spells_table_name,
        }
    }

    /// Creates a table with a unique name and a single string hash key
    async fn create_table(client: &DynamoDbClient, prefix: &str, hash_key: &str) -> String {
        let table_name = format!("{prefix}-{}", Uuid::new_v4());

        client
            .create_table()
            .table_name(&table_name)
            .attribute_definitions(
                AttributeDefinition::builder()
                    .attribute_name(hash_key)
                    .attribute_type(ScalarAttributeType::S)
                    .build()
                    .unwrap(),
            )
            .key_schema(
                KeySchemaElement::builder()
                    .attribute_name(hash_key)
                    .key_type(KeyType::Hash)
                    .build()
                    .unwrap(),
            )
            .billing_mode(BillingMode::PayPerRequest)
            .send()
            .await
            .expect("Failed to create test table");

        // Wait for table to be ready
        tokio::time::sleep(Duration::from_millis(100)).await;

        table_name
    }
}

impl Drop for DynamoDbTestSetup {
    fn drop(&mut self) {
        let client = self.client.clone();
        let tables = [
            self.characters_table_name.clone(),
            self.items_table_name.clone(),
            self.spells_table_name.clone(),
        ];

        // Use tokio runtime to delete tables
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            handle.spawn(async move {
                for table in tables {
                    let _ = client.delete_table().table_name(&table).send().await;
                }
            });
        }
    }
}
