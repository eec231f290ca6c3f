//! Environment configuration for different deployment stages

use std::env;
use std::time::Duration;

use aws_config::{retry::RetryConfig, timeout::TimeoutConfig, BehaviorVersion};
use tracing::Level;

/// Default `LocalStack` endpoint used in development
const LOCALSTACK_ENDPOINT: &str = "http://localhost:4566";

/// Application environment configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    /// Production environment
    Production,
    /// Staging environment
    Staging,
    /// Development environment (uses `LocalStack`)
    Development {
        /// Optional override for the `DynamoDB` endpoint
        dynamodb_endpoint_override: Option<String>,
    },
}

impl Environment {
    /// Creates an Environment from the `APP_ENV` environment variable
    ///
    /// # Panics
    ///
    /// Panics if `APP_ENV` contains an invalid value
    #[must_use]
    pub fn from_env() -> Self {
        let env = env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .trim()
            .to_lowercase();

        match env.as_str() {
            "production" => Self::Production,
            "staging" => Self::Staging,
            "development" => {
                let dynamodb_endpoint_override = env::var("DYNAMODB_ENDPOINT_URL")
                    .ok()
                    .map(|url| url.trim().to_string())
                    .filter(|url| !url.is_empty());

                Self::Development {
                    dynamodb_endpoint_override,
                }
            }
            _ => panic!("Invalid environment: {env}"),
        }
    }

    /// Returns the `DynamoDB` table name for characters
    ///
    /// # Panics
    ///
    /// Panics if the `CHARACTERS_TABLE_NAME` environment variable is not set outside development
    #[must_use]
    pub fn characters_table(&self) -> String {
        self.table_name("CHARACTERS_TABLE_NAME", "dnd-characters")
    }

    /// Returns the `DynamoDB` table name for the item catalog
    ///
    /// # Panics
    ///
    /// Panics if the `ITEMS_TABLE_NAME` environment variable is not set outside development
    #[must_use]
    pub fn items_table(&self) -> String {
        self.table_name("ITEMS_TABLE_NAME", "dnd-items")
    }

    /// Returns the `DynamoDB` table name for the spell catalog
    ///
    /// # Panics
    ///
    /// Panics if the `SPELLS_TABLE_NAME` environment variable is not set outside development
    #[must_use]
    pub fn spells_table(&self) -> String {
        self.table_name("SPELLS_TABLE_NAME", "dnd-spells")
    }

    fn table_name(&self, variable: &str, development_default: &str) -> String {
        match self {
            Self::Production | Self::Staging => env::var(variable)
                .unwrap_or_else(|_| panic!("{variable} environment variable is not set")),
            Self::Development { .. } => {
                env::var(variable).unwrap_or_else(|_| development_default.to_string())
            }
        }
    }

    /// Whether to show API docs
    #[must_use]
    pub const fn show_api_docs(&self) -> bool {
        matches!(self, Self::Development { .. } | Self::Staging)
    }

    /// Returns the endpoint URL to use for AWS services
    #[must_use]
    pub fn override_aws_endpoint_url(&self) -> Option<&str> {
        match self {
            // Regular AWS endpoints for production and staging
            Self::Production | Self::Staging => None,
            // LocalStack endpoint for development
            Self::Development {
                dynamodb_endpoint_override,
            } => Some(
                dynamodb_endpoint_override
                    .as_deref()
                    .unwrap_or(LOCALSTACK_ENDPOINT),
            ),
        }
    }

    /// AWS configuration with retry and timeout settings
    pub async fn aws_config(&self) -> aws_config::SdkConfig {
        let retry_config = RetryConfig::standard()
            .with_max_attempts(3)
            .with_initial_backoff(Duration::from_millis(50));

        let timeout_config = TimeoutConfig::builder()
            .operation_timeout(Duration::from_secs(30))
            .build();

        let mut config_builder = aws_config::load_defaults(BehaviorVersion::latest())
            .await
            .to_builder()
            .retry_config(retry_config)
            .timeout_config(timeout_config);

        if let Some(endpoint_url) = self.override_aws_endpoint_url() {
            config_builder = config_builder.endpoint_url(endpoint_url);
        }

        config_builder.build()
    }

    /// Default log level when `RUST_LOG` is not set
    #[must_use]
    pub fn tracing_level(&self) -> Level {
        env::var("TRACING_LEVEL")
            .ok()
            .and_then(|val| val.parse::<Level>().ok())
            .unwrap_or(match self {
                Self::Production | Self::Staging => Level::INFO,
                Self::Development { .. } => Level::DEBUG,
            })
    }
}
