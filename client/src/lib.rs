//! HTTP client for the character sheet backend
//!
//! One method per user action. Each call maps to a single request; the client
//! holds no state besides the base URL and the underlying `reqwest::Client`.

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

mod error;

use std::collections::HashMap;

use character_types::{AbilitySummary, Character, Equipment, Item, ItemReference, Spell};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

pub use error::{ClientError, ClientResult};

/// Client for the character sheet REST API
#[derive(Debug, Clone)]
pub struct CharacterClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CharacterClient {
    /// Creates a client for the API served at `base_url`
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Url` if the URL does not parse and
    /// `ClientError::InvalidBaseUrl` if it cannot carry a path
    pub fn new(base_url: &str) -> ClientResult<Self> {
        Self::with_http_client(reqwest::Client::new(), Url::parse(base_url)?)
    }

    /// Creates a client that reuses an existing `reqwest::Client`
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidBaseUrl` if the URL cannot carry a path
    pub fn with_http_client(http: reqwest::Client, base_url: Url) -> ClientResult<Self> {
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(base_url.to_string()));
        }

        Ok(Self { http, base_url })
    }

    /// Lists every character
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the request fails or the server answers with an error
    pub async fn get_party(&self) -> ClientResult<Vec<Character>> {
        let url = self.endpoint(&["character"])?;
        self.fetch(self.http.get(url)).await
    }

    /// Fetches one character
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` with code `character_not_found` if it does not exist
    pub async fn get_character(&self, character_id: &str) -> ClientResult<Character> {
        let url = self.endpoint(&["character", character_id])?;
        self.fetch(self.http.get(url)).await
    }

    /// Fetches the ability scores of a character with their modifiers
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` with code `character_not_found` if it does not exist
    pub async fn get_abilities(&self, character_id: &str) -> ClientResult<Vec<AbilitySummary>> {
        let url = self.endpoint(&["character", character_id, "abilities"])?;
        self.fetch(self.http.get(url)).await
    }

    /// Creates a character; the server assigns its ID
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the request fails or the server answers with an error
    pub async fn create_character(&self, character: &Character) -> ClientResult<Character> {
        let url = self.endpoint(&["character"])?;
        self.fetch(self.http.post(url).json(character)).await
    }

    /// Replaces a character document
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the request fails or the server answers with an error
    pub async fn replace_character(
        &self,
        character_id: &str,
        character: &Character,
    ) -> ClientResult<Character> {
        let url = self.endpoint(&["character", character_id])?;
        self.fetch(self.http.put(url).json(character)).await
    }

    /// Writes individual fields, e.g. `{"hit_points": 12, "abilities.strength": 16}`
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` with code `invalid_patch` for fields that cannot be written
    pub async fn patch_character(
        &self,
        character_id: &str,
        fields: &HashMap<String, Value>,
    ) -> ClientResult<()> {
        let url = self.endpoint(&["character", character_id])?;
        self.execute(self.http.patch(url).json(fields)).await
    }

    /// Deletes a character
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the request fails or the server answers with an error
    pub async fn delete_character(&self, character_id: &str) -> ClientResult<()> {
        let url = self.endpoint(&["character", character_id])?;
        self.execute(self.http.delete(url)).await
    }

    /// Adds an item to the inventory, either a new item or a catalog reference
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` with code `item_not_found` for an unknown catalog ID
    pub async fn post_character_item(
        &self,
        character_id: &str,
        item: &ItemReference,
    ) -> ClientResult<()> {
        let url = self.endpoint(&["character", character_id, "inventory"])?;
        self.execute(self.http.post(url).json(item)).await
    }

    /// Replaces an item the character already carries
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` with code `missing_item_id` or `item_not_in_inventory`
    /// if the item cannot be matched
    pub async fn put_character_item(&self, character_id: &str, item: &Item) -> ClientResult<()> {
        let url = self.endpoint(&["character", character_id, "inventory"])?;
        self.execute(self.http.put(url).json(item)).await
    }

    /// Removes every copy of an item from the inventory
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the request fails or the server answers with an error
    pub async fn sell_item(&self, character_id: &str, item_id: &str) -> ClientResult<()> {
        let url = self.endpoint(&["character", character_id, "inventory"])?;
        self.execute(self.http.delete(url).query(&[("itemId", item_id)]))
            .await
    }

    /// Teaches the character a spell, returning the catalog copy
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` with code `spell_not_found` for an unknown catalog ID
    pub async fn put_character_spell(
        &self,
        character_id: &str,
        spell: &Spell,
    ) -> ClientResult<Spell> {
        let url = self.endpoint(&["character", character_id, "spells"])?;
        self.fetch(self.http.put(url).json(spell)).await
    }

    /// Removes every copy of a spell from the character
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the request fails or the server answers with an error
    pub async fn remove_character_spell(
        &self,
        character_id: &str,
        spell_id: &str,
    ) -> ClientResult<()> {
        let url = self.endpoint(&["character", character_id, "spells"])?;
        self.execute(self.http.delete(url).query(&[("spellId", spell_id)]))
            .await
    }

    /// Equips an item, returning the resulting equipment
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` with code `missing_equipment_slot` for gear without a slot
    pub async fn equip_item(&self, character_id: &str, item: &Item) -> ClientResult<Equipment> {
        let url = self.endpoint(&["character", character_id, "equipment"])?;
        self.fetch(self.http.put(url).json(item)).await
    }

    /// Clears an equipment slot
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the request fails or the server answers with an error
    pub async fn unequip_item(&self, character_id: &str, slot: &str) -> ClientResult<()> {
        let url = self.endpoint(&["character", character_id, "equipment"])?;
        self.execute(self.http.delete(url).query(&[("slot", slot)]))
            .await
    }

    /// Lists the item catalog
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the request fails or the server answers with an error
    pub async fn list_items(&self) -> ClientResult<Vec<Item>> {
        let url = self.endpoint(&["item"])?;
        self.fetch(self.http.get(url)).await
    }

    /// Lists the spell catalog
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the request fails or the server answers with an error
    pub async fn list_spells(&self) -> ClientResult<Vec<Spell>> {
        let url = self.endpoint(&["spells"])?;
        self.fetch(self.http.get(url)).await
    }

    /// Appends percent-encoded path segments to the base URL
    fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = self.send(request).await?;
        Ok(response.json().await?)
    }

    async fn execute(&self, request: RequestBuilder) -> ClientResult<()> {
        self.send(request).await.map(|_| ())
    }

    async fn send(&self, request: RequestBuilder) -> ClientResult<Response> {
        let request = request.build()?;
        let method: Method = request.method().clone();
        let url = request.url().clone();

        let response = self.http.execute(request).await?;
        let status = response.status();
        tracing::debug!("{method} {url} -> {status}");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await?;
        Err(ClientError::from_response_body(status.as_u16(), &body))
    }
}
