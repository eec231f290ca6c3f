mod common;

use std::collections::HashSet;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use character_types::Character;
use common::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_create_character_assigns_id() {
    let setup = TestSetup::new().await;

    let mut ids = HashSet::new();
    for _ in 0..3 {
        let response = setup
            .send_post_request(
                "/character",
                json!({
                    "character_id": "client-chosen",
                    "name": "Lidda",
                    "race": "Halfling",
                    "class_name": "Rogue",
                    "abilities": {"dexterity": 17}
                }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = parse_response_body(response).await;
        let character_id = body["character_id"].as_str().unwrap().to_string();
        assert_ne!(character_id, "client-chosen");
        assert_eq!(body["name"], "Lidda");
        assert_eq!(body["abilities"]["dexterity"], 17);
        assert_eq!(body["abilities"]["strength"], 10);
        assert!(ids.insert(character_id));
    }
}

#[tokio::test]
async fn test_get_character() {
    let setup = TestSetup::new().await;
    let created = setup.create_character("Lidda").await;

    let response = setup
        .send_get_request(&format!("/character/{}", created.character_id))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    let fetched: Character = serde_json::from_value(body).unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_get_missing_character_returns_404() {
    let setup = TestSetup::new().await;

    let response = setup.send_get_request("/character/does-not-exist").await;

    assert_error(response, StatusCode::NOT_FOUND, "character_not_found").await;
}

#[tokio::test]
async fn test_get_abilities_derives_modifiers() {
    let setup = TestSetup::new().await;
    let created = setup.create_character("Lidda").await;

    let response = setup
        .send_get_request(&format!("/character/{}/abilities", created.character_id))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body.as_array().unwrap().len(), 6);
    assert_eq!(
        body[1],
        json!({"ability": "dexterity", "abbreviation": "DEX", "score": 17, "modifier": 3})
    );
    assert_eq!(body[0]["modifier"], 0);

    let response = setup.send_get_request("/character/does-not-exist/abilities").await;
    assert_error(response, StatusCode::NOT_FOUND, "character_not_found").await;
}

#[tokio::test]
async fn test_list_characters() {
    let setup = TestSetup::new().await;
    let first = setup.create_character("Lidda").await;
    let second = setup.create_character("Jozan").await;

    let response = setup.send_get_request("/character").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    let ids: HashSet<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|character| character["character_id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, HashSet::from([first.character_id, second.character_id]));
}

#[tokio::test]
async fn test_replace_character_forces_path_id() {
    let setup = TestSetup::new().await;
    let created = setup.create_character("Lidda").await;

    let response = setup
        .send_put_request(
            &format!("/character/{}", created.character_id),
            json!({
                "character_id": "another-id",
                "name": "Lidda the Quick",
                "level": 4
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["character_id"], created.character_id.as_str());

    let fetched = setup.get_character(&created.character_id).await;
    assert_eq!(fetched.name, "Lidda the Quick");
    assert_eq!(fetched.level, 4);
    assert!(setup.characters.get_one("another-id").await.unwrap().is_none());
}

#[tokio::test]
async fn test_patch_character_writes_only_named_fields() {
    let setup = TestSetup::new().await;
    let created = setup.create_character("Lidda").await;

    let response = setup
        .send_patch_request(
            &format!("/character/{}", created.character_id),
            json!({
                "name": "Lidda Underbough",
                "gold": "125",
                "abilities.wisdom": 12
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let fetched = setup.get_character(&created.character_id).await;
    let mut expected = created.clone();
    expected.name = "Lidda Underbough".to_string();
    expected.gold = 125;
    expected.abilities.wisdom = 12;
    expected.revision.clone_from(&fetched.revision);
    assert_eq!(fetched, expected);
}

#[tokio::test]
async fn test_patch_rejects_unknown_field() {
    let setup = TestSetup::new().await;
    let created = setup.create_character("Lidda").await;

    let response = setup
        .send_patch_request(
            &format!("/character/{}", created.character_id),
            json!({"character_id": "hijacked"}),
        )
        .await;

    assert_error(response, StatusCode::BAD_REQUEST, "invalid_patch").await;
    assert_eq!(setup.get_character(&created.character_id).await, created);
}

#[tokio::test]
async fn test_patch_rejects_mistyped_value() {
    let setup = TestSetup::new().await;
    let created = setup.create_character("Lidda").await;

    let response = setup
        .send_patch_request(
            &format!("/character/{}", created.character_id),
            json!({"level": "three"}),
        )
        .await;

    assert_error(response, StatusCode::BAD_REQUEST, "invalid_patch").await;
}

#[tokio::test]
async fn test_patch_missing_character_returns_404() {
    let setup = TestSetup::new().await;

    let response = setup
        .send_patch_request("/character/does-not-exist", json!({"name": "Nobody"}))
        .await;

    assert_error(response, StatusCode::NOT_FOUND, "character_not_found").await;
}

#[tokio::test]
async fn test_delete_character() {
    let setup = TestSetup::new().await;
    let created = setup.create_character("Lidda").await;
    let route = format!("/character/{}", created.character_id);

    let response = setup.send_delete_request(&route).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = setup.send_get_request(&route).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_body_returns_invalid_json() {
    let setup = TestSetup::new().await;

    let request = Request::builder()
        .uri("/character")
        .method("POST")
        .header("Content-Type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = setup.router.clone().oneshot(request).await.unwrap();

    assert_error(response, StatusCode::BAD_REQUEST, "invalid_json").await;
}

#[tokio::test]
async fn test_missing_content_type() {
    let setup = TestSetup::new().await;

    let request = Request::builder()
        .uri("/character")
        .method("POST")
        .body(Body::from(json!({"name": "Lidda"}).to_string()))
        .unwrap();
    let response = setup.router.clone().oneshot(request).await.unwrap();

    let body = parse_response_body(response).await;
    assert_eq!(
        body,
        json!({
            "allowRetry": false,
            "error": {
                "code": "invalid_content_type",
                "message": "Missing Content-Type: application/json header"
            }
        })
    );
}

#[tokio::test]
async fn test_health() {
    let setup = TestSetup::new().await;

    let response = setup.send_get_request("/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["semver"], env!("CARGO_PKG_VERSION"));
}
