mod common;

use axum::http::StatusCode;
use character_types::Spell;
use common::*;
use pretty_assertions::assert_eq;
use serde_json::json;

fn cure_wounds() -> Spell {
    Spell {
        name: "Cure Wounds".to_string(),
        level: 1,
        school: "Evocation".to_string(),
        casting_time: "1 action".to_string(),
        range: "Touch".to_string(),
        components: "V, S".to_string(),
        duration: "Instantaneous".to_string(),
        ..Spell::default()
    }
}

#[tokio::test]
async fn test_add_new_spell_creates_catalog_entry() {
    let setup = TestSetup::new().await;
    let character = setup.create_character("Jozan").await;

    let response = setup
        .send_put_request(
            &format!("/character/{}/spells", character.character_id),
            serde_json::to_value(cure_wounds()).unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    let spell: Spell = serde_json::from_value(body).unwrap();
    let spell_id = spell.id().expect("Returned spell should have an id");

    assert_eq!(
        setup.spells.get_one(spell_id).await.unwrap(),
        Some(spell.clone())
    );
    let fetched = setup.get_character(&character.character_id).await;
    assert_eq!(fetched.spells, vec![spell]);
}

#[tokio::test]
async fn test_add_spell_by_id_uses_catalog_copy() {
    let setup = TestSetup::new().await;
    let character = setup.create_character("Jozan").await;
    let stored = setup.create_catalog_spell(cure_wounds()).await;

    // Only the ID of the body matters
    let response = setup
        .send_put_request(
            &format!("/character/{}/spells", character.character_id),
            json!({"spell_id": stored.id().unwrap(), "name": "Something Else"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let fetched = setup.get_character(&character.character_id).await;
    assert_eq!(fetched.spells, vec![stored]);
}

#[tokio::test]
async fn test_add_unknown_spell_returns_404() {
    let setup = TestSetup::new().await;
    let character = setup.create_character("Jozan").await;

    let response = setup
        .send_put_request(
            &format!("/character/{}/spells", character.character_id),
            json!({"spell_id": "does-not-exist"}),
        )
        .await;

    assert_error(response, StatusCode::NOT_FOUND, "spell_not_found").await;
    assert!(setup
        .get_character(&character.character_id)
        .await
        .spells
        .is_empty());
}

#[tokio::test]
async fn test_remove_spell_removes_every_copy() {
    let setup = TestSetup::new().await;
    let character = setup.create_character("Jozan").await;
    let cure = setup.create_catalog_spell(cure_wounds()).await;
    let bless = setup
        .create_catalog_spell(Spell {
            name: "Bless".to_string(),
            level: 1,
            school: "Enchantment".to_string(),
            ..Spell::default()
        })
        .await;
    let route = format!("/character/{}/spells", character.character_id);

    for spell in [&cure, &bless, &cure] {
        let response = setup
            .send_put_request(&route, json!({"spell_id": spell.id().unwrap()}))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = setup
        .send_delete_request(&format!("{route}?spellId={}", cure.id().unwrap()))
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let fetched = setup.get_character(&character.character_id).await;
    assert_eq!(fetched.spells, vec![bless]);
}

#[tokio::test]
async fn test_remove_spell_requires_spell_id() {
    let setup = TestSetup::new().await;
    let character = setup.create_character("Jozan").await;

    let response = setup
        .send_delete_request(&format!(
            "/character/{}/spells?spellId=",
            character.character_id
        ))
        .await;

    assert_error(response, StatusCode::BAD_REQUEST, "validation_error").await;
}

#[tokio::test]
async fn test_failed_write_removes_new_catalog_spell() {
    let setup = TestSetup::new().await;
    let character = setup.create_full_character("Jozan").await;

    let response = setup
        .send_put_request(
            &format!("/character/{}/spells", character.character_id),
            serde_json::to_value(Spell {
                description: "b".repeat(20_000),
                ..cure_wounds()
            })
            .unwrap(),
        )
        .await;

    assert_error(response, StatusCode::SERVICE_UNAVAILABLE, "database_error").await;
    assert!(setup.spells.list().await.unwrap().is_empty());
}
