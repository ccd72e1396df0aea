use reqwest::Client;
use serde_json::{json, Value};
use uuid::Uuid;

mod common;
use common::utils::{create_club, create_test_user_and_login, spawn_app};

#[tokio::test]
async fn create_club_normalizes_name_and_starts_at_zero() {
    let test_app = spawn_app().await;
    let (_, token) = create_test_user_and_login(&test_app.address).await;

    let response = Client::new()
        .post(&format!("{}/club", &test_app.address))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "club_name": "  persija   jakarta ",
            "city": "Jakarta",
            "stadium": "Gelora Bung Karno"
        }))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(response.status().as_u16(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    let club = &body["data"];
    assert_eq!(club["club_name"], "Persija Jakarta");
    assert_eq!(club["slug"], "persija-jakarta");
    assert_eq!(club["points"], 0);
    assert_eq!(club["matches_played"], 0);
    assert_eq!(club["match_ids"], json!([]));
    assert!(club["created_at_local"].is_string());
}

#[tokio::test]
async fn club_names_are_unique_ignoring_case() {
    let test_app = spawn_app().await;
    let (_, token) = create_test_user_and_login(&test_app.address).await;
    create_club(&test_app.address, &token, "Bali United").await;

    let response = Client::new()
        .post(&format!("{}/club", &test_app.address))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "club_name": "BALI UNITED", "city": "Gianyar", "stadium": "Dipta" }))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(response.status().as_u16(), 409);
}

#[tokio::test]
async fn invalid_club_fields_are_rejected() {
    let test_app = spawn_app().await;
    let (_, token) = create_test_user_and_login(&test_app.address).await;
    let client = Client::new();

    for body in [
        json!({ "club_name": "AB", "city": "Jakarta", "stadium": "Stadium" }),
        json!({ "club_name": "A Name Far Too Long For Us", "city": "Jakarta", "stadium": "Stadium" }),
        json!({ "club_name": "Valid Name", "city": "JK", "stadium": "Stadium" }),
        json!({ "club_name": "Valid Name", "city": "Jakarta", "stadium": "  " }),
    ] {
        let response = client
            .post(&format!("{}/club", &test_app.address))
            .header("Authorization", format!("Bearer {}", token))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request.");
        assert_eq!(response.status().as_u16(), 400, "body {} should be rejected", body);
    }
}

#[tokio::test]
async fn creating_a_club_requires_authentication() {
    let test_app = spawn_app().await;

    let response = Client::new()
        .post(&format!("{}/club", &test_app.address))
        .json(&json!({ "club_name": "Persela", "city": "Lamongan", "stadium": "Surajaya" }))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn update_club_changes_details_only() {
    let test_app = spawn_app().await;
    let (_, token) = create_test_user_and_login(&test_app.address).await;
    let club_id = create_club(&test_app.address, &token, "Persis").await;
    let client = Client::new();

    let response = client
        .put(&format!("{}/club/{}", &test_app.address, club_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "club_name": "persis solo", "city": "Surakarta" }))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(response.status().as_u16(), 200);

    let detail: Value = client
        .get(&format!("{}/club/{}", &test_app.address, club_id))
        .send()
        .await
        .expect("Failed to fetch club.")
        .json()
        .await
        .expect("Failed to parse club");
    assert_eq!(detail["data"]["club_name"], "Persis Solo");
    assert_eq!(detail["data"]["slug"], "persis-solo");
    assert_eq!(detail["data"]["city"], "Surakarta");
    assert_eq!(detail["data"]["stadium"], "Gelora Bandung Lautan Api");
    assert_eq!(detail["data"]["points"], 0);
}

#[tokio::test]
async fn update_cannot_take_another_clubs_name() {
    let test_app = spawn_app().await;
    let (_, token) = create_test_user_and_login(&test_app.address).await;
    create_club(&test_app.address, &token, "Arema").await;
    let other = create_club(&test_app.address, &token, "Persebaya").await;

    let response = Client::new()
        .put(&format!("{}/club/{}", &test_app.address, other))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "club_name": "arema" }))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(response.status().as_u16(), 409);
}

#[tokio::test]
async fn deleted_club_is_hidden_and_its_name_reusable() {
    let test_app = spawn_app().await;
    let (_, token) = create_test_user_and_login(&test_app.address).await;
    let club_id = create_club(&test_app.address, &token, "Persipura").await;
    let client = Client::new();

    let response = client
        .delete(&format!("{}/club/{}", &test_app.address, club_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to delete club.");
    assert_eq!(response.status().as_u16(), 200);

    let detail = client
        .get(&format!("{}/club/{}", &test_app.address, club_id))
        .send()
        .await
        .expect("Failed to fetch club.");
    assert_eq!(detail.status().as_u16(), 404);

    let listing: Value = client
        .get(&format!("{}/club", &test_app.address))
        .send()
        .await
        .expect("Failed to list clubs.")
        .json()
        .await
        .expect("Failed to parse club list");
    assert_eq!(listing["data"], json!([]));

    // Deleting twice reports the club as gone
    let again = client
        .delete(&format!("{}/club/{}", &test_app.address, club_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to delete club.");
    assert_eq!(again.status().as_u16(), 404);

    let reused = create_club(&test_app.address, &token, "Persipura").await;
    assert_ne!(reused, club_id);

    // Soft delete keeps the row
    let deleted_at: Option<chrono::DateTime<chrono::Utc>> =
        sqlx::query_scalar("SELECT deleted_at FROM clubs WHERE id = $1")
            .bind(club_id)
            .fetch_one(&test_app.db_pool)
            .await
            .expect("Failed to fetch club row.");
    assert!(deleted_at.is_some());
}

#[tokio::test]
async fn unknown_club_is_not_found() {
    let test_app = spawn_app().await;
    let response = Client::new()
        .get(&format!("{}/club/{}", &test_app.address, Uuid::new_v4()))
        .send()
        .await
        .expect("Failed to fetch club.");
    assert_eq!(response.status().as_u16(), 404);
}
