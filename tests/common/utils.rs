#![allow(dead_code)]

use secrecy::ExposeSecret;
use serde_json::{json, Value};
use sqlx::{PgPool, PgConnection, Connection, Executor};
use std::net::TcpListener;
use uuid::Uuid;
use once_cell::sync::Lazy;
use reqwest::Client;

use matchday_backend::run;
use matchday_backend::config::settings::{get_config, DatabaseSettings, get_jwt_settings};
use matchday_backend::telemetry::{get_subscriber, init_subscriber};

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::stdout
        );
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::sink
        );
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub address: String,
    pub db_pool: PgPool,
}

pub async fn spawn_app() -> TestApp {
    // The first time `initialize` is invoked the code in `TRACING` is executed.
    // All other invocations will instead skip execution.
    Lazy::force(&TRACING);

    let listener = TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind random port");
    // Get port assigned by the OS
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);
    let mut configuration = get_config().expect("Failed to read configuration.");
    configuration.database.db_name = Uuid::new_v4().to_string();
    configuration.database.db_url = None;
    let connection_pool = configure_db(&configuration.database).await;
    let jwt_settings = get_jwt_settings(&configuration);

    let server = run(
        listener,
        connection_pool.clone(),
        jwt_settings,
        configuration.league,
    )
        .expect("Failed to bind address");
    // Launch the server as a background task
    let _ = tokio::spawn(server);
    TestApp {
        address,
        db_pool: connection_pool
    }
}

pub async fn configure_db(config: &DatabaseSettings) -> PgPool {
    // Create database
    let mut connection = PgConnection::connect(
            &config.connection_string_without_db()
        )
        .await
        .expect("Failed to connect to Postgres");
    connection
        .execute(format!(r#"CREATE DATABASE "{}";"#, config.db_name).as_str())
        .await
        .expect("Failed to create database.");

    // Migrate database
    let connection_pool = PgPool::connect(config.connection_string().expose_secret())
        .await
        .expect("Failed to connect to Postgres.");
    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .expect("Failed to migrate the database");

    connection_pool
}

pub async fn create_test_user_and_login(app_address: &str) -> (String, String) {
    let client = Client::new();
    let username = format!("leagueadmin{}", Uuid::new_v4().simple());
    let password = "password123";
    let email = format!("{}@example.com", username);

    let user_request = json!({
        "username": username,
        "password": password,
        "email": email
    });

    client
        .post(&format!("{}/register_user", app_address))
        .json(&user_request)
        .send()
        .await
        .expect("Failed to register user.");

    let login_request = json!({
        "username": username,
        "password": password
    });

    let login_response = client
        .post(&format!("{}/login", app_address))
        .json(&login_request)
        .send()
        .await
        .expect("Failed to execute login request.");

    let login_response: Value = login_response.json().await.expect("Failed to parse login response");
    let token = login_response["token"].as_str().expect("No token in response");

    (username, token.to_string())
}

/// Register a club and return its id
pub async fn create_club(app_address: &str, token: &str, club_name: &str) -> Uuid {
    let response = Client::new()
        .post(&format!("{}/club", app_address))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "club_name": club_name,
            "city": "Bandung",
            "stadium": "Gelora Bandung Lautan Api"
        }))
        .send()
        .await
        .expect("Failed to create club.");

    assert_eq!(response.status().as_u16(), 201, "club {} should be created", club_name);
    let body: Value = response.json().await.expect("Failed to parse club response");
    body["data"]["id"]
        .as_str()
        .and_then(|id| Uuid::parse_str(id).ok())
        .expect("No club id in response")
}

pub fn score(club_home: Uuid, club_away: Uuid, home_score: i64, away_score: i64) -> Value {
    json!({
        "clubHome": club_home,
        "clubAway": club_away,
        "score": { "homeScore": home_score, "awayScore": away_score }
    })
}

pub async fn post_matches(app_address: &str, token: &str, matches: Vec<Value>) -> reqwest::Response {
    Client::new()
        .post(&format!("{}/match", app_address))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "matches": matches }))
        .send()
        .await
        .expect("Failed to execute match request.")
}

/// Aggregate columns of a club straight from the store
#[derive(Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct StoredAggregate {
    pub wins: i32,
    pub draws: i32,
    pub losses: i32,
    pub goals_for: i32,
    pub goals_against: i32,
    pub points: i32,
    pub match_ids: Vec<Uuid>,
}

pub async fn stored_aggregate(pool: &PgPool, club_id: Uuid) -> StoredAggregate {
    sqlx::query_as::<_, StoredAggregate>(
        "SELECT wins, draws, losses, goals_for, goals_against, points, match_ids FROM clubs WHERE id = $1",
    )
    .bind(club_id)
    .fetch_one(pool)
    .await
    .expect("Failed to fetch club aggregate.")
}

pub async fn match_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM matches")
        .fetch_one(pool)
        .await
        .expect("Failed to count matches.")
}
