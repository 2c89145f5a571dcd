use axum_test::TestServer;
use serde_json::{json, Value};

use media_rec_api::api::{create_router, AppState};
use media_rec_api::config::Config;

fn test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        storage_timeout_ms: 1000,
        list_delimiter: ',',
        seed_media_path: None,
    }
}

fn create_test_server() -> TestServer {
    let state = AppState::new(&test_config());
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

fn record(title: &str, kind: &str, year: i32, score: Option<f64>, votes: Option<u64>) -> Value {
    json!({
        "title": title,
        "kind": kind,
        "release_year": year,
        "runtime": 100,
        "imdb_score": score,
        "imdb_votes": votes,
    })
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_ingest_and_get_media() {
    let server = create_test_server();

    let mut body = record("Sweeney Todd", "movie", 2007, Some(7.3), Some(360000));
    body["actors"] = json!("Johnny Depp, Helena Bonham Carter");
    body["genres"] = json!("drama, horror");
    body["age_certification"] = json!("R");

    let response = server.post("/api/v1/media").json(&body).await;
    response.assert_status(axum::http::StatusCode::CREATED);
    let created: Value = response.json();
    assert_eq!(created["title"], "Sweeney Todd");

    let response = server.get("/api/v1/media/Sweeney%20Todd").await;
    response.assert_status_ok();
    let media: Value = response.json();
    assert_eq!(media["title"], "Sweeney Todd");
    assert_eq!(media["kind"], "movie");
    assert_eq!(media["release_year"], 2007);
    assert_eq!(media["age_certification"], "R");
    assert_eq!(media["seasons"], Value::Null);
}

#[tokio::test]
async fn test_get_missing_media_is_404() {
    let server = create_test_server();
    let response = server.get("/api/v1/media/No%20Such%20Title").await;
    response.assert_status(axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_reference_lookup_is_case_insensitive() {
    let server = create_test_server();

    let mut body = record("Edward Scissorhands", "movie", 1990, Some(7.9), Some(500000));
    body["actors"] = json!("johnny depp");
    server.post("/api/v1/media").json(&body).await.assert_status(axum::http::StatusCode::CREATED);

    let response = server.get("/api/v1/references/actor/JOHNNY%20DEPP").await;
    response.assert_status_ok();
    let entity: Value = response.json();
    assert_eq!(entity["kind"], "actor");
    assert_eq!(entity["descriptor"], "johnny depp");

    let response = server.get("/api/v1/references/actor/Tim%20Burton").await;
    response.assert_status(axum::http::StatusCode::NOT_FOUND);

    let response = server.get("/api/v1/references/writer/Somebody").await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_person_recommendations_ranked_and_limited() {
    let server = create_test_server();

    let mut batch = Vec::new();
    for (title, year, score, votes) in [
        ("Middling", 2001, Some(6.0), Some(50_000u64)),
        ("Best", 2002, Some(8.4), Some(90_000)),
        ("Tied But Fewer Votes", 2003, Some(8.4), Some(10_000)),
        ("Unscored", 2004, None, Some(900_000)),
    ] {
        let mut body = record(title, "movie", year, score, votes);
        body["actors"] = json!("Johnny Depp");
        batch.push(body);
    }
    let response = server.post("/api/v1/media/batch").json(&batch).await;
    response.assert_status_ok();

    let response = server
        .get("/api/v1/recommendations/person")
        .add_query_param("name", "Johnny Depp")
        .await;
    response.assert_status_ok();
    let results: Vec<Value> = response.json();
    let titles: Vec<&str> = results.iter().map(|r| r["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["Best", "Tied But Fewer Votes", "Middling", "Unscored"]);
    // Only the documented contract fields are exposed.
    assert_eq!(results[0], json!({"title": "Best", "release_year": 2002}));

    let response = server
        .get("/api/v1/recommendations/person")
        .add_query_param("name", "johnny depp")
        .add_query_param("limit", "2")
        .await;
    response.assert_status_ok();
    let results: Vec<Value> = response.json();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["title"], "Best");
}

#[tokio::test]
async fn test_person_matches_director_credits_too() {
    let server = create_test_server();

    let mut body = record("Ed Wood", "movie", 1994, Some(7.8), Some(180_000));
    body["directors"] = json!("Tim Burton");
    server.post("/api/v1/media").json(&body).await.assert_status(axum::http::StatusCode::CREATED);

    let response = server
        .get("/api/v1/recommendations/person")
        .add_query_param("name", "Tim Burton")
        .await;
    response.assert_status_ok();
    let results: Vec<Value> = response.json();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["title"], "Ed Wood");
}

#[tokio::test]
async fn test_genre_target_score_window() {
    let server = create_test_server();

    let mut batch = Vec::new();
    for (title, score, votes) in [
        ("In Window Low Votes", Some(7.6), Some(1_000u64)),
        ("In Window High Votes", Some(8.4), Some(800_000)),
        ("Outside Window", Some(9.0), Some(2_000_000)),
        ("No Score", None, None),
    ] {
        let mut body = record(title, "movie", 2010, score, votes);
        body["genres"] = json!("drama");
        batch.push(body);
    }
    server.post("/api/v1/media/batch").json(&batch).await.assert_status_ok();

    let response = server
        .get("/api/v1/recommendations/genre-target-score")
        .add_query_param("genre_type", "drama")
        .add_query_param("target_imdb_score", "8.0")
        .await;
    response.assert_status_ok();
    let results: Vec<Value> = response.json();
    let titles: Vec<&str> = results.iter().map(|r| r["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["In Window High Votes", "In Window Low Votes"]);
}

#[tokio::test]
async fn test_typed_preference_endpoint() {
    let server = create_test_server();

    let mut body = record("Dark", "show", 2017, Some(8.7), Some(350_000));
    body["seasons"] = json!(3);
    body["genres"] = json!("scifi, drama");
    server.post("/api/v1/media").json(&body).await.assert_status(axum::http::StatusCode::CREATED);

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({
            "type": "genre_score",
            "genre_type": "scifi",
            "center_score": 8.5,
            "limit": 5
        }))
        .await;
    response.assert_status_ok();
    let results: Vec<Value> = response.json();
    assert_eq!(results, vec![json!({"title": "Dark", "release_year": 2017})]);
}

#[tokio::test]
async fn test_empty_result_is_success_not_error() {
    let server = create_test_server();
    let response = server
        .get("/api/v1/recommendations/person")
        .add_query_param("name", "NoSuchActor123")
        .await;
    response.assert_status_ok();
    let results: Vec<Value> = response.json();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_validation_failures_are_400() {
    let server = create_test_server();

    let response = server
        .get("/api/v1/recommendations/person")
        .add_query_param("name", "Tom Hanks")
        .add_query_param("limit", "0")
        .await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);

    let response = server
        .get("/api/v1/recommendations/genre-target-score")
        .add_query_param("genre_type", "drama")
        .add_query_param("target_imdb_score", "11.0")
        .await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);

    // A movie carrying a season count violates the schema invariants.
    let mut body = record("Not A Show", "movie", 2020, None, None);
    body["seasons"] = json!(2);
    let response = server.post("/api/v1/media").json(&body).await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
    let error: Value = response.json();
    assert!(error["error"].as_str().unwrap().contains("season"));
}

#[tokio::test]
async fn test_batch_reports_partial_failures() {
    let server = create_test_server();

    let batch = vec![
        record("Good", "movie", 2000, Some(7.0), Some(100)),
        record("Bad Kind", "documentary", 2000, None, None),
        record("Bad Year", "movie", 1500, None, None),
    ];
    let response = server.post("/api/v1/media/batch").json(&batch).await;
    response.assert_status_ok();

    let report: Value = response.json();
    assert_eq!(report["total"], 3);
    assert_eq!(report["ingested"], 1);
    let failures = report["failures"].as_array().unwrap();
    assert_eq!(failures.len(), 2);
    assert_eq!(failures[0]["index"], 1);
    assert_eq!(failures[0]["title"], "Bad Kind");
    assert_eq!(failures[1]["index"], 2);
}

#[tokio::test]
async fn test_reingestion_is_idempotent() {
    let server = create_test_server();

    let mut body = record("Alice in Wonderland", "movie", 2010, Some(6.4), Some(430_000));
    body["actors"] = json!("Johnny Depp, Mia Wasikowska");
    let batch = vec![body];

    server.post("/api/v1/media/batch").json(&batch).await.assert_status_ok();
    let response = server.post("/api/v1/media/batch").json(&batch).await;
    response.assert_status_ok();
    let report: Value = response.json();
    assert_eq!(report["ingested"], 1);

    let response = server
        .get("/api/v1/recommendations/person")
        .add_query_param("name", "Johnny Depp")
        .await;
    let results: Vec<Value> = response.json();
    assert_eq!(results.len(), 1);
}
