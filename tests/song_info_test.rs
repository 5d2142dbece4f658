//! Tests for the song info client against a mocked upstream

use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;
use wiremock::{
    matchers::{header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

use song_catalog::error::AppError;
use song_catalog::services::{SongDetail, SongInfoService};

fn client(server: &MockServer, token: Option<&str>) -> SongInfoService {
    SongInfoService::new(
        server.uri(),
        token.map(str::to_string),
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn test_fetches_detail_with_query_and_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/info"))
        .and(query_param("group", "Muse"))
        .and(query_param("song", "Supermassive Black Hole"))
        .and(header("Authorization", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "releaseDate": "16.07.2006",
            "text": ["Ooh baby, don't you know I suffer?", "Ooh baby, can you hear me moan?"],
            "link": "https://www.youtube.com/watch?v=Xsp3_a-PMTw"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let detail = client(&server, Some("secret"))
        .get_song_detail("Muse", "Supermassive Black Hole")
        .await
        .unwrap();

    assert_eq!(
        detail,
        SongDetail {
            release_date: "16.07.2006".to_string(),
            text: vec![
                "Ooh baby, don't you know I suffer?".to_string(),
                "Ooh baby, can you hear me moan?".to_string(),
            ],
            link: "https://www.youtube.com/watch?v=Xsp3_a-PMTw".to_string(),
        }
    );
}

#[tokio::test]
async fn test_trailing_slash_in_base_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "releaseDate": "01.01.2000",
            "text": [],
            "link": ""
        })))
        .mount(&server)
        .await;

    let service = SongInfoService::new(format!("{}/", server.uri()), None, Duration::from_secs(5))
        .unwrap();

    assert!(service.get_song_detail("a", "b").await.is_ok());
}

#[tokio::test]
async fn test_non_200_is_an_external_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/info"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let result = client(&server, None).get_song_detail("Muse", "Unknown").await;

    match result {
        Err(AppError::ExternalApi(msg)) => assert!(msg.contains("404"), "got {}", msg),
        other => panic!("expected ExternalApi error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_other_success_codes_are_still_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/info"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let result = client(&server, None).get_song_detail("Muse", "Uprising").await;
    assert!(matches!(result, Err(AppError::ExternalApi(_))));
}

#[tokio::test]
async fn test_malformed_body_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/info"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = client(&server, None).get_song_detail("Muse", "Uprising").await;
    assert!(matches!(result, Err(AppError::HttpRequest(_))));
}

#[tokio::test]
async fn test_unreachable_service_is_a_transport_error() {
    // Nothing listens on the discard port
    let service = SongInfoService::new(
        "http://127.0.0.1:9".to_string(),
        None,
        Duration::from_secs(2),
    )
    .unwrap();

    let result = service.get_song_detail("Muse", "Uprising").await;
    assert!(matches!(result, Err(AppError::HttpRequest(_))));
}
