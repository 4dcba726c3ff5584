//! Tests for the API clients

use super::*;
use crate::config::StockConfig;
use crate::error::Error;
use crate::http::{HttpClient, HttpClientConfig, SERVER_ERROR_MESSAGE};
use crate::models::{
    LicenseHistoryRequest, LicenseHistoryResponse, ResultColumn, SearchCategoryRequest,
    SearchFilesRequest, SearchParameters, SearchParametersLicenseHistory,
};
use crate::pagination::{SessionPhase, ERROR_SENTINEL};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use wiremock::matchers::{header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SEARCH_PATH: &str = "/Rest/Media/1/Search/Files";
const HISTORY_PATH: &str = "/Rest/Libraries/1/Member/LicenseHistory";

fn config(server: &MockServer) -> StockConfig {
    StockConfig::builder()
        .api_key("test-key")
        .product("Stock Client/1.0")
        .base_url_override(server.uri())
        .build()
        .unwrap()
}

fn transport() -> Arc<dyn Transport> {
    let config = HttpClientConfig::builder()
        .max_retries(0)
        .no_rate_limit()
        .build();
    Arc::new(HttpClient::with_config(config).unwrap())
}

fn search_request() -> SearchFilesRequest {
    SearchFilesRequest::new()
        .with_locale("en_US")
        .unwrap()
        .with_search_parameters(SearchParameters::new().with_words("flag").unwrap())
}

fn page_body(total: u64, first_id: u64) -> String {
    format!(r#"{{"nb_results":{total},"files":[{{"id":{first_id}}}]}}"#)
}

// ============================================================================
// Search files
// ============================================================================

#[tokio::test]
async fn test_search_pages_forward() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("locale", "en_US"))
        .and(query_param("search_parameters[words]", "flag"))
        .and(query_param("search_parameters[limit]", "32"))
        .and(query_param("search_parameters[offset]", "0"))
        .and(header("x-api-key", "test-key"))
        .and(header("x-product", "Stock Client/1.0"))
        .and(header_exists("x-request-id"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page_body(79_247_672, 1)))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("search_parameters[offset]", "32"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page_body(79_247_672, 2)))
        .expect(1)
        .mount(&server)
        .await;

    let mut search =
        SearchFiles::new(&config(&server), transport(), None, &search_request()).unwrap();
    assert_eq!(search.phase(), SessionPhase::Idle);

    let first = search.fetch_next().await.unwrap();
    assert_eq!(first.files[0].id, Some(1));
    assert_eq!(search.current_page_index(), 0);

    let second = search.fetch_next().await.unwrap();
    assert_eq!(second.files[0].id, Some(2));
    assert_eq!(search.current_page_index(), 1);
    assert_eq!(search.total_files(), 79_247_672);
    assert_eq!(search.total_pages(), 2_476_489);
}

#[tokio::test]
async fn test_result_count_hidden_unless_requested() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("result_columns[]", "nb_results"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page_body(10, 1)))
        .mount(&server)
        .await;

    let request = search_request().with_result_columns([ResultColumn::Id]);
    let mut search = SearchFiles::new(&config(&server), transport(), None, &request).unwrap();

    let response = search.fetch_next().await.unwrap();
    assert_eq!(response.nb_results, None);
    assert_eq!(search.last_response().unwrap().nb_results, None);
    assert_eq!(search.total_files(), 10);
    assert_eq!(request.result_columns().unwrap(), &[ResultColumn::Id]);

    let request = search_request().with_result_columns([ResultColumn::Id, ResultColumn::NbResults]);
    let mut search = SearchFiles::new(&config(&server), transport(), None, &request).unwrap();
    let response = search.fetch_next().await.unwrap();
    assert_eq!(response.nb_results, Some(10));
}

#[tokio::test]
async fn test_search_failure_keeps_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("search_parameters[offset]", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page_body(1000, 1)))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(query_param("search_parameters[offset]", "32"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut search =
        SearchFiles::new(&config(&server), transport(), None, &search_request()).unwrap();
    let first = search.fetch_next().await.unwrap();

    let err = search.fetch_next().await.unwrap_err();
    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, SERVER_ERROR_MESSAGE);
        }
        other => panic!("Expected HttpStatus, got {other:?}"),
    }
    assert_eq!(search.current_page_index(), 0);
    assert_eq!(search.last_response(), Some(first));
}

#[tokio::test]
async fn test_similar_image_search_is_multipart() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SEARCH_PATH))
        .and(query_param("search_parameters[similar_image]", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let request = SearchFilesRequest::new()
        .with_search_parameters(SearchParameters::new().with_similar_image(true))
        .with_similar_image(b"fake image bytes".to_vec())
        .unwrap();
    let mut search = SearchFiles::new(&config(&server), transport(), None, &request).unwrap();

    search.fetch_next().await.unwrap();
    assert_eq!(search.total_files(), ERROR_SENTINEL);
    assert!(matches!(
        search.fetch_next().await.unwrap_err(),
        Error::NoMoreResults
    ));

    let received = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&received[0].body);
    assert!(body.contains(r#"name="file""#));
    assert!(body.contains("fake image bytes"));
}

#[tokio::test]
async fn test_access_token_sent_as_bearer() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header("Authorization", "Bearer token-1"))
        .and(query_param("result_columns[]", "is_licensed"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page_body(1, 1)))
        .expect(1)
        .mount(&server)
        .await;

    let request = search_request().with_result_columns([ResultColumn::IsLicensed]);
    let mut search =
        SearchFiles::new(&config(&server), transport(), Some("token-1"), &request).unwrap();
    search.fetch_next().await.unwrap();
}

#[test]
fn test_search_validation() {
    let server_config = StockConfig::builder()
        .api_key("k")
        .product("p")
        .build()
        .unwrap();

    let err = SearchFiles::new(&server_config, transport(), None, &SearchFilesRequest::new())
        .unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));

    let licensed = search_request().with_result_columns([ResultColumn::IsLicensed]);
    let err = SearchFiles::new(&server_config, transport(), None, &licensed).unwrap_err();
    assert!(err.to_string().contains("is_licensed"));

    let no_image = SearchFilesRequest::new()
        .with_search_parameters(SearchParameters::new().with_similar_image(true));
    let err = SearchFiles::new(&server_config, transport(), None, &no_image).unwrap_err();
    assert!(err.to_string().contains("Image Data missing"));
}

#[test]
fn test_set_access_token_revalidates() {
    let server_config = StockConfig::builder()
        .api_key("k")
        .product("p")
        .build()
        .unwrap();
    let licensed = search_request().with_result_columns([ResultColumn::IsLicensed]);
    let mut search =
        SearchFiles::new(&server_config, transport(), Some("token"), &licensed).unwrap();

    assert!(search.set_access_token(None).is_err());
    assert!(search.set_access_token(Some("other")).is_ok());
}

// ============================================================================
// License history
// ============================================================================

#[tokio::test]
async fn test_license_history_default_limit() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(HISTORY_PATH))
        .and(query_param("search_parameters[limit]", "100"))
        .and(query_param("search_parameters[offset]", "0"))
        .and(header("Authorization", "Bearer member-token"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"nb_results":250,"files":[{"id":7,"license":"Standard"}]}"#,
        ))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(HISTORY_PATH))
        .and(query_param("search_parameters[offset]", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"nb_results":250,"files":[]}"#))
        .mount(&server)
        .await;

    let request =
        LicenseHistoryRequest::new().with_search_parameters(SearchParametersLicenseHistory::new());
    let mut history =
        LicenseHistory::new(&config(&server), transport(), Some("member-token"), &request)
            .unwrap();

    let first = history.fetch_next().await.unwrap();
    assert_eq!(first.files[0].license.as_deref(), Some("Standard"));
    assert_eq!(history.total_pages(), 2);

    history.fetch_page(1).await.unwrap();
    assert_eq!(history.current_page_index(), 1);
    assert!(matches!(
        history.fetch_page(2).await.unwrap_err(),
        Error::PageOutOfBounds { .. }
    ));
    assert_eq!(
        history.last_response(),
        Some(LicenseHistoryResponse {
            nb_results: Some(250),
            files: Vec::new(),
        })
    );
}

#[test]
fn test_license_history_requires_parameters() {
    let server_config = StockConfig::builder()
        .api_key("k")
        .product("p")
        .build()
        .unwrap();
    let err = LicenseHistory::new(&server_config, transport(), None, &LicenseHistoryRequest::new())
        .unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));
}

// ============================================================================
// Categories
// ============================================================================

#[tokio::test]
async fn test_get_category() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Rest/Media/1/Search/Category"))
        .and(query_param("locale", "en_US"))
        .and(query_param("category_id", "1043"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"id":1043,"link":"/Category/travel/1043","name":"Travel"}"#,
        ))
        .mount(&server)
        .await;

    let client = SearchCategory::new(&config(&server), transport()).unwrap();
    let request = SearchCategoryRequest::new()
        .with_locale("en_US")
        .unwrap()
        .with_category_id(1043)
        .unwrap();

    let category = client.get_category(&request).await.unwrap();
    assert_eq!(category.id, Some(1043));
    assert_eq!(category.name.as_deref(), Some("Travel"));
}

#[tokio::test]
async fn test_get_category_requires_id() {
    let server = MockServer::start().await;
    let client = SearchCategory::new(&config(&server), transport()).unwrap();

    let err = client
        .get_category(&SearchCategoryRequest::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_category_tree() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Rest/Media/1/Search/CategoryTree"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"[{"id":1,"name":"Animals","link":"/Category/animals/1"},{"id":2,"name":"Buildings"}]"#,
        ))
        .mount(&server)
        .await;

    let client = SearchCategory::new(&config(&server), transport()).unwrap();
    let tree = client
        .get_category_tree(&SearchCategoryRequest::new())
        .await
        .unwrap();

    assert_eq!(tree.len(), 2);
    assert_eq!(tree[1].link, None);
}

#[tokio::test]
async fn test_category_client_error_carries_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(404).set_body_string(r#"{"code":"404","message":"not found"}"#),
        )
        .mount(&server)
        .await;

    let client = SearchCategory::new(&config(&server), transport()).unwrap();
    let request = SearchCategoryRequest::new().with_category_id(9).unwrap();
    let err = client.get_category(&request).await.unwrap_err();

    assert_eq!(err.code(), 404);
    assert!(err.to_string().contains("not found"));
}
