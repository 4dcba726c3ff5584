//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: YAML config → typed request → HTTP → decoded pages

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use std::io::Write;
use std::sync::{Arc, Mutex};
use stock_api::http::{Transport, X_API_KEY};
use stock_api::models::{
    LicenseHistoryRequest, ResultColumn, SearchCategoryRequest, SearchFilesRequest,
    SearchParameters, SearchParametersLicenseHistory,
};
use stock_api::pagination::SessionPhase;
use stock_api::types::HeaderMap;
use stock_api::{Error, LicenseHistory, SearchCategory, SearchFiles, StockConfig};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SEARCH_PATH: &str = "/Rest/Media/1/Search/Files";

fn write_config(server: &MockServer) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "api_key: it-key\n\
         product: Integration/1.0\n\
         base_url_override: {}\n\
         http:\n  \
           max_retries: 0\n  \
           rate_limit: null\n",
        server.uri()
    )
    .unwrap();
    file
}

fn load_config(server: &MockServer) -> StockConfig {
    let file = write_config(server);
    StockConfig::from_yaml_file(file.path()).unwrap()
}

fn page(total: u64, ids: &[u64]) -> serde_json::Value {
    let files: Vec<_> = ids.iter().map(|id| serde_json::json!({ "id": id })).collect();
    serde_json::json!({ "nb_results": total, "files": files })
}

async fn mount_page(server: &MockServer, offset: u32, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("search_parameters[offset]", offset.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn limited_search(limit: u32) -> SearchFilesRequest {
    SearchFilesRequest::new().with_search_parameters(
        SearchParameters::new()
            .with_words("mountains")
            .unwrap()
            .with_limit(limit)
            .unwrap(),
    )
}

fn first_id(response: &stock_api::models::SearchFilesResponse) -> Option<u64> {
    response.files.first().and_then(|file| file.id)
}

// ============================================================================
// Search navigation
// ============================================================================

#[tokio::test]
async fn test_search_walkthrough_from_yaml_config() {
    let server = MockServer::start().await;
    for (index, offset) in [0u32, 10, 20, 30].into_iter().enumerate() {
        mount_page(&server, offset, page(40, &[index as u64 + 1])).await;
    }

    let config = load_config(&server);
    let mut search = SearchFiles::from_config(&config, None, &limited_search(10)).unwrap();
    assert_eq!(search.phase(), SessionPhase::Idle);

    let response = search.fetch_next().await.unwrap();
    assert_eq!(first_id(&response), Some(1));
    assert_eq!(search.total_files(), 40);
    assert_eq!(search.total_pages(), 4);
    assert_eq!(search.current_page_index(), 0);

    search.fetch_next().await.unwrap();
    assert_eq!(search.current_page_index(), 1);

    let response = search.fetch_page(3).await.unwrap();
    assert_eq!(first_id(&response), Some(4));
    assert_eq!(search.current_page_index(), 3);

    let err = search.fetch_next().await.unwrap_err();
    assert!(matches!(err, Error::NoMoreResults));
    assert_eq!(search.current_page_index(), 3);

    let response = search.fetch_previous().await.unwrap();
    assert_eq!(first_id(&response), Some(3));
    assert_eq!(search.current_page_index(), 2);

    let err = search.fetch_page(4).await.unwrap_err();
    assert!(matches!(
        err,
        Error::PageOutOfBounds {
            index: 4,
            total_pages: 4
        }
    ));
    assert_eq!(search.current_page_index(), 2);
    assert_eq!(search.last_response().as_ref().and_then(first_id), Some(3));
}

#[tokio::test]
async fn test_server_error_rolls_back_and_retry_succeeds() {
    let server = MockServer::start().await;
    mount_page(&server, 0, page(100, &[1])).await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("search_parameters[offset]", "10"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_page(&server, 10, page(100, &[2])).await;

    let config = load_config(&server);
    let mut search = SearchFiles::from_config(&config, None, &limited_search(10)).unwrap();
    search.fetch_next().await.unwrap();

    let err = search.fetch_next().await.unwrap_err();
    assert_eq!(err.code(), 503);
    assert!(err.is_transport());
    assert_eq!(search.current_page_index(), 0);
    assert_eq!(search.request().search_parameters().and_then(|p| p.offset()), Some(0));

    let response = search.fetch_next().await.unwrap();
    assert_eq!(first_id(&response), Some(2));
    assert_eq!(search.current_page_index(), 1);
}

#[tokio::test]
async fn test_malformed_body_rolls_back() {
    let server = MockServer::start().await;
    mount_page(&server, 0, page(100, &[1])).await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("search_parameters[offset]", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&server)
        .await;

    let config = load_config(&server);
    let mut search = SearchFiles::from_config(&config, None, &limited_search(10)).unwrap();
    search.fetch_next().await.unwrap();

    let err = search.fetch_next().await.unwrap_err();
    assert!(matches!(err, Error::Parse { .. }));
    assert_eq!(search.current_page_index(), 0);
    assert_eq!(search.last_response().as_ref().and_then(first_id), Some(1));
}

// ============================================================================
// Custom transport
// ============================================================================

#[derive(Default)]
struct RecordingTransport {
    calls: Mutex<Vec<(String, HeaderMap)>>,
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn get(&self, url: &str, headers: &HeaderMap) -> stock_api::Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), headers.clone()));
        Ok(r#"{"nb_results":3,"files":[{"id":7,"title":"Peak"}]}"#.to_string())
    }

    async fn post(
        &self,
        _url: &str,
        _headers: &HeaderMap,
        _body: Vec<u8>,
        _content_type: &str,
    ) -> stock_api::Result<String> {
        Err(Error::Other("unexpected POST".to_string()))
    }

    async fn multipart(
        &self,
        _url: &str,
        _body: Vec<u8>,
        _headers: &HeaderMap,
    ) -> stock_api::Result<String> {
        Err(Error::Other("unexpected multipart".to_string()))
    }
}

#[tokio::test]
async fn test_custom_transport_sees_full_request() {
    let config = StockConfig::builder()
        .api_key("custom-key")
        .product("p")
        .build()
        .unwrap();
    let transport = Arc::new(RecordingTransport::default());
    let request = SearchFilesRequest::new()
        .with_search_parameters(SearchParameters::new().with_words("peak").unwrap())
        .with_result_columns([ResultColumn::Id, ResultColumn::Title]);

    let mut search = SearchFiles::new(&config, transport.clone(), None, &request).unwrap();
    let response = search.fetch_next().await.unwrap();

    assert_eq!(response.nb_results, None);
    assert_eq!(search.total_files(), 3);
    assert_eq!(
        request.result_columns(),
        Some(&[ResultColumn::Id, ResultColumn::Title][..])
    );

    let calls = transport.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    let (url, headers) = &calls[0];
    assert_eq!(
        url,
        "https://stock-stage.adobe.io/Rest/Media/1/Search/Files?\
         search_parameters[limit]=32\
         &search_parameters[offset]=0\
         &search_parameters[words]=peak\
         &result_columns[]=id\
         &result_columns[]=title\
         &result_columns[]=nb_results"
    );
    assert_eq!(headers.get(X_API_KEY).map(String::as_str), Some("custom-key"));
}

// ============================================================================
// License history and categories
// ============================================================================

#[tokio::test]
async fn test_license_history_jump_with_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Rest/Libraries/1/Member/LicenseHistory"))
        .and(header("Authorization", "Bearer member-token"))
        .and(query_param("search_parameters[limit]", "2"))
        .and(query_param("search_parameters[offset]", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "nb_results": 9,
            "files": [{"id": 55, "title": "Licensed"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = load_config(&server);
    let request = LicenseHistoryRequest::new()
        .with_search_parameters(SearchParametersLicenseHistory::new().with_limit(2).unwrap());
    let mut history = LicenseHistory::from_config(&config, Some("member-token"), &request).unwrap();

    let response = history.fetch_page(2).await.unwrap();
    assert_eq!(response.nb_results, Some(9));
    assert_eq!(response.files.len(), 1);
    assert_eq!(history.total_pages(), 4);
    assert_eq!(history.current_page_index(), 2);
}

#[tokio::test]
async fn test_category_lookups() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Rest/Media/1/Search/Category"))
        .and(query_param("category_id", "1043"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 1043,
            "name": "Travel",
            "link": "/Category/travel/1043"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/Rest/Media/1/Search/CategoryTree"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": 1, "name": "Animals", "link": "/Category/animals/1"},
            {"id": 2, "name": "Buildings", "link": "/Category/buildings/2"}
        ])))
        .mount(&server)
        .await;

    let config = load_config(&server);
    let client = SearchCategory::from_config(&config).unwrap();

    let request = SearchCategoryRequest::new().with_category_id(1043).unwrap();
    let category = client.get_category(&request).await.unwrap();
    assert_eq!(category.name.as_deref(), Some("Travel"));

    let tree = client
        .get_category_tree(&SearchCategoryRequest::new())
        .await
        .unwrap();
    let names: Vec<_> = tree.iter().filter_map(|c| c.name.as_deref()).collect();
    assert_eq!(names, vec!["Animals", "Buildings"]);
}
