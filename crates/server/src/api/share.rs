//! Browse, download and search routes.

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, Request, State},
    http::{HeaderValue, StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use fileshare_api_types::{ErrorResponse, HealthCheckResponse, LiveSearchResponse, SearchParams};
use fileshare_index::{RelativePath, ShareError};
use tower::ServiceExt;
use tower_http::services::ServeFile;
use tracing::{debug, error, info};

use super::state::AppState;
use crate::views;

/// Creates the share routes.
pub fn create_share_router() -> Router<Arc<AppState>> {
    Router::new()
        // top-level folders
        .route("/", get(home))
        // sidebar plus folder contents
        .route("/folder/{*path}", get(folder))
        // streamed file transfer
        .route("/download/{*path}", get(download))
        // HTML results
        .route("/search", get(search))
        // JSON results for the search box
        .route("/live_search", get(live_search))
        .route("/health", get(health))
}

async fn home(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let folders = state.root.top_level_folders()?;
    Ok(Html(views::home_page(&folders)))
}

async fn folder(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
) -> Result<Html<String>, ApiError> {
    let folder = RelativePath::parse(&path).map_err(ShareError::from)?.to_string();
    let contents = state.root.list_folder(&folder)?;
    let navigation = state.root.navigate(&folder)?;

    debug!(folder = %folder, entries = contents.len(), "rendering folder");
    Ok(Html(views::folder_page(&folder, &navigation, &contents)))
}

async fn download(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
    request: Request,
) -> Result<Response, ApiError> {
    let target = state.root.download_target(&path)?;
    info!(path = %path, "serving download");

    let disposition = target
        .file_name()
        .map(|name| {
            format!(
                "attachment; filename*=UTF-8''{}",
                urlencoding::encode(&name.to_string_lossy())
            )
        })
        .unwrap_or_else(|| "attachment".to_string());

    let mut response = ServeFile::new(&target)
        .oneshot(request)
        .await
        .unwrap_or_else(|never: Infallible| match never {})
        .into_response();

    if response.status().is_success()
        && let Ok(value) = HeaderValue::from_str(&disposition)
    {
        response
            .headers_mut()
            .insert(header::CONTENT_DISPOSITION, value);
    }
    Ok(response)
}

async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Response, ApiError> {
    let Some(query) = params.query() else {
        return Ok(Redirect::to("/").into_response());
    };

    let results = state.index.search(query);
    info!(query = %query, matches = results.len(), "search");
    let folders = state.root.top_level_folders()?;
    Ok(Html(views::search_page(&folders, query, &results)).into_response())
}

async fn live_search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Json<LiveSearchResponse> {
    let results: LiveSearchResponse = match params.query() {
        Some(query) => state
            .index
            .search(query)
            .into_iter()
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    };
    Json(results)
}

async fn health() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse::ok())
}

/// Error returned by the share routes, rendered as a JSON [`ErrorResponse`].
#[derive(Debug)]
struct ApiError {
    message: String,
    code: String,
    status: StatusCode,
}

impl From<ShareError> for ApiError {
    fn from(err: ShareError) -> Self {
        let (code, status) = match &err {
            ShareError::PathOutsideRoot(_) => ("PATH_OUTSIDE_ROOT", StatusCode::BAD_REQUEST),
            ShareError::FolderNotFound(_) => ("FOLDER_NOT_FOUND", StatusCode::NOT_FOUND),
            ShareError::FileNotFound(_) => ("FILE_NOT_FOUND", StatusCode::NOT_FOUND),
            ShareError::InvalidRoot(_) | ShareError::CorruptIndex { .. } => {
                ("INTERNAL_ERROR", StatusCode::INTERNAL_SERVER_ERROR)
            }
            ShareError::Io(_) => ("IO_ERROR", StatusCode::INTERNAL_SERVER_ERROR),
        };

        if status.is_server_error() {
            error!(error = %err, "request failed");
        }

        ApiError {
            message: err.to_string(),
            code: code.to_string(),
            status,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            code: self.code,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::Arc;

    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use fileshare_api_types::ErrorResponse;
    use fileshare_index::{Index, ShareRoot};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use super::create_share_router;
    use crate::api::AppState;

    fn app() -> (TempDir, Router) {
        let temp = TempDir::new().expect("tempdir");
        fs::create_dir_all(temp.path().join("docs/images")).expect("create docs/images");
        fs::create_dir_all(temp.path().join("music")).expect("create music");
        fs::write(temp.path().join("docs/readme.txt"), "hello share").expect("write readme");
        fs::write(temp.path().join("docs/images/img one.png"), "png").expect("write png");

        let root = ShareRoot::new(temp.path()).expect("root should open");
        let index = Index::build(&root);
        let router = create_share_router().with_state(Arc::new(AppState::new(root, index)));
        (temp, router)
    }

    async fn get(router: &Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
        let response = router
            .clone()
            .oneshot(Request::get(uri).body(Body::empty()).expect("request"))
            .await
            .expect("router is infallible");
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        (status, headers, body.to_vec())
    }

    #[tokio::test]
    async fn home_lists_top_level_folders() {
        let (_temp, router) = app();
        let (status, _, body) = get(&router, "/").await;
        let html = String::from_utf8(body).expect("utf8 body");

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("href=\"/folder/docs\""));
        assert!(html.contains("href=\"/folder/music\""));
    }

    #[tokio::test]
    async fn folder_page_renders_contents_and_sidebar() {
        let (_temp, router) = app();
        let (status, _, body) = get(&router, "/folder/docs").await;
        let html = String::from_utf8(body).expect("utf8 body");

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Contents of docs"));
        assert!(html.contains("href=\"/download/docs/readme.txt\""));
        assert!(html.contains("<a class=\"active\" href=\"/folder/docs\">"));
        assert!(html.contains("<a href=\"/folder/docs/images\">"));
    }

    #[tokio::test]
    async fn missing_folder_is_not_found() {
        let (_temp, router) = app();
        let (status, _, body) = get(&router, "/folder/ghost").await;
        let error: ErrorResponse = serde_json::from_slice(&body).expect("json error body");

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(error.code, "FOLDER_NOT_FOUND");
    }

    #[tokio::test]
    async fn escaping_folder_is_a_client_error() {
        let (_temp, router) = app();
        let (status, _, body) = get(&router, "/folder/..%2F..%2Fetc").await;
        let error: ErrorResponse = serde_json::from_slice(&body).expect("json error body");

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error.code, "PATH_OUTSIDE_ROOT");
    }

    #[tokio::test]
    async fn download_streams_the_file_as_attachment() {
        let (_temp, router) = app();
        let (status, headers, body) = get(&router, "/download/docs/readme.txt").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"hello share");
        assert_eq!(
            headers
                .get(header::CONTENT_DISPOSITION)
                .and_then(|v| v.to_str().ok()),
            Some("attachment; filename*=UTF-8''readme.txt")
        );
    }

    #[tokio::test]
    async fn download_of_a_folder_is_not_found() {
        let (_temp, router) = app();
        let (status, _, _) = get(&router, "/download/docs").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn search_without_query_redirects_home() {
        let (_temp, router) = app();
        let (status, headers, _) = get(&router, "/search?q=").await;

        assert!(status.is_redirection());
        assert_eq!(
            headers.get(header::LOCATION).and_then(|v| v.to_str().ok()),
            Some("/")
        );
    }

    #[tokio::test]
    async fn search_renders_matches() {
        let (_temp, router) = app();
        let (status, _, body) = get(&router, "/search?q=IMG").await;
        let html = String::from_utf8(body).expect("utf8 body");

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("href=\"/download/docs/images/img%20one.png\""));
    }

    #[tokio::test]
    async fn live_search_returns_json_paths() {
        let (_temp, router) = app();
        let (status, _, body) = get(&router, "/live_search?q=readme").await;
        let results: Vec<String> = serde_json::from_slice(&body).expect("json array");

        assert_eq!(status, StatusCode::OK);
        assert_eq!(results, vec!["docs/readme.txt"]);
    }

    #[tokio::test]
    async fn live_search_without_query_is_empty() {
        let (_temp, router) = app();
        let (_, _, body) = get(&router, "/live_search").await;
        let results: Vec<String> = serde_json::from_slice(&body).expect("json array");

        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (_temp, router) = app();
        let (status, _, body) = get(&router, "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, br#"{"status":"ok"}"#);
    }
}
