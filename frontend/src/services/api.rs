//! HTTP client for the gateway API.
//!
//! | Operation  | Method & path            |
//! |------------|--------------------------|
//! | Poll status| `GET  {base}/status`     |
//! | Poll files | `GET  {base}/files`      |
//! | Poll logs  | `GET  {base}/logs`       |
//! | Read file  | `GET  {base}/files/{name}` |
//! | Write file | `POST {base}/files`      |
//!
//! Every call is bounded by the configured request timeout; a timeout is
//! reported like any other transport failure.

use std::future::Future;

use futures::future::{select, Either};
use futures::pin_mut;
use gloo_net::http::{Request, Response};
use gloo_timers::future::TimeoutFuture;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;

use crate::{
    AppError, AppResult, ConsoleConfig, FileName, FilesResponse, LogLine, LogsResponse,
    SelectedFileDetail, ServerRecord, StatusResponse, WriteRequest,
};

/// Everything outside the RFC 3986 unreserved set.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Encode a file name as a single URL path segment.
pub fn encode_path_segment(name: &str) -> String {
    match name {
        // Dot segments would be collapsed by URL resolution.
        "." => "%2E".to_string(),
        ".." => "%2E%2E".to_string(),
        _ => utf8_percent_encode(name, PATH_SEGMENT).to_string(),
    }
}

/// The five gateway operations the console consumes.
///
/// Futures are `!Send`: the console runs on the browser's single thread.
#[allow(async_fn_in_trait)]
pub trait ClusterApi {
    async fn fetch_status(&self) -> AppResult<Vec<ServerRecord>>;
    async fn fetch_files(&self) -> AppResult<Vec<FileName>>;
    async fn fetch_logs(&self) -> AppResult<Vec<LogLine>>;
    async fn read_file(&self, filename: &str) -> AppResult<SelectedFileDetail>;
    async fn write_file(&self, filename: &str, content: &str) -> AppResult<()>;
}

/// [`ClusterApi`] over `gloo-net`.
#[derive(Clone, Debug)]
pub struct HttpClusterApi {
    base: String,
    timeout_ms: u32,
}

impl HttpClusterApi {
    pub fn new(config: &ConsoleConfig) -> Self {
        Self {
            base: config.api_base.clone(),
            timeout_ms: config.request_timeout_ms,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> AppResult<T> {
        with_timeout(self.timeout_ms, async move {
            let response = Request::get(&url)
                .send()
                .await
                .map_err(|e| AppError::Network(e.to_string()))?;
            let response = ensure_success(response).await?;
            response
                .json::<T>()
                .await
                .map_err(|e| AppError::Decode(e.to_string()))
        })
        .await?
    }
}

impl ClusterApi for HttpClusterApi {
    async fn fetch_status(&self) -> AppResult<Vec<ServerRecord>> {
        let status: StatusResponse = self.get_json(self.url("/status")).await?;
        Ok(status.servers.unwrap_or_default())
    }

    async fn fetch_files(&self) -> AppResult<Vec<FileName>> {
        let files: FilesResponse = self.get_json(self.url("/files")).await?;
        Ok(files.files.unwrap_or_default())
    }

    async fn fetch_logs(&self) -> AppResult<Vec<LogLine>> {
        let logs: LogsResponse = self.get_json(self.url("/logs")).await?;
        Ok(logs.logs.unwrap_or_default())
    }

    async fn read_file(&self, filename: &str) -> AppResult<SelectedFileDetail> {
        let url = self.url(&format!("/files/{}", encode_path_segment(filename)));
        self.get_json(url).await
    }

    async fn write_file(&self, filename: &str, content: &str) -> AppResult<()> {
        let request = Request::post(&self.url("/files"))
            .json(&WriteRequest { filename, content })
            .map_err(|e| AppError::Validation(e.to_string()))?;

        with_timeout(self.timeout_ms, async move {
            let response = request
                .send()
                .await
                .map_err(|e| AppError::Network(e.to_string()))?;
            // Success body is implementation-defined and ignored.
            ensure_success(response).await.map(|_| ())
        })
        .await?
    }
}

/// Turn a non-2xx response into [`AppError::Http`] carrying its text.
async fn ensure_success(response: Response) -> AppResult<Response> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(AppError::Http { status, body })
}

async fn with_timeout<F: Future>(timeout_ms: u32, fut: F) -> AppResult<F::Output> {
    let timeout = TimeoutFuture::new(timeout_ms);
    pin_mut!(fut);
    pin_mut!(timeout);
    match select(fut, timeout).await {
        Either::Left((output, _)) => Ok(output),
        Either::Right(((), _)) => Err(AppError::Timeout(timeout_ms)),
    }
}
