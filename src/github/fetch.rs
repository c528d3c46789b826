// src/github/fetch.rs
// =============================================================================
// This module downloads a gist from the GitHub REST API.
//
// Request:
//   GET https://api.github.com/gists/{gist_id}
//   Authorization: Bearer <token>
//   X-GitHub-Api-Version: 2022-11-28
//
// There is exactly one request per run. No retries, no rate-limit
// handling: any failure is reported and ends the program.
//
// Rust concepts:
// - async functions: For network I/O
// - thiserror: One error variant per way the request can fail
// - url::Url: Safe joining of the API base and the gist path
// =============================================================================

use std::time::Duration;

use reqwest::{header, Client, StatusCode};
use thiserror::Error;
use url::Url;

use super::gist::{ApiFile, ApiGist, RemoteFile, RemoteFileSet};

/// Public GitHub API endpoint.
pub const GITHUB_API_URL: &str = "https://api.github.com/";

/// Sent as User-Agent, which the GitHub API requires.
const USER_AGENT: &str = concat!("boilerdump/", env!("CARGO_PKG_VERSION"));

/// REST API version requested on every call.
const GITHUB_API_VERSION: &str = "2022-11-28";

/// Errors from fetching a gist.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The API base URL is not a valid URL.
    #[error("invalid GitHub API URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// GitHub rejected the token (401 or 403).
    #[error("GitHub rejected the API token: {message}")]
    Unauthorized { message: String },

    /// No gist with this id is visible to the token.
    #[error("gist '{id}' was not found")]
    NotFound { id: String },

    /// Any other non-success response.
    #[error("GitHub API returned HTTP {status}: {message}")]
    Api { status: StatusCode, message: String },

    /// The HTTP client itself could not be set up.
    #[error("could not set up the HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request never got a response.
    #[error("network error talking to GitHub: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body was not the gist JSON we expected.
    #[error("could not decode gist response: {0}")]
    Decode(#[from] serde_json::Error),
}

// Client for the gists endpoint
//
// Holds one reqwest client so connection setup happens once.
#[derive(Debug, Clone)]
pub struct GistClient {
    client: Client,
    base_url: Url,
    token: String,
}

impl GistClient {
    // Creates a client for api.github.com
    pub fn new(token: impl Into<String>) -> Result<Self, FetchError> {
        Self::with_base_url(token, GITHUB_API_URL)
    }

    // Creates a client for another API root (GitHub Enterprise, or a
    // mock server in tests)
    pub fn with_base_url(token: impl Into<String>, base_url: &str) -> Result<Self, FetchError> {
        let base_url = Url::parse(base_url)
            .and_then(|url| {
                // mailto:, data: and friends have no path we could append to
                if url.cannot_be_a_base() {
                    Err(url::ParseError::RelativeUrlWithCannotBeABaseBase)
                } else {
                    Ok(url)
                }
            })
            .map_err(|source| FetchError::InvalidBaseUrl {
                url: base_url.to_string(),
                source,
            })?;

        let client = build_client(USER_AGENT)?;

        Ok(Self {
            client,
            base_url,
            token: token.into(),
        })
    }

    // Fetches every file of the gist with the given id
    //
    // Returns: the files in the order GitHub listed them
    pub async fn fetch_gist(&self, gist_id: &str) -> Result<RemoteFileSet, FetchError> {
        let mut url = self.base_url.clone();
        // path_segments_mut percent-encodes the id, so an odd alias value
        // cannot change the path we request
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("gists").push(gist_id);
        }

        tracing::debug!(%url, "fetching gist");

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .header(header::ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(status_error(status, gist_id, &body));
        }

        parse_gist(&body)
    }
}

// Builds the reqwest client
//
// A failure here happens before any request is sent: FetchError::Client.
fn build_client(user_agent: &str) -> Result<Client, FetchError> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(FetchError::Client)
}

// Turns a failed response into the matching FetchError
fn status_error(status: StatusCode, gist_id: &str, body: &str) -> FetchError {
    let message = api_message(body);

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => FetchError::Unauthorized { message },
        StatusCode::NOT_FOUND => FetchError::NotFound {
            id: gist_id.to_string(),
        },
        _ => FetchError::Api { status, message },
    }
}

// GitHub error bodies look like { "message": "Bad credentials", ... }
// Fall back to the raw body for anything else.
fn api_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

// Decodes a GET /gists/{id} body into a RemoteFileSet
fn parse_gist(body: &str) -> Result<RemoteFileSet, FetchError> {
    let gist: ApiGist = serde_json::from_str(body)?;

    gist.files
        .into_iter()
        .map(|(key, value)| -> Result<_, FetchError> {
            let file: ApiFile = serde_json::from_value(value)?;

            if file.truncated {
                tracing::warn!(file = %key, "GitHub truncated this file's content");
            }

            let content = file.content.unwrap_or_else(|| {
                tracing::warn!(file = %key, "no inline content, writing an empty file");
                String::new()
            });

            Ok((key, RemoteFile::new(file.filename, content)))
        })
        .collect()
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why one error enum per module?
//    - Callers can match on the variant (NotFound vs Unauthorized)
//    - main() turns each variant into a message and an exit code
//    - #[from] lets the ? operator convert reqwest/serde errors for us
//
// 2. What does #[tokio::test] do?
//    - Same as #[tokio::main], but for a test function
//    - Needed because the mock server and the client are async
//
// 3. Why a mock server instead of the real API?
//    - Tests should not need a network connection or a real token
//    - wiremock starts a local HTTP server and checks what we sent it
// -----------------------------------------------------------------------------
