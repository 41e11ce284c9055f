use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::{Client, Response};
use reqwest::header::CONTENT_TYPE;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::models::{
    AuthResponse, Comment, CreateCommentInput, Identity, LoginInput, RegisterInput, SearchQuery,
    TorrentDetail, TorrentSummary,
};

/// Header carrying the logged-in user's id on authenticated requests.
pub const USER_ID_HEADER: &str = "X-User-Id";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("server returned {status}: {}", .message.as_deref().unwrap_or("no error body"))]
    Server {
        status: StatusCode,
        message: Option<String>,
    },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ApiError {
    /// Text for inline display: the server-provided error string when there is
    /// one, otherwise the caller's generic fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Server {
                message: Some(message),
                ..
            } => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// What came back from a download request. The server answers with JSON when
/// it only records the download (or rejects it), and with the torrent file
/// itself otherwise. This build surfaces both as a message and saves nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum DownloadOutcome {
    Acknowledged(String),
    FilePayload,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DownloadAck {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base = sanitize_base_url(base_url.into())?;
        // No request timeout: a stalled request leaves its section pending
        // until the server answers. reqwest would otherwise default to 30s.
        let client = Client::builder()
            .timeout(None::<Duration>)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            base_url: base,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_base_url(&mut self, base_url: impl Into<String>) -> Result<()> {
        self.base_url = sanitize_base_url(base_url.into())?;
        Ok(())
    }

    pub fn register(&self, input: &RegisterInput) -> Result<Identity, ApiError> {
        let url = self.url("/auth/register")?;
        let response = self.client.post(url).json(input).send()?;
        let auth: AuthResponse = decode(response)?;
        Ok(auth.user)
    }

    pub fn login(&self, input: &LoginInput) -> Result<Identity, ApiError> {
        let url = self.url("/auth/login")?;
        let response = self.client.post(url).json(input).send()?;
        let auth: AuthResponse = decode(response)?;
        Ok(auth.user)
    }

    pub fn search_torrents(&self, query: &SearchQuery) -> Result<Vec<TorrentSummary>, ApiError> {
        let url = self.search_url(query)?;
        decode(self.client.get(url).send()?)
    }

    pub fn get_torrent(&self, torrent_id: &str) -> Result<TorrentDetail, ApiError> {
        let url = self.url(&format!("/torrents/{torrent_id}"))?;
        decode(self.client.get(url).send()?)
    }

    pub fn list_comments(&self, torrent_id: &str) -> Result<Vec<Comment>, ApiError> {
        let url = self.url(&format!("/comments/by-torrent/{torrent_id}"))?;
        decode(self.client.get(url).send()?)
    }

    pub fn create_comment(
        &self,
        user_id: &str,
        input: &CreateCommentInput,
    ) -> Result<Comment, ApiError> {
        let url = self.url("/comments")?;
        let response = self
            .client
            .post(url)
            .header(USER_ID_HEADER, user_id)
            .json(input)
            .send()?;
        decode(response)
    }

    /// Authenticated download request. Branches on the response content type
    /// only, like the page it replaces: JSON bodies carry an acknowledgement
    /// or error message, anything else is the (simulated) file payload.
    pub fn download_torrent(
        &self,
        torrent_id: &str,
        user_id: &str,
    ) -> Result<DownloadOutcome, ApiError> {
        let url = self.url(&format!("/torrents/{torrent_id}/download"))?;
        let response = self
            .client
            .get(url)
            .header(USER_ID_HEADER, user_id)
            .send()?;
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.contains("application/json"))
            .unwrap_or(false);
        if !is_json {
            return Ok(DownloadOutcome::FilePayload);
        }
        let ack: DownloadAck = response.json()?;
        let text = ack
            .message
            .or(ack.error)
            .unwrap_or_else(|| "Download request recorded.".to_string());
        Ok(DownloadOutcome::Acknowledged(text))
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        // The base may carry a path prefix (e.g. /api), so append rather
        // than set_path.
        Ok(Url::parse(&format!("{}{path}", self.base_url))?)
    }

    fn search_url(&self, query: &SearchQuery) -> Result<Url, ApiError> {
        let mut url = self.url("/torrents")?;
        {
            let mut pairs = url.query_pairs_mut();
            let title = query.title.trim();
            if !title.is_empty() {
                pairs.append_pair("title", title);
            }
            let description = query.description.trim();
            if !description.is_empty() {
                pairs.append_pair("desc", description);
            }
            let category = query.category.trim();
            if !category.is_empty() {
                pairs.append_pair("category", category);
            }
            pairs.append_pair("sort", query.sort.as_str());
            pairs.append_pair("order", query.order.as_str());
        }
        Ok(url)
    }
}

fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let message = response
            .json::<ErrorBody>()
            .ok()
            .and_then(|body| body.error);
        return Err(ApiError::Server { status, message });
    }
    Ok(response.json()?)
}

fn sanitize_base_url(mut base: String) -> Result<String> {
    if !base.starts_with("http://") && !base.starts_with("https://") {
        base = format!("http://{base}");
    }
    while base.ends_with('/') {
        base.pop();
    }
    let _ = Url::parse(&base).context("invalid base URL")?;
    Ok(base)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::{SortField, SortOrder};

    fn client() -> ApiClient {
        ApiClient::new("http://example.com/api").unwrap()
    }

    #[test]
    fn default_query_sends_only_sort_and_order() {
        let url = client().search_url(&SearchQuery::default()).unwrap();
        assert_eq!(url.query(), Some("sort=date&order=desc"));
    }

    #[test]
    fn blank_filters_are_omitted_after_trimming() {
        let query = SearchQuery {
            title: "  ubuntu  ".into(),
            description: "   ".into(),
            category: "linux".into(),
            sort: SortField::Size,
            order: SortOrder::Asc,
        };
        let url = client().search_url(&query).unwrap();
        assert_eq!(
            url.query(),
            Some("title=ubuntu&category=linux&sort=size&order=asc")
        );
    }

    #[test]
    fn query_preserves_base_path_prefix() {
        let url = client().search_url(&SearchQuery::default()).unwrap();
        assert_eq!(url.path(), "/api/torrents");
    }

    #[test]
    fn sanitize_adds_scheme_and_strips_trailing_slash() {
        assert_eq!(
            sanitize_base_url("localhost:5000/api/".into()).unwrap(),
            "http://localhost:5000/api"
        );
    }

    #[test]
    fn user_message_prefers_server_text() {
        let err = ApiError::Server {
            status: StatusCode::UNAUTHORIZED,
            message: Some("Credenziali non valide".into()),
        };
        assert_eq!(err.user_message("Login failed"), "Credenziali non valide");

        let bare = ApiError::Server {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: None,
        };
        assert_eq!(bare.user_message("Login failed"), "Login failed");
    }
}
