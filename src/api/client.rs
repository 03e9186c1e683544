//! HTTP client for the Beamlit control plane.
//!
//! Every call performs exactly one round trip and drains the response body
//! before returning, so the connection is released on every exit path. Error
//! statuses are returned as data; only transport failures become `Err`.

use serde_json::Value;

use crate::error::Error;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging: truncate and strip non-printable bytes.
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        // The cutoff may land inside a multibyte character; back up to a
        // boundary so the slice stays valid UTF-8.
        let mut end = MAX_LOG_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... [truncated, {} bytes total]", &body[..end], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// A fully drained API response: status code plus body bytes.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// HTTP client bound to one base URL and workspace.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    workspace: Option<String>,
    api_key: Option<String>,
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        workspace: Option<&str>,
        api_key: Option<&str>,
    ) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("beamlit-cli/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            workspace: workspace.map(|s| s.to_string()),
            api_key: api_key.map(|s| s.to_string()),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn decorate(&self, mut request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(workspace) = &self.workspace {
            request = request.header("X-Beamlit-Workspace", workspace);
        }
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        request
    }

    /// Send the request and drain the body. The body read happens before any
    /// status handling so the connection is returned to the pool even for
    /// error responses.
    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<ApiResponse, Error> {
        let response = self.decorate(request).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        if status >= 400 {
            tracing::debug!(
                "API error: {} - {}",
                status,
                sanitize_for_log(&String::from_utf8_lossy(&body))
            );
        }

        Ok(ApiResponse { status, body })
    }

    pub async fn get(&self, path: &str, query: &[(String, String)]) -> Result<ApiResponse, Error> {
        let url = self.url(path);
        tracing::debug!("GET {}", url);

        let mut request = self.http.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }
        self.execute(request).await
    }

    pub async fn put(&self, path: &str, body: &Value) -> Result<ApiResponse, Error> {
        let url = self.url(path);
        tracing::debug!("PUT {}", url);

        self.execute(self.http.put(&url).json(body)).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> Result<ApiResponse, Error> {
        let url = self.url(path);
        tracing::debug!("POST {}", url);

        self.execute(self.http.post(&url).json(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<ApiResponse, Error> {
        let url = self.url(path);
        tracing::debug!("DELETE {}", url);

        self.execute(self.http.delete(&url)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_without_duplicate_slashes() {
        let client = ApiClient::new("https://api.example.dev/v0/", None, None).unwrap();
        assert_eq!(client.url("/models"), "https://api.example.dev/v0/models");
        assert_eq!(client.url("models/x"), "https://api.example.dev/v0/models/x");
    }

    #[test]
    fn sanitize_truncates_long_bodies() {
        let body = "x".repeat(500);
        let out = sanitize_for_log(&body);
        assert!(out.contains("truncated, 500 bytes total"));
        assert!(out.len() < body.len());
    }

    #[test]
    fn sanitize_truncates_on_char_boundaries() {
        // A two-byte character straddling the cutoff must not split.
        let body = format!("{}é{}", "a".repeat(MAX_LOG_BODY_LENGTH - 1), "x".repeat(50));
        let out = sanitize_for_log(&body);
        assert!(out.contains(&format!("truncated, {} bytes total", body.len())));
        assert!(out.starts_with(&"a".repeat(MAX_LOG_BODY_LENGTH - 1)));
        assert!(!out.contains('x'));
        assert!(!out.contains('é'));
    }

    #[test]
    fn sanitize_strips_control_characters() {
        assert_eq!(sanitize_for_log("ok\x1b[31m\n"), "ok[31m");
    }

    #[test]
    fn response_success_range() {
        let ok = ApiResponse { status: 204, body: Vec::new() };
        let not_found = ApiResponse { status: 404, body: Vec::new() };
        assert!(ok.is_success());
        assert!(!not_found.is_success());
    }
}
