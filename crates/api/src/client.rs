//! Online.net API client implementation
//!
//! Wraps reqwest and implements the OnlineApi trait from c14-core.

use std::time::Duration;

use async_trait::async_trait;
use c14_core::{
    ApiSettings, CreateBucketRequest, CreatedBucket, Error, OnlineApi, Result, SshKey,
};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::wait::BucketWaiter;

/// Protocol enabled on archives created by this client
const SSH_PROTOCOL: &str = "SSH";

/// HTTP client for the Online.net v1 API
pub struct OnlineClient {
    http_client: Client,
    endpoint: String,
    wait: Duration,
}

/// A safe as returned by `GET /storage/c14/safe`
#[derive(Debug, Clone, Deserialize)]
pub struct SafeSummary {
    pub uuid_ref: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
struct CreateSafeBody<'a> {
    name: &'a str,
    description: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateArchiveBody<'a> {
    name: &'a str,
    description: &'a str,
    parity: &'a str,
    crypto: &'a str,
    protocols: [&'a str; 1],
    ssh_keys: &'a [String],
    platforms: &'a [String],
    days: u32,
    large_bucket: bool,
}

impl<'a> CreateArchiveBody<'a> {
    fn from_request(request: &'a CreateBucketRequest) -> Self {
        Self {
            name: &request.archive_name,
            description: &request.description,
            parity: &request.parity,
            crypto: request.crypto.as_str(),
            protocols: [SSH_PROTOCOL],
            ssh_keys: &request.ssh_keys,
            platforms: &request.platforms,
            days: request.days,
            large_bucket: request.large_bucket,
        }
    }
}

/// Error payload returned by the API on failures
#[derive(Debug, Default, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl OnlineClient {
    /// Create a new client from the API settings
    pub fn new(settings: &ApiSettings) -> Result<Self> {
        let token = settings.require_token()?;

        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| Error::Config("API token contains invalid characters".into()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http_client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(concat!("c14-cli/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            wait: Duration::from_secs(settings.wait_secs),
        })
    }

    /// Build the full URL for an API path
    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }

    /// Send a request and return the body of a successful response
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&(impl Serialize + Sync)>,
    ) -> Result<String> {
        let url = self.api_url(path);
        tracing::debug!(%method, %url, "online api request");

        let mut request_builder = self.http_client.request(method, &url);
        if let Some(body) = body {
            request_builder = request_builder.json(body);
        }

        let response = request_builder
            .send()
            .await
            .map_err(|e| Error::Network(format!("Request failed: {e}")))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::Network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), body = %text, "online api error");
            return Err(map_error(status, &text));
        }

        Ok(text)
    }

    /// Send a request and decode the JSON response
    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&(impl Serialize + Sync)>,
    ) -> Result<T> {
        let text = self.send(method, path, body).await?;
        serde_json::from_str(&text).map_err(Error::Json)
    }

    /// List the safes on the account
    pub async fn list_safes(&self) -> Result<Vec<SafeSummary>> {
        self.request(Method::GET, "/storage/c14/safe", None::<&()>)
            .await
    }

    /// Find a safe by name or create it
    async fn ensure_safe(&self, name: &str, description: &str) -> Result<String> {
        let safes = self.list_safes().await?;
        if let Some(safe) = find_safe(&safes, name) {
            tracing::debug!(safe = %safe.uuid_ref, name, "reusing existing safe");
            return Ok(safe.uuid_ref.clone());
        }

        let body = CreateSafeBody { name, description };
        let uuid: String = self
            .request(Method::POST, "/storage/c14/safe", Some(&body))
            .await?;
        tracing::debug!(safe = %uuid, name, "created safe");
        Ok(uuid)
    }

    /// Check whether the bucket of an archive is reachable yet
    ///
    /// Any success status counts, whatever the body holds.
    async fn bucket_ready(&self, safe: &str, archive: &str) -> Result<bool> {
        let path = format!("/storage/c14/safe/{safe}/archive/{archive}/bucket");
        match self.send(Method::GET, &path, None::<&()>).await {
            Ok(_) => Ok(true),
            Err(Error::NotFound(_) | Error::Api { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// Pick the first safe whose name matches exactly
fn find_safe<'a>(safes: &'a [SafeSummary], name: &str) -> Option<&'a SafeSummary> {
    safes.iter().find(|s| s.name == name)
}

/// Map HTTP status codes to appropriate errors
fn map_error(status: StatusCode, body: &str) -> Error {
    let message = error_message(body);
    match status {
        StatusCode::NOT_FOUND => Error::NotFound(message),
        StatusCode::FORBIDDEN | StatusCode::UNAUTHORIZED => Error::Auth(message),
        _ => Error::Api {
            status: status.as_u16(),
            message,
        },
    }
}

/// Extract the most useful message from an error body
fn error_message(body: &str) -> String {
    let parsed: ApiErrorBody = serde_json::from_str(body).unwrap_or_default();
    parsed
        .error_description
        .or(parsed.message)
        .or(parsed.error)
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "empty response".to_string()
            } else {
                trimmed.to_string()
            }
        })
}

#[async_trait]
impl OnlineApi for OnlineClient {
    async fn list_ssh_keys(&self) -> Result<Vec<SshKey>> {
        self.request(Method::GET, "/user/key/ssh", None::<&()>)
            .await
    }

    async fn create_ssh_bucket_from_scratch(
        &self,
        request: &CreateBucketRequest,
    ) -> Result<CreatedBucket> {
        let safe_uuid = self
            .ensure_safe(&request.safe_name, &request.description)
            .await?;

        let path = format!("/storage/c14/safe/{safe_uuid}/archive");
        let body = CreateArchiveBody::from_request(request);
        let archive_uuid: String = self.request(Method::POST, &path, Some(&body)).await?;
        tracing::debug!(archive = %archive_uuid, safe = %safe_uuid, "created archive");

        // The archive exists from here on, so waiting never fails the call
        let waiter = BucketWaiter::new(self.wait, request.quiet);
        match waiter
            .run(|| self.bucket_ready(&safe_uuid, &archive_uuid))
            .await
        {
            Ok(true) => {}
            Ok(false) => {
                tracing::warn!(archive = %archive_uuid, "bucket not ready yet, returning anyway");
            }
            Err(e) => {
                tracing::warn!(
                    archive = %archive_uuid,
                    error = %e,
                    "could not check bucket, returning anyway"
                );
            }
        }

        Ok(CreatedBucket {
            safe_uuid,
            archive_uuid,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{TestServer, route};
    use c14_core::CryptoMode;

    fn settings(endpoint: &str) -> ApiSettings {
        ApiSettings {
            endpoint: endpoint.to_string(),
            token: Some("token".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_api_url_construction() {
        let client = OnlineClient::new(&settings("https://api.online.net/api/v1")).unwrap();
        assert_eq!(
            client.api_url("/user/key/ssh"),
            "https://api.online.net/api/v1/user/key/ssh"
        );
    }

    #[test]
    fn test_api_url_with_trailing_slash() {
        let client = OnlineClient::new(&settings("https://api.online.net/api/v1/")).unwrap();
        assert_eq!(
            client.api_url("/storage/c14/safe"),
            "https://api.online.net/api/v1/storage/c14/safe"
        );
    }

    #[test]
    fn test_new_without_token_fails() {
        let result = OnlineClient::new(&ApiSettings::default());
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_map_error_statuses() {
        assert!(matches!(
            map_error(StatusCode::UNAUTHORIZED, "{}"),
            Error::Auth(_)
        ));
        assert!(matches!(
            map_error(StatusCode::NOT_FOUND, ""),
            Error::NotFound(_)
        ));
        match map_error(
            StatusCode::BAD_REQUEST,
            r#"{"error":"invalid_request","error_description":"parity is invalid"}"#,
        ) {
            Error::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "parity is invalid");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_error_message_falls_back_to_raw_body() {
        assert_eq!(error_message("gateway exploded\n"), "gateway exploded");
        assert_eq!(error_message(""), "empty response");
        assert_eq!(error_message(r#"{"message":"quota"}"#), "quota");
    }

    #[test]
    fn test_find_safe_by_exact_name() {
        let safes = vec![
            SafeSummary {
                uuid_ref: "s-1".into(),
                name: "books_safe_old".into(),
            },
            SafeSummary {
                uuid_ref: "s-2".into(),
                name: "books_safe".into(),
            },
        ];
        assert_eq!(find_safe(&safes, "books_safe").unwrap().uuid_ref, "s-2");
        assert!(find_safe(&safes, "books").is_none());
    }

    fn bucket_request() -> CreateBucketRequest {
        CreateBucketRequest {
            safe_name: "MyBooks_safe".into(),
            archive_name: "MyBooks".into(),
            description: " ".into(),
            ssh_keys: vec!["key-1".into()],
            platforms: vec!["1".into()],
            days: 7,
            quiet: true,
            parity: "standard".into(),
            large_bucket: false,
            crypto: CryptoMode::None,
        }
    }

    /// Client against `server` that gives up on the bucket after one probe
    fn client_for(server: &TestServer) -> OnlineClient {
        OnlineClient::new(&ApiSettings {
            wait_secs: 0,
            ..settings(&server.endpoint)
        })
        .unwrap()
    }

    #[test]
    fn test_archive_body_fields() {
        let request = bucket_request();

        let json = serde_json::to_value(CreateArchiveBody::from_request(&request)).unwrap();
        assert_eq!(json["name"], "MyBooks");
        assert_eq!(json["description"], " ");
        assert_eq!(json["crypto"], "none");
        assert_eq!(json["protocols"], serde_json::json!(["SSH"]));
        assert_eq!(json["ssh_keys"], serde_json::json!(["key-1"]));
        assert_eq!(json["platforms"], serde_json::json!(["1"]));
        assert_eq!(json["days"], 7);
        assert_eq!(json["large_bucket"], false);
        assert!(json.get("quiet").is_none());
        assert!(json.get("safe_name").is_none());
    }

    #[tokio::test]
    async fn test_list_ssh_keys_decodes_response() {
        let server = TestServer::start(vec![route(
            "GET",
            "/user/key/ssh",
            200,
            r#"[{"uuid_ref":"key-1","description":"laptop","fingerprint":"aa:bb"}]"#,
        )])
        .await;

        let keys = client_for(&server).list_ssh_keys().await.unwrap();
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].uuid_ref, "key-1");
        assert_eq!(keys[0].description, "laptop");
    }

    #[tokio::test]
    async fn test_list_ssh_keys_unauthorized() {
        let server = TestServer::start(vec![route(
            "GET",
            "/user/key/ssh",
            401,
            r#"{"error":"invalid_grant","error_description":"token expired"}"#,
        )])
        .await;

        let result = client_for(&server).list_ssh_keys().await;
        assert!(matches!(result, Err(Error::Auth(message)) if message == "token expired"));
    }

    #[tokio::test]
    async fn test_create_reuses_existing_safe() {
        let server = TestServer::start(vec![
            route(
                "GET",
                "/storage/c14/safe",
                200,
                r#"[{"uuid_ref":"safe-9","name":"MyBooks_safe","status":"active"}]"#,
            ),
            route("POST", "/storage/c14/safe/safe-9/archive", 200, r#""archive-1""#),
            route(
                "GET",
                "/storage/c14/safe/safe-9/archive/archive-1/bucket",
                200,
                "{}",
            ),
        ])
        .await;

        let created = client_for(&server)
            .create_ssh_bucket_from_scratch(&bucket_request())
            .await
            .unwrap();

        assert_eq!(created.safe_uuid, "safe-9");
        assert_eq!(created.archive_uuid, "archive-1");
        assert!(server.requests_to("POST", "/storage/c14/safe").is_empty());

        let posts = server.requests_to("POST", "/storage/c14/safe/safe-9/archive");
        assert_eq!(posts.len(), 1);
        let body: serde_json::Value = serde_json::from_str(&posts[0].body).unwrap();
        assert_eq!(body["name"], "MyBooks");
        assert_eq!(body["ssh_keys"], serde_json::json!(["key-1"]));
        assert_eq!(body["crypto"], "none");
        assert_eq!(body["days"], 7);
    }

    #[tokio::test]
    async fn test_create_makes_missing_safe() {
        let server = TestServer::start(vec![
            route("GET", "/storage/c14/safe", 200, "[]"),
            route("POST", "/storage/c14/safe", 200, r#""safe-1""#),
            route("POST", "/storage/c14/safe/safe-1/archive", 200, r#""archive-1""#),
            // Ready bucket answering with an empty body
            route(
                "GET",
                "/storage/c14/safe/safe-1/archive/archive-1/bucket",
                200,
                "",
            ),
        ])
        .await;

        let created = client_for(&server)
            .create_ssh_bucket_from_scratch(&bucket_request())
            .await
            .unwrap();

        assert_eq!(created.safe_uuid, "safe-1");
        assert_eq!(created.archive_uuid, "archive-1");

        let safe_posts = server.requests_to("POST", "/storage/c14/safe");
        assert_eq!(safe_posts.len(), 1);
        let body: serde_json::Value = serde_json::from_str(&safe_posts[0].body).unwrap();
        assert_eq!(body["name"], "MyBooks_safe");
        assert_eq!(body["description"], " ");
    }

    #[tokio::test]
    async fn test_create_returns_archive_when_bucket_never_ready() {
        let server = TestServer::start(vec![
            route("GET", "/storage/c14/safe", 200, "[]"),
            route("POST", "/storage/c14/safe", 200, r#""safe-1""#),
            route("POST", "/storage/c14/safe/safe-1/archive", 200, r#""archive-1""#),
        ])
        .await;

        let created = client_for(&server)
            .create_ssh_bucket_from_scratch(&bucket_request())
            .await
            .unwrap();

        assert_eq!(created.archive_uuid, "archive-1");
        let probes = server.requests_to(
            "GET",
            "/storage/c14/safe/safe-1/archive/archive-1/bucket",
        );
        assert_eq!(probes.len(), 1);
    }

    #[tokio::test]
    async fn test_create_returns_archive_when_bucket_check_fails() {
        let server = TestServer::start(vec![
            route("GET", "/storage/c14/safe", 200, "[]"),
            route("POST", "/storage/c14/safe", 200, r#""safe-1""#),
            route("POST", "/storage/c14/safe/safe-1/archive", 200, r#""archive-1""#),
            route(
                "GET",
                "/storage/c14/safe/safe-1/archive/archive-1/bucket",
                401,
                r#"{"error":"invalid_grant"}"#,
            ),
        ])
        .await;

        let created = client_for(&server)
            .create_ssh_bucket_from_scratch(&bucket_request())
            .await
            .unwrap();

        assert_eq!(created.safe_uuid, "safe-1");
        assert_eq!(created.archive_uuid, "archive-1");
    }

    #[tokio::test]
    async fn test_create_fails_before_archive_exists() {
        let server = TestServer::start(vec![route(
            "GET",
            "/storage/c14/safe",
            500,
            r#"{"message":"maintenance"}"#,
        )])
        .await;

        let result = client_for(&server)
            .create_ssh_bucket_from_scratch(&bucket_request())
            .await;

        assert!(matches!(result, Err(Error::Api { status: 500, .. })));
        assert_eq!(server.received().len(), 1);
    }
}
