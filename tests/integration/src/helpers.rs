//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers, issuing bearer tokens and
//! making HTTP requests.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use lonkind_api::{create_app, create_app_state};
use lonkind_common::{AppConfig, JwtService};
use lonkind_core::Snowflake;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

const TEST_JWT_SECRET: &str = "integration-test-secret";

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    jwt: JwtService,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server over the in-memory store
    pub async fn start() -> Result<Self> {
        Self::start_with_config(memory_config()?).await
    }

    /// Start a server over PostgreSQL, or `None` when DATABASE_URL is unset
    pub async fn start_postgres() -> Result<Option<Self>> {
        let Ok(url) = std::env::var("DATABASE_URL") else {
            return Ok(None);
        };
        let config = config_from([
            ("STORE_BACKEND", "postgres"),
            ("DATABASE_URL", url.as_str()),
            ("DATABASE_RUN_MIGRATIONS", "true"),
        ])?;
        Ok(Some(Self::start_with_config(config).await?))
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let jwt = JwtService::new(&config.jwt.secret, config.jwt.access_token_expiry);

        let state = create_app_state(config).await?;
        let app = create_app(state);

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            jwt,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// A valid bearer token for `user_id`
    pub fn token_for(&self, user_id: Snowflake) -> Result<String> {
        Ok(self.jwt.issue_access_token(user_id)?)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// Make a GET request with auth token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await?)
    }

    /// Make a POST request with auth token and JSON body
    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a bodiless POST request with auth token
    pub async fn post_empty_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .send()
            .await?)
    }

    /// Make a bodiless PUT request with auth token
    pub async fn put_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .client
            .put(self.url(path))
            .bearer_auth(token)
            .send()
            .await?)
    }
}

fn config_from<const N: usize>(extra: [(&str, &str); N]) -> Result<AppConfig> {
    let mut vars: HashMap<String, String> = [
        ("API_PORT", "0"),
        ("JWT_SECRET", TEST_JWT_SECRET),
        ("RATE_LIMIT_REQUESTS_PER_SECOND", "1000"),
        ("RATE_LIMIT_BURST", "10000"),
        ("LEDGER_MAX_ATTEMPTS", "50"),
        ("LEDGER_RETRY_BACKOFF_MS", "1"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    vars.extend(extra.into_iter().map(|(k, v)| (k.to_string(), v.to_string())));

    AppConfig::from_map(&vars).map_err(|e| anyhow::anyhow!("Config error: {e}"))
}

/// Configuration for a server over the in-memory store
pub fn memory_config() -> Result<AppConfig> {
    config_from([("STORE_BACKEND", "memory")])
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}

/// Assert an error response and return its `error.code`
pub async fn assert_error(response: Response, expected_status: StatusCode) -> Result<String> {
    let body: ErrorEnvelope = assert_json(response, expected_status).await?;
    Ok(body.error.code)
}

#[derive(Debug, serde::Deserialize)]
struct ErrorEnvelope {
    error: ErrorCode,
}

#[derive(Debug, serde::Deserialize)]
struct ErrorCode {
    code: String,
}
