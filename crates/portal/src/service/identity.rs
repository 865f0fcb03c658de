use crate::{abstract_trait::IdentityClientTrait, cache::SessionStore};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{Serialize, de::DeserializeOwned};
use shared::{
    domain::{
        requests::{LoginRequest, OwnerLoginRequest, SignupRequest},
        responses::{LoginResponse, OwnerLoginResponse, SignupResponse},
    },
    errors::{ErrorResponse, HttpError},
};
use std::time::Duration;
use tracing::{debug, error, warn};

/// `reqwest` client for the identity endpoint.
#[derive(Debug, Clone)]
pub struct IdentityHttpClient {
    client: Client,
    base_url: String,
}

impl IdentityHttpClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Attach the current session's bearer token, for the CRUD collaborators
    /// that talk to the same backend.
    pub fn authorized(&self, builder: RequestBuilder, session: &SessionStore) -> RequestBuilder {
        match session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub fn get(&self, path: &str, session: &SessionStore) -> RequestBuilder {
        self.authorized(self.client.get(self.url(path)), session)
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, HttpError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.url(path);
        debug!(%url, "POST");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                error!(%url, "Identity endpoint unreachable: {e}");
                HttpError::Transport(e.to_string())
            })?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| HttpError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorResponse>(&bytes)
                .map(|body| body.message)
                .unwrap_or_else(|_| {
                    status
                        .canonical_reason()
                        .unwrap_or("Request failed")
                        .to_string()
                });
            warn!(%url, status = status.as_u16(), %message, "Identity endpoint rejected request");
            return Err(HttpError::from_status(status.as_u16(), message));
        }

        let body: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            &bytes
        };

        serde_json::from_slice(body).map_err(|e| {
            error!(%url, "Unexpected response body: {e}");
            HttpError::Decode(e.to_string())
        })
    }
}

#[async_trait]
impl IdentityClientTrait for IdentityHttpClient {
    async fn login(&self, input: &LoginRequest) -> Result<LoginResponse, HttpError> {
        self.post_json("/auth/login", input).await
    }

    async fn owner_login(
        &self,
        input: &OwnerLoginRequest,
    ) -> Result<OwnerLoginResponse, HttpError> {
        self.post_json("/auth/owner-login", input).await
    }

    async fn signup(&self, input: &SignupRequest) -> Result<SignupResponse, HttpError> {
        self.post_json("/auth/signup", input).await
    }
}
