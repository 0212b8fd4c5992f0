use std::fmt::Debug;
use std::fmt::Display;
use std::time::Duration;

use anyhow::Context;
use reqwest::Client;
use secrecy::ExposeSecret;
use secrecy::Secret;
use serde::Deserialize;

use crate::domain::SignupAttempt;
use crate::utils::error_chain_fmt;

/// The only thing the signup flow needs from the hosted table: insert one row.
///
/// Kept as a trait so that `SignupForm` can be driven by an in-memory store
/// in tests.
#[allow(async_fn_in_trait)]
pub trait SignupStore {
    async fn insert_signup(
        &self,
        attempt: &SignupAttempt,
    ) -> Result<(), StoreError>;
}

/// Error object returned by the hosted table's REST API on a failed insert
/// (e.g. constraint violation, missing table, bad key)
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct StoreRejection {
    #[serde(default)]
    pub code: Option<String>,
    pub message: String,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

impl Display for StoreRejection {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match &self.code {
            Some(code) => write!(f, "{code}: {}", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

#[derive(thiserror::Error)]
pub enum StoreError {
    /// The call completed, and the store reported a failure
    #[error("Store rejected the signup ({0})")]
    Rejected(StoreRejection),
    /// The call could not complete: network failure, bad configuration,
    /// unparseable response
    #[error("Store could not be reached")]
    Transport(#[source] anyhow::Error),
}

impl Debug for StoreError {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// HTTP client for a PostgREST-style table endpoint (as exposed by Supabase).
///
/// `reqwest::Client` pools connections internally, so a single `StoreClient`
/// should be built at startup and shared (via `web::Data`).
pub struct StoreClient {
    http_client: Client,
    base_url: String,
    table: String,
    api_key: Secret<String>,
}

impl StoreClient {
    /// Without a `timeout`, requests are bounded only by the transport itself
    pub fn new(
        base_url: String,
        table: String,
        api_key: Secret<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, reqwest::Error> {
        let builder = Client::builder();
        let builder = match timeout {
            Some(t) => builder.timeout(t),
            None => builder,
        };
        Ok(Self {
            http_client: builder.build()?,
            base_url,
            table,
            api_key,
        })
    }

    fn insert_url(&self) -> String {
        format!(
            "{}/rest/v1/{}",
            self.base_url.trim_end_matches('/'),
            self.table
        )
    }
}

impl SignupStore for StoreClient {
    /// `POST /rest/v1/{table}` with a one-element JSON array. 2xx is success;
    /// anything else must carry a JSON error object, otherwise the response
    /// is treated as a transport failure.
    #[tracing::instrument(
        name = "INSERTing signup into store",
        skip(self, attempt),
        fields(signup_email = %attempt.email)
    )]
    async fn insert_signup(
        &self,
        attempt: &SignupAttempt,
    ) -> Result<(), StoreError> {
        let key = self.api_key.expose_secret();
        let resp = self
            .http_client
            .post(self.insert_url())
            .header("apikey", key)
            .bearer_auth(key)
            .header("Prefer", "return=minimal")
            .json(&[attempt])
            .send()
            .await
            .context("Failed to send insert request")
            .map_err(StoreError::Transport)?;

        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }

        let rejection = resp
            .json::<StoreRejection>()
            .await
            .with_context(|| format!("Store returned {status} without an error object"))
            .map_err(StoreError::Transport)?;
        tracing::warn!(%status, %rejection, "store rejected signup");
        Err(StoreError::Rejected(rejection))
    }
}
