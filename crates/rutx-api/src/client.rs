// RUTX11 HTTP client
//
// Wraps `reqwest::Client` with device URL construction, bearer-token
// injection, accepted-status checking, and `{ "data": ... }` envelope
// unwrapping. Endpoint groups (dhcp, wireless, system) are implemented
// as inherent methods in separate files to keep this module focused on
// transport mechanics.

use std::sync::{PoisonError, RwLock};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// HTTP method for a configuration write.
///
/// The device uses PUT for updating existing singletons or
/// bulk-replacing collections, POST for creating one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Put,
    Post,
}

/// Raw HTTP client for the RUTX11 REST API.
///
/// Created unauthenticated; [`login`](DeviceClient::login) exchanges
/// credentials for a bearer token which is then attached to every
/// request for the lifetime of the client. There is no token refresh
/// and no logout endpoint -- the token is simply dropped on exit.
pub struct DeviceClient {
    http: reqwest::Client,
    base_url: Url,
    token: RwLock<Option<String>>,
}

/// Response envelope: `{ "success": bool, "data": ..., "errors": [...] }`.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: Option<T>,
}

impl DeviceClient {
    /// Create a new client for the device at `base_url`
    /// (e.g. `https://10.15.20.1`).
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            token: RwLock::new(None),
        })
    }

    /// Create a client with a pre-built `reqwest::Client` (tests).
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            token: RwLock::new(None),
        }
    }

    /// The device base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The underlying HTTP client (for the login flow).
    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Whether a bearer token is currently held.
    pub fn is_logged_in(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub(crate) fn set_token(&self, token: String) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token);
    }

    fn bearer(&self) -> Result<String, Error> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(Error::NotLoggedIn)
    }

    // ── URL builder ──────────────────────────────────────────────────

    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        self.base_url.join(path).map_err(Error::InvalidUrl)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET and unwrap the `data` field of the envelope.
    pub(crate) async fn get_data<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {}", url);

        let resp = self
            .http
            .get(url)
            .bearer_auth(self.bearer()?)
            .send()
            .await
            .map_err(Error::Transport)?;

        let resp = check_status(resp, &[200]).await?;
        parse_data(resp).await
    }

    /// PUT a payload (wrapped in the `data` envelope), accepting 200.
    pub(crate) async fn put(&self, path: &str, payload: &impl Serialize) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("PUT {}", url);

        let resp = self
            .http
            .put(url)
            .bearer_auth(self.bearer()?)
            .json(&json!({ "data": payload }))
            .send()
            .await
            .map_err(Error::Transport)?;

        check_status(resp, &[200]).await?;
        Ok(())
    }

    /// POST a payload (wrapped in the `data` envelope), accepting
    /// 200 and 201 -- the device answers either for creates.
    pub(crate) async fn post(&self, path: &str, payload: &impl Serialize) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("POST {}", url);

        let resp = self
            .http
            .post(url)
            .bearer_auth(self.bearer()?)
            .json(&json!({ "data": payload }))
            .send()
            .await
            .map_err(Error::Transport)?;

        check_status(resp, &[200, 201]).await?;
        Ok(())
    }

    /// DELETE a single collection entry, accepting 200. The device
    /// expects a bare `{}` body here, not the `data` envelope.
    pub(crate) async fn delete_entry(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("DELETE {}", url);

        let resp = self
            .http
            .delete(url)
            .bearer_auth(self.bearer()?)
            .json(&json!({}))
            .send()
            .await
            .map_err(Error::Transport)?;

        check_status(resp, &[200]).await?;
        Ok(())
    }

    /// Bulk DELETE with an id-list body wrapped in the `data`
    /// envelope, accepting 200.
    pub(crate) async fn delete(&self, path: &str, payload: &impl Serialize) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("DELETE {}", url);

        let resp = self
            .http
            .delete(url)
            .bearer_auth(self.bearer()?)
            .json(&json!({ "data": payload }))
            .send()
            .await
            .map_err(Error::Transport)?;

        check_status(resp, &[200]).await?;
        Ok(())
    }

    /// Send one configuration write described as data.
    ///
    /// This is the entry point for the declarative apply engine: the
    /// provisioning plan is a list of (method, endpoint, payload)
    /// entries, and this forwards each to the matching helper.
    pub async fn send(&self, method: Method, path: &str, payload: &Value) -> Result<(), Error> {
        match method {
            Method::Put => self.put(path, payload).await,
            Method::Post => self.post(path, payload).await,
        }
    }
}

/// Check the response status against the accepted set.
///
/// 401 becomes `SessionExpired` (the device revoked the token); any
/// other unaccepted status becomes `Error::Api` carrying the raw body
/// so the operator sees exactly what the device said.
pub(crate) async fn check_status(
    resp: reqwest::Response,
    accepted: &[u16],
) -> Result<reqwest::Response, Error> {
    let status = resp.status().as_u16();
    if accepted.contains(&status) {
        return Ok(resp);
    }
    if status == 401 {
        return Err(Error::SessionExpired);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(Error::Api { status, body })
}

/// Parse the `{ "data": ... }` envelope and return the payload.
pub(crate) async fn parse_data<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let body = resp.text().await.map_err(Error::Transport)?;

    let envelope: Envelope<T> =
        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: body.clone(),
        })?;

    envelope.data.ok_or(Error::Deserialization {
        message: "response has no `data` field".into(),
        body,
    })
}
