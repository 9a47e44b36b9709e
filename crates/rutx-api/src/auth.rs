// Login flow
//
// A single POST to /api/login exchanges username/password for a bearer
// token. The token lives for the process lifetime; there is no logout
// and no refresh -- a later 401 is fatal for the run.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::client::{DeviceClient, parse_data};
use crate::endpoint;
use crate::error::Error;

#[derive(Debug, Deserialize)]
struct LoginData {
    token: String,
}

impl DeviceClient {
    /// Authenticate with the device.
    ///
    /// On success the returned token is stored and attached as
    /// `Authorization: Bearer <token>` to all subsequent requests.
    /// A non-200 answer is fatal; the raw body is surfaced so the
    /// operator sees the device's own error text.
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<(), Error> {
        let url = self.url(endpoint::LOGIN)?;
        debug!("logging in at {}", url);

        let body = json!({
            "username": username,
            "password": password.expose_secret(),
        });

        let resp = self
            .http()
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if status.as_u16() != 200 {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Authentication {
                message: format!("login failed (HTTP {status}): {body}"),
            });
        }

        let data: LoginData = parse_data(resp).await?;
        self.set_token(data.token);

        debug!("login successful");
        Ok(())
    }
}
