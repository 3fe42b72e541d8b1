//! Thin JSON-over-HTTP client shared by the provider drivers.

use std::time::Duration;

use serde_json::Value;

use crate::error::ProviderError;

pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// POST a JSON body and parse the JSON reply.
    ///
    /// Query pairs go through reqwest so values are percent-encoded; keys
    /// with reserved characters survive intact. Non-2xx statuses are surfaced
    /// as [`ProviderError::Status`] before any body parsing; timeouts and
    /// connection failures come back as [`ProviderError::Transport`]. Both
    /// are ordinary tier failures to the fallback chain.
    pub async fn post_json(
        &self,
        url: &str,
        query: &[(&str, &str)],
        bearer: Option<&str>,
        body: &Value,
    ) -> Result<Value, ProviderError> {
        let mut req = self.client.post(url).query(query).json(body);
        if let Some(key) = bearer {
            req = req.bearer_auth(key);
        }

        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                code: status.as_u16(),
            });
        }

        let json = resp.json().await?;
        Ok(json)
    }
}
