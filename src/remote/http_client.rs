use serde::de::DeserializeOwned;

use super::*;

impl DashboardClient {
    pub(super) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(super) fn ensure_ok(
        &self,
        resp: reqwest::blocking::Response,
        url: &str,
    ) -> Result<reqwest::blocking::Response, FetchError> {
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(resp)
    }

    pub(super) fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        tracing::debug!(%url, "GET");
        let transport = |source| FetchError::Transport {
            url: url.to_string(),
            source,
        };
        let resp = self.client.get(url).send().map_err(transport)?;
        let bytes = self.ensure_ok(resp, url)?.bytes().map_err(transport)?;
        serde_json::from_slice(&bytes).map_err(|err| FetchError::MalformedPayload {
            url: url.to_string(),
            reason: err.to_string(),
        })
    }
}
