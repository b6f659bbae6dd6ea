use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::error::FetchError;

use super::{RawResponse, Transport};

/// [`Transport`] backed by a default `reqwest` client.
///
/// No timeout or retry policy is layered on top of reqwest's defaults.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self { http: Client::new() }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_form(&self, url: &str, form: &[(&str, String)]) -> Result<RawResponse, FetchError> {
        debug!(url, fields = ?form.iter().map(|(k, _)| *k).collect::<Vec<_>>(), "POST");

        let res = self.http.post(url).form(form).send().await?;

        let status = res.status().as_u16();
        let body = res.text().await?;

        debug!(url, status, bytes = body.len(), "response received");

        Ok(RawResponse { status, body })
    }
}
