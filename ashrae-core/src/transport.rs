use async_trait::async_trait;
use std::fmt::Debug;

use crate::error::FetchError;

pub mod http;
#[cfg(test)]
pub(crate) mod scripted;

pub use http::HttpTransport;

/// Status and decoded text of an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends form-encoded POST requests to the design data service.
#[async_trait]
pub trait Transport: Send + Sync + Debug {
    async fn post_form(&self, url: &str, form: &[(&str, String)]) -> Result<RawResponse, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_2xx_is_success() {
        let ok = RawResponse { status: 200, body: String::new() };
        let redirect = RawResponse { status: 302, body: String::new() };
        let failed = RawResponse { status: 500, body: String::new() };

        assert!(ok.is_success());
        assert!(!redirect.is_success());
        assert!(!failed.is_success());
    }
}
