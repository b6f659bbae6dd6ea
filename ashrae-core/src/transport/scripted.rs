//! In-memory transport for tests: replays queued responses and records
//! every request it sees.

use async_trait::async_trait;
use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use crate::error::FetchError;

use super::{RawResponse, Transport};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecordedRequest {
    pub url: String,
    pub form: Vec<(String, String)>,
}

impl RecordedRequest {
    pub fn field(&self, key: &str) -> Option<&str> {
        self.form.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct ScriptedTransport {
    responses: Arc<Mutex<VecDeque<RawResponse>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(RawResponse { status, body: body.to_string() });
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn post_form(&self, url: &str, form: &[(&str, String)]) -> Result<RawResponse, FetchError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            url: url.to_string(),
            form: form.iter().map(|(k, v)| (k.to_string(), v.clone())).collect(),
        });

        let next = self.responses.lock().unwrap().pop_front();
        Ok(next.expect("scripted transport ran out of responses"))
    }
}
