// src/fetch/mock.rs

use super::{FetchResponse, Transport};
use anyhow::Result;
use async_trait::async_trait;
use reqwest::StatusCode;
use std::sync::Mutex;
use url::Url;

/// Scripted `Transport` for tests. Responses are served in order and every
/// requested URL is recorded.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<Vec<Result<FetchResponse>>>,
    requested: Mutex<Vec<Url>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, response: Result<FetchResponse>) {
        if let Ok(mut responses) = self.responses.lock() {
            responses.push(response);
        }
    }

    pub fn push_ok(&self, status: StatusCode, body: &str) {
        self.push(Ok(FetchResponse::new(status, body)));
    }

    pub fn push_err(&self, message: &str) {
        self.push(Err(anyhow::anyhow!(message.to_string())));
    }

    pub fn requested(&self) -> Vec<Url> {
        self.requested
            .lock()
            .map(|urls| urls.clone())
            .unwrap_or_default()
    }

    pub fn calls(&self) -> usize {
        self.requested().len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, url: &Url) -> Result<FetchResponse> {
        if let Ok(mut requested) = self.requested.lock() {
            requested.push(url.clone());
        }
        let mut responses = self
            .responses
            .lock()
            .map_err(|_| anyhow::anyhow!("mock transport poisoned"))?;
        if responses.is_empty() {
            return Err(anyhow::anyhow!("No mock response configured"));
        }
        responses.remove(0)
    }
}
