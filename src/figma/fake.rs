//! In-memory transport for exercising the client without a network.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use super::client::{HttpResponse, Transport};
use crate::errors::FigmaResult;

#[derive(Default)]
pub struct FakeTransport {
    responses: Mutex<HashMap<String, HttpResponse>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl FakeTransport {
    /// Answers requests whose URL ends with `path`.
    pub fn respond(&self, path: &str, status: u16, body: &str) {
        self.responses.lock().unwrap().insert(
            path.to_string(),
            HttpResponse {
                status,
                body: body.to_string(),
            },
        );
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn get(&self, url: &str, access_token: &str) -> FigmaResult<HttpResponse> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), access_token.to_string()));

        let responses = self.responses.lock().unwrap();
        let response = responses
            .iter()
            .find(|(path, _)| url.ends_with(path.as_str()))
            .map(|(_, response)| response.clone())
            .unwrap_or(HttpResponse {
                status: 404,
                body: r#"{"status":404,"err":"Not found"}"#.to_string(),
            });
        Ok(response)
    }
}
