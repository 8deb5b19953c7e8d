//! Blocking `Transport` backed by ureq.

use std::time::Duration;

use registry_core::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};

pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    /// Non-2xx statuses come back as responses; only connection failures and
    /// timeouts are errors.
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&mut self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let HttpRequest {
            method,
            path,
            headers,
            body,
        } = request;
        let content_type = headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("content-type"))
            .map(|(_, value)| value.as_str())
            .unwrap_or("application/json");

        let agent = &self.agent;
        let result = match (method, body) {
            (HttpMethod::Get, _) => agent.get(&path).call(),
            (HttpMethod::Delete, _) => agent.delete(&path).call(),
            (HttpMethod::Post, Some(body)) => agent
                .post(&path)
                .content_type(content_type)
                .send(body.as_bytes()),
            (HttpMethod::Post, None) => agent.post(&path).send_empty(),
            (HttpMethod::Put, Some(body)) => agent
                .put(&path)
                .content_type(content_type)
                .send(body.as_bytes()),
            (HttpMethod::Put, None) => agent.put(&path).send_empty(),
        };
        let mut response = result.map_err(|e| {
            tracing::warn!(%method, %path, error = %e, "request failed");
            TransportError(e.to_string())
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| TransportError(e.to_string()))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
