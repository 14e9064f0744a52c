//! HTTP transport for list endpoints.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde_json::Value;
use url::Url;

use crate::{ListEndpoint, ListParams, TransportError};

/// A list endpoint reached over HTTP GET.
#[derive(Debug, Clone)]
pub struct HttpEndpoint {
	name: String,
	client: Client,
	url: Url,
	bearer: Option<String>,
	timeout: Option<Duration>,
}

impl HttpEndpoint {
	/// Creates an endpoint for `path` below `base_url`.
	pub fn new(name: impl Into<String>, base_url: &str, path: &str) -> Result<Self, TransportError> {
		let base = Url::parse(base_url).map_err(|e| TransportError::InvalidUrl(format!("{base_url}: {e}")))?;
		let url = base
			.join(path)
			.map_err(|e| TransportError::InvalidUrl(format!("{base_url} + {path}: {e}")))?;
		Ok(Self {
			name: name.into(),
			client: Client::new(),
			url,
			bearer: None,
			timeout: None,
		})
	}

	/// Sends `Authorization: Bearer <token>` with every request.
	pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
		self.bearer = Some(token.into());
		self
	}

	/// Limits each request to `timeout`.
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = Some(timeout);
		self
	}

	/// Reuses an existing client (connection pool, proxies, TLS settings).
	pub fn with_client(mut self, client: Client) -> Self {
		self.client = client;
		self
	}

	/// Returns the full request URL for `params`.
	pub fn request_url(&self, params: &ListParams) -> Url {
		let mut url = self.url.clone();
		url.query_pairs_mut().extend_pairs(params.query_pairs());
		url
	}
}

#[async_trait]
impl ListEndpoint for HttpEndpoint {
	fn name(&self) -> &str {
		&self.name
	}

	async fn fetch(&self, params: &ListParams) -> Result<Value, TransportError> {
		let url = self.request_url(params);
		tracing::debug!(endpoint = %self.name, url = %url, "list.http.get");

		let mut request = self.client.get(url).header(ACCEPT, "application/json");
		if let Some(token) = &self.bearer {
			request = request.header(AUTHORIZATION, format!("Bearer {token}"));
		}
		if let Some(timeout) = self.timeout {
			request = request.timeout(timeout);
		}

		let response = request.send().await.map_err(|e| {
			if e.is_timeout() {
				TransportError::Timeout(self.timeout.unwrap_or_default())
			} else {
				TransportError::Network(e.to_string())
			}
		})?;

		let status = response.status();
		if !status.is_success() {
			let body = response.text().await.unwrap_or_default();
			return Err(TransportError::Status {
				status: status.as_u16(),
				body,
			});
		}

		response.json::<Value>().await.map_err(|e| TransportError::Decode(e.to_string()))
	}
}
