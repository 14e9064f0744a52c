use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::{ListParams, TransportError};

/// A remote collection that can be fetched one page at a time.
///
/// Implementations return the raw JSON envelope; interpreting it is the
/// caller's job, since envelope shapes vary between endpoints.
#[async_trait]
pub trait ListEndpoint: Send + Sync {
	/// Short name used in diagnostics.
	fn name(&self) -> &str;

	/// Fetches one page.
	async fn fetch(&self, params: &ListParams) -> Result<Value, TransportError>;
}

#[async_trait]
impl<T: ListEndpoint + ?Sized> ListEndpoint for Arc<T> {
	fn name(&self) -> &str {
		(**self).name()
	}

	async fn fetch(&self, params: &ListParams) -> Result<Value, TransportError> {
		(**self).fetch(params).await
	}
}
