//! Envelope normalization for list responses.
//!
//! Endpoints disagree on where rows and totals live. Anything malformed past
//! the success flag degrades to an empty page or a zero total with a warning,
//! so contract drift shows up in logs instead of as a broken screen.

use scola_api::{EnvelopeFields, JsonValue};
use serde::de::DeserializeOwned;
use serde_json::Map;
use thiserror::Error;
use tracing::warn;

/// Message used when a failed envelope carries no message of its own.
pub const DEFAULT_FAILURE_MESSAGE: &str = "The server could not complete the request.";

/// Response that cannot be turned into a page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizationError {
	/// The envelope's success flag was absent or falsy.
	#[error("{0}")]
	ServerReportedFailure(String),
}

/// A page of rows in canonical form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized<R> {
	/// Rows of the requested page, in server order.
	pub items: Vec<R>,
	/// Total rows matching the query across all pages.
	pub total_count: usize,
}

/// Maps one endpoint's envelopes into [`Normalized`] pages.
#[derive(Debug, Clone)]
pub struct ResponseNormalizer {
	endpoint: String,
	fields: EnvelopeFields,
}

impl ResponseNormalizer {
	/// Creates a normalizer for `endpoint` using `fields` as the mapping.
	pub fn new(endpoint: impl Into<String>, fields: EnvelopeFields) -> Self {
		Self {
			endpoint: endpoint.into(),
			fields,
		}
	}

	/// Returns the envelope mapping.
	pub fn fields(&self) -> &EnvelopeFields {
		&self.fields
	}

	/// Normalizes a raw envelope.
	///
	/// Fails only when the server reports failure. Rows that do not decode
	/// as `R` are skipped.
	pub fn normalize<R: DeserializeOwned>(&self, raw: JsonValue) -> Result<Normalized<R>, NormalizationError> {
		let JsonValue::Object(mut envelope) = raw else {
			warn!(endpoint = %self.endpoint, "list.normalize.not_an_object");
			return Err(NormalizationError::ServerReportedFailure(DEFAULT_FAILURE_MESSAGE.to_string()));
		};

		if !envelope.get(self.fields.success).is_some_and(is_truthy) {
			let message = envelope
				.get(self.fields.message)
				.and_then(JsonValue::as_str)
				.map(str::trim)
				.filter(|m| !m.is_empty())
				.unwrap_or(DEFAULT_FAILURE_MESSAGE);
			return Err(NormalizationError::ServerReportedFailure(message.to_string()));
		}

		let (rows, total) = match envelope.remove(self.fields.data) {
			Some(JsonValue::Array(rows)) => (rows, self.top_level_total(&envelope)),
			Some(JsonValue::Object(mut nested)) => {
				let rows = match nested.remove(self.fields.items) {
					Some(JsonValue::Array(rows)) => rows,
					other => {
						warn!(endpoint = %self.endpoint, found = kind(other.as_ref()), "list.normalize.nested_items_missing");
						Vec::new()
					}
				};
				let total = match nested.get(self.fields.total_count) {
					Some(value) => self.count(value, self.fields.total_count),
					None => self.top_level_total(&envelope),
				};
				(rows, total)
			}
			other => {
				warn!(endpoint = %self.endpoint, found = kind(other.as_ref()), "list.normalize.data_missing");
				(Vec::new(), self.top_level_total(&envelope))
			}
		};

		Ok(Normalized {
			items: self.decode_rows(rows),
			total_count: total,
		})
	}

	fn top_level_total(&self, envelope: &Map<String, JsonValue>) -> usize {
		match envelope.get(self.fields.total) {
			Some(value) => self.count(value, self.fields.total),
			None => {
				warn!(endpoint = %self.endpoint, field = self.fields.total, "list.normalize.total_missing");
				0
			}
		}
	}

	fn count(&self, value: &JsonValue, field: &str) -> usize {
		parse_count(value).unwrap_or_else(|| {
			warn!(endpoint = %self.endpoint, field, value = %value, "list.normalize.total_not_numeric");
			0
		})
	}

	fn decode_rows<R: DeserializeOwned>(&self, rows: Vec<JsonValue>) -> Vec<R> {
		let mut items = Vec::with_capacity(rows.len());
		for (index, row) in rows.into_iter().enumerate() {
			match serde_json::from_value(row) {
				Ok(item) => items.push(item),
				Err(error) => warn!(endpoint = %self.endpoint, index, %error, "list.normalize.row_skipped"),
			}
		}
		items
	}
}

fn is_truthy(value: &JsonValue) -> bool {
	match value {
		JsonValue::Null => false,
		JsonValue::Bool(b) => *b,
		JsonValue::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
		JsonValue::String(s) => !s.is_empty(),
		JsonValue::Array(_) | JsonValue::Object(_) => true,
	}
}

fn parse_count(value: &JsonValue) -> Option<usize> {
	match value {
		JsonValue::Number(n) => {
			if let Some(u) = n.as_u64() {
				return usize::try_from(u).ok();
			}
			let f = n.as_f64()?;
			(f >= 0.0 && f.fract() == 0.0 && f <= usize::MAX as f64).then_some(f as usize)
		}
		JsonValue::String(s) => s.trim().parse().ok(),
		_ => None,
	}
}

fn kind(value: Option<&JsonValue>) -> &'static str {
	match value {
		None => "absent",
		Some(JsonValue::Null) => "null",
		Some(JsonValue::Bool(_)) => "bool",
		Some(JsonValue::Number(_)) => "number",
		Some(JsonValue::String(_)) => "string",
		Some(JsonValue::Array(_)) => "array",
		Some(JsonValue::Object(_)) => "object",
	}
}
