//! Endpoint presets for the admin screens that list remote records.
//!
//! Screens differ only in the endpoint path, the envelope mapping and the
//! row type; everything else is the shared list controller.

use serde::Deserialize;

use crate::{EnvelopeFields, HttpEndpoint, TransportError};

/// Endpoint path and envelope mapping for one screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenPreset {
	/// Diagnostic name of the screen.
	pub name: &'static str,
	/// Path below the API base URL.
	pub path: &'static str,
	/// Envelope field names the endpoint answers with.
	pub fields: EnvelopeFields,
}

impl ScreenPreset {
	/// Builds the HTTP endpoint for this screen below `base_url`.
	pub fn endpoint(&self, base_url: &str) -> Result<HttpEndpoint, TransportError> {
		HttpEndpoint::new(self.name, base_url, self.path)
	}
}

/// Uploaded documents list.
pub fn documents() -> ScreenPreset {
	ScreenPreset {
		name: "documents",
		path: "/api/documents",
		fields: EnvelopeFields::default(),
	}
}

/// Student list.
pub fn students() -> ScreenPreset {
	ScreenPreset {
		name: "students",
		path: "/api/students",
		fields: EnvelopeFields::default(),
	}
}

/// Class picker inside the student editor.
///
/// This endpoint answers with the flat envelope (rows under `Data`, count in
/// the top-level `Total`). The default mapping already names both fields and
/// the normalizer accepts either shape, so no override is needed.
pub fn class_picker() -> ScreenPreset {
	ScreenPreset {
		name: "class_picker",
		path: "/api/classes",
		fields: EnvelopeFields::default(),
	}
}

/// Row of the document list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DocumentRow {
	/// Server identifier.
	pub id: i64,
	/// Display title.
	pub title: String,
	/// Name of the stored file.
	#[serde(default)]
	pub file_name: Option<String>,
	/// Upload timestamp as sent by the server.
	#[serde(default)]
	pub uploaded_at: Option<String>,
}

/// Row of the student list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StudentRow {
	/// Server identifier.
	pub id: i64,
	/// First and last name.
	pub full_name: String,
	/// Contact email.
	#[serde(default)]
	pub email: Option<String>,
	/// Contact phone number.
	#[serde(default)]
	pub phone: Option<String>,
	/// Name of the class the student is enrolled in.
	#[serde(default)]
	pub class_name: Option<String>,
}

/// Selectable class in the class picker.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClassOption {
	/// Server identifier.
	pub id: i64,
	/// Display name.
	pub name: String,
	/// Course level, when the class has one.
	#[serde(default)]
	pub level: Option<String>,
}
