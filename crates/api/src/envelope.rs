/// Field names of a list response envelope.
///
/// Two shapes are in use. The nested one carries the rows and their count
/// inside the data object:
///
/// ```json
/// { "IsSuccess": true, "Message": null,
///   "Data": { "Data": [ ... ], "TotalCount": 25 } }
/// ```
///
/// The flat one puts the rows directly under the data field and the count at
/// the top level:
///
/// ```json
/// { "IsSuccess": true, "Data": [ ... ], "Total": 25 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvelopeFields {
	/// Boolean success flag.
	pub success: &'static str,
	/// Human-readable failure message.
	pub message: &'static str,
	/// Payload field: an array of rows, or an object wrapping one.
	pub data: &'static str,
	/// Rows array inside a nested payload object.
	pub items: &'static str,
	/// Total count inside a nested payload object.
	pub total_count: &'static str,
	/// Total count at the top level of a flat envelope.
	pub total: &'static str,
}

impl Default for EnvelopeFields {
	fn default() -> Self {
		Self {
			success: "IsSuccess",
			message: "Message",
			data: "Data",
			items: "Data",
			total_count: "TotalCount",
			total: "Total",
		}
	}
}
