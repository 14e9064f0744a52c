use serde::Serialize;

/// Query parameters for one page request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
	/// 1-based page number.
	pub page_number: usize,
	/// Positive number of rows per page.
	pub page_size: usize,
	/// Free-text filter; `None` requests the unfiltered list.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub search: Option<String>,
}

impl ListParams {
	/// Builds parameters, dropping a blank search term.
	pub fn new(page_number: usize, page_size: usize, search: &str) -> Self {
		let search = search.trim();
		Self {
			page_number,
			page_size,
			search: (!search.is_empty()).then(|| search.to_string()),
		}
	}

	/// Returns the parameters as URL query pairs.
	pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
		let mut pairs = vec![
			("pageNumber", self.page_number.to_string()),
			("pageSize", self.page_size.to_string()),
		];
		if let Some(search) = &self.search {
			pairs.push(("search", search.clone()));
		}
		pairs
	}
}
