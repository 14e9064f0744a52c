//! End-to-end list flows through the public API, using the screen presets'
//! envelope mappings and row types.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use scola_api::screens::{self, ClassOption, StudentRow};
use scola_api::{JsonValue, ListEndpoint, ListParams, TransportError};
use scola_list::{EntryRange, FetchStatus, ListConfig, ListController, ListEvent, PageSize, PageSlot};
use serde_json::json;

/// In-memory student directory answering with the nested envelope.
struct StudentDirectory {
	names: Vec<String>,
	calls: Mutex<Vec<ListParams>>,
}

impl StudentDirectory {
	fn new(names: impl IntoIterator<Item = String>) -> Arc<Self> {
		Arc::new(Self {
			names: names.into_iter().collect(),
			calls: Mutex::new(Vec::new()),
		})
	}

	fn last_call(&self) -> Option<ListParams> {
		self.calls.lock().unwrap().last().cloned()
	}
}

#[async_trait]
impl ListEndpoint for StudentDirectory {
	fn name(&self) -> &str {
		"students"
	}

	async fn fetch(&self, params: &ListParams) -> Result<JsonValue, TransportError> {
		self.calls.lock().unwrap().push(params.clone());
		let needle = params.search.as_deref().unwrap_or("").to_lowercase();
		let matching: Vec<(usize, &String)> = self
			.names
			.iter()
			.enumerate()
			.filter(|(_, name)| name.to_lowercase().contains(&needle))
			.collect();
		let rows: Vec<JsonValue> = matching
			.iter()
			.skip((params.page_number - 1) * params.page_size)
			.take(params.page_size)
			.map(|(id, name)| json!({ "Id": id, "FullName": name, "ClassName": "A2" }))
			.collect();
		Ok(json!({
			"IsSuccess": true,
			"Message": null,
			"Data": { "Data": rows, "TotalCount": matching.len() },
		}))
	}
}

/// Class list answering with the flat envelope.
struct ClassList;

#[async_trait]
impl ListEndpoint for ClassList {
	fn name(&self) -> &str {
		"class_picker"
	}

	async fn fetch(&self, _params: &ListParams) -> Result<JsonValue, TransportError> {
		Ok(json!({
			"IsSuccess": true,
			"Data": [
				{ "Id": 1, "Name": "A1 Morning", "Level": "A1" },
				{ "Id": 2, "Name": "B2 Evening" },
				{ "Id": "broken" },
			],
			"Total": 3,
		}))
	}
}

async fn settle<R: serde::de::DeserializeOwned>(list: &mut ListController<R>) -> Vec<ListEvent> {
	let mut events = Vec::new();
	tokio::time::timeout(Duration::from_secs(2), async {
		loop {
			events.extend(list.tick(Instant::now()));
			if list.results().status() != FetchStatus::Loading {
				return;
			}
			tokio::time::sleep(Duration::from_millis(5)).await;
		}
	})
	.await
	.expect("list settled");
	events
}

#[tokio::test]
async fn searching_and_paging_students() {
	let _ = tracing_subscriber::fmt::try_init();
	let names = (0..25)
		.map(|i| format!("Abdul {i}"))
		.chain((0..40).map(|i| format!("Mina {i}")));
	let directory = StudentDirectory::new(names);
	let mut list: ListController<StudentRow> = ListController::new(
		directory.clone(),
		screens::students().fields,
		ListConfig::default(),
	)
	.expect("valid config");

	list.start();
	settle(&mut list).await;
	assert_eq!(list.results().total_count(), 65);
	assert_eq!(list.total_pages(), 7);

	let t0 = Instant::now();
	list.set_search("abdul", t0);
	let events = list.tick(t0 + Duration::from_millis(500));
	assert!(matches!(&events[..], [ListEvent::QuerySettled { .. }]));
	settle(&mut list).await;

	list.set_page(2).expect("second page");
	settle(&mut list).await;

	assert_eq!(directory.last_call(), Some(ListParams::new(2, 10, "abdul")));
	assert_eq!(list.results().total_count(), 25);
	assert_eq!(list.total_pages(), 3);
	assert_eq!(list.entry_range(), EntryRange { start: 11, end: 20, total: 25 });
	assert_eq!(list.entry_range().to_string(), "11–20 of 25");
	assert_eq!(
		list.page_window().to_vec(),
		vec![PageSlot::Page(1), PageSlot::Page(2), PageSlot::Page(3)]
	);
	assert_eq!(list.items()[0].full_name, "Abdul 10");
	assert_eq!(list.items()[0].class_name.as_deref(), Some("A2"));

	list.set_page_size(PageSize::All).expect("all allowed");
	settle(&mut list).await;
	assert_eq!(list.page_state().page_number(), 1);
	assert_eq!(list.items().len(), 25);
	assert_eq!(list.entry_range().to_string(), "1–25 of 25");
}

#[tokio::test]
async fn class_picker_reads_flat_envelope() {
	let _ = tracing_subscriber::fmt::try_init();
	let mut list: ListController<ClassOption> =
		ListController::new(Arc::new(ClassList), screens::class_picker().fields, ListConfig::default())
			.expect("valid config");

	list.start();
	settle(&mut list).await;

	let names: Vec<&str> = list.items().iter().map(|c| c.name.as_str()).collect();
	assert_eq!(names, vec!["A1 Morning", "B2 Evening"]);
	assert_eq!(list.results().total_count(), 3);
	assert_eq!(list.results().status(), FetchStatus::Success);
}

#[tokio::test]
async fn config_file_drives_controller_defaults() {
	let config = ListConfig::from_toml_str(
		r#"
debounce_ms = 250
page_sizes = [20, 40]
default_page_size = 20
window_radius = 1
"#,
	)
	.expect("valid config");

	let directory = StudentDirectory::new((0..100).map(|i| format!("Student {i}")));
	let mut list: ListController<StudentRow> =
		ListController::new(directory.clone(), screens::students().fields, config).expect("valid config");
	list.start();
	settle(&mut list).await;
	list.set_page(3);
	settle(&mut list).await;

	assert_eq!(directory.last_call(), Some(ListParams::new(3, 20, "")));
	assert_eq!(
		list.page_window().to_vec(),
		vec![PageSlot::Page(1), PageSlot::Page(2), PageSlot::Page(3), PageSlot::Page(4), PageSlot::Page(5)]
	);

	let t0 = Instant::now();
	list.set_search("7", t0);
	assert!(list.tick(t0 + Duration::from_millis(249)).is_empty());
	assert_eq!(list.tick(t0 + Duration::from_millis(250)).len(), 1);
}
