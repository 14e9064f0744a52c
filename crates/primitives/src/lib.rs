//! Value types shared by paginated list controllers: page size selection,
//! page position, and the derived "showing X–Y of N" range.

/// Page position and page arithmetic.
pub mod page;
/// Page size selection.
pub mod page_size;

pub use page::{EntryRange, PageState, total_pages};
pub use page_size::{PageSize, ParsePageSizeError};
