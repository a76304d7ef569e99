//! Filter / search / sort / paginate pipeline shared by the admin list pages

mod controller;
mod field;
mod pipeline;
mod query;

pub use controller::TabularListController;
pub use field::{compare_optional, FieldValue, Record};
pub use pipeline::{apply_filters, apply_search, apply_sort, compute_visible_page, paginate, VisiblePage};
pub use query::{FilterValue, ListQuery, PageRequest, SearchScope, SortDirection, SortSpec};
