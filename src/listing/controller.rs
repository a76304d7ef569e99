//! Per-page list controller

use super::field::Record;
use super::pipeline::{compute_visible_page, VisiblePage};
use super::query::{ListQuery, SearchScope};
use crate::config::ListingSettings;
use crate::error::{CoreError, CoreResult};

/// Holds the fixed parts of one list page (searchable columns, page sizes)
/// and runs the pipeline against whatever records the page currently has.
#[derive(Debug, Clone)]
pub struct TabularListController {
    scope: SearchScope,
    default_page_size: usize,
    page_size_options: Vec<usize>,
}

impl TabularListController {
    pub fn new(scope: SearchScope, default_page_size: usize) -> CoreResult<Self> {
        if default_page_size == 0 {
            return Err(CoreError::invalid("default_page_size", "must be > 0"));
        }
        Ok(Self {
            scope,
            default_page_size,
            page_size_options: vec![default_page_size],
        })
    }

    pub fn from_settings(settings: &ListingSettings) -> CoreResult<Self> {
        let mut controller = Self::new(
            SearchScope::from_fields(&settings.search_fields),
            settings.default_page_size,
        )?;
        controller.page_size_options = settings
            .page_size_options
            .iter()
            .copied()
            .filter(|size| *size > 0)
            .collect();
        if !controller.page_size_options.contains(&settings.default_page_size) {
            controller.page_size_options.push(settings.default_page_size);
            controller.page_size_options.sort_unstable();
        }
        Ok(controller)
    }

    /// Override the searchable columns, e.g. for a page that searches by id
    pub fn with_scope(mut self, scope: SearchScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn scope(&self) -> &SearchScope {
        &self.scope
    }

    pub fn page_size_options(&self) -> &[usize] {
        &self.page_size_options
    }

    /// Initial view state for the page
    pub fn initial_query(&self) -> ListQuery {
        ListQuery::new(self.default_page_size)
    }

    /// Apply a rows-per-page change, accepting only offered sizes
    pub fn change_page_size(&self, query: &mut ListQuery, size: usize) -> CoreResult<()> {
        if !self.page_size_options.contains(&size) {
            return Err(CoreError::invalid(
                "page.size",
                format!("{} is not one of {:?}", size, self.page_size_options),
            ));
        }
        query.set_page_size(size)
    }

    pub fn visible_page<'a, R: Record>(&self, records: &'a [R], query: &ListQuery) -> CoreResult<VisiblePage<&'a R>> {
        compute_visible_page(records, query, &self.scope)
    }
}

impl Default for TabularListController {
    fn default() -> Self {
        Self {
            scope: SearchScope::AllFields,
            default_page_size: 10,
            page_size_options: vec![10],
        }
    }
}
