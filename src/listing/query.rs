//! Declarative view state of a list page

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};

/// Equality constraint on one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FilterValue {
    /// No constraint ("all" or empty in the page's dropdowns)
    All,
    Equals(String),
}

impl FilterValue {
    pub fn is_all(&self) -> bool {
        matches!(self, FilterValue::All)
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        if s.is_empty() || s == "all" {
            FilterValue::All
        } else {
            FilterValue::Equals(s.to_string())
        }
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        if s.is_empty() || s == "all" {
            FilterValue::All
        } else {
            FilterValue::Equals(s)
        }
    }
}

impl From<FilterValue> for String {
    fn from(value: FilterValue) -> Self {
        match value {
            FilterValue::All => "all".to_string(),
            FilterValue::Equals(s) => s,
        }
    }
}

/// Which fields the search box looks at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchScope {
    Fields(Vec<String>),
    AllFields,
}

impl SearchScope {
    /// An empty field list means every field
    pub fn from_fields(fields: &[String]) -> Self {
        if fields.is_empty() {
            SearchScope::AllFields
        } else {
            SearchScope::Fields(fields.to_vec())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        Self { field: field.into(), direction: SortDirection::Asc }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self { field: field.into(), direction: SortDirection::Desc }
    }
}

/// Parses `field`, `field:asc` or `field:desc`
impl FromStr for SortSpec {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, direction) = match s.rsplit_once(':') {
            Some((field, "asc")) => (field, SortDirection::Asc),
            Some((field, "desc")) => (field, SortDirection::Desc),
            Some((_, other)) => {
                return Err(CoreError::invalid(
                    "sort",
                    format!("direction must be asc or desc, got '{}'", other),
                ))
            }
            None => (s, SortDirection::Asc),
        };
        if field.is_empty() {
            return Err(CoreError::invalid("sort", "field name is empty"));
        }
        Ok(Self { field: field.to_string(), direction })
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dir = match self.direction {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        };
        write!(f, "{}:{}", self.field, dir)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// 0-based page number
    pub index: usize,
    pub size: usize,
}

impl PageRequest {
    pub fn new(index: usize, size: usize) -> Self {
        Self { index, size }
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.size == 0 {
            return Err(CoreError::invalid("page.size", "must be > 0"));
        }
        Ok(())
    }

    /// First record offset of this page, saturating on absurd indices
    pub fn offset(&self) -> usize {
        self.index.saturating_mul(self.size)
    }
}

/// Everything a list page's controls feed into the pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(default)]
    pub filters: BTreeMap<String, FilterValue>,
    #[serde(default)]
    pub search_text: String,
    #[serde(default)]
    pub sort: Option<SortSpec>,
    pub page: PageRequest,
}

impl ListQuery {
    /// First page, no filters, no search, insertion order
    pub fn new(page_size: usize) -> Self {
        Self {
            filters: BTreeMap::new(),
            search_text: String::new(),
            sort: None,
            page: PageRequest::new(0, page_size),
        }
    }

    pub fn set_page(&mut self, index: usize) {
        self.page.index = index;
    }

    /// Changing rows-per-page returns to the first page
    pub fn set_page_size(&mut self, size: usize) -> CoreResult<()> {
        PageRequest::new(0, size).validate()?;
        self.page = PageRequest::new(0, size);
        Ok(())
    }

    /// New search text returns to the first page
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.page.index = 0;
    }

    /// New filter value returns to the first page
    pub fn set_filter(&mut self, field: impl Into<String>, value: impl Into<FilterValue>) {
        self.filters.insert(field.into(), value.into());
        self.page.index = 0;
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.page.index = 0;
    }

    pub fn set_sort(&mut self, sort: Option<SortSpec>) {
        self.sort = sort;
    }

    /// Active (non-"all") filters
    pub fn active_filters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.filters.iter().filter_map(|(field, value)| match value {
            FilterValue::All => None,
            FilterValue::Equals(v) => Some((field.as_str(), v.as_str())),
        })
    }
}
