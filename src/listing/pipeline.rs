//! The list pipeline: filter, then search, then sort, then paginate.
//!
//! Every stage works on borrowed records and keeps the relative order of
//! whatever it passes through, except sort, which reorders stably.

use serde::Serialize;
use std::collections::BTreeMap;

use super::field::{compare_optional, Record};
use super::query::{FilterValue, ListQuery, PageRequest, SearchScope, SortDirection, SortSpec};
use crate::error::CoreResult;

/// The page of records to display plus the match count before pagination
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisiblePage<T> {
    pub records: Vec<T>,
    pub total_matched: usize,
}

impl<T> VisiblePage<T> {
    /// Pages needed to show every match at `page_size` rows per page
    pub fn page_count(&self, page_size: usize) -> usize {
        if page_size == 0 {
            return 0;
        }
        self.total_matched.div_ceil(page_size)
    }
}

impl<'a, R: Clone> VisiblePage<&'a R> {
    pub fn cloned(&self) -> VisiblePage<R> {
        VisiblePage {
            records: self.records.iter().map(|r| (*r).clone()).collect(),
            total_matched: self.total_matched,
        }
    }
}

/// Keep records whose fields equal every active filter.
///
/// A filter on a field the record does not have never matches.
pub fn apply_filters<'a, R, I>(records: I, filters: &BTreeMap<String, FilterValue>) -> Vec<&'a R>
where
    R: Record + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let active: Vec<(&str, &str)> = filters
        .iter()
        .filter_map(|(field, value)| match value {
            FilterValue::All => None,
            FilterValue::Equals(v) => Some((field.as_str(), v.as_str())),
        })
        .collect();

    records
        .into_iter()
        .filter(|record| {
            active.iter().all(|(field, expected)| {
                record
                    .field(field)
                    .map(|value| value.to_text() == *expected)
                    .unwrap_or(false)
            })
        })
        .collect()
}

/// Keep records where any searched field contains `search_text`, ignoring case
pub fn apply_search<'a, R, I>(records: I, search_text: &str, scope: &SearchScope) -> Vec<&'a R>
where
    R: Record + 'a,
    I: IntoIterator<Item = &'a R>,
{
    if search_text.is_empty() {
        return records.into_iter().collect();
    }
    let needle = search_text.to_lowercase();

    records
        .into_iter()
        .filter(|record| match scope {
            SearchScope::Fields(fields) => fields.iter().any(|name| {
                record
                    .field(name)
                    .map(|value| value.to_text().to_lowercase().contains(&needle))
                    .unwrap_or(false)
            }),
            SearchScope::AllFields => record
                .field_values()
                .iter()
                .any(|value| value.to_text().to_lowercase().contains(&needle)),
        })
        .collect()
}

/// Stable sort on one field; no spec leaves the order untouched
pub fn apply_sort<'a, R: Record>(records: Vec<&'a R>, sort: Option<&SortSpec>) -> Vec<&'a R> {
    let Some(spec) = sort else {
        return records;
    };

    let mut keyed: Vec<_> = records
        .into_iter()
        .map(|record| (record.field(&spec.field), record))
        .collect();

    // slice::sort_by is stable, so ties keep their incoming order in both directions
    keyed.sort_by(|(a, _), (b, _)| {
        let ord = compare_optional(a.as_ref(), b.as_ref());
        match spec.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });

    keyed.into_iter().map(|(_, record)| record).collect()
}

/// Slice out one page. Pages past the end are empty.
pub fn paginate<T: Clone>(records: &[T], page: PageRequest) -> VisiblePage<T> {
    let total_matched = records.len();
    let start = page.offset().min(total_matched);
    let end = start.saturating_add(page.size).min(total_matched);

    VisiblePage {
        records: records[start..end].to_vec(),
        total_matched,
    }
}

/// Run the whole pipeline for one list page
pub fn compute_visible_page<'a, R: Record>(
    records: &'a [R],
    query: &ListQuery,
    scope: &SearchScope,
) -> CoreResult<VisiblePage<&'a R>> {
    query.page.validate()?;

    let filtered = apply_filters(records, &query.filters);
    let searched = apply_search(filtered, &query.search_text, scope);
    let sorted = apply_sort(searched, query.sort.as_ref());
    let page = paginate(&sorted, query.page);

    log::trace!(
        "list page {}x{}: {} of {} records matched",
        query.page.index,
        query.page.size,
        page.total_matched,
        records.len()
    );
    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use serde_json::{json, Value};

    fn status_records() -> Vec<Value> {
        vec![
            json!({ "id": 1, "status": "active" }),
            json!({ "id": 2, "status": "inactive" }),
            json!({ "id": 3, "status": "active" }),
        ]
    }

    fn users() -> Vec<Value> {
        vec![
            json!({ "id": "u1", "username": "Annabel", "email": "a@desk.io", "status": "active", "balance": 120 }),
            json!({ "id": "u2", "username": "bob", "email": "bob@ANN.example", "status": "banned", "balance": 40 }),
            json!({ "id": "u3", "username": "carol", "email": "carol@desk.io", "status": "active", "balance": 120 }),
            json!({ "id": "u4", "username": "dave", "email": "dave@desk.io", "status": "inactive" }),
        ]
    }

    fn ids<R: Record>(records: &[&R]) -> Vec<String> {
        records.iter().map(|r| r.id().into_owned()).collect()
    }

    fn name_scope() -> SearchScope {
        SearchScope::Fields(vec!["username".into(), "email".into()])
    }

    #[test]
    fn test_filter_by_status() {
        let records = status_records();
        let mut query = ListQuery::new(10);
        query.set_filter("status", "active");

        let page = compute_visible_page(&records, &query, &SearchScope::AllFields).unwrap();
        assert_eq!(ids(&page.records), vec!["1", "3"]);
        assert_eq!(page.total_matched, 2);
    }

    #[test]
    fn test_second_single_row_page() {
        let records = status_records();
        let mut query = ListQuery::new(1);
        query.set_page(1);

        let page = compute_visible_page(&records, &query, &SearchScope::AllFields).unwrap();
        assert_eq!(ids(&page.records), vec!["2"]);
        assert_eq!(page.total_matched, 3);
    }

    #[test]
    fn test_all_filters_are_noops() {
        let records = users();
        let mut filters = BTreeMap::new();
        filters.insert("status".to_string(), FilterValue::All);
        filters.insert("role".to_string(), FilterValue::from(""));
        assert_eq!(apply_filters(&records, &filters).len(), records.len());
    }

    #[test]
    fn test_unknown_filter_field_fails() {
        let records = users();
        let mut filters = BTreeMap::new();
        filters.insert("tier".to_string(), FilterValue::from("gold"));
        assert!(apply_filters(&records, &filters).is_empty());
    }

    #[test]
    fn test_numeric_filter_matches_text_form() {
        let records = users();
        let mut filters = BTreeMap::new();
        filters.insert("balance".to_string(), FilterValue::from("120"));
        assert_eq!(ids(&apply_filters(&records, &filters)), vec!["u1", "u3"]);
    }

    #[test]
    fn test_search_any_configured_field() {
        let records = users();
        let found = apply_search(&records, "ANN", &name_scope());
        // username "Annabel" and email "bob@ANN.example"
        assert_eq!(ids(&found), vec!["u1", "u2"]);

        let by_status = apply_search(&records, "banned", &name_scope());
        assert!(by_status.is_empty());
        let everywhere = apply_search(&records, "banned", &SearchScope::AllFields);
        assert_eq!(ids(&everywhere), vec!["u2"]);
    }

    #[test]
    fn test_empty_search_is_noop() {
        let records = users();
        assert_eq!(apply_search(&records, "", &name_scope()).len(), 4);
    }

    #[test]
    fn test_sort_is_stable() {
        let records = users();
        let refs: Vec<&Value> = records.iter().collect();

        let asc = apply_sort(refs.clone(), Some(&SortSpec::asc("balance")));
        // missing balance first, then 40, then the two 120s in original order
        assert_eq!(ids(&asc), vec!["u4", "u2", "u1", "u3"]);

        let desc = apply_sort(refs.clone(), Some(&SortSpec::desc("balance")));
        assert_eq!(ids(&desc), vec!["u1", "u3", "u2", "u4"]);

        let untouched = apply_sort(refs, None);
        assert_eq!(ids(&untouched), vec!["u1", "u2", "u3", "u4"]);
    }

    #[test]
    fn test_sort_applies_before_paging() {
        let records = users();
        let mut query = ListQuery::new(2);
        query.set_sort(Some(SortSpec::asc("username")));
        query.set_page(1);

        let page = compute_visible_page(&records, &query, &name_scope()).unwrap();
        // "Annabel" < "bob" < "carol" < "dave" (uppercase sorts first)
        assert_eq!(ids(&page.records), vec!["u3", "u4"]);
        assert_eq!(page.total_matched, 4);
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let records = users();
        let mut query = ListQuery::new(10);
        query.set_page(1);
        let page = compute_visible_page(&records, &query, &name_scope()).unwrap();
        assert!(page.records.is_empty());
        assert_eq!(page.total_matched, 4);

        query.set_page(usize::MAX);
        let page = compute_visible_page(&records, &query, &name_scope()).unwrap();
        assert!(page.records.is_empty());
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let records = users();
        let query = ListQuery {
            page: PageRequest::new(0, 0),
            ..ListQuery::new(10)
        };
        assert!(matches!(
            compute_visible_page(&records, &query, &name_scope()),
            Err(CoreError::InvalidArgument { name: "page.size", .. })
        ));
    }

    #[test]
    fn test_page_count() {
        let page: VisiblePage<u8> = VisiblePage { records: vec![], total_matched: 21 };
        assert_eq!(page.page_count(10), 3);
        assert_eq!(page.page_count(0), 0);
        let empty: VisiblePage<u8> = VisiblePage { records: vec![], total_matched: 0 };
        assert_eq!(empty.page_count(10), 0);
    }
}
