//! Common `*.get` options
//!
//! Every Zabbix `get` method accepts the same filtering and sorting options.
//! [`Query`] holds them generically over the entity's field enumeration and is
//! flattened into the method's parameter bundle.

use crate::wire::OneOrMany;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

wire_enum! {
    pub enum SortOrder {
        Asc = "ASC",
        Desc = "DESC",
    }
}

/// Filtering, searching and sorting shared by `get` methods
///
/// - `filter`: exact matches, a value may be a scalar or a list of accepted values
/// - `search`: substring matches (see `start_search` and wildcards)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Query<F> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<BTreeMap<F, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<BTreeMap<F, Value>>,
    #[serde(rename = "searchByAny", skip_serializing_if = "Option::is_none")]
    pub search_by_any: Option<bool>,
    #[serde(rename = "startSearch", skip_serializing_if = "Option::is_none")]
    pub start_search: Option<bool>,
    #[serde(rename = "searchWildcardsEnabled", skip_serializing_if = "Option::is_none")]
    pub search_wildcards_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sortfield: Option<OneOrMany<F>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sortorder: Option<OneOrMany<SortOrder>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl<F> Default for Query<F> {
    fn default() -> Self {
        Self {
            filter: None,
            search: None,
            search_by_any: None,
            start_search: None,
            search_wildcards_enabled: None,
            sortfield: None,
            sortorder: None,
            limit: None,
        }
    }
}

impl<F: Ord> Query<F> {
    /// Add an exact-match condition
    pub fn filter(mut self, field: F, value: impl Into<Value>) -> Self {
        self.filter
            .get_or_insert_with(BTreeMap::new)
            .insert(field, value.into());
        self
    }

    /// Add a substring-match condition
    pub fn search(mut self, field: F, value: impl Into<Value>) -> Self {
        self.search
            .get_or_insert_with(BTreeMap::new)
            .insert(field, value.into());
        self
    }

    /// Match when any search condition holds instead of all
    pub fn search_by_any(mut self, enabled: bool) -> Self {
        self.search_by_any = Some(enabled);
        self
    }

    /// Search for prefixes instead of substrings
    pub fn start_search(mut self, enabled: bool) -> Self {
        self.start_search = Some(enabled);
        self
    }

    /// Interpret `*` in search values as a wildcard
    pub fn search_wildcards_enabled(mut self, enabled: bool) -> Self {
        self.search_wildcards_enabled = Some(enabled);
        self
    }

    pub fn sort_by(mut self, field: impl Into<OneOrMany<F>>, order: SortOrder) -> Self {
        self.sortfield = Some(field.into());
        self.sortorder = Some(order.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}
