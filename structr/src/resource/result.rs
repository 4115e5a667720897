// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Resource results

use crate::storage::GraphObject;
use serde::Serialize;

/// Objects returned by a resource, with paging metadata
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResultSet {
    #[serde(rename = "result")]
    results: Vec<GraphObject>,
    /// Size before paging; `None` when unknown
    #[serde(rename = "result_count")]
    raw_result_count: Option<usize>,
    #[serde(skip)]
    is_collection: bool,
    #[serde(skip)]
    is_primitive_array: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    page_size: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    page_count: Option<usize>,
}

impl ResultSet {
    pub fn new(
        results: Vec<GraphObject>,
        raw_result_count: Option<usize>,
        is_collection: bool,
        is_primitive_array: bool,
    ) -> Self {
        Self {
            results,
            raw_result_count,
            is_collection,
            is_primitive_array,
            page_size: None,
            page: None,
            page_count: None,
        }
    }

    /// Empty result without a raw count
    pub fn empty(is_collection: bool, is_primitive_array: bool) -> Self {
        Self::new(Vec::new(), None, is_collection, is_primitive_array)
    }

    pub fn results(&self) -> &[GraphObject] {
        &self.results
    }

    pub fn results_mut(&mut self) -> &mut Vec<GraphObject> {
        &mut self.results
    }

    pub fn into_results(self) -> Vec<GraphObject> {
        self.results
    }

    pub fn size(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn raw_result_count(&self) -> Option<usize> {
        self.raw_result_count
    }

    pub fn set_raw_result_count(&mut self, count: usize) {
        self.raw_result_count = Some(count);
    }

    pub fn is_collection(&self) -> bool {
        self.is_collection
    }

    pub fn is_primitive_array(&self) -> bool {
        self.is_primitive_array
    }

    pub fn page_size(&self) -> Option<i32> {
        self.page_size
    }

    pub fn page(&self) -> Option<i32> {
        self.page
    }

    pub fn page_count(&self) -> Option<usize> {
        self.page_count
    }

    pub(crate) fn set_paging(&mut self, page_size: i32, page: i32, page_count: usize) {
        self.page_size = Some(page_size);
        self.page = Some(page);
        self.page_count = Some(page_count);
    }

    /// JSON document in the REST response layout
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
