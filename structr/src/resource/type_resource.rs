// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Type resource - lists every object of one entity type

use super::error::{ResourceError, ResourceResult};
use super::paging::sub_result;
use super::result::ResultSet;
use super::traits::Resource;
use crate::security::SecurityContext;
use crate::storage::{GraphObject, GraphStore, Value};
use std::cmp::Ordering;
use std::sync::Arc;

/// Resource bound to an entity type name, e.g. `/Document`
pub struct TypeResource {
    store: Arc<GraphStore>,
    type_name: Option<String>,
}

impl TypeResource {
    /// Unbound resource; `check_and_configure` binds it to a type
    pub fn new(store: Arc<GraphStore>) -> Self {
        Self {
            store,
            type_name: None,
        }
    }

    pub fn for_type(store: Arc<GraphStore>, type_name: impl Into<String>) -> Self {
        Self {
            store,
            type_name: Some(type_name.into()),
        }
    }

    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }
}

impl Resource for TypeResource {
    fn check_and_configure(
        &mut self,
        part: &str,
        _security_context: &SecurityContext,
    ) -> ResourceResult<bool> {
        if self.store.configuration().entity_type(part).is_some() {
            self.type_name = Some(part.to_string());
            return Ok(true);
        }
        Ok(false)
    }

    fn do_get(
        &self,
        sort_key: Option<&str>,
        sort_descending: bool,
        page_size: i32,
        page: i32,
    ) -> ResourceResult<ResultSet> {
        let type_name = self
            .type_name
            .as_deref()
            .ok_or_else(|| ResourceError::IllegalArgument("No type configured".to_string()))?;

        let mut objects = self.store.all_of_type(type_name)?;

        if let Some(key) = sort_key {
            sort_objects(&mut objects, key, sort_descending);
        }

        let size = objects.len();
        let result = ResultSet::new(
            objects,
            Some(size),
            self.is_collection_resource(),
            self.is_primitive_array(),
        );
        Ok(sub_result(result, page_size, page))
    }

    fn resource_signature(&self) -> String {
        self.type_name.clone().unwrap_or_default()
    }
}

/// Stable sort on one property; missing values first, descending reverses
pub fn sort_objects(objects: &mut [GraphObject], key: &str, descending: bool) {
    objects.sort_by(|a, b| {
        let ordering = compare_values(a.get_property(key).as_ref(), b.get_property(key).as_ref());
        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    });
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());

    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            x.partial_cmp(y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Boolean(x)), Some(Value::Boolean(y))) => x.cmp(y),
        (Some(Value::DateTime(x)), Some(Value::DateTime(y))) => x.cmp(y),
        (Some(x), Some(y)) => x.type_name().cmp(y.type_name()),
    }
}
