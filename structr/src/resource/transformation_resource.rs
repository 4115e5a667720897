// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Transformation resource
//!
//! Wraps another resource and runs a [`ViewTransformation`] over its results
//! before paging. The transformation decides whether the wrapped resource is
//! read at all; when it is not, the transformation produces the result list
//! on its own.

use super::error::ResourceResult;
use super::paging::{sub_result, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
use super::result::ResultSet;
use super::traits::{Resource, ViewTransformation};
use crate::security::SecurityContext;
use log::warn;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// Resource that post-processes a wrapped resource's results
pub struct TransformationResource {
    security_context: SecurityContext,
    transformation: Option<Arc<dyn ViewTransformation>>,
    wrapped_resource: Option<Box<dyn Resource>>,
}

impl TransformationResource {
    pub fn new(
        security_context: SecurityContext,
        transformation: Option<Arc<dyn ViewTransformation>>,
    ) -> Self {
        Self {
            security_context,
            transformation,
            wrapped_resource: None,
        }
    }

    /// Wrap `resource`, replacing any previously wrapped resource
    pub fn wrap(mut self, resource: Box<dyn Resource>) -> Self {
        self.wrapped_resource = Some(resource);
        self
    }

    pub fn wrapped_resource(&self) -> Option<&dyn Resource> {
        self.wrapped_resource.as_deref()
    }

    fn transform_wrapped(
        &self,
        wrapped: &dyn Resource,
        transformation: &dyn ViewTransformation,
        sort_key: Option<&str>,
        sort_descending: bool,
    ) -> ResourceResult<ResultSet> {
        let mut result =
            wrapped.do_get(sort_key, sort_descending, DEFAULT_PAGE_SIZE, DEFAULT_PAGE)?;

        let outcome = catch_unwind(AssertUnwindSafe(|| {
            transformation.apply(&self.security_context, result.results_mut())
        }));

        match outcome {
            Ok(Ok(())) => {
                let size = result.size();
                result.set_raw_result_count(size);
            }
            Ok(Err(e)) => warn!("View transformation failed: {}", e),
            Err(panic) => warn!(
                "View transformation panicked: {}",
                panic_message(panic.as_ref())
            ),
        }

        Ok(result)
    }

    fn transform_empty(
        &self,
        wrapped: &dyn Resource,
        transformation: &dyn ViewTransformation,
    ) -> ResourceResult<ResultSet> {
        let mut objects = Vec::new();
        transformation.apply(&self.security_context, &mut objects)?;

        let size = objects.len();
        Ok(ResultSet::new(
            objects,
            Some(size),
            wrapped.is_collection_resource(),
            wrapped.is_primitive_array(),
        ))
    }
}

impl Resource for TransformationResource {
    fn check_and_configure(
        &mut self,
        _part: &str,
        _security_context: &SecurityContext,
    ) -> ResourceResult<bool> {
        // only reachable by wrapping
        Ok(false)
    }

    fn do_get(
        &self,
        sort_key: Option<&str>,
        sort_descending: bool,
        page_size: i32,
        page: i32,
    ) -> ResourceResult<ResultSet> {
        let (wrapped, transformation) = match (&self.wrapped_resource, &self.transformation) {
            (Some(wrapped), Some(transformation)) => (wrapped.as_ref(), transformation.as_ref()),
            _ => {
                return Ok(ResultSet::empty(
                    self.is_collection_resource(),
                    self.is_primitive_array(),
                ))
            }
        };

        let result = if transformation.evaluate_wrapped_resource() {
            self.transform_wrapped(wrapped, transformation, sort_key, sort_descending)?
        } else {
            self.transform_empty(wrapped, transformation)?
        };

        Ok(sub_result(result, page_size, page))
    }

    fn is_collection_resource(&self) -> bool {
        self.wrapped_resource
            .as_ref()
            .map(|wrapped| wrapped.is_collection_resource())
            .unwrap_or(false)
    }

    fn is_primitive_array(&self) -> bool {
        self.wrapped_resource
            .as_ref()
            .map(|wrapped| wrapped.is_primitive_array())
            .unwrap_or(false)
    }

    fn resource_signature(&self) -> String {
        self.wrapped_resource
            .as_ref()
            .map(|wrapped| wrapped.resource_signature())
            .unwrap_or_default()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
