// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Resource and view transformation traits

use super::error::ResourceResult;
use super::result::ResultSet;
use crate::security::SecurityContext;
use crate::storage::GraphObject;

/// An addressable REST resource
pub trait Resource: Send + Sync {
    /// Try to bind this resource to one URL path segment
    fn check_and_configure(
        &mut self,
        part: &str,
        security_context: &SecurityContext,
    ) -> ResourceResult<bool>;

    /// Read the resource
    fn do_get(
        &self,
        sort_key: Option<&str>,
        sort_descending: bool,
        page_size: i32,
        page: i32,
    ) -> ResourceResult<ResultSet>;

    fn is_collection_resource(&self) -> bool {
        true
    }

    fn is_primitive_array(&self) -> bool {
        false
    }

    /// Stable identifier of what this resource returns
    fn resource_signature(&self) -> String;
}

/// Pluggable post-processing of a resource's results
pub trait ViewTransformation: Send + Sync {
    /// Whether the wrapped resource is read before `apply` runs. When false,
    /// `apply` receives an empty list and fills it itself.
    fn evaluate_wrapped_resource(&self) -> bool {
        true
    }

    /// Transform `objects` in place
    fn apply(
        &self,
        security_context: &SecurityContext,
        objects: &mut Vec<GraphObject>,
    ) -> ResourceResult<()>;
}
