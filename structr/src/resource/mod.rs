// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! REST resources
//!
//! A resource resolves one URL path segment and returns a paged
//! [`ResultSet`]. Resources can wrap each other; the
//! [`TransformationResource`] runs a [`ViewTransformation`] over the results
//! of the resource it wraps.

pub mod error;
pub mod paging;
pub mod result;
pub mod traits;
pub mod transformation_resource;
pub mod type_resource;

pub use error::{ResourceError, ResourceResult};
pub use paging::{sub_result, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
pub use result::ResultSet;
pub use traits::{Resource, ViewTransformation};
pub use transformation_resource::TransformationResource;
pub use type_resource::{sort_objects, TypeResource};
