// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Paging of resource results

use super::result::ResultSet;

/// Page size meaning "everything"
pub const DEFAULT_PAGE_SIZE: i32 = i32::MAX;
/// Pages are 1-based
pub const DEFAULT_PAGE: i32 = 1;

/// Cut one page out of a result
///
/// - `page_size <= 0` or `page == 0` yields an empty page
/// - a negative page counts from the end, `-1` being the last page
/// - the raw result count is preserved, falling back to the unpaged size
pub fn sub_result(result: ResultSet, page_size: i32, page: i32) -> ResultSet {
    let size = result.size();
    let raw_count = result.raw_result_count().unwrap_or(size);
    let is_collection = result.is_collection();
    let is_primitive_array = result.is_primitive_array();

    let (from, to) = page_bounds(size, page_size, page);

    let mut results = result.into_results();
    let page_results: Vec<_> = if from < to {
        results.drain(from..to).collect()
    } else {
        Vec::new()
    };

    let mut paged = ResultSet::new(
        page_results,
        Some(raw_count),
        is_collection,
        is_primitive_array,
    );
    paged.set_paging(page_size, page, page_count(raw_count, page_size));
    paged
}

fn page_bounds(size: usize, page_size: i32, page: i32) -> (usize, usize) {
    if page_size <= 0 || page == 0 {
        return (0, 0);
    }

    let size = size as i64;
    let page_size = page_size as i64;
    let page = page as i64;

    let (from, to) = if page > 0 {
        let from = ((page - 1) * page_size).min(size);
        (from, (from + page_size).min(size))
    } else {
        let to = (size - (-page - 1) * page_size).max(0);
        ((to - page_size).max(0), to)
    };

    (from as usize, to as usize)
}

fn page_count(raw_count: usize, page_size: i32) -> usize {
    if page_size <= 0 {
        return 0;
    }
    let page_size = page_size as usize;
    raw_count / page_size + usize::from(raw_count % page_size != 0)
}
