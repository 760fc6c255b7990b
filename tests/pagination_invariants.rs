//! Pagination and Ordering Invariant Tests
//!
//! - Consecutive cursor pages reconstruct the full result exactly once
//! - Sorting is stable in both directions
//! - totalCount is the filtered count, independent of the page window

use std::sync::Arc;

use nodequery::executor::{PaginationArgs, QueryArgs, ResultPage};
use nodequery::{EngineConfig, InMemoryNodeStore, Node, PluginFieldRegistry, QueryEngine, SortArgs};
use serde_json::json;

// =============================================================================
// Helper Functions
// =============================================================================

const TOTAL: usize = 23;

/// Items with heavily duplicated sort keys
fn engine() -> QueryEngine {
    let nodes = (0..TOTAL).map(|i| {
        Node::new(
            format!("item-{:02}", i),
            "Item",
            json!({"bucket": i % 4, "odd": i % 2 == 1}),
        )
        .unwrap()
    });
    let store = Arc::new(InMemoryNodeStore::from_nodes(nodes));
    QueryEngine::build(store, EngineConfig::default(), &PluginFieldRegistry::new()).unwrap()
}

fn page(engine: &QueryEngine, args: &QueryArgs) -> ResultPage {
    engine
        .execute("allItem", args, true)
        .unwrap()
        .into_page()
        .unwrap()
}

fn ids(page: &ResultPage) -> Vec<String> {
    page.nodes().map(|n| n.id().to_string()).collect()
}

fn all_ids(engine: &QueryEngine, sort: Option<SortArgs>) -> Vec<String> {
    let mut args = QueryArgs::new();
    args.sort = sort;
    ids(&page(engine, &args))
}

// =============================================================================
// Round trip
// =============================================================================

/// Walking forward with `first`/`after` visits every node once, in order.
#[test]
fn test_forward_round_trip() {
    let engine = engine();
    let sort = SortArgs::desc("bucket");
    let expected = all_ids(&engine, Some(sort.clone()));

    for size in [1, 2, 5, 7, TOTAL, TOTAL + 3] {
        let mut seen = Vec::new();
        let mut after: Option<String> = None;

        loop {
            let mut pagination = PaginationArgs::new().first(size);
            pagination.after = after.clone();
            let args = QueryArgs::new()
                .with_sort(sort.clone())
                .with_pagination(pagination);

            let current = page(&engine, &args);
            assert_eq!(current.total_count, TOTAL);
            seen.extend(ids(&current));

            if !current.page_info.has_next_page {
                break;
            }
            after = current.page_info.end_cursor.clone();
        }

        assert_eq!(seen, expected, "page size {}", size);
    }
}

/// Walking backward with `last`/`before` reconstructs the same sequence.
#[test]
fn test_backward_round_trip() {
    let engine = engine();
    let expected = all_ids(&engine, Some(SortArgs::asc("bucket")));

    let mut seen: Vec<String> = Vec::new();
    let mut before: Option<String> = None;

    loop {
        let mut pagination = PaginationArgs::new().last(4);
        pagination.before = before.clone();
        let args = QueryArgs::new()
            .with_sort(SortArgs::asc("bucket"))
            .with_pagination(pagination);

        let current = page(&engine, &args);
        let mut chunk = ids(&current);
        chunk.extend(seen);
        seen = chunk;

        if !current.page_info.has_previous_page {
            break;
        }
        before = current.page_info.start_cursor.clone();
    }

    assert_eq!(seen, expected);
}

/// Offset pages tile the result the same way cursor pages do.
#[test]
fn test_offset_round_trip() {
    let engine = engine();
    let expected = all_ids(&engine, None);

    let mut seen = Vec::new();
    let mut skip = 0;
    while skip < TOTAL {
        let args = QueryArgs::new().with_pagination(PaginationArgs::new().skip(skip).limit(6));
        seen.extend(ids(&page(&engine, &args)));
        skip += 6;
    }
    assert_eq!(seen, expected);
}

#[test]
fn test_total_count_is_filtered_count() {
    let engine = engine();
    let args = QueryArgs::new()
        .with_filter(json!({"odd": {"eq": true}}))
        .with_pagination(PaginationArgs::new().first(3));

    let current = page(&engine, &args);
    assert_eq!(current.total_count, TOTAL / 2);
    assert_eq!(current.len(), 3);
    assert!(current.page_info.has_next_page);
    assert!(!current.page_info.has_previous_page);
}

// =============================================================================
// Sort stability
// =============================================================================

/// Nodes with equal keys keep their insertion order, ascending or descending.
#[test]
fn test_sort_is_stable_in_both_directions() {
    let engine = engine();
    let insertion = all_ids(&engine, None);

    for sort in [SortArgs::asc("bucket"), SortArgs::desc("bucket")] {
        let sorted = all_ids(&engine, Some(sort));

        for bucket in 0..4 {
            let in_bucket = |id: &String| {
                let n: usize = id.trim_start_matches("item-").parse().unwrap();
                n % 4 == bucket
            };
            let expected: Vec<_> = insertion.iter().filter(|id| in_bucket(*id)).collect();
            let actual: Vec<_> = sorted.iter().filter(|id| in_bucket(*id)).collect();
            assert_eq!(actual, expected);
        }
    }
}

#[test]
fn test_repeated_queries_are_identical() {
    let engine = engine();
    let args = QueryArgs::new()
        .with_sort(SortArgs::desc("odd"))
        .with_pagination(PaginationArgs::new().first(10));

    let first = page(&engine, &args);
    for _ in 0..20 {
        assert_eq!(page(&engine, &args), first);
    }
}
