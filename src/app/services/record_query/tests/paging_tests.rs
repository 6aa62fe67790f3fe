//! Tests for paging preconditions and metadata

use crate::app::services::record_query::paging::*;
use crate::constants::{MAX_PAGE_SIZE, MAX_SKIP_COUNT};
use crate::error::ErrorKind;
use chrono::{Duration, Utc};

fn create_query(skip_count: i64, max_result_count: i64) -> RecordsQuery {
    let now = Utc::now();
    RecordsQuery {
        resource_id: "EQ-001".to_string(),
        start_time: now - Duration::days(1),
        end_time: now,
        sorting: None,
        skip_count,
        max_result_count,
    }
}

#[test]
fn test_valid_query_passes() {
    assert!(create_query(0, 20).validate().is_ok());
    assert!(create_query(40, 1000).validate().is_ok());
}

#[test]
fn test_query_preconditions_are_bad_requests() {
    let mut blank = create_query(0, 20);
    blank.resource_id = "  ".to_string();

    let mut inverted = create_query(0, 20);
    std::mem::swap(&mut inverted.start_time, &mut inverted.end_time);

    for query in [
        blank,
        inverted,
        create_query(-1, 20),
        create_query(0, 0),
        create_query(0, 1001),
    ] {
        let err = query.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadRequest, "{:?}", query);
    }
}

#[test]
fn test_skip_count_is_capped() {
    assert!(create_query(MAX_SKIP_COUNT, 1000).validate().is_ok());

    let err = create_query(i64::MAX, 1).validate().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BadRequest);
    assert!(err.message().contains("SkipCount"));
}

#[test]
fn test_extreme_skip_metadata_does_not_overflow() {
    let page = PagedRecords::new(vec![0], 1, i64::MAX, 1);
    assert_eq!(page.current_page, i64::MAX);
    assert_eq!(page.total_pages, 1);
    assert!(page.has_previous_page);
    assert!(!page.has_next_page);

    let page = PagedRecords::new(Vec::<i32>::new(), i64::MAX, 0, MAX_PAGE_SIZE);
    assert_eq!(page.total_pages, i64::MAX / MAX_PAGE_SIZE + 1);
}

#[test]
fn test_equal_start_and_end_is_allowed() {
    let mut query = create_query(0, 20);
    query.end_time = query.start_time;
    assert!(query.validate().is_ok());
}

#[test]
fn test_first_page_metadata() {
    let page = PagedRecords::new(vec![0; 10], 25, 0, 10);
    assert_eq!(page.current_page, 1);
    assert_eq!(page.total_pages, 3);
    assert!(!page.has_previous_page);
    assert!(page.has_next_page);
}

#[test]
fn test_last_page_metadata() {
    let page = PagedRecords::new(vec![0; 5], 25, 20, 10);
    assert_eq!(page.current_page, 3);
    assert_eq!(page.total_pages, 3);
    assert!(page.has_previous_page);
    assert!(!page.has_next_page);
}

#[test]
fn test_skip_past_end_yields_empty_page() {
    let items: Vec<i32> = (0..5).collect();
    assert!(paginate(items.clone(), 10, 10).is_empty());
    assert_eq!(paginate(items, 3, 10), vec![3, 4]);
}

#[test]
fn test_page_serializes_camel_case() {
    let page = PagedRecords::new(vec!["x"], 1, 0, 20);
    let json = serde_json::to_value(&page).unwrap();
    assert_eq!(json["totalCount"], 1);
    assert_eq!(json["maxResultCount"], 20);
    assert_eq!(json["hasNextPage"], false);
    assert_eq!(json["data"][0], "x");
}
