use super::*;

#[test]
fn test_page_request_clamps_values() {
    assert_eq!(PageRequest::new(0, 0), PageRequest { page: 1, page_size: 1 });
    assert_eq!(
        PageRequest::new(3, 10_000),
        PageRequest {
            page: 3,
            page_size: MAX_PAGE_SIZE
        }
    );
}

#[test]
fn test_page_request_offset() {
    assert_eq!(PageRequest::new(1, 20).offset(), 0);
    assert_eq!(PageRequest::new(2, 20).offset(), 20);
    assert_eq!(PageRequest::new(2, 20).page_index(), 1);
}

#[test]
fn test_page_response_last_page() {
    // 25 items, 10 per page -> 3 pages, page 3 holds the last 5
    let response = PageResponse::new(vec![0; 5], PageRequest::new(3, 10), 25);
    assert_eq!(response.pagination.total_pages, 3);
    assert!(!response.pagination.has_more);
}

#[test]
fn test_page_response_has_more() {
    let response = PageResponse::new(vec![1, 2, 3], PageRequest::new(1, 3), 7);
    assert_eq!(response.transactions, vec![1, 2, 3]);
    assert_eq!(response.pagination.total_count, 7);
    assert_eq!(response.pagination.total_pages, 3);
    assert!(response.pagination.has_more);
}

#[test]
fn test_page_response_empty() {
    let response: PageResponse<i32> = PageResponse::new(vec![], PageRequest::default(), 0);
    assert_eq!(response.pagination.total_pages, 0);
    assert!(!response.pagination.has_more);
}
