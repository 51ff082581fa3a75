use datagrid::paginator::{PageInfo, clamp_page, page_range, page_window, total_pages};

#[test]
fn test_total_pages() {
    assert_eq!(total_pages(25, 10), 3);
    assert_eq!(total_pages(20, 10), 2);
    assert_eq!(total_pages(1, 10), 1);
    assert_eq!(total_pages(0, 10), 0);
    println!("✓ ceil(count / page_size), zero rows means zero pages");
}

#[test]
fn test_last_page_slice_is_exact() {
    assert_eq!(page_range(1, 10, 25), 0..10);
    assert_eq!(page_range(3, 10, 25), 20..25);
    assert_eq!(page_range(3, 10, 25).len(), 5);
}

#[test]
fn test_page_range_past_the_end_is_empty() {
    assert!(page_range(4, 10, 25).is_empty());
    assert!(page_range(1, 10, 0).is_empty());
}

#[test]
fn test_page_window_shows_all_when_few_pages() {
    assert_eq!(page_window(1, 3), vec![1, 2, 3]);
    assert_eq!(page_window(5, 5), vec![1, 2, 3, 4, 5]);
    assert!(page_window(1, 0).is_empty());
}

#[test]
fn test_page_window_pins_to_start_and_end() {
    assert_eq!(page_window(1, 10), vec![1, 2, 3, 4, 5]);
    assert_eq!(page_window(3, 10), vec![1, 2, 3, 4, 5]);
    assert_eq!(page_window(8, 10), vec![6, 7, 8, 9, 10]);
    assert_eq!(page_window(10, 10), vec![6, 7, 8, 9, 10]);
}

#[test]
fn test_page_window_centers_on_current() {
    assert_eq!(page_window(4, 10), vec![2, 3, 4, 5, 6]);
    assert_eq!(page_window(7, 10), vec![5, 6, 7, 8, 9]);
}

#[test]
fn test_clamp_page() {
    assert_eq!(clamp_page(3, 1), 1);
    assert_eq!(clamp_page(3, 0), 1);
    assert_eq!(clamp_page(0, 4), 1);
    assert_eq!(clamp_page(2, 4), 2);
}

#[test]
fn test_page_info_summary() {
    let info = PageInfo::compute(2, 10, 25);
    assert_eq!(info.total_pages, 3);
    assert_eq!(info.range_start, 11);
    assert_eq!(info.range_end, 20);
    assert!(info.has_previous);
    assert!(info.has_next);
    assert!(info.is_visible());

    let last = PageInfo::compute(3, 10, 25);
    assert_eq!((last.range_start, last.range_end), (21, 25));
    assert!(!last.has_next);

    let single = PageInfo::compute(1, 10, 4);
    assert!(!single.is_visible());
    assert!(!single.has_previous);
    assert!(!single.has_next);

    let none = PageInfo::compute(1, 10, 0);
    assert_eq!((none.range_start, none.range_end), (0, 0));
}
