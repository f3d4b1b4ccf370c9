use std::num::NonZeroUsize;

use property_dashboard::domain::staff::StaffMember;
use property_dashboard::pagination::{ListQueryState, paginate};

mod common;

fn staff() -> Vec<StaffMember> {
    serde_json::from_value(common::staff_fixture()).unwrap()
}

fn ids(items: &[&StaffMember]) -> Vec<i64> {
    items.iter().map(|s| s.id.get()).collect()
}

#[test]
fn test_pipeline_is_deterministic() {
    let staff = staff();
    let mut state = ListQueryState::default();
    state.set_search_text("guard");
    state.set_filter("status", "active");
    state.set_page(2);

    assert_eq!(paginate(&staff, &state), paginate(&staff, &state));
}

#[test]
fn test_blank_search_without_filters_keeps_every_row() {
    let staff = staff();
    let mut state = ListQueryState::new(NonZeroUsize::new(100).unwrap());
    state.set_search_text("   \t");
    state.set_filter("department", "all");

    let page = paginate(&staff, &state);
    assert_eq!(page.total_items, 25);
    assert_eq!(ids(&page.items), (1..=25).collect::<Vec<_>>());
}

#[test]
fn test_search_or_filter_change_resets_page() {
    let mut state = ListQueryState::default();
    state.set_page(3);
    state.set_search_text("secur");
    assert_eq!(state.current_page(), 1);

    state.set_page(2);
    state.set_filter("status", "active");
    assert_eq!(state.current_page(), 1);

    state.set_page(2);
    state.set_filter("status", "all");
    assert_eq!(state.current_page(), 1);
}

#[test]
fn test_pagination_math() {
    let staff = staff();
    let mut state = ListQueryState::default();

    state.set_search_text("nobody matches this");
    for page in [1, 4] {
        state.set_page(page);
        let empty = paginate(&staff, &state);
        assert_eq!(empty.total_items, 0);
        assert_eq!(empty.total_pages, 0);
        assert!(empty.items.is_empty());
    }

    let twenty_three = &staff[..23];
    let mut state = ListQueryState::default();
    let sizes: Vec<usize> = (1..=3)
        .map(|page| {
            state.set_page(page);
            let page = paginate(twenty_three, &state);
            assert_eq!(page.total_pages, 3);
            page.items.len()
        })
        .collect();
    assert_eq!(sizes, vec![10, 10, 3]);
}

#[test]
fn test_categorical_filters_are_anded() {
    let staff = staff();
    let mut state = ListQueryState::new(NonZeroUsize::new(50).unwrap());
    state.set_filter("department", "Security");
    state.set_filter("status", "on_leave");

    let page = paginate(&staff, &state);
    assert_eq!(ids(&page.items), vec![5, 10, 15, 20]);
    assert!(
        page.items
            .iter()
            .all(|s| s.department == "Security" && s.status.as_str() == "on_leave")
    );
}

#[test]
fn test_search_across_role_and_department_second_page() {
    let staff = staff();
    let mut state = ListQueryState::default();
    state.set_search_text("secur");
    state.set_page(2);

    let page = paginate(&staff, &state);
    assert_eq!(page.total_items, 23);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.current_page, 2);
    assert_eq!(ids(&page.items), (11..=20).collect::<Vec<_>>());

    state.set_page(3);
    let last = paginate(&staff, &state);
    assert_eq!(ids(&last.items), vec![21, 22, 23]);
}

#[test]
fn test_search_matches_role_name_alone() {
    let staff = staff();
    let mut state = ListQueryState::default();
    state.set_search_text("LIAISON");

    let page = paginate(&staff, &state);
    assert_eq!(ids(&page.items), vec![23]);
    assert_eq!(page.items[0].department, "Facilities");
}
