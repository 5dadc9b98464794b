//! Client-side page arithmetic for the admin report list.
//!
//! The reports endpoint returns one page and no total, so the total is
//! guessed from the size of the page that came back.

/// Estimated total for a page of `returned` rows requested with `limit`.
///
/// A full page suggests more rows exist, so the count is doubled; a short
/// page is taken at face value. This undercounts deep result sets and is
/// kept until the API reports a real total.
pub fn estimate_total_count(returned: usize, limit: usize) -> usize {
    if limit > 0 && returned >= limit {
        returned * 2
    } else {
        returned
    }
}

/// Number of pages for `total` rows, never less than 1
pub fn total_pages(total: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 1;
    }
    ((total + per_page - 1) / per_page).max(1)
}

/// Zero-based offset for a 1-based page number
pub fn page_offset(page: usize, per_page: usize) -> usize {
    page.saturating_sub(1) * per_page
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_page_doubles_the_estimate() {
        assert_eq!(estimate_total_count(5, 5), 10);
        assert_eq!(estimate_total_count(3, 5), 3);
        assert_eq!(estimate_total_count(0, 5), 0);
    }

    #[test]
    fn pages_round_up_with_a_floor_of_one() {
        assert_eq!(total_pages(10, 5), 2);
        assert_eq!(total_pages(11, 5), 3);
        assert_eq!(total_pages(0, 5), 1);
        assert_eq!(page_offset(1, 5), 0);
        assert_eq!(page_offset(3, 5), 10);
        assert_eq!(page_offset(0, 5), 0);
    }
}
