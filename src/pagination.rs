/// Slice an ordered result set into fixed-size, 1-indexed pages.
///
/// Page 0 (or anything below 1) is treated as page 1. A page past the end
/// yields an empty slice rather than an error.
pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> &[T] {
    let page = page.max(1);
    let start = (page - 1).saturating_mul(per_page);
    if start >= items.len() || per_page == 0 {
        return &[];
    }
    let end = (start + per_page).min(items.len());
    &items[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_takes_the_head() {
        let items: Vec<i32> = (1..=25).collect();
        assert_eq!(paginate(&items, 1, 10), (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn last_page_is_short() {
        let items: Vec<i32> = (1..=25).collect();
        assert_eq!(paginate(&items, 3, 10), (21..=25).collect::<Vec<_>>());
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let items: Vec<i32> = (1..=25).collect();
        assert!(paginate(&items, 4, 10).is_empty());
        assert!(paginate(&items, 100, 10).is_empty());
    }

    #[test]
    fn page_zero_behaves_as_page_one() {
        let items: Vec<i32> = (1..=5).collect();
        assert_eq!(paginate(&items, 0, 10), items.as_slice());
    }

    #[test]
    fn empty_input_yields_empty_page() {
        let items: Vec<i32> = vec![];
        assert!(paginate(&items, 1, 10).is_empty());
    }
}
