/// One page of a longer list
#[derive(Debug)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// 1-based
    pub page: usize,
    pub total_pages: usize,
}

impl<'a, T> Page<'a, T> {
    /// 1-based index of the first item on this page within the whole list
    pub fn first_index(&self, items_per_page: usize) -> usize {
        (self.page - 1) * items_per_page + 1
    }
}

/// Slice `items` into the requested 1-based page.
/// An empty list has a single empty page.
pub fn paginate<T>(items: &[T], page_num: usize, items_per_page: usize) -> Result<Page<'_, T>, String> {
    let items_per_page = items_per_page.max(1);
    let total_pages = ((items.len() + items_per_page - 1) / items_per_page).max(1);

    if page_num < 1 || page_num > total_pages {
        return Err(format!(
            "Invalid page number. This list has {} page(s)",
            total_pages
        ));
    }

    let start = (page_num - 1) * items_per_page;
    let end = std::cmp::min(start + items_per_page, items.len());

    Ok(Page {
        items: &items[start..end],
        page: page_num,
        total_pages,
    })
}
