use crate::domain::ClientRecord;
use crate::error::CoreError;
use crate::pipeline::query::{ClientQuery, SiteVisitFilter, SortOrder, ViewerContext};
use serde::Serialize;
use std::cmp::Ordering;

pub const DEFAULT_PAGE_SIZE: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
    pub page_count: usize,
}

pub fn visible_to<'r>(records: &'r [ClientRecord], ctx: &ViewerContext) -> Vec<&'r ClientRecord> {
    match ctx {
        ViewerContext::Admin => records.iter().collect(),
        ViewerContext::Agent(agent) => records
            .iter()
            .filter(|client| {
                client
                    .assigned_agent
                    .as_deref()
                    .is_some_and(|assigned| assigned.trim().eq_ignore_ascii_case(agent.trim()))
            })
            .collect(),
    }
}

pub fn matches_query(client: &ClientRecord, query: &ClientQuery) -> bool {
    let term = query.search.trim().to_lowercase();
    if !term.is_empty()
        && !client
            .searchable_fields()
            .iter()
            .any(|value| value.to_lowercase().contains(&term))
    {
        return false;
    }

    if let Some(priority) = query.priority.as_deref().map(str::trim) {
        if !priority.is_empty()
            && !client
                .priority
                .as_deref()
                .is_some_and(|value| value.trim().eq_ignore_ascii_case(priority))
        {
            return false;
        }
    }

    match query.site_visit {
        SiteVisitFilter::Any => true,
        SiteVisitFilter::Scheduled => client.has_site_visit(),
        SiteVisitFilter::NotScheduled => !client.has_site_visit(),
    }
}

pub fn filter_clients<'r>(
    records: impl IntoIterator<Item = &'r ClientRecord>,
    query: &ClientQuery,
) -> Vec<&'r ClientRecord> {
    records
        .into_iter()
        .filter(|client| matches_query(client, query))
        .collect()
}

/// Stable: clients with equal keys keep their incoming order.
pub fn sort_clients(items: &mut [&ClientRecord], order: SortOrder) {
    match order {
        // `None < Some`, so clients never contacted sort as the oldest.
        SortOrder::DateDesc => items.sort_by(|a, b| b.last_contact.cmp(&a.last_contact)),
        SortOrder::DateAsc => items.sort_by(|a, b| a.last_contact.cmp(&b.last_contact)),
        SortOrder::NameAsc => items.sort_by(|a, b| collate(&a.name, &b.name)),
        SortOrder::NameDesc => items.sort_by(|a, b| collate(&b.name, &a.name)),
    }
}

/// Case-insensitive first, then code point order so "amy" and "Amy" still
/// have a fixed relative position.
pub fn collate(left: &str, right: &str) -> Ordering {
    left.to_lowercase()
        .cmp(&right.to_lowercase())
        .then_with(|| left.cmp(right))
}

/// 1-based page slice. Page 0 or a page past the end yields no items.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let total = items.len();
    let page_count = if page_size == 0 {
        0
    } else {
        total.div_ceil(page_size)
    };
    let start = page.saturating_sub(1).saturating_mul(page_size);
    let slice = if page == 0 || page_size == 0 || start >= total {
        Vec::new()
    } else {
        items[start..(start + page_size).min(total)].to_vec()
    };

    Page {
        items: slice,
        page,
        page_size,
        total,
        page_count,
    }
}

/// Query state behind one list screen.
///
/// Changing the search term, the priority filter or the site-visit filter
/// moves the viewer back to page 1; sorting and paging do not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    query: ClientQuery,
    page: usize,
    page_size: usize,
}

impl Default for ListView {
    fn default() -> Self {
        Self {
            query: ClientQuery::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ListView {
    pub fn new(page_size: usize) -> Result<Self, CoreError> {
        if page_size == 0 {
            return Err(CoreError::InvalidPageSize(page_size));
        }
        Ok(Self {
            page_size,
            ..Self::default()
        })
    }

    pub fn query(&self) -> &ClientQuery {
        &self.query
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.query.search = term.into();
        self.reset_page();
    }

    pub fn set_priority(&mut self, priority: Option<String>) {
        self.query.priority = priority;
        self.reset_page();
    }

    pub fn set_site_visit(&mut self, filter: SiteVisitFilter) {
        self.query.site_visit = filter;
        self.reset_page();
    }

    pub fn set_sort(&mut self, sort: SortOrder) {
        self.query.sort = sort;
    }

    pub fn set_page(&mut self, page: usize) -> Result<(), CoreError> {
        if page == 0 {
            return Err(CoreError::InvalidPage(page));
        }
        self.page = page;
        Ok(())
    }

    pub fn compute<'r>(
        &self,
        records: &'r [ClientRecord],
        ctx: &ViewerContext,
    ) -> Page<&'r ClientRecord> {
        let mut filtered = filter_clients(visible_to(records, ctx), &self.query);
        sort_clients(&mut filtered, self.query.sort);
        paginate(&filtered, self.page, self.page_size)
    }

    fn reset_page(&mut self) {
        self.page = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::{collate, paginate, ListView};
    use crate::pipeline::query::{SiteVisitFilter, SortOrder};
    use std::cmp::Ordering;

    #[test]
    fn paginate_counts_pages() {
        let items: Vec<u32> = (1..=25).collect();
        let page = paginate(&items, 3, 12);
        assert_eq!(page.items, vec![25]);
        assert_eq!(page.total, 25);
        assert_eq!(page.page_count, 3);
    }

    #[test]
    fn paginate_out_of_range_is_empty() {
        let items: Vec<u32> = (1..=5).collect();
        assert!(paginate(&items, 2, 12).items.is_empty());
        assert!(paginate(&items, 0, 12).items.is_empty());
        assert_eq!(paginate::<u32>(&[], 1, 12).page_count, 0);
    }

    #[test]
    fn filter_changes_reset_page() {
        let mut view = ListView::new(12).expect("view");
        view.set_page(3).expect("page");
        view.set_search("bob");
        assert_eq!(view.page(), 1);

        view.set_page(3).expect("page");
        view.set_priority(Some("hot".to_string()));
        assert_eq!(view.page(), 1);

        view.set_page(3).expect("page");
        view.set_site_visit(SiteVisitFilter::Scheduled);
        assert_eq!(view.page(), 1);
    }

    #[test]
    fn sort_change_keeps_page() {
        let mut view = ListView::default();
        view.set_page(2).expect("page");
        view.set_sort(SortOrder::NameAsc);
        assert_eq!(view.page(), 2);
    }

    #[test]
    fn invalid_page_inputs_are_rejected() {
        assert!(ListView::new(0).is_err());
        assert!(ListView::default().set_page(0).is_err());
    }

    #[test]
    fn collate_ignores_case_first() {
        assert_eq!(collate("amy", "Bob"), Ordering::Less);
        assert_eq!(collate("Amy", "amy"), Ordering::Less);
    }
}
