//! Search, categorical filters, sort order and page slicing over a
//! reconciled client snapshot. Every computation reads the snapshot and
//! returns a fresh page; nothing is cached between calls.

mod query;
mod view;

pub use query::{ClientQuery, SiteVisitFilter, SortOrder, ViewerContext};
pub use view::{
    collate, filter_clients, matches_query, paginate, sort_clients, visible_to, ListView, Page,
    DEFAULT_PAGE_SIZE,
};
