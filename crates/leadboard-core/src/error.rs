use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid page size: {0}")]
    InvalidPageSize(usize),
    #[error("invalid page number: {0}")]
    InvalidPage(usize),
    #[error("invalid sort order: {0}")]
    InvalidSortOrder(String),
    #[error("invalid site visit selector: {0}")]
    InvalidSiteVisitFilter(String),
    #[error("invalid source tag: {0}")]
    InvalidSourceTag(String),
    #[error("invalid field name: {0}")]
    InvalidField(String),
    #[error("alias list for {0} cannot be empty")]
    EmptyAliasList(String),
    #[error("invalid workload policy: {0}")]
    InvalidWorkloadPolicy(String),
}
