pub mod compare;
pub mod domain;
pub mod dto;
pub mod error;
pub mod fields;
pub mod pipeline;
pub mod possession;
pub mod price;
pub mod reconcile;
pub mod rules;
pub mod time;

pub use domain::*;
pub use dto::*;
pub use error::CoreError;
pub use fields::{AliasTable, Field, RawRecord};
pub use pipeline::{ClientQuery, ListView, Page, SiteVisitFilter, SortOrder, ViewerContext};
pub use possession::{classify_possession, normalize_possession, Possession, TimelineBucket};
pub use reconcile::{IdRule, Reconciled, Reconciler, SourceBatch};
pub use rules::*;
