pub mod error;
pub mod file;
pub mod http;
pub mod payload;
pub mod source;

pub use error::{Result, SyncError};
pub use file::FileSource;
pub use http::HttpSource;
pub use payload::parse_payload;
pub use source::PayloadSource;
