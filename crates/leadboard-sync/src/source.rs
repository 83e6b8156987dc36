use crate::Result;
use leadboard_core::SourceTag;
use serde_json::Value;

pub trait PayloadSource {
    fn source_tag(&self) -> SourceTag;
    /// Human-readable location (file path or URL) recorded with cached snapshots.
    fn origin(&self) -> String;
    fn fetch_records(&self) -> Result<Vec<Value>>;
}
