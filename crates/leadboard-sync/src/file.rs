use crate::payload::parse_payload;
use crate::source::PayloadSource;
use crate::Result;
use leadboard_core::SourceTag;
use serde_json::Value;
use std::fs;
use std::io::Read;
use std::path::PathBuf;

/// Reads a JSON export from disk. `-` reads standard input.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    source: SourceTag,
}

impl FileSource {
    pub fn new(path: PathBuf, source: SourceTag) -> Self {
        Self { path, source }
    }
}

impl PayloadSource for FileSource {
    fn source_tag(&self) -> SourceTag {
        self.source
    }

    fn origin(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch_records(&self) -> Result<Vec<Value>> {
        let body = if self.path.as_os_str() == "-" {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        } else {
            fs::read_to_string(&self.path)?
        };
        parse_payload(&body)
    }
}
