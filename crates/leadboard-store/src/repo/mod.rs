pub mod snapshots;

pub use snapshots::{Snapshot, SnapshotMeta, SnapshotsRepo};
