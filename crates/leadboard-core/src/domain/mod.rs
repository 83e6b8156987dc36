pub mod client;
pub mod ids;
pub mod lead;
pub mod phone;
pub mod preferences;
pub mod property;
pub mod requirement;
pub mod source;

pub use client::ClientRecord;
pub use ids::SnapshotId;
pub use lead::LeadRecord;
pub use phone::phone_key;
pub use preferences::{Budget, Preferences};
pub use property::{PropertyConfiguration, PropertyRecord};
pub use requirement::RequirementRecord;
pub use source::SourceTag;
