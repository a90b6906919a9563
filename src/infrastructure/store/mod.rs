//! Short-lived storage for generated archives awaiting download

pub mod archive_store;

pub use archive_store::{ArchiveStore, StoreError, StoredArchive};
