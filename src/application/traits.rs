//! Port interfaces for the application layer

use async_trait::async_trait;
use std::path::PathBuf;

use crate::application::ApplicationError;
use crate::generation::GeneratedArtifact;

/// Where a generated server ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishedOutput {
    /// Files written under this directory
    Directory(PathBuf),
    /// Zip archive written to this path
    ZipFile(PathBuf),
    /// Zip archive held in memory under this download key
    Archive { key: String },
}

/// Service for delivering generated artifacts to their destination
#[async_trait]
pub trait OutputService: Send + Sync {
    /// Publish all files of a generated server
    async fn publish(
        &self,
        name: &str,
        artifact: &GeneratedArtifact,
    ) -> Result<PublishedOutput, ApplicationError>;
}
