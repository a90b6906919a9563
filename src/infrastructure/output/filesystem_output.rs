//! Output services writing generated servers to disk or to the archive store

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::application::{ApplicationError, OutputService, PublishedOutput};
use crate::generation::GeneratedArtifact;
use crate::infrastructure::packaging::ZipPackager;
use crate::infrastructure::store::ArchiveStore;

/// Output service that writes files to `{root}/{name}/`
pub struct FileSystemOutputService {
    root: PathBuf,
}

impl FileSystemOutputService {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

async fn ensure_directory(path: &Path) -> Result<(), ApplicationError> {
    fs::create_dir_all(path).await.map_err(|e| {
        ApplicationError::OutputError(format!(
            "Failed to create directory {}: {}",
            path.display(),
            e
        ))
    })
}

async fn write_file(path: &Path, content: &[u8]) -> Result<(), ApplicationError> {
    let mut file = fs::File::create(path).await.map_err(|e| {
        ApplicationError::OutputError(format!("Failed to create file {}: {}", path.display(), e))
    })?;

    file.write_all(content).await.map_err(|e| {
        ApplicationError::OutputError(format!("Failed to write file {}: {}", path.display(), e))
    })?;

    file.flush().await.map_err(|e| {
        ApplicationError::OutputError(format!("Failed to flush file {}: {}", path.display(), e))
    })
}

#[async_trait]
impl OutputService for FileSystemOutputService {
    async fn publish(
        &self,
        name: &str,
        artifact: &GeneratedArtifact,
    ) -> Result<PublishedOutput, ApplicationError> {
        let server_dir = self.root.join(name);

        for file in artifact.files() {
            let path = server_dir.join(&file.path);

            // Create parent directory if needed
            if let Some(parent) = path.parent() {
                ensure_directory(parent).await?;
            }

            write_file(&path, file.content.as_bytes()).await?;

            // Set permissions if specified (Unix only)
            #[cfg(unix)]
            if let Some(mode) = file.permissions {
                use std::os::unix::fs::PermissionsExt;
                let permissions = std::fs::Permissions::from_mode(mode);
                fs::set_permissions(&path, permissions).await.map_err(|e| {
                    ApplicationError::OutputError(format!(
                        "Failed to set permissions on {}: {}",
                        path.display(),
                        e
                    ))
                })?;
            }

            debug!(path = %path.display(), "Wrote file");
        }

        Ok(PublishedOutput::Directory(server_dir))
    }
}

/// Output service that writes a single `{root}/{name}.zip`
pub struct ZipFileOutputService {
    root: PathBuf,
    packager: ZipPackager,
}

impl ZipFileOutputService {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            packager: ZipPackager::new(),
        }
    }
}

#[async_trait]
impl OutputService for ZipFileOutputService {
    async fn publish(
        &self,
        name: &str,
        artifact: &GeneratedArtifact,
    ) -> Result<PublishedOutput, ApplicationError> {
        let bytes = self
            .packager
            .package(name, artifact)
            .map_err(|e| ApplicationError::OutputError(e.to_string()))?;

        ensure_directory(&self.root).await?;
        let path = self.root.join(format!("{name}.zip"));
        write_file(&path, &bytes).await?;

        Ok(PublishedOutput::ZipFile(path))
    }
}

/// Output service that zips in memory and keeps the archive for one download
pub struct ArchiveStoreOutputService {
    store: Arc<ArchiveStore>,
    packager: ZipPackager,
}

impl ArchiveStoreOutputService {
    pub fn new(store: Arc<ArchiveStore>) -> Self {
        Self {
            store,
            packager: ZipPackager::new(),
        }
    }
}

#[async_trait]
impl OutputService for ArchiveStoreOutputService {
    async fn publish(
        &self,
        name: &str,
        artifact: &GeneratedArtifact,
    ) -> Result<PublishedOutput, ApplicationError> {
        let bytes = self
            .packager
            .package(name, artifact)
            .map_err(|e| ApplicationError::OutputError(e.to_string()))?;

        let key = self.store.insert(name, bytes).await;
        Ok(PublishedOutput::Archive { key })
    }
}
