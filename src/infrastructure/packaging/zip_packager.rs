//! In-memory zip packaging

use std::io::{Cursor, Write};
use thiserror::Error;
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::generation::GeneratedArtifact;

#[derive(Error, Debug)]
pub enum PackagingError {
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Nothing to package")]
    Empty,
}

/// Packs every artifact file under a `{name}/` folder in a zip archive
#[derive(Debug, Clone, Default)]
pub struct ZipPackager;

impl ZipPackager {
    pub fn new() -> Self {
        Self
    }

    /// Build the archive bytes
    ///
    /// Entries carry a fixed timestamp so identical input gives identical bytes.
    pub fn package(
        &self,
        folder: &str,
        artifact: &GeneratedArtifact,
    ) -> Result<Vec<u8>, PackagingError> {
        if artifact.is_empty() {
            return Err(PackagingError::Empty);
        }

        let mut buf = Cursor::new(Vec::new());
        {
            let mut zip = ZipWriter::new(&mut buf);
            for file in artifact.files() {
                let options = SimpleFileOptions::default()
                    .compression_method(CompressionMethod::Deflated)
                    .last_modified_time(DateTime::default())
                    .unix_permissions(file.permissions.unwrap_or(0o644));
                let entry = format!("{folder}/{}", file.path.to_string_lossy());
                zip.start_file(entry, options)?;
                zip.write_all(file.content.as_bytes())?;
            }

            zip.finish()?;
        }

        let bytes = buf.into_inner();
        debug!(folder, files = artifact.len(), bytes = bytes.len(), "Packaged archive");
        Ok(bytes)
    }
}
