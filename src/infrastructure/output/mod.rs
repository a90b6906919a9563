//! Output service implementations

pub mod filesystem_output;

pub use filesystem_output::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{OutputService, PublishedOutput};
    use crate::generation::{Artifact, GeneratedArtifact};
    use crate::infrastructure::store::ArchiveStore;
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::TempDir;

    fn artifact() -> GeneratedArtifact {
        let mut artifact = GeneratedArtifact::new();
        artifact
            .insert(Artifact::new("server.py", "print('hello')\n").executable())
            .unwrap();
        artifact
            .insert(Artifact::new("requirements.txt", "mcp>=1.0.0\n"))
            .unwrap();
        artifact
    }

    #[tokio::test]
    async fn test_filesystem_output_writes_under_server_dir() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let output_service = FileSystemOutputService::new(temp_dir.path().join("out"));

        let published = output_service.publish("echo-server", &artifact()).await.unwrap();

        let server_dir = temp_dir.path().join("out/echo-server");
        assert_eq!(published, PublishedOutput::Directory(server_dir.clone()));

        let content = std::fs::read_to_string(server_dir.join("server.py"))
            .expect("Failed to read server.py");
        assert_eq!(content, "print('hello')\n");
        assert!(server_dir.join("requirements.txt").exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_filesystem_output_with_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let output_service = FileSystemOutputService::new(temp_dir.path());
        output_service.publish("perm", &artifact()).await.unwrap();

        let metadata = std::fs::metadata(temp_dir.path().join("perm/server.py"))
            .expect("Failed to get metadata");
        assert_eq!(metadata.permissions().mode() & 0o777, 0o755);
    }

    #[tokio::test]
    async fn test_zip_file_output() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let output_service = ZipFileOutputService::new(temp_dir.path());

        let published = output_service.publish("echo-server", &artifact()).await.unwrap();
        let path = temp_dir.path().join("echo-server.zip");
        assert_eq!(published, PublishedOutput::ZipFile(path.clone()));

        let bytes = std::fs::read(&path).unwrap();
        let archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 2);
    }

    #[tokio::test]
    async fn test_archive_store_output() {
        let store = Arc::new(ArchiveStore::new(Duration::from_secs(60)));
        let output_service = ArchiveStoreOutputService::new(store.clone());

        let published = output_service.publish("echo-server", &artifact()).await.unwrap();
        let PublishedOutput::Archive { key } = published else {
            panic!("Expected Archive output");
        };

        let stored = store.take(&key).await.unwrap();
        assert_eq!(stored.download_name, "echo-server.zip");
        assert!(!stored.bytes.is_empty());
    }
}
