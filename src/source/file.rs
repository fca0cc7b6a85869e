// File source: a snapshot document on disk, re-read on every fetch

use super::{SnapshotDocument, SourceError};
use std::path::{Path, PathBuf};

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn fetch(&self) -> Result<SnapshotDocument, SourceError> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| SourceError::Io {
                path: self.path.clone(),
                message: e.to_string(),
            })?;
        SnapshotDocument::from_json(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_reads_snapshot_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"notifications": [{{"id": "n1", "title": "Hi", "status": "unread", "sent_at": "2026-10-01T08:00:00Z"}}]}}"#
        )
        .unwrap();

        let doc = FileSource::new(file.path().to_path_buf()).fetch().await.unwrap();
        assert_eq!(doc.notifications.len(), 1);
        assert!(doc.submissions.is_empty());
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path().join("missing.json"));

        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
    }
}
