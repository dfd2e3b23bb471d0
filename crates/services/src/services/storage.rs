//! Local-disk object storage with public URLs.
//!
//! Files live under `{root}/{bucket}/{object_path}` and are served by the
//! HTTP layer under `{public_base_url}/storage/{bucket}/{object_path}`.

use std::path::PathBuf;

use chrono::Utc;
use rand::{Rng, distributions::Alphanumeric};
use thiserror::Error;
use tokio::fs;
use tracing::debug;
use url::Url;
use utils::text::file_extension;

/// Bucket for images (logos, section images, media library uploads).
pub const MEDIA_BUCKET: &str = "media";
/// Bucket for project videos.
pub const VIDEO_BUCKET: &str = "project-videos";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid object path: {0}")]
    InvalidPath(String),
}

#[derive(Clone)]
pub struct StorageService {
    root: PathBuf,
    public_base_url: String,
}

impl StorageService {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        let mut public_base_url = public_base_url.into();
        while public_base_url.ends_with('/') {
            public_base_url.pop();
        }
        Self {
            root: root.into(),
            public_base_url,
        }
    }

    /// Write the object and return its public URL.
    pub async fn upload(
        &self,
        bucket: &str,
        object_path: &str,
        bytes: &[u8],
    ) -> Result<String, StorageError> {
        Self::check_object_path(object_path)?;
        let dest = self.root.join(bucket).join(object_path);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&dest, bytes).await?;
        debug!(bucket, object_path, size = bytes.len(), "stored object");
        Ok(self.public_url(bucket, object_path))
    }

    pub async fn remove(&self, bucket: &str, object_path: &str) -> Result<(), StorageError> {
        Self::check_object_path(object_path)?;
        fs::remove_file(self.root.join(bucket).join(object_path)).await?;
        debug!(bucket, object_path, "removed object");
        Ok(())
    }

    pub fn public_url(&self, bucket: &str, object_path: &str) -> String {
        format!("{}/storage/{}/{}", self.public_base_url, bucket, object_path)
    }

    /// Recover `(bucket, object_path)` from a public URL issued by this
    /// service. Returns `None` for foreign URLs (pasted external links),
    /// which callers treat as "nothing to clean up".
    pub fn derive_object_path(url: &str) -> Option<(String, String)> {
        let parsed = Url::parse(url).ok()?;
        let segments: Vec<&str> = parsed.path_segments()?.collect();
        let storage_at = segments.iter().position(|s| *s == "storage")?;
        let bucket = segments.get(storage_at + 1)?;
        let rest = &segments[storage_at + 2..];
        if bucket.is_empty() || rest.is_empty() {
            return None;
        }
        Some((bucket.to_string(), rest.join("/")))
    }

    /// Object name following the `{category}/{timestamp}-{random}.{ext}`
    /// convention.
    pub fn object_name(category: &str, original_file_name: &str) -> String {
        let ext = file_extension(original_file_name).unwrap_or("bin");
        let timestamp = Utc::now().timestamp_millis();
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(6)
            .map(|b| (b as char).to_ascii_lowercase())
            .collect();
        format!("{category}/{timestamp}-{suffix}.{ext}")
    }

    fn check_object_path(object_path: &str) -> Result<(), StorageError> {
        let valid = !object_path.is_empty()
            && !object_path.starts_with('/')
            && object_path.split('/').all(|seg| !seg.is_empty() && seg != "." && seg != "..");
        if valid {
            Ok(())
        } else {
            Err(StorageError::InvalidPath(object_path.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(root: &std::path::Path) -> StorageService {
        StorageService::new(root, "http://localhost:3001/")
    }

    #[tokio::test]
    async fn upload_returns_servable_url_and_remove_deletes() {
        let dir = tempfile::tempdir().unwrap();
        let storage = service(dir.path());

        let url = storage
            .upload(MEDIA_BUCKET, "uploads/1-abc.png", b"png-bytes")
            .await
            .unwrap();
        assert_eq!(url, "http://localhost:3001/storage/media/uploads/1-abc.png");
        assert!(dir.path().join("media/uploads/1-abc.png").exists());

        storage.remove(MEDIA_BUCKET, "uploads/1-abc.png").await.unwrap();
        assert!(!dir.path().join("media/uploads/1-abc.png").exists());
    }

    #[tokio::test]
    async fn traversal_paths_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let storage = service(dir.path());

        let err = storage
            .upload(MEDIA_BUCKET, "../outside.png", b"x")
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::InvalidPath(_)));

        let err = storage.remove(MEDIA_BUCKET, "/etc/passwd").await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidPath(_)));
    }

    #[test]
    fn derive_object_path_round_trips_own_urls() {
        let storage = StorageService::new("/tmp/unused", "http://localhost:3001");
        let url = storage.public_url(VIDEO_BUCKET, "videos/17-q2w3e4.mp4");
        assert_eq!(
            StorageService::derive_object_path(&url),
            Some(("project-videos".to_string(), "videos/17-q2w3e4.mp4".to_string()))
        );
    }

    #[test]
    fn derive_object_path_ignores_foreign_urls() {
        assert_eq!(
            StorageService::derive_object_path("https://drive.google.com/file/d/abc/view"),
            None
        );
        assert_eq!(StorageService::derive_object_path("not a url"), None);
    }

    #[test]
    fn object_names_follow_convention() {
        let name = StorageService::object_name("uploads", "Hero Shot.PNG");
        let (dir, file) = name.split_once('/').unwrap();
        assert_eq!(dir, "uploads");
        assert!(file.ends_with(".PNG"));
        let stem = file.strip_suffix(".PNG").unwrap();
        let (timestamp, suffix) = stem.split_once('-').unwrap();
        assert!(timestamp.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(suffix.len(), 6);
    }
}
