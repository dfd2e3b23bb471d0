//! Upload validation policy and media-library orchestration.
//!
//! Validation runs before any storage or database call: files that fail
//! the MIME or size checks never leave the process.

use db::models::media_asset::{CreateMediaAsset, MediaAsset};
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::warn;

use super::storage::{MEDIA_BUCKET, StorageError, StorageService, VIDEO_BUCKET};

pub const MAX_IMAGE_BYTES: u64 = 2 * 1024 * 1024;
pub const MAX_VIDEO_BYTES: u64 = 100 * 1024 * 1024;

/// Accepted video container types (MP4, WebM, MOV, AVI).
pub const VIDEO_MIME_TYPES: &[&str] = &[
    "video/mp4",
    "video/webm",
    "video/quicktime",
    "video/x-msvideo",
];

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("unsupported file type: {0}")]
    UnsupportedType(String),
    #[error("file too large: {size} bytes (limit {limit})")]
    TooLarge { size: u64, limit: u64 },
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Image,
    Video,
}

impl UploadKind {
    pub fn bucket(self) -> &'static str {
        match self {
            Self::Image => MEDIA_BUCKET,
            Self::Video => VIDEO_BUCKET,
        }
    }

    pub fn max_bytes(self) -> u64 {
        match self {
            Self::Image => MAX_IMAGE_BYTES,
            Self::Video => MAX_VIDEO_BYTES,
        }
    }

    pub fn validate(self, content_type: &str, size: u64) -> Result<(), UploadError> {
        let type_ok = match self {
            Self::Image => content_type.starts_with("image/"),
            Self::Video => VIDEO_MIME_TYPES.contains(&content_type),
        };
        if !type_ok {
            return Err(UploadError::UnsupportedType(content_type.to_string()));
        }
        if size > self.max_bytes() {
            return Err(UploadError::TooLarge {
                size,
                limit: self.max_bytes(),
            });
        }
        Ok(())
    }
}

#[derive(Clone)]
pub struct MediaService {
    storage: StorageService,
}

impl MediaService {
    pub fn new(storage: StorageService) -> Self {
        Self { storage }
    }

    /// Validate, store, and register a media-library image. Returns the
    /// created asset record.
    pub async fn store_library_file(
        &self,
        pool: &SqlitePool,
        file_name: &str,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> Result<MediaAsset, UploadError> {
        let content_type = resolved_content_type(content_type, file_name);
        UploadKind::Image.validate(&content_type, bytes.len() as u64)?;

        let object = StorageService::object_name("uploads", file_name);
        let url = self.storage.upload(MEDIA_BUCKET, &object, bytes).await?;

        let asset = MediaAsset::create(
            pool,
            &CreateMediaAsset {
                file_name: file_name.to_string(),
                file_path: url,
                file_type: content_type,
                file_size: bytes.len() as i64,
            },
        )
        .await?;
        Ok(asset)
    }

    /// Validate and store an image outside the library (client logos,
    /// section images). Returns the public URL for the owning record's
    /// image field.
    pub async fn store_image(
        &self,
        category: &str,
        file_name: &str,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> Result<String, UploadError> {
        let content_type = resolved_content_type(content_type, file_name);
        UploadKind::Image.validate(&content_type, bytes.len() as u64)?;
        let object = StorageService::object_name(category, file_name);
        Ok(self.storage.upload(MEDIA_BUCKET, &object, bytes).await?)
    }

    /// Validate and store a project video. Returns the public URL for the
    /// project's `video_url` field.
    pub async fn store_video(
        &self,
        file_name: &str,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> Result<String, UploadError> {
        let content_type = resolved_content_type(content_type, file_name);
        UploadKind::Video.validate(&content_type, bytes.len() as u64)?;
        let object = StorageService::object_name("videos", file_name);
        Ok(self.storage.upload(VIDEO_BUCKET, &object, bytes).await?)
    }

    /// Best-effort removal of the file behind a stored URL. Foreign URLs
    /// and storage failures are logged and swallowed; the caller's record
    /// mutation proceeds either way.
    pub async fn remove_by_url(&self, url: &str) {
        let Some((bucket, object_path)) = StorageService::derive_object_path(url) else {
            return;
        };
        if let Err(e) = self.storage.remove(&bucket, &object_path).await {
            warn!(url, error = %e, "failed to remove storage object");
        }
    }
}

fn resolved_content_type(content_type: Option<&str>, file_name: &str) -> String {
    match content_type {
        Some(ct) if !ct.is_empty() => ct.to_string(),
        _ => mime_guess::from_path(file_name)
            .first_raw()
            .unwrap_or("application/octet-stream")
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use db::DBService;

    #[test]
    fn oversized_logo_is_rejected() {
        let err = UploadKind::Image
            .validate("image/png", MAX_IMAGE_BYTES + 1)
            .unwrap_err();
        assert!(matches!(err, UploadError::TooLarge { limit, .. } if limit == MAX_IMAGE_BYTES));
    }

    #[test]
    fn oversized_video_is_rejected() {
        let err = UploadKind::Video
            .validate("video/mp4", MAX_VIDEO_BYTES + 1)
            .unwrap_err();
        assert!(matches!(err, UploadError::TooLarge { .. }));
    }

    #[test]
    fn wrong_mime_types_are_rejected() {
        assert!(matches!(
            UploadKind::Image.validate("application/pdf", 10).unwrap_err(),
            UploadError::UnsupportedType(_)
        ));
        assert!(matches!(
            UploadKind::Video.validate("video/x-matroska", 10).unwrap_err(),
            UploadError::UnsupportedType(_)
        ));
    }

    #[test]
    fn whitelisted_video_types_pass() {
        for mime in VIDEO_MIME_TYPES {
            UploadKind::Video.validate(mime, 1024).unwrap();
        }
    }

    #[tokio::test]
    async fn invalid_library_upload_touches_neither_disk_nor_db() {
        let dir = tempfile::tempdir().unwrap();
        let db = DBService::new_in_memory().await.unwrap();
        let media = MediaService::new(StorageService::new(dir.path(), "http://localhost:3001"));

        let err = media
            .store_library_file(&db.pool, "report.pdf", Some("application/pdf"), b"%PDF")
            .await
            .unwrap_err();
        assert!(matches!(err, UploadError::UnsupportedType(_)));

        // No object written, no asset row inserted.
        assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
        assert_eq!(MediaAsset::count(&db.pool).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn library_upload_stores_file_and_record() {
        let dir = tempfile::tempdir().unwrap();
        let db = DBService::new_in_memory().await.unwrap();
        let media = MediaService::new(StorageService::new(dir.path(), "http://localhost:3001"));

        let asset = media
            .store_library_file(&db.pool, "lobby.jpg", Some("image/jpeg"), b"jpeg-bytes")
            .await
            .unwrap();

        assert_eq!(asset.file_name, "lobby.jpg");
        assert_eq!(asset.file_type, "image/jpeg");
        assert_eq!(asset.file_size, 10);
        assert!(asset.file_path.starts_with("http://localhost:3001/storage/media/uploads/"));

        let (bucket, object_path) =
            StorageService::derive_object_path(&asset.file_path).unwrap();
        assert_eq!(bucket, "media");
        assert!(dir.path().join(&bucket).join(&object_path).exists());

        media.remove_by_url(&asset.file_path).await;
        assert!(!dir.path().join(&bucket).join(&object_path).exists());
    }

    #[test]
    fn content_type_falls_back_to_extension() {
        assert_eq!(resolved_content_type(None, "photo.png"), "image/png");
        assert_eq!(
            resolved_content_type(Some("image/webp"), "photo.png"),
            "image/webp"
        );
        assert_eq!(resolved_content_type(None, "blob"), "application/octet-stream");
    }
}
