use crate::error::StoreError;
use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use std::io;

/// Object storage for rendered reports, addressed by bucket and key.
pub trait ReportStore: Send + Sync {
    /// Succeeds when `bucket` exists; a missing bucket is [`StoreError::BucketNotFound`].
    fn head_bucket(&self, bucket: &str) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn create_bucket(&self, bucket: &str) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn put_object(&self, bucket: &str, key: &str, body: &str) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn get_object(&self, bucket: &str, key: &str) -> impl Future<Output = Result<String, StoreError>> + Send;
}

impl<R: ReportStore> ReportStore for &R {
    fn head_bucket(&self, bucket: &str) -> impl Future<Output = Result<(), StoreError>> + Send {
        (**self).head_bucket(bucket)
    }

    fn create_bucket(&self, bucket: &str) -> impl Future<Output = Result<(), StoreError>> + Send {
        (**self).create_bucket(bucket)
    }

    fn put_object(&self, bucket: &str, key: &str, body: &str) -> impl Future<Output = Result<(), StoreError>> + Send {
        (**self).put_object(bucket, key, body)
    }

    fn get_object(&self, bucket: &str, key: &str) -> impl Future<Output = Result<String, StoreError>> + Send {
        (**self).get_object(bucket, key)
    }
}

/// A report store where buckets are directories and objects are files.
///
/// Keys may contain `/` separators and map onto nested directories inside the bucket.
#[derive(Debug, Clone)]
pub struct FsReportStore {
    root: Utf8PathBuf,
}

impl FsReportStore {
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn bucket_path(&self, bucket: &str) -> Result<Utf8PathBuf, StoreError> {
        if bucket.is_empty() || bucket.contains(['/', '\\']) || bucket == "." || bucket == ".." {
            return Err(StoreError::backend(format!("invalid bucket name '{bucket}'")));
        }

        Ok(self.root.join(bucket))
    }

    fn object_path(&self, bucket: &str, key: &str) -> Result<Utf8PathBuf, StoreError> {
        let relative = Utf8Path::new(key);
        let plain = !key.is_empty() && relative.components().all(|c| matches!(c, Utf8Component::Normal(_)));
        if !plain {
            return Err(StoreError::backend(format!("invalid object key '{key}'")));
        }

        Ok(self.bucket_path(bucket)?.join(relative))
    }

    async fn require_bucket(&self, bucket: &str) -> Result<Utf8PathBuf, StoreError> {
        let path = self.bucket_path(bucket)?;
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_dir() => Ok(path),
            Ok(_) => Err(StoreError::BucketNotFound(bucket.to_string())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(StoreError::BucketNotFound(bucket.to_string())),
            Err(e) => Err(io_failure(&e, &path)),
        }
    }
}

impl ReportStore for FsReportStore {
    async fn head_bucket(&self, bucket: &str) -> Result<(), StoreError> {
        let _ = self.require_bucket(bucket).await?;
        Ok(())
    }

    async fn create_bucket(&self, bucket: &str) -> Result<(), StoreError> {
        let path = self.bucket_path(bucket)?;
        tokio::fs::create_dir_all(&path).await.map_err(|e| io_failure(&e, &path))?;
        log::debug!("created bucket directory '{path}'");
        Ok(())
    }

    async fn put_object(&self, bucket: &str, key: &str, body: &str) -> Result<(), StoreError> {
        let path = self.object_path(bucket, key)?;
        let _ = self.require_bucket(bucket).await?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| io_failure(&e, parent))?;
        }

        tokio::fs::write(&path, body).await.map_err(|e| io_failure(&e, &path))?;
        log::debug!("wrote {} byte(s) to '{path}'", body.len());
        Ok(())
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<String, StoreError> {
        let path = self.object_path(bucket, key)?;
        let _ = self.require_bucket(bucket).await?;

        match tokio::fs::read_to_string(&path).await {
            Ok(body) => Ok(body),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(StoreError::ObjectNotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            }),
            Err(e) => Err(io_failure(&e, &path)),
        }
    }
}

fn io_failure(err: &io::Error, path: &Utf8Path) -> StoreError {
    match err.kind() {
        io::ErrorKind::PermissionDenied => StoreError::PermissionDenied(format!("'{path}': {err}")),
        io::ErrorKind::TimedOut => StoreError::Timeout(format!("'{path}': {err}")),
        _ => StoreError::backend(format!("'{path}': {err}")),
    }
}
