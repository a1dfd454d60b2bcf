use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::presigning::PresigningConfig;

use crate::error::{AppError, AppResult};

/// At most this many images are signed per property, so a long gallery
/// cannot stall the fan-out on the storage service
pub const MAX_SIGNED_IMAGES: usize = 5;

/// Generates time-limited access URLs for stored images.
///
/// Injected at bootstrap rather than held as module state so the S3 client
/// lifecycle is owned by the process and tests can swap in a stub.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlSigner: Send + Sync {
    async fn sign(&self, image_key: &str) -> AppResult<String>;
}

/// S3 presigned-GET implementation
pub struct S3UrlSigner {
    client: aws_sdk_s3::Client,
    bucket: String,
    ttl: Duration,
}

impl S3UrlSigner {
    pub fn new(client: aws_sdk_s3::Client, bucket: String, ttl: Duration) -> Self {
        Self {
            client,
            bucket,
            ttl,
        }
    }
}

#[async_trait]
impl UrlSigner for S3UrlSigner {
    async fn sign(&self, image_key: &str) -> AppResult<String> {
        let config = PresigningConfig::expires_in(self.ttl)
            .map_err(|e| AppError::Storage(format!("Invalid presigning config: {}", e)))?;

        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(image_key)
            .presigned(config)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to presign {}: {}", image_key, e)))?;

        Ok(presigned.uri().to_string())
    }
}

/// Signs the given keys concurrently, preserving order.
///
/// Degrades to an empty list if any key fails to sign: callers treat the
/// result as a neutral fallback value, never as partial output.
pub async fn sign_images(signer: Arc<dyn UrlSigner>, image_keys: Vec<String>) -> Vec<String> {
    if image_keys.is_empty() {
        return Vec::new();
    }

    let mut tasks = Vec::with_capacity(image_keys.len());
    for key in image_keys {
        let signer = signer.clone();
        tasks.push(tokio::spawn(async move { signer.sign(&key).await }));
    }

    let mut urls = Vec::with_capacity(tasks.len());
    for task in tasks {
        match task.await {
            Ok(Ok(url)) => urls.push(url),
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Image URL signing failed");
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!(error = %e, "Image signing task failed");
                return Vec::new();
            }
        }
    }

    urls
}
