use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;

use crate::catalogue::application::ports::outgoing::{ObjectStorage, ObjectStorageError};
use crate::catalogue::domain::codec::effective_mime_type;

pub const DEFAULT_BUCKET: &str = "cv-files";

const DEFAULT_SIGNED_URL_TTL: Duration = Duration::from_secs(15 * 60);

/// google-cloud-storage uses a bucket resource name format:
/// `projects/_/buckets/{bucket}`
fn bucket_resource(bucket: &str) -> String {
    format!("projects/_/buckets/{}", bucket)
}

fn public_url(bucket: &str, object_name: &str) -> String {
    format!("https://storage.googleapis.com/{}/{}", bucket, object_name)
}

fn map_storage_error(msg: &str) -> ObjectStorageError {
    let m = msg.to_lowercase();

    if m.contains("412") || m.contains("precondition") {
        ObjectStorageError::AlreadyExists
    } else if m.contains("404") || m.contains("not found") || m.contains("no such object") {
        ObjectStorageError::NotFound
    } else if m.contains("permission") || m.contains("forbidden") || m.contains("denied") {
        ObjectStorageError::AccessDenied
    } else {
        ObjectStorageError::Unavailable(msg.to_string())
    }
}

/// Internal seam to make the adapter testable without mocking google-cloud-storage types/streams.
#[async_trait]
trait GcsClient: Send + Sync {
    async fn upload_object(
        &self,
        bucket_resource: &str,
        object_name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), String>;

    async fn delete_object(&self, bucket_resource: &str, object_name: &str) -> Result<(), String>;

    async fn download_object_bytes(
        &self,
        bucket_resource: &str,
        object_name: &str,
    ) -> Result<Vec<u8>, String>;

    /// `Ok(None)` when no signing credentials are available.
    async fn sign_get_url(
        &self,
        bucket_resource: &str,
        object_name: &str,
        ttl: Duration,
    ) -> Result<Option<String>, String>;
}

#[cfg(test)]
struct ArcGcsClient(Arc<dyn GcsClient>);

#[cfg(test)]
#[async_trait]
impl GcsClient for ArcGcsClient {
    async fn upload_object(
        &self,
        bucket_resource: &str,
        object_name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), String> {
        self.0
            .upload_object(bucket_resource, object_name, bytes, content_type)
            .await
    }

    async fn delete_object(&self, bucket_resource: &str, object_name: &str) -> Result<(), String> {
        self.0.delete_object(bucket_resource, object_name).await
    }

    async fn download_object_bytes(
        &self,
        bucket_resource: &str,
        object_name: &str,
    ) -> Result<Vec<u8>, String> {
        self.0.download_object_bytes(bucket_resource, object_name).await
    }

    async fn sign_get_url(
        &self,
        bucket_resource: &str,
        object_name: &str,
        ttl: Duration,
    ) -> Result<Option<String>, String> {
        self.0.sign_get_url(bucket_resource, object_name, ttl).await
    }
}

/// Production adapter: implements the ObjectStorage port on one GCS bucket.
#[derive(Clone)]
pub struct GcsObjectStorage {
    client: Arc<OnceCell<Box<dyn GcsClient>>>,
    bucket: String,
    signed_url_ttl: Duration,
}

impl GcsObjectStorage {
    /// Synchronous constructor - client is initialized lazily on first use.
    pub fn new(bucket: impl Into<String>, signed_url_ttl: Option<Duration>) -> Self {
        Self {
            client: Arc::new(OnceCell::new()),
            bucket: bucket.into(),
            signed_url_ttl: signed_url_ttl.unwrap_or(DEFAULT_SIGNED_URL_TTL),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn get_client(&self) -> Result<&dyn GcsClient, ObjectStorageError> {
        self.client
            .get_or_try_init(|| async {
                let real_client = RealGcsClient::new().await?;
                Ok::<_, Box<dyn std::error::Error + Send + Sync>>(
                    Box::new(real_client) as Box<dyn GcsClient>
                )
            })
            .await
            .map(|boxed| &**boxed)
            .map_err(|e| ObjectStorageError::Unavailable(format!("GCS client: {}", e)))
    }

    #[cfg(test)]
    fn with_client(client: Arc<dyn GcsClient>, bucket: &str, signed_url_ttl: Duration) -> Self {
        let once = OnceCell::new();
        let _ = once.set(Box::new(ArcGcsClient(client)) as Box<dyn GcsClient>);

        Self {
            client: Arc::new(once),
            bucket: bucket.to_string(),
            signed_url_ttl,
        }
    }
}

#[async_trait]
impl ObjectStorage for GcsObjectStorage {
    async fn put_object(
        &self,
        object_name: &str,
        bytes: Vec<u8>,
        mime_type: &str,
    ) -> Result<String, ObjectStorageError> {
        let client = self.get_client().await?;

        client
            .upload_object(
                &bucket_resource(&self.bucket),
                object_name,
                bytes,
                effective_mime_type(mime_type),
            )
            .await
            .map_err(|e| map_storage_error(&e))?;

        Ok(object_name.to_string())
    }

    async fn delete_object(&self, path: &str) -> Result<(), ObjectStorageError> {
        let client = self.get_client().await?;

        client
            .delete_object(&bucket_resource(&self.bucket), path)
            .await
            .map_err(|e| map_storage_error(&e))
    }

    async fn fetch_object(&self, path: &str) -> Result<Vec<u8>, ObjectStorageError> {
        let client = self.get_client().await?;

        client
            .download_object_bytes(&bucket_resource(&self.bucket), path)
            .await
            .map_err(|e| map_storage_error(&e))
    }

    async fn object_url(&self, path: &str) -> Result<String, ObjectStorageError> {
        let client = self.get_client().await?;

        let signed = client
            .sign_get_url(&bucket_resource(&self.bucket), path, self.signed_url_ttl)
            .await
            .map_err(|e| map_storage_error(&e))?;

        Ok(signed.unwrap_or_else(|| public_url(&self.bucket, path)))
    }
}

// ============================================================================
// Real Google Cloud Storage client (google-cloud-storage)
// ============================================================================

struct RealGcsClient {
    storage: google_cloud_storage::client::Storage,
    control: google_cloud_storage::client::StorageControl,
    signer: Option<google_cloud_auth::signer::Signer>,
}

impl RealGcsClient {
    async fn new() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        tracing::info!("Initializing GCS client...");

        let storage = google_cloud_storage::client::Storage::builder()
            .build()
            .await
            .map_err(|e| {
                tracing::error!("Failed to build GCS storage client: {:?}", e);
                e
            })?;

        let control = google_cloud_storage::client::StorageControl::builder()
            .build()
            .await
            .map_err(|e| {
                tracing::error!("Failed to build GCS control client: {:?}", e);
                e
            })?;

        // Without a service-account key, file URLs fall back to public object URLs.
        let signer = match google_cloud_auth::credentials::Builder::default().build_signer() {
            Ok(signer) => Some(signer),
            Err(e) => {
                tracing::warn!("GCS signer unavailable, using public URLs: {}", e);
                None
            }
        };

        tracing::info!("GCS clients created");

        Ok(Self {
            storage,
            control,
            signer,
        })
    }
}

#[async_trait]
impl GcsClient for RealGcsClient {
    async fn upload_object(
        &self,
        bucket_resource: &str,
        object_name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), String> {
        self.storage
            .write_object(
                bucket_resource.to_string(),
                object_name.to_string(),
                bytes::Bytes::from(bytes),
            )
            .set_content_type(content_type.to_string())
            // Generation 0 matches only when no live object has this name.
            .set_if_generation_match(0)
            .send_buffered()
            .await
            .map_err(|e| e.to_string())?;

        Ok(())
    }

    async fn delete_object(&self, bucket_resource: &str, object_name: &str) -> Result<(), String> {
        self.control
            .delete_object()
            .set_bucket(bucket_resource.to_string())
            .set_object(object_name.to_string())
            .send()
            .await
            .map_err(|e| e.to_string())
    }

    async fn download_object_bytes(
        &self,
        bucket_resource: &str,
        object_name: &str,
    ) -> Result<Vec<u8>, String> {
        let mut stream = self
            .storage
            .read_object(bucket_resource.to_string(), object_name.to_string())
            .send()
            .await
            .map_err(|e| e.to_string())?;

        use futures::StreamExt;

        let mut out: Vec<u8> = Vec::new();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| e.to_string())?;
            out.extend_from_slice(&chunk);
        }

        Ok(out)
    }

    async fn sign_get_url(
        &self,
        bucket_resource: &str,
        object_name: &str,
        ttl: Duration,
    ) -> Result<Option<String>, String> {
        let Some(signer) = &self.signer else {
            return Ok(None);
        };

        let url = google_cloud_storage::builder::storage::SignedUrlBuilder::for_object(
            bucket_resource.to_string(),
            object_name.to_string(),
        )
        .with_method(google_cloud_storage::http::Method::GET)
        .with_expiration(ttl)
        .sign_with(signer)
        .await
        .map_err(|e| e.to_string())?;

        Ok(Some(url))
    }
}
