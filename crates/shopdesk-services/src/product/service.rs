use super::error::{ProductError, UploadAsset};
use shopdesk_core::{NewProduct, ProductFormData, PRODUCTS_TABLE};
use shopdesk_db::RecordStore;
use shopdesk_processing::{ImageProcessor, JPEG_CONTENT_TYPE};
use shopdesk_storage::{generate_product_keys, ObjectStorage, ProductKeys, UploadOptions};
use std::fmt;
use std::slice;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::task::TaskTracker;
use uuid::Uuid;
use validator::Validate;

const IMAGE_REQUIRED: &str = "Product image is required";

/// Progress of a single `create_product` run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowStage {
    Idle,
    Validating,
    Optimizing,
    Uploading,
    Inserting,
    Committed,
    /// Insert failed; stored assets are being removed
    RolledBack,
}

impl fmt::Display for WorkflowStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkflowStage::Idle => "idle",
            WorkflowStage::Validating => "validating",
            WorkflowStage::Optimizing => "optimizing",
            WorkflowStage::Uploading => "uploading",
            WorkflowStage::Inserting => "inserting",
            WorkflowStage::Committed => "committed",
            WorkflowStage::RolledBack => "rolled_back",
        };
        f.write_str(name)
    }
}

fn enter(stage: WorkflowStage) {
    tracing::debug!(stage = %stage, "Product workflow stage");
}

/// Creates products: processes the image, stores both assets, records the row.
#[derive(Clone)]
pub struct ProductService {
    storage: Arc<dyn ObjectStorage>,
    records: Arc<dyn RecordStore>,
    processor: Arc<dyn ImageProcessor>,
    bucket: String,
    compensations: TaskTracker,
}

impl ProductService {
    pub fn new(
        storage: Arc<dyn ObjectStorage>,
        records: Arc<dyn RecordStore>,
        processor: Arc<dyn ImageProcessor>,
        bucket: impl Into<String>,
    ) -> Self {
        // Spawning still works on a closed tracker; closed only lets `wait`
        // return whenever no removal is in flight
        let compensations = TaskTracker::new();
        compensations.close();

        Self {
            storage,
            records,
            processor,
            bucket: bucket.into(),
            compensations,
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Create a product for `user_id` from a submitted form.
    ///
    /// A product row is only written once both the image and its thumbnail
    /// are stored. If the write fails, both objects are removed in the
    /// background and the insert error is returned.
    #[tracing::instrument(skip(self, form), fields(product.name = %form.name))]
    pub async fn create_product(
        &self,
        user_id: Uuid,
        form: ProductFormData,
    ) -> Result<(), ProductError> {
        let start = Instant::now();

        match self.run(user_id, form).await {
            Ok(()) => {
                tracing::info!(
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Product created"
                );
                Ok(())
            }
            Err(e) => {
                match &e {
                    ProductError::Validation(_) => {
                        tracing::warn!(error = %e, "Product form rejected")
                    }
                    _ => tracing::error!(
                        error = %e,
                        duration_ms = start.elapsed().as_millis() as u64,
                        "Product creation failed"
                    ),
                }
                Err(e)
            }
        }
    }

    async fn run(&self, user_id: Uuid, form: ProductFormData) -> Result<(), ProductError> {
        enter(WorkflowStage::Validating);
        form.validate()?;
        let ProductFormData {
            name,
            marketplace,
            marketplace_product_id,
            giveaway,
            image,
        } = form;
        let image = image.ok_or_else(|| ProductError::Validation(IMAGE_REQUIRED.to_string()))?;

        enter(WorkflowStage::Optimizing);
        let extension = image.extension();
        let optimized = self.processor.optimize(image.data).await?;
        let thumbnail = self.processor.thumbnail(optimized.data.clone()).await?;

        enter(WorkflowStage::Uploading);
        let keys = generate_product_keys(user_id, extension.as_deref());
        let options = UploadOptions::new(JPEG_CONTENT_TYPE);
        let (image_result, thumbnail_result) = tokio::join!(
            self.storage
                .upload(&self.bucket, &keys.image, optimized.data, &options),
            self.storage
                .upload(&self.bucket, &keys.thumbnail, thumbnail.data, &options),
        );
        image_result.map_err(|e| ProductError::Upload {
            asset: UploadAsset::Image,
            message: e.to_string(),
        })?;
        thumbnail_result.map_err(|e| ProductError::Upload {
            asset: UploadAsset::Thumbnail,
            message: e.to_string(),
        })?;

        let product = NewProduct {
            name,
            marketplace,
            marketplace_product_id,
            giveaway,
            image_path: self.storage.public_url(&self.bucket, &keys.image),
            thumbnail_path: self.storage.public_url(&self.bucket, &keys.thumbnail),
            user_id,
        };
        let row = serde_json::to_value(&product).map_err(|e| ProductError::Unknown(e.to_string()))?;

        enter(WorkflowStage::Inserting);
        if let Err(e) = self.records.insert(PRODUCTS_TABLE, row).await {
            enter(WorkflowStage::RolledBack);
            self.remove_uploaded(keys);
            return Err(ProductError::Insert(e.to_string()));
        }

        enter(WorkflowStage::Committed);
        Ok(())
    }

    /// Delete both objects of an orphaned upload without blocking the caller
    fn remove_uploaded(&self, keys: ProductKeys) {
        let storage = Arc::clone(&self.storage);
        let bucket = self.bucket.clone();

        self.compensations.spawn(async move {
            let (image_result, thumbnail_result) = tokio::join!(
                storage.remove(&bucket, slice::from_ref(&keys.image)),
                storage.remove(&bucket, slice::from_ref(&keys.thumbnail)),
            );

            for (key, result) in [(&keys.image, image_result), (&keys.thumbnail, thumbnail_result)] {
                match result {
                    Ok(()) => tracing::debug!(key = %key, "Removed orphaned upload"),
                    Err(e) => tracing::warn!(
                        key = %key,
                        error = %e,
                        "Failed to remove orphaned upload"
                    ),
                }
            }
        });
    }

    /// Wait until no background removal is in flight
    ///
    /// Safe to call from several tasks at once.
    pub async fn wait_for_compensations(&self) {
        self.compensations.wait().await;
    }
}
