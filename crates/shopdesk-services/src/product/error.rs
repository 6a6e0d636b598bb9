use shopdesk_core::AppError;
use shopdesk_processing::ProcessingError;
use std::fmt;
use thiserror::Error;
use validator::ValidationErrors;

/// Which of the two product assets an upload failure refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadAsset {
    Image,
    Thumbnail,
}

impl fmt::Display for UploadAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadAsset::Image => write!(f, "image"),
            UploadAsset::Thumbnail => write!(f, "thumbnail"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("{0}")]
    Validation(String),

    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Failed to render image: {0}")]
    Canvas(String),

    #[error("Failed to upload {asset}: {message}")]
    Upload { asset: UploadAsset, message: String },

    #[error("Failed to save product: {0}")]
    Insert(String),

    #[error("Unexpected error: {0}")]
    Unknown(String),
}

impl From<ProcessingError> for ProductError {
    fn from(err: ProcessingError) -> Self {
        match err {
            ProcessingError::Decode(msg) => ProductError::Decode(msg),
            ProcessingError::Canvas(msg) => ProductError::Canvas(msg),
            ProcessingError::Aborted(msg) => ProductError::Unknown(msg),
        }
    }
}

impl From<ValidationErrors> for ProductError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let message = fields
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{} is invalid", field),
                })
            })
            .collect::<Vec<_>>()
            .join("; ");

        ProductError::Validation(message)
    }
}

impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::Validation(msg) => AppError::InvalidInput(msg),
            ProductError::Decode(msg) | ProductError::Canvas(msg) => AppError::ImageProcessing(msg),
            ProductError::Upload { asset, message } => {
                AppError::Storage(format!("{} upload failed: {}", asset, message))
            }
            ProductError::Insert(msg) => AppError::Database(msg),
            ProductError::Unknown(msg) => AppError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopdesk_core::ErrorMetadata;
    use shopdesk_core::{ImageUpload, ProductFormData};
    use validator::Validate;

    #[test]
    fn test_validation_message_lists_fields_in_order() {
        let form = ProductFormData {
            image: Some(ImageUpload::new("a.png", None, Default::default())),
            ..Default::default()
        };
        let err: ProductError = form.validate().unwrap_err().into();
        let ProductError::Validation(msg) = err else {
            panic!("expected validation error");
        };
        assert!(msg.starts_with("Giveaway is required; Product image must be a non-empty file"));
        assert!(msg.ends_with("Product name is required"));
    }

    #[test]
    fn test_aborted_processing_is_unknown() {
        let err: ProductError = ProcessingError::Aborted("task panicked".to_string()).into();
        assert!(matches!(err, ProductError::Unknown(_)));
    }

    #[test]
    fn test_http_status_mapping() {
        let cases = [
            (ProductError::Validation("x".into()), 400),
            (ProductError::Decode("x".into()), 400),
            (ProductError::Canvas("x".into()), 400),
            (
                ProductError::Upload {
                    asset: UploadAsset::Thumbnail,
                    message: "x".into(),
                },
                502,
            ),
            (ProductError::Insert("x".into()), 500),
            (ProductError::Unknown("x".into()), 500),
        ];
        for (err, status) in cases {
            let app: AppError = err.into();
            assert_eq!(app.http_status_code(), status, "{}", app);
        }
    }

    #[test]
    fn test_upload_names_asset() {
        let err = ProductError::Upload {
            asset: UploadAsset::Image,
            message: "bucket not found".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to upload image: bucket not found");
    }
}
