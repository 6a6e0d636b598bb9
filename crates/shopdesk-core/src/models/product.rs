use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter, Result as FmtResult};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Table holding product rows in the record store
pub const PRODUCTS_TABLE: &str = "products";

/// A file part submitted with the product form
///
/// Serializes without its bytes, so validation errors can carry it as a param.
#[derive(Clone, Serialize)]
pub struct ImageUpload {
    pub filename: String,
    pub content_type: Option<String>,
    #[serde(skip)]
    pub data: Bytes,
}

impl ImageUpload {
    pub fn new(filename: impl Into<String>, content_type: Option<String>, data: Bytes) -> Self {
        Self {
            filename: filename.into(),
            content_type,
            data,
        }
    }

    /// Lower-cased extension of the original filename, if it has one
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.filename.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_lowercase())
    }
}

impl Debug for ImageUpload {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ImageUpload")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("size_bytes", &self.data.len())
            .finish()
    }
}

fn validate_image(image: &ImageUpload) -> Result<(), ValidationError> {
    if image.data.is_empty() {
        let mut err = ValidationError::new("empty_file");
        err.message = Some("Product image must be a non-empty file".into());
        return Err(err);
    }
    Ok(())
}

/// Product form as submitted from the add-product page
#[derive(Debug, Clone, Default, Validate)]
pub struct ProductFormData {
    #[validate(length(min = 1, message = "Product name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Marketplace is required"))]
    pub marketplace: String,
    #[validate(length(min = 1, message = "Marketplace product ID is required"))]
    pub marketplace_product_id: String,
    #[validate(length(min = 1, message = "Giveaway is required"))]
    pub giveaway: String,
    #[validate(custom(function = "validate_image"))]
    pub image: Option<ImageUpload>,
}

/// Row inserted into the `products` table once both assets are stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub marketplace: String,
    pub marketplace_product_id: String,
    pub giveaway: String,
    pub image_path: String,
    pub thumbnail_path: String,
    pub user_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> ProductFormData {
        ProductFormData {
            name: "Bamboo cutting board".to_string(),
            marketplace: "amazon".to_string(),
            marketplace_product_id: "B0TEST1234".to_string(),
            giveaway: "Free recipe ebook".to_string(),
            image: Some(ImageUpload::new(
                "board.png",
                Some("image/png".to_string()),
                Bytes::from_static(b"\x89PNG"),
            )),
        }
    }

    #[test]
    fn test_valid_form_passes() {
        assert!(valid_form().validate().is_ok());
    }

    #[test]
    fn test_empty_field_rejected() {
        let mut form = valid_form();
        form.giveaway = String::new();
        let errors = form.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("giveaway"));
    }

    #[test]
    fn test_empty_image_rejected() {
        let mut form = valid_form();
        form.image = Some(ImageUpload::new("empty.png", None, Bytes::new()));
        let errors = form.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("image"));
    }

    #[test]
    fn test_image_error_carries_upload_without_bytes() {
        let mut form = valid_form();
        form.image = Some(ImageUpload::new("empty.png", None, Bytes::new()));
        let errors = form.validate().unwrap_err();
        let field_errors = errors.field_errors();
        let value = &field_errors["image"][0].params["value"];

        assert_eq!(value["filename"], "empty.png");
        assert!(value.get("data").is_none());
    }

    #[test]
    fn test_missing_image_is_left_to_the_workflow() {
        let mut form = valid_form();
        form.image = None;
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_extension() {
        let image = ImageUpload::new("Photo.JPEG", None, Bytes::new());
        assert_eq!(image.extension().as_deref(), Some("jpeg"));

        let image = ImageUpload::new("noext", None, Bytes::new());
        assert_eq!(image.extension(), None);

        let image = ImageUpload::new(".hidden", None, Bytes::new());
        assert_eq!(image.extension(), None);

        let image = ImageUpload::new("trailing.", None, Bytes::new());
        assert_eq!(image.extension(), None);
    }

    #[test]
    fn test_new_product_serializes_as_row() {
        let product = NewProduct {
            name: "n".to_string(),
            marketplace: "m".to_string(),
            marketplace_product_id: "id".to_string(),
            giveaway: "g".to_string(),
            image_path: "http://x/a.jpg".to_string(),
            thumbnail_path: "http://x/a_thumb.jpg".to_string(),
            user_id: Uuid::nil(),
        };
        let row = serde_json::to_value(&product).unwrap();
        assert_eq!(row["image_path"], "http://x/a.jpg");
        assert_eq!(row["thumbnail_path"], "http://x/a_thumb.jpg");
        assert_eq!(row["user_id"], Uuid::nil().to_string());
    }
}
