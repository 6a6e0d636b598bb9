use crate::auth::UserContext;
use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use shopdesk_core::{AppError, ImageUpload, ProductFormData};
use std::sync::Arc;

const IMAGE_FIELD: &str = "image";

#[derive(Debug, Serialize)]
pub struct CreateProductResponse {
    pub success: bool,
}

/// Create a product from the add-product form
///
/// Expects `multipart/form-data` with the text fields `name`, `marketplace`,
/// `marketplace_product_id`, `giveaway` and a file part named `image`.
#[tracing::instrument(
    skip(state, multipart),
    fields(user_id = %user.user_id, operation = "create_product")
)]
pub async fn create_product(
    State(state): State<Arc<AppState>>,
    user: UserContext,
    multipart: Multipart,
) -> Result<(StatusCode, Json<CreateProductResponse>), HttpAppError> {
    let form = read_product_form(multipart, state.config.max_file_size_bytes()).await?;

    state.products.create_product(user.user_id, form).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateProductResponse { success: true }),
    ))
}

/// Collect the form fields; unknown parts are ignored
async fn read_product_form(
    mut multipart: Multipart,
    max_file_size: usize,
) -> Result<ProductFormData, HttpAppError> {
    let mut form = ProductFormData::default();

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        match field_name.as_str() {
            IMAGE_FIELD => {
                if form.image.is_some() {
                    return Err(AppError::InvalidInput(
                        "Multiple image fields are not allowed".to_string(),
                    )
                    .into());
                }
                let filename = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(|s| s.to_string());
                let data = field.bytes().await?;

                if data.len() > max_file_size {
                    return Err(AppError::PayloadTooLarge(format!(
                        "Image exceeds maximum allowed size of {} MB",
                        max_file_size / 1024 / 1024
                    ))
                    .into());
                }
                // Browsers submit an empty part when no file was chosen
                if !data.is_empty() {
                    form.image = Some(ImageUpload::new(filename, content_type, data));
                }
            }
            "name" => form.name = field.text().await?.trim().to_string(),
            "marketplace" => form.marketplace = field.text().await?.trim().to_string(),
            "marketplace_product_id" => {
                form.marketplace_product_id = field.text().await?.trim().to_string()
            }
            "giveaway" => form.giveaway = field.text().await?.trim().to_string(),
            other => tracing::debug!(field = other, "Ignoring unknown form field"),
        }
    }

    Ok(form)
}
