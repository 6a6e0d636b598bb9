//! Domain models

pub mod product;

pub use product::{ImageUpload, NewProduct, ProductFormData, PRODUCTS_TABLE};
