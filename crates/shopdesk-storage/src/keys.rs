//! Shared key generation for product assets.
//!
//! Key format: `{user_id}/{timestamp}_{token}.{ext}` for the image and
//! `{user_id}/{timestamp}_{token}_thumb.{ext}` for its thumbnail.

use chrono::Utc;
use rand::Rng;
use uuid::Uuid;

const TOKEN_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const TOKEN_LEN: usize = 11;
const DEFAULT_EXTENSION: &str = "jpg";

/// Storage keys for one product image and its thumbnail
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProductKeys {
    pub image: String,
    pub thumbnail: String,
}

/// Random lower-case base-36 token
fn random_token() -> String {
    let mut rng = rand::rng();
    (0..TOKEN_LEN)
        .map(|_| TOKEN_ALPHABET[rng.random_range(0..TOKEN_ALPHABET.len())] as char)
        .collect()
}

/// `{millis}_{token}`, unique per call even within the same millisecond
pub fn generate_base_filename() -> String {
    format!("{}_{}", Utc::now().timestamp_millis(), random_token())
}

/// Generate the image and thumbnail keys for a new product upload.
///
/// `extension` is the original file's extension; `jpg` is used when it is missing.
pub fn generate_product_keys(user_id: Uuid, extension: Option<&str>) -> ProductKeys {
    let ext = extension
        .map(|e| e.trim_start_matches('.'))
        .filter(|e| !e.is_empty())
        .unwrap_or(DEFAULT_EXTENSION)
        .to_lowercase();
    let base = generate_base_filename();

    ProductKeys {
        image: format!("{}/{}.{}", user_id, base, ext),
        thumbnail: format!("{}/{}_thumb.{}", user_id, base, ext),
    }
}
