/// Prefix for JSON API routes
pub const API_PREFIX: &str = "/api/v0";

/// Header carrying the authenticated caller's user id
pub const USER_ID_HEADER: &str = "x-user-id";

/// Upper bound on requests served concurrently
pub const HTTP_CONCURRENCY_LIMIT: usize = 1024;

/// Headroom on top of the image limit for the text fields and multipart framing
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;
