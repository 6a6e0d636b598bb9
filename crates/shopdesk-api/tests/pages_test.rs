//! Dashboard page routing tests.
//!
//! Run with: `cargo test -p shopdesk-api --test pages_test`

mod helpers;

use helpers::setup_test_app;

const PAGES: [(&str, &str); 6] = [
    ("/", "<h1>Overview</h1>"),
    ("/reviews", "<h1>Reviews</h1>"),
    ("/surveys", "<h1>Surveys</h1>"),
    ("/products", "<h1>Products</h1>"),
    ("/products/new", "<h1>Add Product</h1>"),
    ("/package-inserts", "<h1>Package Inserts</h1>"),
];

#[tokio::test]
async fn test_each_path_renders_its_page() {
    let app = setup_test_app().await;

    for (path, heading) in PAGES {
        let response = app.client().get(path).await;
        assert_eq!(response.status_code(), 200, "{}", path);
        let body = response.text();
        assert!(body.contains(heading), "{} should contain {}", path, heading);
        for (other, other_heading) in PAGES {
            if other != path {
                assert!(!body.contains(other_heading), "{} rendered {}", path, other);
            }
        }
    }
}

#[tokio::test]
async fn test_unknown_path_is_404() {
    let app = setup_test_app().await;

    let response = app.client().get("/settings").await;
    assert_eq!(response.status_code(), 404);
    assert!(response.text().contains("Page not found"));

    let response = app.client().get("/products/new/extra").await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_health() {
    let app = setup_test_app().await;

    let response = app.client().get("/health").await;
    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage_backend"], "local");
}
