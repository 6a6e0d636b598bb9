//! Test helpers: build AppState and router for integration tests.
//!
//! Objects go to a temporary directory through `LocalStorage`; rows go to an
//! in-memory recording store.

#![allow(dead_code)]

pub mod fixtures;

use async_trait::async_trait;
use axum_test::TestServer;
use shopdesk_api::setup::routes;
use shopdesk_api::state::AppState;
use shopdesk_core::{BaseConfig, Config, DashboardConfig, RecordBackend, StorageBackend};
use shopdesk_db::{RecordError, RecordResult, RecordStore};
use shopdesk_processing::JpegImageProcessor;
use shopdesk_services::ProductService;
use shopdesk_storage::LocalStorage;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub const BUCKET: &str = "products";
pub const MEDIA_URL: &str = "http://localhost:4000/media";
pub const MAX_FILE_SIZE_BYTES: usize = 1024 * 1024;

/// Record store that keeps inserted rows in memory
#[derive(Default)]
pub struct MemoryRecords {
    pub rows: Mutex<Vec<(String, serde_json::Value)>>,
    pub fail: AtomicBool,
}

#[async_trait]
impl RecordStore for MemoryRecords {
    async fn insert(&self, table: &str, row: serde_json::Value) -> RecordResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(RecordError::InsertFailed("connection reset".to_string()));
        }
        self.rows.lock().unwrap().push((table.to_string(), row));
        Ok(())
    }
}

/// Test application: server plus the resources behind it
pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
    pub records: Arc<MemoryRecords>,
    pub media_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Files currently stored under the bucket, as `user_id/filename`
    pub fn stored_keys(&self) -> Vec<String> {
        let bucket_dir = self.media_dir.path().join(BUCKET);
        let mut keys = Vec::new();
        let Ok(users) = std::fs::read_dir(&bucket_dir) else {
            return keys;
        };
        for user in users.flatten() {
            for file in std::fs::read_dir(user.path()).unwrap().flatten() {
                keys.push(format!(
                    "{}/{}",
                    user.file_name().to_string_lossy(),
                    file.file_name().to_string_lossy()
                ));
            }
        }
        keys.sort();
        keys
    }
}

pub fn test_config(media_dir: &TempDir) -> Config {
    Config(Box::new(DashboardConfig {
        base: BaseConfig {
            server_port: 4000,
            cors_origins: vec!["http://localhost:3000".to_string()],
            environment: "test".to_string(),
            log_format: "text".to_string(),
        },
        storage_backend: StorageBackend::Local,
        storage_bucket: BUCKET.to_string(),
        s3_region: None,
        s3_endpoint: None,
        local_storage_path: Some(media_dir.path().to_string_lossy().to_string()),
        local_storage_base_url: Some(MEDIA_URL.to_string()),
        record_backend: RecordBackend::Hosted,
        database_url: None,
        db_max_connections: 1,
        hosted_url: None,
        hosted_api_key: None,
        max_file_size_bytes: MAX_FILE_SIZE_BYTES,
    }))
}

/// Setup test app with local storage and an in-memory record store
pub async fn setup_test_app() -> TestApp {
    let media_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = test_config(&media_dir);

    let storage = LocalStorage::new(media_dir.path(), MEDIA_URL.to_string())
        .await
        .expect("Failed to create local storage");
    let records = Arc::new(MemoryRecords::default());

    let products = ProductService::new(
        Arc::new(storage),
        records.clone(),
        Arc::new(JpegImageProcessor::new()),
        BUCKET,
    );
    let state = Arc::new(AppState::new(config.clone(), products));

    let app = routes::setup_routes(&config, state.clone()).expect("Failed to build routes");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        state,
        records,
        media_dir,
    }
}
