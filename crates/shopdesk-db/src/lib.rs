//! Shopdesk record store
//!
//! Product metadata is persisted through the `RecordStore` trait. Two backends
//! exist: a direct PostgreSQL connection (`postgres` feature) and the REST row
//! API of the hosted backend-as-a-service (`hosted` feature).

pub mod factory;
#[cfg(feature = "hosted")]
pub mod hosted;
#[cfg(feature = "postgres")]
pub mod postgres;
pub mod traits;

pub use factory::create_record_store;
#[cfg(feature = "hosted")]
pub use hosted::HostedRecordStore;
#[cfg(feature = "postgres")]
pub use postgres::PgRecordStore;
pub use traits::{RecordError, RecordResult, RecordStore};
