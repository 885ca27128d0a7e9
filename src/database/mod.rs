pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

pub use manager::DatabaseManager;
pub use memory::InMemoryDocumentStore;
pub use models::Document;
pub use postgres::PgDocumentStore;
pub use store::{DocumentStore, StoreError};
