//! Database module: the storage gateway and the article repository on top of it.
//!
//! Layout:
//! - `gateway.rs`: pooled connection with parameterized execute/query primitives
//! - `repository.rs`: article operations expressed as SQL against the gateway
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL applied at connect time

pub mod gateway;
pub mod models;
pub mod repository;
pub mod schema;

pub use gateway::StorageGateway;
pub use models::Article;
pub use repository::ArticleRepository;
