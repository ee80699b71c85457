//! Common library for the roster application
//!
//! This crate provides shared functionality used across the roster
//! application: the JSON document store the service persists into and
//! the error types that go with it.

pub mod error;
pub mod store;

/// Example usage of the store module
///
/// ```rust,no_run
/// use common::store::JsonStore;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store: JsonStore<serde_json::Value> = JsonStore::open("db.json").await?;
///     let size = store.read(|doc| doc.to_string().len()).await;
///     println!("document is {} bytes", size);
///     Ok(())
/// }
/// ```
pub fn example_usage() {}
