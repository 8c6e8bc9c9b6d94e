// Cat Catalog - Core Library
// Exposes all modules for use in the CLI, the API server, and tests

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod queries;

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use catalog::{CatRepository, InMemoryCatalog};
pub use config::ServerConfig;
pub use error::{CatalogError, CatalogResult, INTERNAL_ERROR_MESSAGE};
pub use models::{BirthDateEntry, BreedQuery, Cat, CatDetail, CatSummary, NameQuery, SearchResults};
pub use queries::{
    get_cat_by_id, list_cats_without_birth_date, list_oldest_cats, search_cats,
    search_cats_by_breed, search_cats_by_name, SearchField,
};

#[cfg(feature = "server")]
pub use api::{router, AppState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Install the tracing subscriber (RUST_LOG overrides the `info` default)
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
