//! # FacetX
//!
//! Faceted catalog search on top of a vector index.
//!
//! FacetX narrows a product catalog by color, size and price range and orders
//! the results by price, using nearest-neighbor ranking as the ordering
//! mechanism.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! export VECTOR_REST_URL=https://my-index.example.com
//! export VECTOR_REST_TOKEN=...
//! facetx seed --file catalog.json
//! facetx serve --http-port 3000
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use facetx::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn run() -> facetx::Result<()> {
//! let backend = Arc::new(HttpBackend::new(BackendConfig::new("https://my-index.example.com", "token"))?);
//! let orchestrator = QueryOrchestrator::new(backend, OrchestratorConfig::default())?;
//!
//! let results = orchestrator.search(&serde_json::json!({
//!     "color": ["blue", "green"],
//!     "size": ["M"],
//!     "price": [10, 50],
//!     "sort": "price-asc"
//! })).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Structure
//!
//! - `facetx-core` - attribute encoding, filter selections, predicate builder, probe vectors
//! - `facetx-backend` - REST client for the vector index and catalog seeding
//! - `facetx-api` - query orchestrator and HTTP endpoint
//!
//! ## Ordering Is Approximate
//!
//! The index has no native sort. Price ordering is produced by moving the
//! probe vector's price component to 0 (ascending), the catalog maximum
//! (descending) or the catalog average (no sort). Items with equal price come
//! back in an order that depends on their color and size codes.

// Re-export core types
pub use facetx_core::{
    Attribute, Color, Size, PriceDomain,
    FilterSelection, PriceRange, SortMode,
    FilterBuilder, FilterValue, Operator,
    QueryVector, OrderingStrategy, ProbeBias, NativeSort,
    CatalogItem, UpsertRecord,
    Error, Result,
};

// Re-export backend
pub use facetx_backend::{BackendConfig, HttpBackend, SearchBackend, QueryMatch, QueryRequest};

// Re-export API
pub use facetx_api::{OrchestratorConfig, QueryOrchestrator, RestApi};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Attribute, Color, Size, PriceDomain,
        FilterSelection, SortMode,
        FilterBuilder, QueryVector, OrderingStrategy,
        Error, Result,
        BackendConfig, HttpBackend, SearchBackend,
        OrchestratorConfig, QueryOrchestrator, RestApi,
    };
}
