//! # FacetX Backend
//!
//! Client side of the similarity-search index FacetX queries.
//!
//! - [`SearchBackend`] - the seam the query orchestrator talks to
//! - [`HttpBackend`] - REST implementation (`/query`, `/upsert`, bearer auth)
//! - [`seed_catalog`] - batch ingestion of catalog items with the shared encoding

pub mod client;
pub mod seed;
pub mod types;

pub use client::{BackendConfig, HttpBackend, SearchBackend};
pub use seed::{seed_catalog, DEFAULT_BATCH_SIZE};
pub use types::{QueryMatch, QueryRequest};
