//! # FacetX API
//!
//! HTTP surface of FacetX: `POST /api/products` takes a filter selection and
//! answers with the matching catalog items, ranked by the configured ordering
//! strategy.

pub mod orchestrator;
pub mod rest;

pub use orchestrator::{OrchestratorConfig, QueryOrchestrator, DEFAULT_TOP_K};
pub use rest::{configure, RestApi, INTERNAL_ERROR_MESSAGE};
