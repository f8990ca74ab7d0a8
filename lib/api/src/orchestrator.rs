//! Query orchestration
//!
//! Validates a filter payload, compiles it into a predicate and an ordering
//! plan, and issues exactly one bounded search request. Holds no per-request
//! state, so one instance serves any number of concurrent requests.

use facetx_backend::{QueryMatch, QueryRequest, SearchBackend};
use facetx_core::{
    Error, FilterBuilder, FilterSelection, OrderingStrategy, PriceDomain, ProbeBias, Result,
};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Maximum number of results a single query returns.
pub const DEFAULT_TOP_K: usize = 12;

#[derive(Debug, Clone, Copy)]
pub struct OrchestratorConfig {
    pub top_k: usize,
    pub price_domain: PriceDomain,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            price_domain: PriceDomain::default(),
        }
    }
}

impl OrchestratorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(Error::InvalidConfig("top_k must be positive".to_string()));
        }
        self.price_domain.validate()
    }
}

pub struct QueryOrchestrator {
    backend: Arc<dyn SearchBackend>,
    ordering: Arc<dyn OrderingStrategy>,
    top_k: usize,
}

impl QueryOrchestrator {
    /// Create an orchestrator that orders results by probe-vector bias.
    pub fn new(backend: Arc<dyn SearchBackend>, config: OrchestratorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            backend,
            ordering: Arc::new(ProbeBias::new(config.price_domain)),
            top_k: config.top_k,
        })
    }

    #[must_use]
    pub fn with_ordering(mut self, ordering: Arc<dyn OrderingStrategy>) -> Self {
        self.ordering = ordering;
        self
    }

    pub fn ordering_name(&self) -> &'static str {
        self.ordering.name()
    }

    /// Build the backend request for a validated selection.
    pub fn plan(&self, selection: &FilterSelection) -> QueryRequest {
        let filter = FilterBuilder::from_selection(selection).build();
        let ordering = self.ordering.plan(selection.sort());

        QueryRequest {
            top_k: self.top_k,
            vector: ordering.vector.to_vec(),
            include_metadata: true,
            filter,
            sort_by: ordering.sort_by,
        }
    }

    /// Validate `payload` and run the query.
    ///
    /// Validation failures are returned before the backend is contacted.
    /// Backend failures are logged here with their cause; callers should
    /// surface only a generic error.
    pub async fn search(&self, payload: &serde_json::Value) -> Result<Vec<QueryMatch>> {
        let selection = match FilterSelection::from_json(payload) {
            Ok(selection) => selection,
            Err(e) => {
                warn!("Rejected filter payload: {}", e);
                return Err(e);
            }
        };
        self.search_selection(&selection).await
    }

    pub async fn search_selection(&self, selection: &FilterSelection) -> Result<Vec<QueryMatch>> {
        let request = self.plan(selection);
        debug!(
            filter = request.filter.as_deref().unwrap_or(""),
            vector = ?request.vector,
            top_k = request.top_k,
            "Issuing search"
        );

        match self.backend.query(request).await {
            Ok(results) => {
                debug!("Search returned {} results", results.len());
                Ok(results)
            }
            Err(e) => {
                error!("Search backend failed: {}", e);
                Err(e)
            }
        }
    }
}
