//! # FacetX Core
//!
//! Filter compilation and probe synthesis for faceted catalog search.
//!
//! This crate turns a client's filter selection into the two halves of a
//! similarity-search request:
//!
//! - [`FilterBuilder`] - boolean predicate string in the backend's query language
//! - [`QueryVector`] - probe vector whose price component biases ranking
//!
//! ## Example
//!
//! ```rust
//! use facetx_core::{FilterBuilder, FilterSelection, PriceDomain, synthesize};
//! use serde_json::json;
//!
//! let selection = FilterSelection::from_json(&json!({
//!     "color": ["blue", "green"],
//!     "size": ["S", "M", "L"],
//!     "price": [10, 50],
//!     "sort": "price-desc"
//! })).unwrap();
//!
//! let predicate = FilterBuilder::from_selection(&selection).render();
//! assert_eq!(
//!     predicate,
//!     "(color = 2 OR color = 3) AND (size = 0 OR size = 1 OR size = 2) AND (price >= 10 AND price <= 50)"
//! );
//!
//! let probe = synthesize(selection.sort(), &PriceDomain::default());
//! assert_eq!(probe.to_array(), [0.0, 0.0, 50.0]);
//! ```

pub mod catalog;
pub mod encoder;
pub mod error;
pub mod filter;
pub mod probe;
pub mod selection;

pub use catalog::{load_catalog, parse_catalog, CatalogItem, UpsertRecord};
pub use encoder::{encode_item, Attribute, Color, PriceDomain, Size};
pub use error::{Error, Result};
pub use filter::{compile, FilterBuilder, FilterValue, Operator, PRICE_FIELD};
pub use probe::{synthesize, NativeSort, OrderingPlan, OrderingStrategy, ProbeBias, QueryVector, SortBy};
pub use selection::{FilterSelection, PriceRange, RawFilterSelection, SortMode};
