//! Probe vectors and result ordering
//!
//! The search backend has no ORDER BY; it ranks stored items by proximity to a
//! probe vector. Placing the probe's price component at 0, at the catalog
//! maximum or at the catalog average turns nearest-neighbor ranking into an
//! approximate "cheapest first", "most expensive first" or neutral ordering.
//!
//! The ordering is approximate. Categorical probe components are always zero,
//! so items with equal price are ranked by how far their color and size codes
//! sit from zero, and no relative order between them is guaranteed.

use crate::encoder::PriceDomain;
use crate::selection::SortMode;
use crate::filter::PRICE_FIELD;
use serde::{Deserialize, Serialize};

/// Query-side vector `(color, size, price)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryVector {
    pub color: f32,
    pub size: f32,
    pub price: f32,
}

impl QueryVector {
    /// Probe with zeroed categorical components.
    #[inline]
    #[must_use]
    pub fn with_price(price: f32) -> Self {
        Self {
            color: 0.0,
            size: 0.0,
            price,
        }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 3] {
        [self.color, self.size, self.price]
    }

    #[inline]
    pub fn to_vec(self) -> Vec<f32> {
        self.to_array().to_vec()
    }

    /// Euclidean distance to a stored item vector.
    pub fn distance_to(&self, item: &[f32; 3]) -> f32 {
        self.to_array()
            .iter()
            .zip(item.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f32>()
            .sqrt()
    }
}

/// Build the probe vector biasing ranking toward the requested order.
pub fn synthesize(sort: SortMode, domain: &PriceDomain) -> QueryVector {
    let price = match sort {
        SortMode::None => domain.average,
        SortMode::PriceAscending => 0.0,
        SortMode::PriceDescending => domain.max,
    };
    QueryVector::with_price(price)
}

/// Native sort directive for backends that support one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortBy {
    pub field: String,
    pub descending: bool,
}

/// How a request should be ranked: the probe vector plus an optional native
/// sort directive.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderingPlan {
    pub vector: QueryVector,
    pub sort_by: Option<SortBy>,
}

/// Strategy for turning a sort mode into a ranking plan.
pub trait OrderingStrategy: Send + Sync {
    fn plan(&self, sort: SortMode) -> OrderingPlan;

    fn name(&self) -> &'static str;
}

/// Bias nearest-neighbor ranking by moving the probe along the price axis.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProbeBias {
    domain: PriceDomain,
}

impl ProbeBias {
    pub fn new(domain: PriceDomain) -> Self {
        Self { domain }
    }
}

impl OrderingStrategy for ProbeBias {
    fn plan(&self, sort: SortMode) -> OrderingPlan {
        OrderingPlan {
            vector: synthesize(sort, &self.domain),
            sort_by: None,
        }
    }

    fn name(&self) -> &'static str {
        "probe"
    }
}

/// Keep a neutral probe and ask the backend to sort by price itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeSort {
    domain: PriceDomain,
}

impl NativeSort {
    pub fn new(domain: PriceDomain) -> Self {
        Self { domain }
    }
}

impl OrderingStrategy for NativeSort {
    fn plan(&self, sort: SortMode) -> OrderingPlan {
        let sort_by = match sort {
            SortMode::None => None,
            SortMode::PriceAscending => Some(SortBy {
                field: PRICE_FIELD.to_string(),
                descending: false,
            }),
            SortMode::PriceDescending => Some(SortBy {
                field: PRICE_FIELD.to_string(),
                descending: true,
            }),
        };
        OrderingPlan {
            vector: synthesize(SortMode::None, &self.domain),
            sort_by,
        }
    }

    fn name(&self) -> &'static str {
        "native"
    }
}
