//! Filter selections
//!
//! A [`FilterSelection`] is the validated, immutable form of the filter state a
//! client submits. It is built once per request from a [`RawFilterSelection`]
//! (the wire shape) and rejected as a whole if any field is malformed.

use crate::encoder::{Attribute, Color, Size};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Requested price ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortMode {
    #[default]
    #[serde(rename = "none")]
    None,
    #[serde(rename = "price-asc")]
    PriceAscending,
    #[serde(rename = "price-desc")]
    PriceDescending,
}

/// Inclusive price bounds, `0 <= low <= high`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    low: f64,
    high: f64,
}

impl PriceRange {
    pub fn new(low: f64, high: f64) -> Result<Self> {
        if !low.is_finite() || !high.is_finite() {
            return Err(Error::InvalidFilterPayload(
                "price bounds must be finite numbers".to_string(),
            ));
        }
        if low < 0.0 {
            return Err(Error::InvalidFilterPayload(format!(
                "price lower bound must be non-negative, got {}",
                low
            )));
        }
        if low > high {
            return Err(Error::InvalidFilterPayload(format!(
                "price lower bound {} exceeds upper bound {}",
                low, high
            )));
        }
        // -0.0 would otherwise render as "-0" in the predicate
        Ok(Self { low: low + 0.0, high: high + 0.0 })
    }

    #[inline]
    pub fn low(&self) -> f64 {
        self.low
    }

    #[inline]
    pub fn high(&self) -> f64 {
        self.high
    }
}

/// Filter state as it arrives on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct RawFilterSelection {
    pub color: Vec<String>,
    pub size: Vec<String>,
    pub price: [f64; 2],
    pub sort: SortMode,
}

/// A validated filter selection.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSelection {
    colors: Vec<Color>,
    sizes: Vec<Size>,
    price: PriceRange,
    sort: SortMode,
}

impl FilterSelection {
    pub fn new(colors: Vec<Color>, sizes: Vec<Size>, price: PriceRange, sort: SortMode) -> Self {
        Self {
            colors: dedup(colors),
            sizes: dedup(sizes),
            price,
            sort,
        }
    }

    /// Validate an untyped JSON payload.
    ///
    /// Structural problems (missing or mistyped fields, unknown sort mode)
    /// yield [`Error::InvalidFilterPayload`]; names outside the color or size
    /// enumerations yield [`Error::UnknownAttributeValue`].
    pub fn from_json(payload: &serde_json::Value) -> Result<Self> {
        let raw = RawFilterSelection::deserialize(payload)
            .map_err(|e| Error::InvalidFilterPayload(e.to_string()))?;
        Self::try_from(raw)
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn sizes(&self) -> &[Size] {
        &self.sizes
    }

    pub fn price(&self) -> PriceRange {
        self.price
    }

    pub fn sort(&self) -> SortMode {
        self.sort
    }
}

impl TryFrom<RawFilterSelection> for FilterSelection {
    type Error = Error;

    fn try_from(raw: RawFilterSelection) -> Result<Self> {
        let colors = parse_all::<Color>(&raw.color)?;
        let sizes = parse_all::<Size>(&raw.size)?;
        let price = PriceRange::new(raw.price[0], raw.price[1])?;
        Ok(Self::new(colors, sizes, price, raw.sort))
    }
}

fn parse_all<A: Attribute>(names: &[String]) -> Result<Vec<A>> {
    names.iter().map(|n| A::parse(n)).collect()
}

// Keeps first occurrences so rendered clause order follows the client's order.
fn dedup<T: PartialEq + Copy>(values: Vec<T>) -> Vec<T> {
    let mut out: Vec<T> = Vec::with_capacity(values.len());
    for v in values {
        if !out.contains(&v) {
            out.push(v);
        }
    }
    out
}
