//! Attribute encoding
//!
//! Fixed bijections between categorical attribute names and the numeric codes
//! stored in the first two vector dimensions of every catalog item. Items must
//! be indexed with exactly these codes or categorical filtering diverges from
//! the stored value space.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A closed enumeration of attribute values with stable integer codes.
pub trait Attribute: Sized + Copy + 'static {
    /// Metadata field name the attribute is stored and filtered under.
    const FIELD: &'static str;

    /// Every value, in code order.
    const ALL: &'static [Self];

    fn code(self) -> u32;

    fn name(self) -> &'static str;

    /// Look up a value by its wire name (case-sensitive).
    fn parse(name: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.name() == name)
            .ok_or_else(|| Error::UnknownAttributeValue {
                attribute: Self::FIELD,
                value: name.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Beige,
    Blue,
    Green,
    Purple,
}

impl Attribute for Color {
    const FIELD: &'static str = "color";
    const ALL: &'static [Self] = &[
        Color::White,
        Color::Beige,
        Color::Blue,
        Color::Green,
        Color::Purple,
    ];

    fn code(self) -> u32 {
        match self {
            Color::White => 0,
            Color::Beige => 1,
            Color::Blue => 2,
            Color::Green => 3,
            Color::Purple => 4,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Beige => "beige",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Purple => "purple",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Size {
    S,
    M,
    L,
}

impl Attribute for Size {
    const FIELD: &'static str = "size";
    const ALL: &'static [Self] = &[Size::S, Size::M, Size::L];

    fn code(self) -> u32 {
        match self {
            Size::S => 0,
            Size::M => 1,
            Size::L => 2,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Size::S => "S",
            Size::M => "M",
            Size::L => "L",
        }
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        <Color as Attribute>::parse(s)
    }
}

impl FromStr for Size {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        <Size as Attribute>::parse(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Price bounds of the catalog, used to place the probe vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceDomain {
    pub average: f32,
    pub max: f32,
}

impl Default for PriceDomain {
    fn default() -> Self {
        Self {
            average: 25.0,
            max: 50.0,
        }
    }
}

impl PriceDomain {
    pub fn new(average: f32, max: f32) -> Result<Self> {
        let domain = Self { average, max };
        domain.validate()?;
        Ok(domain)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.average.is_finite() || !self.max.is_finite() {
            return Err(Error::InvalidConfig("price bounds must be finite".to_string()));
        }
        if self.max <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "max price must be positive, got {}",
                self.max
            )));
        }
        if self.average < 0.0 || self.average > self.max {
            return Err(Error::InvalidConfig(format!(
                "average price {} outside [0, {}]",
                self.average, self.max
            )));
        }
        Ok(())
    }
}

/// Ingestion vector of a catalog item: `[color code, size code, price]`.
#[inline]
pub fn encode_item(color: Color, size: Size, price: f32) -> [f32; 3] {
    [color.code() as f32, size.code() as f32, price]
}
