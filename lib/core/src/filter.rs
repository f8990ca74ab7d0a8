//! Filter expression builder
//!
//! Compiles filter selections into the backend's textual predicate language.
//! Clauses are accumulated per group key: clauses inside a group are OR-ed and
//! parenthesized, groups are AND-ed in the order they were first registered.

use crate::encoder::Attribute;
use crate::selection::FilterSelection;
use std::fmt;

/// Field the price range is filtered on.
pub const PRICE_FIELD: &str = "price";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
    GreaterEqual,
    LessEqual,
}

impl Operator {
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Equals => "=",
            Operator::NotEquals => "!=",
            Operator::GreaterThan => ">",
            Operator::LessThan => "<",
            Operator::GreaterEqual => ">=",
            Operator::LessEqual => "<=",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Right-hand side of a comparison. Numbers render bare, text is quoted.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Number(f64),
    Text(String),
}

impl From<f64> for FilterValue {
    fn from(v: f64) -> Self {
        FilterValue::Number(v)
    }
}

impl From<u32> for FilterValue {
    fn from(v: u32) -> Self {
        FilterValue::Number(f64::from(v))
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        FilterValue::Text(v.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        FilterValue::Text(v)
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Number(n) => write!(f, "{}", n),
            FilterValue::Text(s) => {
                f.write_str("\"")?;
                for ch in s.chars() {
                    if ch == '"' || ch == '\\' {
                        f.write_str("\\")?;
                    }
                    write!(f, "{}", ch)?;
                }
                f.write_str("\"")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Clause {
    Comparison {
        field: String,
        operator: Operator,
        value: FilterValue,
    },
    Raw(String),
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Clause::Comparison { field, operator, value } => {
                write!(f, "{} {} {}", field, operator, value)
            }
            Clause::Raw(expr) => f.write_str(expr),
        }
    }
}

/// Accumulates predicate clauses and renders them as one boolean expression.
#[derive(Debug, Clone, Default)]
pub struct FilterBuilder {
    // Ordered by first registration; keys are unique.
    groups: Vec<(String, Vec<Clause>)>,
}

impl FilterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile a validated selection into color, size and price groups.
    ///
    /// An empty color or size set filters out every item: the group gets an
    /// always-false clause instead of being left unconstrained. The price
    /// range is always present.
    pub fn from_selection(selection: &FilterSelection) -> Self {
        let mut builder = Self::new();
        builder.add_attribute_group(selection.colors());
        builder.add_attribute_group(selection.sizes());

        let price = selection.price();
        builder.add_raw(
            PRICE_FIELD,
            format!(
                "{} >= {} AND {} <= {}",
                PRICE_FIELD,
                FilterValue::Number(price.low()),
                PRICE_FIELD,
                FilterValue::Number(price.high()),
            ),
        );
        builder
    }

    fn add_attribute_group<A: Attribute>(&mut self, values: &[A]) {
        if values.is_empty() {
            self.add_match_nothing(A::FIELD);
            return;
        }
        for value in values {
            self.add_grouped(A::FIELD, Operator::Equals, value.code());
        }
    }

    /// Append a comparison on `field` as one more alternative of its group.
    pub fn add_grouped(
        &mut self,
        field: &str,
        operator: Operator,
        value: impl Into<FilterValue>,
    ) -> &mut Self {
        let clause = Clause::Comparison {
            field: field.to_string(),
            operator,
            value: value.into(),
        };
        self.group_mut(field).push(clause);
        self
    }

    /// Install a literal expression for `key`, discarding earlier clauses.
    pub fn add_raw(&mut self, key: &str, expression: impl Into<String>) -> &mut Self {
        let group = self.group_mut(key);
        group.clear();
        group.push(Clause::Raw(expression.into()));
        self
    }

    /// Install a clause for `field` that no stored item satisfies.
    ///
    /// Categorical fields are stored as numeric codes, so comparing them with
    /// the empty string never matches.
    pub fn add_match_nothing(&mut self, field: &str) -> &mut Self {
        let expression = format!("{} = {}", field, FilterValue::Text(String::new()));
        self.add_raw(field, expression)
    }

    pub fn has_any_filter(&self) -> bool {
        !self.groups.is_empty()
    }

    /// Group keys in render order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(k, _)| k.as_str())
    }

    /// Render the expression; empty when no group has been registered.
    pub fn render(&self) -> String {
        self.groups
            .iter()
            .map(|(_, clauses)| {
                let alternatives: Vec<String> = clauses.iter().map(|c| c.to_string()).collect();
                format!("({})", alternatives.join(" OR "))
            })
            .collect::<Vec<_>>()
            .join(" AND ")
    }

    /// The rendered expression, or `None` when the backend filter argument
    /// must be omitted.
    pub fn build(&self) -> Option<String> {
        if self.has_any_filter() {
            Some(self.render())
        } else {
            None
        }
    }

    fn group_mut(&mut self, key: &str) -> &mut Vec<Clause> {
        let idx = match self.groups.iter().position(|(k, _)| k == key) {
            Some(idx) => idx,
            None => {
                self.groups.push((key.to_string(), Vec::new()));
                self.groups.len() - 1
            }
        };
        &mut self.groups[idx].1
    }
}

impl fmt::Display for FilterBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Convenience: compile a selection straight to its predicate string.
pub fn compile(selection: &FilterSelection) -> Option<String> {
    FilterBuilder::from_selection(selection).build()
}
