//! Geometry axis values.
//!
//! A [`Dimension`] is either an absolute pixel value or an affine function
//! `a * x + b` of one externally supplied variable `x` (usually the viewport
//! width or height). A dimension that carries only `x` is "variable-only":
//! merging it into an existing dimension replaces the variable and keeps the
//! existing coefficients, which is how viewport changes flow through surfaces
//! without re-specifying their layout.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DimensionError {
    #[error("dimension has neither an absolute value nor a complete affine triple: {0:?}")]
    Unresolved(Dimension),

    #[error("dimension resolved to a non-finite value: {0}")]
    NonFinite(f64),
}

/// Coefficients and variable of an affine dimension.
///
/// Any field may be absent. A missing coefficient counts as zero once the
/// other coefficient and the variable are present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Affine {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
}

impl Affine {
    fn has_coefficients(&self) -> bool {
        self.a.is_some() || self.b.is_some()
    }
}

/// One geometry axis of a surface.
///
/// Serialized untagged: a bare number is [`Dimension::Absolute`], an object
/// with any of `a`, `b`, `x` is [`Dimension::Affine`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dimension {
    Absolute(f64),
    Affine(Affine),
}

impl Dimension {
    /// `a * x + b` with the variable still unbound.
    pub fn affine(a: f64, b: f64) -> Self {
        Dimension::Affine(Affine {
            a: Some(a),
            b: Some(b),
            x: None,
        })
    }

    /// A variable-only dimension carrying just `x`.
    pub fn variable(x: f64) -> Self {
        Dimension::Affine(Affine {
            a: None,
            b: None,
            x: Some(x),
        })
    }

    /// Returns `x` if this dimension carries only a variable.
    pub fn variable_only(&self) -> Option<f64> {
        match *self {
            Dimension::Affine(Affine {
                a: None,
                b: None,
                x,
            }) => x,
            _ => None,
        }
    }

    /// True for affine dimensions with coefficients but no variable yet.
    pub fn needs_variable(&self) -> bool {
        matches!(self, Dimension::Affine(affine) if affine.has_coefficients() && affine.x.is_none())
    }

    /// True where a loosely-typed caller would consider the value unset:
    /// an absolute zero or an affine dimension with no fields.
    pub fn is_unset(&self) -> bool {
        match *self {
            Dimension::Absolute(v) => v == 0.0,
            Dimension::Affine(affine) => affine == Affine::default(),
        }
    }

    /// Concrete pixel value of this dimension.
    pub fn resolve(&self) -> Result<f64, DimensionError> {
        let value = match *self {
            Dimension::Absolute(v) => v,
            Dimension::Affine(Affine { a, b, x: Some(x) }) if a.is_some() || b.is_some() => {
                a.unwrap_or(0.0) * x + b.unwrap_or(0.0)
            }
            Dimension::Affine(Affine {
                a: None,
                b: None,
                x: Some(x),
            }) => x,
            Dimension::Affine(_) => return Err(DimensionError::Unresolved(*self)),
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(DimensionError::NonFinite(value))
        }
    }

    /// Combine an incoming value with this one.
    ///
    /// A variable-only `incoming` overwrites only the variable and keeps this
    /// dimension's coefficients (an absolute value has none, so it becomes the
    /// raw variable). Anything else replaces this dimension outright.
    pub fn merge(&self, incoming: Dimension) -> Dimension {
        match (self, incoming.variable_only()) {
            (_, None) => incoming,
            (Dimension::Affine(existing), Some(x)) => Dimension::Affine(Affine {
                x: Some(x),
                ..*existing
            }),
            (Dimension::Absolute(_), Some(x)) => Dimension::variable(x),
        }
    }
}

impl From<f64> for Dimension {
    fn from(value: f64) -> Self {
        Dimension::Absolute(value)
    }
}

impl From<Affine> for Dimension {
    fn from(value: Affine) -> Self {
        Dimension::Affine(value)
    }
}
