//! The host platform contract.
//!
//! Everything that touches a real window system (creating elements,
//! acquiring rendering contexts, applying style, querying the viewport) sits
//! behind [`Host`]. The layout core only computes geometry and calls into it.

pub mod headless;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::surface::SurfaceKind;

pub use headless::HeadlessHost;

/// Minimal set of host primitives the layout core needs.
///
/// Elements are cheap, comparable handles; rendering contexts are owned by the
/// surface they were acquired for.
pub trait Host {
    type Element: Clone + PartialEq;
    type Context;

    /// Locate an existing element with `id`, or create one of `kind`.
    ///
    /// Raster kinds must come back with a rendering context of the matching
    /// dimensionality, other kinds without one. Returns `None` when the host
    /// cannot produce an element of this kind.
    fn create_or_locate(
        &mut self,
        id: &str,
        kind: SurfaceKind,
    ) -> Option<(Self::Element, Option<Self::Context>)>;

    /// The element with `id`, or the platform root when `id` is `None`.
    fn parent(&self, id: Option<&str>) -> Option<Self::Element>;

    fn attach(&mut self, parent: &Self::Element, element: &Self::Element);

    /// Apply every `Some` field of `style`; `None` fields are left alone.
    fn apply_style(&mut self, element: &Self::Element, style: &Style);

    /// Set the backing-store size of a raster element.
    fn apply_intrinsic_size(&mut self, element: &Self::Element, width: u32, height: u32);

    fn orientation_rect(&self, element: &Self::Element) -> Option<OrientationRect>;

    fn set_orientation_rect(&mut self, element: &Self::Element, rect: OrientationRect);

    /// Current viewport size as (width, height).
    fn viewport_size(&self) -> (f64, f64);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Hidden,
    Visible,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Positioning {
    Absolute,
}

/// A partial visual style. Sizes and offsets are in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Style {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Positioning>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
}

impl Style {
    /// Initial style of every freshly initialized surface.
    pub fn hidden_absolute() -> Self {
        Self {
            visibility: Some(Visibility::Hidden),
            position: Some(Positioning::Absolute),
            ..Self::default()
        }
    }

    pub fn visible() -> Self {
        Self {
            visibility: Some(Visibility::Visible),
            ..Self::default()
        }
    }

    /// Overlay the `Some` fields of `other` onto this style.
    pub fn apply(&mut self, other: &Style) {
        self.visibility = other.visibility.or(self.visibility);
        self.position = other.position.or(self.position);
        self.width = other.width.or(self.width);
        self.height = other.height.or(self.height);
        self.left = other.left.or(self.left);
        self.top = other.top.or(self.top);
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("orientation rect needs four numbers, got {0:?}")]
pub struct ParseOrientationRectError(pub String);

/// Position pair plus size pair attached to vector elements, in the same
/// order as an SVG `viewBox`.
///
/// Deserializes from either the four named fields or a `"min_x min_y width
/// height"` string.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RectRepr")]
pub struct OrientationRect {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl OrientationRect {
    pub fn new(min_x: f64, min_y: f64, width: f64, height: f64) -> Self {
        Self {
            min_x,
            min_y,
            width,
            height,
        }
    }

    /// Same position, width and height exchanged.
    pub fn transposed(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
            ..self
        }
    }
}

impl fmt::Display for OrientationRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.min_x, self.min_y, self.width, self.height)
    }
}

impl FromStr for OrientationRect {
    type Err = ParseOrientationRectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<f64> = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|part| !part.is_empty())
            .map(str::parse)
            .collect::<Result<_, _>>()
            .map_err(|_| ParseOrientationRectError(s.to_string()))?;

        match fields.as_slice() {
            [min_x, min_y, width, height] => Ok(Self::new(*min_x, *min_y, *width, *height)),
            _ => Err(ParseOrientationRectError(s.to_string())),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RectRepr {
    Text(String),
    Fields {
        min_x: f64,
        min_y: f64,
        width: f64,
        height: f64,
    },
}

impl TryFrom<RectRepr> for OrientationRect {
    type Error = ParseOrientationRectError;

    fn try_from(repr: RectRepr) -> Result<Self, Self::Error> {
        match repr {
            RectRepr::Text(text) => text.parse(),
            RectRepr::Fields {
                min_x,
                min_y,
                width,
                height,
            } => Ok(Self::new(min_x, min_y, width, height)),
        }
    }
}
