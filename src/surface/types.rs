use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::SurfaceError;
use crate::dimension::{Dimension, DimensionError};
use crate::host::OrientationRect;

/// Width and height of a surface when none is configured.
pub const DEFAULT_SIZE: f64 = 300.0;
/// Left and top offset of a surface when none is configured.
pub const DEFAULT_OFFSET: f64 = 10.0;

/// What a surface draws with.
///
/// Numeric codes (used by loosely-typed layout files): generic = 0,
/// vector = 1, raster2d = 2, raster3d = 3.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "KindRepr", rename_all = "snake_case")]
pub enum SurfaceKind {
    #[default]
    Generic,
    Vector,
    #[serde(rename = "raster2d")]
    Raster2D,
    #[serde(rename = "raster3d")]
    Raster3D,
}

impl SurfaceKind {
    pub const ALL: [SurfaceKind; 4] = [
        SurfaceKind::Generic,
        SurfaceKind::Vector,
        SurfaceKind::Raster2D,
        SurfaceKind::Raster3D,
    ];

    /// Raster surfaces own a rendering context and size their backing store
    /// instead of their visual box.
    pub fn is_raster(self) -> bool {
        matches!(self, SurfaceKind::Raster2D | SurfaceKind::Raster3D)
    }

    pub fn code(self) -> u8 {
        match self {
            SurfaceKind::Generic => 0,
            SurfaceKind::Vector => 1,
            SurfaceKind::Raster2D => 2,
            SurfaceKind::Raster3D => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SurfaceKind::Generic => "generic",
            SurfaceKind::Vector => "vector",
            SurfaceKind::Raster2D => "raster2d",
            SurfaceKind::Raster3D => "raster3d",
        }
    }
}

impl fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<u8> for SurfaceKind {
    type Error = SurfaceError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        SurfaceKind::ALL
            .into_iter()
            .find(|kind| kind.code() == code)
            .ok_or_else(|| {
                tracing::warn!(code, "unrecognized surface kind code");
                SurfaceError::UnrecognizedKind(code.to_string())
            })
    }
}

impl FromStr for SurfaceKind {
    type Err = SurfaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SurfaceKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                tracing::warn!(name = s, "unrecognized surface kind name");
                SurfaceError::UnrecognizedKind(s.to_string())
            })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum KindRepr {
    Code(u8),
    Name(String),
}

impl TryFrom<KindRepr> for SurfaceKind {
    type Error = SurfaceError;

    fn try_from(repr: KindRepr) -> Result<Self, Self::Error> {
        match repr {
            KindRepr::Code(code) => SurfaceKind::try_from(code),
            KindRepr::Name(name) => name.parse(),
        }
    }
}

/// Names one of the four geometry axes in errors and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Width,
    Height,
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::Width => "width",
            Axis::Height => "height",
            Axis::X => "x",
            Axis::Y => "y",
        })
    }
}

/// The four stored dimensions of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Axes {
    pub width: Dimension,
    pub height: Dimension,
    pub x: Dimension,
    pub y: Dimension,
}

impl Axes {
    /// Width/height and x/y exchanged, coefficients included.
    pub fn transposed(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
            x: self.y,
            y: self.x,
        }
    }

    /// Resolve every axis, naming the first one that fails.
    pub fn resolve(&self) -> Result<Geometry, (Axis, DimensionError)> {
        let axis = |axis: Axis, dimension: &Dimension| dimension.resolve().map_err(|e| (axis, e));
        Ok(Geometry {
            width: axis(Axis::Width, &self.width)?,
            height: axis(Axis::Height, &self.height)?,
            x: axis(Axis::X, &self.x)?,
            y: axis(Axis::Y, &self.y)?,
        })
    }
}

/// Concrete pixel geometry of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Geometry {
    pub width: f64,
    pub height: f64,
    pub x: f64,
    pub y: f64,
}

fn default_flippable() -> bool {
    true
}

/// Everything needed to initialize a surface.
///
/// Omitted axes fall back to [`DEFAULT_SIZE`] and [`DEFAULT_OFFSET`] at
/// init time; an omitted parent means the platform root. `orientation`
/// (alias `viewBox`) is written to the element at init and transposed by
/// every flip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SurfaceConfig {
    pub id: String,
    #[serde(default, alias = "type")]
    pub kind: SurfaceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<Dimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<Dimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<Dimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<Dimension>,
    #[serde(default = "default_flippable")]
    pub flippable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default, alias = "viewBox", skip_serializing_if = "Option::is_none")]
    pub orientation: Option<OrientationRect>,
}

impl SurfaceConfig {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: SurfaceKind::default(),
            width: None,
            height: None,
            x: None,
            y: None,
            flippable: default_flippable(),
            parent: None,
            orientation: None,
        }
    }

    pub fn kind(mut self, kind: SurfaceKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn width(mut self, width: impl Into<Dimension>) -> Self {
        self.width = Some(width.into());
        self
    }

    pub fn height(mut self, height: impl Into<Dimension>) -> Self {
        self.height = Some(height.into());
        self
    }

    pub fn x(mut self, x: impl Into<Dimension>) -> Self {
        self.x = Some(x.into());
        self
    }

    pub fn y(mut self, y: impl Into<Dimension>) -> Self {
        self.y = Some(y.into());
        self
    }

    pub fn flippable(mut self, flippable: bool) -> Self {
        self.flippable = flippable;
        self
    }

    pub fn parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn orientation(mut self, rect: OrientationRect) -> Self {
        self.orientation = Some(rect);
        self
    }

    pub(crate) fn axes(&self) -> Axes {
        Axes {
            width: self.width.unwrap_or(Dimension::Absolute(DEFAULT_SIZE)),
            height: self.height.unwrap_or(Dimension::Absolute(DEFAULT_SIZE)),
            x: self.x.unwrap_or(Dimension::Absolute(DEFAULT_OFFSET)),
            y: self.y.unwrap_or(Dimension::Absolute(DEFAULT_OFFSET)),
        }
    }
}

/// A partial geometry change. Omitted axes keep their stored dimension;
/// supplied ones are merged with [`Dimension::merge`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SurfaceUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<Dimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<Dimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<Dimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<Dimension>,
}

impl SurfaceUpdate {
    /// Variable-only update pushing a viewport size through every axis:
    /// width and x follow the viewport width, height and y its height.
    pub fn viewport(width: f64, height: f64) -> Self {
        Self {
            width: Some(Dimension::variable(width)),
            height: Some(Dimension::variable(height)),
            x: Some(Dimension::variable(width)),
            y: Some(Dimension::variable(height)),
        }
    }

    pub(crate) fn merge_into(&self, current: &Axes) -> Axes {
        let merge = |stored: Dimension, incoming: Option<Dimension>| {
            incoming.map_or(stored, |incoming| stored.merge(incoming))
        };
        Axes {
            width: merge(current.width, self.width),
            height: merge(current.height, self.height),
            x: merge(current.x, self.x),
            y: merge(current.y, self.y),
        }
    }
}
