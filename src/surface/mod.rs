//! A single drawable rectangle hosted on the platform.
//!
//! A [`Surface`] owns its four [`Dimension`](crate::dimension::Dimension)s, its host element and, for
//! raster kinds, the rendering context acquired for it. Geometry only changes
//! through [`Surface::update`] and [`Surface::flip`]; every change is
//! validated before anything is written to the host, so a rejected update
//! leaves both the stored dimensions and the element untouched.

pub mod types;

use thiserror::Error;

use crate::dimension::DimensionError;
use crate::host::{Host, Style};

pub use types::{
    Axes, Axis, Geometry, SurfaceConfig, SurfaceKind, SurfaceUpdate, DEFAULT_OFFSET, DEFAULT_SIZE,
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SurfaceError {
    #[error("surface kind not recognized: {0}")]
    UnrecognizedKind(String),

    #[error("host cannot create a {kind} element for surface {id:?}")]
    Unsupported { id: String, kind: SurfaceKind },

    #[error("host returned no rendering context for raster surface {0:?}")]
    MissingContext(String),

    #[error("host returned a rendering context for non-raster surface {0:?}")]
    UnexpectedContext(String),

    #[error("parent element {0:?} not found")]
    ParentNotFound(String),

    #[error("surface {0:?} cannot be attached to itself")]
    OwnParent(String),

    #[error("viewport {width}x{height} is not finite")]
    InvalidViewport { width: f64, height: f64 },

    #[error("invalid {axis} for surface {id:?}: {source}")]
    Dimension {
        id: String,
        axis: Axis,
        #[source]
        source: DimensionError,
    },
}

pub struct Surface<H: Host> {
    id: String,
    kind: SurfaceKind,
    axes: Axes,
    geometry: Geometry,
    flippable: bool,
    visible: bool,
    element: H::Element,
    context: Option<H::Context>,
    parent: H::Element,
}

impl<H: Host> Surface<H> {
    /// Acquire (or reuse) the host element for `config.id`, apply the initial
    /// hidden style and geometry, and attach it to its parent.
    ///
    /// Nothing is created or attached when the geometry or the parent is
    /// rejected. An element the host hands back with the wrong context
    /// pairing, or that turns out to be the parent itself, is left to the
    /// host untouched and unattached.
    pub fn init(host: &mut H, config: SurfaceConfig) -> Result<Self, SurfaceError> {
        let SurfaceConfig {
            ref id,
            kind,
            flippable,
            ref parent,
            orientation,
            ..
        } = config;
        let axes = config.axes();
        let geometry = resolve(id, &axes)?;

        let parent = host.parent(parent.as_deref()).ok_or_else(|| {
            SurfaceError::ParentNotFound(parent.clone().unwrap_or_default())
        })?;

        let Some((element, context)) = host.create_or_locate(id, kind) else {
            tracing::error!(id = %id, %kind, "host cannot create element for surface kind");
            return Err(SurfaceError::Unsupported {
                id: id.clone(),
                kind,
            });
        };

        if element == parent {
            return Err(SurfaceError::OwnParent(id.clone()));
        }
        match (kind.is_raster(), context.is_some()) {
            (true, false) => return Err(SurfaceError::MissingContext(id.clone())),
            (false, true) => return Err(SurfaceError::UnexpectedContext(id.clone())),
            _ => {}
        }

        let surface = Self {
            id: config.id,
            kind,
            axes,
            geometry,
            flippable,
            visible: false,
            element,
            context,
            parent,
        };

        host.apply_style(&surface.element, &Style::hidden_absolute());
        if let Some(rect) = orientation {
            host.set_orientation_rect(&surface.element, rect);
        }
        surface.apply_geometry(host, geometry);
        host.attach(&surface.parent, &surface.element);

        tracing::debug!(id = %surface.id, kind = %surface.kind, ?geometry, "surface initialized");
        Ok(surface)
    }

    /// Merge `update` into the stored dimensions and re-apply all four axes.
    pub fn update(&mut self, host: &mut H, update: SurfaceUpdate) -> Result<Geometry, SurfaceError> {
        let next = update.merge_into(&self.axes);
        self.replace(host, next)
    }

    /// Transpose the surface: width/height and x/y swap wholesale, and the
    /// orientation rectangle (if the element has one) swaps its size fields.
    ///
    /// Returns `false` without touching anything when the surface is not
    /// flippable.
    pub fn flip(&mut self, host: &mut H) -> Result<bool, SurfaceError> {
        if !self.flippable {
            return Ok(false);
        }

        let next = self.axes.transposed();
        let geometry = resolve(&self.id, &next)?;

        if let Some(rect) = host.orientation_rect(&self.element) {
            let rect = rect.transposed();
            host.set_orientation_rect(&self.element, rect);
            tracing::debug!(id = %self.id, %rect, "orientation rect transposed");
        }

        self.commit(host, next, geometry);
        Ok(true)
    }

    /// Make the surface visible without drawing.
    pub fn render(&mut self, host: &mut H) {
        self.render_inner(host, None::<fn(&mut H::Context)>);
    }

    /// Make the surface visible and, for raster kinds, hand the rendering
    /// context to `draw`. Generic and vector surfaces never call `draw`.
    pub fn render_with<F>(&mut self, host: &mut H, draw: F)
    where
        F: FnOnce(&mut H::Context),
    {
        self.render_inner(host, Some(draw));
    }

    pub(crate) fn render_inner<F>(&mut self, host: &mut H, draw: Option<F>)
    where
        F: FnOnce(&mut H::Context),
    {
        host.apply_style(&self.element, &Style::visible());
        self.visible = true;

        if !self.kind.is_raster() {
            return;
        }
        match (draw, self.context.as_mut()) {
            (Some(draw), Some(context)) => draw(context),
            (None, _) => tracing::debug!(id = %self.id, "raster surface rendered without draw callback"),
            (Some(_), None) => {}
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> SurfaceKind {
        self.kind
    }

    /// The stored (unresolved) dimensions.
    pub fn axes(&self) -> &Axes {
        &self.axes
    }

    /// Current pixel geometry.
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn is_flippable(&self) -> bool {
        self.flippable
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn element(&self) -> &H::Element {
        &self.element
    }

    pub fn context(&self) -> Option<&H::Context> {
        self.context.as_ref()
    }

    pub fn context_mut(&mut self) -> Option<&mut H::Context> {
        self.context.as_mut()
    }

    fn replace(&mut self, host: &mut H, next: Axes) -> Result<Geometry, SurfaceError> {
        let geometry = resolve(&self.id, &next)?;
        self.commit(host, next, geometry);
        Ok(geometry)
    }

    fn commit(&mut self, host: &mut H, axes: Axes, geometry: Geometry) {
        self.axes = axes;
        self.geometry = geometry;
        self.apply_geometry(host, geometry);
    }

    fn apply_geometry(&self, host: &mut H, geometry: Geometry) {
        let mut style = Style {
            left: Some(geometry.x),
            top: Some(geometry.y),
            ..Style::default()
        };

        if self.kind.is_raster() {
            host.apply_intrinsic_size(
                &self.element,
                intrinsic(geometry.width),
                intrinsic(geometry.height),
            );
        } else {
            style.width = Some(geometry.width);
            style.height = Some(geometry.height);
        }

        host.apply_style(&self.element, &style);
        tracing::trace!(id = %self.id, ?geometry, "geometry applied");
    }
}

fn resolve(id: &str, axes: &Axes) -> Result<Geometry, SurfaceError> {
    axes.resolve().map_err(|(axis, source)| {
        tracing::warn!(id = %id, %axis, error = %source, "rejecting unresolvable geometry");
        SurfaceError::Dimension {
            id: id.to_string(),
            axis,
            source,
        }
    })
}

/// Backing-store sizes are whole, non-negative pixels.
fn intrinsic(pixels: f64) -> u32 {
    pixels.round().clamp(0.0, u32::MAX as f64) as u32
}

#[cfg(test)]
mod tests;
