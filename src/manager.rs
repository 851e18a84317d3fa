//! Ordered collection of surfaces sharing one viewport.
//!
//! The manager owns every surface it adds, in insertion order, and
//! broadcasts structural changes (flip, viewport resize) to all of them in
//! that order. Surfaces are never removed individually.

use crate::dimension::Dimension;
use crate::host::Host;
use crate::surface::{Surface, SurfaceConfig, SurfaceError, SurfaceUpdate};

/// Position of a surface inside its manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceHandle(usize);

impl SurfaceHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

pub struct SurfaceManager<H: Host> {
    default_width: f64,
    default_height: f64,
    /// Last viewport size seen through `create` or `resize`.
    viewport: (f64, f64),
    surfaces: Vec<Surface<H>>,
    flipped: bool,
}

impl<H: Host> SurfaceManager<H> {
    pub fn new() -> Self {
        Self {
            default_width: 0.0,
            default_height: 0.0,
            viewport: (0.0, 0.0),
            surfaces: Vec::new(),
            flipped: false,
        }
    }

    /// Set the width and height given to surfaces added without one.
    ///
    /// The defaults double as the current viewport until the next `resize`.
    pub fn create(&mut self, width: f64, height: f64) {
        self.default_width = width;
        self.default_height = height;
        self.viewport = (width, height);
    }

    /// Initialize a surface, make it visible, and append it.
    pub fn add_surface(&mut self, host: &mut H, config: SurfaceConfig) -> Result<SurfaceHandle, SurfaceError> {
        self.add_surface_inner(host, config, None::<fn(&mut H::Context)>)
    }

    /// Like [`add_surface`](Self::add_surface), drawing raster surfaces with
    /// `draw` right after they become visible.
    pub fn add_surface_with<F>(
        &mut self,
        host: &mut H,
        config: SurfaceConfig,
        draw: F,
    ) -> Result<SurfaceHandle, SurfaceError>
    where
        F: FnOnce(&mut H::Context),
    {
        self.add_surface_inner(host, config, Some(draw))
    }

    fn add_surface_inner<F>(
        &mut self,
        host: &mut H,
        mut config: SurfaceConfig,
        draw: Option<F>,
    ) -> Result<SurfaceHandle, SurfaceError>
    where
        F: FnOnce(&mut H::Context),
    {
        fill_default(&mut config.width, self.default_width);
        fill_default(&mut config.height, self.default_height);

        let (viewport_width, viewport_height) = self.viewport;
        bind_variable(&mut config.width, viewport_width);
        bind_variable(&mut config.x, viewport_width);
        bind_variable(&mut config.height, viewport_height);
        bind_variable(&mut config.y, viewport_height);

        let mut surface = Surface::init(host, config)?;
        surface.render_inner(host, draw);

        let handle = SurfaceHandle(self.surfaces.len());
        tracing::info!(id = surface.id(), index = handle.0, "surface added");
        self.surfaces.push(surface);
        Ok(handle)
    }

    /// Toggle the flipped state and flip every surface in insertion order.
    ///
    /// Returns the new flipped state. A surface that fails to flip is logged
    /// and skipped; the first such error is returned once all surfaces have
    /// been visited.
    pub fn flip(&mut self, host: &mut H) -> Result<bool, SurfaceError> {
        self.flipped = !self.flipped;
        tracing::info!(flipped = self.flipped, count = self.surfaces.len(), "flipping surfaces");
        self.broadcast(|surface| surface.flip(host).map(|_| ()))?;
        Ok(self.flipped)
    }

    /// Push a new viewport size through every surface as a variable-only
    /// update, so each keeps its own affine coefficients.
    ///
    /// A non-finite size is rejected before anything changes.
    pub fn resize(&mut self, host: &mut H, width: f64, height: f64) -> Result<(), SurfaceError> {
        if !width.is_finite() || !height.is_finite() {
            tracing::warn!(width, height, "ignoring non-finite viewport");
            return Err(SurfaceError::InvalidViewport { width, height });
        }
        self.viewport = (width, height);
        tracing::info!(width, height, count = self.surfaces.len(), "resizing surfaces");
        let update = SurfaceUpdate::viewport(width, height);
        self.broadcast(|surface| surface.update(host, update).map(|_| ()))
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn defaults(&self) -> (f64, f64) {
        (self.default_width, self.default_height)
    }

    pub fn viewport(&self) -> (f64, f64) {
        self.viewport
    }

    pub fn surface(&self, handle: SurfaceHandle) -> Option<&Surface<H>> {
        self.surfaces.get(handle.0)
    }

    pub fn surface_mut(&mut self, handle: SurfaceHandle) -> Option<&mut Surface<H>> {
        self.surfaces.get_mut(handle.0)
    }

    pub fn find(&self, id: &str) -> Option<&Surface<H>> {
        self.surfaces.iter().find(|surface| surface.id() == id)
    }

    pub fn surfaces(&self) -> &[Surface<H>] {
        &self.surfaces
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    fn broadcast<F>(&mut self, mut apply: F) -> Result<(), SurfaceError>
    where
        F: FnMut(&mut Surface<H>) -> Result<(), SurfaceError>,
    {
        let mut first_error = None;
        for surface in &mut self.surfaces {
            if let Err(e) = apply(&mut *surface) {
                tracing::warn!(id = surface.id(), error = %e, "surface rejected broadcast");
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

impl<H: Host> Default for SurfaceManager<H> {
    fn default() -> Self {
        Self::new()
    }
}

/// Absent (or zero) sizes fall back to the manager default.
fn fill_default(slot: &mut Option<Dimension>, default: f64) {
    if slot.map_or(true, |dimension| dimension.is_unset()) {
        *slot = Some(Dimension::Absolute(default));
    }
}

/// Affine axes configured without a variable start from the current viewport.
fn bind_variable(slot: &mut Option<Dimension>, variable: f64) {
    if let Some(dimension) = slot.as_mut().filter(|dimension| dimension.needs_variable()) {
        *dimension = dimension.merge(Dimension::variable(variable));
    }
}
