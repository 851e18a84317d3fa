use serde::{Deserialize, Serialize};

use crate::host::Host;
use crate::manager::SurfaceManager;
use crate::surface::SurfaceError;

/// Cached size of the host viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn query<H: Host>(host: &H) -> Self {
        let (width, height) = host.viewport_size();
        Self { width, height }
    }
}

/// A surface manager kept in step with the host viewport.
///
/// The host wires its resize notification to [`handle_resize`] once; every
/// call re-reads the viewport and broadcasts it to the surfaces.
///
/// [`handle_resize`]: ResponsiveLayout::handle_resize
pub struct ResponsiveLayout<H: Host> {
    manager: SurfaceManager<H>,
}

impl<H: Host> ResponsiveLayout<H> {
    /// Read the current viewport and use it as the manager's defaults.
    pub fn new(host: &H) -> Self {
        let viewport = Viewport::query(host);
        let mut manager = SurfaceManager::new();
        manager.create(viewport.width, viewport.height);
        tracing::debug!(width = viewport.width, height = viewport.height, "layout created");
        Self { manager }
    }

    pub fn handle_resize(&mut self, host: &mut H) -> Result<Viewport, SurfaceError> {
        let viewport = Viewport::query(host);
        self.manager.resize(host, viewport.width, viewport.height)?;
        Ok(viewport)
    }

    /// The last viewport the manager accepted.
    pub fn viewport(&self) -> Viewport {
        let (width, height) = self.manager.viewport();
        Viewport::new(width, height)
    }

    pub fn manager(&self) -> &SurfaceManager<H> {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut SurfaceManager<H> {
        &mut self.manager
    }
}
