//! Thread-safe handle around a host and its layout.
//!
//! Surface updates read and write each axis non-atomically, so any host that
//! delivers resize notifications from another thread goes through this
//! handle: every operation holds the lock for its whole broadcast.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::host::Host;
use crate::manager::SurfaceHandle;
use crate::surface::{SurfaceConfig, SurfaceError};
use crate::viewport::{ResponsiveLayout, Viewport};

struct Inner<H: Host> {
    host: H,
    layout: ResponsiveLayout<H>,
}

pub struct SharedLayout<H: Host> {
    inner: Arc<Mutex<Inner<H>>>,
}

impl<H: Host> SharedLayout<H> {
    pub fn new(host: H) -> Self {
        let layout = ResponsiveLayout::new(&host);
        Self {
            inner: Arc::new(Mutex::new(Inner { host, layout })),
        }
    }

    /// Resize entry point for the host's notification.
    pub fn handle_resize(&self) -> Result<Viewport, SurfaceError> {
        let mut guard = self.inner.lock();
        let Inner { host, layout } = &mut *guard;
        layout.handle_resize(host)
    }

    pub fn flip(&self) -> Result<bool, SurfaceError> {
        let mut guard = self.inner.lock();
        let Inner { host, layout } = &mut *guard;
        layout.manager_mut().flip(host)
    }

    pub fn add_surface(&self, config: SurfaceConfig) -> Result<SurfaceHandle, SurfaceError> {
        self.with(|host, layout| layout.manager_mut().add_surface(host, config))
    }

    pub fn add_surface_with<F>(&self, config: SurfaceConfig, draw: F) -> Result<SurfaceHandle, SurfaceError>
    where
        F: FnOnce(&mut H::Context),
    {
        self.with(|host, layout| layout.manager_mut().add_surface_with(host, config, draw))
    }

    /// Run `f` with exclusive access to the host and the layout.
    pub fn with<R>(&self, f: impl FnOnce(&mut H, &mut ResponsiveLayout<H>) -> R) -> R {
        let mut guard = self.inner.lock();
        let Inner { host, layout } = &mut *guard;
        f(host, layout)
    }
}

impl<H: Host> Clone for SharedLayout<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimension::Dimension;
    use crate::host::HeadlessHost;
    use std::thread;

    #[test]
    fn test_clone_shares_state() {
        let first = SharedLayout::new(HeadlessHost::new(800.0, 600.0));
        let second = first.clone();

        first.add_surface(SurfaceConfig::new("a")).unwrap();
        assert!(second.flip().unwrap());

        let (count, flipped) = first.with(|_, layout| {
            (layout.manager().len(), layout.manager().is_flipped())
        });
        assert_eq!(count, 1);
        assert!(flipped);
    }

    #[test]
    fn test_concurrent_resizes_serialize() {
        let shared = SharedLayout::new(HeadlessHost::new(800.0, 600.0));
        let handle = shared
            .add_surface(SurfaceConfig::new("a").width(Dimension::affine(0.5, 0.0)))
            .unwrap();

        let workers: Vec<_> = (1..=8)
            .map(|i| {
                let shared = shared.clone();
                thread::spawn(move || {
                    shared.with(|host, _| host.set_viewport(100.0 * i as f64, 50.0 * i as f64));
                    shared.handle_resize().unwrap();
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        shared.handle_resize().unwrap();
        shared.with(|host, layout| {
            let (width, height) = host.viewport_size();
            let geometry = layout.manager().surface(handle).unwrap().geometry();
            assert_eq!(geometry.width, width * 0.5);
            assert_eq!(geometry.height, height);
            assert_eq!(layout.viewport(), Viewport::new(width, height));
        });
    }
}
