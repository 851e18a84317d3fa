//! Responsive layout for rectangular drawable surfaces.
//!
//! Each [`Surface`] stores its width, height and position as [`Dimension`]s:
//! absolute pixels, or `a * x + b` of a viewport variable. A
//! [`SurfaceManager`] owns the surfaces and broadcasts viewport changes and
//! flips to them; the window system itself stays behind the [`Host`] trait.

pub mod config;
pub mod dimension;
pub mod host;
pub mod manager;
pub mod shared;
pub mod surface;
pub mod viewport;

pub use config::{ConfigError, LayoutConfig};
pub use dimension::{Affine, Dimension, DimensionError};
pub use host::{HeadlessHost, Host, OrientationRect, Style};
pub use manager::{SurfaceHandle, SurfaceManager};
pub use shared::SharedLayout;
pub use surface::{Geometry, Surface, SurfaceConfig, SurfaceError, SurfaceKind, SurfaceUpdate};
pub use viewport::{ResponsiveLayout, Viewport};
