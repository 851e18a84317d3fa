// src/surface/tests.rs
use super::*;
use crate::dimension::Dimension;
use crate::host::headless::{HeadlessHost, HostCall, ROOT_ID};
use crate::host::{OrientationRect, Positioning, Visibility};

fn host() -> HeadlessHost {
    HeadlessHost::new(1024.0, 768.0)
}

#[test]
fn test_init_applies_defaults() {
    let mut host = host();
    let surface = Surface::init(&mut host, SurfaceConfig::new("panel")).unwrap();

    assert_eq!(surface.kind(), SurfaceKind::Generic);
    assert!(surface.is_flippable());
    assert!(!surface.is_visible());
    assert_eq!(
        surface.geometry(),
        Geometry {
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
            x: DEFAULT_OFFSET,
            y: DEFAULT_OFFSET,
        }
    );

    let record = host.element("panel").unwrap();
    assert_eq!(record.style.visibility, Some(Visibility::Hidden));
    assert_eq!(record.style.position, Some(Positioning::Absolute));
    assert_eq!(record.style.width, Some(300.0));
    assert_eq!(record.style.left, Some(10.0));
    assert_eq!(host.children(ROOT_ID), vec!["panel"]);
}

#[test]
fn test_init_raster_sets_intrinsic_size() {
    let mut host = host();
    let config = SurfaceConfig::new("canvas")
        .kind(SurfaceKind::Raster2D)
        .width(640.4)
        .height(480.6);
    let surface = Surface::init(&mut host, config).unwrap();

    assert!(surface.context().is_some());
    let record = host.element("canvas").unwrap();
    assert_eq!(record.intrinsic_size, Some((640, 481)));
    assert_eq!(record.style.width, None);
    assert_eq!(record.style.height, None);
    assert_eq!(record.style.left, Some(10.0));
}

#[test]
fn test_init_reuses_existing_element() {
    let mut host = host();
    host.insert_element("existing", SurfaceKind::Vector);
    Surface::init(&mut host, SurfaceConfig::new("existing").kind(SurfaceKind::Vector)).unwrap();

    assert_eq!(host.elements().len(), 1);
    assert_eq!(host.calls()[0], HostCall::Locate { id: "existing".into() });
}

#[test]
fn test_init_unsupported_kind_attaches_nothing() {
    let mut host = host().without_kind(SurfaceKind::Raster3D);
    let result = Surface::init(
        &mut host,
        SurfaceConfig::new("gl").kind(SurfaceKind::Raster3D),
    );

    assert!(matches!(
        result,
        Err(SurfaceError::Unsupported { ref id, kind: SurfaceKind::Raster3D }) if id == "gl"
    ));
    assert!(host.element("gl").is_none());
    assert!(host.children(ROOT_ID).is_empty());
}

#[test]
fn test_init_missing_context_leaves_element_unattached() {
    let mut host = host().without_contexts();
    let result = Surface::init(
        &mut host,
        SurfaceConfig::new("canvas").kind(SurfaceKind::Raster2D),
    );

    assert_eq!(result.err(), Some(SurfaceError::MissingContext("canvas".into())));
    assert!(host.element("canvas").unwrap().parent.is_none());
    assert!(host.children(ROOT_ID).is_empty());
    assert!(host.calls().iter().all(|call| matches!(call, HostCall::Create { .. })));
}

#[test]
fn test_init_rejects_own_parent() {
    let mut host = host();
    let result = Surface::init(&mut host, SurfaceConfig::new(ROOT_ID));

    assert_eq!(result.err(), Some(SurfaceError::OwnParent(ROOT_ID.into())));
    assert!(host.children(ROOT_ID).is_empty());
    assert!(host.calls().iter().all(|call| matches!(call, HostCall::Locate { .. })));
}

#[test]
fn test_init_seeds_orientation_rect() {
    let mut host = host();
    let rect = OrientationRect::new(0.0, 0.0, 852.0, 320.0);
    let mut surface = Surface::init(
        &mut host,
        SurfaceConfig::new("chart").kind(SurfaceKind::Vector).orientation(rect),
    )
    .unwrap();
    assert_eq!(host.element("chart").unwrap().orientation, Some(rect));

    surface.flip(&mut host).unwrap();
    assert_eq!(host.element("chart").unwrap().orientation, Some(rect.transposed()));
}

#[test]
fn test_init_rejects_unresolved_dimension() {
    let mut host = host();
    let config = SurfaceConfig::new("pending").width(Dimension::affine(1.0, -40.0));
    let result = Surface::init(&mut host, config);

    assert!(matches!(
        result,
        Err(SurfaceError::Dimension { axis: Axis::Width, .. })
    ));
    assert!(host.calls().is_empty());
}

#[test]
fn test_init_unknown_parent() {
    let mut host = host();
    let result = Surface::init(&mut host, SurfaceConfig::new("child").parent("missing"));
    assert_eq!(result.err(), Some(SurfaceError::ParentNotFound("missing".into())));
}

#[test]
fn test_init_with_parent() {
    let mut host = host();
    Surface::init(&mut host, SurfaceConfig::new("frame")).unwrap();
    Surface::init(&mut host, SurfaceConfig::new("inner").parent("frame")).unwrap();
    assert_eq!(host.children("frame"), vec!["inner"]);
    assert_eq!(host.children(ROOT_ID), vec!["frame"]);
}

#[test]
fn test_update_keeps_omitted_axes() {
    let mut host = host();
    let mut surface = Surface::init(
        &mut host,
        SurfaceConfig::new("s").width(100.0).height(50.0).x(1.0).y(2.0),
    )
    .unwrap();

    let geometry = surface
        .update(
            &mut host,
            SurfaceUpdate {
                height: Some(Dimension::Absolute(75.0)),
                ..SurfaceUpdate::default()
            },
        )
        .unwrap();

    assert_eq!(
        geometry,
        Geometry {
            width: 100.0,
            height: 75.0,
            x: 1.0,
            y: 2.0
        }
    );
    assert_eq!(host.element("s").unwrap().style.height, Some(75.0));
}

#[test]
fn test_update_variable_only_preserves_coefficients() {
    let mut host = host();
    let width = Dimension::Affine(crate::dimension::Affine {
        a: Some(0.5),
        b: Some(-10.0),
        x: Some(800.0),
    });
    let mut surface = Surface::init(&mut host, SurfaceConfig::new("s").width(width)).unwrap();
    assert_eq!(surface.geometry().width, 390.0);

    surface.update(&mut host, SurfaceUpdate::viewport(1000.0, 500.0)).unwrap();

    assert_eq!(surface.geometry().width, 490.0);
    assert_eq!(surface.axes().width.merge(Dimension::variable(1.0)).resolve(), Ok(-9.5));
    // Axes without coefficients take the raw viewport value.
    assert_eq!(surface.geometry().height, 500.0);
    assert_eq!(surface.geometry().x, 1000.0);
    assert_eq!(surface.geometry().y, 500.0);
}

#[test]
fn test_failed_update_leaves_surface_untouched() {
    let mut host = host();
    let mut surface = Surface::init(&mut host, SurfaceConfig::new("s")).unwrap();
    let before = *surface.axes();
    host.take_calls();

    let result = surface.update(
        &mut host,
        SurfaceUpdate {
            x: Some(Dimension::affine(2.0, 0.0)),
            ..SurfaceUpdate::default()
        },
    );

    assert!(matches!(result, Err(SurfaceError::Dimension { axis: Axis::X, .. })));
    assert_eq!(*surface.axes(), before);
    assert!(host.calls().is_empty());
}

#[test]
fn test_flip_transposes_and_restores() {
    let mut host = host();
    let mut surface = Surface::init(
        &mut host,
        SurfaceConfig::new("svg")
            .kind(SurfaceKind::Vector)
            .width(400.0)
            .height(200.0)
            .x(5.0)
            .y(15.0),
    )
    .unwrap();
    host.set_orientation("svg", OrientationRect::new(0.0, 0.0, 400.0, 200.0));
    let original = *surface.axes();

    assert!(surface.flip(&mut host).unwrap());
    assert_eq!(
        surface.geometry(),
        Geometry {
            width: 200.0,
            height: 400.0,
            x: 15.0,
            y: 5.0
        }
    );
    assert_eq!(
        host.element("svg").unwrap().orientation,
        Some(OrientationRect::new(0.0, 0.0, 200.0, 400.0))
    );

    assert!(surface.flip(&mut host).unwrap());
    assert_eq!(*surface.axes(), original);
    assert_eq!(
        host.element("svg").unwrap().orientation,
        Some(OrientationRect::new(0.0, 0.0, 400.0, 200.0))
    );
}

#[test]
fn test_flip_swaps_coefficients_wholesale() {
    let mut host = host();
    let mut surface = Surface::init(
        &mut host,
        SurfaceConfig::new("s")
            .width(Dimension::variable(800.0))
            .height(Dimension::affine(0.5, 0.0).merge(Dimension::variable(600.0))),
    )
    .unwrap();

    surface.flip(&mut host).unwrap();

    assert_eq!(surface.axes().width, Dimension::affine(0.5, 0.0).merge(Dimension::variable(600.0)));
    assert_eq!(surface.axes().height, Dimension::variable(800.0));
    assert_eq!(surface.geometry().width, 300.0);
    assert_eq!(surface.geometry().height, 800.0);
}

#[test]
fn test_flip_not_flippable_is_noop() {
    let mut host = host();
    let mut surface = Surface::init(
        &mut host,
        SurfaceConfig::new("fixed").width(100.0).height(20.0).flippable(false),
    )
    .unwrap();
    host.take_calls();

    assert!(!surface.flip(&mut host).unwrap());
    assert_eq!(surface.geometry().width, 100.0);
    assert_eq!(surface.geometry().height, 20.0);
    assert!(host.calls().is_empty());
}

#[test]
fn test_render_raster_calls_draw() {
    let mut host = host();
    let mut surface =
        Surface::init(&mut host, SurfaceConfig::new("c").kind(SurfaceKind::Raster3D)).unwrap();

    surface.render_with(&mut host, |context| context.push("clear"));

    assert!(surface.is_visible());
    assert_eq!(host.element("c").unwrap().style.visibility, Some(Visibility::Visible));
    assert_eq!(surface.context().unwrap().commands, vec!["clear".to_string()]);
    assert_eq!(surface.context().unwrap().kind, SurfaceKind::Raster3D);
}

#[test]
fn test_render_non_raster_skips_draw() {
    let mut host = host();
    let mut surface = Surface::init(&mut host, SurfaceConfig::new("div")).unwrap();
    let mut called = false;

    surface.render_with(&mut host, |_| called = true);

    assert!(!called);
    assert!(surface.is_visible());
}

#[test]
fn test_render_raster_without_draw_is_noop() {
    let mut host = host();
    let mut surface =
        Surface::init(&mut host, SurfaceConfig::new("c").kind(SurfaceKind::Raster2D)).unwrap();

    surface.render(&mut host);

    assert!(surface.is_visible());
    assert!(surface.context().unwrap().commands.is_empty());
}
