//! In-memory host that records every call.
//!
//! Used by the demo binary and by tests. Elements live in an arena indexed
//! by [`ElementId`]; the root element always exists at index 0.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use super::{Host, OrientationRect, Style};
use crate::surface::SurfaceKind;

pub const ROOT_ID: &str = "root";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ElementId(usize);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementRecord {
    pub id: String,
    /// `None` for the root element.
    pub kind: Option<SurfaceKind>,
    pub style: Style,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intrinsic_size: Option<(u32, u32)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<OrientationRect>,
    #[serde(skip)]
    pub parent: Option<ElementId>,
    #[serde(skip)]
    pub children: Vec<ElementId>,
}

/// One host primitive invocation, by element id.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    Create { id: String, kind: SurfaceKind },
    Locate { id: String },
    Attach { parent: String, child: String },
    Style { id: String, style: Style },
    IntrinsicSize { id: String, width: u32, height: u32 },
    OrientationRect { id: String, rect: OrientationRect },
}

impl HostCall {
    pub fn id(&self) -> &str {
        match self {
            HostCall::Create { id, .. }
            | HostCall::Locate { id }
            | HostCall::Style { id, .. }
            | HostCall::IntrinsicSize { id, .. }
            | HostCall::OrientationRect { id, .. } => id,
            HostCall::Attach { child, .. } => child,
        }
    }
}

/// Rendering context handed to draw callbacks of raster surfaces.
#[derive(Debug)]
pub struct HeadlessContext {
    pub element: ElementId,
    pub kind: SurfaceKind,
    pub commands: Vec<String>,
}

impl HeadlessContext {
    pub fn push(&mut self, command: impl Into<String>) {
        self.commands.push(command.into());
    }
}

#[derive(Debug)]
pub struct HeadlessHost {
    viewport: (f64, f64),
    elements: Vec<ElementRecord>,
    by_id: HashMap<String, ElementId>,
    unsupported: HashSet<SurfaceKind>,
    contexts: bool,
    calls: Vec<HostCall>,
}

impl HeadlessHost {
    pub fn new(width: f64, height: f64) -> Self {
        let root = ElementRecord {
            id: ROOT_ID.to_string(),
            kind: None,
            style: Style::default(),
            intrinsic_size: None,
            orientation: None,
            parent: None,
            children: Vec::new(),
        };
        Self {
            viewport: (width, height),
            by_id: HashMap::from([(ROOT_ID.to_string(), ElementId(0))]),
            elements: vec![root],
            unsupported: HashSet::new(),
            contexts: true,
            calls: Vec::new(),
        }
    }

    /// Refuse to create elements of `kind`, like a platform lacking a
    /// 3D context.
    pub fn without_kind(mut self, kind: SurfaceKind) -> Self {
        self.unsupported.insert(kind);
        self
    }

    /// Hand out raster elements without a rendering context, like a
    /// platform whose context creation fails after the element exists.
    pub fn without_contexts(mut self) -> Self {
        self.contexts = false;
        self
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport = (width, height);
    }

    /// Add a detached element that later surfaces can locate by id.
    pub fn insert_element(&mut self, id: &str, kind: SurfaceKind) -> ElementId {
        let element = ElementId(self.elements.len());
        self.elements.push(ElementRecord {
            id: id.to_string(),
            kind: Some(kind),
            style: Style::default(),
            intrinsic_size: None,
            orientation: None,
            parent: None,
            children: Vec::new(),
        });
        self.by_id.insert(id.to_string(), element);
        element
    }

    /// Seed the orientation rectangle of an existing element.
    pub fn set_orientation(&mut self, id: &str, rect: OrientationRect) -> bool {
        match self.by_id.get(id) {
            Some(element) => {
                self.elements[element.0].orientation = Some(rect);
                true
            }
            None => false,
        }
    }

    pub fn element(&self, id: &str) -> Option<&ElementRecord> {
        self.by_id.get(id).map(|element| &self.elements[element.0])
    }

    /// Ids of the children of `id`, in attach order.
    pub fn children(&self, id: &str) -> Vec<&str> {
        self.element(id)
            .map(|record| {
                record
                    .children
                    .iter()
                    .map(|child| self.elements[child.0].id.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// All elements except the root, in creation order.
    pub fn elements(&self) -> &[ElementRecord] {
        &self.elements[1..]
    }

    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<HostCall> {
        std::mem::take(&mut self.calls)
    }

    fn id_of(&self, element: ElementId) -> String {
        self.elements[element.0].id.clone()
    }
}

impl Host for HeadlessHost {
    type Element = ElementId;
    type Context = HeadlessContext;

    fn create_or_locate(
        &mut self,
        id: &str,
        kind: SurfaceKind,
    ) -> Option<(ElementId, Option<HeadlessContext>)> {
        if self.unsupported.contains(&kind) {
            return None;
        }

        let element = match self.by_id.get(id) {
            Some(&element) => {
                self.calls.push(HostCall::Locate { id: id.to_string() });
                self.elements[element.0].kind = Some(kind);
                element
            }
            None => {
                self.calls.push(HostCall::Create {
                    id: id.to_string(),
                    kind,
                });
                self.insert_element(id, kind)
            }
        };

        let context = (self.contexts && kind.is_raster()).then(|| HeadlessContext {
            element,
            kind,
            commands: Vec::new(),
        });
        Some((element, context))
    }

    fn parent(&self, id: Option<&str>) -> Option<ElementId> {
        self.by_id.get(id.unwrap_or(ROOT_ID)).copied()
    }

    fn attach(&mut self, parent: &ElementId, element: &ElementId) {
        if let Some(previous) = self.elements[element.0].parent.take() {
            self.elements[previous.0].children.retain(|child| child != element);
        }
        self.elements[parent.0].children.push(*element);
        self.elements[element.0].parent = Some(*parent);
        let (parent, child) = (self.id_of(*parent), self.id_of(*element));
        self.calls.push(HostCall::Attach { parent, child });
    }

    fn apply_style(&mut self, element: &ElementId, style: &Style) {
        self.elements[element.0].style.apply(style);
        let id = self.id_of(*element);
        self.calls.push(HostCall::Style { id, style: *style });
    }

    fn apply_intrinsic_size(&mut self, element: &ElementId, width: u32, height: u32) {
        self.elements[element.0].intrinsic_size = Some((width, height));
        let id = self.id_of(*element);
        self.calls.push(HostCall::IntrinsicSize { id, width, height });
    }

    fn orientation_rect(&self, element: &ElementId) -> Option<OrientationRect> {
        self.elements[element.0].orientation
    }

    fn set_orientation_rect(&mut self, element: &ElementId, rect: OrientationRect) {
        self.elements[element.0].orientation = Some(rect);
        let id = self.id_of(*element);
        self.calls.push(HostCall::OrientationRect { id, rect });
    }

    fn viewport_size(&self) -> (f64, f64) {
        self.viewport
    }
}
