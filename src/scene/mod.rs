//! Presentation-side collaborators: scene graph, renderer seam, camera and control panel.

pub mod camera;
pub mod panel;
pub mod renderer;

pub use camera::{Camera, CameraControls, FixedControls, OrbitControls};
pub use panel::{ControlPanel, NumericControl};
pub use renderer::{HeadlessRenderer, RenderStats, SceneRenderer};

use glam::Vec3;

use crate::core::types::Transform;
use crate::error::{BridgeError, Result};
use crate::utils::allocator::{Arena, EntityId};

/// Handle to a node in a [`Scene`].
pub type NodeId = EntityId;

/// Geometry carried by a scene node. Geometry is authored centred on the node origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeKind {
    /// Sphere standing in for one particle.
    Proxy { radius: f32 },
    /// Wireframe box of the given size.
    Wireframe { size: Vec3 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneNode {
    pub kind: NodeKind,
    pub transform: Transform,
    pub visible: bool,
}

impl SceneNode {
    pub fn proxy(radius: f32) -> Self {
        Self {
            kind: NodeKind::Proxy { radius },
            transform: Transform::default(),
            visible: true,
        }
    }

    pub fn wireframe(size: Vec3) -> Self {
        Self {
            kind: NodeKind::Wireframe { size },
            transform: Transform::default(),
            visible: true,
        }
    }
}

/// Flat scene graph backed by a generational arena.
#[derive(Default)]
pub struct Scene {
    nodes: Arena<SceneNode>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
        }
    }

    pub fn add(&mut self, node: SceneNode) -> NodeId {
        self.nodes.insert(node)
    }

    /// Adds a copy of an existing node and returns the new handle.
    pub fn clone_node(&mut self, id: NodeId) -> Result<NodeId> {
        let node = *self.node(id)?;
        Ok(self.nodes.insert(node))
    }

    pub fn remove(&mut self, id: NodeId) -> Option<SceneNode> {
        self.nodes.remove(id)
    }

    pub fn node(&self, id: NodeId) -> Result<&SceneNode> {
        self.nodes.get(id).ok_or(BridgeError::NodeNotFound(id))
    }

    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut SceneNode> {
        self.nodes.get_mut(id).ok_or(BridgeError::NodeNotFound(id))
    }

    pub fn transform(&self, id: NodeId) -> Result<Transform> {
        Ok(self.node(id)?.transform)
    }

    pub fn set_transform(&mut self, id: NodeId, transform: Transform) -> Result<()> {
        self.node_mut(id)?.transform = transform;
        Ok(())
    }

    #[inline]
    pub fn set_position(&mut self, id: NodeId, position: Vec3) -> Result<()> {
        self.node_mut(id)?.transform.position = position;
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> + '_ {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
