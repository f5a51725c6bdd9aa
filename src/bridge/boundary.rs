//! Wireframe box kept congruent with the simulation's corner-anchored volume.
//!
//! The wireframe geometry is authored centred on its node origin, while the
//! simulation spans `[0, extent]` on each axis. Scaling a centred mesh moves
//! both faces, so every resize is paired with a translation of half the
//! change, which keeps the face at the origin fixed.

use glam::Vec3;

use crate::core::types::{Axis, Extents, Transform};
use crate::error::{BridgeError, Result};
use crate::scene::{NodeId, Scene, SceneNode};

/// Relative gap between box and simulation beyond which a resize is absolute.
const DRIFT_TOLERANCE: f32 = 1e-4;

/// Rejects zero, negative and non-finite extents.
pub fn validate_extent(axis: Axis, value: f32) -> Result<f32> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(BridgeError::InvalidExtent { axis, value })
    }
}

/// Transform that maps a centred box of size `base` onto `[0, extents]`.
pub fn box_transform(extents: Extents, base: Extents) -> Result<Transform> {
    for axis in Axis::ALL {
        validate_extent(axis, extents.get(axis))?;
        validate_extent(axis, base.get(axis))?;
    }
    let size = extents.to_vec3();
    Ok(Transform::from_scale_translation(
        size / base.to_vec3(),
        size * 0.5,
    ))
}

/// The single wireframe node standing in for the bounding volume.
#[derive(Debug, Clone)]
pub struct BoundaryProxy {
    node: NodeId,
    base: Extents,
    transform: Transform,
}

impl BoundaryProxy {
    /// Adds a wireframe authored at `extents` and places it over `[0, extents]`.
    pub fn spawn(scene: &mut Scene, extents: Extents) -> Result<Self> {
        let transform = box_transform(extents, extents)?;
        let node = scene.add(SceneNode::wireframe(extents.to_vec3()));
        scene.set_transform(node, transform)?;
        Ok(Self {
            node,
            base: extents,
            transform,
        })
    }

    /// Moves the box along `axis` from `old` to `new`.
    ///
    /// Both values are validated before any arithmetic; on error the proxy
    /// and the scene are unchanged.
    pub fn apply_extent_change(
        &mut self,
        scene: &mut Scene,
        axis: Axis,
        old: f32,
        new: f32,
    ) -> Result<()> {
        let transform = self.plan_extent_change(axis, old, new)?;
        self.place(scene, transform)
    }

    /// Transform for a move along `axis` from `old` to `new`, leaving the
    /// scene untouched.
    ///
    /// While the box still spans `old` it is rescaled by `new / old` and
    /// shifted by `(new - old) / 2`. If the simulation moved that face on
    /// its own since the last edit, the axis is placed absolutely instead.
    pub fn plan_extent_change(&self, axis: Axis, old: f32, new: f32) -> Result<Transform> {
        validate_extent(axis, old)?;
        validate_extent(axis, new)?;

        let c = axis.component();
        let size = self.world_size();
        if (size[c] - old).abs() > old * DRIFT_TOLERANCE {
            let mut extents = Extents::from_vec3(size);
            extents.set(axis, new);
            return box_transform(extents, self.base);
        }

        let mut transform = self.transform;
        transform.scale[c] *= new / old;
        transform.position[c] += (new - old) / 2.0;
        Ok(transform)
    }

    /// Writes a planned transform to the node.
    pub fn place(&mut self, scene: &mut Scene, transform: Transform) -> Result<()> {
        scene.set_transform(self.node, transform)?;
        self.transform = transform;
        Ok(())
    }

    /// Absolute resize to `extents`, independent of the current transform.
    pub fn resync(&mut self, scene: &mut Scene, extents: Extents) -> Result<()> {
        let transform = box_transform(extents, self.base)?;
        self.place(scene, transform)
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Size the geometry was authored at.
    pub fn base(&self) -> Extents {
        self.base
    }

    /// World-space size of the box.
    pub fn world_size(&self) -> Vec3 {
        self.base.to_vec3() * self.transform.scale
    }

    pub fn world_min(&self) -> Vec3 {
        self.transform.position - self.world_size() * 0.5
    }

    pub fn world_max(&self) -> Vec3 {
        self.transform.position + self.world_size() * 0.5
    }
}
