use log::{info, warn};

use crate::bridge::boundary::{validate_extent, BoundaryProxy};
use crate::core::types::{ForceParam, Tunable, TunableTarget};
use crate::error::{BridgeError, Result};
use crate::host::SimulationHost;
use crate::scene::Scene;

/// An edit that made it into the simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamChange {
    pub tunable: Tunable,
    /// Simulation value read immediately before the edit.
    pub old: f32,
    pub new: f32,
}

/// Rejects force parameters the simulation cannot integrate with.
pub fn validate_force_param(param: ForceParam, value: f32) -> Result<f32> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(BridgeError::InvalidForceParam { param, value })
    }
}

/// Pushes panel edits into the simulation and keeps the boundary proxy in step.
///
/// Each edit is one uninterrupted read-old, write-new, rescale sequence.
/// Nothing is written until the box transform is known.
#[derive(Debug, Default)]
pub struct ParameterBridge {
    applied: u64,
    rejected: u64,
}

impl ParameterBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply<H: SimulationHost>(
        &mut self,
        host: &mut H,
        boundary: &mut BoundaryProxy,
        scene: &mut Scene,
        tunable: Tunable,
        value: f32,
    ) -> Result<ParamChange> {
        let result = Self::apply_inner(host, boundary, scene, tunable, value);
        match &result {
            Ok(change) => {
                self.applied += 1;
                info!("{}: {} -> {}", tunable.name(), change.old, change.new);
            }
            Err(err) => {
                self.rejected += 1;
                warn!("rejected {} edit: {err}", tunable.name());
            }
        }
        result
    }

    fn apply_inner<H: SimulationHost>(
        host: &mut H,
        boundary: &mut BoundaryProxy,
        scene: &mut Scene,
        tunable: Tunable,
        value: f32,
    ) -> Result<ParamChange> {
        match tunable.target() {
            TunableTarget::Extent(axis) => {
                let new = validate_extent(axis, value)?;
                let old = validate_extent(axis, host.extent(axis))?;
                let transform = boundary.plan_extent_change(axis, old, new)?;
                scene.node(boundary.node())?;
                host.set_extent(axis, new);
                boundary.place(scene, transform)?;
                Ok(ParamChange { tunable, old, new })
            }
            TunableTarget::Force(param) => {
                let new = validate_force_param(param, value)?;
                let old = host.force_param(param);
                host.set_force_param(param, new);
                Ok(ParamChange { tunable, old, new })
            }
        }
    }

    /// Edits accepted so far.
    pub fn applied(&self) -> u64 {
        self.applied
    }

    /// Edits rejected so far.
    pub fn rejected(&self) -> u64 {
        self.rejected
    }
}
