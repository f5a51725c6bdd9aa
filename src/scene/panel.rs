//! Live property panel: numeric controls bound to simulation tunables.

use log::debug;

use crate::config::ParamRange;
use crate::core::types::{Tunable, TunableTarget};
use crate::error::{BridgeError, Result};
use crate::session::{Command, CommandQueue};

/// One slider on the panel.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericControl {
    pub tunable: Tunable,
    pub range: ParamRange,
    pub value: f32,
}

impl NumericControl {
    /// Snaps `value` to the slider step and clamps it into range.
    pub fn quantize(&self, value: f32) -> f32 {
        let ParamRange { min, max, step } = self.range;
        let snapped = if step > 0.0 {
            min + ((value - min) / step).round() * step
        } else {
            value
        };
        snapped.clamp(min, max)
    }
}

/// Panel that turns slider moves into edit commands on the session queue.
pub struct ControlPanel {
    controls: Vec<NumericControl>,
    queue: CommandQueue,
}

impl ControlPanel {
    pub fn new(queue: CommandQueue) -> Self {
        Self {
            controls: Vec::new(),
            queue,
        }
    }

    /// Registers (or replaces) the control bound to `tunable`.
    pub fn register(&mut self, tunable: Tunable, range: ParamRange, value: f32) {
        let control = NumericControl {
            tunable,
            range,
            value: value.clamp(range.min, range.max),
        };
        match self.controls.iter_mut().find(|c| c.tunable == tunable) {
            Some(existing) => *existing = control,
            None => self.controls.push(control),
        }
    }

    pub fn control(&self, tunable: Tunable) -> Option<&NumericControl> {
        self.controls.iter().find(|c| c.tunable == tunable)
    }

    pub fn controls(&self) -> &[NumericControl] {
        &self.controls
    }

    /// Moves a slider. The value is snapped into range and queued as an edit.
    ///
    /// Returns the value actually queued.
    pub fn edit(&mut self, tunable: Tunable, value: f32) -> Result<f32> {
        if !value.is_finite() {
            return Err(match tunable.target() {
                TunableTarget::Extent(axis) => BridgeError::InvalidExtent { axis, value },
                TunableTarget::Force(param) => BridgeError::InvalidForceParam { param, value },
            });
        }

        let control = self
            .controls
            .iter_mut()
            .find(|c| c.tunable == tunable)
            .ok_or_else(|| {
                BridgeError::InvalidConfig(format!("no control registered for {}", tunable.name()))
            })?;

        let queued = control.quantize(value);
        control.value = queued;
        debug!("panel: {} -> {queued}", tunable.name());
        self.queue.push(Command::Edit {
            tunable,
            value: queued,
        });
        Ok(queued)
    }

    /// Updates the displayed value without queuing an edit.
    pub fn sync(&mut self, tunable: Tunable, value: f32) {
        if let Some(control) = self.controls.iter_mut().find(|c| c.tunable == tunable) {
            control.value = value;
        }
    }
}
