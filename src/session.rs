//! Single-owner session: the host, the presentation side and the bridge
//! components live on one thread and are driven through a command queue.

use std::collections::VecDeque;
use std::sync::Arc;

use log::{info, warn};
use parking_lot::Mutex;

use crate::bridge::{
    BoundaryProxy, FrameDriver, FrameReport, FrameScheduler, FrameTargets, ParamChange,
    ParameterBridge, ParticleView, VisualMirror,
};
use crate::config::SessionConfig;
use crate::core::types::{Axis, Extents, ForceParam, Tunable};
use crate::error::{BridgeError, Result};
use crate::host::SimulationHost;
use crate::scene::{Camera, CameraControls, ControlPanel, OrbitControls, Scene, SceneRenderer};

/// Work item delivered to the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Run one frame.
    Frame,
    /// Apply a parameter edit.
    Edit { tunable: Tunable, value: f32 },
}

/// FIFO of pending commands, shared between the panel and the session.
#[derive(Debug, Clone, Default)]
pub struct CommandQueue {
    inner: Arc<Mutex<VecDeque<Command>>>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, command: Command) {
        self.inner.lock().push_back(command);
    }

    pub fn pop(&self) -> Option<Command> {
        self.inner.lock().pop_front()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Takes every pending command, oldest first.
    pub fn drain(&self) -> Vec<Command> {
        self.inner.lock().drain(..).collect()
    }
}

/// What one [`Session::pump`] call did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PumpSummary {
    pub frames: u64,
    pub edits_applied: u64,
    pub edits_rejected: u64,
}

pub struct Session<H, R, C = OrbitControls>
where
    H: SimulationHost,
    R: SceneRenderer,
    C: CameraControls,
{
    host: H,
    renderer: R,
    controls: C,
    camera: Camera,
    scene: Scene,
    view: ParticleView,
    mirror: VisualMirror,
    boundary: BoundaryProxy,
    driver: FrameDriver,
    params: ParameterBridge,
    panel: ControlPanel,
    queue: CommandQueue,
}

impl<H, R> Session<H, R, OrbitControls>
where
    H: SimulationHost,
    R: SceneRenderer,
{
    /// Starts a session with damped orbit controls around the volume centre.
    pub fn new(host: H, renderer: R, config: &SessionConfig) -> Result<Self> {
        let extents = host_extents(&host);
        let camera = Camera::from_config(&config.camera, extents.center());
        let controls = OrbitControls::new(&camera, config.camera.damping);
        Self::with_controls(host, renderer, controls, config)
    }
}

impl<H, R, C> Session<H, R, C>
where
    H: SimulationHost,
    R: SceneRenderer,
    C: CameraControls,
{
    /// Startup: acquires the particle view, spawns one proxy per particle and
    /// the boundary wireframe, and binds panel controls to the host's values.
    pub fn with_controls(host: H, renderer: R, controls: C, config: &SessionConfig) -> Result<Self> {
        config.validate_session()?;
        let count = host.particle_count();
        if count == 0 {
            return Err(BridgeError::InvalidConfig("simulation reports no particles".into()));
        }

        let view = ParticleView::acquire(&host)?;
        let mut scene = Scene::with_capacity(count + 1);
        let proxies = VisualMirror::spawn_proxies(&mut scene, count, config.proxy_radius)?;
        let mirror = VisualMirror::new(proxies, &view)?;

        let extents = host_extents(&host);
        let boundary = BoundaryProxy::spawn(&mut scene, extents)?;
        let camera = Camera::from_config(&config.camera, extents.center());

        let queue = CommandQueue::new();
        let mut panel = ControlPanel::new(queue.clone());
        for tunable in Tunable::ALL {
            let current = tunable_value(&host, tunable);
            panel.register(tunable, config.panel.range_for(tunable), current);
        }

        mirror.refresh(&view.bind(host.memory())?, &mut scene)?;

        info!(
            "session started: {} particles, volume {}x{}x{}, {} scene nodes",
            count,
            extents.width,
            extents.height,
            extents.depth,
            scene.len()
        );

        Ok(Self {
            host,
            renderer,
            controls,
            camera,
            scene,
            view,
            mirror,
            boundary,
            driver: FrameDriver::new(config.clock, config.frame_budget_ms),
            params: ParameterBridge::new(),
            panel,
            queue,
        })
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn view(&self) -> &ParticleView {
        &self.view
    }

    pub fn mirror(&self) -> &VisualMirror {
        &self.mirror
    }

    pub fn boundary(&self) -> &BoundaryProxy {
        &self.boundary
    }

    pub fn driver(&self) -> &FrameDriver {
        &self.driver
    }

    pub fn params(&self) -> &ParameterBridge {
        &self.params
    }

    pub fn panel(&self) -> &ControlPanel {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut ControlPanel {
        &mut self.panel
    }

    /// Handle for feeding commands from elsewhere.
    pub fn queue(&self) -> CommandQueue {
        self.queue.clone()
    }

    pub fn controls_mut(&mut self) -> &mut C {
        &mut self.controls
    }

    /// Runs one frame of the driver.
    pub fn frame(&mut self) -> Result<FrameReport> {
        self.driver.advance(FrameTargets {
            host: &mut self.host,
            view: &mut self.view,
            mirror: &self.mirror,
            scene: &mut self.scene,
            camera: &mut self.camera,
            controls: &mut self.controls,
            renderer: &mut self.renderer,
        })
    }

    /// Applies one edit and keeps the panel showing the simulation's value.
    pub fn edit(&mut self, tunable: Tunable, value: f32) -> Result<ParamChange> {
        let result = self.params.apply(
            &mut self.host,
            &mut self.boundary,
            &mut self.scene,
            tunable,
            value,
        );
        let shown = tunable_value(&self.host, tunable);
        self.panel.sync(tunable, shown);
        result
    }

    pub fn edit_height(&mut self, value: f32) -> Result<ParamChange> {
        self.edit(Tunable::Height, value)
    }

    pub fn edit_width(&mut self, value: f32) -> Result<ParamChange> {
        self.edit(Tunable::Width, value)
    }

    pub fn edit_depth(&mut self, value: f32) -> Result<ParamChange> {
        self.edit(Tunable::Depth, value)
    }

    pub fn edit_gravity(&mut self, value: f32) -> Result<ParamChange> {
        self.edit(Tunable::Gravity, value)
    }

    pub fn edit_repulsion(&mut self, value: f32) -> Result<ParamChange> {
        self.edit(Tunable::Repulsion, value)
    }

    /// Drains pending commands in arrival order.
    ///
    /// Rejected edits are logged and counted; any fatal error stops the
    /// drain and is returned.
    pub fn pump(&mut self) -> Result<PumpSummary> {
        let mut summary = PumpSummary::default();
        while let Some(command) = self.queue.pop() {
            match command {
                Command::Frame => {
                    self.frame()?;
                    summary.frames += 1;
                }
                Command::Edit { tunable, value } => match self.edit(tunable, value) {
                    Ok(_) => summary.edits_applied += 1,
                    Err(err) if err.is_fatal() => return Err(err),
                    Err(err) => {
                        warn!("dropping queued edit: {err}");
                        summary.edits_rejected += 1;
                    }
                },
            }
        }
        Ok(summary)
    }

    /// Loops until the scheduler reports teardown. Returns the frames run.
    pub fn run<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) -> Result<u64> {
        let mut frames = 0;
        while scheduler.wait_for_frame() {
            frames += self.pump()?.frames;
            self.frame()?;
            frames += 1;
        }
        self.driver.profiler().report();
        Ok(frames)
    }
}

fn host_extents<H: SimulationHost>(host: &H) -> Extents {
    Extents::new(
        host.extent(Axis::Width),
        host.extent(Axis::Height),
        host.extent(Axis::Depth),
    )
}

fn tunable_value<H: SimulationHost>(host: &H, tunable: Tunable) -> f32 {
    match tunable {
        Tunable::Height => host.extent(Axis::Height),
        Tunable::Width => host.extent(Axis::Width),
        Tunable::Depth => host.extent(Axis::Depth),
        Tunable::Gravity => host.force_param(ForceParam::Gravity),
        Tunable::Repulsion => host.force_param(ForceParam::Repulsion),
    }
}
