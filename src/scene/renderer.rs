//! Renderer seam and a headless implementation that only gathers statistics.

use glam::{Mat4, Vec3};

use crate::error::Result;
use crate::scene::{Camera, NodeKind, Scene};

/// External renderer: draws the scene from the camera once per call.
pub trait SceneRenderer {
    fn name(&self) -> &str;

    fn render(&mut self, scene: &Scene, camera: &Camera) -> Result<()>;
}

/// Statistics of the most recent frame plus running totals.
#[derive(Debug, Clone, Default)]
pub struct RenderStats {
    /// Frames drawn so far
    pub frames: u64,
    /// Visible nodes in the last frame
    pub nodes_drawn: usize,
    /// Visible particle proxies in the last frame
    pub proxies_drawn: usize,
    /// Wireframes in the last frame
    pub wireframes_drawn: usize,
    /// Axis-aligned bounds of all proxy positions in the last frame
    pub proxy_bounds: Option<(Vec3, Vec3)>,
    /// Camera matrix used for the last frame
    pub view_projection: Mat4,
}

impl RenderStats {
    pub fn format_compact(&self) -> String {
        format!(
            "frame {} | {} nodes | {} proxies | {} wireframes",
            self.frames, self.nodes_drawn, self.proxies_drawn, self.wireframes_drawn
        )
    }
}

/// Renderer that walks the scene without drawing anything.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    stats: RenderStats,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> &RenderStats {
        &self.stats
    }
}

impl SceneRenderer for HeadlessRenderer {
    fn name(&self) -> &str {
        "headless"
    }

    fn render(&mut self, scene: &Scene, camera: &Camera) -> Result<()> {
        let mut nodes = 0;
        let mut proxies = 0;
        let mut wireframes = 0;
        let mut bounds: Option<(Vec3, Vec3)> = None;

        for (_, node) in scene.iter().filter(|(_, node)| node.visible) {
            nodes += 1;
            match node.kind {
                NodeKind::Proxy { .. } => {
                    proxies += 1;
                    let p = node.transform.position;
                    bounds = Some(match bounds {
                        Some((min, max)) => (min.min(p), max.max(p)),
                        None => (p, p),
                    });
                }
                NodeKind::Wireframe { .. } => wireframes += 1,
            }
        }

        self.stats.frames += 1;
        self.stats.nodes_drawn = nodes;
        self.stats.proxies_drawn = proxies;
        self.stats.wireframes_drawn = wireframes;
        self.stats.proxy_bounds = bounds;
        self.stats.view_projection = camera.view_projection();
        log::trace!("{}", self.stats.format_compact());
        Ok(())
    }
}
