use crate::bridge::view::{ParticleSlice, ParticleView};
use crate::error::{BridgeError, Result};
use crate::scene::{NodeId, Scene, SceneNode};

/// One scene proxy per particle, positions copied verbatim every frame.
#[derive(Debug, Clone)]
pub struct VisualMirror {
    proxies: Vec<NodeId>,
}

impl VisualMirror {
    /// Adds `count` sphere proxies to the scene by cloning a single template node.
    pub fn spawn_proxies(scene: &mut Scene, count: usize, radius: f32) -> Result<Vec<NodeId>> {
        let mut proxies = Vec::with_capacity(count);
        if count == 0 {
            return Ok(proxies);
        }
        let template = scene.add(SceneNode::proxy(radius));
        proxies.push(template);
        for _ in 1..count {
            proxies.push(scene.clone_node(template)?);
        }
        Ok(proxies)
    }

    /// Binds proxies to particles one-to-one; the counts must match.
    pub fn new(proxies: Vec<NodeId>, view: &ParticleView) -> Result<Self> {
        if proxies.len() != view.len() {
            return Err(BridgeError::ProxyCountMismatch {
                particles: view.len(),
                proxies: proxies.len(),
            });
        }
        Ok(Self { proxies })
    }

    /// Copies every particle position onto its proxy.
    pub fn refresh(&self, particles: &ParticleSlice<'_>, scene: &mut Scene) -> Result<()> {
        debug_assert_eq!(particles.len(), self.proxies.len());
        for (&proxy, position) in self.proxies.iter().zip(particles.positions()) {
            scene.set_position(proxy, position)?;
        }
        Ok(())
    }

    pub fn proxies(&self) -> &[NodeId] {
        &self.proxies
    }

    pub fn len(&self) -> usize {
        self.proxies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proxies.is_empty()
    }
}
