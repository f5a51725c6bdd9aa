//! Error types for the particle bridge.
//!
//! This module provides a unified error type [`BridgeError`] and a convenient [`Result`] alias.

use std::fmt;

use crate::core::types::{Axis, ForceParam};
use crate::utils::allocator::EntityId;

/// Main error type for the bridge.
#[derive(Debug)]
pub enum BridgeError {
    /// A particle view was read after the simulation's memory moved.
    StaleView {
        view_generation: u32,
        memory_generation: u32,
    },
    /// The particle buffer does not hold exactly `count * 6` floats.
    BufferLengthMismatch { expected: usize, actual: usize },
    /// The particle buffer extends past the end of linear memory.
    BufferOutOfBounds {
        offset: usize,
        bytes: usize,
        memory_bytes: usize,
    },
    /// The particle buffer offset is not aligned for `f32` records.
    MisalignedBuffer { offset: usize },
    /// The number of visual proxies differs from the particle count.
    ProxyCountMismatch { particles: usize, proxies: usize },
    /// An extent edit was zero, negative or not finite.
    InvalidExtent { axis: Axis, value: f32 },
    /// A force parameter edit was not finite.
    InvalidForceParam { param: ForceParam, value: f32 },
    /// Linear memory cannot grow past its page limit.
    MemoryExhausted { requested_pages: usize, max_pages: usize },
    /// A scene node id no longer refers to a live node.
    NodeNotFound(EntityId),
    /// Configuration values are inconsistent.
    InvalidConfig(String),
    /// Configuration could not be parsed.
    ConfigParse(serde_json::Error),
    /// The external renderer failed to draw a frame.
    Render(String),
}

impl BridgeError {
    /// Whether the error means bridge state can no longer be trusted.
    ///
    /// Invalid-parameter conditions are not fatal: the edit is dropped and
    /// both the simulation and the boundary proxy are left as they were.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::StaleView { .. }
            | Self::BufferLengthMismatch { .. }
            | Self::BufferOutOfBounds { .. }
            | Self::MisalignedBuffer { .. }
            | Self::ProxyCountMismatch { .. }
            | Self::MemoryExhausted { .. }
            | Self::NodeNotFound(_)
            | Self::Render(_) => true,
            Self::InvalidExtent { .. }
            | Self::InvalidForceParam { .. }
            | Self::InvalidConfig(_)
            | Self::ConfigParse(_) => false,
        }
    }
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::StaleView {
                view_generation,
                memory_generation,
            } => write!(
                f,
                "Stale particle view: taken at memory generation {view_generation}, memory is at {memory_generation}"
            ),
            Self::BufferLengthMismatch { expected, actual } => write!(
                f,
                "Particle buffer length mismatch: expected {expected} floats, got {actual}"
            ),
            Self::BufferOutOfBounds {
                offset,
                bytes,
                memory_bytes,
            } => write!(
                f,
                "Particle buffer out of bounds: {bytes} bytes at offset {offset} exceed {memory_bytes} bytes of memory"
            ),
            Self::MisalignedBuffer { offset } => {
                write!(f, "Particle buffer offset {offset} is not 4-byte aligned")
            }
            Self::ProxyCountMismatch { particles, proxies } => write!(
                f,
                "Visual proxy count mismatch: {particles} particles, {proxies} proxies"
            ),
            Self::InvalidExtent { axis, value } => {
                write!(f, "Invalid {} extent: {value}", axis.name())
            }
            Self::InvalidForceParam { param, value } => {
                write!(f, "Invalid {} value: {value}", param.name())
            }
            Self::MemoryExhausted {
                requested_pages,
                max_pages,
            } => write!(
                f,
                "Linear memory exhausted: {requested_pages} pages requested, limit is {max_pages}"
            ),
            Self::NodeNotFound(id) => write!(
                f,
                "Scene node not found: index {} generation {}",
                id.index(),
                id.generation()
            ),
            Self::InvalidConfig(msg) => write!(f, "Invalid configuration: {msg}"),
            Self::ConfigParse(err) => write!(f, "Configuration parse error: {err}"),
            Self::Render(msg) => write!(f, "Render failed: {msg}"),
        }
    }
}

impl std::error::Error for BridgeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ConfigParse(err) => Some(err),
            _ => None,
        }
    }
}

/// Convenient Result type alias for bridge operations.
pub type Result<T> = std::result::Result<T, BridgeError>;

impl From<serde_json::Error> for BridgeError {
    fn from(err: serde_json::Error) -> Self {
        Self::ConfigParse(err)
    }
}
