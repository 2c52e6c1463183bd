//! # drape-cloth
//!
//! The cloth data model: a fixed `resolution_x × resolution_y` grid of
//! mass points stored in Structure-of-Arrays layout.
//!
//! ## Key Types
//!
//! - [`ClothState`] — Per-point SoA buffers (positions, Verlet history,
//!   accelerations, flags) plus the immutable spring topology.
//! - [`ClothSettings`] — Resolution, physical size, origin, floor, mass.
//! - [`GridTopology`] — Structural spring links and render triangles.
//! - [`RenderBuffers`] — Interleaved vertex/index buffers for a renderer
//!   or frame exporter.

pub mod buffers;
pub mod normals;
pub mod settings;
pub mod state;
pub mod topology;

pub use buffers::RenderBuffers;
pub use settings::ClothSettings;
pub use state::{ClothState, PointBuffersMut};
pub use topology::{GridTopology, SpringLink};
