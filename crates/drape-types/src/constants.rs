//! Physical constants and simulation defaults.

/// Standard gravitational acceleration (m/s²).
pub const GRAVITY: f32 = 9.81;

/// Scale applied to [`GRAVITY`] for the default cloth gravity amplitude.
pub const GRAVITY_SCALE: f32 = 0.005;

/// Default outer timestep (seconds), one rendered frame.
pub const DEFAULT_DT: f32 = 1.0 / 120.0;

/// Default number of integration substeps per rendered frame.
pub const DEFAULT_SUBSTEPS: u32 = 20;

/// Spring or direction vectors shorter than this produce no force.
pub const DEGENERATE_LENGTH: f32 = 1.0e-6;

/// Step used for central finite differences on signed distance fields.
pub const SDF_GRADIENT_STEP: f32 = 1.0e-3;

/// Normals are recomputed every this many rendered frames.
pub const DEFAULT_NORMAL_REFRESH_INTERVAL: u32 = 6;
