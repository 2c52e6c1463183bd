//! Scene validation.
//!
//! Catches data-level errors before the simulation is built. Only values
//! the simulation cannot run with are fatal; questionable but runnable
//! settings come back as warnings.

use drape_types::{DrapeError, DrapeResult};

use crate::config::SceneConfig;

/// Checks:
/// - Cloth resolution, size and mass
/// - Timestep, substeps and normal refresh interval
/// - Self-collision distances are positive
pub fn validate_scene(scene: &SceneConfig) -> DrapeResult<()> {
    scene.cloth.validate()?;
    scene.physics.validate()?;

    let sc = &scene.self_collision;
    if sc.cell_size <= 0.0 || !sc.cell_size.is_finite() {
        return Err(DrapeError::InvalidConfig(format!(
            "self-collision cell_size must be positive, got {}",
            sc.cell_size
        )));
    }
    if sc.min_distance < 0.0 || !sc.min_distance.is_finite() {
        return Err(DrapeError::InvalidConfig(format!(
            "self-collision min_distance must be non-negative, got {}",
            sc.min_distance
        )));
    }
    Ok(())
}

/// Advisory findings that do not stop a run.
pub fn scene_warnings(scene: &SceneConfig) -> Vec<String> {
    let mut warnings = Vec::new();

    let gd = scene.physics.gravity.direction;
    if (gd.length() - 1.0).abs() > 0.01 {
        warnings.push(format!(
            "gravity direction {:?} is not unit length (|g| = {:.3})",
            gd.to_array(),
            gd.length()
        ));
    }

    let sc = &scene.self_collision;
    if sc.cell_size < sc.min_distance {
        warnings.push(format!(
            "self-collision cell_size {} is smaller than min_distance {}; close pairs can be missed",
            sc.cell_size, sc.min_distance
        ));
    }

    let start = scene.cloth.origin.z + scene.cloth.starting_height;
    if start <= scene.cloth.floor_height {
        warnings.push(format!(
            "cloth starts at z = {start} on or below the floor at {}; every point pins immediately",
            scene.cloth.floor_height
        ));
    }

    if scene.physics.temporal.dt > 1.0 / 30.0 {
        warnings.push(format!(
            "dt = {} is large for explicit integration",
            scene.physics.temporal.dt
        ));
    }

    for (index, proxy) in scene.proxies.iter().enumerate() {
        if let Err(e) = proxy.validate() {
            warnings.push(format!("proxy {index} will be skipped: {e}"));
        }
    }

    warnings
}
