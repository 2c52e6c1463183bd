//! # drape-io
//!
//! The simulator's file boundary.
//!
//! - [`SceneConfig`]: cloth, physics, collision and proxy setup loaded
//!   from TOML, with defaults for anything missing
//! - [`validator`]: fatal checks and advisory warnings for a scene
//! - [`obj`]: one Wavefront OBJ file per recorded frame
//! - [`recording`]: a frame recorder and recording-folder cleanup

pub mod config;
pub mod obj;
pub mod recording;
pub mod validator;

pub use config::SceneConfig;
pub use obj::{export_frame, frame_file_name, write_obj};
pub use recording::{clear_directory, FrameRecorder};
pub use validator::{scene_warnings, validate_scene};
