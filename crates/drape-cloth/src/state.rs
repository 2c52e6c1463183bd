//! Cloth state — SoA buffers for all per-point data.
//!
//! This is the primary mutable data structure during simulation.
//! Force accumulators, collision resolvers and the integrator read and
//! write these buffers every substep.

use drape_math::{Vec2, Vec3};
use drape_types::{DrapeError, DrapeResult, GridCoord};
use tracing::{debug, info};

use crate::normals::compute_vertex_normals;
use crate::settings::ClothSettings;
use crate::topology::{GridTopology, SpringLink};

/// SoA cloth state.
///
/// # Layout
///
/// Every per-point array has length `resolution_x * resolution_y` and is
/// indexed by `x * resolution_y + y`:
/// ```text
/// position:     [p0, p1, p2, ...]
/// position_old: [o0, o1, o2, ...]
/// acceleration: [a0, a1, a2, ...]
/// ...
/// ```
///
/// The arrays are private and only handed out as slices, so no caller can
/// resize one without the others. The topology is fixed at construction.
///
/// # Verlet history
///
/// `position_old`/`position` encode the implicit velocity. The integrator
/// writes `position_new`, then [`rotate_buffers`](Self::rotate_buffers)
/// shifts `new → current → old`, and
/// [`recompute_velocities`](Self::recompute_velocities) derives
/// `velocity = position - position_old` for the next substep.
pub struct ClothState {
    settings: ClothSettings,
    topology: GridTopology,

    // ─── Kinematics ───
    position: Vec<Vec3>,
    position_old: Vec<Vec3>,
    position_new: Vec<Vec3>,
    velocity: Vec<Vec3>,
    acceleration: Vec<Vec3>,

    // ─── Render attributes ───
    normal: Vec<Vec3>,
    uv: Vec<Vec2>,

    // ─── Flags ───
    is_fixed: Vec<bool>,
    is_affected_gravity: Vec<bool>,
    is_grabbed: Vec<bool>,

    corners_locked: bool,
    border_locked: bool,
}

/// Split mutable view over the per-point buffers.
///
/// Lets a stage read some arrays while writing others without fighting
/// the borrow checker. Slices cannot change length, so the equal-length
/// invariant survives any use of the view.
pub struct PointBuffersMut<'a> {
    pub position: &'a mut [Vec3],
    pub position_old: &'a mut [Vec3],
    pub position_new: &'a mut [Vec3],
    pub velocity: &'a mut [Vec3],
    pub acceleration: &'a mut [Vec3],
    pub normal: &'a [Vec3],
    pub is_fixed: &'a mut [bool],
    pub is_affected_gravity: &'a [bool],
    pub links: &'a [Vec<SpringLink>],
}

impl ClothState {
    /// Build a cloth from `settings`.
    ///
    /// Seeds a regular grid in the XY plane at the starting height, with
    /// old/new positions equal to the initial position and zero velocity
    /// and acceleration. Fails if the resolution is zero.
    pub fn new(settings: ClothSettings) -> DrapeResult<Self> {
        settings.validate()?;

        let n = settings.point_count();
        let topology = GridTopology::build(&settings);

        let mut position = Vec::with_capacity(n);
        let mut uv = Vec::with_capacity(n);
        let u_den = settings.resolution_x.saturating_sub(1).max(1) as f32;
        let v_den = settings.resolution_y.saturating_sub(1).max(1) as f32;
        for x in 0..settings.resolution_x {
            for y in 0..settings.resolution_y {
                position.push(settings.rest_position(x, y));
                uv.push(Vec2::new(x as f32 / u_den, y as f32 / v_den));
            }
        }

        let mut state = Self {
            topology,
            position_old: position.clone(),
            position_new: position.clone(),
            position,
            velocity: vec![Vec3::ZERO; n],
            acceleration: vec![Vec3::ZERO; n],
            normal: vec![Vec3::ZERO; n],
            uv,
            is_fixed: vec![false; n],
            is_affected_gravity: vec![true; n],
            is_grabbed: vec![false; n],
            corners_locked: false,
            border_locked: false,
            settings,
        };

        state.recompute_normals();
        if state.settings.lock_corners {
            state.lock_corners(true);
        }

        debug!(
            resolution_x = state.settings.resolution_x,
            resolution_y = state.settings.resolution_y,
            springs = state.topology.spring_count(),
            "cloth initialized"
        );

        Ok(state)
    }

    // ─── Accessors ───

    #[inline]
    pub fn settings(&self) -> &ClothSettings {
        &self.settings
    }

    #[inline]
    pub fn topology(&self) -> &GridTopology {
        &self.topology
    }

    /// Number of points in the grid.
    #[inline]
    pub fn point_count(&self) -> usize {
        self.position.len()
    }

    /// Flat index of grid point `(x, y)`.
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> DrapeResult<usize> {
        self.topology.index(x, y)
    }

    /// Grid coordinate of flat index `i`.
    #[inline]
    pub fn coord(&self, i: usize) -> GridCoord {
        let ry = self.settings.resolution_y;
        GridCoord::new(i / ry, i % ry)
    }

    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        &self.position
    }

    #[inline]
    pub fn positions_mut(&mut self) -> &mut [Vec3] {
        &mut self.position
    }

    #[inline]
    pub fn positions_old(&self) -> &[Vec3] {
        &self.position_old
    }

    #[inline]
    pub fn positions_new(&self) -> &[Vec3] {
        &self.position_new
    }

    #[inline]
    pub fn velocities(&self) -> &[Vec3] {
        &self.velocity
    }

    #[inline]
    pub fn accelerations(&self) -> &[Vec3] {
        &self.acceleration
    }

    #[inline]
    pub fn accelerations_mut(&mut self) -> &mut [Vec3] {
        &mut self.acceleration
    }

    #[inline]
    pub fn normals(&self) -> &[Vec3] {
        &self.normal
    }

    #[inline]
    pub fn uvs(&self) -> &[Vec2] {
        &self.uv
    }

    #[inline]
    pub fn fixed(&self) -> &[bool] {
        &self.is_fixed
    }

    #[inline]
    pub fn gravity_affected(&self) -> &[bool] {
        &self.is_affected_gravity
    }

    #[inline]
    pub fn grabbed(&self) -> &[bool] {
        &self.is_grabbed
    }

    #[inline]
    pub fn corners_locked(&self) -> bool {
        self.corners_locked
    }

    #[inline]
    pub fn border_locked(&self) -> bool {
        self.border_locked
    }

    /// Borrow every per-point buffer at once, split by mutability.
    pub fn buffers_mut(&mut self) -> PointBuffersMut<'_> {
        PointBuffersMut {
            position: &mut self.position,
            position_old: &mut self.position_old,
            position_new: &mut self.position_new,
            velocity: &mut self.velocity,
            acceleration: &mut self.acceleration,
            normal: &self.normal,
            is_fixed: &mut self.is_fixed,
            is_affected_gravity: &self.is_affected_gravity,
            links: &self.topology.links,
        }
    }

    // ─── Substep primitives ───

    /// Zero every acceleration slot. Called once per substep before forces.
    pub fn reset_acceleration(&mut self) {
        self.acceleration.fill(Vec3::ZERO);
    }

    /// `old ← current`, `current ← new`, `new ← 0` for every point.
    ///
    /// Double buffering keeps sequential point updates within a substep
    /// from seeing each other's results.
    pub fn rotate_buffers(&mut self) {
        for i in 0..self.position.len() {
            self.position_old[i] = self.position[i];
            self.position[i] = self.position_new[i];
            self.position_new[i] = Vec3::ZERO;
        }
    }

    /// `velocity ← position − position_old`.
    ///
    /// The result is consumed by the *next* substep, so velocity-dependent
    /// terms (spring damping) always lag one substep behind.
    pub fn recompute_velocities(&mut self) {
        for ((v, p), o) in self
            .velocity
            .iter_mut()
            .zip(&self.position)
            .zip(&self.position_old)
        {
            *v = *p - *o;
        }
    }

    // ─── Pinning ───

    /// Pin or release the four grid corners.
    pub fn lock_corners(&mut self, enable: bool) {
        let rx = self.settings.resolution_x;
        let ry = self.settings.resolution_y;
        for (x, y) in [(0, 0), (0, ry - 1), (rx - 1, 0), (rx - 1, ry - 1)] {
            self.is_fixed[x * ry + y] = enable;
        }
        self.corners_locked = enable;
    }

    /// Pin or release every point on the outer ring of the grid.
    pub fn lock_border(&mut self, enable: bool) {
        let rx = self.settings.resolution_x;
        let ry = self.settings.resolution_y;
        for x in 0..rx {
            for y in 0..ry {
                if x == 0 || y == 0 || x + 1 == rx || y + 1 == ry {
                    self.is_fixed[x * ry + y] = enable;
                }
            }
        }
        self.border_locked = enable;
    }

    /// Pin or release the point at `(x, y)`.
    pub fn set_fixed(&mut self, x: usize, y: usize, fixed: bool) -> DrapeResult<()> {
        let i = self.index(x, y)?;
        self.is_fixed[i] = fixed;
        info!(x, y, fixed, "point pin changed");
        Ok(())
    }

    /// Opt the point at `(x, y)` in or out of gravity.
    pub fn set_gravity_affected(&mut self, x: usize, y: usize, affected: bool) -> DrapeResult<()> {
        let i = self.index(x, y)?;
        self.is_affected_gravity[i] = affected;
        Ok(())
    }

    /// Mark `index` as the grabbed point, clearing any previous mark.
    pub fn set_grabbed(&mut self, index: Option<usize>) {
        self.is_grabbed.fill(false);
        if let Some(i) = index {
            if let Some(flag) = self.is_grabbed.get_mut(i) {
                *flag = true;
            }
        }
    }

    // ─── Lifecycle ───

    /// Restore the initial grid: rest positions, zero velocity and
    /// acceleration, every point released, then the corner lock reapplied
    /// if the settings ask for it.
    pub fn reset_to_rest(&mut self) {
        let ry = self.settings.resolution_y;
        for x in 0..self.settings.resolution_x {
            for y in 0..ry {
                let rest = self.settings.rest_position(x, y);
                let i = x * ry + y;
                self.position[i] = rest;
                self.position_old[i] = rest;
                self.position_new[i] = rest;
            }
        }
        self.velocity.fill(Vec3::ZERO);
        self.acceleration.fill(Vec3::ZERO);
        self.is_fixed.fill(false);
        self.is_grabbed.fill(false);
        self.border_locked = false;
        self.corners_locked = false;
        if self.settings.lock_corners {
            self.lock_corners(true);
        }
        self.recompute_normals();
        info!("cloth reset to rest");
    }

    /// Recompute vertex normals from the current positions.
    pub fn recompute_normals(&mut self) {
        compute_vertex_normals(&self.position, &self.topology.triangles, &mut self.normal);
    }

    /// Total kinetic energy: 0.5 · m · Σ ||v||² over unfixed points.
    ///
    /// Velocities are per-substep displacements, so the value is in
    /// simulation units rather than joules.
    pub fn kinetic_energy(&self) -> f64 {
        let m = self.settings.mass as f64;
        self.velocity
            .iter()
            .zip(&self.is_fixed)
            .filter(|(_, fixed)| !**fixed)
            .map(|(v, _)| 0.5 * m * v.length_squared() as f64)
            .sum()
    }

    /// Check that every per-point buffer has the same length.
    pub fn validate(&self) -> DrapeResult<()> {
        let n = self.settings.point_count();
        let lengths = [
            ("position", self.position.len()),
            ("position_old", self.position_old.len()),
            ("position_new", self.position_new.len()),
            ("velocity", self.velocity.len()),
            ("acceleration", self.acceleration.len()),
            ("normal", self.normal.len()),
            ("uv", self.uv.len()),
            ("is_fixed", self.is_fixed.len()),
            ("is_affected_gravity", self.is_affected_gravity.len()),
            ("is_grabbed", self.is_grabbed.len()),
            ("links", self.topology.links.len()),
        ];
        for (name, len) in lengths {
            if len != n {
                return Err(DrapeError::InvariantViolation(format!(
                    "{name} has {len} entries, expected {n}"
                )));
            }
        }
        Ok(())
    }
}
