//! Runtime feature toggles.
//!
//! A console or UI thread flips these while the simulation runs. The loop
//! takes a [`FeatureFlags`] snapshot once per substep; writes become
//! visible at the next snapshot and the last write wins.

use std::sync::atomic::{AtomicBool, Ordering};

use drape_contact::{PrimitiveFilter, PrimitiveType};
use serde::{Deserialize, Serialize};

/// Plain copy of every toggle, also used as the configured initial state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureFlags {
    pub paused: bool,
    pub gravity: bool,
    pub tension: bool,
    pub wind: bool,
    pub collision: bool,
    pub self_collision: bool,
    pub grab: bool,
    pub sphere: bool,
    #[serde(rename = "box")]
    pub box_: bool,
    pub cylinder: bool,
    pub cone: bool,
    pub disk: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            paused: false,
            gravity: true,
            tension: true,
            wind: true,
            collision: true,
            self_collision: false,
            grab: true,
            sphere: true,
            box_: true,
            cylinder: true,
            cone: true,
            disk: true,
        }
    }
}

impl FeatureFlags {
    /// Primitive types whose resolvers should run.
    pub fn primitive_filter(&self) -> PrimitiveFilter {
        PrimitiveFilter::none()
            .with(PrimitiveType::Sphere, self.sphere)
            .with(PrimitiveType::Box, self.box_)
            .with(PrimitiveType::Cylinder, self.cylinder)
            .with(PrimitiveType::Cone, self.cone)
            .with(PrimitiveType::Disk, self.disk)
    }
}

/// Shared, lock-free feature toggles.
///
/// Wrap in an `Arc` to share between the simulation thread and writers.
#[derive(Debug)]
pub struct SimulationControl {
    paused: AtomicBool,
    gravity: AtomicBool,
    tension: AtomicBool,
    wind: AtomicBool,
    collision: AtomicBool,
    self_collision: AtomicBool,
    grab: AtomicBool,
    sphere: AtomicBool,
    box_: AtomicBool,
    cylinder: AtomicBool,
    cone: AtomicBool,
    disk: AtomicBool,
}

macro_rules! flag_accessors {
    ($($field:ident => $setter:ident),* $(,)?) => {
        $(
            #[inline]
            pub fn $field(&self) -> bool {
                self.$field.load(Ordering::Relaxed)
            }

            #[inline]
            pub fn $setter(&self, enabled: bool) {
                self.$field.store(enabled, Ordering::Relaxed);
            }
        )*
    };
}

impl SimulationControl {
    pub fn new(initial: FeatureFlags) -> Self {
        Self {
            paused: AtomicBool::new(initial.paused),
            gravity: AtomicBool::new(initial.gravity),
            tension: AtomicBool::new(initial.tension),
            wind: AtomicBool::new(initial.wind),
            collision: AtomicBool::new(initial.collision),
            self_collision: AtomicBool::new(initial.self_collision),
            grab: AtomicBool::new(initial.grab),
            sphere: AtomicBool::new(initial.sphere),
            box_: AtomicBool::new(initial.box_),
            cylinder: AtomicBool::new(initial.cylinder),
            cone: AtomicBool::new(initial.cone),
            disk: AtomicBool::new(initial.disk),
        }
    }

    flag_accessors! {
        paused => set_paused,
        gravity => set_gravity,
        tension => set_tension,
        wind => set_wind,
        collision => set_collision,
        self_collision => set_self_collision,
        grab => set_grab,
    }

    /// Toggle one primitive type's resolver.
    pub fn set_primitive(&self, kind: PrimitiveType, enabled: bool) {
        let flag = match kind {
            PrimitiveType::Sphere => &self.sphere,
            PrimitiveType::Box => &self.box_,
            PrimitiveType::Cylinder => &self.cylinder,
            PrimitiveType::Cone => &self.cone,
            PrimitiveType::Disk => &self.disk,
        };
        flag.store(enabled, Ordering::Relaxed);
    }

    /// Flip pause and return the new state.
    pub fn toggle_pause(&self) -> bool {
        !self.paused.fetch_xor(true, Ordering::Relaxed)
    }

    /// Read every flag once.
    pub fn snapshot(&self) -> FeatureFlags {
        FeatureFlags {
            paused: self.paused.load(Ordering::Relaxed),
            gravity: self.gravity.load(Ordering::Relaxed),
            tension: self.tension.load(Ordering::Relaxed),
            wind: self.wind.load(Ordering::Relaxed),
            collision: self.collision.load(Ordering::Relaxed),
            self_collision: self.self_collision.load(Ordering::Relaxed),
            grab: self.grab.load(Ordering::Relaxed),
            sphere: self.sphere.load(Ordering::Relaxed),
            box_: self.box_.load(Ordering::Relaxed),
            cylinder: self.cylinder.load(Ordering::Relaxed),
            cone: self.cone.load(Ordering::Relaxed),
            disk: self.disk.load(Ordering::Relaxed),
        }
    }
}

impl Default for SimulationControl {
    fn default() -> Self {
        Self::new(FeatureFlags::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn snapshot_matches_initial() {
        let initial = FeatureFlags { wind: false, self_collision: true, ..Default::default() };
        assert_eq!(SimulationControl::new(initial).snapshot(), initial);
    }

    #[test]
    fn writes_from_other_thread_visible() {
        let control = Arc::new(SimulationControl::default());
        let writer = Arc::clone(&control);
        std::thread::spawn(move || {
            writer.set_gravity(false);
            writer.set_primitive(PrimitiveType::Cone, false);
        })
        .join()
        .unwrap();

        let flags = control.snapshot();
        assert!(!flags.gravity);
        assert!(!flags.cone);
        assert!(!flags.primitive_filter().contains(PrimitiveType::Cone));
        assert!(flags.primitive_filter().contains(PrimitiveType::Sphere));
    }

    #[test]
    fn toggle_pause_flips() {
        let control = SimulationControl::default();
        assert!(control.toggle_pause());
        assert!(control.paused());
        assert!(!control.toggle_pause());
    }
}
