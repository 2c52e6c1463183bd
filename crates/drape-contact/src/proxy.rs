//! Collision proxies: the rigid shapes the cloth can collide against.

use std::fmt;
use std::str::FromStr;

use drape_types::{DrapeError, DrapeResult};
use serde::{Deserialize, Serialize};

use crate::box_collider::BoxCollider;
use crate::cone::ConeCollider;
use crate::cylinder::CylinderCollider;
use crate::disk::DiskCollider;
use crate::sphere::SphereCollider;

/// Primitive tag of a collision proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveType {
    Sphere,
    Box,
    Cylinder,
    Cone,
    Disk,
}

impl PrimitiveType {
    pub const ALL: [PrimitiveType; 5] = [
        PrimitiveType::Sphere,
        PrimitiveType::Box,
        PrimitiveType::Cylinder,
        PrimitiveType::Cone,
        PrimitiveType::Disk,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PrimitiveType::Sphere => "sphere",
            PrimitiveType::Box => "box",
            PrimitiveType::Cylinder => "cylinder",
            PrimitiveType::Cone => "cone",
            PrimitiveType::Disk => "disk",
        }
    }

    #[inline]
    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PrimitiveType {
    type Err = DrapeError;

    fn from_str(s: &str) -> DrapeResult<Self> {
        PrimitiveType::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| DrapeError::UnknownPrimitive(s.to_string()))
    }
}

/// Set of primitive types whose resolvers are switched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimitiveFilter(u8);

impl PrimitiveFilter {
    pub fn all() -> Self {
        Self(PrimitiveType::ALL.iter().fold(0, |bits, k| bits | k.bit()))
    }

    pub fn none() -> Self {
        Self(0)
    }

    /// Copy of `self` with `kind` switched on or off.
    pub fn with(self, kind: PrimitiveType, enabled: bool) -> Self {
        if enabled {
            Self(self.0 | kind.bit())
        } else {
            Self(self.0 & !kind.bit())
        }
    }

    #[inline]
    pub fn contains(self, kind: PrimitiveType) -> bool {
        self.0 & kind.bit() != 0
    }
}

impl Default for PrimitiveFilter {
    fn default() -> Self {
        Self::all()
    }
}

/// A rigid collision shape, tagged by primitive type.
///
/// Serialized with an inline `kind` field:
/// ```toml
/// [[proxy]]
/// kind = "sphere"
/// center = [0.0, 0.0, 0.0]
/// radius = 1.0
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CollisionProxy {
    Sphere(SphereCollider),
    Box(BoxCollider),
    Cylinder(CylinderCollider),
    Cone(ConeCollider),
    Disk(DiskCollider),
}

impl CollisionProxy {
    pub fn primitive(&self) -> PrimitiveType {
        match self {
            CollisionProxy::Sphere(_) => PrimitiveType::Sphere,
            CollisionProxy::Box(_) => PrimitiveType::Box,
            CollisionProxy::Cylinder(_) => PrimitiveType::Cylinder,
            CollisionProxy::Cone(_) => PrimitiveType::Cone,
            CollisionProxy::Disk(_) => PrimitiveType::Disk,
        }
    }

    /// Reject shapes the resolvers cannot evaluate: non-finite parameters,
    /// negative radii, or a cone without height.
    pub fn validate(&self) -> DrapeResult<()> {
        let invalid = |what: &str| {
            Err(DrapeError::InvalidConfig(format!(
                "{} proxy: {what}",
                self.primitive()
            )))
        };
        match self {
            CollisionProxy::Sphere(s) => {
                if !s.center.is_finite() || !s.radius.is_finite() || s.radius < 0.0 {
                    return invalid("center and non-negative radius must be finite");
                }
            }
            CollisionProxy::Box(b) => {
                if !b.center.is_finite() || !b.size.is_finite() || !b.axis.is_finite() {
                    return invalid("center, size and axis must be finite");
                }
            }
            CollisionProxy::Cylinder(c) => {
                if !c.center.is_finite() || !c.axis.is_finite() || !c.radius.is_finite() {
                    return invalid("center, axis and radius must be finite");
                }
                if !c.height.is_finite() || c.radius < 0.0 || c.height < 0.0 {
                    return invalid("radius and height must be non-negative");
                }
            }
            CollisionProxy::Cone(c) => {
                if !c.tip.is_finite() || !c.axis.is_finite() || !c.radius.is_finite() {
                    return invalid("tip, axis and radius must be finite");
                }
                if !c.height.is_finite() || c.height <= 0.0 || c.radius < 0.0 {
                    return invalid("height must be positive");
                }
            }
            CollisionProxy::Disk(d) => {
                if !d.center.is_finite() || !d.axis.is_finite() || !d.radius.is_finite() {
                    return invalid("center, axis and radius must be finite");
                }
                if d.radius < 0.0 {
                    return invalid("radius must be non-negative");
                }
            }
        }
        Ok(())
    }
}

impl From<SphereCollider> for CollisionProxy {
    fn from(s: SphereCollider) -> Self {
        CollisionProxy::Sphere(s)
    }
}

impl From<BoxCollider> for CollisionProxy {
    fn from(b: BoxCollider) -> Self {
        CollisionProxy::Box(b)
    }
}

impl From<CylinderCollider> for CollisionProxy {
    fn from(c: CylinderCollider) -> Self {
        CollisionProxy::Cylinder(c)
    }
}

impl From<ConeCollider> for CollisionProxy {
    fn from(c: ConeCollider) -> Self {
        CollisionProxy::Cone(c)
    }
}

impl From<DiskCollider> for CollisionProxy {
    fn from(d: DiskCollider) -> Self {
        CollisionProxy::Disk(d)
    }
}
