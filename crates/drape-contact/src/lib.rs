//! # drape-contact
//!
//! Collision response for the cloth against rigid proxies, plus cloth
//! self-collision.
//!
//! Proxy collisions are **penalty based**: each resolver adds a corrective
//! acceleration proportional to penetration depth along an estimated
//! surface normal, and never moves points. Self-collision is the exception:
//! it corrects positions directly, before any force is accumulated.
//!
//! 1. **Proxies** — [`CollisionProxy`] is a closed enum over
//!    sphere / box / cylinder / cone / disk, dispatched by variant.
//! 2. **Broad phase** — [`SpatialHash`] bins points into a uniform grid.
//! 3. **Self-collision** — [`SelfCollisionSystem`] finds close pairs in
//!    parallel and applies buffered, symmetric position corrections.

pub mod box_collider;
pub mod cone;
pub mod cylinder;
pub mod disk;
pub mod dispatch;
pub mod proxy;
pub mod self_collision;
pub mod settings;
pub mod spatial_hash;
pub mod sphere;

pub use box_collider::BoxCollider;
pub use cone::ConeCollider;
pub use cylinder::CylinderCollider;
pub use disk::DiskCollider;
pub use dispatch::apply_proxy_collisions;
pub use proxy::{CollisionProxy, PrimitiveFilter, PrimitiveType};
pub use self_collision::{SelfCollisionResult, SelfCollisionSystem};
pub use settings::{CollisionSettings, SelfCollisionSettings};
pub use spatial_hash::SpatialHash;
pub use sphere::SphereCollider;
