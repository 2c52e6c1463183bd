//! Collision dispatch.
//!
//! Routes each proxy to the resolver for its primitive type. Every
//! resolver only adds to the acceleration buffer, so proxies compose in
//! any order.

use drape_cloth::ClothState;
use tracing::error;

use crate::proxy::{CollisionProxy, PrimitiveFilter};
use crate::settings::CollisionSettings;

/// Apply every proxy whose primitive type is enabled in `filter`.
///
/// A proxy that fails validation is logged and skipped for this call;
/// the remaining proxies still apply. Returns the number of proxies that
/// were evaluated.
pub fn apply_proxy_collisions(
    state: &mut ClothState,
    proxies: &[CollisionProxy],
    settings: &CollisionSettings,
    filter: PrimitiveFilter,
) -> usize {
    let mut applied = 0;
    for (index, proxy) in proxies.iter().enumerate() {
        let kind = proxy.primitive();
        if !filter.contains(kind) {
            continue;
        }
        if let Err(e) = proxy.validate() {
            error!(index, %kind, error = %e, "skipping collision proxy");
            continue;
        }
        match proxy {
            CollisionProxy::Sphere(s) => s.apply(state, settings),
            CollisionProxy::Box(b) => b.apply(state, settings),
            CollisionProxy::Cylinder(c) => c.apply(state, settings),
            CollisionProxy::Cone(c) => c.apply(state, settings),
            CollisionProxy::Disk(d) => d.apply(state, settings),
        }
        applied += 1;
    }
    applied
}
