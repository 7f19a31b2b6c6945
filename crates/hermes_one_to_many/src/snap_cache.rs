use moka::sync::Cache;

use crate::{geopoint::GeoPoint, snap::Snap};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct SnapKey {
    profile: String,
    point: GeoPoint,
}

/// Bounded cache of base graph snaps, per profile and query point.
///
/// Snaps depend on the profile because inaccessible edges are skipped while snapping.
#[derive(Clone)]
pub struct SnapCache {
    cache: Cache<SnapKey, Snap>,
}

impl SnapCache {
    pub fn new(capacity: u64) -> Self {
        SnapCache {
            cache: Cache::new(capacity),
        }
    }

    pub fn get(&self, profile: &str, point: &GeoPoint) -> Option<Snap> {
        self.cache.get(&SnapKey {
            profile: profile.to_string(),
            point: *point,
        })
    }

    pub fn insert(&self, profile: &str, point: GeoPoint, snap: Snap) {
        self.cache.insert(
            SnapKey {
                profile: profile.to_string(),
                point,
            },
            snap,
        )
    }

    pub fn get_or_insert_with(
        &self,
        profile: &str,
        point: &GeoPoint,
        init: impl FnOnce() -> Snap,
    ) -> Snap {
        self.cache.get_with(
            SnapKey {
                profile: profile.to_string(),
                point: *point,
            },
            init,
        )
    }

    pub fn invalidate_all(&self) {
        self.cache.invalidate_all()
    }
}
