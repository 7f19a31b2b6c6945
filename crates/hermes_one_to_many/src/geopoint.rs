use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::{constants::EARTH_RADIUS_METERS, distance::Meters};

#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        GeoPoint { lat, lng }
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    pub fn haversine_distance(&self, other: &GeoPoint) -> Meters {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let dlat = lat2 - lat1;
        let dlng = (other.lng - self.lng).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        Meters::new(EARTH_RADIUS_METERS * c)
    }

    /// Initial bearing from `self` towards `other`, in degrees clockwise from north, in [0, 360)
    pub fn bearing_to(&self, other: &GeoPoint) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let dlng = (other.lng - self.lng).to_radians();

        let y = dlng.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlng.cos();

        y.atan2(x).to_degrees().rem_euclid(360.0)
    }

    /// Planar coordinates used by the spatial index
    pub(crate) fn as_xy(&self) -> [f64; 2] {
        [self.lng, self.lat]
    }

    pub(crate) fn from_xy(xy: [f64; 2]) -> Self {
        GeoPoint {
            lat: xy[1],
            lng: xy[0],
        }
    }
}

/// Two points are equal when their coordinates are bit-for-bit identical, which is
/// what a lookup cache needs.
impl PartialEq for GeoPoint {
    fn eq(&self, other: &Self) -> bool {
        self.lat.to_bits() == other.lat.to_bits() && self.lng.to_bits() == other.lng.to_bits()
    }
}

impl Eq for GeoPoint {}

impl Hash for GeoPoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.lat.to_bits());
        state.write_u64(self.lng.to_bits());
    }
}

/// Smallest angle between two headings, in degrees
pub fn heading_delta(a: f64, b: f64) -> f64 {
    let delta = (a - b).rem_euclid(360.0);
    if delta > 180.0 { 360.0 - delta } else { delta }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haversine_distance_brussels_antwerp() {
        let brussels = GeoPoint::new(50.8503, 4.3517);
        let antwerp = GeoPoint::new(51.2194, 4.4025);

        let distance = brussels.haversine_distance(&antwerp).kilometers();
        assert!((distance - 41.2).abs() < 0.5, "distance was {}", distance);
    }

    #[test]
    fn bearing_cardinal_directions() {
        let origin = GeoPoint::new(0.0, 0.0);

        assert!(origin.bearing_to(&GeoPoint::new(1.0, 0.0)).abs() < 1e-9);
        assert!((origin.bearing_to(&GeoPoint::new(0.0, 1.0)) - 90.0).abs() < 1e-9);
        assert!((origin.bearing_to(&GeoPoint::new(-1.0, 0.0)) - 180.0).abs() < 1e-9);
        assert!((origin.bearing_to(&GeoPoint::new(0.0, -1.0)) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn heading_delta_wraps_around() {
        assert_eq!(heading_delta(350.0, 10.0), 20.0);
        assert_eq!(heading_delta(10.0, 350.0), 20.0);
        assert_eq!(heading_delta(0.0, 180.0), 180.0);
    }

    #[test]
    fn invalid_coordinates() {
        assert!(GeoPoint::new(50.0, 4.0).is_valid());
        assert!(!GeoPoint::new(91.0, 4.0).is_valid());
        assert!(!GeoPoint::new(f64::NAN, 4.0).is_valid());
    }
}
