//! Geographic coordinates.
//!
//! `GeoPoint` keeps `f64` latitude/longitude: the values are echoed verbatim
//! into the routes and orders files, so no precision may be lost on the way.

/// A WGS-84 coordinate.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Planar distance in scaled degrees: `√(Δlat² + Δlon²) · 100`.
    ///
    /// This is the exponent base of the spatial discount in
    /// policy training, not a physical distance.
    pub fn planar_distance(self, other: GeoPoint) -> f64 {
        let dx = self.lat - other.lat;
        let dy = self.lon - other.lon;
        (dx * dx + dy * dy).sqrt() * 100.0
    }

    /// Haversine great-circle distance in metres.
    pub fn distance_m(self, other: GeoPoint) -> f64 {
        const R: f64 = 6_371_000.0; // mean Earth radius, metres

        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        R * c
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}
