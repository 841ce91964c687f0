use mapslink_core::Coordinates;

const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance in meters between two points (haversine formula).
///
/// Adequate for ranking nearby candidates, not for navigation.
#[must_use]
pub fn haversine_m(a: Coordinates, b: Coordinates) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let d_phi = (b.lat - a.lat).to_radians();
    let d_lambda = (b.lon - a.lon).to_radians();

    let h = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().atan2((1.0 - h).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_point_is_zero() {
        let p = Coordinates::new(-23.55, -46.63);
        assert!(haversine_m(p, p).abs() < 1e-6);
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let d = haversine_m(Coordinates::new(0.0, 0.0), Coordinates::new(1.0, 0.0));
        assert!((d - 111_195.0).abs() < 50.0, "got {d}");
    }

    #[test]
    fn is_symmetric() {
        let a = Coordinates::new(-23.5505, -46.6333);
        let b = Coordinates::new(-22.9068, -43.1729);
        assert!((haversine_m(a, b) - haversine_m(b, a)).abs() < 1e-6);
        // São Paulo to Rio de Janeiro, roughly 360 km.
        assert!((haversine_m(a, b) - 360_000.0).abs() < 10_000.0);
    }
}
