//! Great-circle distance and nearest-branch resolution.

use crate::domain::location::{Coordinates, Location};

/// Spherical Earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two coordinates, in kilometres.
pub fn haversine_km(from: Coordinates, to: Coordinates) -> f64 {
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lng = (to.longitude - from.longitude).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + from.latitude.to_radians().cos()
            * to.latitude.to_radians().cos()
            * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Geodesically nearest location to `origin`, with its distance. `None` only
/// for an empty list; ties on exactly equal distance keep list order.
pub fn nearest(origin: Coordinates, locations: &[Location]) -> Option<(&Location, f64)> {
    let mut best: Option<(&Location, f64)> = None;
    for location in locations {
        let distance = haversine_km(origin, location.coordinates());
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((location, distance)),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::{haversine_km, nearest};
    use crate::catalog::branches;
    use crate::domain::location::Coordinates;

    #[test]
    fn zero_distance_at_identical_points() {
        let point = Coordinates::new(13.7563, 100.5018);
        assert!(haversine_km(point, point).abs() < 1e-9);
    }

    #[test]
    fn bangkok_to_chiang_mai_is_roughly_580_km() {
        let bangkok = Coordinates::new(13.7563, 100.5018);
        let chiang_mai = Coordinates::new(18.7883, 98.9853);
        let distance = haversine_km(bangkok, chiang_mai);
        assert!((distance - 580.0).abs() < 20.0, "got {distance}");
    }

    #[test]
    fn caller_at_a_branch_resolves_to_that_branch() {
        let all = branches();
        for branch in &all {
            let (found, distance) =
                nearest(branch.coordinates(), &all).expect("non-empty branch list");
            assert_eq!(found.id, branch.id);
            assert!(distance.abs() < 1e-9);
        }
    }

    #[test]
    fn exact_tie_resolves_to_first_in_list_order() {
        let mut all = branches();
        // Duplicate the downtown coordinates under a later id.
        let mut clone = all[0].clone();
        clone.id = "downtown-2".to_string();
        all.push(clone);

        let (found, _) = nearest(all[0].coordinates(), &all).expect("non-empty");
        assert_eq!(found.id, "downtown");
    }

    #[test]
    fn empty_list_has_no_nearest() {
        assert!(nearest(Coordinates::new(0.0, 0.0), &[]).is_none());
    }
}
