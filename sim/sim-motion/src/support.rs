//! Support mapping for axis-aligned boxes.

use nalgebra::Vector3;

/// Return the corner of an AABB with the given half extents that lies
/// farthest along `direction`.
///
/// Zero direction components resolve to the positive face, so the result
/// is always a real corner.
#[must_use]
pub fn aabb_support(half_extents: &Vector3<f64>, direction: &Vector3<f64>) -> Vector3<f64> {
    Vector3::new(
        if direction.x < 0.0 {
            -half_extents.x
        } else {
            half_extents.x
        },
        if direction.y < 0.0 {
            -half_extents.y
        } else {
            half_extents.y
        },
        if direction.z < 0.0 {
            -half_extents.z
        } else {
            half_extents.z
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_support_picks_extremal_corner() {
        let h = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(
            aabb_support(&h, &Vector3::new(1.0, 1.0, 1.0)),
            Vector3::new(1.0, 2.0, 3.0)
        );
        assert_eq!(
            aabb_support(&h, &Vector3::new(-0.5, 1.0, -2.0)),
            Vector3::new(-1.0, 2.0, -3.0)
        );
        assert_eq!(
            aabb_support(&h, &Vector3::new(-1.0, -1.0, -1.0)),
            Vector3::new(-1.0, -2.0, -3.0)
        );
    }

    #[test]
    fn test_zero_direction_components_pick_positive_face() {
        let h = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(
            aabb_support(&h, &Vector3::zeros()),
            Vector3::new(1.0, 2.0, 3.0)
        );
    }

    #[test]
    fn test_support_maximizes_dot_product() {
        let h = Vector3::new(0.5, 1.5, 2.5);
        let d = Vector3::new(0.3, -0.8, 0.1);
        let support = aabb_support(&h, &d);
        // Every other corner projects no farther along d.
        for &sx in &[-1.0, 1.0] {
            for &sy in &[-1.0, 1.0] {
                for &sz in &[-1.0, 1.0] {
                    let corner = Vector3::new(sx * h.x, sy * h.y, sz * h.z);
                    assert!(corner.dot(&d) <= support.dot(&d) + 1e-12);
                }
            }
        }
    }
}
