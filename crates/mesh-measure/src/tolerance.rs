//! Absolute-difference comparison under a fixed epsilon.

use mesh_types::{BoundingBox, Point3d};

/// Precision of the reference fixtures.
pub const DEFAULT_TOLERANCE: f64 = 0.001;

/// `true` iff `|a - b| <= eps`.
pub fn is_equal(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}

/// Component-wise [`is_equal`]; all three components must pass.
pub fn is_equal_point(a: &Point3d, b: &Point3d, eps: f64) -> bool {
    is_equal(a.x, b.x, eps) && is_equal(a.y, b.y, eps) && is_equal(a.z, b.z, eps)
}

/// Both corners must pass [`is_equal_point`].
pub fn is_equal_box(a: &BoundingBox, b: &BoundingBox, eps: f64) -> bool {
    is_equal_point(&a.min, &b.min, eps) && is_equal_point(&a.max, &b.max, eps)
}

/// Rejected epsilon: negative, NaN or infinite.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("invalid tolerance {epsilon}: must be a finite value >= 0")]
pub struct InvalidTolerance {
    pub epsilon: f64,
}

/// An epsilon carried as configuration. Always finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    pub epsilon: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_TOLERANCE,
        }
    }
}

impl Tolerance {
    pub fn new(epsilon: f64) -> Result<Self, InvalidTolerance> {
        if epsilon.is_finite() && epsilon >= 0.0 {
            Ok(Self { epsilon })
        } else {
            Err(InvalidTolerance { epsilon })
        }
    }

    pub fn scalar(&self, a: f64, b: f64) -> bool {
        is_equal(a, b, self.epsilon)
    }

    pub fn point(&self, a: &Point3d, b: &Point3d) -> bool {
        is_equal_point(a, b, self.epsilon)
    }

    pub fn bounding_box(&self, a: &BoundingBox, b: &BoundingBox) -> bool {
        is_equal_box(a, b, self.epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_is_inclusive() {
        assert!(is_equal(1.0, 1.5, 0.5));
        assert!(!is_equal(1.0, 1.5001, 0.5));
    }

    #[test]
    fn zero_epsilon_requires_exact() {
        assert!(is_equal(0.1 + 0.2, 0.1 + 0.2, 0.0));
        assert!(!is_equal(0.1 + 0.2, 0.3, 0.0));
    }

    #[test]
    fn point_fails_on_single_component() {
        let a = Point3d::new(0.0, 0.0, 0.0);
        let b = Point3d::new(0.0, 0.0, 0.002);
        assert!(!is_equal_point(&a, &b, DEFAULT_TOLERANCE));
        assert!(is_equal_point(&a, &b, 0.01));
    }

    #[test]
    fn box_checks_both_corners() {
        let a = BoundingBox::new(Point3d::new(0.0, 0.0, 0.0), Point3d::new(1.0, 1.0, 1.0));
        let b = BoundingBox::new(Point3d::new(0.0, 0.0, 0.0), Point3d::new(1.0, 1.0, 1.01));
        let c = BoundingBox::new(Point3d::new(0.0005, 0.0, 0.0), Point3d::new(1.0, 1.0, 1.0));
        assert!(!is_equal_box(&a, &b, DEFAULT_TOLERANCE));
        assert!(is_equal_box(&a, &c, DEFAULT_TOLERANCE));
    }

    #[test]
    fn default_tolerance_matches_fixture_precision() {
        let tol = Tolerance::default();
        assert_eq!(tol.epsilon, 0.001);
        assert!(tol.scalar(22.0, 22.0009));
        assert!(!tol.scalar(22.0, 22.0011));
    }

    #[test]
    fn unusable_epsilons_are_rejected() {
        assert_eq!(Tolerance::new(0.0).unwrap().epsilon, 0.0);
        assert_eq!(Tolerance::new(-0.001), Err(InvalidTolerance { epsilon: -0.001 }));
        assert!(Tolerance::new(f64::NAN).is_err());
        assert!(Tolerance::new(f64::INFINITY).is_err());
    }
}
