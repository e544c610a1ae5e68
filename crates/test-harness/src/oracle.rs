//! Verification oracles — pure functions returning pass/fail verdicts.
//!
//! Each oracle returns an `OracleVerdict` with diagnostic detail, not panics,
//! so a scenario can report every failed check in one pass.

use mesh_measure::Tolerance;
use mesh_types::{BoundingBox, Point3d};

/// The result of a single oracle check.
#[derive(Debug, Clone, PartialEq)]
pub struct OracleVerdict {
    pub oracle_name: String,
    pub passed: bool,
    pub detail: String,
    pub value: Option<f64>,
}

impl OracleVerdict {
    pub(crate) fn verdict(name: &str, passed: bool, detail: String, value: Option<f64>) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed,
            detail,
            value,
        }
    }
}

pub(crate) fn fmt_point(p: &Point3d) -> String {
    format!("({:.3}, {:.3}, {:.3})", p.x, p.y, p.z)
}

pub(crate) fn fmt_box(b: &BoundingBox) -> String {
    format!("{} -> {}", fmt_point(&b.min), fmt_point(&b.max))
}

const AXES: [&str; 3] = ["x", "y", "z"];

/// Check the bounding box against the expected one, corner by corner.
pub fn check_bounding_box(
    actual: &BoundingBox,
    expected: &BoundingBox,
    tolerance: Tolerance,
) -> OracleVerdict {
    if tolerance.bounding_box(actual, expected) {
        return OracleVerdict::verdict("bounding_box", true, fmt_box(actual), None);
    }

    let corners = [("min", &actual.min, &expected.min), ("max", &actual.max, &expected.max)];
    let mut mismatches = Vec::new();
    for (corner, a, e) in corners {
        for (i, axis) in AXES.iter().enumerate() {
            if !tolerance.scalar(a.axis(i), e.axis(i)) {
                mismatches.push(format!(
                    "{}.{}: expected {}, got {}",
                    corner,
                    axis,
                    e.axis(i),
                    a.axis(i)
                ));
            }
        }
    }

    OracleVerdict::verdict(
        "bounding_box",
        false,
        format!(
            "expected {}, got {} (tol={}): {}",
            fmt_box(expected),
            fmt_box(actual),
            tolerance.epsilon,
            mismatches.join(", ")
        ),
        None,
    )
}

/// Check the total surface area against the expected value.
pub fn check_surface_area(actual: f64, expected: f64, tolerance: Tolerance) -> OracleVerdict {
    let passed = tolerance.scalar(actual, expected);
    let detail = if passed {
        format!("{:.6}", actual)
    } else {
        format!(
            "expected {}, got {:.6} (diff={:.6}, tol={})",
            expected,
            actual,
            (actual - expected).abs(),
            tolerance.epsilon
        )
    };
    OracleVerdict::verdict("surface_area", passed, detail, Some(actual))
}

/// Run both geometric checks of a scenario.
pub fn run_geometry_checks(
    bounding_box: &BoundingBox,
    surface_area: f64,
    expected: &crate::fixtures::ExpectedResult,
    tolerance: Tolerance,
) -> Vec<OracleVerdict> {
    vec![
        check_bounding_box(bounding_box, &expected.bounding_box, tolerance),
        check_surface_area(surface_area, expected.surface_area, tolerance),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> BoundingBox {
        BoundingBox::new(Point3d::new(0.0, 0.0, 0.0), Point3d::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn bounding_box_pass_within_tolerance() {
        let actual = BoundingBox::new(
            Point3d::new(0.0004, 0.0, -0.0009),
            Point3d::new(1.0, 1.001, 1.0),
        );
        let v = check_bounding_box(&actual, &unit_box(), Tolerance::default());
        assert!(v.passed, "{}", v.detail);
        assert_eq!(v.oracle_name, "bounding_box");
        assert_eq!(v.value, None);
    }

    #[test]
    fn bounding_box_fail_names_components() {
        let actual = BoundingBox::new(Point3d::new(0.0, 0.0, 0.0), Point3d::new(1.0, 1.5, 1.0));
        let v = check_bounding_box(&actual, &unit_box(), Tolerance::default());
        assert!(!v.passed);
        assert!(v.detail.contains("max.y: expected 1, got 1.5"), "{}", v.detail);
        assert!(!v.detail.contains("min.x"));
    }

    #[test]
    fn surface_area_verdict_carries_value() {
        let ok = check_surface_area(6.0005, 6.0, Tolerance::default());
        assert!(ok.passed);
        assert_eq!(ok.value, Some(6.0005));

        let bad = check_surface_area(6.5, 6.0, Tolerance::default());
        assert!(!bad.passed);
        assert!(bad.detail.contains("expected 6"), "{}", bad.detail);
        assert_eq!(bad.value, Some(6.5));
    }
}
