//! Reference fixtures: the expected bounding box and surface area per model.

use std::collections::HashSet;
use std::path::Path;

use mesh_types::{BoundingBox, Point3d};
use serde::{Deserialize, Serialize};

use crate::helpers::HarnessError;

/// Known-good export properties of one input model.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpectedResult {
    /// Input file name inside the examples directory, e.g. `simple_box.vsc`.
    pub name: String,
    pub bounding_box: BoundingBox,
    pub surface_area: f64,
}

impl ExpectedResult {
    pub fn new(name: &str, min: [f64; 3], max: [f64; 3], surface_area: f64) -> Self {
        Self {
            name: name.to_string(),
            bounding_box: BoundingBox::new(Point3d::from_array(min), Point3d::from_array(max)),
            surface_area,
        }
    }

    /// Base name of the exported files: the input name up to its first `.`.
    pub fn model_name(&self) -> &str {
        match self.name.find('.') {
            Some(pos) => &self.name[..pos],
            None => &self.name,
        }
    }
}

/// On-disk fixture entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureEntry {
    pub name: String,
    pub bounding_box: [[f64; 3]; 2],
    pub surface_area: f64,
}

impl From<&ExpectedResult> for FixtureEntry {
    fn from(e: &ExpectedResult) -> Self {
        Self {
            name: e.name.clone(),
            bounding_box: [e.bounding_box.min.to_array(), e.bounding_box.max.to_array()],
            surface_area: e.surface_area,
        }
    }
}

/// Ordered, immutable list of fixtures for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureTable {
    entries: Vec<ExpectedResult>,
}

impl FixtureTable {
    /// Validate and wrap a list of fixtures.
    ///
    /// Rejects an empty list, empty or duplicate names, duplicate export
    /// base names, inverted boxes, and negative or non-finite values.
    pub fn new(entries: Vec<ExpectedResult>) -> Result<Self, HarnessError> {
        if entries.is_empty() {
            return Err(fixture_error("fixture table is empty".to_string()));
        }
        let mut names = HashSet::new();
        let mut bases = HashSet::new();
        for e in &entries {
            if e.model_name().is_empty() {
                return Err(fixture_error(format!("invalid model name \"{}\"", e.name)));
            }
            if !names.insert(e.name.as_str()) {
                return Err(fixture_error(format!("duplicate fixture \"{}\"", e.name)));
            }
            if !bases.insert(e.model_name()) {
                return Err(fixture_error(format!(
                    "fixtures share export name \"{}\"",
                    e.model_name()
                )));
            }
            let (min, max) = (e.bounding_box.min.to_array(), e.bounding_box.max.to_array());
            if min.iter().chain(&max).any(|c| !c.is_finite()) || (0..3).any(|i| min[i] > max[i]) {
                return Err(fixture_error(format!("\"{}\": invalid bounding box", e.name)));
            }
            if !e.surface_area.is_finite() || e.surface_area < 0.0 {
                return Err(fixture_error(format!(
                    "\"{}\": invalid surface area {}",
                    e.name, e.surface_area
                )));
            }
        }
        Ok(Self { entries })
    }

    /// Reference values of the bundled example models.
    pub fn builtin() -> Self {
        Self {
            entries: vec![
                ExpectedResult::new("simple_box.vsc", [0.0, 0.0, 0.0], [3.0, 2.0, 1.0], 22.0),
                ExpectedResult::new(
                    "all_shapes.vsc",
                    [-0.5, -0.5, -0.577],
                    [12.577, 5.0, 1.0],
                    72.756,
                ),
                ExpectedResult::new("lego_brick.vsc", [0.0, 0.0, 0.0], [1.6, 2.4, 1.12], 26.684),
                ExpectedResult::new(
                    "plate_with_holes.vsc",
                    [0.0, 0.0, 0.0],
                    [2.0, 1.0, 0.1],
                    4.602,
                ),
                ExpectedResult::new(
                    "box_sphere_diff.vsc",
                    [0.0, 0.0, 0.0],
                    [1.0, 1.0, 1.0],
                    5.501,
                ),
                ExpectedResult::new(
                    "sphere_torus_diff.vsc",
                    [-0.798, -1.3, -0.8],
                    [2.3, 1.3, 0.8],
                    22.170,
                ),
                ExpectedResult::new(
                    "vscad_logo.vsc",
                    [-0.57735, -0.57735, -0.57735],
                    [0.57735, 0.57735, 0.57735],
                    3.97567684187,
                ),
                ExpectedResult::new(
                    "csg_operations.vsc",
                    [-0.5, -0.5, -0.5],
                    [0.5, 0.5, 0.5],
                    5.801,
                ),
            ],
        }
    }

    /// Parse a JSON array of `{ name, boundingBox: [min, max], surfaceArea }`.
    pub fn from_json(json: &str) -> Result<Self, HarnessError> {
        let raw: Vec<FixtureEntry> =
            serde_json::from_str(json).map_err(|e| fixture_error(e.to_string()))?;
        Self::new(
            raw.into_iter()
                .map(|r| ExpectedResult::new(&r.name, r.bounding_box[0], r.bounding_box[1], r.surface_area))
                .collect(),
        )
    }

    pub fn load(path: &Path) -> Result<Self, HarnessError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| fixture_error(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, HarnessError> {
        let raw: Vec<FixtureEntry> = self.entries.iter().map(FixtureEntry::from).collect();
        serde_json::to_string_pretty(&raw).map_err(|e| fixture_error(e.to_string()))
    }

    pub fn entries(&self) -> &[ExpectedResult] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&ExpectedResult> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn fixture_error(reason: String) -> HarnessError {
    HarnessError::Fixture { reason }
}
