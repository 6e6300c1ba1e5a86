use serde::{Deserialize, Serialize};

use crate::error::LandmarkError;

/// Number of points in the face-mesh topology. Detectors that also emit
/// iris points (478) are accepted since the first 468 indices are shared.
pub const FACE_MESH_POINTS: usize = 468;

// Face-mesh indices used by the metric extractors.
pub const RIGHT_EYE: [usize; 6] = [33, 160, 158, 133, 153, 144];
pub const LEFT_EYE: [usize; 6] = [362, 385, 387, 263, 373, 380];
pub const MOUTH_LEFT: usize = 61;
pub const MOUTH_RIGHT: usize = 291;
pub const MOUTH_TOP_INNER: usize = 13;
pub const MOUTH_BOTTOM_INNER: usize = 14;
pub const LEFT_BROW_INNER: usize = 66;
pub const RIGHT_BROW_INNER: usize = 296;
pub const FACE_LEFT_EDGE: usize = 234;
pub const FACE_RIGHT_EDGE: usize = 454;
pub const NOSE_TIP: usize = 1;

/// Normalized image coordinate, both axes in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// One face worth of mesh landmarks, indexed by the fixed anatomical scheme.
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkSet {
    points: Vec<Point>,
}

impl LandmarkSet {
    pub fn new(points: Vec<Point>) -> Result<Self, LandmarkError> {
        if points.len() < FACE_MESH_POINTS {
            return Err(LandmarkError::TooFewPoints {
                expected: FACE_MESH_POINTS,
                actual: points.len(),
            });
        }
        Ok(Self { points })
    }

    /// Unchecked lookup for the fixed mesh indices above, all of which are
    /// below `FACE_MESH_POINTS`.
    pub(crate) fn point(&self, index: usize) -> Point {
        self.points[index]
    }

    pub fn get(&self, index: usize) -> Option<Point> {
        self.points.get(index).copied()
    }

    pub fn nose_tip(&self) -> Point {
        self.point(NOSE_TIP)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

impl TryFrom<Vec<Point>> for LandmarkSet {
    type Error = LandmarkError;

    fn try_from(points: Vec<Point>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}
