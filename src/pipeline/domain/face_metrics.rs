//! Geometric signals extracted from a single landmark set.
//!
//! Every function here is pure: the same landmarks always produce the same
//! numbers. Zero-length reference distances are not errors; they fall back
//! to fixed values (EAR and MAR to 0, brow distance to 0.5).

use serde::{Deserialize, Serialize};

use super::landmarks::{
    LandmarkSet, FACE_LEFT_EDGE, FACE_RIGHT_EDGE, LEFT_BROW_INNER, LEFT_EYE, MOUTH_BOTTOM_INNER,
    MOUTH_LEFT, MOUTH_RIGHT, MOUTH_TOP_INNER, RIGHT_BROW_INNER, RIGHT_EYE,
};

/// Brow distance reported when the face width collapses to zero.
pub const NEUTRAL_BROW_DISTANCE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceMetrics {
    /// Mean eye aperture ratio of both eyes.
    pub ear: f64,
    /// Mouth aperture ratio.
    pub mar: f64,
    /// Inner-brow distance normalized by face width.
    pub brow: f64,
}

impl FaceMetrics {
    pub fn from_landmarks(landmarks: &LandmarkSet) -> Self {
        Self {
            ear: mean_eye_aperture_ratio(landmarks),
            mar: mouth_aperture_ratio(landmarks),
            brow: normalized_brow_distance(landmarks),
        }
    }
}

/// `(|p1-p5| + |p2-p4|) / (2 |p0-p3|)` over the six eye indices.
pub fn eye_aperture_ratio(landmarks: &LandmarkSet, eye: &[usize; 6]) -> f64 {
    let p = |i: usize| landmarks.point(eye[i]);
    let vertical_a = p(1).distance(&p(5));
    let vertical_b = p(2).distance(&p(4));
    let horizontal = p(0).distance(&p(3));
    if horizontal == 0.0 {
        return 0.0;
    }
    (vertical_a + vertical_b) / (2.0 * horizontal)
}

pub fn mean_eye_aperture_ratio(landmarks: &LandmarkSet) -> f64 {
    let right = eye_aperture_ratio(landmarks, &RIGHT_EYE);
    let left = eye_aperture_ratio(landmarks, &LEFT_EYE);
    (right + left) / 2.0
}

/// Inner lip separation over mouth-corner separation.
pub fn mouth_aperture_ratio(landmarks: &LandmarkSet) -> f64 {
    let width = landmarks
        .point(MOUTH_LEFT)
        .distance(&landmarks.point(MOUTH_RIGHT));
    let height = landmarks
        .point(MOUTH_TOP_INNER)
        .distance(&landmarks.point(MOUTH_BOTTOM_INNER));
    if width > 0.0 {
        height / width
    } else {
        0.0
    }
}

pub fn normalized_brow_distance(landmarks: &LandmarkSet) -> f64 {
    let brow_inner = landmarks
        .point(LEFT_BROW_INNER)
        .distance(&landmarks.point(RIGHT_BROW_INNER));
    let face_width = landmarks
        .point(FACE_LEFT_EDGE)
        .distance(&landmarks.point(FACE_RIGHT_EDGE));
    if face_width > 0.0 {
        brow_inner / face_width
    } else {
        NEUTRAL_BROW_DISTANCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::domain::landmarks::Point;
    use crate::pipeline::domain::test_support::FaceFixture;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn fixture_metrics_round_to_requested_values() {
        let landmarks = FaceFixture::new(0.30, 0.10, 0.30).build();
        let metrics = FaceMetrics::from_landmarks(&landmarks);
        assert!((metrics.ear - 0.30).abs() < EPSILON);
        assert!((metrics.mar - 0.10).abs() < EPSILON);
        assert!((metrics.brow - 0.30).abs() < EPSILON);
    }

    #[test]
    fn collapsed_eye_width_yields_zero_ear() {
        // every point at the same spot, so each eye's horizontal span is 0
        let landmarks = LandmarkSet::new(vec![Point::new(0.4, 0.4); 468]).unwrap();
        assert_eq!(eye_aperture_ratio(&landmarks, &RIGHT_EYE), 0.0);
        assert_eq!(eye_aperture_ratio(&landmarks, &LEFT_EYE), 0.0);
        assert_eq!(mean_eye_aperture_ratio(&landmarks), 0.0);
    }

    #[test]
    fn collapsed_geometry_uses_fallbacks() {
        let landmarks = LandmarkSet::new(vec![Point::new(0.4, 0.4); 468]).unwrap();
        let metrics = FaceMetrics::from_landmarks(&landmarks);
        assert_eq!(metrics.mar, 0.0);
        assert_eq!(metrics.brow, NEUTRAL_BROW_DISTANCE);
    }

    #[test]
    fn metrics_are_idempotent() {
        let landmarks = FaceFixture::new(0.27, 0.33, 0.24)
            .with_nose_x(0.47)
            .build();
        let first = FaceMetrics::from_landmarks(&landmarks);
        let second = FaceMetrics::from_landmarks(&landmarks);
        assert_eq!(first.ear.to_bits(), second.ear.to_bits());
        assert_eq!(first.mar.to_bits(), second.mar.to_bits());
        assert_eq!(first.brow.to_bits(), second.brow.to_bits());
    }

    #[test]
    fn ear_averages_both_eyes() {
        let mut points = FaceFixture::new(0.30, 0.10, 0.30).build().points().to_vec();
        // close the left eye completely
        for &i in &[LEFT_EYE[1], LEFT_EYE[2], LEFT_EYE[4], LEFT_EYE[5]] {
            points[i] = Point::new(points[i].x, 0.4);
        }
        let landmarks = LandmarkSet::new(points).unwrap();
        assert!(eye_aperture_ratio(&landmarks, &LEFT_EYE).abs() < EPSILON);
        assert!((mean_eye_aperture_ratio(&landmarks) - 0.15).abs() < EPSILON);
    }
}
