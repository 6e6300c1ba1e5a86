use super::landmarks::{
    LandmarkSet, Point, FACE_LEFT_EDGE, FACE_MESH_POINTS, FACE_RIGHT_EDGE, LEFT_BROW_INNER,
    LEFT_EYE, MOUTH_BOTTOM_INNER, MOUTH_LEFT, MOUTH_RIGHT, MOUTH_TOP_INNER, NOSE_TIP,
    RIGHT_BROW_INNER, RIGHT_EYE,
};

const EYE_WIDTH: f64 = 0.1;
const MOUTH_WIDTH: f64 = 0.2;
const FACE_WIDTH: f64 = 0.8;

/// Builds synthetic face meshes whose EAR, MAR and brow distance come out
/// at the requested values.
pub(crate) struct FaceFixture {
    ear: f64,
    mar: f64,
    brow: f64,
    nose_x: f64,
}

impl FaceFixture {
    pub(crate) fn new(ear: f64, mar: f64, brow: f64) -> Self {
        Self {
            ear,
            mar,
            brow,
            nose_x: 0.5,
        }
    }

    pub(crate) fn with_nose_x(mut self, nose_x: f64) -> Self {
        self.nose_x = nose_x;
        self
    }

    pub(crate) fn build(&self) -> LandmarkSet {
        let mut points = vec![Point::new(0.5, 0.5); FACE_MESH_POINTS];

        for (eye, center_x) in [(RIGHT_EYE, 0.35), (LEFT_EYE, 0.65)] {
            let center_y = 0.4;
            let half_open = self.ear * EYE_WIDTH / 2.0;
            points[eye[0]] = Point::new(center_x - EYE_WIDTH / 2.0, center_y);
            points[eye[3]] = Point::new(center_x + EYE_WIDTH / 2.0, center_y);
            points[eye[1]] = Point::new(center_x - 0.02, center_y - half_open);
            points[eye[5]] = Point::new(center_x - 0.02, center_y + half_open);
            points[eye[2]] = Point::new(center_x + 0.02, center_y - half_open);
            points[eye[4]] = Point::new(center_x + 0.02, center_y + half_open);
        }

        let half_gap = self.mar * MOUTH_WIDTH / 2.0;
        points[MOUTH_LEFT] = Point::new(0.5 - MOUTH_WIDTH / 2.0, 0.7);
        points[MOUTH_RIGHT] = Point::new(0.5 + MOUTH_WIDTH / 2.0, 0.7);
        points[MOUTH_TOP_INNER] = Point::new(0.5, 0.7 - half_gap);
        points[MOUTH_BOTTOM_INNER] = Point::new(0.5, 0.7 + half_gap);

        let half_brow = self.brow * FACE_WIDTH / 2.0;
        points[FACE_LEFT_EDGE] = Point::new(0.5 - FACE_WIDTH / 2.0, 0.5);
        points[FACE_RIGHT_EDGE] = Point::new(0.5 + FACE_WIDTH / 2.0, 0.5);
        points[LEFT_BROW_INNER] = Point::new(0.5 - half_brow, 0.3);
        points[RIGHT_BROW_INNER] = Point::new(0.5 + half_brow, 0.3);

        points[NOSE_TIP] = Point::new(self.nose_x, 0.5);

        LandmarkSet::new(points).expect("fixture always has a full mesh")
    }
}
