//! Skeleton - the landmarks detected for one frame
//!
//! A skeleton is replaced wholesale on every inference and never mutated once
//! handed to the evaluator. Only the left side of the body is consumed.

/// Landmark identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Joint {
    LeftShoulder,
    LeftElbow,
    LeftWrist,
    LeftHip,
    LeftKnee,
    LeftAnkle,
}

impl Joint {
    /// All joints in order
    pub fn all() -> &'static [Joint] {
        &[
            Joint::LeftShoulder,
            Joint::LeftElbow,
            Joint::LeftWrist,
            Joint::LeftHip,
            Joint::LeftKnee,
            Joint::LeftAnkle,
        ]
    }

    /// Number of joints
    pub const fn count() -> usize {
        6
    }
}

/// 2D position in normalized image coordinates
///
/// Nominally in [0, 1] on both axes, y growing downwards. Landmark jitter can
/// push values slightly outside that range.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point2D {
    pub x: f32,
    pub y: f32,
}

impl Point2D {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Distance to another point
    pub fn distance(&self, other: &Point2D) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Detected landmark (position + detector confidence)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Landmark {
    pub point: Point2D,
    pub visibility: f32,
}

impl Landmark {
    pub fn new(point: Point2D, visibility: f32) -> Self {
        Self { point, visibility }
    }
}

/// Complete skeleton for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Skeleton {
    /// Is a body detected?
    pub present: bool,

    /// Landmarks indexed by Joint
    landmarks: [Option<Landmark>; Joint::count()],
}

impl Default for Skeleton {
    fn default() -> Self {
        Self::new()
    }
}

impl Skeleton {
    /// Create a present skeleton with no landmarks yet
    pub fn new() -> Self {
        Self {
            present: true,
            landmarks: [None; Joint::count()],
        }
    }

    /// No body present
    pub fn absent() -> Self {
        Self {
            present: false,
            landmarks: [None; Joint::count()],
        }
    }

    /// Build a present skeleton from fully visible points
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = (Joint, Point2D)>,
    {
        points
            .into_iter()
            .fold(Self::new(), |skeleton, (joint, point)| {
                skeleton.with_landmark(joint, Landmark::new(point, 1.0))
            })
    }

    /// Set a landmark
    pub fn with_landmark(mut self, joint: Joint, landmark: Landmark) -> Self {
        self.landmarks[joint as usize] = Some(landmark);
        self
    }

    /// Get a landmark by joint
    pub fn landmark(&self, joint: Joint) -> Option<&Landmark> {
        self.landmarks[joint as usize].as_ref()
    }

    /// Position of a joint, if it was detected with finite coordinates
    pub fn point(&self, joint: Joint) -> crate::RepsenseResult<Point2D> {
        if !self.present {
            return Err(crate::RepsenseError::BodyAbsent);
        }
        self.landmark(joint)
            .map(|l| l.point)
            .filter(Point2D::is_finite)
            .ok_or(crate::RepsenseError::MissingLandmark(joint))
    }

    /// Number of detected landmarks
    pub fn landmark_count(&self) -> usize {
        self.landmarks.iter().filter(|l| l.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RepsenseError;

    #[test]
    fn test_skeleton_from_points() {
        let skeleton = Skeleton::from_points([
            (Joint::LeftShoulder, Point2D::new(0.5, 0.3)),
            (Joint::LeftElbow, Point2D::new(0.5, 0.45)),
        ]);

        assert!(skeleton.present);
        assert_eq!(skeleton.landmark_count(), 2);
        assert_eq!(
            skeleton.point(Joint::LeftElbow).unwrap(),
            Point2D::new(0.5, 0.45)
        );
    }

    #[test]
    fn test_missing_landmark() {
        let skeleton = Skeleton::from_points([(Joint::LeftHip, Point2D::new(0.5, 0.6))]);

        assert_eq!(
            skeleton.point(Joint::LeftKnee),
            Err(RepsenseError::MissingLandmark(Joint::LeftKnee))
        );
    }

    #[test]
    fn test_non_finite_landmark_is_missing() {
        let skeleton = Skeleton::from_points([(Joint::LeftWrist, Point2D::new(f32::NAN, 0.2))]);

        assert_eq!(
            skeleton.point(Joint::LeftWrist),
            Err(RepsenseError::MissingLandmark(Joint::LeftWrist))
        );
    }

    #[test]
    fn test_absent_skeleton() {
        let skeleton = Skeleton::absent();

        assert!(!skeleton.present);
        assert_eq!(skeleton.landmark_count(), 0);
        assert_eq!(
            skeleton.point(Joint::LeftShoulder),
            Err(RepsenseError::BodyAbsent)
        );
    }
}
