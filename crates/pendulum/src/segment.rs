//! Rigid arms and the planar geometry derived from them.
//!
//! Positions use screen-style coordinates: `x` grows to the right and `y`
//! grows downward, so an arm hanging straight down (`theta = 0`) ends at
//! `fix + (0, length)`.

use crate::ModelError;

/// A point in the pendulum plane, in meters.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The fixed physical parameters of one pendulum arm.
///
/// The arm's mass is lumped at its end point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arm {
    mass: f64,
    length: f64,
}

impl Arm {
    /// Creates an arm from its mass (kg) and length (m).
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NonPositive`] if either value is not a positive,
    /// finite number.
    pub fn new(mass: f64, length: f64) -> Result<Self, ModelError> {
        ModelError::check_positive("mass", mass)?;
        ModelError::check_positive("length", length)?;
        Ok(Self { mass, length })
    }

    #[must_use]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Returns where the arm ends when it pivots about `fix` at angle `theta`.
    #[must_use]
    pub fn end_point(&self, fix: Point, theta: f64) -> Point {
        Point::new(
            fix.x + self.length * theta.sin(),
            fix.y + self.length * theta.cos(),
        )
    }
}

/// The joint positions of a double pendulum at one instant.
///
/// The second arm's pivot is always the first arm's end point; building a
/// pose is the only place that relationship is established.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Fixed pivot of the first arm.
    pub anchor: Point,
    /// End of the first arm and pivot of the second.
    pub elbow: Point,
    /// End of the second arm.
    pub tip: Point,
}

impl Pose {
    #[must_use]
    pub fn new(anchor: Point, first: &Arm, second: &Arm, theta1: f64, theta2: f64) -> Self {
        let elbow = first.end_point(anchor, theta1);
        let tip = second.end_point(elbow, theta2);
        Self { anchor, elbow, tip }
    }
}
