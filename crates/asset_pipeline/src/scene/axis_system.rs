//! Coordinate conventions and length units of a scene
//!
//! Producers record the convention of the source data here. Nothing in the
//! store converts between conventions.

use crate::foundation::math::Vec3;

named_enum! {
    /// Orientation of the coordinate frame
    pub enum Handedness {
        /// Left-handed frame
        Left = 0,
        /// Right-handed frame
        Right = 1,
    }
}

named_enum! {
    /// A signed coordinate axis
    pub enum Axis {
        /// +X
        PositiveX = 0,
        /// -X
        NegativeX = 1,
        /// +Y
        PositiveY = 2,
        /// -Y
        NegativeY = 3,
        /// +Z
        PositiveZ = 4,
        /// -Z
        NegativeZ = 5,
    }
}

impl Axis {
    /// Unit vector along the axis
    pub fn vector(self) -> Vec3 {
        match self {
            Self::PositiveX => Vec3::new(1.0, 0.0, 0.0),
            Self::NegativeX => Vec3::new(-1.0, 0.0, 0.0),
            Self::PositiveY => Vec3::new(0.0, 1.0, 0.0),
            Self::NegativeY => Vec3::new(0.0, -1.0, 0.0),
            Self::PositiveZ => Vec3::new(0.0, 0.0, 1.0),
            Self::NegativeZ => Vec3::new(0.0, 0.0, -1.0),
        }
    }

    /// True if both axes lie on the same line, whatever their sign
    pub const fn is_parallel(self, other: Self) -> bool {
        self.as_u8() / 2 == other.as_u8() / 2
    }
}

/// Handedness plus up and front directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AxisSystem {
    /// Frame orientation
    pub handedness: Handedness,
    /// World up direction
    pub up: Axis,
    /// Direction a model faces
    pub front: Axis,
}

impl Default for AxisSystem {
    fn default() -> Self {
        Self::left_handed_y_up()
    }
}

impl AxisSystem {
    /// Create an axis system
    pub const fn new(handedness: Handedness, up: Axis, front: Axis) -> Self {
        Self { handedness, up, front }
    }

    /// Left-handed, +Y up, +Z front
    pub const fn left_handed_y_up() -> Self {
        Self::new(Handedness::Left, Axis::PositiveY, Axis::PositiveZ)
    }

    /// Right-handed, +Y up, -Z front
    pub const fn right_handed_y_up() -> Self {
        Self::new(Handedness::Right, Axis::PositiveY, Axis::NegativeZ)
    }

    /// Right-handed, +Z up, -Y front
    pub const fn right_handed_z_up() -> Self {
        Self::new(Handedness::Right, Axis::PositiveZ, Axis::NegativeY)
    }

    /// Up direction as a vector
    pub fn up_axis(&self) -> Vec3 {
        self.up.vector()
    }

    /// Front direction as a vector
    pub fn front_axis(&self) -> Vec3 {
        self.front.vector()
    }

    /// False when up and front do not span a plane
    pub const fn is_valid(&self) -> bool {
        !self.up.is_parallel(self.front)
    }
}

named_enum! {
    /// Length unit of positions and distances
    #[derive(Default)]
    pub enum Unit {
        /// Centimeters
        #[default]
        CenterMeter = 0,
        /// Meters
        Meter = 1,
    }
}

impl Unit {
    /// Length of one unit in meters
    pub const fn meters_per_unit(self) -> f32 {
        match self {
            Self::CenterMeter => 0.01,
            Self::Meter => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_convention() {
        let system = AxisSystem::default();
        assert_eq!(system.handedness, Handedness::Left);
        assert_eq!(system.up_axis(), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(system.front_axis(), Vec3::new(0.0, 0.0, 1.0));
        assert!(system.is_valid());
        assert_eq!(Unit::default(), Unit::CenterMeter);
    }

    #[test]
    fn test_parallel_axes_are_invalid() {
        assert!(Axis::PositiveY.is_parallel(Axis::NegativeY));
        assert!(!Axis::PositiveY.is_parallel(Axis::PositiveZ));

        let system = AxisSystem::new(Handedness::Right, Axis::PositiveZ, Axis::NegativeZ);
        assert!(!system.is_valid());
        assert!(AxisSystem::right_handed_z_up().is_valid());
        assert!(AxisSystem::right_handed_y_up().is_valid());
    }

    #[test]
    fn test_meters_per_unit() {
        assert!((Unit::CenterMeter.meters_per_unit() - 0.01).abs() < f32::EPSILON);
        assert!((Unit::Meter.meters_per_unit() - 1.0).abs() < f32::EPSILON);
    }
}
