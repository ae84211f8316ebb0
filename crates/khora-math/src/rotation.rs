// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Euler-angle rotations in the six Tait–Bryan orders.
//!
//! An order such as `ZYX` names the axes of yaw, pitch and roll, in that
//! order: the rotation is `R_z(yaw) * R_y(pitch) * R_x(roll)`. Euler angles
//! are carried in a [`Float3`] indexed by axis, so for `ZYX` the yaw is the
//! `z` component and the roll the `x` component.

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::matrix::Mat4;
use crate::quaternion::Quaternion;
use crate::scalar::{clamp, degrees_to_radians, radians_to_degrees, GIMBAL_LOCK_THRESHOLD};
use crate::vector::{Float3, Float4, VectorComponent};

/// The axis order of an Euler-angle rotation.
///
/// The first letter is the yaw axis, the second the pitch axis and the
/// third the roll axis.
#[allow(clippy::upper_case_acronyms)]
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Encode,
    Decode,
)]
pub enum RotationsOrder {
    /// Yaw about X, pitch about Y, roll about Z.
    XYZ,
    /// Yaw about X, pitch about Z, roll about Y.
    XZY,
    /// Yaw about Y, pitch about X, roll about Z.
    YXZ,
    /// Yaw about Y, pitch about Z, roll about X.
    YZX,
    /// Yaw about Z, pitch about Y, roll about X.
    #[default]
    ZYX,
    /// Yaw about Z, pitch about X, roll about Y.
    ZXY,
}

impl RotationsOrder {
    /// Every order, in declaration order.
    pub const ALL: [RotationsOrder; 6] = [
        RotationsOrder::XYZ,
        RotationsOrder::XZY,
        RotationsOrder::YXZ,
        RotationsOrder::YZX,
        RotationsOrder::ZYX,
        RotationsOrder::ZXY,
    ];

    /// The component holding the yaw angle.
    pub const fn yaw(self) -> VectorComponent {
        match self {
            RotationsOrder::XYZ | RotationsOrder::XZY => VectorComponent::X,
            RotationsOrder::YXZ | RotationsOrder::YZX => VectorComponent::Y,
            RotationsOrder::ZYX | RotationsOrder::ZXY => VectorComponent::Z,
        }
    }

    /// The component holding the pitch angle.
    pub const fn pitch(self) -> VectorComponent {
        match self {
            RotationsOrder::YXZ | RotationsOrder::ZXY => VectorComponent::X,
            RotationsOrder::XYZ | RotationsOrder::ZYX => VectorComponent::Y,
            RotationsOrder::XZY | RotationsOrder::YZX => VectorComponent::Z,
        }
    }

    /// The component holding the roll angle.
    pub const fn roll(self) -> VectorComponent {
        match self {
            RotationsOrder::YZX | RotationsOrder::ZYX => VectorComponent::X,
            RotationsOrder::XZY | RotationsOrder::ZXY => VectorComponent::Y,
            RotationsOrder::XYZ | RotationsOrder::YXZ => VectorComponent::Z,
        }
    }

    /// Splits per-axis angles into `(yaw, pitch, roll)`.
    #[inline]
    fn split(self, angles: Float3) -> (f32, f32, f32) {
        (angles[self.yaw()], angles[self.pitch()], angles[self.roll()])
    }
}

// --- Mat4 ---

impl Mat4 {
    /// Creates a rotation matrix from per-axis Euler angles in degrees.
    ///
    /// `order` tells which components of `d` hold yaw, pitch and roll.
    #[inline]
    pub fn from_euler(d: Float3, order: RotationsOrder) -> Self {
        let (yaw, pitch, roll) = order.split(d);
        Self::from_yaw_pitch_roll(
            degrees_to_radians(yaw),
            degrees_to_radians(pitch),
            degrees_to_radians(roll),
            order,
        )
    }

    /// Creates the rotation matrix `R_yaw * R_pitch * R_roll` about the axes
    /// of `order`. Angles are in radians.
    pub fn from_yaw_pitch_roll(yaw: f32, pitch: f32, roll: f32, order: RotationsOrder) -> Self {
        let (s1, c1) = yaw.sin_cos();
        let (s2, c2) = pitch.sin_cos();
        let (s3, c3) = roll.sin_cos();

        let (x, y, z) = match order {
            RotationsOrder::XYZ => (
                Float3::new(c2 * c3, c1 * s3 + c3 * s1 * s2, s1 * s3 - c1 * c3 * s2),
                Float3::new(-c2 * s3, c1 * c3 - s1 * s2 * s3, c3 * s1 + c1 * s2 * s3),
                Float3::new(s2, -c2 * s1, c1 * c2),
            ),
            RotationsOrder::XZY => (
                Float3::new(c2 * c3, s1 * s3 + c1 * c3 * s2, c3 * s1 * s2 - c1 * s3),
                Float3::new(-s2, c1 * c2, c2 * s1),
                Float3::new(c2 * s3, c1 * s2 * s3 - c3 * s1, c1 * c3 + s1 * s2 * s3),
            ),
            RotationsOrder::YXZ => (
                Float3::new(c1 * c3 + s1 * s2 * s3, c2 * s3, c1 * s2 * s3 - c3 * s1),
                Float3::new(c3 * s1 * s2 - c1 * s3, c2 * c3, c1 * c3 * s2 + s1 * s3),
                Float3::new(c2 * s1, -s2, c1 * c2),
            ),
            RotationsOrder::YZX => (
                Float3::new(c1 * c2, s2, -c2 * s1),
                Float3::new(s1 * s3 - c1 * c3 * s2, c2 * c3, c1 * s3 + c3 * s1 * s2),
                Float3::new(c3 * s1 + c1 * s2 * s3, -c2 * s3, c1 * c3 - s1 * s2 * s3),
            ),
            RotationsOrder::ZYX => (
                Float3::new(c1 * c2, c2 * s1, -s2),
                Float3::new(c1 * s2 * s3 - c3 * s1, c1 * c3 + s1 * s2 * s3, c2 * s3),
                Float3::new(s1 * s3 + c1 * c3 * s2, c3 * s1 * s2 - c1 * s3, c2 * c3),
            ),
            RotationsOrder::ZXY => (
                Float3::new(c1 * c3 - s1 * s2 * s3, c3 * s1 + c1 * s2 * s3, -c2 * s3),
                Float3::new(-c2 * s1, c1 * c2, s2),
                Float3::new(c1 * s3 + c3 * s1 * s2, s1 * s3 - c1 * c3 * s2, c2 * c3),
            ),
        };

        Self::from_cols(
            Float4::from_float3(x, 0.0),
            Float4::from_float3(y, 0.0),
            Float4::from_float3(z, 0.0),
            Float4::W,
        )
    }

    /// Decomposes the rotation part of this matrix into per-axis Euler angles
    /// in degrees, laid out like the input of [`Mat4::from_euler`].
    ///
    /// Pitch lies in `[-90, 90]`. When the pitch reaches ±90 degrees yaw and
    /// roll share one degree of freedom: the roll is then reported as 0 and
    /// the whole rotation about that axis is folded into the yaw.
    pub fn euler_angles(&self, order: RotationsOrder) -> Float3 {
        // Row-major element access, `m(row, column)`.
        let m = |r: usize, c: usize| self.cols[c][r];

        // (sin(pitch), yaw atan2 pair, roll atan2 pair, locked yaw atan2 pair)
        let (e, yaw, roll, locked_yaw) = match order {
            RotationsOrder::XYZ => (
                m(0, 2),
                (-m(1, 2), m(2, 2)),
                (-m(0, 1), m(0, 0)),
                (m(2, 1), m(1, 1)),
            ),
            RotationsOrder::XZY => (
                -m(0, 1),
                (m(2, 1), m(1, 1)),
                (m(0, 2), m(0, 0)),
                (-m(1, 2), m(2, 2)),
            ),
            RotationsOrder::YXZ => (
                -m(1, 2),
                (m(0, 2), m(2, 2)),
                (m(1, 0), m(1, 1)),
                (-m(2, 0), m(0, 0)),
            ),
            RotationsOrder::YZX => (
                m(1, 0),
                (-m(2, 0), m(0, 0)),
                (-m(1, 2), m(1, 1)),
                (m(0, 2), m(2, 2)),
            ),
            RotationsOrder::ZYX => (
                -m(2, 0),
                (m(1, 0), m(0, 0)),
                (m(2, 1), m(2, 2)),
                (-m(0, 1), m(1, 1)),
            ),
            RotationsOrder::ZXY => (
                m(2, 1),
                (-m(0, 1), m(1, 1)),
                (-m(2, 0), m(2, 2)),
                (m(1, 0), m(0, 0)),
            ),
        };

        let pitch = clamp(e, -1.0, 1.0).asin();
        let (yaw, roll) = if e.abs() < GIMBAL_LOCK_THRESHOLD {
            (yaw.0.atan2(yaw.1), roll.0.atan2(roll.1))
        } else {
            log::trace!("euler_angles({order:?}): gimbal lock, sin(pitch) = {e}");
            (locked_yaw.0.atan2(locked_yaw.1), 0.0)
        };

        let mut angles = Float3::ZERO;
        angles[order.yaw()] = radians_to_degrees(yaw);
        angles[order.pitch()] = radians_to_degrees(pitch);
        angles[order.roll()] = radians_to_degrees(roll);
        angles
    }
}

// --- Quaternion ---

impl Quaternion {
    /// Creates a rotation from per-axis Euler angles in degrees.
    ///
    /// Produces the same rotation as [`Mat4::from_euler`] with the same inputs.
    #[inline]
    pub fn from_euler(d: Float3, order: RotationsOrder) -> Self {
        let (yaw, pitch, roll) = order.split(d);
        Self::from_yaw_pitch_roll(
            degrees_to_radians(yaw),
            degrees_to_radians(pitch),
            degrees_to_radians(roll),
            order,
        )
    }

    /// Creates the rotation `q_yaw * q_pitch * q_roll` about the axes of
    /// `order`. Angles are in radians.
    pub fn from_yaw_pitch_roll(yaw: f32, pitch: f32, roll: f32, order: RotationsOrder) -> Self {
        let (s1, c1) = (yaw * 0.5).sin_cos();
        let (s2, c2) = (pitch * 0.5).sin_cos();
        let (s3, c3) = (roll * 0.5).sin_cos();

        match order {
            RotationsOrder::XYZ => Self::new(
                c1 * s2 * s3 + c2 * c3 * s1,
                c1 * c3 * s2 - c2 * s1 * s3,
                c1 * c2 * s3 + c3 * s1 * s2,
                c1 * c2 * c3 - s1 * s2 * s3,
            ),
            RotationsOrder::XZY => Self::new(
                c2 * c3 * s1 - c1 * s2 * s3,
                c1 * c2 * s3 - c3 * s1 * s2,
                c1 * c3 * s2 + c2 * s1 * s3,
                c1 * c2 * c3 + s1 * s2 * s3,
            ),
            RotationsOrder::YXZ => Self::new(
                c1 * c3 * s2 + c2 * s1 * s3,
                c2 * c3 * s1 - c1 * s2 * s3,
                c1 * c2 * s3 - c3 * s1 * s2,
                c1 * c2 * c3 + s1 * s2 * s3,
            ),
            RotationsOrder::YZX => Self::new(
                c1 * c2 * s3 + c3 * s1 * s2,
                c1 * s2 * s3 + c2 * c3 * s1,
                c1 * c3 * s2 - c2 * s1 * s3,
                c1 * c2 * c3 - s1 * s2 * s3,
            ),
            RotationsOrder::ZYX => Self::new(
                c1 * c2 * s3 - c3 * s1 * s2,
                c1 * c3 * s2 + c2 * s1 * s3,
                c2 * c3 * s1 - c1 * s2 * s3,
                c1 * c2 * c3 + s1 * s2 * s3,
            ),
            RotationsOrder::ZXY => Self::new(
                c1 * c3 * s2 - c2 * s1 * s3,
                c1 * c2 * s3 + c3 * s1 * s2,
                c1 * s2 * s3 + c2 * c3 * s1,
                c1 * c2 * c3 - s1 * s2 * s3,
            ),
        }
    }

    /// Decomposes this rotation into per-axis Euler angles in degrees.
    ///
    /// See [`Mat4::euler_angles`] for the layout and the gimbal-lock rule.
    #[inline]
    pub fn euler_angles(&self, order: RotationsOrder) -> Float3 {
        Mat4::from_quat(*self).euler_angles(order)
    }
}

// --- Tests ---

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar::EPSILON;
    use approx::assert_relative_eq;

    fn axis(component: VectorComponent) -> Float3 {
        let mut v = Float3::ZERO;
        v[component] = 1.0;
        v
    }

    #[test]
    fn test_default_order() {
        assert_eq!(RotationsOrder::default(), RotationsOrder::ZYX);
    }

    #[test]
    fn test_components_are_a_permutation() {
        for order in RotationsOrder::ALL {
            let mut seen = [false; 3];
            for c in [order.yaw(), order.pitch(), order.roll()] {
                seen[c.index()] = true;
            }
            assert_eq!(seen, [true; 3], "{order:?}");
        }
        assert_eq!(RotationsOrder::YZX.yaw(), VectorComponent::Y);
        assert_eq!(RotationsOrder::YZX.pitch(), VectorComponent::Z);
        assert_eq!(RotationsOrder::YZX.roll(), VectorComponent::X);
    }

    #[test]
    fn test_matrix_matches_axis_composition() {
        let d = Float3::new(30.0, -20.0, 75.0);
        for order in RotationsOrder::ALL {
            let expected = Mat4::from_axis_angle(axis(order.yaw()), d[order.yaw()])
                * Mat4::from_axis_angle(axis(order.pitch()), d[order.pitch()])
                * Mat4::from_axis_angle(axis(order.roll()), d[order.roll()]);
            assert_relative_eq!(Mat4::from_euler(d, order), expected, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_quaternion_matches_axis_composition() {
        let d = Float3::new(-45.0, 12.0, 160.0);
        for order in RotationsOrder::ALL {
            let expected = Quaternion::from_axis_angle(axis(order.yaw()), d[order.yaw()])
                * Quaternion::from_axis_angle(axis(order.pitch()), d[order.pitch()])
                * Quaternion::from_axis_angle(axis(order.roll()), d[order.roll()]);
            assert_relative_eq!(Quaternion::from_euler(d, order), expected, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_quaternion_and_matrix_agree() {
        let d = Float3::new(10.0, 50.0, -35.0);
        for order in RotationsOrder::ALL {
            let from_q = Mat4::from_quat(Quaternion::from_euler(d, order));
            assert_relative_eq!(from_q, Mat4::from_euler(d, order), epsilon = 1e-5);
        }
    }

    #[test]
    fn test_radians_and_degrees_builders_agree() {
        let order = RotationsOrder::YXZ;
        let d = Float3::new(20.0, 40.0, 60.0);
        let m = Mat4::from_yaw_pitch_roll(
            40f32.to_radians(),
            20f32.to_radians(),
            60f32.to_radians(),
            order,
        );
        assert_relative_eq!(m, Mat4::from_euler(d, order), epsilon = EPSILON);
    }

    #[test]
    fn test_euler_round_trip() {
        let d = Float3::new(1.0, 2.0, 3.0);
        for order in RotationsOrder::ALL {
            let from_m = Mat4::from_euler(d, order).euler_angles(order);
            let from_q = Quaternion::from_euler(d, order).euler_angles(order);
            assert_relative_eq!(from_m, d, epsilon = 1e-3);
            assert_relative_eq!(from_q, d, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_euler_round_trip_large_angles() {
        let d = Float3::new(-150.0, 60.0, 120.0);
        let order = RotationsOrder::ZYX;
        let angles = Mat4::from_euler(d, order).euler_angles(order);
        assert_relative_eq!(angles, d, epsilon = 1e-3);
    }

    #[test]
    fn test_gimbal_lock() {
        let d = Float3::new(10.0, 90.0, 0.0);

        let angles = Mat4::from_euler(d, RotationsOrder::XYZ).euler_angles(RotationsOrder::XYZ);
        assert_relative_eq!(angles, Float3::new(10.0, 90.0, 0.0), epsilon = 1e-3);

        let angles = Mat4::from_euler(d, RotationsOrder::ZYX).euler_angles(RotationsOrder::ZYX);
        assert_relative_eq!(angles, Float3::new(0.0, 90.0, -10.0), epsilon = 1e-3);
    }

    #[test]
    fn test_gimbal_lock_keeps_rotation() {
        for order in RotationsOrder::ALL {
            for pitch in [-90.0f32, 90.0, 89.99999, -89.99999] {
                let mut d = Float3::new(25.0, -40.0, 70.0);
                d[order.pitch()] = pitch;
                let m = Mat4::from_euler(d, order);
                let angles = m.euler_angles(order);
                if pitch.abs() == 90.0 {
                    assert_eq!(angles[order.roll()], 0.0, "{order:?} {pitch}");
                }
                assert_relative_eq!(Mat4::from_euler(angles, order), m, epsilon = 1e-4);

                let q = Quaternion::from_euler(d, order);
                let rebuilt = Quaternion::from_euler(q.euler_angles(order), order);
                assert_relative_eq!(rebuilt.to_mat4(), m, epsilon = 1e-4);
            }
        }
    }
}
