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

//! Provides a Quaternion type for representing 3D rotations.
//!
//! Euler-angle constructors and decomposition are implemented in
//! [`crate::rotation`].

use approx::{AbsDiffEq, RelativeEq};
use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::matrix::Mat4;
use crate::scalar::{degrees_to_radians, EPSILON};
use crate::vector::Float3;
use std::ops::{Add, Div, Mul, MulAssign, Neg, Sub};

/// Represents a quaternion for efficient 3D rotations.
///
/// A quaternion is stored as `(x, y, z, w)`, where `[x, y, z]` is the "vector" part
/// and `w` is the "scalar" part. For representing rotations, it should be a "unit
/// quaternion" where `x² + y² + z² + w² = 1`. Component-wise `+`, `-` and scalar
/// products do not preserve unit length; call [`Quaternion::normalize`] afterwards.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    bytemuck::Pod,
    bytemuck::Zeroable,
    Serialize,
    Deserialize,
    Encode,
    Decode,
)]
#[repr(C)]
pub struct Quaternion {
    /// The x component of the vector part.
    pub x: f32,
    /// The y component of the vector part.
    pub y: f32,
    /// The z component of the vector part.
    pub z: f32,
    /// The scalar (real) part.
    pub w: f32,
}

impl Quaternion {
    /// The identity quaternion, representing no rotation.
    pub const IDENTITY: Quaternion = Quaternion {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    /// Dot products beyond this magnitude are treated as parallel directions
    /// by [`Quaternion::from_rotation`].
    #[allow(clippy::excessive_precision)]
    pub const PARALLEL_THRESHOLD: f32 = 0.9999999;

    /// The `|dot|` above which [`Quaternion::slerp`] falls back to [`Quaternion::nlerp`].
    pub const DEFAULT_SLERP_THRESHOLD: f32 = 0.9995;

    /// Creates a new quaternion from its raw components.
    ///
    /// Note: This does not guarantee a unit quaternion. For creating rotations,
    /// prefer using `from_axis_angle` or other rotation-specific constructors.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Creates a quaternion representing a rotation around a given axis by a given angle.
    ///
    /// # Arguments
    ///
    /// * `axis`: The axis of rotation. It is normalized first.
    /// * `angle_degrees`: The angle of rotation in degrees.
    #[inline]
    pub fn from_axis_angle(axis: Float3, angle_degrees: f32) -> Self {
        let normalized_axis = axis.normalize();
        let (s, c) = (degrees_to_radians(angle_degrees) * 0.5).sin_cos();
        Self {
            x: normalized_axis.x * s,
            y: normalized_axis.y * s,
            z: normalized_axis.z * s,
            w: c,
        }
    }

    /// Creates the shortest rotation that turns direction `from` into direction `to`.
    ///
    /// Both directions are expected to be normalized. Opposite directions
    /// produce a half turn about an axis perpendicular to `from`.
    pub fn from_rotation(from: Float3, to: Float3) -> Self {
        let d = from.dot(to);

        if d < -Self::PARALLEL_THRESHOLD {
            let mut axis = Float3::X.cross(from);
            if axis.length() < EPSILON {
                axis = Float3::Y.cross(from);
            }
            log::trace!("from_rotation: opposite directions, half turn about {axis:?}");
            return Self::from_axis_angle(axis, 180.0);
        }
        if d > Self::PARALLEL_THRESHOLD {
            return Self::IDENTITY;
        }

        let axis = from.cross(to);
        Self::new(axis.x, axis.y, axis.z, 1.0 + d).normalize()
    }

    /// Creates a quaternion from a 4x4 rotation matrix.
    ///
    /// This method only considers the upper 3x3 part of the matrix for the conversion.
    pub fn from_mat4(m: &Mat4) -> Self {
        let m00 = m.cols[0].x;
        let m10 = m.cols[0].y;
        let m20 = m.cols[0].z;
        let m01 = m.cols[1].x;
        let m11 = m.cols[1].y;
        let m21 = m.cols[1].z;
        let m02 = m.cols[2].x;
        let m12 = m.cols[2].y;
        let m22 = m.cols[2].z;

        let trace = m00 + m11 + m22;

        let q = if trace > 0.0 {
            let s = 2.0 * (trace + 1.0).sqrt();
            Self::new((m21 - m12) / s, (m02 - m20) / s, (m10 - m01) / s, 0.25 * s)
        } else if m00 > m11 && m00 > m22 {
            let s = 2.0 * (1.0 + m00 - m11 - m22).sqrt();
            Self::new(0.25 * s, (m01 + m10) / s, (m02 + m20) / s, (m21 - m12) / s)
        } else if m11 > m22 {
            let s = 2.0 * (1.0 + m11 - m00 - m22).sqrt();
            Self::new((m01 + m10) / s, 0.25 * s, (m12 + m21) / s, (m02 - m20) / s)
        } else {
            let s = 2.0 * (1.0 + m22 - m00 - m11).sqrt();
            Self::new((m02 + m20) / s, (m12 + m21) / s, 0.25 * s, (m10 - m01) / s)
        };
        q.normalize()
    }

    /// Converts this rotation into a 4x4 matrix. See [`Mat4::from_quat`].
    #[inline]
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_quat(*self)
    }

    /// Returns the vector part `(x, y, z)`.
    #[inline]
    pub fn xyz(&self) -> Float3 {
        Float3::new(self.x, self.y, self.z)
    }

    /// Calculates the squared length (magnitude) of the quaternion.
    #[inline]
    pub fn length_squared(&self) -> f32 {
        self.dot(*self)
    }

    /// Calculates the length (magnitude) of the quaternion.
    #[inline]
    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Returns a normalized version of the quaternion with a length of 1.
    ///
    /// A zero quaternion yields `NaN` components.
    #[inline]
    pub fn normalize(&self) -> Self {
        *self / self.length()
    }

    /// Computes the conjugate of the quaternion, which negates the vector part.
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
            w: self.w,
        }
    }

    /// Computes the inverse of the quaternion.
    /// For a unit quaternion, the inverse is equal to its conjugate.
    #[inline]
    pub fn inverse(&self) -> Self {
        self.conjugate() / self.length_squared()
    }

    /// Computes the dot product of two quaternions.
    #[inline]
    pub fn dot(&self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Computes the quaternion cross product `(self * rhs - rhs * self) / 2`.
    ///
    /// The result has a zero scalar part and the vector part
    /// `self.xyz() × rhs.xyz()`.
    #[inline]
    pub fn cross(&self, rhs: Self) -> Self {
        (*self * rhs - rhs * *self) * 0.5
    }

    /// Linearly interpolates each component: `a * (1 - t) + b * t`.
    #[inline]
    pub fn lerp(a: Self, b: Self, t: f32) -> Self {
        a * (1.0 - t) + b * t
    }

    /// Linearly interpolates and renormalizes the result.
    #[inline]
    pub fn nlerp(a: Self, b: Self, t: f32) -> Self {
        Self::lerp(a, b, t).normalize()
    }

    /// Performs a Spherical Linear Interpolation (Slerp) between two quaternions,
    /// using [`Quaternion::DEFAULT_SLERP_THRESHOLD`].
    #[inline]
    pub fn slerp(a: Self, b: Self, t: f32) -> Self {
        Self::slerp_with_threshold(a, b, t, Self::DEFAULT_SLERP_THRESHOLD)
    }

    /// Performs a Spherical Linear Interpolation (Slerp) between two quaternions.
    ///
    /// Slerp follows the shortest path on the surface of the 4D sphere: `b` is
    /// negated when the rotations are more than 90 degrees apart. When the
    /// inputs are closer than `threshold` (as `|dot|`), the result is an
    /// [`nlerp`](Quaternion::nlerp) instead. `t` is not clamped.
    pub fn slerp_with_threshold(a: Self, b: Self, t: f32, threshold: f32) -> Self {
        let mut cos_theta = a.dot(b);
        let mut b = b;
        if cos_theta < 0.0 {
            cos_theta = -cos_theta;
            b = -b;
        }

        if cos_theta.abs() >= threshold {
            log::trace!("slerp: |dot| = {cos_theta} reaches {threshold}, using nlerp");
            return Self::nlerp(a, b, t);
        }

        let angle = cos_theta.acos();
        let sin_theta = angle.sin();
        let scale_a = ((1.0 - t) * angle).sin() / sin_theta;
        let scale_b = (t * angle).sin() / sin_theta;
        a * scale_a + b * scale_b
    }
}

// --- Operator Overloads ---

impl Default for Quaternion {
    /// Returns the identity quaternion, representing no rotation.
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Quaternion> for Quaternion {
    type Output = Self;
    /// Combines two rotations using the Hamilton product.
    /// Note that quaternion multiplication is not commutative.
    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            x: self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            y: self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            z: self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
            w: self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        }
    }
}

impl MulAssign<Quaternion> for Quaternion {
    /// Combines this rotation with another.
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Mul<Float3> for Quaternion {
    type Output = Float3;
    /// Rotates a `Float3` as `q * (v, 0) * q⁻¹`.
    ///
    /// The inverse divides by the squared length, so a non-unit quaternion
    /// rotates like its normalized form.
    #[inline]
    fn mul(self, rhs: Float3) -> Self::Output {
        (self * Quaternion::new(rhs.x, rhs.y, rhs.z, 0.0) * self.inverse()).xyz()
    }
}

impl Add<Quaternion> for Quaternion {
    type Output = Self;
    /// Adds two quaternions component-wise.
    /// Note: This is not a standard rotation operation.
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
            w: self.w + rhs.w,
        }
    }
}

impl Sub<Quaternion> for Quaternion {
    type Output = Self;
    /// Subtracts two quaternions component-wise.
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
            w: self.w - rhs.w,
        }
    }
}

impl Mul<f32> for Quaternion {
    type Output = Self;
    /// Scales all components of the quaternion by a scalar.
    #[inline]
    fn mul(self, scalar: f32) -> Self::Output {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
            w: self.w * scalar,
        }
    }
}

impl Div<f32> for Quaternion {
    type Output = Self;
    /// Divides all components of the quaternion by a scalar.
    #[inline]
    fn div(self, scalar: f32) -> Self::Output {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
            z: self.z / scalar,
            w: self.w / scalar,
        }
    }
}

impl Neg for Quaternion {
    type Output = Self;
    /// Negates all components of the quaternion.
    #[inline]
    fn neg(self) -> Self::Output {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
            w: -self.w,
        }
    }
}

impl AbsDiffEq for Quaternion {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
            && self.w.abs_diff_eq(&other.w, epsilon)
    }
}

impl RelativeEq for Quaternion {
    fn default_max_relative() -> f32 {
        f32::EPSILON
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
            && self.w.relative_eq(&other.w, epsilon, max_relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Float4;
    use approx::assert_relative_eq;

    fn quat_approx_eq(q1: Quaternion, q2: Quaternion) -> bool {
        let dot = q1.dot(q2).abs();
        approx::relative_eq!(dot, 1.0, epsilon = EPSILON * 10.0)
    }

    #[test]
    fn test_identity_and_default() {
        let q_ident = Quaternion::IDENTITY;
        assert_eq!(q_ident, Quaternion::default());
        assert_eq!(q_ident.xyz(), Float3::ZERO);
        assert_relative_eq!(q_ident.w, 1.0);
        assert_relative_eq!(q_ident.length(), 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_from_axis_angle() {
        let q = Quaternion::from_axis_angle(Float3::Y, 90.0);
        let half = std::f32::consts::FRAC_PI_4;

        assert_relative_eq!(
            q,
            Quaternion::new(0.0, half.sin(), 0.0, half.cos()),
            epsilon = EPSILON
        );
        assert_relative_eq!(q.length(), 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_from_axis_angle_normalizes_axis() {
        let q = Quaternion::from_axis_angle(Float3::new(0.0, 5.0, 0.0), 90.0);
        let expected = Quaternion::from_axis_angle(Float3::Y, 90.0);
        assert_relative_eq!(q, expected, epsilon = EPSILON);
    }

    #[test]
    fn test_from_mat4_identity() {
        let q = Quaternion::from_mat4(&Mat4::IDENTITY);
        assert!(quat_approx_eq(q, Quaternion::IDENTITY));
    }

    #[test]
    fn test_from_mat4_simple_rotations() {
        for axis in [Float3::X, Float3::Y, Float3::Z] {
            let m = Mat4::from_axis_angle(axis, 45.0);
            let expected = Quaternion::from_axis_angle(axis, 45.0);
            assert!(quat_approx_eq(Quaternion::from_mat4(&m), expected));
        }
    }

    #[test]
    fn test_from_mat4_every_branch() {
        // Half turns have a non-positive trace and land on each diagonal branch.
        for axis in [Float3::X, Float3::Y, Float3::Z] {
            let q = Quaternion::from_axis_angle(axis, 180.0);
            let m = Mat4::from_quat(q);
            assert!(quat_approx_eq(Quaternion::from_mat4(&m), q));
        }
    }

    #[test]
    fn test_matrix_to_quat_and_back() {
        let axis = Float3::new(-1.0, 2.5, 0.7);
        let q_orig = Quaternion::from_axis_angle(axis, 106.0);
        let m_from_q = q_orig.to_mat4();

        let q_from_m = Quaternion::from_mat4(&m_from_q);
        let m_from_q_again = Mat4::from_quat(q_from_m);

        assert!(quat_approx_eq(q_orig, q_from_m));

        let v = Float4::new(1.0, 1.0, 1.0, 1.0);
        assert_relative_eq!(m_from_q * v, m_from_q_again * v, epsilon = EPSILON);
    }

    #[test]
    fn test_conjugate_and_inverse_unit() {
        let q = Quaternion::from_axis_angle(Float3::new(1.0, 2.0, 3.0), 43.0);
        let q_conj = q.conjugate();

        assert_relative_eq!(q_conj, q.inverse(), epsilon = EPSILON);
        assert_relative_eq!(q_conj, Quaternion::new(-q.x, -q.y, -q.z, q.w));
    }

    #[test]
    fn test_inverse_non_unit() {
        let q = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        assert_relative_eq!(q * q.inverse(), Quaternion::IDENTITY, epsilon = EPSILON);
    }

    #[test]
    fn test_multiplication_identity() {
        let q = Quaternion::from_axis_angle(Float3::Y, 90.0);
        assert_relative_eq!(q * Quaternion::IDENTITY, q, epsilon = EPSILON);
        assert_relative_eq!(Quaternion::IDENTITY * q, q, epsilon = EPSILON);

        let mut q_mut = q;
        q_mut *= Quaternion::IDENTITY;
        assert_relative_eq!(q_mut, q, epsilon = EPSILON);
    }

    #[test]
    fn test_multiplication_composition() {
        let rot_y = Quaternion::from_axis_angle(Float3::Y, 90.0);
        let rot_x = Quaternion::from_axis_angle(Float3::X, 90.0);
        let combined_rot = rot_x * rot_y; // Y then X

        let v_start = Float3::Z;
        let v_after_x_then_y = rot_x * (rot_y * v_start);
        let v_combined = combined_rot * v_start;

        assert_relative_eq!(v_after_x_then_y, Float3::X, epsilon = EPSILON);
        assert_relative_eq!(v_combined, v_after_x_then_y, epsilon = EPSILON);
    }

    #[test]
    fn test_rotate_vector() {
        let q = Quaternion::from_axis_angle(Float3::Y, 90.0);
        assert_relative_eq!(q * Float3::X, Float3::new(0.0, 0.0, -1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_rotate_vector_non_unit_keeps_length() {
        let q = Quaternion::from_axis_angle(Float3::Z, 90.0) * 2.0;
        // The inverse divides by |q|², so the vector keeps its length.
        assert_relative_eq!(q * Float3::X, Float3::Y, epsilon = EPSILON);
    }

    #[test]
    fn test_normalization() {
        let q_norm = Quaternion::new(1.0, 2.0, 3.0, 4.0).normalize();
        assert_relative_eq!(q_norm.length(), 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_normalize_zero_quaternion_is_nan() {
        let q_norm = Quaternion::new(0.0, 0.0, 0.0, 0.0).normalize();
        assert!(q_norm.w.is_nan());
    }

    #[test]
    fn test_dot_product() {
        let q1 = Quaternion::from_axis_angle(Float3::X, 30.0);
        let q3 = Quaternion::from_axis_angle(Float3::Y, 30.0);
        let q4 = Quaternion::from_axis_angle(Float3::X, -30.0);

        assert_relative_eq!(q1.dot(q1), 1.0, epsilon = EPSILON);
        assert!(q1.dot(q3).abs() < 1.0 - EPSILON);
        assert_relative_eq!(q1.dot(q4), 30f32.to_radians().cos(), epsilon = EPSILON);
    }

    #[test]
    fn test_cross() {
        let a = Quaternion::new(1.0, 0.0, 0.0, 0.5);
        let b = Quaternion::new(0.0, 1.0, 0.0, 2.0);
        assert_relative_eq!(a.cross(b), Quaternion::new(0.0, 0.0, 1.0, 0.0));
    }

    #[test]
    fn test_from_rotation() {
        let q = Quaternion::from_rotation(Float3::X, Float3::Y);
        assert_relative_eq!(q * Float3::X, Float3::Y, epsilon = EPSILON);
        assert_relative_eq!(q, Quaternion::from_axis_angle(Float3::Z, 90.0), epsilon = EPSILON);

        assert_eq!(Quaternion::from_rotation(Float3::Y, Float3::Y), Quaternion::IDENTITY);
    }

    #[test]
    fn test_from_rotation_opposite() {
        let q = Quaternion::from_rotation(Float3::Z, -Float3::Z);
        assert_relative_eq!(q * Float3::Z, -Float3::Z, epsilon = EPSILON);

        // X × X vanishes, so the axis comes from Y instead.
        let q = Quaternion::from_rotation(Float3::X, -Float3::X);
        assert_relative_eq!(q * Float3::X, -Float3::X, epsilon = EPSILON);
        assert!(approx::relative_eq!(q.w, 0.0, epsilon = EPSILON));
    }

    #[test]
    fn test_slerp_endpoints() {
        let q_start = Quaternion::IDENTITY;
        let q_end = Quaternion::from_axis_angle(Float3::Z, 90.0);

        assert_relative_eq!(Quaternion::slerp(q_start, q_end, 0.0), q_start, epsilon = EPSILON);
        assert_relative_eq!(Quaternion::slerp(q_start, q_end, 1.0), q_end, epsilon = EPSILON);
    }

    #[test]
    fn test_slerp_midpoint() {
        let q_start = Quaternion::IDENTITY;
        let q_end = Quaternion::from_axis_angle(Float3::Z, 90.0);
        let q_half = Quaternion::slerp(q_start, q_end, 0.5);
        let expected = Quaternion::from_axis_angle(Float3::Z, 45.0);
        assert_relative_eq!(q_half, expected, epsilon = EPSILON);
    }

    #[test]
    fn test_slerp_takes_shortest_path() {
        let q_start = Quaternion::IDENTITY;
        let q_end = -Quaternion::from_axis_angle(Float3::Z, 90.0);
        let q_half = Quaternion::slerp(q_start, q_end, 0.5);
        let expected = Quaternion::from_axis_angle(Float3::Z, 45.0);
        assert_relative_eq!(q_half, expected, epsilon = EPSILON);
    }

    #[test]
    fn test_slerp_close_inputs_use_nlerp() {
        let a = Quaternion::from_axis_angle(Float3::X, 10.0);
        let b = Quaternion::from_axis_angle(Float3::X, 10.5);
        let expected = Quaternion::nlerp(a, b, 0.25);
        assert_eq!(Quaternion::slerp(a, b, 0.25), expected);

        // Lowering the threshold below the dot product forces nlerp as well.
        let c = Quaternion::from_axis_angle(Float3::X, 60.0);
        assert_eq!(
            Quaternion::slerp_with_threshold(a, c, 0.5, 0.5),
            Quaternion::nlerp(a, c, 0.5)
        );
    }

    #[test]
    fn test_lerp() {
        let a = Quaternion::new(0.0, 0.0, 0.0, 2.0);
        let b = Quaternion::new(2.0, 0.0, 0.0, 0.0);
        assert_eq!(Quaternion::lerp(a, b, 0.5), Quaternion::new(1.0, 0.0, 0.0, 1.0));
        assert_relative_eq!(Quaternion::nlerp(a, b, 0.5).length(), 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_scalar_ops() {
        let q = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(q / 2.0, q * 0.5);
        assert_eq!(q + (-q), Quaternion::new(0.0, 0.0, 0.0, 0.0));
        assert_eq!(q - q, Quaternion::new(0.0, 0.0, 0.0, 0.0));
    }
}
